//! Input quality guards.
//!
//! Two independent checks applied at different pipeline points: the garbage
//! filter runs on every inbound message before any stage logic; the tone
//! filter runs only inside registration stages, after garbage filtering.

pub mod garbage;
pub mod tone;

pub use garbage::{GarbageFilter, strict_reply};
pub use tone::{Classification, ToneFilter};
