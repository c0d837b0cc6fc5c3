//! Message pipeline — orchestration and per-participant dispatch.

pub mod dispatcher;
pub mod processor;

pub use dispatcher::Dispatcher;
pub use processor::MessageProcessor;
