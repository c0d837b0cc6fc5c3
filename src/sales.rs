//! Sales-flow collaborator — a pluggable handler consulted before the
//! registration pipeline.
//!
//! The concrete flow ships separately; the agent only needs the trigger
//! predicate and the handler. A triggered-and-handled message short-circuits
//! the rest of the pipeline.

use async_trait::async_trait;

use crate::session::Session;
use crate::transport::PacedSender;

/// Everything a sales handler may need for one message.
pub struct SalesContext<'a> {
    pub participant_id: &'a str,
    pub text: &'a str,
    pub session: &'a mut Session,
    pub sender: &'a PacedSender,
}

/// Pluggable sales flow. Invoked only on input that passed the garbage
/// filter.
#[async_trait]
pub trait SalesFlow: Send + Sync {
    /// Whether this message should enter the sales flow.
    fn is_trigger(&self, text: &str) -> bool;

    /// Handle a triggered message. Returns true if fully handled, telling
    /// the pipeline to stop here.
    async fn handle(&self, ctx: SalesContext<'_>) -> bool;
}

/// Default flow: never triggers.
pub struct NoopSalesFlow;

#[async_trait]
impl SalesFlow for NoopSalesFlow {
    fn is_trigger(&self, _text: &str) -> bool {
        false
    }

    async fn handle(&self, _ctx: SalesContext<'_>) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_never_triggers() {
        let flow = NoopSalesFlow;
        assert!(!flow.is_trigger("скрипт продаж"));
        assert!(!flow.is_trigger(""));
    }
}
