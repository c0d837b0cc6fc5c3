//! Paced delivery — typing indicator, human-cadence delay, then send.
//!
//! Delivery failures are logged and swallowed: stage transitions and
//! persistence are decided before sending and are never rolled back by a
//! transport fault.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cadence::{busy_notice, CadenceConfig};
use crate::transport::ChatTransport;

/// Sends replies through a transport at a human-looking cadence.
pub struct PacedSender {
    transport: Arc<dyn ChatTransport>,
    cadence: CadenceConfig,
}

impl PacedSender {
    pub fn new(transport: Arc<dyn ChatTransport>, cadence: CadenceConfig) -> Self {
        Self { transport, cadence }
    }

    pub fn cadence(&self) -> &CadenceConfig {
        &self.cadence
    }

    /// Send one reply: typing indicator, length-tiered pause, message.
    /// Never fails; delivery errors are logged and dropped.
    pub async fn send(&self, participant_id: &str, text: &str) {
        if let Err(e) = self.transport.send_typing(participant_id).await {
            debug!(
                transport = self.transport.name(),
                participant = participant_id,
                error = %e,
                "Typing indicator failed"
            );
        }

        tokio::time::sleep(self.cadence.human_delay(text)).await;

        if let Err(e) = self.transport.send_message(participant_id, text).await {
            warn!(
                transport = self.transport.name(),
                participant = participant_id,
                error = %e,
                "Failed to deliver reply"
            );
        }
    }

    /// Send several replies in strict order, each paced independently.
    pub async fn send_all(&self, participant_id: &str, texts: &[&str]) {
        for text in texts {
            self.send(participant_id, text).await;
        }
    }

    /// Send a "briefly occupied" notice, then pause as if attending to
    /// something else. Latency only; the caller proceeds normally after.
    pub async fn send_busy_notice(&self, participant_id: &str) {
        self.send(participant_id, busy_notice()).await;
        tokio::time::sleep(self.cadence.busy_delay()).await;
    }
}
