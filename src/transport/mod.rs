//! Chat transport abstraction and the Telegram adapter.

pub mod paced;
pub mod telegram;

use async_trait::async_trait;

use crate::error::TransportError;

/// Outbound message I/O. Implementations are pure transport — pacing and
/// error swallowing live in [`paced::PacedSender`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Transport name for logging.
    fn name(&self) -> &str;

    /// Show a typing indicator to the participant, if the transport has one.
    async fn send_typing(&self, participant_id: &str) -> Result<(), TransportError>;

    /// Deliver a text message. Text may carry lightweight bold/italic
    /// markers; transports degrade to plain text when markup fails.
    async fn send_message(&self, participant_id: &str, text: &str) -> Result<(), TransportError>;
}

pub use paced::PacedSender;
pub use telegram::TelegramTransport;
