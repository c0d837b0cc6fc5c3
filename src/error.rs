//! Error types for the intake agent.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Registration-store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Chat-transport errors. Always recovered locally: logged, never surfaced
/// to the webhook caller or the chat participant.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to send message: {reason}")]
    SendFailed { reason: String },

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Pipeline-boundary errors. Caught in the dispatcher worker so the webhook
/// always acknowledges success to the upstream platform.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for the agent.
pub type Result<T> = std::result::Result<T, Error>;
