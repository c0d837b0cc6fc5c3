use std::sync::Arc;

use intake_agent::cadence::CadenceConfig;
use intake_agent::config::AgentConfig;
use intake_agent::pipeline::{Dispatcher, MessageProcessor};
use intake_agent::sales::NoopSalesFlow;
use intake_agent::server::{self, AppState};
use intake_agent::session::SessionStore;
use intake_agent::store::{LibSqlStore, RegistrationStore};
use intake_agent::transport::{ChatTransport, PacedSender, TelegramTransport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AgentConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!("  export TELEGRAM_BOT_TOKEN=123456:ABC-...");
        std::process::exit(1);
    });

    eprintln!("🤖 Intake Agent v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Webhook:  http://0.0.0.0:{}/webhook", config.port);
    eprintln!("   Status:   http://0.0.0.0:{}/api/intake/<id>/status", config.port);
    eprintln!("   Database: {}", config.db_path);

    // ── Store ───────────────────────────────────────────────────────────
    let db_path = std::path::Path::new(&config.db_path);
    let store: Arc<dyn RegistrationStore> = Arc::new(
        LibSqlStore::new_local(db_path).await.unwrap_or_else(|e| {
            eprintln!("Error: Failed to open database at {}: {}", config.db_path, e);
            std::process::exit(1);
        }),
    );

    // ── Transport + pipeline ────────────────────────────────────────────
    let transport: Arc<dyn ChatTransport> =
        Arc::new(TelegramTransport::new(config.bot_token.clone()));
    let sender = PacedSender::new(transport, CadenceConfig::default());

    let sessions = Arc::new(SessionStore::new());
    let processor = Arc::new(MessageProcessor::new(
        Arc::clone(&sessions),
        Arc::clone(&store),
        sender,
        Arc::new(NoopSalesFlow),
    ));
    let dispatcher = Arc::new(Dispatcher::new(processor));

    // ── HTTP shell ──────────────────────────────────────────────────────
    let app = server::routes(AppState {
        dispatcher,
        sessions,
        store,
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, "Webhook server started");
    axum::serve(listener, app).await?;

    Ok(())
}
