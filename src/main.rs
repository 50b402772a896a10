use studydesk::commands::Cli;
use studydesk::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    Cli::menu().await
}

/// Installs the `tracing` subscriber when debug mode is on. In normal mode
/// the message macros print directly and no subscriber is needed.
fn init_tracing() {
    if !is_debug_mode() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studydesk=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
