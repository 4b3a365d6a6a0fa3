use clap::Parser;
use pastenow_lib::bootstrap::{self, tracing::init_tracing_subscriber};
use pastenow_lib::{run_command, Cli};
use pn_platform::DirsAppDirsAdapter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = bootstrap::load_settings(cli.config.as_deref(), &DirsAppDirsAdapter::new())?;
    let logs_dir = settings.file_logging.then_some(settings.logs_dir.as_path());
    init_tracing_subscriber(logs_dir)?;

    tracing::debug!(?settings, "Settings resolved");
    run_command(cli.resolved_command(), &settings).await
}
