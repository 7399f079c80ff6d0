use std::path::PathBuf;

use anyhow::Context;
use bookshelf_kernel::{settings::Settings, InitCtx};
use clap::Parser;

/// In-memory bookshelf HTTP API
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    /// Directory holding base.toml and {environment}.toml
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Address to bind, overriding configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding configuration
    #[arg(long)]
    port: Option<u16>,
}

impl Cli {
    fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_with_config_dir(cli.config_dir.clone())
        .with_context(|| "failed to load bookshelf settings")?;
    cli.apply(&mut settings);

    bookshelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "bookshelf bootstrap starting"
    );

    let registry = bookshelf_app::build_registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = bookshelf_http::start_server(&registry, &settings).await;
    if let Err(e) = &served {
        tracing::error!(error = ?e, "HTTP server terminated");
    }

    registry.stop_all().await?;
    served
}
