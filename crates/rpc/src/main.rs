use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use farecast_core::{ArtifactSet, ArtifactStore};
use farecast_rpc::{start_server, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("farecast-server")
        .about("Flight fare prediction server")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Path to a TOML configuration file"),
        )
        .arg(
            Arg::new("listen")
                .long("listen")
                .value_name("ADDR")
                .help("Override the configured listen address"),
        )
        .get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let mut config = ServerConfig::load(config_path.as_deref())?;
    if let Some(listen) = matches.get_one::<String>("listen") {
        config.listen_addr = listen.clone();
    }

    init_tracing(&config.log_format);

    // Artifact loading is fatal by design: a process that cannot load a
    // complete, consistent artifact set must not begin serving.
    let artifacts = ArtifactSet::load(&config.transform_path, &config.model_path)
        .with_context(|| {
            format!(
                "failed to load artifacts ({} / {})",
                config.transform_path.display(),
                config.model_path.display()
            )
        })?;

    info!(
        listen_addr = %config.listen_addr,
        transform_hash = %artifacts.transform_hash,
        model_hash = %artifacts.model_hash,
        "starting farecast server"
    );

    let state = AppState::new(ArtifactStore::new(artifacts));
    start_server(state, &config.listen_addr, &config.allowed_origins).await
}

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
