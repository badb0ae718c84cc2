mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use launch_core::RecordStore;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use config::{DashConfig, Frontend};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = DashConfig::from_env()?;
    info!(?config, "starting launch dashboard");

    // Fail before serving anything if the table cannot be loaded.
    let store = Arc::new(
        RecordStore::from_path(&config.data_path)
            .with_context(|| format!("cannot start without {}", config.data_path.display()))?,
    );

    match config.frontend {
        Frontend::Web => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start the async runtime")?;
            runtime.block_on(launch_web::serve(store, config.addr))?;
        }
        Frontend::Native => launch_render::run(store)?,
    }
    Ok(())
}
