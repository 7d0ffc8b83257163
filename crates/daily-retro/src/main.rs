//! daily-retro: turn yesterday's GitHub commits into a retrospective
//!
//! The binary parses the configuration, sets up logging, and runs the
//! pipeline once on a current-thread runtime.

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use daily_retro::config::Config;
use daily_retro::pipeline::Pipeline;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    let settings = match config.validate() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e).context("invalid configuration");
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    info!(date = %settings.date, summarizer = %config.summarizer, "Starting daily-retro");

    let outcome = runtime.block_on(async {
        let pipeline = Pipeline::from_settings(&settings)?;
        pipeline.run().await
    });

    match outcome {
        Ok(outcome) => {
            if let Some(path) = &outcome.local_path {
                info!(path = %path.display(), "Local report written");
            }
            if let Some(url) = &outcome.page_url {
                info!(url = %url, "Notion page created");
            }
            info!(
                skipped = outcome.diagnostics.len(),
                reported = outcome.report.is_some(),
                "Daily retrospective complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Daily retrospective failed");
            Err(e).context("daily retrospective failed")
        }
    }
}
