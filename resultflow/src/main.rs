//! Demo driver: fetches one URL with every composition style.
//!
//! Usage: `resultflow [URL]`. Failures of the fetch itself are rendered, not
//! returned; only configuration and setup errors end the process non-zero.

use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use resultflow::config::{ResultflowConfig, DEFAULT_URL};
use resultflow::observability::init_tracing;
use resultflow::pipeline::{CompositionStyle, Pipeline};
use resultflow::present::{render, ConsolePresenter};
use resultflow::transport::HttpTransport;

fn banner(title: &str) {
    println!("\n======= {title} =======\n");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ResultflowConfig::from_env().context("loading configuration")?;
    init_tracing(config.log_format).context("installing tracing subscriber")?;

    let url = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_URL.to_string());
    let transport = HttpTransport::new(config.transport.clone()).context("building HTTP client")?;
    let pipeline = Pipeline::from_config(Arc::new(transport), &config).context("building pipeline")?;
    info!(url = %url, "Starting demo");

    banner("With FutureResult");
    render(pipeline.run(&url, CompositionStyle::Transformer).await, &ConsolePresenter).ok();

    banner("Without FutureResult");
    render(pipeline.run(&url, CompositionStyle::Manual).await, &ConsolePresenter).ok();

    banner("Without FutureResult, presenting inline");
    pipeline.fetch_and_present(&url, Arc::new(ConsolePresenter)).await.ok();

    Ok(())
}
