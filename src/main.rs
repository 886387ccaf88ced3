//! On-demand coretime buyer.
//!
//! Buys on-demand coretime on one relay network, or on every configured
//! network with `all`, by submitting `OnDemand.place_order_keep_alive` and
//! waiting for the order to land in a block.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI [network] [amount] [--config]
//!        │
//!        ▼
//!   ┌──────────┐   ┌──────────────────────────────────────────────────┐
//!   │  config  │──▶│ purchase driver (one network at a time)          │
//!   └──────────┘   │                                                  │
//!                  │  SUBMITTER_KEY_<NET> ─▶ wallet ─▶ keypair        │
//!                  │  amount ─▶ smallest unit                         │
//!                  │  client ─▶ sign & submit ─▶ status updates ──┐   │
//!                  │                                              ▼   │
//!                  │                      resolver ─▶ Success/Failure │
//!                  └──────────────────────────────────────────────────┘
//! ```
//!
//! Failures are logged per network. The process always exits with code 0.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use coretime_buyer::blockchain::RelayOrderPlacer;
use coretime_buyer::config::{load_or_default, ObservabilityConfig};
use coretime_buyer::observability::{logging, metrics};
use coretime_buyer::PurchaseDriver;

#[derive(Parser)]
#[command(name = "coretime-buyer")]
#[command(about = "Buy on-demand coretime on relay chain networks", long_about = None)]
struct Cli {
    /// Network to buy on, or "all" for every configured network.
    network: Option<String>,

    /// Maximum amount to spend, in whole tokens (e.g., 1 or 0.5).
    amount: Option<String>,

    /// TOML file overriding the built-in network table and defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return;
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("coretime-buyer v{} starting", env!("CARGO_PKG_VERSION"));

    if let Some(address) = &config.observability.metrics_address {
        match address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(metrics_address = %address, "Failed to parse metrics address"),
        }
    }

    let placer = RelayOrderPlacer::new(Duration::from_secs(config.submission.connect_timeout_secs));
    let driver = PurchaseDriver::new(&config, placer, |var: &str| std::env::var(var).ok());

    // Failures are already logged per network; the exit code stays 0.
    let _ = driver
        .run(cli.network.as_deref(), cli.amount.as_deref())
        .await;
}
