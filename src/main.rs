mod config;
mod error;
mod export;
mod models;
mod parse;
mod render;
mod run;
mod store;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        run::print_usage();
        return Ok(());
    }

    let settings = config::Settings::resolve(run::flag_value(&args, "--data-dir"))?;
    let ledger = store::Ledger::open(&settings.data_dir)?;
    run::as_cli(&args, &ledger)
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` overrides the
/// default level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pocketledger=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
