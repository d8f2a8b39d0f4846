use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use maildir_rank_addr::{COUNT_CHART_FILE, Config, DATE_CHART_FILE, generate_report};

#[derive(Parser, Debug)]
#[command(
    name = "address-stats",
    about = "Chart how many addresses and messages a maildir collected over time"
)]
struct Args {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to write the charts to. Replaces `report_dir` from the
    /// config file.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(dir) = args.out_dir {
        config.report_dir = dir;
    }
    let config = config.expand_paths();
    config.validate()?;

    let series = generate_report(&config)?;
    println!(
        "{} messages charted into {} and {}",
        series.len(),
        config.report_dir.join(DATE_CHART_FILE).display(),
        config.report_dir.join(COUNT_CHART_FILE).display()
    );
    Ok(())
}
