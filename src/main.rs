use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use maildir_rank_addr::{Config, generate_addressbook};

#[derive(Parser, Debug)]
#[command(
    name = "maildir-rank-addr",
    about = "Rank maildir correspondents into an address-completion file"
)]
struct Args {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maildir root to scan; repeat to scan several. Replaces `maildirs`
    /// from the config file.
    #[arg(long = "maildir")]
    maildirs: Vec<PathBuf>,

    /// Where to write the address book.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if !args.maildirs.is_empty() {
        config.maildirs = args.maildirs;
    }
    if args.output.is_some() {
        config.output_file = args.output;
    }
    let config = config.expand_paths();
    config.validate()?;

    let summary = generate_addressbook(&config)?;
    println!(
        "{} addresses written to {}",
        summary.written,
        config.output_path().display()
    );
    Ok(())
}
