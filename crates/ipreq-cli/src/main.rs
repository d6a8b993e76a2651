use clap::Parser;
use std::path::PathBuf;

mod run;

/// Generate carrier disclosure requests from a subscriber IP-activity
/// report.
#[derive(Parser)]
#[command(name = "ipreq", version)]
struct Cli {
    /// Subscriber activity report (HTML export)
    #[arg(long, value_name = "FILE")]
    report: PathBuf,

    /// Directory holding the carrier templates
    #[arg(long, default_value = "templates")]
    templates: PathBuf,

    /// Output directory for generated artifacts
    #[arg(long, default_value = "Generated_Letters")]
    out: PathBuf,

    /// Carrier resolution cache file
    #[arg(long, default_value = "isp_cache.json")]
    cache: PathBuf,

    /// FIR number for the letter subject line
    #[arg(long, default_value = "")]
    fir_no: String,

    /// FIR date for the letter subject line
    #[arg(long, default_value = "")]
    fir_date: String,

    /// RDAP service base URL
    #[arg(long, default_value = "https://rdap.org", env = "IPREQ_RDAP_URL")]
    rdap_url: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("ipreq v{}", env!("CARGO_PKG_VERSION"));
    let cli = Cli::parse();
    run::run(&cli)
}
