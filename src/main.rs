mod error;
mod extract;
mod fetch;
mod query;
mod run;
mod settings;
mod sink;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use error::ScrapeError;
use fetch::HttpSource;
use run::Job;
use settings::Settings;

/// Scrape petition signatures from peticie.com into a CSV file.
#[derive(Parser)]
#[command(name = "petition_scraper", version)]
struct Cli {
    /// Signatures page URL, e.g. https://www.peticie.com/signatures.php?tunnus=<name>
    url: String,

    /// The starting page number for scraping
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// The number of rows to scrape per page
    #[arg(long, default_value_t = 100)]
    num_rows: u32,

    /// Output CSV file (default: <petition name from URL>.csv)
    #[arg(long)]
    csv_filename: Option<PathBuf>,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let job = match Job::prepare(&cli.url, cli.page, cli.num_rows, cli.csv_filename) {
        Ok(job) => job,
        Err(ScrapeError::Config(msg)) => {
            eprintln!("{}", msg);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match scrape(&job) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn scrape(job: &Job) -> Result<()> {
    let settings = Settings::load()?;
    let source = HttpSource::new(&settings)?;

    println!("URL: {}", job.display_url());
    let stats = run::run(job, &source)?;
    stats.print();
    Ok(())
}
