use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use tracing::info;

use crate::error::ScrapeError;
use crate::extract;
use crate::fetch::PageSource;
use crate::query::{self, QueryParams};
use crate::sink;

const PETITION_PARAM: &str = "tunnus";
const PAGE_PARAM: &str = "page_number";
const ROWS_PARAM: &str = "num_rows";

/// Everything the loop needs, resolved before any file is touched.
#[derive(Debug, Clone)]
pub struct Job {
    pub base_url: String,
    pub params: QueryParams,
    pub output: PathBuf,
    pub start_page: u32,
}

impl Job {
    pub fn prepare(
        url: &str,
        start_page: u32,
        num_rows: u32,
        csv_filename: Option<PathBuf>,
    ) -> Result<Self, ScrapeError> {
        let (base_url, mut params) = query::decompose(url)?;
        params.set(ROWS_PARAM, num_rows);
        let output = match csv_filename {
            Some(path) => path,
            None => output_from_params(&params)?,
        };
        Ok(Job {
            base_url,
            params,
            output,
            start_page,
        })
    }

    /// First request URL, as it will be sent.
    pub fn display_url(&self) -> String {
        let mut params = self.params.clone();
        params.set(PAGE_PARAM, self.start_page);
        format!("{}?{}", self.base_url, params.to_query_string())
    }
}

fn output_from_params(params: &QueryParams) -> Result<PathBuf, ScrapeError> {
    match params.get(PETITION_PARAM).and_then(|v| v.as_single()) {
        Some(name) => Ok(PathBuf::from(format!("{}.csv", name))),
        None => Err(ScrapeError::Config(
            "Can't find petition name, do you have the right URL?".into(),
        )),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total_rows: usize,
    pub anonymous_rows: usize,
    pub page_number: u32,
}

impl RunStats {
    pub fn print(&self) {
        println!(
            "Rows: {},\nAnonymous: {},\nPages: {}",
            self.total_rows, self.anonymous_rows, self.page_number
        );
    }
}

/// Walk pages from `job.start_page` until a page is empty or has no "next" link.
///
/// Rows are appended to the output after each page, so a failure on a later page
/// leaves every earlier page on disk.
pub fn run<S: PageSource>(job: &Job, source: &S) -> Result<RunStats> {
    sink::initialize(&job.output)?;
    info!(url = %job.display_url(), output = %job.output.display(), "Starting scrape");

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} page {pos} | {msg}")?,
    );

    let mut params = job.params.clone();
    let mut stats = RunStats {
        page_number: job.start_page,
        ..Default::default()
    };

    loop {
        params.set(PAGE_PARAM, stats.page_number);
        pb.set_position(u64::from(stats.page_number));

        let html = source
            .fetch(&job.base_url, &params)
            .with_context(|| format!("Failed to fetch page {}", stats.page_number))?;

        let more = match scrape_page(&html, &job.output, &mut stats)
            .with_context(|| format!("Failed to process page {}", stats.page_number))?
        {
            PageOutcome::Empty => false,
            PageOutcome::Written { has_next } => has_next,
        };
        pb.set_message(format!("{} rows", stats.total_rows));

        if !more {
            break;
        }
        stats.page_number += 1;
    }

    pb.finish_and_clear();
    info!(
        rows = stats.total_rows,
        anonymous = stats.anonymous_rows,
        pages = stats.page_number,
        "Scrape finished"
    );
    Ok(stats)
}

enum PageOutcome {
    Empty,
    Written { has_next: bool },
}

fn scrape_page(html: &str, output: &Path, stats: &mut RunStats) -> Result<PageOutcome> {
    let doc = Html::parse_document(html);
    let records = extract::extract_rows(&doc)?;
    if records.is_empty() {
        return Ok(PageOutcome::Empty);
    }

    sink::append(output, &records)?;
    stats.total_rows += records.len();
    stats.anonymous_rows += records.iter().filter(|r| r.is_anonymous()).count();

    Ok(PageOutcome::Written {
        has_next: extract::has_next_page(&doc),
    })
}
