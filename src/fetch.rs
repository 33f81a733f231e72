use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::query::QueryParams;
use crate::settings::Settings;

/// Something that can return the HTML of one result page.
pub trait PageSource {
    fn fetch(&self, base_url: &str, params: &QueryParams) -> Result<String>;
}

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        // reqwest's blocking client defaults to 30s; an unset timeout means none at all.
        builder = builder.timeout(settings.timeout_secs.map(Duration::from_secs));
        let client = builder.build().context("Failed to build HTTP client")?;
        Ok(HttpSource { client })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, base_url: &str, params: &QueryParams) -> Result<String> {
        debug!(base_url, query = %params.to_query_string(), "GET");
        let response = self
            .client
            .get(base_url)
            .query(&params.pairs())
            .send()
            .with_context(|| format!("Request to {} failed", base_url))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Non-success response, extracting anyway");
        }

        response.text().context("Failed to read response body")
    }
}
