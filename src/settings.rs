use anyhow::Result;
use config::Config;
use serde::Deserialize;

const ENV_PREFIX: &str = "PETITION";

/// HTTP client settings, read from `PETITION_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub user_agent: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("user_agent", default_user_agent())?
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_falls_back_to_defaults() {
        // Only meaningful when the test environment sets no PETITION_* overrides.
        if std::env::vars().any(|(k, _)| k.starts_with("PETITION_")) {
            return;
        }
        let s = Settings::load().unwrap();
        assert_eq!(s.user_agent, default_user_agent());
        assert!(s.user_agent.starts_with("petition_scraper/"));
        assert_eq!(s.timeout_secs, None);
    }
}
