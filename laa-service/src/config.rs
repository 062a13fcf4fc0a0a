use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    MissingVar(&'static str),

    #[error("{name} has invalid value {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// Process-wide settings, read once at start-up.
#[derive(Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub perplexity_api_key: String,
    pub perplexity_model: String,
    pub citation_timeout: Duration,
    pub citation_retry: bool,
    pub citation_cost_usd: f64,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let perplexity_api_key = lookup("PERPLEXITY_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("PERPLEXITY_API_KEY"))?;

        Ok(Self {
            port: parse_or(&lookup, "PORT", 5000)?,
            perplexity_api_key,
            perplexity_model: lookup("PERPLEXITY_MODEL").unwrap_or_else(|| "sonar-pro".to_string()),
            citation_timeout: Duration::from_millis(parse_or(&lookup, "CITATION_TIMEOUT_MS", 4000)?),
            citation_retry: parse_or(&lookup, "CITATION_RETRY", true)?,
            citation_cost_usd: parse_or(&lookup, "CITATION_COST_USD", 0.002)?,
        })
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        None => Ok(default),
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("port", &self.port)
            .field("perplexity_api_key", &"<redacted>")
            .field("perplexity_model", &self.perplexity_model)
            .field("citation_timeout", &self.citation_timeout)
            .field("citation_retry", &self.citation_retry)
            .field("citation_cost_usd", &self.citation_cost_usd)
            .finish()
    }
}
