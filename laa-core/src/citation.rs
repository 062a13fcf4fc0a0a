//! Live regulatory citations.
//!
//! A citation is an annotation on a finished verdict, never an input to it.
//! Lookups are bounded by a total timeout and fail soft.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::asset::AssetType;
use crate::error::CitationError;
use crate::verdict::Verdict;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(250);

/// Text returned by a citation provider, with what the call cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    pub text: String,
    pub cost_usd: f64,
}

/// An external source of up-to-date regulatory citations.
#[async_trait]
pub trait CitationService: Send + Sync {
    async fn fetch_citation(&self, query: &str) -> Result<Citation, CitationError>;
}

/// Query sent to the citation provider for an asset type, stamped with the
/// month it is asked in.
pub fn citation_query(asset_type: AssetType, now: DateTime<Utc>) -> String {
    let topic = match asset_type {
        AssetType::Gold => "Latest RBI gold loan LTV limits and regulations",
        AssetType::Property => "Latest RBI property mortgage circle rate rules",
        AssetType::Shares => "Latest RBI SEBI share pledge lending limits",
    };
    format!("{} {}", topic, now.format("%b %Y"))
}

/// Best-effort citation lookup with a bounded wait.
#[derive(Clone)]
pub struct LiveCitations {
    service: Arc<dyn CitationService>,
    timeout: Duration,
    retry: bool,
    backoff: Duration,
}

impl LiveCitations {
    pub fn new(service: Arc<dyn CitationService>) -> Self {
        Self {
            service,
            timeout: DEFAULT_TIMEOUT,
            retry: false,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Total time allowed for the lookup, including any retry.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry once after `backoff` if the first attempt fails.
    pub fn with_retry(mut self, backoff: Duration) -> Self {
        self.retry = true;
        self.backoff = backoff;
        self
    }

    pub async fn fetch(&self, query: &str) -> Result<Citation, CitationError> {
        let attempts = async {
            match self.service.fetch_citation(query).await {
                Ok(citation) => Ok(citation),
                Err(e) if self.retry => {
                    warn!(error = %e, "Citation lookup failed, retrying once");
                    tokio::time::sleep(self.backoff).await;
                    self.service.fetch_citation(query).await
                }
                Err(e) => Err(e),
            }
        };

        tokio::time::timeout(self.timeout, attempts)
            .await
            .map_err(|_| CitationError::Timeout(self.timeout.as_millis()))?
    }

    /// Attaches a live citation to `verdict` if one arrives in time.
    ///
    /// Failures are logged and otherwise ignored.
    pub async fn annotate(&self, verdict: &mut Verdict, now: DateTime<Utc>) {
        let query = citation_query(verdict.asset_type, now);
        match self.fetch(&query).await {
            Ok(citation) => {
                info!(
                    asset_type = %verdict.asset_type,
                    cost_usd = citation.cost_usd,
                    "Attached live citation"
                );
                verdict.attach_citation(query, citation);
            }
            Err(e) => {
                warn!(
                    asset_type = %verdict.asset_type,
                    error = %e,
                    "Live citation unavailable, continuing without it"
                );
            }
        }
    }
}
