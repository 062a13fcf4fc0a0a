use async_trait::async_trait;
use laa_core::{Citation, CitationError, CitationService};
use rig::{agent::Agent, client::CompletionClient, completion::Prompt, providers::perplexity};

use crate::config::ServiceConfig;

const PREAMBLE: &str = "You are a regulatory research assistant for Indian lending. \
Answer with the single most relevant, current RBI or SEBI circular or master direction \
for the question, including its reference number and date, in one or two sentences.";

/// Citation lookups backed by Perplexity's online models.
pub struct PerplexityCitations {
    agent: Agent<perplexity::CompletionModel>,
    cost_per_request_usd: f64,
}

impl PerplexityCitations {
    pub fn new(api_key: &str, model: &str, cost_per_request_usd: f64) -> Self {
        let client = perplexity::Client::new(api_key);
        let agent = client.agent(model).preamble(PREAMBLE).build();
        Self {
            agent,
            cost_per_request_usd,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            &config.perplexity_api_key,
            &config.perplexity_model,
            config.citation_cost_usd,
        )
    }
}

#[async_trait]
impl CitationService for PerplexityCitations {
    async fn fetch_citation(&self, query: &str) -> Result<Citation, CitationError> {
        let response = self
            .agent
            .prompt(query)
            .await
            .map_err(|e| CitationError::Provider(e.to_string()))?;

        let text = response.trim();
        if text.is_empty() {
            return Err(CitationError::Malformed("empty completion".to_string()));
        }

        Ok(Citation {
            text: text.to_string(),
            cost_usd: self.cost_per_request_usd,
        })
    }
}
