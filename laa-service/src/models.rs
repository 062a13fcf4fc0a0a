use chrono::{DateTime, Utc};
use laa_core::format::{format_inr, format_percent};
use laa_core::{AssetType, CitationAnnotation, ValidationError, Verdict};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub approved: bool,
    pub max_eligible: String,
    pub ltv_used: String,
    pub ltv_limit: String,
    pub rbi_refs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perplexity_update: Option<CitationAnnotation>,
    pub reasons: Vec<String>,
    pub asset_type: AssetType,
    pub timestamp: String,
}

impl CheckResponse {
    pub fn from_verdict(verdict: Verdict, at: DateTime<Utc>) -> Self {
        Self {
            approved: verdict.approved,
            max_eligible: format_inr(verdict.max_eligible),
            ltv_used: format_percent(verdict.ltv_used, 1),
            ltv_limit: format_percent(verdict.ltv_limit, 0),
            rbi_refs: verdict.rbi_refs,
            perplexity_update: verdict.citation,
            reasons: verdict.reasons,
            asset_type: verdict.asset_type,
            timestamp: at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self {
            error: err.to_string(),
            field: Some(err.field().to_string()),
        }
    }
}
