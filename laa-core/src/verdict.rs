use rust_decimal::Decimal;
use serde::Serialize;

use crate::asset::AssetType;
use crate::citation::Citation;

/// Query and cost of a live citation that made it into the verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationAnnotation {
    pub query: String,
    #[serde(rename = "costUSD")]
    pub cost_usd: f64,
}

/// Outcome of evaluating one declaration.
///
/// A rejection is still a successful evaluation; `reasons` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub asset_type: AssetType,
    pub approved: bool,
    pub max_eligible: Decimal,
    pub ltv_used: Decimal,
    pub ltv_limit: Decimal,
    pub rbi_refs: Vec<String>,
    pub reasons: Vec<String>,
    pub citation: Option<CitationAnnotation>,
}

impl Verdict {
    /// Appends a live citation after the static reference.
    ///
    /// Only the references and annotation change; the decision fields are
    /// left exactly as computed.
    pub fn attach_citation(&mut self, query: impl Into<String>, citation: Citation) {
        self.rbi_refs.push(citation.text);
        self.citation = Some(CitationAnnotation {
            query: query.into(),
            cost_usd: citation.cost_usd,
        });
    }
}
