//! Static regulatory LTV table.
//!
//! Built once at start-up and shared read-only; nothing here is mutated at
//! runtime.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::asset::{AssetDeclaration, Location};

/// Minimum gold purity accepted as collateral, in karats.
pub const GOLD_MIN_PURITY: u32 = 18;

/// Nifty-50 constituents accepted for share pledges.
pub const NIFTY_50: [&str; 50] = [
    "ADANIENT", "ADANIPORTS", "APOLLOHOSP", "ASIANPAINT", "AXISBANK",
    "BAJAJ-AUTO", "BAJFINANCE", "BAJAJFINSV", "BEL", "BHARTIARTL",
    "CIPLA", "COALINDIA", "DRREDDY", "EICHERMOT", "ETERNAL",
    "GRASIM", "HCLTECH", "HDFCBANK", "HDFCLIFE", "HEROMOTOCO",
    "HINDALCO", "HINDUNILVR", "ICICIBANK", "INDUSINDBK", "INFY",
    "ITC", "JIOFIN", "JSWSTEEL", "KOTAKBANK", "LT",
    "M&M", "MARUTI", "NESTLEIND", "NTPC", "ONGC",
    "POWERGRID", "RELIANCE", "SBILIFE", "SBIN", "SHRIRAMFIN",
    "SUNPHARMA", "TATACONSUM", "TATAMOTORS", "TATASTEEL", "TCS",
    "TECHM", "TITAN", "TRENT", "ULTRACEMCO", "WIPRO",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldRules {
    pub urban_ltv: Decimal,
    pub rural_ltv: Decimal,
    pub min_purity: u32,
    /// Largest single gold loan, in rupees.
    pub max_amount: Decimal,
    pub tenure_months: u32,
    pub citation_key: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRules {
    pub standard_ltv: Decimal,
    pub min_ltv: Decimal,
    pub max_ltv: Decimal,
    /// Circle rate must be at least this share of the declared value.
    pub circle_rate_threshold: Decimal,
    pub citation_key: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharesRules {
    pub ltv: Decimal,
    pub eligible_index: &'static str,
    pub eligible_symbols: Vec<&'static str>,
    pub citation_key: &'static str,
}

/// The minimum an asset must meet before its LTV is even considered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinThreshold {
    /// Gold purity in karats.
    Purity(u32),
    /// Circle rate as a share of the declared property value.
    CircleRateShare(Decimal),
    /// Shares rely on the caller-supplied liquidity flag.
    Liquidity,
}

/// Per-request view of the table for one declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetLimits {
    pub ltv_limit: Decimal,
    pub min_threshold: MinThreshold,
    pub citation_key: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RateTable {
    pub gold: GoldRules,
    pub property: PropertyRules,
    pub shares: SharesRules,
}

impl RateTable {
    /// The RBI rules currently in force.
    pub fn rbi() -> Self {
        Self {
            gold: GoldRules {
                urban_ltv: dec!(0.75),
                rural_ltv: dec!(0.90),
                min_purity: GOLD_MIN_PURITY,
                max_amount: dec!(2000000),
                tenure_months: 3,
                citation_key: "RBI Master Direction - Lending Against Gold Collateral",
            },
            property: PropertyRules {
                standard_ltv: dec!(0.60),
                min_ltv: dec!(0.50),
                max_ltv: dec!(0.70),
                circle_rate_threshold: dec!(0.90),
                citation_key: "RBI Master Circular - Housing Finance (LTV and circle rate norms)",
            },
            shares: SharesRules {
                ltv: dec!(0.50),
                eligible_index: "NIFTY50",
                eligible_symbols: NIFTY_50.to_vec(),
                citation_key: "RBI Master Direction - Loans Against Shares (SEBI pledge norms)",
            },
        }
    }

    pub fn limits_for(&self, declaration: &AssetDeclaration) -> AssetLimits {
        match declaration {
            AssetDeclaration::Gold { location, .. } => AssetLimits {
                ltv_limit: match location {
                    Location::Urban => self.gold.urban_ltv,
                    Location::Rural => self.gold.rural_ltv,
                },
                min_threshold: MinThreshold::Purity(self.gold.min_purity),
                citation_key: self.gold.citation_key,
            },
            AssetDeclaration::Property { .. } => AssetLimits {
                ltv_limit: self.property.standard_ltv,
                min_threshold: MinThreshold::CircleRateShare(self.property.circle_rate_threshold),
                citation_key: self.property.citation_key,
            },
            AssetDeclaration::Shares { .. } => AssetLimits {
                ltv_limit: self.shares.ltv,
                min_threshold: MinThreshold::Liquidity,
                citation_key: self.shares.citation_key,
            },
        }
    }

    /// Symbols are expected upper-cased, as [`AssetDeclaration`] stores them.
    pub fn is_eligible_symbol(&self, symbol: &str) -> bool {
        self.shares.eligible_symbols.iter().any(|s| *s == symbol)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::rbi()
    }
}
