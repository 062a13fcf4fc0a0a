//! Asset declarations: the raw request shape and the validated, per-asset form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ValidationError};
use crate::rates::RateTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Gold,
    Property,
    Shares,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Gold => "gold",
            AssetType::Property => "property",
            AssetType::Shares => "shares",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gold" => Ok(AssetType::Gold),
            "property" => Ok(AssetType::Property),
            "shares" => Ok(AssetType::Shares),
            other => Err(ValidationError::UnsupportedAssetType(other.to_string())),
        }
    }
}

/// Where pledged gold is held; rural branches get a higher LTV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Urban,
    Rural,
}

impl FromStr for Location {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urban" => Ok(Location::Urban),
            "rural" => Ok(Location::Rural),
            other => Err(ValidationError::UnsupportedLocation(other.to_string())),
        }
    }
}

/// Body of an eligibility check, exactly as the client sent it.
///
/// Every field is optional here so that a missing field becomes a
/// [`ValidationError`] naming it, instead of an opaque decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub asset_type: Option<String>,
    pub value: Option<Decimal>,
    pub loan_amount: Option<Decimal>,
    pub location: Option<String>,
    pub purity: Option<i64>,
    pub circle_rate: Option<Decimal>,
    pub symbol: Option<String>,
    /// Liquidity verdict supplied by the caller for shares; absent means liquid.
    pub liquid: Option<bool>,
}

/// A declaration that has passed field validation.
///
/// Each variant holds only what its asset type needs, so the validator never
/// has to re-check presence of fields.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetDeclaration {
    Gold {
        value: Decimal,
        loan_amount: Decimal,
        location: Location,
        purity: u32,
    },
    Property {
        value: Decimal,
        loan_amount: Decimal,
        circle_rate: Decimal,
    },
    Shares {
        value: Decimal,
        loan_amount: Decimal,
        symbol: String,
        liquid: bool,
    },
}

impl AssetDeclaration {
    pub fn asset_type(&self) -> AssetType {
        match self {
            AssetDeclaration::Gold { .. } => AssetType::Gold,
            AssetDeclaration::Property { .. } => AssetType::Property,
            AssetDeclaration::Shares { .. } => AssetType::Shares,
        }
    }

    pub fn value(&self) -> Decimal {
        match self {
            AssetDeclaration::Gold { value, .. }
            | AssetDeclaration::Property { value, .. }
            | AssetDeclaration::Shares { value, .. } => *value,
        }
    }

    pub fn loan_amount(&self) -> Decimal {
        match self {
            AssetDeclaration::Gold { loan_amount, .. }
            | AssetDeclaration::Property { loan_amount, .. }
            | AssetDeclaration::Shares { loan_amount, .. } => *loan_amount,
        }
    }
}

fn positive(field: &'static str, amount: Option<Decimal>) -> Result<Decimal> {
    let amount = amount.ok_or(ValidationError::Missing(field))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(amount)
}

/// `loanAmount / value` as a percentage must be representable, or the
/// ratio arithmetic in evaluation would overflow.
pub(crate) fn checked_ltv(value: Decimal, loan_amount: Decimal) -> Result<Decimal> {
    loan_amount
        .checked_div(value)
        .filter(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED).is_some())
        .ok_or(ValidationError::OutOfRange("loanAmount"))
}

impl AssetDeclaration {
    /// Checks a raw request against `table` and builds the typed declaration.
    pub fn validate(request: CheckRequest, table: &RateTable) -> Result<Self> {
        let asset_type: AssetType = request
            .asset_type
            .as_deref()
            .ok_or(ValidationError::Missing("assetType"))?
            .parse()?;
        let value = positive("value", request.value)?;
        let loan_amount = positive("loanAmount", request.loan_amount)?;
        checked_ltv(value, loan_amount)?;

        match asset_type {
            AssetType::Gold => {
                let location: Location = request
                    .location
                    .as_deref()
                    .ok_or(ValidationError::Missing("location"))?
                    .parse()?;
                let purity = request.purity.ok_or(ValidationError::Missing("purity"))?;
                let min = table.gold.min_purity;
                if purity < i64::from(min) {
                    return Err(ValidationError::PurityTooLow {
                        min,
                        actual: purity,
                    });
                }
                Ok(AssetDeclaration::Gold {
                    value,
                    loan_amount,
                    location,
                    purity: u32::try_from(purity).unwrap_or(u32::MAX),
                })
            }
            AssetType::Property => Ok(AssetDeclaration::Property {
                value,
                loan_amount,
                circle_rate: positive("circleRate", request.circle_rate)?,
            }),
            AssetType::Shares => {
                let symbol = request
                    .symbol
                    .map(|s| s.trim().to_ascii_uppercase())
                    .filter(|s| !s.is_empty())
                    .ok_or(ValidationError::Missing("symbol"))?;
                Ok(AssetDeclaration::Shares {
                    value,
                    loan_amount,
                    symbol,
                    liquid: request.liquid.unwrap_or(true),
                })
            }
        }
    }
}
