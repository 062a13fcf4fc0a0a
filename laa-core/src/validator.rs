//! The eligibility decision.
//!
//! [`evaluate`] is pure: the same declaration and table always produce the
//! same verdict. Live citations are attached afterwards by the caller.

use tracing::debug;

use crate::asset::{AssetDeclaration, checked_ltv};
use crate::error::{Result, ValidationError};
use crate::format::{format_inr, format_percent, truncate_to_paise};
use crate::rates::{AssetLimits, MinThreshold, RateTable};
use crate::verdict::Verdict;

/// Decides a declaration against `table`.
///
/// Errors only when the declaration is malformed for this table (purity
/// below its minimum, or amounts whose ratio cannot be represented); a
/// rejection is an `Ok` verdict.
pub fn evaluate(declaration: &AssetDeclaration, table: &RateTable) -> Result<Verdict> {
    let value = declaration.value();
    let loan_amount = declaration.loan_amount();
    let limits = table.limits_for(declaration);

    if let (AssetDeclaration::Gold { purity, .. }, MinThreshold::Purity(min)) =
        (declaration, limits.min_threshold)
    {
        if *purity < min {
            return Err(ValidationError::PurityTooLow {
                min,
                actual: i64::from(*purity),
            });
        }
    }

    let ltv_used = checked_ltv(value, loan_amount)?;
    let max_eligible = truncate_to_paise(
        value
            .checked_mul(limits.ltv_limit)
            .ok_or(ValidationError::OutOfRange("value"))?,
    );

    let mut reasons = gating_failures(declaration, &limits, table)?;
    if loan_amount > max_eligible {
        reasons.push(format!(
            "LTV {} > {} limit (max eligible {})",
            format_percent(ltv_used, 1),
            format_percent(limits.ltv_limit, 0),
            format_inr(max_eligible)
        ));
    }
    let approved = reasons.is_empty();

    debug!(
        asset_type = %declaration.asset_type(),
        approved,
        ltv_used = %ltv_used,
        ltv_limit = %limits.ltv_limit,
        "Evaluated declaration"
    );

    Ok(Verdict {
        asset_type: declaration.asset_type(),
        approved,
        max_eligible,
        ltv_used,
        ltv_limit: limits.ltv_limit,
        rbi_refs: vec![limits.citation_key.to_string()],
        reasons,
        citation: None,
    })
}

/// Asset-specific checks that reject regardless of the LTV arithmetic.
fn gating_failures(
    declaration: &AssetDeclaration,
    limits: &AssetLimits,
    table: &RateTable,
) -> Result<Vec<String>> {
    let mut failures = Vec::new();
    match (declaration, limits.min_threshold) {
        (AssetDeclaration::Gold { loan_amount, .. }, _) => {
            if *loan_amount > table.gold.max_amount {
                failures.push(format!(
                    "Loan {} exceeds gold loan maximum of {}",
                    format_inr(*loan_amount),
                    format_inr(table.gold.max_amount)
                ));
            }
        }
        (
            AssetDeclaration::Property {
                value, circle_rate, ..
            },
            MinThreshold::CircleRateShare(share),
        ) => {
            let floor = value
                .checked_mul(share)
                .ok_or(ValidationError::OutOfRange("value"))?;
            if *circle_rate < floor {
                failures.push(format!(
                    "Circle rate {} is below {} of property value",
                    format_inr(*circle_rate),
                    format_percent(share, 0)
                ));
            }
        }
        (AssetDeclaration::Shares { symbol, liquid, .. }, _) => {
            if !table.is_eligible_symbol(symbol) {
                failures.push(format!(
                    "{symbol} is not a {} constituent",
                    table.shares.eligible_index
                ));
            }
            if !liquid {
                failures.push(format!("{symbol} does not meet the liquidity threshold"));
            }
        }
        (AssetDeclaration::Property { .. }, _) => {}
    }
    Ok(failures)
}
