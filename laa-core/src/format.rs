//! Money and ratio presentation.
//!
//! Money is truncated toward zero to whole paise wherever it is produced;
//! [`truncate_to_paise`] is the only place that policy lives.

use rust_decimal::{Decimal, RoundingStrategy};

pub fn truncate_to_paise(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

/// Rupee amount with Indian digit grouping, e.g. `₹7,50,000` or `₹1,234.50`.
pub fn format_inr(amount: Decimal) -> String {
    let amount = truncate_to_paise(amount);
    let rupees = amount.trunc();
    let paise = ((amount - rupees) * Decimal::ONE_HUNDRED).trunc();

    let mut out = format!("₹{}", group_indian(&rupees.to_string()));
    if !paise.is_zero() {
        out.push_str(&format!(".{:0>2}", paise.to_string()));
    }
    out
}

// 12345678 -> 1,23,45,678
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Ratio shown as a percentage, e.g. `0.755` with one decimal is `75.5%`.
pub fn format_percent(ratio: Decimal, decimals: u32) -> String {
    let percent = ratio.saturating_mul(Decimal::ONE_HUNDRED).round_dp(decimals);
    format!("{:.*}%", decimals as usize, percent)
}
