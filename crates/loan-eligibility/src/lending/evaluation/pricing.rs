use crate::calculations::round_currency;

use super::super::catalog::LoanProduct;

const BASE_RATE: f64 = 12.5;
const REFERENCE_SCORE: f64 = 650.0;
const POINTS_PER_PERCENT: f64 = 50.0;

/// Risk-based annual rate in percent.
///
/// Every 50 points above 650 take a percent off the base rate and every 50 below add one.
/// Applicants without a score are priced at the base rate. The result always lies within
/// the product's published range.
pub fn quote_rate(product: &LoanProduct, credit_score: Option<u16>) -> f64 {
    let adjustment = credit_score
        .map(|score| ((score as f64 - REFERENCE_SCORE) / POINTS_PER_PERCENT).clamp(-6.0, 4.0))
        .unwrap_or(0.0);

    round_currency(product.interest_rate_range.clamp(BASE_RATE - adjustment))
}
