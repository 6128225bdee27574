use serde::{Deserialize, Serialize};

use super::currency::round_currency;
use super::CalculationError;

/// Inputs shared by every amortization calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParams {
    pub principal: f64,
    /// Annual rate in percent, e.g. `12.5` for 12.5%.
    pub annual_rate: f64,
    pub term_months: u32,
}

impl LoanParams {
    pub fn new(principal: f64, annual_rate: f64, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_months,
        }
    }

    fn validate(&self) -> Result<(), CalculationError> {
        let principal_ok = self.principal.is_finite() && self.principal > 0.0;
        let rate_ok = self.annual_rate.is_finite() && self.annual_rate >= 0.0;
        if !principal_ok || !rate_ok || self.term_months == 0 {
            return Err(CalculationError::InvalidParameters);
        }
        Ok(())
    }

    fn monthly_rate(&self) -> f64 {
        self.annual_rate / 100.0 / 12.0
    }
}

/// One month of an amortization schedule. Fields are rounded independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

/// Level monthly installment for a fully amortizing loan.
///
/// `M = P · r(1+r)^n / ((1+r)^n − 1)`, falling back to `P / n` when the rate is zero.
pub fn calculate_monthly_payment(params: &LoanParams) -> Result<f64, CalculationError> {
    params.validate()?;

    let rate = params.monthly_rate();
    let periods = params.term_months as f64;

    if rate == 0.0 {
        return Ok(round_currency(params.principal / periods));
    }

    let compound = (1.0 + rate).powf(periods);
    let payment = params.principal * (rate * compound) / (compound - 1.0);

    Ok(round_currency(payment))
}

/// Installment used for the summary totals. Interest-free loans repay exactly the principal,
/// so the unrounded `P / n` is kept there.
fn summary_installment(params: &LoanParams) -> Result<f64, CalculationError> {
    params.validate()?;
    if params.monthly_rate() == 0.0 {
        return Ok(params.principal / params.term_months as f64);
    }
    calculate_monthly_payment(params)
}

/// Sum of all installments over the term.
pub fn calculate_total_repayment(params: &LoanParams) -> Result<f64, CalculationError> {
    let payment = summary_installment(params)?;
    Ok(round_currency(payment * params.term_months as f64))
}

/// Interest paid over the term, derived from the rounded installment.
pub fn calculate_total_interest(params: &LoanParams) -> Result<f64, CalculationError> {
    let payment = summary_installment(params)?;
    let total_repayment = payment * params.term_months as f64;
    Ok(round_currency(total_repayment - params.principal))
}

/// Month-by-month breakdown of the loan. The last entry always clears the balance.
pub fn generate_amortization_schedule(
    params: &LoanParams,
) -> Result<Vec<AmortizationEntry>, CalculationError> {
    params.validate()?;

    let payment = calculate_monthly_payment(params)?;
    let rate = params.monthly_rate();
    let mut balance = params.principal;
    let mut schedule = Vec::with_capacity(params.term_months as usize);

    for month in 1..=params.term_months {
        let interest = round_currency(balance * rate);
        let principal = round_currency(payment - interest);
        balance = round_currency(balance - principal).max(0.0);

        // Rounding drift is absorbed by the final installment.
        if month == params.term_months {
            balance = 0.0;
        }

        schedule.push(AmortizationEntry {
            month,
            payment,
            principal,
            interest,
            balance,
        });
    }

    Ok(schedule)
}
