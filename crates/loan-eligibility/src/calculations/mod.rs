//! Pure loan arithmetic: amortization, affordability ratios and heuristic risk scoring.
//!
//! Every function is synchronous and side-effect free; invalid input surfaces as a
//! [`CalculationError`] and never as a panic.

pub mod currency;
pub mod export;
pub mod loan;
pub mod risk;

pub use currency::{format_currency, parse_currency, round_currency, round_percentage};
pub use export::{ScheduleExportError, ScheduleExporter};
pub use loan::{
    calculate_monthly_payment, calculate_total_interest, calculate_total_repayment,
    generate_amortization_schedule, AmortizationEntry, LoanParams,
};
pub use risk::{
    calculate_affordability_score, calculate_approval_likelihood, calculate_disposable_income,
    calculate_dti, calculate_lti, calculate_risk_category, AffordabilityAssessment,
    AffordabilityScore, ApprovalFactors, FinancialProfile, RiskAssessment, RiskCategory,
    RiskFactors,
};

/// Domain errors raised by the calculation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalculationError {
    #[error("Invalid loan parameters")]
    InvalidParameters,
    #[error("Monthly income must be positive")]
    NonPositiveIncome,
}
