mod config;
mod policy;
mod pricing;

pub use config::EligibilityPolicy;
pub use pricing::quote_rate;

use crate::calculations::{
    calculate_monthly_payment, calculate_total_interest, calculate_total_repayment,
    generate_amortization_schedule, round_currency, AffordabilityAssessment, CalculationError,
    LoanParams, RiskAssessment,
};

use super::catalog::LoanProduct;
use super::domain::{
    ApplicantProfile, EligibilityReport, EligibilityResult, QuoteTerms, RateQuote,
    RecommendedLoan,
};
use policy::decide;

/// Stateless engine turning validated requests into quotes and eligibility reports.
pub struct EligibilityEngine {
    policy: EligibilityPolicy,
}

impl EligibilityEngine {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self { policy }
    }

    /// Price the loan and lay out its full repayment schedule.
    pub fn quote(&self, terms: &QuoteTerms) -> Result<RateQuote, CalculationError> {
        let product = LoanProduct::for_type(terms.loan_type);
        let interest_rate = quote_rate(product, terms.credit_score);
        let params = LoanParams::new(terms.amount, interest_rate, terms.term_months);

        Ok(RateQuote {
            interest_rate,
            monthly_payment: calculate_monthly_payment(&params)?,
            total_interest: calculate_total_interest(&params)?,
            total_repayment: calculate_total_repayment(&params)?,
            payment_schedule: generate_amortization_schedule(&params)?,
        })
    }

    /// Score an application. Affordability is judged with the requested installment
    /// already counted as debt.
    pub fn evaluate(
        &self,
        profile: &ApplicantProfile,
    ) -> Result<EligibilityReport, CalculationError> {
        let product = LoanProduct::for_type(profile.loan.loan_type);
        let interest_rate = quote_rate(product, profile.loan.credit_score);
        let requested = LoanParams::new(
            profile.loan.amount,
            interest_rate,
            profile.loan.term_months,
        );
        let monthly_payment = calculate_monthly_payment(&requested)?;

        let affordability = AffordabilityAssessment::assess(&profile.financial, monthly_payment)?;
        let risk = RiskAssessment::assess(
            affordability.debt_to_income_ratio,
            profile.financial.credit_score,
            profile.employment_duration,
        );

        let decision = decide(
            &self.policy,
            profile.employment_status,
            risk.risk_category,
            risk.approval_likelihood,
        );

        let max_amount = round_currency(
            product
                .max_amount
                .min(profile.financial.monthly_income * self.policy.income_multiple_cap),
        );
        let recommended_amount = if decision.is_eligible {
            round_currency(profile.loan.amount.min(max_amount))
        } else {
            0.0
        };

        let recommended_loan = if recommended_amount > 0.0 {
            let params = LoanParams::new(
                recommended_amount,
                interest_rate,
                profile.loan.term_months,
            );
            RecommendedLoan {
                max_amount,
                recommended_amount,
                interest_rate,
                monthly_payment: calculate_monthly_payment(&params)?,
                total_repayment: calculate_total_repayment(&params)?,
            }
        } else {
            RecommendedLoan {
                max_amount,
                recommended_amount,
                interest_rate,
                monthly_payment: 0.0,
                total_repayment: 0.0,
            }
        };

        Ok(EligibilityReport {
            eligibility_result: EligibilityResult {
                is_eligible: decision.is_eligible,
                approval_likelihood: risk.approval_likelihood,
                risk_category: risk.risk_category,
                decision_reason: decision.reason.to_string(),
            },
            recommended_loan,
            affordability_analysis: affordability,
        })
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(EligibilityPolicy::default())
    }
}
