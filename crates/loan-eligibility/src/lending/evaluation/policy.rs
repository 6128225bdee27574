use crate::calculations::RiskCategory;

use super::super::domain::EmploymentStatus;
use super::config::EligibilityPolicy;

pub(crate) struct Decision {
    pub is_eligible: bool,
    pub reason: &'static str,
}

pub(crate) fn decide(
    policy: &EligibilityPolicy,
    employment_status: EmploymentStatus,
    risk_category: RiskCategory,
    approval_likelihood: u8,
) -> Decision {
    if employment_status == EmploymentStatus::Unemployed {
        return Decision {
            is_eligible: false,
            reason: "A regular source of employment income is required",
        };
    }

    Decision {
        is_eligible: approval_likelihood >= policy.minimum_approval_likelihood,
        reason: risk_reason(risk_category),
    }
}

fn risk_reason(risk_category: RiskCategory) -> &'static str {
    match risk_category {
        RiskCategory::Low => "Strong income-to-expense ratio and manageable existing debt",
        RiskCategory::Medium => "Moderate debt levels with manageable repayment capacity",
        RiskCategory::High => "High debt-to-income ratio requires additional review",
        RiskCategory::Critical => "Debt-to-income ratio exceeds acceptable limits",
    }
}
