use serde::{Deserialize, Serialize};

use super::currency::{round_currency, round_percentage};
use super::CalculationError;

/// Tiered view of how comfortably an applicant can carry their obligations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffordabilityScore {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AffordabilityScore {
    pub fn label(self) -> &'static str {
        match self {
            AffordabilityScore::Excellent => "excellent",
            AffordabilityScore::Good => "good",
            AffordabilityScore::Fair => "fair",
            AffordabilityScore::Poor => "poor",
        }
    }
}

/// Heuristic risk bucket. Not a certified credit grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskCategory {
    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
            RiskCategory::Critical => "critical",
        }
    }

    fn from_points(points: u8) -> Self {
        match points {
            6.. => RiskCategory::Critical,
            4..=5 => RiskCategory::High,
            2..=3 => RiskCategory::Medium,
            _ => RiskCategory::Low,
        }
    }

    fn likelihood_penalty(self) -> i32 {
        match self {
            RiskCategory::Critical => -70,
            RiskCategory::High => -50,
            RiskCategory::Medium => -30,
            RiskCategory::Low => 0,
        }
    }
}

/// Monthly figures an applicant declares about their finances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProfile {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub existing_debt: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<u16>,
}

/// Inputs to [`calculate_risk_category`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskFactors {
    pub dti: f64,
    pub credit_score: Option<u16>,
    /// Months with the current employer.
    pub employment_duration: u32,
}

/// Inputs to [`calculate_approval_likelihood`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApprovalFactors {
    pub risk_category: RiskCategory,
    pub credit_score: Option<u16>,
    pub dti: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_category: RiskCategory,
    pub approval_likelihood: u8,
}

impl RiskAssessment {
    pub fn assess(dti: f64, credit_score: Option<u16>, employment_duration: u32) -> Self {
        let risk_category = calculate_risk_category(RiskFactors {
            dti,
            credit_score,
            employment_duration,
        });
        let approval_likelihood = calculate_approval_likelihood(ApprovalFactors {
            risk_category,
            credit_score,
            dti,
        });

        Self {
            risk_category,
            approval_likelihood,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityAssessment {
    pub disposable_income: f64,
    pub debt_to_income_ratio: f64,
    pub loan_to_income_ratio: f64,
    pub affordability_score: AffordabilityScore,
}

impl AffordabilityAssessment {
    /// Assess the profile as if the proposed installment were already being paid.
    pub fn assess(
        profile: &FinancialProfile,
        monthly_payment: f64,
    ) -> Result<Self, CalculationError> {
        let obligations = profile.existing_debt + monthly_payment;
        let debt_to_income_ratio = calculate_dti(obligations, profile.monthly_income)?;
        let loan_to_income_ratio = calculate_lti(monthly_payment, profile.monthly_income)?;
        let disposable_income = calculate_disposable_income(
            profile.monthly_income,
            profile.monthly_expenses,
            obligations,
        );

        Ok(Self {
            disposable_income,
            debt_to_income_ratio,
            loan_to_income_ratio,
            affordability_score: calculate_affordability_score(
                debt_to_income_ratio,
                disposable_income,
            ),
        })
    }
}

/// Debt-to-income ratio as a percentage.
pub fn calculate_dti(
    monthly_debt_payments: f64,
    monthly_income: f64,
) -> Result<f64, CalculationError> {
    ensure_positive_income(monthly_income)?;
    Ok(round_percentage(monthly_debt_payments / monthly_income * 100.0))
}

/// Loan-to-income ratio as a percentage.
pub fn calculate_lti(
    monthly_loan_payment: f64,
    monthly_income: f64,
) -> Result<f64, CalculationError> {
    ensure_positive_income(monthly_income)?;
    Ok(round_percentage(monthly_loan_payment / monthly_income * 100.0))
}

fn ensure_positive_income(monthly_income: f64) -> Result<(), CalculationError> {
    if monthly_income > 0.0 {
        Ok(())
    } else {
        Err(CalculationError::NonPositiveIncome)
    }
}

/// Income left after expenses and debt. Negative results are meaningful, not errors.
pub fn calculate_disposable_income(
    monthly_income: f64,
    monthly_expenses: f64,
    existing_debt: f64,
) -> f64 {
    round_currency(monthly_income - monthly_expenses - existing_debt)
}

pub fn calculate_affordability_score(dti: f64, disposable_income: f64) -> AffordabilityScore {
    if dti < 30.0 && disposable_income > 10_000.0 {
        AffordabilityScore::Excellent
    } else if dti < 40.0 && disposable_income > 5_000.0 {
        AffordabilityScore::Good
    } else if dti < 50.0 && disposable_income > 2_000.0 {
        AffordabilityScore::Fair
    } else {
        AffordabilityScore::Poor
    }
}

/// Additive point score over DTI, credit score and employment tenure.
///
/// A missing credit score contributes no points.
pub fn calculate_risk_category(factors: RiskFactors) -> RiskCategory {
    let mut points = 0u8;

    points += match factors.dti {
        dti if dti > 50.0 => 3,
        dti if dti > 40.0 => 2,
        dti if dti > 30.0 => 1,
        _ => 0,
    };

    if let Some(score) = factors.credit_score {
        points += match score {
            0..=549 => 3,
            550..=649 => 2,
            650..=749 => 1,
            _ => 0,
        };
    }

    points += match factors.employment_duration {
        0..=5 => 2,
        6..=11 => 1,
        _ => 0,
    };

    RiskCategory::from_points(points)
}

/// Heuristic 0..=100 likelihood of approval.
pub fn calculate_approval_likelihood(factors: ApprovalFactors) -> u8 {
    let mut likelihood: i32 = 90;

    likelihood += factors.risk_category.likelihood_penalty();

    likelihood -= match factors.dti {
        dti if dti > 50.0 => 15,
        dti if dti > 40.0 => 10,
        dti if dti > 30.0 => 5,
        _ => 0,
    };

    if let Some(score) = factors.credit_score {
        likelihood += match score {
            750.. => 10,
            650..=749 => 5,
            _ => 0,
        };
    }

    likelihood.clamp(0, 100) as u8
}
