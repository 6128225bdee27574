use serde::{Deserialize, Serialize};

use crate::calculations::{
    AffordabilityAssessment, AmortizationEntry, FinancialProfile, RiskCategory,
};

/// Product families offered through the simulator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    #[default]
    PersonalLoan,
    VehicleLoan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 4] = [
        EmploymentStatus::Employed,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Unemployed,
        EmploymentStatus::Retired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::Retired => "retired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    DebtConsolidation,
    HomeImprovement,
    Education,
    Medical,
    Other,
    NewVehicle,
    UsedVehicle,
}

/// Body of `POST /api/loans/calculate-rate`.
///
/// Numbers arrive as raw JSON numbers so that bound violations can be reported per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuoteRequest {
    pub loan_amount: f64,
    pub loan_term: f64,
    #[serde(default)]
    pub credit_score: Option<f64>,
    #[serde(default)]
    pub loan_type: Option<LoanType>,
}

/// Body of `POST /api/loans/eligibility`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationSubmission {
    pub personal_info: PersonalInfo,
    pub employment_details: EmploymentDetails,
    pub financial_info: FinancialInfo,
    pub loan_details: LoanDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub age: f64,
    pub employment_status: EmploymentStatus,
    /// Months with the current employer.
    pub employment_duration: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentDetails {
    pub employer_name: String,
    pub job_title: String,
    pub industry: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInfo {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub existing_debt: f64,
    #[serde(default)]
    pub credit_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub requested_amount: f64,
    pub loan_term: f64,
    pub loan_purpose: LoanPurpose,
}

/// Loan request that passed validation against its product's bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteTerms {
    pub loan_type: LoanType,
    pub amount: f64,
    pub term_months: u32,
    pub credit_score: Option<u16>,
}

/// Validated applicant data handed to the eligibility engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantProfile {
    pub employment_status: EmploymentStatus,
    pub employment_duration: u32,
    pub financial: FinancialProfile,
    pub loan: QuoteTerms,
    pub purpose: LoanPurpose,
}

/// Rate, installment and schedule for a requested loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_repayment: f64,
    pub payment_schedule: Vec<AmortizationEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub is_eligible: bool,
    pub approval_likelihood: u8,
    pub risk_category: RiskCategory,
    pub decision_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedLoan {
    pub max_amount: f64,
    pub recommended_amount: f64,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub total_repayment: f64,
}

/// Full response of an eligibility check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityReport {
    pub eligibility_result: EligibilityResult,
    pub recommended_loan: RecommendedLoan,
    pub affordability_analysis: AffordabilityAssessment,
}
