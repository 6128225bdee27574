use serde::Serialize;

use super::domain::{LoanPurpose, LoanType};
use super::validation::{bounds, FieldBound, TextBound};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub fn clamp(&self, rate: f64) -> f64 {
        rate.clamp(self.min, self.max)
    }
}

/// Static description of a financing product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanProduct {
    pub id: LoanType,
    pub name: &'static str,
    pub description: &'static str,
    pub min_amount: f64,
    pub max_amount: f64,
    pub min_term: u32,
    pub max_term: u32,
    pub interest_rate_range: RateRange,
    pub purposes: &'static [LoanPurpose],
}

impl LoanProduct {
    pub fn for_type(loan_type: LoanType) -> &'static LoanProduct {
        match loan_type {
            LoanType::PersonalLoan => &PRODUCTS[0],
            LoanType::VehicleLoan => &PRODUCTS[1],
        }
    }

    /// Product whose purposes include `purpose`. Purposes no product lists fall back to
    /// the personal loan.
    pub fn for_purpose(purpose: LoanPurpose) -> &'static LoanProduct {
        PRODUCTS
            .iter()
            .find(|product| product.accepts(purpose))
            .unwrap_or(&PRODUCTS[0])
    }

    pub fn amount_bound(&self, field: &'static str) -> FieldBound {
        FieldBound {
            field,
            min: Some(self.min_amount),
            max: Some(self.max_amount),
            ..bounds::LOAN_AMOUNT
        }
    }

    pub fn term_bound(&self, field: &'static str) -> FieldBound {
        FieldBound {
            field,
            min: Some(self.min_term as f64),
            max: Some(self.max_term as f64),
            ..bounds::LOAN_TERM
        }
    }

    pub fn accepts(&self, purpose: LoanPurpose) -> bool {
        self.purposes.contains(&purpose)
    }
}

pub static PRODUCTS: [LoanProduct; 2] = [
    LoanProduct {
        id: LoanType::PersonalLoan,
        name: "Personal Loan",
        description: "Flexible personal financing for various needs",
        min_amount: bounds::MIN_LOAN_AMOUNT,
        max_amount: bounds::MAX_LOAN_AMOUNT,
        min_term: bounds::MIN_LOAN_TERM,
        max_term: bounds::MAX_LOAN_TERM,
        interest_rate_range: RateRange {
            min: 10.5,
            max: 18.5,
        },
        purposes: &[
            LoanPurpose::DebtConsolidation,
            LoanPurpose::HomeImprovement,
            LoanPurpose::Education,
            LoanPurpose::Medical,
            LoanPurpose::Other,
        ],
    },
    LoanProduct {
        id: LoanType::VehicleLoan,
        name: "Vehicle Finance",
        description: "Financing for new and used vehicles",
        min_amount: 50_000.0,
        max_amount: 1_500_000.0,
        min_term: 12,
        max_term: 72,
        interest_rate_range: RateRange {
            min: 8.5,
            max: 15.0,
        },
        purposes: &[LoanPurpose::NewVehicle, LoanPurpose::UsedVehicle],
    },
];

/// Body of `GET /api/loans/products`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductCatalog {
    pub products: &'static [LoanProduct],
}

pub fn product_catalog() -> ProductCatalog {
    ProductCatalog {
        products: &PRODUCTS,
    }
}

/// Client-facing rendering of a single bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub required: bool,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<&'static str>>,
}

impl From<&FieldBound> for ValidationRule {
    fn from(bound: &FieldBound) -> Self {
        Self {
            min: bound.min,
            max: bound.max,
            required: bound.required,
            error_message: bound.message(),
            options: None,
        }
    }
}

impl From<&TextBound> for ValidationRule {
    fn from(bound: &TextBound) -> Self {
        Self {
            min: Some(bound.min_chars as f64),
            max: bound.max_chars.map(|max| max as f64),
            required: true,
            error_message: bound.message(),
            options: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoRules {
    pub first_name: ValidationRule,
    pub last_name: ValidationRule,
    pub age: ValidationRule,
    pub employment_status: ValidationRule,
    pub employment_duration: ValidationRule,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentDetailsRules {
    pub employer_name: ValidationRule,
    pub job_title: ValidationRule,
    pub industry: ValidationRule,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInfoRules {
    pub monthly_income: ValidationRule,
    pub monthly_expenses: ValidationRule,
    pub existing_debt: ValidationRule,
    pub credit_score: ValidationRule,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetailsRules {
    pub requested_amount: ValidationRule,
    pub loan_term: ValidationRule,
}

/// Body of `GET /api/loans/validation-rules`, rendered from the same bound table the
/// request validator enforces.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRuleCatalog {
    pub personal_info: PersonalInfoRules,
    pub employment_details: EmploymentDetailsRules,
    pub financial_info: FinancialInfoRules,
    pub loan_details: LoanDetailsRules,
}

pub fn validation_rules() -> ValidationRuleCatalog {
    let personal = LoanProduct::for_type(LoanType::PersonalLoan);
    let employment_status = ValidationRule {
        min: None,
        max: None,
        required: true,
        error_message: "Please select your employment status".to_string(),
        options: Some(
            super::domain::EmploymentStatus::ALL
                .iter()
                .map(|status| status.label())
                .collect(),
        ),
    };

    ValidationRuleCatalog {
        personal_info: PersonalInfoRules {
            first_name: (&bounds::FIRST_NAME).into(),
            last_name: (&bounds::LAST_NAME).into(),
            age: (&bounds::AGE).into(),
            employment_status,
            employment_duration: (&bounds::EMPLOYMENT_DURATION).into(),
        },
        employment_details: EmploymentDetailsRules {
            employer_name: (&bounds::EMPLOYER_NAME).into(),
            job_title: (&bounds::JOB_TITLE).into(),
            industry: (&bounds::INDUSTRY).into(),
        },
        financial_info: FinancialInfoRules {
            monthly_income: (&bounds::MONTHLY_INCOME).into(),
            monthly_expenses: (&bounds::MONTHLY_EXPENSES).into(),
            existing_debt: (&bounds::EXISTING_DEBT).into(),
            credit_score: (&bounds::CREDIT_SCORE).into(),
        },
        loan_details: LoanDetailsRules {
            requested_amount: (&personal.amount_bound("requestedAmount")).into(),
            loan_term: (&personal.term_bound("loanTerm")).into(),
        },
    }
}
