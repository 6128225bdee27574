use serde::{Deserialize, Serialize};

use crate::calculations::FinancialProfile;

use super::catalog::LoanProduct;
use super::domain::{ApplicantProfile, LoanApplicationSubmission, QuoteTerms, RateQuoteRequest};

/// How a bound's limits are rendered in messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Rand,
    Months,
    Plain,
}

/// Numeric constraint on a single request field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBound {
    pub field: &'static str,
    pub label: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: Unit,
    pub integer: bool,
    pub required: bool,
}

impl FieldBound {
    pub fn message(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!(
                "{} must be between {} and {}",
                self.label,
                self.render(min),
                self.render(max)
            ),
            (Some(min), None) => format!("{} must be at least {}", self.label, self.render(min)),
            (None, Some(max)) => format!("{} must not exceed {}", self.label, self.render(max)),
            (None, None) => format!("{} is required", self.label),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value.is_finite()
            && self.min.map_or(true, |min| value >= min)
            && self.max.map_or(true, |max| value <= max)
    }

    fn render(&self, value: f64) -> String {
        match self.unit {
            Unit::Rand => format!("R{}", group_thousands(value)),
            Unit::Months => format!("{} months", group_thousands(value)),
            Unit::Plain => group_thousands(value),
        }
    }
}

/// Length constraint on a free-text field, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBound {
    pub field: &'static str,
    pub label: &'static str,
    pub min_chars: usize,
    pub max_chars: Option<usize>,
}

impl TextBound {
    pub fn message(&self) -> String {
        match self.max_chars {
            Some(max) => format!(
                "{} must be between {} and {} characters",
                self.label, self.min_chars, max
            ),
            None => format!(
                "{} must be at least {} characters",
                self.label, self.min_chars
            ),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        let length = value.trim().chars().count();
        length >= self.min_chars && self.max_chars.map_or(true, |max| length <= max)
    }
}

fn group_thousands(value: f64) -> String {
    let whole = value.trunc() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if whole < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// The single table of request bounds. Products, the validator and the
/// `/validation-rules` catalog all read from here.
pub mod bounds {
    use super::{FieldBound, TextBound, Unit};

    pub const MIN_LOAN_AMOUNT: f64 = 5_000.0;
    pub const MAX_LOAN_AMOUNT: f64 = 300_000.0;
    pub const MIN_LOAN_TERM: u32 = 6;
    pub const MAX_LOAN_TERM: u32 = 60;

    pub const LOAN_AMOUNT: FieldBound = FieldBound {
        field: "loanAmount",
        label: "Loan amount",
        min: Some(MIN_LOAN_AMOUNT),
        max: Some(MAX_LOAN_AMOUNT),
        unit: Unit::Rand,
        integer: false,
        required: true,
    };

    pub const LOAN_TERM: FieldBound = FieldBound {
        field: "loanTerm",
        label: "Loan term",
        min: Some(MIN_LOAN_TERM as f64),
        max: Some(MAX_LOAN_TERM as f64),
        unit: Unit::Months,
        integer: true,
        required: true,
    };

    pub const CREDIT_SCORE: FieldBound = FieldBound {
        field: "creditScore",
        label: "Credit score",
        min: Some(300.0),
        max: Some(850.0),
        unit: Unit::Plain,
        integer: false,
        required: false,
    };

    pub const AGE: FieldBound = FieldBound {
        field: "age",
        label: "Age",
        min: Some(18.0),
        max: Some(65.0),
        unit: Unit::Plain,
        integer: false,
        required: true,
    };

    pub const EMPLOYMENT_DURATION: FieldBound = FieldBound {
        field: "employmentDuration",
        label: "Employment duration",
        min: Some(3.0),
        max: None,
        unit: Unit::Months,
        integer: false,
        required: true,
    };

    pub const MONTHLY_INCOME: FieldBound = FieldBound {
        field: "monthlyIncome",
        label: "Monthly income",
        min: Some(5_000.0),
        max: None,
        unit: Unit::Rand,
        integer: false,
        required: true,
    };

    pub const MONTHLY_EXPENSES: FieldBound = FieldBound {
        field: "monthlyExpenses",
        label: "Monthly expenses",
        min: Some(0.0),
        max: None,
        unit: Unit::Rand,
        integer: false,
        required: true,
    };

    pub const EXISTING_DEBT: FieldBound = FieldBound {
        field: "existingDebt",
        label: "Existing debt",
        min: Some(0.0),
        max: None,
        unit: Unit::Rand,
        integer: false,
        required: true,
    };

    pub const FIRST_NAME: TextBound = TextBound {
        field: "firstName",
        label: "First name",
        min_chars: 1,
        max_chars: Some(50),
    };

    pub const LAST_NAME: TextBound = TextBound {
        field: "lastName",
        label: "Last name",
        min_chars: 1,
        max_chars: Some(50),
    };

    pub const EMPLOYER_NAME: TextBound = TextBound {
        field: "employerName",
        label: "Employer name",
        min_chars: 2,
        max_chars: None,
    };

    pub const JOB_TITLE: TextBound = TextBound {
        field: "jobTitle",
        label: "Job title",
        min_chars: 2,
        max_chars: None,
    };

    pub const INDUSTRY: TextBound = TextBound {
        field: "industry",
        label: "Industry",
        min_chars: 2,
        max_chars: None,
    };
}

/// One rejected field, addressed by its JSON path (e.g. `personalInfo.age`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

/// Every issue found in a request; never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request failed validation on {} field(s)", .issues.len())]
pub struct ValidationErrors {
    pub issues: Vec<ValidationIssue>,
}

#[derive(Default)]
struct IssueCollector {
    issues: Vec<ValidationIssue>,
}

impl IssueCollector {
    fn push(&mut self, path: String, message: String) {
        self.issues.push(ValidationIssue {
            field: path,
            message,
        });
    }

    fn number(&mut self, section: Option<&str>, bound: &FieldBound, value: f64) {
        let path = field_path(section, bound.field);
        if !value.is_finite() {
            self.push(path, format!("{} must be a number", bound.label));
        } else if bound.integer && value.fract() != 0.0 {
            self.push(path, format!("{} must be a whole number", bound.label));
        } else if !bound.contains(value) {
            self.push(path, bound.message());
        }
    }

    fn optional_number(&mut self, section: Option<&str>, bound: &FieldBound, value: Option<f64>) {
        if let Some(value) = value {
            self.number(section, bound, value);
        }
    }

    fn text(&mut self, section: &str, bound: &TextBound, value: &str) {
        if !bound.contains(value) {
            self.push(field_path(Some(section), bound.field), bound.message());
        }
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.issues.is_empty() {
            Ok(value())
        } else {
            Err(ValidationErrors {
                issues: self.issues,
            })
        }
    }
}

fn field_path(section: Option<&str>, field: &str) -> String {
    match section {
        Some(section) => format!("{section}.{field}"),
        None => field.to_string(),
    }
}

/// Scores may arrive fractional; scoring works on the nearest whole point.
fn whole_score(score: f64) -> u16 {
    score.round() as u16
}

/// Check a rate quote request against the selected product and the credit score range.
pub fn validate_rate_request(request: &RateQuoteRequest) -> Result<QuoteTerms, ValidationErrors> {
    let loan_type = request.loan_type.unwrap_or_default();
    let product = LoanProduct::for_type(loan_type);
    let mut collector = IssueCollector::default();

    collector.number(None, &product.amount_bound("loanAmount"), request.loan_amount);
    collector.number(None, &product.term_bound("loanTerm"), request.loan_term);
    collector.optional_number(None, &bounds::CREDIT_SCORE, request.credit_score);

    collector.finish(|| QuoteTerms {
        loan_type,
        amount: request.loan_amount,
        term_months: request.loan_term as u32,
        credit_score: request.credit_score.map(whole_score),
    })
}

/// Check a full application. The product, and so the amount and term bounds, follow the
/// declared loan purpose.
pub fn validate_application(
    submission: &LoanApplicationSubmission,
) -> Result<ApplicantProfile, ValidationErrors> {
    let LoanApplicationSubmission {
        personal_info,
        employment_details,
        financial_info,
        loan_details,
    } = submission;

    let mut collector = IssueCollector::default();

    let personal = Some("personalInfo");
    collector.text("personalInfo", &bounds::FIRST_NAME, &personal_info.first_name);
    collector.text("personalInfo", &bounds::LAST_NAME, &personal_info.last_name);
    collector.number(personal, &bounds::AGE, personal_info.age);
    collector.number(
        personal,
        &bounds::EMPLOYMENT_DURATION,
        personal_info.employment_duration,
    );

    collector.text(
        "employmentDetails",
        &bounds::EMPLOYER_NAME,
        &employment_details.employer_name,
    );
    collector.text("employmentDetails", &bounds::JOB_TITLE, &employment_details.job_title);
    collector.text("employmentDetails", &bounds::INDUSTRY, &employment_details.industry);

    let financial = Some("financialInfo");
    collector.number(financial, &bounds::MONTHLY_INCOME, financial_info.monthly_income);
    collector.number(financial, &bounds::MONTHLY_EXPENSES, financial_info.monthly_expenses);
    collector.number(financial, &bounds::EXISTING_DEBT, financial_info.existing_debt);
    collector.optional_number(financial, &bounds::CREDIT_SCORE, financial_info.credit_score);

    let product = LoanProduct::for_purpose(loan_details.loan_purpose);
    let loan_type = product.id;
    let loan = Some("loanDetails");
    collector.number(
        loan,
        &product.amount_bound("requestedAmount"),
        loan_details.requested_amount,
    );
    collector.number(loan, &product.term_bound("loanTerm"), loan_details.loan_term);

    let credit_score = financial_info.credit_score.map(whole_score);

    collector.finish(|| ApplicantProfile {
        employment_status: personal_info.employment_status,
        employment_duration: personal_info.employment_duration.floor() as u32,
        financial: FinancialProfile {
            monthly_income: financial_info.monthly_income,
            monthly_expenses: financial_info.monthly_expenses,
            existing_debt: financial_info.existing_debt,
            credit_score,
        },
        loan: QuoteTerms {
            loan_type,
            amount: loan_details.requested_amount,
            term_months: loan_details.loan_term as u32,
            credit_score,
        },
        purpose: loan_details.loan_purpose,
    })
}
