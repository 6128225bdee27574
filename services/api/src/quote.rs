use crate::infra::{default_eligibility_policy, parse_amount, parse_loan_type};
use clap::Args;
use loan_eligibility::calculations::{format_currency, LoanParams, ScheduleExporter};
use loan_eligibility::error::AppError;
use loan_eligibility::lending::{
    LendingService, LoanProduct, LoanType, RateQuote, RateQuoteRequest, UnlimitedRateLimiter,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Loan amount in Rand, e.g. 150000 or "R 150 000,00"
    #[arg(long, value_parser = parse_amount)]
    pub(crate) amount: f64,
    /// Repayment term in months
    #[arg(long)]
    pub(crate) term: u32,
    /// Credit score (300-850); omitted scores are priced at the base rate
    #[arg(long)]
    pub(crate) credit_score: Option<u16>,
    /// personal_loan or vehicle_loan
    #[arg(long, value_parser = parse_loan_type, default_value = "personal_loan")]
    pub(crate) loan_type: LoanType,
}

#[derive(Args, Debug)]
pub(crate) struct ScheduleArgs {
    #[command(flatten)]
    pub(crate) quote: QuoteArgs,
    /// Write the schedule to this CSV file instead of printing it
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) fn price(args: &QuoteArgs) -> Result<RateQuote, AppError> {
    let service = LendingService::new(Arc::new(UnlimitedRateLimiter), default_eligibility_policy());
    let request = RateQuoteRequest {
        loan_amount: args.amount,
        loan_term: args.term as f64,
        credit_score: args.credit_score.map(f64::from),
        loan_type: Some(args.loan_type),
    };
    Ok(service.quote(&request)?)
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let quote = price(&args)?;
    let product = LoanProduct::for_type(args.loan_type);

    println!("{} quote", product.name);
    println!(
        "- {} over {} months at {:.2}% p.a.",
        format_currency(args.amount),
        args.term,
        quote.interest_rate
    );
    println!("- Monthly payment: {}", format_currency(quote.monthly_payment));
    println!("- Total interest: {}", format_currency(quote.total_interest));
    println!("- Total repayment: {}", format_currency(quote.total_repayment));
    Ok(())
}

pub(crate) fn run_schedule(args: ScheduleArgs) -> Result<(), AppError> {
    let ScheduleArgs { quote: terms, csv } = args;
    let quote = price(&terms)?;

    if let Some(path) = csv {
        let params = LoanParams::new(terms.amount, quote.interest_rate, terms.term);
        ScheduleExporter::to_path(&path, &params)?;
        println!(
            "Amortization schedule ({} payments at {:.2}%) written to {}",
            quote.payment_schedule.len(),
            quote.interest_rate,
            path.display()
        );
        return Ok(());
    }

    println!(
        "Amortization schedule for {} at {:.2}% p.a.",
        format_currency(terms.amount),
        quote.interest_rate
    );
    println!(
        "{:>5}  {:>16}  {:>16}  {:>16}  {:>16}",
        "Month", "Payment", "Principal", "Interest", "Balance"
    );
    for entry in &quote.payment_schedule {
        println!(
            "{:>5}  {:>16}  {:>16}  {:>16}  {:>16}",
            entry.month,
            format_currency(entry.payment),
            format_currency(entry.principal),
            format_currency(entry.interest),
            format_currency(entry.balance)
        );
    }
    println!(
        "Total repayment {} | total interest {}",
        format_currency(quote.total_repayment),
        format_currency(quote.total_interest)
    );
    Ok(())
}
