use std::io::Write;
use std::path::Path;

use super::loan::{generate_amortization_schedule, AmortizationEntry, LoanParams};
use super::CalculationError;

const HEADERS: [&str; 5] = ["Month", "Payment", "Principal", "Interest", "Balance"];

#[derive(Debug)]
pub enum ScheduleExportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Calculation(CalculationError),
}

impl std::fmt::Display for ScheduleExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleExportError::Io(err) => write!(f, "failed to write schedule export: {}", err),
            ScheduleExportError::Csv(err) => write!(f, "could not encode schedule as CSV: {}", err),
            ScheduleExportError::Calculation(err) => {
                write!(f, "could not build amortization schedule: {}", err)
            }
        }
    }
}

impl std::error::Error for ScheduleExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScheduleExportError::Io(err) => Some(err),
            ScheduleExportError::Csv(err) => Some(err),
            ScheduleExportError::Calculation(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ScheduleExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScheduleExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<CalculationError> for ScheduleExportError {
    fn from(err: CalculationError) -> Self {
        Self::Calculation(err)
    }
}

/// Writes an amortization schedule plus a summary block as CSV.
pub struct ScheduleExporter;

impl ScheduleExporter {
    pub fn to_path<P: AsRef<Path>>(
        path: P,
        params: &LoanParams,
    ) -> Result<(), ScheduleExportError> {
        let file = std::fs::File::create(path)?;
        Self::to_writer(file, params).map(|_| ())
    }

    pub fn to_writer<W: Write>(writer: W, params: &LoanParams) -> Result<W, ScheduleExportError> {
        let schedule = generate_amortization_schedule(params)?;
        write_schedule(writer, params, &schedule)
    }
}

fn write_schedule<W: Write>(
    mut writer: W,
    params: &LoanParams,
    schedule: &[AmortizationEntry],
) -> Result<W, ScheduleExportError> {
    let mut rows = csv_writer(&mut writer);
    rows.write_record(HEADERS)?;
    for entry in schedule {
        rows.write_record([
            entry.month.to_string(),
            money(entry.payment),
            money(entry.principal),
            money(entry.interest),
            money(entry.balance),
        ])?;
    }
    finish(rows)?;

    // A lone empty field would be quoted by the csv writer, so the separator goes out raw.
    writer.write_all(b"\n")?;

    let total_repayment: f64 = schedule.iter().map(|entry| entry.payment).sum();
    let total_interest: f64 = schedule.iter().map(|entry| entry.interest).sum();

    let mut summary = csv_writer(&mut writer);
    summary.write_record(["Summary"])?;
    summary.write_record(["Loan Amount".to_string(), money(params.principal)])?;
    summary.write_record(["Interest Rate (%)".to_string(), money(params.annual_rate)])?;
    summary.write_record(["Term (months)".to_string(), params.term_months.to_string()])?;
    summary.write_record(["Total Repayment".to_string(), money(total_repayment)])?;
    summary.write_record(["Total Interest".to_string(), money(total_interest)])?;
    finish(summary)?;

    writer.flush()?;
    Ok(writer)
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}

fn finish<W: Write>(writer: csv::Writer<W>) -> Result<W, ScheduleExportError> {
    writer
        .into_inner()
        .map_err(|err| ScheduleExportError::Io(err.into_error()))
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export(params: &LoanParams) -> String {
        let bytes = ScheduleExporter::to_writer(Vec::new(), params).expect("export succeeds");
        String::from_utf8(bytes).expect("utf8 output")
    }

    #[test]
    fn writes_one_row_per_month_then_summary() {
        let output = export(&LoanParams::new(12_000.0, 0.0, 3));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Month,Payment,Principal,Interest,Balance");
        assert_eq!(lines[1], "1,4000.00,4000.00,0.00,8000.00");
        assert_eq!(lines[3], "3,4000.00,4000.00,0.00,0.00");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Summary");
        assert_eq!(lines[6], "Loan Amount,12000.00");
        assert_eq!(lines[7], "Interest Rate (%),0.00");
        assert_eq!(lines[8], "Term (months),3");
        assert_eq!(lines[9], "Total Repayment,12000.00");
        assert_eq!(lines[10], "Total Interest,0.00");
    }

    #[test]
    fn separates_summary_with_a_single_unquoted_blank_line() {
        let output = export(&LoanParams::new(12_000.0, 0.0, 3));

        assert!(output.contains("3,4000.00,4000.00,0.00,0.00\n\nSummary\n"));
        assert!(!output.contains("\"\""));
        assert!(output.ends_with("Total Interest,0.00\n"));
    }

    #[test]
    fn rejects_invalid_loans() {
        let err = ScheduleExporter::to_writer(Vec::new(), &LoanParams::new(0.0, 12.5, 12))
            .expect_err("invalid principal");
        assert!(matches!(
            err,
            ScheduleExportError::Calculation(CalculationError::InvalidParameters)
        ));
    }

    #[test]
    fn writes_to_disk() {
        let path = std::env::temp_dir().join(format!(
            "loan-schedule-{}-{}.csv",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));

        ScheduleExporter::to_path(&path, &LoanParams::new(100_000.0, 12.5, 24))
            .expect("export succeeds");
        let contents = std::fs::read_to_string(&path).expect("file written");
        std::fs::remove_file(&path).ok();

        assert_eq!(contents.lines().count(), 1 + 24 + 1 + 6);
        assert!(contents.starts_with("Month,Payment"));
    }
}
