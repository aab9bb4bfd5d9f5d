//! Load loan applications from applicant CSV files.
//!
//! Only the columns the decision depends on are read; any other columns in
//! the file are ignored.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::Reader;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{ApplicantRecord, EmploymentStatus, LoanApplication, Verdict};

/// Raw CSV row matching the applicant dataset columns.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Applicant ID", default)]
    applicant_id: Option<String>,
    #[serde(rename = "Credit Score")]
    credit_score: String,
    #[serde(rename = "Debt-to-Income Ratio")]
    dti_ratio: String,
    #[serde(rename = "Employment Status")]
    employment_status: String,
    #[serde(rename = "Loan Amount")]
    loan_amount: String,
    #[serde(rename = "Maximum Loan Limit")]
    maximum_loan_limit: String,
    #[serde(rename = "Loan Approval Status", default)]
    loan_approval_status: Option<String>,
}

impl CsvRow {
    fn into_application(self, row: usize) -> EngineResult<LoanApplication> {
        let credit_score = parse_decimal(&self.credit_score, "Credit Score", row)?;
        let credit_score = Some(credit_score)
            .filter(|score| score.fract().is_zero())
            .and_then(|score| score.to_u32())
            .ok_or_else(|| {
                ingest_error(
                    row,
                    format!("Credit Score '{}' is not a whole number", self.credit_score),
                )
            })?;

        let employment_status = EmploymentStatus::from_str(&self.employment_status)
            .map_err(|err| ingest_error(row, err.to_string()))?;

        let recorded_status = match self.loan_approval_status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => Some(
                Verdict::from_str(label).map_err(|err| ingest_error(row, err.to_string()))?,
            ),
        };

        let applicant = ApplicantRecord {
            credit_score,
            dti_ratio: parse_decimal(&self.dti_ratio, "Debt-to-Income Ratio", row)?,
            employment_status,
            requested_loan_amount: parse_decimal(&self.loan_amount, "Loan Amount", row)?,
            maximum_loan_limit: parse_decimal(&self.maximum_loan_limit, "Maximum Loan Limit", row)?,
        };
        applicant
            .validate()
            .map_err(|err| ingest_error(row, err.to_string()))?;

        let id = match self.applicant_id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => row.to_string(),
        };

        Ok(LoanApplication {
            id,
            applicant,
            recorded_status,
        })
    }
}

fn parse_decimal(value: &str, column: &str, row: usize) -> EngineResult<Decimal> {
    let trimmed = value.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ingest_error(row, format!("{} '{}' is not a number", column, value)))
}

fn ingest_error(row: usize, message: String) -> EngineError {
    EngineError::IngestError { row, message }
}

/// Load all applications from a CSV file.
pub fn load_applications<P: AsRef<Path>>(path: P) -> EngineResult<Vec<LoanApplication>> {
    let path = path.as_ref();
    let reader = Reader::from_path(path).map_err(|err| {
        ingest_error(0, format!("cannot open {}: {}", path.display(), err))
    })?;
    let applications = read_rows(reader)?;
    debug!(
        path = %path.display(),
        count = applications.len(),
        "Loaded applications"
    );
    Ok(applications)
}

/// Load applications from any reader (e.g., string buffer, request body).
pub fn load_applications_from_reader<R: Read>(reader: R) -> EngineResult<Vec<LoanApplication>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: Read>(mut reader: Reader<R>) -> EngineResult<Vec<LoanApplication>> {
    let mut applications = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row_number = index + 1;
        let row: CsvRow = result.map_err(|err| ingest_error(row_number, err.to_string()))?;
        applications.push(row.into_application(row_number)?);
    }

    Ok(applications)
}
