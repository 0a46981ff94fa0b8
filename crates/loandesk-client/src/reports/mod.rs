//! Report views over the loan-application collection.
//!
//! Every report is a pure function of the records it is given. The command
//! layer passes the whole collection, independent of the loan screen's
//! current search or page.

pub mod bank_wise;
pub mod comparative;
pub mod monthly;
pub mod regional;

use chrono::NaiveDate;
use loandesk_store::{LoanApplication, Record};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bank_wise::{BankRow, BankWiseReport};
pub use comparative::{ComparativeReport, ComparativeRow};
pub use monthly::{MonthRow, MonthlyReport};
pub use regional::{RegionRow, RegionalReport};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Invalid period: {from} is after {to}")]
    InvalidPeriod { from: NaiveDate, to: NaiveDate },
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ReportError> {
        let period = Self { from, to };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.from > self.to {
            return Err(ReportError::InvalidPeriod {
                from: self.from,
                to: self.to,
            });
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportRequest {
    BankWise,
    Monthly,
    Regional,
    Comparative { base: Period, compare: Period },
}

/// One bar or line series for the chart above a report table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl ChartSeries {
    fn push(&mut self, label: impl Into<String>, value: u64) {
        self.labels.push(label.into());
        self.values.push(value);
    }
}

impl FromIterator<(String, u64)> for ChartSeries {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut series = Self::default();
        for (label, value) in iter {
            series.push(label, value);
        }
        series
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Report {
    BankWise(BankWiseReport),
    Monthly(MonthlyReport),
    Regional(RegionalReport),
    Comparative(ComparativeReport),
}

pub fn run(
    request: &ReportRequest,
    loans: &[Record<LoanApplication>],
) -> Result<Report, ReportError> {
    let report = match request {
        ReportRequest::BankWise => Report::BankWise(bank_wise::build(loans)),
        ReportRequest::Monthly => Report::Monthly(monthly::build(loans)),
        ReportRequest::Regional => Report::Regional(regional::build(loans)),
        ReportRequest::Comparative { base, compare } => {
            Report::Comparative(comparative::build(loans, *base, *compare)?)
        }
    };
    Ok(report)
}

/// `part / whole`, or `None` when there is nothing to divide by.
fn ratio(part: u64, whole: u64) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64)
}
