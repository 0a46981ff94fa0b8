use std::collections::BTreeMap;

use loandesk_shared::format::format_inr;
use loandesk_store::{LoanApplication, LoanStatus, Record};
use serde::Serialize;

use super::ChartSeries;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRow {
    /// `YYYY-MM`.
    pub month: String,
    pub applications: usize,
    pub total_amount: u64,
    pub disbursed_amount: u64,
    pub total_display: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub rows: Vec<MonthRow>,
    pub chart: ChartSeries,
}

/// Applications grouped by the calendar month they were filed in, oldest first.
/// Months with no applications are omitted.
pub fn build(loans: &[Record<LoanApplication>]) -> MonthlyReport {
    let mut months: BTreeMap<String, MonthRow> = BTreeMap::new();

    for loan in loans.iter().map(|r| &r.fields) {
        let key = loan.applied_on.format("%Y-%m").to_string();
        let row = months.entry(key).or_default();
        row.applications += 1;
        row.total_amount = row.total_amount.saturating_add(loan.amount);
        if loan.status == LoanStatus::Disbursed {
            row.disbursed_amount = row.disbursed_amount.saturating_add(loan.amount);
        }
    }

    let rows: Vec<MonthRow> = months
        .into_iter()
        .map(|(month, mut row)| {
            row.month = month;
            row.total_display = format_inr(row.total_amount);
            row
        })
        .collect();
    let chart = rows
        .iter()
        .map(|r| (r.month.clone(), r.total_amount))
        .collect();

    MonthlyReport { rows, chart }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{date, loan};
    use loandesk_store::{MockDataService, Seed};

    #[test]
    fn test_months_ascending() {
        let loans = vec![
            loan(1, "SBI", "Pune", 20_000, LoanStatus::Disbursed, date(2024, 3, 5)),
            loan(2, "SBI", "Pune", 10_000, LoanStatus::Pending, date(2023, 12, 31)),
            loan(3, "SBI", "Pune", 5_000, LoanStatus::Disbursed, date(2024, 3, 28)),
        ];
        let report = build(&loans);

        let months: Vec<&str> = report.rows.iter().map(|r| r.month.as_str()).collect();
        assert_eq!(months, vec!["2023-12", "2024-03"]);
        assert_eq!(report.rows[1].applications, 2);
        assert_eq!(report.rows[1].total_amount, 25_000);
        assert_eq!(report.rows[1].disbursed_amount, 25_000);
        assert_eq!(report.rows[0].disbursed_amount, 0);
        assert_eq!(report.chart.values, vec![10_000, 25_000]);
    }

    #[test]
    fn test_mock_loans_cover_six_months() {
        let loans: Vec<Record<LoanApplication>> = MockDataService::new().seed("loan");
        let report = build(&loans);
        assert_eq!(report.rows.len(), 6);
        assert_eq!(report.rows[0].month, "2024-01");
        assert_eq!(report.rows.iter().map(|r| r.applications).sum::<usize>(), loans.len());
    }
}
