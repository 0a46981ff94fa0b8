use std::collections::BTreeMap;

use loandesk_shared::format::{format_change, format_inr};
use loandesk_store::{LoanApplication, Record};
use serde::Serialize;

use super::{ChartSeries, Period, ReportError};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeRow {
    pub bank: String,
    pub base_count: usize,
    pub base_amount: u64,
    pub compare_count: usize,
    pub compare_amount: u64,
    /// `compare_amount - base_amount`.
    pub change: i64,
    /// `change / base_amount`; `None` when the base period had no amount.
    pub change_pct: Option<f64>,
    pub change_display: String,
}

impl ComparativeRow {
    fn finish(mut self) -> Self {
        self.change = signed_diff(self.base_amount, self.compare_amount);
        self.change_pct = (self.base_amount > 0)
            .then(|| self.change as f64 / self.base_amount as f64);
        self.change_display = format_change(self.change_pct);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeReport {
    pub base: Period,
    pub compare: Period,
    pub rows: Vec<ComparativeRow>,
    pub total: ComparativeRow,
    pub base_display: String,
    pub compare_display: String,
    /// Base period amounts per bank.
    pub chart: ChartSeries,
    /// Compare period amounts, same labels as `chart`.
    pub compare_chart: ChartSeries,
}

fn signed_diff(from: u64, to: u64) -> i64 {
    if to >= from {
        i64::try_from(to - from).unwrap_or(i64::MAX)
    } else {
        i64::try_from(from - to).map(|d| -d).unwrap_or(i64::MIN)
    }
}

/// Per-bank amounts in two periods. A bank appears when it has applications
/// in either period; banks are listed alphabetically.
pub fn build(
    loans: &[Record<LoanApplication>],
    base: Period,
    compare: Period,
) -> Result<ComparativeReport, ReportError> {
    base.validate()?;
    compare.validate()?;

    let mut banks: BTreeMap<&str, ComparativeRow> = BTreeMap::new();
    for loan in loans.iter().map(|r| &r.fields) {
        let in_base = base.contains(loan.applied_on);
        let in_compare = compare.contains(loan.applied_on);
        if !in_base && !in_compare {
            continue;
        }
        let row = banks.entry(loan.bank.as_str()).or_default();
        if in_base {
            row.base_count += 1;
            row.base_amount = row.base_amount.saturating_add(loan.amount);
        }
        if in_compare {
            row.compare_count += 1;
            row.compare_amount = row.compare_amount.saturating_add(loan.amount);
        }
    }

    let rows: Vec<ComparativeRow> = banks
        .into_iter()
        .map(|(bank, mut row)| {
            row.bank = bank.to_string();
            row.finish()
        })
        .collect();

    let total = rows
        .iter()
        .fold(
            ComparativeRow {
                bank: "Total".to_string(),
                ..ComparativeRow::default()
            },
            |mut acc, row| {
                acc.base_count += row.base_count;
                acc.base_amount = acc.base_amount.saturating_add(row.base_amount);
                acc.compare_count += row.compare_count;
                acc.compare_amount = acc.compare_amount.saturating_add(row.compare_amount);
                acc
            },
        )
        .finish();

    let chart = rows.iter().map(|r| (r.bank.clone(), r.base_amount)).collect();
    let compare_chart = rows.iter().map(|r| (r.bank.clone(), r.compare_amount)).collect();

    Ok(ComparativeReport {
        base,
        compare,
        base_display: format_inr(total.base_amount),
        compare_display: format_inr(total.compare_amount),
        rows,
        total,
        chart,
        compare_chart,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::fixtures::{date, loan};
    use loandesk_store::LoanStatus;

    fn q1() -> Period {
        Period::new(date(2024, 1, 1), date(2024, 3, 31)).unwrap()
    }

    fn q2() -> Period {
        Period::new(date(2024, 4, 1), date(2024, 6, 30)).unwrap()
    }

    #[test]
    fn test_change_between_periods() {
        let loans = vec![
            loan(1, "SBI", "Pune", 100_000, LoanStatus::Pending, date(2024, 1, 15)),
            loan(2, "SBI", "Pune", 150_000, LoanStatus::Pending, date(2024, 4, 15)),
            loan(3, "HDFC", "Pune", 80_000, LoanStatus::Pending, date(2024, 3, 31)),
            loan(4, "Axis", "Pune", 60_000, LoanStatus::Pending, date(2024, 6, 30)),
            loan(5, "Axis", "Pune", 999_000, LoanStatus::Pending, date(2024, 7, 1)),
        ];
        let report = build(&loans, q1(), q2()).unwrap();

        let banks: Vec<&str> = report.rows.iter().map(|r| r.bank.as_str()).collect();
        assert_eq!(banks, vec!["Axis", "HDFC", "SBI"]);

        let axis = &report.rows[0];
        assert_eq!(axis.base_amount, 0);
        assert_eq!(axis.compare_amount, 60_000);
        assert_eq!(axis.change, 60_000);
        assert_eq!(axis.change_pct, None);
        assert_eq!(axis.change_display, "n/a");

        let hdfc = &report.rows[1];
        assert_eq!(hdfc.change, -80_000);
        assert_eq!(hdfc.change_pct, Some(-1.0));

        let sbi = &report.rows[2];
        assert_eq!(sbi.change_pct, Some(0.5));
        assert_eq!(sbi.change_display, "+50.0%");

        assert_eq!(report.total.base_amount, 180_000);
        assert_eq!(report.total.compare_amount, 210_000);
        assert_eq!(report.total.base_count, 2);
        assert_eq!(report.chart.values, vec![0, 80_000, 100_000]);
        assert_eq!(report.compare_chart.values, vec![60_000, 0, 150_000]);
    }

    #[test]
    fn test_overlapping_periods_count_in_both() {
        let loans = vec![loan(1, "SBI", "Pune", 10_000, LoanStatus::Pending, date(2024, 2, 1))];
        let all = Period::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let report = build(&loans, q1(), all).unwrap();
        assert_eq!(report.rows[0].base_count, 1);
        assert_eq!(report.rows[0].compare_count, 1);
        assert_eq!(report.rows[0].change_pct, Some(0.0));
    }

    #[test]
    fn test_rejects_inverted_period() {
        let bad = Period {
            from: date(2024, 5, 1),
            to: date(2024, 4, 1),
        };
        assert!(matches!(
            build(&[], q1(), bad),
            Err(ReportError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let loans = vec![
            loan(1, "SBI", "Pune", u64::MAX, LoanStatus::Pending, date(2024, 1, 2)),
            loan(2, "HDFC", "Pune", u64::MAX, LoanStatus::Pending, date(2024, 1, 3)),
        ];
        let report = build(&loans, q1(), q2()).unwrap();
        assert_eq!(report.total.base_amount, u64::MAX);
        assert_eq!(report.total.compare_amount, 0);
        assert_eq!(report.total.change, i64::MIN);
    }

    #[test]
    fn test_signed_diff() {
        assert_eq!(signed_diff(10, 25), 15);
        assert_eq!(signed_diff(25, 10), -15);
        assert_eq!(signed_diff(7, 7), 0);
    }
}
