use std::collections::BTreeMap;

use loandesk_shared::format::{format_inr, format_percent};
use loandesk_store::{LoanApplication, LoanStatus, Record};
use serde::Serialize;

use super::{ratio, ChartSeries};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRow {
    pub bank: String,
    pub applications: usize,
    pub total_amount: u64,
    pub sanctioned_amount: u64,
    pub disbursed_amount: u64,
    pub sanctioned: usize,
    pub rejected: usize,
    /// Sanctioned share of decided applications; `None` while nothing is decided.
    pub approval_rate: Option<f64>,
    pub total_display: String,
    pub approval_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankWiseReport {
    pub rows: Vec<BankRow>,
    pub grand_total: u64,
    pub grand_total_display: String,
    pub chart: ChartSeries,
}

/// Per-bank totals, largest lender first.
pub fn build(loans: &[Record<LoanApplication>]) -> BankWiseReport {
    let mut banks: BTreeMap<&str, BankRow> = BTreeMap::new();

    for loan in loans.iter().map(|r| &r.fields) {
        let row = banks.entry(loan.bank.as_str()).or_default();
        row.applications += 1;
        row.total_amount = row.total_amount.saturating_add(loan.amount);
        if loan.status.is_sanctioned() {
            row.sanctioned += 1;
            row.sanctioned_amount = row.sanctioned_amount.saturating_add(loan.amount);
        }
        match loan.status {
            LoanStatus::Disbursed => {
                row.disbursed_amount = row.disbursed_amount.saturating_add(loan.amount);
            }
            LoanStatus::Rejected => row.rejected += 1,
            LoanStatus::Pending | LoanStatus::Sanctioned => {}
        }
    }

    let mut rows: Vec<BankRow> = banks
        .into_iter()
        .map(|(bank, mut row)| {
            row.bank = bank.to_string();
            row.approval_rate = ratio(row.sanctioned as u64, (row.sanctioned + row.rejected) as u64);
            row.total_display = format_inr(row.total_amount);
            row.approval_display = row
                .approval_rate
                .map(format_percent)
                .unwrap_or_else(|| "n/a".to_string());
            row
        })
        .collect();
    // BTreeMap order breaks ties by name
    rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));

    let grand_total = rows.iter().fold(0u64, |acc, r| acc.saturating_add(r.total_amount));
    let chart = rows
        .iter()
        .map(|r| (r.bank.clone(), r.total_amount))
        .collect();

    BankWiseReport {
        rows,
        grand_total,
        grand_total_display: format_inr(grand_total),
        chart,
    }
}
