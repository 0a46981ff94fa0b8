use std::collections::BTreeMap;

use loandesk_shared::format::{format_inr, format_percent};
use loandesk_store::{LoanApplication, Record};
use serde::Serialize;

use super::{ratio, ChartSeries};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRow {
    pub region: String,
    pub applications: usize,
    pub total_amount: u64,
    /// Fraction of the grand total, `0.0..=1.0`.
    pub share: f64,
    pub total_display: String,
    pub share_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalReport {
    pub rows: Vec<RegionRow>,
    pub grand_total: u64,
    pub grand_total_display: String,
    pub chart: ChartSeries,
}

pub fn build(loans: &[Record<LoanApplication>]) -> RegionalReport {
    let mut regions: BTreeMap<&str, RegionRow> = BTreeMap::new();
    for loan in loans.iter().map(|r| &r.fields) {
        let row = regions.entry(loan.region.as_str()).or_default();
        row.applications += 1;
        row.total_amount = row.total_amount.saturating_add(loan.amount);
    }

    let grand_total: u64 = regions.values().fold(0u64, |acc, r| acc.saturating_add(r.total_amount));
    let mut rows: Vec<RegionRow> = regions
        .into_iter()
        .map(|(region, mut row)| {
            row.region = region.to_string();
            row.share = ratio(row.total_amount, grand_total).unwrap_or(0.0);
            row.total_display = format_inr(row.total_amount);
            row.share_display = format_percent(row.share);
            row
        })
        .collect();
    rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));

    let chart = rows
        .iter()
        .map(|r| (r.region.clone(), r.total_amount))
        .collect();

    RegionalReport {
        rows,
        grand_total,
        grand_total_display: format_inr(grand_total),
        chart,
    }
}
