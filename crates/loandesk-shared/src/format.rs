//! Display formatting for amounts and ratios shown in report tables.
//!
//! Amounts are whole rupees. Grouping follows the Indian numbering system:
//! the last three digits form one group and every group before that has two
//! digits (`12,34,567`).

use crate::constants::CURRENCY_SYMBOL;

const LAKH: u64 = 100_000;
const CRORE: u64 = 10_000_000;

/// Group digits the Indian way: `1234567` -> `12,34,567`.
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Full currency rendering: `₹12,34,567`.
pub fn format_inr(amount: u64) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_indian(amount))
}

/// Compact rendering for chart axes: `₹1.25 Cr`, `₹4.50 L`, `₹9,999`.
pub fn format_inr_compact(amount: u64) -> String {
    if amount >= CRORE {
        format!("{CURRENCY_SYMBOL}{:.2} Cr", amount as f64 / CRORE as f64)
    } else if amount >= LAKH {
        format!("{CURRENCY_SYMBOL}{:.2} L", amount as f64 / LAKH as f64)
    } else {
        format_inr(amount)
    }
}

/// `0.125` -> `12.5%` with one decimal place.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Signed change for comparative reports; `None` means there is no base to compare against.
pub fn format_change(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) if r > 0.0 => format!("+{}", format_percent(r)),
        Some(r) => format_percent(r),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(999), "999");
        assert_eq!(group_indian(1_000), "1,000");
        assert_eq!(group_indian(99_999), "99,999");
        assert_eq!(group_indian(100_000), "1,00,000");
        assert_eq!(group_indian(1_234_567), "12,34,567");
        assert_eq!(group_indian(123_456_789), "12,34,56,789");
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(250_000), "\u{20b9}2,50,000");
    }

    #[test]
    fn test_format_inr_compact() {
        assert_eq!(format_inr_compact(12_500_000), "\u{20b9}1.25 Cr");
        assert_eq!(format_inr_compact(450_000), "\u{20b9}4.50 L");
        assert_eq!(format_inr_compact(9_999), "\u{20b9}9,999");
    }

    #[test]
    fn test_format_percent_and_change() {
        assert_eq!(format_percent(0.125), "12.5%");
        assert_eq!(format_change(Some(0.5)), "+50.0%");
        assert_eq!(format_change(Some(-0.25)), "-25.0%");
        assert_eq!(format_change(Some(0.0)), "0.0%");
        assert_eq!(format_change(None), "n/a");
    }
}
