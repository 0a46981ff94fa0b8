//! Derived view: filter, sort, paginate.
//!
//! [`derive_view`] is a pure function of the records and the view state. The
//! controller calls it on every read so the page slice can never drift from
//! the collection it was computed from.

use loandesk_shared::SortOrder;
use serde::{Deserialize, Serialize};

use crate::fields::{compare_optional, RecordFields};
use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, order: SortOrder) -> Self {
        Self {
            key: key.into(),
            order,
        }
    }
}

/// Ephemeral UI state layered over a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub search_query: String,
    pub sort: Option<SortSpec>,
    /// 1-based.
    pub current_page: usize,
    pub items_per_page: usize,
}

impl ViewState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            search_query: String::new(),
            sort: None,
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }
}

/// One rendered page plus the pagination metadata around it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView<'a, T> {
    pub items: Vec<&'a Record<T>>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub items_per_page: usize,
}

impl<T> PageView<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 1-based position of the first row on this page, 0 when empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.items_per_page + 1
        }
    }

    /// 1-based position of the last row on this page, 0 when empty.
    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }
}

/// `max(1, ceil(count / per_page))`. A zero page size is treated as 1.
pub fn total_pages(count: usize, per_page: usize) -> usize {
    count.div_ceil(per_page.max(1)).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Trimmed, lowercased query; whitespace-only queries become empty.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// True when `query` (already normalized) is empty or is a substring of at
/// least one search field.
pub fn matches_query<T: RecordFields>(record: &Record<T>, fields: &[String], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    fields
        .iter()
        .filter_map(|f| record.field(f))
        .any(|value| value.contains_folded(query))
}

pub fn filter_records<'a, T: RecordFields>(
    records: &'a [Record<T>],
    fields: &[String],
    query: &str,
) -> Vec<&'a Record<T>> {
    let query = normalize_query(query);
    records
        .iter()
        .filter(|r| matches_query(r, fields, &query))
        .collect()
}

/// Stable sort: equal keys keep their collection order in both directions.
pub fn sort_records<T: RecordFields>(items: &mut [&Record<T>], sort: &SortSpec) {
    items.sort_by(|a, b| {
        sort.order
            .apply(compare_optional(a.field(&sort.key), b.field(&sort.key)))
    });
}

pub fn derive_view<'a, T: RecordFields>(
    records: &'a [Record<T>],
    search_fields: &[String],
    state: &ViewState,
) -> PageView<'a, T> {
    let mut matches = filter_records(records, search_fields, &state.search_query);
    if let Some(sort) = &state.sort {
        sort_records(&mut matches, sort);
    }

    let per_page = state.items_per_page.max(1);
    let total_count = matches.len();
    let total_pages = total_pages(total_count, per_page);
    let current_page = clamp_page(state.current_page, total_pages);

    let start = ((current_page - 1) * per_page).min(total_count);
    let end = (start + per_page).min(total_count);

    PageView {
        items: matches[start..end].to_vec(),
        current_page,
        total_pages,
        total_count,
        items_per_page: per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Branch;
    use chrono::Utc;
    use loandesk_shared::RecordId;

    fn branches(names: &[&str]) -> Vec<Record<Branch>> {
        let now = Utc::now();
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                Record::new(
                    RecordId::compose("branch", i + 1),
                    Branch {
                        name: (*name).to_string(),
                        ..Branch::default()
                    },
                    now,
                )
            })
            .collect()
    }

    fn names<T>(view: &PageView<'_, T>) -> Vec<String>
    where
        T: RecordFields,
    {
        view.items
            .iter()
            .map(|r| r.field("name").map(|v| v.display()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_total_pages_floor_at_one() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let records = branches(&["Pune", "Aundh", "Baner"]);
        let state = ViewState::new(10);
        let view = derive_view(&records, &["name".to_string()], &state);
        assert_eq!(names(&view), vec!["Pune", "Aundh", "Baner"]);
        assert_eq!(view.total_count, 3);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = branches(&["Pune Camp", "Aundh", "camp road"]);
        let mut state = ViewState::new(10);
        state.search_query = "  CAMP ".into();
        let view = derive_view(&records, &["name".to_string()], &state);
        assert_eq!(names(&view), vec!["Pune Camp", "camp road"]);
    }

    #[test]
    fn test_search_ignores_unconfigured_fields() {
        let records = branches(&["Pune"]);
        let mut state = ViewState::new(10);
        state.search_query = "pune".into();
        let view = derive_view(&records, &["code".to_string()], &state);
        assert_eq!(view.total_count, 0);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_sort_desc_is_mirror_and_stable() {
        let records = branches(&["b", "A", "a", "C"]);
        let mut state = ViewState::new(10);
        state.sort = Some(SortSpec::new("name", SortOrder::Asc));
        let asc = derive_view(&records, &[], &state);
        assert_eq!(names(&asc), vec!["A", "a", "b", "C"]);

        state.sort = Some(SortSpec::new("name", SortOrder::Desc));
        let desc = derive_view(&records, &[], &state);
        assert_eq!(names(&desc), vec!["C", "b", "a", "A"]);
    }

    #[test]
    fn test_ties_keep_collection_order() {
        let records = branches(&["x", "y", "z"]);
        let mut state = ViewState::new(10);
        // every branch shares the default office type
        state.sort = Some(SortSpec::new("officeType", SortOrder::Desc));
        let view = derive_view(&records, &[], &state);
        assert_eq!(names(&view), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_page_is_clamped() {
        let records = branches(&["A1", "A2", "A3", "A4", "A5", "A6", "A7"]);
        let mut state = ViewState::new(5);
        state.current_page = 9;
        let view = derive_view(&records, &[], &state);
        assert_eq!(view.current_page, 2);
        assert_eq!(names(&view), vec!["A6", "A7"]);
        assert_eq!(view.first_index(), 6);
        assert_eq!(view.last_index(), 7);
        assert!(view.has_previous());
        assert!(!view.has_next());

        state.current_page = 0;
        let view = derive_view(&records, &[], &state);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.items.len(), 5);
    }

    #[test]
    fn test_derive_view_does_not_mutate_inputs() {
        let records = branches(&["b", "a"]);
        let before = records.clone();
        let mut state = ViewState::new(1);
        state.sort = Some(SortSpec::new("name", SortOrder::Asc));
        state.current_page = 7;
        let snapshot = state.clone();
        let _ = derive_view(&records, &["name".to_string()], &state);
        assert_eq!(records, before);
        assert_eq!(state, snapshot);
    }
}
