use std::collections::HashSet;

use chrono::Utc;
use loandesk_shared::{RecordId, SortOrder};
use loandesk_store::fields::compare_optional;
use loandesk_store::view::{filter_records, sort_records, total_pages};
use loandesk_store::{
    derive_view, ControllerConfig, FieldValue, Record, RecordFields, SortSpec,
    TabularCollectionController, ViewState,
};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Row {
    name: String,
    city: String,
    rank: u32,
    is_active: bool,
}

impl RecordFields for Row {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "city" => Some(FieldValue::Text(&self.city)),
            "rank" => Some(FieldValue::Number(f64::from(self.rank))),
            "isActive" => Some(FieldValue::Flag(self.is_active)),
            _ => None,
        }
    }
}

fn search_fields() -> Vec<String> {
    vec!["name".to_string(), "city".to_string()]
}

fn row_strategy() -> impl Strategy<Value = Row> {
    ("[a-cA-C]{0,4}", "[a-dA-D ]{0,5}", 0u32..20, any::<bool>()).prop_map(
        |(name, city, rank, is_active)| Row {
            name,
            city,
            rank,
            is_active,
        },
    )
}

fn records_strategy() -> impl Strategy<Value = Vec<Record<Row>>> {
    prop::collection::vec(row_strategy(), 0..40).prop_map(|rows| {
        let now = Utc::now();
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| Record::new(RecordId::compose("row", i), row, now))
            .collect()
    })
}

fn sort_strategy() -> impl Strategy<Value = SortSpec> {
    (
        prop::sample::select(vec!["name", "city", "rank", "isActive", "missing"]),
        prop::bool::ANY,
    )
        .prop_map(|(key, desc)| {
            SortSpec::new(key, if desc { SortOrder::Desc } else { SortOrder::Asc })
        })
}

fn field_matches(record: &Record<Row>, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    search_fields().iter().any(|f| {
        record
            .field(f)
            .map(|v| v.display().to_lowercase().contains(&q))
            .unwrap_or(false)
    })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn filter_is_sound_and_complete(records in records_strategy(), query in "[a-dA-D]{0,2}") {
        let kept: HashSet<&RecordId> = filter_records(&records, &search_fields(), &query)
            .into_iter()
            .map(|r| &r.id)
            .collect();
        for record in &records {
            prop_assert_eq!(kept.contains(&record.id), field_matches(record, &query));
        }
    }

    #[test]
    fn sort_is_ordered_permutation(records in records_strategy(), sort in sort_strategy()) {
        let mut items: Vec<&Record<Row>> = records.iter().collect();
        sort_records(&mut items, &sort);

        let mut before: Vec<&RecordId> = records.iter().map(|r| &r.id).collect();
        let mut after: Vec<&RecordId> = items.iter().map(|r| &r.id).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);

        for pair in items.windows(2) {
            let ord = compare_optional(pair[0].field(&sort.key), pair[1].field(&sort.key));
            match sort.order {
                SortOrder::Asc => prop_assert!(ord.is_le()),
                SortOrder::Desc => prop_assert!(ord.is_ge()),
            }
        }
    }

    #[test]
    fn sort_ties_keep_collection_order(records in records_strategy(), sort in sort_strategy()) {
        let position = |id: &RecordId| records.iter().position(|r| &r.id == id);
        let mut items: Vec<&Record<Row>> = records.iter().collect();
        sort_records(&mut items, &sort);
        for pair in items.windows(2) {
            let ord = compare_optional(pair[0].field(&sort.key), pair[1].field(&sort.key));
            if ord.is_eq() {
                prop_assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
    }

    #[test]
    fn pages_reconstruct_sorted_view(
        records in records_strategy(),
        sort in prop::option::of(sort_strategy()),
        query in "[a-dA-D]{0,1}",
        per_page in 1usize..8,
    ) {
        let mut state = ViewState::new(per_page);
        state.search_query = query.clone();
        state.sort = sort.clone();

        let mut expected = filter_records(&records, &search_fields(), &query);
        if let Some(sort) = &sort {
            sort_records(&mut expected, sort);
        }

        let first = derive_view(&records, &search_fields(), &state);
        prop_assert_eq!(first.total_pages, total_pages(expected.len(), per_page));
        prop_assert_eq!(first.total_pages, std::cmp::max(1, expected.len().div_ceil(per_page)));

        let mut joined = Vec::new();
        for page in 1..=first.total_pages {
            state.current_page = page;
            let view = derive_view(&records, &search_fields(), &state);
            prop_assert_eq!(view.current_page, page);
            prop_assert!(view.items.len() <= per_page);
            joined.extend(view.items.iter().map(|r| r.id.clone()));
        }
        let expected_ids: Vec<RecordId> = expected.iter().map(|r| r.id.clone()).collect();
        prop_assert_eq!(joined, expected_ids);
    }

    #[test]
    fn set_page_is_idempotent(count in 0usize..30, per_page in 1usize..7, page in 0usize..10) {
        let config = ControllerConfig::builder("row")
            .search_fields(search_fields())
            .items_per_page(per_page)
            .build()
            .unwrap();
        let mut c = TabularCollectionController::<Row>::new(config);
        for i in 0..count {
            c.create(Row { name: format!("r{i}"), ..Row::default() }).unwrap();
        }
        c.set_page(page);
        let once: Vec<RecordId> = c.page_slice().iter().map(|r| r.id.clone()).collect();
        c.set_page(page);
        let twice: Vec<RecordId> = c.page_slice().iter().map(|r| r.id.clone()).collect();
        prop_assert_eq!(once, twice);
        prop_assert!(c.current_page() >= 1 && c.current_page() <= c.total_pages());
    }

    #[test]
    fn deleting_last_page_clamps(count in 1usize..30, per_page in 1usize..7) {
        let config = ControllerConfig::builder("row")
            .items_per_page(per_page)
            .build()
            .unwrap();
        let mut c = TabularCollectionController::<Row>::new(config);
        for i in 0..count {
            c.create(Row { name: format!("r{i}"), ..Row::default() }).unwrap();
        }
        let last = c.total_pages();
        c.set_page(last);
        let doomed: Vec<RecordId> = c.page_slice().iter().map(|r| r.id.clone()).collect();
        for id in &doomed {
            c.delete(id).unwrap();
        }

        prop_assert!(c.current_page() <= c.total_pages());
        if !c.is_empty() {
            prop_assert!(!c.page_slice().is_empty());
            prop_assert_eq!(c.current_page(), last - 1);
        } else {
            prop_assert_eq!(c.current_page(), 1);
        }
    }
}
