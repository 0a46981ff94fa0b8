//! The tabular collection controller.
//!
//! Owns one screen's collection and view state. Reads go through
//! [`derive_view`]; mutations validate, apply, and then re-clamp the current
//! page so it always points at a page that exists.

use loandesk_shared::{RecordId, SortOrder};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::collection::Collection;
use crate::config::{check_items_per_page, ControllerConfig};
use crate::error::{ConfigError, ControllerError, NotFoundError, Result, ValidationError};
use crate::fields::{FieldValue, Patch, RecordFields};
use crate::id::IdGenerator;
use crate::mock::Seed;
use crate::record::Record;
use crate::view::{
    clamp_page, derive_view, matches_query, normalize_query, total_pages, PageView, SortSpec,
    ViewState,
};

pub struct TabularCollectionController<T> {
    config: ControllerConfig,
    records: Collection<T>,
    view: ViewState,
    ids: IdGenerator,
    clock: Box<dyn Clock>,
}

impl<T: RecordFields> TabularCollectionController<T> {
    /// An empty controller.
    pub fn new(config: ControllerConfig) -> Self {
        let view = ViewState::new(config.items_per_page());
        let ids = IdGenerator::new(config.namespace(), config.id_strategy());
        Self {
            config,
            records: Collection::new(),
            view,
            ids,
            clock: Box::new(SystemClock),
        }
    }

    /// A controller over existing records. Fails if two records share an id.
    pub fn with_records(
        config: ControllerConfig,
        records: Vec<Record<T>>,
    ) -> std::result::Result<Self, ValidationError> {
        let mut controller = Self::new(config);
        for record in &records {
            controller.ids.observe(&record.id);
        }
        controller.records = Collection::from_records(records)?;
        Ok(controller)
    }

    /// Seed the collection once from a data source.
    pub fn mount(
        config: ControllerConfig,
        source: &impl Seed<T>,
    ) -> std::result::Result<Self, ValidationError> {
        let records = source.seed(config.namespace());
        let controller = Self::with_records(config, records)?;
        info!(
            namespace = controller.config.namespace(),
            records = controller.records.len(),
            "Collection mounted"
        );
        Ok(controller)
    }

    /// Replace the time source used for `createdAt`/`updatedAt`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// The current page and its pagination metadata.
    pub fn view(&self) -> PageView<'_, T> {
        derive_view(
            self.records.as_slice(),
            self.config.search_fields(),
            &self.view,
        )
    }

    pub fn page_slice(&self) -> Vec<&Record<T>> {
        self.view().items
    }

    pub fn current_page(&self) -> usize {
        self.view.current_page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count(), self.view.items_per_page)
    }

    /// Number of records matching the search query.
    pub fn total_count(&self) -> usize {
        let query = normalize_query(&self.view.search_query);
        self.records
            .iter()
            .filter(|r| matches_query(r, self.config.search_fields(), &query))
            .count()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record<T>> {
        self.records.get(id)
    }

    /// The whole collection in insertion order, ignoring search and sort.
    pub fn records(&self) -> &[Record<T>] {
        self.records.as_slice()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------

    /// Replace the search query. Going back to page 1 whenever the query
    /// changes keeps the view from landing on a page past the new end.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if normalize_query(&query) != normalize_query(&self.view.search_query) {
            self.view.current_page = 1;
        }
        debug!(namespace = self.config.namespace(), query = %query, "Search query set");
        self.view.search_query = query;
    }

    /// Sort by `key`. The current page is kept.
    pub fn set_sort(&mut self, key: impl Into<String>, order: SortOrder) {
        let spec = SortSpec::new(key, order);
        debug!(
            namespace = self.config.namespace(),
            key = %spec.key,
            order = %spec.order,
            "Sort set"
        );
        self.view.sort = Some(spec);
    }

    /// Column-header behaviour: first click sorts ascending, clicking the
    /// same column again flips the direction.
    pub fn toggle_sort(&mut self, key: impl Into<String>) {
        let key = key.into();
        let order = match &self.view.sort {
            Some(spec) if spec.key == key => spec.order.flipped(),
            _ => SortOrder::Asc,
        };
        self.set_sort(key, order);
    }

    pub fn clear_sort(&mut self) {
        self.view.sort = None;
    }

    /// Move to `page`, clamped into `[1, total_pages]`. Returns the page landed on.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.view.current_page = clamp_page(page, self.total_pages());
        self.view.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.view.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.set_page(self.view.current_page.saturating_sub(1))
    }

    /// Change the page size and go back to page 1.
    pub fn set_items_per_page(&mut self, n: usize) -> std::result::Result<(), ConfigError> {
        check_items_per_page(n)?;
        self.view.items_per_page = n;
        self.view.current_page = 1;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Validate and append a new record. The current page does not move.
    pub fn create(&mut self, fields: T) -> Result<Record<T>> {
        if let Err(e) = self.validate(&fields, None) {
            warn!(namespace = self.config.namespace(), error = %e, "Create rejected");
            return Err(e.into());
        }

        let records = &self.records;
        let id = self.ids.next_id(|candidate| records.contains(candidate));
        let record = Record::new(id, fields, self.clock.now());
        self.records.push(record.clone())?;
        self.clamp_current_page();

        info!(namespace = self.config.namespace(), id = %record.id, "Record created");
        Ok(record)
    }

    /// Merge `patch` into an existing record and re-validate it.
    pub fn update(&mut self, id: &RecordId, patch: &Patch) -> Result<Record<T>> {
        let existing = self
            .records
            .get(id)
            .ok_or_else(|| NotFoundError { id: id.clone() })?;

        let candidate = patch.apply_to(&existing.fields).and_then(|fields| {
            self.validate(&fields, Some(id))?;
            Ok(fields)
        });
        let fields = match candidate {
            Ok(fields) => fields,
            Err(e) => {
                warn!(namespace = self.config.namespace(), id = %id, error = %e, "Update rejected");
                return Err(e.into());
            }
        };

        let now = self.clock.now();
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| NotFoundError { id: id.clone() })?;
        record.fields = fields;
        record.updated_at = now;
        let updated = record.clone();
        self.clamp_current_page();

        info!(
            namespace = self.config.namespace(),
            id = %id,
            fields = patch.len(),
            "Record updated"
        );
        Ok(updated)
    }

    /// Remove a record. If the current page no longer exists afterwards the
    /// view moves back to the new last page.
    pub fn delete(&mut self, id: &RecordId) -> Result<Record<T>> {
        let removed = self.records.remove(id).ok_or_else(|| {
            warn!(namespace = self.config.namespace(), id = %id, "Delete of unknown record");
            ControllerError::from(NotFoundError { id: id.clone() })
        })?;
        self.clamp_current_page();

        info!(
            namespace = self.config.namespace(),
            id = %id,
            page = self.view.current_page,
            "Record deleted"
        );
        Ok(removed)
    }

    /// Flip a boolean field such as `isActive`.
    pub fn toggle_field(&mut self, id: &RecordId, field: &str) -> Result<Record<T>> {
        let record = self
            .records
            .get(id)
            .ok_or_else(|| NotFoundError { id: id.clone() })?;
        let current = match record.fields.field(field) {
            Some(FieldValue::Flag(b)) => b,
            Some(_) => return Err(ValidationError::invalid(field, "not a boolean field").into()),
            None => return Err(ValidationError::invalid(field, "unknown field").into()),
        };
        self.update(id, &Patch::new().set(field, !current))
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Required fields, then unique fields (ignoring `exclude`), then the
    /// shape's own checks.
    fn validate(&self, candidate: &T, exclude: Option<&RecordId>) -> std::result::Result<(), ValidationError> {
        for field in self.config.required_fields() {
            match candidate.field(field) {
                Some(value) if !value.is_blank() => {}
                _ => return Err(ValidationError::missing(field.as_str())),
            }
        }

        for field in self.config.unique_fields() {
            let Some(value) = candidate.field(field) else {
                continue;
            };
            if value.is_blank() {
                continue;
            }
            let key = value.unique_key();
            let clash = self
                .records
                .iter()
                .filter(|r| Some(&r.id) != exclude)
                .any(|r| r.fields.field(field).map(|v| v.unique_key()) == Some(key.clone()));
            if clash {
                return Err(ValidationError::Duplicate {
                    field: field.clone(),
                    value: value.display(),
                });
            }
        }

        candidate.validate()
    }

    fn clamp_current_page(&mut self) {
        let total = self.total_pages();
        if self.view.current_page > total {
            debug!(
                namespace = self.config.namespace(),
                from = self.view.current_page,
                to = total,
                "Current page clamped"
            );
        }
        self.view.current_page = clamp_page(self.view.current_page, total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::{Branch, Caste};
    use chrono::{Duration, Utc};

    fn caste_config(per_page: usize) -> ControllerConfig {
        ControllerConfig::builder("caste")
            .search_fields(["name", "description"])
            .unique_field("name")
            .items_per_page(per_page)
            .build()
            .unwrap()
    }

    fn caste(name: &str) -> Caste {
        Caste {
            name: name.into(),
            is_active: true,
            ..Caste::default()
        }
    }

    fn names(c: &TabularCollectionController<Caste>) -> Vec<String> {
        c.page_slice().iter().map(|r| r.fields.name.clone()).collect()
    }

    #[test]
    fn test_create_assigns_ids_and_timestamps() {
        let clock = ManualClock::new(Utc::now());
        let mut c = TabularCollectionController::new(caste_config(5)).with_clock(clock.clone());
        let a = c.create(caste("Mali")).unwrap();
        clock.advance(Duration::seconds(1));
        let b = c.create(caste("Kunbi")).unwrap();

        assert_eq!(a.id.as_str(), "caste-0001");
        assert_eq!(b.id.as_str(), "caste-0002");
        assert_eq!(a.created_at, a.updated_at);
        assert!(b.created_at > a.created_at);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_create_rejects_missing_required() {
        let mut c = TabularCollectionController::new(caste_config(5));
        let err = c.create(caste("   ")).unwrap_err();
        assert_eq!(err, ControllerError::Validation(ValidationError::missing("name")));
        assert!(c.is_empty());
    }

    #[test]
    fn test_duplicate_name_case_insensitive() {
        let mut c = TabularCollectionController::new(caste_config(5));
        c.create(caste("Pune")).unwrap();
        let err = c.create(caste("pune")).unwrap_err();
        assert!(matches!(
            err,
            ControllerError::Validation(ValidationError::Duplicate { ref field, .. }) if field == "name"
        ));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_update_excludes_self_from_uniqueness() {
        let clock = ManualClock::new(Utc::now());
        let mut c = TabularCollectionController::new(caste_config(5)).with_clock(clock.clone());
        let rec = c.create(caste("Mali")).unwrap();
        c.create(caste("Kunbi")).unwrap();

        clock.advance(Duration::minutes(1));
        let updated = c
            .update(&rec.id, &Patch::new().set("name", "MALI").set("description", "OBC"))
            .unwrap();
        assert_eq!(updated.fields.name, "MALI");
        assert_eq!(updated.created_at, rec.created_at);
        assert!(updated.updated_at > rec.updated_at);

        let err = c.update(&rec.id, &Patch::new().set("name", "kunbi")).unwrap_err();
        assert!(matches!(err, ControllerError::Validation(ValidationError::Duplicate { .. })));
        assert_eq!(c.get(&rec.id).unwrap().fields.name, "MALI");
    }

    #[test]
    fn test_update_missing_id() {
        let mut c = TabularCollectionController::<Caste>::new(caste_config(5));
        let err = c
            .update(&RecordId::from("missing-id"), &Patch::new().set("name", "X"))
            .unwrap_err();
        assert_eq!(
            err,
            ControllerError::NotFound(NotFoundError {
                id: RecordId::from("missing-id")
            })
        );
    }

    #[test]
    fn test_delete_missing_id() {
        let mut c = TabularCollectionController::<Caste>::new(caste_config(5));
        assert!(matches!(
            c.delete(&RecordId::from("caste-0042")),
            Err(ControllerError::NotFound(_))
        ));
    }

    #[test]
    fn test_search_resets_page_only_on_change() {
        let mut c = TabularCollectionController::new(caste_config(2));
        for name in ["Mali", "Kunbi", "Mahar", "Matang", "Bhil"] {
            c.create(caste(name)).unwrap();
        }
        assert_eq!(c.set_page(3), 3);

        c.set_search_query("");
        assert_eq!(c.current_page(), 3);

        c.set_search_query("ma");
        assert_eq!(c.current_page(), 1);
        assert_eq!(c.total_count(), 3);
        assert_eq!(names(&c), vec!["Mali", "Mahar"]);

        c.set_page(2);
        c.set_search_query(" MA ");
        assert_eq!(c.current_page(), 2);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut c = TabularCollectionController::new(caste_config(2));
        for name in ["d", "c", "b", "a"] {
            c.create(caste(name)).unwrap();
        }
        c.set_page(2);
        c.set_sort("name", SortOrder::Asc);
        assert_eq!(c.current_page(), 2);
        assert_eq!(names(&c), vec!["c", "d"]);

        c.toggle_sort("name");
        assert_eq!(c.view_state().sort.as_ref().unwrap().order, SortOrder::Desc);
        assert_eq!(names(&c), vec!["b", "a"]);

        c.clear_sort();
        assert_eq!(names(&c), vec!["b", "a"]);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut c = TabularCollectionController::new(caste_config(5));
        assert_eq!(c.set_page(0), 1);
        assert_eq!(c.set_page(10), 1);
        for i in 0..6 {
            c.create(caste(&format!("C{i}"))).unwrap();
        }
        assert_eq!(c.set_page(10), 2);
        assert_eq!(c.next_page(), 2);
        assert_eq!(c.previous_page(), 1);
        assert_eq!(c.previous_page(), 1);
    }

    #[test]
    fn test_items_per_page_resets_page() {
        let mut c = TabularCollectionController::new(caste_config(2));
        for i in 0..5 {
            c.create(caste(&format!("C{i}"))).unwrap();
        }
        c.set_page(3);
        c.set_items_per_page(4).unwrap();
        assert_eq!(c.current_page(), 1);
        assert_eq!(c.total_pages(), 2);
        assert_eq!(c.set_items_per_page(0), Err(ConfigError::ZeroItemsPerPage));
        assert_eq!(c.view_state().items_per_page, 4);
    }

    #[test]
    fn test_toggle_field() {
        let mut c = TabularCollectionController::new(caste_config(5));
        let rec = c.create(caste("Bhil")).unwrap();
        assert!(rec.fields.is_active);
        let toggled = c.toggle_field(&rec.id, "isActive").unwrap();
        assert!(!toggled.fields.is_active);
        let toggled = c.toggle_field(&rec.id, "isActive").unwrap();
        assert!(toggled.fields.is_active);

        let err = c.toggle_field(&rec.id, "name").unwrap_err();
        assert!(matches!(err, ControllerError::Validation(ValidationError::InvalidField { .. })));
    }

    #[test]
    fn test_update_that_filters_out_clamps_page() {
        let mut c = TabularCollectionController::new(caste_config(1));
        let a = c.create(caste("Mali")).unwrap();
        c.create(caste("Mahar")).unwrap();
        c.set_search_query("ma");
        c.set_page(2);
        c.update(&a.id, &Patch::new().set("name", "Bhil")).unwrap();
        assert_eq!(c.total_count(), 1);
        assert_eq!(c.current_page(), 1);
        assert_eq!(names(&c), vec!["Mahar"]);
    }

    #[test]
    fn test_mount_continues_seed_ids() {
        let config = ControllerConfig::builder("branch")
            .search_field("name")
            .unique_field("code")
            .build()
            .unwrap();
        let mut c: TabularCollectionController<Branch> =
            TabularCollectionController::mount(config, &crate::mock::MockDataService::new()).unwrap();
        let seeded = c.len();
        let rec = c
            .create(Branch {
                name: "Hadapsar".into(),
                code: "PN040".into(),
                ..Branch::default()
            })
            .unwrap();
        assert_eq!(rec.id.as_str(), format!("branch-{:04}", seeded + 1));
    }
}
