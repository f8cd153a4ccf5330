mod daily_report_filter;
mod machine_filter;
mod project_filter;
mod supervisor_filter;
mod vendor_filter;

pub use daily_report_filter::DailyReportFilter;
pub use machine_filter::MachineFilter;
pub use project_filter::ProjectFilter;
pub use supervisor_filter::SupervisorFilter;
pub use vendor_filter::VendorFilter;

use crate::domain::Entity;
use crate::store::EntityStore;

/// A client-side filter over one entity type.
///
/// Individual predicates are field equality, except name searches which are
/// case-insensitive substring matches. An empty-string field is an inactive
/// predicate; active predicates combine with AND, so combining is
/// order-independent.
pub trait RecordFilter<T> {
    fn matches(&self, record: &T) -> bool;

    /// Whether any predicate is active. An inactive filter matches everything.
    fn is_active(&self) -> bool;
}

/// Equality predicate; inactive (always true) when `filter` is empty.
pub(crate) fn field_matches(filter: &str, value: &str) -> bool {
    filter.is_empty() || filter == value
}

/// Substring predicate, case-insensitive; inactive when `needle` is empty.
pub(crate) fn name_matches(needle: &str, haystack: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Filter a slice, borrowing the matching records. Linear scan; fine at the
/// tens-to-hundreds scale these collections run at.
pub fn apply<'a, T, F: RecordFilter<T>>(items: &'a [T], filter: &F) -> Vec<&'a T> {
    items.iter().filter(|record| filter.matches(record)).collect()
}

/// A filtered read view over an [`EntityStore`], memoized on the pair of
/// (filter, store revision): the scan only reruns when either changes.
pub struct FilteredView<T, F> {
    filter: F,
    cache: Option<Cached<T, F>>,
}

struct Cached<T, F> {
    filter: F,
    revision: u64,
    items: Vec<T>,
}

impl<T, F> FilteredView<T, F>
where
    T: Entity,
    F: RecordFilter<T> + Clone + PartialEq,
{
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            cache: None,
        }
    }

    pub fn filter(&self) -> &F {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: F) {
        self.filter = filter;
    }

    /// Current filtered contents of `store`, recomputed only if the filter or
    /// the store's items changed since the last call.
    pub fn resolve(&mut self, store: &EntityStore<T>) -> &[T] {
        let revision = store.revision();
        let fresh = self
            .cache
            .as_ref()
            .is_some_and(|cached| cached.revision == revision && cached.filter == self.filter);

        if !fresh {
            let items = store
                .items()
                .into_iter()
                .filter(|record| self.filter.matches(record))
                .collect();
            self.cache = Some(Cached {
                filter: self.filter.clone(),
                revision,
                items,
            });
        }

        match &self.cache {
            Some(cached) => &cached.items,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Machine, MachineStatus, ProjectStatus};
    use crate::endpoint::MockEndpoint;
    use crate::seed;
    use crate::store::EntityStore;

    #[test]
    fn empty_filter_is_inactive_and_matches_everything() {
        let filter = MachineFilter::default();
        assert!(!filter.is_active());
        let machinery = seed::machinery();
        assert_eq!(apply(&machinery, &filter).len(), machinery.len());
    }

    #[test]
    fn predicates_combine_with_and() {
        let machinery = seed::machinery();

        let by_kind = MachineFilter {
            kind: "Crane".to_string(),
            ..Default::default()
        };
        let matches = apply(&machinery, &by_kind);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Crane C350");

        // adding a contradictory status predicate empties the result
        let by_kind_and_status = MachineFilter {
            kind: "Crane".to_string(),
            status: Some(MachineStatus::Working),
            ..Default::default()
        };
        assert!(apply(&machinery, &by_kind_and_status).is_empty());
    }

    #[test]
    fn filtering_in_stages_equals_filtering_at_once() {
        // {a} then {a,b} must equal {a,b} directly: the AND combinator is
        // order-independent.
        let machinery = seed::machinery();

        let a = MachineFilter {
            name: "c".to_string(),
            ..Default::default()
        };
        let ab = MachineFilter {
            name: "c".to_string(),
            status: Some(MachineStatus::Idle),
            ..Default::default()
        };

        let staged: Vec<&Machine> = apply(&machinery, &a)
            .into_iter()
            .filter(|m| ab.matches(m))
            .collect();
        let direct = apply(&machinery, &ab);
        assert_eq!(staged, direct);
    }

    #[test]
    fn name_search_is_case_insensitive_substring() {
        let machinery = seed::machinery();
        let filter = MachineFilter {
            name: "excavator".to_string(),
            ..Default::default()
        };
        let matches = apply(&machinery, &filter);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Excavator X200");
    }

    #[test]
    fn project_filter_matches_embedded_supervisor_names() {
        let projects = seed::projects();
        let filter = ProjectFilter {
            supervisor: "Fatima Khan".to_string(),
            ..Default::default()
        };
        let matches = apply(&projects, &filter);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].status, ProjectStatus::OnHold);
    }

    #[tokio::test]
    async fn filtered_view_recomputes_only_on_filter_or_items_change() {
        let store = EntityStore::new(
            Arc::new(MockEndpoint::with_remote(seed::machinery())),
            seed::machinery(),
        );
        store.load().await;

        let mut view = FilteredView::new(MachineFilter::default());
        assert_eq!(view.resolve(&store).len(), 2);
        let revision = store.revision();

        // unchanged filter and items: cache holds
        assert_eq!(view.resolve(&store).len(), 2);
        assert_eq!(store.revision(), revision);

        // narrowing the filter recomputes
        view.set_filter(MachineFilter {
            status: Some(MachineStatus::Idle),
            ..Default::default()
        });
        assert_eq!(view.resolve(&store).len(), 1);

        // mutating the store bumps the revision and refreshes the view
        store.remove(2).await.unwrap();
        assert!(view.resolve(&store).is_empty());
    }
}
