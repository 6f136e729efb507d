//! Category filtering.
//!
//! The filter list always starts with [`GalleryFilter::All`], followed by one
//! entry per category with a non-empty header, in category order. Whenever
//! the set of categories or a header changes the list is rebuilt and the
//! active filter falls back to `All`. Filtering only toggles category
//! visibility; it never changes the selection or highlight.

use std::iter;

use lattice_gallery_core::logging::targets;
use lattice_gallery_core::CommitSpan;
use parking_lot::Mutex;

use super::category::GalleryCategory;
use super::engine::GalleryInner;

/// An entry of the filter list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GalleryFilter {
    /// Show every category.
    All,
    /// Show a single category.
    Category(GalleryCategory),
}

impl GalleryFilter {
    /// Returns `true` if this filter shows `category`.
    pub fn matches(&self, category: &GalleryCategory) -> bool {
        match self {
            GalleryFilter::All => true,
            GalleryFilter::Category(c) => c == category,
        }
    }

    /// Returns the filtered category, if any.
    pub fn category(&self) -> Option<&GalleryCategory> {
        match self {
            GalleryFilter::All => None,
            GalleryFilter::Category(c) => Some(c),
        }
    }

    /// Returns the display label, using `all_label` for [`GalleryFilter::All`].
    pub fn label(&self, all_label: &str) -> String {
        match self {
            GalleryFilter::All => all_label.to_string(),
            GalleryFilter::Category(c) => c.filter_key().unwrap_or_default(),
        }
    }
}

#[derive(Debug)]
struct FilterState {
    active: GalleryFilter,
    filters: Vec<GalleryFilter>,
}

#[derive(Debug)]
pub(crate) struct FilterCoordinator {
    state: Mutex<FilterState>,
}

impl FilterCoordinator {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(FilterState {
                active: GalleryFilter::All,
                filters: vec![GalleryFilter::All],
            }),
        }
    }

    pub(crate) fn active_filter(&self) -> GalleryFilter {
        self.state.lock().active.clone()
    }

    pub(crate) fn filters(&self) -> Vec<GalleryFilter> {
        self.state.lock().filters.clone()
    }

    /// Rebuilds the filter list from the current categories, resets the
    /// active filter to `All` and reapplies visibility.
    pub(crate) fn rebuild(&self, g: &GalleryInner) {
        let filters: Vec<GalleryFilter> = iter::once(GalleryFilter::All)
            .chain(
                g.categories
                    .items()
                    .into_iter()
                    .filter(|c| c.filter_key().is_some())
                    .map(GalleryFilter::Category),
            )
            .collect();

        let old_active = {
            let mut state = self.state.lock();
            state.filters = filters.clone();
            std::mem::replace(&mut state.active, GalleryFilter::All)
        };

        tracing::debug!(target: targets::FILTER, count = filters.len(), "filter list rebuilt");
        g.signals.filters_changed.emit(filters);
        self.apply(g);
        if old_active != GalleryFilter::All {
            g.signals
                .filter_changed
                .emit((old_active, GalleryFilter::All));
        }
    }

    /// Makes each category visible if and only if the active filter shows it.
    pub(crate) fn apply(&self, g: &GalleryInner) {
        let active = self.active_filter();
        for category in g.categories.items() {
            category.set_visible(active.matches(&category));
        }
    }

    /// Activates `filter`.
    ///
    /// Returns `false` if `filter` is already active or is not in the list.
    pub(crate) fn set_filter(&self, g: &GalleryInner, filter: GalleryFilter) -> bool {
        let old = {
            let mut state = self.state.lock();
            if state.active == filter {
                return false;
            }
            if !state.filters.contains(&filter) {
                tracing::debug!(target: targets::FILTER, ?filter, "filter is not offered, ignoring");
                return false;
            }
            std::mem::replace(&mut state.active, filter.clone())
        };

        {
            let _span = CommitSpan::enter("filter");
            self.apply(g);
        }
        tracing::debug!(target: targets::FILTER, ?old, new = ?filter, "filter changed");
        g.signals.filter_changed.emit((old, filter));
        g.revalidate();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::test_util::{record, Fixture};

    #[test]
    fn test_filter_matches_and_labels() {
        let f = Fixture::new();
        let only_a = GalleryFilter::Category(f.a.clone());

        assert!(GalleryFilter::All.matches(&f.b));
        assert!(only_a.matches(&f.a));
        assert!(!only_a.matches(&f.b));
        assert_eq!(only_a.category(), Some(&f.a));
        assert_eq!(GalleryFilter::All.category(), None);
        assert_eq!(GalleryFilter::All.label("Everything"), "Everything");
        assert_eq!(only_a.label("Everything"), "A");
    }

    #[test]
    fn test_rebuild_skips_untitled_categories() {
        let f = Fixture::new();
        let g = f.inner();
        g.categories.push(GalleryCategory::untitled());

        g.filter.rebuild(g);
        assert_eq!(
            g.filter.filters(),
            vec![
                GalleryFilter::All,
                GalleryFilter::Category(f.a.clone()),
                GalleryFilter::Category(f.b.clone()),
            ]
        );
    }

    #[test]
    fn test_rebuild_resets_active_filter() {
        let f = Fixture::new();
        let g = f.inner();
        let changes = record(&g.signals.filter_changed);
        let only_a = GalleryFilter::Category(f.a.clone());

        assert!(g.filter.set_filter(g, only_a.clone()));
        assert!(!f.b.is_visible());

        g.filter.rebuild(g);
        assert_eq!(g.filter.active_filter(), GalleryFilter::All);
        assert!(f.a.is_visible());
        assert!(f.b.is_visible());
        assert_eq!(
            *changes.lock(),
            vec![
                (GalleryFilter::All, only_a.clone()),
                (only_a, GalleryFilter::All),
            ]
        );
    }

    #[test]
    fn test_rebuild_from_all_only_reports_list() {
        let f = Fixture::new();
        let g = f.inner();
        let changes = record(&g.signals.filter_changed);
        let lists = record(&g.signals.filters_changed);

        g.filter.rebuild(g);
        assert!(changes.lock().is_empty());
        assert_eq!(lists.lock().len(), 1);
    }

    #[test]
    fn test_set_filter_rejects_unoffered_and_repeats() {
        let f = Fixture::new();
        let g = f.inner();
        let stranger = GalleryCategory::new("Elsewhere");

        assert!(!g.filter.set_filter(g, GalleryFilter::Category(stranger)));
        assert!(!g.filter.set_filter(g, GalleryFilter::All));
        assert!(g.filter.set_filter(g, GalleryFilter::Category(f.b.clone())));
        assert!(!g.filter.set_filter(g, GalleryFilter::Category(f.b.clone())));
        assert!(!f.a.is_visible());
    }
}
