//! Selection coordination.
//!
//! The selection coordinator owns the selected item, its derived value and
//! the set of containers showing the selected state. Every change funnels
//! through one commit path:
//!
//! 1. Requests arriving while a commit is in progress are ignored.
//! 2. The item is looked up; if containers are still being generated the
//!    request is remembered and replayed once generation completes.
//! 3. State and container flags change, and the cursors are pushed, while
//!    the selection latch is held.
//! 4. `selection_changed` and `selected_value_changed` are emitted after the
//!    latch is released, so listeners may issue new requests.

use lattice_gallery_core::logging::targets;
use lattice_gallery_core::CommitSpan;
use parking_lot::Mutex;

use super::category::GalleryCategory;
use super::container::ItemContainer;
use super::engine::GalleryInner;
use super::item::{GalleryItem, ItemValue};
use super::latch::Latch;
use super::lookup::{LookupMode, LookupResult};

/// Where a selection request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectionOrigin {
    /// Programmatic request through the gallery API.
    Api,
    /// User input; may execute the gallery command.
    User,
    /// Selection by value.
    Value,
    /// A current-item cursor moved.
    Currency,
    /// The selected item left the gallery.
    Revalidation,
}

/// The primitive selection changes.
#[derive(Debug, Clone)]
pub(crate) enum SelectionChange {
    /// Make `item` the selection, hosted by `container` if realized.
    Select {
        item: GalleryItem,
        category: GalleryCategory,
        container: Option<ItemContainer>,
    },
    /// Clear the selection.
    DeselectItem,
    /// Drop one container from the selected set without changing the
    /// selected item.
    DeselectContainer(ItemContainer),
}

/// Old and new selection, reported after a commit.
#[derive(Debug, Clone)]
pub(crate) struct Transition {
    pub(crate) old_item: Option<GalleryItem>,
    pub(crate) new_item: Option<GalleryItem>,
    pub(crate) old_value: Option<ItemValue>,
    pub(crate) new_value: Option<ItemValue>,
}

#[derive(Debug, Default)]
struct SelectionState {
    item: Option<GalleryItem>,
    value: Option<ItemValue>,
    category: Option<GalleryCategory>,
    containers: Vec<ItemContainer>,
}

#[derive(Debug, Clone)]
struct PendingSelection {
    item: GalleryItem,
    origin: SelectionOrigin,
}

pub(crate) struct SelectionCoordinator {
    state: Mutex<SelectionState>,
    pending: Mutex<Option<PendingSelection>>,
    latch: Latch,
}

impl SelectionCoordinator {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(SelectionState::default()),
            pending: Mutex::new(None),
            latch: Latch::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub(crate) fn selected_item(&self) -> Option<GalleryItem> {
        self.state.lock().item.clone()
    }

    pub(crate) fn selected_value(&self) -> Option<ItemValue> {
        self.state.lock().value.clone()
    }

    pub(crate) fn selected_category(&self) -> Option<GalleryCategory> {
        self.state.lock().category.clone()
    }

    pub(crate) fn selected_containers(&self) -> Vec<ItemContainer> {
        self.state.lock().containers.clone()
    }

    pub(crate) fn pending_item(&self) -> Option<GalleryItem> {
        self.pending.lock().as_ref().map(|p| p.item.clone())
    }

    /// Returns `true` while a selection commit is in progress.
    pub(crate) fn is_changing(&self) -> bool {
        self.latch.is_held()
    }

    /// Returns the category and a selected container for `item`, if `item`
    /// is the selection and has a realized container.
    pub(crate) fn cached_location(&self, item: &GalleryItem) -> Option<(GalleryCategory, ItemContainer)> {
        let state = self.state.lock();
        if state.item.as_ref() != Some(item) {
            return None;
        }
        let category = state.category.clone()?;
        let container = state.containers.first()?.clone();
        Some((category, container))
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Requests `item` as the new selection (`None` deselects).
    ///
    /// Returns `true` if the selection changed.
    pub(crate) fn set_selected_item(
        &self,
        g: &GalleryInner,
        item: Option<GalleryItem>,
        origin: SelectionOrigin,
    ) -> bool {
        if self.latch.is_held() {
            tracing::trace!(target: targets::SELECTION, ?origin, "selection change in progress, ignoring request");
            return false;
        }
        // A newer request supersedes a deferred one, even when it is a no-op.
        self.pending.lock().take();
        if self.state.lock().item == item {
            return false;
        }

        let Some(item) = item else {
            return self.commit(g, SelectionChange::DeselectItem, origin);
        };

        match g.lookup().find(&item, LookupMode::RequireGenerated) {
            LookupResult::Located { category, container } => {
                self.commit(
                    g,
                    SelectionChange::Select {
                        item,
                        category,
                        container,
                    },
                    origin,
                )
            }
            LookupResult::Pending => {
                tracing::debug!(target: targets::SELECTION, ?item, ?origin, "containers pending, deferring selection");
                *self.pending.lock() = Some(PendingSelection { item, origin });
                false
            }
            LookupResult::NotFound => {
                tracing::debug!(target: targets::SELECTION, ?item, ?origin, "item is not in the gallery, selection rejected");
                false
            }
        }
    }

    /// Selects the first item whose resolved value equals `value`.
    pub(crate) fn set_selected_value(&self, g: &GalleryInner, value: Option<ItemValue>) -> bool {
        if self.latch.is_held() {
            tracing::trace!(target: targets::SELECTION, "selection change in progress, ignoring value request");
            return false;
        }
        let Some(value) = value else {
            return self.set_selected_item(g, None, SelectionOrigin::Value);
        };
        self.pending.lock().take();
        if self.state.lock().value.as_ref() == Some(&value) {
            return false;
        }

        let resolver = g.resolver();
        let found = g
            .categories
            .items()
            .into_iter()
            .flat_map(|category| category.items().items())
            .find(|item| resolver.matches(item, &value));

        match found {
            Some(item) => self.set_selected_item(g, Some(item), SelectionOrigin::Value),
            None => {
                tracing::debug!(target: targets::SELECTION, ?value, "no item has the requested value");
                false
            }
        }
    }

    /// Re-checks the selected item against the data model, deselecting it if
    /// it is gone.
    ///
    /// Returns `true` if the selection was cleared.
    pub(crate) fn force_revalidate(&self, g: &GalleryInner) -> bool {
        if self.latch.is_held() {
            return false;
        }
        let Some(item) = self.selected_item() else {
            return false;
        };

        match g.lookup().find_in_model(&item, LookupMode::IgnoreGenerationStatus) {
            LookupResult::Located { category, .. } => {
                self.state.lock().category = Some(category);
                false
            }
            LookupResult::Pending => false,
            LookupResult::NotFound => {
                tracing::debug!(target: targets::SELECTION, ?item, "selected item left the gallery");
                self.commit(g, SelectionChange::DeselectItem, SelectionOrigin::Revalidation)
            }
        }
    }

    /// Recomputes the selected value after the value path changed.
    pub(crate) fn refresh_value(&self, g: &GalleryInner) {
        let resolver = g.resolver();
        let (old, new) = {
            let mut state = self.state.lock();
            let new = state.item.as_ref().and_then(|item| resolver.resolve(item));
            let old = std::mem::replace(&mut state.value, new.clone());
            (old, new)
        };
        if old != new {
            g.signals.selected_value_changed.emit((old, new));
        }
    }

    /// Replays a request that was deferred while containers were pending.
    pub(crate) fn replay_pending(&self, g: &GalleryInner) -> bool {
        let Some(pending) = self.pending.lock().take() else {
            return false;
        };
        tracing::debug!(target: targets::SELECTION, item = ?pending.item, "replaying deferred selection");
        self.set_selected_item(g, Some(pending.item), pending.origin)
    }

    // =========================================================================
    // Commit
    // =========================================================================

    fn commit(&self, g: &GalleryInner, change: SelectionChange, origin: SelectionOrigin) -> bool {
        let Some(guard) = self.latch.try_enter() else {
            return false;
        };
        let transition = {
            let _span = CommitSpan::enter("selection");
            let transition = self.change_selection(g, change);
            if let Some(t) = &transition {
                g.currency
                    .push(g, self.selected_category().as_ref(), t.new_item.as_ref());
            }
            transition
        };
        drop(guard);

        let Some(t) = transition else {
            return false;
        };

        tracing::debug!(
            target: targets::SELECTION,
            old = ?t.old_item,
            new = ?t.new_item,
            ?origin,
            "selection changed"
        );
        g.signals
            .selection_changed
            .emit((t.old_item.clone(), t.new_item.clone()));
        if t.old_value != t.new_value {
            g.signals
                .selected_value_changed
                .emit((t.old_value.clone(), t.new_value.clone()));
        }

        if origin == SelectionOrigin::User {
            if let Some(item) = &t.new_item {
                g.execute_command(item);
            }
        }
        true
    }

    /// Applies a primitive change to the selection state and container flags.
    ///
    /// Returns the transition if the selected item changed. Container flags
    /// are updated after the state lock is released.
    pub(crate) fn change_selection(&self, g: &GalleryInner, change: SelectionChange) -> Option<Transition> {
        match change {
            SelectionChange::DeselectContainer(container) => {
                let removed = {
                    let mut state = self.state.lock();
                    let before = state.containers.len();
                    state.containers.retain(|c| c != &container);
                    before != state.containers.len()
                };
                if removed {
                    tracing::trace!(target: targets::SELECTION, container = container.id().as_u64(), "container unselected");
                    container.set_selected(false);
                }
                None
            }
            SelectionChange::DeselectItem => {
                let old = std::mem::take(&mut *self.state.lock());
                for container in &old.containers {
                    container.set_selected(false);
                }
                old.item.is_some().then_some(Transition {
                    old_item: old.item,
                    new_item: None,
                    old_value: old.value,
                    new_value: None,
                })
            }
            SelectionChange::Select {
                item,
                category,
                container,
            } => {
                let value = g.resolver().resolve(&item);
                let (old_item, old_value, old_containers) = {
                    let mut state = self.state.lock();
                    let old_containers =
                        std::mem::replace(&mut state.containers, container.iter().cloned().collect());
                    let old_item = state.item.replace(item.clone());
                    let old_value = std::mem::replace(&mut state.value, value.clone());
                    state.category = Some(category);
                    (old_item, old_value, old_containers)
                };

                for old in old_containers.iter().filter(|c| Some(*c) != container.as_ref()) {
                    old.set_selected(false);
                }
                if let Some(container) = &container {
                    container.set_selected(true);
                }

                (old_item.as_ref() != Some(&item)).then_some(Transition {
                    old_item,
                    new_item: Some(item),
                    old_value,
                    new_value: value,
                })
            }
        }
    }

    // =========================================================================
    // Container lifecycle
    // =========================================================================

    /// Adds a newly realized container for the selected item to the
    /// selected set.
    pub(crate) fn on_container_prepared(&self, container: &ItemContainer) {
        let adopt = {
            let mut state = self.state.lock();
            if state.item.as_ref() == Some(container.item()) && !state.containers.contains(container) {
                state.containers.push(container.clone());
                true
            } else {
                false
            }
        };
        if adopt {
            container.set_selected(true);
        }
    }

    /// Forgets a recycled container.
    pub(crate) fn on_container_cleared(&self, g: &GalleryInner, container: &ItemContainer) {
        self.change_selection(g, SelectionChange::DeselectContainer(container.clone()));
    }
}

impl std::fmt::Debug for SelectionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionCoordinator")
            .field("state", &*self.state.lock())
            .field("pending", &*self.pending.lock())
            .field("changing", &self.latch.is_held())
            .finish()
    }
}
