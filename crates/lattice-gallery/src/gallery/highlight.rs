//! Highlight coordination.
//!
//! The highlighted item is the one under the pointer or keyboard focus. It
//! follows the same latch, lookup and deferral rules as the selection, but
//! tracks a single container. When a command is bound, highlighting an item
//! schedules a preview at idle priority; a newer highlight cancels a preview
//! that has not run yet, and clearing the highlight cancels the preview
//! immediately.

use lattice_gallery_core::logging::targets;
use lattice_gallery_core::{CommitSpan, DispatchPriority, TaskId};
use parking_lot::Mutex;

use super::category::GalleryCategory;
use super::container::ItemContainer;
use super::engine::GalleryInner;
use super::item::GalleryItem;
use super::latch::Latch;
use super::lookup::{LookupMode, LookupResult};

#[derive(Debug, Default)]
struct HighlightState {
    item: Option<GalleryItem>,
    category: Option<GalleryCategory>,
    container: Option<ItemContainer>,
}

pub(crate) struct HighlightCoordinator {
    state: Mutex<HighlightState>,
    pending: Mutex<Option<GalleryItem>>,
    preview_task: Mutex<Option<TaskId>>,
    latch: Latch,
}

impl HighlightCoordinator {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(HighlightState::default()),
            pending: Mutex::new(None),
            preview_task: Mutex::new(None),
            latch: Latch::new(),
        }
    }

    pub(crate) fn highlighted_item(&self) -> Option<GalleryItem> {
        self.state.lock().item.clone()
    }

    pub(crate) fn highlighted_container(&self) -> Option<ItemContainer> {
        self.state.lock().container.clone()
    }

    pub(crate) fn pending_item(&self) -> Option<GalleryItem> {
        self.pending.lock().clone()
    }

    pub(crate) fn cached_location(&self, item: &GalleryItem) -> Option<(GalleryCategory, ItemContainer)> {
        let state = self.state.lock();
        if state.item.as_ref() != Some(item) {
            return None;
        }
        Some((state.category.clone()?, state.container.clone()?))
    }

    /// Requests `item` as the highlighted item (`None` clears it).
    ///
    /// Returns `true` if the highlight changed.
    pub(crate) fn set_highlighted_item(&self, g: &GalleryInner, item: Option<GalleryItem>) -> bool {
        if self.latch.is_held() {
            tracing::trace!(target: targets::HIGHLIGHT, "highlight change in progress, ignoring request");
            return false;
        }
        self.pending.lock().take();
        if self.state.lock().item == item {
            return false;
        }

        let Some(item) = item else {
            return self.commit(g, None, None, None);
        };

        match g.lookup().find(&item, LookupMode::RequireGenerated) {
            LookupResult::Located { category, container } => {
                self.commit(g, Some(item), Some(category), container)
            }
            LookupResult::Pending => {
                tracing::debug!(target: targets::HIGHLIGHT, ?item, "containers pending, deferring highlight");
                *self.pending.lock() = Some(item);
                false
            }
            LookupResult::NotFound => {
                tracing::debug!(target: targets::HIGHLIGHT, ?item, "item is not in the gallery, highlight rejected");
                false
            }
        }
    }

    /// Clears the highlight if the highlighted item left the gallery.
    pub(crate) fn force_revalidate(&self, g: &GalleryInner) -> bool {
        if self.latch.is_held() {
            return false;
        }
        let Some(item) = self.highlighted_item() else {
            return false;
        };
        match g.lookup().find_in_model(&item, LookupMode::IgnoreGenerationStatus) {
            LookupResult::Located { category, .. } => {
                self.state.lock().category = Some(category);
                false
            }
            LookupResult::Pending => false,
            LookupResult::NotFound => {
                tracing::debug!(target: targets::HIGHLIGHT, ?item, "highlighted item left the gallery");
                self.commit(g, None, None, None)
            }
        }
    }

    pub(crate) fn replay_pending(&self, g: &GalleryInner) -> bool {
        let Some(item) = self.pending.lock().take() else {
            return false;
        };
        tracing::debug!(target: targets::HIGHLIGHT, ?item, "replaying deferred highlight");
        self.set_highlighted_item(g, Some(item))
    }

    fn commit(
        &self,
        g: &GalleryInner,
        item: Option<GalleryItem>,
        category: Option<GalleryCategory>,
        container: Option<ItemContainer>,
    ) -> bool {
        let Some(guard) = self.latch.try_enter() else {
            return false;
        };
        let old_item = {
            let _span = CommitSpan::enter("highlight");
            let (old_item, old_container) = {
                let mut state = self.state.lock();
                let old_container = std::mem::replace(&mut state.container, container.clone());
                let old_item = std::mem::replace(&mut state.item, item.clone());
                state.category = category;
                (old_item, old_container)
            };
            if let Some(old) = old_container.filter(|c| Some(c) != container.as_ref()) {
                old.set_highlighted(false);
            }
            if let Some(container) = &container {
                container.set_highlighted(true);
            }
            old_item
        };
        drop(guard);

        tracing::debug!(target: targets::HIGHLIGHT, old = ?old_item, new = ?item, "highlight changed");
        g.signals.highlight_changed.emit((old_item, item.clone()));
        self.schedule_preview(g, item);
        true
    }

    fn schedule_preview(&self, g: &GalleryInner, item: Option<GalleryItem>) {
        if let Some(stale) = self.preview_task.lock().take() {
            g.dispatcher().cancel(stale);
        }
        if !g.config().preview_on_highlight {
            return;
        }
        let Some(command) = g.command() else {
            return;
        };

        match item {
            Some(item) => {
                let weak = g.weak();
                let id = g.dispatcher().post(DispatchPriority::Idle, move || {
                    if let Some(g) = weak.upgrade() {
                        g.highlight.run_preview(&g, &item);
                    }
                });
                *self.preview_task.lock() = Some(id);
            }
            None => {
                tracing::trace!(target: targets::HIGHLIGHT, "cancelling preview");
                command.cancel_preview();
            }
        }
    }

    fn run_preview(&self, g: &GalleryInner, item: &GalleryItem) {
        self.preview_task.lock().take();
        if self.state.lock().item.as_ref() != Some(item) {
            tracing::trace!(target: targets::HIGHLIGHT, ?item, "stale preview skipped");
            return;
        }
        let Some(command) = g.command() else {
            return;
        };
        let parameter = item.command_parameter();
        if command.can_execute(&parameter) {
            tracing::trace!(target: targets::HIGHLIGHT, ?item, "previewing");
            command.preview(&parameter);
        }
    }

    pub(crate) fn on_container_prepared(&self, container: &ItemContainer) {
        let adopt = {
            let mut state = self.state.lock();
            if state.item.as_ref() == Some(container.item()) && state.container.is_none() {
                state.container = Some(container.clone());
                true
            } else {
                false
            }
        };
        if adopt {
            container.set_highlighted(true);
        }
    }

    pub(crate) fn on_container_cleared(&self, container: &ItemContainer) {
        let cleared = {
            let mut state = self.state.lock();
            if state.container.as_ref() == Some(container) {
                state.container = None;
                true
            } else {
                false
            }
        };
        if cleared {
            container.set_highlighted(false);
        }
    }
}

impl std::fmt::Debug for HighlightCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightCoordinator")
            .field("state", &*self.state.lock())
            .field("pending", &*self.pending.lock())
            .field("preview_task", &*self.preview_task.lock())
            .finish()
    }
}
