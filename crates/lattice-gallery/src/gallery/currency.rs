//! Current-item synchronization.
//!
//! When enabled, the gallery keeps its selection in step with two cursors:
//! the cursor of the category view (the "immediate" view) and, if the host
//! supplied one, the cursor of a source view of items. Selecting pushes the
//! cursors, in order: category view, the category's own item cursor, then the
//! source view. Moving a cursor from outside selects the corresponding item.
//!
//! Cursor events caused by a push are ignored, as are events that arrive
//! while a selection commit is in progress.

use std::sync::atomic::{AtomicBool, Ordering};

use lattice_gallery_core::logging::targets;
use lattice_gallery_core::ConnectionGuard;
use parking_lot::Mutex;

use super::category::GalleryCategory;
use super::engine::GalleryInner;
use super::item::GalleryItem;
use super::latch::Latch;
use super::selection::SelectionOrigin;

enum Attachment {
    Detached,
    Attached { _links: Vec<ConnectionGuard> },
}

pub(crate) struct CurrencySynchronizer {
    enabled: AtomicBool,
    attachment: Mutex<Attachment>,
    latch: Latch,
}

impl CurrencySynchronizer {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            attachment: Mutex::new(Attachment::Detached),
            latch: Latch::new(),
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub(crate) fn is_attached(&self) -> bool {
        matches!(*self.attachment.lock(), Attachment::Attached { .. })
    }

    /// Enables or disables synchronization, attaching or detaching as needed.
    pub(crate) fn set_enabled(&self, g: &GalleryInner, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        self.refresh(g);
    }

    /// Brings the attachment in line with the enabled flag.
    pub(crate) fn refresh(&self, g: &GalleryInner) {
        if !self.is_enabled() {
            self.detach();
            return;
        }
        if !self.is_attached() {
            self.attach(g);
        }
    }

    /// Drops and re-creates the cursor subscriptions, e.g. after the source
    /// view was replaced.
    pub(crate) fn reattach(&self, g: &GalleryInner) {
        self.detach();
        self.refresh(g);
    }

    fn detach(&self) {
        let previous = std::mem::replace(&mut *self.attachment.lock(), Attachment::Detached);
        if matches!(previous, Attachment::Attached { .. }) {
            tracing::debug!(target: targets::CURRENCY, "detached from cursors");
        }
    }

    fn attach(&self, g: &GalleryInner) {
        let weak = g.weak();
        let mut links = vec![g.categories.on_current_changed(move |position| {
            if let Some(g) = weak.upgrade() {
                g.currency.on_immediate_moved(&g, *position);
            }
        })];

        let source = g.source();
        if let Some(source) = &source {
            let weak = g.weak();
            links.push(source.on_current_changed(move |position| {
                if let Some(g) = weak.upgrade() {
                    g.currency.on_source_moved(&g, *position);
                }
            }));
        }

        *self.attachment.lock() = Attachment::Attached { _links: links };
        tracing::debug!(target: targets::CURRENCY, has_source = source.is_some(), "attached to cursors");

        match g.selection.selected_item() {
            Some(item) => self.push(g, g.selection.selected_category().as_ref(), Some(&item)),
            None => self.pull(g),
        }
    }

    /// Moves the cursors onto the selection.
    ///
    /// With no selection, the category and source cursors are cleared.
    pub(crate) fn push(&self, g: &GalleryInner, category: Option<&GalleryCategory>, item: Option<&GalleryItem>) {
        if !self.is_attached() {
            return;
        }
        let _guard = self.latch.try_enter();
        let source = g.source();

        match (category, item) {
            (Some(category), Some(item)) => {
                tracing::trace!(target: targets::CURRENCY, ?item, "pushing selection to cursors");
                g.categories.move_current_to(category);
                category.items().move_current_to(item);
                if let Some(source) = source {
                    source.move_current_to(item);
                }
            }
            _ => {
                tracing::trace!(target: targets::CURRENCY, "clearing cursors");
                g.categories.move_current_to_position(None);
                if let Some(source) = source {
                    source.move_current_to_position(None);
                }
            }
        }
    }

    /// Selects from the cursors when attaching with no selection.
    fn pull(&self, g: &GalleryInner) {
        let from_source = g.source().and_then(|source| source.current_item());
        let candidate = from_source.or_else(|| {
            g.categories.current_item().and_then(|category| {
                category
                    .items()
                    .current_item()
                    .or_else(|| category.first_item())
            })
        });
        if let Some(item) = candidate {
            tracing::trace!(target: targets::CURRENCY, ?item, "pulling selection from cursors");
            g.selection
                .set_selected_item(g, Some(item), SelectionOrigin::Currency);
        }
    }

    fn ignoring(&self, g: &GalleryInner) -> bool {
        let ignore = self.latch.is_held() || g.selection.is_changing();
        if ignore {
            tracing::trace!(target: targets::CURRENCY, "cursor moved during commit, ignoring");
        }
        ignore
    }

    fn on_immediate_moved(&self, g: &GalleryInner, position: Option<usize>) {
        if self.ignoring(g) {
            return;
        }
        match position.and_then(|pos| g.categories.get(pos)) {
            None => {
                g.selection
                    .set_selected_item(g, None, SelectionOrigin::Currency);
            }
            Some(category) => match category.first_item() {
                Some(first) => {
                    g.selection
                        .set_selected_item(g, Some(first), SelectionOrigin::Currency);
                }
                None => {
                    tracing::trace!(target: targets::CURRENCY, header = ?category.header(), "current category is empty");
                }
            },
        }
    }

    fn on_source_moved(&self, g: &GalleryInner, position: Option<usize>) {
        if self.ignoring(g) {
            return;
        }
        let item = position.and_then(|pos| g.source().and_then(|source| source.get(pos)));
        g.selection
            .set_selected_item(g, item, SelectionOrigin::Currency);
    }
}

impl std::fmt::Debug for CurrencySynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencySynchronizer")
            .field("enabled", &self.is_enabled())
            .field("attached", &self.is_attached())
            .finish()
    }
}
