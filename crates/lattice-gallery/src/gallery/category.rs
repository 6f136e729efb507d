//! Gallery categories.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

use lattice_gallery_core::{ConnectionGuard, Property, Signal};

use super::item::GalleryItem;
use super::view::CollectionView;

struct CategoryInner {
    header: Property<Option<String>>,
    items: Arc<CollectionView<GalleryItem>>,
    visible: Property<bool>,
    header_changed: Signal<Option<String>>,
    visibility_changed: Signal<bool>,
}

/// A titled group of gallery items.
///
/// A category owns a [`CollectionView`] of its items; that view's cursor is
/// the category's "sub-cursor" which currency synchronization keeps on the
/// selected item. Like items, categories compare by identity.
#[derive(Clone)]
pub struct GalleryCategory {
    inner: Arc<CategoryInner>,
}

impl GalleryCategory {
    /// Creates an empty category with a header.
    pub fn new(header: impl Into<String>) -> Self {
        Self::build(Some(header.into()), Vec::new())
    }

    /// Creates an empty category without a header.
    ///
    /// Untitled categories never get an entry in the filter list.
    pub fn untitled() -> Self {
        Self::build(None, Vec::new())
    }

    /// Creates a category with a header and initial items.
    pub fn with_items(header: impl Into<String>, items: Vec<GalleryItem>) -> Self {
        Self::build(Some(header.into()), items)
    }

    fn build(header: Option<String>, items: Vec<GalleryItem>) -> Self {
        Self {
            inner: Arc::new(CategoryInner {
                header: Property::new(header),
                items: Arc::new(CollectionView::with_items(items)),
                visible: Property::new(true),
                header_changed: Signal::new(),
                visibility_changed: Signal::new(),
            }),
        }
    }

    /// Returns the header.
    pub fn header(&self) -> Option<String> {
        self.inner.header.get()
    }

    /// Sets the header, emitting `header_changed` if it changed.
    pub fn set_header(&self, header: Option<String>) {
        if self.inner.header.set(header.clone()) {
            self.inner.header_changed.emit(header);
        }
    }

    /// Returns the key the filter list uses for this category.
    ///
    /// `None` for untitled categories and categories with an empty header.
    pub fn filter_key(&self) -> Option<String> {
        self.inner.header.with(|h| h.as_ref().filter(|s| !s.is_empty()).cloned())
    }

    /// Returns the category's items.
    pub fn items(&self) -> &Arc<CollectionView<GalleryItem>> {
        &self.inner.items
    }

    /// Returns `true` if the category contains `item`.
    pub fn contains(&self, item: &GalleryItem) -> bool {
        self.inner.items.contains(item)
    }

    /// Returns the category's first item.
    pub fn first_item(&self) -> Option<GalleryItem> {
        self.inner.items.get(0)
    }

    /// Returns `true` if the active filter shows this category.
    pub fn is_visible(&self) -> bool {
        self.inner.visible.get()
    }

    /// Sets visibility, emitting `visibility_changed` if it changed.
    pub fn set_visible(&self, visible: bool) {
        if self.inner.visible.set(visible) {
            self.inner.visibility_changed.emit(visible);
        }
    }

    /// Signal emitted when the header changes.
    pub fn header_changed(&self) -> &Signal<Option<String>> {
        &self.inner.header_changed
    }

    /// Signal emitted when visibility changes.
    pub fn visibility_changed(&self) -> &Signal<bool> {
        &self.inner.visibility_changed
    }

    /// Connects to `header_changed`, disconnecting when the guard drops.
    pub fn on_header_changed<F>(&self, slot: F) -> ConnectionGuard
    where
        F: Fn(&Option<String>) + Send + Sync + 'static,
    {
        let id = self.inner.header_changed.connect(slot);
        let weak: Weak<CategoryInner> = Arc::downgrade(&self.inner);
        ConnectionGuard::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.header_changed.disconnect(id);
            }
        })
    }

    /// Returns `true` if both handles refer to the same category.
    pub fn ptr_eq(&self, other: &GalleryCategory) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for GalleryCategory {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for GalleryCategory {}

impl Hash for GalleryCategory {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.inner), state);
    }
}

impl fmt::Debug for GalleryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryCategory")
            .field("header", &self.header())
            .field("items", &self.inner.items.len())
            .field("visible", &self.is_visible())
            .finish()
    }
}
