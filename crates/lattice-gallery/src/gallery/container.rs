//! Item containers and the provider that realizes them.
//!
//! An [`ItemContainer`] is the visual element that hosts one item. Containers
//! are created lazily by a [`ContainerProvider`] (the host's virtualizing
//! layout, for example), so for any given item a container may not exist yet.
//! The provider reports a [`GenerationStatus`] for the whole gallery and for
//! each category; while generation is pending, item-to-container lookups
//! cannot be answered and the gallery defers the work.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lattice_gallery_core::logging::targets;
use lattice_gallery_core::{Property, Signal};
use parking_lot::RwLock;

use super::category::GalleryCategory;
use super::item::GalleryItem;

/// Container generation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationStatus {
    /// Containers are still being generated; lookups must wait.
    Pending,
    /// Containers have been generated.
    #[default]
    Generated,
}

/// A unique identifier for an item container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Get the raw u64 value of this container ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

struct ContainerInner {
    id: ContainerId,
    item: GalleryItem,
    selected: Property<bool>,
    highlighted: Property<bool>,
    selection_changed: Signal<bool>,
    highlight_changed: Signal<bool>,
    bring_into_view_requested: Signal<()>,
}

/// The visual element hosting one gallery item.
///
/// The selection and highlight flags are driven by the gallery; the host
/// listens to the container's signals to update its visuals.
#[derive(Clone)]
pub struct ItemContainer {
    inner: Arc<ContainerInner>,
}

impl ItemContainer {
    /// Creates a container for `item`.
    pub fn new(item: GalleryItem) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                id: ContainerId(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed)),
                item,
                selected: Property::new(false),
                highlighted: Property::new(false),
                selection_changed: Signal::new(),
                highlight_changed: Signal::new(),
                bring_into_view_requested: Signal::new(),
            }),
        }
    }

    /// Returns the container's ID.
    pub fn id(&self) -> ContainerId {
        self.inner.id
    }

    /// Returns the hosted item.
    pub fn item(&self) -> &GalleryItem {
        &self.inner.item
    }

    /// Returns `true` if the container shows the selected state.
    pub fn is_selected(&self) -> bool {
        self.inner.selected.get()
    }

    /// Returns `true` if the container shows the highlighted state.
    pub fn is_highlighted(&self) -> bool {
        self.inner.highlighted.get()
    }

    pub(crate) fn set_selected(&self, selected: bool) {
        if self.inner.selected.set(selected) {
            self.inner.selection_changed.emit(selected);
        }
    }

    pub(crate) fn set_highlighted(&self, highlighted: bool) {
        if self.inner.highlighted.set(highlighted) {
            self.inner.highlight_changed.emit(highlighted);
        }
    }

    /// Asks the host to scroll this container into view.
    pub fn bring_into_view(&self) {
        self.inner.bring_into_view_requested.emit(());
    }

    /// Signal emitted when the container becomes selected or unselected.
    pub fn selection_changed(&self) -> &Signal<bool> {
        &self.inner.selection_changed
    }

    /// Signal emitted when the container gains or loses the highlight.
    pub fn highlight_changed(&self) -> &Signal<bool> {
        &self.inner.highlight_changed
    }

    /// Signal emitted by [`bring_into_view`](Self::bring_into_view).
    pub fn bring_into_view_requested(&self) -> &Signal<()> {
        &self.inner.bring_into_view_requested
    }
}

impl PartialEq for ItemContainer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ItemContainer {}

impl fmt::Debug for ItemContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemContainer")
            .field("id", &self.inner.id)
            .field("item", &self.inner.item)
            .field("selected", &self.is_selected())
            .field("highlighted", &self.is_highlighted())
            .finish()
    }
}

/// Notifications published by a [`ContainerProvider`].
pub struct ContainerSignals {
    /// Generation status changed. `None` means the gallery as a whole,
    /// `Some` a single category.
    pub status_changed: Signal<(Option<GalleryCategory>, GenerationStatus)>,
    /// A container was realized for an item.
    pub container_prepared: Signal<ItemContainer>,
    /// A container was recycled and no longer hosts its item.
    pub container_cleared: Signal<ItemContainer>,
}

impl ContainerSignals {
    /// Creates a fresh set of signals.
    pub fn new() -> Self {
        Self {
            status_changed: Signal::new(),
            container_prepared: Signal::new(),
            container_cleared: Signal::new(),
        }
    }
}

impl Default for ContainerSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContainerSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSignals").finish_non_exhaustive()
    }
}

/// Source of item containers.
///
/// The gallery consumes this interface; the host implements it on top of
/// whatever realizes visuals.
pub trait ContainerProvider: Send + Sync {
    /// Generation status for the gallery (`None`) or one category.
    fn generation_status(&self, category: Option<&GalleryCategory>) -> GenerationStatus;

    /// Returns the realized container hosting `item`, if any.
    fn container_for(&self, item: &GalleryItem) -> Option<ItemContainer>;

    /// Returns the position of `container` among realized containers.
    fn index_of(&self, container: &ItemContainer) -> Option<usize>;

    /// Returns the provider's notifications.
    fn signals(&self) -> &ContainerSignals;
}

/// An in-memory [`ContainerProvider`].
///
/// Containers are realized explicitly with [`realize`](Self::realize) and
/// recycled with [`clear`](Self::clear). Generation status is set by hand,
/// which makes this provider useful for headless hosts and tests.
///
/// # Example
///
/// ```
/// use lattice_gallery::gallery::{
///     ContainerProvider, GalleryItem, GenerationStatus, StaticContainerProvider,
/// };
///
/// let provider = StaticContainerProvider::new();
/// let item = GalleryItem::new("red");
/// let container = provider.realize(&item);
///
/// assert_eq!(provider.container_for(&item), Some(container));
/// assert_eq!(provider.generation_status(None), GenerationStatus::Generated);
/// ```
#[derive(Debug, Default)]
pub struct StaticContainerProvider {
    status: RwLock<GenerationStatus>,
    category_status: RwLock<Vec<(GalleryCategory, GenerationStatus)>>,
    containers: RwLock<Vec<ItemContainer>>,
    signals: ContainerSignals,
}

impl StaticContainerProvider {
    /// Creates a provider whose containers are already generated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider still generating its containers.
    pub fn pending() -> Self {
        let provider = Self::default();
        *provider.status.write() = GenerationStatus::Pending;
        provider
    }

    /// Sets the gallery-wide generation status.
    pub fn set_status(&self, status: GenerationStatus) {
        let changed = {
            let mut current = self.status.write();
            let changed = *current != status;
            *current = status;
            changed
        };
        if changed {
            tracing::debug!(target: targets::LOOKUP, ?status, "generation status changed");
            self.signals.status_changed.emit((None, status));
        }
    }

    /// Sets the generation status of one category.
    pub fn set_category_status(&self, category: &GalleryCategory, status: GenerationStatus) {
        let changed = {
            let mut entries = self.category_status.write();
            match entries.iter_mut().find(|(c, _)| c == category) {
                Some((_, current)) if *current == status => false,
                Some((_, current)) => {
                    *current = status;
                    true
                }
                None => {
                    entries.push((category.clone(), status));
                    status != *self.status.read()
                }
            }
        };
        if changed {
            self.signals
                .status_changed
                .emit((Some(category.clone()), status));
        }
    }

    /// Realizes a container for `item`, returning the existing one if any.
    pub fn realize(&self, item: &GalleryItem) -> ItemContainer {
        if let Some(existing) = self.container_for(item) {
            return existing;
        }
        let container = ItemContainer::new(item.clone());
        self.containers.write().push(container.clone());
        self.signals.container_prepared.emit(container.clone());
        container
    }

    /// Realizes containers for every item of every category.
    pub fn realize_all(&self, categories: &[GalleryCategory]) -> Vec<ItemContainer> {
        categories
            .iter()
            .flat_map(|c| c.items().items())
            .map(|item| self.realize(&item))
            .collect()
    }

    /// Recycles the container hosting `item`.
    ///
    /// Returns `true` if a container was cleared.
    pub fn clear(&self, item: &GalleryItem) -> bool {
        let removed = {
            let mut containers = self.containers.write();
            containers
                .iter()
                .position(|c| c.item() == item)
                .map(|pos| containers.remove(pos))
        };
        match removed {
            Some(container) => {
                self.signals.container_cleared.emit(container);
                true
            }
            None => false,
        }
    }

    /// Returns all realized containers.
    pub fn containers(&self) -> Vec<ItemContainer> {
        self.containers.read().clone()
    }
}

impl ContainerProvider for StaticContainerProvider {
    fn generation_status(&self, category: Option<&GalleryCategory>) -> GenerationStatus {
        let overall = *self.status.read();
        match category {
            None => overall,
            Some(category) => self
                .category_status
                .read()
                .iter()
                .find(|(c, _)| c == category)
                .map(|(_, status)| *status)
                .unwrap_or(overall),
        }
    }

    fn container_for(&self, item: &GalleryItem) -> Option<ItemContainer> {
        self.containers
            .read()
            .iter()
            .find(|c| c.item() == item)
            .cloned()
    }

    fn index_of(&self, container: &ItemContainer) -> Option<usize> {
        self.containers.read().iter().position(|c| c == container)
    }

    fn signals(&self) -> &ContainerSignals {
        &self.signals
    }
}

static_assertions::assert_impl_all!(ItemContainer: Send, Sync);
static_assertions::assert_impl_all!(StaticContainerProvider: Send, Sync);
