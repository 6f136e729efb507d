//! The gallery facade.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use lattice_gallery_core::logging::targets;
use lattice_gallery_core::{ConnectionGuard, DispatchPriority, Dispatcher, Signal};
use parking_lot::{Mutex, RwLock};

use super::category::GalleryCategory;
use super::command::GalleryCommand;
use super::config::GalleryConfig;
use super::container::{ContainerProvider, GenerationStatus, ItemContainer};
use super::currency::CurrencySynchronizer;
use super::error::{GalleryError, GalleryResult};
use super::filter::{FilterCoordinator, GalleryFilter};
use super::highlight::HighlightCoordinator;
use super::item::{GalleryItem, ItemValue};
use super::lookup::{ContainerLookup, LookupMode, LookupResult};
use super::selection::{SelectionChange, SelectionCoordinator, SelectionOrigin};
use super::value::ValueResolver;
use super::view::{CollectionChange, CollectionView};

/// Notifications published by a [`Gallery`].
///
/// Pair signals carry `(old, new)`.
pub struct GallerySignals {
    /// The selected item changed.
    pub selection_changed: Signal<(Option<GalleryItem>, Option<GalleryItem>)>,
    /// The selected value changed.
    pub selected_value_changed: Signal<(Option<ItemValue>, Option<ItemValue>)>,
    /// The highlighted item changed.
    pub highlight_changed: Signal<(Option<GalleryItem>, Option<GalleryItem>)>,
    /// The active filter changed.
    pub filter_changed: Signal<(GalleryFilter, GalleryFilter)>,
    /// The filter list was rebuilt.
    pub filters_changed: Signal<Vec<GalleryFilter>>,
}

impl GallerySignals {
    fn new() -> Self {
        Self {
            selection_changed: Signal::new(),
            selected_value_changed: Signal::new(),
            highlight_changed: Signal::new(),
            filter_changed: Signal::new(),
            filters_changed: Signal::new(),
        }
    }
}

impl std::fmt::Debug for GallerySignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GallerySignals")
            .field("selection_changed", &self.selection_changed)
            .field("highlight_changed", &self.highlight_changed)
            .field("filter_changed", &self.filter_changed)
            .finish_non_exhaustive()
    }
}

/// A request accepted by [`Gallery::select`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionRequest {
    /// Select this item.
    Item(GalleryItem),
    /// Select the first item resolving to this value.
    Value(ItemValue),
    /// Clear the selection.
    Clear,
}

impl From<GalleryItem> for SelectionRequest {
    fn from(item: GalleryItem) -> Self {
        SelectionRequest::Item(item)
    }
}

impl From<&GalleryItem> for SelectionRequest {
    fn from(item: &GalleryItem) -> Self {
        SelectionRequest::Item(item.clone())
    }
}

impl From<Option<GalleryItem>> for SelectionRequest {
    fn from(item: Option<GalleryItem>) -> Self {
        item.map_or(SelectionRequest::Clear, SelectionRequest::Item)
    }
}

impl From<ItemValue> for SelectionRequest {
    fn from(value: ItemValue) -> Self {
        SelectionRequest::Value(value)
    }
}

/// Subscriptions to the category view and each category.
#[derive(Default)]
struct ModelLinks {
    categories: Option<ConnectionGuard>,
    per_category: Vec<(GalleryCategory, [ConnectionGuard; 2])>,
}

pub(crate) struct GalleryInner {
    weak_self: Weak<GalleryInner>,
    pub(crate) categories: Arc<CollectionView<GalleryCategory>>,
    source: RwLock<Option<Arc<CollectionView<GalleryItem>>>>,
    provider: RwLock<Option<Arc<dyn ContainerProvider>>>,
    command: RwLock<Option<Arc<dyn GalleryCommand>>>,
    resolver: RwLock<ValueResolver>,
    config: RwLock<GalleryConfig>,
    dispatcher: Arc<Dispatcher>,
    pub(crate) selection: SelectionCoordinator,
    pub(crate) highlight: HighlightCoordinator,
    pub(crate) filter: FilterCoordinator,
    pub(crate) currency: CurrencySynchronizer,
    pub(crate) signals: GallerySignals,
    model_links: Mutex<ModelLinks>,
    provider_links: Mutex<Option<ConnectionGuard>>,
    pending_scroll: Mutex<Option<GalleryItem>>,
    replay_scheduled: AtomicBool,
}

impl GalleryInner {
    pub(crate) fn weak(&self) -> Weak<GalleryInner> {
        self.weak_self.clone()
    }

    pub(crate) fn lookup(&self) -> ContainerLookup<'_> {
        ContainerLookup::new(self)
    }

    pub(crate) fn provider(&self) -> Option<Arc<dyn ContainerProvider>> {
        self.provider.read().clone()
    }

    pub(crate) fn source(&self) -> Option<Arc<CollectionView<GalleryItem>>> {
        self.source.read().clone()
    }

    pub(crate) fn command(&self) -> Option<Arc<dyn GalleryCommand>> {
        self.command.read().clone()
    }

    pub(crate) fn resolver(&self) -> ValueResolver {
        self.resolver.read().clone()
    }

    pub(crate) fn config(&self) -> GalleryConfig {
        self.config.read().clone()
    }

    pub(crate) fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Re-checks selection and highlight against the data model.
    pub(crate) fn revalidate(&self) {
        self.selection.force_revalidate(self);
        self.highlight.force_revalidate(self);
    }

    /// Runs the bound command for a user selection of `item`.
    pub(crate) fn execute_command(&self, item: &GalleryItem) {
        if !self.config.read().execute_command_on_select {
            return;
        }
        let Some(command) = self.command() else {
            return;
        };
        let parameter = item.command_parameter();
        if command.can_execute(&parameter) {
            tracing::debug!(target: targets::SELECTION, ?item, "executing command");
            command.execute(&parameter);
        } else {
            tracing::debug!(target: targets::SELECTION, ?item, "command cannot execute");
        }
    }

    // =========================================================================
    // Model wiring
    // =========================================================================

    fn link_model(&self) {
        let weak = self.weak();
        let guard = self.categories.on_collection_changed(move |change| {
            if let Some(g) = weak.upgrade() {
                g.on_categories_changed(change);
            }
        });
        self.model_links.lock().categories = Some(guard);
        self.sync_category_links();
    }

    /// Subscribes to newly added categories and drops subscriptions of
    /// removed ones.
    fn sync_category_links(&self) {
        let categories = self.categories.items();
        let stale = {
            let mut links = self.model_links.lock();
            let (kept, stale): (Vec<_>, Vec<_>) = std::mem::take(&mut links.per_category)
                .into_iter()
                .partition(|(category, _)| categories.contains(category));
            links.per_category = kept;

            for category in &categories {
                if links.per_category.iter().any(|(c, _)| c == category) {
                    continue;
                }
                let weak = self.weak();
                let items = category.items().on_collection_changed(move |_| {
                    if let Some(g) = weak.upgrade() {
                        g.revalidate();
                    }
                });
                let weak = self.weak();
                let header = category.on_header_changed(move |_| {
                    if let Some(g) = weak.upgrade() {
                        g.filter.rebuild(&g);
                    }
                });
                links.per_category.push((category.clone(), [items, header]));
            }
            stale
        };
        drop(stale);
    }

    fn on_categories_changed(&self, change: &CollectionChange<GalleryCategory>) {
        tracing::debug!(target: targets::FILTER, ?change, "categories changed");
        self.sync_category_links();
        self.filter.rebuild(self);
        self.revalidate();
    }

    fn link_provider(&self) {
        let guard = self.provider().map(|provider| {
            let signals = provider.signals();

            let weak = self.weak();
            let status_id = signals.status_changed.connect(move |(category, status)| {
                if let Some(g) = weak.upgrade() {
                    g.on_status_changed(category.as_ref(), *status);
                }
            });
            let weak = self.weak();
            let prepared_id = signals.container_prepared.connect(move |container| {
                if let Some(g) = weak.upgrade() {
                    g.selection.on_container_prepared(container);
                    g.highlight.on_container_prepared(container);
                }
            });
            let weak = self.weak();
            let cleared_id = signals.container_cleared.connect(move |container| {
                if let Some(g) = weak.upgrade() {
                    g.selection.on_container_cleared(&g, container);
                    g.highlight.on_container_cleared(container);
                }
            });

            let weak_provider = Arc::downgrade(&provider);
            ConnectionGuard::new(move || {
                if let Some(provider) = weak_provider.upgrade() {
                    let signals = provider.signals();
                    signals.status_changed.disconnect(status_id);
                    signals.container_prepared.disconnect(prepared_id);
                    signals.container_cleared.disconnect(cleared_id);
                }
            })
        });
        let previous = std::mem::replace(&mut *self.provider_links.lock(), guard);
        drop(previous);
    }

    fn on_status_changed(&self, category: Option<&GalleryCategory>, status: GenerationStatus) {
        tracing::trace!(target: targets::LOOKUP, header = ?category.and_then(GalleryCategory::header), ?status, "generation status changed");
        if status != GenerationStatus::Generated {
            return;
        }
        if self.replay_scheduled.swap(true, Ordering::AcqRel) {
            return;
        }
        let weak = self.weak();
        self.dispatcher.post(DispatchPriority::Background, move || {
            if let Some(g) = weak.upgrade() {
                g.replay_scheduled.store(false, Ordering::Release);
                g.replay_deferred();
            }
        });
    }

    /// Replays requests deferred while containers were pending.
    fn replay_deferred(&self) {
        self.selection.replay_pending(self);
        self.highlight.replay_pending(self);
        let scroll = self.pending_scroll.lock().take();
        if let Some(item) = scroll {
            self.scroll_into_view(&item);
        }
    }

    fn scroll_into_view(&self, item: &GalleryItem) -> bool {
        match self.lookup().find(item, LookupMode::RequireGenerated) {
            LookupResult::Located {
                container: Some(container),
                ..
            } => {
                container.bring_into_view();
                true
            }
            LookupResult::Located { container: None, .. } => {
                tracing::debug!(target: targets::LOOKUP, ?item, "no realized container to scroll into view");
                false
            }
            LookupResult::Pending => {
                *self.pending_scroll.lock() = Some(item.clone());
                false
            }
            LookupResult::NotFound => false,
        }
    }
}

/// A gallery of categorized items with selection, highlight, filtering and
/// current-item synchronization.
///
/// `Gallery` is a cheap, cloneable handle. All operations take `&self`;
/// notifications are published through [`signals`](Self::signals).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lattice_gallery::gallery::{Gallery, GalleryCategory, GalleryItem, StaticContainerProvider};
///
/// let red = GalleryItem::new("red");
/// let colors = GalleryCategory::with_items("Colors", vec![red.clone()]);
///
/// let gallery = Gallery::builder()
///     .category(colors)
///     .container_provider(Arc::new(StaticContainerProvider::new()))
///     .build();
///
/// assert!(gallery.select(&red).unwrap());
/// assert_eq!(gallery.selected_item(), Some(red));
/// ```
#[derive(Clone)]
pub struct Gallery {
    inner: Arc<GalleryInner>,
}

impl Gallery {
    /// Creates an empty gallery with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for configuring a gallery.
    pub fn builder() -> GalleryBuilder {
        GalleryBuilder::default()
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &GalleryInner {
        &self.inner
    }

    fn require_provider(&self, operation: &'static str) -> GalleryResult<()> {
        if self.inner.provider.read().is_none() {
            return Err(GalleryError::MissingContainerProvider { operation });
        }
        Ok(())
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// Returns the category view.
    ///
    /// Mutating it (or any category's items) updates filters, selection and
    /// highlight.
    pub fn categories(&self) -> &Arc<CollectionView<GalleryCategory>> {
        &self.inner.categories
    }

    /// Appends a category.
    pub fn add_category(&self, category: GalleryCategory) {
        self.inner.categories.push(category);
    }

    /// Returns the gallery's notifications.
    pub fn signals(&self) -> &GallerySignals {
        &self.inner.signals
    }

    /// Returns the dispatcher running deferred work.
    ///
    /// The host drives it with [`Dispatcher::run_pending`].
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        self.inner.dispatcher()
    }

    /// Returns a snapshot of the configuration.
    pub fn config(&self) -> GalleryConfig {
        self.inner.config()
    }

    /// Returns the container provider.
    pub fn container_provider(&self) -> Option<Arc<dyn ContainerProvider>> {
        self.inner.provider()
    }

    /// Replaces the container provider.
    pub fn set_container_provider(&self, provider: Option<Arc<dyn ContainerProvider>>) {
        *self.inner.provider.write() = provider;
        self.inner.link_provider();
    }

    /// Returns the source view.
    pub fn source_view(&self) -> Option<Arc<CollectionView<GalleryItem>>> {
        self.inner.source()
    }

    /// Replaces the source view whose cursor follows the selection.
    pub fn set_source_view(&self, source: Option<Arc<CollectionView<GalleryItem>>>) {
        *self.inner.source.write() = source;
        if self.inner.currency.is_enabled() {
            self.inner.currency.reattach(&self.inner);
        }
    }

    /// Replaces the bound command.
    pub fn set_command(&self, command: Option<Arc<dyn GalleryCommand>>) {
        *self.inner.command.write() = command;
    }

    // =========================================================================
    // Values
    // =========================================================================

    /// Returns the value path.
    pub fn value_path(&self) -> Option<String> {
        self.inner.config.read().value_path.clone()
    }

    /// Sets the value path and recomputes the selected value.
    pub fn set_value_path(&self, path: Option<&str>) {
        self.inner.config.write().value_path = path.map(str::to_string);
        *self.inner.resolver.write() = ValueResolver::from_value_path(path);
        self.inner.selection.refresh_value(&self.inner);
    }

    /// Resolves the value of `item` with the current value path.
    pub fn resolve_value(&self, item: &GalleryItem) -> Option<ItemValue> {
        self.inner.resolver().resolve(item)
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Returns the selected item.
    pub fn selected_item(&self) -> Option<GalleryItem> {
        self.inner.selection.selected_item()
    }

    /// Returns the selected value.
    pub fn selected_value(&self) -> Option<ItemValue> {
        self.inner.selection.selected_value()
    }

    /// Returns the category holding the selected item.
    pub fn selected_category(&self) -> Option<GalleryCategory> {
        self.inner.selection.selected_category()
    }

    /// Returns the containers showing the selected state.
    pub fn selected_containers(&self) -> Vec<ItemContainer> {
        self.inner.selection.selected_containers()
    }

    /// Returns the item of a selection deferred until containers are
    /// generated.
    pub fn pending_selection(&self) -> Option<GalleryItem> {
        self.inner.selection.pending_item()
    }

    /// Returns `true` while a selection commit is in progress.
    pub fn is_selection_changing(&self) -> bool {
        self.inner.selection.is_changing()
    }

    /// Requests a new selection.
    ///
    /// Returns `Ok(true)` if the selection changed. Requests for items that
    /// are not in the gallery, re-entrant requests, and requests deferred
    /// until containers are generated return `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Item and value requests fail if no container provider is attached.
    pub fn select(&self, request: impl Into<SelectionRequest>) -> GalleryResult<bool> {
        match request.into() {
            SelectionRequest::Item(item) => {
                self.require_provider("select")?;
                Ok(self
                    .inner
                    .selection
                    .set_selected_item(&self.inner, Some(item), SelectionOrigin::Api))
            }
            SelectionRequest::Value(value) => {
                self.require_provider("select")?;
                Ok(self
                    .inner
                    .selection
                    .set_selected_value(&self.inner, Some(value)))
            }
            SelectionRequest::Clear => Ok(self.clear_selection()),
        }
    }

    /// Selects the first item whose value equals `value`.
    ///
    /// # Errors
    ///
    /// Fails if no container provider is attached.
    pub fn select_value(&self, value: impl Into<ItemValue>) -> GalleryResult<bool> {
        self.select(SelectionRequest::Value(value.into()))
    }

    /// Clears the selection.
    pub fn clear_selection(&self) -> bool {
        self.inner
            .selection
            .set_selected_item(&self.inner, None, SelectionOrigin::Api)
    }

    /// Selects `item` in response to user input.
    ///
    /// Unlike [`select`](Self::select), this executes the bound command,
    /// also when `item` is already selected.
    ///
    /// # Errors
    ///
    /// Fails if no container provider is attached.
    pub fn activate(&self, item: &GalleryItem) -> GalleryResult<bool> {
        self.require_provider("activate")?;
        if self.selected_item().as_ref() == Some(item) {
            self.inner.execute_command(item);
            return Ok(false);
        }
        Ok(self
            .inner
            .selection
            .set_selected_item(&self.inner, Some(item.clone()), SelectionOrigin::User))
    }

    /// Removes `container` from the selected set without changing the
    /// selected item.
    pub fn unselect_container(&self, container: &ItemContainer) {
        self.inner
            .selection
            .change_selection(&self.inner, SelectionChange::DeselectContainer(container.clone()));
    }

    // =========================================================================
    // Highlight
    // =========================================================================

    /// Returns the highlighted item.
    pub fn highlighted_item(&self) -> Option<GalleryItem> {
        self.inner.highlight.highlighted_item()
    }

    /// Returns the container showing the highlight.
    pub fn highlighted_container(&self) -> Option<ItemContainer> {
        self.inner.highlight.highlighted_container()
    }

    /// Returns the item of a highlight deferred until containers are
    /// generated.
    pub fn pending_highlight(&self) -> Option<GalleryItem> {
        self.inner.highlight.pending_item()
    }

    /// Highlights `item`.
    ///
    /// # Errors
    ///
    /// Fails if no container provider is attached.
    pub fn highlight(&self, item: &GalleryItem) -> GalleryResult<bool> {
        self.require_provider("highlight")?;
        Ok(self
            .inner
            .highlight
            .set_highlighted_item(&self.inner, Some(item.clone())))
    }

    /// Clears the highlight.
    pub fn clear_highlight(&self) -> bool {
        self.inner.highlight.set_highlighted_item(&self.inner, None)
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Returns the filter list.
    pub fn filters(&self) -> Vec<GalleryFilter> {
        self.inner.filter.filters()
    }

    /// Returns the active filter.
    pub fn active_filter(&self) -> GalleryFilter {
        self.inner.filter.active_filter()
    }

    /// Returns the display label of `filter`.
    pub fn filter_label(&self, filter: &GalleryFilter) -> String {
        filter.label(&self.inner.config.read().all_filter_label)
    }

    /// Activates `filter`.
    ///
    /// Returns `false` if it is already active or not in the filter list.
    pub fn set_filter(&self, filter: GalleryFilter) -> bool {
        self.inner.filter.set_filter(&self.inner, filter)
    }

    /// Activates the filter of the first category with header `header`.
    pub fn set_filter_by_header(&self, header: &str) -> bool {
        let filter = self
            .filters()
            .into_iter()
            .find(|f| f.category().and_then(GalleryCategory::filter_key).as_deref() == Some(header));
        match filter {
            Some(filter) => self.set_filter(filter),
            None => false,
        }
    }

    // =========================================================================
    // Currency
    // =========================================================================

    /// Returns `true` if selection follows the current-item cursors.
    pub fn is_synchronized_with_current_item(&self) -> bool {
        self.inner.currency.is_enabled()
    }

    /// Enables or disables current-item synchronization.
    pub fn set_synchronized_with_current_item(&self, enabled: bool) {
        self.inner.config.write().synchronized_with_current_item = enabled;
        self.inner.currency.set_enabled(&self.inner, enabled);
    }

    // =========================================================================
    // Containers
    // =========================================================================

    /// Looks up the category and container of `item`.
    pub fn locate(&self, item: &GalleryItem, mode: LookupMode) -> LookupResult {
        self.inner.lookup().find(item, mode)
    }

    /// Asks the container hosting `item` to bring itself into view.
    ///
    /// Deferred while containers are being generated. Returns `Ok(true)` if
    /// a container was asked to scroll.
    ///
    /// # Errors
    ///
    /// Fails if no container provider is attached.
    pub fn scroll_into_view(&self, item: &GalleryItem) -> GalleryResult<bool> {
        self.require_provider("scroll_into_view")?;
        Ok(self.inner.scroll_into_view(item))
    }

    /// Re-checks selection and highlight against the data model.
    pub fn revalidate(&self) {
        self.inner.revalidate();
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("categories", &self.inner.categories)
            .field("selection", &self.inner.selection)
            .field("highlight", &self.inner.highlight)
            .field("filter", &self.inner.filter)
            .field("currency", &self.inner.currency)
            .finish()
    }
}

/// Builder for [`Gallery`].
#[derive(Default)]
pub struct GalleryBuilder {
    config: GalleryConfig,
    categories: Vec<GalleryCategory>,
    provider: Option<Arc<dyn ContainerProvider>>,
    source: Option<Arc<CollectionView<GalleryItem>>>,
    command: Option<Arc<dyn GalleryCommand>>,
    dispatcher: Option<Arc<Dispatcher>>,
}

impl GalleryBuilder {
    /// Sets the configuration.
    pub fn config(mut self, config: GalleryConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends a category.
    pub fn category(mut self, category: GalleryCategory) -> Self {
        self.categories.push(category);
        self
    }

    /// Appends several categories.
    pub fn categories(mut self, categories: impl IntoIterator<Item = GalleryCategory>) -> Self {
        self.categories.extend(categories);
        self
    }

    /// Sets the container provider.
    pub fn container_provider(mut self, provider: Arc<dyn ContainerProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the source view.
    pub fn source_view(mut self, source: Arc<CollectionView<GalleryItem>>) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the command.
    pub fn command(mut self, command: Arc<dyn GalleryCommand>) -> Self {
        self.command = Some(command);
        self
    }

    /// Shares a dispatcher with the host instead of creating one.
    pub fn dispatcher(mut self, dispatcher: Arc<Dispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Builds the gallery.
    pub fn build(self) -> Gallery {
        let synchronized = self.config.synchronized_with_current_item;
        let resolver = ValueResolver::from_value_path(self.config.value_path.as_deref());

        let inner = Arc::new_cyclic(|weak| GalleryInner {
            weak_self: weak.clone(),
            categories: Arc::new(CollectionView::with_items(self.categories)),
            source: RwLock::new(self.source),
            provider: RwLock::new(self.provider),
            command: RwLock::new(self.command),
            resolver: RwLock::new(resolver),
            config: RwLock::new(self.config),
            dispatcher: self.dispatcher.unwrap_or_default(),
            selection: SelectionCoordinator::new(),
            highlight: HighlightCoordinator::new(),
            filter: FilterCoordinator::new(),
            currency: CurrencySynchronizer::new(synchronized),
            signals: GallerySignals::new(),
            model_links: Mutex::new(ModelLinks::default()),
            provider_links: Mutex::new(None),
            pending_scroll: Mutex::new(None),
            replay_scheduled: AtomicBool::new(false),
        });

        inner.link_model();
        inner.link_provider();
        inner.filter.rebuild(&inner);
        inner.currency.refresh(&inner);

        tracing::debug!(
            target: targets::FILTER,
            categories = inner.categories.len(),
            synchronized,
            "gallery built"
        );
        Gallery { inner }
    }
}

impl std::fmt::Debug for GalleryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryBuilder")
            .field("config", &self.config)
            .field("categories", &self.categories.len())
            .field("has_provider", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(Gallery: Send, Sync);
static_assertions::assert_impl_all!(GalleryBuilder: Send);
