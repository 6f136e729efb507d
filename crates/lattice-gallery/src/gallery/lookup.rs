//! Item-to-container lookup.
//!
//! Maps an item to the category holding it and the container hosting it.
//! Live selection and highlight requests need a settled answer and report
//! [`LookupResult::Pending`] while containers are being generated;
//! revalidation only needs to know whether the item is still in the data
//! model and ignores generation status.

use lattice_gallery_core::logging::targets;

use super::category::GalleryCategory;
use super::container::{ContainerProvider, GenerationStatus, ItemContainer};
use super::engine::GalleryInner;
use super::item::GalleryItem;

/// How generation status affects a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupMode {
    /// Report `Pending` while the gallery or the item's category is still
    /// generating containers.
    RequireGenerated,
    /// Answer from the data model alone; the container may be missing.
    IgnoreGenerationStatus,
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResult {
    /// The item is in the gallery.
    Located {
        /// Category holding the item.
        category: GalleryCategory,
        /// Container hosting the item, if one is realized.
        container: Option<ItemContainer>,
    },
    /// Containers are being generated; ask again later.
    Pending,
    /// The item is not in the gallery.
    NotFound,
}

impl LookupResult {
    /// Returns `true` if the item was located.
    pub fn is_located(&self) -> bool {
        matches!(self, LookupResult::Located { .. })
    }
}

pub(crate) struct ContainerLookup<'a> {
    gallery: &'a GalleryInner,
}

impl<'a> ContainerLookup<'a> {
    pub(crate) fn new(gallery: &'a GalleryInner) -> Self {
        Self { gallery }
    }

    /// Looks `item` up, trying the cached selected and highlighted
    /// containers before scanning the categories.
    pub(crate) fn find(&self, item: &GalleryItem, mode: LookupMode) -> LookupResult {
        let cached = self
            .gallery
            .selection
            .cached_location(item)
            .or_else(|| self.gallery.highlight.cached_location(item));
        if let Some((category, container)) = cached {
            tracing::trace!(target: targets::LOOKUP, container = container.id().as_u64(), "cached container hit");
            return LookupResult::Located {
                category,
                container: Some(container),
            };
        }
        self.find_in_model(item, mode)
    }

    /// Looks `item` up by scanning the categories.
    ///
    /// Revalidation uses this directly: cached containers may still refer to
    /// an item the data model no longer holds.
    pub(crate) fn find_in_model(&self, item: &GalleryItem, mode: LookupMode) -> LookupResult {
        let provider = self.gallery.provider();
        let status = |category: Option<&GalleryCategory>| {
            provider
                .as_ref()
                .map_or(GenerationStatus::Generated, |p| p.generation_status(category))
        };

        if mode == LookupMode::RequireGenerated && status(None) == GenerationStatus::Pending {
            tracing::trace!(target: targets::LOOKUP, "gallery containers pending");
            return LookupResult::Pending;
        }

        let Some(category) = self
            .gallery
            .categories
            .items()
            .into_iter()
            .find(|c| c.contains(item))
        else {
            tracing::trace!(target: targets::LOOKUP, ?item, "item not in any category");
            return LookupResult::NotFound;
        };

        if mode == LookupMode::RequireGenerated && status(Some(&category)) == GenerationStatus::Pending {
            tracing::trace!(target: targets::LOOKUP, header = ?category.header(), "category containers pending");
            return LookupResult::Pending;
        }

        let container = provider.as_ref().and_then(|p| p.container_for(item));
        if let (Some(provider), Some(container)) = (&provider, &container) {
            tracing::trace!(
                target: targets::LOOKUP,
                container = container.id().as_u64(),
                index = ?provider.index_of(container),
                "container located"
            );
        }

        LookupResult::Located { category, container }
    }
}
