//! The gallery engine.
//!
//! A [`Gallery`] presents [`GalleryItem`]s grouped into
//! [`GalleryCategory`]s and coordinates four pieces of state around them:
//!
//! - **Selection**: at most one selected item, its derived value (see
//!   [`ValueResolver`]) and the containers showing the selected state.
//! - **Highlight**: at most one highlighted item, with command previews.
//! - **Filter**: which categories are visible.
//! - **Currency**: optional synchronization of the selection with the
//!   current-item cursors of the category view and a host-supplied source
//!   view.
//!
//! Containers come from a [`ContainerProvider`]. Requests that need a
//! container while the provider is still generating are deferred and
//! replayed through the gallery's [`Dispatcher`](lattice_gallery_core::Dispatcher).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lattice_gallery::gallery::{
//!     Gallery, GalleryCategory, GalleryConfig, GalleryFilter, GalleryItem, ItemData,
//!     ItemValue, StaticContainerProvider,
//! };
//!
//! let red = GalleryItem::new(ItemData::record([("name", "Red")]));
//! let serif = GalleryItem::new(ItemData::record([("name", "Serif")]));
//! let colors = GalleryCategory::with_items("Colors", vec![red.clone()]);
//! let fonts = GalleryCategory::with_items("Fonts", vec![serif.clone()]);
//!
//! let gallery = Gallery::builder()
//!     .config(GalleryConfig::default().with_value_path("name"))
//!     .categories([colors.clone(), fonts])
//!     .container_provider(Arc::new(StaticContainerProvider::new()))
//!     .build();
//!
//! gallery.select_value("Serif").unwrap();
//! assert_eq!(gallery.selected_item(), Some(serif));
//!
//! gallery.set_filter(GalleryFilter::Category(colors.clone()));
//! assert!(colors.is_visible());
//! assert_eq!(gallery.selected_value(), Some(ItemValue::from("Serif")));
//! ```

mod category;
mod command;
mod config;
mod container;
mod currency;
mod engine;
mod error;
mod filter;
mod highlight;
mod item;
mod latch;
mod lookup;
mod selection;
#[cfg(test)]
mod test_util;
mod value;
mod view;

pub use category::GalleryCategory;
pub use command::{GalleryCommand, SignalCommand};
pub use config::GalleryConfig;
pub use container::{
    ContainerId, ContainerProvider, ContainerSignals, GenerationStatus, ItemContainer,
    StaticContainerProvider,
};
pub use engine::{Gallery, GalleryBuilder, GallerySignals, SelectionRequest};
pub use error::{GalleryError, GalleryResult};
pub use filter::GalleryFilter;
pub use item::{GalleryItem, ItemData, ItemValue, MarkupNode};
pub use lookup::{LookupMode, LookupResult};
pub use value::{PathSegment, PropertyPath, ValueResolver};
pub use view::{CollectionChange, CollectionView};
