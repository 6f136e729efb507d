//! Lattice Gallery - selection, highlight, filtering and current-item
//! synchronization for categorized item galleries.
//!
//! This is the main crate; it re-exports the reactive primitives of
//! `lattice-gallery-core` alongside the [`gallery`] engine.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lattice_gallery::gallery::{Gallery, GalleryCategory, GalleryItem, StaticContainerProvider};
//!
//! let a1 = GalleryItem::new("a1");
//! let gallery = Gallery::builder()
//!     .category(GalleryCategory::with_items("A", vec![a1.clone()]))
//!     .container_provider(Arc::new(StaticContainerProvider::new()))
//!     .build();
//!
//! gallery.signals().selection_changed.connect(|(old, new)| {
//!     println!("selection: {:?} -> {:?}", old, new);
//! });
//! gallery.select(&a1).unwrap();
//! ```

pub use lattice_gallery_core::*;

pub mod gallery;

pub use gallery::{
    Gallery, GalleryBuilder, GalleryCategory, GalleryConfig, GalleryError, GalleryFilter,
    GalleryItem, GalleryResult,
};
