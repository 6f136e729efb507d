//! Fixtures shared by the coordinators' unit tests.

use std::sync::Arc;

use lattice_gallery_core::Signal;
use parking_lot::Mutex;

use super::engine::GalleryInner;
use super::{Gallery, GalleryCategory, GalleryConfig, GalleryItem, StaticContainerProvider};

/// A gallery with categories `A = [a1, a2]` and `B = [b1]`.
pub(crate) struct Fixture {
    pub(crate) gallery: Gallery,
    pub(crate) provider: Arc<StaticContainerProvider>,
    pub(crate) a: GalleryCategory,
    pub(crate) b: GalleryCategory,
    pub(crate) a1: GalleryItem,
    pub(crate) a2: GalleryItem,
    pub(crate) b1: GalleryItem,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with(GalleryConfig::default(), StaticContainerProvider::new())
    }

    pub(crate) fn with(config: GalleryConfig, provider: StaticContainerProvider) -> Self {
        let a1 = GalleryItem::new("a1");
        let a2 = GalleryItem::new("a2");
        let b1 = GalleryItem::new("b1");
        let a = GalleryCategory::with_items("A", vec![a1.clone(), a2.clone()]);
        let b = GalleryCategory::with_items("B", vec![b1.clone()]);
        let provider = Arc::new(provider);

        let gallery = Gallery::builder()
            .config(config)
            .categories([a.clone(), b.clone()])
            .container_provider(provider.clone())
            .build();

        Self {
            gallery,
            provider,
            a,
            b,
            a1,
            a2,
            b1,
        }
    }

    pub(crate) fn inner(&self) -> &GalleryInner {
        self.gallery.inner()
    }
}

/// Records every emission of `signal`.
pub(crate) fn record<T: Clone + Send + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    signal.connect(move |args: &T| sink.lock().push(args.clone()));
    log
}
