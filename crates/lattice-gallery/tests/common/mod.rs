//! Shared fixtures for gallery integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use lattice_gallery::gallery::{
    Gallery, GalleryCategory, GalleryCommand, GalleryConfig, GalleryItem, ItemData,
    SignalCommand, StaticContainerProvider,
};
use lattice_gallery::Signal;
use parking_lot::Mutex;

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A gallery with categories `A = [a1, a2]` and `B = [b1]`.
pub struct Fixture {
    pub gallery: Gallery,
    pub provider: Arc<StaticContainerProvider>,
    pub a: GalleryCategory,
    pub b: GalleryCategory,
    pub a1: GalleryItem,
    pub a2: GalleryItem,
    pub b1: GalleryItem,
}

pub fn named(name: &str) -> GalleryItem {
    GalleryItem::new(ItemData::record([("name", name)]))
}

pub fn fixture() -> Fixture {
    fixture_with(GalleryConfig::default(), StaticContainerProvider::new())
}

pub fn fixture_with(config: GalleryConfig, provider: StaticContainerProvider) -> Fixture {
    init_tracing();

    let a1 = named("a1");
    let a2 = named("a2");
    let b1 = named("b1");
    let a = GalleryCategory::with_items("A", vec![a1.clone(), a2.clone()]);
    let b = GalleryCategory::with_items("B", vec![b1.clone()]);
    let provider = Arc::new(provider);

    let gallery = Gallery::builder()
        .config(config)
        .categories([a.clone(), b.clone()])
        .container_provider(provider.clone())
        .build();

    Fixture {
        gallery,
        provider,
        a,
        b,
        a1,
        a2,
        b1,
    }
}

impl Fixture {
    pub fn categories(&self) -> Vec<GalleryCategory> {
        vec![self.a.clone(), self.b.clone()]
    }

    pub fn items(&self) -> Vec<GalleryItem> {
        vec![self.a1.clone(), self.a2.clone(), self.b1.clone()]
    }

    /// Binds a recording command to the gallery.
    pub fn bind_command(&self, command: &Arc<SignalCommand>) {
        let command: Arc<dyn GalleryCommand> = command.clone();
        self.gallery.set_command(Some(command));
    }
}

/// Records every emission of `signal`.
pub fn record<T: Clone + Send + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    signal.connect(move |args: &T| sink.lock().push(args.clone()));
    log
}
