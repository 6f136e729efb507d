//! Integration tests for current-item synchronization.

mod common;

use std::sync::Arc;

use common::{fixture, fixture_with, Fixture};
use lattice_gallery::gallery::{
    CollectionView, Gallery, GalleryCategory, GalleryConfig, GalleryItem, StaticContainerProvider,
};
use parking_lot::Mutex;

fn synchronized() -> (Fixture, Arc<CollectionView<GalleryItem>>) {
    let f = fixture_with(
        GalleryConfig::default().with_synchronization(true),
        StaticContainerProvider::new(),
    );
    let source = Arc::new(CollectionView::with_items(f.items()));
    f.gallery.set_source_view(Some(source.clone()));
    (f, source)
}

#[test]
fn test_selection_pushes_cursors_in_order() {
    let (f, source) = synchronized();
    let order = Arc::new(Mutex::new(Vec::new()));

    let sink = order.clone();
    f.gallery
        .categories()
        .current_changed
        .connect(move |_| sink.lock().push("categories"));
    let sink = order.clone();
    f.a.items()
        .current_changed
        .connect(move |_| sink.lock().push("category"));
    let sink = order.clone();
    source.current_changed.connect(move |_| sink.lock().push("source"));

    f.gallery.select(&f.a2).unwrap();

    assert_eq!(*order.lock(), vec!["categories", "category", "source"]);
    assert_eq!(f.gallery.categories().current_item(), Some(f.a.clone()));
    assert_eq!(f.a.items().current_item(), Some(f.a2.clone()));
    assert_eq!(source.current_item(), Some(f.a2.clone()));
}

#[test]
fn test_moving_category_cursor_selects_first_item() {
    let (f, source) = synchronized();
    f.gallery.select(&f.a2).unwrap();

    f.gallery.categories().move_current_to(&f.b);

    assert_eq!(f.gallery.selected_item(), Some(f.b1.clone()));
    assert_eq!(f.b.items().current_item(), Some(f.b1.clone()));
    assert_eq!(source.current_item(), Some(f.b1.clone()));
}

#[test]
fn test_moving_source_cursor_selects_item() {
    let (f, _source) = synchronized();
    let source = f.gallery.source_view().expect("source view attached");

    source.move_current_to(&f.a2);
    assert_eq!(f.gallery.selected_item(), Some(f.a2.clone()));
    assert_eq!(f.gallery.categories().current_item(), Some(f.a.clone()));

    source.move_current_to(&f.b1);
    assert_eq!(f.gallery.selected_item(), Some(f.b1.clone()));
}

#[test]
fn test_clearing_source_cursor_deselects() {
    let (f, source) = synchronized();
    f.gallery.select(&f.b1).unwrap();

    source.move_current_to_position(None);

    assert_eq!(f.gallery.selected_item(), None);
    assert_eq!(f.gallery.categories().current_position(), None);
}

#[test]
fn test_deselect_resets_cursors() {
    let (f, source) = synchronized();
    f.gallery.select(&f.a1).unwrap();

    f.gallery.clear_selection();

    assert_eq!(f.gallery.categories().current_position(), None);
    assert_eq!(source.current_position(), None);
}

#[test]
fn test_empty_category_cursor_is_ignored() {
    let (f, _source) = synchronized();
    f.gallery.select(&f.a1).unwrap();
    let empty = GalleryCategory::new("Empty");
    f.gallery.add_category(empty.clone());

    f.gallery.categories().move_current_to(&empty);

    assert_eq!(f.gallery.selected_item(), Some(f.a1.clone()));
}

#[test]
fn test_attach_pulls_from_source() {
    let f = fixture();
    let source = Arc::new(CollectionView::with_items(f.items()));
    source.move_current_to(&f.a2);

    let gallery = Gallery::builder()
        .config(GalleryConfig::default().with_synchronization(true))
        .categories(f.categories())
        .container_provider(f.provider.clone())
        .source_view(source)
        .build();

    assert_eq!(gallery.selected_item(), Some(f.a2.clone()));
}

#[test]
fn test_attach_pulls_from_category_cursor() {
    let f = fixture();
    f.b.items().move_current_to(&f.b1);
    let gallery = Gallery::builder()
        .categories(f.categories())
        .container_provider(f.provider.clone())
        .build();
    gallery.categories().move_current_to(&f.b);

    gallery.set_synchronized_with_current_item(true);

    assert_eq!(gallery.selected_item(), Some(f.b1.clone()));
}

#[test]
fn test_attach_pushes_existing_selection() {
    let f = fixture();
    let source = Arc::new(CollectionView::with_items(f.items()));
    f.gallery.set_source_view(Some(source.clone()));
    f.gallery.select(&f.b1).unwrap();
    assert_eq!(source.current_position(), None);

    f.gallery.set_synchronized_with_current_item(true);

    assert!(f.gallery.is_synchronized_with_current_item());
    assert_eq!(f.gallery.selected_item(), Some(f.b1.clone()));
    assert_eq!(f.gallery.categories().current_item(), Some(f.b.clone()));
    assert_eq!(source.current_item(), Some(f.b1.clone()));
}

#[test]
fn test_unsynchronized_gallery_ignores_cursors() {
    let f = fixture();
    let source = Arc::new(CollectionView::with_items(f.items()));
    f.gallery.set_source_view(Some(source.clone()));

    source.move_current_to(&f.a1);
    f.gallery.categories().move_current_to(&f.b);
    assert_eq!(f.gallery.selected_item(), None);

    f.gallery.select(&f.a2).unwrap();
    assert_eq!(source.current_item(), Some(f.a1.clone()));
}

#[test]
fn test_disabling_detaches() {
    let (f, source) = synchronized();
    f.gallery.select(&f.a1).unwrap();

    f.gallery.set_synchronized_with_current_item(false);
    source.move_current_to(&f.b1);

    assert_eq!(f.gallery.selected_item(), Some(f.a1.clone()));
}
