//! Integration tests for highlight coordination and command previews.

mod common;

use std::sync::Arc;

use common::{fixture, fixture_with, named, record};
use lattice_gallery::gallery::{GalleryConfig, SignalCommand, StaticContainerProvider};

#[test]
fn test_highlight_commits_and_flags_container() {
    let f = fixture();
    let container = f.provider.realize(&f.a2);
    let changes = record(&f.gallery.signals().highlight_changed);

    assert!(f.gallery.highlight(&f.a2).unwrap());
    assert!(!f.gallery.highlight(&f.a2).unwrap());

    assert_eq!(f.gallery.highlighted_item(), Some(f.a2.clone()));
    assert_eq!(f.gallery.highlighted_container(), Some(container.clone()));
    assert!(container.is_highlighted());
    assert_eq!(*changes.lock(), vec![(None, Some(f.a2.clone()))]);

    f.gallery.highlight(&f.b1).unwrap();
    assert!(!container.is_highlighted());
    assert_eq!(f.gallery.highlighted_container(), None);
}

#[test]
fn test_highlight_is_independent_of_selection() {
    let f = fixture();
    let containers = f.provider.realize_all(&f.categories());
    let selections = record(&f.gallery.signals().selection_changed);

    f.gallery.select(&f.a1).unwrap();
    f.gallery.highlight(&f.b1).unwrap();

    assert_eq!(f.gallery.selected_item(), Some(f.a1.clone()));
    assert_eq!(f.gallery.highlighted_item(), Some(f.b1.clone()));
    assert_eq!(selections.lock().len(), 1);

    let a1 = &containers[0];
    let b1 = &containers[2];
    assert!(a1.is_selected() && !a1.is_highlighted());
    assert!(b1.is_highlighted() && !b1.is_selected());

    assert!(f.gallery.clear_highlight());
    assert_eq!(f.gallery.selected_item(), Some(f.a1.clone()));
}

#[test]
fn test_unknown_item_is_not_highlighted() {
    let f = fixture();
    f.gallery.highlight(&f.a1).unwrap();

    assert!(!f.gallery.highlight(&named("ghost")).unwrap());
    assert_eq!(f.gallery.highlighted_item(), Some(f.a1.clone()));
}

#[test]
fn test_preview_runs_at_idle() {
    let f = fixture();
    let command = Arc::new(SignalCommand::new());
    let previews = record(&command.previewed);
    f.bind_command(&command);

    f.gallery.highlight(&f.a1).unwrap();
    assert!(previews.lock().is_empty());
    assert!(f.gallery.dispatcher().has_pending());

    f.gallery.dispatcher().run_pending();
    assert_eq!(*previews.lock(), vec![f.a1.command_parameter()]);
}

#[test]
fn test_rapid_highlights_preview_only_the_last() {
    let f = fixture();
    let command = Arc::new(SignalCommand::new());
    let previews = record(&command.previewed);
    f.bind_command(&command);

    f.gallery.highlight(&f.a1).unwrap();
    f.gallery.highlight(&f.a2).unwrap();
    f.gallery.highlight(&f.b1).unwrap();
    assert_eq!(f.gallery.dispatcher().pending_count(), 1);

    f.gallery.dispatcher().run_pending();
    assert_eq!(*previews.lock(), vec![f.b1.command_parameter()]);
}

#[test]
fn test_clearing_highlight_cancels_preview_synchronously() {
    let f = fixture();
    let command = Arc::new(SignalCommand::new());
    let previews = record(&command.previewed);
    let cancels = record(&command.preview_cancelled);
    f.bind_command(&command);

    f.gallery.highlight(&f.a1).unwrap();
    assert!(f.gallery.clear_highlight());

    assert_eq!(cancels.lock().len(), 1);
    assert!(!f.gallery.dispatcher().has_pending());
    f.gallery.dispatcher().run_pending();
    assert!(previews.lock().is_empty());
}

#[test]
fn test_removed_item_loses_highlight() {
    let f = fixture();
    let command = Arc::new(SignalCommand::new());
    let cancels = record(&command.preview_cancelled);
    f.bind_command(&command);
    f.gallery.highlight(&f.a2).unwrap();
    f.gallery.dispatcher().run_pending();

    f.a.items().remove_item(&f.a2);

    assert_eq!(f.gallery.highlighted_item(), None);
    assert_eq!(cancels.lock().len(), 1);
}

#[test]
fn test_preview_respects_can_execute() {
    let f = fixture();
    let a1 = f.a1.clone();
    let command = Arc::new(SignalCommand::with_predicate(move |param| *param == a1.command_parameter()));
    let previews = record(&command.previewed);
    f.bind_command(&command);

    f.gallery.highlight(&f.b1).unwrap();
    f.gallery.dispatcher().run_pending();
    assert!(previews.lock().is_empty());

    f.gallery.highlight(&f.a1).unwrap();
    f.gallery.dispatcher().run_pending();
    assert_eq!(previews.lock().len(), 1);
}

#[test]
fn test_disabled_preview_posts_nothing() {
    let f = fixture_with(
        GalleryConfig {
            preview_on_highlight: false,
            ..GalleryConfig::default()
        },
        StaticContainerProvider::new(),
    );
    let command = Arc::new(SignalCommand::new());
    f.bind_command(&command);

    f.gallery.highlight(&f.a1).unwrap();

    assert!(!f.gallery.dispatcher().has_pending());
}
