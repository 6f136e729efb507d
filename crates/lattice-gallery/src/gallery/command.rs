//! Commands invoked by the gallery.
//!
//! A gallery can carry a [`GalleryCommand`]. Selecting an item executes it
//! with the item's command parameter; highlighting an item asks it to
//! preview that parameter, and losing the highlight cancels the preview.

use lattice_gallery_core::Signal;

use super::item::ItemData;

/// An action bound to a gallery.
pub trait GalleryCommand: Send + Sync {
    /// Returns `true` if the command can run with `parameter`.
    fn can_execute(&self, _parameter: &ItemData) -> bool {
        true
    }

    /// Runs the command.
    fn execute(&self, parameter: &ItemData);

    /// Shows a preview of running the command with `parameter`.
    fn preview(&self, _parameter: &ItemData) {}

    /// Reverts any preview.
    fn cancel_preview(&self) {}
}

/// A [`GalleryCommand`] that reports each call through a signal.
///
/// # Example
///
/// ```
/// use lattice_gallery::gallery::{GalleryCommand, ItemData, SignalCommand};
///
/// let command = SignalCommand::new();
/// command.executed.connect(|param| println!("apply {:?}", param));
/// command.execute(&ItemData::from("bold"));
/// ```
pub struct SignalCommand {
    enabled: Box<dyn Fn(&ItemData) -> bool + Send + Sync>,
    /// Emitted by `execute`.
    pub executed: Signal<ItemData>,
    /// Emitted by `preview`.
    pub previewed: Signal<ItemData>,
    /// Emitted by `cancel_preview`.
    pub preview_cancelled: Signal<()>,
}

impl SignalCommand {
    /// Creates a command that can always execute.
    pub fn new() -> Self {
        Self::with_predicate(|_| true)
    }

    /// Creates a command gated by `can_execute`.
    pub fn with_predicate<F>(can_execute: F) -> Self
    where
        F: Fn(&ItemData) -> bool + Send + Sync + 'static,
    {
        Self {
            enabled: Box::new(can_execute),
            executed: Signal::new(),
            previewed: Signal::new(),
            preview_cancelled: Signal::new(),
        }
    }
}

impl Default for SignalCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryCommand for SignalCommand {
    fn can_execute(&self, parameter: &ItemData) -> bool {
        (self.enabled)(parameter)
    }

    fn execute(&self, parameter: &ItemData) {
        self.executed.emit(parameter.clone());
    }

    fn preview(&self, parameter: &ItemData) {
        self.previewed.emit(parameter.clone());
    }

    fn cancel_preview(&self) {
        self.preview_cancelled.emit(());
    }
}

impl std::fmt::Debug for SignalCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalCommand").finish_non_exhaustive()
    }
}
