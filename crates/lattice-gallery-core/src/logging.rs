//! Logging facilities for Lattice Gallery.
//!
//! Lattice Gallery uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_gallery::selection=debug")
//!     .init();
//! ```
//!
//! Every event is emitted under one of the [`targets`] so each coordinator
//! can be filtered independently.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_gallery_core::signal";
    /// Deferred dispatch target.
    pub const DISPATCHER: &str = "lattice_gallery_core::dispatcher";
    /// Selection commits and rejections.
    pub const SELECTION: &str = "lattice_gallery::selection";
    /// Highlight commits, previews and cancellations.
    pub const HIGHLIGHT: &str = "lattice_gallery::highlight";
    /// Filter list rebuilds and visibility updates.
    pub const FILTER: &str = "lattice_gallery::filter";
    /// Cursor synchronization.
    pub const CURRENCY: &str = "lattice_gallery::currency";
    /// Item-to-container lookups.
    pub const LOOKUP: &str = "lattice_gallery::lookup";
}

/// A guard that keeps a commit span entered until dropped.
///
/// Wrap a state commit in a `CommitSpan` so everything logged during it
/// (including nested signal emissions) is grouped under one span.
///
/// # Example
///
/// ```
/// use lattice_gallery_core::logging::CommitSpan;
///
/// {
///     let _span = CommitSpan::enter("selection");
///     // ... commit work ...
/// }
/// ```
#[derive(Debug)]
pub struct CommitSpan {
    _span: tracing::span::EnteredSpan,
}

impl CommitSpan {
    /// Enter a new commit span for the named coordinator.
    pub fn enter(coordinator: &'static str) -> Self {
        let span = tracing::debug_span!(target: "lattice_gallery::commit", "commit", coordinator);
        Self {
            _span: span.entered(),
        }
    }
}
