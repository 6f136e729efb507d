//! Error types for the gallery.

use thiserror::Error;

/// Errors returned by gallery operations.
///
/// Requests that are merely inapplicable (an item that is not in the
/// gallery, a filter that is not offered, a re-entrant request) are not
/// errors: the operation returns `Ok(false)` and leaves state unchanged.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// An item-scoped operation was attempted with no container provider.
    #[error("`{operation}` requires a container provider, but none is attached")]
    MissingContainerProvider {
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// The configuration could not be parsed.
    #[error("invalid gallery configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("failed to read gallery configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gallery operations.
pub type GalleryResult<T> = std::result::Result<T, GalleryError>;
