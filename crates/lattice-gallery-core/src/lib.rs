//! Core systems for Lattice Gallery.
//!
//! This crate provides the reactive building blocks the gallery engine is
//! written against:
//!
//! - **Signal/Slot System**: Type-safe change notification with re-entrant emission
//! - **Property System**: Change-detecting properties
//! - **Dispatcher**: Priority-ordered deferred continuations ("next idle turn")
//! - **Logging**: `tracing` target names and commit spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_gallery_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Dispatcher Example
//!
//! ```
//! use lattice_gallery_core::{DispatchPriority, Dispatcher};
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.post(DispatchPriority::Idle, || println!("idle work"));
//! assert_eq!(dispatcher.run_pending(), 1);
//! ```

pub mod dispatcher;
pub mod logging;
pub mod property;
pub mod signal;

pub use dispatcher::{DispatchPriority, Dispatcher, TaskId};
pub use logging::CommitSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
