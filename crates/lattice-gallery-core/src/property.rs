//! Change-detecting cells.
//!
//! A [`Property<T>`] stores one value behind a lock and tells the writer
//! whether a write changed it. The owner pairs each property with a
//! [`Signal`](crate::Signal) and emits only on a real change:
//!
//! ```
//! use lattice_gallery_core::{Property, Signal};
//!
//! struct Cursor {
//!     position: Property<Option<usize>>,
//!     moved: Signal<Option<usize>>,
//! }
//!
//! impl Cursor {
//!     fn move_to(&self, position: Option<usize>) {
//!         if self.position.set(position) {
//!             self.moved.emit(position);
//!         }
//!     }
//! }
//!
//! let cursor = Cursor { position: Property::new(None), moved: Signal::new() };
//! cursor.move_to(Some(2));
//! cursor.move_to(Some(2));
//! assert_eq!(cursor.position.get(), Some(2));
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value with change detection.
///
/// Reads clone the value; use [`with`](Self::with) to borrow it instead.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Creates a property holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Returns a copy of the value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Runs `f` on the borrowed value.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrites the value without reporting a change.
    ///
    /// Used when the value moves as a side effect of another change the
    /// owner already reports (a cursor shifting after an insert, say).
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }

    /// Overwrites the value and returns the previous one, changed or not.
    pub fn swap(&self, value: T) -> T {
        std::mem::replace(&mut *self.value.write(), value)
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Stores `value`; returns `true` if it differs from the old value.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current == value {
            return false;
        }
        *current = value;
        true
    }

    /// Stores `value`; returns the old value if it differed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        (*current != value).then(|| std::mem::replace(&mut *current, value))
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("Property").field(value).finish())
    }
}

static_assertions::assert_impl_all!(Property<Option<usize>>: Send, Sync);
