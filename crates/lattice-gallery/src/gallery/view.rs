//! Observable collections with a current-item cursor.
//!
//! [`CollectionView`] is the list abstraction the gallery is built on. The
//! gallery's categories live in one, each category's items live in one, and
//! the host's source collection (if any) is one too. Every view has:
//!
//! - an ordered list of elements, mutated through methods that emit
//!   [`CollectionChange`] notifications
//! - a cursor ("current item") that may be unset, with a `current_changed`
//!   signal carrying the new position
//!
//! `current_changed` fires when the current element changes, not when its
//! position does: the cursor follows its element across inserts, removes and
//! moves without notifying, and the accompanying [`CollectionChange`] carries
//! the shift. When the current element itself is removed or replaced, or the
//! view is reset, the cursor is cleared and `current_changed(None)` follows
//! the collection notification.

use std::sync::{Arc, Weak};

use lattice_gallery_core::{ConnectionGuard, Property, Signal};
use parking_lot::RwLock;

/// A structural change to a [`CollectionView`].
#[derive(Debug, Clone)]
pub enum CollectionChange<T> {
    /// An element was inserted at `index`.
    Add { index: usize, item: T },
    /// The element at `index` was removed.
    Remove { index: usize, item: T },
    /// The element at `index` was replaced.
    Replace { index: usize, old: T, new: T },
    /// An element moved from `from` to `to`.
    Move { from: usize, to: usize },
    /// The whole contents changed.
    Reset,
}

/// An observable list with a current-item cursor.
///
/// Locks are never held while signals are emitted, so slots may freely read
/// or mutate the view that notified them.
pub struct CollectionView<T> {
    items: RwLock<Vec<T>>,
    current: Property<Option<usize>>,
    /// Emitted after every structural change.
    pub collection_changed: Signal<CollectionChange<T>>,
    /// Emitted when the current element changes, with its new position.
    pub current_changed: Signal<Option<usize>>,
}

impl<T> CollectionView<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Creates a view over the given elements, with no current element.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            current: Property::new(None),
            collection_changed: Signal::new(),
            current_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.read().get(index).cloned()
    }

    /// Returns a snapshot of all elements.
    pub fn items(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Returns the position of `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.read().iter().position(|i| i == item)
    }

    /// Returns `true` if the view contains `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Appends an element.
    pub fn push(&self, item: T) {
        let index = self.len();
        self.insert(index, item);
    }

    /// Inserts an element at `index`, clamped to the end of the view.
    pub fn insert(&self, index: usize, item: T) {
        let index = {
            let mut items = self.items.write();
            let index = index.min(items.len());
            items.insert(index, item.clone());
            index
        };
        if let Some(pos) = self.current.get() {
            if pos >= index {
                self.current.set_silent(Some(pos + 1));
            }
        }
        self.collection_changed.emit(CollectionChange::Add { index, item });
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&self, index: usize) -> Option<T> {
        let item = {
            let mut items = self.items.write();
            if index >= items.len() {
                return None;
            }
            items.remove(index)
        };

        let cleared = match self.current.get() {
            Some(pos) if pos == index => {
                self.current.set_silent(None);
                true
            }
            Some(pos) if pos > index => {
                self.current.set_silent(Some(pos - 1));
                false
            }
            _ => false,
        };

        self.collection_changed.emit(CollectionChange::Remove {
            index,
            item: item.clone(),
        });
        if cleared {
            self.current_changed.emit(None);
        }
        Some(item)
    }

    /// Removes the first occurrence of `item`.
    ///
    /// Returns `true` if it was present.
    pub fn remove_item(&self, item: &T) -> bool {
        match self.index_of(item) {
            Some(index) => self.remove(index).is_some(),
            None => false,
        }
    }

    /// Replaces the element at `index`, returning the old element.
    ///
    /// If the replaced element was current, the cursor is cleared.
    pub fn replace(&self, index: usize, item: T) -> Option<T> {
        let old = {
            let mut items = self.items.write();
            let slot = items.get_mut(index)?;
            std::mem::replace(slot, item.clone())
        };

        let cleared = self.current.get() == Some(index) && old != item;
        if cleared {
            self.current.set_silent(None);
        }

        self.collection_changed.emit(CollectionChange::Replace {
            index,
            old: old.clone(),
            new: item,
        });
        if cleared {
            self.current_changed.emit(None);
        }
        Some(old)
    }

    /// Moves the element at `from` to position `to`.
    ///
    /// Returns `false` if either position is out of range.
    pub fn move_item(&self, from: usize, to: usize) -> bool {
        {
            let mut items = self.items.write();
            if from >= items.len() || to >= items.len() {
                return false;
            }
            if from == to {
                return true;
            }
            let item = items.remove(from);
            items.insert(to, item);
        }

        if let Some(pos) = self.current.get() {
            let moved = if pos == from {
                to
            } else if from < pos && pos <= to {
                pos - 1
            } else if to <= pos && pos < from {
                pos + 1
            } else {
                pos
            };
            self.current.set_silent(Some(moved));
        }

        self.collection_changed.emit(CollectionChange::Move { from, to });
        true
    }

    /// Replaces the whole contents and clears the cursor.
    pub fn reset(&self, items: Vec<T>) {
        *self.items.write() = items;
        let had_current = self.current.swap(None).is_some();
        self.collection_changed.emit(CollectionChange::Reset);
        if had_current {
            self.current_changed.emit(None);
        }
    }

    /// Removes all elements.
    pub fn clear(&self) {
        self.reset(Vec::new());
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// Returns the cursor position.
    pub fn current_position(&self) -> Option<usize> {
        self.current.get()
    }

    /// Returns the current element.
    pub fn current_item(&self) -> Option<T> {
        self.current.get().and_then(|pos| self.get(pos))
    }

    /// Moves the cursor to `position`, or clears it with `None`.
    ///
    /// Returns `false` if the position is out of range, in which case the
    /// cursor is left alone. `current_changed` is emitted only if the cursor
    /// actually moved.
    pub fn move_current_to_position(&self, position: Option<usize>) -> bool {
        if let Some(pos) = position {
            if pos >= self.len() {
                return false;
            }
        }
        if self.current.set(position) {
            self.current_changed.emit(position);
        }
        true
    }

    /// Moves the cursor to `item`.
    ///
    /// Returns `false` if the view does not contain `item`.
    pub fn move_current_to(&self, item: &T) -> bool {
        match self.index_of(item) {
            Some(pos) => self.move_current_to_position(Some(pos)),
            None => false,
        }
    }

    /// Moves the cursor to the first element, if any.
    pub fn move_current_to_first(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.move_current_to_position(Some(0))
    }

    // =========================================================================
    // Scoped subscriptions
    // =========================================================================

    /// Connects to `collection_changed`, disconnecting when the guard drops.
    pub fn on_collection_changed<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard
    where
        F: Fn(&CollectionChange<T>) + Send + Sync + 'static,
    {
        let id = self.collection_changed.connect(slot);
        let weak: Weak<Self> = Arc::downgrade(self);
        ConnectionGuard::new(move || {
            if let Some(view) = weak.upgrade() {
                view.collection_changed.disconnect(id);
            }
        })
    }

    /// Connects to `current_changed`, disconnecting when the guard drops.
    pub fn on_current_changed<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard
    where
        F: Fn(&Option<usize>) + Send + Sync + 'static,
    {
        let id = self.current_changed.connect(slot);
        let weak: Weak<Self> = Arc::downgrade(self);
        ConnectionGuard::new(move || {
            if let Some(view) = weak.upgrade() {
                view.current_changed.disconnect(id);
            }
        })
    }
}

impl<T> Default for CollectionView<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for CollectionView<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionView")
            .field("len", &self.len())
            .field("current", &self.current_position())
            .finish()
    }
}

static_assertions::assert_impl_all!(CollectionView<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn view(items: &[&'static str]) -> Arc<CollectionView<&'static str>> {
        Arc::new(CollectionView::with_items(items.to_vec()))
    }

    fn record_current(view: &Arc<CollectionView<&'static str>>) -> (Arc<Mutex<Vec<Option<usize>>>>, ConnectionGuard) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let guard = view.on_current_changed(move |pos| seen_clone.lock().push(*pos));
        (seen, guard)
    }

    #[test]
    fn test_cursor_moves_and_notifies_once() {
        let v = view(&["a", "b", "c"]);
        let (seen, _guard) = record_current(&v);

        assert!(v.move_current_to(&"b"));
        assert!(v.move_current_to(&"b"));
        assert_eq!(v.current_item(), Some("b"));
        assert_eq!(*seen.lock(), vec![Some(1)]);

        assert!(!v.move_current_to(&"z"));
        assert!(!v.move_current_to_position(Some(3)));
        assert_eq!(v.current_position(), Some(1));
    }

    #[test]
    fn test_cursor_follows_inserts_and_removes() {
        let v = view(&["a", "b", "c"]);
        v.move_current_to(&"b");

        v.insert(0, "z");
        assert_eq!(v.current_item(), Some("b"));
        assert_eq!(v.current_position(), Some(2));

        v.remove(0);
        assert_eq!(v.current_position(), Some(1));

        v.remove(2);
        assert_eq!(v.current_item(), Some("b"));
    }

    #[test]
    fn test_shifting_cursor_does_not_notify() {
        let v = view(&["a", "b", "c"]);
        v.move_current_to(&"b");
        let (seen, _guard) = record_current(&v);

        v.insert(0, "z");
        assert!(v.move_item(3, 0));
        v.remove(0);

        assert_eq!(v.current_item(), Some("b"));
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_removing_current_clears_cursor() {
        let v = view(&["a", "b"]);
        v.move_current_to(&"a");
        let (seen, _guard) = record_current(&v);

        assert_eq!(v.remove(0), Some("a"));
        assert_eq!(v.current_position(), None);
        assert_eq!(*seen.lock(), vec![None]);
    }

    #[test]
    fn test_move_item_keeps_cursor_on_element() {
        let v = view(&["a", "b", "c", "d"]);
        v.move_current_to(&"c");

        assert!(v.move_item(0, 3));
        assert_eq!(v.items(), vec!["b", "c", "d", "a"]);
        assert_eq!(v.current_item(), Some("c"));

        assert!(v.move_item(1, 0));
        assert_eq!(v.current_position(), Some(0));
        assert!(!v.move_item(0, 9));
    }

    #[test]
    fn test_collection_changed_notifications() {
        let v = view(&["a"]);
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = log.clone();
        let _guard = v.on_collection_changed(move |change| {
            let entry = match change {
                CollectionChange::Add { index, .. } => format!("add {index}"),
                CollectionChange::Remove { index, .. } => format!("remove {index}"),
                CollectionChange::Replace { index, .. } => format!("replace {index}"),
                CollectionChange::Move { from, to } => format!("move {from}->{to}"),
                CollectionChange::Reset => "reset".to_string(),
            };
            log_clone.lock().push(entry);
        });

        v.push("b");
        v.replace(0, "c");
        v.move_item(0, 1);
        v.remove_item(&"b");
        v.clear();

        assert_eq!(
            *log.lock(),
            vec!["add 1", "replace 0", "move 0->1", "remove 0", "reset"]
        );
    }

    #[test]
    fn test_guard_disconnects() {
        let v = view(&["a", "b"]);
        let (seen, guard) = record_current(&v);
        drop(guard);
        v.move_current_to_first();
        assert!(seen.lock().is_empty());
        assert_eq!(v.current_changed.connection_count(), 0);
    }

    #[test]
    fn test_slot_may_mutate_view() {
        let v = view(&["a", "b"]);
        let weak = Arc::downgrade(&v);
        let _guard = v.on_current_changed(move |pos| {
            if pos.is_some() {
                if let Some(v) = weak.upgrade() {
                    v.push("late");
                }
            }
        });

        v.move_current_to_first();
        assert_eq!(v.len(), 3);
    }
}
