//! Change notification.
//!
//! A [`Signal<Args>`] holds a list of slots and calls each of them, in
//! connection order, when [`emit`](Signal::emit) is called. Gallery objects
//! publish every state change through signals: old/new pairs for the
//! coordinators, single values for containers and cursors.
//!
//! Slots run synchronously on the emitting thread. `emit` copies the slot
//! list and releases its lock first, so a slot may connect, disconnect or
//! emit again (directly or by issuing a new request to the object that owns
//! the signal). A slot disconnected during an emission still receives that
//! emission.
//!
//! Subscriptions that must end with their owner use a [`ConnectionGuard`].
//!
//! ```
//! use lattice_gallery_core::Signal;
//!
//! let header_changed = Signal::<Option<String>>::new();
//! let id = header_changed.connect(|header| println!("header is now {:?}", header));
//! header_changed.emit(Some("Colors".to_string()));
//! header_changed.disconnect(id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Identifies one connected slot; pass it to [`Signal::disconnect`].
    pub struct ConnectionId;
}

/// Shared slot function.
type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A list of slots called with `&Args` on every emission.
///
/// Old/new notifications use a pair, e.g. `Signal<(Option<T>, Option<T>)>`;
/// argument-less notifications use `Signal<()>`.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Creates a signal with no slots.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connects `slot`, which stays connected until disconnected by id or
    /// until the signal is dropped.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connects `slot` for the lifetime of the returned guard.
    ///
    /// The guard holds the signal weakly; the signal may be dropped first.
    pub fn connect_scoped<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        let weak: Weak<Self> = Arc::downgrade(self);
        ConnectionGuard::new(move || {
            if let Some(signal) = weak.upgrade() {
                signal.disconnect(id);
            }
        })
    }

    /// Disconnects the slot `id`. Returns `false` if it was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnects every slot.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Returns the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Suppresses (or re-enables) emission. A blocked `emit` is dropped, not
    /// queued.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Returns `true` while emission is suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Calls every connected slot with `args`.
    #[tracing::instrument(skip_all, target = "lattice_gallery_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "blocked");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = slots.len(), "emit");

        for slot in slots {
            slot(&args);
        }
    }
}

/// Ends a subscription when dropped.
///
/// Returned by [`Signal::connect_scoped`]. Owners holding several
/// subscriptions (a gallery linking to its categories, say) build one guard
/// whose closure undoes all of them with [`ConnectionGuard::new`].
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use lattice_gallery_core::Signal;
///
/// let moved = Arc::new(Signal::<Option<usize>>::new());
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// let counter = hits.clone();
/// let guard = moved.connect_scoped(move |_| {
///     counter.fetch_add(1, Ordering::Relaxed);
/// });
/// moved.emit(Some(0));
/// drop(guard);
/// moved.emit(None);
///
/// assert_eq!(hits.load(Ordering::Relaxed), 1);
/// ```
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard {
    disconnect: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ConnectionGuard {
    /// Create a guard that runs `disconnect` when dropped.
    pub fn new<F>(disconnect: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            disconnect: Some(Box::new(disconnect)),
        }
    }

    /// Disconnect now instead of waiting for the drop.
    pub fn disconnect(mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }

    /// Keep the connection alive for the lifetime of the signal.
    pub fn forget(mut self) {
        self.disconnect = None;
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl std::fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("connected", &self.disconnect.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
static_assertions::assert_impl_all!(ConnectionGuard: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn recorder<T: Clone + Send + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        signal.connect(move |value: &T| sink.lock().push(value.clone()));
        log
    }

    #[test]
    fn test_emit_reaches_slot() {
        let signal = Signal::<i32>::new();
        let log = recorder(&signal);

        signal.emit(7);
        signal.emit(-1);

        assert_eq!(*log.lock(), vec![7, -1]);
    }

    #[test]
    fn test_disconnect_by_id() {
        let signal = Signal::<&'static str>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let id = signal.connect(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        signal.emit("first");
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit("second");

        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_blocked_emission_is_dropped() {
        let signal = Signal::<u8>::new();
        let log = recorder(&signal);

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(1);
        signal.set_blocked(false);
        signal.emit(2);

        assert_eq!(*log.lock(), vec![2]);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 0..4 {
            let order = order.clone();
            signal.connect(move |_| order.lock().push(n));
        }

        signal.emit(());
        assert_eq!(*order.lock(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_disconnect_all() {
        let signal = Signal::<()>::new();
        signal.connect(|_| {});
        signal.connect(|_| {});

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_guard_disconnects_on_drop() {
        let signal = Arc::new(Signal::<Option<usize>>::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let sink = log.clone();
        let guard = signal.connect_scoped(move |pos| sink.lock().push(*pos));
        signal.emit(Some(3));
        drop(guard);
        signal.emit(None);

        assert_eq!(*log.lock(), vec![Some(3)]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_guard_may_outlive_signal() {
        let signal = Arc::new(Signal::<i32>::new());
        let guard = signal.connect_scoped(|_| {});
        drop(signal);
        guard.disconnect();
    }

    #[test]
    fn test_guard_forget_keeps_connection() {
        let signal = Arc::new(Signal::<i32>::new());
        signal.connect_scoped(|_| {}).forget();
        assert_eq!(signal.connection_count(), 1);
    }

    #[test]
    fn test_reentrant_emit_from_slot() {
        let signal = Arc::new(Signal::<u32>::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let weak = Arc::downgrade(&signal);
        let counter = hits.clone();
        signal.connect(move |&depth| {
            counter.fetch_add(1, Ordering::SeqCst);
            if depth < 3 {
                if let Some(signal) = weak.upgrade() {
                    signal.emit(depth + 1);
                }
            }
        });

        signal.emit(0);
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_connect_from_slot_does_not_deadlock() {
        let signal = Arc::new(Signal::<()>::new());
        let weak = Arc::downgrade(&signal);
        signal.connect(move |_| {
            if let Some(signal) = weak.upgrade() {
                signal.connect(|_| {});
            }
        });

        signal.emit(());
        assert_eq!(signal.connection_count(), 2);
    }

    #[test]
    fn test_slot_disconnected_mid_emit_still_runs() {
        let signal = Arc::new(Signal::<()>::new());
        let hits = Arc::new(AtomicUsize::new(0));
        let victim = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&signal);
        let target = victim.clone();
        signal.connect(move |_| {
            if let (Some(signal), Some(id)) = (weak.upgrade(), *target.lock()) {
                signal.disconnect(id);
            }
        });
        let counter = hits.clone();
        *victim.lock() = Some(signal.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        signal.emit(());
        signal.emit(());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_pair_arguments() {
        let signal = Signal::<(Option<String>, Option<String>)>::new();
        let log = recorder(&signal);

        signal.emit((None, Some("a1".to_string())));

        assert_eq!(*log.lock(), vec![(None, Some("a1".to_string()))]);
    }
}
