//! Shared Selection Store
//!
//! Publish/subscribe holder for the selection every view reads: the chosen
//! match-1 play, the chosen match-2 play and the ghost overlay toggle.
//! The store is an explicit handle passed to each consumer; clones share
//! the same state and subscriber list.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use serde::{Deserialize, Serialize};

use crate::models::PlayId;

/// Snapshot of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_play1: Option<PlayId>,
    /// Only meaningful relative to `selected_play1`
    pub selected_play2: Option<PlayId>,
    pub ghost_mode: bool,
}

impl SelectionState {
    /// Overlay drawing applies only with ghost mode on and both plays chosen.
    pub fn overlay_active(&self) -> bool {
        self.ghost_mode && self.selected_play1.is_some() && self.selected_play2.is_some()
    }

    fn apply(&mut self, update: &SelectionUpdate) {
        if let Some(play1) = update.selected_play1 {
            self.selected_play1 = play1;
            self.selected_play2 = None;
        }
        if let Some(play2) = update.selected_play2 {
            self.selected_play2 = play2;
        }
        if let Some(ghost) = update.ghost_mode {
            self.ghost_mode = ghost;
        }
    }
}

/// Partial update; `None` fields are left untouched.
///
/// Touching `selected_play1` clears `selected_play2` before `selected_play2`
/// from the same update is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionUpdate {
    pub selected_play1: Option<Option<PlayId>>,
    pub selected_play2: Option<Option<PlayId>>,
    pub ghost_mode: Option<bool>,
}

impl SelectionUpdate {
    pub fn play1(id: Option<PlayId>) -> Self {
        Self {
            selected_play1: Some(id),
            ..Self::default()
        }
    }

    pub fn play2(id: Option<PlayId>) -> Self {
        Self {
            selected_play2: Some(id),
            ..Self::default()
        }
    }

    pub fn ghost(on: bool) -> Self {
        Self {
            ghost_mode: Some(on),
            ..Self::default()
        }
    }
}

type Listener = Arc<dyn Fn(&SelectionState) + Send + Sync>;

struct ListenerEntry {
    id: u64,
    active: Arc<AtomicBool>,
    listener: Listener,
}

struct StoreInner {
    state: RwLock<SelectionState>,
    listeners: Mutex<Vec<ListenerEntry>>,
    next_id: AtomicU64,
    /// Snapshots waiting for their notification round, oldest first
    pending: Mutex<VecDeque<SelectionState>>,
    notifying: AtomicBool,
}

impl StoreInner {
    fn remove(&self, id: u64) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|entry| entry.id != id);
    }

    fn snapshot_listeners(&self) -> Vec<(Arc<AtomicBool>, Listener)> {
        let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners
            .iter()
            .map(|entry| (Arc::clone(&entry.active), Arc::clone(&entry.listener)))
            .collect()
    }

    /// Next queued snapshot, or `None` after releasing the notifying flag.
    fn next_pending(&self) -> Option<SelectionState> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let next = pending.pop_front();
        if next.is_none() {
            self.notifying.store(false, Ordering::SeqCst);
        }
        next
    }
}

/// Releases the notifying flag if a listener panics mid-round.
struct RoundGuard<'a>(&'a StoreInner);

impl Drop for RoundGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
            self.0.notifying.store(false, Ordering::SeqCst);
        }
    }
}

/// Handle to the shared selection.
#[derive(Clone)]
pub struct SelectionStore {
    inner: Arc<StoreInner>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("state", &self.get_state())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::with_state(SelectionState::default())
    }

    pub fn with_state(state: SelectionState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(state),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
                pending: Mutex::new(VecDeque::new()),
                notifying: AtomicBool::new(false),
            }),
        }
    }

    /// Current snapshot. Snapshots are copies; mutate through `set_state`.
    pub fn get_state(&self) -> SelectionState {
        *self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Merge `update` into the state, then notify every subscriber with the
    /// resulting snapshot, in subscription order.
    ///
    /// Locks are released before listeners run, so a listener may read the
    /// store or call `set_state` itself. A nested call merges immediately but
    /// its notification round starts only after the current round has reached
    /// every subscriber, so each listener sees snapshots in update order and
    /// its last one matches `get_state()`.
    pub fn set_state(&self, update: SelectionUpdate) -> SelectionState {
        let snapshot = {
            let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
            state.apply(&update);
            self.inner
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(*state);
            *state
        };

        if self.inner.notifying.swap(true, Ordering::SeqCst) {
            // the round in progress delivers it
            return snapshot;
        }

        let _guard = RoundGuard(&*self.inner);
        while let Some(next) = self.inner.next_pending() {
            self.notify(&next);
        }

        snapshot
    }

    fn notify(&self, snapshot: &SelectionState) {
        let listeners = self.inner.snapshot_listeners();

        log::debug!(
            "selection: play1={:?} play2={:?} ghost={} -> {} subscriber(s)",
            snapshot.selected_play1,
            snapshot.selected_play2,
            snapshot.ghost_mode,
            listeners.len()
        );

        for (active, listener) in listeners {
            // a listener unsubscribed by an earlier one in this round is skipped
            if active.load(Ordering::SeqCst) {
                listener(snapshot);
            }
        }
    }

    /// Register `listener`; it runs on every later `set_state`.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&SelectionState) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let active = Arc::new(AtomicBool::new(true));

        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ListenerEntry {
                id,
                active: Arc::clone(&active),
                listener: Arc::new(listener),
            });

        Subscription {
            id,
            active,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // ========================
    // Selection actions
    // ========================

    /// Choose a match-1 play; always clears the match-2 choice.
    pub fn select_play1(&self, play_id: Option<PlayId>) -> SelectionState {
        self.set_state(SelectionUpdate::play1(play_id))
    }

    pub fn select_play2(&self, play_id: Option<PlayId>) -> SelectionState {
        self.set_state(SelectionUpdate::play2(play_id))
    }

    pub fn set_ghost_mode(&self, on: bool) -> SelectionState {
        self.set_state(SelectionUpdate::ghost(on))
    }

    pub fn toggle_ghost_mode(&self) -> SelectionState {
        let on = !self.get_state().ghost_mode;
        self.set_ghost_mode(on)
    }

    /// Drop both play choices; ghost mode is kept.
    pub fn clear_selection(&self) -> SelectionState {
        self.set_state(SelectionUpdate::play1(None))
    }
}

/// Returned by `subscribe`; `unsubscribe` may be called any number of times.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    store: Weak<StoreInner>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(inner) = self.store.upgrade() {
            inner.remove(self.id);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(store: &SelectionStore) -> (Subscription, Arc<Mutex<Vec<SelectionState>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let sub = store.subscribe(move |s| sink.lock().unwrap().push(*s));
        (sub, seen)
    }

    #[test]
    fn test_initial_state() {
        let store = SelectionStore::new();
        assert_eq!(store.get_state(), SelectionState::default());
        assert!(!store.get_state().overlay_active());
    }

    #[test]
    fn test_selecting_play1_clears_play2_in_same_update() {
        let store = SelectionStore::new();
        store.select_play1(Some(1));
        store.select_play2(Some(7));
        assert_eq!(store.get_state().selected_play2, Some(7));

        let (_sub, seen) = recorder(&store);
        store.select_play1(Some(2));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].selected_play1, Some(2));
        assert_eq!(seen[0].selected_play2, None);
    }

    #[test]
    fn test_reselecting_same_play1_still_clears() {
        let store = SelectionStore::new();
        store.select_play1(Some(1));
        store.select_play2(Some(3));
        store.select_play1(Some(1));
        assert_eq!(store.get_state().selected_play2, None);
    }

    #[test]
    fn test_partial_merge_keeps_other_fields() {
        let store = SelectionStore::new();
        store.select_play1(Some(4));
        store.set_ghost_mode(true);
        let state = store.get_state();
        assert_eq!(state.selected_play1, Some(4));
        assert!(state.ghost_mode);

        store.select_play2(Some(8));
        assert!(store.get_state().overlay_active());

        store.toggle_ghost_mode();
        assert!(!store.get_state().overlay_active());
        assert_eq!(store.get_state().selected_play2, Some(8));
    }

    #[test]
    fn test_listeners_in_subscription_order_once_per_update() {
        let store = SelectionStore::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = Arc::clone(&order);
                store.subscribe(move |_| order.lock().unwrap().push(i))
            })
            .collect();

        store.set_ghost_mode(true);
        store.set_ghost_mode(true);

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 0, 1, 2]);
        assert_eq!(subs.len(), 3);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let store = SelectionStore::new();
        let (sub, seen) = recorder(&store);

        store.select_play1(Some(1));
        sub.unsubscribe();
        sub.unsubscribe();
        store.select_play1(Some(2));

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert!(!sub.is_active());
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_during_notification_stops_immediately() {
        let store = SelectionStore::new();
        let late_calls = Arc::new(Mutex::new(0));

        let victim: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let victim_ref = Arc::clone(&victim);
        let _first = store.subscribe(move |_| {
            if let Some(sub) = victim_ref.lock().unwrap().as_ref() {
                sub.unsubscribe();
            }
        });
        let counter = Arc::clone(&late_calls);
        let second = store.subscribe(move |_| *counter.lock().unwrap() += 1);
        *victim.lock().unwrap() = Some(second);

        store.set_ghost_mode(true);
        assert_eq!(*late_calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_listener_can_read_and_write_store() {
        let store = SelectionStore::new();
        let handle = store.clone();
        let _sub = store.subscribe(move |s| {
            // auto-enable ghost mode once a pair is chosen
            if s.selected_play2.is_some() && !s.ghost_mode {
                handle.set_ghost_mode(true);
            }
        });

        store.select_play1(Some(1));
        store.select_play2(Some(2));
        assert!(store.get_state().ghost_mode);
    }

    #[test]
    fn test_write_back_from_listener_is_delivered_after_current_round() {
        let store = SelectionStore::new();
        let handle = store.clone();
        let _writer = store.subscribe(move |s| {
            if s.selected_play1.is_some() && !s.ghost_mode {
                handle.set_ghost_mode(true);
            }
        });
        let ghost_seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&ghost_seen);
        let _reader = store.subscribe(move |s| sink.lock().unwrap().push(s.ghost_mode));

        let returned = store.select_play1(Some(1));

        assert!(!returned.ghost_mode);
        assert!(store.get_state().ghost_mode);
        let ghost_seen = ghost_seen.lock().unwrap();
        assert_eq!(*ghost_seen, vec![false, true]);
        assert_eq!(ghost_seen.last().copied(), Some(store.get_state().ghost_mode));
    }

    #[test]
    fn test_nested_updates_keep_order_for_every_listener() {
        let store = SelectionStore::new();
        let handle = store.clone();
        let _writer = store.subscribe(move |s| {
            if s.selected_play1 == Some(1) && s.selected_play2.is_none() {
                handle.select_play2(Some(5));
                handle.set_ghost_mode(true);
            }
        });
        let (_sub, seen) = recorder(&store);

        store.select_play1(Some(1));

        let seen = seen.lock().unwrap();
        let pairs: Vec<_> = seen
            .iter()
            .map(|s| (s.selected_play2, s.ghost_mode))
            .collect();
        assert_eq!(pairs, vec![(None, false), (Some(5), false), (Some(5), true)]);
        assert_eq!(seen.last().copied(), Some(store.get_state()));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SelectionStore::new();
        let other = store.clone();
        other.select_play1(Some(9));
        assert_eq!(store.get_state().selected_play1, Some(9));

        store.clear_selection();
        assert_eq!(other.get_state().selected_play1, None);
    }
}
