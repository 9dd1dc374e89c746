// ── Optimistic entity collection ──
//
// Ordered cache of one resource type with push-based change notification
// via `watch` channels. Writes are staged optimistically and stamped with
// an `EditToken`; settling or reverting a staged edit only touches the
// slot that still carries that token, so later edits always win.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use uuid::Uuid;

use crate::model::Identified;

/// Correlation token for one optimistic edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditToken(Uuid);

impl EditToken {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for EditToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// How to undo a staged edit.
#[derive(Debug)]
enum Undo<T> {
    /// Drop the synthetic slot.
    Insert,
    /// Put the previous value back into the slot.
    Replace { previous: Arc<T> },
    /// Re-insert the removed value at its old index.
    Remove { previous: Arc<T>, index: usize },
}

/// An optimistic edit awaiting its server response.
///
/// `undo` is `None` when the edit found nothing to change (cache never
/// loaded, or no entry with the target id).
#[derive(Debug)]
pub(crate) struct StagedEdit<T> {
    pub token: EditToken,
    undo: Option<Undo<T>>,
}

impl<T> StagedEdit<T> {
    /// Whether the edit changed the cache.
    pub fn applied(&self) -> bool {
        self.undo.is_some()
    }
}

struct Slot<T> {
    value: Arc<T>,
    pending: Option<EditToken>,
}

#[derive(Default)]
struct State<T> {
    slots: Vec<Slot<T>>,
    loaded_at: Option<DateTime<Utc>>,
    stale: bool,
}

/// A reactive, order-preserving cache for a single entity type.
///
/// Every mutation bumps a version counter and rebuilds the snapshot that
/// subscribers receive.
pub(crate) struct EntityCollection<T: Identified + Send + Sync + 'static> {
    state: Mutex<State<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for efficient subscription.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Identified + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            state: Mutex::new(State {
                slots: Vec::new(),
                loaded_at: None,
                stale: false,
            }),
            version,
            snapshot,
        }
    }

    // ── Load state ───────────────────────────────────────────────────

    /// Loaded and not invalidated since.
    pub(crate) fn is_fresh(&self) -> bool {
        let state = self.lock();
        state.loaded_at.is_some() && !state.stale
    }

    /// Has held server data at least once.
    #[cfg(test)]
    pub(crate) fn is_loaded(&self) -> bool {
        self.lock().loaded_at.is_some()
    }

    pub(crate) fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.lock().loaded_at
    }

    /// Mark the data stale so the next read refetches. Entries stay
    /// visible until then.
    pub(crate) fn invalidate(&self) {
        self.lock().stale = true;
    }

    /// Replace the whole collection with server data.
    pub(crate) fn replace_all(&self, items: Vec<T>) {
        let mut state = self.lock();
        state.slots = items
            .into_iter()
            .map(|value| Slot {
                value: Arc::new(value),
                pending: None,
            })
            .collect();
        state.loaded_at = Some(Utc::now());
        state.stale = false;
        self.publish(&state);
    }

    // ── Optimistic edits ─────────────────────────────────────────────

    /// Append a synthetic entity with id `max(existing ids, 0) + 1`.
    ///
    /// Returns the staged edit and the synthetic entity; nothing is
    /// inserted into a cache that has never been loaded.
    pub(crate) fn stage_insert(&self, build: impl FnOnce(i64) -> T) -> (StagedEdit<T>, Option<Arc<T>>) {
        let token = EditToken::new();
        let mut state = self.lock();
        if state.loaded_at.is_none() {
            return (StagedEdit { token, undo: None }, None);
        }

        let next_id = state.slots.iter().map(|s| s.value.id()).fold(0, i64::max) + 1;
        let value = Arc::new(build(next_id));
        state.slots.push(Slot {
            value: Arc::clone(&value),
            pending: Some(token),
        });
        self.publish(&state);

        (
            StagedEdit {
                token,
                undo: Some(Undo::Insert),
            },
            Some(value),
        )
    }

    /// Replace the entry whose id matches `value`'s, keeping its position.
    pub(crate) fn stage_replace(&self, value: T) -> StagedEdit<T> {
        let token = EditToken::new();
        let mut state = self.lock();
        let id = value.id();

        let Some(slot) = state.slots.iter_mut().find(|s| s.value.id() == id) else {
            return StagedEdit { token, undo: None };
        };
        let previous = std::mem::replace(&mut slot.value, Arc::new(value));
        slot.pending = Some(token);
        self.publish(&state);

        StagedEdit {
            token,
            undo: Some(Undo::Replace { previous }),
        }
    }

    /// Remove the entry with `id`, preserving the order of the rest.
    pub(crate) fn stage_remove(&self, id: i64) -> StagedEdit<T> {
        let token = EditToken::new();
        let mut state = self.lock();

        let Some(index) = state.slots.iter().position(|s| s.value.id() == id) else {
            return StagedEdit { token, undo: None };
        };
        let previous = state.slots.remove(index).value;
        self.publish(&state);

        StagedEdit {
            token,
            undo: Some(Undo::Remove { previous, index }),
        }
    }

    // ── Reconciliation ───────────────────────────────────────────────

    /// Confirm a staged edit, swapping in the server's copy if one came
    /// back. Returns the value now held in the edit's slot.
    pub(crate) fn settle(&self, edit: &StagedEdit<T>, confirmed: Option<T>) -> Option<Arc<T>> {
        let mut state = self.lock();
        let slot = state
            .slots
            .iter_mut()
            .find(|s| s.pending == Some(edit.token))?;
        slot.pending = None;

        match confirmed {
            Some(value) => {
                slot.value = Arc::new(value);
                let value = Arc::clone(&slot.value);
                self.publish(&state);
                Some(value)
            }
            None => Some(Arc::clone(&slot.value)),
        }
    }

    /// Undo a staged edit. A slot that has since been overwritten by a
    /// later edit, or refreshed from the server, is left alone.
    pub(crate) fn revert(&self, edit: StagedEdit<T>) {
        let Some(undo) = edit.undo else { return };
        let mut state = self.lock();
        let token = Some(edit.token);

        let changed = match undo {
            Undo::Insert => {
                let before = state.slots.len();
                state.slots.retain(|s| s.pending != token);
                state.slots.len() != before
            }
            Undo::Replace { previous } => {
                match state.slots.iter_mut().find(|s| s.pending == token) {
                    Some(slot) => {
                        slot.value = previous;
                        slot.pending = None;
                        true
                    }
                    None => false,
                }
            }
            Undo::Remove { previous, index } => {
                let id = previous.id();
                if state.slots.iter().any(|s| s.value.id() == id) {
                    false
                } else {
                    let index = index.min(state.slots.len());
                    state.slots.insert(
                        index,
                        Slot {
                            value: previous,
                            pending: None,
                        },
                    );
                    true
                }
            }
        };

        if changed {
            self.publish(&state);
        }
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Look up an entity by id.
    pub(crate) fn get(&self, id: i64) -> Option<Arc<T>> {
        self.lock()
            .slots
            .iter()
            .find(|s| s.value.id() == id)
            .map(|s| Arc::clone(&s.value))
    }

    /// Number of entries still awaiting a server response.
    pub(crate) fn pending_count(&self) -> usize {
        self.lock().slots.iter().filter(|s| s.pending.is_some()).count()
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().slots.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebuild the snapshot, broadcast it, and bump the version.
    fn publish(&self, state: &State<T>) {
        let values: Vec<Arc<T>> = state.slots.iter().map(|s| Arc::clone(&s.value)).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}
