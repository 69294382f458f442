//! Append-only event store keyed by session.
//!
//! # Concurrency
//!
//! A single `RwLock` guards the bucket list, the id index and the global
//! sequence counter together. Bucket creation, append and `clear_all` are
//! therefore atomic with respect to each other: a clear racing an append
//! either happens strictly before it (the entry lands in a fresh store) or
//! strictly after it (the entry is gone), never halfway.
//!
//! Lock poisoning is recovered rather than propagated. Every mutation
//! finishes its structural change before anything can panic, so a poisoned
//! guard still protects a consistent store.

use crate::action_type::ActionType;
use crate::environment::Clock;
use crate::types::{EventLogEntry, SessionId, SessionSummary};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Result of an append.
#[derive(Clone, Debug, PartialEq)]
pub struct Appended {
    /// The stored entry
    pub entry: EventLogEntry,
    /// Whether this append created the session's bucket
    pub bucket_created: bool,
}

#[derive(Debug)]
struct Bucket {
    session_id: SessionId,
    created_at: DateTime<Utc>,
    entries: Vec<(u64, EventLogEntry)>,
}

impl Bucket {
    const fn new(session_id: SessionId, created_at: DateTime<Utc>) -> Self {
        Self {
            session_id,
            created_at,
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
struct LogState {
    /// Buckets in creation order
    buckets: Vec<Bucket>,
    /// Session id -> position in `buckets`
    index: HashMap<SessionId, usize>,
    /// Next global sequence number
    next_seq: u64,
}

impl LogState {
    /// Find or create the bucket for `session_id`.
    fn bucket_mut(&mut self, session_id: &SessionId, now: DateTime<Utc>) -> (&mut Bucket, bool) {
        let (position, created) = match self.index.get(session_id) {
            Some(&position) => (position, false),
            None => {
                let position = self.buckets.len();
                self.buckets.push(Bucket::new(session_id.clone(), now));
                self.index.insert(session_id.clone(), position);
                (position, true)
            }
        };
        (&mut self.buckets[position], created)
    }
}

/// In-memory event log shared by every request.
pub struct EventLog {
    clock: Arc<dyn Clock>,
    state: RwLock<LogState>,
}

impl EventLog {
    /// Create an empty log stamping entries with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: RwLock::new(LogState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, LogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an entry, creating the session's bucket if needed.
    ///
    /// Never fails; the action type must already be validated.
    pub fn append(
        &self,
        session_id: &SessionId,
        action_type: ActionType,
        payload: Value,
    ) -> EventLogEntry {
        self.append_tracked(session_id, action_type, payload).entry
    }

    /// Like [`append`](Self::append), also reporting whether the bucket was
    /// created by this call.
    pub fn append_tracked(
        &self,
        session_id: &SessionId,
        action_type: ActionType,
        payload: Value,
    ) -> Appended {
        let mut state = self.write();
        let timestamp = self.clock.now();
        let seq = state.next_seq;
        state.next_seq += 1;

        let (bucket, bucket_created) = state.bucket_mut(session_id, timestamp);
        let entry = EventLogEntry {
            session_id: bucket.session_id.clone(),
            action_type,
            payload,
            timestamp,
        };
        bucket.entries.push((seq, entry.clone()));

        Appended {
            entry,
            bucket_created,
        }
    }

    /// Pre-create an empty bucket. Returns `false` if it already existed.
    pub fn open(&self, session_id: &SessionId, created_at: DateTime<Utc>) -> bool {
        let mut state = self.write();
        state.bucket_mut(session_id, created_at).1
    }

    /// Whether a bucket exists for `session_id`.
    #[must_use]
    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.read().index.contains_key(session_id)
    }

    /// Entries of one session in insertion order; empty if unknown.
    #[must_use]
    pub fn get(&self, session_id: &SessionId) -> Vec<EventLogEntry> {
        let state = self.read();
        state
            .index
            .get(session_id)
            .map(|&position| {
                state.buckets[position]
                    .entries
                    .iter()
                    .map(|(_, entry)| entry.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every entry, grouped by session in bucket creation order.
    #[must_use]
    pub fn get_all(&self) -> Vec<EventLogEntry> {
        self.read()
            .buckets
            .iter()
            .flat_map(|bucket| bucket.entries.iter().map(|(_, entry)| entry.clone()))
            .collect()
    }

    /// Every entry, interleaved in global insertion order.
    #[must_use]
    pub fn get_all_interleaved(&self) -> Vec<EventLogEntry> {
        let state = self.read();
        let mut sequenced: Vec<&(u64, EventLogEntry)> = state
            .buckets
            .iter()
            .flat_map(|bucket| bucket.entries.iter())
            .collect();
        sequenced.sort_unstable_by_key(|(seq, _)| *seq);
        sequenced.into_iter().map(|(_, entry)| entry.clone()).collect()
    }

    /// Per-session overview in bucket creation order.
    #[must_use]
    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.read()
            .buckets
            .iter()
            .map(|bucket| SessionSummary {
                session_id: bucket.session_id.clone(),
                created_at: bucket.created_at,
                event_count: bucket.entries.len(),
            })
            .collect()
    }

    /// Total number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().buckets.iter().map(|b| b.entries.len()).sum()
    }

    /// Whether no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every bucket and every entry. Irreversible.
    ///
    /// Returns the number of buckets removed.
    pub fn clear_all(&self) -> usize {
        let mut state = self.write();
        let removed = state.buckets.len();
        *state = LogState::default();
        removed
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("EventLog")
            .field("buckets", &state.buckets.len())
            .field("next_seq", &state.next_seq)
            .finish_non_exhaustive()
    }
}
