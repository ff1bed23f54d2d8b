//! Prop record: resolution state for one name.

use chrono::{DateTime, Utc};

use super::value::InputKey;

/// Resolution state for one tracked name.
///
/// Design:
/// - This is the single source of truth for a name's resolution state.
/// - All counter transitions happen here; callers never touch the fields.
/// - The two counters are the whole race guard: `pending_count` versions
///   attempts as they start, `resolved_count` remembers which attempt's
///   result is currently visible. A completion whose captured version is
///   behind `resolved_count` has been superseded and must be dropped.
#[derive(Debug, Clone)]
pub struct PropRecord {
    /// Fingerprint of the last raw input supplied for this name.
    /// Used only to detect no-op updates.
    last_input: Option<InputKey>,

    /// Latest value safe to expose to consumers.
    resolved_value: Option<serde_json::Value>,

    /// Number of resolution attempts started (monotonic).
    pending_count: u64,

    /// Version of the attempt currently reflected in `resolved_value`
    /// (monotonic, never above `pending_count`).
    resolved_count: u64,

    /// Timestamps for observability.
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PropRecord {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_input: None,
            resolved_value: None,
            pending_count: 0,
            resolved_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a newly supplied input.
    ///
    /// Returns false when the fingerprint matches the previous input — the
    /// caller must then treat the whole update as a no-op (no new attempt,
    /// no re-fetch, no re-watch).
    pub fn input_changed(&mut self, key: InputKey) -> bool {
        if self.last_input.as_ref() == Some(&key) {
            return false;
        }
        self.last_input = Some(key);
        true
    }

    /// Apply an immediate value: start and instantly win an attempt.
    ///
    /// Bumping both counters together supersedes every in-flight attempt —
    /// their captured versions are now behind `resolved_count`.
    pub fn apply_immediate(&mut self, value: serde_json::Value, now: DateTime<Utc>) {
        self.pending_count += 1;
        self.resolved_value = Some(value);
        self.resolved_count = self.pending_count;
        self.updated_at = now;
    }

    /// Start an asynchronous attempt; returns its captured version.
    pub fn begin_attempt(&mut self, now: DateTime<Utc>) -> u64 {
        self.pending_count += 1;
        self.updated_at = now;
        self.pending_count
    }

    /// Has this attempt been superseded by a later one's accepted result?
    ///
    /// The comparison is `<`, not `<=`: a completion at exactly the current
    /// `resolved_count` is re-applied (and re-notified) rather than treated
    /// as an error. With single-settle producers that case never arises.
    pub fn is_superseded(&self, version: u64) -> bool {
        version < self.resolved_count
    }

    /// Accept a completed attempt's value at its captured version.
    ///
    /// Caller checks `is_superseded` first.
    pub fn accept(&mut self, value: serde_json::Value, version: u64, now: DateTime<Utc>) {
        debug_assert!(version <= self.pending_count);
        debug_assert!(!self.is_superseded(version));
        self.resolved_value = Some(value);
        self.resolved_count = version;
        self.updated_at = now;
    }

    /// At least one attempt outstanding whose result has not landed.
    ///
    /// Not "any attempt ever made": a name whose every attempt settled (or
    /// was superseded by an accepted one) is not loading.
    pub fn is_loading(&self) -> bool {
        self.pending_count > 0 && self.pending_count != self.resolved_count
    }

    pub fn last_input(&self) -> Option<&InputKey> {
        self.last_input.as_ref()
    }

    pub fn resolved_value(&self) -> Option<&serde_json::Value> {
        self.resolved_value.as_ref()
    }

    pub fn pending_count(&self) -> u64 {
        self.pending_count
    }

    pub fn resolved_count(&self) -> u64 {
        self.resolved_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
