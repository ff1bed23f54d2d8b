//! Resolver - the resolution state machine.
//!
//! Classifies each incoming (name, input) pair and drives the record
//! through the protocol:
//!
//! - Immediate: stored synchronously, wins instantly.
//! - Identifier: converted to a producer via the Fetcher port, then watched.
//! - Producer: watched directly.
//!
//! Watching bumps `pending_count` and captures that number as the attempt's
//! version; the completion is accepted only if its version has not been
//! passed by `resolved_count`. That comparison is the entire race guard —
//! no lock is held across a producer's lifetime, so a slow stale attempt
//! can keep running and its result is simply discarded on arrival.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{PropInput, PropName, ValueProducer};
use crate::ports::{Clock, ErrorSink, Fetcher, Notifier, Transform};
use crate::store::PropRecordStore;

use super::status::{PropCounts, PropStatus};

/// Resolver owns the record store and the collaborator ports.
///
/// Mutation (update / completion) is serialized by one lock around the
/// store, taken only for the synchronous span of a transition and released
/// before any notification. Producers settle on spawned tasks at arbitrary
/// later points; ordering between completions is absorbed by the version
/// counters, never by holding the lock.
pub struct Resolver {
    store: Arc<Mutex<PropRecordStore>>,
    fetcher: Arc<dyn Fetcher>,
    notifier: Arc<dyn Notifier>,
    error_sink: Arc<dyn ErrorSink>,
    transform: Arc<dyn Transform>,
    clock: Arc<dyn Clock>,
    /// Names `update_all` is allowed to touch (explicit configuration; the
    /// original hardcoded this set).
    tracked: HashSet<PropName>,
}

impl Resolver {
    pub(crate) fn assemble(
        fetcher: Arc<dyn Fetcher>,
        notifier: Arc<dyn Notifier>,
        error_sink: Arc<dyn ErrorSink>,
        transform: Arc<dyn Transform>,
        clock: Arc<dyn Clock>,
        tracked: HashSet<PropName>,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(PropRecordStore::new(Arc::clone(&clock)))),
            fetcher,
            notifier,
            error_sink,
            transform,
            clock,
            tracked,
        }
    }

    /// Supply a new input value for `name`.
    ///
    /// Returns after the record transition; an asynchronous attempt's
    /// eventual side effect (Notifier / ErrorSink) happens on a later turn.
    pub async fn update(&self, name: PropName, input: PropInput) {
        let mut store = self.store.lock().await;

        // 入力の等価判定はここだけ。同じ入力の再供給は何もしない。
        if !store.get_or_create(&name).input_changed(input.key()) {
            return;
        }

        match input {
            PropInput::Immediate(value) => {
                // Immediate は即座に勝つ。両カウンタを揃えることで、
                // 飛行中の attempt は全て superseded になる。
                store
                    .get_or_create(&name)
                    .apply_immediate(value, self.clock.now());
            }
            PropInput::Identifier(identifier) => {
                // interpret the string via the Fetcher, then watch the result
                let producer = self.producer_for(identifier);
                self.watch(&mut store, name, producer);
            }
            PropInput::Producer(producer) => {
                self.watch(&mut store, name, producer);
            }
        }
    }

    /// Batch update: applies `update` to each entry whose name is tracked.
    ///
    /// Untracked entries are skipped — which names participate in async
    /// resolution is caller configuration (`ResolverBuilder::track`).
    /// Direct `update` calls are not filtered.
    pub async fn update_all(&self, inputs: impl IntoIterator<Item = (PropName, PropInput)>) {
        for (name, input) in inputs {
            if !self.tracked.contains(&name) {
                continue;
            }
            self.update(name, input).await;
        }
    }

    /// Build a producer that drives the Fetcher for `identifier`.
    fn producer_for(&self, identifier: String) -> ValueProducer {
        let fetcher = Arc::clone(&self.fetcher);
        ValueProducer::new(async move { fetcher.fetch(&identifier).await })
    }

    /// Start one attempt for `producer` and drive it in the background.
    fn watch(&self, store: &mut PropRecordStore, name: PropName, producer: ValueProducer) {
        let version = store.get_or_create(&name).begin_attempt(self.clock.now());

        let store = Arc::clone(&self.store);
        let notifier = Arc::clone(&self.notifier);
        let error_sink = Arc::clone(&self.error_sink);
        let transform = Arc::clone(&self.transform);
        let clock = Arc::clone(&self.clock);

        tokio::spawn(async move {
            match producer.settle().await {
                Ok(data) => {
                    Self::complete(store, notifier, transform, clock, name, data, version).await;
                }
                Err(error) => {
                    // 失敗はレコードを触らない。報告のみ、リトライなし。
                    error_sink.on_error(&name, &error).await;
                }
            }
        });
    }

    /// Apply one successful completion at its captured version.
    async fn complete(
        store: Arc<Mutex<PropRecordStore>>,
        notifier: Arc<dyn Notifier>,
        transform: Arc<dyn Transform>,
        clock: Arc<dyn Clock>,
        name: PropName,
        data: serde_json::Value,
        version: u64,
    ) {
        let value = {
            let mut store = store.lock().await;
            let Some(record) = store.get_mut(&name) else {
                return;
            };
            if record.is_superseded(version) {
                // stale completion: a later attempt's result already landed.
                // Expected race outcome, dropped without a trace.
                return;
            }
            let value = transform.post_process(&name, data);
            record.accept(value.clone(), version, clock.now());
            value
        }; // lock released here

        // Notify outside the lock: a re-entrant update() from the callback
        // is then just another serialized update.
        notifier.on_resolved(&name, &value).await;
    }

    /// At least one attempt outstanding for `name` whose result has not
    /// landed. False for names never updated.
    pub async fn is_loading(&self, name: &PropName) -> bool {
        self.store
            .lock()
            .await
            .get(name)
            .is_some_and(|record| record.is_loading())
    }

    /// Latest resolved value for `name`, if any.
    pub async fn resolved_value(&self, name: &PropName) -> Option<serde_json::Value> {
        self.store.lock().await.resolved_value_of(name).cloned()
    }

    /// Has `name` ever been supplied to this resolver?
    pub async fn has_override(&self, name: &PropName) -> bool {
        self.store.lock().await.has(name)
    }

    pub fn is_tracked(&self, name: &PropName) -> bool {
        self.tracked.contains(name)
    }

    pub async fn counts(&self) -> PropCounts {
        self.store.lock().await.counts()
    }

    pub async fn statuses(&self) -> Vec<PropStatus> {
        self.store.lock().await.statuses()
    }
}
