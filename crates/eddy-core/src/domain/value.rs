//! Input values and asynchronous producers.
//!
//! An update supplies one of three kinds of input for a name:
//! - **Immediate**: a concrete value, usable as-is.
//! - **Identifier**: a string the `Fetcher` port turns into a producer.
//! - **Producer**: an already-asynchronous value, settled later.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::errors::ResolveError;

/// Identity of a producer handle.
///
/// ULID ベース（timestamp + 乱数）。2 つのハンドルが同じ ID を持つことは
/// ないので、`InputKey::Producer` の比較は参照同一性の代わりになる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProducerId(Ulid);

impl ProducerId {
    /// Mint a fresh id.
    pub fn fresh() -> Self {
        let timestamp_ms = Utc::now().timestamp_millis() as u64;
        Self(Ulid::from_parts(timestamp_ms, rand::random()))
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "producer-{}", self.0)
    }
}

type ProducerFuture =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, ResolveError>> + Send + 'static>>;

/// A single-shot asynchronous value.
///
/// Contract (precondition on whoever builds one):
/// - settles exactly once, with a payload or an error;
/// - may never settle — the record then just stays loading.
///
/// Consuming `settle()` enforces the single shot on this side; a handle
/// cannot be awaited twice.
pub struct ValueProducer {
    id: ProducerId,
    future: ProducerFuture,
}

impl ValueProducer {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<serde_json::Value, ResolveError>> + Send + 'static,
    {
        Self {
            id: ProducerId::fresh(),
            future: Box::pin(future),
        }
    }

    pub fn id(&self) -> ProducerId {
        self.id
    }

    /// Drive the producer to its single settlement.
    pub async fn settle(self) -> Result<serde_json::Value, ResolveError> {
        self.future.await
    }
}

impl fmt::Debug for ValueProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueProducer")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// One input supplied by the caller for a name.
#[derive(Debug)]
pub enum PropInput {
    /// Concrete, already-available value.
    Immediate(serde_json::Value),

    /// String to be converted into a producer via the Fetcher port.
    Identifier(String),

    /// Value that becomes available later.
    Producer(ValueProducer),
}

impl PropInput {
    /// Fingerprint used for the no-op check.
    ///
    /// Immediate values compare structurally, identifiers as strings, and
    /// producers by handle identity — the original compared raw inputs with
    /// reference equality, so a re-supplied identical promise was a no-op
    /// while a fresh promise never was.
    pub fn key(&self) -> InputKey {
        match self {
            PropInput::Immediate(value) => InputKey::Immediate(value.clone()),
            PropInput::Identifier(identifier) => InputKey::Identifier(identifier.clone()),
            PropInput::Producer(producer) => InputKey::Producer(producer.id()),
        }
    }
}

/// Fingerprint of an input, kept on the record to detect no-op updates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKey {
    Immediate(serde_json::Value),
    Identifier(String),
    Producer(ProducerId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_keys_compare_structurally() {
        let a = PropInput::Immediate(serde_json::json!({ "n": 1 }));
        let b = PropInput::Immediate(serde_json::json!({ "n": 1 }));
        let c = PropInput::Immediate(serde_json::json!({ "n": 2 }));

        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn identifier_keys_compare_as_strings() {
        let a = PropInput::Identifier("http://x/a.json".to_string());
        let b = PropInput::Identifier("http://x/a.json".to_string());
        let c = PropInput::Identifier("http://x/b.json".to_string());

        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn distinct_producers_never_compare_equal() {
        let a = ValueProducer::new(async { Ok(serde_json::json!(1)) });
        let b = ValueProducer::new(async { Ok(serde_json::json!(1)) });

        // 同じ payload でもハンドルが違えば別物
        assert_ne!(
            PropInput::Producer(a).key(),
            PropInput::Producer(b).key()
        );
    }

    #[test]
    fn kinds_never_compare_equal_across_variants() {
        let immediate = PropInput::Immediate(serde_json::json!("http://x/a.json"));
        let identifier = PropInput::Identifier("http://x/a.json".to_string());

        assert_ne!(immediate.key(), identifier.key());
    }

    #[tokio::test]
    async fn producer_settles_with_its_payload() {
        let producer = ValueProducer::new(async { Ok(serde_json::json!({ "n": 7 })) });
        let value = producer.settle().await.unwrap();
        assert_eq!(value, serde_json::json!({ "n": 7 }));
    }
}
