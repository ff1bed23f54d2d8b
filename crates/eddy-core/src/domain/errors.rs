use thiserror::Error;

/// Error produced by a failed resolution attempt.
///
/// A failed attempt is reported once through the `ErrorSink` port and then
/// forgotten: the record keeps its last good state, and no retry is
/// scheduled.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("fetch failed for {identifier}: {message}")]
    Fetch { identifier: String, message: String },

    #[error("producer failed: {0}")]
    Producer(String),

    #[error("{0}")]
    Other(String),
}

impl ResolveError {
    /// Fetch failure for an identifier (URL など).
    pub fn fetch(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            identifier: identifier.into(),
            message: message.into(),
        }
    }
}
