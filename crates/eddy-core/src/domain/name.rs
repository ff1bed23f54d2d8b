use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a tracked value ("data", "style", ...).
///
/// Names are opaque to the engine; two updates belong to the same
/// resolution history iff their names compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropName(String);

impl PropName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for PropName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PropName {
    fn from(s: String) -> Self {
        Self(s)
    }
}
