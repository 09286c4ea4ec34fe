//! Key namespacing

use crate::constants::{LOCK_KEY_SUFFIX, NAMESPACE_SEPARATOR};
use serde::{Deserialize, Serialize};

/// Prefix applied to every key issued by one engine
///
/// A namespace `"herd"` yields the prefix `"herd:"`. An empty namespace
/// yields an empty prefix, so logical keys are used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyNamespace {
    prefix: String,
}

impl KeyNamespace {
    /// Create a namespace; the separator is appended unless `namespace` is empty
    pub fn new<S: AsRef<str>>(namespace: S) -> Self {
        let namespace = namespace.as_ref();
        let prefix = if namespace.is_empty() {
            String::new()
        } else {
            format!("{namespace}{NAMESPACE_SEPARATOR}")
        };
        Self { prefix }
    }

    /// Create a namespace from a raw prefix, used exactly as given
    pub fn from_prefix<S: Into<String>>(prefix: S) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The raw prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full backend key for a logical key
    pub fn full_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    /// Lock key guarding the population of a logical key
    pub fn lock_key(&self, key: &str) -> String {
        format!("{}{key}{LOCK_KEY_SUFFIX}", self.prefix)
    }

    /// Backend scan pattern for a logical pattern
    ///
    /// Glob metacharacters in the prefix are escaped, so the scan never
    /// leaves the namespace.
    pub fn pattern(&self, pattern: &str) -> String {
        let mut escaped = String::with_capacity(self.prefix.len() + pattern.len());
        for c in self.prefix.chars() {
            if matches!(c, '*' | '?' | '[' | ']' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push_str(pattern);
        escaped
    }

    /// Strip the prefix from a full key, if it carries it
    pub fn logical_key<'a>(&self, full_key: &'a str) -> Option<&'a str> {
        full_key.strip_prefix(self.prefix.as_str())
    }
}
