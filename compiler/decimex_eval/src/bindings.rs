//! Variable bindings supplied by the caller.

use std::collections::HashMap;

use bigdecimal::BigDecimal;

/// Read-only mapping from variable name to value.
///
/// The evaluator never writes to it; literal caching lives in the
/// per-evaluation [`TermResolver`](crate::resolver::TermResolver).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, BigDecimal>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: BigDecimal) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `name`, returning the previous value if there was one
    pub fn insert(&mut self, name: impl Into<String>, value: BigDecimal) -> Option<BigDecimal> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&BigDecimal> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names in unspecified order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl From<HashMap<String, BigDecimal>> for Bindings {
    fn from(values: HashMap<String, BigDecimal>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>> FromIterator<(K, BigDecimal)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, BigDecimal)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, BigDecimal)> for Bindings {
    fn extend<I: IntoIterator<Item = (K, BigDecimal)>>(&mut self, iter: I) {
        self.values
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}
