//! Minimal query-string assembly for deep links.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped in a query value: everything but unreserved characters, `,` and `:`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b',')
    .remove(b':');

/// Percent-encode a query value.
#[must_use]
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Builds `base?key=value&...`, skipping empty values.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base: String,
    pairs: Vec<(&'static str, String)>,
}

impl QueryBuilder {
    /// Start a link at `base`.
    #[must_use]
    pub fn new<S: Into<String>>(base: S) -> Self {
        Self {
            base: base.into(),
            pairs: Vec::new(),
        }
    }

    /// Append a parameter unless `value` is empty.
    #[must_use]
    pub fn param<V: ToString>(mut self, key: &'static str, value: V) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key, value));
        }
        self
    }

    /// Append a parameter when `value` is present and non-empty.
    #[must_use]
    pub fn param_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Render the link.
    #[must_use]
    pub fn build(self) -> String {
        if self.pairs.is_empty() {
            return self.base;
        }
        let query = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", encode_component(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.base)
    }
}
