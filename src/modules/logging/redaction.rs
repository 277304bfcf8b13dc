//! Sensitive data redaction

use super::error::{LogError, LogResult};
use crate::modules::access_control::decode_component;
use regex::Regex;
use std::sync::Arc;

/// Text written in place of a redacted value.
pub const DEFAULT_REPLACEMENT: &str = "[REDACTED]";

/// Masks the values of named query parameters.
///
/// Names are matched against the decoded key of each `key=value` pair, the
/// same way the override check reads them, so `%69pr=...` is masked like
/// `ipr=...`.
pub struct Redactor {
    /// Parameter names being masked
    params: Vec<String>,

    /// Matches a whole decoded key; `None` when nothing is masked
    pattern: Option<Regex>,
}

impl Redactor {
    /// Create a redactor masking each of `params`.
    pub fn new<I, S>(params: I) -> LogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut params: Vec<String> = params.into_iter().map(Into::into).collect();

        if params.iter().any(String::is_empty) {
            return Err(LogError::Config("empty redaction parameter name".to_string()));
        }
        params.dedup();

        let pattern = if params.is_empty() {
            None
        } else {
            let names: Vec<String> = params.iter().map(|p| regex::escape(p)).collect();
            let source = format!("^(?:{})$", names.join("|"));
            Some(Regex::new(&source).map_err(|e| LogError::Config(e.to_string()))?)
        };

        Ok(Self { params, pattern })
    }

    /// Create a redactor that changes nothing
    pub fn disabled() -> Self {
        Self {
            params: Vec::new(),
            pattern: None,
        }
    }

    /// Check if redaction is enabled
    pub fn is_enabled(&self) -> bool {
        self.pattern.is_some()
    }

    /// Check if values under the decoded key `name` are masked
    pub fn should_redact_param(&self, name: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(name))
    }

    /// Mask masked parameters' values in a raw query string. Everything else,
    /// including separators and undecoded keys, is kept as written.
    pub fn redact_query(&self, query: &str) -> String {
        if !self.is_enabled() {
            return query.to_string();
        }

        let (prefix, body) = match query.strip_prefix('?') {
            Some(body) => ("?", body),
            None => ("", query),
        };

        let segments: Vec<String> = body
            .split('&')
            .map(|segment| {
                let key = segment.split_once('=').map_or(segment, |(key, _)| key);
                if self.should_redact_param(&decode_component(key)) {
                    format!("{key}={DEFAULT_REPLACEMENT}")
                } else {
                    segment.to_string()
                }
            })
            .collect();

        format!("{prefix}{}", segments.join("&"))
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for Redactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Redactor")
            .field("enabled", &self.is_enabled())
            .field("params", &self.params)
            .finish()
    }
}

/// Shared redactor for use across threads
pub type SharedRedactor = Arc<Redactor>;
