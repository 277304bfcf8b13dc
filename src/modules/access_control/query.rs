//! Query string parsing for the override check.

use std::borrow::Cow;

/// Lookup result for a single query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamLookup<'a> {
    /// Not present, or present with an empty value.
    Absent,
    /// Present exactly once with a non-empty value.
    Single(&'a str),
    /// Present more than once.
    Repeated,
}

/// Decoded `key=value` pairs of a raw query string, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string. A leading `?` is ignored, `+` decodes to a
    /// space and percent escapes are decoded in keys and values. A key
    /// without `=` has an empty value. Invalid escapes are kept literally.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);

        let pairs = raw
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();

        Self { pairs }
    }

    /// All values for `key`, in order of appearance.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up `key`, distinguishing absent, single and repeated occurrences.
    #[must_use]
    pub fn lookup<'a>(&'a self, key: &'a str) -> ParamLookup<'a> {
        let mut values = self.values(key);
        match (values.next(), values.next()) {
            (None, _) => ParamLookup::Absent,
            (Some(_), Some(_)) => ParamLookup::Repeated,
            (Some(""), None) => ParamLookup::Absent,
            (Some(value), None) => ParamLookup::Single(value),
        }
    }

    /// Number of parsed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pairs were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Decode one query key or value: `+` is a space, percent escapes are decoded,
/// and an invalid escape sequence is kept literally.
pub fn decode_component(component: &str) -> String {
    let spaced: Cow<'_, str> = if component.contains('+') {
        Cow::Owned(component.replace('+', " "))
    } else {
        Cow::Borrowed(component)
    };

    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced.into_owned(),
    }
}
