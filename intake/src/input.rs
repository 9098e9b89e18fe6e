//! The normalized key → value(s) shape every flat format is reduced to.

use alloc::{string::String, vec, vec::Vec};

use indexmap::IndexMap;

/// The value(s) recorded under one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// The key appeared once.
    Single(String),
    /// The key appeared several times, in input order.
    Many(Vec<String>),
}

impl RawValue {
    /// The first value.
    pub fn first(&self) -> &str {
        match self {
            RawValue::Single(value) => value,
            RawValue::Many(values) => values.first().map(String::as_str).unwrap_or_default(),
        }
    }

    /// Whether this counts as absent: a single empty string.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Single(value) if value.is_empty())
    }

    fn push(&mut self, value: String) {
        match self {
            RawValue::Single(first) => {
                let first = core::mem::take(first);
                *self = RawValue::Many(vec![first, value]);
            }
            RawValue::Many(values) => values.push(value),
        }
    }
}

/// Flat, multi-valued form input.
///
/// Built from URL-encoded text, from `(key, value)` pairs (e.g. multipart
/// fields parsed by the caller), or from a multimap.
///
/// ```
/// use intake::{FormInput, RawValue};
///
/// let input = FormInput::parse("ints=1&ints=2&name=Ada");
/// assert_eq!(input.get("name"), Some(&RawValue::Single("Ada".into())));
/// assert_eq!(
///     input.get("ints"),
///     Some(&RawValue::Many(vec!["1".into(), "2".into()]))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    entries: IndexMap<String, RawValue>,
}

impl FormInput {
    /// Creates empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `application/x-www-form-urlencoded` text (also the query
    /// string grammar): `+` is a space and percent-escapes are decoded.
    pub fn parse(encoded: &str) -> Self {
        Self::parse_bytes(encoded.as_bytes())
    }

    /// Like [`parse`](Self::parse), for raw bytes. Invalid UTF-8 is replaced.
    pub fn parse_bytes(encoded: &[u8]) -> Self {
        form_urlencoded::parse(encoded)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Appends a value under `key`, promoting the entry to multi-valued if
    /// the key is already present.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.entries.entry(key.into()) {
            indexmap::map::Entry::Occupied(mut entry) => entry.get_mut().push(value),
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(RawValue::Single(value));
            }
        }
    }

    /// Replaces whatever is stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        self.entries.insert(key.into(), value);
    }

    /// Builds input from a multimap such as `HashMap<String, Vec<String>>`.
    /// Keys with a single value collapse to [`RawValue::Single`]; keys with
    /// no values are dropped.
    pub fn from_multimap<I, K, V>(map: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = String>,
    {
        let mut input = Self::new();
        for (key, values) in map {
            let mut values: Vec<String> = values.into_iter().collect();
            let value = match values.len() {
                0 => continue,
                1 => RawValue::Single(values.remove(0)),
                _ => RawValue::Many(values),
            };
            input.insert(key, value);
        }
        input
    }

    /// Looks up the value(s) for `key`.
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no keys at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for FormInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = Self::new();
        for (key, value) in iter {
            input.append(key, value);
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_become_many_in_order() {
        let input: FormInput = [("a", "1"), ("b", "x"), ("a", "2"), ("a", "3")]
            .into_iter()
            .collect();
        assert_eq!(
            input.get("a"),
            Some(&RawValue::Many(vec!["1".into(), "2".into(), "3".into()]))
        );
        assert_eq!(input.get("b"), Some(&RawValue::Single("x".into())));
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn parse_decodes_escapes() {
        let input = FormInput::parse("q=hello+world&tag=%23rust&empty=");
        assert_eq!(input.get("q").map(RawValue::first), Some("hello world"));
        assert_eq!(input.get("tag").map(RawValue::first), Some("#rust"));
        assert!(input.get("empty").is_some_and(RawValue::is_blank));
        assert!(input.get("missing").is_none());
    }

    #[test]
    fn multimap_collapses_single_values() {
        let input = FormInput::from_multimap([
            ("one", vec!["1".to_string()]),
            ("two", vec!["a".to_string(), "b".to_string()]),
            ("none", vec![]),
        ]);
        assert_eq!(input.get("one"), Some(&RawValue::Single("1".into())));
        assert_eq!(
            input.get("two"),
            Some(&RawValue::Many(vec!["a".into(), "b".into()]))
        );
        assert!(input.get("none").is_none());
    }

    #[test]
    fn blank_only_applies_to_single_empty() {
        assert!(RawValue::Single(String::new()).is_blank());
        assert!(!RawValue::Many(vec![String::new(), String::new()]).is_blank());
        assert!(!RawValue::Single(" ".into()).is_blank());
    }
}
