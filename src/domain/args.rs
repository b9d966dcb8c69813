//! Argument collections: the ordered map fed to `join_args` and the parsed
//! argv snapshot produced by an [`ArgParser`](crate::infrastructure::traits::ArgParser).

use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use crate::domain::value::ArgValue;

/// Insertion-ordered mapping from key to an optional value.
///
/// `None` marks an entry that is intentionally skipped on serialization.
/// Re-inserting a key replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgsMap {
    entries: Vec<(String, Option<ArgValue>)>,
}

impl ArgsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<ArgValue>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style insert of a present value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Builder-style insert of an absent value.
    pub fn without(mut self, key: impl Into<String>) -> Self {
        self.insert(key, None);
        self
    }

    /// Build from `KEY=VALUE` pairs; `KEY` alone is a `true` flag.
    ///
    /// Values are typed with [`ArgValue::infer`], except that `KEY=` is the
    /// empty string. Only the first `=` separates key from value.
    pub fn from_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<Self, DomainError> {
        let mut map = ArgsMap::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = match pair.split_once('=') {
                Some((key, "")) => (key, ArgValue::Str(String::new())),
                Some((key, raw)) => (key, ArgValue::infer(raw)),
                None => (pair, ArgValue::Bool(true)),
            };
            if key.is_empty() {
                return Err(DomainError::InvalidKey(pair.to_string()));
            }
            map.insert(key, Some(value));
        }
        Ok(map)
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ArgValue>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<ArgValue>)> for ArgsMap {
    fn from_iter<I: IntoIterator<Item = (K, Option<ArgValue>)>>(iter: I) -> Self {
        let mut map = ArgsMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Parsed command-line arguments, keyed exactly as given (dash-cased).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    values: BTreeMap<String, ArgValue>,
    positionals: Vec<String>,
}

impl ParsedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`; a repeated key keeps the last value.
    pub fn set(&mut self, key: impl Into<String>, value: ArgValue) {
        self.values.insert(key.into(), value);
    }

    pub fn push_positional(&mut self, arg: impl Into<String>) {
        self.positionals.push(arg.into());
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.values.get(key)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn values(&self) -> &BTreeMap<String, ArgValue> {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.positionals.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ArgValue)> for ParsedArgs {
    fn from_iter<I: IntoIterator<Item = (K, ArgValue)>>(iter: I) -> Self {
        let mut parsed = ParsedArgs::new();
        for (k, v) in iter {
            parsed.set(k, v);
        }
        parsed
    }
}
