//! Logical flag keys and their environment variable spellings
//!
//! A key like `foo-bar` is looked up as:
//! - `DETOX_FOO_BAR` (snake, prefixed)
//! - `fooBar` (legacy camel, unprefixed)
//! - `foo-bar` (argument key, unchanged)

use std::fmt;

/// Dash-cased logical key, e.g. `device-name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(String);

impl Key {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key into words.
    ///
    /// Splits on any non-alphanumeric character, at lower-to-upper
    /// transitions, before the last capital of an acronym followed by a
    /// lowercase letter, and between letters and digits.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::new();
        for segment in self.0.split(|c: char| !c.is_alphanumeric()) {
            split_segment(segment, &mut words);
        }
        words
    }

    /// Prefixed upper snake form: `foo-bar` -> `DETOX_FOO_BAR`.
    ///
    /// An empty prefix yields the bare upper snake form, a key with no words
    /// yields the bare prefix.
    pub fn to_snake_env(&self, prefix: &str) -> String {
        let snake = self
            .words()
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("_");
        if prefix.is_empty() || snake.is_empty() {
            format!("{}{}", prefix, snake)
        } else {
            format!("{}_{}", prefix, snake)
        }
    }

    /// Legacy camel form: `foo-bar` -> `fooBar`.
    pub fn to_camel_env(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        for (i, word) in self.words().iter().enumerate() {
            let lower = word.to_lowercase();
            if i == 0 {
                out.push_str(&lower);
                continue;
            }
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        out
    }
}

fn split_segment(segment: &str, words: &mut Vec<String>) {
    let chars: Vec<char> = segment.chars().collect();
    let mut start = 0;
    for i in 1..chars.len() {
        let (prev, cur) = (chars[i - 1], chars[i]);
        let next = chars.get(i + 1).copied();
        let boundary = (prev.is_lowercase() && cur.is_uppercase())
            || (prev.is_uppercase()
                && cur.is_uppercase()
                && next.is_some_and(|n| n.is_lowercase()))
            || (prev.is_alphabetic() && cur.is_numeric())
            || (prev.is_numeric() && cur.is_alphabetic());
        if boundary {
            words.push(chars[start..i].iter().collect());
            start = i;
        }
    }
    if start < chars.len() {
        words.push(chars[start..].iter().collect());
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
