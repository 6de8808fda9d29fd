use std::fmt;

use indexmap::IndexSet;

use crate::host::Value;

use super::normalize;

/// Detached, ordered set of normalized tokens, e.g. an element's `classList`.
///
/// Populated once from the host; every mutation stays local until
/// [`flush`](TokenList::flush) writes the serialized set back.
#[derive(Debug, Clone, Default)]
pub struct TokenList {
    source: Value,
    tokens: IndexSet<String>,
}

impl TokenList {
    /// Parses `value` into a list not attached to any host object.
    pub fn parse(value: &str) -> Self {
        let mut list = Self::default();
        list.add(value);
        list
    }

    /// Snapshots the `value` of a host token list.
    pub fn from_host(source: Value) -> Self {
        let mut list = Self::parse(&source.get("value").as_string());
        list.source = source;
        list
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get_index(index).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(&normalize(token))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Adds every whitespace-separated token in `tokens`. Known tokens keep their position.
    pub fn add(&mut self, tokens: &str) {
        for token in split(tokens) {
            self.tokens.insert(token);
        }
    }

    /// Removes every whitespace-separated token in `tokens`.
    pub fn remove(&mut self, tokens: &str) {
        for token in split(tokens) {
            self.tokens.shift_remove(&token);
        }
    }

    /// Removes `token` if present, adds it otherwise. Returns whether it is present now.
    pub fn toggle(&mut self, token: &str) -> bool {
        let token = normalize(token);
        if token.is_empty() {
            return false;
        }
        if self.tokens.shift_remove(&token) {
            false
        } else {
            self.tokens.insert(token);
            true
        }
    }

    /// Removes `old` then adds `new`. Returns whether `old` was present.
    pub fn replace(&mut self, old: &str, new: &str) -> bool {
        let present = self.tokens.shift_remove(&normalize(old));
        self.add(new);
        present
    }

    /// Discards the local tokens and parses `value` instead.
    pub fn set_value(&mut self, value: &str) {
        self.tokens.clear();
        self.add(value);
    }

    /// Writes the serialized tokens back to the host list.
    pub fn flush(&self) {
        if self.source.is_nullish() {
            tracing::warn!(target: "webclient::view", "token list has no host to flush to");
            return;
        }
        let value = self.to_string();
        tracing::debug!(target: "webclient::view", %value, "flushing token list");
        self.source.set("value", value);
    }
}

fn split(tokens: &str) -> impl Iterator<Item = String> + '_ {
    tokens.split_whitespace().map(normalize)
}

impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

/// Equal when they hold the same tokens, in any order.
impl PartialEq for TokenList {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}
