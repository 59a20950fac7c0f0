//! Label string parsing.
//!
//! A label string is a comma-separated list of `key=value` pairs, for example
//! `team=data,run=nightly`. The grammar is deliberately small:
//!
//! - pairs are separated by `,` and no pair may be empty
//! - each pair contains exactly one `=`; the key before it must be non-empty
//! - the value may be empty (`name=`) and is kept literally, quotes included
//!
//! Values cannot contain commas or `=`; there is no escaping.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single `key=value` annotation attached to a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Text before the `=`; never empty
    pub key: String,
    /// Text after the `=`, kept verbatim; may be empty
    pub value: String,
}

impl Label {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Borrow the label as a `(key, value)` pair.
    #[must_use]
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.key, &self.value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl From<Label> for (String, String) {
    fn from(label: Label) -> Self {
        (label.key, label.value)
    }
}

/// Why a label string was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("label #{0} is empty")]
    EmptyPair(usize),

    #[error("label '{0}' is missing a '=' separator")]
    MissingSeparator(String),

    #[error("label '{0}' has an empty key")]
    EmptyKey(String),

    #[error("label '{0}' contains more than one '='")]
    ExtraSeparator(String),
}

#[derive(Debug, Clone, Copy)]
enum State {
    /// Scanning the key; no `=` seen in this pair yet.
    Key,
    /// Scanning the value; `separator` is the byte offset of `=` within the pair.
    Value { separator: usize },
}

/// Parse a label string into ordered `(key, value)` labels.
pub fn get_labels(raw: &str) -> Result<Vec<Label>, LabelError> {
    let mut labels = Vec::new();
    let mut state = State::Key;
    let mut pair_start = 0;

    for (idx, ch) in raw.char_indices() {
        match (state, ch) {
            (_, ',') => {
                labels.push(finish_pair(&raw[pair_start..idx], state, labels.len())?);
                pair_start = idx + 1;
                state = State::Key;
            }
            (State::Key, '=') => {
                state = State::Value {
                    separator: idx - pair_start,
                };
            }
            (State::Value { .. }, '=') => {
                let rest = &raw[pair_start..];
                let pair = rest.split(',').next().unwrap_or(rest);
                return Err(LabelError::ExtraSeparator(pair.to_string()));
            }
            _ => {}
        }
    }

    labels.push(finish_pair(&raw[pair_start..], state, labels.len())?);
    Ok(labels)
}

fn finish_pair(pair: &str, state: State, index: usize) -> Result<Label, LabelError> {
    if pair.is_empty() {
        return Err(LabelError::EmptyPair(index));
    }
    match state {
        State::Key => Err(LabelError::MissingSeparator(pair.to_string())),
        State::Value { separator } => {
            let key = &pair[..separator];
            if key.is_empty() {
                return Err(LabelError::EmptyKey(pair.to_string()));
            }
            Ok(Label::new(key, &pair[separator + 1..]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &str) -> Vec<(String, String)> {
        get_labels(raw)
            .unwrap()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    fn owned(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_get_labels() {
        assert_eq!(pairs("key=value"), owned(&[("key", "value")]));
        assert_eq!(
            pairs("key1=value1,key2=value2"),
            owned(&[("key1", "value1"), ("key2", "value2")])
        );
        assert_eq!(
            pairs("key='longer value',key1='hyphen-value'"),
            owned(&[("key", "'longer value'"), ("key1", "'hyphen-value'")])
        );
        assert_eq!(pairs("name="), owned(&[("name", "")]));
    }

    #[test]
    fn test_get_labels_err() {
        for input in ["key==value", "key1=value1,badkey", "key", ",", "key=value,key", "key:value"] {
            assert!(get_labels(input).is_err(), "expected '{input}' to be rejected");
        }
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            get_labels("key==value"),
            Err(LabelError::ExtraSeparator("key==value".to_string()))
        );
        assert_eq!(
            get_labels("a=1,b=2=3,c=4"),
            Err(LabelError::ExtraSeparator("b=2=3".to_string()))
        );
        assert_eq!(
            get_labels("key1=value1,badkey"),
            Err(LabelError::MissingSeparator("badkey".to_string()))
        );
        assert_eq!(get_labels(","), Err(LabelError::EmptyPair(0)));
        assert_eq!(get_labels("a=1,,b=2"), Err(LabelError::EmptyPair(1)));
        assert_eq!(get_labels("a=1,"), Err(LabelError::EmptyPair(1)));
        assert_eq!(get_labels(""), Err(LabelError::EmptyPair(0)));
        assert_eq!(
            get_labels("=value"),
            Err(LabelError::EmptyKey("=value".to_string()))
        );
    }

    #[test]
    fn test_multibyte_values_preserved() {
        let labels = get_labels("owner=José,région=île").unwrap();
        assert_eq!(labels[0].as_pair(), ("owner", "José"));
        assert_eq!(labels[1].as_pair(), ("région", "île"));
        assert_eq!(labels[1].to_string(), "région=île");
    }
}
