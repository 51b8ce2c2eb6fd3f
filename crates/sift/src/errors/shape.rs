//! Structural views of the error tree.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// The error tree with each atom replaced by a `T` (a code or a message).
///
/// Serializes to JSON-like data: maps as objects, lists as arrays padded
/// with `null` in the slots that succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorShape<T> {
    Leaf(T),
    Map(IndexMap<String, ErrorShape<T>>),
    List(BTreeMap<usize, ErrorShape<T>>),
}

impl<T> ErrorShape<T> {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Self> {
        match self {
            Self::List(slots) => slots.get(&index),
            _ => None,
        }
    }

    #[must_use]
    pub const fn leaf(&self) -> Option<&T> {
        match self {
            Self::Leaf(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for ErrorShape<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => value.serialize(serializer),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, shape) in entries {
                    map.serialize_entry(key, shape)?;
                }
                map.end()
            }
            Self::List(slots) => {
                let len = slots.keys().next_back().map_or(0, |last| last + 1);
                let mut seq = serializer.serialize_seq(Some(len))?;
                for index in 0..len {
                    seq.serialize_element(&slots.get(&index))?;
                }
                seq.end()
            }
        }
    }
}
