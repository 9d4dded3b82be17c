//! Label sets and their signatures.
//!
//! A [`LabelSet`] identifies a time series. Its pairs are kept sorted by
//! label name, so two label sets with the same content are equal no matter
//! the order their labels were given in, and signatures can be built with a
//! single linear pass.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;

pub type LabelPairs = SmallVec<[(String, String); 8]>;

/// Which labels take part in a comparison.
///
/// With `on`, only the listed labels are kept. Without it, the listed labels
/// are dropped and everything else is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelFilter<'a> {
    pub labels: &'a [String],
    pub on: bool,
}

impl<'a> LabelFilter<'a> {
    pub fn on(labels: &'a [String]) -> Self {
        Self { labels, on: true }
    }

    pub fn ignoring(labels: &'a [String]) -> Self {
        Self { labels, on: false }
    }

    /// A filter that keeps every label.
    pub fn is_noop(&self) -> bool {
        !self.on && self.labels.is_empty()
    }

    #[inline]
    pub fn keeps(&self, name: &str) -> bool {
        let listed = self.labels.iter().any(|label| label == name);
        listed == self.on
    }
}

/// Canonical identifier of a (possibly filtered) label set.
///
/// Labels are walked in name order and each name and value is written as
/// `{byte length}:{text}`, so no label content can be mistaken for a
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LabelSet {
    labels: LabelPairs,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a label set from any pairs. When a name appears twice, the last
    /// value wins.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut labels_builder = BTreeMap::new();
        for (key, value) in pairs {
            labels_builder.insert(key.into(), value.into());
        }
        Self::from(labels_builder)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.labels
            .binary_search_by(|(key, _)| key.as_str().cmp(name))
            .ok()
            .map(|index| self.labels[index].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Signature over the labels kept by `filter`, or over every label when
    /// no filter is given.
    pub fn signature(&self, filter: Option<LabelFilter<'_>>) -> Signature {
        let mut signature = String::new();
        for (key, value) in &self.labels {
            if filter.is_some_and(|filter| !filter.keeps(key)) {
                continue;
            }
            push_length_prefixed(&mut signature, key);
            push_length_prefixed(&mut signature, value);
        }
        Signature(signature)
    }

    /// Restricts the label set to what `filter` keeps.
    pub fn project(&self, filter: LabelFilter<'_>) -> Cow<'_, LabelSet> {
        if filter.is_noop() {
            return Cow::Borrowed(self);
        }
        Cow::Owned(Self {
            labels: self
                .labels
                .iter()
                .filter(|(key, _)| filter.keeps(key))
                .cloned()
                .collect(),
        })
    }

    /// Copies the `names` labels found on `other` into this label set,
    /// replacing any existing value. Names missing from `other` are left
    /// untouched.
    pub fn with_included(&self, other: &LabelSet, names: &[String]) -> LabelSet {
        if names.is_empty() {
            return self.clone();
        }
        let mut labels_builder: BTreeMap<String, String> = self
            .labels
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        for name in names {
            if let Some(value) = other.get(name) {
                labels_builder.insert(name.clone(), value.to_string());
            }
        }
        Self::from(labels_builder)
    }
}

fn push_length_prefixed(signature: &mut String, text: &str) {
    // writing into a String cannot fail
    let _ = write!(signature, "{}:", text.len());
    signature.push_str(text);
}

impl From<BTreeMap<String, String>> for LabelSet {
    fn from(labels: BTreeMap<String, String>) -> Self {
        Self {
            labels: labels.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (key, value)) in self.labels.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={:?}", key, value)?;
        }
        f.write_str("}")
    }
}

impl Serialize for LabelSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.labels.len()))?;
        for (key, value) in &self.labels {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        BTreeMap::<String, String>::deserialize(deserializer).map(Self::from)
    }
}
