//! Instant vectors and the two algorithms everything else is built on:
//! the binary join and the grouped aggregation.

use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::label_set::{LabelSet, Signature};
use super::modifiers::{Cardinality, Grouping, JoinSpec};
use super::sample::Sample;
use super::sensapp_datetime::{SensAppDateTime, unix_milliseconds};
use super::value::Value;
use crate::error::{EvalError, MatchSide};

/// Labeled samples sharing one timestamp.
///
/// Sample order is the construction order. Duplicate label sets are
/// tolerated here; the join rejects them where they would be ambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantVector {
    #[serde(with = "unix_milliseconds")]
    time: SensAppDateTime,
    samples: Vec<Sample>,
}

impl InstantVector {
    pub fn new(time: SensAppDateTime, samples: Vec<Sample>) -> Self {
        Self { time, samples }
    }

    pub fn empty(time: SensAppDateTime) -> Self {
        Self::new(time, Vec::new())
    }

    /// Wraps raw `(labels, value)` rows, as returned by a data source, into a vector.
    pub fn from_rows<L, K, V, I>(time: SensAppDateTime, rows: I) -> Self
    where
        L: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (L, f64)>,
    {
        let samples = rows
            .into_iter()
            .map(|(labels, value)| Sample::new(LabelSet::from_pairs(labels), value))
            .collect();
        Self::new(time, samples)
    }

    pub fn time(&self) -> SensAppDateTime {
        self.time
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Same timestamp and labels, values rewritten by `operator`.
    ///
    /// `operator` returns the new value and whether the sample is kept.
    pub fn map_values<F>(&self, mut operator: F) -> InstantVector
    where
        F: FnMut(f64) -> (f64, bool),
    {
        let samples = self
            .samples
            .iter()
            .filter_map(|sample| {
                let (value, keep) = operator(sample.value);
                keep.then(|| Sample::new(sample.labels.clone(), value))
            })
            .collect();
        InstantVector::new(self.time, samples)
    }

    /// Joins `self` (left-hand side) with `right` and applies `operator` to
    /// every matched pair of values.
    ///
    /// `operator` receives `(left value, right value)` and returns the output
    /// value and whether to keep the sample. With `spec.return_bool`, the
    /// sample is always kept and its value becomes `1` or `0`.
    ///
    /// Samples without a partner on the other side are dropped. The result
    /// carries the right-hand operand's timestamp and follows the iteration
    /// order of the "many" side.
    pub fn binop<F>(
        &self,
        right: &InstantVector,
        spec: &JoinSpec,
        mut operator: F,
    ) -> Result<InstantVector, EvalError>
    where
        F: FnMut(f64, f64) -> (f64, bool),
    {
        let matching = &spec.matching;
        let one_to_one = matching.cardinality == Cardinality::OneToOne;
        // one-to-many iterates the right side and looks up the left one
        let swap = matching.cardinality == Cardinality::OneToMany;
        let (many, one, one_side) = if swap {
            (right, self, MatchSide::Left)
        } else {
            (self, right, MatchSide::Right)
        };
        let filter = matching.filter();

        let mut lookup: HashMap<Signature, &Sample> = HashMap::with_capacity(one.len());
        for sample in &one.samples {
            match lookup.entry(sample.signature(Some(filter))) {
                Entry::Occupied(_) => {
                    return Err(EvalError::DuplicateLabelSet {
                        labels: sample.labels.project(filter).into_owned(),
                        side: one_side,
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(sample);
                }
            }
        }

        let mut emitted: HashSet<Signature> = HashSet::with_capacity(many.len());
        let mut samples = Vec::with_capacity(many.len());
        let mut unmatched = 0usize;

        for sample in &many.samples {
            let signature = sample.signature(Some(filter));
            let Some(&other) = lookup.get(&signature) else {
                unmatched += 1;
                continue;
            };
            if one_to_one {
                lookup.remove(&signature);
            }

            let (lhs, rhs) = if swap {
                (other.value, sample.value)
            } else {
                (sample.value, other.value)
            };
            let (mut value, keep) = operator(lhs, rhs);
            if spec.return_bool {
                value = if keep { 1.0 } else { 0.0 };
            } else if !keep {
                continue;
            }

            let labels = if one_to_one {
                sample.labels.project(filter).into_owned()
            } else {
                sample.labels.with_included(&other.labels, &matching.include)
            };

            if !emitted.insert(labels.signature(None)) {
                return Err(EvalError::DuplicateLabelSet {
                    labels,
                    side: MatchSide::Result,
                });
            }
            samples.push(Sample::new(labels, value));
        }

        debug!(
            "Vector join: {} samples matched, {} unmatched, {} emitted",
            many.len() - unmatched,
            unmatched,
            samples.len()
        );

        Ok(InstantVector::new(right.time, samples))
    }

    /// Reduces the sample values with `operator`.
    ///
    /// Without a grouping clause every value is reduced at once and the
    /// result is a scalar. Otherwise samples are partitioned by their labels
    /// as projected by `grouping`, and the result is a vector with one
    /// sample per group, in the order groups first appear.
    pub fn aggregate<F>(&self, grouping: &Grouping, mut operator: F) -> Value
    where
        F: FnMut(&[f64]) -> f64,
    {
        if grouping.is_ungrouped() {
            let values: Vec<f64> = self.samples.iter().map(|sample| sample.value).collect();
            return Value::Scalar(operator(&values));
        }

        let filter = grouping.filter();
        let mut group_index: HashMap<Signature, usize> = HashMap::new();
        let mut groups: Vec<(LabelSet, Vec<f64>)> = Vec::new();

        for sample in &self.samples {
            let labels = sample.labels.project(filter);
            match group_index.entry(labels.signature(None)) {
                Entry::Occupied(entry) => groups[*entry.get()].1.push(sample.value),
                Entry::Vacant(entry) => {
                    entry.insert(groups.len());
                    groups.push((labels.into_owned(), vec![sample.value]));
                }
            }
        }

        trace!("Aggregation: {} samples in {} groups", self.len(), groups.len());

        let samples = groups
            .into_iter()
            .map(|(labels, values)| Sample::new(labels, operator(&values)))
            .collect();
        Value::Vector(InstantVector::new(self.time, samples))
    }
}

impl<'a> IntoIterator for &'a InstantVector {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
