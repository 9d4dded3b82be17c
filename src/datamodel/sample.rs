use serde::{Deserialize, Serialize};

use super::label_set::{LabelFilter, LabelSet, Signature};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub labels: LabelSet,
    pub value: f64,
}

impl Sample {
    pub fn new(labels: LabelSet, value: f64) -> Self {
        Self { labels, value }
    }

    pub fn signature(&self, filter: Option<LabelFilter<'_>>) -> Signature {
        self.labels.signature(filter)
    }

    /// Same value, labels restricted to what `filter` keeps.
    pub fn project(&self, filter: LabelFilter<'_>) -> Sample {
        if filter.is_noop() {
            return self.clone();
        }
        Self {
            labels: self.labels.project(filter).into_owned(),
            value: self.value,
        }
    }
}
