//! Vector matching and grouping modifiers.
//!
//! Modifiers are plain values. They are built next to an operand while the
//! expression tree is walked, then handed to [`InstantVector::binop`] or
//! [`InstantVector::aggregate`]. Vectors never carry them, so reusing a
//! vector in two places cannot leak one expression's modifiers into another.
//!
//! [`InstantVector::binop`]: super::InstantVector::binop
//! [`InstantVector::aggregate`]: super::InstantVector::aggregate

use super::label_set::LabelFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cardinality {
    #[default]
    OneToOne,
    ManyToOne,
    OneToMany,
}

/// How two vectors pair their samples in a binary operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorMatching {
    pub cardinality: Cardinality,
    pub matching_labels: Vec<String>,
    pub on: bool,
    /// Labels copied from the "one" side on many-to-one and one-to-many matches.
    pub include: Vec<String>,
}

impl VectorMatching {
    pub fn filter(&self) -> LabelFilter<'_> {
        LabelFilter {
            labels: &self.matching_labels,
            on: self.on,
        }
    }
}

/// The `by`/`without` clause of an aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    pub labels: Vec<String>,
    pub without: bool,
}

impl Grouping {
    pub fn by(labels: Vec<String>) -> Self {
        Self {
            labels,
            without: false,
        }
    }

    pub fn without(labels: Vec<String>) -> Self {
        Self {
            labels,
            without: true,
        }
    }

    /// No clause at all: the aggregation collapses into a scalar.
    pub fn is_ungrouped(&self) -> bool {
        self.labels.is_empty() && !self.without
    }

    pub fn filter(&self) -> LabelFilter<'_> {
        LabelFilter {
            labels: &self.labels,
            on: !self.without,
        }
    }
}

/// Everything [`InstantVector::binop`](super::InstantVector::binop) needs to join two vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinSpec {
    pub matching: VectorMatching,
    /// Emit `1`/`0` instead of filtering samples out.
    pub return_bool: bool,
}

/// Modifiers collected for one operand.
///
/// Each setter consumes the value and returns the updated one, so they chain
/// the same way the modifier keywords nest in an expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    matching: VectorMatching,
    grouping: Grouping,
    return_bool: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matching.matching_labels = labels.into_iter().map(Into::into).collect();
        self.matching.on = true;
        self
    }

    pub fn ignoring<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matching.matching_labels = labels.into_iter().map(Into::into).collect();
        self.matching.on = false;
        self
    }

    pub fn by<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grouping = Grouping::by(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn without<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grouping = Grouping::without(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn group_left<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matching.include = labels.into_iter().map(Into::into).collect();
        self.matching.cardinality = Cardinality::ManyToOne;
        self
    }

    pub fn group_right<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matching.include = labels.into_iter().map(Into::into).collect();
        self.matching.cardinality = Cardinality::OneToMany;
        self
    }

    pub fn bool(mut self) -> Self {
        self.return_bool = true;
        self
    }

    pub fn matching(&self) -> &VectorMatching {
        &self.matching
    }

    pub fn grouping(&self) -> &Grouping {
        &self.grouping
    }

    pub fn return_bool(&self) -> bool {
        self.return_bool
    }

    /// Keywords of the modifiers that change anything, matching first, then
    /// grouping, then `bool`.
    pub fn keywords(&self) -> impl Iterator<Item = &'static str> {
        let matching = match self.matching.cardinality {
            Cardinality::ManyToOne => Some("group_left"),
            Cardinality::OneToMany => Some("group_right"),
            Cardinality::OneToOne if self.matching.on => Some("on"),
            Cardinality::OneToOne if !self.matching.matching_labels.is_empty() => {
                Some("ignoring")
            }
            Cardinality::OneToOne => None,
        };
        let grouping = if self.grouping.without {
            Some("without")
        } else if !self.grouping.labels.is_empty() {
            Some("by")
        } else {
            None
        };
        let return_bool = self.return_bool.then_some("bool");
        [matching, grouping, return_bool].into_iter().flatten()
    }

    pub fn join_spec(&self) -> JoinSpec {
        JoinSpec {
            matching: self.matching.clone(),
            return_bool: self.return_bool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_chaining() {
        let modifiers = Modifiers::new()
            .on(["host"])
            .group_left(["datacenter"])
            .bool();

        let spec = modifiers.join_spec();
        assert!(spec.return_bool);
        assert!(spec.matching.on);
        assert_eq!(spec.matching.matching_labels, vec!["host".to_string()]);
        assert_eq!(spec.matching.include, vec!["datacenter".to_string()]);
        assert_eq!(spec.matching.cardinality, Cardinality::ManyToOne);

        // the original value is untouched by later setters on a clone
        let reused = modifiers.clone().ignoring(["env"]);
        assert!(modifiers.matching().on);
        assert!(!reused.matching().on);
    }

    #[test]
    fn test_grouping() {
        assert!(Modifiers::new().grouping().is_ungrouped());
        assert!(!Modifiers::new().without(Vec::<String>::new()).grouping().is_ungrouped());

        let by = Modifiers::new().by(["host"]);
        assert!(by.grouping().filter().on);
        assert!(by.grouping().filter().keeps("host"));
        assert!(!by.grouping().filter().keeps("cpu"));

        let without = Modifiers::new().without(["cpu"]);
        assert!(without.grouping().filter().keeps("host"));
        assert!(!without.grouping().filter().keeps("cpu"));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(Modifiers::new().keywords().count(), 0);
        // no-op clauses change nothing
        assert_eq!(Modifiers::new().ignoring(Vec::<String>::new()).keywords().count(), 0);

        let keywords: Vec<_> = Modifiers::new()
            .bool()
            .by(["host"])
            .on(["host"])
            .keywords()
            .collect();
        assert_eq!(keywords, vec!["on", "by", "bool"]);

        let keywords: Vec<_> = Modifiers::new()
            .ignoring(["env"])
            .group_right(Vec::<String>::new())
            .without(Vec::<String>::new())
            .keywords()
            .collect();
        assert_eq!(keywords, vec!["group_right", "without"]);
    }
}
