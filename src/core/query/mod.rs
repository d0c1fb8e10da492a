//! Selection queries in their raw and normalized shapes.
//!
//! A raw query maps catalog attributes either to a bare literal or to a
//! single-operator object such as `{"in": [100, 101]}`. The normalized form
//! carries one `in` constraint, a set of literals, per attribute.

pub mod normalizer;

pub use normalizer::QueryNormalizer;

use crate::core::types::{Literal, ScalarType};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Query as declared on a transformation, before any validation.
pub type RawQuery = IndexMap<String, serde_json::Value>;

/// Operators understood by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    Equals,
    In,
}

impl Operator {
    /// Accepts the registry spellings (`=`, `in`) and the spelled-out names.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "=" | "==" | "eq" | "Equals" | "equals" => Some(Operator::Equals),
            "in" | "In" | "IN" => Some(Operator::In),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::In => "in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Order-insensitive set of literals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ValueSet(BTreeSet<Literal>);

impl ValueSet {
    pub fn single(value: Literal) -> Self {
        ValueSet(BTreeSet::from([value]))
    }

    pub fn is_subset(&self, other: &ValueSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &Literal) -> bool {
        self.0.contains(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.0.iter()
    }

    /// Copy of the set with every literal coerced towards `target`.
    pub fn coerced(&self, target: ScalarType) -> ValueSet {
        self.0.iter().map(|value| value.coerce_to(target)).collect()
    }
}

impl FromIterator<Literal> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        ValueSet(iter.into_iter().collect())
    }
}

impl fmt::Display for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// "Value must be one of these". Every declared operator normalizes to this
/// single form, so `{"=": 1}` and `{"in": [1]}` are the same constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub values: ValueSet,
}

impl Constraint {
    pub fn one_of(values: ValueSet) -> Self {
        Constraint { values }
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(Operator::In.symbol(), &self.values)?;
        map.end()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", Operator::In, self.values)
    }
}

/// Query in which every attribute carries a [`Constraint`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedQuery(IndexMap<String, Constraint>);

impl NormalizedQuery {
    pub fn get(&self, attribute: &str) -> Option<&Constraint> {
        self.0.get(attribute)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.0.contains_key(attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Constraint)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Constraint)> for NormalizedQuery {
    fn from_iter<I: IntoIterator<Item = (String, Constraint)>>(iter: I) -> Self {
        NormalizedQuery(iter.into_iter().collect())
    }
}
