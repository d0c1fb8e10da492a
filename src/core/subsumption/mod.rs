//! Per-attribute compatibility between a child input query and its parent's
//! output query.

use crate::core::error::{GateError, GateResult};
use crate::core::query::{NormalizedQuery, ValueSet};
use crate::core::schema::{AttributeSchema, TypeLabels};
use crate::core::types::ScalarType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which subset relation makes an attribute's value sets compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubsetDirection {
    /// Child ⊆ parent or parent ⊆ child.
    #[default]
    Either,
    /// Child ⊆ parent only.
    #[serde(alias = "strict")]
    ChildWithinParent,
}

/// How numeric literals are compared on `Integer` and `Float` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumericMatching {
    /// Literal equality: `1` and `1.0` differ.
    #[default]
    Exact,
    /// Literals are coerced to the attribute's declared type first.
    Coerce,
}

impl FromStr for SubsetDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "either" => Ok(SubsetDirection::Either),
            "child-within-parent" | "strict" => Ok(SubsetDirection::ChildWithinParent),
            _ => Err(format!(
                "invalid subsumption direction '{}'; supported values are either, child-within-parent",
                value
            )),
        }
    }
}

impl FromStr for NumericMatching {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "exact" => Ok(NumericMatching::Exact),
            "coerce" => Ok(NumericMatching::Coerce),
            _ => Err(format!(
                "invalid numeric matching '{}'; supported values are exact, coerce",
                value
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubsumptionPolicy {
    #[serde(default)]
    pub direction: SubsetDirection,
    #[serde(default)]
    pub numeric: NumericMatching,
}

impl SubsumptionPolicy {
    pub fn strict() -> Self {
        SubsumptionPolicy {
            direction: SubsetDirection::ChildWithinParent,
            ..SubsumptionPolicy::default()
        }
    }
}

/// First attribute whose value sets failed the subset test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub attribute: String,
    pub child: ValueSet,
    pub parent: ValueSet,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: child {} vs parent {}",
            self.attribute, self.child, self.parent
        )
    }
}

impl From<Mismatch> for GateError {
    fn from(mismatch: Mismatch) -> Self {
        GateError::Subsumption {
            attribute: mismatch.attribute,
            child: mismatch.child,
            parent: mismatch.parent,
        }
    }
}

/// Verdict of a completed check. `Incompatible` is a result, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubsumptionOutcome {
    Compatible,
    Incompatible(Mismatch),
}

impl SubsumptionOutcome {
    pub fn is_compatible(&self) -> bool {
        matches!(self, SubsumptionOutcome::Compatible)
    }
}

pub struct SubsumptionChecker {
    labels: TypeLabels,
    policy: SubsumptionPolicy,
}

impl SubsumptionChecker {
    pub fn new(labels: TypeLabels, policy: SubsumptionPolicy) -> Self {
        Self { labels, policy }
    }

    /// Compare `child` against `parent` attribute by attribute, in child order.
    ///
    /// Fails on the first attribute that is unknown to the schema, declared
    /// with an unsupported type, or absent from the parent. Stops with
    /// `Incompatible` on the first attribute whose value sets are not related
    /// by the configured subset direction.
    pub fn check(
        &self,
        child: &NormalizedQuery,
        parent: &NormalizedQuery,
        schema: &AttributeSchema,
    ) -> GateResult<SubsumptionOutcome> {
        if child.is_empty() {
            return Err(GateError::EmptyQuery);
        }

        for (attribute, constraint) in child.iter() {
            let type_label =
                schema
                    .type_label(attribute)
                    .ok_or_else(|| GateError::UnknownAttribute {
                        attribute: attribute.clone(),
                    })?;
            let scalar =
                self.labels
                    .resolve(type_label)
                    .ok_or_else(|| GateError::UnsupportedType {
                        attribute: attribute.clone(),
                        type_label: type_label.to_string(),
                    })?;
            let parent_constraint =
                parent
                    .get(attribute)
                    .ok_or_else(|| GateError::MissingInParent {
                        attribute: attribute.clone(),
                    })?;

            if !self.values_compatible(&constraint.values, &parent_constraint.values, scalar) {
                let mismatch = Mismatch {
                    attribute: attribute.clone(),
                    child: constraint.values.clone(),
                    parent: parent_constraint.values.clone(),
                };
                tracing::error!(
                    attribute = %mismatch.attribute,
                    child = %mismatch.child,
                    parent = %mismatch.parent,
                    "metadata values do not match"
                );
                return Ok(SubsumptionOutcome::Incompatible(mismatch));
            }
        }

        Ok(SubsumptionOutcome::Compatible)
    }

    fn values_compatible(&self, child: &ValueSet, parent: &ValueSet, scalar: ScalarType) -> bool {
        match self.policy.numeric {
            NumericMatching::Coerce if scalar.is_numeric() => {
                self.related(&child.coerced(scalar), &parent.coerced(scalar))
            }
            _ => self.related(child, parent),
        }
    }

    fn related(&self, child: &ValueSet, parent: &ValueSet) -> bool {
        match self.policy.direction {
            SubsetDirection::Either => child.is_subset(parent) || parent.is_subset(child),
            SubsetDirection::ChildWithinParent => child.is_subset(parent),
        }
    }
}

impl Default for SubsumptionChecker {
    fn default() -> Self {
        Self::new(TypeLabels::default(), SubsumptionPolicy::default())
    }
}
