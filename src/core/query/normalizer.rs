use super::{Constraint, NormalizedQuery, Operator, RawQuery, ValueSet};
use crate::core::error::{GateError, GateResult};
use crate::core::types::Literal;
use serde_json::Value;

pub struct QueryNormalizer;

impl QueryNormalizer {
    /// Bring every entry of `raw` into operator-tagged form.
    ///
    /// Bare literals and `=` constraints become `in [literal, ...]`. Operator
    /// objects must hold exactly one operator from `{=, in}` applied to a
    /// literal or a non-empty list of literals. Attribute order is preserved.
    pub fn normalize(raw: &RawQuery) -> GateResult<NormalizedQuery> {
        raw.iter()
            .map(|(attribute, value)| {
                let constraint = Self::normalize_value(attribute, value)?;
                tracing::debug!(attribute = %attribute, constraint = %constraint, "normalized constraint");
                Ok((attribute.clone(), constraint))
            })
            .collect()
    }

    fn normalize_value(attribute: &str, value: &Value) -> GateResult<Constraint> {
        match value {
            Value::Object(operators) => {
                if operators.len() > 1 {
                    let names: Vec<&str> = operators.keys().map(String::as_str).collect();
                    return Err(GateError::malformed(
                        attribute,
                        format!(
                            "expected exactly one operator, found {} ({})",
                            operators.len(),
                            names.join(", ")
                        ),
                    ));
                }
                let Some((label, operand)) = operators.iter().next() else {
                    return Err(GateError::malformed(attribute, "operator object is empty"));
                };
                let operator =
                    Operator::parse(label).ok_or_else(|| GateError::UnsupportedOperator {
                        attribute: attribute.to_string(),
                        operator: label.clone(),
                    })?;
                let values = Self::operand_values(attribute, operand)?;
                tracing::debug!(attribute = %attribute, declared = %operator, "rewriting operator as in");
                Ok(Constraint::one_of(values))
            }
            other => Literal::from_json(other)
                .map(|literal| Constraint::one_of(ValueSet::single(literal)))
                .ok_or_else(|| {
                    GateError::malformed(
                        attribute,
                        format!("{} is neither a literal nor an operator object", describe(other)),
                    )
                }),
        }
    }

    fn operand_values(attribute: &str, operand: &Value) -> GateResult<ValueSet> {
        match operand {
            Value::Array(items) => {
                if items.is_empty() {
                    return Err(GateError::malformed(attribute, "operand list is empty"));
                }
                items
                    .iter()
                    .map(|item| {
                        Literal::from_json(item).ok_or_else(|| {
                            GateError::malformed(
                                attribute,
                                format!("operand list contains {}", describe(item)),
                            )
                        })
                    })
                    .collect()
            }
            other => Literal::from_json(other)
                .map(ValueSet::single)
                .ok_or_else(|| {
                    GateError::malformed(attribute, format!("operand is {}", describe(other)))
                }),
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(number) if number.is_u64() && !number.is_i64() => {
            "an integer out of range"
        }
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
