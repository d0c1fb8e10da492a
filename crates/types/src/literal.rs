use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Scalar types a catalog attribute may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    String,
    Integer,
    Float,
}

impl ScalarType {
    /// Resolve one of the canonical type names (`String`, `Integer`, `Float`).
    pub fn from_canonical(label: &str) -> Option<Self> {
        match label {
            "String" => Some(ScalarType::String),
            "Integer" => Some(ScalarType::Integer),
            "Float" => Some(ScalarType::Float),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ScalarType::Integer | ScalarType::Float)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarType::String => write!(f, "String"),
            ScalarType::Integer => write!(f, "Integer"),
            ScalarType::Float => write!(f, "Float"),
        }
    }
}

/// A literal value appearing in a selection query.
///
/// Equality is exact: `Integer(1)` and `Float(1.0)` are different literals.
/// Floats compare by value with `-0.0` folded into `0.0`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Literal {
    /// Interpret a JSON scalar as a literal. Booleans, null, arrays and objects
    /// are not literals, and neither are integers outside the `i64` range.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Literal::Text(text.clone())),
            Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Some(Literal::Integer(integer))
                } else if number.is_f64() {
                    number.as_f64().map(Literal::Float)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Rewrite a numeric literal into the representation of `target`.
    ///
    /// Integers become floats for `Float`; floats with no fractional part that
    /// fit in an `i64` become integers for `Integer`. Text is never touched and
    /// nothing is coerced for `String`.
    pub fn coerce_to(&self, target: ScalarType) -> Literal {
        match (self, target) {
            (Literal::Integer(value), ScalarType::Float) => Literal::Float(*value as f64),
            (Literal::Float(value), ScalarType::Integer)
                if value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value < i64::MAX as f64 =>
            {
                Literal::Integer(*value as i64)
            }
            _ => self.clone(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Literal::Text(_) => 0,
            Literal::Integer(_) => 1,
            Literal::Float(_) => 2,
        }
    }
}

fn canonical_float(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Literal {}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Literal::Text(a), Literal::Text(b)) => a.cmp(b),
            (Literal::Integer(a), Literal::Integer(b)) => a.cmp(b),
            (Literal::Float(a), Literal::Float(b)) => {
                canonical_float(*a).total_cmp(&canonical_float(*b))
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Literal::Text(text) => text.hash(state),
            Literal::Integer(value) => value.hash(state),
            Literal::Float(value) => canonical_float(*value).to_bits().hash(state),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(text) => write!(f, "{:?}", text),
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{:?}", value),
        }
    }
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Literal::Text(text.to_string())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}
