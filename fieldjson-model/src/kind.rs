use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The declared or runtime type of a field value.
///
/// Mirrors the JSON type lattice with the integer/float split made
/// explicit. `Unknown` is reserved for declared types the engine cannot
/// represent; values of unknown kind pass through untouched in both
/// directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
    Null,
    Unknown,
}

impl Kind {
    /// Classifies a decoded JSON value.
    ///
    /// Total over [`serde_json::Value`] and never returns `Unknown`.
    /// Numbers are `Integer` when the decoded representation is integral
    /// (`is_i64`/`is_u64`) and `Float` otherwise; the text the value was
    /// parsed from plays no part.
    #[must_use]
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    Kind::Integer
                } else {
                    Kind::Float
                }
            }
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// True for the four scalar kinds.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Kind::String | Kind::Integer | Kind::Float | Kind::Boolean
        )
    }
}
