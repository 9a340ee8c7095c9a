use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use serde_json::{Number, Value};

use fieldjson_model::{FieldValue, Kind, Record};

use crate::state::ZeroState;

/// Canonical scalar zero values.
pub const ZERO_STRING: &str = "";
pub const ZERO_INTEGER: i64 = 0;
pub const ZERO_FLOAT: f64 = 0.0;
pub const ZERO_BOOLEAN: bool = false;

/// True when a raw JSON value is its type's zero: null, `""`, `0`,
/// `0.0`, `false`, or an empty collection.
#[must_use]
pub fn is_zero_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i == ZERO_INTEGER
            } else if let Some(u) = n.as_u64() {
                u == 0
            } else {
                n.as_f64() == Some(ZERO_FLOAT)
            }
        }
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
    }
}

/// Table of per-type zero-value strategies, keyed by record type name.
///
/// Reads vastly outnumber writes: registration happens at bootstrap,
/// lookups on every omit-when-empty check and null hydration. A shared
/// process-wide instance is available through [`ZeroRegistry::global`];
/// callers that need isolation construct a private instance and thread
/// it through their context.
#[derive(Default)]
pub struct ZeroRegistry {
    states: RwLock<HashMap<String, Arc<dyn ZeroState>>>,
}

impl ZeroRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide registry.
    #[must_use]
    pub fn global() -> Arc<ZeroRegistry> {
        static GLOBAL: OnceLock<Arc<ZeroRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(ZeroRegistry::new())).clone()
    }

    /// Registers a strategy for a type. Replaces any existing entry;
    /// last write wins.
    pub fn register(&self, type_name: impl Into<String>, state: Arc<dyn ZeroState>) {
        self.write_states().insert(type_name.into(), state);
    }

    /// The registered strategy for a type, if any.
    #[must_use]
    pub fn lookup(&self, type_name: &str) -> Option<Arc<dyn ZeroState>> {
        self.states
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(type_name)
            .cloned()
    }

    /// Removes every registered strategy. Intended for test isolation
    /// only; production code registers at bootstrap and never resets.
    pub fn reset(&self) {
        self.write_states().clear();
    }

    fn write_states(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<dyn ZeroState>>> {
        self.states
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// The zero value for a declared kind.
    ///
    /// Scalar kinds return the fixed scalar zero and arrays an empty
    /// collection. Object kinds defer to the strategy registered for
    /// `type_name`; with no strategy the result is a null sentinel,
    /// never a partially constructed instance.
    #[must_use]
    pub fn zero_of(&self, kind: Kind, type_name: Option<&str>) -> FieldValue {
        match kind {
            Kind::String => FieldValue::Json(Value::String(String::new())),
            Kind::Integer => FieldValue::Json(Value::from(ZERO_INTEGER)),
            Kind::Float => FieldValue::Json(
                Number::from_f64(ZERO_FLOAT)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            ),
            Kind::Boolean => FieldValue::Json(Value::Bool(ZERO_BOOLEAN)),
            Kind::Array => FieldValue::Json(Value::Array(Vec::new())),
            Kind::Object => match type_name.and_then(|name| self.lookup(name)) {
                Some(state) => FieldValue::Record(state.zero_val()),
                None => FieldValue::Json(Value::Null),
            },
            Kind::Null | Kind::Unknown => FieldValue::Json(Value::Null),
        }
    }

    /// Zero-ness of a record value.
    ///
    /// Order: explicit length hint (a count of 0 is zero), then the
    /// registered strategy, then assume meaningful: an unrecognized
    /// non-empty record is never zero.
    #[must_use]
    pub fn is_zero_record(&self, record: &dyn Record) -> bool {
        if let Some(len) = record.len_hint() {
            return len == 0;
        }
        match self.lookup(record.type_name()) {
            Some(state) => state.is_zero(record),
            None => false,
        }
    }

    /// Zero-ness of any field value.
    #[must_use]
    pub fn is_zero_field(&self, value: &FieldValue) -> bool {
        match value {
            FieldValue::Json(v) => is_zero_json(v),
            FieldValue::Record(r) => self.is_zero_record(r.as_ref()),
            FieldValue::Seq(items) => items.is_empty(),
            FieldValue::Map(entries) => entries.is_empty(),
        }
    }
}
