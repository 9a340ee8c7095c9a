use std::any::Any;
use std::fmt;

use serde_json::Value;

use crate::field::Schema;

/// The wire-document map type. Insertion order is preserved.
pub type JsonMap = serde_json::Map<String, Value>;

/// Name-indexed view of a structured record.
///
/// This is the seam between the transcoding engine and user types: the
/// engine never touches a record's storage directly, only the field
/// enumeration and get/set operations declared here. Implementations are
/// expected to be plain structs that map field ids onto their members.
pub trait Record: Any + Send + Sync + fmt::Debug {
    /// Name this record type is known by (zero-state registration,
    /// error messages).
    fn type_name(&self) -> &'static str;

    /// The field definition table for this type.
    ///
    /// Definition-free types return [`Schema::empty`] and get full
    /// passthrough treatment in both directions.
    fn schema(&self) -> &'static Schema;

    /// Declared field ids in their natural enumeration order. The order
    /// must be stable run-to-run; it decides marshal output order.
    fn field_names(&self) -> Vec<String>;

    /// Current value of a field, or `None` when the field is unset.
    /// Unset fields are absent from marshal output entirely.
    fn get_field(&self, field: &str) -> Option<FieldValue>;

    /// Assigns a field, returning `false` when this type does not
    /// accept the field or the value's shape.
    fn set_field(&mut self, field: &str, value: FieldValue) -> bool;

    /// Deep copy behind the trait object.
    fn clone_record(&self) -> Box<dyn Record>;

    /// Structural equality against a record of any runtime type.
    /// Implementations downcast and compare; records of different
    /// concrete types are never equal.
    fn eq_record(&self, other: &dyn Record) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Element count for container-like records. Types with a meaningful
    /// size return `Some`; the zero-value machinery treats a count of 0
    /// as zero without consulting any registered strategy.
    fn len_hint(&self) -> Option<usize> {
        None
    }

    /// Dispatches a bound-method marshal override. Returns the value to
    /// write under the field's wire name, or `None` when the method name
    /// is not recognized by this type.
    fn invoke_marshal_hook(&self, method: &str, field: &str) -> Option<Value> {
        let _ = (method, field);
        None
    }

    /// Dispatches a bound-method unmarshal override (a setter). Returns
    /// `false` when the method name is not recognized or the setter
    /// rejects the value.
    fn invoke_unmarshal_hook(&mut self, method: &str, field: &str, value: &Value) -> bool {
        let _ = (method, field, value);
        false
    }
}

/// A single field's value as seen through the [`Record`] view.
///
/// Scalars, scalar collections, and passthrough data travel as raw JSON;
/// nested records and collections of records stay typed so the engine
/// can recurse into them.
#[derive(Debug)]
pub enum FieldValue {
    /// A raw JSON value: scalars, arrays of scalars, or passthrough
    /// blobs. `Value::Null` here means the field is set to null, which
    /// is distinct from the field being unset.
    Json(Value),
    /// A nested record instance.
    Record(Box<dyn Record>),
    /// An ordered sequence of records; `None` elements are wire nulls.
    Seq(Vec<Option<Box<dyn Record>>>),
    /// A string-keyed collection of records. Key identity and insertion
    /// order are both preserved.
    Map(Vec<(String, Option<Box<dyn Record>>)>),
}

impl FieldValue {
    /// Wraps a raw JSON value.
    pub fn json(value: impl Into<Value>) -> Self {
        FieldValue::Json(value.into())
    }

    /// True when this is a raw JSON null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Json(Value::Null))
    }

    /// The raw JSON value, if this variant carries one.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            FieldValue::Json(v) => Some(v),
            _ => None,
        }
    }

    /// The nested record, if this variant carries one.
    #[must_use]
    pub fn as_record(&self) -> Option<&dyn Record> {
        match self {
            FieldValue::Record(r) => Some(r.as_ref()),
            _ => None,
        }
    }
}

impl Clone for FieldValue {
    fn clone(&self) -> Self {
        match self {
            FieldValue::Json(v) => FieldValue::Json(v.clone()),
            FieldValue::Record(r) => FieldValue::Record(r.clone_record()),
            FieldValue::Seq(items) => FieldValue::Seq(
                items
                    .iter()
                    .map(|item| item.as_ref().map(|r| r.clone_record()))
                    .collect(),
            ),
            FieldValue::Map(entries) => FieldValue::Map(
                entries
                    .iter()
                    .map(|(k, item)| (k.clone(), item.as_ref().map(|r| r.clone_record())))
                    .collect(),
            ),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        fn opt_eq(a: &Option<Box<dyn Record>>, b: &Option<Box<dyn Record>>) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.eq_record(b.as_ref()),
                _ => false,
            }
        }
        match (self, other) {
            (FieldValue::Json(a), FieldValue::Json(b)) => a == b,
            (FieldValue::Record(a), FieldValue::Record(b)) => a.eq_record(b.as_ref()),
            (FieldValue::Seq(a), FieldValue::Seq(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| opt_eq(x, y))
            }
            (FieldValue::Map(a), FieldValue::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && opt_eq(va, vb))
            }
            _ => false,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Json(value)
    }
}

/// Named constructor table for a record type.
///
/// Field definitions that point at nested record types (object fields,
/// arrays of objects) carry one of these so the engine can build fresh
/// instances without knowing the concrete type.
#[derive(Clone, Copy)]
pub struct TypeRef {
    name: &'static str,
    construct: fn() -> Box<dyn Record>,
    hydrate_raw: Option<fn(&mut dyn Record, &JsonMap) -> bool>,
}

impl TypeRef {
    /// Builds a type reference from an explicit constructor.
    #[must_use]
    pub const fn new(name: &'static str, construct: fn() -> Box<dyn Record>) -> Self {
        Self {
            name,
            construct,
            hydrate_raw: None,
        }
    }

    /// Builds a type reference for a `Default`-constructible record.
    #[must_use]
    pub fn for_type<T: Record + Default>(name: &'static str) -> Self {
        Self::new(name, || Box::new(T::default()))
    }

    /// Attaches a type-specific raw-map hydration hook, tried instead of
    /// generic field-by-field hydration. Returns `false` on failure.
    #[must_use]
    pub const fn with_hydrate_raw(mut self, hook: fn(&mut dyn Record, &JsonMap) -> bool) -> Self {
        self.hydrate_raw = Some(hook);
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// A fresh default-state instance.
    #[must_use]
    pub fn construct(&self) -> Box<dyn Record> {
        (self.construct)()
    }

    #[must_use]
    pub const fn hydrate_raw(&self) -> Option<fn(&mut dyn Record, &JsonMap) -> bool> {
        self.hydrate_raw
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef").field("name", &self.name).finish()
    }
}

/// A definition-free record: an insertion-ordered string→JSON map.
///
/// Carries an empty schema, so every wire key passes through verbatim in
/// both directions. This is the catch-all shape for documents whose
/// structure is not known ahead of time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapRecord {
    entries: JsonMap,
}

impl MapRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }
}

impl From<JsonMap> for MapRecord {
    fn from(entries: JsonMap) -> Self {
        Self { entries }
    }
}

impl Record for MapRecord {
    fn type_name(&self) -> &'static str {
        "MapRecord"
    }

    fn schema(&self) -> &'static Schema {
        Schema::empty()
    }

    fn field_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        self.entries.get(field).map(|v| FieldValue::Json(v.clone()))
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        match value {
            FieldValue::Json(v) => {
                self.entries.insert(field.to_string(), v);
                true
            }
            // typed values never reach a definition-free record
            _ => false,
        }
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<MapRecord>()
            .is_some_and(|o| o == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn len_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}
