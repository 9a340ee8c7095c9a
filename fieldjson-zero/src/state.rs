use fieldjson_model::{FieldValue, Record, TypeRef};

use crate::registry::is_zero_json;

/// Per-type strategy deciding zero-ness and producing zero instances.
///
/// Registered once per type into a [`crate::ZeroRegistry`] and read-only
/// afterwards.
pub trait ZeroState: Send + Sync {
    /// True when the record is in its zero state.
    fn is_zero(&self, value: &dyn Record) -> bool;

    /// A fresh zero instance of the type.
    fn zero_val(&self) -> Box<dyn Record>;
}

/// Compares against a prototype zero instance using record equality.
///
/// The prototype is owned by the strategy and cloned on demand; callers
/// never receive the original.
pub struct ComparisonZeroState {
    zero: Box<dyn Record>,
}

impl ComparisonZeroState {
    #[must_use]
    pub fn new(zero: Box<dyn Record>) -> Self {
        Self { zero }
    }
}

impl ZeroState for ComparisonZeroState {
    fn is_zero(&self, value: &dyn Record) -> bool {
        value.eq_record(self.zero.as_ref())
    }

    fn zero_val(&self) -> Box<dyn Record> {
        self.zero.clone_record()
    }
}

/// Structural emptiness: a record is zero when none of its declared
/// fields holds a value that is itself non-zero.
///
/// Nested record values count as non-zero without further inspection;
/// types that need deeper semantics register their own strategy.
pub struct StructuralZeroState {
    type_ref: TypeRef,
}

impl StructuralZeroState {
    #[must_use]
    pub fn new(type_ref: TypeRef) -> Self {
        Self { type_ref }
    }
}

impl ZeroState for StructuralZeroState {
    fn is_zero(&self, value: &dyn Record) -> bool {
        value.field_names().iter().all(|field| {
            match value.get_field(field) {
                None => true,
                Some(FieldValue::Json(v)) => is_zero_json(&v),
                Some(FieldValue::Record(_)) => false,
                Some(FieldValue::Seq(items)) => items.is_empty(),
                Some(FieldValue::Map(entries)) => entries.is_empty(),
            }
        })
    }

    fn zero_val(&self) -> Box<dyn Record> {
        self.type_ref.construct()
    }
}
