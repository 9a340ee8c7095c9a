//! Field schema and record model for fieldjson.
//!
//! This crate defines the static, type-checked configuration structures
//! that drive the transcoding engine:
//! - [`Kind`]: the JSON type lattice with the integer/float split made
//!   explicit, plus the value classifier
//! - [`FieldDef`] / [`Schema`]: the per-record-type field definition
//!   table (wire names, omission flags, overrides, nested types)
//! - [`Record`] / [`FieldValue`]: the name-indexed view of a structured
//!   record that the marshaler and unmarshaler operate through
//! - [`MapRecord`]: a definition-free string-to-JSON record type where
//!   every key passes through verbatim
//!
//! Schemas are built once at startup and never mutated afterwards; the
//! engine in `fieldjson-core` only ever reads them.

mod field;
mod kind;
mod record;

pub use field::{
    FieldDef, MarshalFn, MarshalOverride, Schema, SchemaError, UnmarshalFn, UnmarshalOverride,
};
pub use kind::Kind;
pub use record::{FieldValue, JsonMap, MapRecord, Record, TypeRef};
