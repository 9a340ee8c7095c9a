//! Field-driven JSON transcoding engine.
//!
//! Walks a record's declared fields against its per-type field
//! definition table and produces/consumes canonical JSON:
//! - per-field wire renaming
//! - omit-when-empty, backed by the zero-value registry
//! - caller-supplied marshal/unmarshal overrides (bound methods or
//!   free functions)
//! - typed hydration of nested objects and homogeneous collections
//!
//! The whole engine is synchronous and in-memory; JSON parsing and
//! serialization are delegated to `serde_json`. Entry points take a
//! [`Context`] so the zero-value registry can be substituted per call;
//! the convenience functions below use the shared default.
//!
//! ```
//! use fieldjson_core::{marshal, unmarshal_str};
//! use fieldjson_model::MapRecord;
//!
//! let doc: MapRecord = unmarshal_str(r#"{"var":"value"}"#).unwrap();
//! let json = marshal(&doc).unwrap();
//! assert_eq!(json, r#"{"var":"value"}"#);
//! ```

mod coerce;
mod context;
mod error;
mod marshal;
mod unmarshal;

pub use context::Context;
pub use error::{Error, Result};
pub use marshal::Marshaller;
pub use unmarshal::Unmarshaller;

use fieldjson_model::Record;
use serde_json::Value;

/// Marshals a record to JSON text with the default context.
pub fn marshal(record: &dyn Record) -> Result<String> {
    let ctx = Context::default();
    Marshaller::new(&ctx).to_string(record)
}

/// Marshals a record to a JSON value with the default context.
pub fn marshal_value(record: &dyn Record) -> Result<Value> {
    let ctx = Context::default();
    Marshaller::new(&ctx).to_value(record)
}

/// Unmarshals JSON text into a fresh `T` with the default context.
pub fn unmarshal_str<T: Record + Default>(json: &str) -> Result<T> {
    let ctx = Context::default();
    Unmarshaller::new(&ctx).from_str(json)
}

/// Unmarshals a decoded JSON value into a fresh `T` with the default
/// context.
pub fn unmarshal_value<T: Record + Default>(value: Value) -> Result<T> {
    let ctx = Context::default();
    Unmarshaller::new(&ctx).from_value(value)
}
