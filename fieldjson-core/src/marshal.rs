//! Record marshaler: walks a record's fields against its definition
//! table and produces the wire document.

use serde_json::Value;
use tracing::trace;

use fieldjson_model::{FieldDef, FieldValue, JsonMap, Kind, MarshalOverride, Record};

use crate::coerce;
use crate::context::Context;
use crate::error::{Error, Result};

/// Marshals records into JSON wire documents.
///
/// Fields are visited in the record's natural enumeration order, so
/// output is deterministic run-to-run. Fields without a definition are
/// written verbatim; a type with zero configured fields is full
/// passthrough.
pub struct Marshaller<'a> {
    ctx: &'a Context,
}

impl<'a> Marshaller<'a> {
    #[must_use]
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Marshals a record to JSON text.
    pub fn to_string(&self, record: &dyn Record) -> Result<String> {
        Ok(serde_json::to_string(&self.to_value(record)?)?)
    }

    /// Marshals a record to a JSON value.
    pub fn to_value(&self, record: &dyn Record) -> Result<Value> {
        Ok(Value::Object(self.to_map(record)?))
    }

    fn to_map(&self, record: &dyn Record) -> Result<JsonMap> {
        let schema = record.schema();
        let mut output = JsonMap::new();
        for field in record.field_names() {
            // unset fields are absent from the output entirely
            let Some(value) = record.get_field(&field) else {
                continue;
            };
            match schema.field(&field) {
                // no special handling for this field: write as-is
                None => {
                    let v = self.field_to_value(value)?;
                    output.insert(field, v);
                }
                Some(def) => self.marshal_field(record, &mut output, &field, value, def)?,
            }
        }
        Ok(output)
    }

    /// Marshals one defined field into the output map.
    ///
    /// Order is strict: skip wins over everything, overrides win over
    /// casts, casts are applied before the zero check.
    fn marshal_field(
        &self,
        record: &dyn Record,
        output: &mut JsonMap,
        field: &str,
        value: FieldValue,
        def: &FieldDef,
    ) -> Result<()> {
        if def.skip {
            return Ok(());
        }

        let wire_name = def.wire_name.as_deref().unwrap_or(field);

        if let Some(cb) = def.marshal_with {
            return self.run_override(record, output, field, &value, wire_name, cb);
        }

        let value = match def.marshal_as {
            Some(target) => FieldValue::Json(self.cast(record, field, &value, target)?),
            None => value,
        };

        if def.omit_empty && self.ctx.registry().is_zero_field(&value) {
            trace!("omitting zero field {field}");
            return Ok(());
        }

        let v = self.field_to_value(value)?;
        output.insert(wire_name.to_string(), v);
        Ok(())
    }

    fn run_override(
        &self,
        record: &dyn Record,
        output: &mut JsonMap,
        field: &str,
        value: &FieldValue,
        wire_name: &str,
        cb: MarshalOverride,
    ) -> Result<()> {
        match cb {
            MarshalOverride::Method(method) => match record.invoke_marshal_hook(method, field) {
                Some(v) => {
                    output.insert(wire_name.to_string(), v);
                    Ok(())
                }
                None => Err(Error::callback(
                    "marshal",
                    record.type_name(),
                    field,
                    cb.to_string(),
                )),
            },
            MarshalOverride::Func(f) => {
                if f(record, field, value, wire_name, output) {
                    Ok(())
                } else {
                    Err(Error::callback(
                        "marshal",
                        record.type_name(),
                        field,
                        cb.to_string(),
                    ))
                }
            }
        }
    }

    /// Applies a declared scalar cast. Only raw values can be cast; a
    /// nested record or record collection with a cast target is a
    /// configuration mistake.
    fn cast(
        &self,
        record: &dyn Record,
        field: &str,
        value: &FieldValue,
        target: Kind,
    ) -> Result<Value> {
        match value {
            FieldValue::Json(v) => coerce::coerce(record.type_name(), field, v, target),
            _ => Err(Error::configuration(
                record.type_name(),
                field,
                format!("cannot cast a nested record value to {target:?}"),
            )),
        }
    }

    /// Lowers a field value to plain JSON, recursing into nested
    /// records and record collections.
    fn field_to_value(&self, value: FieldValue) -> Result<Value> {
        match value {
            FieldValue::Json(v) => Ok(v),
            FieldValue::Record(r) => self.to_value(r.as_ref()),
            FieldValue::Seq(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(match item {
                        None => Value::Null,
                        Some(r) => self.to_value(r.as_ref())?,
                    });
                }
                Ok(Value::Array(out))
            }
            FieldValue::Map(entries) => {
                let mut out = JsonMap::new();
                for (key, item) in entries {
                    let v = match item {
                        None => Value::Null,
                        Some(r) => self.to_value(r.as_ref())?,
                    };
                    out.insert(key, v);
                }
                Ok(Value::Object(out))
            }
        }
    }
}
