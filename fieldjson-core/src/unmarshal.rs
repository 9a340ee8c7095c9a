//! Record unmarshaler: hydrates decoded wire documents into typed
//! records through their field definition tables.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use fieldjson_model::{FieldDef, FieldValue, JsonMap, Kind, Record, TypeRef, UnmarshalOverride};

use crate::coerce;
use crate::context::Context;
use crate::error::{Error, Result};

/// Hydrates wire documents into records.
///
/// Unknown wire keys are dropped on schema-bearing types; on a
/// definition-free type every key passes through verbatim. A `null`
/// document yields the type's default instance.
pub struct Unmarshaller<'a> {
    ctx: &'a Context,
}

impl<'a> Unmarshaller<'a> {
    #[must_use]
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    /// Decodes JSON text into a fresh instance of `T`. Malformed JSON
    /// surfaces as a codec error before any field processing.
    pub fn from_str<T: Record + Default>(&self, json: &str) -> Result<T> {
        let decoded: Value = serde_json::from_str(json)?;
        self.from_value(decoded)
    }

    /// Hydrates a decoded value into a fresh instance of `T`.
    pub fn from_value<T: Record + Default>(&self, value: Value) -> Result<T> {
        let mut inst = self.new_instance::<T>();
        if value.is_null() {
            return Ok(inst);
        }
        let Value::Object(map) = value else {
            return Err(Error::mismatch(
                inst.type_name(),
                "<document>",
                Kind::Object,
                Kind::of(&value),
            ));
        };
        self.hydrate(&mut inst, &map)?;
        Ok(inst)
    }

    /// Hydrates a wire map into an existing record.
    pub fn hydrate(&self, record: &mut dyn Record, map: &JsonMap) -> Result<()> {
        let schema = record.schema();
        let declared: HashSet<String> = record.field_names().into_iter().collect();
        for (key, value) in map {
            let field = schema.field_for_wire(key).unwrap_or(key.as_str());
            match schema.field(field) {
                Some(def) => self.unmarshal_field(record, field, value, def)?,
                None if schema.is_empty() => {
                    // definition-free type: everything passes through
                    self.assign(record, field, FieldValue::Json(value.clone()))?;
                }
                None if declared.contains(field) => {
                    self.unmarshal_undefined(record, field, value)?;
                }
                None => {
                    debug!(
                        "dropping unknown wire key \"{key}\" for type \"{}\"",
                        record.type_name()
                    );
                }
            }
        }
        Ok(())
    }

    /// A fresh instance of `T`: a registered zero strategy's value when
    /// one exists, else the default constructor.
    fn new_instance<T: Record + Default>(&self) -> T {
        let inst = T::default();
        if let Some(state) = self.ctx.registry().lookup(inst.type_name()) {
            if let Ok(zero) = state.zero_val().into_any().downcast::<T>() {
                return *zero;
            }
        }
        inst
    }

    /// Declared field with no definition: a wire null leaves the prior
    /// value untouched; a field currently holding a scalar is coerced
    /// to that scalar's kind; anything else is assigned verbatim.
    fn unmarshal_undefined(
        &self,
        record: &mut dyn Record,
        field: &str,
        value: &Value,
    ) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        match record.get_field(field) {
            Some(FieldValue::Json(current)) if Kind::of(&current).is_scalar() => {
                let coerced =
                    coerce::coerce(record.type_name(), field, value, Kind::of(&current))?;
                self.assign(record, field, FieldValue::Json(coerced))
            }
            _ => self.assign(record, field, FieldValue::Json(value.clone())),
        }
    }

    /// Dispatches one defined field: override first, then by declared
    /// kind, with the current value's kind as a compatibility fallback.
    fn unmarshal_field(
        &self,
        record: &mut dyn Record,
        field: &str,
        value: &Value,
        def: &FieldDef,
    ) -> Result<()> {
        if let Some(cb) = def.unmarshal_with {
            return self.run_override(record, field, value, cb);
        }

        let kind = match def.kind {
            Some(kind) => kind,
            None => match record.get_field(field) {
                Some(FieldValue::Json(current)) if !current.is_null() => Kind::of(&current),
                Some(FieldValue::Record(_)) => Kind::Object,
                Some(FieldValue::Seq(_) | FieldValue::Map(_)) => Kind::Array,
                _ => {
                    return Err(Error::configuration(
                        record.type_name(),
                        field,
                        "missing a type hydration entry",
                    ));
                }
            },
        };

        match kind {
            Kind::Object => self.unmarshal_object(record, field, value, def),
            Kind::Array => self.unmarshal_array(record, field, value, def),
            other => self.unmarshal_scalar(record, field, value, other, def.nullable),
        }
    }

    fn run_override(
        &self,
        record: &mut dyn Record,
        field: &str,
        value: &Value,
        cb: UnmarshalOverride,
    ) -> Result<()> {
        let ok = match cb {
            UnmarshalOverride::Method(method) => record.invoke_unmarshal_hook(method, field, value),
            UnmarshalOverride::Func(f) => f(record, field, value),
        };
        if ok {
            Ok(())
        } else {
            Err(Error::callback(
                "unmarshal",
                record.type_name(),
                field,
                cb.to_string(),
            ))
        }
    }

    /// Object hydration. A null wire value never leaves the field
    /// unset: nullable fields take null, everything else the type's
    /// zero value or a fresh default instance.
    fn unmarshal_object(
        &self,
        record: &mut dyn Record,
        field: &str,
        value: &Value,
        def: &FieldDef,
    ) -> Result<()> {
        let Some(type_ref) = def.element_type else {
            return Err(Error::configuration(
                record.type_name(),
                field,
                "missing a target-type hydration entry",
            ));
        };

        let hydrated = if value.is_null() {
            if def.nullable {
                FieldValue::Json(Value::Null)
            } else {
                match self.ctx.registry().lookup(type_ref.name()) {
                    Some(state) => FieldValue::Record(state.zero_val()),
                    None => FieldValue::Record(type_ref.construct()),
                }
            }
        } else {
            FieldValue::Record(self.build_record(record.type_name(), field, value, &type_ref)?)
        };

        self.assign(record, field, hydrated)
    }

    /// Array hydration over sequence- and mapping-shaped collections.
    ///
    /// A null wire value is only assigned when the field is nullable;
    /// otherwise the prior value stays untouched. This differs from
    /// object hydration on purpose.
    fn unmarshal_array(
        &self,
        record: &mut dyn Record,
        field: &str,
        value: &Value,
        def: &FieldDef,
    ) -> Result<()> {
        let Some(element_kind) = def.element_kind else {
            return Err(Error::configuration(
                record.type_name(),
                field,
                "missing an element-type hydration entry",
            ));
        };

        if value.is_null() {
            if def.nullable {
                return self.assign(record, field, FieldValue::Json(Value::Null));
            }
            return Ok(());
        }

        let hydrated = match value {
            Value::Array(items) => {
                if element_kind == Kind::Object {
                    let type_ref = self.element_type(record, field, def)?;
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(self.element_record(record.type_name(), field, item, &type_ref)?);
                    }
                    FieldValue::Seq(out)
                } else {
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(self.element_scalar(
                            record.type_name(),
                            field,
                            item,
                            element_kind,
                        )?);
                    }
                    FieldValue::Json(Value::Array(out))
                }
            }
            Value::Object(entries) => {
                // key identity and insertion order are preserved
                if element_kind == Kind::Object {
                    let type_ref = self.element_type(record, field, def)?;
                    let mut out = Vec::with_capacity(entries.len());
                    for (key, item) in entries {
                        let rec =
                            self.element_record(record.type_name(), field, item, &type_ref)?;
                        out.push((key.clone(), rec));
                    }
                    FieldValue::Map(out)
                } else {
                    let mut out = JsonMap::new();
                    for (key, item) in entries {
                        let v = self.element_scalar(
                            record.type_name(),
                            field,
                            item,
                            element_kind,
                        )?;
                        out.insert(key.clone(), v);
                    }
                    FieldValue::Json(Value::Object(out))
                }
            }
            other => {
                return Err(Error::mismatch(
                    record.type_name(),
                    field,
                    Kind::Array,
                    Kind::of(other),
                ));
            }
        };

        self.assign(record, field, hydrated)
    }

    fn element_type(&self, record: &dyn Record, field: &str, def: &FieldDef) -> Result<TypeRef> {
        def.element_type.ok_or_else(|| {
            Error::configuration(
                record.type_name(),
                field,
                "missing a target-type hydration entry",
            )
        })
    }

    fn element_record(
        &self,
        record_type: &str,
        field: &str,
        item: &Value,
        type_ref: &TypeRef,
    ) -> Result<Option<Box<dyn Record>>> {
        if item.is_null() {
            return Ok(None);
        }
        Ok(Some(self.build_record(record_type, field, item, type_ref)?))
    }

    fn element_scalar(
        &self,
        record_type: &str,
        field: &str,
        item: &Value,
        element_kind: Kind,
    ) -> Result<Value> {
        if item.is_null() {
            return Ok(Value::Null);
        }
        if element_kind == Kind::Unknown {
            return Ok(item.clone());
        }
        coerce::coerce(record_type, field, item, element_kind)
    }

    /// Builds a fresh instance of the target type from a non-null wire
    /// value, preferring the type's raw-map hook over generic
    /// field-by-field hydration. The result never aliases the input.
    fn build_record(
        &self,
        record_type: &str,
        field: &str,
        value: &Value,
        type_ref: &TypeRef,
    ) -> Result<Box<dyn Record>> {
        let Value::Object(map) = value else {
            return Err(Error::mismatch(
                record_type,
                field,
                Kind::Object,
                Kind::of(value),
            ));
        };
        let mut inst = type_ref.construct();
        match type_ref.hydrate_raw() {
            Some(hook) => {
                if !hook(inst.as_mut(), map) {
                    return Err(Error::callback(
                        "unmarshal",
                        record_type,
                        field,
                        format!("raw-map hook for type \"{}\"", type_ref.name()),
                    ));
                }
            }
            None => self.hydrate(inst.as_mut(), map)?,
        }
        Ok(inst)
    }

    /// Scalar hydration: null takes the declared type's zero (or null
    /// when nullable); unknown declared kinds pass through verbatim.
    fn unmarshal_scalar(
        &self,
        record: &mut dyn Record,
        field: &str,
        value: &Value,
        kind: Kind,
        nullable: bool,
    ) -> Result<()> {
        let hydrated = if value.is_null() {
            if nullable {
                FieldValue::Json(Value::Null)
            } else {
                self.ctx.registry().zero_of(kind, None)
            }
        } else if kind == Kind::Unknown {
            FieldValue::Json(value.clone())
        } else {
            FieldValue::Json(coerce::coerce(record.type_name(), field, value, kind)?)
        };
        self.assign(record, field, hydrated)
    }

    /// Assigns a hydrated value, surfacing a record that rejects one of
    /// its own defined fields as a configuration mistake.
    fn assign(&self, record: &mut dyn Record, field: &str, value: FieldValue) -> Result<()> {
        if record.set_field(field, value) {
            Ok(())
        } else {
            Err(Error::configuration(
                record.type_name(),
                field,
                "record type does not accept this field",
            ))
        }
    }
}
