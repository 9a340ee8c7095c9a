use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde_json::Value;

use crate::kind::Kind;
use crate::record::{FieldValue, JsonMap, Record, TypeRef};

/// Free-function marshal override.
///
/// Arguments: record, field id, current field value, resolved wire
/// name, output map. The function owns all writes into the output map
/// for this field; returning `false` signals failure and aborts the
/// whole document.
pub type MarshalFn = fn(&dyn Record, &str, &FieldValue, &str, &mut JsonMap) -> bool;

/// Free-function unmarshal override.
///
/// Arguments: record, field id, decoded wire value. The function owns
/// all mutation of the record for this field; returning `false` signals
/// failure and aborts the whole document.
pub type UnmarshalFn = fn(&mut dyn Record, &str, &Value) -> bool;

/// A caller-supplied marshal override for one field, resolved at schema
/// construction time.
#[derive(Clone, Copy)]
pub enum MarshalOverride {
    /// Bound method dispatched through
    /// [`Record::invoke_marshal_hook`]; the hook's return value is
    /// written under the field's wire name.
    Method(&'static str),
    /// Free function; see [`MarshalFn`].
    Func(MarshalFn),
}

/// A caller-supplied unmarshal override for one field, resolved at
/// schema construction time.
#[derive(Clone, Copy)]
pub enum UnmarshalOverride {
    /// Bound setter method dispatched through
    /// [`Record::invoke_unmarshal_hook`].
    Method(&'static str),
    /// Free function; see [`UnmarshalFn`].
    Func(UnmarshalFn),
}

impl fmt::Debug for MarshalOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarshalOverride::Method(m) => write!(f, "Method({m:?})"),
            MarshalOverride::Func(_) => write!(f, "Func(..)"),
        }
    }
}

impl fmt::Display for MarshalOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarshalOverride::Method(m) => write!(f, "method \"{m}\""),
            MarshalOverride::Func(_) => write!(f, "fn"),
        }
    }
}

impl fmt::Debug for UnmarshalOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmarshalOverride::Method(m) => write!(f, "Method({m:?})"),
            UnmarshalOverride::Func(_) => write!(f, "Func(..)"),
        }
    }
}

impl fmt::Display for UnmarshalOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmarshalOverride::Method(m) => write!(f, "method \"{m}\""),
            UnmarshalOverride::Func(_) => write!(f, "fn"),
        }
    }
}

/// Static definition of one field of one record type.
///
/// Built once when the type's [`Schema`] is constructed and never
/// mutated afterwards. A field with no definition gets verbatim
/// passthrough on marshal and, on a schema-bearing type, is coerced to
/// its current scalar kind (or assigned as-is) on unmarshal.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Name used in the wire document; `None` means the field id is
    /// used verbatim.
    pub wire_name: Option<String>,
    /// Declared kind. `None` turns on the inference fallback, which
    /// reads the kind off the field's current value; a field with
    /// neither is a configuration error at hydration time.
    pub kind: Option<Kind>,
    /// Element kind for `Array` fields. Required for array hydration.
    pub element_kind: Option<Kind>,
    /// Target record type for `Object` fields and `Array`-of-`Object`
    /// elements.
    pub element_type: Option<TypeRef>,
    /// When true, a wire null is assigned as null instead of the
    /// type's zero value.
    pub nullable: bool,
    /// When true, the field is omitted from marshal output while its
    /// value is zero.
    pub omit_empty: bool,
    /// When true, the field never appears in marshal output at all.
    pub skip: bool,
    /// Optional scalar cast applied on marshal, before the zero check.
    /// Only the four scalar kinds are valid targets.
    pub marshal_as: Option<Kind>,
    /// Optional marshal override; replaces all default handling.
    pub marshal_with: Option<MarshalOverride>,
    /// Optional unmarshal override; replaces all default handling.
    pub unmarshal_with: Option<UnmarshalOverride>,
}

impl FieldDef {
    /// A definition with an explicit declared kind and defaults
    /// everywhere else.
    #[must_use]
    pub fn new(kind: Kind) -> Self {
        Self {
            wire_name: None,
            kind: Some(kind),
            element_kind: None,
            element_type: None,
            nullable: false,
            omit_empty: false,
            skip: false,
            marshal_as: None,
            marshal_with: None,
            unmarshal_with: None,
        }
    }

    /// A definition with no declared kind; hydration falls back to
    /// inferring the kind from the field's current value.
    #[must_use]
    pub fn untyped() -> Self {
        Self {
            kind: None,
            ..Self::new(Kind::Unknown)
        }
    }

    /// An object field hydrated into the given record type.
    #[must_use]
    pub fn object(element_type: TypeRef) -> Self {
        Self {
            element_type: Some(element_type),
            ..Self::new(Kind::Object)
        }
    }

    /// An array field with scalar elements of the given kind.
    #[must_use]
    pub fn array(element_kind: Kind) -> Self {
        Self {
            element_kind: Some(element_kind),
            ..Self::new(Kind::Array)
        }
    }

    /// An array field whose elements hydrate into the given record
    /// type.
    #[must_use]
    pub fn object_array(element_type: TypeRef) -> Self {
        Self {
            element_kind: Some(Kind::Object),
            element_type: Some(element_type),
            ..Self::new(Kind::Array)
        }
    }

    // ── builder-style modifiers ──────────────────────────────────────

    /// Sets the wire name.
    #[must_use]
    pub fn named(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    /// Marks the field nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the field omit-when-zero.
    #[must_use]
    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Marks the field as never marshaled.
    #[must_use]
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Casts the value to the given scalar kind on marshal.
    #[must_use]
    pub fn marshal_as(mut self, kind: Kind) -> Self {
        self.marshal_as = Some(kind);
        self
    }

    /// Installs a marshal override.
    #[must_use]
    pub fn marshal_with(mut self, cb: MarshalOverride) -> Self {
        self.marshal_with = Some(cb);
        self
    }

    /// Installs an unmarshal override.
    #[must_use]
    pub fn unmarshal_with(mut self, cb: UnmarshalOverride) -> Self {
        self.unmarshal_with = Some(cb);
        self
    }

    // ── common definition shorthands ─────────────────────────────────

    /// Shorthand for an omit-when-zero string field.
    #[must_use]
    pub fn omitempty_string() -> Self {
        Self::new(Kind::String).omit_empty()
    }

    /// Shorthand for an omit-when-zero integer field.
    #[must_use]
    pub fn omitempty_integer() -> Self {
        Self::new(Kind::Integer).omit_empty()
    }

    /// Shorthand for an omit-when-zero float field.
    #[must_use]
    pub fn omitempty_float() -> Self {
        Self::new(Kind::Float).omit_empty()
    }

    /// Shorthand for an omit-when-zero boolean field.
    #[must_use]
    pub fn omitempty_boolean() -> Self {
        Self::new(Kind::Boolean).omit_empty()
    }

    /// Shorthand for an omit-when-empty string array field.
    #[must_use]
    pub fn omitempty_string_array() -> Self {
        Self::array(Kind::String).omit_empty()
    }

    /// Shorthand for an omit-when-empty integer array field.
    #[must_use]
    pub fn omitempty_integer_array() -> Self {
        Self::array(Kind::Integer).omit_empty()
    }

    /// Shorthand for an omit-when-empty float array field.
    #[must_use]
    pub fn omitempty_float_array() -> Self {
        Self::array(Kind::Float).omit_empty()
    }

    /// Shorthand for an omit-when-empty boolean array field.
    #[must_use]
    pub fn omitempty_boolean_array() -> Self {
        Self::array(Kind::Boolean).omit_empty()
    }
}

/// Structural schema mistakes caught by [`Schema::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Array field with no element kind.
    #[error("array field \"{field}\" is missing an element-type entry")]
    MissingElementKind { field: String },

    /// Object field (or array-of-object field) with no target type.
    #[error("object field \"{field}\" is missing a target-type entry")]
    MissingElementType { field: String },

    /// A marshal cast target that is not one of the scalar kinds.
    #[error("field \"{field}\" declares unsupported marshal cast target {target:?}")]
    UnsupportedCast { field: String, target: Kind },
}

/// Per-record-type field definition table.
///
/// Keeps field ids in declaration order and maintains the reverse
/// wire-name → field-id map used during unmarshal. Only definitions
/// with an explicit wire name participate in the reverse map.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldDef)>,
    index: HashMap<String, usize>,
    wire_to_field: HashMap<String, String>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared empty schema for definition-free record types.
    #[must_use]
    pub fn empty() -> &'static Schema {
        static EMPTY: LazyLock<Schema> = LazyLock::new(Schema::new);
        &EMPTY
    }

    /// Adds (or replaces) a field definition. Last write wins for both
    /// the field id and any wire name it claims; a replaced definition's
    /// wire name stops resolving.
    #[must_use]
    pub fn with_field(mut self, id: impl Into<String>, def: FieldDef) -> Self {
        let id = id.into();
        match self.index.get(&id).copied() {
            Some(pos) => {
                if let Some(old_wire) = self.fields[pos].1.wire_name.clone() {
                    // only retract the mapping this field still owns
                    if self.wire_to_field.get(&old_wire).map(String::as_str)
                        == Some(id.as_str())
                    {
                        self.wire_to_field.remove(&old_wire);
                    }
                }
                if let Some(wire) = &def.wire_name {
                    self.wire_to_field.insert(wire.clone(), id.clone());
                }
                self.fields[pos].1 = def;
            }
            None => {
                if let Some(wire) = &def.wire_name {
                    self.wire_to_field.insert(wire.clone(), id.clone());
                }
                self.index.insert(id.clone(), self.fields.len());
                self.fields.push((id, def));
            }
        }
        self
    }

    /// Looks up a definition by field id.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&FieldDef> {
        self.index.get(id).map(|&pos| &self.fields[pos].1)
    }

    /// Resolves a wire name back to its field id. Identity names are
    /// not in this map; callers fall back to the wire name itself.
    #[must_use]
    pub fn field_for_wire(&self, wire_name: &str) -> Option<&str> {
        self.wire_to_field.get(wire_name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDef)> {
        self.fields.iter().map(|(id, def)| (id.as_str(), def))
    }

    /// Checks the structural invariants of every definition: arrays
    /// need an element kind, object targets need a type reference, and
    /// marshal casts must name a scalar kind.
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (id, def) in self.iter() {
            if def.kind == Some(Kind::Array) && def.element_kind.is_none() {
                return Err(SchemaError::MissingElementKind { field: id.into() });
            }
            let wants_object = def.kind == Some(Kind::Object)
                || (def.kind == Some(Kind::Array) && def.element_kind == Some(Kind::Object));
            if wants_object && def.element_type.is_none() {
                return Err(SchemaError::MissingElementType { field: id.into() });
            }
            if let Some(target) = def.marshal_as {
                if !target.is_scalar() {
                    return Err(SchemaError::UnsupportedCast {
                        field: id.into(),
                        target,
                    });
                }
            }
        }
        Ok(())
    }
}
