//! Shared test fixtures for the transcoding engine.

#![allow(dead_code)]

use std::any::Any;
use std::sync::LazyLock;

use fieldjson_model::{
    FieldDef, FieldValue, JsonMap, Kind, MarshalOverride, Record, Schema, TypeRef,
    UnmarshalOverride,
};
use serde_json::Value;

// ── Profile: scalar fields, rename, omission, skip ───────────────

/// Exercises the four scalar kinds plus wire renaming, omit-empty and
/// skip handling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub score: Option<f64>,
    pub active: Option<bool>,
    pub tags: Option<Vec<String>>,
    pub secret: Option<String>,
    pub nickname: Option<String>,
    pub motto: Option<String>,
}

static PROFILE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with_field("name", FieldDef::new(Kind::String))
        .with_field("age", FieldDef::new(Kind::Integer))
        .with_field("score", FieldDef::new(Kind::Float))
        .with_field("active", FieldDef::new(Kind::Boolean))
        .with_field("tags", FieldDef::omitempty_string_array())
        .with_field("secret", FieldDef::new(Kind::String).skip())
        .with_field("nickname", FieldDef::omitempty_string().named("Nickname"))
        .with_field("motto", FieldDef::new(Kind::String).nullable())
});

impl Record for Profile {
    fn type_name(&self) -> &'static str {
        "Profile"
    }

    fn schema(&self) -> &'static Schema {
        &PROFILE_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        ["name", "age", "score", "active", "tags", "secret", "nickname", "motto"]
            .map(String::from)
            .to_vec()
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => self.name.clone().map(FieldValue::json),
            "age" => self.age.map(FieldValue::json),
            "score" => self.score.map(FieldValue::json),
            "active" => self.active.map(FieldValue::json),
            "tags" => self
                .tags
                .clone()
                .map(|t| FieldValue::Json(Value::from(t))),
            "secret" => self.secret.clone().map(FieldValue::json),
            "nickname" => self.nickname.clone().map(FieldValue::json),
            "motto" => self.motto.clone().map(FieldValue::json),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        let FieldValue::Json(v) = value else {
            return false;
        };
        match (field, v) {
            ("name", Value::String(s)) => self.name = Some(s),
            ("name", Value::Null) => self.name = None,
            ("age", Value::Number(n)) => match n.as_i64() {
                Some(i) => self.age = Some(i),
                None => return false,
            },
            ("score", Value::Number(n)) => match n.as_f64() {
                Some(f) => self.score = Some(f),
                None => return false,
            },
            ("active", Value::Bool(b)) => self.active = Some(b),
            ("tags", Value::Array(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => out.push(s),
                        _ => return false,
                    }
                }
                self.tags = Some(out);
            }
            ("secret", Value::String(s)) => self.secret = Some(s),
            ("nickname", Value::String(s)) => self.nickname = Some(s),
            ("motto", Value::String(s)) => self.motto = Some(s),
            ("motto", Value::Null) => self.motto = None,
            _ => return false,
        }
        true
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Profile>()
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
}

// ── Inner / Outer: nested object hydration ───────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inner {
    pub label: Option<String>,
}

impl Inner {
    pub fn new(label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
        }
    }

    pub fn type_ref() -> TypeRef {
        TypeRef::for_type::<Inner>("Inner")
    }
}

static INNER_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| Schema::new().with_field("label", FieldDef::new(Kind::String)));

impl Record for Inner {
    fn type_name(&self) -> &'static str {
        "Inner"
    }

    fn schema(&self) -> &'static Schema {
        &INNER_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        vec!["label".into()]
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "label" => self.label.clone().map(FieldValue::json),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        let FieldValue::Json(v) = value else {
            return false;
        };
        match (field, v) {
            ("label", Value::String(s)) => self.label = Some(s),
            ("label", Value::Null) => self.label = None,
            _ => return false,
        }
        true
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Inner>()
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
}

/// Holds one required and one nullable nested record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outer {
    pub inner: Option<Inner>,
    pub extra: Option<Inner>,
}

static OUTER_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with_field("inner", FieldDef::object(Inner::type_ref()))
        .with_field("extra", FieldDef::object(Inner::type_ref()).nullable())
});

impl Record for Outer {
    fn type_name(&self) -> &'static str {
        "Outer"
    }

    fn schema(&self) -> &'static Schema {
        &OUTER_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        vec!["inner".into(), "extra".into()]
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        let slot = match field {
            "inner" => &self.inner,
            "extra" => &self.extra,
            _ => return None,
        };
        slot.clone()
            .map(|r| FieldValue::Record(Box::new(r)))
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        let slot = match field {
            "inner" => &mut self.inner,
            "extra" => &mut self.extra,
            _ => return false,
        };
        match value {
            FieldValue::Json(Value::Null) => {
                *slot = None;
                true
            }
            FieldValue::Record(r) => match r.into_any().downcast::<Inner>() {
                Ok(inner) => {
                    *slot = Some(*inner);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Outer>()
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
}

// ── Team: record and scalar collections ──────────────────────────

/// Sequence- and mapping-shaped collections: a record sequence, a
/// nullable record mapping, and a scalar mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub members: Option<Vec<Option<Inner>>>,
    pub index: Option<Vec<(String, Option<Inner>)>>,
    pub scores: Option<JsonMap>,
}

static TEAM_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with_field("members", FieldDef::object_array(Inner::type_ref()))
        .with_field(
            "index",
            FieldDef::object_array(Inner::type_ref()).nullable(),
        )
        .with_field("scores", FieldDef::array(Kind::Integer))
});

impl Record for Team {
    fn type_name(&self) -> &'static str {
        "Team"
    }

    fn schema(&self) -> &'static Schema {
        &TEAM_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        vec!["members".into(), "index".into(), "scores".into()]
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "members" => self.members.clone().map(|items| {
                FieldValue::Seq(
                    items
                        .into_iter()
                        .map(|i| i.map(|r| Box::new(r) as Box<dyn Record>))
                        .collect(),
                )
            }),
            "index" => self.index.clone().map(|entries| {
                FieldValue::Map(
                    entries
                        .into_iter()
                        .map(|(k, i)| (k, i.map(|r| Box::new(r) as Box<dyn Record>)))
                        .collect(),
                )
            }),
            "scores" => self
                .scores
                .clone()
                .map(|m| FieldValue::Json(Value::Object(m))),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        match (field, value) {
            ("members", FieldValue::Seq(items)) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        None => out.push(None),
                        Some(r) => match r.into_any().downcast::<Inner>() {
                            Ok(inner) => out.push(Some(*inner)),
                            Err(_) => return false,
                        },
                    }
                }
                self.members = Some(out);
                true
            }
            ("index", FieldValue::Map(entries)) => {
                let mut out = Vec::with_capacity(entries.len());
                for (key, item) in entries {
                    match item {
                        None => out.push((key, None)),
                        Some(r) => match r.into_any().downcast::<Inner>() {
                            Ok(inner) => out.push((key, Some(*inner))),
                            Err(_) => return false,
                        },
                    }
                }
                self.index = Some(out);
                true
            }
            ("index", FieldValue::Json(Value::Null)) => {
                self.index = None;
                true
            }
            ("scores", FieldValue::Json(Value::Object(m))) => {
                self.scores = Some(m);
                true
            }
            _ => false,
        }
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Team>()
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
}

// ── Casted: declared marshal casts ───────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Casted {
    pub n: Option<i64>,
    pub flag: Option<bool>,
}

static CASTED_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with_field("n", FieldDef::new(Kind::Integer).marshal_as(Kind::String))
        .with_field(
            "flag",
            FieldDef::new(Kind::Boolean).marshal_as(Kind::Integer),
        )
});

impl Record for Casted {
    fn type_name(&self) -> &'static str {
        "Casted"
    }

    fn schema(&self) -> &'static Schema {
        &CASTED_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        vec!["n".into(), "flag".into()]
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "n" => self.n.map(FieldValue::json),
            "flag" => self.flag.map(FieldValue::json),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        let FieldValue::Json(v) = value else {
            return false;
        };
        match (field, v) {
            ("n", Value::Number(num)) => match num.as_i64() {
                Some(i) => self.n = Some(i),
                None => return false,
            },
            ("flag", Value::Bool(b)) => self.flag = Some(b),
            _ => return false,
        }
        true
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Casted>()
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
}

// ── Stamped: method and function overrides ───────────────────────

pub fn marshal_prefixed(
    _record: &dyn Record,
    _field: &str,
    value: &FieldValue,
    wire_name: &str,
    output: &mut JsonMap,
) -> bool {
    let Some(Value::String(s)) = value.as_json() else {
        return false;
    };
    output.insert(wire_name.to_string(), Value::String(format!("fn:{s}")));
    true
}

pub fn unmarshal_prefixed(record: &mut dyn Record, field: &str, value: &Value) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    let stripped = s.strip_prefix("fn:").unwrap_or(s);
    record.set_field(field, FieldValue::json(stripped))
}

pub fn marshal_always_fails(
    _record: &dyn Record,
    _field: &str,
    _value: &FieldValue,
    _wire_name: &str,
    _output: &mut JsonMap,
) -> bool {
    false
}

pub fn unmarshal_always_fails(_record: &mut dyn Record, _field: &str, _value: &Value) -> bool {
    false
}

/// Routes two fields through a bound-method hook pair and one through
/// free-function overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stamped {
    pub id: Option<i64>,
    pub upper: Option<String>,
    pub via_fn: Option<String>,
    pub broken: Option<String>,
}

static STAMPED_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with_field("id", FieldDef::new(Kind::Integer))
        .with_field(
            "upper",
            FieldDef::new(Kind::String)
                .marshal_with(MarshalOverride::Method("shout"))
                .unmarshal_with(UnmarshalOverride::Method("absorb")),
        )
        .with_field(
            "via_fn",
            FieldDef::new(Kind::String)
                .marshal_with(MarshalOverride::Func(marshal_prefixed))
                .unmarshal_with(UnmarshalOverride::Func(unmarshal_prefixed)),
        )
        .with_field(
            "broken",
            FieldDef::new(Kind::String)
                .marshal_with(MarshalOverride::Method("no_such_method"))
                .unmarshal_with(UnmarshalOverride::Func(unmarshal_always_fails)),
        )
});

impl Record for Stamped {
    fn type_name(&self) -> &'static str {
        "Stamped"
    }

    fn schema(&self) -> &'static Schema {
        &STAMPED_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        vec!["id".into(), "upper".into(), "via_fn".into(), "broken".into()]
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => self.id.map(FieldValue::json),
            "upper" => self.upper.clone().map(FieldValue::json),
            "via_fn" => self.via_fn.clone().map(FieldValue::json),
            "broken" => self.broken.clone().map(FieldValue::json),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        let FieldValue::Json(v) = value else {
            return false;
        };
        match (field, v) {
            ("id", Value::Number(n)) => match n.as_i64() {
                Some(i) => self.id = Some(i),
                None => return false,
            },
            ("upper", Value::String(s)) => self.upper = Some(s),
            ("via_fn", Value::String(s)) => self.via_fn = Some(s),
            ("broken", Value::String(s)) => self.broken = Some(s),
            _ => return false,
        }
        true
    }

    fn invoke_marshal_hook(&self, method: &str, field: &str) -> Option<Value> {
        match (method, field) {
            ("shout", "upper") => Some(Value::String(
                self.upper.clone().unwrap_or_default().to_uppercase(),
            )),
            _ => None,
        }
    }

    fn invoke_unmarshal_hook(&mut self, method: &str, field: &str, value: &Value) -> bool {
        match (method, field) {
            ("absorb", "upper") => match value.as_str() {
                Some(s) => {
                    self.upper = Some(s.to_lowercase());
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Stamped>()
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
}

// ── Digest / Sealed: raw-map hydration hook ──────────────────────

/// Hydrated exclusively through its type's raw-map hook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Digest {
    pub keys: Option<i64>,
}

pub fn digest_from_raw(record: &mut dyn Record, map: &JsonMap) -> bool {
    if map.contains_key("poison") {
        return false;
    }
    record.set_field("keys", FieldValue::json(map.len() as i64))
}

impl Digest {
    pub fn type_ref() -> TypeRef {
        TypeRef::for_type::<Digest>("Digest").with_hydrate_raw(digest_from_raw)
    }
}

static DIGEST_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| Schema::new().with_field("keys", FieldDef::new(Kind::Integer)));

impl Record for Digest {
    fn type_name(&self) -> &'static str {
        "Digest"
    }

    fn schema(&self) -> &'static Schema {
        &DIGEST_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        vec!["keys".into()]
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "keys" => self.keys.map(FieldValue::json),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        let FieldValue::Json(Value::Number(n)) = value else {
            return false;
        };
        match (field, n.as_i64()) {
            ("keys", Some(i)) => {
                self.keys = Some(i);
                true
            }
            _ => false,
        }
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Digest>()
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
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sealed {
    pub digest: Option<Digest>,
}

static SEALED_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| Schema::new().with_field("digest", FieldDef::object(Digest::type_ref())));

impl Record for Sealed {
    fn type_name(&self) -> &'static str {
        "Sealed"
    }

    fn schema(&self) -> &'static Schema {
        &SEALED_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        vec!["digest".into()]
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "digest" => self
                .digest
                .clone()
                .map(|d| FieldValue::Record(Box::new(d))),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        if field != "digest" {
            return false;
        }
        match value {
            FieldValue::Json(Value::Null) => {
                self.digest = None;
                true
            }
            FieldValue::Record(r) => match r.into_any().downcast::<Digest>() {
                Ok(d) => {
                    self.digest = Some(*d);
                    true
                }
                Err(_) => false,
            },
            _ => false,
        }
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Sealed>()
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
}

// ── Strict: rejects non-integer values on an undefined field ─────

/// Declares "limit" without a definition and only accepts integers
/// there, so a rejected passthrough assignment is observable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Strict {
    pub name: Option<String>,
    pub limit: Option<i64>,
}

static STRICT_SCHEMA: LazyLock<Schema> =
    LazyLock::new(|| Schema::new().with_field("name", FieldDef::new(Kind::String)));

impl Record for Strict {
    fn type_name(&self) -> &'static str {
        "Strict"
    }

    fn schema(&self) -> &'static Schema {
        &STRICT_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        vec!["name".into(), "limit".into()]
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => self.name.clone().map(FieldValue::json),
            "limit" => self.limit.map(FieldValue::json),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        let FieldValue::Json(v) = value else {
            return false;
        };
        match (field, v) {
            ("name", Value::String(s)) => {
                self.name = Some(s);
                true
            }
            ("limit", Value::Number(n)) => match n.as_i64() {
                Some(i) => {
                    self.limit = Some(i);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Strict>()
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
}

// ── Loose: inference fallback and declared-but-undefined fields ──

/// One untyped field with a scalar current value, one untyped field
/// with no usable current value, and one declared field that has no
/// definition at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Loose {
    pub hint: Value,
    pub mystery: Value,
    pub free: Value,
}

impl Default for Loose {
    fn default() -> Self {
        Self {
            hint: Value::from(0),
            mystery: Value::Null,
            free: Value::String(String::new()),
        }
    }
}

static LOOSE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .with_field("hint", FieldDef::untyped())
        .with_field("mystery", FieldDef::untyped())
});

impl Record for Loose {
    fn type_name(&self) -> &'static str {
        "Loose"
    }

    fn schema(&self) -> &'static Schema {
        &LOOSE_SCHEMA
    }

    fn field_names(&self) -> Vec<String> {
        vec!["hint".into(), "mystery".into(), "free".into()]
    }

    fn get_field(&self, field: &str) -> Option<FieldValue> {
        match field {
            "hint" => Some(FieldValue::Json(self.hint.clone())),
            "mystery" => Some(FieldValue::Json(self.mystery.clone())),
            "free" => Some(FieldValue::Json(self.free.clone())),
            _ => None,
        }
    }

    fn set_field(&mut self, field: &str, value: FieldValue) -> bool {
        let FieldValue::Json(v) = value else {
            return false;
        };
        match field {
            "hint" => self.hint = v,
            "mystery" => self.mystery = v,
            "free" => self.free = v,
            _ => return false,
        }
        true
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn eq_record(&self, other: &dyn Record) -> bool {
        other
            .as_any()
            .downcast_ref::<Loose>()
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
}
