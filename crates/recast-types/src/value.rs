//! Dynamic runtime values
//!
//! This module defines the `Value` enum used on both sides of a conversion:
//! the JSON-like representation handed to Load, and the typed program value
//! handed to Dump. Typed objects are modeled as `Instance`, which carries
//! enough shape (fields and declared member names) for the bound-receiver
//! heuristic to observe.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use indexmap::{IndexMap, IndexSet};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use thiserror::Error;

use crate::TypeRef;

/// The primary dynamic value type of the conversion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    // === Primitive Types ===
    /// Null value (missing/unknown)
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// Arbitrary precision decimal
    Decimal(Decimal),
    /// String value
    String(String),

    // === Temporal Types ===
    /// Calendar date
    Date(NaiveDate),
    /// Date and time with offset
    DateTime(DateTime<FixedOffset>),
    /// Time of day
    Time(NaiveTime),

    // === Structured Types ===
    /// Ordered list of values
    List(Vec<Value>),
    /// String-keyed record, field order preserved
    Record(IndexMap<String, Value>),
    /// Typed object instance
    Instance(Instance),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the runtime type of this value
    pub fn get_type(&self) -> TypeRef {
        match self {
            Self::Null => TypeRef::Any,
            Self::Boolean(_) => TypeRef::Boolean,
            Self::Integer(_) => TypeRef::Integer,
            Self::Decimal(_) => TypeRef::Decimal,
            Self::String(_) => TypeRef::String,
            Self::Date(_) => TypeRef::Date,
            Self::DateTime(_) => TypeRef::DateTime,
            Self::Time(_) => TypeRef::Time,
            Self::List(items) => TypeRef::List(Box::new(common_element_type(items))),
            Self::Record(_) => TypeRef::Record,
            Self::Instance(inst) => TypeRef::named(inst.type_name.clone()),
        }
    }

    /// Qualified name of this value's runtime type
    pub fn type_name(&self) -> String {
        self.get_type().qualified_name()
    }

    // === Accessors ===

    /// Try to get as Boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as Integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as Decimal
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Integer(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    /// Try to get as String
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as Date
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get as DateTime
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Try to get as Time
    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Try to get as List
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get as Record
    pub fn as_record(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Try to get as Instance
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(inst) => Some(inst),
            _ => None,
        }
    }

    // === Constructors ===

    /// Create a null value
    pub fn null() -> Self {
        Self::Null
    }

    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create a list value
    pub fn list(items: Vec<Value>) -> Self {
        Self::List(items)
    }

    /// Create a record value from ordered field pairs
    pub fn record(fields: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self::Record(fields.into_iter().collect())
    }

    // === JSON bridge ===

    /// Build a value from a JSON tree.
    ///
    /// The mapping is structural, not textual: integers stay integers,
    /// every other JSON number becomes a decimal, objects become records.
    /// Fails only for numbers outside the representable decimal range.
    pub fn from_json(json: &JsonValue) -> Result<Self, NumberRangeError> {
        match json {
            JsonValue::Null => Ok(Self::Null),
            JsonValue::Bool(b) => Ok(Self::Boolean(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self::Decimal(Decimal::from(u)))
                } else {
                    n.as_f64()
                        .and_then(Decimal::from_f64)
                        .map(Self::Decimal)
                        .ok_or_else(|| NumberRangeError {
                            number: n.to_string(),
                        })
                }
            }
            JsonValue::String(s) => Ok(Self::String(s.clone())),
            JsonValue::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            JsonValue::Object(fields) => fields
                .iter()
                .map(|(name, field)| Ok((name.clone(), Self::from_json(field)?)))
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(Self::Record),
        }
    }

    /// Render this value as a JSON tree.
    ///
    /// Temporals render as their canonical strings; decimals that do not
    /// survive an exact float round-trip fall back to strings; instances
    /// flatten to their fields (member names are not data).
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Boolean(b) => JsonValue::Bool(*b),
            Self::Integer(i) => JsonValue::Number((*i).into()),
            Self::Decimal(d) => d
                .to_f64()
                .and_then(serde_json::Number::from_f64)
                .map(JsonValue::Number)
                .unwrap_or_else(|| JsonValue::String(d.to_string())),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Date(d) => JsonValue::String(d.to_string()),
            Self::DateTime(dt) => JsonValue::String(dt.to_rfc3339()),
            Self::Time(t) => JsonValue::String(t.to_string()),
            Self::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Self::Record(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(name, field)| (name.clone(), field.to_json()))
                    .collect(),
            ),
            Self::Instance(inst) => JsonValue::Object(
                inst.fields
                    .iter()
                    .map(|(name, field)| (name.clone(), field.to_json()))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::String(s) => write!(f, "{}", s),
            Self::Date(d) => write!(f, "{}", d),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Time(t) => write!(f, "{}", t),
            other => write!(f, "{}", other.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Self::Instance(value)
    }
}

/// A typed object instance.
///
/// Fields hold data; `methods` lists the member names the instance's type
/// declares without making them values. Together they answer the only shape
/// question the conversion layer ever asks: "does this object expose a
/// member with a given name?"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Name of the instance's type
    pub type_name: String,
    /// Named field values, declaration order preserved
    pub fields: IndexMap<String, Value>,
    /// Declared method names
    pub methods: IndexSet<String>,
}

impl Instance {
    /// Create an empty instance of the named type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
            methods: IndexSet::new(),
        }
    }

    /// Add a field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Declare a method name
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.methods.insert(name.into());
        self
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Check whether the instance exposes a member (field or method) with
    /// the given name
    pub fn has_member(&self, name: &str) -> bool {
        self.fields.contains_key(name) || self.methods.contains(name)
    }
}

/// Error produced when a JSON number cannot be represented as a `Value`.
#[derive(Debug, Clone, Error)]
#[error("JSON number {number} is outside the representable decimal range")]
pub struct NumberRangeError {
    /// The offending number, as JSON text
    pub number: String,
}

fn common_element_type(items: &[Value]) -> TypeRef {
    match items.split_first() {
        None => TypeRef::Any,
        Some((first, rest)) => {
            let elem = first.get_type();
            if rest.iter().all(|item| item.get_type() == elem) {
                elem
            } else {
                TypeRef::Any
            }
        }
    }
}
