//! Shared test doubles for the integration suite
#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, NaiveTime};
use parking_lot::Mutex;
use recast::{
    ConversionError, ConversionPort, ConversionRequest, ConvertResult, PortError, TypeRef, Value,
    resolve_union,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

/// One observed conversion request.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub variant: &'static str,
    pub target: String,
    pub value: Value,
}

/// A lenient parsing port that records every request it receives.
///
/// Load parses wire shapes (strings into integers, decimals, temporals),
/// dump renders typed values back into wire shapes. Union targets delegate
/// to `resolve_union`, exercising the resolver as a registered handler.
#[derive(Default)]
pub struct RecordingPort {
    log: Mutex<Vec<Recorded>>,
}

impl RecordingPort {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every request seen so far
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().clone()
    }

    /// Target names seen so far, in request order
    pub fn targets(&self) -> Vec<String> {
        self.log.lock().iter().map(|r| r.target.clone()).collect()
    }

    /// Check whether a given value ever went through the port
    pub fn saw_value(&self, value: &Value) -> bool {
        self.log.lock().iter().any(|r| &r.value == value)
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().len()
    }

    fn record(&self, variant: &'static str, request: &ConversionRequest) {
        self.log.lock().push(Recorded {
            variant,
            target: request.target_name(),
            value: request.value.clone(),
        });
    }
}

impl ConversionPort for RecordingPort {
    fn load(&self, request: &ConversionRequest) -> ConvertResult<Value> {
        self.record("load", request);
        let Some(target) = request.target_type.clone() else {
            return Ok(request.value.clone());
        };
        match &target {
            TypeRef::Any => Ok(request.value.clone()),
            TypeRef::Integer => match &request.value {
                Value::Integer(i) => Ok(Value::Integer(*i)),
                Value::String(s) => s
                    .parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| ConversionError::unparsable(&request.value, &target).into()),
                other => Err(ConversionError::mismatch(other, &target).into()),
            },
            TypeRef::Decimal => match &request.value {
                Value::Decimal(d) => Ok(Value::Decimal(*d)),
                Value::Integer(i) => Ok(Value::Decimal(Decimal::from(*i))),
                Value::String(s) => Decimal::from_str(s)
                    .map(Value::Decimal)
                    .map_err(|_| ConversionError::unparsable(&request.value, &target).into()),
                other => Err(ConversionError::mismatch(other, &target).into()),
            },
            TypeRef::Boolean => match &request.value {
                Value::Boolean(b) => Ok(Value::Boolean(*b)),
                Value::String(s) if s == "true" => Ok(Value::Boolean(true)),
                Value::String(s) if s == "false" => Ok(Value::Boolean(false)),
                other => Err(ConversionError::mismatch(other, &target).into()),
            },
            TypeRef::String => match &request.value {
                Value::String(s) => Ok(Value::String(s.clone())),
                other => Err(ConversionError::mismatch(other, &target).into()),
            },
            TypeRef::Date => match &request.value {
                Value::Date(d) => Ok(Value::Date(*d)),
                Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map(Value::Date)
                    .map_err(|_| ConversionError::unparsable(&request.value, &target).into()),
                other => Err(ConversionError::mismatch(other, &target).into()),
            },
            TypeRef::DateTime => match &request.value {
                Value::DateTime(dt) => Ok(Value::DateTime(*dt)),
                Value::String(s) => DateTime::parse_from_rfc3339(s)
                    .map(Value::DateTime)
                    .map_err(|_| ConversionError::unparsable(&request.value, &target).into()),
                other => Err(ConversionError::mismatch(other, &target).into()),
            },
            TypeRef::Time => match &request.value {
                Value::Time(t) => Ok(Value::Time(*t)),
                Value::String(s) => NaiveTime::parse_from_str(s, "%H:%M:%S")
                    .map(Value::Time)
                    .map_err(|_| ConversionError::unparsable(&request.value, &target).into()),
                other => Err(ConversionError::mismatch(other, &target).into()),
            },
            TypeRef::List(elem) => match &request.value {
                Value::List(items) => items
                    .iter()
                    .map(|item| {
                        let sub = ConversionRequest::new(
                            item.clone(),
                            Some((**elem).clone()),
                            request.namespace.clone(),
                            request.options.clone(),
                        );
                        self.load(&sub)
                    })
                    .collect::<ConvertResult<Vec<_>>>()
                    .map(Value::List),
                other => Err(ConversionError::mismatch(other, &target).into()),
            },
            TypeRef::Record => match &request.value {
                Value::Record(fields) => Ok(Value::Record(fields.clone())),
                other => Err(ConversionError::mismatch(other, &target).into()),
            },
            TypeRef::Union(candidates) => resolve_union(
                &request.value,
                candidates,
                self,
                &request.namespace,
                &request.options,
            )
            .map_err(PortError::from),
            TypeRef::Named { .. } => Err(ConversionError::no_converter(&target).into()),
        }
    }

    fn dump(&self, request: &ConversionRequest) -> ConvertResult<Value> {
        self.record("dump", request);
        Ok(dump_value(&request.value))
    }
}

fn dump_value(value: &Value) -> Value {
    match value {
        Value::Date(d) => Value::String(d.to_string()),
        Value::DateTime(dt) => Value::String(dt.to_rfc3339()),
        Value::Time(t) => Value::String(t.to_string()),
        Value::List(items) => Value::List(items.iter().map(dump_value).collect()),
        Value::Instance(inst) => Value::Record(
            inst.fields
                .iter()
                .map(|(name, field)| (name.clone(), dump_value(field)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// An identity-only port: a value loads into a target only when its
/// runtime type already matches. Records the targets it was asked for.
#[derive(Default)]
pub struct StrictPort {
    pub attempts: Mutex<Vec<String>>,
}

impl ConversionPort for StrictPort {
    fn load(&self, request: &ConversionRequest) -> ConvertResult<Value> {
        let target = request.target_type.clone().unwrap_or_default();
        self.attempts.lock().push(target.qualified_name());
        if request.value.get_type() == target {
            Ok(request.value.clone())
        } else {
            Err(ConversionError::mismatch(&request.value, &target).into())
        }
    }

    fn dump(&self, request: &ConversionRequest) -> ConvertResult<Value> {
        Ok(request.value.clone())
    }
}
