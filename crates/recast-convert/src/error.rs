//! Error types for the conversion surface

use recast_types::{TypeRef, Value};
use thiserror::Error;

/// Result type for port operations
pub type ConvertResult<T> = Result<T, PortError>;

/// The recognized family of recoverable conversion failures.
///
/// Ports raise these for "this value does not convert to that type"
/// situations. They are the only failures union resolution treats as
/// "try the next candidate".
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    /// The value's shape does not match the target type
    #[error("cannot convert value of type {from} to {to}")]
    Mismatch { from: String, to: String },

    /// The value is the right shape but its content does not parse
    #[error("cannot parse '{value}' as {to}")]
    Unparsable { value: String, to: String },

    /// The active namespace knows no converter for the target type
    #[error("no converter registered for {target}")]
    NoConverter { target: String },

    /// Free-form conversion failure
    #[error("{message}")]
    Message { message: String },
}

impl ConversionError {
    /// Create a shape-mismatch error
    pub fn mismatch(from: &Value, to: &TypeRef) -> Self {
        Self::Mismatch {
            from: from.type_name(),
            to: to.qualified_name(),
        }
    }

    /// Create a content-parse error
    pub fn unparsable(value: &Value, to: &TypeRef) -> Self {
        Self::Unparsable {
            value: value.to_string(),
            to: to.qualified_name(),
        }
    }

    /// Create a missing-converter error
    pub fn no_converter(target: &TypeRef) -> Self {
        Self::NoConverter {
            target: target.qualified_name(),
        }
    }

    /// Create a free-form conversion error
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Any failure a conversion port can produce.
///
/// `Conversion` wraps the recoverable family; `Port` is everything else
/// (I/O behind a converter, a poisoned registry, a bug). Union resolution
/// swallows the former and propagates the latter.
#[derive(Debug, Clone, Error)]
pub enum PortError {
    /// A recoverable conversion failure
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A failure that is not an ordinary conversion mismatch
    #[error("conversion port failure: {message}")]
    Port { message: String },
}

impl PortError {
    /// Create a non-conversion port failure
    pub fn port(message: impl Into<String>) -> Self {
        Self::Port {
            message: message.into(),
        }
    }

    /// Check whether this is a recoverable conversion failure
    pub fn is_conversion(&self) -> bool {
        matches!(self, Self::Conversion(_))
    }
}

/// Errors produced by union resolution.
#[derive(Debug, Clone, Error)]
pub enum UnionError {
    /// Every candidate was tried and none matched
    #[error("cannot match value of type {value_type} to any candidate of the union: {candidates}")]
    NoMatch {
        /// Runtime type of the value under resolution
        value_type: String,
        /// Comma-separated names of every tried candidate
        candidates: String,
    },

    /// A port failure that is not an ordinary conversion mismatch
    #[error(transparent)]
    Port(PortError),
}

impl UnionError {
    /// Create an exhaustion error naming every tried candidate
    pub fn no_match(value: &Value, candidates: &[TypeRef]) -> Self {
        let names: Vec<String> = candidates.iter().map(TypeRef::qualified_name).collect();
        Self::NoMatch {
            value_type: value.type_name(),
            candidates: names.join(", "),
        }
    }
}

/// An exhausted union is itself a recoverable conversion failure, so a
/// resolver registered behind a port composes: an outer union treats an
/// inner exhausted union as "try the next candidate".
impl From<UnionError> for PortError {
    fn from(error: UnionError) -> Self {
        match error {
            UnionError::NoMatch { .. } => {
                Self::Conversion(ConversionError::message(error.to_string()))
            }
            UnionError::Port(port) => port,
        }
    }
}
