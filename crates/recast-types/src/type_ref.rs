//! Runtime type representation
//!
//! This module defines `TypeRef`, the vocabulary of conversion target types:
//! - primitive and temporal built-ins
//! - parameterized collection and union types
//! - named types resolved by whatever converters live behind a port

use serde::{Deserialize, Serialize};
use std::fmt;

/// A runtime reference to a conversion target type.
///
/// A `TypeRef` is what a callable declares for a parameter or return value
/// and what a conversion port receives as the target of a request. The
/// `Union` variant is ordered: candidate order is a semantic contract, not
/// an implementation detail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "of")]
pub enum TypeRef {
    // === Special Types ===
    /// The Any type - no conversion constraint
    Any,

    // === Primitive Types ===
    /// Boolean type
    Boolean,
    /// 64-bit signed integer
    Integer,
    /// Arbitrary precision decimal
    Decimal,
    /// Unicode string
    String,

    // === Temporal Types ===
    /// Calendar date
    Date,
    /// Date and time with offset
    DateTime,
    /// Time of day
    Time,

    // === Structured Types ===
    /// List with a uniform element type
    List(Box<TypeRef>),
    /// Untyped record (string-keyed map)
    Record,

    // === Union Type ===
    /// Ordered choice of candidate types; first successful conversion wins
    Union(Vec<TypeRef>),

    // === Named Types ===
    /// Named type reference resolved by the active namespace
    Named {
        /// Optional namespace qualifier
        namespace: Option<String>,
        /// Type name
        name: String,
    },
}

impl TypeRef {
    // === Constructors ===

    /// Create a list type
    pub fn list(element_type: TypeRef) -> Self {
        Self::List(Box::new(element_type))
    }

    /// Create a union type from ordered candidates
    pub fn union(candidates: Vec<TypeRef>) -> Self {
        Self::Union(candidates)
    }

    /// Create an unqualified named type
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            namespace: None,
            name: name.into(),
        }
    }

    /// Create a qualified named type
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    // === Type Properties ===

    /// Check if this is the Any type
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Check if this is a primitive type
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::Integer | Self::Decimal | Self::String
        )
    }

    /// Check if this is a temporal type
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::Time)
    }

    /// Check if this is a structured type
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::List(_) | Self::Record)
    }

    /// Check if this is a union type
    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    /// Get the simple name of this type
    pub fn name(&self) -> &str {
        match self {
            Self::Any => "Any",
            Self::Boolean => "Boolean",
            Self::Integer => "Integer",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::Time => "Time",
            Self::List(_) => "List",
            Self::Record => "Record",
            Self::Union(_) => "Union",
            Self::Named { name, .. } => name,
        }
    }

    /// Get the fully qualified name of this type
    pub fn qualified_name(&self) -> String {
        match self {
            Self::List(elem) => format!("List<{}>", elem.qualified_name()),
            Self::Union(candidates) => {
                let names: Vec<String> =
                    candidates.iter().map(|c| c.qualified_name()).collect();
                format!("Union<{}>", names.join(", "))
            }
            Self::Named {
                namespace: Some(ns),
                name,
            } => format!("{}.{}", ns, name),
            other => other.name().to_string(),
        }
    }

    /// Get the element type for List types
    pub fn element_type(&self) -> Option<&TypeRef> {
        match self {
            Self::List(elem) => Some(elem),
            _ => None,
        }
    }

    /// Get the ordered candidates for Union types
    pub fn candidates(&self) -> Option<&[TypeRef]> {
        match self {
            Self::Union(candidates) => Some(candidates),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name())
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::Any
    }
}
