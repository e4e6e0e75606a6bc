//! The conversion port capability
//!
//! A `ConversionPort` is the external collaborator that does the actual
//! value transformation. The core composes ports; it never implements a
//! concrete converter itself. Ports come in two polymorphic variants:
//! *Load* (representation to typed value) and *Dump* (typed value to
//! representation), selected by `Variant` at wrap time.

use indexmap::IndexMap;
use recast_types::{TypeRef, Value};

use crate::error::ConvertResult;
use crate::namespace::Namespace;

/// The conversion direction a caller selects at wrap time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Representation to typed value
    Load,
    /// Typed value to representation
    Dump,
}

impl Variant {
    /// Variant name, for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Dump => "dump",
        }
    }
}

/// Opaque options forwarded verbatim to every conversion request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    entries: IndexMap<String, Value>,
}

impl ConvertOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Look up an option
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Check if no options are set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate options in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// One conversion request, constructed fresh per argument or return value.
///
/// A request with no target type asks the port to do whatever its default
/// is for the value itself (typically "infer from the value").
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// The value to convert
    pub value: Value,
    /// The declared target type, if any
    pub target_type: Option<TypeRef>,
    /// The fork deciding which converters are visible
    pub namespace: Namespace,
    /// Caller options, forwarded opaquely
    pub options: ConvertOptions,
}

impl ConversionRequest {
    /// Create a request
    pub fn new(
        value: Value,
        target_type: Option<TypeRef>,
        namespace: Namespace,
        options: ConvertOptions,
    ) -> Self {
        Self {
            value,
            target_type,
            namespace,
            options,
        }
    }

    /// Name of the target type, for diagnostics
    pub fn target_name(&self) -> String {
        self.target_type
            .as_ref()
            .map(TypeRef::qualified_name)
            .unwrap_or_else(|| "Any".to_string())
    }
}

/// The Load/Dump capability the conversion core delegates to.
///
/// Both operations must be deterministic given identical requests, must be
/// safe for concurrent use, and must signal recoverable failures only
/// through the `ConversionError` family (wrapped in `PortError`).
pub trait ConversionPort: Send + Sync {
    /// Convert a representation into a typed value
    fn load(&self, request: &ConversionRequest) -> ConvertResult<Value>;

    /// Convert a typed value into a representation
    fn dump(&self, request: &ConversionRequest) -> ConvertResult<Value>;

    /// Dispatch on the wrap-time variant
    fn convert(&self, variant: Variant, request: &ConversionRequest) -> ConvertResult<Value> {
        match variant {
            Variant::Load => self.load(request),
            Variant::Dump => self.dump(request),
        }
    }
}
