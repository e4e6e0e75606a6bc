//! The immutable signature model
//!
//! A `FunctionSignature` is derived from a `CallableDecl` exactly once, at
//! wrap time, and read immutably by every subsequent invocation. Deriving
//! it up front keeps per-call dispatch free of any reflection-like cost.

use recast_types::TypeRef;

use crate::callable::CallableDecl;

/// One formal parameter of a wrapped callable.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Parameter name
    pub name: String,
    /// Declared type; `None` means conversion runs with no target type
    pub declared_type: Option<TypeRef>,
    /// 0-based positional index
    pub position: usize,
}

/// The derived, immutable shape of a wrapped callable.
///
/// Positions are a dense 0-based sequence matching call-site positional
/// order; the struct is never mutated after construction and is safe to
/// read concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    parameters: Vec<ParameterSpec>,
    return_type: Option<TypeRef>,
}

impl FunctionSignature {
    /// Derive the signature from a declaration. Runs once per wrap.
    pub fn introspect(decl: &CallableDecl) -> Self {
        let parameters = decl
            .parameters
            .iter()
            .enumerate()
            .map(|(position, (name, declared_type))| ParameterSpec {
                name: name.clone(),
                declared_type: declared_type.clone(),
                position,
            })
            .collect();
        Self {
            parameters,
            return_type: decl.return_type.clone(),
        }
    }

    /// The ordered parameter specs
    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    /// The spec at a positional index
    pub fn parameter(&self, position: usize) -> Option<&ParameterSpec> {
        self.parameters.get(position)
    }

    /// Number of declared parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// The declared return type, if any
    pub fn return_type(&self) -> Option<&TypeRef> {
        self.return_type.as_ref()
    }
}
