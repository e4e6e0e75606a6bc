//! Callable declarations and bodies
//!
//! Rust has no runtime reflection over closures, so the caller declares
//! the shape up front: the callable's name, its kind, its ordered
//! parameters with optional declared types, and its optional return type.
//! The declaration is consumed once at wrap time.

use async_trait::async_trait;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use recast_types::{TypeRef, Value};
use std::sync::Arc;

use crate::error::AdaptResult;

/// What kind of callable a declaration describes.
///
/// The kind is the wrap-time capability tag the validity guard inspects:
/// static- and class-bound descriptors and whole types cannot be adapted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallableKind {
    /// A free function
    Function,
    /// An instance method (receiver-first calling convention)
    Method,
    /// A static-bound method descriptor
    StaticMethod,
    /// A class-bound method descriptor
    ClassMethod,
    /// A type (class/record definition) rather than a callable
    Type,
}

impl CallableKind {
    /// Human-readable kind name, for diagnostics
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::StaticMethod => "static method",
            Self::ClassMethod => "class method",
            Self::Type => "type",
        }
    }
}

/// Declared shape of a callable about to be adapted.
#[derive(Debug, Clone, PartialEq)]
pub struct CallableDecl {
    /// Callable name (also what the receiver heuristic looks up on
    /// candidate receiver objects)
    pub name: String,
    /// Callable kind
    pub kind: CallableKind,
    /// Ordered parameters: name and optional declared type
    pub parameters: Vec<(String, Option<TypeRef>)>,
    /// Declared return type, if any
    pub return_type: Option<TypeRef>,
}

impl CallableDecl {
    fn new(name: impl Into<String>, kind: CallableKind) -> Self {
        Self {
            name: name.into(),
            kind,
            parameters: Vec::new(),
            return_type: None,
        }
    }

    /// Declare a free function
    pub fn function(name: impl Into<String>) -> Self {
        Self::new(name, CallableKind::Function)
    }

    /// Declare an instance method
    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, CallableKind::Method)
    }

    /// Declare a static-bound method descriptor
    pub fn static_method(name: impl Into<String>) -> Self {
        Self::new(name, CallableKind::StaticMethod)
    }

    /// Declare a class-bound method descriptor
    pub fn class_method(name: impl Into<String>) -> Self {
        Self::new(name, CallableKind::ClassMethod)
    }

    /// Declare a type rather than a callable
    pub fn type_definition(name: impl Into<String>) -> Self {
        Self::new(name, CallableKind::Type)
    }

    /// Add a parameter with a declared type
    pub fn parameter(mut self, name: impl Into<String>, declared_type: TypeRef) -> Self {
        self.parameters.push((name.into(), Some(declared_type)));
        self
    }

    /// Add a parameter without a declared type
    pub fn untyped_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameters.push((name.into(), None));
        self
    }

    /// Declare the return type
    pub fn returns(mut self, return_type: TypeRef) -> Self {
        self.return_type = Some(return_type);
        self
    }
}

/// Arguments to a wrapped or adapted callable.
///
/// Only positional arguments participate in conversion; named arguments are
/// always forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    /// Positional arguments, call-site order
    pub positional: Vec<Value>,
    /// Named arguments, never converted
    pub named: IndexMap<String, Value>,
}

impl CallArgs {
    /// Create an empty argument pack
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from positional arguments
    pub fn positional(args: Vec<Value>) -> Self {
        Self {
            positional: args,
            named: IndexMap::new(),
        }
    }

    /// Append a positional argument, builder style
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a named argument, builder style
    pub fn named_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }
}

/// Body of an ordinary callable.
pub type SyncFn = Arc<dyn Fn(CallArgs) -> AdaptResult<Value> + Send + Sync>;

/// Body of a suspending callable.
#[async_trait]
pub trait AsyncCallable: Send + Sync {
    /// Invoke the callable; the returned future is the suspension point
    async fn invoke(&self, args: CallArgs) -> AdaptResult<Value>;
}

#[async_trait]
impl<F> AsyncCallable for F
where
    F: Fn(CallArgs) -> BoxFuture<'static, AdaptResult<Value>> + Send + Sync,
{
    async fn invoke(&self, args: CallArgs) -> AdaptResult<Value> {
        (self)(args).await
    }
}

/// A callable body plus its synchronicity, fixed at wrap time.
#[derive(Clone)]
pub enum CallableBody {
    /// Ordinary callable: the wrapper returns directly
    Sync(SyncFn),
    /// Suspending callable: the wrapper awaits the body before converting
    /// the result
    Async(Arc<dyn AsyncCallable>),
}

impl CallableBody {
    /// Wrap an ordinary closure
    pub fn sync<F>(body: F) -> Self
    where
        F: Fn(CallArgs) -> AdaptResult<Value> + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(body))
    }

    /// Wrap a suspending callable
    pub fn suspending(body: impl AsyncCallable + 'static) -> Self {
        Self::Async(Arc::new(body))
    }

    /// Check whether this body suspends
    pub fn is_suspending(&self) -> bool {
        matches!(self, Self::Async(_))
    }
}
