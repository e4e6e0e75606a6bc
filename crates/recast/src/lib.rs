//! recast: type-directed conversion for dynamic data
//!
//! recast converts values between a dynamic, JSON-like representation and
//! strongly typed program values, and retrofits that conversion onto
//! existing callables: declare a callable's parameter and return types
//! once, and every invocation converts its arguments and result through a
//! pluggable conversion port.
//!
//! The crate is a facade over the member crates:
//! - [`types`]: the `TypeRef` / `Value` data model
//! - [`convert`]: the port capability, fork namespaces, union resolution
//! - [`adapt`]: signature introspection and the call adapters
//!
//! # Example
//!
//! ```ignore
//! use recast::{Adapter, CallableDecl, CallArgs, TypeRef};
//! use std::sync::Arc;
//!
//! // `port` implements recast::ConversionPort
//! let adapted = Adapter::loaded(Arc::new(port)).adapt_fn(
//!     CallableDecl::function("book")
//!         .parameter("when", TypeRef::Date)
//!         .returns(TypeRef::Date),
//!     |args| {
//!         // args.positional[0] is already a typed date here
//!         Ok(args.positional[0].clone())
//!     },
//! )?;
//!
//! let booked = adapted.call(CallArgs::new().arg("2018-10-04"))?;
//! ```

// Re-export all public APIs from internal crates
pub use recast_adapt as adapt;
pub use recast_convert as convert;
pub use recast_types as types;

// Convenience re-exports
pub use recast_adapt::{
    AdaptError, AdaptResult, AdaptedAsyncFn, AdaptedCallable, AdaptedFn, Adapter, AsyncCallable,
    CallArgs, CallableBody, CallableDecl, CallableKind, FunctionSignature, ParameterSpec,
    UnsupportedCallableError, looks_like_bound_receiver,
};
pub use recast_convert::{
    ConversionError, ConversionPort, ConversionRequest, ConvertOptions, ConvertResult, Namespace,
    PortError, UnionError, Variant, resolve_union,
};
pub use recast_types::{Instance, TypeRef, Value};
