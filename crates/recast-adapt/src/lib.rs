//! recast call adaptation
//!
//! This crate retrofits type-directed conversion onto existing callables:
//!
//! - `CallableDecl`: the caller-declared shape of a callable (name, kind,
//!   parameters, return type)
//! - `FunctionSignature`: the immutable signature derived once at wrap time
//! - `Adapter`: the factory building replacement callables over a
//!   conversion port, with load- and dump-adapting presets
//! - `AdaptedFn` / `AdaptedAsyncFn`: the direct-return and
//!   suspend-until-resolved wrapper shapes, selected at wrap time
//! - the bound-receiver predicate and the wrap-time validity guard
//!
//! # Example
//!
//! ```ignore
//! use recast_adapt::{Adapter, CallableDecl, CallArgs};
//! use recast_types::{TypeRef, Value};
//!
//! let adapted = Adapter::loaded(port).adapt_fn(
//!     CallableDecl::function("on_date").parameter("when", TypeRef::Date),
//!     |args| Ok(args.positional[0].clone()),
//! )?;
//!
//! // "2018-10-04" arrives as a typed date inside the body
//! let result = adapted.call(CallArgs::new().arg("2018-10-04"))?;
//! ```

pub mod adapter;
pub mod callable;
pub mod error;
pub mod receiver;
pub mod signature;

pub use adapter::{AdaptedAsyncFn, AdaptedCallable, AdaptedFn, Adapter};
pub use callable::{AsyncCallable, CallArgs, CallableBody, CallableDecl, CallableKind, SyncFn};
pub use error::{AdaptError, AdaptResult, UnsupportedCallableError};
pub use receiver::{RECEIVER_NAMES, is_receiver_name, looks_like_bound_receiver};
pub use signature::{FunctionSignature, ParameterSpec};
