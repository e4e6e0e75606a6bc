//! recast conversion surface
//!
//! This crate defines the capability boundary between the conversion core
//! and the converters that do the real work:
//! - `ConversionPort`: the Load/Dump capability interface
//! - `ConversionRequest` / `ConvertOptions`: per-request payload
//! - `Namespace`: the opaque fork handle selecting visible converters
//! - `resolve_union`: first-success resolution over ordered candidates
//! - the conversion error taxonomy

pub mod error;
pub mod namespace;
pub mod port;
pub mod union;

pub use error::{ConversionError, ConvertResult, PortError, UnionError};
pub use namespace::Namespace;
pub use port::{ConversionPort, ConversionRequest, ConvertOptions, Variant};
pub use union::resolve_union;
