//! Union resolution
//!
//! Converts a value into the first candidate type a Load port accepts.
//! Candidate order is the tie-break rule: the first success wins even if a
//! later candidate would match "better", so unions must be declared from
//! most- to least-specific.

use log::trace;
use recast_types::{TypeRef, Value};

use crate::error::{PortError, UnionError};
use crate::namespace::Namespace;
use crate::port::{ConversionPort, ConversionRequest, ConvertOptions};

/// Resolve a value against an ordered list of candidate types.
///
/// Each candidate is tried with the port's Load variant, in declared order:
/// - the first successful conversion is returned immediately;
/// - a recoverable `ConversionError` moves on to the next candidate;
/// - any other port failure propagates immediately, unswallowed;
/// - exhausting every candidate yields `UnionError::NoMatch` naming all
///   tried candidates and the value's runtime type.
///
/// The candidate list is never mutated or reordered. Duplicates are not
/// deduplicated; they just waste an attempt. An empty list resolves to
/// `NoMatch` directly.
pub fn resolve_union(
    value: &Value,
    candidates: &[TypeRef],
    port: &dyn ConversionPort,
    namespace: &Namespace,
    options: &ConvertOptions,
) -> Result<Value, UnionError> {
    for candidate in candidates {
        let request = ConversionRequest::new(
            value.clone(),
            Some(candidate.clone()),
            namespace.clone(),
            options.clone(),
        );
        match port.load(&request) {
            Ok(converted) => {
                trace!("union candidate {} accepted", candidate.qualified_name());
                return Ok(converted);
            }
            Err(PortError::Conversion(rejected)) => {
                trace!(
                    "union candidate {} rejected: {}",
                    candidate.qualified_name(),
                    rejected
                );
            }
            Err(fatal) => return Err(UnionError::Port(fatal)),
        }
    }
    Err(UnionError::no_match(value, candidates))
}
