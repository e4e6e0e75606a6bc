//! Bound-receiver detection
//!
//! Receiver arguments are typically already the correct runtime type, and
//! often not even representable in the wire format, so they must bypass
//! conversion. Detection is name-and-shape based: a receiver-named
//! parameter whose argument exposes a member named like the wrapped
//! callable is treated as a bound receiver.
//!
//! Known limit: a genuine receiver whose type does not expose such a
//! member is a false negative and gets converted like any other argument.

use recast_types::Value;

/// Conventional receiver parameter names.
pub const RECEIVER_NAMES: [&str; 2] = ["self", "cls"];

/// Check whether a parameter name follows the receiver convention.
pub fn is_receiver_name(name: &str) -> bool {
    RECEIVER_NAMES.contains(&name)
}

/// Check whether an argument looks like a bound receiver of the named
/// callable: an instance exposing a member (field or method) with the
/// callable's name.
pub fn looks_like_bound_receiver(arg: &Value, callable_name: &str) -> bool {
    matches!(arg, Value::Instance(inst) if inst.has_member(callable_name))
}
