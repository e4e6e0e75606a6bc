//! Adapter errors
//!
//! Wrap-time misuse and call-time failure are distinct families: the
//! former is raised by `adapt()` before any wrapper exists, the latter
//! fails one invocation and leaves the wrapper reusable.

use recast_convert::PortError;
use thiserror::Error;

/// Result type for adapted invocations
pub type AdaptResult<T> = Result<T, AdaptError>;

/// Call-time failures of an adapted callable.
#[derive(Debug, Error)]
pub enum AdaptError {
    /// A conversion request failed; propagated verbatim, never retried
    #[error(transparent)]
    Port(#[from] PortError),

    /// The wrapped callable itself failed
    #[error("callable '{name}' failed: {message}")]
    Callable { name: String, message: String },

    /// More positional arguments than declared parameters
    #[error("'{name}' takes {arity} positional arguments but {supplied} were given")]
    TooManyArguments {
        name: String,
        arity: usize,
        supplied: usize,
    },
}

impl AdaptError {
    /// Create a wrapped-callable failure
    pub fn callable(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Callable {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Wrap-time rejection of a callable that cannot be adapted.
///
/// Detected eagerly at `adapt()` so no invocation ever observes it.
#[derive(Debug, Clone, Error)]
pub enum UnsupportedCallableError {
    /// Static- or class-bound method descriptors pair positions and detect
    /// receivers unreliably
    #[error(
        "cannot adapt static- or class-bound method '{name}'; adapt the underlying \
         function first, then apply the binding modifier on top"
    )]
    BoundDescriptor { name: String },

    /// A whole type is ambiguous to adapt
    #[error("cannot adapt type '{name}'; adapt one of its callables instead")]
    TypeTarget { name: String },
}
