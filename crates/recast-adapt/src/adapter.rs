//! The call adapter
//!
//! `Adapter` builds replacement callables whose declared parameter and
//! return types drive conversion through a port. The wrapper keeps the
//! wrapped callable's external calling convention: positional arguments
//! are converted against the signature, named arguments pass through, and
//! the result is converted against the declared return type.
//!
//! Synchronicity is fixed at wrap time: an ordinary body yields an
//! `AdaptedFn`, a suspending body an `AdaptedAsyncFn`. Parameter
//! conversion is always eager and synchronous; the async wrapper's only
//! suspension point is awaiting the body itself, and a cancelled call
//! never reaches return-value conversion.

use log::{debug, trace, warn};
use recast_convert::{ConversionPort, ConversionRequest, ConvertOptions, Namespace, Variant};
use recast_types::Value;
use std::sync::Arc;

use crate::callable::{AsyncCallable, CallArgs, CallableBody, CallableDecl, CallableKind, SyncFn};
use crate::error::{AdaptError, AdaptResult, UnsupportedCallableError};
use crate::receiver::{is_receiver_name, looks_like_bound_receiver};
use crate::signature::FunctionSignature;

/// Factory for adapted callables.
///
/// Configure once, adapt many: the builder carries the port, the
/// conversion variant, the parameter/return toggles, the namespace and the
/// options every wrapper built from it will use.
#[derive(Clone)]
pub struct Adapter {
    port: Arc<dyn ConversionPort>,
    variant: Variant,
    convert_parameters: bool,
    convert_return: bool,
    namespace: Namespace,
    options: ConvertOptions,
}

impl Adapter {
    fn new(port: Arc<dyn ConversionPort>, variant: Variant) -> Self {
        Self {
            port,
            variant,
            convert_parameters: true,
            convert_return: true,
            namespace: Namespace::root(),
            options: ConvertOptions::new(),
        }
    }

    /// Load-adapting factory: arguments and results are converted from
    /// their representation into typed values
    pub fn loaded(port: Arc<dyn ConversionPort>) -> Self {
        Self::new(port, Variant::Load)
    }

    /// Dump-adapting factory: arguments and results are converted from
    /// typed values into their representation
    pub fn dumped(port: Arc<dyn ConversionPort>) -> Self {
        Self::new(port, Variant::Dump)
    }

    /// Toggle parameter conversion
    pub fn parameters(mut self, convert: bool) -> Self {
        self.convert_parameters = convert;
        self
    }

    /// Toggle return-value conversion
    pub fn return_value(mut self, convert: bool) -> Self {
        self.convert_return = convert;
        self
    }

    /// Use a specific fork namespace
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    /// Add an option forwarded to every conversion request
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options = self.options.with(key, value);
        self
    }

    /// Replace the forwarded options wholesale
    pub fn options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// The conversion variant this factory applies
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Build a wrapper for the declared callable.
    ///
    /// Rejects static- and class-bound method descriptors and whole types
    /// eagerly; no invocation ever observes those errors. The signature is
    /// introspected here, once, and shared immutably by every call.
    pub fn adapt(
        &self,
        decl: CallableDecl,
        body: CallableBody,
    ) -> Result<AdaptedCallable, UnsupportedCallableError> {
        ensure_adaptable(&decl)?;
        let signature = FunctionSignature::introspect(&decl);
        debug!(
            "adapting {} '{}' ({} parameters, {} variant)",
            decl.kind.describe(),
            decl.name,
            signature.arity(),
            self.variant.name()
        );
        let core = Arc::new(AdapterCore {
            name: decl.name,
            signature,
            port: Arc::clone(&self.port),
            variant: self.variant,
            convert_parameters: self.convert_parameters,
            convert_return: self.convert_return,
            namespace: self.namespace.clone(),
            options: self.options.clone(),
        });
        Ok(match body {
            CallableBody::Sync(body) => AdaptedCallable::Sync(AdaptedFn { core, body }),
            CallableBody::Async(body) => AdaptedCallable::Async(AdaptedAsyncFn { core, body }),
        })
    }

    /// Convenience: adapt an ordinary closure
    pub fn adapt_fn<F>(
        &self,
        decl: CallableDecl,
        body: F,
    ) -> Result<AdaptedFn, UnsupportedCallableError>
    where
        F: Fn(CallArgs) -> AdaptResult<Value> + Send + Sync + 'static,
    {
        match self.adapt(decl, CallableBody::sync(body))? {
            AdaptedCallable::Sync(adapted) => Ok(adapted),
            AdaptedCallable::Async(_) => unreachable!("sync body produced async wrapper"),
        }
    }

    /// Convenience: adapt a suspending callable
    pub fn adapt_async(
        &self,
        decl: CallableDecl,
        body: impl AsyncCallable + 'static,
    ) -> Result<AdaptedAsyncFn, UnsupportedCallableError> {
        match self.adapt(decl, CallableBody::suspending(body))? {
            AdaptedCallable::Async(adapted) => Ok(adapted),
            AdaptedCallable::Sync(_) => unreachable!("async body produced sync wrapper"),
        }
    }
}

fn ensure_adaptable(decl: &CallableDecl) -> Result<(), UnsupportedCallableError> {
    match decl.kind {
        CallableKind::StaticMethod | CallableKind::ClassMethod => {
            warn!(
                "refusing to adapt {} '{}': adapt the underlying function first, \
                 then apply the binding modifier on top",
                decl.kind.describe(),
                decl.name
            );
            Err(UnsupportedCallableError::BoundDescriptor {
                name: decl.name.clone(),
            })
        }
        CallableKind::Type => Err(UnsupportedCallableError::TypeTarget {
            name: decl.name.clone(),
        }),
        CallableKind::Function | CallableKind::Method => Ok(()),
    }
}

/// Per-wrap state shared by both wrapper shapes.
///
/// Built once at wrap time and only ever read afterwards, so concurrent
/// invocations of one wrapper need no locking.
struct AdapterCore {
    name: String,
    signature: FunctionSignature,
    port: Arc<dyn ConversionPort>,
    variant: Variant,
    convert_parameters: bool,
    convert_return: bool,
    namespace: Namespace,
    options: ConvertOptions,
}

impl AdapterCore {
    fn request(&self, value: Value, target: Option<&recast_types::TypeRef>) -> ConversionRequest {
        ConversionRequest::new(
            value,
            target.cloned(),
            self.namespace.clone(),
            self.options.clone(),
        )
    }

    fn convert_positional(&self, args: Vec<Value>) -> AdaptResult<Vec<Value>> {
        if !self.convert_parameters {
            return Ok(args);
        }
        if args.len() > self.signature.arity() {
            return Err(AdaptError::TooManyArguments {
                name: self.name.clone(),
                arity: self.signature.arity(),
                supplied: args.len(),
            });
        }
        let mut converted = Vec::with_capacity(args.len());
        for (position, arg) in args.into_iter().enumerate() {
            let spec = &self.signature.parameters()[position];
            if is_receiver_name(&spec.name) && looks_like_bound_receiver(&arg, &self.name) {
                trace!("'{}': forwarding bound receiver '{}'", self.name, spec.name);
                converted.push(arg);
                continue;
            }
            trace!(
                "'{}': converting parameter '{}' at {}",
                self.name, spec.name, position
            );
            let request = self.request(arg, spec.declared_type.as_ref());
            converted.push(self.port.convert(self.variant, &request)?);
        }
        Ok(converted)
    }

    fn convert_result(&self, result: Value) -> AdaptResult<Value> {
        if !self.convert_return {
            return Ok(result);
        }
        let request = self.request(result, self.signature.return_type());
        Ok(self.port.convert(self.variant, &request)?)
    }
}

/// An adapted ordinary callable.
#[derive(Clone)]
pub struct AdaptedFn {
    core: Arc<AdapterCore>,
    body: SyncFn,
}

impl AdaptedFn {
    /// Invoke the wrapper: convert positionals, call the body with the
    /// named arguments untouched, convert the result
    pub fn call(&self, args: CallArgs) -> AdaptResult<Value> {
        let positional = self.core.convert_positional(args.positional)?;
        let result = (self.body)(CallArgs {
            positional,
            named: args.named,
        })?;
        self.core.convert_result(result)
    }

    /// Name of the wrapped callable
    pub fn name(&self) -> &str {
        &self.core.name
    }

    /// The signature derived at wrap time
    pub fn signature(&self) -> &FunctionSignature {
        &self.core.signature
    }
}

/// An adapted suspending callable.
#[derive(Clone)]
pub struct AdaptedAsyncFn {
    core: Arc<AdapterCore>,
    body: Arc<dyn AsyncCallable>,
}

impl AdaptedAsyncFn {
    /// Invoke the wrapper.
    ///
    /// Parameter conversion runs eagerly before the body is invoked; the
    /// body's future is the only suspension point. Dropping the returned
    /// future mid-flight cancels the underlying operation and return-value
    /// conversion never runs.
    pub async fn call(&self, args: CallArgs) -> AdaptResult<Value> {
        let positional = self.core.convert_positional(args.positional)?;
        let result = self
            .body
            .invoke(CallArgs {
                positional,
                named: args.named,
            })
            .await?;
        self.core.convert_result(result)
    }

    /// Name of the wrapped callable
    pub fn name(&self) -> &str {
        &self.core.name
    }

    /// The signature derived at wrap time
    pub fn signature(&self) -> &FunctionSignature {
        &self.core.signature
    }
}

/// Either wrapper shape behind one calling contract.
#[derive(Clone)]
pub enum AdaptedCallable {
    /// Direct-return wrapper
    Sync(AdaptedFn),
    /// Suspend-until-resolved wrapper
    Async(AdaptedAsyncFn),
}

impl std::fmt::Debug for AdaptedCallable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sync(adapted) => f
                .debug_tuple("Sync")
                .field(&adapted.name())
                .finish(),
            Self::Async(adapted) => f
                .debug_tuple("Async")
                .field(&adapted.name())
                .finish(),
        }
    }
}

impl AdaptedCallable {
    /// Check which shape was selected at wrap time
    pub fn is_suspending(&self) -> bool {
        matches!(self, Self::Async(_))
    }

    /// Get the direct-return wrapper, if that shape was selected
    pub fn as_sync(&self) -> Option<&AdaptedFn> {
        match self {
            Self::Sync(adapted) => Some(adapted),
            Self::Async(_) => None,
        }
    }

    /// Get the suspending wrapper, if that shape was selected
    pub fn as_async(&self) -> Option<&AdaptedAsyncFn> {
        match self {
            Self::Async(adapted) => Some(adapted),
            Self::Sync(_) => None,
        }
    }

    /// Invoke through the common contract; the sync shape completes
    /// without suspending
    pub async fn call(&self, args: CallArgs) -> AdaptResult<Value> {
        match self {
            Self::Sync(adapted) => adapted.call(args),
            Self::Async(adapted) => adapted.call(args).await,
        }
    }

    /// Name of the wrapped callable
    pub fn name(&self) -> &str {
        match self {
            Self::Sync(adapted) => adapted.name(),
            Self::Async(adapted) => adapted.name(),
        }
    }
}
