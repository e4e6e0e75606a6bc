//! Fork namespaces
//!
//! A `Namespace` is the opaque customization handle threaded through every
//! conversion request. It decides which concrete converters a port sees;
//! the conversion core itself never reads it, only forwards it.
//!
//! Namespaces form a fork tree: a child fork inherits its parent's
//! attributes and can override them without touching the parent. The
//! attribute store is free-form port-implementor territory.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use recast_types::Value;
use std::fmt;
use std::sync::Arc;

static ROOT: Lazy<Namespace> = Lazy::new(|| Namespace::new("root"));

/// An opaque, cheaply cloneable handle to a customization domain.
#[derive(Clone)]
pub struct Namespace {
    inner: Arc<NamespaceInner>,
}

struct NamespaceInner {
    name: String,
    parent: Option<Namespace>,
    attributes: RwLock<IndexMap<String, Value>>,
}

impl Namespace {
    /// Create a fresh namespace with no parent
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(NamespaceInner {
                name: name.into(),
                parent: None,
                attributes: RwLock::new(IndexMap::new()),
            }),
        }
    }

    /// The process-wide root namespace
    pub fn root() -> Self {
        ROOT.clone()
    }

    /// Create a child fork inheriting this namespace's attributes
    pub fn fork(&self, name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(NamespaceInner {
                name: name.into(),
                parent: Some(self.clone()),
                attributes: RwLock::new(IndexMap::new()),
            }),
        }
    }

    /// The namespace's name, for diagnostics
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The parent fork, if any
    pub fn parent(&self) -> Option<&Namespace> {
        self.inner.parent.as_ref()
    }

    /// Look up an attribute, falling back through parent forks
    pub fn attribute(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.inner.attributes.read().get(key) {
            return Some(value.clone());
        }
        self.inner.parent.as_ref().and_then(|p| p.attribute(key))
    }

    /// Set an attribute on this fork, shadowing any parent value
    pub fn set_attribute(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.inner
            .attributes
            .write()
            .insert(key.into(), value.into());
    }

    /// Check whether two handles refer to the same namespace
    pub fn same_as(&self, other: &Namespace) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.inner.name)
            .field("parent", &self.inner.parent.as_ref().map(Namespace::name))
            .finish()
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::root()
    }
}
