/// Method registry
///
/// The immutable table of methods an engine dispatches to. A registry is
/// built once, either directly through [`RegistryBuilder`] or by resolving a
/// module name through a [`ModuleResolver`], and never mutated afterwards.

pub mod builtin;
pub mod method;

pub use builtin::BuiltinModules;
pub use method::{decode_args, Method, MethodDescriptor, MethodError, RegisteredMethod};

use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building or resolving a registry
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Duplicate registry entry: {0}")]
    DuplicateEntry(String),

    #[error("Invalid method name: {0:?}")]
    InvalidName(String),

    #[error("Method {method} declares parameter {param:?} more than once")]
    DuplicateParam { method: String, param: String },

    #[error("Unknown module: {0}")]
    UnknownModule(String),
}

/// One name in the registry namespace
#[derive(Debug, Clone)]
pub enum Entry {
    /// A callable method
    Method(RegisteredMethod),
    /// A plain data value. Shares the namespace but is never callable.
    Data(Value),
}

/// Read-only mapping from name to registry entry
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    entries: BTreeMap<String, Entry>,
}

impl MethodRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a callable method by name. Data entries are not returned.
    pub fn method(&self, name: &str) -> Option<&RegisteredMethod> {
        match self.entries.get(name) {
            Some(Entry::Method(method)) => Some(method),
            _ => None,
        }
    }

    /// Signature of a callable method
    pub fn descriptor(&self, name: &str) -> Option<&MethodDescriptor> {
        self.method(name).map(|m| &m.descriptor)
    }

    /// Raw entry, callable or not
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Names of all callable methods, sorted
    pub fn method_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::Method(_)))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects entries and checks them when the registry is built
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<(String, Entry)>,
}

impl RegistryBuilder {
    /// Register a callable with its formal parameter names in positional order
    pub fn method<M>(mut self, name: &str, params: &[&str], handler: M) -> Self
    where
        M: Method + 'static,
    {
        let method = RegisteredMethod {
            descriptor: MethodDescriptor::new(name, params),
            handler: Arc::new(handler),
        };
        self.entries.push((name.to_string(), Entry::Method(method)));
        self
    }

    /// Register a non-callable data entry
    pub fn value(mut self, name: &str, value: Value) -> Self {
        self.entries.push((name.to_string(), Entry::Data(value)));
        self
    }

    pub fn build(self) -> Result<MethodRegistry, RegistryError> {
        let mut entries = BTreeMap::new();
        for (name, entry) in self.entries {
            if name.trim().is_empty() {
                return Err(RegistryError::InvalidName(name));
            }
            if let Entry::Method(method) = &entry {
                let mut seen = HashSet::new();
                for param in &method.descriptor.params {
                    if !seen.insert(param.as_str()) {
                        return Err(RegistryError::DuplicateParam {
                            method: name.clone(),
                            param: param.clone(),
                        });
                    }
                }
            }
            if entries.contains_key(&name) {
                return Err(RegistryError::DuplicateEntry(name));
            }
            entries.insert(name, entry);
        }
        Ok(MethodRegistry { entries })
    }
}

/// Resolves a module reference into a method registry
///
/// This is the seam for loading method tables from somewhere other than
/// code that builds the registry directly.
pub trait ModuleResolver {
    /// Build the registry for the named module
    fn resolve(&self, module: &str) -> Result<MethodRegistry, RegistryError>;

    /// Names this resolver knows about
    fn modules(&self) -> Vec<&'static str>;
}
