//! Indexed property adapter
//!
//! An [`IndexedAccessor`] bundles an index-keyed getter and an optional
//! setter. Generated wrappers build a fresh one on every read of an indexed
//! property; either closure may be missing, in which case the corresponding
//! operation fails with [`RuntimeError::AccessorNotImplemented`].

use std::fmt;

use crate::vm::RuntimeError;

/// Boxed index getter.
pub type Getter<K, V> = Box<dyn Fn(K) -> Result<V, RuntimeError> + Send + Sync>;
/// Boxed index setter.
pub type Setter<K, V> = Box<dyn Fn(K, V) -> Result<(), RuntimeError> + Send + Sync>;

/// Index-keyed get/set adapter.
pub struct IndexedAccessor<K, V> {
    member: String,
    getter: Option<Getter<K, V>>,
    setter: Option<Setter<K, V>>,
}

impl<K, V> IndexedAccessor<K, V> {
    /// Create an accessor from optional closures.
    pub fn new(getter: Option<Getter<K, V>>, setter: Option<Setter<K, V>>) -> Self {
        Self {
            member: "IndexedAccessor".to_string(),
            getter,
            setter,
        }
    }

    /// Create a read-only accessor.
    pub fn read_only<G>(getter: G) -> Self
    where
        G: Fn(K) -> Result<V, RuntimeError> + Send + Sync + 'static,
    {
        Self::new(Some(Box::new(getter)), None)
    }

    /// Create a read-write accessor.
    pub fn read_write<G, S>(getter: G, setter: S) -> Self
    where
        G: Fn(K) -> Result<V, RuntimeError> + Send + Sync + 'static,
        S: Fn(K, V) -> Result<(), RuntimeError> + Send + Sync + 'static,
    {
        Self::new(Some(Box::new(getter)), Some(Box::new(setter)))
    }

    /// Name the property this accessor stands for (used in errors).
    pub fn named(mut self, member: impl Into<String>) -> Self {
        self.member = member.into();
        self
    }

    /// Name of the property this accessor stands for.
    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn can_get(&self) -> bool {
        self.getter.is_some()
    }

    pub fn can_set(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the element at `index`.
    pub fn get(&self, index: K) -> Result<V, RuntimeError> {
        match &self.getter {
            Some(getter) => getter(index),
            None => Err(RuntimeError::AccessorNotImplemented {
                member: self.member.clone(),
                accessor: "get",
            }),
        }
    }

    /// Write the element at `index`.
    pub fn set(&self, index: K, value: V) -> Result<(), RuntimeError> {
        match &self.setter {
            Some(setter) => setter(index, value),
            None => Err(RuntimeError::AccessorNotImplemented {
                member: self.member.clone(),
                accessor: "set",
            }),
        }
    }
}

impl<K, V> fmt::Debug for IndexedAccessor<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedAccessor")
            .field("member", &self.member)
            .field("get", &self.can_get())
            .field("set", &self.can_set())
            .finish()
    }
}
