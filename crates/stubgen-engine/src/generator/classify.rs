//! Member classification
//!
//! Partitions a descriptor's members into indexed properties, simple
//! properties and plain methods. A method is plain iff it is not the getter
//! or setter of some property; this holds for indexed properties too, whose
//! accessor methods are only reached through the generated accessor object.

use rustc_hash::FxHashSet;

use crate::descriptor::{MethodDescriptor, PropertyDescriptor, TypeDescriptor};

/// The members of a type, split by how they are emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedMembers<'a> {
    /// Properties with an index parameter
    pub indexed: Vec<&'a PropertyDescriptor>,
    /// Properties without index parameters
    pub simple: Vec<&'a PropertyDescriptor>,
    /// Methods that are not property accessors
    pub methods: Vec<&'a MethodDescriptor>,
}

impl ClassifiedMembers<'_> {
    /// Total number of members to emit.
    pub fn len(&self) -> usize {
        self.indexed.len() + self.simple.len() + self.methods.len()
    }

    /// Check if there is nothing to emit.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify the members of `ty`, preserving declaration order.
pub fn classify(ty: &TypeDescriptor) -> ClassifiedMembers<'_> {
    let (indexed, simple): (Vec<_>, Vec<_>) =
        ty.properties.iter().partition(|p| p.is_indexed());

    let accessors: FxHashSet<String> = ty
        .properties
        .iter()
        .flat_map(|p| p.getter_name().into_iter().chain(p.setter_name()))
        .collect();

    let methods = ty
        .methods
        .iter()
        .filter(|m| !accessors.contains(&m.name))
        .collect();

    ClassifiedMembers {
        indexed,
        simple,
        methods,
    }
}
