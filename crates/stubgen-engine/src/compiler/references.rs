//! Reference units
//!
//! Generated source is checked against exactly three reference units:
//!
//! | unit                | declares                                        |
//! |---------------------|-------------------------------------------------|
//! | `stubgen.std`       | primitives and the `object` base (`toString()`) |
//! | `<target>` (target) | the wrapped type and every type it mentions     |
//! | `stubgen.generator` | `IndexedAccessor<K, V>`                         |

use crate::compiler::types::Ty;
use crate::descriptor::{TypeDescriptor, TypeRef};

/// Name of the standard library unit.
pub const STD_UNIT: &str = "stubgen.std";
/// Name of the generator unit.
pub const GENERATOR_UNIT: &str = "stubgen.generator";
/// Name of the accessor type declared by the generator unit.
pub const ACCESSOR_TYPE: &str = "IndexedAccessor";
/// Method every object inherits from the `object` base.
pub const TO_STRING: &str = "toString";

/// A type declared by a reference unit.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    /// Declared name
    pub name: String,
    /// Number of generic parameters
    pub arity: usize,
    /// Member shape, when known
    pub descriptor: Option<TypeDescriptor>,
}

impl TypeDecl {
    fn builtin(name: &str, arity: usize) -> Self {
        Self {
            name: name.to_string(),
            arity,
            descriptor: None,
        }
    }
}

/// A named set of type declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceUnit {
    name: String,
    types: Vec<TypeDecl>,
}

impl ReferenceUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[TypeDecl] {
        &self.types
    }

    /// Find a declaration by name.
    pub fn lookup(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name == name)
    }

    fn declare(&mut self, decl: TypeDecl) {
        match self.types.iter_mut().find(|t| t.name == decl.name) {
            Some(existing) => {
                if decl.descriptor.is_some() {
                    *existing = decl;
                }
            }
            None => self.types.push(decl),
        }
    }
}

/// The reference units a compilation resolves names against.
#[derive(Debug, Clone, PartialEq)]
pub struct References {
    std: ReferenceUnit,
    target: ReferenceUnit,
    generator: ReferenceUnit,
    target_type: String,
}

impl References {
    /// Build the reference set for wrapping `target`.
    ///
    /// Named types the target mentions are declared opaquely (no known
    /// members) unless added with [`References::with_related`].
    pub fn for_target(target: &TypeDescriptor) -> Self {
        let std = ReferenceUnit {
            name: STD_UNIT.to_string(),
            types: ["void", "bool", "int", "double", "string", "object"]
                .iter()
                .map(|name| TypeDecl::builtin(name, 0))
                .collect(),
        };
        let generator = ReferenceUnit {
            name: GENERATOR_UNIT.to_string(),
            types: vec![TypeDecl::builtin(ACCESSOR_TYPE, 2)],
        };

        let mut refs = Self {
            std,
            target: ReferenceUnit {
                name: target.name.clone(),
                types: Vec::new(),
            },
            generator,
            target_type: target.name.clone(),
        };
        refs.declare_target(target.clone());
        refs
    }

    /// Add the full shape of a type the target mentions.
    pub fn with_related(mut self, related: TypeDescriptor) -> Self {
        self.declare_target(related);
        self
    }

    fn declare_target(&mut self, descriptor: TypeDescriptor) {
        let mentioned: Vec<String> = descriptor
            .properties
            .iter()
            .flat_map(|p| std::iter::once(&p.ty).chain(p.index.iter()))
            .chain(
                descriptor
                    .methods
                    .iter()
                    .flat_map(|m| std::iter::once(&m.returns).chain(m.params.iter().map(|p| &p.ty))),
            )
            .filter_map(|ty| match ty {
                TypeRef::Named(name) => Some(name.clone()),
                _ => None,
            })
            .collect();

        self.target.declare(TypeDecl {
            name: descriptor.name.clone(),
            arity: 0,
            descriptor: Some(descriptor),
        });
        for name in mentioned {
            self.target.declare(TypeDecl::builtin(&name, 0));
        }
    }

    /// The three units, in resolution order.
    pub fn units(&self) -> [&ReferenceUnit; 3] {
        [&self.std, &self.target, &self.generator]
    }

    /// Name of the wrapped type.
    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    /// Shape of the wrapped type.
    pub fn target(&self) -> Option<&TypeDescriptor> {
        self.source_type(&self.target_type)
    }

    /// Shape of a type declared by the target unit, if known.
    pub fn source_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.target.lookup(name).and_then(|decl| decl.descriptor.as_ref())
    }

    /// Resolve a type name to the unit declaring it.
    pub fn resolve(&self, name: &str) -> Option<(&ReferenceUnit, &TypeDecl)> {
        self.units()
            .into_iter()
            .find_map(|unit| unit.lookup(name).map(|decl| (unit, decl)))
    }

    /// Checker type of a descriptor type reference.
    pub fn ty_of(&self, ty: &TypeRef) -> Ty {
        match ty {
            TypeRef::Named(name) => Ty::Source(name.clone()),
            other => Ty::primitive(other.name()).unwrap_or(Ty::Unknown),
        }
    }
}
