//! Emitted class and method descriptors.
//!
//! A [`ClassDescriptor`] is the complete, validated description of a
//! synthesized class, ready to be handed to a code-generation backend: the
//! resolved superclass and interface contracts, constants, annotations and
//! method descriptors with full type and modifier information.

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::metadata::{
    annotations::AnnotationRecord,
    signature::{Access, Constant},
    typesystem::TypeRef,
};

bitflags! {
    /// Member modifier flags of the emitted class format.
    ///
    /// The access bits mirror [`Access`]; `STATIC`, `FINAL` and `ABSTRACT`
    /// combine with them on methods and fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modifiers: u32 {
        /// Accessible by anyone
        const PUBLIC = 0x0001;
        /// Accessible only by the declaring class
        const PRIVATE = 0x0002;
        /// Accessible by the declaring class and subclasses
        const PROTECTED = 0x0004;
        /// Bound to the class rather than an instance
        const STATIC = 0x0008;
        /// Cannot be overridden or reassigned
        const FINAL = 0x0010;
        /// Has no implementation in the emitted class
        const ABSTRACT = 0x0400;
    }
}

impl From<Access> for Modifiers {
    fn from(access: Access) -> Self {
        match access {
            Access::Public => Modifiers::PUBLIC,
            Access::Protected => Modifiers::PROTECTED,
            Access::Private => Modifiers::PRIVATE,
        }
    }
}

impl Modifiers {
    /// Extracts the access level from the modifier bits, if any access bit is set.
    #[must_use]
    pub fn access(&self) -> Option<Access> {
        if self.contains(Modifiers::PUBLIC) {
            Some(Access::Public)
        } else if self.contains(Modifiers::PROTECTED) {
            Some(Access::Protected)
        } else if self.contains(Modifiers::PRIVATE) {
            Some(Access::Private)
        } else {
            None
        }
    }
}

/// The emitted description of a single method.
///
/// Only methods with complete type information reach this form; members
/// without a declared signature are skipped (with a warning) during
/// descriptor construction.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    /// Target-visible method name (may differ from the source name).
    pub name: String,

    /// Source-level member name the method was declared under.
    pub source_name: String,

    /// Declared return type.
    pub return_type: TypeRef,

    /// Ordered argument types, excluding the implicit receiver.
    pub arg_types: Vec<TypeRef>,

    /// Ordered declared exception types.
    pub exceptions: Vec<TypeRef>,

    /// Access and modifier bits, including the forced `ABSTRACT` bit.
    pub modifiers: Modifiers,

    /// Method-level annotations in declaration order.
    pub annotations: Vec<AnnotationRecord>,

    /// Per-argument annotations, in parameter order. One (possibly empty)
    /// list per declared argument.
    pub arg_annotations: Vec<Vec<AnnotationRecord>>,
}

impl MethodDescriptor {
    /// True if the descriptor carries the `ABSTRACT` modifier.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(Modifiers::ABSTRACT)
    }

    /// True if the descriptor carries the `STATIC` modifier.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }
}

/// The emitted description of a synthesized class.
///
/// This is the complete structure handed to the code-generation backend.
/// Constants are keyed by name (unique within a descriptor, deterministic
/// order); methods keep namespace declaration order.
#[derive(Debug, Clone)]
pub struct ClassDescriptor {
    /// Target package of the synthesized class.
    pub package: String,

    /// Source module the class was declared in.
    pub module: String,

    /// Simple class name.
    pub name: String,

    /// Fully-qualified target name (`package.module.name`).
    pub full_name: String,

    /// Resolved superclass, if a class base was declared.
    pub superclass: Option<TypeRef>,

    /// Resolved interface contracts.
    pub interfaces: Vec<TypeRef>,

    /// Class constants by name.
    pub constants: BTreeMap<String, Constant>,

    /// True if the superclass or any interface is serializable.
    pub serializable: bool,

    /// Class-level annotations in declaration order.
    pub annotations: Vec<AnnotationRecord>,

    /// Method descriptors keyed by source member name, in declaration order.
    pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
    /// Looks up a constant by name.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.get(name)
    }

    /// Looks up a method descriptor by source member name.
    #[must_use]
    pub fn method(&self, source_name: &str) -> Option<&MethodDescriptor> {
        self.methods
            .iter()
            .find(|method| method.source_name == source_name)
    }
}
