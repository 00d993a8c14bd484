//! The in-memory declaration model consumed by the binding layer.
//!
//! A [`ClassDecl`] is the result of evaluating a class body in the dynamic
//! host: a name, a module, a list of declared bases and an ordered
//! [`Namespace`] of members. The binding layer resolves the bases into a
//! superclass and interface contracts, and the synthesizer walks the namespace
//! to build the emitted descriptor.
//!
//! # Examples
//!
//! ```rust
//! use clasp::metadata::model::{Base, ClassDecl};
//! use clasp::metadata::signature::{FunctionDef, SignatureDecl};
//! use clasp::metadata::typesystem::{PrimitiveKind, TypeRef};
//!
//! let mut return_zero = FunctionDef::new("returnZero", Vec::<String>::new());
//! return_zero.declare_signature(SignatureDecl::new(TypeRef::primitive(PrimitiveKind::Int)))?;
//!
//! let decl = ClassDecl::new("samples", "MethodSample")
//!     .with_base(Base::Type(TypeRef::class("java.lang.Object")))
//!     .with_function(return_zero);
//! assert_eq!(decl.namespace().len(), 1);
//! # Ok::<(), clasp::Error>(())
//! ```

use std::sync::Arc;

use crate::metadata::{
    binding::BoundClass,
    signature::{ClassMetadata, Constant, FunctionDef},
    typesystem::TypeRef,
};

/// A declared base of a class.
#[derive(Debug, Clone)]
pub enum Base {
    /// A target-runtime type: a class to inherit from, or an interface
    /// contract to implement.
    Type(TypeRef),

    /// A class previously produced by the binding layer.
    ///
    /// When the declared class is transformed again, a bridged base whose
    /// synthesized identity matches the target is stripped and replaced by its
    /// own original bases, so ancestry never accumulates synthesized
    /// intermediates.
    Bridged(Arc<BoundClass>),
}

/// A member of a class namespace.
#[derive(Debug, Clone)]
pub enum Member {
    /// A declared method with its collected metadata.
    Function(FunctionDef),

    /// A declared class constant.
    Constant(Constant),
}

/// The ordered member namespace of a declared class.
///
/// Members are kept in declaration order; redefining a name replaces the
/// member in place. The namespace also carries the class-level metadata
/// descriptor, when annotations have been applied to the class itself.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    entries: Vec<(String, Member)>,
    metadata: Option<ClassMetadata>,
}

impl Namespace {
    /// Creates an empty namespace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a member under the given name.
    ///
    /// A member with the same name is replaced in place, keeping its original
    /// position in declaration order.
    pub fn insert(&mut self, name: impl Into<String>, member: Member) {
        let name = name.into();
        if let Some(slot) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == name)
        {
            slot.1 = member;
        } else {
            self.entries.push((name, member));
        }
    }

    /// Looks up a member by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Member> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, member)| member)
    }

    /// Looks up a function member mutably, for metadata collection.
    pub fn function_mut(&mut self, name: &str) -> Option<&mut FunctionDef> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .and_then(|(_, member)| match member {
                Member::Function(function) => Some(function),
                Member::Constant(_) => None,
            })
    }

    /// Iterates over members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.entries
            .iter()
            .map(|(name, member)| (name.as_str(), member))
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the namespace holds no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The class-level metadata descriptor, if the class was annotated.
    #[must_use]
    pub fn class_metadata(&self) -> Option<&ClassMetadata> {
        self.metadata.as_ref()
    }

    /// The class-level metadata descriptor, created on first use.
    pub fn class_metadata_mut(&mut self) -> &mut ClassMetadata {
        self.metadata.get_or_insert_with(ClassMetadata::new)
    }
}

/// A class declaration: the (name, bases, namespace) triple handed to the
/// binding layer when a class body has been evaluated.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    name: String,
    module: String,
    bases: Vec<Base>,
    namespace: Namespace,
}

impl ClassDecl {
    /// Creates a class declaration with no bases and an empty namespace.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
            bases: Vec::new(),
            namespace: Namespace::new(),
        }
    }

    /// Appends a declared base.
    #[must_use]
    pub fn with_base(mut self, base: Base) -> Self {
        self.bases.push(base);
        self
    }

    /// Adds a function member under its own source name.
    #[must_use]
    pub fn with_function(mut self, function: FunctionDef) -> Self {
        let name = function.name().to_string();
        self.namespace.insert(name, Member::Function(function));
        self
    }

    /// Adds a constant member.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, constant: Constant) -> Self {
        self.namespace.insert(name, Member::Constant(constant));
        self
    }

    /// Appends a class-level annotation.
    #[must_use]
    pub fn with_annotation(
        mut self,
        record: crate::metadata::annotations::AnnotationRecord,
    ) -> Self {
        self.namespace.class_metadata_mut().annotate(record);
        self
    }

    /// The simple class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source module the class was declared in.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The declared bases, in declaration order.
    #[must_use]
    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    /// The member namespace.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The member namespace, mutable for metadata collection.
    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    /// Splits the declaration into its bases and namespace.
    #[must_use]
    pub(crate) fn into_parts(self) -> (Vec<Base>, Namespace) {
        (self.bases, self.namespace)
    }
}
