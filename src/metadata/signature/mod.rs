//! Metadata collection for methods, classes and constants.
//!
//! This module is the collection side of the engine: as a class body is
//! declared, type signatures, annotations, exception declarations and
//! constants accumulate on the declared members. The synthesizer later borrows
//! the collected metadata read-only to build the emitted descriptor.
//!
//! # Key Components
//!
//! - [`FunctionDef`] - A declared method with its parameter list and collected metadata
//! - [`SignatureDecl`] - The type-declaration operation (return, arguments, name, access)
//! - [`MethodMetadata`] - The per-method descriptor the collector builds
//! - [`ClassMetadata`] - Class-level annotation storage
//! - [`Constant`] - A class constant with an explicit target type
//!
//! # Validation
//!
//! All validation here is fail-fast: argument-type counts are checked against
//! the declared parameter list, annotations require an existing signature, and
//! argument annotations require a known argument name. Violations surface as
//! [`Error`](crate::Error) at the point of declaration, before any synthesis
//! is attempted. A method that simply never declares a signature is not an
//! error; it is skipped (with a warning) at synthesis time instead.
//!
//! # Examples
//!
//! ```rust
//! use clasp::metadata::annotations::AnnotationRecord;
//! use clasp::metadata::signature::{FunctionDef, SignatureDecl};
//! use clasp::metadata::typesystem::{PrimitiveKind, TypeRef};
//!
//! let mut method = FunctionDef::new("returnIntArg", ["arg"]);
//! method.declare_signature(
//!     SignatureDecl::new(TypeRef::primitive(PrimitiveKind::Int))
//!         .with_args([TypeRef::primitive(PrimitiveKind::Int)]),
//! )?;
//! method.annotate_arg(
//!     "arg",
//!     AnnotationRecord::new(TypeRef::interface("org.example.NotNull"))?,
//! )?;
//! method.declare_throws([TypeRef::class("java.io.IOException")])?;
//! # Ok::<(), clasp::Error>(())
//! ```

use std::collections::HashMap;

use crate::{
    metadata::{
        annotations::AnnotationRecord,
        typesystem::{LiteralValue, TypeKind, TypeRef},
    },
    Error, Result,
};

/// Explicit access level of an emitted member.
///
/// When absent from a signature declaration, the access level is derived from
/// the member's name pattern at synthesis time, see
/// [`access_from_name`](crate::metadata::synthesis::access_from_name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Accessible by anyone
    Public,
    /// Accessible by the declaring class and subclasses
    Protected,
    /// Accessible only by the declaring class
    Private,
}

/// How a declared function is bound to its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FunctionBinding {
    /// Ordinary instance method with an implicit receiver
    #[default]
    Instance,
    /// Statically-bound method, emitted with the STATIC modifier
    Static,
    /// Bound to the class object itself; has no emitted equivalent
    ClassBound,
}

/// A class constant declaration: a literal value paired with an explicit
/// target type.
///
/// Type inference on the value is not implemented, so the type must always be
/// given.
///
/// # Examples
///
/// ```rust
/// use clasp::metadata::signature::Constant;
/// use clasp::metadata::typesystem::{LiteralValue, PrimitiveKind, TypeRef};
///
/// let uid = Constant::new(LiteralValue::Long(1234), TypeRef::primitive(PrimitiveKind::Long));
/// assert_eq!(uid.value().as_i64(), Some(1234));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    value: LiteralValue,
    constant_type: TypeRef,
}

impl Constant {
    /// Creates a constant from a value and its explicit target type.
    #[must_use]
    pub fn new(value: LiteralValue, constant_type: TypeRef) -> Self {
        Self {
            value,
            constant_type,
        }
    }

    /// The literal value of the constant.
    #[must_use]
    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    /// The declared target type of the constant.
    #[must_use]
    pub fn constant_type(&self) -> &TypeRef {
        &self.constant_type
    }
}

/// Class-level annotation storage.
///
/// Holds the annotations applied to a class itself, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassMetadata {
    annotations: Vec<AnnotationRecord>,
}

impl ClassMetadata {
    /// Creates empty class metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an annotation to the class, preserving declaration order.
    pub fn annotate(&mut self, record: AnnotationRecord) {
        self.annotations.push(record);
    }

    /// The class annotations in declaration order.
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationRecord] {
        &self.annotations
    }
}

/// The type-declaration operation applied to a method.
///
/// Carries the return type, the ordered argument types, an optional
/// target-visible name override and an optional explicit access level. Built
/// fluently and handed to [`FunctionDef::declare_signature`].
#[derive(Debug, Clone)]
pub struct SignatureDecl {
    return_type: TypeRef,
    arg_types: Vec<TypeRef>,
    name: Option<String>,
    access: Option<Access>,
}

impl SignatureDecl {
    /// Creates a declaration with the given return type and no arguments.
    #[must_use]
    pub fn new(return_type: TypeRef) -> Self {
        Self {
            return_type,
            arg_types: Vec::new(),
            name: None,
            access: None,
        }
    }

    /// Sets the ordered argument types.
    #[must_use]
    pub fn with_args(mut self, arg_types: impl IntoIterator<Item = TypeRef>) -> Self {
        self.arg_types = arg_types.into_iter().collect();
        self
    }

    /// Overrides the target-visible method name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets an explicit access level, bypassing name-pattern derivation.
    #[must_use]
    pub fn with_access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }
}

/// The collected metadata of a single method.
///
/// One descriptor exists per method: re-declaring a signature replaces the
/// previous descriptor entirely. Annotation lists are append-only and
/// order-preserving.
#[derive(Debug, Clone)]
pub struct MethodMetadata {
    name: String,
    return_type: TypeRef,
    arg_types: Vec<TypeRef>,
    access: Option<Access>,
    annotations: Vec<AnnotationRecord>,
    arg_annotations: HashMap<String, Vec<AnnotationRecord>>,
    exception_types: Vec<TypeRef>,
}

impl MethodMetadata {
    /// The target-visible name of the method.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared return type.
    #[must_use]
    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    /// The ordered argument types.
    #[must_use]
    pub fn arg_types(&self) -> &[TypeRef] {
        &self.arg_types
    }

    /// The explicit access level, if one was declared.
    #[must_use]
    pub fn access(&self) -> Option<Access> {
        self.access
    }

    /// Method-level annotations in declaration order.
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationRecord] {
        &self.annotations
    }

    /// Annotations attached to the named argument, in declaration order.
    #[must_use]
    pub fn arg_annotations(&self, arg: &str) -> &[AnnotationRecord] {
        self.arg_annotations.get(arg).map_or(&[], Vec::as_slice)
    }

    /// The declared exception types, in declaration order.
    #[must_use]
    pub fn exception_types(&self) -> &[TypeRef] {
        &self.exception_types
    }
}

/// A method declared in a class body.
///
/// Carries the source-level shape of the method (name, parameter list, binding
/// and abstractness) plus whatever metadata has been collected for it so far.
/// The parameter list excludes the implicit receiver; for instance methods the
/// receiver is implied by the binding.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    name: String,
    params: Vec<String>,
    binding: FunctionBinding,
    is_abstract: bool,
    metadata: Option<MethodMetadata>,
}

impl FunctionDef {
    /// Declares an instance method with the given (non-receiver) parameters.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
            binding: FunctionBinding::Instance,
            is_abstract: false,
            metadata: None,
        }
    }

    /// Sets how the method is bound to its class.
    #[must_use]
    pub fn with_binding(mut self, binding: FunctionBinding) -> Self {
        self.binding = binding;
        self
    }

    /// Marks the method as declared abstract at the source level.
    #[must_use]
    pub fn abstracted(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// The source-level name of the method.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared (non-receiver) parameter names, in order.
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// How the method is bound to its class.
    #[must_use]
    pub fn binding(&self) -> FunctionBinding {
        self.binding
    }

    /// True if the method was declared abstract at the source level.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// The collected metadata, if a signature has been declared.
    #[must_use]
    pub fn metadata(&self) -> Option<&MethodMetadata> {
        self.metadata.as_ref()
    }

    /// Records the method's type signature.
    ///
    /// Reapplying this operation replaces the previous descriptor entirely;
    /// there is never more than one descriptor per method.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedBinding`] if the method is class-bound
    /// - [`Error::ArgumentCountMismatch`] if the argument-type count differs
    ///   from the declared parameter count
    /// - [`Error::EmptyMethodName`] if a name override is given but empty
    pub fn declare_signature(&mut self, decl: SignatureDecl) -> Result<()> {
        if self.binding == FunctionBinding::ClassBound {
            return Err(Error::UnsupportedBinding {
                method: self.name.clone(),
            });
        }

        if decl.arg_types.len() != self.params.len() {
            return Err(Error::ArgumentCountMismatch {
                method: self.name.clone(),
                expected: self.params.len(),
                given: decl.arg_types.len(),
            });
        }

        let name = match decl.name {
            Some(name) if name.is_empty() => {
                return Err(Error::EmptyMethodName {
                    method: self.name.clone(),
                })
            }
            Some(name) => name,
            None => self.name.clone(),
        };

        self.metadata = Some(MethodMetadata {
            name,
            return_type: decl.return_type,
            arg_types: decl.arg_types,
            access: decl.access,
            annotations: Vec::new(),
            arg_annotations: HashMap::new(),
            exception_types: Vec::new(),
        });
        Ok(())
    }

    /// Appends an annotation to the method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSignature`] if no signature has been declared
    /// yet. Requiring the signature first means missing type information is
    /// detected here rather than at synthesis time.
    pub fn annotate(&mut self, record: AnnotationRecord) -> Result<()> {
        let metadata = self.metadata.as_mut().ok_or_else(|| Error::MissingSignature {
            method: self.name.clone(),
        })?;
        metadata.annotations.push(record);
        Ok(())
    }

    /// Appends an annotation to the named argument.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSignature`] if no signature has been declared yet
    /// - [`Error::UnknownArgument`] if `arg` is not a declared parameter
    pub fn annotate_arg(&mut self, arg: &str, record: AnnotationRecord) -> Result<()> {
        if !self.params.iter().any(|param| param == arg) {
            return Err(Error::UnknownArgument {
                method: self.name.clone(),
                argument: arg.to_string(),
            });
        }

        let metadata = self.metadata.as_mut().ok_or_else(|| Error::MissingSignature {
            method: self.name.clone(),
        })?;
        metadata
            .arg_annotations
            .entry(arg.to_string())
            .or_default()
            .push(record);
        Ok(())
    }

    /// Records the ordered list of exception types the method may raise.
    ///
    /// Redeclaring replaces the previous list.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSignature`] if no signature has been declared yet
    /// - [`Error::InvalidExceptionType`] if any type is not a class type
    pub fn declare_throws(
        &mut self,
        exception_types: impl IntoIterator<Item = TypeRef>,
    ) -> Result<()> {
        let exception_types: Vec<TypeRef> = exception_types.into_iter().collect();
        for exception_type in &exception_types {
            if exception_type.kind() != TypeKind::Class {
                return Err(Error::InvalidExceptionType {
                    name: exception_type.name().to_string(),
                });
            }
        }

        let metadata = self.metadata.as_mut().ok_or_else(|| Error::MissingSignature {
            method: self.name.clone(),
        })?;
        metadata.exception_types = exception_types;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::typesystem::PrimitiveKind;

    fn void() -> TypeRef {
        TypeRef::primitive(PrimitiveKind::Void)
    }

    fn stub_annotation() -> AnnotationRecord {
        AnnotationRecord::new(TypeRef::interface("org.example.Stub")).unwrap()
    }

    #[test]
    fn argument_count_is_validated_at_declaration() {
        let mut method = FunctionDef::new("concat", ["a", "b", "c"]);
        let result = method.declare_signature(
            SignatureDecl::new(void()).with_args([
                TypeRef::class("java.lang.String"),
                TypeRef::class("java.lang.String"),
            ]),
        );
        assert!(matches!(
            result,
            Err(Error::ArgumentCountMismatch {
                expected: 3,
                given: 2,
                ..
            })
        ));
        assert!(method.metadata().is_none());
    }

    #[test]
    fn redeclaring_replaces_the_descriptor() {
        let mut method = FunctionDef::new("value", Vec::<String>::new());
        method
            .declare_signature(SignatureDecl::new(TypeRef::primitive(PrimitiveKind::Int)))
            .unwrap();
        method.annotate(stub_annotation()).unwrap();

        method
            .declare_signature(SignatureDecl::new(TypeRef::primitive(PrimitiveKind::Long)))
            .unwrap();

        let metadata = method.metadata().unwrap();
        assert_eq!(metadata.return_type().name(), "long");
        assert!(metadata.annotations().is_empty());
    }

    #[test]
    fn annotate_requires_a_signature() {
        let mut method = FunctionDef::new("helper", Vec::<String>::new());
        assert!(matches!(
            method.annotate(stub_annotation()),
            Err(Error::MissingSignature { .. })
        ));
    }

    #[test]
    fn annotate_arg_validates_the_argument_name() {
        let mut method = FunctionDef::new("handle", ["request"]);
        method
            .declare_signature(
                SignatureDecl::new(void()).with_args([TypeRef::class("org.example.Request")]),
            )
            .unwrap();

        assert!(matches!(
            method.annotate_arg("response", stub_annotation()),
            Err(Error::UnknownArgument { .. })
        ));
        method.annotate_arg("request", stub_annotation()).unwrap();
        assert_eq!(method.metadata().unwrap().arg_annotations("request").len(), 1);
    }

    #[test]
    fn throws_rejects_non_class_types() {
        let mut method = FunctionDef::new("risky", Vec::<String>::new());
        method.declare_signature(SignatureDecl::new(void())).unwrap();

        assert!(matches!(
            method.declare_throws([TypeRef::primitive(PrimitiveKind::Int)]),
            Err(Error::InvalidExceptionType { .. })
        ));
        method
            .declare_throws([TypeRef::class("java.io.FileNotFoundException")])
            .unwrap();
        assert_eq!(method.metadata().unwrap().exception_types().len(), 1);
    }

    #[test]
    fn class_bound_members_cannot_declare_signatures() {
        let mut method =
            FunctionDef::new("factory", ["kind"]).with_binding(FunctionBinding::ClassBound);
        assert!(matches!(
            method.declare_signature(
                SignatureDecl::new(void()).with_args([TypeRef::class("java.lang.String")])
            ),
            Err(Error::UnsupportedBinding { .. })
        ));
    }

    #[test]
    fn empty_name_override_is_rejected() {
        let mut method = FunctionDef::new("call", Vec::<String>::new());
        assert!(matches!(
            method.declare_signature(SignatureDecl::new(void()).named("")),
            Err(Error::EmptyMethodName { .. })
        ));
    }

    #[test]
    fn name_override_reaches_the_descriptor() {
        let mut method = FunctionDef::new("do_call", Vec::<String>::new());
        method
            .declare_signature(SignatureDecl::new(void()).named("doCall"))
            .unwrap();
        assert_eq!(method.metadata().unwrap().name(), "doCall");
    }
}
