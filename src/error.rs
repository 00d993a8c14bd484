use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all possible error conditions that can occur while collecting method and
/// class metadata, binding declared classes, and synthesizing compiled-class descriptors. Each
/// variant provides specific context about the failure mode to enable appropriate error handling.
///
/// # Error Categories
///
/// ## Validation Errors
/// Raised synchronously at the point of declaration, before any synthesis is attempted:
/// - [`Error::ArgumentCountMismatch`] - Declared argument types don't match the parameter list
/// - [`Error::MissingSignature`] - Annotation applied before a signature was declared
/// - [`Error::UnknownArgument`] - Argument annotation names a parameter that doesn't exist
/// - [`Error::NotAnInterface`] - Annotation type is not an interface
/// - [`Error::InvalidExceptionType`] - Declared exception type is not a class type
/// - [`Error::EmptyMethodName`] - Target-visible method name override is empty
/// - [`Error::UnsupportedBinding`] - Signature declared on a class-bound member
/// - [`Error::MultipleSuperclasses`] - More than one non-interface base declared
/// - [`Error::InvalidBase`] - A base is not usable as superclass or interface
///
/// ## Environment Errors
/// Raised at synthesis time, not at declaration time:
/// - [`Error::NoBuildSink`] - Emission required but no build context is open
/// - [`Error::ContextClosed`] - The build context was already closed
///
/// ## External Errors
/// - [`Error::Backend`] - Failure reported by the code-generation backend
/// - [`Error::SinkError`] - I/O failure reported by the build sink
///
/// # Examples
///
/// ```rust
/// use clasp::{Error, metadata::signature::{FunctionDef, SignatureDecl}};
/// use clasp::metadata::typesystem::{PrimitiveKind, TypeRef};
///
/// let mut method = FunctionDef::new("concat", ["left", "right"]);
/// let decl = SignatureDecl::new(TypeRef::primitive(PrimitiveKind::Int));
///
/// match method.declare_signature(decl) {
///     Err(Error::ArgumentCountMismatch { expected, given, .. }) => {
///         eprintln!("expected {} argument types, got {}", expected, given);
///     }
///     other => panic!("expected a count mismatch, got {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Validation errors - fatal, surfaced at declaration time
    /// The number of declared argument types does not match the method's parameter count.
    ///
    /// Signature declarations must supply exactly one type per declared parameter
    /// (the implicit receiver is excluded). This is checked when the signature is
    /// declared, before any synthesis is attempted.
    #[error("Method '{method}' declares {expected} parameter(s), but {given} argument type(s) were given")]
    ArgumentCountMismatch {
        /// Name of the method whose signature was being declared
        method: String,
        /// Number of declared (non-receiver) parameters
        expected: usize,
        /// Number of argument types supplied
        given: usize,
    },

    /// An annotation was applied to a method that has no signature declared yet.
    ///
    /// Type information must be established before annotation, so that the
    /// synthesizer is never asked to describe a member it has no types for.
    #[error("Method '{method}' has no declared signature; declare types before annotating")]
    MissingSignature {
        /// Name of the method that was annotated
        method: String,
    },

    /// An argument annotation named a parameter that the method does not declare.
    #[error("Method '{method}' does not have an argument named '{argument}'")]
    UnknownArgument {
        /// Name of the method that was annotated
        method: String,
        /// The unknown argument name
        argument: String,
    },

    /// An annotation record was constructed with a type that is not an interface.
    ///
    /// Annotation types in the target runtime are interface types; classes and
    /// primitives cannot be used as annotations.
    #[error("Type '{name}' is not an interface and cannot be used as an annotation")]
    NotAnInterface {
        /// Fully-qualified name of the offending type
        name: String,
    },

    /// A declared exception type is not a class type.
    ///
    /// Exception declarations must reference class types of the target runtime;
    /// primitives and interfaces are rejected.
    #[error("Type '{name}' is not a class type and cannot be declared as a raised exception")]
    InvalidExceptionType {
        /// Fully-qualified name of the offending type
        name: String,
    },

    /// A target-visible name override was given but is empty.
    #[error("Method '{method}' was given an empty target-visible name")]
    EmptyMethodName {
        /// Source name of the method
        method: String,
    },

    /// A signature was declared on a class-bound member.
    ///
    /// Class-bound members have no equivalent in the emitted class shape.
    /// Declaring a signature on one is rejected outright rather than silently
    /// skipped later.
    #[error("Method '{method}' is class-bound; class-bound members cannot carry a signature")]
    UnsupportedBinding {
        /// Name of the class-bound member
        method: String,
    },

    /// More than one non-interface base was declared for a class.
    ///
    /// The target runtime supports single inheritance: at most one declared base
    /// may be a class type, all others must be interface contracts.
    #[error("Class '{class}' declares more than one superclass: '{first}' and '{second}'")]
    MultipleSuperclasses {
        /// Name of the declared class
        class: String,
        /// First superclass encountered
        first: String,
        /// Conflicting second superclass
        second: String,
    },

    /// A declared base cannot serve as a superclass or interface contract.
    ///
    /// Primitive types, for example, cannot be inherited from.
    #[error("Class '{class}' declares base '{base}', which is not inheritable")]
    InvalidBase {
        /// Name of the declared class
        class: String,
        /// Fully-qualified name of the offending base
        base: String,
    },

    // Environment errors - fatal at synthesis time
    /// Class emission was required but no build context is open.
    ///
    /// The descriptor itself can be built without a context; producing actual
    /// class bytes cannot. Callers may retry the synthesis once a context with a
    /// valid sink has been opened.
    #[error("Cannot synthesize class '{class}' without an active build sink")]
    NoBuildSink {
        /// Fully-qualified name of the class that could not be emitted
        class: String,
    },

    /// The build context was closed before the write was attempted.
    #[error("Build context for package '{package}' is already closed")]
    ContextClosed {
        /// Target package of the closed context
        package: String,
    },

    // External collaborator errors
    /// The code-generation backend reported a failure.
    #[error("Code generation failed for '{class}': {message}")]
    Backend {
        /// Fully-qualified name of the class being generated
        class: String,
        /// Backend-supplied failure description
        message: String,
    },

    /// The build sink reported a failure while persisting class bytes.
    #[error("{0}")]
    SinkError(#[from] std::io::Error),
}
