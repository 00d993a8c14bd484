//! Class synthesis: from bound declaration to emitted class.
//!
//! The [`ClassSynthesizer`] consumes the resolved ancestry and member
//! namespace produced by the [binding layer](crate::metadata::binding) and
//! builds the complete [`ClassDescriptor`]: it decides serializability,
//! collects constants, copies class annotations, derives missing access
//! levels and assembles method descriptors. On demand it drives an external
//! [`CodegenBackend`](crate::metadata::emit::CodegenBackend) to produce the
//! actual class artifact.
//!
//! # Key Components
//!
//! - [`ClassSynthesizer`] - descriptor construction and emission driver
//! - [`SynthesisRequest`] - the inputs a synthesizer is created from
//! - [`SynthConfig`] - extra configuration (explicit constants)
//! - [`ClassDescriptor`] / [`MethodDescriptor`] - the emitted shapes
//! - [`access_from_name`] - pure name-pattern access derivation
//!
//! # Lifecycle
//!
//! Per class: `declared` → `metadata-attached` → `bound` →
//! `resolved-or-built` / `emitted`. The last two are terminal: a synthesizer
//! caches its handle after the first successful [`synthesize`] call and every
//! later call returns the same handle without touching the backend.
//! Re-transforming an already-built class goes back through the binding
//! layer and produces a new synthesizer with re-derived ancestry; it never
//! mutates a terminal one.
//!
//! [`synthesize`]: ClassSynthesizer::synthesize
//!
//! # Examples
//!
//! ```rust
//! use clasp::metadata::binding::ClassTransform;
//! use clasp::metadata::model::{Base, ClassDecl};
//! use clasp::metadata::signature::{FunctionDef, SignatureDecl};
//! use clasp::metadata::typesystem::{PrimitiveKind, TypeRef};
//!
//! let mut return_zero = FunctionDef::new("returnZero", Vec::<String>::new());
//! return_zero.declare_signature(SignatureDecl::new(TypeRef::primitive(PrimitiveKind::Int)))?;
//!
//! let bound = ClassTransform::new("org.example").apply(
//!     ClassDecl::new("samples", "MethodSample")
//!         .with_base(Base::Type(TypeRef::class("java.lang.Object")))
//!         .with_function(return_zero),
//! )?;
//!
//! let descriptor = bound.descriptor();
//! assert_eq!(descriptor.full_name, "org.example.samples.MethodSample");
//! assert!(descriptor.method("returnZero").unwrap().is_abstract());
//! # Ok::<(), clasp::Error>(())
//! ```

mod access;
mod descriptor;

pub use access::access_from_name;
pub use descriptor::{ClassDescriptor, MethodDescriptor, Modifiers};

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::{
    metadata::{
        diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics},
        emit::{BuildContext, ClassArtifact, ClassHandle, ClassResolver, CodegenBackend},
        model::{Member, Namespace},
        signature::{Constant, FunctionBinding},
        typesystem::{LiteralValue, PrimitiveKind, TypeRef},
    },
    Error, Result,
};

/// Name of the serialization-identity constant seeded on serializable classes.
pub const SERIAL_VERSION_CONSTANT: &str = "serialVersionUID";

/// Extra configuration handed to the synthesizer alongside the declaration.
///
/// Currently carries explicitly supplied constants, which take precedence
/// over the seeded serialization-identity entry.
#[derive(Debug, Clone, Default)]
pub struct SynthConfig {
    constants: BTreeMap<String, Constant>,
}

impl SynthConfig {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies an explicit constant, overriding any seeded entry of the
    /// same name.
    #[must_use]
    pub fn with_constant(mut self, name: impl Into<String>, constant: Constant) -> Self {
        self.constants.insert(name.into(), constant);
        self
    }

    /// The explicitly supplied constants.
    #[must_use]
    pub fn constants(&self) -> &BTreeMap<String, Constant> {
        &self.constants
    }
}

/// The inputs a [`ClassSynthesizer`] is created from.
///
/// Produced by the binding layer after ancestry resolution; a custom
/// synthesizer factory receives this request unchanged.
#[derive(Debug)]
pub struct SynthesisRequest {
    /// Resolved superclass, if a class base was declared.
    pub superclass: Option<TypeRef>,

    /// Resolved interface contracts.
    pub interfaces: Vec<TypeRef>,

    /// Simple class name.
    pub class_name: String,

    /// Source module the class was declared in.
    pub module_name: String,

    /// Fully-qualified target name (`package.module.name`).
    pub full_name: String,

    /// Target package of the unit of work.
    pub package: String,

    /// The member namespace of the declared class.
    pub namespace: Namespace,

    /// Extra configuration (explicit constants).
    pub config: SynthConfig,

    /// Diagnostics container shared with the binding layer.
    pub diagnostics: Arc<Diagnostics>,
}

/// Builds [`ClassDescriptor`]s and drives emission for one bound class.
///
/// The synthesizer borrows the collected metadata read-only; nothing in the
/// namespace is mutated. Skip-and-continue conditions (members without type
/// information, class-bound members, constant collisions) are recorded in the
/// [`Diagnostics`] container instead of failing the build.
#[derive(Debug)]
pub struct ClassSynthesizer {
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
    class_name: String,
    module_name: String,
    full_name: String,
    package: String,
    namespace: Namespace,
    config: SynthConfig,
    diagnostics: Arc<Diagnostics>,
    built: OnceLock<ClassHandle>,
}

impl ClassSynthesizer {
    /// Creates a synthesizer from a binding-layer request.
    #[must_use]
    pub fn new(request: SynthesisRequest) -> Self {
        Self {
            superclass: request.superclass,
            interfaces: request.interfaces,
            class_name: request.class_name,
            module_name: request.module_name,
            full_name: request.full_name,
            package: request.package,
            namespace: request.namespace,
            config: request.config,
            diagnostics: request.diagnostics,
            built: OnceLock::new(),
        }
    }

    /// The fully-qualified target name of the class being synthesized.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The target package of the class being synthesized.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The diagnostics collected while binding and building descriptors.
    #[must_use]
    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        &self.diagnostics
    }

    /// True if the superclass or any interface is serializable.
    #[must_use]
    pub fn is_serializable(&self) -> bool {
        self.superclass
            .iter()
            .chain(self.interfaces.iter())
            .any(TypeRef::is_serializable)
    }

    /// Builds the complete class descriptor.
    ///
    /// This is a pure read of the collected metadata: serializability,
    /// constants, class annotations and method descriptors are assembled
    /// fresh on every call. Skipped members and constant overrides are
    /// recorded as warnings.
    #[must_use]
    pub fn descriptor(&self) -> ClassDescriptor {
        let serializable = self.is_serializable();
        let constants = self.collect_constants(serializable);

        let annotations = self
            .namespace
            .class_metadata()
            .map(|metadata| metadata.annotations().to_vec())
            .unwrap_or_default();

        let methods = self.collect_methods();

        ClassDescriptor {
            package: self.package.clone(),
            module: self.module_name.clone(),
            name: self.class_name.clone(),
            full_name: self.full_name.clone(),
            superclass: self.superclass.clone(),
            interfaces: self.interfaces.clone(),
            constants,
            serializable,
            annotations,
            methods,
        }
    }

    fn collect_constants(&self, serializable: bool) -> BTreeMap<String, Constant> {
        let mut constants = BTreeMap::new();

        // A serialization identity of 1 is sufficient for bridged classes;
        // the dynamic host resolves members by name, not by layout.
        if serializable {
            constants.insert(
                SERIAL_VERSION_CONSTANT.to_string(),
                Constant::new(
                    LiteralValue::Long(1),
                    TypeRef::primitive(PrimitiveKind::Long),
                ),
            );
        }

        for (name, constant) in self.config.constants() {
            constants.insert(name.clone(), constant.clone());
        }

        for (name, member) in self.namespace.iter() {
            if let Member::Constant(constant) = member {
                if constants.contains_key(name) {
                    self.diagnostics.push(
                        Diagnostic::new(
                            DiagnosticSeverity::Warning,
                            DiagnosticCategory::Constant,
                            format!("Constant with name '{name}' is already declared, overriding"),
                        )
                        .with_class(&self.class_name)
                        .with_member(name),
                    );
                }
                constants.insert(name.to_string(), constant.clone());
            }
        }

        constants
    }

    fn collect_methods(&self) -> Vec<MethodDescriptor> {
        let mut methods = Vec::new();

        for (name, member) in self.namespace.iter() {
            let Member::Function(function) = member else {
                continue;
            };

            if function.binding() == FunctionBinding::ClassBound {
                self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticSeverity::Warning,
                        DiagnosticCategory::Method,
                        format!("Class-bound member '{name}' is not supported, skipping"),
                    )
                    .with_class(&self.class_name)
                    .with_member(name),
                );
                continue;
            }

            let Some(metadata) = function.metadata() else {
                self.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticSeverity::Warning,
                        DiagnosticCategory::Method,
                        format!("Method '{name}' is missing type information, skipping"),
                    )
                    .with_class(&self.class_name)
                    .with_member(name),
                );
                continue;
            };

            let access = metadata
                .access()
                .unwrap_or_else(|| access_from_name(name, &self.class_name));
            let mut modifiers = Modifiers::from(access);

            if function.binding() == FunctionBinding::Static {
                modifiers |= Modifiers::STATIC;
            }
            if function.is_abstract() {
                modifiers |= Modifiers::ABSTRACT;
            }

            // Every emitted method is forced abstract: the backend must not
            // generate a call to a superclass implementation that does not
            // exist, the runtime supplies the body through the bridge.
            modifiers |= Modifiers::ABSTRACT;

            let arg_annotations = function
                .params()
                .iter()
                .map(|param| metadata.arg_annotations(param).to_vec())
                .collect();

            methods.push(MethodDescriptor {
                name: metadata.name().to_string(),
                source_name: name.to_string(),
                return_type: metadata.return_type().clone(),
                arg_types: metadata.arg_types().to_vec(),
                exceptions: metadata.exception_types().to_vec(),
                modifiers,
                annotations: metadata.annotations().to_vec(),
                arg_annotations,
            });
        }

        methods
    }

    /// Synthesizes the class, returning a loadable handle.
    ///
    /// Performs the lookup-before-build short-circuit first: if the resolver
    /// already knows the fully-qualified name, that class is returned and
    /// nothing is generated. Otherwise the descriptor is handed to the
    /// backend; raw bytes are written through the open build context. The
    /// returned handle is cached, making the build at-most-once per
    /// synthesizer.
    ///
    /// # Errors
    ///
    /// - [`Error::NoBuildSink`] if emission is required and `context` is `None`
    /// - [`Error::ContextClosed`] if the context was closed already
    /// - Backend and sink failures are propagated
    pub fn synthesize(
        &self,
        resolver: &dyn ClassResolver,
        backend: &dyn CodegenBackend,
        context: Option<&mut BuildContext>,
    ) -> Result<ClassHandle> {
        if let Some(handle) = self.built.get() {
            return Ok(handle.clone());
        }

        if let Some(existing) = resolver.resolve(&self.full_name) {
            self.diagnostics.info(
                DiagnosticCategory::Synthesis,
                format!("Class '{}' already resolvable, skipping emission", self.full_name),
            );
            return Ok(self.built.get_or_init(|| existing).clone());
        }

        let Some(context) = context else {
            return Err(Error::NoBuildSink {
                class: self.full_name.clone(),
            });
        };

        let descriptor = self.descriptor();
        let handle = match backend.generate(&descriptor)? {
            ClassArtifact::Handle(handle) => handle,
            ClassArtifact::Bytes(bytes) => {
                context.write_class(&self.full_name, &bytes)?;
                ClassHandle::emitted(&self.full_name)
            }
        };

        self.diagnostics.info(
            DiagnosticCategory::Synthesis,
            format!("Built class '{}'", self.full_name),
        );
        Ok(self.built.get_or_init(|| handle).clone())
    }
}
