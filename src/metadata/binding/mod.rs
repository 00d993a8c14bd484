//! Declarative binding: from class declaration to synthesizer handle.
//!
//! This layer intercepts class declarations and wires them to the
//! [synthesizer](crate::metadata::synthesis). Two declaration styles are
//! supported, and both produce identical descriptors:
//!
//! 1. **Base-class style** - [`BridgeBase::shared`] yields a reusable marker
//!    base for a target package; declaring a class through it attaches a
//!    synthesizer handle automatically.
//! 2. **Explicit-transform style** - [`ClassTransform::apply`] transforms an
//!    already-declared class directly.
//!
//! # Ancestry re-derivation
//!
//! Transforming a class more than once must not stack synthesized wrapper
//! classes. When a declared base is itself a class this layer previously
//! produced, and its synthesized identity (module, simple name) matches the
//! class being declared, the base is stripped and replaced by *its own*
//! original bases. Ancestry therefore always reflects user-intended classes,
//! never transient synthesized intermediates.
//!
//! # Examples
//!
//! ```rust
//! use clasp::metadata::binding::{BridgeBase, ClassTransform};
//! use clasp::metadata::model::{Base, ClassDecl};
//! use clasp::metadata::typesystem::TypeRef;
//!
//! let decl = ClassDecl::new("samples", "BarBridge")
//!     .with_base(Base::Type(TypeRef::interface("java.util.concurrent.Callable")))
//!     .with_base(Base::Type(TypeRef::interface("java.io.Serializable").serializable()));
//!
//! // Base-class style:
//! let bound = BridgeBase::shared("org.example").declare(decl.clone())?;
//! assert_eq!(bound.full_name(), "org.example.samples.BarBridge");
//!
//! // Explicit-transform style, identical result:
//! let bound = ClassTransform::new("org.example").apply(decl)?;
//! assert!(bound.is_serializable());
//! # Ok::<(), clasp::Error>(())
//! ```

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::{
    metadata::{
        diagnostics::{DiagnosticCategory, Diagnostics},
        emit::{BuildContext, ClassHandle, ClassResolver, CodegenBackend},
        model::{Base, ClassDecl},
        synthesis::{ClassDescriptor, ClassSynthesizer, SynthConfig, SynthesisRequest},
        typesystem::{TypeKind, TypeRef},
    },
    Error, Result,
};

/// Pluggable factory for the synthesizer attached to a bound class.
///
/// The default factory builds a plain [`ClassSynthesizer`]; supply a custom
/// one to tune how descriptors are built or emitted.
pub trait SynthesizerFactory: Send + Sync {
    /// Creates the synthesizer for one resolved class declaration.
    fn create(&self, request: SynthesisRequest) -> ClassSynthesizer;
}

/// The default factory: builds an unmodified [`ClassSynthesizer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSynthesizerFactory;

impl SynthesizerFactory for DefaultSynthesizerFactory {
    fn create(&self, request: SynthesisRequest) -> ClassSynthesizer {
        ClassSynthesizer::new(request)
    }
}

fn shared_bases() -> &'static DashMap<String, Arc<BridgeBase>> {
    static SHARED: OnceLock<DashMap<String, Arc<BridgeBase>>> = OnceLock::new();
    SHARED.get_or_init(DashMap::new)
}

/// A reusable marker base that attaches a synthesizer to every class
/// declared through it.
///
/// Conceptually the "inherit from this and you are bridged" style: create
/// one per target package and route class declarations through
/// [`BridgeBase::declare`].
pub struct BridgeBase {
    package: String,
    factory: Arc<dyn SynthesizerFactory>,
    config: SynthConfig,
}

impl BridgeBase {
    /// Creates a marker base for the given target package with the default
    /// synthesizer factory.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            factory: Arc::new(DefaultSynthesizerFactory),
            config: SynthConfig::new(),
        }
    }

    /// Returns the process-wide marker base for a package.
    ///
    /// Bases made here use the default factory and are created once per
    /// package; repeated calls return the same instance. Custom-factory
    /// bases are not cached, build them with [`BridgeBase::with_factory`].
    #[must_use]
    pub fn shared(package: &str) -> Arc<Self> {
        shared_bases()
            .entry(package.to_string())
            .or_insert_with(|| Arc::new(Self::new(package)))
            .clone()
    }

    /// Creates a marker base with a custom synthesizer factory.
    #[must_use]
    pub fn with_factory(package: impl Into<String>, factory: Arc<dyn SynthesizerFactory>) -> Self {
        Self {
            package: package.into(),
            factory,
            config: SynthConfig::new(),
        }
    }

    /// Attaches extra configuration passed through to every synthesizer.
    #[must_use]
    pub fn with_config(mut self, config: SynthConfig) -> Self {
        self.config = config;
        self
    }

    /// The target package of this marker base.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Runs the build hook for a class declared with this base.
    ///
    /// # Errors
    ///
    /// Ancestry validation failures, see [`ClassTransform::apply`].
    pub fn declare(&self, decl: ClassDecl) -> Result<BoundClass> {
        bind(&self.package, self.factory.as_ref(), &self.config, decl)
    }
}

/// The explicit transformation applied to an already-declared class.
///
/// Behaves identically to declaring through a [`BridgeBase`]; use it when
/// the class body was evaluated before the decision to bridge it was made.
pub struct ClassTransform {
    package: String,
    factory: Arc<dyn SynthesizerFactory>,
    config: SynthConfig,
}

impl ClassTransform {
    /// Creates a transform targeting the given package.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            factory: Arc::new(DefaultSynthesizerFactory),
            config: SynthConfig::new(),
        }
    }

    /// Uses a custom synthesizer factory.
    #[must_use]
    pub fn with_factory(mut self, factory: Arc<dyn SynthesizerFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Attaches extra configuration passed through to the synthesizer.
    #[must_use]
    pub fn with_config(mut self, config: SynthConfig) -> Self {
        self.config = config;
        self
    }

    /// Transforms a class declaration, re-deriving true ancestry.
    ///
    /// # Errors
    ///
    /// - [`Error::MultipleSuperclasses`] if more than one base is a class type
    /// - [`Error::InvalidBase`] if a base is not inheritable
    pub fn apply(&self, decl: ClassDecl) -> Result<BoundClass> {
        bind(&self.package, self.factory.as_ref(), &self.config, decl)
    }
}

/// A class object produced by the binding layer.
///
/// Carries the resolved ancestry and the synthesizer handle the runtime uses
/// when the class is actually required. A `BoundClass` can itself appear as
/// a [`Base::Bridged`] in a later declaration; re-transforming the same
/// class then splices in [`BoundClass::original_bases`] instead of stacking
/// synthesized wrappers.
#[derive(Debug)]
pub struct BoundClass {
    package: String,
    module: String,
    name: String,
    full_name: String,
    original_bases: Vec<Base>,
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
    synthesizer: ClassSynthesizer,
}

impl BoundClass {
    /// The target package the class belongs to.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// The source module the class was declared in.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The simple class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fully-qualified synthesized name (`package.module.name`).
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The user-intended bases the class was bound with, after ancestry
    /// re-derivation.
    #[must_use]
    pub fn original_bases(&self) -> &[Base] {
        &self.original_bases
    }

    /// The resolved superclass, if a class base was declared.
    #[must_use]
    pub fn superclass(&self) -> Option<&TypeRef> {
        self.superclass.as_ref()
    }

    /// The resolved interface contracts.
    #[must_use]
    pub fn interfaces(&self) -> &[TypeRef] {
        &self.interfaces
    }

    /// The synthesizer handle attached at declaration time.
    #[must_use]
    pub fn synthesizer(&self) -> &ClassSynthesizer {
        &self.synthesizer
    }

    /// Diagnostics collected while binding and building descriptors.
    #[must_use]
    pub fn diagnostics(&self) -> &Arc<Diagnostics> {
        self.synthesizer.diagnostics()
    }

    /// True if the superclass or any interface is serializable.
    #[must_use]
    pub fn is_serializable(&self) -> bool {
        self.synthesizer.is_serializable()
    }

    /// Builds the emitted class descriptor.
    #[must_use]
    pub fn descriptor(&self) -> ClassDescriptor {
        self.synthesizer.descriptor()
    }

    /// Synthesizes the class, see [`ClassSynthesizer::synthesize`].
    ///
    /// # Errors
    ///
    /// Propagates synthesis failures unchanged.
    pub fn synthesize(
        &self,
        resolver: &dyn ClassResolver,
        backend: &dyn CodegenBackend,
        context: Option<&mut BuildContext>,
    ) -> Result<ClassHandle> {
        self.synthesizer.synthesize(resolver, backend, context)
    }

    /// The synthesized class as a type reference, serializable when the
    /// class itself is.
    #[must_use]
    pub fn synthesized_type(&self) -> TypeRef {
        let ty = TypeRef::class(&self.full_name);
        if self.is_serializable() {
            ty.serializable()
        } else {
            ty
        }
    }

    /// Wraps the bound class for use as a declared base.
    #[must_use]
    pub fn into_base(self) -> Base {
        Base::Bridged(Arc::new(self))
    }
}

fn bind(
    package: &str,
    factory: &dyn SynthesizerFactory,
    config: &SynthConfig,
    decl: ClassDecl,
) -> Result<BoundClass> {
    let diagnostics = Arc::new(Diagnostics::new());

    let bases = rederive_bases(&decl, &diagnostics);
    let (superclass, interfaces) = resolve_ancestry(decl.name(), &bases)?;

    let name = decl.name().to_string();
    let module = decl.module().to_string();
    let full_name = format!("{package}.{module}.{name}");
    let (_, namespace) = decl.into_parts();

    let synthesizer = factory.create(SynthesisRequest {
        superclass: superclass.clone(),
        interfaces: interfaces.clone(),
        class_name: name.clone(),
        module_name: module.clone(),
        full_name: full_name.clone(),
        package: package.to_string(),
        namespace,
        config: config.clone(),
        diagnostics: Arc::clone(&diagnostics),
    });

    Ok(BoundClass {
        package: package.to_string(),
        module,
        name,
        full_name,
        original_bases: bases,
        superclass,
        interfaces,
        synthesizer,
    })
}

/// Strips previously-synthesized intermediates out of the declared bases.
///
/// A bridged base counts as an intermediate when its synthesized identity
/// names the class being declared: same source module, same simple name.
/// Such a base is replaced by its own original bases.
fn rederive_bases(decl: &ClassDecl, diagnostics: &Diagnostics) -> Vec<Base> {
    let mut bases = Vec::new();

    for base in decl.bases() {
        match base {
            Base::Bridged(bound)
                if bound.module() == decl.module() && bound.name() == decl.name() =>
            {
                diagnostics.info(
                    DiagnosticCategory::Binding,
                    format!(
                        "Replacing synthesized base '{}' with its own bases",
                        bound.full_name()
                    ),
                );
                bases.extend(bound.original_bases().iter().cloned());
            }
            other => bases.push(other.clone()),
        }
    }

    bases
}

/// Splits declared bases into superclass and interface contracts.
///
/// Interface-kind bases become contracts; at most one class-kind base may
/// remain as the superclass.
fn resolve_ancestry(class: &str, bases: &[Base]) -> Result<(Option<TypeRef>, Vec<TypeRef>)> {
    let mut superclass: Option<TypeRef> = None;
    let mut interfaces = Vec::new();

    for base in bases {
        let ty = match base {
            Base::Type(ty) => ty.clone(),
            Base::Bridged(bound) => bound.synthesized_type(),
        };

        match ty.kind() {
            TypeKind::Interface => interfaces.push(ty),
            TypeKind::Class => {
                if let Some(first) = &superclass {
                    return Err(Error::MultipleSuperclasses {
                        class: class.to_string(),
                        first: first.name().to_string(),
                        second: ty.name().to_string(),
                    });
                }
                superclass = Some(ty);
            }
            TypeKind::Primitive => {
                return Err(Error::InvalidBase {
                    class: class.to_string(),
                    base: ty.name().to_string(),
                });
            }
        }
    }

    Ok((superclass, interfaces))
}
