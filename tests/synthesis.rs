//! End-to-end synthesis tests: descriptor construction and emission.
//!
//! Covers access derivation, the forced-abstract shape of emitted methods,
//! serialization-constant seeding and precedence, the lookup-before-build
//! short-circuit, handle caching and build-context requirements.

mod common;

use clasp::prelude::*;
use common::{int_method, serializable_interface, ClassRegistry, CountingBackend, FailingBackend};

fn bar_bridge_decl() -> ClassDecl {
    ClassDecl::new("samples", "BarBridge")
        .with_base(Base::Type(TypeRef::interface("java.util.concurrent.Callable")))
        .with_base(Base::Type(serializable_interface()))
        .with_function(int_method("returnZero"))
}

/// A plain `returnZero() -> int` comes out public, abstract and typed `int`.
#[test]
fn methods_are_emitted_public_and_abstract() -> clasp::Result<()> {
    let bound = ClassTransform::new("org.example").apply(bar_bridge_decl())?;
    let descriptor = bound.descriptor();
    let method = descriptor.method("returnZero").unwrap();

    assert_eq!(method.modifiers.access(), Some(Access::Public));
    assert!(method.is_abstract());
    assert!(!method.is_static());
    assert_eq!(method.return_type.name(), "int");
    assert!(method.arg_types.is_empty());
    Ok(())
}

/// Name-pattern access derivation applies per member; an explicit access
/// declaration wins over the pattern.
#[test]
fn access_derivation_and_explicit_override() -> clasp::Result<()> {
    let mut explicit = FunctionDef::new("_looks_protected", Vec::<String>::new());
    explicit.declare_signature(
        SignatureDecl::new(TypeRef::primitive(PrimitiveKind::Void)).with_access(Access::Public),
    )?;

    let bound = ClassTransform::new("org.example").apply(
        ClassDecl::new("samples", "AccessSample")
            .with_base(Base::Type(TypeRef::class("java.lang.Object")))
            .with_function(int_method("plain"))
            .with_function(int_method("_helper"))
            .with_function(int_method("_AccessSample__hidden"))
            .with_function(int_method("__call__"))
            .with_function(explicit),
    )?;
    let descriptor = bound.descriptor();

    let access = |name: &str| descriptor.method(name).unwrap().modifiers.access();
    assert_eq!(access("plain"), Some(Access::Public));
    assert_eq!(access("_helper"), Some(Access::Protected));
    assert_eq!(access("_AccessSample__hidden"), Some(Access::Private));
    assert_eq!(access("__call__"), Some(Access::Public));
    assert_eq!(access("_looks_protected"), Some(Access::Public));
    Ok(())
}

/// Statically-bound methods carry the STATIC modifier and stay abstract.
#[test]
fn static_binding_sets_the_static_modifier() -> clasp::Result<()> {
    let mut of_value = FunctionDef::new("ofValue", ["value"])
        .with_binding(FunctionBinding::Static);
    of_value.declare_signature(
        SignatureDecl::new(TypeRef::class("org.example.Holder"))
            .with_args([TypeRef::primitive(PrimitiveKind::Int)]),
    )?;

    let bound = ClassTransform::new("org.example").apply(
        ClassDecl::new("samples", "Holder")
            .with_base(Base::Type(TypeRef::class("java.lang.Object")))
            .with_function(of_value),
    )?;

    let descriptor = bound.descriptor();
    let method = descriptor.method("ofValue").unwrap();
    assert!(method.is_static());
    assert!(method.is_abstract());
    Ok(())
}

/// Members without declared type information are skipped with a warning,
/// never silently dropped and never fatal.
#[test]
fn untyped_members_are_skipped_with_a_warning() -> clasp::Result<()> {
    let bound = ClassTransform::new("org.example").apply(
        ClassDecl::new("samples", "Partial")
            .with_base(Base::Type(TypeRef::class("java.lang.Object")))
            .with_function(int_method("typed"))
            .with_function(FunctionDef::new("untyped", Vec::<String>::new())),
    )?;

    let descriptor = bound.descriptor();
    assert_eq!(descriptor.methods.len(), 1);
    assert!(descriptor.method("untyped").is_none());
    assert!(bound.diagnostics().has_warnings());
    assert!(bound
        .diagnostics()
        .warnings()
        .iter()
        .any(|entry| entry.member.as_deref() == Some("untyped")));
    Ok(())
}

/// A serializable class gets exactly one seeded serialVersionUID of Long(1).
#[test]
fn serializable_classes_seed_a_version_constant() -> clasp::Result<()> {
    let bound = ClassTransform::new("org.example").apply(bar_bridge_decl())?;
    let descriptor = bound.descriptor();

    assert!(descriptor.serializable);
    let uid = descriptor.constant(SERIAL_VERSION_CONSTANT).unwrap();
    assert_eq!(uid.value().as_i64(), Some(1));
    assert_eq!(uid.constant_type().name(), "long");
    // The seeded entry is the only constant of the class.
    assert_eq!(descriptor.constants.len(), 1);

    // A non-serializable class gets no seeded constant.
    let plain = ClassTransform::new("org.example").apply(
        ClassDecl::new("samples", "Plain")
            .with_base(Base::Type(TypeRef::class("java.lang.Object"))),
    )?;
    assert!(plain.descriptor().constant(SERIAL_VERSION_CONSTANT).is_none());
    Ok(())
}

/// An explicitly declared serialVersionUID overrides the seeded value; the
/// override is reported as a warning, not an error.
#[test]
fn explicit_version_constant_wins_over_the_seed() -> clasp::Result<()> {
    let bound = ClassTransform::new("org.example").apply(bar_bridge_decl().with_constant(
        SERIAL_VERSION_CONSTANT,
        Constant::new(
            LiteralValue::Long(99),
            TypeRef::primitive(PrimitiveKind::Long),
        ),
    ))?;

    let descriptor = bound.descriptor();
    let uid = descriptor.constant(SERIAL_VERSION_CONSTANT).unwrap();
    assert_eq!(uid.value().as_i64(), Some(99));
    assert!(bound
        .diagnostics()
        .by_category(DiagnosticCategory::Constant)
        .iter()
        .any(|entry| entry.severity == DiagnosticSeverity::Warning));
    Ok(())
}

/// Constants supplied through configuration land in the descriptor.
#[test]
fn configured_constants_reach_the_descriptor() -> clasp::Result<()> {
    let config = SynthConfig::new().with_constant(
        "VERSION",
        Constant::new(
            LiteralValue::String("1.0".to_string()),
            TypeRef::class("java.lang.String"),
        ),
    );

    let bound = ClassTransform::new("org.example")
        .with_config(config)
        .apply(bar_bridge_decl())?;

    let descriptor = bound.descriptor();
    assert_eq!(
        descriptor.constant("VERSION").unwrap().value().as_str(),
        Some("1.0")
    );
    Ok(())
}

/// Full emission path: bytes flow through the open context into the sink and
/// the returned handle is marked as emitted.
#[test]
fn emission_writes_through_the_open_context() -> clasp::Result<()> {
    let registry = ClassRegistry::new();
    let backend = CountingBackend::new();
    let bound = ClassTransform::new("org.example").apply(bar_bridge_decl())?;

    let mut context = BuildContext::open("org.example", Box::new(registry.sink()));
    let handle = bound.synthesize(&registry.resolver(), &backend, Some(&mut context))?;
    context.close()?;

    assert_eq!(handle.full_name(), "org.example.samples.BarBridge");
    assert_eq!(handle.origin(), ClassOrigin::Emitted);
    assert_eq!(backend.calls(), 1);
    assert!(registry.contains("org.example.samples.BarBridge"));
    assert_eq!(
        registry.bytes("org.example.samples.BarBridge").unwrap(),
        vec![0xCA, 0xFE, 0xBA, 0xBE]
    );
    Ok(())
}

/// Lookup-before-build: an already resolvable class short-circuits emission
/// and the backend is never consulted.
#[test]
fn resolvable_classes_are_not_rebuilt() -> clasp::Result<()> {
    let registry = ClassRegistry::new();
    registry.preload("org.example.samples.BarBridge");
    let backend = CountingBackend::new();
    let bound = ClassTransform::new("org.example").apply(bar_bridge_decl())?;

    // No context needed: nothing is emitted.
    let handle = bound.synthesize(&registry.resolver(), &backend, None)?;

    assert_eq!(handle.origin(), ClassOrigin::Resolved);
    assert_eq!(backend.calls(), 0);
    Ok(())
}

/// Synthesis is at-most-once per bound class: repeated calls return the
/// cached handle without a second backend invocation.
#[test]
fn repeated_synthesis_returns_the_cached_handle() -> clasp::Result<()> {
    let registry = ClassRegistry::new();
    let backend = CountingBackend::new();
    let bound = ClassTransform::new("org.example").apply(bar_bridge_decl())?;

    let mut context = BuildContext::open("org.example", Box::new(registry.sink()));
    let first = bound.synthesize(&registry.resolver(), &backend, Some(&mut context))?;
    let second = bound.synthesize(&registry.resolver(), &backend, Some(&mut context))?;
    let third = bound.synthesize(&registry.resolver(), &backend, None)?;
    context.close()?;

    assert_eq!(first, second);
    assert_eq!(first, third);
    assert_eq!(backend.calls(), 1);
    Ok(())
}

/// Emission without an open build context fails with a retryable error; a
/// later call with a context succeeds.
#[test]
fn emission_requires_an_open_context() -> clasp::Result<()> {
    let registry = ClassRegistry::new();
    let backend = CountingBackend::new();
    let bound = ClassTransform::new("org.example").apply(bar_bridge_decl())?;

    assert!(matches!(
        bound.synthesize(&registry.resolver(), &backend, None),
        Err(clasp::Error::NoBuildSink { .. })
    ));

    let mut context = BuildContext::open("org.example", Box::new(registry.sink()));
    let handle = bound.synthesize(&registry.resolver(), &backend, Some(&mut context))?;
    context.close()?;

    assert_eq!(handle.origin(), ClassOrigin::Emitted);
    Ok(())
}

/// Backend failures propagate to the caller and nothing is written.
#[test]
fn backend_failures_abort_the_write() -> clasp::Result<()> {
    let registry = ClassRegistry::new();
    let bound = ClassTransform::new("org.example").apply(bar_bridge_decl())?;

    let mut context = BuildContext::open("org.example", Box::new(registry.sink()));
    let result = bound.synthesize(&registry.resolver(), &FailingBackend, Some(&mut context));
    context.close()?;

    assert!(matches!(result, Err(clasp::Error::Backend { .. })));
    assert_eq!(registry.len(), 0);
    Ok(())
}

/// Direct writes go through the open context into the sink; closing flushes.
#[test]
fn context_writes_reach_the_sink() {
    let registry = ClassRegistry::new();
    let mut context = BuildContext::open("org.example", Box::new(registry.sink()));
    assert!(context.is_open());

    context
        .write_class("org.example.samples.Early", &[0x01])
        .unwrap();
    context.close().unwrap();
    assert!(registry.contains("org.example.samples.Early"));
}

/// A class emitted in one unit of work resolves in the next, so the second
/// synthesizer never touches its backend.
#[test]
fn emitted_classes_resolve_in_later_units_of_work() -> clasp::Result<()> {
    let registry = ClassRegistry::new();
    let backend = CountingBackend::new();

    let first = ClassTransform::new("org.example").apply(bar_bridge_decl())?;
    let mut context = BuildContext::open("org.example", Box::new(registry.sink()));
    first.synthesize(&registry.resolver(), &backend, Some(&mut context))?;
    context.close()?;

    // Same declaration bound again later, e.g. on process restart.
    let second = ClassTransform::new("org.example").apply(bar_bridge_decl())?;
    let handle = second.synthesize(&registry.resolver(), &backend, None)?;

    assert_eq!(handle.origin(), ClassOrigin::Resolved);
    assert_eq!(backend.calls(), 1);
    Ok(())
}
