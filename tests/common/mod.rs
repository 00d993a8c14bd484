//! Shared in-memory emission fixtures for integration tests.
//!
//! A [`ClassRegistry`] stands in for the target runtime's class space: the
//! sink writes generated bytes into it and the resolver answers lookups from
//! it, so a class emitted in one unit of work becomes resolvable in the next.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use clasp::prelude::*;

/// Shared in-memory class space backing both sink and resolver.
#[derive(Default, Clone)]
pub struct ClassRegistry {
    classes: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-registers a class as already loadable, without bytes of interest.
    pub fn preload(&self, full_name: &str) {
        self.classes
            .lock()
            .unwrap()
            .insert(full_name.to_string(), Vec::new());
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.classes.lock().unwrap().contains_key(full_name)
    }

    pub fn bytes(&self, full_name: &str) -> Option<Vec<u8>> {
        self.classes.lock().unwrap().get(full_name).cloned()
    }

    pub fn len(&self) -> usize {
        self.classes.lock().unwrap().len()
    }

    /// A sink writing into this registry.
    pub fn sink(&self) -> MemorySink {
        MemorySink {
            registry: self.clone(),
        }
    }

    /// A resolver answering from this registry.
    pub fn resolver(&self) -> MemoryResolver {
        MemoryResolver {
            registry: self.clone(),
        }
    }
}

/// Build sink that registers generated bytes in the shared registry.
pub struct MemorySink {
    registry: ClassRegistry,
}

impl BuildSink for MemorySink {
    fn write_class(&mut self, _package: &str, full_name: &str, bytes: &[u8]) -> clasp::Result<()> {
        self.registry
            .classes
            .lock()
            .unwrap()
            .insert(full_name.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Resolver that treats every registered class as loadable.
pub struct MemoryResolver {
    registry: ClassRegistry,
}

impl ClassResolver for MemoryResolver {
    fn resolve(&self, full_name: &str) -> Option<ClassHandle> {
        self.registry
            .contains(full_name)
            .then(|| ClassHandle::resolved(full_name))
    }
}

/// Backend producing fixed class bytes and counting invocations.
#[derive(Default)]
pub struct CountingBackend {
    calls: AtomicUsize,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CodegenBackend for CountingBackend {
    fn generate(&self, _descriptor: &ClassDescriptor) -> clasp::Result<ClassArtifact> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ClassArtifact::Bytes(vec![0xCA, 0xFE, 0xBA, 0xBE]))
    }
}

/// Backend that always reports a generation failure.
pub struct FailingBackend;

impl CodegenBackend for FailingBackend {
    fn generate(&self, descriptor: &ClassDescriptor) -> clasp::Result<ClassArtifact> {
        Err(clasp::Error::Backend {
            class: descriptor.full_name.clone(),
            message: "synthetic failure".to_string(),
        })
    }
}

/// A zero-argument method with a declared `int` return type.
pub fn int_method(name: &str) -> FunctionDef {
    let mut method = FunctionDef::new(name, Vec::<String>::new());
    method
        .declare_signature(SignatureDecl::new(TypeRef::primitive(PrimitiveKind::Int)))
        .unwrap();
    method
}

/// The serializable marker interface of the target runtime.
pub fn serializable_interface() -> TypeRef {
    TypeRef::interface("java.io.Serializable").serializable()
}
