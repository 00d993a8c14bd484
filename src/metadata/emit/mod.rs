//! Emission boundary: build context, sink, backend and resolver contracts.
//!
//! The synthesis engine performs no I/O of its own. Everything that touches
//! the outside world during emission goes through the contracts in this
//! module:
//!
//! - [`BuildContext`] - the scoped unit-of-work state that must be open for
//!   emission to proceed; wraps the active [`BuildSink`]
//! - [`BuildSink`] - persists or registers generated class bytes
//! - [`CodegenBackend`] - turns a finished descriptor into a class artifact
//! - [`ClassResolver`] - answers whether a class is already loadable, enabling
//!   the lookup-before-build short-circuit
//!
//! # Build context lifecycle
//!
//! A context is opened before the first class of a unit of work is
//! synthesized and closed after the last one; every synthesis call in that
//! window writes into the same sink. Dropping a context closes it, so the
//! sink is released on every exit path, including failure:
//!
//! ```rust
//! use clasp::metadata::emit::{BuildContext, BuildSink};
//! use clasp::Result;
//!
//! struct NullSink;
//! impl BuildSink for NullSink {
//!     fn write_class(&mut self, _: &str, _: &str, _: &[u8]) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut ctx = BuildContext::open("org.example", Box::new(NullSink));
//! assert!(ctx.is_open());
//! // ... synthesize classes ...
//! ctx.close()?;
//! # Ok::<(), clasp::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::{metadata::synthesis::ClassDescriptor, Error, Result};

/// How a class handle came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassOrigin {
    /// The class was already loadable and returned by the resolver.
    Resolved,
    /// The class was generated and written through the build sink.
    Emitted,
}

/// An opaque handle to a loadable class of the target runtime.
///
/// Handles are what synthesis returns: either an existing class found by the
/// [`ClassResolver`], or the class that was just emitted. Compared by
/// fully-qualified name and origin.
#[derive(Clone, PartialEq, Eq)]
pub struct ClassHandle {
    full_name: Arc<str>,
    origin: ClassOrigin,
}

impl ClassHandle {
    /// Creates a handle for a class found by the resolver.
    #[must_use]
    pub fn resolved(full_name: impl AsRef<str>) -> Self {
        Self {
            full_name: Arc::from(full_name.as_ref()),
            origin: ClassOrigin::Resolved,
        }
    }

    /// Creates a handle for a freshly emitted class.
    #[must_use]
    pub fn emitted(full_name: impl AsRef<str>) -> Self {
        Self {
            full_name: Arc::from(full_name.as_ref()),
            origin: ClassOrigin::Emitted,
        }
    }

    /// The fully-qualified name of the class.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// How this handle came into existence.
    #[must_use]
    pub fn origin(&self) -> ClassOrigin {
        self.origin
    }
}

impl fmt::Debug for ClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassHandle")
            .field("full_name", &self.full_name)
            .field("origin", &self.origin)
            .finish()
    }
}

/// The result of driving the code-generation backend.
pub enum ClassArtifact {
    /// The backend loaded/registered the class itself and returned a handle.
    Handle(ClassHandle),
    /// The backend produced raw class bytes; the engine writes them through
    /// the active sink.
    Bytes(Vec<u8>),
}

/// Destination for generated class bytes.
///
/// Implementations persist or register the bytes for later loading: a class
/// directory, an archive writer, an in-memory loader. The engine guarantees
/// `write_class` is only called while the owning [`BuildContext`] is open.
pub trait BuildSink {
    /// Writes the bytes of one generated class.
    ///
    /// # Errors
    ///
    /// Implementations report persistence failures; a failure aborts the
    /// synthesis call that triggered the write.
    fn write_class(&mut self, package: &str, full_name: &str, bytes: &[u8]) -> Result<()>;

    /// Flushes any buffered state. Called when the context closes.
    ///
    /// # Errors
    ///
    /// Implementations report persistence failures.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Lookup of already-loadable classes.
///
/// Used for the lookup-before-build short-circuit: if a class of the
/// requested fully-qualified name is already resolvable, synthesis returns it
/// and generates nothing.
pub trait ClassResolver {
    /// Returns a handle if a class of this fully-qualified name is already
    /// loadable, `None` otherwise.
    fn resolve(&self, full_name: &str) -> Option<ClassHandle>;
}

/// External code-generation backend.
///
/// Receives a fully populated [`ClassDescriptor`] and produces either a
/// loadable class handle or raw class bytes. The engine never calls the
/// backend with a descriptor whose methods lack type information.
pub trait CodegenBackend {
    /// Generates the class described by `descriptor`.
    ///
    /// # Errors
    ///
    /// Backend failures surface as [`Error::Backend`](crate::Error::Backend)
    /// to the synthesis caller.
    fn generate(&self, descriptor: &ClassDescriptor) -> Result<ClassArtifact>;
}

/// The scoped, explicitly-passed state of one unit of work.
///
/// Holds the target package namespace and the active sink. All classes
/// synthesized while the context is open write into the same sink. The
/// context closes on [`BuildContext::close`] or on drop; once closed, writes
/// fail with [`Error::ContextClosed`](crate::Error::ContextClosed).
pub struct BuildContext {
    package: String,
    sink: Option<Box<dyn BuildSink>>,
}

impl BuildContext {
    /// Opens a context for the given target package around a sink.
    #[must_use]
    pub fn open(package: impl Into<String>, sink: Box<dyn BuildSink>) -> Self {
        Self {
            package: package.into(),
            sink: Some(sink),
        }
    }

    /// The target package namespace of this unit of work.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// True until the context has been closed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.sink.is_some()
    }

    /// Writes one generated class through the sink.
    ///
    /// # Errors
    ///
    /// - [`Error::ContextClosed`] if the context was already closed
    /// - Sink failures are propagated unchanged
    pub fn write_class(&mut self, full_name: &str, bytes: &[u8]) -> Result<()> {
        let sink = self.sink.as_mut().ok_or_else(|| Error::ContextClosed {
            package: self.package.clone(),
        })?;
        sink.write_class(&self.package, full_name, bytes)
    }

    /// Closes the context, flushing the sink.
    ///
    /// # Errors
    ///
    /// Propagates sink flush failures. The context is closed either way.
    pub fn close(mut self) -> Result<()> {
        match self.sink.take() {
            Some(mut sink) => sink.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for BuildContext {
    fn drop(&mut self) {
        // Close on every exit path; flush failures during unwind are dropped.
        if let Some(mut sink) = self.sink.take() {
            let _ = sink.flush();
        }
    }
}

impl fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("package", &self.package)
            .field("open", &self.is_open())
            .finish()
    }
}
