//! # clasp Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits of the crate. Import it to get quick access to the essential
//! pieces of the metadata-collection and synthesis pipeline.
//!
//! ```rust
//! use clasp::prelude::*;
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all clasp operations
pub use crate::Error;

/// The result type used throughout clasp
pub use crate::Result;

// ================================================================================================
// Declaration Model and Metadata Collection
// ================================================================================================

/// A declared class: name, bases and ordered member namespace
pub use crate::metadata::model::{Base, ClassDecl, Member, Namespace};

/// Method declarations and their collected metadata
pub use crate::metadata::signature::{
    Access, ClassMetadata, Constant, FunctionBinding, FunctionDef, MethodMetadata, SignatureDecl,
};

/// Validated annotation records
pub use crate::metadata::annotations::AnnotationRecord;

/// Type references, kinds and literal values
pub use crate::metadata::typesystem::{LiteralValue, PrimitiveKind, TypeKind, TypeRef};

// ================================================================================================
// Binding and Synthesis
// ================================================================================================

/// The two declaration styles and the bound-class result
pub use crate::metadata::binding::{
    BoundClass, BridgeBase, ClassTransform, DefaultSynthesizerFactory, SynthesizerFactory,
};

/// Descriptor construction and emission
pub use crate::metadata::synthesis::{
    access_from_name, ClassDescriptor, ClassSynthesizer, MethodDescriptor, Modifiers, SynthConfig,
    SynthesisRequest, SERIAL_VERSION_CONSTANT,
};

// ================================================================================================
// Emission Contracts
// ================================================================================================

/// The scoped build context and the pluggable emission traits
pub use crate::metadata::emit::{
    BuildContext, BuildSink, ClassArtifact, ClassHandle, ClassOrigin, ClassResolver,
    CodegenBackend,
};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// The append-only diagnostics stream collected during binding and synthesis
pub use crate::metadata::diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics,
};
