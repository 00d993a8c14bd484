//! Metadata collection and class synthesis.
//!
//! Everything between a source-level class declaration and the descriptor
//! handed to a code-generation backend lives here. The pipeline runs in
//! three stages:
//!
//! 1. **Collection** - [`signature`] attaches type signatures, annotations
//!    and thrown-exception declarations to plain functions; [`model`] holds
//!    the declared class shape (bases, ordered namespace).
//! 2. **Binding** - [`binding`] resolves declared bases into a superclass
//!    and interface contracts, re-derives ancestry across repeated
//!    transformations, and attaches a synthesizer handle.
//! 3. **Synthesis** - [`synthesis`] builds the emitted [`ClassDescriptor`]
//!    (access derivation, modifier bits, constants, serializability) and
//!    drives emission through the contracts in [`emit`].
//!
//! Supporting modules: [`typesystem`] for type references and literal
//! values, [`annotations`] for validated annotation records, and
//! [`diagnostics`] for the append-only warning/info stream collected along
//! the way.
//!
//! [`ClassDescriptor`]: crate::metadata::synthesis::ClassDescriptor

pub mod annotations;
pub mod binding;
pub mod diagnostics;
pub mod emit;
pub mod model;
pub mod signature;
pub mod synthesis;
pub mod typesystem;
