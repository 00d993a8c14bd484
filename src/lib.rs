// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # clasp
//!
//! A metadata-collection and class-synthesis engine that bridges
//! dynamic-language class declarations into compiled-runtime class
//! descriptors. `clasp` gathers type signatures, annotations and constants
//! attached to source-level declarations, resolves declared bases into a
//! superclass and interface contracts, and produces complete, validated
//! class descriptors for an external code-generation backend.
//!
//! ## Features
//!
//! - **Signature collection** - declare return/argument types, access
//!   levels, annotations (method- and argument-level) and thrown exception
//!   types on plain functions, validated eagerly at declaration time
//! - **Two declaration styles** - a reusable marker base
//!   ([`BridgeBase`](metadata::binding::BridgeBase)) and an explicit
//!   transform ([`ClassTransform`](metadata::binding::ClassTransform)),
//!   producing identical descriptors
//! - **Ancestry re-derivation** - transforming a class repeatedly never
//!   stacks synthesized intermediates; ancestry always reflects the
//!   user-intended bases
//! - **Deterministic synthesis** - name-pattern access derivation,
//!   serializability detection with version-constant seeding, and a
//!   lookup-before-build short-circuit keyed on fully-qualified names
//! - **Pluggable emission** - backends, sinks and resolvers are traits;
//!   the engine itself performs no I/O
//!
//! ## Quick Start
//!
//! ```rust
//! use clasp::prelude::*;
//!
//! // Declare a class: one method `returnZero() -> int`, implementing a
//! // serializable interface.
//! let mut return_zero = FunctionDef::new("returnZero", Vec::<String>::new());
//! return_zero.declare_signature(SignatureDecl::new(TypeRef::primitive(PrimitiveKind::Int)))?;
//!
//! let decl = ClassDecl::new("samples", "BarBridge")
//!     .with_base(Base::Type(
//!         TypeRef::interface("java.io.Serializable").serializable(),
//!     ))
//!     .with_function(return_zero);
//!
//! let bound = ClassTransform::new("org.example").apply(decl)?;
//! let descriptor = bound.descriptor();
//!
//! assert_eq!(descriptor.full_name, "org.example.samples.BarBridge");
//! assert!(descriptor.serializable);
//! assert!(descriptor.method("returnZero").is_some());
//! # Ok::<(), clasp::Error>(())
//! ```
//!
//! ## Architecture
//!
//! The crate is organised around the [`metadata`] module; see its
//! documentation for the three-stage pipeline (collection, binding,
//! synthesis) and the emission contracts.

pub mod metadata;
pub mod prelude;

mod error;

pub use error::Error;

/// Result type alias for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
