//! Diagnostics collection for metadata binding and class synthesis.
//!
//! This module provides types for collecting and reporting diagnostic messages
//! during descriptor construction. It supports the skip-and-continue conditions
//! of synthesis: members that cannot be emitted are reported and omitted rather
//! than failing the whole class.
//!
//! # Architecture
//!
//! Diagnostics are collected per synthesizer: every
//! [`ClassSynthesizer`](crate::metadata::synthesis::ClassSynthesizer) owns a
//! [`Diagnostics`] container that records what was skipped or overwritten while
//! its descriptor was built. The container uses `boxcar::Vec` for lock-free
//! append, so it can be shared behind an [`Arc`](std::sync::Arc) without
//! additional synchronization.
//!
//! # Key Components
//!
//! - [`Diagnostics`] - Append-only container for diagnostic entries
//! - [`Diagnostic`] - Individual entry with severity and context
//! - [`DiagnosticSeverity`] - Severity level (Info, Warning)
//! - [`DiagnosticCategory`] - Category of the diagnostic source
//!
//! # Examples
//!
//! ```rust
//! use clasp::metadata::diagnostics::{DiagnosticCategory, Diagnostics};
//!
//! let diagnostics = Diagnostics::new();
//! diagnostics.warning(
//!     DiagnosticCategory::Constant,
//!     "Constant with name 'serialVersionUID' is already declared, overriding",
//! );
//!
//! assert!(diagnostics.has_warnings());
//! for entry in diagnostics.iter() {
//!     println!("{entry}");
//! }
//! ```

use std::fmt;

use strum::Display;

/// Severity level of a diagnostic entry.
///
/// Fatal conditions never land here; they surface as
/// [`Error`](crate::Error) at the failing call instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DiagnosticSeverity {
    /// Informational message, not indicating a problem.
    #[strum(serialize = "INFO")]
    Info,

    /// Warning about a member or declaration that was skipped or overridden.
    ///
    /// The class can still be synthesized, but the reported member is absent
    /// from (or changed in) the emitted descriptor.
    #[strum(serialize = "WARN")]
    Warning,
}

/// Category indicating the source or type of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DiagnosticCategory {
    /// Issues with constant declarations.
    ///
    /// Examples: a colliding constant name being overridden.
    Constant,

    /// Issues with method declarations.
    ///
    /// Examples: missing type information, unsupported class-bound members.
    Method,

    /// Issues with annotation records.
    Annotation,

    /// Observations made while resolving ancestry during binding.
    ///
    /// Examples: a synthesized intermediate base being stripped.
    Binding,

    /// Issues during descriptor construction or emission.
    Synthesis,

    /// General issues not fitting other categories.
    General,
}

/// A single diagnostic entry with context information.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level of this diagnostic.
    pub severity: DiagnosticSeverity,

    /// Category indicating the source of this diagnostic.
    pub category: DiagnosticCategory,

    /// Human-readable description of the issue.
    pub message: String,

    /// Optional class name the issue relates to.
    pub class: Option<String>,

    /// Optional member name the issue relates to.
    pub member: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic entry.
    pub fn new(
        severity: DiagnosticSeverity,
        category: DiagnosticCategory,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            class: None,
            member: None,
        }
    }

    /// Adds the related class name to the diagnostic.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Adds the related member name to the diagnostic.
    #[must_use]
    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.category, self.message)?;

        if let Some(class) = &self.class {
            write!(f, " (class: {class})")?;
        }

        if let Some(member) = &self.member {
            write!(f, " (member: {member})")?;
        }

        Ok(())
    }
}

/// Append-only container for collecting diagnostic entries.
///
/// Uses `boxcar::Vec` internally for lock-free append operations, so a shared
/// container never needs a lock even when consulted while entries are added.
#[derive(Debug)]
pub struct Diagnostics {
    entries: boxcar::Vec<Diagnostic>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagnostics {
    /// Creates a new empty diagnostics container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: boxcar::Vec::new(),
        }
    }

    /// Adds an informational diagnostic.
    pub fn info(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(DiagnosticSeverity::Info, category, message));
    }

    /// Adds a warning diagnostic.
    pub fn warning(&self, category: DiagnosticCategory, message: impl Into<String>) {
        self.push(Diagnostic::new(
            DiagnosticSeverity::Warning,
            category,
            message,
        ));
    }

    /// Adds a diagnostic entry directly.
    ///
    /// Use this for diagnostics that carry class/member context.
    pub fn push(&self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Returns true if any diagnostics have been collected.
    pub fn has_any(&self) -> bool {
        self.entries.count() > 0
    }

    /// Returns true if any warning-level diagnostics have been collected.
    pub fn has_warnings(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, d)| d.severity == DiagnosticSeverity::Warning)
    }

    /// Returns the total number of diagnostics.
    pub fn count(&self) -> usize {
        self.entries.count()
    }

    /// Returns the number of warning-level diagnostics.
    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == DiagnosticSeverity::Warning)
            .count()
    }

    /// Returns an iterator over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().map(|(_, d)| d)
    }

    /// Returns all warnings as a vector.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|(_, d)| d.severity == DiagnosticSeverity::Warning)
            .map(|(_, d)| d)
            .collect()
    }

    /// Returns diagnostics filtered by category.
    pub fn by_category(&self, category: DiagnosticCategory) -> Vec<&Diagnostic> {
        self.entries
            .iter()
            .filter(|(_, d)| d.category == category)
            .map(|(_, d)| d)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_and_filters() {
        let diagnostics = Diagnostics::new();
        diagnostics.info(DiagnosticCategory::Binding, "stripped synthesized base");
        diagnostics.warning(DiagnosticCategory::Method, "missing type information");
        diagnostics.warning(DiagnosticCategory::Constant, "overriding constant");

        assert!(diagnostics.has_any());
        assert!(diagnostics.has_warnings());
        assert_eq!(diagnostics.count(), 3);
        assert_eq!(diagnostics.warning_count(), 2);
        assert_eq!(diagnostics.by_category(DiagnosticCategory::Constant).len(), 1);
    }

    #[test]
    fn display_includes_context() {
        let entry = Diagnostic::new(
            DiagnosticSeverity::Warning,
            DiagnosticCategory::Method,
            "skipped",
        )
        .with_class("Sample")
        .with_member("helper");

        let rendered = entry.to_string();
        assert!(rendered.contains("WARN"));
        assert!(rendered.contains("class: Sample"));
        assert!(rendered.contains("member: helper"));
    }
}
