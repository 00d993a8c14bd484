//! Annotation records attached to classes, methods and method arguments.
//!
//! An [`AnnotationRecord`] pairs a target-runtime interface type with an
//! ordered list of named literal field values. Records are append-only once
//! attached: lists owned by a member preserve declaration order, and that
//! order is reproduced at emission so generated classes are deterministic.
//!
//! # Examples
//!
//! ```rust
//! use clasp::metadata::annotations::AnnotationRecord;
//! use clasp::metadata::typesystem::{LiteralValue, TypeRef};
//!
//! let single = AnnotationRecord::new(TypeRef::interface("org.example.SingleAnnotation"))?
//!     .with_field("value", LiteralValue::String("single".into()));
//!
//! assert_eq!(single.annotation_type().simple_name(), "SingleAnnotation");
//! assert_eq!(single.fields().len(), 1);
//! # Ok::<(), clasp::Error>(())
//! ```

use crate::{metadata::typesystem::{LiteralValue, TypeRef}, Error, Result};

/// A single annotation applied to a class, method or method argument.
///
/// The annotation type must be an interface type of the target runtime;
/// constructing a record with any other kind of type is a validation error.
/// Field order is the order fields were added and is preserved through
/// emission.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRecord {
    annotation_type: TypeRef,
    fields: Vec<(String, LiteralValue)>,
}

impl AnnotationRecord {
    /// Creates an annotation record with no fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAnInterface`] if `annotation_type` is not an
    /// interface type.
    pub fn new(annotation_type: TypeRef) -> Result<Self> {
        if !annotation_type.is_interface() {
            return Err(Error::NotAnInterface {
                name: annotation_type.name().to_string(),
            });
        }
        Ok(Self {
            annotation_type,
            fields: Vec::new(),
        })
    }

    /// Adds a named field value, preserving insertion order.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: LiteralValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// The interface type of this annotation.
    #[must_use]
    pub fn annotation_type(&self) -> &TypeRef {
        &self.annotation_type
    }

    /// The named field values in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[(String, LiteralValue)] {
        &self.fields
    }

    /// Looks up a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&LiteralValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::typesystem::PrimitiveKind;

    #[test]
    fn rejects_non_interface_types() {
        assert!(matches!(
            AnnotationRecord::new(TypeRef::class("java.lang.Object")),
            Err(Error::NotAnInterface { .. })
        ));
        assert!(matches!(
            AnnotationRecord::new(TypeRef::primitive(PrimitiveKind::Int)),
            Err(Error::NotAnInterface { .. })
        ));
    }

    #[test]
    fn fields_preserve_order() {
        let record = AnnotationRecord::new(TypeRef::interface("org.example.Multi"))
            .unwrap()
            .with_field("value", LiteralValue::String("all".into()))
            .with_field("extra", LiteralValue::String("test".into()));

        let names: Vec<_> = record.fields().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["value", "extra"]);
        assert_eq!(
            record.field("extra"),
            Some(&LiteralValue::String("test".into()))
        );
        assert_eq!(record.field("missing"), None);
    }
}
