//! Target-runtime type references and literal values.
//!
//! This module provides the type vocabulary used throughout the crate: opaque
//! references to types of the statically-typed target runtime, and the literal
//! values that can appear in annotation fields and class constants.
//!
//! # Key Components
//!
//! - [`TypeRef`] - Immutable, cheaply-cloneable reference to a target-runtime type
//! - [`TypeKind`] - Classification of a reference (primitive, class, interface)
//! - [`PrimitiveKind`] - The built-in primitive types of the target runtime
//! - [`LiteralValue`] - Tagged literal usable as annotation field or constant value
//!
//! # Identity
//!
//! A [`TypeRef`] is compared by fully-qualified name only. Two references with
//! the same name are the same type regardless of how they were constructed or
//! which flags they carry; this mirrors how the target runtime's loader treats
//! names as identities.
//!
//! # Examples
//!
//! ```rust
//! use clasp::metadata::typesystem::{PrimitiveKind, TypeKind, TypeRef};
//!
//! let callable = TypeRef::interface("java.util.concurrent.Callable");
//! let long = TypeRef::primitive(PrimitiveKind::Long);
//!
//! assert_eq!(callable.kind(), TypeKind::Interface);
//! assert_eq!(callable.simple_name(), "Callable");
//! assert_eq!(long.name(), "long");
//! ```

mod primitives;

pub use primitives::PrimitiveKind;

use std::fmt;
use std::sync::Arc;

/// Classification of a [`TypeRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A built-in primitive type
    Primitive,
    /// A class type, usable as a superclass
    Class,
    /// An interface type, usable as a contract or annotation type
    Interface,
}

/// An opaque, immutable reference to a type of the target runtime.
///
/// `TypeRef` is the unit of type information everywhere in this crate: method
/// return and argument types, exception declarations, annotation types,
/// constant types, superclasses and interface contracts are all `TypeRef`s.
///
/// References are cheap to clone (the payload is shared behind an [`Arc`]) and
/// compared by fully-qualified name, see the [module docs](self).
///
/// Serializability is a property of the referenced type that the synthesizer
/// needs to know about without consulting the runtime: a class whose
/// superclass or interfaces are serializable is itself serializable and
/// receives a default serialization-identity constant. Callers mark the types
/// they reference with [`TypeRef::serializable`] as appropriate.
#[derive(Clone)]
pub struct TypeRef {
    inner: Arc<TypeRefInner>,
}

struct TypeRefInner {
    name: String,
    kind: TypeKind,
    serializable: bool,
}

impl TypeRef {
    fn new(name: impl Into<String>, kind: TypeKind, serializable: bool) -> Self {
        TypeRef {
            inner: Arc::new(TypeRefInner {
                name: name.into(),
                kind,
                serializable,
            }),
        }
    }

    /// Creates a reference to a class type.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class, false)
    }

    /// Creates a reference to an interface type.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface, false)
    }

    /// Creates a reference to a built-in primitive type.
    #[must_use]
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(kind.to_string(), TypeKind::Primitive, false)
    }

    /// Marks the referenced type as serializable.
    ///
    /// Consumes and returns the reference so construction chains:
    ///
    /// ```rust
    /// use clasp::metadata::typesystem::TypeRef;
    ///
    /// let ser = TypeRef::interface("java.io.Serializable").serializable();
    /// assert!(ser.is_serializable());
    /// ```
    #[must_use]
    pub fn serializable(self) -> Self {
        Self::new(self.inner.name.clone(), self.inner.kind, true)
    }

    /// The fully-qualified name of the referenced type.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The simple (unqualified) name of the referenced type.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.inner
            .name
            .rsplit_once('.')
            .map_or(self.inner.name.as_str(), |(_, simple)| simple)
    }

    /// The classification of the referenced type.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        self.inner.kind
    }

    /// True if the referenced type is an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.inner.kind == TypeKind::Interface
    }

    /// True if the referenced type is a built-in primitive.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.inner.kind == TypeKind::Primitive
    }

    /// True if the referenced type is serializable.
    #[must_use]
    pub fn is_serializable(&self) -> bool {
        self.inner.serializable
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.inner.name == other.inner.name
    }
}

impl Eq for TypeRef {}

impl std::hash::Hash for TypeRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.name.hash(state);
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("name", &self.inner.name)
            .field("kind", &self.inner.kind)
            .field("serializable", &self.inner.serializable)
            .finish()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

/// A literal value of the target runtime.
///
/// Literals appear in two places: as the values of annotation fields and as
/// the values of declared class constants. The variants cover the constant
/// kinds the emitted class format can represent directly.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Boolean value
    Boolean(bool),
    /// 16-bit character
    Char(char),
    /// 8-bit signed integer
    Byte(i8),
    /// 16-bit signed integer
    Short(i16),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// String value
    String(String),
    /// Reference to a type of the target runtime
    Type(TypeRef),
    /// Homogeneous array of literals
    Array(Vec<LiteralValue>),
    /// Enum constant (enum type + constant name)
    Enum(TypeRef, String),
}

impl LiteralValue {
    /// Try to convert to a 64-bit integer value.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LiteralValue::Boolean(value) => Some(i64::from(*value)),
            LiteralValue::Byte(value) => Some(i64::from(*value)),
            LiteralValue::Short(value) => Some(i64::from(*value)),
            LiteralValue::Int(value) => Some(i64::from(*value)),
            LiteralValue::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Try to borrow as a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Boolean(value) => write!(f, "{value}"),
            LiteralValue::Char(value) => write!(f, "'{value}'"),
            LiteralValue::Byte(value) => write!(f, "{value}"),
            LiteralValue::Short(value) => write!(f, "{value}"),
            LiteralValue::Int(value) => write!(f, "{value}"),
            LiteralValue::Long(value) => write!(f, "{value}L"),
            LiteralValue::Float(value) => write!(f, "{value}f"),
            LiteralValue::Double(value) => write!(f, "{value}"),
            LiteralValue::String(value) => write!(f, "\"{value}\""),
            LiteralValue::Type(value) => write!(f, "{value}.class"),
            LiteralValue::Array(values) => {
                f.write_str("{")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str("}")
            }
            LiteralValue::Enum(ty, name) => write!(f, "{ty}.{name}"),
        }
    }
}
