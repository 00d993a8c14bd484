use strum::{Display, EnumIter};

/// The primitive types of the target runtime.
///
/// Primitives are the built-in value types the compiled runtime knows about
/// natively. They carry no package, are never inheritable, and each one maps
/// to a single-character descriptor in the emitted class format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
    /// No value; only valid as a return type
    Void,
    /// Boolean value
    Boolean,
    /// 8-bit signed integer
    Byte,
    /// 16-bit signed integer
    Short,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
    /// 16-bit character
    Char,
}

impl PrimitiveKind {
    /// Returns the single-character descriptor used for this primitive in
    /// emitted class signatures.
    #[must_use]
    pub fn descriptor(&self) -> char {
        match self {
            PrimitiveKind::Void => 'V',
            PrimitiveKind::Boolean => 'Z',
            PrimitiveKind::Byte => 'B',
            PrimitiveKind::Short => 'S',
            PrimitiveKind::Int => 'I',
            PrimitiveKind::Long => 'J',
            PrimitiveKind::Float => 'F',
            PrimitiveKind::Double => 'D',
            PrimitiveKind::Char => 'C',
        }
    }

    /// Looks up a primitive by its source-level name (`int`, `long`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "void" => Some(PrimitiveKind::Void),
            "boolean" => Some(PrimitiveKind::Boolean),
            "byte" => Some(PrimitiveKind::Byte),
            "short" => Some(PrimitiveKind::Short),
            "int" => Some(PrimitiveKind::Int),
            "long" => Some(PrimitiveKind::Long),
            "float" => Some(PrimitiveKind::Float),
            "double" => Some(PrimitiveKind::Double),
            "char" => Some(PrimitiveKind::Char),
            _ => None,
        }
    }
}
