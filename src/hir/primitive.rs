//! Primitive types, widening and numeric promotion.

use std::fmt;

use crate::syntax::SyntaxKind;

/// The Java primitive types, plus `void` as a return type.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl Primitive {
    pub const ALL: [Primitive; 9] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Char,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
        Primitive::Void,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Void => "void",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn from_keyword(kind: SyntaxKind) -> Option<Self> {
        Some(match kind {
            SyntaxKind::BooleanKw => Self::Boolean,
            SyntaxKind::ByteKw => Self::Byte,
            SyntaxKind::CharKw => Self::Char,
            SyntaxKind::ShortKw => Self::Short,
            SyntaxKind::IntKw => Self::Int,
            SyntaxKind::LongKw => Self::Long,
            SyntaxKind::FloatKw => Self::Float,
            SyntaxKind::DoubleKw => Self::Double,
            SyntaxKind::VoidKw => Self::Void,
            _ => return None,
        })
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Boolean | Self::Void)
    }

    /// Position on the numeric widening ladder. `char` sits beside `short`
    /// but neither widens into the other.
    fn rank(self) -> Option<u8> {
        match self {
            Self::Byte => Some(0),
            Self::Short | Self::Char => Some(1),
            Self::Int => Some(2),
            Self::Long => Some(3),
            Self::Float => Some(4),
            Self::Double => Some(5),
            Self::Boolean | Self::Void => None,
        }
    }

    /// Whether a value of this type may be passed where `target` is expected.
    ///
    /// Follows `byte -> short -> int -> long -> float -> double`, with `char`
    /// joining at `int`. `boolean` and `void` only match themselves.
    pub fn widens_to(self, target: Primitive) -> bool {
        if self == target {
            return true;
        }
        match (self, target) {
            (Self::Char, Self::Short) | (Self::Byte, Self::Char) => false,
            _ => match (self.rank(), target.rank()) {
                (Some(from), Some(to)) => from < to,
                _ => false,
            },
        }
    }

    /// Unary numeric promotion: `byte`, `short` and `char` become `int`.
    pub fn unary_promote(self) -> Primitive {
        match self {
            Self::Byte | Self::Short | Self::Char => Self::Int,
            other => other,
        }
    }

    /// Binary numeric promotion. `None` unless both operands are numeric.
    pub fn binary_promote(a: Primitive, b: Primitive) -> Option<Primitive> {
        if !a.is_numeric() || !b.is_numeric() {
            return None;
        }
        Some(if a == Self::Double || b == Self::Double {
            Self::Double
        } else if a == Self::Float || b == Self::Float {
            Self::Float
        } else if a == Self::Long || b == Self::Long {
            Self::Long
        } else {
            Self::Int
        })
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
