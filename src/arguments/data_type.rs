// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Shader data types and their constant-address-space layouts.
//!
//! GPU APIs pad small vectors up to the next power-of-two component count in
//! uniform/constant memory, so a `Float3` occupies the same 16 bytes a `Float4`
//! does.  Matrices are column-major with each column padded like the
//! corresponding vector.  [`DataType::size`] and [`DataType::alignment`] are the
//! layout contract the packer enforces; reflection-supplied byte lengths are
//! expected to agree with them.

/// The data type of an inline (byte-encoded) shader argument.
///
/// Matrix types are named column-count first: `Float2x3` is two columns of
/// three floats.  `Struct` and `Array` have no intrinsic size; their layout is
/// carried by the argument descriptor's members and stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DataType {
    Float,
    Float2,
    Float3,
    Float4,
    Half,
    Half2,
    Half3,
    Half4,
    Int,
    Int2,
    Int3,
    Int4,
    UInt,
    UInt2,
    UInt3,
    UInt4,
    Short,
    Short2,
    Short3,
    Short4,
    UShort,
    UShort2,
    UShort3,
    UShort4,
    Char,
    Char2,
    Char3,
    Char4,
    UChar,
    UChar2,
    UChar3,
    UChar4,
    Bool,
    Float2x2,
    Float2x3,
    Float2x4,
    Float3x2,
    Float3x3,
    Float3x4,
    Float4x2,
    Float4x3,
    Float4x4,
    Struct,
    Array,
}

impl DataType {
    /// Size in bytes in constant address space, including vector padding.
    ///
    /// Returns `None` for `Struct` and `Array`, whose sizes come from
    /// reflection rather than the type itself.
    pub fn size(&self) -> Option<usize> {
        use DataType::*;
        Some(match self {
            Bool | Char | UChar => 1,
            Short | UShort | Half | Char2 | UChar2 => 2,
            Char3 | Char4 | UChar3 | UChar4 | Short2 | UShort2 | Half2 | Float | Int | UInt => 4,
            Short3 | Short4 | UShort3 | UShort4 | Half3 | Half4 | Float2 | Int2 | UInt2 => 8,
            Float3 | Float4 | Int3 | Int4 | UInt3 | UInt4 | Float2x2 => 16,
            Float3x2 => 24,
            Float2x3 | Float2x4 | Float4x2 => 32,
            Float3x3 | Float3x4 => 48,
            Float4x3 | Float4x4 => 64,
            Struct | Array => return None,
        })
    }

    /// Required alignment in bytes in constant address space.
    ///
    /// Returns `None` for `Struct` and `Array`.
    pub fn alignment(&self) -> Option<usize> {
        use DataType::*;
        Some(match self {
            Bool | Char | UChar => 1,
            Short | UShort | Half | Char2 | UChar2 => 2,
            Char3 | Char4 | UChar3 | UChar4 | Short2 | UShort2 | Half2 | Float | Int | UInt => 4,
            Short3 | Short4 | UShort3 | UShort4 | Half3 | Half4 | Float2 | Int2 | UInt2
            | Float2x2 | Float3x2 | Float4x2 => 8,
            Float3 | Float4 | Int3 | Int4 | UInt3 | UInt4 | Float2x3 | Float2x4 | Float3x3
            | Float3x4 | Float4x3 | Float4x4 => 16,
            Struct | Array => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::DataType;

    #[test]
    fn three_component_vectors_occupy_four_component_storage() {
        assert_eq!(DataType::Float3.size(), DataType::Float4.size());
        assert_eq!(DataType::Half3.size(), DataType::Half4.size());
        assert_eq!(DataType::Int3.size(), DataType::Int4.size());
        assert_eq!(DataType::Char3.size(), DataType::Char4.size());
    }

    #[test]
    fn matrix_sizes_are_column_count_times_padded_column() {
        assert_eq!(DataType::Float2x2.size(), Some(16));
        assert_eq!(DataType::Float2x3.size(), Some(32));
        assert_eq!(DataType::Float3x2.size(), Some(24));
        assert_eq!(DataType::Float3x3.size(), Some(48));
        assert_eq!(DataType::Float4x4.size(), Some(64));
    }

    #[test]
    fn aggregate_types_have_no_intrinsic_size() {
        assert_eq!(DataType::Struct.size(), None);
        assert_eq!(DataType::Array.size(), None);
        assert_eq!(DataType::Struct.alignment(), None);
    }

    #[test]
    fn alignments() {
        assert_eq!(DataType::Float.alignment(), Some(4));
        assert_eq!(DataType::Float2.alignment(), Some(8));
        assert_eq!(DataType::Float3.alignment(), Some(16));
        assert_eq!(DataType::Float3x2.alignment(), Some(8));
        assert_eq!(DataType::Float2x3.alignment(), Some(16));
    }
}
