// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Runtime values supplied for shader arguments.

A caller hands the encoder a mapping from argument name to [`ArgumentValue`].
Values come in three families:

- **Resources** ([`BufferHandle`], [`TextureHandle`], [`SamplerHandle`]):
  opaque backend handles, forwarded to the argument table unchanged.
- **Inline data** ([`PackedData`], plus `Struct` and `Array` aggregates):
  bytes laid out exactly as the compiled function expects, produced by the
  `From` conversions in this module or by [`PackedData::new`] for
  caller-prepared layouts.
- **Custom** ([`CustomValue`]): any other type, resolved through the
  [encoding capability registry](crate::registry).

The `From` conversions apply GPU constant-buffer padding: a `[f32; 3]`
becomes 16 bytes with the pad zeroed, and matrix columns pad the same way.
*/

pub mod handles;

pub use handles::{BufferHandle, SamplerHandle, TextureHandle};

use crate::arguments::DataType;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use vectormatrix::matrix::Matrix;
use vectormatrix::vector::Vector;

/// A runtime value bound to one shader argument.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ArgumentValue {
    /// A buffer resource, bound by reference.
    Buffer(BufferHandle),
    /// A texture resource, bound by reference.
    Texture(TextureHandle),
    /// Sampler state, bound by reference.
    Sampler(SamplerHandle),
    /// Inline bytes in final GPU layout.
    Data(PackedData),
    /// Struct fields by member name.
    Struct(HashMap<String, ArgumentValue>),
    /// Array elements in order.
    Array(Vec<ArgumentValue>),
    /// A value of a type the built-in packer does not recognize; routed
    /// through the capability registry.
    Custom(CustomValue),
}

impl ArgumentValue {
    /// Wraps anything convertible to [`PackedData`].
    pub fn data(value: impl Into<PackedData>) -> Self {
        ArgumentValue::Data(value.into())
    }

    /// Wraps a custom-typed value for registry dispatch.
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        ArgumentValue::Custom(CustomValue::new(value))
    }

    /// The value's shape, for mismatch diagnostics.
    pub fn kind(&self) -> ValueKind {
        match self {
            ArgumentValue::Buffer(_) => ValueKind::Buffer,
            ArgumentValue::Texture(_) => ValueKind::Texture,
            ArgumentValue::Sampler(_) => ValueKind::Sampler,
            ArgumentValue::Data(data) => ValueKind::Data(Some(data.data_type())),
            ArgumentValue::Struct(_) => ValueKind::Struct,
            ArgumentValue::Array(_) => ValueKind::Array,
            ArgumentValue::Custom(_) => ValueKind::Custom,
        }
    }
}

impl From<BufferHandle> for ArgumentValue {
    fn from(value: BufferHandle) -> Self {
        ArgumentValue::Buffer(value)
    }
}
impl From<TextureHandle> for ArgumentValue {
    fn from(value: TextureHandle) -> Self {
        ArgumentValue::Texture(value)
    }
}
impl From<SamplerHandle> for ArgumentValue {
    fn from(value: SamplerHandle) -> Self {
        ArgumentValue::Sampler(value)
    }
}
impl From<PackedData> for ArgumentValue {
    fn from(value: PackedData) -> Self {
        ArgumentValue::Data(value)
    }
}
impl From<CustomValue> for ArgumentValue {
    fn from(value: CustomValue) -> Self {
        ArgumentValue::Custom(value)
    }
}

/// The shape of a value or the shape an argument expects.
///
/// `Data` carries the data type when known; resource-kind descriptors and
/// untyped blobs report `Data(None)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValueKind {
    Buffer,
    Texture,
    Sampler,
    Data(Option<DataType>),
    Struct,
    Array,
    Custom,
}

/// Bytes already laid out per the GPU's standard layout rules, tagged with
/// the data type they encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedData {
    data_type: DataType,
    bytes: Vec<u8>,
}

impl PackedData {
    /// Wraps caller-prepared bytes.  The caller is responsible for the
    /// layout matching `data_type`; the packer still checks total length
    /// against the descriptor.
    pub fn new(data_type: DataType, bytes: Vec<u8>) -> Self {
        PackedData { data_type, bytes }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A value of a caller-defined type, dispatched by type identity through the
/// [encoding capability registry](crate::registry::EncodingRegistry).
#[derive(Clone)]
pub struct CustomValue {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl CustomValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        CustomValue {
            value: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The wrapped value's type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.as_any().type_id()
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        &*self.value
    }
}

impl std::fmt::Debug for CustomValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CustomValue<{}>", self.type_name)
    }
}

macro_rules! scalar_data {
    ($t:ty, $dt:expr) => {
        impl From<$t> for PackedData {
            fn from(value: $t) -> Self {
                PackedData {
                    data_type: $dt,
                    bytes: value.to_le_bytes().to_vec(),
                }
            }
        }
        impl From<$t> for ArgumentValue {
            fn from(value: $t) -> Self {
                ArgumentValue::Data(value.into())
            }
        }
    };
}

scalar_data!(f32, DataType::Float);
scalar_data!(half::f16, DataType::Half);
scalar_data!(i32, DataType::Int);
scalar_data!(u32, DataType::UInt);
scalar_data!(i16, DataType::Short);
scalar_data!(u16, DataType::UShort);
scalar_data!(i8, DataType::Char);
scalar_data!(u8, DataType::UChar);

impl From<bool> for PackedData {
    fn from(value: bool) -> Self {
        PackedData {
            data_type: DataType::Bool,
            bytes: vec![value as u8],
        }
    }
}
impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        ArgumentValue::Data(value.into())
    }
}

// $padded is the storage component count: 3-component vectors occupy
// 4-component storage, with the pad zeroed.
macro_rules! vector_data {
    ($t:ty, $n:literal, $padded:literal, $dt:expr) => {
        impl From<[$t; $n]> for PackedData {
            fn from(value: [$t; $n]) -> Self {
                let scalar = std::mem::size_of::<$t>();
                let mut bytes = vec![0u8; $padded * scalar];
                for (i, component) in value.iter().enumerate() {
                    bytes[i * scalar..(i + 1) * scalar].copy_from_slice(&component.to_le_bytes());
                }
                PackedData {
                    data_type: $dt,
                    bytes,
                }
            }
        }
        impl From<[$t; $n]> for ArgumentValue {
            fn from(value: [$t; $n]) -> Self {
                ArgumentValue::Data(value.into())
            }
        }
    };
}

vector_data!(f32, 2, 2, DataType::Float2);
vector_data!(f32, 3, 4, DataType::Float3);
vector_data!(f32, 4, 4, DataType::Float4);
vector_data!(half::f16, 2, 2, DataType::Half2);
vector_data!(half::f16, 3, 4, DataType::Half3);
vector_data!(half::f16, 4, 4, DataType::Half4);
vector_data!(i32, 2, 2, DataType::Int2);
vector_data!(i32, 3, 4, DataType::Int3);
vector_data!(i32, 4, 4, DataType::Int4);
vector_data!(u32, 2, 2, DataType::UInt2);
vector_data!(u32, 3, 4, DataType::UInt3);
vector_data!(u32, 4, 4, DataType::UInt4);
vector_data!(i16, 2, 2, DataType::Short2);
vector_data!(i16, 3, 4, DataType::Short3);
vector_data!(i16, 4, 4, DataType::Short4);
vector_data!(u16, 2, 2, DataType::UShort2);
vector_data!(u16, 3, 4, DataType::UShort3);
vector_data!(u16, 4, 4, DataType::UShort4);
vector_data!(i8, 2, 2, DataType::Char2);
vector_data!(i8, 3, 4, DataType::Char3);
vector_data!(i8, 4, 4, DataType::Char4);
vector_data!(u8, 2, 2, DataType::UChar2);
vector_data!(u8, 3, 4, DataType::UChar3);
vector_data!(u8, 4, 4, DataType::UChar4);

// Column-major: `[[f32; $rows]; $cols]` is $cols columns, each padded to
// $padded components.
macro_rules! matrix_data {
    ($cols:literal, $rows:literal, $padded:literal, $dt:expr) => {
        impl From<[[f32; $rows]; $cols]> for PackedData {
            fn from(value: [[f32; $rows]; $cols]) -> Self {
                let mut bytes = vec![0u8; $cols * $padded * 4];
                for (c, column) in value.iter().enumerate() {
                    for (r, component) in column.iter().enumerate() {
                        let at = (c * $padded + r) * 4;
                        bytes[at..at + 4].copy_from_slice(&component.to_le_bytes());
                    }
                }
                PackedData {
                    data_type: $dt,
                    bytes,
                }
            }
        }
        impl From<[[f32; $rows]; $cols]> for ArgumentValue {
            fn from(value: [[f32; $rows]; $cols]) -> Self {
                ArgumentValue::Data(value.into())
            }
        }
    };
}

matrix_data!(2, 2, 2, DataType::Float2x2);
matrix_data!(2, 3, 4, DataType::Float2x3);
matrix_data!(2, 4, 4, DataType::Float2x4);
matrix_data!(3, 2, 2, DataType::Float3x2);
matrix_data!(3, 3, 4, DataType::Float3x3);
matrix_data!(3, 4, 4, DataType::Float3x4);
matrix_data!(4, 2, 2, DataType::Float4x2);
matrix_data!(4, 3, 4, DataType::Float4x3);
matrix_data!(4, 4, 4, DataType::Float4x4);

impl From<Vector<f32, 2>> for PackedData {
    fn from(value: Vector<f32, 2>) -> Self {
        [*value.x(), *value.y()].into()
    }
}
impl From<Vector<f32, 3>> for PackedData {
    fn from(value: Vector<f32, 3>) -> Self {
        [*value.x(), *value.y(), *value.z()].into()
    }
}
impl From<Vector<f32, 4>> for PackedData {
    fn from(value: Vector<f32, 4>) -> Self {
        [*value.x(), *value.y(), *value.z(), *value.w()].into()
    }
}
impl From<Matrix<f32, 4, 4>> for PackedData {
    fn from(value: Matrix<f32, 4, 4>) -> Self {
        let columns = value.columns();
        [
            [
                *columns[0].x(),
                *columns[0].y(),
                *columns[0].z(),
                *columns[0].w(),
            ],
            [
                *columns[1].x(),
                *columns[1].y(),
                *columns[1].z(),
                *columns[1].w(),
            ],
            [
                *columns[2].x(),
                *columns[2].y(),
                *columns[2].z(),
                *columns[2].w(),
            ],
            [
                *columns[3].x(),
                *columns[3].y(),
                *columns[3].z(),
                *columns[3].w(),
            ],
        ]
        .into()
    }
}
impl From<Vector<f32, 2>> for ArgumentValue {
    fn from(value: Vector<f32, 2>) -> Self {
        ArgumentValue::Data(value.into())
    }
}
impl From<Vector<f32, 3>> for ArgumentValue {
    fn from(value: Vector<f32, 3>) -> Self {
        ArgumentValue::Data(value.into())
    }
}
impl From<Vector<f32, 4>> for ArgumentValue {
    fn from(value: Vector<f32, 4>) -> Self {
        ArgumentValue::Data(value.into())
    }
}
impl From<Matrix<f32, 4, 4>> for ArgumentValue {
    fn from(value: Matrix<f32, 4, 4>) -> Self {
        ArgumentValue::Data(value.into())
    }
}
