// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Reflection metadata describing shader function arguments.

Argument descriptors are produced by a shader-reflection facility and
consumed here; this crate never derives them itself.  A descriptor records
everything the encoder needs to route a runtime value: the argument's name,
its table index, what kind of resource or data it is, and the byte layout
the compiled function expects.

Descriptors are plain data.  Fields are public so a reflection layer can
populate them directly; the constructors cover the common shapes and fill
layout fields from the data type's standard GPU layout.
*/

pub mod data_type;

pub use data_type::DataType;

/// The shader stage a function (and its arguments) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Stage {
    /// Vertex function arguments.
    Vertex,
    /// Fragment (pixel) function arguments.
    Fragment,
    /// Compute kernel arguments.
    Compute,
}

/// What kind of binding an argument occupies in the argument table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ArgumentKind {
    /// A GPU buffer handle, bound by reference.
    Buffer,
    /// A texture handle, bound by reference.
    Texture,
    /// A sampler-state handle, bound by reference.
    Sampler,
    /// Inline data written by value: scalars, vectors, matrices, structs, arrays.
    Data,
}

/// Reflection-derived description of one shader function argument.
///
/// Immutable once produced; the encoder reads it on every call.  For struct
/// arguments, `members` describes the fields in declared order with offsets
/// relative to the struct's base.  `stage` and `active` participate in stage
/// gating at the top level only; they are not consulted on members.
#[derive(Debug, Clone)]
pub struct ArgumentDescriptor {
    /// The argument's name as declared in shader source.  Unique per function.
    pub name: String,
    /// The argument-table index this argument binds at.  Unique per function
    /// and stable across calls for the same compiled function.
    pub index: u32,
    pub kind: ArgumentKind,
    /// The declared data type for `Data`-kind arguments.  `None` when
    /// reflection does not report one (resource kinds, opaque blobs); the
    /// packer then checks sizes only.
    pub data_type: Option<DataType>,
    /// Total encoded size in bytes for `Data`-kind arguments.
    pub byte_length: usize,
    /// Required alignment of the argument's base offset.
    pub alignment: usize,
    /// Byte offset relative to the parent struct's base.  0 at top level.
    pub offset: usize,
    /// Number of array elements.  1 (or 0) for non-array arguments.
    pub array_length: usize,
    /// Spacing between array elements in bytes.
    pub stride: usize,
    /// Whether the compiled function actually uses this argument.
    pub active: bool,
    pub stage: Stage,
    /// Field descriptors for struct arguments, in declared order.
    pub members: Vec<ArgumentDescriptor>,
}

impl ArgumentDescriptor {
    /// An inline-data argument of a concrete data type.
    ///
    /// # Panics
    ///
    /// Panics if `data_type` is `Struct` or `Array`; use
    /// [`structure`](Self::structure) or [`array`](Self::array) for those.
    pub fn data(name: impl Into<String>, index: u32, stage: Stage, data_type: DataType) -> Self {
        let size = data_type.size();
        assert!(size.is_some(), "{:?} has no intrinsic size", data_type);
        ArgumentDescriptor {
            name: name.into(),
            index,
            kind: ArgumentKind::Data,
            data_type: Some(data_type),
            byte_length: size.unwrap_or(0),
            alignment: data_type.alignment().unwrap_or(1),
            offset: 0,
            array_length: 1,
            stride: 0,
            active: true,
            stage,
            members: Vec::new(),
        }
    }

    /// A struct argument whose layout is given by `members`.
    pub fn structure(
        name: impl Into<String>,
        index: u32,
        stage: Stage,
        byte_length: usize,
        members: Vec<ArgumentDescriptor>,
    ) -> Self {
        ArgumentDescriptor {
            name: name.into(),
            index,
            kind: ArgumentKind::Data,
            data_type: Some(DataType::Struct),
            byte_length,
            alignment: 1,
            offset: 0,
            array_length: 1,
            stride: 0,
            active: true,
            stage,
            members,
        }
    }

    /// An array of `length` elements of `element` type, spaced at the
    /// element's padded size.
    ///
    /// # Panics
    ///
    /// Panics if `element` has no intrinsic size or `length` is zero.
    pub fn array(
        name: impl Into<String>,
        index: u32,
        stage: Stage,
        element: DataType,
        length: usize,
    ) -> Self {
        let stride = element.size();
        assert!(stride.is_some(), "{:?} has no intrinsic size", element);
        assert!(length > 0, "Zero-length arrays are not allowed");
        let stride = stride.unwrap_or(0);
        ArgumentDescriptor {
            name: name.into(),
            index,
            kind: ArgumentKind::Data,
            data_type: Some(element),
            byte_length: stride * length,
            alignment: element.alignment().unwrap_or(1),
            offset: 0,
            array_length: length,
            stride,
            active: true,
            stage,
            members: Vec::new(),
        }
    }

    /// A struct member at `offset` bytes from the parent's base.
    ///
    /// Members are not stage-gated; the `stage` and `active` fields are
    /// inherited semantics of the top-level argument.
    pub fn member(name: impl Into<String>, offset: usize, data_type: DataType) -> Self {
        let mut descriptor = Self::data(name, 0, Stage::Vertex, data_type);
        descriptor.offset = offset;
        descriptor
    }

    /// A buffer-resource argument.
    pub fn buffer(name: impl Into<String>, index: u32, stage: Stage) -> Self {
        Self::resource(name, index, stage, ArgumentKind::Buffer)
    }

    /// A texture-resource argument.
    pub fn texture(name: impl Into<String>, index: u32, stage: Stage) -> Self {
        Self::resource(name, index, stage, ArgumentKind::Texture)
    }

    /// A sampler-state argument.
    pub fn sampler(name: impl Into<String>, index: u32, stage: Stage) -> Self {
        Self::resource(name, index, stage, ArgumentKind::Sampler)
    }

    fn resource(name: impl Into<String>, index: u32, stage: Stage, kind: ArgumentKind) -> Self {
        ArgumentDescriptor {
            name: name.into(),
            index,
            kind,
            data_type: None,
            byte_length: 0,
            alignment: 1,
            offset: 0,
            array_length: 1,
            stride: 0,
            active: true,
            stage,
            members: Vec::new(),
        }
    }

    /// Marks the argument inactive (reported by reflection as unused).
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// The descriptor one array element packs against: same type, no array
    /// dimension, `stride` bytes long.
    pub(crate) fn element(&self, stride: usize) -> ArgumentDescriptor {
        let mut element = self.clone();
        element.array_length = 1;
        element.stride = 0;
        element.byte_length = stride;
        element.offset = 0;
        element
    }
}
