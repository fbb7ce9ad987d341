/*! shader_arguments is GPU middleware that binds runtime values to the named,
reflected arguments of a compiled shader function.

Given reflection metadata for a function (supplied by a shader-reflection
facility — never derived here) and a mapping from argument name to value,
the encoder produces exactly the byte layout and resource bindings the
function expects, against an argument-table sink owned by the graphics
backend.

# What goes where

| Argument kind | Value | What happens |
|---------------|-------|--------------|
| Buffer / Texture / Sampler | an opaque backend handle | forwarded unchanged to the table's bind entry point |
| Data (scalar, vector, matrix) | `[f32; 4]`, a `vectormatrix` vector, `half::f16`, … | packed with standard GPU constant-buffer padding and written by value |
| Data (struct / array) | named fields / ordered elements | recursively packed at reflected member offsets and strides |
| Data (anything else) | a [`CustomValue`](values::CustomValue) | dispatched through the type-keyed [encoding capability registry](registry) |

Validation happens before any write: the first mismatch between a value and
its descriptor (missing entry, wrong shape, wrong size) aborts the call with
an error naming the argument.  Nothing is rolled back — a failed table is
discarded, not repaired.

# Example

```
use shader_arguments::arguments::{ArgumentDescriptor, DataType, Stage};
use shader_arguments::values::{ArgumentValue, BufferHandle, TextureHandle, SamplerHandle};
use shader_arguments::table::ArgumentTable;
use std::collections::HashMap;

// Reflection supplies the descriptors; tests and docs build them by hand.
let arguments = vec![
    ArgumentDescriptor::data("tintColor", 0, Stage::Fragment, DataType::Float4),
    ArgumentDescriptor::texture("inputTexture", 1, Stage::Fragment),
];

let mut values = HashMap::new();
values.insert("tintColor".to_string(), ArgumentValue::data([1.0f32, 0.5, 0.25, 1.0]));
values.insert("inputTexture".to_string(), ArgumentValue::Texture(TextureHandle::new(42u64)));

# struct NullTable;
# impl ArgumentTable for NullTable {
#     fn bind_buffer(&mut self, _: u32, _: &BufferHandle) {}
#     fn bind_texture(&mut self, _: u32, _: &TextureHandle) {}
#     fn bind_sampler(&mut self, _: u32, _: &SamplerHandle) {}
#     fn write_bytes(&mut self, _: u32, _: usize, _: &[u8]) {}
# }
# let mut table = NullTable;
shader_arguments::encode(&arguments, &values, Stage::Fragment, &mut table)
    .expect("shapes match the descriptors");
```

# Scope

This crate is the encoding dispatch and validation logic only.  Shader
compilation, command buffers, pass setup, and resource allocation belong to
the backend; the [`ArgumentTable`](table::ArgumentTable) trait is the whole
boundary.  Encode calls are synchronous and thread-local; the only shared
state is the capability registry, which supports concurrent readers with
serialized registration.
*/

pub mod arguments;
pub mod encoder;
pub mod registry;
pub mod table;
pub mod values;

pub use encoder::{ArgumentsEncoder, EncodeError, encode};

pub use vectormatrix;
