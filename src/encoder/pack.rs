// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Validates and writes raw bytes for inline-data arguments.
//!
//! Leaves must match the descriptor's data type and byte length exactly —
//! a partial write is a defect, not a best effort.  Structs recurse into
//! member descriptors at offsets relative to the parent's base; arrays
//! repeat the element descriptor at stride-spaced offsets.  Padding bytes
//! between members are never written.

use crate::arguments::ArgumentDescriptor;
use crate::encoder::EncodeError;
use crate::table::EncodingProxy;
use crate::values::{ArgumentValue, ValueKind};

pub(crate) fn pack(
    value: &ArgumentValue,
    argument: &ArgumentDescriptor,
    proxy: &mut EncodingProxy<'_>,
) -> Result<(), EncodeError> {
    pack_at(value, argument, argument.offset, proxy)
}

fn pack_at(
    value: &ArgumentValue,
    argument: &ArgumentDescriptor,
    offset: usize,
    proxy: &mut EncodingProxy<'_>,
) -> Result<(), EncodeError> {
    if argument.array_length > 1 {
        return pack_array(value, argument, offset, proxy);
    }
    if !argument.members.is_empty() {
        return pack_struct(value, argument, offset, proxy);
    }
    pack_leaf(value, argument, offset, proxy)
}

fn pack_leaf(
    value: &ArgumentValue,
    argument: &ArgumentDescriptor,
    offset: usize,
    proxy: &mut EncodingProxy<'_>,
) -> Result<(), EncodeError> {
    match value {
        ArgumentValue::Data(data) => {
            if let Some(declared) = argument.data_type {
                if declared != data.data_type() {
                    return Err(EncodeError::TypeMismatch {
                        argument: argument.name.clone(),
                        expected: ValueKind::Data(Some(declared)),
                        got: ValueKind::Data(Some(data.data_type())),
                    });
                }
            }
            if data.bytes().len() != argument.byte_length {
                return Err(EncodeError::SizeMismatch {
                    argument: argument.name.clone(),
                    expected: argument.byte_length,
                    got: data.bytes().len(),
                });
            }
            debug_assert!(
                argument.alignment <= 1 || offset % argument.alignment == 0,
                "Argument {} offset {} violates alignment {}",
                argument.name,
                offset,
                argument.alignment
            );
            proxy.write_at(offset, data.bytes());
            Ok(())
        }
        ArgumentValue::Custom(custom) => Err(EncodeError::UnsupportedValueType {
            argument: argument.name.clone(),
            type_name: custom.type_name(),
        }),
        value => Err(EncodeError::TypeMismatch {
            argument: argument.name.clone(),
            expected: ValueKind::Data(argument.data_type),
            got: value.kind(),
        }),
    }
}

fn pack_struct(
    value: &ArgumentValue,
    argument: &ArgumentDescriptor,
    offset: usize,
    proxy: &mut EncodingProxy<'_>,
) -> Result<(), EncodeError> {
    let ArgumentValue::Struct(fields) = value else {
        return Err(EncodeError::TypeMismatch {
            argument: argument.name.clone(),
            expected: ValueKind::Struct,
            got: value.kind(),
        });
    };
    if fields.len() != argument.members.len() {
        return Err(EncodeError::SizeMismatch {
            argument: argument.name.clone(),
            expected: argument.members.len(),
            got: fields.len(),
        });
    }
    let mut previous_offset = 0;
    for member in &argument.members {
        // Reflection invariants: offsets non-decreasing, members fit the parent.
        debug_assert!(
            member.offset >= previous_offset,
            "Member {} offset {} precedes previous member",
            member.name,
            member.offset
        );
        debug_assert!(
            member.offset + member.byte_length <= argument.byte_length,
            "Member {} exceeds parent byte length",
            member.name
        );
        previous_offset = member.offset;
        let field = fields
            .get(&member.name)
            .ok_or_else(|| EncodeError::MissingArgument(member.name.clone()))?;
        pack_at(field, member, offset + member.offset, proxy)?;
    }
    Ok(())
}

fn pack_array(
    value: &ArgumentValue,
    argument: &ArgumentDescriptor,
    offset: usize,
    proxy: &mut EncodingProxy<'_>,
) -> Result<(), EncodeError> {
    let ArgumentValue::Array(elements) = value else {
        return Err(EncodeError::TypeMismatch {
            argument: argument.name.clone(),
            expected: ValueKind::Array,
            got: value.kind(),
        });
    };
    if elements.len() != argument.array_length {
        return Err(EncodeError::SizeMismatch {
            argument: argument.name.clone(),
            expected: argument.array_length,
            got: elements.len(),
        });
    }
    let stride = if argument.stride > 0 {
        argument.stride
    } else {
        argument.byte_length / argument.array_length
    };
    let element = argument.element(stride);
    for (i, value) in elements.iter().enumerate() {
        pack_at(value, &element, offset + i * stride, proxy)?;
    }
    Ok(())
}
