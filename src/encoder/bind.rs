// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Routes resource-kind arguments to the table's binding entry points.
//!
//! No bytes are packed here: a matching handle is forwarded to the table
//! unchanged, at the argument's reflected index.

use crate::arguments::{ArgumentDescriptor, ArgumentKind};
use crate::encoder::EncodeError;
use crate::table::ArgumentTable;
use crate::values::{ArgumentValue, ValueKind};

pub(crate) fn bind(
    value: &ArgumentValue,
    argument: &ArgumentDescriptor,
    table: &mut dyn ArgumentTable,
) -> Result<(), EncodeError> {
    match (argument.kind, value) {
        (ArgumentKind::Buffer, ArgumentValue::Buffer(handle)) => {
            table.bind_buffer(argument.index, handle);
            Ok(())
        }
        (ArgumentKind::Texture, ArgumentValue::Texture(handle)) => {
            table.bind_texture(argument.index, handle);
            Ok(())
        }
        (ArgumentKind::Sampler, ArgumentValue::Sampler(handle)) => {
            table.bind_sampler(argument.index, handle);
            Ok(())
        }
        (_, value) => Err(EncodeError::TypeMismatch {
            argument: argument.name.clone(),
            expected: expected_kind(argument),
            got: value.kind(),
        }),
    }
}

fn expected_kind(argument: &ArgumentDescriptor) -> ValueKind {
    match argument.kind {
        ArgumentKind::Buffer => ValueKind::Buffer,
        ArgumentKind::Texture => ValueKind::Texture,
        ArgumentKind::Sampler => ValueKind::Sampler,
        ArgumentKind::Data => ValueKind::Data(argument.data_type),
    }
}
