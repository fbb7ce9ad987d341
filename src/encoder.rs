// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The argument resolver: the root of every encode call.

[`ArgumentsEncoder::encode`] walks the reflected arguments of a function,
keeps those active for the requested stage, looks each one up by name in the
value mapping, and dispatches by argument kind:

- `Buffer`/`Texture`/`Sampler` → the resource binder, which forwards the
  handle to the table.
- `Data` with a built-in value shape → the packer, which validates layout
  and writes bytes through an [`EncodingProxy`].
- `Data` with a [custom value](crate::values::CustomValue) → the
  [capability registry](crate::registry).

Processing order is descriptor order.  The first failure aborts the call;
table operations already issued are **not** rolled back, so a failed table
must be discarded by the caller.
*/

mod bind;
mod pack;

use crate::arguments::{ArgumentDescriptor, ArgumentKind, Stage};
use crate::registry::EncodingRegistry;
use crate::table::{ArgumentTable, EncodingProxy};
use crate::values::{ArgumentValue, ValueKind};
use std::collections::HashMap;

/// Errors produced by a single encode call.
///
/// None of these are fatal to the process and none are retried internally;
/// retrying is the caller's responsibility and requires a fresh argument
/// table, since partial side effects of a failed call are not undone.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// An active argument (or struct member) has no entry in the value
    /// mapping.
    #[error("No value provided for argument `{0}`")]
    MissingArgument(String),
    /// The value's shape does not match what the argument expects.
    #[error("Argument `{argument}` expected {expected:?}, got {got:?}")]
    TypeMismatch {
        argument: String,
        expected: ValueKind,
        got: ValueKind,
    },
    /// Byte length, struct field count, or array element count differs from
    /// the reflected layout.
    #[error("Argument `{argument}` expected size {expected}, got {got}")]
    SizeMismatch {
        argument: String,
        expected: usize,
        got: usize,
    },
    /// A custom value's type has no registered encoding capability.
    #[error("No encoding capability registered for `{type_name}` (argument `{argument}`)")]
    UnsupportedValueType {
        argument: String,
        type_name: &'static str,
    },
    /// A registered capability recognized the value but failed to encode it.
    #[error("Encoding capability failed for argument `{argument}`: {source}")]
    CapabilityFailure {
        argument: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Encodes values into shader function arguments.
///
/// Cheap to construct; holds only a registry reference.  [`new`](Self::new)
/// uses the process-wide default registry, [`with_registry`](Self::with_registry)
/// injects a specific one.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentsEncoder<'registry> {
    registry: &'registry EncodingRegistry,
}

impl ArgumentsEncoder<'static> {
    /// An encoder backed by [`EncodingRegistry::global`].
    pub fn new() -> Self {
        ArgumentsEncoder {
            registry: EncodingRegistry::global(),
        }
    }
}

impl Default for ArgumentsEncoder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'registry> ArgumentsEncoder<'registry> {
    /// An encoder consulting `registry` for custom value types.
    pub fn with_registry(registry: &'registry EncodingRegistry) -> Self {
        ArgumentsEncoder { registry }
    }

    /// Encodes every argument of `arguments` active for `stage` into `table`.
    ///
    /// Returns success only if every active argument was encoded; exactly
    /// one bind or one covering set of byte writes is issued per argument.
    /// On error the table is left partially configured and must be
    /// discarded.
    pub fn encode(
        &self,
        arguments: &[ArgumentDescriptor],
        values: &HashMap<String, ArgumentValue>,
        stage: Stage,
        table: &mut dyn ArgumentTable,
    ) -> Result<(), EncodeError> {
        logwise::trace_sync!("ArgumentsEncoder::encode");
        for argument in arguments {
            if !argument.active || argument.stage != stage {
                continue;
            }
            let value = values
                .get(&argument.name)
                .ok_or_else(|| EncodeError::MissingArgument(argument.name.clone()))?;
            match argument.kind {
                ArgumentKind::Buffer | ArgumentKind::Texture | ArgumentKind::Sampler => {
                    bind::bind(value, argument, &mut *table)?;
                }
                ArgumentKind::Data => match value {
                    ArgumentValue::Custom(custom) => {
                        let mut proxy = EncodingProxy::new(&mut *table, argument.index);
                        self.registry.encode_value(custom, argument, &mut proxy)?;
                    }
                    value => {
                        let mut proxy = EncodingProxy::new(&mut *table, argument.index);
                        pack::pack(value, argument, &mut proxy)?;
                    }
                },
            }
        }
        Ok(())
    }
}

/// Encodes with the process-wide default registry.
///
/// Convenience wrapper over [`ArgumentsEncoder::encode`] for callers that do
/// not inject a registry.
pub fn encode(
    arguments: &[ArgumentDescriptor],
    values: &HashMap<String, ArgumentValue>,
    stage: Stage,
    table: &mut dyn ArgumentTable,
) -> Result<(), EncodeError> {
    ArgumentsEncoder::new().encode(arguments, values, stage, table)
}
