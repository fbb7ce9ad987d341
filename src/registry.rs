// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Extensible, type-keyed encoding capabilities.

The built-in packer understands resource handles and [`PackedData`]-family
values.  Anything else is a *custom* value, and encoding it requires a
registered [`EncodingCapability`] keyed by the value's type identity.

Registration typically happens once at process startup; lookups happen on
every encode call, from any thread.  The registry therefore takes a
single-writer/multiple-reader lock: registrations serialize against each
other, reads proceed concurrently.

Capabilities are consulted in registration order, stopping at the first that
reports [`Handled`](EncodeOutcome::Handled) or
[`Failed`](EncodeOutcome::Failed).  Re-registering a type identity overwrites
the previous entry — last registration wins.  That is a deliberate
simplicity choice, not conflict detection; it is logged so a surprising
overwrite is diagnosable.

A process-wide default instance is available via
[`EncodingRegistry::global`], but the registry is an ordinary object and can
be constructed and injected per [`ArgumentsEncoder`](crate::encoder::ArgumentsEncoder)
instead.

[`PackedData`]: crate::values::PackedData
*/

use crate::arguments::ArgumentDescriptor;
use crate::encoder::EncodeError;
use crate::table::EncodingProxy;
use crate::values::CustomValue;
use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

/// The result of offering a value to one capability.
#[derive(Debug)]
#[non_exhaustive]
pub enum EncodeOutcome {
    /// The capability validated and wrote the value.
    Handled,
    /// The capability does not recognize this value; consultation continues.
    NotApplicable,
    /// The capability recognized the value but could not encode it.  The
    /// encode call aborts with this error.
    Failed(Box<dyn std::error::Error + Send + Sync>),
}

/// A handler that knows how to validate and pack one custom value type.
///
/// Implementations must not retain the proxy beyond the call.
pub trait EncodingCapability: Send + Sync {
    fn try_encode(
        &self,
        value: &dyn Any,
        argument: &ArgumentDescriptor,
        proxy: &mut EncodingProxy<'_>,
    ) -> EncodeOutcome;
}

struct Entry {
    type_id: TypeId,
    type_name: &'static str,
    capability: Arc<dyn EncodingCapability>,
}

/// Process-scoped mapping from value type identity to encoding capability.
pub struct EncodingRegistry {
    entries: RwLock<Vec<Entry>>,
}

impl EncodingRegistry {
    /// An empty registry.
    pub const fn new() -> Self {
        EncodingRegistry {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// The default process-wide registry, used by
    /// [`ArgumentsEncoder::new`](crate::encoder::ArgumentsEncoder::new).
    /// Lives for the process lifetime.
    pub fn global() -> &'static EncodingRegistry {
        static GLOBAL: EncodingRegistry = EncodingRegistry::new();
        &GLOBAL
    }

    /// Registers `capability` for values of type `T`.
    ///
    /// Affects all subsequent encode calls through this registry.  If `T`
    /// already has a capability, the new one replaces it.
    pub fn register<T: Any + Send + Sync>(&self, capability: Arc<dyn EncodingCapability>) {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();
        let mut entries = self.entries.write().unwrap();
        if let Some(entry) = entries.iter_mut().find(|e| e.type_id == type_id) {
            logwise::warn_sync!(
                "Replacing encoding capability for {ty}",
                ty = logwise::privacy::LogIt(type_name)
            );
            entry.capability = capability;
        } else {
            entries.push(Entry {
                type_id,
                type_name,
                capability,
            });
        }
    }

    /// Registers a closure as the capability for values of type `T`.
    ///
    /// The closure receives the already-downcast value; a value of any other
    /// type reports `NotApplicable` automatically.
    pub fn register_fn<T, F>(&self, encode: F)
    where
        T: Any + Send + Sync,
        F: Fn(
                &T,
                &ArgumentDescriptor,
                &mut EncodingProxy<'_>,
            ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
            + Send
            + Sync
            + 'static,
    {
        struct FnCapability<T, F> {
            encode: F,
            phantom: PhantomData<fn(&T)>,
        }
        impl<T, F> EncodingCapability for FnCapability<T, F>
        where
            T: Any + Send + Sync,
            F: Fn(
                    &T,
                    &ArgumentDescriptor,
                    &mut EncodingProxy<'_>,
                ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
                + Send
                + Sync
                + 'static,
        {
            fn try_encode(
                &self,
                value: &dyn Any,
                argument: &ArgumentDescriptor,
                proxy: &mut EncodingProxy<'_>,
            ) -> EncodeOutcome {
                let Some(value) = value.downcast_ref::<T>() else {
                    return EncodeOutcome::NotApplicable;
                };
                match (self.encode)(value, argument, proxy) {
                    Ok(()) => EncodeOutcome::Handled,
                    Err(e) => EncodeOutcome::Failed(e),
                }
            }
        }
        self.register::<T>(Arc::new(FnCapability {
            encode,
            phantom: PhantomData,
        }));
    }

    /// Removes the capability registered for `T`, if any.
    pub fn unregister<T: Any + Send + Sync>(&self) {
        let type_id = TypeId::of::<T>();
        let mut entries = self.entries.write().unwrap();
        entries.retain(|e| e.type_id != type_id);
    }

    pub(crate) fn encode_value(
        &self,
        value: &CustomValue,
        argument: &ArgumentDescriptor,
        proxy: &mut EncodingProxy<'_>,
    ) -> Result<(), EncodeError> {
        let entries = self.entries.read().unwrap();
        for entry in entries.iter() {
            if entry.type_id != value.type_id() {
                continue;
            }
            match entry.capability.try_encode(value.as_any(), argument, proxy) {
                EncodeOutcome::Handled => return Ok(()),
                EncodeOutcome::NotApplicable => continue,
                EncodeOutcome::Failed(source) => {
                    return Err(EncodeError::CapabilityFailure {
                        argument: argument.name.clone(),
                        source,
                    });
                }
            }
        }
        Err(EncodeError::UnsupportedValueType {
            argument: argument.name.clone(),
            type_name: value.type_name(),
        })
    }
}

impl Default for EncodingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EncodingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.read().unwrap();
        f.debug_list()
            .entries(entries.iter().map(|e| e.type_name))
            .finish()
    }
}
