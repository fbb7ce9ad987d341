// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Type-erased handles to backend GPU resources.
//!
//! The encoder never interprets a resource; it forwards the handle unchanged
//! to the argument table, which downcasts back to whatever concrete type the
//! backend registered.  Erasure keeps the core independent of any particular
//! graphics backend.

use std::any::Any;
use std::sync::Arc;

macro_rules! resource_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            value: Arc<dyn Any + Send + Sync>,
            type_name: &'static str,
        }

        impl $name {
            /// Wraps a backend resource.
            pub fn new<T: Any + Send + Sync>(value: T) -> Self {
                Self {
                    value: Arc::new(value),
                    type_name: std::any::type_name::<T>(),
                }
            }

            /// Recovers the wrapped resource, if it is a `T`.
            pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
                self.value.downcast_ref()
            }

            /// The type name of the wrapped resource, for diagnostics.
            pub fn type_name(&self) -> &'static str {
                self.type_name
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}<{}>", stringify!($name), self.type_name)
            }
        }
    };
}

resource_handle!(
    /// An opaque handle to a backend GPU buffer.
    BufferHandle
);
resource_handle!(
    /// An opaque handle to a backend texture.
    TextureHandle
);
resource_handle!(
    /// An opaque handle to backend sampler state.
    SamplerHandle
);
