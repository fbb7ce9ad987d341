// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The argument-table sink the encoder writes into.

The table is owned and implemented by the graphics backend; this crate only
consumes it.  One table services one encode call from one thread — the
encoder never invokes a table concurrently, and implementations are not
required to be reentrant.

A failed encode leaves the table partially configured: operations already
issued are not rolled back.  Callers must discard the table and rebuild it
before retrying.
*/

use crate::values::{BufferHandle, SamplerHandle, TextureHandle};

/// Backend storage for the bytes and resource bindings of one shader
/// function invocation.
///
/// Operations are infallible from the encoder's point of view; all
/// validation happens before a table method is called.  Byte regions the
/// encoder does not cover (struct padding) are never written, so
/// implementations should start from zeroed storage.
pub trait ArgumentTable {
    /// Binds a buffer resource at `index`.  The handle is forwarded
    /// unchanged from the caller's value mapping.
    fn bind_buffer(&mut self, index: u32, buffer: &BufferHandle);
    /// Binds a texture resource at `index`.
    fn bind_texture(&mut self, index: u32, texture: &TextureHandle);
    /// Binds sampler state at `index`.
    fn bind_sampler(&mut self, index: u32, sampler: &SamplerHandle);
    /// Writes `bytes` at `offset` within the argument at `index`.
    fn write_bytes(&mut self, index: u32, offset: usize, bytes: &[u8]);
}

/// A call-scoped byte writer bound to one argument's table index.
///
/// The proxy is how custom encoding capabilities write data without knowing
/// the table's addressing scheme: successive [`encode_bytes`](Self::encode_bytes)
/// calls append from the argument's base.  The borrow ties the proxy to the
/// encode call; it cannot be retained afterwards.
pub struct EncodingProxy<'a> {
    table: &'a mut dyn ArgumentTable,
    index: u32,
    cursor: usize,
}

impl<'a> EncodingProxy<'a> {
    pub(crate) fn new(table: &'a mut dyn ArgumentTable, index: u32) -> Self {
        EncodingProxy {
            table,
            index,
            cursor: 0,
        }
    }

    /// Writes `bytes` at the current cursor and advances it.
    pub fn encode_bytes(&mut self, bytes: &[u8]) {
        self.table.write_bytes(self.index, self.cursor, bytes);
        self.cursor += bytes.len();
    }

    /// Random-access write for the built-in packer; does not move the cursor.
    pub(crate) fn write_at(&mut self, offset: usize, bytes: &[u8]) {
        self.table.write_bytes(self.index, offset, bytes);
    }
}

impl std::fmt::Debug for EncodingProxy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodingProxy")
            .field("index", &self.index)
            .field("cursor", &self.cursor)
            .finish()
    }
}
