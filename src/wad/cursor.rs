//! Bounds-checked sequential reads over an in-memory buffer.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::{InspectError, InspectResult};

/// Sequential reader over a byte slice.
///
/// Every successful read advances the position. A read that would run past
/// the end fails with [`InspectError::OutOfBounds`] and leaves the position
/// where it was.
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(data),
        }
    }

    pub fn remaining_bytes(&self) -> usize {
        let len = self.inner.get_ref().len() as u64;
        len.saturating_sub(self.inner.position()) as usize
    }

    fn ensure(&self, n: usize) -> InspectResult<()> {
        if self.remaining_bytes() < n {
            return Err(InspectError::OutOfBounds);
        }
        Ok(())
    }

    pub fn read_u32_le(&mut self) -> InspectResult<u32> {
        self.ensure(4)?;
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(|_| InspectError::OutOfBounds)
    }

    pub fn read_bytes<const N: usize>(&mut self) -> InspectResult<[u8; N]> {
        self.ensure(N)?;
        let start = self.inner.position() as usize;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.inner.get_ref()[start..start + N]);
        self.inner.set_position((start + N) as u64);
        Ok(out)
    }

    pub fn skip(&mut self, n: usize) -> InspectResult<()> {
        self.ensure(n)?;
        self.inner.set_position(self.inner.position() + n as u64);
        Ok(())
    }

    /// Read an `n`-byte NUL-padded name, uppercased.
    ///
    /// The name ends at the first NUL, the way the engine reads lump names.
    pub fn read_fixed_ascii(&mut self, n: usize) -> InspectResult<String> {
        self.ensure(n)?;
        let data: &'a [u8] = *self.inner.get_ref();
        let start = self.inner.position() as usize;
        let raw = &data[start..start + n];
        self.inner.set_position((start + n) as u64);

        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Ok(String::from_utf8_lossy(&raw[..end]).to_ascii_uppercase())
    }
}
