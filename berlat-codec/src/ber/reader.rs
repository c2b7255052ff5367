//! Sequential byte source with consumption tracking

use berlat_core::error::{BerError, BerResult};
use bytes::Buf;

/// Sequential reader over a [`Buf`]
///
/// The reader counts every byte it consumes. The decoder uses that count to
/// find the end of definite-length constructed values, so no seeking is ever
/// needed.
pub struct BerReader<'a> {
    source: &'a mut dyn Buf,
    consumed: usize,
}

impl<'a> BerReader<'a> {
    pub fn new(source: &'a mut dyn Buf) -> Self {
        Self {
            source,
            consumed: 0,
        }
    }

    /// Number of bytes consumed so far
    pub fn num_bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Get remaining bytes
    pub fn remaining(&self) -> usize {
        self.source.remaining()
    }

    /// Check if there is more data to read
    pub fn has_remaining(&self) -> bool {
        self.source.has_remaining()
    }

    /// Read one byte
    ///
    /// # Error Handling
    /// Returns error if the source is exhausted.
    pub fn read_byte(&mut self) -> BerResult<u8> {
        if !self.source.has_remaining() {
            return Err(BerError::InvalidData(
                "Buffer exhausted while reading byte".to_string(),
            ));
        }
        self.consumed += 1;
        Ok(self.source.get_u8())
    }

    /// Read exactly `count` bytes
    pub fn read_bytes(&mut self, count: usize) -> BerResult<Vec<u8>> {
        self.ensure(count)?;
        let mut bytes = vec![0u8; count];
        self.source.copy_to_slice(&mut bytes);
        self.consumed += count;
        Ok(bytes)
    }

    /// Discard exactly `count` bytes
    pub fn skip(&mut self, count: usize) -> BerResult<()> {
        self.ensure(count)?;
        self.source.advance(count);
        self.consumed += count;
        Ok(())
    }

    fn ensure(&self, count: usize) -> BerResult<()> {
        let available = self.source.remaining();
        if count > available {
            return Err(BerError::InvalidData(format!(
                "Buffer exhausted: need {} bytes, have {}",
                count, available
            )));
        }
        Ok(())
    }
}
