//! Minimal big-endian byte-stream helpers.
//!
//! Covers the single case this crate needs: a synchronous, in-memory source
//! buffer on decode, and a synchronous sink on encode. Short reads are
//! always errors, never treated as an EOF signal.

use crate::error::PngError;

/// A cursor over an in-memory byte buffer with big-endian integer helpers.
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn has(&self, count: usize) -> bool {
        self.remaining() >= count
    }

    /// Borrow `len` bytes starting `offset` bytes ahead of the cursor,
    /// without moving the cursor.
    pub fn peek_at(&self, offset: usize, len: usize) -> Result<&'a [u8], PngError> {
        let start = self.pos + offset;
        let end = start.checked_add(len).ok_or(PngError::TruncatedStream)?;
        self.data.get(start..end).ok_or(PngError::TruncatedStream)
    }

    pub fn skip(&mut self, count: usize) -> Result<(), PngError> {
        if !self.has(count) {
            return Err(PngError::TruncatedStream);
        }
        self.pos += count;
        Ok(())
    }

    /// Borrow and consume the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], PngError> {
        let bytes = self.peek_at(0, len)?;
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8, PngError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u32_be(&mut self) -> Result<u32, PngError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes(bytes.try_into().unwrap()))
    }

    pub fn read_u64_be(&mut self) -> Result<u64, PngError> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_be_bytes(bytes.try_into().unwrap()))
    }
}

/// A thin wrapper over any `std::io::Write` sink adding big-endian integer
/// helpers. Every write is treated as all-or-nothing: a short write from the
/// underlying sink surfaces as `PngError::Io`, never silently retried.
pub struct ByteWriter<W> {
    inner: W,
}

impl<W: std::io::Write> ByteWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), PngError> {
        self.inner.write_all(bytes)?;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), PngError> {
        self.write_bytes(&[value])
    }

    pub fn write_u32_be(&mut self, value: u32) -> Result<(), PngError> {
        self.write_bytes(&value.to_be_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_emits_big_endian_bytes() {
        let mut buf = Vec::new();
        {
            let mut w = ByteWriter::new(&mut buf);
            w.write_u32_be(42).unwrap();
            w.write_u8(0xFF).unwrap();
        }
        assert_eq!(buf, [0x00, 0x00, 0x00, 0x2A, 0xFF]);
    }

    #[test]
    fn reads_big_endian_integers() {
        let data = [0x00, 0x00, 0x00, 0x2A, 0xFF];
        let mut r = ByteReader::new(&data);
        assert_eq!(r.read_u32_be().unwrap(), 42);
        assert_eq!(r.read_u8().unwrap(), 0xFF);
    }

    #[test]
    fn short_read_is_truncated_stream() {
        let data = [0x00, 0x01];
        let mut r = ByteReader::new(&data);
        assert!(matches!(r.read_u32_be(), Err(PngError::TruncatedStream)));
    }

    #[test]
    fn peek_does_not_move_cursor() {
        let data = [1, 2, 3, 4];
        let mut r = ByteReader::new(&data);
        let _ = r.peek_at(0, 4).unwrap();
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_u8().unwrap(), 1);
    }
}
