//! Bounds-checked reader and append-only writer for wire data.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::DecodeError;

/// Cursor over an inbound packet.
///
/// Every read checks the remaining length first, so a short packet surfaces
/// as [`DecodeError::Truncated`] instead of a panic.
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8, DecodeError> {
        self.ensure(1, what)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_u16(&mut self, what: &'static str) -> Result<u16, DecodeError> {
        self.ensure(2, what)?;
        Ok(self.buf.get_u16())
    }

    pub fn read_u32(&mut self, what: &'static str) -> Result<u32, DecodeError> {
        self.ensure(4, what)?;
        Ok(self.buf.get_u32())
    }

    pub fn read_bytes(&mut self, len: usize, what: &'static str) -> Result<&'a [u8], DecodeError> {
        self.ensure(len, what)?;
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    fn ensure(&self, len: usize, what: &'static str) -> Result<(), DecodeError> {
        if self.buf.remaining() < len {
            return Err(DecodeError::Truncated(what));
        }
        Ok(())
    }
}

/// Growable output buffer that tracks its own length.
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn put_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    pub fn put_u16(&mut self, v: u16) {
        self.buf.put_u16(v);
    }

    pub fn put_u32(&mut self, v: u32) {
        self.buf.put_u32(v);
    }

    pub fn put_slice(&mut self, data: &[u8]) {
        self.buf.put_slice(data);
    }

    /// Write `data` preceded by its 16-bit length.
    pub fn put_len_prefixed(&mut self, data: &[u8]) {
        self.buf.put_u16(data.len() as u16);
        self.buf.put_slice(data);
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_reads_big_endian_fields() {
        let data = [0x12, 0x34, 0x00, 0x00, 0x0e, 0x10, 0xff];
        let mut r = Reader::new(&data);

        assert_eq!(r.read_u16("id").unwrap(), 0x1234);
        assert_eq!(r.read_u32("ttl").unwrap(), 3600);
        assert_eq!(r.read_u8("byte").unwrap(), 0xff);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn reader_reports_truncation() {
        let data = [0x12];
        let mut r = Reader::new(&data);

        assert_eq!(r.read_u16("id"), Err(DecodeError::Truncated("id")));
    }

    #[test]
    fn reader_read_bytes_past_end_fails() {
        let data = [1, 2, 3];
        let mut r = Reader::new(&data);

        assert_eq!(r.read_bytes(2, "label").unwrap(), &[1, 2]);
        assert!(r.read_bytes(2, "label").is_err());
    }

    #[test]
    fn writer_tracks_length() {
        let mut w = Writer::with_capacity(16);
        assert!(w.is_empty());

        w.put_u16(0xabcd);
        w.put_u32(1);
        w.put_len_prefixed(b"xy");

        assert_eq!(w.len(), 10);
        assert_eq!(w.into_vec(), vec![0xab, 0xcd, 0, 0, 0, 1, 0, 2, b'x', b'y']);
    }
}
