//! Cursor primitives for packing masked integers into fixed-layout buffers.
//!
//! Multi-byte values are always little-endian on the wire regardless of host
//! byte order. The most-significant byte of every field carries an explicit
//! bit mask; several registers are narrower than their storage width and the
//! mask keeps their unused high bits pinned to zero on both paths.

/// Forward-only cursor that packs masked little-endian integers into a
/// byte buffer.
///
/// Field widths are compile-time constants tied to the snapshot layout, so
/// cursor positions are always in range by construction and the writer has
/// no failure modes.
#[derive(Debug)]
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    /// Creates a writer positioned at the start of `buf`.
    #[must_use]
    pub const fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the current cursor offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Writes `width` little-endian bytes of `value`, applying `msb_mask` to
    /// the most-significant byte written, and advances the cursor.
    pub fn write_uint(&mut self, value: u32, width: usize, msb_mask: u8) {
        let bytes = value.to_le_bytes();
        let end = self.pos + width;
        self.buf[self.pos..end].copy_from_slice(&bytes[..width]);
        self.buf[end - 1] &= msb_mask;
        self.pos = end;
    }

    /// Writes one byte masked by `mask`.
    pub fn write_u8(&mut self, value: u8, mask: u8) {
        self.write_uint(u32::from(value), 1, mask);
    }

    /// Writes two little-endian bytes with `msb_mask` on the high byte.
    pub fn write_u16(&mut self, value: u16, msb_mask: u8) {
        self.write_uint(u32::from(value), 2, msb_mask);
    }

    /// Writes four little-endian bytes.
    pub fn write_u32(&mut self, value: u32) {
        self.write_uint(value, 4, 0xFF);
    }

    /// Writes a boolean into one byte, masked to bit 0.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value), 0x01);
    }

    /// Writes `bytes` verbatim and advances the cursor.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        self.buf[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
    }
}

/// Forward-only cursor that reads masked little-endian integers back out of
/// a byte buffer; the exact inverse of [`ByteWriter`].
///
/// The mask is re-applied on every read to guard against corrupted high bits
/// in externally stored blobs, even though a conforming encoder never writes
/// them.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `buf`.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the current cursor offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads `width` little-endian bytes, applying `msb_mask` to the
    /// most-significant byte, and advances the cursor.
    pub fn read_uint(&mut self, width: usize, msb_mask: u8) -> u32 {
        let mut bytes = [0_u8; 4];
        bytes[..width].copy_from_slice(&self.buf[self.pos..self.pos + width]);
        bytes[width - 1] &= msb_mask;
        self.pos += width;
        u32::from_le_bytes(bytes)
    }

    /// Reads one byte masked by `mask`.
    pub fn read_u8(&mut self, mask: u8) -> u8 {
        let value = self.buf[self.pos] & mask;
        self.pos += 1;
        value
    }

    /// Reads two little-endian bytes with `msb_mask` on the high byte.
    pub fn read_u16(&mut self, msb_mask: u8) -> u16 {
        let lo = self.buf[self.pos];
        let hi = self.buf[self.pos + 1] & msb_mask;
        self.pos += 2;
        u16::from_le_bytes([lo, hi])
    }

    /// Reads four little-endian bytes.
    pub fn read_u32(&mut self) -> u32 {
        let mut bytes = [0_u8; 4];
        bytes.copy_from_slice(&self.buf[self.pos..self.pos + 4]);
        self.pos += 4;
        u32::from_le_bytes(bytes)
    }

    /// Reads one byte as a boolean, masked to bit 0.
    pub fn read_bool(&mut self) -> bool {
        self.read_u8(0x01) != 0
    }

    /// Reads `len` bytes verbatim and advances the cursor.
    pub fn read_bytes(&mut self, len: usize) -> &'a [u8] {
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        bytes
    }
}
