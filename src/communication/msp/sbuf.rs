//! MSP payload buffers
//!
//! Little-endian cursors over caller-owned byte slices. Framing and
//! checksums belong to the transport; these only see payloads.
//!
//! Writes never run past the end of the buffer: a write that does not fit
//! fails with `BufferTooSmall` and leaves the cursor where it was.

use super::MspError;

/// Payload writer
#[derive(Debug)]
pub struct StreamBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> StreamBuf<'a> {
    /// Create a writer at the start of `buf`
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes still available
    pub fn bytes_remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.pos
    }

    /// Check if nothing was written
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Written payload
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Write raw bytes
    pub fn write_data(&mut self, data: &[u8]) -> Result<(), MspError> {
        let end = self.pos + data.len();
        let target = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(MspError::BufferTooSmall)?;
        target.copy_from_slice(data);
        self.pos = end;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), MspError> {
        self.write_data(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), MspError> {
        self.write_data(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), MspError> {
        self.write_data(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> Result<(), MspError> {
        self.write_data(&value.to_le_bytes())
    }

    /// Write a string followed by a NUL byte
    pub fn write_string_nul(&mut self, value: &str) -> Result<(), MspError> {
        if self.bytes_remaining() < value.len() + 1 {
            return Err(MspError::BufferTooSmall);
        }
        self.write_data(value.as_bytes())?;
        self.write_u8(0)
    }
}

/// Payload reader
#[derive(Debug, Clone)]
pub struct ReadBuf<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ReadBuf<'a> {
    /// Create a reader at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not read yet
    pub fn bytes_remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Read `len` raw bytes
    pub fn read_data(&mut self, len: usize) -> Result<&'a [u8], MspError> {
        let end = self.pos + len;
        let data = self.data.get(self.pos..end).ok_or(MspError::Truncated)?;
        self.pos = end;
        Ok(data)
    }

    /// Read all remaining bytes
    pub fn read_rest(&mut self) -> &'a [u8] {
        let data = &self.data[self.pos..];
        self.pos = self.data.len();
        data
    }

    pub fn read_u8(&mut self) -> Result<u8, MspError> {
        Ok(self.read_data(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, MspError> {
        let bytes = self.read_data(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Peek at the next byte without consuming it
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Read a NUL-terminated string, consuming the terminator
    pub fn read_string_nul(&mut self) -> Result<&'a str, MspError> {
        let rest = &self.data[self.pos..];
        let len = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(MspError::Truncated)?;
        let value = core::str::from_utf8(&rest[..len]).map_err(|_| MspError::InvalidRequest)?;
        self.pos += len + 1;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_buf_writes_little_endian() {
        let mut buf = [0u8; 8];
        let mut dst = StreamBuf::new(&mut buf);
        dst.write_u16(0x1234).unwrap();
        dst.write_i32(-2).unwrap();
        assert_eq!(dst.written(), &[0x34, 0x12, 0xfe, 0xff, 0xff, 0xff]);
        assert_eq!(dst.bytes_remaining(), 2);
    }

    #[test]
    fn test_stream_buf_refuses_overflow() {
        let mut buf = [0u8; 4];
        let mut dst = StreamBuf::new(&mut buf);
        dst.write_u8(1).unwrap();
        assert_eq!(dst.write_u32(7), Err(MspError::BufferTooSmall));
        assert_eq!(dst.len(), 1);
        dst.write_string_nul("ab").unwrap();
        assert_eq!(dst.written(), &[1, b'a', b'b', 0]);
        assert_eq!(dst.write_string_nul(""), Err(MspError::BufferTooSmall));
    }

    #[test]
    fn test_read_buf() {
        let data = [b'h', b'i', 0, 0x34, 0x12, 9];
        let mut src = ReadBuf::new(&data);
        assert_eq!(src.read_string_nul(), Ok("hi"));
        assert_eq!(src.read_u16(), Ok(0x1234));
        assert_eq!(src.peek_u8(), Some(9));
        assert_eq!(src.read_rest(), &[9]);
        assert_eq!(src.read_u8(), Err(MspError::Truncated));
    }

    #[test]
    fn test_read_string_requires_terminator() {
        let mut src = ReadBuf::new(b"abc");
        assert_eq!(src.read_string_nul(), Err(MspError::Truncated));
        assert_eq!(src.bytes_remaining(), 3);
    }
}
