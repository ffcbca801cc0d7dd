//! Binary data writer for KTX files
//!
//! The counterpart of [`crate::reader::BinaryReader`]. Positions, and
//! therefore alignment, are counted from the first byte written.

use crate::error::Result;
use crate::reader::{ByteOrder, swap_words};
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::Write;

/// Binary writer with a switchable byte order
pub struct BinaryWriter<W: Write> {
    inner: W,
    position: u64,
    byte_order: ByteOrder,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(inner: W, byte_order: ByteOrder) -> Self {
        Self {
            inner,
            position: 0,
            byte_order,
        }
    }

    /// Number of bytes written so far
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    /// Write an unsigned 32-bit integer
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        match self.byte_order {
            ByteOrder::Big => self.inner.write_u32::<BigEndian>(value)?,
            ByteOrder::Little => self.inner.write_u32::<LittleEndian>(value)?,
        }
        self.position += 4;
        Ok(())
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Write little-endian `word_size`-byte words in the current byte order
    pub fn write_words(&mut self, bytes: &[u8], word_size: usize) -> Result<()> {
        if self.byte_order == ByteOrder::Big && word_size > 1 {
            let mut swapped = bytes.to_vec();
            swap_words(&mut swapped, word_size);
            self.write_bytes(&swapped)
        } else {
            self.write_bytes(bytes)
        }
    }

    /// Write zero padding up to the next multiple of `alignment`
    pub fn align_to(&mut self, alignment: u64) -> Result<()> {
        let padding = ((alignment - self.position % alignment) % alignment) as usize;
        self.write_bytes(&vec![0u8; padding])
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::BinaryReader;

    #[test]
    fn test_endianness() {
        let mut writer = BinaryWriter::new(Vec::new(), ByteOrder::Little);
        writer.write_u32(0x04030201).unwrap();
        writer.set_byte_order(ByteOrder::Big);
        writer.write_u32(0x04030201).unwrap();
        assert_eq!(writer.into_inner(), vec![1, 2, 3, 4, 4, 3, 2, 1]);
    }

    #[test]
    fn test_alignment_padding() {
        let mut writer = BinaryWriter::new(Vec::new(), ByteOrder::Little);
        writer.write_bytes(&[7, 7, 7, 7, 7]).unwrap();
        writer.align_to(4).unwrap();
        assert_eq!(writer.position(), 8);
        writer.align_to(4).unwrap();
        assert_eq!(writer.into_inner(), vec![7, 7, 7, 7, 7, 0, 0, 0]);
    }

    #[test]
    fn test_words_mirror_reader() {
        let pixels = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut writer = BinaryWriter::new(Vec::new(), ByteOrder::Big);
        writer.write_words(&pixels, 4).unwrap();
        let written = writer.into_inner();
        assert_eq!(written, vec![4, 3, 2, 1, 8, 7, 6, 5, 10, 9]);

        let mut reader = BinaryReader::new(&written, ByteOrder::Big);
        assert_eq!(reader.read_words(10, 4).unwrap(), pixels.to_vec());
    }
}
