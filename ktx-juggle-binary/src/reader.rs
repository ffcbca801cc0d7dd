//! Binary data reader for KTX files

use crate::error::{BinaryError, Result};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Byte order for reading and writing binary data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Big endian (network byte order)
    Big,
    /// Little endian (most common on x86/x64)
    #[default]
    Little,
}

/// Reverse the byte order of every `word_size` chunk in place
///
/// A trailing partial chunk is reversed as well.
pub fn swap_words(bytes: &mut [u8], word_size: usize) {
    if word_size > 1 {
        for word in bytes.chunks_mut(word_size) {
            word.reverse();
        }
    }
}

/// Binary reader over an in-memory KTX stream
pub struct BinaryReader<'a> {
    cursor: Cursor<&'a [u8]>,
    byte_order: ByteOrder,
}

impl<'a> BinaryReader<'a> {
    /// Create a new binary reader from byte slice
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self {
            cursor: Cursor::new(data),
            byte_order,
        }
    }

    /// Get current position in the stream
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Get the total length of the data
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Check if the reader is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get remaining bytes from current position
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position() as usize)
    }

    /// Check if we have at least `count` bytes remaining
    pub fn has_bytes(&self, count: usize) -> bool {
        self.remaining() >= count
    }

    /// Check for unread data without consuming it
    pub fn has_more(&self) -> bool {
        self.has_bytes(1)
    }

    /// Skip the padding up to the next multiple of `alignment`
    ///
    /// Fails like any other read if the padding runs past the end.
    pub fn align_to(&mut self, alignment: u64) -> Result<()> {
        let padding = ((alignment - self.position() % alignment) % alignment) as usize;
        if !self.has_bytes(padding) {
            return Err(BinaryError::not_enough_data(padding, self.remaining()));
        }
        self.cursor.set_position(self.position() + padding as u64);
        Ok(())
    }

    /// Read an unsigned 32-bit integer
    pub fn read_u32(&mut self) -> Result<u32> {
        if !self.has_bytes(4) {
            return Err(BinaryError::not_enough_data(4, self.remaining()));
        }
        match self.byte_order {
            ByteOrder::Big => Ok(self.cursor.read_u32::<BigEndian>()?),
            ByteOrder::Little => Ok(self.cursor.read_u32::<LittleEndian>()?),
        }
    }

    /// Read a fixed number of bytes
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        if !self.has_bytes(count) {
            return Err(BinaryError::not_enough_data(count, self.remaining()));
        }
        let mut buffer = vec![0u8; count];
        self.cursor.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Read `count` bytes made of `word_size`-byte words
    ///
    /// In big-endian mode each word is byte swapped, so the result is in
    /// little-endian order.
    pub fn read_words(&mut self, count: usize, word_size: usize) -> Result<Vec<u8>> {
        let mut bytes = self.read_bytes(count)?;
        if self.byte_order == ByteOrder::Big {
            swap_words(&mut bytes, word_size);
        }
        Ok(bytes)
    }

    /// Read up to `count` bytes, stopping at the end of the data
    pub fn read_at_most(&mut self, count: usize) -> Vec<u8> {
        let available = count.min(self.remaining());
        let start = self.position() as usize;
        let bytes = self.cursor.get_ref()[start..start + available].to_vec();
        self.cursor.set_position((start + available) as u64);
        bytes
    }

    /// Get the current byte order
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Set the byte order
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }
}
