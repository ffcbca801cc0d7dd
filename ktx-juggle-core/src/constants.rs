//! Constants for the KTX 1.1 container layout
//!
//! This module contains the magic values, reserved ranges and well-known
//! metadata keys that are shared between the binary and textual codecs.

use std::ops::RangeInclusive;

/// The fixed 12-byte file identifier of a KTX 1.1 file
pub const KTX_IDENTIFIER: [u8; 12] = [
    0xAB, b'K', b'T', b'X', b' ', b'1', b'1', 0xBB, b'\r', b'\n', 0x1A, b'\n',
];

/// Endianness marker as read by a reader with matching byte order
pub const ENDIANNESS_NATIVE: u32 = 0x0403_0201;

/// Endianness marker as read by a reader with the opposite byte order
pub const ENDIANNESS_SWAPPED: u32 = 0x0102_0304;

/// Size of the fixed header: identifier plus thirteen 32-bit fields
pub const HEADER_SIZE: usize = 12 + 13 * 4;

/// Alignment of metadata entries and images in the binary layout
pub const KTX_ALIGNMENT: u64 = 4;

/// Number of faces of a cubemap
pub const CUBEMAP_FACES: u32 = 6;

/// glInternalFormat values of the OES_compressed_paletted_texture formats
pub const PALETTE_FORMATS: RangeInclusive<u32> = 0x8B90..=0x8B99;

/// The only metadata key defined by KTX 1.1
pub const KTX_ORIENTATION: &[u8] = b"KTXorientation";

/// Key prefixes reserved for future KTX-defined metadata
pub const RESERVED_KEY_PREFIXES: [&[u8]; 2] = [b"KTX", b"ktx"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        assert_eq!(KTX_IDENTIFIER.len(), 12);
        assert_eq!(&KTX_IDENTIFIER[1..7], b"KTX 11");
    }

    #[test]
    fn test_endianness_markers_are_byte_swapped() {
        assert_eq!(ENDIANNESS_NATIVE.swap_bytes(), ENDIANNESS_SWAPPED);
        assert_eq!(HEADER_SIZE, 64);
    }

    #[test]
    fn test_palette_range() {
        assert!(PALETTE_FORMATS.contains(&0x8B90));
        assert!(PALETTE_FORMATS.contains(&0x8B99));
        assert!(!PALETTE_FORMATS.contains(&0x8B9A));
    }
}
