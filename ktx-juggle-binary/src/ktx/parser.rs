//! KTX binary decoder
//!
//! Decoding is best effort. Only a truncated fixed header is fatal; a short
//! metadata block, missing image data and trailing bytes are reported to the
//! diagnostic sink and the container holds whatever could be read.

use super::header::read_header;
use super::types::BinaryOptions;
use crate::error::Result;
use crate::reader::{BinaryReader, ByteOrder};
use ktx_juggle_core::{
    DiagnosticSink, KTX_ALIGNMENT, KtxContainer, KtxHeader, MetadataEntry, MipLevel, Validator,
};

/// KTX binary parser
pub struct KtxParser;

impl KtxParser {
    /// Decode a complete KTX file and validate the result
    pub fn from_bytes(
        data: &[u8],
        options: &BinaryOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<KtxContainer> {
        let mut reader = BinaryReader::new(data, ByteOrder::Little);

        let header = read_header(&mut reader, sink)?;
        let metadata = Self::read_metadata(&mut reader, &header, options, sink);
        let levels = Self::read_levels(&mut reader, &header, options, sink)?;

        let ktx = KtxContainer {
            header,
            metadata,
            levels,
        };
        Validator::with_alignment(options.aligned).validate(&ktx, sink);
        Ok(ktx)
    }

    /// Read the metadata block of bytesOfKeyValueData bytes
    fn read_metadata(
        reader: &mut BinaryReader,
        header: &KtxHeader,
        options: &BinaryOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<MetadataEntry> {
        let declared = header.bytes_of_key_value_data as usize;
        let block = reader.read_at_most(declared);
        if block.len() < declared {
            sink.warn("bytesOfKeyValueData overruns the end of the file");
        }
        Self::parse_metadata(&block, reader.byte_order(), options, sink)
    }

    /// Parse key/value pairs from a metadata block
    ///
    /// The block has its own cursor, so alignment is relative to its start.
    /// This matches file offsets because the block starts at offset 64.
    pub fn parse_metadata(
        block: &[u8],
        byte_order: ByteOrder,
        options: &BinaryOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Vec<MetadataEntry> {
        let mut reader = BinaryReader::new(block, byte_order);
        let mut entries = Vec::new();

        while reader.has_more() {
            let size = match reader.read_u32() {
                Ok(size) => size as usize,
                Err(_) => {
                    sink.warn("keyAndValueByteSize overruns bytesOfKeyValueData");
                    break;
                }
            };
            if size == 0 {
                sink.warn("keyAndValueByteSize is 0, ignoring the rest of the metadata");
                break;
            }
            let key_and_value = match reader.read_bytes(size) {
                Ok(bytes) => bytes,
                Err(_) => {
                    sink.warn("keyAndValueByteSize overruns bytesOfKeyValueData");
                    break;
                }
            };
            let padded = !options.aligned || reader.align_to(KTX_ALIGNMENT).is_ok();

            match key_and_value.iter().position(|&b| b == 0) {
                Some(nul) => entries.push(MetadataEntry::new(
                    &key_and_value[..nul],
                    &key_and_value[nul + 1..],
                )),
                None => sink.warn("keyAndValue is missing a NUL separator"),
            }

            if !padded {
                sink.warn("valuePadding overruns bytesOfKeyValueData");
                break;
            }
        }

        entries
    }

    /// Read the mipmap levels following the metadata block
    fn read_levels(
        reader: &mut BinaryReader,
        header: &KtxHeader,
        options: &BinaryOptions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<MipLevel>> {
        let mut levels = Vec::new();

        for mip in 0..header.stored_level_count() {
            match Self::read_level(reader, header, options) {
                Ok(level) => levels.push(level),
                Err(e) if e.is_eof() => {
                    sink.warn(&format!(
                        "Unexpected EOF while reading image data of level {mip}"
                    ));
                    return Ok(levels);
                }
                Err(e) => return Err(e),
            }
        }

        if reader.has_more() {
            sink.warn(&format!(
                "Unexpected {} bytes after last image",
                reader.remaining()
            ));
        }
        Ok(levels)
    }

    fn read_level(
        reader: &mut BinaryReader,
        header: &KtxHeader,
        options: &BinaryOptions,
    ) -> Result<MipLevel> {
        let image_size = reader.read_u32()?;
        let word_size = header.gl_type_size as usize;

        let mut images = Vec::with_capacity(header.images_per_level());
        for _face in 0..header.images_per_level() {
            images.push(reader.read_words(image_size as usize, word_size)?);
            if options.aligned {
                reader.align_to(KTX_ALIGNMENT)?;
            }
        }

        Ok(MipLevel { image_size, images })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktx_juggle_core::Diagnostics;

    fn entry_bytes(key_and_value: &[u8], aligned: bool) -> Vec<u8> {
        let mut bytes = (key_and_value.len() as u32).to_le_bytes().to_vec();
        bytes.extend_from_slice(key_and_value);
        if aligned {
            while bytes.len() % 4 != 0 {
                bytes.push(0);
            }
        }
        bytes
    }

    #[test]
    fn test_parse_metadata_entries() {
        let mut block = entry_bytes(b"KTXorientation\0S=r,T=d\0", true);
        block.extend(entry_bytes(b"a\0b\0c", true));

        let mut diagnostics = Diagnostics::new();
        let entries = KtxParser::parse_metadata(
            &block,
            ByteOrder::Little,
            &BinaryOptions::default(),
            &mut diagnostics,
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, b"KTXorientation");
        assert_eq!(entries[0].value, b"S=r,T=d\0");
        // Only the first NUL separates
        assert_eq!(entries[1].key, b"a");
        assert_eq!(entries[1].value, b"b\0c");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_missing_nul_drops_entry() {
        let mut block = entry_bytes(b"novalue", true);
        block.extend(entry_bytes(b"k\0v", true));

        let mut diagnostics = Diagnostics::new();
        let entries = KtxParser::parse_metadata(
            &block,
            ByteOrder::Little,
            &BinaryOptions::default(),
            &mut diagnostics,
        );
        assert_eq!(entries, vec![MetadataEntry::new("k", "v")]);
        assert!(diagnostics.contains("missing a NUL separator"));
    }

    #[test]
    fn test_overrun_stops_parsing() {
        let mut block = entry_bytes(b"k\0v", true);
        block.extend_from_slice(&100u32.to_le_bytes());
        block.extend_from_slice(b"short");

        let mut diagnostics = Diagnostics::new();
        let entries = KtxParser::parse_metadata(
            &block,
            ByteOrder::Little,
            &BinaryOptions::default(),
            &mut diagnostics,
        );
        assert_eq!(entries.len(), 1);
        assert!(diagnostics.contains("overruns bytesOfKeyValueData"));
    }

    #[test]
    fn test_zero_length_stops_parsing() {
        let mut block = entry_bytes(b"k\0v", true);
        block.extend_from_slice(&[0u8; 8]);

        let mut diagnostics = Diagnostics::new();
        let entries = KtxParser::parse_metadata(
            &block,
            ByteOrder::Little,
            &BinaryOptions::default(),
            &mut diagnostics,
        );
        assert_eq!(entries.len(), 1);
        assert!(diagnostics.contains("keyAndValueByteSize is 0"));
    }

    #[test]
    fn test_unpadded_last_entry_is_kept() {
        let block = entry_bytes(b"k\0v", false);

        let mut diagnostics = Diagnostics::new();
        let entries = KtxParser::parse_metadata(
            &block,
            ByteOrder::Little,
            &BinaryOptions::default(),
            &mut diagnostics,
        );
        assert_eq!(entries, vec![MetadataEntry::new("k", "v")]);
        assert!(diagnostics.contains("valuePadding overruns"));

        let mut diagnostics = Diagnostics::new();
        let entries = KtxParser::parse_metadata(
            &block,
            ByteOrder::Little,
            &BinaryOptions::unaligned(),
            &mut diagnostics,
        );
        assert_eq!(entries.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_big_endian_metadata_lengths() {
        let mut block = 3u32.to_be_bytes().to_vec();
        block.extend_from_slice(b"k\0v\0");

        let mut diagnostics = Diagnostics::new();
        let entries = KtxParser::parse_metadata(
            &block,
            ByteOrder::Big,
            &BinaryOptions::default(),
            &mut diagnostics,
        );
        assert_eq!(entries, vec![MetadataEntry::new("k", "v")]);
    }
}
