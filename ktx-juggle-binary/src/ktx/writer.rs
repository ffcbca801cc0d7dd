//! KTX binary encoder
//!
//! Writes the container field by field in file order. The stored
//! endianness marker selects the output byte order, and the stored
//! bytesOfKeyValueData is authoritative for the size of the metadata block.

use super::header::write_header;
use super::types::BinaryOptions;
use crate::error::Result;
use crate::reader::ByteOrder;
use crate::writer::BinaryWriter;
use ktx_juggle_core::{KTX_ALIGNMENT, KtxContainer, MetadataEntry};
use std::io::Write;

/// KTX binary encoder
pub struct KtxEncoder;

impl KtxEncoder {
    /// Encode a container into a new buffer
    pub fn to_bytes(ktx: &KtxContainer, options: &BinaryOptions) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::write_to(ktx, &mut buffer, options)?;
        Ok(buffer)
    }

    /// Encode a container into `output`
    pub fn write_to<W: Write>(ktx: &KtxContainer, output: W, options: &BinaryOptions) -> Result<()> {
        let mut writer = BinaryWriter::new(output, ByteOrder::Little);
        write_header(&mut writer, &ktx.header)?;

        let block = Self::encode_metadata(
            &ktx.metadata,
            writer.byte_order(),
            options,
            ktx.header.bytes_of_key_value_data as usize,
        )?;
        writer.write_bytes(&block)?;

        let word_size = ktx.header.gl_type_size as usize;
        for level in &ktx.levels {
            writer.write_u32(level.image_size)?;
            for image in &level.images {
                writer.write_words(image, word_size)?;
                if options.aligned {
                    writer.align_to(KTX_ALIGNMENT)?;
                }
            }
        }

        writer.flush()
    }

    /// Encode metadata entries, truncated or zero-padded to `block_size`
    pub fn encode_metadata(
        entries: &[MetadataEntry],
        byte_order: ByteOrder,
        options: &BinaryOptions,
        block_size: usize,
    ) -> Result<Vec<u8>> {
        let mut writer = BinaryWriter::new(Vec::new(), byte_order);
        for entry in entries {
            writer.write_u32(entry.key_and_value_size() as u32)?;
            writer.write_bytes(&entry.key)?;
            writer.write_bytes(&[0])?;
            writer.write_bytes(&entry.value)?;
            if options.aligned {
                writer.align_to(KTX_ALIGNMENT)?;
            }
        }

        let mut block = writer.into_inner();
        if block.len() != block_size {
            tracing::debug!(
                "Fitting {} bytes of metadata into bytesOfKeyValueData = {}",
                block.len(),
                block_size
            );
            block.resize(block_size, 0);
        }
        Ok(block)
    }
}
