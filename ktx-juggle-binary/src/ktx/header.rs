//! KTX header reading and writing
//!
//! The header is a 12-byte identifier followed by thirteen 32-bit fields.
//! The endianness marker is always read and written in little-endian
//! order; its value decides the byte order of everything after it.

use crate::error::{BinaryError, Result};
use crate::reader::{BinaryReader, ByteOrder};
use crate::writer::BinaryWriter;
use ktx_juggle_core::{DiagnosticSink, ENDIANNESS_SWAPPED, KTX_IDENTIFIER, KtxHeader};
use std::io::Write;

/// Read the header, switching `reader` to big endian if the marker says so
pub fn read_header(reader: &mut BinaryReader, sink: &mut dyn DiagnosticSink) -> Result<KtxHeader> {
    let identifier = reader.read_bytes(KTX_IDENTIFIER.len())?;
    let endianness = reader.read_u32()?;
    if endianness == ENDIANNESS_SWAPPED {
        sink.info("Input is big endian");
        reader.set_byte_order(ByteOrder::Big);
    }

    Ok(KtxHeader {
        identifier,
        endianness,
        gl_type: reader.read_u32()?,
        gl_type_size: reader.read_u32()?,
        gl_format: reader.read_u32()?,
        gl_internal_format: reader.read_u32()?,
        gl_base_internal_format: reader.read_u32()?,
        pixel_width: reader.read_u32()?,
        pixel_height: reader.read_u32()?,
        pixel_depth: reader.read_u32()?,
        number_of_array_elements: reader.read_u32()?,
        number_of_faces: reader.read_u32()?,
        number_of_mipmap_levels: reader.read_u32()?,
        bytes_of_key_value_data: reader.read_u32()?,
    })
}

/// Write the header, switching `writer` to big endian if the marker says so
///
/// The identifier may hold any bytes, but it must be exactly 12 of them.
pub fn write_header<W: Write>(writer: &mut BinaryWriter<W>, header: &KtxHeader) -> Result<()> {
    if header.identifier.len() != KTX_IDENTIFIER.len() {
        return Err(BinaryError::invalid_format(format!(
            "identifier must be {} bytes, got {}",
            KTX_IDENTIFIER.len(),
            header.identifier.len()
        )));
    }
    writer.write_bytes(&header.identifier)?;
    writer.set_byte_order(ByteOrder::Little);
    writer.write_u32(header.endianness)?;
    if header.is_byte_swapped() {
        writer.set_byte_order(ByteOrder::Big);
    }

    for field in [
        header.gl_type,
        header.gl_type_size,
        header.gl_format,
        header.gl_internal_format,
        header.gl_base_internal_format,
        header.pixel_width,
        header.pixel_height,
        header.pixel_depth,
        header.number_of_array_elements,
        header.number_of_faces,
        header.number_of_mipmap_levels,
        header.bytes_of_key_value_data,
    ] {
        writer.write_u32(field)?;
    }
    Ok(())
}
