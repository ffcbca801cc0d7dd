//! GL enum name lookup
//!
//! The header fields glType, glFormat, glInternalFormat and
//! glBaseInternalFormat hold raw OpenGL enum values. For readability the
//! textual codec writes them by symbolic name, through the [`GlEnumNames`]
//! collaborator defined here.

use crate::error::{KtxError, Result};
use std::collections::HashMap;

/// Maps GL enum values to and from symbolic names
pub trait GlEnumNames {
    /// Symbolic name of `value`, or a zero-padded hex literal if unknown
    fn value_to_name(&self, value: u32) -> String;

    /// Value of a symbolic name or of an integer literal
    fn name_to_value(&self, name: &str) -> Result<u32>;
}

/// Known GL enums, one name per value
const GL_ENUMS: &[(u32, &str)] = &[
    (0x0000, "GL_NONE"),
    // Types
    (0x1400, "GL_BYTE"),
    (0x1401, "GL_UNSIGNED_BYTE"),
    (0x1402, "GL_SHORT"),
    (0x1403, "GL_UNSIGNED_SHORT"),
    (0x1404, "GL_INT"),
    (0x1405, "GL_UNSIGNED_INT"),
    (0x1406, "GL_FLOAT"),
    (0x140B, "GL_HALF_FLOAT"),
    (0x8D61, "GL_HALF_FLOAT_OES"),
    (0x8033, "GL_UNSIGNED_SHORT_4_4_4_4"),
    (0x8034, "GL_UNSIGNED_SHORT_5_5_5_1"),
    (0x8363, "GL_UNSIGNED_SHORT_5_6_5"),
    (0x8368, "GL_UNSIGNED_INT_2_10_10_10_REV"),
    (0x8C3B, "GL_UNSIGNED_INT_10F_11F_11F_REV"),
    (0x8C3E, "GL_UNSIGNED_INT_5_9_9_9_REV"),
    (0x84FA, "GL_UNSIGNED_INT_24_8"),
    (0x8DAD, "GL_FLOAT_32_UNSIGNED_INT_24_8_REV"),
    // Formats
    (0x1901, "GL_STENCIL_INDEX"),
    (0x1902, "GL_DEPTH_COMPONENT"),
    (0x1903, "GL_RED"),
    (0x1906, "GL_ALPHA"),
    (0x1907, "GL_RGB"),
    (0x1908, "GL_RGBA"),
    (0x1909, "GL_LUMINANCE"),
    (0x190A, "GL_LUMINANCE_ALPHA"),
    (0x8227, "GL_RG"),
    (0x8228, "GL_RG_INTEGER"),
    (0x80E1, "GL_BGRA"),
    (0x84F9, "GL_DEPTH_STENCIL"),
    (0x8D94, "GL_RED_INTEGER"),
    (0x8D98, "GL_RGB_INTEGER"),
    (0x8D99, "GL_RGBA_INTEGER"),
    // Sized internal formats
    (0x8229, "GL_R8"),
    (0x822B, "GL_RG8"),
    (0x8051, "GL_RGB8"),
    (0x8058, "GL_RGBA8"),
    (0x8C41, "GL_SRGB8"),
    (0x8C43, "GL_SRGB8_ALPHA8"),
    (0x822D, "GL_R16F"),
    (0x822F, "GL_RG16F"),
    (0x881B, "GL_RGB16F"),
    (0x881A, "GL_RGBA16F"),
    (0x822E, "GL_R32F"),
    (0x8230, "GL_RG32F"),
    (0x8815, "GL_RGB32F"),
    (0x8814, "GL_RGBA32F"),
    (0x8D62, "GL_RGB565"),
    (0x8056, "GL_RGBA4"),
    (0x8057, "GL_RGB5_A1"),
    (0x8059, "GL_RGB10_A2"),
    (0x8C3A, "GL_R11F_G11F_B10F"),
    (0x8C3D, "GL_RGB9_E5"),
    (0x81A5, "GL_DEPTH_COMPONENT16"),
    (0x81A6, "GL_DEPTH_COMPONENT24"),
    (0x88F0, "GL_DEPTH24_STENCIL8"),
    // Compressed internal formats
    (0x83F0, "GL_COMPRESSED_RGB_S3TC_DXT1_EXT"),
    (0x83F1, "GL_COMPRESSED_RGBA_S3TC_DXT1_EXT"),
    (0x83F2, "GL_COMPRESSED_RGBA_S3TC_DXT3_EXT"),
    (0x83F3, "GL_COMPRESSED_RGBA_S3TC_DXT5_EXT"),
    (0x8C00, "GL_COMPRESSED_RGB_PVRTC_4BPPV1_IMG"),
    (0x8C01, "GL_COMPRESSED_RGB_PVRTC_2BPPV1_IMG"),
    (0x8C02, "GL_COMPRESSED_RGBA_PVRTC_4BPPV1_IMG"),
    (0x8C03, "GL_COMPRESSED_RGBA_PVRTC_2BPPV1_IMG"),
    (0x8D64, "GL_ETC1_RGB8_OES"),
    (0x8DBB, "GL_COMPRESSED_RED_RGTC1"),
    (0x8DBD, "GL_COMPRESSED_RG_RGTC2"),
    (0x8E8C, "GL_COMPRESSED_RGBA_BPTC_UNORM"),
    (0x9270, "GL_COMPRESSED_R11_EAC"),
    (0x9272, "GL_COMPRESSED_RG11_EAC"),
    (0x9274, "GL_COMPRESSED_RGB8_ETC2"),
    (0x9276, "GL_COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2"),
    (0x9278, "GL_COMPRESSED_RGBA8_ETC2_EAC"),
    (0x93B0, "GL_COMPRESSED_RGBA_ASTC_4x4_KHR"),
    // OES_compressed_paletted_texture
    (0x8B90, "GL_PALETTE4_RGB8_OES"),
    (0x8B91, "GL_PALETTE4_RGBA8_OES"),
    (0x8B92, "GL_PALETTE4_R5_G6_B5_OES"),
    (0x8B93, "GL_PALETTE4_RGBA4_OES"),
    (0x8B94, "GL_PALETTE4_RGB5_A1_OES"),
    (0x8B95, "GL_PALETTE8_RGB8_OES"),
    (0x8B96, "GL_PALETTE8_RGBA8_OES"),
    (0x8B97, "GL_PALETTE8_R5_G6_B5_OES"),
    (0x8B98, "GL_PALETTE8_RGBA4_OES"),
    (0x8B99, "GL_PALETTE8_RGB5_A1_OES"),
];

lazy_static::lazy_static! {
    static ref NAMES_BY_VALUE: HashMap<u32, &'static str> =
        GL_ENUMS.iter().map(|&(value, name)| (value, name)).collect();
    static ref VALUES_BY_NAME: HashMap<&'static str, u32> =
        GL_ENUMS.iter().map(|&(value, name)| (name, value)).collect();
}

/// The built-in GL enum table
#[derive(Debug, Clone, Copy, Default)]
pub struct GlEnumRegistry;

impl GlEnumRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Look up a known name without falling back to hex
    pub fn get_name(&self, value: u32) -> Option<&'static str> {
        NAMES_BY_VALUE.get(&value).copied()
    }
}

impl GlEnumNames for GlEnumRegistry {
    fn value_to_name(&self, value: u32) -> String {
        match self.get_name(value) {
            Some(name) => name.to_string(),
            None => format!("0x{:04X}", value),
        }
    }

    fn name_to_value(&self, name: &str) -> Result<u32> {
        if let Some(value) = VALUES_BY_NAME.get(name.trim()) {
            return Ok(*value);
        }
        parse_uint(name).map_err(|_| KtxError::UnknownGlEnum {
            name: name.to_string(),
        })
    }
}

/// Parse an unsigned integer literal with an optional base prefix
///
/// Accepts `0x`/`0X` (hex), `0o`/`0O` (octal), `0b`/`0B` (binary) and plain
/// decimal, with `_` digit separators.
pub fn parse_uint(literal: &str) -> Result<u32> {
    let trimmed = literal.trim();
    let (digits, radix) = match trimmed.get(..2) {
        Some("0x") | Some("0X") => (&trimmed[2..], 16),
        Some("0o") | Some("0O") => (&trimmed[2..], 8),
        Some("0b") | Some("0B") => (&trimmed[2..], 2),
        _ => (trimmed, 10),
    };
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() || digits.starts_with('+') || digits.starts_with('-') {
        return Err(KtxError::parse(format!("Invalid integer literal: {literal}")));
    }
    u32::from_str_radix(&digits, radix)
        .map_err(|e| KtxError::parse(format!("Invalid integer literal {literal}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        let registry = GlEnumRegistry::new();
        assert_eq!(registry.value_to_name(0x1401), "GL_UNSIGNED_BYTE");
        assert_eq!(registry.value_to_name(0x8058), "GL_RGBA8");
        assert_eq!(registry.name_to_value("GL_RGBA").unwrap(), 0x1908);
    }

    #[test]
    fn test_unknown_value_falls_back_to_hex() {
        let registry = GlEnumRegistry::new();
        let name = registry.value_to_name(0xBEEF);
        assert_eq!(name, "0xBEEF");
        assert_eq!(registry.name_to_value(&name).unwrap(), 0xBEEF);
        assert_eq!(registry.value_to_name(0x12), "0x0012");
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let registry = GlEnumRegistry::new();
        assert!(matches!(
            registry.name_to_value("GL_NOT_A_THING"),
            Err(KtxError::UnknownGlEnum { .. })
        ));
    }

    #[test]
    fn test_table_is_unambiguous() {
        let registry = GlEnumRegistry::new();
        for &(value, name) in GL_ENUMS {
            assert_eq!(registry.value_to_name(value), name);
            assert_eq!(registry.name_to_value(name).unwrap(), value);
        }
    }

    #[test]
    fn test_parse_uint() {
        assert_eq!(parse_uint("0x04030201").unwrap(), 0x0403_0201);
        assert_eq!(parse_uint("0o17").unwrap(), 15);
        assert_eq!(parse_uint("0b101").unwrap(), 5);
        assert_eq!(parse_uint("1_000").unwrap(), 1000);
        assert_eq!(parse_uint(" 42 ").unwrap(), 42);
        assert!(parse_uint("").is_err());
        assert!(parse_uint("0x").is_err());
        assert!(parse_uint("-1").is_err());
        assert!(parse_uint("0x1_0000_0000").is_err());
    }
}
