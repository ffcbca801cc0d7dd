//! KTX binary codec options

/// Options shared by the binary decoder and encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryOptions {
    /// Pad metadata entries and images to 4-byte boundaries
    pub aligned: bool,
}

impl Default for BinaryOptions {
    fn default() -> Self {
        Self { aligned: true }
    }
}

impl BinaryOptions {
    /// Options for the standard, padded layout
    pub fn aligned() -> Self {
        Self { aligned: true }
    }

    /// Options for the legacy layout without any padding
    pub fn unaligned() -> Self {
        Self { aligned: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(BinaryOptions::default().aligned);
        assert_eq!(BinaryOptions::default(), BinaryOptions::aligned());
        assert!(!BinaryOptions::unaligned().aligned);
    }
}
