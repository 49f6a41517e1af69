//! PNG color types and the bit depths each one permits.

use crate::error::PngError;

/// One of the five color representations PNG defines.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColorType {
    Greyscale,
    Truecolor,
    Indexed,
    GreyscaleAlpha,
    TruecolorAlpha,
}

impl ColorType {
    /// The numeric id PNG's IHDR chunk stores for this color type.
    pub const fn id(self) -> u8 {
        match self {
            Self::Greyscale => 0,
            Self::Truecolor => 2,
            Self::Indexed => 3,
            Self::GreyscaleAlpha => 4,
            Self::TruecolorAlpha => 6,
        }
    }

    pub fn from_id(id: u8) -> Result<Self, PngError> {
        match id {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::Indexed),
            4 => Ok(Self::GreyscaleAlpha),
            6 => Ok(Self::TruecolorAlpha),
            _ => Err(PngError::InvalidColorConfig("unknown color type id")),
        }
    }

    /// Number of components one pixel of this color type carries.
    pub const fn components(self) -> u8 {
        match self {
            Self::Greyscale => 1,
            Self::Truecolor => 3,
            Self::Indexed => 1,
            Self::GreyscaleAlpha => 2,
            Self::TruecolorAlpha => 4,
        }
    }

    /// Bit depths PNG allows this color type to use.
    pub const fn allowed_depths(self) -> &'static [u8] {
        match self {
            Self::Greyscale => &[1, 2, 4, 8, 16],
            Self::Truecolor => &[8, 16],
            Self::Indexed => &[1, 2, 4, 8],
            Self::GreyscaleAlpha => &[8, 16],
            Self::TruecolorAlpha => &[8, 16],
        }
    }

    pub fn validate_depth(self, depth: u8) -> Result<(), PngError> {
        if self.allowed_depths().contains(&depth) {
            Ok(())
        } else {
            Err(PngError::InvalidColorConfig(
                "bit depth not permitted for this color type",
            ))
        }
    }

    /// Smallest indexed bit depth that can address `palette_size` entries.
    pub fn indexed_depth_for(palette_size: usize) -> u8 {
        match palette_size {
            0..=2 => 1,
            3..=4 => 2,
            5..=16 => 4,
            _ => 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trips() {
        for ct in [
            ColorType::Greyscale,
            ColorType::Truecolor,
            ColorType::Indexed,
            ColorType::GreyscaleAlpha,
            ColorType::TruecolorAlpha,
        ] {
            assert_eq!(ColorType::from_id(ct.id()).unwrap(), ct);
        }
    }

    #[test]
    fn unknown_id_is_error() {
        assert!(ColorType::from_id(1).is_err());
        assert!(ColorType::from_id(5).is_err());
    }

    #[test]
    fn indexed_depth_buckets() {
        assert_eq!(ColorType::indexed_depth_for(1), 1);
        assert_eq!(ColorType::indexed_depth_for(2), 1);
        assert_eq!(ColorType::indexed_depth_for(3), 2);
        assert_eq!(ColorType::indexed_depth_for(16), 4);
        assert_eq!(ColorType::indexed_depth_for(17), 8);
        assert_eq!(ColorType::indexed_depth_for(256), 8);
    }
}
