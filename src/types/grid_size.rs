//! Supported panel grid sizes

use serde::{Deserialize, Serialize};

/// Native pixel grid sizes supported by the device family.
///
/// The panels are square; a `GridSize` is the side length in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridSize {
    Size16,
    Size32,
    Size64,
}

impl GridSize {
    /// All native sizes, smallest first.
    pub const ALL: [GridSize; 3] = [GridSize::Size16, GridSize::Size32, GridSize::Size64];

    /// Side length in pixels.
    pub fn pixels(self) -> u32 {
        match self {
            GridSize::Size16 => 16,
            GridSize::Size32 => 32,
            GridSize::Size64 => 64,
        }
    }

    /// Map a raw side length back to a native size, if it is one.
    pub fn from_pixels(pixels: u32) -> Option<Self> {
        match pixels {
            16 => Some(GridSize::Size16),
            32 => Some(GridSize::Size32),
            64 => Some(GridSize::Size64),
            _ => None,
        }
    }

    /// Whether `width x height` is already one of the native square sizes.
    pub fn is_native(width: u32, height: u32) -> bool {
        width == height && Self::from_pixels(width).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_round_trip() {
        for size in GridSize::ALL {
            assert_eq!(GridSize::from_pixels(size.pixels()), Some(size));
        }
        assert_eq!(GridSize::from_pixels(48), None);
        assert_eq!(GridSize::from_pixels(0), None);
    }

    #[test]
    fn native_requires_square() {
        assert!(GridSize::is_native(64, 64));
        assert!(GridSize::is_native(16, 16));
        assert!(!GridSize::is_native(64, 32));
        assert!(!GridSize::is_native(48, 48));
    }
}
