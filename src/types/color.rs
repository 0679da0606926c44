//! RGB color triple

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color.
///
/// Channel range validation collapses into the type: a `Color` cannot hold
/// an out-of-range channel, so boundary layers only need to reject values
/// that do not fit in a `u8` before constructing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// `#rrggbb` form used by the device's text commands.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color { r, g, b }
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(px: image::Rgb<u8>) -> Self {
        Color { r: px.0[0], g: px.0[1], b: px.0[2] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn hex_form_is_lowercase_and_seven_chars(r: u8, g: u8, b: u8) {
            let hex = Color::new(r, g, b).to_hex();
            prop_assert_eq!(hex.len(), 7);
            prop_assert!(hex.starts_with('#'));
            prop_assert_eq!(hex, format!("#{r:02x}{g:02x}{b:02x}"));
        }
    }

    #[test]
    fn default_is_black() {
        assert_eq!(Color::default(), Color::BLACK);
        assert_eq!(Color::WHITE.to_hex(), "#ffffff");
    }
}
