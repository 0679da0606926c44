//! Device command model
//!
//! A [`Command`] is the unit that crosses the wire: built once, sent once.
//! The JSON wire representation lives in [`crate::encoder`]; this module is
//! only the typed model, so mocks and tests can match on commands without
//! touching serialization.

use super::Color;

/// Hard device protocol limit on frames per animation upload.
pub const MAX_ANIMATION_FRAMES: usize = 59;

/// A single device control command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the retained static frame with a full grid image.
    ///
    /// `data` is the row-major RGB byte stream of a `dimension x dimension`
    /// grid, 3 bytes per pixel.
    DrawStatic { dimension: u32, data: Vec<u8> },

    /// Clear animation state retained by the device from a previous stream.
    ///
    /// Must precede the first [`Command::AnimationFrame`] of every stream;
    /// device behavior is undefined otherwise.
    ResetAnimation,

    /// One frame of an animation upload.
    ///
    /// Offsets within a stream are contiguous `0..total`, every frame
    /// carrying the same `total` and `speed` (milliseconds per frame).
    AnimationFrame { total: u32, offset: u32, width: u32, speed: u32, data: Vec<u8> },

    /// A one-parameter device setting change.
    Setting(Setting),

    /// Device-rendered scrolling text overlay.
    ScrollingText(TextBanner),
}

impl Command {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Command::DrawStatic { .. } => "draw_static",
            Command::ResetAnimation => "reset_animation",
            Command::AnimationFrame { .. } => "animation_frame",
            Command::Setting(_) => "setting",
            Command::ScrollingText(_) => "scrolling_text",
        }
    }
}

/// Single-parameter device settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    /// Screen brightness, 0-100 percent.
    Brightness(u8),
    /// Display channel selector.
    Channel(u8),
    /// Clock face id.
    Face(u32),
    /// Audio visualizer position.
    Visualizer(u8),
    /// Clock id (same device register as `Face`).
    Clock(u32),
    /// Screen on/off.
    Screen(bool),
}

/// Scroll direction for [`TextBanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    pub(crate) fn wire_value(self) -> u8 {
        match self {
            ScrollDirection::Left => 0,
            ScrollDirection::Right => 1,
        }
    }
}

/// Parameters for a device-rendered scrolling text overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBanner {
    /// Text slot on the device; overlays with the same id replace each other.
    pub id: u8,
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub color: Color,
    /// Device-internal font index.
    pub font: u8,
    /// Width of the text area in pixels.
    pub width: u32,
    /// Scroll step interval in milliseconds.
    pub speed: u32,
    pub direction: ScrollDirection,
}
