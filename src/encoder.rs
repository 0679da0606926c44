//! Wire encoding for device commands
//!
//! Pure, deterministic translation of a [`Command`] into the JSON object the
//! device's `/post` endpoint expects. No I/O happens here; values outside
//! the documented protocol ranges are a caller contract violation, not a
//! runtime error this layer reports.

use base64::Engine as _;
use base64::prelude::BASE64_STANDARD;
use serde_json::{Value, json};

use crate::types::{Command, Setting};

/// Picture id used for all uploads. The device only needs it to vary when
/// interleaving independent uploads, which this crate never does.
const PIC_ID: u32 = 1;

/// Playback speed attached to static frames. The device requires the field
/// even for a single retained frame.
const STATIC_SPEED_MS: u32 = 1000;

/// Alignment value for text overlays (left).
const TEXT_ALIGN_LEFT: u8 = 1;

/// Build the exact JSON payload for a command.
pub fn encode(command: &Command) -> Value {
    match command {
        Command::DrawStatic { dimension, data } => json!({
            "Command": "Draw/SendHttpGif",
            "PicID": PIC_ID,
            "PicNum": 1,
            "PicOffset": 0,
            "PicWidth": dimension,
            "PicSpeed": STATIC_SPEED_MS,
            "PicData": BASE64_STANDARD.encode(data),
        }),
        Command::ResetAnimation => json!({
            "Command": "Draw/ResetHttpGifId",
        }),
        Command::AnimationFrame { total, offset, width, speed, data } => json!({
            "Command": "Draw/SendHttpGif",
            "PicID": PIC_ID,
            "PicNum": total,
            "PicOffset": offset,
            "PicWidth": width,
            "PicSpeed": speed,
            "PicData": BASE64_STANDARD.encode(data),
        }),
        Command::Setting(setting) => encode_setting(*setting),
        Command::ScrollingText(banner) => json!({
            "Command": "Draw/SendHttpText",
            "TextId": banner.id,
            "x": banner.x,
            "y": banner.y,
            "dir": banner.direction.wire_value(),
            "font": banner.font,
            "TextWidth": banner.width,
            "speed": banner.speed,
            "TextString": banner.text,
            "color": banner.color.to_hex(),
            "align": TEXT_ALIGN_LEFT,
        }),
    }
}

fn encode_setting(setting: Setting) -> Value {
    match setting {
        Setting::Brightness(percent) => json!({
            "Command": "Channel/SetBrightness",
            "Brightness": percent,
        }),
        Setting::Channel(index) => json!({
            "Command": "Channel/SetIndex",
            "SelectIndex": index,
        }),
        // Face and Clock address the same device register.
        Setting::Face(id) | Setting::Clock(id) => json!({
            "Command": "Channel/SetClockSelectId",
            "ClockId": id,
        }),
        Setting::Visualizer(position) => json!({
            "Command": "Channel/SetEqPosition",
            "EqPosition": position,
        }),
        Setting::Screen(on) => json!({
            "Command": "Channel/OnOffScreen",
            "OnOff": if on { 1 } else { 0 },
        }),
    }
}
