//! Animation decoding and frame streaming
//!
//! Turns raw image bytes into the device's frame-upload sequence. The
//! device retains animation state between uploads, so every multi-frame
//! stream starts with a reset, then sends frames strictly in order with
//! contiguous zero-based offsets. The protocol caps an upload at
//! [`MAX_ANIMATION_FRAMES`] frames; anything beyond the cap is silently
//! dropped, never reordered or sampled from the middle.
//!
//! Static input (non-GIF bytes, or a GIF with a single frame) takes a
//! different path entirely: one static draw command, no reset.

use std::io::Cursor;
use std::ops::Range;

use image::codecs::gif::GifDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, DynamicImage, Frame, ImageFormat, RgbImage, RgbaImage};
use tracing::{debug, info};

use crate::transport::Transport;
use crate::types::{Command, GridSize, MAX_ANIMATION_FRAMES};
use crate::{PanelError, Result};

/// Decode `bytes` and send them to the device, either as an animation
/// stream or as a single static frame.
///
/// The caller holds the device wire lock for the duration; see
/// [`crate::session::Device::play_animation`].
pub(crate) async fn stream(
    transport: &dyn Transport,
    target: GridSize,
    bytes: &[u8],
    speed: u32,
    skip_first: bool,
) -> Result<()> {
    let format = image::guess_format(bytes)?;

    if format == ImageFormat::Gif {
        let decoder = GifDecoder::new(Cursor::new(bytes))?;
        let frames = decoder.into_frames().collect_frames()?;

        if frames.len() > 1 {
            return stream_frames(transport, target, frames, speed, skip_first).await;
        }

        let Some(frame) = frames.into_iter().next() else {
            return Err(PanelError::decode("GIF contains no frames"));
        };
        return send_static(transport, normalize(frame.into_buffer(), target)).await;
    }

    let img = image::load_from_memory(bytes)?;
    send_static(transport, normalize(img.to_rgba8(), target)).await
}

/// The bounded, ordered subset of source frames actually transmitted.
pub(crate) fn select_window(frame_count: usize, skip_first: bool) -> Range<usize> {
    let start = usize::from(skip_first).min(frame_count);
    let end = (start + MAX_ANIMATION_FRAMES).min(frame_count);
    start..end
}

/// Bring a decoded frame to a transmittable form: native square sizes pass
/// through untouched, anything else is resized to `target`; alpha is
/// dropped either way.
pub(crate) fn normalize(frame: RgbaImage, target: GridSize) -> RgbImage {
    let (width, height) = frame.dimensions();
    let rgba = if GridSize::is_native(width, height) {
        frame
    } else {
        image::imageops::resize(&frame, target.pixels(), target.pixels(), FilterType::Nearest)
    };
    DynamicImage::ImageRgba8(rgba).to_rgb8()
}

async fn stream_frames(
    transport: &dyn Transport,
    target: GridSize,
    frames: Vec<Frame>,
    speed: u32,
    skip_first: bool,
) -> Result<()> {
    // Reset must precede the first frame; the device's behavior with a
    // stale animation id is undefined.
    transport.send(&Command::ResetAnimation).await?;

    let window = select_window(frames.len(), skip_first);
    debug!(
        source_frames = frames.len(),
        skip_first,
        selected = window.len(),
        "Selected animation window"
    );

    let selected: Vec<RgbImage> = frames
        .into_iter()
        .skip(window.start)
        .take(window.len())
        .map(|frame| normalize(frame.into_buffer(), target))
        .collect();

    let total = selected.len() as u32;
    if total == 0 {
        debug!("Empty frame window, nothing to stream");
        return Ok(());
    }

    for (offset, frame) in selected.into_iter().enumerate() {
        let width = frame.width();
        transport
            .send(&Command::AnimationFrame {
                total,
                offset: offset as u32,
                width,
                speed,
                data: frame.into_raw(),
            })
            .await?;
    }

    info!(frames = total, speed, "Animation streamed");
    Ok(())
}

async fn send_static(transport: &dyn Transport, frame: RgbImage) -> Result<()> {
    debug!(width = frame.width(), "Sending static frame");
    let command = Command::DrawStatic { dimension: frame.width(), data: frame.into_raw() };
    transport.send(&command).await?;
    Ok(())
}
