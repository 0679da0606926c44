//! Async Rust client for Wi-Fi LED pixel-matrix displays (Divoom Pixoo family).
//!
//! Lumatrix turns a networked LED panel into a set of drawing primitives and
//! animation playback, speaking the device's stateful HTTP control protocol
//! for you.
//!
//! # Features
//!
//! - **Verified sessions**: startup reachability probing with a bounded
//!   retry budget before any command is sent
//! - **Local framebuffer**: pixels, lines, rectangles, text and image blits
//!   accumulate in memory until an explicit push
//! - **Animation streaming**: GIF decoding, frame windowing and ordered
//!   frame uploads within the device's protocol limits
//! - **Mockable wire**: the transport is a trait, with a recording mock for
//!   tests
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lumatrix::{Color, Device, GridSize};
//!
//! #[tokio::main]
//! async fn main() -> lumatrix::Result<()> {
//!     let device = Device::open("pixoo64.local", GridSize::Size64, 3).await?;
//!
//!     {
//!         let mut fb = device.framebuffer().await;
//!         fb.fill(Color::BLACK);
//!         fb.draw_text("hello", 2, 2, Color::WHITE);
//!         fb.draw_rectangle(0, 0, 63, 63, Color::new(255, 0, 0));
//!     }
//!     device.push().await?;
//!
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod types;

// Device protocol
pub mod encoder;
pub mod transport;

// Drawing and playback
mod animation;
mod font;
pub mod framebuffer;
pub mod session;

// Core exports
pub use error::{PanelError, Result};
pub use types::*;

pub use framebuffer::Framebuffer;
pub use session::{Device, DeviceSession};
pub use transport::{HttpTransport, MockTransport, Transport};
