//! Core domain types

mod color;
mod command;
mod grid_size;

pub use color::Color;
pub use command::{Command, MAX_ANIMATION_FRAMES, ScrollDirection, Setting, TextBanner};
pub use grid_size::GridSize;
