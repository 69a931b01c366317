//! idlut Core — grayscale lookup tables for image display.
//!
//! This crate builds, narrows, and validates 256-entry intensity LUTs and
//! applies them to 8-bit grayscale images. No I/O beyond image load/save.

pub mod error;
pub mod image;
pub mod lut;
pub mod params;
pub mod window;

// Re-exports for convenience.
pub use error::LutError;
pub use crate::image::GrayImage;
pub use lut::{ByteLut, LUT_SIZE, Lut, check_is_8bit, compute_linear, to_byte_lut};
pub use params::{NarrowingPolicy, WindowParams};
pub use window::{auto_window, histogram};
