#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image error types.
pub mod error;

/// image representation module.
pub mod image;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
