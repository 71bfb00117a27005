#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Gazenorm
//!
//! This crate computes a head-pose-normalized view of a detected eye or face
//! region: a canonical crop as seen from a virtual camera at a fixed
//! distance, together with the residual head-pose angles after
//! normalization. Appearance-based gaze estimators consume these crops so
//! that head pose and subject placement no longer leak into the input
//! distribution.
//!
//! ## Example
//!
//! ```
//! use glam::{Mat3, Vec3};
//! use gazenorm::{Camera, FacePartKind, FaceRegion, HeadPoseNormalizer, NormalizedImage};
//! use gazenorm_image::{Image, ImageSize};
//!
//! let camera = Camera::from_params(1000.0, 1000.0, 320.0, 240.0, ImageSize {
//!     width: 640,
//!     height: 480,
//! });
//! let normalized_camera = Camera::from_params(960.0, 960.0, 30.0, 18.0, ImageSize {
//!     width: 60,
//!     height: 36,
//! });
//! let normalizer = HeadPoseNormalizer::new(camera, normalized_camera, 600.0).unwrap();
//!
//! let frame = Image::<u8, 3>::from_size_val(camera.size, 128).unwrap();
//! let region = FaceRegion {
//!     kind: FacePartKind::LeftEye,
//!     center: Vec3::new(30.0, -20.0, 550.0),
//!     head_rotation: Mat3::IDENTITY,
//!     distance: 551.2,
//! };
//!
//! let normalized = normalizer.normalize(&frame, &region).unwrap();
//! assert!(matches!(normalized.image, NormalizedImage::Gray(_)));
//! ```

/// camera descriptor module.
pub mod camera;

/// error types of the normalization pipeline.
pub mod error;

/// face region data model.
pub mod face;

/// the head-pose normalizer component.
pub mod normalizer;

pub use crate::camera::Camera;
pub use crate::error::NormalizeError;
pub use crate::face::{FacePartKind, FaceRegion, NormalizedImage, NormalizedRegion};
pub use crate::normalizer::HeadPoseNormalizer;
