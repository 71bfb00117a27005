use glam::{Mat3, Vec2, Vec3};

use gazenorm_image::{Image, ImageSize};

/// The facial part a region refers to.
///
/// The part decides the color policy of the normalized crop: eye regions are
/// converted to grayscale and contrast equalized, the whole face keeps its
/// color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacePartKind {
    /// The whole face.
    Face,
    /// The left eye.
    LeftEye,
    /// The right eye.
    RightEye,
}

impl FacePartKind {
    /// Whether this part is one of the two eyes.
    pub fn is_eye(&self) -> bool {
        matches!(self, FacePartKind::LeftEye | FacePartKind::RightEye)
    }
}

/// One facial region as detected by an upstream landmark/pose estimator.
///
/// All quantities are expressed in the source camera coordinate frame and
/// carry the same physical units as the configured normalized distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRegion {
    /// The facial part this region refers to.
    pub kind: FacePartKind,
    /// The 3D reference point of the region in camera space.
    pub center: Vec3,
    /// The head pose as a rotation from the head model frame to camera space.
    pub head_rotation: Mat3,
    /// The distance from the camera to the region center, must be positive.
    pub distance: f32,
}

/// The pixel content of a normalized crop.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedImage {
    /// Grayscale, histogram equalized crop of an eye region.
    Gray(Image<u8, 1>),
    /// Color crop of a whole-face region.
    Rgb(Image<u8, 3>),
}

impl NormalizedImage {
    /// The pixel size of the crop.
    pub fn size(&self) -> ImageSize {
        match self {
            NormalizedImage::Gray(image) => image.size(),
            NormalizedImage::Rgb(image) => image.size(),
        }
    }

    /// The number of channels of the crop.
    pub fn num_channels(&self) -> usize {
        match self {
            NormalizedImage::Gray(_) => 1,
            NormalizedImage::Rgb(_) => 3,
        }
    }
}

/// The result of normalizing one face region.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRegion {
    /// The rotation that maps camera-space coordinates into the normalized frame.
    pub rotation: Mat3,
    /// The pose-rectified crop as seen from the virtual normalized camera.
    pub image: NormalizedImage,
    /// The residual head-pose angles (pitch, yaw) in radians.
    pub head_angles: Vec2,
}

#[cfg(test)]
mod tests {
    use super::FacePartKind;

    #[test]
    fn eye_kinds() {
        assert!(FacePartKind::LeftEye.is_eye());
        assert!(FacePartKind::RightEye.is_eye());
        assert!(!FacePartKind::Face.is_eye());
    }
}
