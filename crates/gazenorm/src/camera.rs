use glam::{Mat3, Vec3};

use gazenorm_image::ImageSize;

/// A pinhole camera descriptor.
///
/// Holds the 3x3 intrinsic matrix and the pixel size of the associated frame.
/// Two instances take part in a normalization run: the source camera that
/// produced the input image and the virtual normalized camera that all
/// regions are projected into.
///
/// # Examples
///
/// ```
/// use gazenorm::Camera;
/// use gazenorm_image::ImageSize;
///
/// let camera = Camera::from_params(
///     960.0,
///     960.0,
///     112.0,
///     56.0,
///     ImageSize {
///         width: 224,
///         height: 112,
///     },
/// );
///
/// assert_eq!(camera.matrix.x_axis.x, 960.0);
/// assert_eq!(camera.size.width, 224);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The 3x3 intrinsic matrix of the camera.
    pub matrix: Mat3,
    /// The pixel size of the camera frame.
    pub size: ImageSize,
}

impl Camera {
    /// Create a new camera from an intrinsic matrix and a frame size.
    pub fn new(matrix: Mat3, size: ImageSize) -> Self {
        Self { matrix, size }
    }

    /// Create a new camera from pinhole parameters.
    ///
    /// # Arguments
    ///
    /// * `fx` - The focal length in the x direction.
    /// * `fy` - The focal length in the y direction.
    /// * `cx` - The x coordinate of the principal point.
    /// * `cy` - The y coordinate of the principal point.
    /// * `size` - The pixel size of the camera frame.
    pub fn from_params(fx: f32, fy: f32, cx: f32, cy: f32, size: ImageSize) -> Self {
        let matrix = Mat3::from_cols(
            Vec3::new(fx, 0.0, 0.0),
            Vec3::new(0.0, fy, 0.0),
            Vec3::new(cx, cy, 1.0),
        );
        Self { matrix, size }
    }
}

#[cfg(test)]
mod tests {
    use super::Camera;
    use gazenorm_image::ImageSize;
    use glam::Vec3;

    #[test]
    fn from_params_layout() {
        let camera = Camera::from_params(
            1000.0,
            1100.0,
            320.0,
            240.0,
            ImageSize {
                width: 640,
                height: 480,
            },
        );

        // projecting a point on the optical axis lands on the principal point
        let p = camera.matrix * Vec3::new(0.0, 0.0, 1.0);
        assert_eq!(p, Vec3::new(320.0, 240.0, 1.0));

        let p = camera.matrix * Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(p, Vec3::new(1320.0, 1340.0, 1.0));
    }
}
