use glam::{Mat3, Vec2, Vec3};
use log::debug;

use gazenorm_image::{Image, ImageError};
use gazenorm_imgproc::color::gray_from_rgb;
use gazenorm_imgproc::enhance::equalize_hist;
use gazenorm_imgproc::interpolation::InterpolationMode;
use gazenorm_imgproc::warp::warp_perspective;

use crate::camera::Camera;
use crate::error::NormalizeError;
use crate::face::{FacePartKind, FaceRegion, NormalizedImage, NormalizedRegion};

/// Projects detected face regions into a canonical, pose-rectified view.
///
/// The normalizer maps the image content around a region into the frame of a
/// virtual camera placed at a fixed distance and looking straight at the
/// region center. This removes the apparent rotation and scale induced by
/// head pose and subject placement, so a downstream gaze regressor sees a
/// consistent input distribution.
///
/// The configuration is immutable; one instance may be shared freely across
/// threads.
///
/// # Examples
///
/// ```
/// use glam::{Mat3, Vec3};
/// use gazenorm::{Camera, FacePartKind, FaceRegion, HeadPoseNormalizer};
/// use gazenorm_image::{Image, ImageSize};
///
/// let camera = Camera::from_params(1000.0, 1000.0, 320.0, 240.0, ImageSize {
///     width: 640,
///     height: 480,
/// });
/// let normalized_camera = Camera::from_params(960.0, 960.0, 112.0, 56.0, ImageSize {
///     width: 224,
///     height: 112,
/// });
///
/// let normalizer = HeadPoseNormalizer::new(camera, normalized_camera, 600.0).unwrap();
///
/// let image = Image::<u8, 3>::from_size_val(camera.size, 128).unwrap();
/// let region = FaceRegion {
///     kind: FacePartKind::Face,
///     center: Vec3::new(0.0, 0.0, 500.0),
///     head_rotation: Mat3::IDENTITY,
///     distance: 500.0,
/// };
///
/// let normalized = normalizer.normalize(&image, &region).unwrap();
/// assert_eq!(normalized.image.num_channels(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeadPoseNormalizer {
    camera: Camera,
    normalized_camera: Camera,
    normalized_distance: f32,
    camera_matrix_inv: Mat3,
}

impl HeadPoseNormalizer {
    /// Create a new normalizer.
    ///
    /// # Arguments
    ///
    /// * `camera` - The camera that produced the input images.
    /// * `normalized_camera` - The virtual camera all regions are projected into.
    /// * `normalized_distance` - The distance at which the virtual camera
    ///   observes the subject, in the same units as [`FaceRegion::distance`].
    ///
    /// # Errors
    ///
    /// Returns an error if the normalized distance is not positive or the
    /// source intrinsic matrix is singular.
    pub fn new(
        camera: Camera,
        normalized_camera: Camera,
        normalized_distance: f32,
    ) -> Result<Self, NormalizeError> {
        if normalized_distance <= 0.0 {
            return Err(NormalizeError::NonPositiveNormalizedDistance(
                normalized_distance,
            ));
        }

        if camera.matrix.determinant().abs() <= f32::EPSILON {
            return Err(NormalizeError::SingularIntrinsics);
        }

        Ok(Self {
            camera,
            normalized_camera,
            normalized_distance,
            camera_matrix_inv: camera.matrix.inverse(),
        })
    }

    /// Normalize one face region.
    ///
    /// Produces the normalizing rotation, the pose-rectified crop from the
    /// virtual camera viewpoint and the residual head-pose angles. Eye
    /// regions are converted to grayscale and histogram equalized, the whole
    /// face keeps its color channels.
    ///
    /// This is a deterministic, pure function of its inputs; nothing is
    /// produced on failure.
    ///
    /// # Arguments
    ///
    /// * `image` - The source frame, sized as declared by the source camera.
    /// * `region` - The region to normalize, with `center`, `head_rotation`
    ///   and `distance` populated by the upstream detector.
    pub fn normalize(
        &self,
        image: &Image<u8, 3>,
        region: &FaceRegion,
    ) -> Result<NormalizedRegion, NormalizeError> {
        if region.distance <= 0.0 {
            return Err(NormalizeError::NonPositiveDistance(region.distance));
        }

        if image.size() != self.camera.size {
            return Err(NormalizeError::Image(ImageError::InvalidImageSize(
                image.cols(),
                image.rows(),
                self.camera.size.width,
                self.camera.size.height,
            )));
        }

        let rotation = compute_normalizing_rotation(region.center, &region.head_rotation)?;

        let scale = self.scale_matrix(region.distance);
        let transform = self.normalized_camera.matrix * (scale * rotation) * self.camera_matrix_inv;

        debug!(
            "normalizing {:?} region at distance {} (scale {})",
            region.kind,
            region.distance,
            self.normalized_distance / region.distance
        );

        let image = self.warp_region(image, &transform, region.kind)?;
        let head_angles = normalized_head_angles(&region.head_rotation, &rotation);

        Ok(NormalizedRegion {
            rotation,
            image,
            head_angles,
        })
    }

    /// The diagonal matrix that rescales the depth axis so a region observed
    /// at `distance` appears at the configured normalized distance.
    fn scale_matrix(&self, distance: f32) -> Mat3 {
        Mat3::from_diagonal(Vec3::new(1.0, 1.0, self.normalized_distance / distance))
    }

    fn warp_region(
        &self,
        image: &Image<u8, 3>,
        transform: &Mat3,
        kind: FacePartKind,
    ) -> Result<NormalizedImage, NormalizeError> {
        let src = image.cast::<f32>()?;
        let mut warped = Image::<f32, 3>::from_size_val(self.normalized_camera.size, 0.0)?;
        warp_perspective(&src, &mut warped, transform, InterpolationMode::Bilinear)?;

        if kind.is_eye() {
            let mut gray = Image::<f32, 1>::from_size_val(warped.size(), 0.0)?;
            gray_from_rgb(&warped, &mut gray)?;

            let gray = gray.to_u8();
            let mut equalized = Image::<u8, 1>::from_size_val(gray.size(), 0)?;
            equalize_hist(&gray, &mut equalized)?;

            Ok(NormalizedImage::Gray(equalized))
        } else {
            Ok(NormalizedImage::Rgb(warped.to_u8()))
        }
    }
}

/// Compute the rotation that re-expresses camera-space coordinates in a frame
/// whose z axis points at the region center and whose x axis follows the
/// head's own rightward direction as closely as possible.
///
/// The matrix rows are the (x, y, z) basis vectors of the normalized frame.
fn compute_normalizing_rotation(
    center: Vec3,
    head_rotation: &Mat3,
) -> Result<Mat3, NormalizeError> {
    let z_axis = center
        .try_normalize()
        .ok_or(NormalizeError::DegenerateCenter)?;

    // the head's local "right" direction in camera space
    let head_x_axis = head_rotation.x_axis;

    let y_axis = z_axis
        .cross(head_x_axis)
        .try_normalize()
        .ok_or(NormalizeError::DegenerateHeadAxis)?;
    let x_axis = y_axis.cross(z_axis).normalize();

    Ok(Mat3::from_cols(x_axis, y_axis, z_axis).transpose())
}

/// The residual head-pose angles after normalization.
///
/// Applies the normalizing rotation after the head rotation and extracts the
/// first two intrinsic X-Y-Z Euler angles. The roll component vanishes by
/// construction of the normalized basis. The yaw sign is flipped to match the
/// normalized camera's handedness convention.
fn normalized_head_angles(head_rotation: &Mat3, normalizing_rotation: &Mat3) -> Vec2 {
    let residual = *normalizing_rotation * *head_rotation;
    let (pitch, yaw, _roll) = euler_xyz(&residual);
    Vec2::new(pitch, -yaw)
}

/// Decompose a rotation matrix into intrinsic X-Y-Z Euler angles, so that
/// `m == Rx(a) * Ry(b) * Rz(c)`.
fn euler_xyz(m: &Mat3) -> (f32, f32, f32) {
    // glam matrices are column-major: m.col(j)[i] is the (i, j) element
    let b = m.z_axis.x.clamp(-1.0, 1.0).asin();
    let a = (-m.z_axis.y).atan2(m.z_axis.z);
    let c = (-m.y_axis.x).atan2(m.x_axis.x);
    (a, b, c)
}
