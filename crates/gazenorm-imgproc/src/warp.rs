use glam::{Mat3, Vec3};

use crate::{
    interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode},
    parallel,
};

use gazenorm_image::{Image, ImageError};

/// Apply a 3x3 projective transform to a pixel position.
fn transform_point(x: f32, y: f32, m: &Mat3) -> (f32, f32) {
    let p = *m * Vec3::new(x, y, 1.0);
    (p.x / p.z, p.y / p.z)
}

/// Applies a perspective transformation to an image.
///
/// The output is computed by backward mapping: every destination pixel is
/// sampled from the source image at the position the inverse transform maps
/// it to. Destination pixels falling outside the source keep the value `dst`
/// was prefilled with.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, C).
/// * `dst` - The output image with shape (height, width, C).
/// * `m` - The 3x3 perspective transformation matrix mapping src to dst.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if the transform matrix is not invertible.
///
/// # Example
///
/// ```
/// use glam::Mat3;
/// use gazenorm_image::{Image, ImageSize};
/// use gazenorm_imgproc::interpolation::InterpolationMode;
/// use gazenorm_imgproc::warp::warp_perspective;
///
/// let src = Image::<f32, 1>::new(
///   ImageSize {
///     width: 4,
///     height: 5,
///   },
///   vec![0.0f32; 4 * 5]
/// ).unwrap();
///
/// let mut dst = Image::<f32, 1>::from_size_val(
///   ImageSize {
///     width: 2,
///     height: 3,
///   },
///   0.0
/// ).unwrap();
///
/// warp_perspective(&src, &mut dst, &Mat3::IDENTITY, InterpolationMode::Bilinear).unwrap();
///
/// assert_eq!(dst.size().width, 2);
/// assert_eq!(dst.size().height, 3);
/// ```
pub fn warp_perspective<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    m: &Mat3,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if m.determinant() == 0.0 {
        return Err(ImageError::CannotComputeDeterminant);
    }
    let inv_m = m.inverse();

    // find for each dst pixel the corresponding src position
    let (map_x, map_y) = meshgrid_from_fn(dst.size(), |x, y| transform_point(x, y, &inv_m))?;

    let (src_cols, src_rows) = (src.cols() as f32, src.rows() as f32);

    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |&x, &y, dst_pixel| {
        if x >= 0.0 && x < src_cols && y >= 0.0 && y < src_rows {
            dst_pixel
                .iter_mut()
                .enumerate()
                .for_each(|(k, pixel)| *pixel = interpolate_pixel(src, x, y, k, interpolation));
        }
    });

    Ok(())
}
