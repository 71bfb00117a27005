use crate::histogram::compute_histogram;
use crate::parallel;
use gazenorm_image::{Image, ImageError};

/// Equalize the histogram of an 8-bit grayscale image.
///
/// Redistributes the pixel intensities so that their cumulative distribution
/// becomes approximately linear, which stretches the image contrast. The
/// remapping follows the classic formula
///
/// `lut[v] = round((cdf[v] - cdf_min) / (n - cdf_min) * 255)`
///
/// where `cdf_min` is the cumulative count of the lowest occupied intensity
/// and `n` the total number of pixels. A constant image is returned unchanged.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use gazenorm_image::{Image, ImageSize};
/// use gazenorm_imgproc::enhance::equalize_hist;
///
/// let image = Image::<u8, 1>::new(
///   ImageSize {
///     width: 2,
///     height: 2,
///   },
///   vec![100, 100, 200, 200],
/// ).unwrap();
///
/// let mut equalized = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// equalize_hist(&image, &mut equalized).unwrap();
/// assert_eq!(equalized.as_slice(), &[0, 0, 255, 255]);
/// ```
pub fn equalize_hist(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let num_pixels = src.as_slice().len();
    if num_pixels == 0 {
        return Ok(());
    }

    let mut hist = vec![0usize; 256];
    compute_histogram(src, &mut hist, 256)?;

    let mut cdf = [0usize; 256];
    let mut cumsum = 0;
    for (bin, count) in hist.iter().enumerate() {
        cumsum += count;
        cdf[bin] = cumsum;
    }

    let cdf_min = cdf
        .iter()
        .copied()
        .find(|&c| c > 0)
        .unwrap_or(0);

    if cdf_min == num_pixels {
        // constant image, nothing to equalize
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let scale = 255.0 / (num_pixels - cdf_min) as f32;
    let mut lut = [0u8; 256];
    for (bin, entry) in lut.iter_mut().enumerate() {
        let shifted = cdf[bin].saturating_sub(cdf_min);
        *entry = (shifted as f32 * scale).round() as u8;
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = lut[src_pixel[0] as usize];
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use gazenorm_image::{Image, ImageError, ImageSize};

    #[test]
    fn equalize_constant_image() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            42,
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        super::equalize_hist(&src, &mut dst)?;

        assert_eq!(dst.as_slice(), src.as_slice());

        Ok(())
    }

    #[test]
    fn equalize_two_levels() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![100, 100, 200, 200],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        super::equalize_hist(&src, &mut dst)?;

        // cdf_min = 2, n = 4: the low level maps to 0, the high one to 255
        assert_eq!(dst.as_slice(), &[0, 0, 255, 255]);

        Ok(())
    }

    #[test]
    fn equalize_spreads_range() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![10, 11, 12, 13],
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;

        super::equalize_hist(&src, &mut dst)?;

        // four equally likely levels map to 0, 85, 170, 255
        assert_eq!(dst.as_slice(), &[0, 85, 170, 255]);

        Ok(())
    }
}
