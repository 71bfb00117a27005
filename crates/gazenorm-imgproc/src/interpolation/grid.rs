use gazenorm_image::{Image, ImageError, ImageSize};

/// Create a pair of coordinate maps by evaluating a function at every grid position.
///
/// # Arguments
///
/// * `size` - The size of the grid.
/// * `f` - A function mapping a grid position (x, y) to a sampling coordinate.
///
/// # Returns
///
/// Two single-channel images of shape `size` containing the x and y coordinates.
pub(crate) fn meshgrid_from_fn(
    size: ImageSize,
    f: impl Fn(f32, f32) -> (f32, f32),
) -> Result<(Image<f32, 1>, Image<f32, 1>), ImageError> {
    let mut map_x = Vec::with_capacity(size.width * size.height);
    let mut map_y = Vec::with_capacity(size.width * size.height);

    for r in 0..size.height {
        for c in 0..size.width {
            let (x, y) = f(c as f32, r as f32);
            map_x.push(x);
            map_y.push(y);
        }
    }

    let map_x = Image::new(size, map_x)?;
    let map_y = Image::new(size, map_y)?;

    Ok((map_x, map_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meshgrid_identity() -> Result<(), ImageError> {
        let (map_x, map_y) = meshgrid_from_fn(
            ImageSize {
                width: 2,
                height: 2,
            },
            |x, y| (x, y),
        )?;
        assert_eq!(map_x.as_slice(), &[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(map_y.as_slice(), &[0.0, 0.0, 1.0, 1.0]);

        Ok(())
    }
}
