/// An error type for image container and pixel operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image shape.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image sizes of an operation do not match.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel value cannot be converted between dtypes.
    #[error("Failed to cast the pixel data")]
    CastError,

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a transform matrix is singular and cannot be inverted.
    #[error("Cannot compute the determinant of the transform")]
    CannotComputeDeterminant,

    /// Error when the number of histogram bins is invalid.
    #[error("Invalid number of histogram bins ({0})")]
    InvalidHistogramBins(usize),
}
