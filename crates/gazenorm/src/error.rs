use gazenorm_image::ImageError;

/// An error type for the head-pose normalization pipeline.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NormalizeError {
    /// The source camera intrinsic matrix is singular and cannot be inverted.
    #[error("The source camera intrinsic matrix is not invertible")]
    SingularIntrinsics,

    /// The region center has zero magnitude and defines no viewing axis.
    #[error("The region center vector has zero magnitude")]
    DegenerateCenter,

    /// The head x-axis is parallel to the line of sight, the normalized
    /// basis is undefined.
    #[error("The head x-axis is parallel to the line of sight")]
    DegenerateHeadAxis,

    /// The distance from the camera to the region must be positive.
    #[error("The region distance must be positive, got {0}")]
    NonPositiveDistance(f32),

    /// The configured normalized distance must be positive.
    #[error("The normalized distance must be positive, got {0}")]
    NonPositiveNormalizedDistance(f32),

    /// An image operation failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}
