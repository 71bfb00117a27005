use approx::assert_relative_eq;
use glam::{Mat3, Vec3};

use gazenorm::{Camera, FacePartKind, FaceRegion, HeadPoseNormalizer, NormalizedImage};
use gazenorm_image::{Image, ImageSize};

fn source_camera() -> Camera {
    Camera::from_params(
        1000.0,
        1000.0,
        320.0,
        240.0,
        ImageSize {
            width: 640,
            height: 480,
        },
    )
}

fn normalized_camera() -> Camera {
    Camera::from_params(
        960.0,
        960.0,
        112.0,
        56.0,
        ImageSize {
            width: 224,
            height: 112,
        },
    )
}

fn gradient_frame(size: ImageSize) -> Image<u8, 3> {
    let mut data = Vec::with_capacity(size.width * size.height * 3);
    for r in 0..size.height {
        for c in 0..size.width {
            data.push((c % 256) as u8);
            data.push((r % 256) as u8);
            data.push(((c + r) % 256) as u8);
        }
    }
    Image::new(size, data).unwrap()
}

#[test]
fn frontal_region_normalizes_to_identity() {
    let _ = env_logger::builder().is_test(true).try_init();

    let normalizer =
        HeadPoseNormalizer::new(source_camera(), normalized_camera(), 600.0).unwrap();

    let frame = gradient_frame(source_camera().size);
    let region = FaceRegion {
        kind: FacePartKind::Face,
        center: Vec3::new(0.0, 0.0, 500.0),
        head_rotation: Mat3::IDENTITY,
        distance: 500.0,
    };

    let normalized = normalizer.normalize(&frame, &region).unwrap();

    // center on the optical axis with identity head pose: nothing to rotate
    assert!(normalized.rotation.abs_diff_eq(Mat3::IDENTITY, 1e-6));
    assert_relative_eq!(normalized.head_angles.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(normalized.head_angles.y, 0.0, epsilon = 1e-6);

    assert_eq!(normalized.image.num_channels(), 3);
    assert_eq!(normalized.image.size(), normalized_camera().size);
}

#[test]
fn eye_regions_yield_grayscale_crops() {
    let normalizer =
        HeadPoseNormalizer::new(source_camera(), normalized_camera(), 600.0).unwrap();
    let frame = gradient_frame(source_camera().size);

    for kind in [FacePartKind::LeftEye, FacePartKind::RightEye] {
        let region = FaceRegion {
            kind,
            center: Vec3::new(20.0, -10.0, 520.0),
            head_rotation: Mat3::IDENTITY,
            distance: 520.5,
        };
        let normalized = normalizer.normalize(&frame, &region).unwrap();

        assert!(matches!(normalized.image, NormalizedImage::Gray(_)));
        assert_eq!(normalized.image.size(), normalized_camera().size);
    }
}

#[test]
fn face_region_yields_color_crop() {
    let normalizer =
        HeadPoseNormalizer::new(source_camera(), normalized_camera(), 600.0).unwrap();
    let frame = gradient_frame(source_camera().size);

    let region = FaceRegion {
        kind: FacePartKind::Face,
        center: Vec3::new(20.0, -10.0, 520.0),
        head_rotation: Mat3::IDENTITY,
        distance: 520.5,
    };
    let normalized = normalizer.normalize(&frame, &region).unwrap();

    assert!(matches!(normalized.image, NormalizedImage::Rgb(_)));
}

#[test]
fn normalize_is_deterministic() {
    let normalizer =
        HeadPoseNormalizer::new(source_camera(), normalized_camera(), 600.0).unwrap();
    let frame = gradient_frame(source_camera().size);

    let region = FaceRegion {
        kind: FacePartKind::LeftEye,
        center: Vec3::new(35.0, 12.0, 480.0),
        head_rotation: Mat3::from_rotation_x(0.2) * Mat3::from_rotation_y(-0.1),
        distance: 481.6,
    };

    let first = normalizer.normalize(&frame, &region).unwrap();
    let second = normalizer.normalize(&frame, &region).unwrap();

    assert_eq!(first, second);
}

#[test]
fn warp_transform_matches_point_projection() {
    let nd = 600.0f32;
    let normalizer = HeadPoseNormalizer::new(source_camera(), normalized_camera(), nd).unwrap();
    let frame = gradient_frame(source_camera().size);

    let center = Vec3::new(30.0, -20.0, 550.0);
    let region = FaceRegion {
        kind: FacePartKind::Face,
        center,
        head_rotation: Mat3::from_rotation_x(0.1) * Mat3::from_rotation_z(0.05),
        distance: center.length(),
    };

    let normalized = normalizer.normalize(&frame, &region).unwrap();

    // rebuild the projective transform from the returned rotation
    let scale = Mat3::from_diagonal(Vec3::new(1.0, 1.0, nd / region.distance));
    let transform = normalized_camera().matrix
        * (scale * normalized.rotation)
        * source_camera().matrix.inverse();

    // a 3D point projected into the source frame and pushed through the
    // transform must land where the normalized camera projects it directly
    let point = Vec3::new(25.0, -30.0, 540.0);

    let source_px = source_camera().matrix * point;
    let source_px = source_px / source_px.z;

    let mapped = transform * source_px;
    let mapped = mapped / mapped.z;

    let direct = normalized_camera().matrix * (scale * (normalized.rotation * point));
    let direct = direct / direct.z;

    assert_relative_eq!(mapped.x, direct.x, epsilon = 1e-2);
    assert_relative_eq!(mapped.y, direct.y, epsilon = 1e-2);
}

#[test]
fn rejects_non_positive_region_distance() {
    let normalizer =
        HeadPoseNormalizer::new(source_camera(), normalized_camera(), 600.0).unwrap();
    let frame = gradient_frame(source_camera().size);

    let region = FaceRegion {
        kind: FacePartKind::Face,
        center: Vec3::new(0.0, 0.0, 500.0),
        head_rotation: Mat3::IDENTITY,
        distance: -1.0,
    };

    assert!(normalizer.normalize(&frame, &region).is_err());
}

#[test]
fn rejects_frame_size_mismatch() {
    let normalizer =
        HeadPoseNormalizer::new(source_camera(), normalized_camera(), 600.0).unwrap();

    let frame = Image::<u8, 3>::from_size_val(
        ImageSize {
            width: 320,
            height: 240,
        },
        0,
    )
    .unwrap();

    let region = FaceRegion {
        kind: FacePartKind::Face,
        center: Vec3::new(0.0, 0.0, 500.0),
        head_rotation: Mat3::IDENTITY,
        distance: 500.0,
    };

    assert!(normalizer.normalize(&frame, &region).is_err());
}
