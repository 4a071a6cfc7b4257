//! Flat column-major 4x4 matrix helpers for node transforms.

/// The identity matrix.
pub(crate) fn identity() -> [f32; 16] {
    let mut m = [0.0; 16];
    m[0] = 1.0;
    m[5] = 1.0;
    m[10] = 1.0;
    m[15] = 1.0;
    m
}

/// Full column-major matrix product `a * b`.
pub(crate) fn multiply(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut m = [0.0; 16];
    for column in 0..4 {
        for row in 0..4 {
            let mut sum = 0.0;
            for k in 0..4 {
                sum += a[k * 4 + row] * b[column * 4 + k];
            }
            m[column * 4 + row] = sum;
        }
    }
    m
}

/// Composes `translation * rotation * scale` into a column-major matrix,
/// with the rotation given as an `[x, y, z, w]` unit quaternion.
pub(crate) fn compose_trs(
    translation: [f32; 3],
    rotation: [f32; 4],
    scale: [f32; 3],
) -> [f32; 16] {
    let [tx, ty, tz] = translation;
    let [qx, qy, qz, qw] = rotation;
    let [sx, sy, sz] = scale;

    let mut m = [0.0; 16];
    m[0] = (1.0 - 2.0 * qy * qy - 2.0 * qz * qz) * sx;
    m[1] = (2.0 * qx * qy + 2.0 * qz * qw) * sx;
    m[2] = (2.0 * qx * qz - 2.0 * qy * qw) * sx;

    m[4] = (2.0 * qx * qy - 2.0 * qz * qw) * sy;
    m[5] = (1.0 - 2.0 * qx * qx - 2.0 * qz * qz) * sy;
    m[6] = (2.0 * qy * qz + 2.0 * qx * qw) * sy;

    m[8] = (2.0 * qx * qz + 2.0 * qy * qw) * sz;
    m[9] = (2.0 * qy * qz - 2.0 * qx * qw) * sz;
    m[10] = (1.0 - 2.0 * qx * qx - 2.0 * qy * qy) * sz;

    m[12] = tx;
    m[13] = ty;
    m[14] = tz;
    m[15] = 1.0;
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn multiply_by_identity_is_identity() {
        let m = compose_trs([1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 1.0], [2.0, 2.0, 2.0]);
        let product = multiply(&identity(), &m);
        for (a, b) in product.iter().zip(m.iter()) {
            assert_relative_eq!(*a, *b);
        }
    }

    #[test]
    fn trs_with_identity_rotation() {
        let m = compose_trs([5.0, 6.0, 7.0], [0.0, 0.0, 0.0, 1.0], [2.0, 3.0, 4.0]);
        assert_relative_eq!(m[0], 2.0);
        assert_relative_eq!(m[5], 3.0);
        assert_relative_eq!(m[10], 4.0);
        assert_relative_eq!(m[12], 5.0);
        assert_relative_eq!(m[13], 6.0);
        assert_relative_eq!(m[14], 7.0);
        assert_relative_eq!(m[15], 1.0);
    }

    #[test]
    fn quarter_turn_about_z() {
        // 90 degrees about +Z maps +X to +Y.
        let half = std::f32::consts::FRAC_PI_4;
        let m = compose_trs(
            [0.0, 0.0, 0.0],
            [0.0, 0.0, half.sin(), half.cos()],
            [1.0, 1.0, 1.0],
        );
        // First column is the image of the X axis.
        assert_relative_eq!(m[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(m[1], 1.0, epsilon = 1e-6);
        assert_relative_eq!(m[2], 0.0, epsilon = 1e-6);
    }
}
