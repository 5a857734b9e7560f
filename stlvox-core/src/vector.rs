/// Vector helpers on top of nalgebra's `Vector3<f64>`
///
/// Addition, subtraction, scalar multiplication and division, cross and dot
/// products, norms and exact equality all come from nalgebra. This module adds
/// the few operations the pipeline needs beyond that.
use nalgebra::Vector3;

/// The vector type used throughout the pipeline
pub type Vec3 = Vector3<f64>;

pub trait VectorExt {
    /// Normalize in place, leaving a zero-length vector untouched
    fn normalize_in_place(&mut self);
}

impl VectorExt for Vec3 {
    fn normalize_in_place(&mut self) {
        // Leaves the vector unchanged when its norm is exactly zero
        let _ = self.try_normalize_mut(0.0);
    }
}

/// Decode a little-endian `f32` triple, the binary STL vector layout
pub fn vec3_from_le_bytes(bytes: &[u8; 12]) -> Vec3 {
    let x = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let y = f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let z = f32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    Vec3::new(x as f64, y as f64, z as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_does_not_mutate_operands() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vec3::new(2.0, 2.5, 3.0));
        assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_compound_assignment() {
        let mut v = Vec3::new(1.0, 1.0, 1.0);
        v += Vec3::new(1.0, 2.0, 3.0);
        v -= Vec3::new(0.0, 1.0, 0.0);
        v *= 2.0;
        v /= 4.0;
        assert_eq!(v, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_cross_and_dot() {
        let x = Vec3::x();
        let y = Vec3::y();
        assert_eq!(x.cross(&y), Vec3::z());
        assert_eq!(y.cross(&x), -Vec3::z());
        assert_eq!(Vec3::new(1.0, 2.0, 3.0).dot(&Vec3::new(4.0, -5.0, 6.0)), 12.0);
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).norm(), 5.0);
    }

    #[test]
    fn test_divide_by_zero_follows_ieee() {
        let v = Vec3::new(1.0, -1.0, 0.0) / 0.0;
        assert_eq!(v.x, f64::INFINITY);
        assert_eq!(v.y, f64::NEG_INFINITY);
        assert!(v.z.is_nan());
    }

    #[test]
    fn test_normalize_in_place() {
        let mut v = Vec3::new(0.0, 3.0, 4.0);
        v.normalize_in_place();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.y - 0.6).abs() < 1e-12);

        let mut zero = Vec3::zeros();
        zero.normalize_in_place();
        assert_eq!(zero, Vec3::zeros());
    }

    #[test]
    fn test_equality_is_exact() {
        let a = Vec3::new(0.1, 0.2, 0.3);
        assert_eq!(a, Vec3::new(0.1, 0.2, 0.3));
        assert_ne!(a, Vec3::new(0.1, 0.2, 0.3 + 1e-15));
    }

    #[test]
    fn test_from_le_bytes() {
        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&1.5f32.to_le_bytes());
        bytes[4..8].copy_from_slice(&(-2.0f32).to_le_bytes());
        bytes[8..12].copy_from_slice(&0.25f32.to_le_bytes());
        assert_eq!(vec3_from_le_bytes(&bytes), Vec3::new(1.5, -2.0, 0.25));
    }
}
