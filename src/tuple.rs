//! Homogeneous 4-component tuple

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::Matrix;

/// Homogeneous point or direction with x, y, z, w components
///
/// `w = 1` marks a point, `w = 0` a direction. The tuple is a plain value
/// type; the only mutation is [`Tuple::transform`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Tuple {
    /// Create a new Tuple
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a homogeneous point (w = 1)
    #[inline]
    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// Transform this tuple in place: `self = matrix * self`
    ///
    /// The tuple is treated as a column vector, so the rightmost operation
    /// composed into `matrix` applies first.
    pub fn transform(&mut self, matrix: &Matrix) {
        let Tuple { x, y, z, w } = *self;
        self.x = matrix.m11 * x + matrix.m21 * y + matrix.m31 * z + matrix.m41 * w;
        self.y = matrix.m12 * x + matrix.m22 * y + matrix.m32 * z + matrix.m42 * w;
        self.z = matrix.m13 * x + matrix.m23 * y + matrix.m33 * z + matrix.m43 * w;
        self.w = matrix.m14 * x + matrix.m24 * y + matrix.m34 * z + matrix.m44 * w;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SMALL_NUMBER;

    fn tuple_approx_eq(a: Tuple, b: Tuple) -> bool {
        (a.x - b.x).abs() < SMALL_NUMBER
            && (a.y - b.y).abs() < SMALL_NUMBER
            && (a.z - b.z).abs() < SMALL_NUMBER
            && (a.w - b.w).abs() < SMALL_NUMBER
    }

    #[test]
    fn test_new() {
        let t = Tuple::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(t.x, 1.0);
        assert_eq!(t.y, 2.0);
        assert_eq!(t.z, 3.0);
        assert_eq!(t.w, 4.0);
    }

    #[test]
    fn test_point_defaults_w() {
        let p = Tuple::point(1.0, 2.0, 3.0);
        assert_eq!(p.w, 1.0);
    }

    #[test]
    fn test_identity_transform() {
        let mut t = Tuple::new(1.0, 2.0, 3.0, 4.0);
        let original = t;
        t.transform(&Matrix::IDENTITY);
        assert_eq!(t, original);
    }

    #[test]
    fn test_translate_transform() {
        let m = Matrix::IDENTITY.translate(100.0, 200.0, 10.0).unwrap();
        let mut origin = Tuple::point(0.0, 0.0, 0.0);
        origin.transform(&m);
        assert!(tuple_approx_eq(origin, Tuple::point(100.0, 200.0, 10.0)),
            "origin should move to the translation, got {:?}", origin);
    }

    #[test]
    fn test_translation_ignores_directions() {
        let m = Matrix::IDENTITY.translate(100.0, 200.0, 10.0).unwrap();
        let mut dir = Tuple::new(1.0, 0.0, 0.0, 0.0);
        dir.transform(&m);
        assert!(tuple_approx_eq(dir, Tuple::new(1.0, 0.0, 0.0, 0.0)),
            "w = 0 must not pick up translation, got {:?}", dir);
    }

    #[test]
    fn test_rotate_z_transform() {
        let m = Matrix::IDENTITY.rotate(0.0, 0.0, 90.0).unwrap();
        let mut t = Tuple::point(1.0, 0.0, 0.0);
        t.transform(&m);
        assert!(tuple_approx_eq(t, Tuple::point(0.0, 1.0, 0.0)),
            "x axis should rotate onto y, got {:?}", t);
    }

    #[test]
    fn test_rotate_x_maps_y_to_z() {
        let m = Matrix::IDENTITY.rotate(90.0, 0.0, 0.0).unwrap();
        let mut t = Tuple::point(0.0, 1.0, 0.0);
        t.transform(&m);
        assert!(tuple_approx_eq(t, Tuple::point(0.0, 0.0, 1.0)),
            "y axis should rotate onto z, got {:?}", t);
    }

    #[test]
    fn test_scale_transform() {
        let m = Matrix::IDENTITY.scale(3.0, 3.0, 3.0).unwrap();
        let mut t = Tuple::point(1.0, 1.0, 1.0);
        t.transform(&m);
        assert!(tuple_approx_eq(t, Tuple::point(3.0, 3.0, 3.0)));
    }
}
