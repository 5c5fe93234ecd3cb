//! Matrix backing selection
//!
//! Hosts that ship a platform matrix type (a native CSSMatrix equivalent)
//! implement [`TransformMatrix`] for it and point [`DefaultMatrix`] at
//! that type in their build; everything written against the trait then
//! runs unchanged on either backing. [`Matrix`] is the bundled
//! implementation.

use crate::error::TransformError;
use crate::matrix::Matrix;
use crate::tuple::Tuple;

/// Capability interface for a CSS transform matrix backing.
///
/// All implementations must agree numerically: the same sequence of calls
/// produces component-wise equal matrices within [`crate::SMALL_NUMBER`].
/// Angles are degrees, composition is post-multiplication.
pub trait TransformMatrix: Sized {
    /// The identity matrix.
    fn identity() -> Self;

    /// Parse a CSS transform list into a fresh matrix.
    fn from_css(value: &str) -> Result<Self, TransformError>;

    /// Parse a CSS transform list and overwrite this matrix with the
    /// result, leaving it unchanged on error.
    fn set_matrix_value(&mut self, value: &str) -> Result<(), TransformError>;

    /// Serialize with the CSS `matrix()`/`matrix3d()` grammar.
    fn to_css_string(&self) -> String;

    /// Whether the matrix only carries 2D affine terms.
    fn is_2d(&self) -> bool;

    /// Matrix product `self * other`.
    fn multiply(&self, other: &Self) -> Self;

    fn translate(&self, tx: f64, ty: f64, tz: f64) -> Result<Self, TransformError>;

    fn scale(&self, sx: f64, sy: f64, sz: f64) -> Result<Self, TransformError>;

    fn rotate(&self, rx: f64, ry: f64, rz: f64) -> Result<Self, TransformError>;

    fn rotate_axis_angle(&self, x: f64, y: f64, z: f64, angle: f64)
        -> Result<Self, TransformError>;

    fn skew_x(&self, angle: f64) -> Result<Self, TransformError>;

    fn skew_y(&self, angle: f64) -> Result<Self, TransformError>;

    fn perspective(&self, depth: f64) -> Result<Self, TransformError>;

    fn inverse(&self) -> Result<Self, TransformError>;

    /// Apply this matrix to a tuple in place.
    fn transform(&self, tuple: &mut Tuple);
}

impl TransformMatrix for Matrix {
    fn identity() -> Self {
        Matrix::IDENTITY
    }

    fn from_css(value: &str) -> Result<Self, TransformError> {
        value.parse()
    }

    fn set_matrix_value(&mut self, value: &str) -> Result<(), TransformError> {
        Matrix::set_matrix_value(self, value)
    }

    fn to_css_string(&self) -> String {
        self.to_string()
    }

    fn is_2d(&self) -> bool {
        Matrix::is_2d(self)
    }

    fn multiply(&self, other: &Self) -> Self {
        Matrix::multiply(self, other)
    }

    fn translate(&self, tx: f64, ty: f64, tz: f64) -> Result<Self, TransformError> {
        Matrix::translate(self, tx, ty, tz)
    }

    fn scale(&self, sx: f64, sy: f64, sz: f64) -> Result<Self, TransformError> {
        Matrix::scale(self, sx, sy, sz)
    }

    fn rotate(&self, rx: f64, ry: f64, rz: f64) -> Result<Self, TransformError> {
        Matrix::rotate(self, rx, ry, rz)
    }

    fn rotate_axis_angle(
        &self,
        x: f64,
        y: f64,
        z: f64,
        angle: f64,
    ) -> Result<Self, TransformError> {
        Matrix::rotate_axis_angle(self, x, y, z, angle)
    }

    fn skew_x(&self, angle: f64) -> Result<Self, TransformError> {
        Matrix::skew_x(self, angle)
    }

    fn skew_y(&self, angle: f64) -> Result<Self, TransformError> {
        Matrix::skew_y(self, angle)
    }

    fn perspective(&self, depth: f64) -> Result<Self, TransformError> {
        Matrix::perspective(self, depth)
    }

    fn inverse(&self) -> Result<Self, TransformError> {
        Matrix::inverse(self)
    }

    fn transform(&self, tuple: &mut Tuple) {
        tuple.transform(self);
    }
}

/// The matrix backing selected for this build.
pub type DefaultMatrix = Matrix;

#[cfg(test)]
mod tests {
    use super::*;

    /// Code written against the trait must not care which backing it gets.
    fn spin<M: TransformMatrix>(css: &str) -> Result<String, TransformError> {
        let m = M::from_css(css)?.rotate(0.0, 0.0, 90.0)?;
        Ok(m.to_css_string())
    }

    #[test]
    fn test_identity() {
        let m = <DefaultMatrix as TransformMatrix>::identity();
        assert_eq!(m, Matrix::IDENTITY);
    }

    #[test]
    fn test_generic_usage() {
        let css = spin::<DefaultMatrix>("translate(10, 20)").unwrap();
        let reparsed: Matrix = css.parse().unwrap();
        let direct = Matrix::new()
            .translate(10.0, 20.0, 0.0)
            .unwrap()
            .rotate(0.0, 0.0, 90.0)
            .unwrap();
        assert!(reparsed.approx_eq(&direct));
    }

    #[test]
    fn test_trait_transform_matches_tuple_transform() {
        let m = Matrix::new().translate(1.0, 2.0, 3.0).unwrap();
        let mut a = Tuple::point(0.0, 0.0, 0.0);
        let mut b = a;
        TransformMatrix::transform(&m, &mut a);
        b.transform(&m);
        assert_eq!(a, b);
    }
}
