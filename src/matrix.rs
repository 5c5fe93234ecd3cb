//! 4x4 CSS transform matrix
//!
//! Components are named `m{col}{row}` and listed column-major, matching the
//! `matrix3d()` grammar. A freshly constructed matrix is the identity.
//! Every geometric operation exists in a copy-producing form returning
//! `self * op` and an in-place `*_self` form mutating the receiver.

use std::fmt;
use std::ops::Mul;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::TransformError;
use crate::parser;

/// Tolerance for singularity checks and approximate comparisons
pub const SMALL_NUMBER: f64 = 1e-6;

/// 4x4 homogeneous transform matrix with CSS component naming
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Matrix {
    pub m11: f64,
    pub m12: f64,
    pub m13: f64,
    pub m14: f64,
    pub m21: f64,
    pub m22: f64,
    pub m23: f64,
    pub m24: f64,
    pub m31: f64,
    pub m32: f64,
    pub m33: f64,
    pub m34: f64,
    pub m41: f64,
    pub m42: f64,
    pub m43: f64,
    pub m44: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn check_finite(operation: &str, values: &[f64]) -> Result<(), TransformError> {
    for value in values {
        if !value.is_finite() {
            return Err(TransformError::InvalidArgument(format!(
                "non-finite value {} passed to `{}`",
                value, operation
            )));
        }
    }
    Ok(())
}

fn rotation_x(degrees: f64) -> Matrix {
    let (s, c) = degrees.to_radians().sin_cos();
    let mut m = Matrix::IDENTITY;
    m.m22 = c;
    m.m23 = s;
    m.m32 = -s;
    m.m33 = c;
    m
}

fn rotation_y(degrees: f64) -> Matrix {
    let (s, c) = degrees.to_radians().sin_cos();
    let mut m = Matrix::IDENTITY;
    m.m11 = c;
    m.m13 = -s;
    m.m31 = s;
    m.m33 = c;
    m
}

fn rotation_z(degrees: f64) -> Matrix {
    let (s, c) = degrees.to_radians().sin_cos();
    let mut m = Matrix::IDENTITY;
    m.m11 = c;
    m.m12 = s;
    m.m21 = -s;
    m.m22 = c;
    m
}

/// Cofactor matrix used by both `determinant` and `inverse`, laid out so
/// that dividing by the determinant yields the inverse directly.
fn cofactors(m: &[f64; 16]) -> [f64; 16] {
    let mut inv = [0.0f64; 16];

    inv[0] = m[5] * m[10] * m[15] - m[5] * m[11] * m[14] - m[9] * m[6] * m[15]
        + m[9] * m[7] * m[14] + m[13] * m[6] * m[11] - m[13] * m[7] * m[10];
    inv[4] = -m[4] * m[10] * m[15] + m[4] * m[11] * m[14] + m[8] * m[6] * m[15]
        - m[8] * m[7] * m[14] - m[12] * m[6] * m[11] + m[12] * m[7] * m[10];
    inv[8] = m[4] * m[9] * m[15] - m[4] * m[11] * m[13] - m[8] * m[5] * m[15]
        + m[8] * m[7] * m[13] + m[12] * m[5] * m[11] - m[12] * m[7] * m[9];
    inv[12] = -m[4] * m[9] * m[14] + m[4] * m[10] * m[13] + m[8] * m[5] * m[14]
        - m[8] * m[6] * m[13] - m[12] * m[5] * m[10] + m[12] * m[6] * m[9];
    inv[1] = -m[1] * m[10] * m[15] + m[1] * m[11] * m[14] + m[9] * m[2] * m[15]
        - m[9] * m[3] * m[14] - m[13] * m[2] * m[11] + m[13] * m[3] * m[10];
    inv[5] = m[0] * m[10] * m[15] - m[0] * m[11] * m[14] - m[8] * m[2] * m[15]
        + m[8] * m[3] * m[14] + m[12] * m[2] * m[11] - m[12] * m[3] * m[10];
    inv[9] = -m[0] * m[9] * m[15] + m[0] * m[11] * m[13] + m[8] * m[1] * m[15]
        - m[8] * m[3] * m[13] - m[12] * m[1] * m[11] + m[12] * m[3] * m[9];
    inv[13] = m[0] * m[9] * m[14] - m[0] * m[10] * m[13] - m[8] * m[1] * m[14]
        + m[8] * m[2] * m[13] + m[12] * m[1] * m[10] - m[12] * m[2] * m[9];
    inv[2] = m[1] * m[6] * m[15] - m[1] * m[7] * m[14] - m[5] * m[2] * m[15]
        + m[5] * m[3] * m[14] + m[13] * m[2] * m[7] - m[13] * m[3] * m[6];
    inv[6] = -m[0] * m[6] * m[15] + m[0] * m[7] * m[14] + m[4] * m[2] * m[15]
        - m[4] * m[3] * m[14] - m[12] * m[2] * m[7] + m[12] * m[3] * m[6];
    inv[10] = m[0] * m[5] * m[15] - m[0] * m[7] * m[13] - m[4] * m[1] * m[15]
        + m[4] * m[3] * m[13] + m[12] * m[1] * m[7] - m[12] * m[3] * m[5];
    inv[14] = -m[0] * m[5] * m[14] + m[0] * m[6] * m[13] + m[4] * m[1] * m[14]
        - m[4] * m[2] * m[13] - m[12] * m[1] * m[6] + m[12] * m[2] * m[5];
    inv[3] = -m[1] * m[6] * m[11] + m[1] * m[7] * m[10] + m[5] * m[2] * m[11]
        - m[5] * m[3] * m[10] - m[9] * m[2] * m[7] + m[9] * m[3] * m[6];
    inv[7] = m[0] * m[6] * m[11] - m[0] * m[7] * m[10] - m[4] * m[2] * m[11]
        + m[4] * m[3] * m[10] + m[8] * m[2] * m[7] - m[8] * m[3] * m[6];
    inv[11] = -m[0] * m[5] * m[11] + m[0] * m[7] * m[9] + m[4] * m[1] * m[11]
        - m[4] * m[3] * m[9] - m[8] * m[1] * m[7] + m[8] * m[3] * m[5];
    inv[15] = m[0] * m[5] * m[10] - m[0] * m[6] * m[9] - m[4] * m[1] * m[10]
        + m[4] * m[2] * m[9] + m[8] * m[1] * m[6] - m[8] * m[2] * m[5];

    inv
}

impl Matrix {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        m11: 1.0, m12: 0.0, m13: 0.0, m14: 0.0,
        m21: 0.0, m22: 1.0, m23: 0.0, m24: 0.0,
        m31: 0.0, m32: 0.0, m33: 1.0, m34: 0.0,
        m41: 0.0, m42: 0.0, m43: 0.0, m44: 1.0,
    };

    /// Create a new identity matrix
    pub fn new() -> Self {
        Self::IDENTITY
    }

    /// Build a matrix from 16 values in column-major order (m11, m12, ... m44)
    pub fn from_array(v: [f64; 16]) -> Self {
        Self {
            m11: v[0], m12: v[1], m13: v[2], m14: v[3],
            m21: v[4], m22: v[5], m23: v[6], m24: v[7],
            m31: v[8], m32: v[9], m33: v[10], m34: v[11],
            m41: v[12], m42: v[13], m43: v[14], m44: v[15],
        }
    }

    /// The 16 components in column-major order (m11, m12, ... m44)
    pub fn to_array(&self) -> [f64; 16] {
        [
            self.m11, self.m12, self.m13, self.m14,
            self.m21, self.m22, self.m23, self.m24,
            self.m31, self.m32, self.m33, self.m34,
            self.m41, self.m42, self.m43, self.m44,
        ]
    }

    /// True when only the six 2D affine degrees of freedom differ from
    /// identity (m11, m12, m21, m22 and the m41/m42 translation).
    ///
    /// 2D-classified matrices serialize with the short `matrix()` grammar.
    pub fn is_2d(&self) -> bool {
        self.m13 == 0.0
            && self.m14 == 0.0
            && self.m23 == 0.0
            && self.m24 == 0.0
            && self.m31 == 0.0
            && self.m32 == 0.0
            && self.m33 == 1.0
            && self.m34 == 0.0
            && self.m43 == 0.0
            && self.m44 == 1.0
    }

    /// Component-wise comparison within [`SMALL_NUMBER`]
    pub fn approx_eq(&self, other: &Matrix) -> bool {
        let a = self.to_array();
        let b = other.to_array();
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < SMALL_NUMBER)
    }

    /// Parse a CSS transform list and overwrite this matrix with the result
    ///
    /// The receiver is only overwritten when the whole string parses;
    /// on error it is left unchanged.
    pub fn set_matrix_value(&mut self, value: &str) -> Result<(), TransformError> {
        *self = value.parse()?;
        Ok(())
    }

    /// Matrix product `self * other`
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        let a = self.to_array();
        let b = other.to_array();
        let mut out = [0.0f64; 16];

        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += a[k * 4 + row] * b[col * 4 + k];
                }
                out[col * 4 + row] = acc;
            }
        }

        Matrix::from_array(out)
    }

    /// Replace this matrix with `self * other`
    pub fn multiply_self(&mut self, other: &Matrix) -> &mut Self {
        *self = self.multiply(other);
        self
    }

    /// `self * T(tx, ty, tz)`
    pub fn translate(&self, tx: f64, ty: f64, tz: f64) -> Result<Matrix, TransformError> {
        check_finite("translate", &[tx, ty, tz])?;
        let mut op = Matrix::IDENTITY;
        op.m41 = tx;
        op.m42 = ty;
        op.m43 = tz;
        Ok(self.multiply(&op))
    }

    /// In-place form of [`Matrix::translate`]
    pub fn translate_self(&mut self, tx: f64, ty: f64, tz: f64) -> Result<&mut Self, TransformError> {
        *self = self.translate(tx, ty, tz)?;
        Ok(self)
    }

    /// `self * S(sx, sy, sz)`
    pub fn scale(&self, sx: f64, sy: f64, sz: f64) -> Result<Matrix, TransformError> {
        check_finite("scale", &[sx, sy, sz])?;
        let mut op = Matrix::IDENTITY;
        op.m11 = sx;
        op.m22 = sy;
        op.m33 = sz;
        Ok(self.multiply(&op))
    }

    /// In-place form of [`Matrix::scale`]
    pub fn scale_self(&mut self, sx: f64, sy: f64, sz: f64) -> Result<&mut Self, TransformError> {
        *self = self.scale(sx, sy, sz)?;
        Ok(self)
    }

    /// Rotate by Euler angles in degrees: `self * Rz(rz) * Ry(ry) * Rx(rx)`
    ///
    /// The rotations post-multiply about Z, then Y, then X, the order the
    /// CSS geometry interfaces prescribe. The single-angle CSS `rotate(a)`
    /// form corresponds to `rotate(0, 0, a)`.
    pub fn rotate(&self, rx: f64, ry: f64, rz: f64) -> Result<Matrix, TransformError> {
        check_finite("rotate", &[rx, ry, rz])?;
        Ok(self
            .multiply(&rotation_z(rz))
            .multiply(&rotation_y(ry))
            .multiply(&rotation_x(rx)))
    }

    /// In-place form of [`Matrix::rotate`]
    pub fn rotate_self(&mut self, rx: f64, ry: f64, rz: f64) -> Result<&mut Self, TransformError> {
        *self = self.rotate(rx, ry, rz)?;
        Ok(self)
    }

    /// Rotate by `angle` degrees about the axis (x, y, z), using Rodrigues'
    /// formula on the normalized axis. A zero-length axis is the identity
    /// operation.
    pub fn rotate_axis_angle(
        &self,
        x: f64,
        y: f64,
        z: f64,
        angle: f64,
    ) -> Result<Matrix, TransformError> {
        check_finite("rotateAxisAngle", &[x, y, z, angle])?;

        let len = (x * x + y * y + z * z).sqrt();
        if len < SMALL_NUMBER {
            return Ok(*self);
        }
        let (x, y, z) = (x / len, y / len, z / len);

        let (s, c) = angle.to_radians().sin_cos();
        let t = 1.0 - c;

        let mut op = Matrix::IDENTITY;
        op.m11 = t * x * x + c;
        op.m12 = t * x * y + s * z;
        op.m13 = t * x * z - s * y;
        op.m21 = t * x * y - s * z;
        op.m22 = t * y * y + c;
        op.m23 = t * y * z + s * x;
        op.m31 = t * x * z + s * y;
        op.m32 = t * y * z - s * x;
        op.m33 = t * z * z + c;

        Ok(self.multiply(&op))
    }

    /// In-place form of [`Matrix::rotate_axis_angle`]
    pub fn rotate_axis_angle_self(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        angle: f64,
    ) -> Result<&mut Self, TransformError> {
        *self = self.rotate_axis_angle(x, y, z, angle)?;
        Ok(self)
    }

    /// Shear along x: `self * M` with `M.m21 = tan(angle)` (angle in degrees)
    pub fn skew_x(&self, angle: f64) -> Result<Matrix, TransformError> {
        check_finite("skewX", &[angle])?;
        let mut op = Matrix::IDENTITY;
        op.m21 = angle.to_radians().tan();
        Ok(self.multiply(&op))
    }

    /// In-place form of [`Matrix::skew_x`]
    pub fn skew_x_self(&mut self, angle: f64) -> Result<&mut Self, TransformError> {
        *self = self.skew_x(angle)?;
        Ok(self)
    }

    /// Shear along y: `self * M` with `M.m12 = tan(angle)` (angle in degrees)
    pub fn skew_y(&self, angle: f64) -> Result<Matrix, TransformError> {
        check_finite("skewY", &[angle])?;
        let mut op = Matrix::IDENTITY;
        op.m12 = angle.to_radians().tan();
        Ok(self.multiply(&op))
    }

    /// In-place form of [`Matrix::skew_y`]
    pub fn skew_y_self(&mut self, angle: f64) -> Result<&mut Self, TransformError> {
        *self = self.skew_y(angle)?;
        Ok(self)
    }

    /// Perspective projection: `self * M` with `M.m34 = -1 / depth`
    ///
    /// The depth must be a positive finite length.
    pub fn perspective(&self, depth: f64) -> Result<Matrix, TransformError> {
        check_finite("perspective", &[depth])?;
        if depth <= 0.0 {
            return Err(TransformError::InvalidArgument(format!(
                "perspective depth must be positive, got {}",
                depth
            )));
        }
        let mut op = Matrix::IDENTITY;
        op.m34 = -1.0 / depth;
        Ok(self.multiply(&op))
    }

    /// In-place form of [`Matrix::perspective`]
    pub fn perspective_self(&mut self, depth: f64) -> Result<&mut Self, TransformError> {
        *self = self.perspective(depth)?;
        Ok(self)
    }

    /// Determinant of the full 4x4 matrix
    pub fn determinant(&self) -> f64 {
        let m = self.to_array();
        let c = cofactors(&m);
        m[0] * c[0] + m[1] * c[4] + m[2] * c[8] + m[3] * c[12]
    }

    /// Matrix inverse
    ///
    /// Fails with [`TransformError::Singular`] when the determinant is
    /// within [`SMALL_NUMBER`] of zero.
    pub fn inverse(&self) -> Result<Matrix, TransformError> {
        let m = self.to_array();
        let c = cofactors(&m);
        let det = m[0] * c[0] + m[1] * c[4] + m[2] * c[8] + m[3] * c[12];

        if det.abs() < SMALL_NUMBER {
            return Err(TransformError::Singular);
        }

        let inv_det = 1.0 / det;
        let mut out = [0.0f64; 16];
        for (o, cof) in out.iter_mut().zip(c.iter()) {
            *o = cof * inv_det;
        }
        Ok(Matrix::from_array(out))
    }

    /// In-place form of [`Matrix::inverse`]
    pub fn invert_self(&mut self) -> Result<&mut Self, TransformError> {
        *self = self.inverse()?;
        Ok(self)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.multiply(&rhs)
    }
}

impl FromStr for Matrix {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse_transform_list(s)
    }
}

impl fmt::Display for Matrix {
    /// Serialize with the CSS grammar: the short `matrix()` form for
    /// 2D-classified matrices, `matrix3d()` with all 16 column-major
    /// values otherwise. Default `f64` formatting round-trips exactly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_2d() {
            write!(
                f,
                "matrix({}, {}, {}, {}, {}, {})",
                self.m11, self.m12, self.m21, self.m22, self.m41, self.m42
            )
        } else {
            write!(f, "matrix3d(")?;
            for (i, value) in self.to_array().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", value)?;
            }
            write!(f, ")")
        }
    }
}
