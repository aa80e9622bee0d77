//! Homogeneous 3D math for the wireframe pipeline
//!
//! Vectors are rows: a point is transformed as `v' = v · M`, so composed
//! transforms read left to right (`rotation * translation * projection`).

use std::ops::{Index, IndexMut, Mul, MulAssign};

/// Below this magnitude `w` is treated as zero and the divide is skipped
pub const W_EPSILON: f32 = 1e-8;

/// Homogeneous point or vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    /// Point at (x, y, z) with `w = 1`
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    #[inline]
    pub const fn with_w(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Length of the (x, y, z) part; `w` is ignored
    #[inline]
    pub fn length3(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Perspective divide: scale x, y, z by `1/w` and reset `w` to 1.
    /// A `w` within `W_EPSILON` of zero leaves x, y, z unscaled.
    #[inline]
    pub fn homogenize(&self) -> Self {
        let inv_w = if self.w.abs() > W_EPSILON {
            1.0 / self.w
        } else {
            1.0
        };
        Self::new(self.x * inv_w, self.y * inv_w, self.z * inv_w)
    }

    /// Row vector times matrix. Each output component is the dot product of
    /// `self` with one column of `m`.
    #[inline]
    pub fn transform(&self, m: &Mat4) -> Self {
        let v = [self.x, self.y, self.z, self.w];
        let col = |j: usize| v[0] * m[0][j] + v[1] * m[1][j] + v[2] * m[2][j] + v[3] * m[3][j];
        Self::with_w(col(0), col(1), col(2), col(3))
    }

    /// Approximate equality over all four components
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
            && (self.w - other.w).abs() < epsilon
    }
}

impl Default for Vec4 {
    /// The origin as a point (`w = 1`)
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl Mul<Mat4> for Vec4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, m: Mat4) -> Vec4 {
        self.transform(&m)
    }
}

impl Mul<&Mat4> for Vec4 {
    type Output = Vec4;
    #[inline]
    fn mul(self, m: &Mat4) -> Vec4 {
        self.transform(m)
    }
}

/// 4x4 transform matrix, indexed `m[row][col]`.
///
/// `Default` is the zero matrix, not the identity. The builders in
/// `transform` set every entry they rely on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Mat4 {
    pub val: [[f32; 4]; 4],
}

impl Mat4 {
    #[inline]
    pub const fn zero() -> Self {
        Self { val: [[0.0; 4]; 4] }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self {
            val: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// `res[i][j] = sum_k self[i][k] * rhs[k][j]`
    pub fn multiply(&self, rhs: &Mat4) -> Mat4 {
        let mut res = Mat4::zero();
        for i in 0..4 {
            for j in 0..4 {
                res.val[i][j] = self.val[i][0] * rhs.val[0][j]
                    + self.val[i][1] * rhs.val[1][j]
                    + self.val[i][2] * rhs.val[2][j]
                    + self.val[i][3] * rhs.val[3][j];
            }
        }
        res
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.val
            .iter()
            .flatten()
            .zip(other.val.iter().flatten())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }
}

impl Index<usize> for Mat4 {
    type Output = [f32; 4];
    #[inline]
    fn index(&self, row: usize) -> &[f32; 4] {
        &self.val[row]
    }
}

impl IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, row: usize) -> &mut [f32; 4] {
        &mut self.val[row]
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        self.multiply(&rhs)
    }
}

impl Mul<&Mat4> for &Mat4 {
    type Output = Mat4;
    #[inline]
    fn mul(self, rhs: &Mat4) -> Mat4 {
        self.multiply(rhs)
    }
}

impl MulAssign for Mat4 {
    /// Compose in place: `self = self * rhs`
    #[inline]
    fn mul_assign(&mut self, rhs: Mat4) {
        *self = self.multiply(&rhs);
    }
}

/// Weighted blend of two scalars: `t` is the weight of `a`
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * t + b * (1.0 - t)
}

/// Weighted blend of the (x, y, z) parts of two points; `t = 1` yields `a`,
/// `t = 0` yields `b`. The result is a point (`w = 1`).
#[inline]
pub fn lerp(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    Vec4::new(
        lerp_f32(a.x, b.x, t),
        lerp_f32(a.y, b.y, t),
        lerp_f32(a.z, b.z, t),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mat4 {
        let mut m = Mat4::zero();
        for i in 0..4 {
            for j in 0..4 {
                m[i][j] = (i * 4 + j) as f32 * 0.5 - 3.0;
            }
        }
        m
    }

    #[test]
    fn test_default_matrix_is_zero() {
        assert_eq!(Mat4::default(), Mat4::zero());
        assert_ne!(Mat4::default(), Mat4::identity());
    }

    #[test]
    fn test_default_vector_is_point() {
        let v = Vec4::default();
        assert_eq!(v.w, 1.0);
        assert_eq!(Vec4::new(1.0, 2.0, 3.0).w, 1.0);
    }

    #[test]
    fn test_identity_is_neutral() {
        let m = sample();
        assert_eq!(Mat4::identity() * m, m);
        assert_eq!(m * Mat4::identity(), m);
    }

    #[test]
    fn test_multiply_is_not_commutative() {
        let a = sample();
        let mut b = Mat4::identity();
        b[3][0] = 2.0;
        assert_ne!(a * b, b * a);
    }

    #[test]
    fn test_multiply_is_associative() {
        let a = sample();
        let mut b = Mat4::identity();
        b[0][1] = 0.25;
        b[3][2] = -1.5;
        let mut c = Mat4::identity();
        c[1][1] = 0.5;
        c[1][3] = 2.0;
        assert!(((a * b) * c).approx_eq(&(a * (b * c)), 1e-3));
    }

    #[test]
    fn test_mul_assign_matches_operator() {
        let mut a = sample();
        let b = sample();
        let expected = a * b;
        a *= b;
        assert_eq!(a, expected);
    }

    #[test]
    fn test_identity_transform_preserves_vector() {
        let v = Vec4::with_w(1.5, -2.0, 3.25, 0.5);
        assert_eq!(v * Mat4::identity(), v);
    }

    #[test]
    fn test_transform_uses_columns() {
        // Translation lives in row 3 for row vectors
        let mut m = Mat4::identity();
        m[3][0] = 10.0;
        m[3][1] = 20.0;
        let v = Vec4::new(1.0, 2.0, 3.0) * m;
        assert_eq!(v, Vec4::new(11.0, 22.0, 3.0));

        // Directions (w = 0) are not translated
        let d = Vec4::with_w(1.0, 2.0, 3.0, 0.0) * m;
        assert_eq!(d, Vec4::with_w(1.0, 2.0, 3.0, 0.0));
    }

    #[test]
    fn test_homogenize() {
        let v = Vec4::with_w(2.0, 4.0, 6.0, 2.0).homogenize();
        assert_eq!(v, Vec4::new(1.0, 2.0, 3.0));

        let near_zero = Vec4::with_w(2.0, 4.0, 6.0, 1e-9).homogenize();
        assert_eq!(near_zero, Vec4::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_lerp_weights_first_argument() {
        let a = Vec4::with_w(10.0, 0.0, -4.0, 7.0);
        let b = Vec4::new(0.0, 10.0, 4.0);
        assert_eq!(lerp(a, b, 1.0), Vec4::new(10.0, 0.0, -4.0));
        assert_eq!(lerp(a, b, 0.0), b);
        assert_eq!(lerp(a, b, 0.5), Vec4::new(5.0, 5.0, 0.0));
        assert_eq!(lerp_f32(2.0, 4.0, 0.25), 3.5);
    }
}
