//! Transform builders
//!
//! Each builder starts from the zero matrix and fills in the entries it
//! needs, for use with the row-vector convention of `math3d`.

use crate::error::{RenderError, Result};
use crate::math3d::Mat4;
use std::f32::consts::PI;

/// Translation by (x, y, z): identity 3x3 block, offset in row 3
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = Mat4::zero();
    m[0][0] = 1.0;
    m[1][1] = 1.0;
    m[2][2] = 1.0;
    m[3][3] = 1.0;
    m[3][0] = x;
    m[3][1] = y;
    m[3][2] = z;
    m
}

/// Rotation by `theta` radians about the axis (x, y, z).
///
/// The axis is normalized here, so any non-zero length works. A zero or
/// non-finite axis is rejected instead of producing NaNs.
pub fn rotation(x: f32, y: f32, z: f32, theta: f32) -> Result<Mat4> {
    let len = (x * x + y * y + z * z).sqrt();
    if len == 0.0 || !len.is_finite() {
        return Err(RenderError::ZeroAxis);
    }
    let nor = 1.0 / len;

    // Unit quaternion for the half angle
    let (sin2, cos2) = (theta * 0.5).sin_cos();
    let qx = x * sin2 * nor;
    let qy = y * sin2 * nor;
    let qz = z * sin2 * nor;
    let qw = cos2;

    let mut m = Mat4::zero();
    m[0][0] = 1.0 - 2.0 * qy * qy - 2.0 * qz * qz;
    m[0][1] = 2.0 * qx * qy + 2.0 * qz * qw;
    m[0][2] = 2.0 * qx * qz - 2.0 * qy * qw;

    m[1][0] = 2.0 * qx * qy - 2.0 * qz * qw;
    m[1][1] = 1.0 - 2.0 * qx * qx - 2.0 * qz * qz;
    m[1][2] = 2.0 * qy * qz + 2.0 * qx * qw;

    m[2][0] = 2.0 * qx * qz + 2.0 * qy * qw;
    m[2][1] = 2.0 * qy * qz - 2.0 * qx * qw;
    m[2][2] = 1.0 - 2.0 * qx * qx - 2.0 * qy * qy;

    m[3][3] = 1.0;
    Ok(m)
}

/// Perspective projection.
///
/// - `fov`: vertical field of view in radians, inside (0, PI)
/// - `aspect`: width / height
/// - `near`, `far`: clip distances, must differ
///
/// Clip-space `w` takes the view-space `z`, so depth maps `near -> -1`
/// and `far -> 1` after the divide.
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Result<Mat4> {
    if !(fov > 0.0 && fov < PI) {
        return Err(RenderError::InvalidPerspective(format!(
            "field of view {} is outside (0, pi)",
            fov
        )));
    }
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(RenderError::InvalidPerspective(format!(
            "aspect ratio {} must be positive",
            aspect
        )));
    }
    if !near.is_finite() || !far.is_finite() || near == far {
        return Err(RenderError::InvalidPerspective(format!(
            "near ({}) and far ({}) must be finite and distinct",
            near, far
        )));
    }

    let fax = 1.0 / (fov * 0.5).tan();
    let mut m = Mat4::zero();
    m[0][0] = fax / aspect;
    m[1][1] = fax;
    m[2][2] = (far + near) / (far - near);
    m[3][2] = -2.0 * near * far / (far - near);
    m[2][3] = 1.0;
    Ok(m)
}
