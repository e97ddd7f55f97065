// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Double-precision affine math for pose composition and decomposition.
//!
//! Conventions: row-major 3x3 linear part, column vectors, rotation composed
//! from euler XYZ as `R = Rz * Ry * Rx`, transform `M = T * R * S`.
use crate::value::Pose;

const GIMBAL_EPSILON: f64 = 1e-9;

/// Affine transform: linear part plus translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    /// Row-major linear part (rotation times scale).
    pub linear: [[f64; 3]; 3],
    /// Translation.
    pub translation: [f64; 3],
}

impl Affine {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        linear: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        translation: [0.0; 3],
    };

    /// Builds `T * R * S` from a pose.
    pub fn from_pose(pose: &Pose) -> Self {
        let r = euler_xyz_to_matrix(pose.rotation);
        let mut linear = r;
        for row in &mut linear {
            for (col, value) in row.iter_mut().enumerate() {
                *value *= pose.scale[col];
            }
        }
        Self {
            linear,
            translation: pose.translation,
        }
    }

    /// Returns `self * rhs` (apply `rhs` first).
    pub fn compose(&self, rhs: &Self) -> Self {
        let linear = mat_mul(&self.linear, &rhs.linear);
        let moved = mat_vec(&self.linear, rhs.translation);
        Self {
            linear,
            translation: [
                moved[0] + self.translation[0],
                moved[1] + self.translation[1],
                moved[2] + self.translation[2],
            ],
        }
    }

    /// Splits the transform back into translation, euler rotation and scale.
    ///
    /// Shear is discarded. A negative determinant is attributed to the X axis.
    pub fn to_pose(&self) -> Pose {
        let m = &self.linear;
        let mut scale = [0.0; 3];
        for (col, s) in scale.iter_mut().enumerate() {
            *s = (m[0][col] * m[0][col] + m[1][col] * m[1][col] + m[2][col] * m[2][col]).sqrt();
        }
        if determinant(m) < 0.0 {
            scale[0] = -scale[0];
        }
        let mut rot = *m;
        for row in &mut rot {
            for (col, value) in row.iter_mut().enumerate() {
                if scale[col] != 0.0 {
                    *value /= scale[col];
                }
            }
        }
        Pose {
            translation: self.translation,
            rotation: matrix_to_euler_xyz(&rot),
            scale,
        }
    }
}

/// Composes euler XYZ angles (radians) into a rotation matrix.
pub fn euler_xyz_to_matrix([x, y, z]: [f64; 3]) -> [[f64; 3]; 3] {
    let (sx, cx) = x.sin_cos();
    let (sy, cy) = y.sin_cos();
    let (sz, cz) = z.sin_cos();
    let rx = [[1.0, 0.0, 0.0], [0.0, cx, -sx], [0.0, sx, cx]];
    let ry = [[cy, 0.0, sy], [0.0, 1.0, 0.0], [-sy, 0.0, cy]];
    let rz = [[cz, -sz, 0.0], [sz, cz, 0.0], [0.0, 0.0, 1.0]];
    mat_mul(&rz, &mat_mul(&ry, &rx))
}

/// Extracts euler XYZ angles (radians) from a pure rotation matrix.
pub fn matrix_to_euler_xyz(r: &[[f64; 3]; 3]) -> [f64; 3] {
    let y = (-r[2][0]).clamp(-1.0, 1.0).asin();
    if y.cos().abs() > GIMBAL_EPSILON {
        [r[2][1].atan2(r[2][2]), y, r[1][0].atan2(r[0][0])]
    } else {
        // Gimbal lock: only x +/- z is determined; pin z to zero.
        [(-r[1][2]).atan2(r[1][1]), y, 0.0]
    }
}

fn mat_mul(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
    out
}

fn mat_vec(a: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        a[0][0] * v[0] + a[0][1] * v[1] + a[0][2] * v[2],
        a[1][0] * v[0] + a[1][1] * v[1] + a[1][2] * v[2],
        a[2][0] * v[0] + a[2][1] * v[1] + a[2][2] * v[2],
    ]
}

fn determinant(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}
