// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Coordinate conventions between record space and host space.
//!
//! Records are Y-up with euler angles in degrees; the host is Z-up with
//! euler angles in radians. Conversion widens to `f64` before any arithmetic
//! so that narrowing back to `f32` reproduces the original record value.

/// Widens a record float.
pub fn widen(v: f32) -> f64 {
    f64::from(v)
}

/// Narrows a host float back to record precision.
#[allow(clippy::cast_possible_truncation)]
pub fn narrow(v: f64) -> f32 {
    v as f32
}

/// Record position or scale `(x, y, z)` to host `(x, z, y)`.
pub fn position_to_host([x, y, z]: [f32; 3]) -> [f64; 3] {
    [widen(x), widen(z), widen(y)]
}

/// Host position or scale back to record order.
pub fn position_to_record([x, y, z]: [f64; 3]) -> [f32; 3] {
    [narrow(x), narrow(z), narrow(y)]
}

/// Record euler degrees `(x, y, z)` to host radians `(-x, -z, -y)`.
pub fn rotation_to_host([x, y, z]: [f32; 3]) -> [f64; 3] {
    [
        -widen(x).to_radians(),
        -widen(z).to_radians(),
        -widen(y).to_radians(),
    ]
}

/// Host radians back to record euler degrees.
pub fn rotation_to_record([x, y, z]: [f64; 3]) -> [f32; 3] {
    [
        narrow(-x.to_degrees()),
        narrow(-z.to_degrees()),
        narrow(-y.to_degrees()),
    ]
}

/// Single record angle in degrees to host radians, without axis mapping.
pub fn degrees_to_host(deg: f32) -> f64 {
    widen(deg).to_radians()
}

/// Host radians back to record degrees.
pub fn degrees_to_record(rad: f64) -> f32 {
    narrow(rad.to_degrees())
}
