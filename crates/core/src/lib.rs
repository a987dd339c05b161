//! Core units, constants, and shared primitives for the Solar Shuttle workspace.
//!
//! Distances are astronomical units and times are days unless a name says otherwise.

/// Physical constants in AU/day units (unless stated otherwise).
pub mod constants {
    /// Heliocentric gravitational parameter, k² with k the Gaussian constant (AU³/day²).
    pub const MU_SUN_AU3_DAY2: f64 = 0.000_295_912_208_285_591_1;
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{AU_KM, SECONDS_PER_DAY};

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert AU/day to km/s.
    #[inline]
    pub fn au_per_day_to_km_s(v: f64) -> f64 {
        v * AU_KM / SECONDS_PER_DAY
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    /// Split a duration in days into whole (days, hours, minutes).
    pub fn split_days(days: f64) -> (i64, i64, i64) {
        let total_minutes = (days.max(0.0) * 1_440.0).floor() as i64;
        (total_minutes / 1_440, (total_minutes % 1_440) / 60, total_minutes % 60)
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in AU or AU/day depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Norm of the projection onto the reference (x-y) plane.
    #[inline]
    pub fn norm_xy(v: &Vector3) -> f64 {
        v[0].hypot(v[1])
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Vector3, b: &Vector3) -> f64 {
        norm(&sub(a, b))
    }
}

/// Planar angle helpers.
pub mod angle {
    use std::f64::consts::{PI, TAU};

    use super::vector::Vector3;

    /// Wrap an angle into `[-π, π)`.
    #[inline]
    pub fn wrap_pi(angle: f64) -> f64 {
        (angle + PI).rem_euclid(TAU) - PI
    }

    /// Heading of the x-y projection of a vector, in `(-π, π]`.
    #[inline]
    pub fn heading(v: &Vector3) -> f64 {
        v[1].atan2(v[0])
    }

    /// Unwrap a sequence of wrapped angles into a continuous channel.
    pub fn unwrap(angles: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(angles.len());
        let mut previous: Option<(f64, f64)> = None;
        for &a in angles {
            let value = match previous {
                Some((raw, acc)) => acc + wrap_pi(a - raw),
                None => a,
            };
            out.push(value);
            previous = Some((a, value));
        }
        out
    }
}
