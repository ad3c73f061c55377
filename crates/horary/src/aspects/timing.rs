//! Angular geometry and analytic aspect timing.
//!
//! Motion is treated as linear at the snapshot speeds, which holds well over
//! the few days to weeks a horary question looks ahead.

use crate::aspects::types::AspectKind;
use crate::ephemeris::BodyPosition;

/// Width of a zodiac sign in degrees
pub const SIGN_SPAN: f64 = 30.0;

/// Signed difference `lon_a - lon_b` wrapped into (-180, 180].
pub fn signed_delta(lon_a: f64, lon_b: f64) -> f64 {
    let d = (lon_a - lon_b + 180.0).rem_euclid(360.0) - 180.0;
    if d == -180.0 {
        180.0
    } else {
        d
    }
}

/// Unsigned angular separation in [0, 180].
pub fn separation(lon_a: f64, lon_b: f64) -> f64 {
    signed_delta(lon_a, lon_b).abs()
}

/// Current deviation of the pair from the exact angle of `aspect`.
pub fn orb_deviation(a: &BodyPosition, b: &BodyPosition, aspect: AspectKind) -> f64 {
    (separation(a.lon, b.lon) - aspect.degrees()).abs()
}

/// Days until `a` and `b` form `aspect` exactly.
///
/// Positive when the aspect perfects in the future, negative when it
/// perfected in the past, and `f64::INFINITY` when the bodies have no
/// relative motion. Never NaN for finite inputs.
pub fn time_to_perfection(a: &BodyPosition, b: &BodyPosition, aspect: AspectKind) -> f64 {
    let theta0 = (a.lon - b.lon - aspect.degrees()).rem_euclid(360.0);

    // Each body keeps its own direction: a retrograde body contributes a
    // negative speed, not a reversed difference.
    let v = a.speed_lon.signum() * a.speed_lon.abs() - b.speed_lon.signum() * b.speed_lon.abs();
    if v == 0.0 {
        return f64::INFINITY;
    }

    (-theta0).rem_euclid(360.0) / v
}

pub fn is_applying(a: &BodyPosition, b: &BodyPosition, aspect: AspectKind) -> bool {
    let t = time_to_perfection(a, b, aspect);
    t.is_finite() && t > 0.0
}

pub fn is_separating(a: &BodyPosition, b: &BodyPosition, aspect: AspectKind) -> bool {
    let t = time_to_perfection(a, b, aspect);
    t.is_finite() && t < 0.0
}

/// Sign index (0 = Aries .. 11 = Pisces) of a longitude.
pub fn sign_index(lon: f64) -> u8 {
    ((lon.rem_euclid(360.0) / SIGN_SPAN) as u8).min(11)
}

/// Days until a body crosses the boundary of its current sign.
///
/// `None` when the body is stationary and never leaves.
pub fn days_to_sign_exit(lon: f64, speed: f64) -> Option<f64> {
    if speed == 0.0 {
        return None;
    }
    let into_sign = lon.rem_euclid(SIGN_SPAN);
    let remaining = if speed > 0.0 {
        SIGN_SPAN - into_sign
    } else {
        into_sign
    };
    Some(remaining / speed.abs())
}

/// Days since a body crossed into its current sign, looking backwards along its motion.
pub fn days_since_sign_entry(lon: f64, speed: f64) -> Option<f64> {
    if speed == 0.0 {
        return None;
    }
    let into_sign = lon.rem_euclid(SIGN_SPAN);
    let travelled = if speed > 0.0 {
        into_sign
    } else {
        SIGN_SPAN - into_sign
    };
    Some(travelled / speed.abs())
}

/// Whether an aspect perfecting in `t` days does so before either body changes sign.
pub fn will_perfect_before_sign_exit(a: &BodyPosition, b: &BodyPosition, t: f64) -> bool {
    if !t.is_finite() || t <= 0.0 {
        return false;
    }

    for pos in [a, b] {
        if let Some(exit) = days_to_sign_exit(pos.lon, pos.speed_lon) {
            if t > exit {
                return false;
            }
        }
        if sign_index(pos.lon) != sign_index(pos.projected_lon(t)) {
            return false;
        }
    }

    true
}

/// Applying flag, within-sign flag and signed time to perfection for a pair.
pub fn applying_status(
    a: &BodyPosition,
    b: &BodyPosition,
    aspect: AspectKind,
) -> (bool, bool, f64) {
    let t = time_to_perfection(a, b, aspect);
    let applying = t.is_finite() && t > 0.0;
    let within_sign = applying && will_perfect_before_sign_exit(a, b, t);
    (applying, within_sign, t)
}

/// Coarse human-readable bucket for a future perfection.
pub fn format_timing_description(days: f64) -> String {
    if days < 0.5 {
        "Within hours".to_string()
    } else if days < 1.0 {
        "Within a day".to_string()
    } else if days < 7.0 {
        format!("Within {} days", days as i64)
    } else if days < 30.0 {
        format!("Within {} weeks", (days / 7.0) as i64)
    } else if days < 365.0 {
        format!("Within {} months", (days / 30.0) as i64)
    } else {
        "More than a year".to_string()
    }
}
