//! Signed aspect timing for intervening-body scans.

use crate::aspects::AspectKind;
use crate::ephemeris::BodyPosition;

/// The contacts on either side of the reference time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Contacts {
    /// Days since the most recent contact, as a negative number
    pub past: Option<f64>,
    /// Days until the next contact
    pub future: Option<f64>,
}

impl Contacts {
    /// Split a single signed time by its sign.
    pub fn from_signed(t: f64) -> Self {
        if !t.is_finite() {
            Self::default()
        } else if t > 0.0 {
            Self {
                past: None,
                future: Some(t),
            }
        } else if t < 0.0 {
            Self {
                past: Some(t),
                future: None,
            }
        } else {
            Self::default()
        }
    }
}

/// Signed days from the reference time to a contact between two bodies.
///
/// Unlike [`crate::aspects::time_to_perfection`], results may be negative
/// (the contact already happened) so that a body which touched one
/// significator can be recognised as a translator.
pub trait AspectClock {
    fn signed_time(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        aspect: AspectKind,
        julian_day: f64,
        horizon_days: f64,
    ) -> f64;

    /// Both the most recent and the next contact.
    ///
    /// Defaults to [`AspectClock::signed_time`] split by sign, which only
    /// ever yields one side.
    fn contacts(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        aspect: AspectKind,
        julian_day: f64,
        horizon_days: f64,
    ) -> Contacts {
        Contacts::from_signed(self.signed_time(a, b, aspect, julian_day, horizon_days))
    }
}

impl<F> AspectClock for F
where
    F: Fn(&BodyPosition, &BodyPosition, AspectKind, f64, f64) -> f64,
{
    fn signed_time(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        aspect: AspectKind,
        julian_day: f64,
        horizon_days: f64,
    ) -> f64 {
        self(a, b, aspect, julian_day, horizon_days)
    }
}

/// Linear-motion clock over both sides of an aspect.
///
/// `signed_time` gives the nearest future contact when it falls within the
/// horizon, otherwise the most recent past contact. Infinite with no
/// relative motion.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearAspectClock;

impl LinearAspectClock {
    fn target_angles(aspect: AspectKind) -> Vec<f64> {
        let deg = aspect.degrees();
        if deg == 0.0 || deg == 180.0 {
            vec![deg]
        } else {
            vec![deg, 360.0 - deg]
        }
    }
}

impl AspectClock for LinearAspectClock {
    fn signed_time(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        aspect: AspectKind,
        julian_day: f64,
        horizon_days: f64,
    ) -> f64 {
        let contacts = self.contacts(a, b, aspect, julian_day, horizon_days);
        match (contacts.future, contacts.past) {
            (Some(future), _) if future <= horizon_days => future,
            (_, Some(past)) => past,
            (Some(future), None) => future,
            (None, None) => f64::INFINITY,
        }
    }

    fn contacts(
        &self,
        a: &BodyPosition,
        b: &BodyPosition,
        aspect: AspectKind,
        _julian_day: f64,
        _horizon_days: f64,
    ) -> Contacts {
        let v = a.speed_lon - b.speed_lon;
        if v == 0.0 {
            return Contacts::default();
        }

        let mut next_future = f64::INFINITY;
        let mut last_past = f64::NEG_INFINITY;
        for target in Self::target_angles(aspect) {
            // Phase still to cover in the direction of relative motion
            let phase = (a.lon - b.lon - target).rem_euclid(360.0);
            let ahead = if v > 0.0 {
                (-phase).rem_euclid(360.0)
            } else {
                phase
            };
            let future = ahead / v.abs();
            let past = -(360.0 - ahead).rem_euclid(360.0) / v.abs();
            if future > 0.0 {
                next_future = next_future.min(future);
            }
            if past < 0.0 {
                last_past = last_past.max(past);
            }
        }

        Contacts {
            past: last_past.is_finite().then_some(last_past),
            future: next_future.is_finite().then_some(next_future),
        }
    }
}
