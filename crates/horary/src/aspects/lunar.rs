//! The Moon's last separating and next applying aspects.

use crate::aspects::timing::{
    days_to_sign_exit, format_timing_description, orb_deviation, time_to_perfection,
    will_perfect_before_sign_exit,
};
use crate::aspects::types::{AspectKind, LunarAspect};
use crate::ephemeris::{Body, ChartSnapshot};

/// Bodies the Moon can apply to when looking ahead
const NEXT_ASPECT_TARGETS: [Body; 6] = [
    Body::Sun,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
];

/// Recently separated aspects may already sit outside the nominal orb.
const SEPARATING_ORB_FACTOR: f64 = 1.5;

/// Lunar aspect search over a chart snapshot.
#[derive(Debug, Clone, Default)]
pub struct LunarAnalyzer {
    moon_speed: Option<f64>,
}

impl LunarAnalyzer {
    pub fn new() -> Self {
        Self { moon_speed: None }
    }

    /// Use a refined lunar speed for the Moon's sign-exit horizon instead of
    /// the snapshot speed.
    pub fn with_moon_speed(moon_speed: f64) -> Self {
        Self {
            moon_speed: Some(moon_speed),
        }
    }

    /// The most recently perfected aspect the Moon is separating from.
    ///
    /// Timing uses [`time_to_perfection`] from the Moon's side, which is
    /// negative only when the relative speed is negative. A direct Moon
    /// outpacing the other body therefore never yields a record; only a body
    /// faster than the Moon, or a retrograde Moon, can.
    pub fn last_aspect(&self, chart: &ChartSnapshot) -> Option<LunarAspect> {
        let moon = chart.get(Body::Moon)?;

        let mut separating = Vec::new();
        for (&body, pos) in &chart.bodies {
            if body == Body::Moon {
                continue;
            }
            for aspect in AspectKind::ALL {
                let orb = orb_deviation(moon, pos, aspect);
                if orb > aspect.orb() * SEPARATING_ORB_FACTOR {
                    continue;
                }
                let t = time_to_perfection(moon, pos, aspect);
                if t < 0.0 {
                    separating.push(LunarAspect {
                        body,
                        aspect,
                        orb,
                        degrees_from_exact: orb,
                        perfection_eta_days: t,
                        perfection_eta_description: format!("{:.1} days ago", -t),
                        applying: false,
                    });
                }
            }
        }

        separating
            .into_iter()
            .min_by(|a, b| a.perfection_eta_days.abs().total_cmp(&b.perfection_eta_days.abs()))
    }

    /// The soonest applying aspect that perfects before the Moon or its
    /// target leaves its sign.
    ///
    /// With `ignore_orb_for_voc` set, candidates are not gated by current orb,
    /// which is what the void-of-course test needs.
    pub fn next_aspect(
        &self,
        chart: &ChartSnapshot,
        ignore_orb_for_voc: bool,
    ) -> Option<LunarAspect> {
        let moon = chart.get(Body::Moon)?;
        let moon_speed = self.moon_speed.unwrap_or(moon.speed_lon);
        let moon_days_to_exit = days_to_sign_exit(moon.lon, moon_speed);

        let mut applying = Vec::new();
        for body in NEXT_ASPECT_TARGETS {
            let Some(pos) = chart.get(body) else {
                continue;
            };
            for aspect in AspectKind::ALL {
                let orb = orb_deviation(moon, pos, aspect);
                if !ignore_orb_for_voc && orb > aspect.orb() {
                    continue;
                }
                let t = time_to_perfection(moon, pos, aspect);
                if !t.is_finite() || t <= 0.0 {
                    continue;
                }
                if moon_days_to_exit.is_some_and(|exit| t > exit) {
                    continue;
                }
                if !will_perfect_before_sign_exit(moon, pos, t) {
                    continue;
                }
                applying.push(LunarAspect {
                    body,
                    aspect,
                    orb,
                    degrees_from_exact: orb,
                    perfection_eta_days: t,
                    perfection_eta_description: format_timing_description(t),
                    applying: true,
                });
            }
        }

        applying
            .into_iter()
            .min_by(|a, b| a.perfection_eta_days.total_cmp(&b.perfection_eta_days))
    }

    /// The Moon completes no further applying aspect before changing sign.
    ///
    /// A chart without a Moon is not reported as void.
    pub fn is_void_of_course(&self, chart: &ChartSnapshot) -> bool {
        if chart.get(Body::Moon).is_none() {
            return false;
        }
        let void = self.next_aspect(chart, true).is_none();
        if void {
            log::debug!("Moon is void of course at JD {}", chart.julian_day);
        }
        void
    }
}
