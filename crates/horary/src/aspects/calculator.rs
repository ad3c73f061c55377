use crate::aspects::timing::{applying_status, orb_deviation};
use crate::aspects::types::{AspectInfo, AspectKind};
use crate::calendar::CalendarConverter;
use crate::ephemeris::{Body, BodyPosition, ChartSnapshot};
use chrono::{DateTime, Utc};
use horary_config::HoraryConfig;

/// Smallest degrees-to-exact ever reported
const MIN_DEGREES_TO_EXACT: f64 = 0.1;

/// Pairwise aspect scanner
pub struct AspectCalculator<'a> {
    config: &'a HoraryConfig,
    calendar: &'a dyn CalendarConverter,
}

impl<'a> AspectCalculator<'a> {
    /// Create a scanner over a configuration snapshot
    pub fn new(config: &'a HoraryConfig, calendar: &'a dyn CalendarConverter) -> Self {
        Self { config, calendar }
    }

    /// Find one aspect per body pair.
    ///
    /// Kinds are tried in [`AspectKind::ALL`] order and only the first kind
    /// within orb is kept for a pair, even when a later kind would also fit.
    pub fn compute_aspects(&self, chart: &ChartSnapshot) -> Vec<AspectInfo> {
        let bodies: Vec<(Body, &BodyPosition)> =
            chart.bodies.iter().map(|(b, p)| (*b, p)).collect();

        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (body_a, pos_a) = bodies[i];
                let (body_b, pos_b) = bodies[j];

                if let Some(info) =
                    self.calculate_aspect(chart.julian_day, body_a, pos_a, body_b, pos_b)
                {
                    aspects.push(info);
                }
            }
        }

        aspects
    }

    /// First aspect kind within orb for a single pair
    pub fn calculate_aspect(
        &self,
        julian_day: f64,
        body_a: Body,
        pos_a: &BodyPosition,
        body_b: Body,
        pos_b: &BodyPosition,
    ) -> Option<AspectInfo> {
        for aspect in AspectKind::ALL {
            let orb = orb_deviation(pos_a, pos_b, aspect);
            if orb > self.max_orb(body_a, body_b, aspect) {
                continue;
            }

            let (applying, perfection_within_sign, t) = applying_status(pos_a, pos_b, aspect);
            let exact_time = if applying {
                self.estimate_exact_time(julian_day, t)
            } else {
                None
            };

            return Some(AspectInfo {
                body_a,
                body_b,
                aspect,
                orb,
                applying,
                time_to_perfection: t,
                perfection_within_sign,
                exact_time,
                degrees_to_exact: orb.max(MIN_DEGREES_TO_EXACT),
            });
        }

        None
    }

    /// Orb allowed for a pair and aspect kind.
    ///
    /// With a moiety table the pair's combined moieties are scaled per kind;
    /// a pair with no tabulated orb falls back to the nominal orb plus
    /// luminary bonuses.
    pub fn max_orb(&self, body_a: Body, body_b: Body, aspect: AspectKind) -> f64 {
        let orbs = &self.config.orbs;
        if let Some(table) = &orbs.moieties {
            let combined = table.moiety(body_a.id()) + table.moiety(body_b.id());
            let orb = combined * aspect.moiety_factor();
            if orb > 0.0 {
                return orb;
            }
        }

        let mut orb = aspect.orb();
        if body_a == Body::Sun || body_b == Body::Sun {
            orb += orbs.sun_orb_bonus;
        }
        if body_a == Body::Moon || body_b == Body::Moon {
            orb += orbs.moon_orb_bonus;
        }
        orb
    }

    fn estimate_exact_time(&self, julian_day: f64, t: f64) -> Option<DateTime<Utc>> {
        if !t.is_finite() || t <= 0.0 || t >= self.config.timing.max_future_days {
            return None;
        }
        match self.calendar.to_utc(julian_day + t) {
            Ok(dt) => Some(dt),
            Err(e) => {
                log::warn!("Exact time unavailable for perfection in {t:.2} days: {e}");
                None
            }
        }
    }
}
