//! Prohibition, translation and collection ahead of a main perfection.
//!
//! Every classical body other than the two significators is tried against
//! every Ptolemaic aspect. Each contact that lands before the main
//! perfection becomes a candidate, and the earliest candidate overall decides
//! the outcome. The scan always runs to completion before selection.

use crate::aspects::timing::{days_since_sign_entry, days_to_sign_exit};
use crate::aspects::AspectKind;
use crate::ephemeris::{Body, BodyPosition, ChartSnapshot, CLASSICAL_BODIES};
use crate::perfection::clock::AspectClock;
use crate::perfection::types::{
    InterventionCandidate, InterventionKind, OutcomeEvent, PerfectionOutcome, Quality,
};
use crate::western::ReceptionLookup;
use horary_config::PerfectionConfig;

/// Reason attached to [`PerfectionOutcome::None`]
pub const NO_PROHIBITION_REASON: &str = "No prohibitions detected";

/// Valid contacts of one significator with a third body
#[derive(Debug, Clone, Copy)]
struct Leg {
    ahead: Option<f64>,
    behind: Option<f64>,
}

/// Finds the event that governs a perfection between two significators
pub struct PerfectionResolver<'a> {
    config: &'a PerfectionConfig,
    clock: &'a dyn AspectClock,
    reception: &'a dyn ReceptionLookup,
}

impl<'a> PerfectionResolver<'a> {
    pub fn new(
        config: &'a PerfectionConfig,
        clock: &'a dyn AspectClock,
        reception: &'a dyn ReceptionLookup,
    ) -> Self {
        Self {
            config,
            clock,
            reception,
        }
    }

    /// Resolve the outcome for a main perfection `days_ahead` days away.
    pub fn resolve(
        &self,
        chart: &ChartSnapshot,
        sig1: Body,
        sig2: Body,
        days_ahead: f64,
    ) -> PerfectionOutcome {
        let candidates = self.scan(chart, sig1, sig2, days_ahead);
        match select_earliest(&candidates) {
            Some(candidate) => {
                log::debug!(
                    "{sig1}/{sig2}: governing event {:?} by {} at {:.3} days ({} candidates)",
                    candidate.kind,
                    candidate.body,
                    candidate.t_event,
                    candidates.len()
                );
                self.to_outcome(chart, sig1, sig2, candidate)
            }
            None => PerfectionOutcome::None {
                reason: NO_PROHIBITION_REASON.to_string(),
            },
        }
    }

    /// Classify every third-body contact before the main perfection.
    ///
    /// Bodies missing from the chart are skipped. When a significator is
    /// missing, or `days_ahead` is NaN or not positive, there is nothing to
    /// intervene in and the list is empty.
    pub fn scan(
        &self,
        chart: &ChartSnapshot,
        sig1: Body,
        sig2: Body,
        days_ahead: f64,
    ) -> Vec<InterventionCandidate> {
        if days_ahead.is_nan() || days_ahead <= 0.0 {
            log::debug!("{sig1}/{sig2}: no perfection ahead ({days_ahead} days), skipping scan");
            return Vec::new();
        }
        let (Some(pos1), Some(pos2)) = (chart.get(sig1), chart.get(sig2)) else {
            log::debug!("{sig1}/{sig2}: significator position missing, skipping scan");
            return Vec::new();
        };
        let jd = chart.julian_day;

        CLASSICAL_BODIES
            .iter()
            .copied()
            .filter(|body| *body != sig1 && *body != sig2)
            .filter_map(|body| chart.get(body).map(|pos| (body, pos)))
            .flat_map(|(body, pos)| {
                AspectKind::ALL.into_iter().filter_map(move |aspect| {
                    self.classify(jd, (sig1, pos1), (sig2, pos2), (body, pos), aspect, days_ahead)
                })
            })
            .collect()
    }

    fn classify(
        &self,
        jd: f64,
        (sig1, pos1): (Body, &BodyPosition),
        (sig2, pos2): (Body, &BodyPosition),
        (body, pos): (Body, &BodyPosition),
        aspect: AspectKind,
        days_ahead: f64,
    ) -> Option<InterventionCandidate> {
        let leg1 = self.leg(jd, pos1, pos, aspect, days_ahead);
        let leg2 = self.leg(jd, pos2, pos, aspect, days_ahead);

        let speed = pos.speed_lon.abs();
        let (speed1, speed2) = (pos1.speed_lon.abs(), pos2.speed_lon.abs());
        let faster = speed > speed1 && speed > speed2;
        let slower = speed < speed1 && speed < speed2;

        let candidate = |kind, t_event| InterventionCandidate {
            kind,
            body,
            aspect,
            t_event,
        };

        let found = match (leg1.ahead, leg2.ahead) {
            (Some(t1), Some(t2)) => {
                let (first, t_first, t_second) = if t1 <= t2 {
                    (sig1, t1, t2)
                } else {
                    (sig2, t2, t1)
                };
                if faster {
                    candidate(InterventionKind::Translation, t_second)
                } else if slower {
                    candidate(InterventionKind::Collection, t_second)
                } else {
                    candidate(
                        InterventionKind::Prohibition { significator: first },
                        t_first,
                    )
                }
            }
            (Some(t1), None) => {
                if faster && leg2.behind.is_some() {
                    candidate(InterventionKind::Translation, t1)
                } else {
                    candidate(InterventionKind::Prohibition { significator: sig1 }, t1)
                }
            }
            (None, Some(t2)) => {
                if faster && leg1.behind.is_some() {
                    candidate(InterventionKind::Translation, t2)
                } else {
                    candidate(InterventionKind::Prohibition { significator: sig2 }, t2)
                }
            }
            (None, None) => return None,
        };

        log::debug!(
            "{body} {aspect} against {sig1}/{sig2}: {:?} at {:.3} days ({leg1:?}, {leg2:?})",
            found.kind,
            found.t_event
        );
        Some(found)
    }

    /// Usable contacts between a significator and a third body.
    ///
    /// A past contact is only looked at when the next one cannot count, so a
    /// body separating from one significator is still seen as a translator.
    fn leg(
        &self,
        jd: f64,
        sig: &BodyPosition,
        other: &BodyPosition,
        aspect: AspectKind,
        days_ahead: f64,
    ) -> Leg {
        let contacts = self.clock.contacts(sig, other, aspect, jd, days_ahead);
        let ahead = contacts
            .future
            .filter(|t| self.future_leg_valid(*t, sig, other, days_ahead));
        let behind = match ahead {
            Some(_) => None,
            None => contacts
                .past
                .filter(|t| self.past_leg_valid(*t, sig, other, days_ahead)),
        };
        Leg { ahead, behind }
    }

    /// A contact still to come, before the main perfection and, when
    /// required, before either body changes sign.
    fn future_leg_valid(
        &self,
        t: f64,
        a: &BodyPosition,
        b: &BodyPosition,
        days_ahead: f64,
    ) -> bool {
        if !t.is_finite() || t <= 0.0 || t >= days_ahead {
            return false;
        }
        if !self.config.in_sign_required() {
            return true;
        }
        [a, b].iter().all(|p| {
            days_to_sign_exit(p.lon, p.speed_lon).map_or(true, |exit| t < exit)
        })
    }

    /// A contact already made, no further back than `days_ahead` and, when
    /// required, after both bodies entered their current signs.
    fn past_leg_valid(
        &self,
        t: f64,
        a: &BodyPosition,
        b: &BodyPosition,
        days_ahead: f64,
    ) -> bool {
        if !t.is_finite() || t >= 0.0 || -t >= days_ahead {
            return false;
        }
        if !self.config.in_sign_required() {
            return true;
        }
        let elapsed = -t;
        [a, b].iter().all(|p| {
            days_since_sign_entry(p.lon, p.speed_lon).map_or(true, |since| elapsed < since)
        })
    }

    fn to_outcome(
        &self,
        chart: &ChartSnapshot,
        sig1: Body,
        sig2: Body,
        candidate: &InterventionCandidate,
    ) -> PerfectionOutcome {
        let aspect = candidate.aspect;
        let quality = Quality::of(aspect);

        match candidate.kind {
            InterventionKind::Prohibition { significator } => PerfectionOutcome::Prohibition {
                significator,
                prohibitor: candidate.body,
                event: OutcomeEvent {
                    t_event: candidate.t_event,
                    aspect,
                    quality,
                    reception: false,
                    reason: format!(
                        "{} {} {} before perfection",
                        candidate.body,
                        aspect.verb(),
                        significator
                    ),
                },
            },
            InterventionKind::Translation | InterventionKind::Collection => {
                let reception = self.has_reception(chart, candidate.body, sig1, sig2);
                let label = if candidate.kind == InterventionKind::Translation {
                    "translation"
                } else {
                    "collection"
                };
                let event = OutcomeEvent {
                    t_event: candidate.t_event,
                    aspect,
                    quality,
                    reception,
                    reason: mediated_reason(label, aspect, quality, reception),
                };
                if candidate.kind == InterventionKind::Translation {
                    PerfectionOutcome::Translation {
                        translator: candidate.body,
                        event,
                    }
                } else {
                    PerfectionOutcome::Collection {
                        collector: candidate.body,
                        event,
                    }
                }
            }
        }
    }

    fn has_reception(&self, chart: &ChartSnapshot, mediator: Body, sig1: Body, sig2: Body) -> bool {
        self.reception.reception(chart, mediator, sig1).is_present()
            || self.reception.reception(chart, mediator, sig2).is_present()
    }
}

/// The candidate with the smallest non-negative event time.
///
/// Ties go to the candidate scanned first.
pub fn select_earliest(candidates: &[InterventionCandidate]) -> Option<&InterventionCandidate> {
    candidates
        .iter()
        .filter(|c| c.t_event.is_finite() && c.t_event >= 0.0)
        .min_by(|a, b| a.t_event.total_cmp(&b.t_event))
}

fn mediated_reason(label: &str, aspect: AspectKind, quality: Quality, reception: bool) -> String {
    match quality {
        Quality::Easier => format!("Perfection by {label} ({aspect}): positive (easier)"),
        Quality::Difficult if reception => format!(
            "Perfection by {label} ({aspect}): positive with difficulty (softened by reception)"
        ),
        Quality::Difficult => format!("Perfection by {label} ({aspect}): positive with difficulty"),
    }
}
