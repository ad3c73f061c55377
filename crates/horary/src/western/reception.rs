//! Reception between two bodies by domicile or exaltation.
//!
//! Body A receives body B when B stands in a sign where A rules or is exalted.

use crate::ephemeris::{Body, ChartSnapshot};
use crate::western::dignities::{DignitiesService, DignityType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceptionKind {
    None,
    MutualRulership,
    MutualExaltation,
    /// One receives by domicile, the other by exaltation
    MixedReception,
    RulershipReception,
    ExaltationReception,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reception {
    pub kind: ReceptionKind,
    /// The receiving body for one-way reception
    pub receiver: Option<Body>,
}

impl Reception {
    pub fn none() -> Self {
        Self {
            kind: ReceptionKind::None,
            receiver: None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.kind != ReceptionKind::None
    }

    pub fn is_mutual(&self) -> bool {
        matches!(
            self.kind,
            ReceptionKind::MutualRulership
                | ReceptionKind::MutualExaltation
                | ReceptionKind::MixedReception
        )
    }
}

/// Reception lookup used to annotate perfection outcomes.
pub trait ReceptionLookup {
    fn reception(&self, chart: &ChartSnapshot, body: Body, significator: Body) -> Reception;
}

/// Reception from the traditional dignity tables
#[derive(Debug, Clone, Copy, Default)]
pub struct DignityReception;

impl DignityReception {
    /// How `receiver` receives a body standing at `longitude`, if at all
    fn receives(receiver: Body, longitude: f64) -> Option<DignityType> {
        let service = DignitiesService;
        if service.has_dignity(receiver, longitude, DignityType::Rulership) {
            Some(DignityType::Rulership)
        } else if service.has_dignity(receiver, longitude, DignityType::Exaltation) {
            Some(DignityType::Exaltation)
        } else {
            None
        }
    }
}

impl ReceptionLookup for DignityReception {
    fn reception(&self, chart: &ChartSnapshot, body: Body, significator: Body) -> Reception {
        let (Some(body_pos), Some(sig_pos)) = (chart.get(body), chart.get(significator)) else {
            return Reception::none();
        };

        let body_receives = Self::receives(body, sig_pos.lon);
        let sig_receives = Self::receives(significator, body_pos.lon);

        let (kind, receiver) = match (body_receives, sig_receives) {
            (Some(DignityType::Rulership), Some(DignityType::Rulership)) => {
                (ReceptionKind::MutualRulership, None)
            }
            (Some(DignityType::Exaltation), Some(DignityType::Exaltation)) => {
                (ReceptionKind::MutualExaltation, None)
            }
            (Some(_), Some(_)) => (ReceptionKind::MixedReception, None),
            (Some(DignityType::Rulership), None) => (ReceptionKind::RulershipReception, Some(body)),
            (Some(_), None) => (ReceptionKind::ExaltationReception, Some(body)),
            (None, Some(DignityType::Rulership)) => {
                (ReceptionKind::RulershipReception, Some(significator))
            }
            (None, Some(_)) => (ReceptionKind::ExaltationReception, Some(significator)),
            (None, None) => (ReceptionKind::None, None),
        };

        Reception { kind, receiver }
    }
}
