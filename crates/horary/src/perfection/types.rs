use crate::aspects::AspectKind;
use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};

/// How readily an intervening aspect carries the matter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Easier,
    Difficult,
}

impl Quality {
    pub fn of(aspect: AspectKind) -> Self {
        if aspect.is_easy() {
            Quality::Easier
        } else {
            Quality::Difficult
        }
    }
}

/// Fields shared by every intervening event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeEvent {
    /// Days from the chart's reference time, inside (0, days_ahead)
    pub t_event: f64,
    pub aspect: AspectKind,
    pub quality: Quality,
    pub reception: bool,
    pub reason: String,
}

/// The intervening event that governs a main perfection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PerfectionOutcome {
    None {
        reason: String,
    },
    Prohibition {
        significator: Body,
        prohibitor: Body,
        #[serde(flatten)]
        event: OutcomeEvent,
    },
    Translation {
        translator: Body,
        #[serde(flatten)]
        event: OutcomeEvent,
    },
    Collection {
        collector: Body,
        #[serde(flatten)]
        event: OutcomeEvent,
    },
}

impl PerfectionOutcome {
    pub fn event(&self) -> Option<&OutcomeEvent> {
        match self {
            PerfectionOutcome::None { .. } => None,
            PerfectionOutcome::Prohibition { event, .. }
            | PerfectionOutcome::Translation { event, .. }
            | PerfectionOutcome::Collection { event, .. } => Some(event),
        }
    }

    pub fn t_event(&self) -> Option<f64> {
        self.event().map(|e| e.t_event)
    }

    pub fn reason(&self) -> &str {
        match self {
            PerfectionOutcome::None { reason } => reason,
            PerfectionOutcome::Prohibition { event, .. }
            | PerfectionOutcome::Translation { event, .. }
            | PerfectionOutcome::Collection { event, .. } => &event.reason,
        }
    }

    pub fn is_prohibited(&self) -> bool {
        matches!(self, PerfectionOutcome::Prohibition { .. })
    }

    /// The third body involved, if any
    pub fn mediator(&self) -> Option<Body> {
        match self {
            PerfectionOutcome::None { .. } => None,
            PerfectionOutcome::Prohibition { prohibitor, .. } => Some(*prohibitor),
            PerfectionOutcome::Translation { translator, .. } => Some(*translator),
            PerfectionOutcome::Collection { collector, .. } => Some(*collector),
        }
    }
}

/// Classification of a single third-body contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InterventionKind {
    Prohibition { significator: Body },
    Translation,
    Collection,
}

/// One classified contact found while scanning, before selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterventionCandidate {
    pub kind: InterventionKind,
    /// The intervening body
    pub body: Body,
    pub aspect: AspectKind,
    pub t_event: f64,
}
