use crate::ephemeris::Body;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ptolemaic aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    /// Scan order. Scanners that keep only the first match per pair rely on it.
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle in degrees
    pub fn degrees(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    /// Nominal orb in degrees
    pub fn orb(self) -> f64 {
        match self {
            AspectKind::Sextile => 6.0,
            AspectKind::Conjunction
            | AspectKind::Square
            | AspectKind::Trine
            | AspectKind::Opposition => 8.0,
        }
    }

    /// Multiplier applied to combined moieties.
    pub fn moiety_factor(self) -> f64 {
        match self {
            AspectKind::Conjunction | AspectKind::Opposition => 1.0,
            AspectKind::Trine | AspectKind::Square => 0.85,
            AspectKind::Sextile => 0.7,
        }
    }

    /// Conjunction, sextile and trine mediate easily; square and opposition do not.
    pub fn is_easy(self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction | AspectKind::Sextile | AspectKind::Trine
        )
    }

    /// Third-person verb, as in "mars squares venus"
    pub fn verb(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjoins",
            AspectKind::Sextile => "sextiles",
            AspectKind::Square => "squares",
            AspectKind::Trine => "trines",
            AspectKind::Opposition => "opposes",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An aspect between the Moon and another body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LunarAspect {
    pub body: Body,
    pub aspect: AspectKind,
    /// Current deviation from the exact angle
    pub orb: f64,
    pub degrees_from_exact: f64,
    /// Signed days to perfection: positive ahead, negative since exact
    pub perfection_eta_days: f64,
    pub perfection_eta_description: String,
    pub applying: bool,
}

/// An aspect found between two bodies of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectInfo {
    pub body_a: Body,
    pub body_b: Body,
    pub aspect: AspectKind,
    pub orb: f64,
    pub applying: bool,
    /// Signed days to perfection; infinite when there is no relative motion
    pub time_to_perfection: f64,
    pub perfection_within_sign: bool,
    /// Estimated moment of perfection, when it could be converted
    pub exact_time: Option<DateTime<Utc>>,
    pub degrees_to_exact: f64,
}
