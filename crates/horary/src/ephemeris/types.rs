use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Bodies the engine knows about.
///
/// Only the seven classical planets take part in lunar targeting and in
/// prohibition scans; the outer planets appear in pairwise scans when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// The traditional seven.
pub const CLASSICAL_BODIES: [Body; 7] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
];

impl Body {
    /// Lowercase identifier, matching configuration keys.
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    pub fn is_classical(self) -> bool {
        !matches!(self, Body::Uranus | Body::Neptune | Body::Pluto)
    }

    pub fn is_luminary(self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Wrap a longitude into [0, 360).
///
/// `rem_euclid` rounds tiny negative inputs up to exactly 360.0; those fold to 0.
pub fn normalize_lon(lon: f64) -> f64 {
    let lon = lon.rem_euclid(360.0);
    if lon >= 360.0 {
        0.0
    } else {
        lon
    }
}

/// Position of a body at the chart's reference time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPosition")]
pub struct BodyPosition {
    /// Ecliptic longitude in degrees, [0, 360)
    pub lon: f64,
    /// Speed in longitude (degrees per day); negative when retrograde
    pub speed_lon: f64,
}

impl BodyPosition {
    /// Build a position, normalizing the longitude into [0, 360).
    pub fn new(lon: f64, speed_lon: f64) -> Self {
        Self {
            lon: normalize_lon(lon),
            speed_lon,
        }
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed_lon < 0.0
    }

    /// Longitude after `days` of linear motion.
    pub fn projected_lon(&self, days: f64) -> f64 {
        normalize_lon(self.lon + self.speed_lon * days)
    }
}

/// Wire form of [`BodyPosition`]; deserialized positions go through `new`.
#[derive(Deserialize)]
struct RawPosition {
    lon: f64,
    speed_lon: f64,
}

impl From<RawPosition> for BodyPosition {
    fn from(raw: RawPosition) -> Self {
        BodyPosition::new(raw.lon, raw.speed_lon)
    }
}

/// Immutable snapshot of every known body at one reference time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    /// Reference time as a fractional Julian day (UT)
    pub julian_day: f64,
    pub bodies: BTreeMap<Body, BodyPosition>,
}

impl ChartSnapshot {
    pub fn new(julian_day: f64) -> Self {
        Self {
            julian_day,
            bodies: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, body: Body, lon: f64, speed_lon: f64) -> Self {
        self.bodies.insert(body, BodyPosition::new(lon, speed_lon));
        self
    }

    pub fn get(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.get(&body)
    }
}
