//! Engine configuration for horary evaluation.
//!
//! Every field has a declared default, so a missing file, an empty document or
//! a partial table all resolve to a complete [`HoraryConfig`] at load time.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration, resolved once per evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HoraryConfig {
    #[serde(default)]
    pub orbs: OrbConfig,
    #[serde(default)]
    pub perfection: PerfectionConfig,
    #[serde(default)]
    pub timing: TimingConfig,
}

/// Orb settings for the aspect scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbConfig {
    /// Added to the nominal orb when either body is the Sun (legacy mode only)
    #[serde(default = "default_sun_orb_bonus")]
    pub sun_orb_bonus: f64,
    /// Added to the nominal orb when either body is the Moon (legacy mode only)
    #[serde(default = "default_moon_orb_bonus")]
    pub moon_orb_bonus: f64,
    /// Per-body full orbs. `None` selects the legacy fixed-orb model.
    #[serde(default)]
    pub moieties: Option<MoietyTable>,
}

fn default_sun_orb_bonus() -> f64 {
    2.0
}

fn default_moon_orb_bonus() -> f64 {
    1.0
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            sun_orb_bonus: default_sun_orb_bonus(),
            moon_orb_bonus: default_moon_orb_bonus(),
            moieties: None,
        }
    }
}

/// Full traditional orb of each body, in degrees.
///
/// The table stores the full orb; [`MoietyTable::moiety`] halves it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MoietyTable {
    #[serde(default)]
    pub sun: f64,
    #[serde(default)]
    pub moon: f64,
    #[serde(default)]
    pub mercury: f64,
    #[serde(default)]
    pub venus: f64,
    #[serde(default)]
    pub mars: f64,
    #[serde(default)]
    pub jupiter: f64,
    #[serde(default)]
    pub saturn: f64,
    #[serde(default)]
    pub uranus: f64,
    #[serde(default)]
    pub neptune: f64,
    #[serde(default)]
    pub pluto: f64,
}

impl MoietyTable {
    /// Classic orbs after William Lilly.
    pub fn lilly() -> Self {
        Self {
            sun: 15.0,
            moon: 12.0,
            mercury: 7.0,
            venus: 7.0,
            mars: 7.5,
            jupiter: 9.0,
            saturn: 9.0,
            ..Self::default()
        }
    }

    /// Full orb for a body id ("sun", "moon", ...). Unknown ids have no orb.
    pub fn full_orb(&self, body_id: &str) -> f64 {
        match body_id {
            "sun" => self.sun,
            "moon" => self.moon,
            "mercury" => self.mercury,
            "venus" => self.venus,
            "mars" => self.mars,
            "jupiter" => self.jupiter,
            "saturn" => self.saturn,
            "uranus" => self.uranus,
            "neptune" => self.neptune,
            "pluto" => self.pluto,
            _ => 0.0,
        }
    }

    /// Half of the body's full orb.
    pub fn moiety(&self, body_id: &str) -> f64 {
        self.full_orb(body_id) / 2.0
    }
}

/// Rules for intervening-aspect detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfectionConfig {
    #[serde(default = "default_true")]
    pub require_in_sign: bool,
    #[serde(default)]
    pub allow_out_of_sign: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PerfectionConfig {
    fn default() -> Self {
        Self {
            require_in_sign: true,
            allow_out_of_sign: false,
        }
    }
}

impl PerfectionConfig {
    /// Whether an event must occur before either body leaves its sign.
    pub fn in_sign_required(&self) -> bool {
        self.require_in_sign && !self.allow_out_of_sign
    }
}

/// Timing estimation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Calendar timestamps are only estimated for perfections sooner than this.
    #[serde(default = "default_max_future_days")]
    pub max_future_days: f64,
}

fn default_max_future_days() -> f64 {
    365.0
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            max_future_days: default_max_future_days(),
        }
    }
}

impl HoraryConfig {
    /// Parse a TOML document. Absent tables and keys take their defaults.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse horary config: {e}"))
    }
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<HoraryConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read horary config {}: {e}", path.display()))?;
    let config = HoraryConfig::from_toml_str(&text)?;
    log::info!("Loaded horary config from {}", path.display());
    Ok(config)
}

/// Try common locations in order and fall back to defaults when none is readable.
///
/// A file that exists but fails to parse is an error rather than a silent default.
pub fn load_config_or_default<P: AsRef<Path>>(candidates: &[P]) -> anyhow::Result<HoraryConfig> {
    for p in candidates {
        let path = p.as_ref();
        if path.exists() {
            return load_config(path);
        }
    }
    log::info!("No horary config found, using defaults");
    Ok(HoraryConfig::default())
}
