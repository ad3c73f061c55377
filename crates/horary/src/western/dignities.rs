//! Essential dignities for Western astrology.
//!
//! Rulership, detriment, exaltation and fall of the classical planets.

use crate::ephemeris::Body;
use crate::western::rulers::{exaltation_ruler, sign_ruler};
use crate::western::types::Sign;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DignityType {
    Rulership,
    Detriment,
    Exaltation,
    Fall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DignityResult {
    #[serde(rename = "type")]
    pub dignity_type: DignityType,
    pub sign: Sign,
}

pub struct DignitiesService;

impl DignitiesService {
    /// Get dignities for a body placed at `longitude`
    pub fn get_dignities(&self, body: Body, longitude: f64) -> Vec<DignityResult> {
        let sign = Sign::from_longitude(longitude);
        let opposite = sign.opposite();

        let mut result = Vec::new();
        if sign_ruler(sign) == body {
            result.push(DignityResult {
                dignity_type: DignityType::Rulership,
                sign,
            });
        } else if sign_ruler(opposite) == body {
            result.push(DignityResult {
                dignity_type: DignityType::Detriment,
                sign,
            });
        }
        if exaltation_ruler(sign) == Some(body) {
            result.push(DignityResult {
                dignity_type: DignityType::Exaltation,
                sign,
            });
        } else if exaltation_ruler(opposite) == Some(body) {
            result.push(DignityResult {
                dignity_type: DignityType::Fall,
                sign,
            });
        }
        result
    }

    /// Whether `body` would hold `dignity` at `longitude`
    pub fn has_dignity(&self, body: Body, longitude: f64, dignity: DignityType) -> bool {
        self.get_dignities(body, longitude)
            .iter()
            .any(|d| d.dignity_type == dignity)
    }
}
