//! Traditional sign rulers and exaltation lords.

use crate::ephemeris::Body;
use crate::western::types::Sign;

/// Domicile ruler of a sign (traditional rulership)
pub fn sign_ruler(sign: Sign) -> Body {
    match sign {
        Sign::Aries | Sign::Scorpio => Body::Mars,
        Sign::Taurus | Sign::Libra => Body::Venus,
        Sign::Gemini | Sign::Virgo => Body::Mercury,
        Sign::Cancer => Body::Moon,
        Sign::Leo => Body::Sun,
        Sign::Sagittarius | Sign::Pisces => Body::Jupiter,
        Sign::Capricorn | Sign::Aquarius => Body::Saturn,
    }
}

/// Body exalted in a sign, if any
pub fn exaltation_ruler(sign: Sign) -> Option<Body> {
    match sign {
        Sign::Aries => Some(Body::Sun),
        Sign::Taurus => Some(Body::Moon),
        Sign::Cancer => Some(Body::Jupiter),
        Sign::Virgo => Some(Body::Mercury),
        Sign::Libra => Some(Body::Saturn),
        Sign::Capricorn => Some(Body::Mars),
        Sign::Pisces => Some(Body::Venus),
        Sign::Gemini | Sign::Leo | Sign::Scorpio | Sign::Sagittarius | Sign::Aquarius => None,
    }
}

/// Domicile ruler of the sign holding a longitude
pub fn sign_ruler_from_longitude(longitude: f64) -> Body {
    sign_ruler(Sign::from_longitude(longitude))
}
