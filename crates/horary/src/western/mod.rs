pub mod dignities;
pub mod reception;
pub mod rulers;
pub mod types;

pub use dignities::{DignitiesService, DignityResult, DignityType};
pub use reception::{DignityReception, Reception, ReceptionKind, ReceptionLookup};
pub use rulers::{exaltation_ruler, sign_ruler, sign_ruler_from_longitude};
pub use types::Sign;
