pub mod types;

pub use types::{normalize_lon, Body, BodyPosition, ChartSnapshot, CLASSICAL_BODIES};
