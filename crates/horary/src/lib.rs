//! Aspect timing and perfection analysis for horary charts.
//!
//! Positions come in as a [`ChartSnapshot`]; the engine finds which aspects
//! are forming, when they perfect, what the Moon is doing, and whether a third
//! body prohibits, translates or collects a perfection between two
//! significators. Chart construction and scoring live elsewhere.

pub mod aspects;
pub mod calendar;
pub mod ephemeris;
pub mod perfection;
pub mod western;

pub use aspects::{AspectCalculator, AspectInfo, AspectKind, LunarAnalyzer, LunarAspect};
pub use calendar::{CalendarConverter, CalendarError, JulianDayCalendar};
pub use ephemeris::{Body, BodyPosition, ChartSnapshot};
pub use horary_config::HoraryConfig;
pub use perfection::{AspectClock, LinearAspectClock, PerfectionOutcome, PerfectionResolver};
pub use western::{DignityReception, Reception, ReceptionLookup};
