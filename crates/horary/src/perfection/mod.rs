pub mod clock;
pub mod resolver;
pub mod types;

pub use clock::{AspectClock, Contacts, LinearAspectClock};
pub use resolver::{select_earliest, PerfectionResolver, NO_PROHIBITION_REASON};
pub use types::{InterventionCandidate, InterventionKind, OutcomeEvent, PerfectionOutcome, Quality};
