pub mod calculator;
pub mod lunar;
pub mod timing;
pub mod types;

pub use calculator::AspectCalculator;
pub use lunar::LunarAnalyzer;
pub use timing::{
    applying_status, days_since_sign_entry, days_to_sign_exit, format_timing_description,
    is_applying, is_separating, separation, sign_index, signed_delta, time_to_perfection,
    will_perfect_before_sign_exit,
};
pub use types::{AspectInfo, AspectKind, LunarAspect};
