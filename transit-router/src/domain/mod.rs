//! Domain value types for the transit router.
//!
//! These types represent validated timetable data. Invariants are enforced
//! at construction time, so code that receives these values can trust them.

mod time;

pub use time::{ClockTime, MINUTES_PER_DAY, TimeError};
