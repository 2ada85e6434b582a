//! Transit journey router.
//!
//! Computes minimum-cost itineraries through a time-expanded public-transit
//! network: given a departure stop, an arrival stop, a departure time and an
//! optimization criterion (total elapsed time, or number of line changes), it
//! returns the lowest-cost sequence of scheduled vehicle legs connecting them.

pub mod domain;
pub mod graph;
pub mod loader;
pub mod planner;
pub mod schedule;
