//! Best-first journey planning.
//!
//! One generalized A* engine serves both optimization criteria; the
//! cost/heuristic pair is the pluggable part. With a zero heuristic the loop
//! degenerates to uniform-cost (Dijkstra) search.

mod config;
mod cost;
mod frontier;
mod path;
mod search;

pub use config::CostConfig;
pub use cost::{CostModel, Criterion};
pub use frontier::{Frontier, FrontierEntry};
pub use search::{Leg, Route, Router, SearchError};
