//! Tunable constants for the cost and heuristic strategies.

/// Configuration for the cost/heuristic strategies.
///
/// All strategy constants flow through this struct; nothing reads
/// process-wide state.
#[derive(Debug, Clone)]
pub struct CostConfig {
    /// Assumed average network speed in km/h, used by the time-minimizing
    /// heuristic. The heuristic is a lower bound only insofar as no
    /// connection effectively moves faster than this.
    pub average_speed_kmh: f64,

    /// Weight applied to the geodesic distance in the line-change heuristic.
    pub change_heuristic_weight: f64,

    /// Maximum acceptable wait before boarding, in minutes, under the
    /// line-change criterion. Connections requiring a longer wait are
    /// pruned (infinite edge cost).
    pub max_wait_mins: u16,
}

impl CostConfig {
    /// Create a configuration with the given parameters.
    pub fn new(average_speed_kmh: f64, change_heuristic_weight: f64, max_wait_mins: u16) -> Self {
        Self {
            average_speed_kmh,
            change_heuristic_weight,
            max_wait_mins,
        }
    }

    /// The assumed speed converted to km per minute, the unit edge costs
    /// are measured in.
    pub fn speed_km_per_min(&self) -> f64 {
        self.average_speed_kmh / 60.0
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 4.85,
            change_heuristic_weight: 0.25,
            max_wait_mins: 120,
        }
    }
}
