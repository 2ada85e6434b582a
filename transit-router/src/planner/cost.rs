//! Cost and heuristic strategies.
//!
//! Both optimization criteria share one pair of signatures, so the search
//! engine stays strategy-agnostic: `edge_cost` prices taking a candidate
//! connection given the journey so far, and `heuristic` estimates the
//! remaining cost to the goal. The strategies are a tagged variant rather
//! than trait objects; dispatch is a `match`.

use geo::{Distance, Haversine, Point};

use crate::domain::ClockTime;
use crate::graph::{Connection, Graph, StopId};

use super::config::CostConfig;

/// The quantity a search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Total elapsed time in minutes, waiting included.
    TravelTime,
    /// Number of line changes.
    LineChanges,
}

/// A criterion bound to its configuration and graph.
///
/// `previous` is the connection the journey arrived on, absent on the first
/// hop from the start stop. Both strategies tolerate its absence: there is
/// no continuity constraint yet, only the waiting checks against the
/// search's start time.
#[derive(Debug, Clone, Copy)]
pub struct CostModel<'a> {
    criterion: Criterion,
    config: &'a CostConfig,
    graph: &'a Graph,
}

impl<'a> CostModel<'a> {
    pub fn new(criterion: Criterion, config: &'a CostConfig, graph: &'a Graph) -> Self {
        Self {
            criterion,
            config,
            graph,
        }
    }

    /// Cost increment for taking `candidate` after a journey that has
    /// accumulated `cumulative_cost` since `start_time`.
    ///
    /// Always non-negative; returns infinity for edges the strategy prunes.
    pub fn edge_cost(
        &self,
        start_time: ClockTime,
        cumulative_cost: f64,
        _goal: StopId,
        previous: Option<&Connection>,
        candidate: &Connection,
    ) -> f64 {
        match self.criterion {
            Criterion::TravelTime => travel_time_cost(start_time, cumulative_cost, candidate),
            Criterion::LineChanges => {
                line_change_cost(self.config, start_time, previous, candidate)
            }
        }
    }

    /// Lower-bound estimate of the remaining cost from `current` to `goal`,
    /// assuming the journey takes `candidate` next.
    ///
    /// The time estimate is admissible as long as no connection outpaces the
    /// configured average speed; it ignores waiting time, which can only add
    /// to the true cost. The line-change estimate is *not*
    /// guaranteed admissible: it returns zero whenever the candidate line
    /// also serves the goal, which can overestimate how helpful that line is.
    pub fn heuristic(
        &self,
        _start_time: ClockTime,
        current: StopId,
        goal: StopId,
        _previous: Option<&Connection>,
        candidate: &Connection,
    ) -> f64 {
        match self.criterion {
            Criterion::TravelTime => {
                self.distance_km(current, goal) / self.config.speed_km_per_min()
            }
            Criterion::LineChanges => {
                let goal_served_by_line = self
                    .graph
                    .outgoing(goal)
                    .iter()
                    .any(|c| c.line == candidate.line);
                if goal_served_by_line {
                    0.0
                } else {
                    self.distance_km(current, goal) * self.config.change_heuristic_weight
                }
            }
        }
    }

    /// Haversine distance between two stops, in kilometres.
    fn distance_km(&self, from: StopId, to: StopId) -> f64 {
        let from = self.graph.stop(from);
        let to = self.graph.stop(to);
        let a = Point::new(from.longitude(), from.latitude());
        let b = Point::new(to.longitude(), to.latitude());
        Haversine.distance(a, b) / 1000.0
    }
}

/// Minutes spent waiting for `candidate` and riding it, measured on the
/// cyclic clock from the absolute time the journey reaches the stop.
fn travel_time_cost(start_time: ClockTime, cumulative_cost: f64, candidate: &Connection) -> f64 {
    // Time-mode costs are whole minutes, so the cumulative cost is exact.
    let clock = start_time.advance(cumulative_cost.round() as u32);
    let waiting = clock.minutes_until(candidate.departure);
    let travel = candidate.departure.minutes_until(candidate.arrival);
    f64::from(u32::from(waiting) + u32::from(travel))
}

/// 1 if boarding `candidate` is a line change, 0 if it is a direct
/// continuation; infinity when the wait before boarding exceeds the limit.
fn line_change_cost(
    config: &CostConfig,
    start_time: ClockTime,
    previous: Option<&Connection>,
    candidate: &Connection,
) -> f64 {
    let reached_at = match previous {
        Some(prev) => prev.arrival,
        None => start_time,
    };
    if reached_at.minutes_until(candidate.departure) > config.max_wait_mins {
        return f64::INFINITY;
    }

    match previous {
        // First hop: a change is only charged when the candidate departs
        // numerically before the start time (it has already left today).
        None => {
            if candidate.departure.minutes() < start_time.minutes() {
                1.0
            } else {
                0.0
            }
        }
        Some(prev) => {
            if prev.line != candidate.line || prev.arrival != candidate.departure {
                1.0
            } else {
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ConnectionRecord;

    fn conn(line: &str, dep: &str, arr: &str, to: StopId) -> Connection {
        Connection {
            line: line.to_string(),
            departure: ClockTime::parse(dep).unwrap(),
            arrival: ClockTime::parse(arr).unwrap(),
            to,
        }
    }

    fn t(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    /// A: (51.10, 17.00), B: (51.10, 17.10), goal C: (51.10, 17.20),
    /// with line "1" departing the goal (so "1" serves C).
    fn fixture() -> Graph {
        let record = |line: &str, from: &str, to: &str, coords: [(f64, f64); 2]| {
            ConnectionRecord {
                line: line.to_string(),
                departure: t("10:00"),
                arrival: t("10:20"),
                from_name: from.to_string(),
                to_name: to.to_string(),
                from_lat: coords[0].0,
                from_lon: coords[0].1,
                to_lat: coords[1].0,
                to_lon: coords[1].1,
            }
        };
        Graph::from_records(vec![
            record("1", "A", "B", [(51.10, 17.00), (51.10, 17.10)]),
            record("1", "C", "B", [(51.10, 17.20), (51.10, 17.10)]),
        ])
    }

    #[test]
    fn travel_time_sums_wait_and_ride() {
        let graph = fixture();
        let config = CostConfig::default();
        let model = CostModel::new(Criterion::TravelTime, &config, &graph);
        let candidate = conn("1", "10:15", "10:40", graph.stop_id("B").unwrap());

        // Reached the stop at 10:05 (start 10:00 + 5 accumulated minutes):
        // wait 10, ride 25.
        let cost = model.edge_cost(t("10:00"), 5.0, graph.stop_id("B").unwrap(), None, &candidate);
        assert_eq!(cost, 35.0);
    }

    #[test]
    fn travel_time_wraps_past_midnight() {
        let graph = fixture();
        let config = CostConfig::default();
        let model = CostModel::new(Criterion::TravelTime, &config, &graph);

        // Dep 23:50, arr 00:10 is a 20-minute leg, never a negative one.
        let candidate = conn("N", "23:50", "00:10", graph.stop_id("B").unwrap());
        let cost = model.edge_cost(
            t("23:50"),
            0.0,
            graph.stop_id("B").unwrap(),
            None,
            &candidate,
        );
        assert_eq!(cost, 20.0);

        // Reaching the stop just after the departure means waiting a full
        // day minus the overshoot.
        let cost = model.edge_cost(
            t("23:55"),
            0.0,
            graph.stop_id("B").unwrap(),
            None,
            &candidate,
        );
        assert_eq!(cost, 1435.0 + 20.0);
    }

    #[test]
    fn line_change_charges_on_line_or_time_break() {
        let graph = fixture();
        let config = CostConfig::default();
        let model = CostModel::new(Criterion::LineChanges, &config, &graph);
        let goal = graph.stop_id("B").unwrap();

        let prev = conn("1", "10:00", "10:10", goal);

        // Direct continuation: same line, arrival meets departure.
        let direct = conn("1", "10:10", "10:20", goal);
        assert_eq!(model.edge_cost(t("09:55"), 0.0, goal, Some(&prev), &direct), 0.0);

        // Different line.
        let other_line = conn("2", "10:10", "10:20", goal);
        assert_eq!(
            model.edge_cost(t("09:55"), 0.0, goal, Some(&prev), &other_line),
            1.0
        );

        // Same line but a dwell gap breaks the continuation.
        let gapped = conn("1", "10:15", "10:25", goal);
        assert_eq!(model.edge_cost(t("09:55"), 0.0, goal, Some(&prev), &gapped), 1.0);
    }

    #[test]
    fn line_change_first_hop_uses_start_time() {
        let graph = fixture();
        // A departure "in the past" means waiting almost a full day for the
        // next one, so the waiting limit must be permissive to observe the
        // charge at all.
        let config = CostConfig::new(4.85, 0.25, 1439);
        let model = CostModel::new(Criterion::LineChanges, &config, &graph);
        let goal = graph.stop_id("B").unwrap();

        // Departure still ahead of the start time: free.
        let ahead = conn("1", "10:05", "10:20", goal);
        assert_eq!(model.edge_cost(t("10:00"), 0.0, goal, None, &ahead), 0.0);

        // Departure numerically before the start time: already left today.
        let behind = conn("1", "09:55", "10:20", goal);
        assert_eq!(model.edge_cost(t("10:00"), 0.0, goal, None, &behind), 1.0);
    }

    #[test]
    fn line_change_prunes_over_limit_waits() {
        let graph = fixture();
        let config = CostConfig::new(4.85, 0.25, 30);
        let model = CostModel::new(Criterion::LineChanges, &config, &graph);
        let goal = graph.stop_id("B").unwrap();

        let prev = conn("1", "10:00", "10:10", goal);
        let long_wait = conn("2", "10:41", "11:00", goal);
        let cost = model.edge_cost(t("09:00"), 0.0, goal, Some(&prev), &long_wait);
        assert!(cost.is_infinite());

        // First hop waits are measured from the start time.
        let cost = model.edge_cost(t("10:15"), 0.0, goal, None, &long_wait);
        assert!(cost.is_finite());
        let cost = model.edge_cost(t("09:30"), 0.0, goal, None, &long_wait);
        assert!(cost.is_infinite());
    }

    #[test]
    fn time_heuristic_scales_distance_by_speed() {
        let graph = fixture();
        let config = CostConfig::new(60.0, 0.25, 120); // 1 km/min
        let model = CostModel::new(Criterion::TravelTime, &config, &graph);

        let a = graph.stop_id("A").unwrap();
        let c = graph.stop_id("C").unwrap();
        let candidate = conn("1", "10:00", "10:20", c);

        let estimate = model.heuristic(t("10:00"), a, c, None, &candidate);
        // A and C are ~14 km apart along the 51.1° parallel.
        assert!((13.0..15.0).contains(&estimate), "estimate = {estimate}");

        // At the goal the estimate vanishes.
        assert_eq!(model.heuristic(t("10:00"), c, c, None, &candidate), 0.0);
    }

    #[test]
    fn change_heuristic_is_zero_when_line_serves_goal() {
        let graph = fixture();
        let config = CostConfig::default();
        let model = CostModel::new(Criterion::LineChanges, &config, &graph);

        let a = graph.stop_id("A").unwrap();
        let c = graph.stop_id("C").unwrap();

        // Line "1" departs C, so staying on "1" looks free.
        let on_serving_line = conn("1", "10:00", "10:20", c);
        assert_eq!(model.heuristic(t("10:00"), a, c, None, &on_serving_line), 0.0);

        // Line "7" never touches C: weighted distance.
        let off_line = conn("7", "10:00", "10:20", c);
        let estimate = model.heuristic(t("10:00"), a, c, None, &off_line);
        assert!(estimate > 0.0);
    }
}
