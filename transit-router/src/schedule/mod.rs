//! Human-readable itinerary formatting.
//!
//! A raw route lists every intermediate leg. Riders care about boardings:
//! consecutive legs on the same line collapse into a single row telling them
//! where to get on, when it departs, where to get off and when it arrives.

use std::fmt::Write;

use crate::domain::ClockTime;
use crate::graph::Graph;
use crate::planner::Route;

/// One boarding: a contiguous ride on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardingGroup {
    pub line: String,
    pub board_stop: String,
    pub departure: ClockTime,
    pub alight_stop: String,
    pub arrival: ClockTime,
}

/// Collapse consecutive same-line legs of a route into boarding groups.
pub fn boarding_groups(graph: &Graph, route: &Route) -> Vec<BoardingGroup> {
    let mut groups: Vec<BoardingGroup> = Vec::new();

    for leg in &route.legs {
        let connection = graph.connection(leg.connection);
        let alight_stop = graph.stop(connection.to).name().to_string();

        match groups.last_mut() {
            Some(group) if group.line == connection.line => {
                group.alight_stop = alight_stop;
                group.arrival = connection.arrival;
            }
            _ => {
                groups.push(BoardingGroup {
                    line: connection.line.clone(),
                    board_stop: graph.stop(leg.from).name().to_string(),
                    departure: connection.departure,
                    alight_stop,
                    arrival: connection.arrival,
                });
            }
        }
    }

    groups
}

/// Render boarding groups as an aligned table.
pub fn format_schedule(groups: &[BoardingGroup]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<40} {:<15} {:<40} {:<15}",
        "Line", "Board at", "Departure", "Alight at", "Arrival"
    );

    for group in groups {
        let _ = writeln!(
            out,
            "{:<10} {:<40} {:<15} {:<40} {:<15}",
            group.line,
            group.board_stop,
            group.departure.to_string(),
            group.alight_stop,
            group.arrival.to_string()
        );
    }

    out
}
