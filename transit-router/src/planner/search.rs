//! The generalized best-first search engine.
//!
//! One A* loop serves both optimization criteria; with a zero heuristic it
//! degenerates to uniform-cost (Dijkstra) search. The engine owns no state
//! between invocations: each call builds its own cost map, backpointer map
//! and frontier, so independent searches can run concurrently against the
//! same read-only graph.

use std::collections::HashMap;

use crate::domain::ClockTime;
use crate::graph::{ConnectionId, Graph, StopId};

use super::config::CostConfig;
use super::cost::{CostModel, Criterion};
use super::frontier::Frontier;
use super::path::{Backpointer, reconstruct_path};

/// Error from journey search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The frontier emptied before the goal was dequeued: no sequence of
    /// connections links the stops. Reportable, not a crash.
    #[error("no route from {start} to {goal}")]
    UnreachableGoal { start: String, goal: String },

    /// A stop name is absent from the graph. Detected before the search
    /// begins, never inside the engine.
    #[error("unknown stop: {0}")]
    UnknownStop(String),

    /// Path reconstruction was asked for a goal the search never discovered.
    #[error("goal stop was never discovered by the search")]
    UndiscoveredGoal,
}

/// One leg of a computed itinerary: the stop it departs from and the
/// connection taken. Resolve details through the [`Graph`] that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub from: StopId,
    pub connection: ConnectionId,
}

/// A computed itinerary: total cost under the chosen criterion plus the
/// ordered leg sequence from start to goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub cost: f64,
    pub legs: Vec<Leg>,
}

impl Route {
    /// Check that consecutive legs connect: each leg must depart from the
    /// stop the previous one arrived at.
    pub fn is_continuous(&self, graph: &Graph) -> bool {
        self.legs
            .windows(2)
            .all(|pair| graph.connection(pair[0].connection).to == pair[1].from)
    }
}

/// Journey planner over a built graph.
pub struct Router<'a> {
    graph: &'a Graph,
    model: CostModel<'a>,
}

impl<'a> Router<'a> {
    /// Create a router for one optimization criterion.
    pub fn new(graph: &'a Graph, criterion: Criterion, config: &'a CostConfig) -> Self {
        Self {
            graph,
            model: CostModel::new(criterion, config, graph),
        }
    }

    /// Resolve stop names and search. Fails with [`SearchError::UnknownStop`]
    /// before any search work if either name is absent from the graph.
    pub fn route_between(
        &self,
        start: &str,
        goal: &str,
        start_time: ClockTime,
    ) -> Result<Route, SearchError> {
        let start = self
            .graph
            .stop_id(start)
            .ok_or_else(|| SearchError::UnknownStop(start.to_string()))?;
        let goal = self
            .graph
            .stop_id(goal)
            .ok_or_else(|| SearchError::UnknownStop(goal.to_string()))?;
        self.route(start, goal, start_time)
    }

    /// Best-first search from `start` to `goal`, departing at `start_time`.
    ///
    /// Returns the minimum total cost under the router's criterion and the
    /// leg sequence achieving it, or [`SearchError::UnreachableGoal`].
    pub fn route(
        &self,
        start: StopId,
        goal: StopId,
        start_time: ClockTime,
    ) -> Result<Route, SearchError> {
        let mut cost_so_far: HashMap<StopId, f64> = HashMap::new();
        let mut came_from: HashMap<StopId, Backpointer> = HashMap::new();
        let mut frontier = Frontier::new();

        cost_so_far.insert(start, 0.0);
        came_from.insert(start, Backpointer::default());
        frontier.push(0.0, 0.0, start);

        let mut expanded = 0usize;

        let goal_cost = loop {
            let Some(entry) = frontier.pop() else {
                // Exhausted: the goal is unreachable from the start.
                tracing::debug!(expanded, "frontier exhausted before reaching goal");
                return Err(SearchError::UnreachableGoal {
                    start: self.graph.stop(start).name().to_string(),
                    goal: self.graph.stop(goal).name().to_string(),
                });
            };
            let current = entry.stop;

            let Some(&best) = cost_so_far.get(&current) else {
                // Every pushed stop has a recorded cost; nothing to do if not.
                continue;
            };
            // Lazy deletion: a better cost was recorded after this entry was
            // pushed. Checked before the goal test, so a superseded entry can
            // never terminate the search early.
            if entry.cost > best {
                continue;
            }

            if current == goal {
                break best;
            }
            expanded += 1;

            let previous = came_from
                .get(&current)
                .and_then(|b| b.connection)
                .map(|id| self.graph.connection(id));

            for (index, connection) in self.graph.outgoing(current).iter().enumerate() {
                let step =
                    self.model
                        .edge_cost(start_time, best, goal, previous, connection);
                // An infinite step is a pruned edge: it can never improve a
                // neighbor, discovered or not.
                if !step.is_finite() {
                    continue;
                }

                let new_cost = best + step;
                let neighbor = connection.to;
                let improves = match cost_so_far.get(&neighbor) {
                    Some(&known) => new_cost < known,
                    None => true,
                };
                if !improves {
                    continue;
                }

                cost_so_far.insert(neighbor, new_cost);
                came_from.insert(
                    neighbor,
                    Backpointer {
                        prev: Some(current),
                        connection: Some(ConnectionId {
                            stop: current,
                            index,
                        }),
                    },
                );
                let priority = new_cost
                    + self
                        .model
                        .heuristic(start_time, current, goal, previous, connection);
                frontier.push(priority, new_cost, neighbor);
            }
        };

        tracing::debug!(expanded, cost = goal_cost, "goal reached");

        let legs = reconstruct_path(&came_from, goal)?;
        Ok(Route {
            cost: goal_cost,
            legs,
        })
    }
}
