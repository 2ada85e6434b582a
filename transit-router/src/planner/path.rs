//! Backpointer-based path reconstruction.

use std::collections::HashMap;

use crate::graph::{ConnectionId, StopId};

use super::search::{Leg, SearchError};

/// Backpointer recorded for each discovered stop: the stop it was best
/// reached from and the connection used. The start stop carries (none, none).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Backpointer {
    pub prev: Option<StopId>,
    pub connection: Option<ConnectionId>,
}

/// Walk backpointers from `goal` to the start, producing the ordered leg
/// sequence from start to goal.
///
/// Fails with [`SearchError::UndiscoveredGoal`] if `goal` never entered the
/// backpointer map; callers must have checked reachability first.
pub(crate) fn reconstruct_path(
    came_from: &HashMap<StopId, Backpointer>,
    goal: StopId,
) -> Result<Vec<Leg>, SearchError> {
    let mut legs = Vec::new();
    let mut cursor = goal;

    loop {
        let back = came_from
            .get(&cursor)
            .ok_or(SearchError::UndiscoveredGoal)?;
        match (back.prev, back.connection) {
            (Some(prev), Some(connection)) => {
                legs.push(Leg {
                    from: prev,
                    connection,
                });
                cursor = prev;
            }
            // (none, none): reached the start.
            _ => break,
        }
    }

    legs.reverse();
    Ok(legs)
}
