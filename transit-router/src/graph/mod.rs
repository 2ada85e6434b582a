//! The time-expanded transit graph.
//!
//! Stops are held in an arena owned by [`Graph`] and addressed by [`StopId`];
//! connections refer to their destination by id rather than by pointer, which
//! sidesteps the Stop ↔ Connection ownership cycle. The graph is built once
//! from normalized records and is read-only afterwards, so independent
//! searches may share a `&Graph` across threads.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::domain::ClockTime;

/// Handle to a stop in a [`Graph`]'s arena.
///
/// Ids are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(usize);

/// Handle to a connection: the stop it departs from plus its position in
/// that stop's outgoing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId {
    pub(crate) stop: StopId,
    pub(crate) index: usize,
}

/// A named transit location.
///
/// Two stops are equal, and hash identically, iff their names are equal.
/// Coordinates are deliberately excluded: raw timetables record slightly
/// different coordinates for the same named stop across rows, and lookups
/// keyed on a stop must not be sensitive to that.
#[derive(Debug, Clone)]
pub struct Stop {
    name: String,
    latitude: f64,
    longitude: f64,
    outgoing: Vec<Connection>,
}

impl Stop {
    /// The stop's name, its unique identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Outgoing connections, in load order. The order carries no meaning.
    pub fn outgoing(&self) -> &[Connection] {
        &self.outgoing
    }
}

impl PartialEq for Stop {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Stop {}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// One scheduled vehicle leg.
///
/// A connection does not store its own origin; origin is implied by which
/// stop's outgoing list holds it. `arrival` may be numerically less than
/// `departure` when the leg crosses midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Line or route identifier.
    pub line: String,
    pub departure: ClockTime,
    pub arrival: ClockTime,
    /// The stop this leg arrives at.
    pub to: StopId,
}

/// One normalized timetable record, the input to [`Graph::from_records`].
///
/// Times must already be minute-of-day values and coordinates already
/// de-duplicated; the loader guarantees both before records reach the graph.
#[derive(Debug, Clone)]
pub struct ConnectionRecord {
    pub line: String,
    pub departure: ClockTime,
    pub arrival: ClockTime,
    pub from_name: String,
    pub to_name: String,
    pub from_lat: f64,
    pub from_lon: f64,
    pub to_lat: f64,
    pub to_lon: f64,
}

/// The full set of stops, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    stops: Vec<Stop>,
    by_name: HashMap<String, StopId>,
}

impl Graph {
    /// Build a graph from normalized records.
    ///
    /// For each record the destination and origin stops are looked up or
    /// created by name, then the connection is appended to the origin's
    /// outgoing list. Stops are created lazily and shared across every
    /// record that mentions them. No validation happens here.
    pub fn from_records(records: impl IntoIterator<Item = ConnectionRecord>) -> Self {
        let mut graph = Graph::default();

        for record in records {
            let to = graph.intern(&record.to_name, record.to_lat, record.to_lon);
            let from = graph.intern(&record.from_name, record.from_lat, record.from_lon);

            graph.stops[from.0].outgoing.push(Connection {
                line: record.line,
                departure: record.departure,
                arrival: record.arrival,
                to,
            });
        }

        graph
    }

    fn intern(&mut self, name: &str, latitude: f64, longitude: f64) -> StopId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }

        let id = StopId(self.stops.len());
        self.stops.push(Stop {
            name: name.to_owned(),
            latitude,
            longitude,
            outgoing: Vec::new(),
        });
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Look up a stop id by name. Lookup is exact; the loader stores names
    /// as they appear in the timetable.
    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.by_name.get(name).copied()
    }

    /// The stop behind an id issued by this graph.
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.0]
    }

    /// Outgoing connections of a stop.
    pub fn outgoing(&self, id: StopId) -> &[Connection] {
        self.stop(id).outgoing()
    }

    /// The connection behind an id issued by this graph.
    pub fn connection(&self, id: ConnectionId) -> &Connection {
        &self.stop(id.stop).outgoing()[id.index]
    }

    /// Number of distinct stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Total number of connections across all stops.
    pub fn connection_count(&self) -> usize {
        self.stops.iter().map(|s| s.outgoing.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Iterate over all stops with their ids.
    pub fn stops(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops.iter().enumerate().map(|(i, s)| (StopId(i), s))
    }
}
