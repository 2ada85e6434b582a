//! The search frontier: a min-priority queue of discovered stops.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::StopId;

/// An entry popped from the frontier.
#[derive(Debug, Clone, Copy)]
pub struct FrontierEntry {
    /// Ordering key: cumulative cost plus heuristic estimate.
    pub priority: f64,
    /// Cumulative cost recorded when the entry was pushed. The engine
    /// compares this against the current best to detect stale entries.
    pub cost: f64,
    pub stop: StopId,
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    entry: FrontierEntry,
    seq: u64,
}

// BinaryHeap is a max-heap; flip the comparison to get a min-heap. Ties in
// priority are broken by insertion sequence (earlier pushes pop first) -
// StopId has no ordering that would be meaningful here. Priorities are never
// NaN: infinite-cost edges are pruned before anything reaches the heap.
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .entry
            .priority
            .total_cmp(&self.entry.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

/// Min-priority work queue of (priority, stop) pairs.
///
/// Duplicate pushes for the same stop are expected; the engine discards
/// stale pops instead of updating entries in place (lazy deletion).
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<HeapEntry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a stop with the given priority. O(log n).
    pub fn push(&mut self, priority: f64, cost: f64, stop: StopId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(HeapEntry {
            entry: FrontierEntry {
                priority,
                cost,
                stop,
            },
            seq,
        });
    }

    /// Remove and return the entry with the smallest priority. O(log n).
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop().map(|h| h.entry)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
