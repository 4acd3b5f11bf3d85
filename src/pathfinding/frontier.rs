//! Indexed binary min-heap used as the A* open set
//!
//! Entries are keyed by grid position so membership checks are O(1) and a
//! cheaper route can replace an existing entry in O(log n).

use ahash::AHashMap;

use crate::pathfinding::node::PathNode;
use crate::spatial::grid::GridPosition;

#[derive(Debug, Clone, Copy)]
struct Entry {
    node: PathNode,
    /// Insertion order, last tie-breaker
    sequence: u64,
}

impl Entry {
    /// Ordering key: lowest f, then lowest heuristic, then oldest
    fn key(&self) -> (u32, u32, u64) {
        (self.node.estimated_total_cost, self.node.heuristic(), self.sequence)
    }
}

/// Open set of discovered but unexpanded nodes
#[derive(Debug, Default)]
pub struct Frontier {
    heap: Vec<Entry>,
    index: AHashMap<GridPosition, usize>,
    next_sequence: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop all entries, keeping the allocations
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
        self.next_sequence = 0;
    }

    /// Tracked node for a position, if it is in the frontier
    pub fn try_get(&self, position: GridPosition) -> Option<&PathNode> {
        self.index.get(&position).map(|&slot| &self.heap[slot].node)
    }

    pub fn contains(&self, position: GridPosition) -> bool {
        self.index.contains_key(&position)
    }

    /// Insert a node whose position is not yet tracked
    ///
    /// # Panics
    /// If the position is already in the frontier.
    pub fn enqueue(&mut self, node: PathNode) {
        assert!(
            !self.index.contains_key(&node.position),
            "frontier already tracks {:?}",
            node.position
        );
        let slot = self.heap.len();
        self.heap.push(Entry {
            node,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        self.index.insert(node.position, slot);
        self.sift_up(slot);
    }

    /// Remove and return the node with the smallest estimated total cost
    pub fn dequeue(&mut self) -> Option<PathNode> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.index.remove(&entry.node.position);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(entry.node)
    }

    /// Replace the tracked node for an existing position with new costs
    ///
    /// # Panics
    /// If the position is not in the frontier. Callers must check with
    /// `try_get` first; reaching this is a search defect.
    pub fn modify(&mut self, node: PathNode) {
        let slot = match self.index.get(&node.position) {
            Some(&slot) => slot,
            None => panic!("frontier modify on untracked position {:?}", node.position),
        };
        self.heap[slot].node = node;
        let slot = self.sift_up(slot);
        self.sift_down(slot);
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].key() < self.heap[b].key()
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.index.insert(self.heap[a].node.position, a);
        self.index.insert(self.heap[b].node.position, b);
    }

    /// Returns the final slot of the moved entry
    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.less(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i32, g: u32, f: u32) -> PathNode {
        PathNode {
            position: GridPosition::new(x, 0),
            traverse_distance: g,
            estimated_total_cost: f,
        }
    }

    #[test]
    fn test_try_get_unknown_position() {
        let frontier = Frontier::new();
        assert!(frontier.try_get(GridPosition::new(3, 3)).is_none());
    }

    #[test]
    fn test_enqueue_then_try_get() {
        let mut frontier = Frontier::new();
        let n = node(1, 2, 5);
        frontier.enqueue(n);
        assert_eq!(frontier.try_get(n.position), Some(&n));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn test_dequeue_returns_minimum() {
        let mut frontier = Frontier::with_capacity(8);
        for (x, f) in [(0, 9), (1, 3), (2, 7), (3, 1), (4, 5)] {
            frontier.enqueue(node(x, 0, f));
        }
        let order: Vec<u32> = std::iter::from_fn(|| frontier.dequeue())
            .map(|n| n.estimated_total_cost)
            .collect();
        assert_eq!(order, vec![1, 3, 5, 7, 9]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_dequeue_empty() {
        let mut frontier = Frontier::new();
        assert!(frontier.dequeue().is_none());
    }

    #[test]
    fn test_modify_lower_cost_reorders() {
        let mut frontier = Frontier::new();
        frontier.enqueue(node(0, 4, 4));
        frontier.enqueue(node(1, 6, 6));
        frontier.enqueue(node(2, 8, 8));

        frontier.modify(node(2, 1, 1));

        assert_eq!(frontier.dequeue().map(|n| n.position.x), Some(2));
        assert_eq!(frontier.dequeue().map(|n| n.position.x), Some(0));
        assert_eq!(frontier.dequeue().map(|n| n.position.x), Some(1));
    }

    #[test]
    fn test_tie_break_prefers_lower_heuristic_then_insertion() {
        let mut frontier = Frontier::new();
        frontier.enqueue(node(0, 1, 5)); // h = 4
        frontier.enqueue(node(1, 3, 5)); // h = 2
        frontier.enqueue(node(2, 3, 5)); // h = 2, inserted later
        assert_eq!(frontier.dequeue().map(|n| n.position.x), Some(1));
        assert_eq!(frontier.dequeue().map(|n| n.position.x), Some(2));
        assert_eq!(frontier.dequeue().map(|n| n.position.x), Some(0));
    }

    #[test]
    #[should_panic(expected = "untracked")]
    fn test_modify_absent_key_panics() {
        let mut frontier = Frontier::new();
        frontier.modify(node(0, 1, 1));
    }

    #[test]
    #[should_panic(expected = "already tracks")]
    fn test_enqueue_duplicate_panics() {
        let mut frontier = Frontier::new();
        frontier.enqueue(node(0, 1, 1));
        frontier.enqueue(node(0, 2, 2));
    }

    #[test]
    fn test_clear_resets() {
        let mut frontier = Frontier::new();
        frontier.enqueue(node(0, 1, 1));
        frontier.enqueue(node(1, 1, 2));
        frontier.clear();
        assert!(frontier.is_empty());
        assert!(frontier.try_get(GridPosition::new(0, 0)).is_none());
    }

    #[test]
    fn test_index_stays_consistent_under_churn() {
        let mut frontier = Frontier::new();
        for x in 0..50 {
            frontier.enqueue(node(x, 100, 100 + (x as u32 * 7) % 13));
        }
        for x in (0..50).step_by(3) {
            frontier.modify(node(x, 0, (x as u32) % 5));
        }
        let mut last = 0;
        while let Some(n) = frontier.dequeue() {
            assert!(n.estimated_total_cost >= last);
            last = n.estimated_total_cost;
            assert!(frontier.try_get(n.position).is_none());
        }
    }
}
