//! Array-backed binary min-heap.
//!
//! Entries are ordered by priority, then by insertion sequence, so entries
//! with equal priority leave the queue in the order they entered it. This
//! keeps Dijkstra and A* expansion order reproducible between runs.

use crate::errors::{Result, SearchError};


/// Heap slot
/// seq is only compared when priorities are equal
#[derive(Clone, Debug)]
struct Entry<P, T> {
    priority: P,
    seq: u64,
    payload: T,
}

impl<P: PartialOrd, T> Entry<P, T> {
    /// Strict "comes out first" ordering between two entries
    fn precedes(&self, other: &Self) -> bool {
        self.priority < other.priority
            || (self.priority == other.priority && self.seq < other.seq)
    }
}


/// Minimum priority queue
/// push: O(log n), pop_min: O(log n), peek_min: O(1)
#[derive(Clone, Debug)]
pub struct PriorityQueue<P, T> {
    heap: Vec<Entry<P, T>>,
    next_seq: u64,
}

impl<P, T> Default for PriorityQueue<P, T> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<P: PartialOrd, T> PriorityQueue<P, T> {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop all entries, the insertion sequence keeps counting
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Insert an entry and sift it up while its parent comes out later
    pub fn push(&mut self, priority: P, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.heap.push(Entry { priority, seq, payload });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the minimum entry
    pub fn pop_min(&mut self) -> Result<(P, T)> {
        if self.heap.is_empty() {
            return Err(SearchError::EmptyQueue);
        }

        // swap root with the last slot, remove it, then restore the heap from the root down
        let Entry { priority, payload, .. } = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Ok((priority, payload))
    }

    /// Minimum entry without removing it
    pub fn peek_min(&self) -> Result<(&P, &T)> {
        self.heap
            .first()
            .map(|entry| (&entry.priority, &entry.payload))
            .ok_or(SearchError::EmptyQueue)
    }

    /// Drain the queue into a vector ordered from minimum to maximum
    pub fn into_sorted_vec(mut self) -> Vec<(P, T)> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Ok(entry) = self.pop_min() {
            sorted.push(entry);
        }
        sorted
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.heap[index].precedes(&self.heap[parent]) {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == index {
                break;
            }

            self.heap.swap(index, smallest);
            index = smallest;
        }
    }

    /// Every parent comes out no later than its children
    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| !self.heap[i].precedes(&self.heap[(i - 1) / 2]))
    }
}
