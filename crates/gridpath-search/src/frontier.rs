//! The open set.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cost::Cost;

/// A frontier entry, ordered so that [`BinaryHeap`] (a max-heap) pops the
/// best entry first.
///
/// Best means lowest `f`, then lowest `h`, then lowest enumeration rank of
/// the move that discovered it, then earliest discovery. Entries are never
/// removed when a cell is improved; the superseded one is skipped on pop.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) f: Cost,
    pub(crate) h: Cost,
    pub(crate) g: Cost,
    pub(crate) rank: u8,
    pub(crate) seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on every key so the max-heap yields the minimum.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.rank.cmp(&self.rank))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Priority queue of [`OpenEntry`] with a discovery counter.
#[derive(Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<OpenEntry>,
    next_seq: u64,
}

impl Frontier {
    /// Queue `idx` with the given costs.
    pub(crate) fn push(&mut self, idx: usize, g: Cost, h: Cost, rank: u8) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(OpenEntry {
            idx,
            f: g + h,
            h,
            g,
            rank,
            seq,
        });
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Option<OpenEntry> {
        self.heap.pop()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
