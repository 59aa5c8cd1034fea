//! The event trace recorded by a search.
//!
//! A [`Trace`] is fully materialized when the search returns. It can be
//! iterated any number of times, independently, so a player can replay it
//! slowly, jump straight to the end, or scrub backwards without searching
//! again.

use gridpath_core::Cell;

/// One search decision, in the order it was taken.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Event {
    /// `cell` entered the frontier, or was re-prioritized with a cheaper
    /// `g` through `parent`.
    Discovered {
        cell: Cell,
        parent: Option<Cell>,
        g: f64,
        h: f64,
    },
    /// `cell` left the frontier with its final cost.
    Expanded { cell: Cell },
    /// Terminal success: the path from start to goal, both inclusive.
    PathFound { path: Vec<Cell> },
    /// Terminal failure: the frontier emptied before reaching the goal.
    Unreachable,
}

impl Event {
    /// Whether this event ends a trace.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Event::PathFound { .. } | Event::Unreachable)
    }
}

/// Counters summarizing a trace.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// `Discovered` events for cells seen for the first time.
    pub discovered: usize,
    /// `Discovered` events that improved an already discovered cell.
    pub rediscovered: usize,
    /// `Expanded` events.
    pub expanded: usize,
    /// Cells on the path, zero when none was found.
    pub path_len: usize,
}

/// An append-only, replayable sequence of [`Event`]s.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trace {
    events: Vec<Event>,
}

impl Trace {
    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.events.capacity()
    }

    #[inline]
    pub(crate) fn append(&mut self, event: Event) {
        debug_assert!(
            !self.events.last().is_some_and(Event::is_terminal),
            "event appended after a terminal event"
        );
        self.events.push(event);
    }

    /// Iterate over the events in emission order. Each call starts over.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    #[inline]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The final event when it is terminal.
    pub fn terminal(&self) -> Option<&Event> {
        self.events.last().filter(|e| e.is_terminal())
    }

    /// The path carried by a `PathFound` terminal event.
    pub fn path(&self) -> Option<&[Cell]> {
        match self.terminal() {
            Some(Event::PathFound { path }) => Some(path),
            _ => None,
        }
    }

    /// Expanded cells in expansion order.
    pub fn expanded_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::Expanded { cell } => Some(*cell),
            _ => None,
        })
    }

    /// Count the events by kind.
    pub fn stats(&self) -> TraceStats {
        let mut seen = std::collections::HashSet::new();
        let mut stats = TraceStats::default();
        for event in &self.events {
            match event {
                Event::Discovered { cell, .. } => {
                    if seen.insert(*cell) {
                        stats.discovered += 1;
                    } else {
                        stats.rediscovered += 1;
                    }
                }
                Event::Expanded { .. } => stats.expanded += 1,
                Event::PathFound { path } => stats.path_len = path.len(),
                Event::Unreachable => {}
            }
        }
        stats
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
