//! [`Player`] steps a finished [`Trace`] forward and backward over a [`Board`].

use std::time::Duration;

use gridpath_core::{Cell, GridModel};
use gridpath_search::{Event, Trace};

use crate::board::{Board, Mark};
use crate::keys::PlayerAction;

/// Maximum speed multiplier.
pub const MAX_SPEED: u32 = 64;

/// Shortest interval between two auto-play ticks.
pub const MIN_TICK: Duration = Duration::from_millis(4);

/// Frames skipped by [`PlayerAction::Forward`] and [`PlayerAction::Backward`].
pub const SKIP_FRAMES: usize = 10;

/// Whether the event loop driving a player should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Board cells overwritten by one event, plus the failure flag before it.
#[derive(Debug, Clone)]
struct Undo {
    cells: Vec<(Cell, Mark)>,
    failed: bool,
}

/// Plays back a trace one event at a time.
///
/// Frame `n` means the first `n` events are applied to the board. Frame 0
/// shows only obstacles, start and goal; frame [`frame_count`] is the final
/// state.
///
/// [`frame_count`]: Player::frame_count
#[derive(Debug, Clone)]
pub struct Player {
    trace: Trace,
    board: Board,
    undo: Vec<Undo>,
    failed: bool,
    auto_play: bool,
    speed: u32,
    help: bool,
}

impl Player {
    /// A player at frame 0, auto-playing at normal speed.
    pub fn new(grid: &GridModel, trace: Trace) -> Self {
        log::debug!("[replay] player over {} events", trace.len());
        Self {
            undo: Vec::with_capacity(trace.len()),
            board: Board::from_model(grid),
            trace,
            failed: false,
            auto_play: true,
            speed: 1,
            help: false,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Number of events applied so far.
    #[inline]
    pub fn frame_index(&self) -> usize {
        self.undo.len()
    }

    /// Total number of events.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.trace.len()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.frame_index() >= self.frame_count()
    }

    /// Whether an `Unreachable` event has been applied.
    #[inline]
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Cells discovered but not yet expanded at this frame.
    pub fn frontier(&self) -> Vec<Cell> {
        self.board.cells_with(Mark::Frontier).collect()
    }

    /// Apply the next event. Returns `false` at the end of the trace.
    pub fn next(&mut self) -> bool {
        let Some(event) = self.trace.events().get(self.frame_index()) else {
            return false;
        };
        let mut undo = Undo {
            cells: Vec::new(),
            failed: self.failed,
        };
        match event {
            Event::Discovered { cell, .. } => {
                if matches!(self.board.at(*cell), Some(Mark::Empty | Mark::Frontier)) {
                    mark(&mut self.board, &mut undo, *cell, Mark::Frontier);
                }
            }
            Event::Expanded { cell } => {
                if self.board.at(*cell).is_some_and(|m| !m.is_fixed()) {
                    mark(&mut self.board, &mut undo, *cell, Mark::Visited);
                }
            }
            Event::PathFound { path } => {
                for &cell in path {
                    if self.board.at(cell).is_some_and(|m| !m.is_fixed()) {
                        mark(&mut self.board, &mut undo, cell, Mark::Path);
                    }
                }
            }
            Event::Unreachable => self.failed = true,
        }
        self.undo.push(undo);
        true
    }

    /// Revert the last applied event. Returns `false` at frame 0.
    pub fn previous(&mut self) -> bool {
        let Some(undo) = self.undo.pop() else {
            return false;
        };
        for &(cell, old) in undo.cells.iter().rev() {
            self.board.set(cell, old);
        }
        self.failed = undo.failed;
        true
    }

    /// Move to frame `n`, clamped to the trace length.
    pub fn set_frame(&mut self, n: usize) {
        let n = n.min(self.frame_count());
        while self.frame_index() < n {
            if !self.next() {
                break;
            }
        }
        while self.frame_index() > n {
            if !self.previous() {
                break;
            }
        }
    }

    /// Jump to the final state.
    pub fn finish(&mut self) {
        self.set_frame(self.frame_count());
    }

    /// Back to frame 0.
    pub fn rewind(&mut self) {
        self.set_frame(0);
    }

    #[inline]
    pub fn is_auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn toggle_pause(&mut self) {
        self.auto_play = !self.auto_play;
    }

    /// Current speed multiplier (1 = normal).
    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn speed_more(&mut self) {
        self.speed = (self.speed * 2).min(MAX_SPEED);
    }

    pub fn speed_less(&mut self) {
        self.speed = (self.speed / 2).max(1);
    }

    /// `base` divided by the speed multiplier, never below [`MIN_TICK`].
    pub fn tick_interval(&self, base: Duration) -> Duration {
        (base / self.speed).max(MIN_TICK)
    }

    /// Advance one frame when auto-playing. Returns whether the board changed.
    pub fn tick(&mut self) -> bool {
        self.auto_play && self.next()
    }

    /// Whether the key help should be shown.
    #[inline]
    pub fn is_help(&self) -> bool {
        self.help
    }

    /// Apply a user action.
    pub fn handle(&mut self, action: PlayerAction) -> Control {
        match action {
            PlayerAction::None => {}
            PlayerAction::Quit => return Control::Quit,
            PlayerAction::TogglePause => self.toggle_pause(),
            PlayerAction::SpeedMore => self.speed_more(),
            PlayerAction::SpeedLess => self.speed_less(),
            PlayerAction::Next => {
                self.next();
            }
            PlayerAction::Previous => {
                self.previous();
            }
            PlayerAction::Forward => self.set_frame(self.frame_index() + SKIP_FRAMES),
            PlayerAction::Backward => {
                self.set_frame(self.frame_index().saturating_sub(SKIP_FRAMES));
            }
            PlayerAction::End => self.finish(),
            PlayerAction::Rewind => self.rewind(),
            PlayerAction::Help => self.help = !self.help,
        }
        Control::Continue
    }
}

fn mark(board: &mut Board, undo: &mut Undo, cell: Cell, to: Mark) {
    if let Some(old) = board.set(cell, to) {
        undo.cells.push((cell, old));
    }
}
