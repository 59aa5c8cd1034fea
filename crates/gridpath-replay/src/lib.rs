//! Headless playback of search traces: board marks, stepping, seeking, speed.

mod board;
mod keys;
mod player;

pub use board::{Board, Mark};
pub use keys::{Key, PlayerAction, PlayerKeys};
pub use player::{Control, MAX_SPEED, MIN_TICK, Player, SKIP_FRAMES};
