//! Backend-independent key bindings for the player.

use std::fmt;

/// A key press, reduced to what the player reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.write_str("Space"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Escape => f.write_str("Esc"),
            Key::ArrowLeft => f.write_str("Left"),
            Key::ArrowRight => f.write_str("Right"),
            Key::ArrowUp => f.write_str("Up"),
            Key::ArrowDown => f.write_str("Down"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
        }
    }
}

/// What the player does in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    None,
    Quit,
    TogglePause,
    SpeedMore,
    SpeedLess,
    Next,
    Previous,
    Forward,
    Backward,
    End,
    Rewind,
    Help,
}

/// Key bindings for the player.
#[derive(Debug, Clone)]
pub struct PlayerKeys {
    pub quit: Vec<Key>,
    pub pause: Vec<Key>,
    pub speed_more: Vec<Key>,
    pub speed_less: Vec<Key>,
    pub frame_next: Vec<Key>,
    pub frame_prev: Vec<Key>,
    pub forward: Vec<Key>,
    pub backward: Vec<Key>,
    pub end: Vec<Key>,
    pub rewind: Vec<Key>,
    pub help: Vec<Key>,
}

impl Default for PlayerKeys {
    fn default() -> Self {
        Self {
            quit: vec![Key::Escape, Key::Char('q'), Key::Char('Q')],
            pause: vec![Key::Char(' '), Key::Char('p'), Key::Char('P')],
            speed_more: vec![Key::Char('+'), Key::Char('}')],
            speed_less: vec![Key::Char('-'), Key::Char('{')],
            frame_next: vec![Key::ArrowRight, Key::Char('l')],
            frame_prev: vec![Key::ArrowLeft, Key::Char('h')],
            forward: vec![Key::ArrowUp, Key::Char('k')],
            backward: vec![Key::ArrowDown, Key::Char('j')],
            end: vec![Key::End, Key::Char('e')],
            rewind: vec![Key::Home, Key::Char('r')],
            help: vec![Key::Char('?')],
        }
    }
}

impl PlayerKeys {
    /// The action bound to `key`, [`PlayerAction::None`] when unbound.
    pub fn action(&self, key: Key) -> PlayerAction {
        let bindings = [
            (&self.quit, PlayerAction::Quit),
            (&self.help, PlayerAction::Help),
            (&self.pause, PlayerAction::TogglePause),
            (&self.speed_more, PlayerAction::SpeedMore),
            (&self.speed_less, PlayerAction::SpeedLess),
            (&self.frame_next, PlayerAction::Next),
            (&self.frame_prev, PlayerAction::Previous),
            (&self.forward, PlayerAction::Forward),
            (&self.backward, PlayerAction::Backward),
            (&self.end, PlayerAction::End),
            (&self.rewind, PlayerAction::Rewind),
        ];
        bindings
            .into_iter()
            .find(|(keys, _)| keys.contains(&key))
            .map_or(PlayerAction::None, |(_, action)| action)
    }

    /// One formatted line per binding group.
    pub fn help_lines(&self) -> Vec<String> {
        let fmt_line = |title: &str, keys: &[Key]| -> String {
            let keys_str = keys
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(" or ");
            format!("{title:<20} {keys_str}")
        };
        vec![
            fmt_line("Quit", &self.quit),
            fmt_line("Pause", &self.pause),
            fmt_line("Speed more", &self.speed_more),
            fmt_line("Speed less", &self.speed_less),
            fmt_line("Next event", &self.frame_next),
            fmt_line("Previous event", &self.frame_prev),
            fmt_line("Skip forward", &self.forward),
            fmt_line("Skip backward", &self.backward),
            fmt_line("Jump to end", &self.end),
            fmt_line("Rewind", &self.rewind),
            fmt_line("Help", &self.help),
        ]
    }
}
