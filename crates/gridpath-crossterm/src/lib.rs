//! Crossterm terminal front-end for trace playback.
//!
//! [`TerminalPlayer`] drives a [`gridpath_replay::Player`] in the terminal:
//! it draws the board with colors and a status line, maps key presses to
//! [`PlayerAction`]s and ticks the player at its current speed.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::Cell;
use gridpath_replay::{Control, Key, Mark, Player, PlayerAction, PlayerKeys};

/// Default interval between two auto-play frames at speed 1.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(66);

/// Foreground and background colors for a mark.
fn mark_colors(mark: Mark) -> (Color, Color) {
    match mark {
        Mark::Empty => (Color::DarkGrey, Color::Reset),
        Mark::Obstacle => (Color::Grey, Color::DarkGrey),
        Mark::Start => (Color::Black, Color::Green),
        Mark::Goal => (Color::Black, Color::Red),
        Mark::Frontier => (Color::Black, Color::Cyan),
        Mark::Visited => (Color::White, Color::DarkBlue),
        Mark::Path => (Color::Black, Color::Yellow),
    }
}

/// Maps a crossterm [`KeyCode`] to a player [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Maps a terminal event to a player action.
fn to_action(ev: &Event, keys: &PlayerKeys) -> PlayerAction {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if *kind == KeyEventKind::Release {
                return PlayerAction::None;
            }
            // Raw mode swallows SIGINT.
            if *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                return PlayerAction::Quit;
            }
            to_key(*code).map_or(PlayerAction::None, |k| keys.action(k))
        }
        Event::Mouse(me) => match me.kind {
            MouseEventKind::Down(MouseButton::Left) => PlayerAction::TogglePause,
            MouseEventKind::ScrollUp => PlayerAction::Next,
            MouseEventKind::ScrollDown => PlayerAction::Previous,
            _ => PlayerAction::None,
        },
        _ => PlayerAction::None,
    }
}

/// One-line summary of the playback state.
pub fn status_line(player: &Player) -> String {
    let outcome = if player.failed() {
        "no path".to_string()
    } else if let Some(path) = player.trace().path().filter(|_| player.is_finished()) {
        format!("path of {} cells", path.len())
    } else {
        format!("frontier {}", player.board().count(Mark::Frontier))
    };
    let state = if player.is_finished() {
        "done"
    } else if player.is_auto_play() {
        "playing"
    } else {
        "paused"
    };
    format!(
        "frame {}/{}  x{}  {state}  {outcome}  (? for help)",
        player.frame_index(),
        player.frame_count(),
        player.speed(),
    )
}

/// Queue the board, status line and optional help below it.
pub fn draw<W: Write>(out: &mut W, player: &Player, keys: &PlayerKeys) -> io::Result<()> {
    let board = player.board();
    queue!(out, cursor::MoveTo(0, 0))?;
    for row in 0..board.rows() {
        let mut current = None;
        for col in 0..board.cols() {
            let mark = board.at(Cell::new(row, col)).unwrap_or_default();
            if current != Some(mark) {
                let (fg, bg) = mark_colors(mark);
                queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
                current = Some(mark);
            }
            queue!(out, Print(mark.glyph()), Print(' '))?;
        }
        queue!(out, ResetColor, Print("\r\n"))?;
    }
    queue!(
        out,
        terminal::Clear(ClearType::UntilNewLine),
        Print(status_line(player)),
        terminal::Clear(ClearType::UntilNewLine),
        Print("\r\n")
    )?;
    if player.is_help() {
        for line in keys.help_lines() {
            queue!(out, Print(line), Print("\r\n"))?;
        }
    }
    queue!(out, terminal::Clear(ClearType::FromCursorDown))?;
    out.flush()
}

/// Raw mode and the alternate screen for as long as it lives.
struct TerminalGuard {
    mouse_enabled: bool,
}

impl TerminalGuard {
    fn enter(mouse_enabled: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { mouse_enabled };
        let mut stdout = io::stdout();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if mouse_enabled {
            queue!(stdout, event::EnableMouseCapture)?;
        }
        stdout.flush()?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = queue!(stdout, event::DisableMouseCapture);
        }
        let _ = queue!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}

/// Plays a trace in the terminal until the user quits.
pub struct TerminalPlayer {
    keys: PlayerKeys,
    frame_interval: Duration,
    mouse_enabled: bool,
}

impl TerminalPlayer {
    pub fn new() -> Self {
        Self {
            keys: PlayerKeys::default(),
            frame_interval: DEFAULT_FRAME_INTERVAL,
            mouse_enabled: true,
        }
    }

    /// Frame interval at speed 1, from a frames-per-second rate.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.frame_interval = Duration::from_secs(1) / fps.max(1);
        self
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Run the event loop. The terminal is restored on return, error or not.
    pub fn run(&self, player: &mut Player) -> io::Result<()> {
        let _guard = TerminalGuard::enter(self.mouse_enabled)?;
        let mut stdout = io::stdout();
        log::debug!(
            "[terminal] playing {} frames every {:?}",
            player.frame_count(),
            self.frame_interval
        );
        let mut next_tick = Instant::now() + player.tick_interval(self.frame_interval);
        let mut dirty = true;
        loop {
            if dirty {
                draw(&mut stdout, player, &self.keys)?;
                dirty = false;
            }
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                let ev = event::read()?;
                if let Event::Resize(..) = ev {
                    queue!(stdout, terminal::Clear(ClearType::All))?;
                    dirty = true;
                    continue;
                }
                let action = to_action(&ev, &self.keys);
                if action == PlayerAction::None {
                    continue;
                }
                if player.handle(action) == Control::Quit {
                    log::debug!("[terminal] quit at frame {}", player.frame_index());
                    return Ok(());
                }
                dirty = true;
                continue;
            }
            if player.tick() {
                dirty = true;
            }
            next_tick = Instant::now() + player.tick_interval(self.frame_interval);
        }
    }
}

impl Default for TerminalPlayer {
    fn default() -> Self {
        Self::new()
    }
}
