use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyModifiers};

use crate::session::Command;

/// How often the progress bar gets a frame while it has animation pending.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Unified event type consumed by the driving loop
#[derive(Clone, Debug)]
pub enum SessionEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    Frame,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<SessionEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(SessionEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(SessionEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<SessionEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SessionEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Maps a key event to a session command. Unmapped keys produce nothing.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(Command::ToggleMode),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
        _ => None,
    }
}

/// Runner that advances the application one event at a time.
///
/// Keeps the tick cadence on a deadline rather than a plain timeout, so a
/// burst of key or frame events does not stretch the countdown.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Blocks for the next event. Yields `Tick` once the tick deadline
    /// passes; while `animating` is set, waits at most [`FRAME_INTERVAL`]
    /// and yields `Frame` in between ticks.
    pub fn step(&mut self, animating: bool) -> SessionEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            self.next_tick += self.ticker.interval();
            return SessionEvent::Tick;
        }

        let mut timeout = self.next_tick - now;
        if animating {
            timeout = timeout.min(FRAME_INTERVAL);
        }

        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => {
                if Instant::now() >= self.next_tick {
                    self.next_tick += self.ticker.interval();
                    SessionEvent::Tick
                } else {
                    SessionEvent::Frame
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                // Sender gone (tests, or the reader thread died); fall back
                // to pure ticking so the loop can still make progress.
                self.next_tick = Instant::now() + self.ticker.interval();
                SessionEvent::Tick
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        assert_matches!(runner.step(false), SessionEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(SessionEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(100));
        let mut runner = Runner::new(es, ticker);

        assert_matches!(runner.step(false), SessionEvent::Resize);
    }

    #[test]
    fn step_yields_frames_between_ticks_while_animating() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_secs(1));
        let mut runner = Runner::new(es, ticker);

        // Tick deadline is a second away, so the frame wait expires first
        assert_matches!(runner.step(true), SessionEvent::Frame);
    }

    #[test]
    fn step_survives_disconnected_source() {
        let (tx, rx) = mpsc::channel::<SessionEvent>();
        drop(tx);
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);

        assert_matches!(runner.step(false), SessionEvent::Tick);
        assert_matches!(runner.step(false), SessionEvent::Tick);
    }

    #[test]
    fn key_map_covers_all_commands() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(command_for(&key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(
            command_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(
            command_for(&key(KeyCode::Char('p'))),
            Some(Command::ToggleMode)
        );
        assert_eq!(
            command_for(&key(KeyCode::Char(' '))),
            Some(Command::ToggleMode)
        );
        assert_eq!(command_for(&key(KeyCode::Char('r'))), Some(Command::Reset));
        assert_eq!(command_for(&key(KeyCode::Char('R'))), Some(Command::Reset));
        assert_eq!(command_for(&key(KeyCode::Char('x'))), None);
        assert_eq!(command_for(&key(KeyCode::Esc)), None);
    }
}
