use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use pomo::{
    progress::ProgressBar,
    runtime::{command_for, CrosstermEventSource, FixedTicker, Runner, SessionEvent},
    session::{Effect, SessionState, Signal, WORK_MINUTES},
    ui,
};

/// a cozy 25-minute focus timer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A 25-minute focus timer with an animated progress bar. q quits, space pauses and resumes, r resets."
)]
pub struct Cli {}

fn main() -> Result<(), Box<dyn Error>> {
    let _cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_session(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("ugh... the tomatoes are rotten, {err}");
        std::process::exit(1);
    }

    Ok(())
}

/// The driving loop: serializes ticks, key commands, and animation frames
/// into the state machine one at a time, then re-renders.
fn run_session<B: Backend>(terminal: &mut Terminal<B>) -> Result<(), Box<dyn Error>> {
    let mut state = SessionState::new(WORK_MINUTES * 60);
    let mut bar = ProgressBar::new();

    let event_source = CrosstermEventSource::new();
    let ticker = FixedTicker::new(Duration::from_secs(1));
    let mut runner = Runner::new(event_source, ticker);

    terminal.draw(|f| ui::draw(f, &state, &bar))?;

    loop {
        let signal = match runner.step(bar.is_animating()) {
            SessionEvent::Key(key) => match command_for(&key) {
                Some(cmd) => Signal::Command(cmd),
                None => continue,
            },
            SessionEvent::Tick => Signal::Tick,
            SessionEvent::Frame => Signal::AnimationFrame,
            SessionEvent::Resize => {
                terminal.draw(|f| ui::draw(f, &state, &bar))?;
                continue;
            }
        };

        match state.apply(signal) {
            Effect::Quit => break,
            Effect::Progress(fraction) => bar.set_fraction(fraction),
            Effect::Continue => {}
        }

        // The widget owns its animation; the machine only sees the signal.
        if matches!(signal, Signal::AnimationFrame) {
            bar.on_frame();
        }

        terminal.draw(|f| ui::draw(f, &state, &bar))?;
    }

    Ok(())
}
