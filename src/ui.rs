//! Terminal layout for the session screen: a centered rounded box holding
//! the status line, the time readout, the progress bar, and the key hints.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::progress::ProgressBar;
use crate::session::{Phase, SessionState};

const BOX_WIDTH: u16 = 60;
const BOX_HEIGHT: u16 = 15;
const HORIZONTAL_MARGIN: u16 = 3;
const BORDER_COLOR: Color = Color::Indexed(63);

pub fn draw(f: &mut Frame, state: &SessionState, bar: &ProgressBar) {
    let area = centered_box(f.area(), BOX_WIDTH, BOX_HEIGHT);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints(
            [
                Constraint::Length(1), // status
                Constraint::Length(1),
                Constraint::Length(1), // time readout
                Constraint::Length(1),
                Constraint::Length(1), // progress bar
                Constraint::Length(1),
                Constraint::Length(3), // key hints
                Constraint::Min(0),    // last transition note
            ]
            .as_ref(),
        )
        .split(inner);

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let status = match state.phase() {
        Phase::Running => Span::styled("WORK MODE - RUNNING 🟢", bold_style),
        Phase::Paused => Span::styled("WORK MODE - PAUSED 🟠", bold_style),
        Phase::Expired => Span::styled("WORK MODE - DONE 🔴", bold_style),
    };
    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        chunks[0],
    );

    f.render_widget(
        Paragraph::new(time_display(state)).alignment(Alignment::Center),
        chunks[2],
    );

    f.render_widget(bar, chunks[4]);

    let hints = "Press q to quit\nPress r to reset\nPress space to pause/resume";
    f.render_widget(
        Paragraph::new(hints).alignment(Alignment::Center),
        chunks[6],
    );

    let note = Span::styled(
        state.status_message().to_string(),
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
    );
    f.render_widget(Paragraph::new(note).alignment(Alignment::Center), chunks[7]);
}

fn time_display(state: &SessionState) -> String {
    let mins = state.remaining_seconds() / 60;
    let secs = state.remaining_seconds() % 60;
    format!(
        "[REMAINING TIME {:02}:{:02} OFF {:02}:00]",
        mins,
        secs,
        state.total_seconds() / 60
    )
}

/// Centers a fixed-size box inside `area`, shrinking it on small terminals.
fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Command, Signal};

    #[test]
    fn time_display_formats_minutes_and_seconds() {
        let mut state = SessionState::new(25 * 60);
        assert_eq!(time_display(&state), "[REMAINING TIME 25:00 OFF 25:00]");

        for _ in 0..61 {
            state.apply(Signal::Tick);
        }
        assert_eq!(time_display(&state), "[REMAINING TIME 23:59 OFF 25:00]");
    }

    #[test]
    fn time_display_at_zero() {
        let mut state = SessionState::new(2);
        state.apply(Signal::Tick);
        state.apply(Signal::Tick);
        assert_eq!(time_display(&state), "[REMAINING TIME 00:00 OFF 00:00]");
    }

    #[test]
    fn paused_status_wins_over_running() {
        let mut state = SessionState::new(100);
        state.apply(Signal::Command(Command::ToggleMode));
        assert_eq!(state.phase(), Phase::Paused);
    }

    #[test]
    fn centered_box_centers_within_area() {
        let area = Rect::new(0, 0, 100, 40);
        let boxed = centered_box(area, 60, 15);
        assert_eq!(boxed, Rect::new(20, 12, 60, 15));
    }

    #[test]
    fn centered_box_shrinks_on_small_terminals() {
        let area = Rect::new(0, 0, 40, 10);
        let boxed = centered_box(area, 60, 15);
        assert_eq!(boxed, Rect::new(0, 0, 40, 10));
    }
}
