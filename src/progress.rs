//! Animated progress indicator.
//!
//! A long-lived widget owned by the driving loop. The state machine never
//! touches it directly: the loop hands it a target fraction and then feeds
//! it frame events, and the widget eases its displayed value toward the
//! target one frame at a time.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

// Default gradient endpoints (purple to pink).
const GRADIENT_START: (u8, u8, u8) = (0x5A, 0x56, 0xE0);
const GRADIENT_END: (u8, u8, u8) = (0xEE, 0x6F, 0xF8);

const FILLED: &str = "█";
const EMPTY: &str = "░";

/// Fraction of the remaining distance covered per frame.
const EASE: f64 = 0.25;
/// Below this distance the bar snaps to the target and stops animating.
const SNAP_EPSILON: f64 = 0.001;

#[derive(Clone, Debug)]
pub struct ProgressBar {
    shown: f64,
    target: f64,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            shown: 0.0,
            target: 0.0,
        }
    }

    /// Re-targets the bar. The displayed value catches up over subsequent
    /// frames; out-of-range targets are clamped.
    pub fn set_fraction(&mut self, fraction: f64) {
        self.target = fraction.clamp(0.0, 1.0);
    }

    /// The fraction currently being displayed (may lag the target).
    pub fn ratio(&self) -> f64 {
        self.shown
    }

    pub fn is_animating(&self) -> bool {
        (self.target - self.shown).abs() > SNAP_EPSILON
    }

    /// Advances one animation frame. Returns true while more frames are
    /// wanted.
    pub fn on_frame(&mut self) -> bool {
        let distance = self.target - self.shown;
        if distance.abs() <= SNAP_EPSILON {
            self.shown = self.target;
            return false;
        }
        self.shown += distance * EASE;
        true
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}

fn gradient_color(t: f64) -> Color {
    Color::Rgb(
        lerp(GRADIENT_START.0, GRADIENT_END.0, t),
        lerp(GRADIENT_START.1, GRADIENT_END.1, t),
        lerp(GRADIENT_START.2, GRADIENT_END.2, t),
    )
}

impl Widget for &ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let label = format!(" {:3.0}%", self.shown * 100.0);
        let bar_width = (area.width as usize).saturating_sub(label.len());
        let filled = (self.shown * bar_width as f64).round() as usize;

        let mut spans = Vec::with_capacity(bar_width + 1);
        for x in 0..bar_width {
            if x < filled {
                // The gradient spans the full bar, not just the filled part.
                let t = x as f64 / (bar_width.max(2) - 1) as f64;
                spans.push(Span::styled(
                    FILLED,
                    Style::default().fg(gradient_color(t)),
                ));
            } else {
                spans.push(Span::styled(
                    EMPTY,
                    Style::default().add_modifier(Modifier::DIM),
                ));
            }
        }
        spans.push(Span::raw(label));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
