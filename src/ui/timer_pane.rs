use crate::app::PomodoroApp;
use crate::notifications::Notifier;
use crate::persistence::SessionStore;
use crate::ui::styles::{
    border_style, clock_style, default_style, gauge_style, paused_style, running_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Format seconds as MM:SS (minutes are not wrapped into hours)
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Render the countdown card
pub fn render_timer_pane<St: SessionStore, N: Notifier>(
    f: &mut Frame,
    app: &PomodoroApp<St, N>,
    area: Rect,
) {
    let state = app.timer.state();
    let mode = state.mode;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" {} ", mode.label()), clock_style(mode)))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Padding
            Constraint::Length(1), // Clock
            Constraint::Length(1), // Running / Paused
            Constraint::Length(1), // Padding
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Padding
            Constraint::Length(1), // Session count
            Constraint::Min(0),
        ])
        .split(inner);

    let clock = Paragraph::new(Line::styled(
        format_clock(state.remaining_seconds),
        clock_style(mode),
    ))
    .alignment(Alignment::Center);
    f.render_widget(clock, rows[1]);

    let (label, label_style) = if state.running {
        ("Running", running_style())
    } else {
        ("Paused", paused_style())
    };
    let status = Paragraph::new(Line::styled(label, label_style)).alignment(Alignment::Center);
    f.render_widget(status, rows[2]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style(mode))
        .ratio(app.timer.progress().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, rows[4]);

    let sessions = Paragraph::new(Line::styled(
        format!("Work sessions completed: {}", state.completed_work_count),
        default_style(),
    ))
    .alignment(Alignment::Center);
    f.render_widget(sessions, rows[6]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(1200), "20:00");
        assert_eq!(format_clock(305), "05:05");
        assert_eq!(format_clock(3600), "60:00");
    }
}
