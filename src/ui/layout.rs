use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// To-do window layout
pub struct TodoLayout {
    pub keybindings_area: Rect,
    pub list_area: Rect,
    pub status_area: Rect,
}

/// - Top bar: keybindings (1 row)
/// - Task list
/// - Bottom bar: status message (1 row)
pub fn create_todo_layout(area: Rect) -> TodoLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Task list
            Constraint::Length(1), // Status line
        ])
        .split(area);

    TodoLayout {
        keybindings_area: chunks[0],
        list_area: chunks[1],
        status_area: chunks[2],
    }
}

/// Pomodoro window layout
pub struct PomodoroLayout {
    pub keybindings_area: Rect,
    pub timer_area: Rect,
}

pub fn create_pomodoro_layout(area: Rect) -> PomodoroLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    // Keep the timer card narrow and centered
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(chunks[1]);

    PomodoroLayout {
        keybindings_area: chunks[0],
        timer_area: horizontal[1],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(8),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_todo_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = create_todo_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert!(layout.list_area.height >= 30);
    }

    #[test]
    fn test_create_pomodoro_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = create_pomodoro_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert!(layout.timer_area.width < area.width);
        assert!(layout.timer_area.height >= 30);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 8);
    }
}
