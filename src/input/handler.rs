use crate::app::{PomodoroApp, TodoApp};
use crate::domain::UiMode;
use crate::notifications::Notifier;
use crate::persistence::SessionStore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle a key in the to-do window. Returns true to quit.
pub fn handle_todo_key(app: &mut TodoApp, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        mode if mode.is_form() => {
            handle_input_form_mode(app, key);
            false
        }
        _ => {
            handle_confirm_mode(app, key);
            false
        }
    }
}

fn handle_normal_mode(app: &mut TodoApp, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Toggle done (double-click in a mouse UI)
        KeyCode::Enter => app.toggle_done(),

        // Multi-select
        KeyCode::Char(' ') => app.toggle_mark(),

        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit_task(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('C') => app.request_clear(),

        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}

fn handle_input_form_mode(app: &mut TodoApp, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) => app.form_push(c),
        _ => {}
    }
}

fn handle_confirm_mode(app: &mut TodoApp, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_confirm(),
        _ => {}
    }
}

/// Handle a key in the Pomodoro window. Returns true to quit.
pub fn handle_pomodoro_key<St: SessionStore, N: Notifier>(
    app: &mut PomodoroApp<St, N>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => app.timer.toggle(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.timer.restart(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.timer.skip(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimerConfig;
    use crate::domain::{Mode, TaskList};
    use crate::persistence::JsonSessionStore;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    struct Silent;

    impl Notifier for Silent {
        fn alert(&self, _finished: Mode, _next: Mode) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_todo_add_flow() {
        let mut app = TodoApp::new(TaskList::default(), PathBuf::from("unused.json"), None);

        assert!(!handle_todo_key(&mut app, press(KeyCode::Char('a'))));
        for c in "Tea".chars() {
            handle_todo_key(&mut app, press(KeyCode::Char(c)));
        }
        // 'q' inside the form is text, not quit
        assert!(!handle_todo_key(&mut app, press(KeyCode::Char('q'))));
        handle_todo_key(&mut app, press(KeyCode::Backspace));
        handle_todo_key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.tasks.tasks()[0].title, "Tea");
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_todo_confirm_clear() {
        let mut tasks = TaskList::default();
        tasks.add("One").unwrap();
        let mut app = TodoApp::new(tasks, PathBuf::from("unused.json"), None);

        handle_todo_key(&mut app, press(KeyCode::Char('C')));
        assert_eq!(app.ui_mode, UiMode::ConfirmClear);
        handle_todo_key(&mut app, press(KeyCode::Char('n')));
        assert_eq!(app.tasks.len(), 1);

        handle_todo_key(&mut app, press(KeyCode::Char('C')));
        handle_todo_key(&mut app, press(KeyCode::Char('y')));
        assert!(app.tasks.is_empty());
    }

    #[test]
    fn test_todo_quit_keys() {
        let mut app = TodoApp::new(TaskList::default(), PathBuf::from("unused.json"), None);
        assert!(handle_todo_key(&mut app, press(KeyCode::Char('q'))));
        assert!(handle_todo_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn test_pomodoro_keys() {
        let temp_dir = tempdir().unwrap();
        let store = JsonSessionStore::new(temp_dir.path().join("sessions.json"));
        let mut app = PomodoroApp::new(TimerConfig::default(), store, Silent);

        handle_pomodoro_key(&mut app, press(KeyCode::Char(' ')));
        assert!(app.timer.state().running);
        handle_pomodoro_key(&mut app, press(KeyCode::Char(' ')));
        assert!(!app.timer.state().running);

        handle_pomodoro_key(&mut app, press(KeyCode::Char('s')));
        assert_eq!(app.timer.state().mode, Mode::ShortBreak);
        handle_pomodoro_key(&mut app, press(KeyCode::Char('r')));
        assert_eq!(app.timer.state().remaining_seconds, 300);

        assert!(handle_pomodoro_key(&mut app, press(KeyCode::Char('q'))));
    }
}
