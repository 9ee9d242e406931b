pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod task_list_pane;
pub mod timer_pane;

use crate::app::{PomodoroApp, TodoApp};
use crate::notifications::Notifier;
use crate::persistence::SessionStore;
use input_form::render_input_form;
use keybindings::{render_pomodoro_keybindings, render_todo_keybindings};
use layout::{create_pomodoro_layout, create_todo_layout};
use modal::render_confirm_modal;
use ratatui::{text::Line, widgets::Paragraph, Frame};
use styles::status_style;
use task_list_pane::render_task_list_pane;
use timer_pane::render_timer_pane;

/// Draw the whole to-do window
pub fn render_todo(f: &mut Frame, app: &TodoApp) {
    let size = f.size();
    let layout = create_todo_layout(size);

    render_todo_keybindings(f, layout.keybindings_area);
    render_task_list_pane(f, app, layout.list_area);

    if let Some(message) = &app.status {
        let status = Paragraph::new(Line::styled(format!(" {}", message), status_style()));
        f.render_widget(status, layout.status_area);
    }

    render_confirm_modal(f, app, size);

    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}

/// Draw the whole Pomodoro window
pub fn render_pomodoro<St: SessionStore, N: Notifier>(f: &mut Frame, app: &PomodoroApp<St, N>) {
    let layout = create_pomodoro_layout(f.size());

    render_pomodoro_keybindings(f, layout.keybindings_area);
    render_timer_pane(f, app, layout.timer_area);
}
