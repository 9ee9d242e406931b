use crate::domain::{TaskList, UiMode};
use crate::persistence::save_tasks;
use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info};

/// Input form state for adding or editing a task
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub title: String,
    /// Set when editing an existing task
    pub editing_id: Option<String>,
}

/// State of the interactive to-do window
pub struct TodoApp {
    pub tasks: TaskList,
    pub tasks_path: PathBuf,
    /// Row in the sorted view
    pub selected_index: usize,
    /// Ids marked for multi-delete
    pub marked: HashSet<String>,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub status: Option<String>,
    pub needs_save: bool,
    /// Last write failed; changes are only in memory
    pub save_failed: bool,
}

impl TodoApp {
    pub fn new(tasks: TaskList, tasks_path: PathBuf, warning: Option<String>) -> Self {
        Self {
            tasks,
            tasks_path,
            selected_index: 0,
            marked: HashSet::new(),
            ui_mode: UiMode::Normal,
            input_form: None,
            status: warning,
            needs_save: false,
            save_failed: false,
        }
    }

    pub fn selected_id(&self) -> Option<String> {
        self.tasks.id_at(self.selected_index).map(str::to_string)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.tasks.len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        self.selected_index = self.selected_index.min(self.tasks.len().saturating_sub(1));
    }

    pub fn start_add_task(&mut self) {
        self.ui_mode = UiMode::AddingTask;
        self.input_form = Some(InputFormState::default());
        self.status = None;
    }

    /// Open the form pre-filled with the selected task's title
    pub fn start_edit_task(&mut self) {
        let Some(id) = self.selected_id() else {
            self.status = Some("Please select a task to edit.".to_string());
            return;
        };
        let title = self
            .tasks
            .find(&id)
            .map(|t| t.title.clone())
            .unwrap_or_default();

        self.ui_mode = UiMode::EditingTask;
        self.input_form = Some(InputFormState {
            title,
            editing_id: Some(id),
        });
        self.status = None;
    }

    pub fn form_push(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.title.push(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.title.pop();
        }
    }

    pub fn cancel_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Add or edit from the form. Invalid input leaves the form open.
    pub fn submit_form(&mut self) {
        let Some(form) = self.input_form.clone() else {
            return;
        };

        let result = match &form.editing_id {
            Some(id) => self.tasks.edit(id, &form.title).map(|t| t.id.clone()),
            None => self.tasks.add(&form.title).map(|t| t.id.clone()),
        };

        match result {
            Ok(id) => {
                if form.editing_id.is_none() {
                    info!(%id, "task added");
                }
                self.select_id(&id);
                self.needs_save = true;
                self.status = None;
                self.cancel_form();
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn select_id(&mut self, id: &str) {
        if let Some(idx) = self.tasks.sorted().iter().position(|t| t.id == id) {
            self.selected_index = idx;
        }
    }

    /// Flip done on the selected task
    pub fn toggle_done(&mut self) {
        if let Some(id) = self.selected_id() {
            match self.tasks.toggle_done(&id) {
                Ok(_) => self.needs_save = true,
                Err(e) => self.status = Some(e.to_string()),
            }
        }
    }

    /// Add or remove the selected task from the multi-selection
    pub fn toggle_mark(&mut self) {
        if let Some(id) = self.selected_id() {
            if !self.marked.remove(&id) {
                self.marked.insert(id);
            }
        }
    }

    /// Marked tasks, or the selected one when nothing is marked
    pub fn delete_targets(&self) -> HashSet<String> {
        if !self.marked.is_empty() {
            return self.marked.clone();
        }
        self.selected_id().into_iter().collect()
    }

    pub fn request_delete(&mut self) {
        if self.delete_targets().is_empty() {
            self.status = Some("Please select a task to delete.".to_string());
            return;
        }
        self.ui_mode = UiMode::ConfirmDelete;
    }

    pub fn request_clear(&mut self) {
        if !self.tasks.is_empty() {
            self.ui_mode = UiMode::ConfirmClear;
        }
    }

    /// Question shown by the confirmation modal
    pub fn confirm_prompt(&self) -> String {
        match self.ui_mode {
            UiMode::ConfirmDelete => {
                format!("Delete {} selected task(s)?", self.delete_targets().len())
            }
            UiMode::ConfirmClear => "Delete all tasks?".to_string(),
            _ => String::new(),
        }
    }

    pub fn confirm(&mut self) {
        match self.ui_mode {
            UiMode::ConfirmDelete => {
                let targets = self.delete_targets();
                let removed = self.tasks.delete_many(&targets);
                info!(removed, "tasks deleted");
                self.marked.clear();
                self.status = Some(format!("Deleted {} task(s).", removed));
            }
            UiMode::ConfirmClear => {
                self.tasks.clear();
                self.marked.clear();
                info!("all tasks cleared");
                self.status = Some("All tasks deleted.".to_string());
            }
            _ => return,
        }
        self.clamp_selection();
        self.needs_save = true;
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_confirm(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Write the full collection to disk
    pub fn save(&mut self) -> Result<()> {
        save_tasks(&self.tasks_path, &self.tasks)?;
        self.needs_save = false;
        self.save_failed = false;
        Ok(())
    }

    /// Save pending changes. A failed write is reported once and retried on the next change.
    pub fn autosave(&mut self) {
        if !self.needs_save {
            return;
        }
        if let Err(e) = self.save() {
            error!(error = %e, path = %self.tasks_path.display(), "failed to save tasks");
            self.status = Some(format!("Could not save tasks: {}", e));
            self.needs_save = false;
            self.save_failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::tasks::load_tasks;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn app_with(titles: &[&str]) -> TodoApp {
        let mut tasks = TaskList::default();
        for title in titles {
            tasks.add(title).unwrap();
        }
        TodoApp::new(tasks, PathBuf::from("unused.json"), None)
    }

    fn type_title(app: &mut TodoApp, text: &str) {
        for c in text.chars() {
            app.form_push(c);
        }
    }

    #[test]
    fn test_add_through_form() {
        let mut app = app_with(&[]);
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        type_title(&mut app, "Buy bread");
        app.submit_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.needs_save);
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].title, "Buy bread");
    }

    #[test]
    fn test_empty_title_keeps_form_open() {
        let mut app = app_with(&[]);
        app.start_add_task();
        type_title(&mut app, "   ");
        app.submit_form();

        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.tasks.is_empty());
        assert!(!app.needs_save);
        assert_eq!(app.status.as_deref(), Some("Task title cannot be empty."));
    }

    #[test]
    fn test_edit_selected() {
        let mut app = app_with(&["Draft"]);
        app.start_edit_task();
        assert_eq!(app.input_form.as_ref().unwrap().title, "Draft");

        app.form_backspace();
        type_title(&mut app, "t v2");
        app.submit_form();

        assert_eq!(app.tasks.tasks()[0].title, "Draft v2");
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_edit_with_nothing_selected() {
        let mut app = app_with(&[]);
        app.start_edit_task();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_toggle_done() {
        let mut app = app_with(&["One"]);
        app.toggle_done();
        assert!(app.tasks.tasks()[0].done);
        app.toggle_done();
        assert!(!app.tasks.tasks()[0].done);
    }

    #[test]
    fn test_selection_bounds() {
        let mut app = app_with(&["A", "B"]);
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_delete_marked_tasks() {
        let mut app = app_with(&["A", "B", "C"]);
        app.toggle_mark();
        app.move_selection_down();
        app.move_selection_down();
        app.toggle_mark();

        app.request_delete();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);
        assert_eq!(app.confirm_prompt(), "Delete 2 selected task(s)?");

        app.confirm();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].title, "B");
        assert!(app.marked.is_empty());
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_delete_without_marks_uses_selection() {
        let mut app = app_with(&["A", "B"]);
        app.move_selection_down();
        app.request_delete();
        app.cancel_confirm();
        assert_eq!(app.tasks.len(), 2);

        app.request_delete();
        app.confirm();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks.tasks()[0].title, "A");
    }

    #[test]
    fn test_toggle_mark_twice_unmarks() {
        let mut app = app_with(&["A"]);
        app.toggle_mark();
        app.toggle_mark();
        assert!(app.marked.is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut app = app_with(&["A", "B"]);
        app.request_clear();
        assert_eq!(app.confirm_prompt(), "Delete all tasks?");
        app.confirm();
        assert!(app.tasks.is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);

        // Nothing to confirm on an empty list
        app.request_clear();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_save_writes_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        let mut app = TodoApp::new(TaskList::default(), path.clone(), None);

        app.start_add_task();
        type_title(&mut app, "Persist me");
        app.submit_form();
        app.save().unwrap();

        assert!(!app.needs_save);
        assert_eq!(load_tasks(&path).unwrap(), app.tasks);
    }

    #[test]
    fn test_failed_autosave_is_reported_once() {
        let temp_dir = tempdir().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut app = TodoApp::new(TaskList::default(), blocker.join("tasks.json"), None);
        app.start_add_task();
        type_title(&mut app, "Unsaved");
        app.submit_form();
        assert!(app.needs_save);

        app.autosave();
        assert!(!app.needs_save);
        assert!(app.save_failed);
        assert!(app
            .status
            .as_deref()
            .is_some_and(|s| s.starts_with("Could not save tasks")));

        app.status = None;
        app.autosave();
        assert_eq!(app.status, None);

        app.toggle_done();
        assert!(app.needs_save);
        app.autosave();
        assert!(app.status.is_some());
    }
}
