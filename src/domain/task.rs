use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Validation failures for task list operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task title cannot be empty.")]
    EmptyTitle,
    #[error("No task with id {0}")]
    NotFound(String),
}

/// A single to-do entry as stored in tasks.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub done: bool,
    /// ISO-8601 local time, no offset
    pub created_at: NaiveDateTime,
}

impl Task {
    fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            done: false,
            created_at: Local::now().naive_local().trunc_subsecs(0),
        }
    }
}

/// Generate a UUID v4 string that doesn't clash with any existing id
pub fn generate_unique_id(existing: &HashSet<&str>) -> String {
    unique_id_from(existing, || Uuid::new_v4().to_string())
}

/// Draw candidates until one is not in `existing`
fn unique_id_from<F>(existing: &HashSet<&str>, mut candidate: F) -> String
where
    F: FnMut() -> String,
{
    loop {
        let id = candidate();
        if !existing.contains(id.as_str()) {
            return id;
        }
    }
}

/// Ordered, in-memory task collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Create and append a new task, returning it
    pub fn add(&mut self, title: &str) -> Result<&Task, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }

        let id = {
            let existing: HashSet<&str> = self.tasks.iter().map(|t| t.id.as_str()).collect();
            generate_unique_id(&existing)
        };
        self.tasks.push(Task::new(id, title.to_string()));

        // Just pushed, so last() is always present
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Task, TaskError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Resolve a user reference: an exact id, or a 1-based position in the sorted view
    pub fn resolve(&self, reference: &str) -> Result<String, TaskError> {
        let reference = reference.trim();
        if let Some(task) = self.find(reference) {
            return Ok(task.id.clone());
        }

        reference
            .parse::<usize>()
            .ok()
            .and_then(|pos| pos.checked_sub(1))
            .and_then(|idx| self.sorted().get(idx).map(|t| t.id.clone()))
            .ok_or_else(|| TaskError::NotFound(reference.to_string()))
    }

    /// Id of the task at a 0-based index in the sorted view
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.sorted().get(index).map(|t| t.id.as_str())
    }

    pub fn mark_done(&mut self, id: &str) -> Result<&Task, TaskError> {
        let task = self.find_mut(id)?;
        task.done = true;
        Ok(task)
    }

    pub fn toggle_done(&mut self, id: &str) -> Result<&Task, TaskError> {
        let task = self.find_mut(id)?;
        task.done = !task.done;
        Ok(task)
    }

    /// Replace the title; id and creation time are preserved
    pub fn edit(&mut self, id: &str, title: &str) -> Result<&Task, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        let task = self.find_mut(id)?;
        task.title = title.to_string();
        Ok(task)
    }

    pub fn delete(&mut self, id: &str) -> Result<Task, TaskError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        Ok(self.tasks.remove(idx))
    }

    /// Remove every task whose id is in `ids`, returning how many went
    pub fn delete_many(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !ids.contains(&t.id));
        before - self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// View ordered by creation time (stable for equal timestamps)
    pub fn sorted(&self) -> Vec<&Task> {
        let mut view: Vec<&Task> = self.tasks.iter().collect();
        view.sort_by_key(|t| t.created_at);
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn task_at(id: &str, title: &str, hour: u32) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            done: false,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 1)
                .and_then(|d| d.and_hms_opt(hour, 0, 0))
                .unwrap(),
        }
    }

    #[test]
    fn test_add_trims_and_defaults() {
        let mut list = TaskList::default();
        let task = list.add("  Buy milk  ").unwrap().clone();

        assert_eq!(task.title, "Buy milk");
        assert!(!task.done);
        assert!(Uuid::parse_str(&task.id).is_ok());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_rejects_empty_title() {
        let mut list = TaskList::default();
        assert_eq!(list.add("   ").unwrap_err(), TaskError::EmptyTitle);
        assert!(list.is_empty());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut list = TaskList::default();
        for i in 0..200 {
            list.add(&format!("Task {}", i)).unwrap();
        }
        let ids: HashSet<&str> = list.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_generate_unique_id_skips_existing() {
        let existing: HashSet<&str> = ["taken-1", "taken-2"].into_iter().collect();
        let mut candidates = vec!["taken-1", "taken-2", "fresh"].into_iter();
        let mut draws = 0;

        let id = unique_id_from(&existing, || {
            draws += 1;
            candidates.next().unwrap().to_string()
        });

        assert_eq!(id, "fresh");
        assert_eq!(draws, 3);
    }

    #[test]
    fn test_generate_unique_id_is_uuid() {
        let existing: HashSet<&str> = HashSet::new();
        assert!(Uuid::parse_str(&generate_unique_id(&existing)).is_ok());
    }

    #[test]
    fn test_sorted_view_orders_by_created_at() {
        let list = TaskList::new(vec![
            task_at("c", "Third", 12),
            task_at("a", "First", 8),
            task_at("b", "Second", 10),
        ]);

        let titles: Vec<&str> = list.sorted().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        // Storage order is untouched
        assert_eq!(list.tasks()[0].id, "c");
    }

    #[test]
    fn test_resolve_by_id_then_position() {
        let list = TaskList::new(vec![task_at("zz", "Late", 12), task_at("aa", "Early", 8)]);

        assert_eq!(list.resolve("zz").unwrap(), "zz");
        assert_eq!(list.resolve("1").unwrap(), "aa");
        assert_eq!(list.resolve("2").unwrap(), "zz");
        assert_eq!(list.resolve("0"), Err(TaskError::NotFound("0".to_string())));
        assert_eq!(list.resolve("3"), Err(TaskError::NotFound("3".to_string())));
        assert_eq!(list.resolve("nope"), Err(TaskError::NotFound("nope".to_string())));
    }

    #[test]
    fn test_mark_and_toggle_done() {
        let mut list = TaskList::new(vec![task_at("a", "A", 8)]);

        assert!(list.mark_done("a").unwrap().done);
        assert!(list.mark_done("a").unwrap().done);
        assert!(!list.toggle_done("a").unwrap().done);
        assert_eq!(
            list.toggle_done("missing").unwrap_err(),
            TaskError::NotFound("missing".to_string())
        );
    }

    #[test]
    fn test_edit_keeps_identity() {
        let mut list = TaskList::new(vec![task_at("a", "Old", 8)]);
        let before = list.find("a").unwrap().created_at;

        let edited = list.edit("a", " New title ").unwrap();
        assert_eq!(edited.title, "New title");
        assert_eq!(edited.id, "a");
        assert_eq!(edited.created_at, before);

        assert_eq!(list.edit("a", ""), Err(TaskError::EmptyTitle));
        assert_eq!(list.find("a").unwrap().title, "New title");
    }

    #[test]
    fn test_delete_and_delete_many() {
        let mut list = TaskList::new(vec![
            task_at("a", "A", 8),
            task_at("b", "B", 9),
            task_at("c", "C", 10),
        ]);

        assert_eq!(list.delete("b").unwrap().title, "B");
        assert!(list.delete("b").is_err());

        let ids: HashSet<String> = ["a".to_string(), "x".to_string()].into_iter().collect();
        assert_eq!(list.delete_many(&ids), 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.id_at(0), Some("c"));

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.id_at(0), None);
    }

    #[test]
    fn test_json_shape_matches_file_format() {
        let task = task_at("abc", "Write report", 9);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["id"], "abc");
        assert_eq!(json["title"], "Write report");
        assert_eq!(json["done"], false);
        assert_eq!(json["created_at"], "2024-03-01T09:00:00");
    }

    #[test]
    fn test_parses_fractional_timestamps() {
        let raw = r#"{"id":"x","title":"t","done":true,"created_at":"2024-03-01T09:00:00.123456"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert!(task.done);
        assert_eq!(task.created_at.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
