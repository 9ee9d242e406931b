use super::files::{read_json, write_json, StoreError};
use crate::domain::{Task, TaskList};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, warn};

/// Load the task list; a missing file is an empty list
pub fn load_tasks(path: &Path) -> Result<TaskList, StoreError> {
    let tasks: Vec<Task> = read_json(path)?.unwrap_or_default();
    debug!(count = tasks.len(), path = %path.display(), "loaded tasks");
    Ok(TaskList::new(tasks))
}

/// Load the task list, discarding a corrupt file.
/// Returns the user-facing warning when that happens.
pub fn load_tasks_or_fresh(path: &Path) -> Result<(TaskList, Option<String>)> {
    match load_tasks(path) {
        Ok(list) => Ok((list, None)),
        Err(StoreError::Corrupt { path, source }) => {
            warn!(path = %path.display(), error = %source, "task file is corrupt, starting fresh");
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok((
                TaskList::default(),
                Some(format!("Warning: {} is corrupt. Starting fresh.", name)),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Write the whole collection as a pretty JSON array
pub fn save_tasks(path: &Path, list: &TaskList) -> Result<()> {
    write_json(path, list.tasks())?;
    debug!(count = list.len(), path = %path.display(), "saved tasks");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp_dir = tempdir().unwrap();
        let list = load_tasks(&temp_dir.path().join("tasks.json")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_save_and_load_tasks() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");

        let mut list = TaskList::default();
        list.add("Water plants").unwrap();
        let id = list.add("Call mum").unwrap().id.clone();
        list.mark_done(&id).unwrap();

        save_tasks(&path, &list).unwrap();
        let loaded = load_tasks(&path).unwrap();

        assert_eq!(loaded, list);
    }

    #[test]
    fn test_saved_file_is_json_array() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");

        let mut list = TaskList::default();
        list.add("Only one").unwrap();
        save_tasks(&path, &list).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.as_array().map(|a| a.len()), Some(1));
        assert_eq!(raw[0]["title"], "Only one");
    }

    #[test]
    fn test_reads_files_written_by_other_tools() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[
  {"id": "1f0c", "title": "Legacy", "done": false, "created_at": "2024-01-02T08:30:00"},
  {"id": "2a9b", "title": "Precise", "done": true, "created_at": "2024-01-01T08:30:00.250000"}
]"#,
        )
        .unwrap();

        let list = load_tasks(&path).unwrap();
        let titles: Vec<&str> = list.sorted().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Precise", "Legacy"]);
    }

    #[test]
    fn test_corrupt_file_starts_fresh_with_warning() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tasks.json");
        fs::write(&path, "[{\"id\": ").unwrap();

        assert!(matches!(load_tasks(&path), Err(StoreError::Corrupt { .. })));

        let (list, warning) = load_tasks_or_fresh(&path).unwrap();
        assert!(list.is_empty());
        assert_eq!(
            warning.as_deref(),
            Some("Warning: tasks.json is corrupt. Starting fresh.")
        );
    }
}
