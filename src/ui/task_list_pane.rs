use crate::app::TodoApp;
use crate::domain::Task;
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, marked_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Done check prefix for a row
pub fn done_prefix(task: &Task) -> &'static str {
    if task.done {
        "✔ "
    } else {
        "  "
    }
}

/// Multi-select marker for a row
pub fn mark_glyph(marked: bool) -> &'static str {
    if marked {
        "● "
    } else {
        "  "
    }
}

/// Render the task list in creation order
pub fn render_task_list_pane(f: &mut Frame, app: &TodoApp, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Now Or Never! ", title_style()));

    if app.tasks.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No tasks. Press a to add one.",
            hint_style(),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .tasks
        .sorted()
        .into_iter()
        .map(|task| {
            let marked = app.marked.contains(&task.id);
            let title_style = if task.done { done_style() } else { default_style() };
            let mark_style = if marked { marked_style() } else { default_style() };

            ListItem::new(Line::from(vec![
                Span::styled(mark_glyph(marked), mark_style),
                Span::styled(done_prefix(task), done_style()),
                Span::styled(task.title.clone(), title_style),
                Span::styled(
                    format!("  {}", task.created_at.format("%Y-%m-%d %H:%M")),
                    hint_style(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style());

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskList;

    #[test]
    fn test_done_prefix() {
        let mut list = TaskList::default();
        let id = list.add("Task").unwrap().id.clone();
        assert_eq!(done_prefix(list.find(&id).unwrap()), "  ");
        list.mark_done(&id).unwrap();
        assert_eq!(done_prefix(list.find(&id).unwrap()), "✔ ");
    }

    #[test]
    fn test_mark_glyph() {
        assert_eq!(mark_glyph(true), "● ");
        assert_eq!(mark_glyph(false), "  ");
    }
}
