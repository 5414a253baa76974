//! One-shot task commands. Each returns the text `main` prints, so the
//! wording and the unknown-id handling can be checked without a terminal.

use anyhow::Result;
use taskmaster_core::{Stats, TaskActions, TaskId, TaskList};

pub fn add(actions: &mut dyn TaskActions, words: &[String]) -> String {
    match actions.add(&words.join(" ")) {
        Some(id) => format!("Added {id}"),
        None => "Nothing added (task text is empty)".to_string(),
    }
}

/// `before` is the snapshot taken ahead of the toggle; the new state is its
/// inverse.
pub fn toggle(actions: &mut dyn TaskActions, before: &TaskList, id: TaskId) -> String {
    let Some(task) = before.get(id) else {
        return format!("No task with id {id}");
    };
    let done = !task.completed;
    if actions.toggle_complete(id) {
        format!("{id} is now {}", if done { "completed" } else { "pending" })
    } else {
        format!("No task with id {id}")
    }
}

pub fn edit(
    actions: &mut dyn TaskActions,
    before: &TaskList,
    id: TaskId,
    words: &[String],
) -> String {
    let Some(current) = before.get(id).cloned() else {
        return format!("No task with id {id}");
    };
    if actions.update(id, current.with_text(words.join(" "))) {
        format!("Updated {id}")
    } else {
        "Nothing changed".to_string()
    }
}

pub fn remove(actions: &mut dyn TaskActions, id: TaskId) -> String {
    if actions.delete(id) {
        format!("Deleted {id}")
    } else {
        format!("No task with id {id}")
    }
}

pub fn list(snapshot: &TaskList, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(snapshot)?);
    }
    if snapshot.is_empty() {
        return Ok("No tasks yet".to_string());
    }
    let lines: Vec<String> = snapshot
        .iter()
        .map(|t| {
            let mark = if t.completed { "x" } else { " " };
            format!("[{mark}] {} {}", t.id, t.text)
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn stats(snapshot: &TaskList, json: bool) -> Result<String> {
    let stats = Stats::compute(snapshot.tasks());
    if json {
        return Ok(serde_json::to_string_pretty(&stats)?);
    }
    Ok(format!(
        "Total:     {}\nPending:   {}\nCompleted: {}\nProgress:  {}% ({})",
        stats.total,
        stats.pending,
        stats.completed,
        stats.percentage,
        stats.caption()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskmaster_core::{FixedClock, MemoryStorage, TaskStorage, TaskStore};

    fn words(text: &str) -> Vec<String> {
        text.split(' ').map(String::from).collect()
    }

    fn store() -> (TaskStore, MemoryStorage) {
        let slot = MemoryStorage::new();
        (TaskStore::open_with_clock(slot.clone(), FixedClock(1_000)), slot)
    }

    #[test]
    fn add_joins_words_and_reports_id() {
        let (mut store, slot) = store();
        assert_eq!(add(&mut store, &words("Buy oat milk")), "Added 1000");
        assert_eq!(store.snapshot().tasks()[0].text, "Buy oat milk");
        assert_eq!(slot.load(), *store.snapshot());
    }

    #[test]
    fn add_blank_text_is_rejected() {
        let (mut store, slot) = store();
        assert_eq!(
            add(&mut store, &words("   ")),
            "Nothing added (task text is empty)"
        );
        assert!(store.snapshot().is_empty());
        assert_eq!(slot.save_count(), 0);
    }

    #[test]
    fn toggle_reports_new_state_both_ways() {
        let (mut store, _) = store();
        let id = store.add("Walk dog").unwrap();

        let before = store.snapshot();
        assert_eq!(toggle(&mut store, &before, id), "1000 is now completed");
        let before = store.snapshot();
        assert_eq!(toggle(&mut store, &before, id), "1000 is now pending");
        assert!(!store.snapshot().tasks()[0].completed);
    }

    #[test]
    fn unknown_ids_print_notice_and_change_nothing() {
        let (mut store, slot) = store();
        store.add("keep").unwrap();
        let before = store.snapshot();
        let missing = TaskId(42);

        assert_eq!(toggle(&mut store, &before, missing), "No task with id 42");
        assert_eq!(
            edit(&mut store, &before, missing, &words("x")),
            "No task with id 42"
        );
        assert_eq!(remove(&mut store, missing), "No task with id 42");
        assert_eq!(slot.save_count(), 1);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn edit_replaces_text_and_keeps_status() {
        let (mut store, _) = store();
        let id = store.add("Buy milk").unwrap();
        store.toggle_complete(id);

        let before = store.snapshot();
        assert_eq!(
            edit(&mut store, &before, id, &words("Buy oat milk")),
            "Updated 1000"
        );
        let task = store.snapshot().get(id).cloned().unwrap();
        assert_eq!(task.text, "Buy oat milk");
        assert!(task.completed);

        let before = store.snapshot();
        assert_eq!(edit(&mut store, &before, id, &words("  ")), "Nothing changed");
        assert_eq!(store.snapshot().get(id).unwrap().text, "Buy oat milk");
    }

    #[test]
    fn remove_deletes_task() {
        let (mut store, _) = store();
        let id = store.add("gone").unwrap();
        assert_eq!(remove(&mut store, id), "Deleted 1000");
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn list_shows_marks_newest_first() {
        let (mut store, _) = store();
        assert_eq!(list(&store.snapshot(), false).unwrap(), "No tasks yet");

        let first = store.add("first").unwrap();
        store.add("second").unwrap();
        store.toggle_complete(first);

        assert_eq!(
            list(&store.snapshot(), false).unwrap(),
            "[ ] 1001 second\n[x] 1000 first"
        );
    }

    #[test]
    fn list_json_uses_record_layout() {
        let (mut store, _) = store();
        store.add("Buy milk").unwrap();

        let out = list(&store.snapshot(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{ "id": 1000, "text": "Buy milk", "completed": false }])
        );
    }

    #[test]
    fn stats_text_and_json() {
        let (mut store, _) = store();
        let a = store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();
        store.toggle_complete(a);

        let text = stats(&store.snapshot(), false).unwrap();
        assert!(text.contains("Total:     3"));
        assert!(text.contains("Pending:   2"));
        assert!(text.contains("Progress:  33% (1 of 3 tasks)"));

        let value: serde_json::Value =
            serde_json::from_str(&stats(&store.snapshot(), true).unwrap()).unwrap();
        assert_eq!(value["percentage"], 33);
        assert_eq!(value["completed"], 1);
    }
}
