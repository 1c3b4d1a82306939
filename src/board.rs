//! Board State Transitions
//!
//! Every transition validates before it mutates, so an `Err` leaves the board
//! untouched. `Ok(false)` means the call was a legitimate no-op.

use std::collections::HashSet;

use crate::error::{AppError, AppResult};
use crate::models::{Board, List, ListId, Task, TaskId, TaskPatch};

fn list_not_found(list_id: &str) -> AppError {
    AppError::NotFound(format!("list {}", list_id))
}

fn task_not_found(task_id: &str) -> AppError {
    AppError::NotFound(format!("task {}", task_id))
}

impl Board {
    /// Default content for a first visit: three lists, three tasks
    pub fn seeded() -> Self {
        let seed_task = |id: &str, list_id: &str, title: &str, description: &str, order: usize| Task {
            id: id.to_string(),
            title: title.to_string(),
            description: Some(description.to_string()),
            list_id: list_id.to_string(),
            completed: false,
            order,
        };
        let tasks = [
            seed_task(
                "task-1",
                "list-1",
                "Design the user interface",
                "Sketch wireframes and mockups for the main screens.",
                0,
            ),
            seed_task(
                "task-2",
                "list-1",
                "Build the authentication flow",
                "Implement sign-in and sign-up.",
                1,
            ),
            seed_task(
                "task-3",
                "list-2",
                "Implement the kanban board",
                "Lists, tasks and drag-and-drop.",
                0,
            ),
        ];
        let lists = [
            ("list-1", "To Do", vec!["task-1", "task-2"]),
            ("list-2", "In Progress", vec!["task-3"]),
            ("list-3", "Done", vec![]),
        ];

        let mut board = Board::default();
        for (id, title, task_ids) in lists {
            board.add_list(id.to_string(), title);
            if let Some(list) = board.lists.get_mut(id) {
                list.task_ids = task_ids.into_iter().map(str::to_string).collect();
            }
        }
        board.tasks = tasks.into_iter().map(|t| (t.id.clone(), t)).collect();
        board
    }

    /// Make `list_order` name every list exactly once. Lists it does not
    /// know about (older data) are appended sorted by id.
    pub fn normalize(&mut self) {
        let lists = &self.lists;
        let mut seen: HashSet<ListId> = HashSet::new();
        self.list_order
            .retain(|id| lists.contains_key(id) && seen.insert(id.clone()));

        let mut missing: Vec<ListId> = lists
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        missing.sort();
        self.list_order.extend(missing);
    }

    /// Lists in display order
    pub fn ordered_lists(&self) -> Vec<&List> {
        self.list_order
            .iter()
            .filter_map(|id| self.lists.get(id))
            .collect()
    }

    /// Tasks of a list in `task_ids` order. `order` may have gaps, so it is
    /// never used to sort.
    pub fn tasks_in(&self, list_id: &str) -> Vec<&Task> {
        let Some(list) = self.lists.get(list_id) else {
            return Vec::new();
        };
        list.task_ids
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .collect()
    }

    pub fn add_list(&mut self, id: ListId, title: &str) {
        self.list_order.push(id.clone());
        self.lists.insert(id.clone(), List::new(id, title));
    }

    /// Append a task to the end of a list
    pub fn add_task(
        &mut self,
        id: TaskId,
        list_id: &str,
        title: &str,
        description: Option<&str>,
    ) -> AppResult<bool> {
        let list = self
            .lists
            .get_mut(list_id)
            .ok_or_else(|| list_not_found(list_id))?;

        let task = Task {
            id: id.clone(),
            title: title.to_string(),
            description: description.map(str::to_string),
            list_id: list_id.to_string(),
            completed: false,
            order: list.task_ids.len(),
        };
        list.task_ids.push(id.clone());
        self.tasks.insert(id, task);
        Ok(true)
    }

    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> AppResult<bool> {
        let task = self
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| task_not_found(task_id))?;
        if patch.is_empty() {
            return Ok(false);
        }

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        Ok(true)
    }

    /// Remove a task. The remaining tasks keep their `order` unless
    /// `renumber` is set, so the list may be left with gaps.
    pub fn delete_task(&mut self, task_id: &str, renumber: bool) -> AppResult<bool> {
        let task = self
            .tasks
            .remove(task_id)
            .ok_or_else(|| task_not_found(task_id))?;

        if let Some(list) = self.lists.get_mut(&task.list_id) {
            list.task_ids.retain(|id| id != task_id);
        }
        if renumber {
            self.renumber(&task.list_id);
        }
        Ok(true)
    }

    /// Remove a list together with every task it owns
    pub fn delete_list(&mut self, list_id: &str) -> AppResult<bool> {
        let list = self
            .lists
            .remove(list_id)
            .ok_or_else(|| list_not_found(list_id))?;

        for task_id in &list.task_ids {
            self.tasks.remove(task_id);
        }
        self.tasks.retain(|_, task| task.list_id != list_id);
        self.list_order.retain(|id| id != list_id);
        Ok(true)
    }

    /// Move a task to `new_index` inside its list and renumber the list.
    /// An index past the end appends.
    pub fn reorder_task(&mut self, list_id: &str, task_id: &str, new_index: usize) -> AppResult<bool> {
        let list = self
            .lists
            .get_mut(list_id)
            .ok_or_else(|| list_not_found(list_id))?;
        let current = list
            .position_of(task_id)
            .ok_or_else(|| AppError::NotFound(format!("task {} in list {}", task_id, list_id)))?;

        if current == new_index {
            return Ok(false);
        }

        let moved = list.task_ids.remove(current);
        let at = new_index.min(list.task_ids.len());
        list.task_ids.insert(at, moved);

        self.renumber(list_id);
        Ok(true)
    }

    /// Move a task to `new_index` of `destination`. Only the destination is
    /// renumbered unless `renumber_source` is set.
    pub fn move_task(
        &mut self,
        task_id: &str,
        source: &str,
        destination: &str,
        new_index: usize,
        renumber_source: bool,
    ) -> AppResult<bool> {
        if !self.lists.contains_key(source) {
            return Err(list_not_found(source));
        }
        if !self.lists.contains_key(destination) {
            return Err(list_not_found(destination));
        }
        if !self.tasks.contains_key(task_id) {
            return Err(task_not_found(task_id));
        }

        if source == destination {
            return self.reorder_task(source, task_id, new_index);
        }

        let source_list = self
            .lists
            .get_mut(source)
            .ok_or_else(|| list_not_found(source))?;
        let from = source_list
            .position_of(task_id)
            .ok_or_else(|| AppError::NotFound(format!("task {} in source list {}", task_id, source)))?;
        let moved = source_list.task_ids.remove(from);

        let destination_list = self
            .lists
            .get_mut(destination)
            .ok_or_else(|| list_not_found(destination))?;
        let at = new_index.min(destination_list.task_ids.len());
        destination_list.task_ids.insert(at, moved);

        if let Some(task) = self.tasks.get_mut(task_id) {
            task.list_id = destination.to_string();
        }

        self.renumber(destination);
        if renumber_source {
            self.renumber(source);
        }
        Ok(true)
    }

    /// Set every task's `order` to its index in the list's `task_ids`
    fn renumber(&mut self, list_id: &str) {
        let Some(list) = self.lists.get(list_id) else {
            return;
        };
        for (index, id) in list.task_ids.iter().enumerate() {
            if let Some(task) = self.tasks.get_mut(id) {
                task.order = index;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(board: &Board, list_id: &str) -> Vec<String> {
        board.lists[list_id].task_ids.clone()
    }

    fn orders(board: &Board, list_id: &str) -> Vec<usize> {
        board.lists[list_id]
            .task_ids
            .iter()
            .map(|id| board.tasks[id].order)
            .collect()
    }

    /// Every task sits in exactly one list, the one its `list_id` names
    fn assert_membership(board: &Board) {
        for task in board.tasks.values() {
            let owners: Vec<&List> = board
                .lists
                .values()
                .filter(|l| l.task_ids.contains(&task.id))
                .collect();
            assert_eq!(owners.len(), 1, "task {} owned by {} lists", task.id, owners.len());
            assert_eq!(owners[0].id, task.list_id);
        }
        for list in board.lists.values() {
            for id in &list.task_ids {
                assert!(board.tasks.contains_key(id), "dangling {} in {}", id, list.id);
            }
        }
    }

    fn abc_board() -> Board {
        let mut board = Board::default();
        board.add_list("todo".to_string(), "Todo");
        board.add_list("done".to_string(), "Done");
        for id in ["A", "B", "C"] {
            board.add_task(id.to_string(), "todo", id, None).unwrap();
        }
        board.add_task("X".to_string(), "done", "X", None).unwrap();
        board
    }

    #[test]
    fn test_add_list_then_task() {
        let mut board = Board::default();
        board.add_list("l1".to_string(), "Todo");
        assert_eq!(board.lists["l1"].task_ids, Vec::<String>::new());

        board.add_task("t1".to_string(), "l1", "Write spec", None).unwrap();
        assert_eq!(board.tasks["t1"].order, 0);
        assert_eq!(ids(&board, "l1"), vec!["t1"]);
        assert!(!board.tasks["t1"].completed);
        assert_membership(&board);
    }

    #[test]
    fn test_add_task_unknown_list_leaves_board_unchanged() {
        let mut board = abc_board();
        let before = board.clone();
        let result = board.add_task("t9".to_string(), "nope", "Lost", None);
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(board, before);
    }

    #[test]
    fn test_add_task_orders_are_dense() {
        let board = abc_board();
        assert_eq!(orders(&board, "todo"), vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_last_to_front() {
        let mut board = abc_board();
        assert!(board.reorder_task("todo", "C", 0).unwrap());
        assert_eq!(ids(&board, "todo"), vec!["C", "A", "B"]);
        assert_eq!(orders(&board, "todo"), vec![0, 1, 2]);
        assert_eq!(board.tasks["X"].order, 0);
        assert_eq!(board.tasks.len(), 4);
        assert_membership(&board);
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let mut board = abc_board();
        let before = board.clone();
        assert!(!board.reorder_task("todo", "B", 1).unwrap());
        assert_eq!(board, before);
    }

    #[test]
    fn test_reorder_past_end_appends() {
        let mut board = abc_board();
        board.reorder_task("todo", "A", 99).unwrap();
        assert_eq!(ids(&board, "todo"), vec!["B", "C", "A"]);
        assert_eq!(orders(&board, "todo"), vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_unknown_list_or_task() {
        let mut board = abc_board();
        assert!(board.reorder_task("nope", "A", 0).is_err());
        assert!(board.reorder_task("todo", "X", 0).is_err());
        assert_eq!(board, abc_board());
    }

    #[test]
    fn test_move_within_list_delegates_to_reorder() {
        let mut board = abc_board();
        board.move_task("A", "todo", "todo", 2, false).unwrap();
        assert_eq!(ids(&board, "todo"), vec!["B", "C", "A"]);
        assert_eq!(orders(&board, "todo"), vec![0, 1, 2]);
    }

    #[test]
    fn test_move_across_lists() {
        let mut board = abc_board();
        board.move_task("A", "todo", "done", 0, false).unwrap();

        assert_eq!(ids(&board, "done"), vec!["A", "X"]);
        assert_eq!(orders(&board, "done"), vec![0, 1]);
        assert_eq!(board.tasks["A"].list_id, "done");
        assert_eq!(ids(&board, "todo"), vec!["B", "C"]);
        // source list keeps its old ranks
        assert_eq!(orders(&board, "todo"), vec![1, 2]);
        assert_membership(&board);
    }

    #[test]
    fn test_move_across_lists_with_source_renumber() {
        let mut board = abc_board();
        board.move_task("A", "todo", "done", 5, true).unwrap();
        assert_eq!(ids(&board, "done"), vec!["X", "A"]);
        assert_eq!(orders(&board, "todo"), vec![0, 1]);
        assert_eq!(orders(&board, "done"), vec![0, 1]);
    }

    #[test]
    fn test_move_validates_everything_first() {
        let mut board = abc_board();
        assert!(board.move_task("A", "todo", "nope", 0, false).is_err());
        assert!(board.move_task("A", "nope", "done", 0, false).is_err());
        assert!(board.move_task("nope", "todo", "done", 0, false).is_err());
        // task exists but not in the claimed source list
        assert!(board.move_task("X", "todo", "done", 0, false).is_err());
        assert_eq!(board, abc_board());
    }

    #[test]
    fn test_move_into_empty_list() {
        let mut board = abc_board();
        board.add_list("empty".to_string(), "Empty");
        board.move_task("B", "todo", "empty", 0, false).unwrap();
        assert_eq!(ids(&board, "empty"), vec!["B"]);
        assert_eq!(board.tasks["B"].order, 0);
        assert_membership(&board);
    }

    #[test]
    fn test_update_task_merges_fields() {
        let mut board = abc_board();
        board
            .update_task("B", TaskPatch::default().completed(true).description(Some("note".into())))
            .unwrap();
        let task = &board.tasks["B"];
        assert!(task.completed);
        assert_eq!(task.title, "B");
        assert_eq!(task.description.as_deref(), Some("note"));
        assert_eq!(task.list_id, "todo");
        assert_eq!(task.order, 1);

        board.update_task("B", TaskPatch::default().description(None)).unwrap();
        assert_eq!(board.tasks["B"].description, None);
        assert!(!board.update_task("B", TaskPatch::default()).unwrap());
        assert!(board.update_task("nope", TaskPatch::default().title("x")).is_err());
    }

    #[test]
    fn test_delete_task_leaves_gap() {
        let mut board = abc_board();
        board.delete_task("A", false).unwrap();
        assert_eq!(ids(&board, "todo"), vec!["B", "C"]);
        assert_eq!(orders(&board, "todo"), vec![1, 2]);
        assert!(!board.tasks.contains_key("A"));
        assert_membership(&board);

        let titles: Vec<&str> = board.tasks_in("todo").iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C"]);
    }

    #[test]
    fn test_add_after_gaps_keeps_task_ids_order() {
        let mut board = abc_board();
        board.delete_task("A", false).unwrap();
        board.delete_task("B", false).unwrap();
        board.add_task("D".to_string(), "todo", "D", None).unwrap();
        // D gets order 1 while C still has order 2
        assert_eq!(orders(&board, "todo"), vec![2, 1]);

        let shown: Vec<&str> = board.tasks_in("todo").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(shown, vec!["C", "D"]);

        // Dragging the second card to the top moves it
        assert!(board.reorder_task("todo", "D", 0).unwrap());
        let shown: Vec<&str> = board.tasks_in("todo").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(shown, vec!["D", "C"]);
        assert_eq!(orders(&board, "todo"), vec![0, 1]);
        assert_membership(&board);
    }

    #[test]
    fn test_delete_task_with_renumber() {
        let mut board = abc_board();
        board.delete_task("B", true).unwrap();
        assert_eq!(orders(&board, "todo"), vec![0, 1]);
        assert!(board.delete_task("B", true).is_err());
    }

    #[test]
    fn test_delete_list_cascades() {
        let mut board = abc_board();
        board.delete_list("todo").unwrap();
        assert!(!board.lists.contains_key("todo"));
        assert!(board.tasks.values().all(|t| t.list_id != "todo"));
        assert_eq!(board.tasks.len(), 1);
        assert_eq!(board.list_order, vec!["done"]);
        assert!(board.delete_list("todo").is_err());
    }

    #[test]
    fn test_seeded_board() {
        let board = Board::seeded();
        assert_eq!(board.lists.len(), 3);
        assert_eq!(board.tasks.len(), 3);
        assert_eq!(ids(&board, "list-1"), vec!["task-1", "task-2"]);
        assert_eq!(ids(&board, "list-2"), vec!["task-3"]);
        assert!(board.lists["list-3"].task_ids.is_empty());
        assert_eq!(board.list_order, vec!["list-1", "list-2", "list-3"]);
        assert_membership(&board);
    }

    #[test]
    fn test_normalize_list_order() {
        let mut board = abc_board();
        board.list_order = vec!["ghost".into(), "done".into(), "done".into()];
        board.add_list("b".to_string(), "B");
        board.list_order.pop();
        board.normalize();
        assert_eq!(board.list_order, vec!["done", "b", "todo"]);

        let titles: Vec<&str> = board.ordered_lists().iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Done", "B", "Todo"]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut board = abc_board();
        board.move_task("C", "todo", "done", 1, false).unwrap();
        board.update_task("X", TaskPatch::default().description(Some("d".into()))).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }
}
