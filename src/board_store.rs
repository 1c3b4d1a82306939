//! Board Store
//!
//! Owns the current `Board` and its storage slot. Each command runs on a copy
//! of the board; only a successful change replaces the current value, and the
//! whole board is written back to storage before the command returns.

use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Board, ListId, TaskId, TaskPatch};
use crate::storage::KeyValueStorage;

pub struct BoardStore<S> {
    storage: S,
    key: String,
    renumber_after_removal: bool,
    board: Board,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl<S: KeyValueStorage> BoardStore<S> {
    /// Load the board from storage. A missing slot is seeded with default
    /// content (and written back); an unreadable one yields an empty board.
    pub fn open(storage: S, config: &AppConfig) -> Self {
        let key = config.board_storage_key.clone();
        let mut store = Self {
            storage,
            key,
            renumber_after_removal: config.renumber_after_removal,
            board: Board::default(),
        };

        match store.storage.get(&store.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Board>(&raw) {
                Ok(mut board) => {
                    board.normalize();
                    log::debug!(
                        "loaded board: {} lists, {} tasks",
                        board.lists.len(),
                        board.tasks.len()
                    );
                    store.board = board;
                }
                Err(e) => {
                    let err = AppError::CorruptedState {
                        key: store.key.clone(),
                        message: e.to_string(),
                    };
                    log::error!("Starting with an empty board: {}", err);
                }
            },
            Ok(None) => {
                let seeded = Board::seeded();
                store.persist(&seeded);
                store.board = seeded;
            }
            Err(e) => log::error!("Could not read board: {}", e),
        }
        store
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn add_list(&mut self, title: &str) -> ListId {
        let id = new_id();
        self.apply("add_list", |board| {
            board.add_list(id.clone(), title);
            Ok(true)
        });
        id
    }

    pub fn delete_list(&mut self, list_id: &str) {
        self.apply("delete_list", |board| board.delete_list(list_id));
    }

    /// Append a task; `None` when the list does not exist
    pub fn add_task(&mut self, list_id: &str, title: &str, description: Option<&str>) -> Option<TaskId> {
        let id = new_id();
        self.apply("add_task", |board| board.add_task(id.clone(), list_id, title, description))
            .then_some(id)
    }

    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) {
        self.apply("update_task", |board| board.update_task(task_id, patch));
    }

    pub fn delete_task(&mut self, task_id: &str) {
        let renumber = self.renumber_after_removal;
        self.apply("delete_task", |board| board.delete_task(task_id, renumber));
    }

    pub fn reorder_task(&mut self, list_id: &str, task_id: &str, new_index: usize) {
        self.apply("reorder_task", |board| board.reorder_task(list_id, task_id, new_index));
    }

    pub fn move_task(&mut self, task_id: &str, source: &str, destination: &str, new_index: usize) {
        let renumber = self.renumber_after_removal;
        self.apply("move_task", |board| {
            board.move_task(task_id, source, destination, new_index, renumber)
        });
    }

    /// Run a transition on a copy; commit and persist it if it changed
    /// anything. Unknown ids are logged and swallowed.
    fn apply(&mut self, action: &str, transition: impl FnOnce(&mut Board) -> AppResult<bool>) -> bool {
        let mut next = self.board.clone();
        match transition(&mut next) {
            Ok(true) => {
                self.persist(&next);
                self.board = next;
                true
            }
            Ok(false) => {
                log::debug!("{}: nothing to change", action);
                false
            }
            Err(e) => {
                log::error!("{}: {}", action, e);
                false
            }
        }
    }

    fn persist(&self, board: &Board) {
        let written = serde_json::to_string(board)
            .map_err(|e| AppError::Storage(e.to_string()))
            .and_then(|json| self.storage.set(&self.key, &json));
        if let Err(e) = written {
            log::warn!("Board kept in memory only: {}", e);
        }
    }
}
