//! Application Context
//!
//! Handles to the two stores, provided once by `App` via the Leptos Context
//! API. Each command runs against the owning store and then publishes the
//! resulting state into the reactive `AppStore`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::board_store::BoardStore;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::identity::{AuthFlow, ReqResClient};
use crate::models::TaskPatch;
use crate::session::SessionStore;
use crate::storage::LocalStorage;
use crate::store::{AppStateStoreFields, AppStore};

/// Board commands
#[derive(Clone, Copy)]
pub struct BoardContext {
    store: AppStore,
    inner: StoredValue<BoardStore<LocalStorage>>,
}

impl BoardContext {
    pub fn new(store: AppStore, board_store: BoardStore<LocalStorage>) -> Self {
        let ctx = Self {
            store,
            inner: StoredValue::new(board_store),
        };
        ctx.publish();
        ctx
    }

    fn run<T>(&self, command: impl FnOnce(&mut BoardStore<LocalStorage>) -> T) -> Option<T> {
        let result = self.inner.try_update_value(command);
        self.publish();
        result
    }

    fn publish(&self) {
        if let Some(board) = self.inner.try_with_value(|s| s.board().clone()) {
            *self.store.board().write() = board;
        }
    }

    pub fn add_list(&self, title: &str) {
        self.run(|s| s.add_list(title));
    }

    pub fn delete_list(&self, list_id: &str) {
        self.run(|s| s.delete_list(list_id));
    }

    pub fn add_task(&self, list_id: &str, title: &str, description: Option<&str>) {
        self.run(|s| s.add_task(list_id, title, description));
    }

    pub fn update_task(&self, task_id: &str, patch: TaskPatch) {
        self.run(|s| s.update_task(task_id, patch));
    }

    pub fn delete_task(&self, task_id: &str) {
        self.run(|s| s.delete_task(task_id));
    }

    pub fn reorder_task(&self, list_id: &str, task_id: &str, new_index: usize) {
        self.run(|s| s.reorder_task(list_id, task_id, new_index));
    }

    pub fn move_task(&self, task_id: &str, source: &str, destination: &str, new_index: usize) {
        self.run(|s| s.move_task(task_id, source, destination, new_index));
    }
}

/// Session commands
#[derive(Clone, Copy)]
pub struct SessionContext {
    store: AppStore,
    inner: StoredValue<SessionStore<LocalStorage>>,
    config: StoredValue<AppConfig>,
}

impl SessionContext {
    pub fn new(store: AppStore, session: SessionStore<LocalStorage>, config: AppConfig) -> Self {
        let ctx = Self {
            store,
            inner: StoredValue::new(session),
            config: StoredValue::new(config),
        };
        ctx.publish();
        ctx
    }

    fn publish(&self) {
        let snapshot = self
            .inner
            .try_with_value(|s| (s.user().cloned(), s.loading(), s.error().map(str::to_string)));
        if let Some((user, loading, error)) = snapshot {
            *self.store.user().write() = user;
            *self.store.auth_loading().write() = loading;
            *self.store.auth_error().write() = error;
        }
    }

    /// Validate the email, then call the identity endpoint in the background.
    /// Only a validation failure comes back; endpoint errors land in
    /// `AppState::auth_error`.
    pub fn submit(&self, flow: AuthFlow, email: String) -> AppResult<()> {
        let Some(begun) = self.inner.try_update_value(|s| s.begin(flow, &email)) else {
            return Ok(());
        };
        let request = begun?;
        self.publish();

        let client = self.config.with_value(ReqResClient::new);
        let session = *self;
        spawn_local(async move {
            request
                .complete(&client, |request, outcome| {
                    session.inner.update_value(|s| s.finish(request, outcome));
                })
                .await;
            session.publish();
        });
        Ok(())
    }

    pub fn sign_out(&self) {
        self.inner.update_value(|s| s.sign_out());
        self.publish();
    }
}

pub fn use_board() -> BoardContext {
    expect_context::<BoardContext>()
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
