//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Components only
//! read from here; `context` publishes each store's state after a command.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Board, User};

/// Render-side snapshot of the board and session
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Current board
    pub board: Board,
    /// Signed-in user, if any
    pub user: Option<User>,
    /// An identity request is in flight
    pub auth_loading: bool,
    /// Last identity failure, shown on the auth forms
    pub auth_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
