//! Task Board App
//!
//! Root component: wires the stores into context, binds drag-and-drop once,
//! and switches between the auth forms and the board.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, DropTarget};
use reactive_stores::Store;

use crate::board_store::BoardStore;
use crate::components::{AuthForm, BoardView};
use crate::config::AppConfig;
use crate::context::{BoardContext, SessionContext};
use crate::identity::AuthFlow;
use crate::models::{Board, ListId};
use crate::session::SessionStore;
use crate::storage::LocalStorage;
use crate::store::{AppState, AppStateStoreFields};

/// What a finished drag does to the board
#[derive(Debug, Clone, PartialEq, Eq)]
enum DropAction {
    Reorder { list: ListId, index: usize },
    Move { source: ListId, destination: ListId, index: usize },
}

/// Translate a drop target into a board command.
///
/// Zone indices count gaps with the dragged card still in place, so a zone
/// below the card in its own list lands one slot higher once it is lifted.
fn resolve_drop(board: &Board, task_id: &str, target: &DropTarget<String>) -> Option<DropAction> {
    let source = board.tasks.get(task_id)?.list_id.clone();
    let (destination, index) = target.slot();

    if &source != destination {
        return Some(DropAction::Move {
            source,
            destination: destination.clone(),
            index,
        });
    }

    let current = board.lists.get(&source)?.position_of(task_id)?;
    let index = match target {
        DropTarget::Zone { .. } if index > current => index - 1,
        _ => index,
    };
    Some(DropAction::Reorder { list: source, index })
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let session = SessionContext::new(
        store,
        SessionStore::restore(LocalStorage, &config),
        config.clone(),
    );
    provide_context(session);

    let board = BoardContext::new(store, BoardStore::open(LocalStorage, &config));
    provide_context(board);

    // Document listeners are bound here only, never per column
    let dnd = create_dnd_signals::<String>();
    provide_context(dnd);
    bind_global_mouseup(dnd, move |task_id: String, target: DropTarget<String>| {
        let action = store.board().with_untracked(|b| resolve_drop(b, &task_id, &target));
        match action {
            Some(DropAction::Reorder { list, index }) => board.reorder_task(&list, &task_id, index),
            Some(DropAction::Move { source, destination, index }) => {
                board.move_task(&task_id, &source, &destination, index)
            }
            None => log::warn!("Dropped task {} is no longer on the board", task_id),
        }
    });

    let (auth_page, set_auth_page) = signal(AuthFlow::SignIn);
    let signed_in = move || store.user().with(Option::is_some);
    let email = move || store.user().with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default());

    let page_button = move |flow: AuthFlow| {
        view! {
            <button
                class=move || if auth_page.get() == flow { "nav-btn active" } else { "nav-btn" }
                on:click=move |_| set_auth_page.set(flow)
            >
                {flow.label()}
            </button>
        }
    };

    view! {
        <div class="app-layout">
            <header class="top-bar">
                <span class="app-title">"Task Board"</span>
                <Show
                    when=signed_in
                    fallback=move || view! {
                        <nav class="auth-nav">
                            {page_button(AuthFlow::SignIn)}
                            {page_button(AuthFlow::SignUp)}
                        </nav>
                    }
                >
                    <div class="user-info">
                        <span>"Logged in as: " {email}</span>
                        <button class="logout-btn" on:click=move |_| session.sign_out()>"Logout"</button>
                    </div>
                </Show>
            </header>

            <main class="main-content">
                <Show
                    when=signed_in
                    fallback=move || view! {
                        // A fresh form per flow so typed input does not carry over
                        {move || view! { <AuthForm flow=auth_page.get() /> }}
                    }
                >
                    <BoardView />
                </Show>
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_three() -> (Board, ListId, ListId, Vec<String>) {
        let mut board = Board::default();
        board.add_list("todo".into(), "To Do");
        board.add_list("done".into(), "Done");
        let ids: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        for id in &ids {
            board.add_task(id.clone(), "todo", id, None).unwrap();
        }
        (board, "todo".into(), "done".into(), ids)
    }

    #[test]
    fn test_drop_on_card_in_same_list_takes_its_index() {
        let (board, todo, _, _) = board_with_three();
        let target = DropTarget::Item {
            item: "c".to_string(),
            group: todo.clone(),
            index: 2,
        };
        assert_eq!(
            resolve_drop(&board, "a", &target),
            Some(DropAction::Reorder { list: todo, index: 2 })
        );
    }

    #[test]
    fn test_drop_on_zone_below_itself_shifts_up() {
        let (board, todo, _, _) = board_with_three();
        // Gap after "b" while dragging "a"
        let below = DropTarget::Zone { group: todo.clone(), index: 2 };
        assert_eq!(
            resolve_drop(&board, "a", &below),
            Some(DropAction::Reorder { list: todo.clone(), index: 1 })
        );

        let above = DropTarget::Zone { group: todo.clone(), index: 0 };
        assert_eq!(
            resolve_drop(&board, "c", &above),
            Some(DropAction::Reorder { list: todo, index: 0 })
        );
    }

    #[test]
    fn test_drop_in_other_list_is_a_move() {
        let (board, todo, done, _) = board_with_three();
        let target = DropTarget::Zone { group: done.clone(), index: 0 };
        assert_eq!(
            resolve_drop(&board, "b", &target),
            Some(DropAction::Move { source: todo, destination: done, index: 0 })
        );
    }

    #[test]
    fn test_drop_of_unknown_task() {
        let (board, todo, _, _) = board_with_three();
        let target = DropTarget::Zone { group: todo, index: 0 };
        assert_eq!(resolve_drop(&board, "ghost", &target), None);
    }
}
