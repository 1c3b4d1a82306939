//! Board View Component
//!
//! All lists side by side, in creation order.

use leptos::prelude::*;

use crate::components::{ListColumn, NewListForm};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoardView() -> impl IntoView {
    let store = use_app_store();

    let list_ids = Memo::new(move |_| {
        store
            .board()
            .with(|b| b.ordered_lists().into_iter().map(|l| l.id.clone()).collect::<Vec<_>>())
    });

    view! {
        <div class="board">
            <div class="board-header">
                <h1>"My Board"</h1>
                <NewListForm />
            </div>
            <div class="board-lists">
                <For
                    each=move || list_ids.get()
                    key=|id| id.clone()
                    children=move |id| view! { <ListColumn list_id=id /> }
                />
            </div>
        </div>
    }
}
