//! New List Form Component
//!
//! "Add List" button that expands into a title input.

use leptos::prelude::*;

use crate::context::use_board;

#[component]
pub fn NewListForm() -> impl IntoView {
    let board = use_board();

    let (open, set_open) = signal(false);
    let (title, set_title) = signal(String::new());

    let close = move || {
        set_title.set(String::new());
        set_open.set(false);
    };

    let add_list = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        board.add_list(&text);
        close();
    };

    view! {
        <Show
            when=move || open.get()
            fallback=move || view! {
                <button class="add-list-btn" on:click=move |_| set_open.set(true)>"+ Add List"</button>
            }
        >
            <form class="new-list-form" on:submit=add_list>
                <input
                    type="text"
                    placeholder="List title..."
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
                <button type="button" class="cancel-btn" on:click=move |_| close()>"Cancel"</button>
            </form>
        </Show>
    }
}
