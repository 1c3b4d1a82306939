//! List Column Component
//!
//! One list: header with delete, its tasks in `order`, drop zones between
//! cards, and an add-task form.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_item_mouseenter, make_on_mousedown, make_on_mouseleave, DndSignals};

use crate::components::{DeleteConfirmButton, DropZone, TaskCard};
use crate::context::use_board;
use crate::models::ListId;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ListColumn(list_id: ListId) -> impl IntoView {
    let store = use_app_store();
    let board = use_board();
    let dnd = expect_context::<DndSignals<String>>();
    let id = StoredValue::new(list_id);

    let title = move || {
        store
            .board()
            .with(|b| id.with_value(|id| b.lists.get(id).map(|l| l.title.clone())))
            .unwrap_or_default()
    };
    let task_ids = Memo::new(move |_| {
        store.board().with(|b| {
            id.with_value(|id| b.tasks_in(id).into_iter().map(|t| t.id.clone()).collect::<Vec<_>>())
        })
    });

    let (adding, set_adding) = signal(false);
    let (new_title, set_new_title) = signal(String::new());

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_title.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        board.add_task(&id.get_value(), &text, None);
        set_new_title.set(String::new());
        set_adding.set(false);
    };

    let delete_list = Callback::new(move |_: ()| board.delete_list(&id.get_value()));

    view! {
        <div class="list-column">
            <div class="list-header">
                <h2 class="list-title">{title}</h2>
                <DeleteConfirmButton
                    button_class="icon-btn"
                    prompt="Delete this list and all its tasks?"
                    on_confirm=delete_list
                />
            </div>

            <div class="list-tasks">
                <Show when=move || task_ids.with(Vec::is_empty)>
                    <DropZone dnd=dnd list_id=id.get_value() index=0 placeholder=true />
                </Show>
                <For
                    each=move || task_ids.get().into_iter().enumerate()
                    key=|(index, task_id)| (task_id.clone(), *index)
                    children=move |(index, task_id)| {
                        let list_id = id.get_value();
                        let on_mousedown = make_on_mousedown(dnd, task_id.clone());
                        let on_mouseenter = make_on_item_mouseenter(dnd, task_id.clone(), list_id.clone(), index);
                        let on_mouseleave = make_on_mouseleave(dnd);

                        let card_id = task_id.clone();
                        let is_dragging = move || dnd.dragging_id_read.with(|d| d.as_ref() == Some(&card_id));
                        let target_id = task_id.clone();
                        let is_drop_target = move || {
                            dnd.drop_target_read
                                .with(|t| t.as_ref().is_some_and(|t| t.is_item(&target_id)))
                        };
                        let wrapper_class = move || {
                            let mut c = String::from("task-wrapper");
                            if is_dragging() { c.push_str(" dragging"); }
                            if is_drop_target() { c.push_str(" drop-target"); }
                            c
                        };

                        view! {
                            {(index == 0).then(|| view! { <DropZone dnd=dnd list_id=list_id.clone() index=0 /> })}
                            <div
                                class=wrapper_class
                                on:mousedown=on_mousedown
                                on:mouseenter=on_mouseenter
                                on:mouseleave=on_mouseleave
                            >
                                <TaskCard task_id=task_id />
                            </div>
                            // Dropping after this card
                            <DropZone dnd=dnd list_id=list_id index=index + 1 />
                        }
                    }
                />
            </div>

            <Show
                when=move || adding.get()
                fallback=move || view! {
                    <button class="add-task-btn" on:click=move |_| set_adding.set(true)>"+ Add Task"</button>
                }
            >
                <form class="new-task-form" on:submit=add_task>
                    <input
                        type="text"
                        placeholder="Task title..."
                        prop:value=move || new_title.get()
                        on:input=move |ev| set_new_title.set(event_target_value(&ev))
                    />
                    <button type="submit">"Add"</button>
                    <button type="button" class="cancel-btn" on:click=move |_| set_adding.set(false)>"Cancel"</button>
                </form>
            </Show>
        </div>
    }
}
