//! Task Card Component
//!
//! One task: title, description, completion toggle, inline edit, delete.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::use_board;
use crate::models::{TaskId, TaskPatch};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskCard(task_id: TaskId) -> impl IntoView {
    let store = use_app_store();
    let board = use_board();
    let id = StoredValue::new(task_id);

    // Re-render only when this task changes
    let task = Memo::new(move |_| store.board().with(|b| id.with_value(|id| b.tasks.get(id).cloned())));

    let (editing, set_editing) = signal(false);
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());

    let start_edit = move || {
        if let Some(current) = task.get_untracked() {
            set_title.set(current.title);
            set_description.set(current.description.unwrap_or_default());
            set_editing.set(true);
        }
    };

    let save = move || {
        let new_title = title.get_untracked();
        if new_title.trim().is_empty() {
            return;
        }
        let new_description = description.get_untracked();
        let patch = TaskPatch::default()
            .title(new_title)
            .description((!new_description.trim().is_empty()).then_some(new_description));
        board.update_task(&id.get_value(), patch);
        set_editing.set(false);
    };

    let delete = Callback::new(move |_: ()| board.delete_task(&id.get_value()));

    move || match task.get() {
        None => view! { <div class="task-missing">"Task not found"</div> }.into_any(),
        Some(_) if editing.get() => {
            view! {
                <div class="task-card editing">
                    <input
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    />
                    <div class="task-edit-actions">
                        <button class="save-btn" on:click=move |_| save()>"Save"</button>
                        <button class="cancel-btn" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                    </div>
                </div>
            }
            .into_any()
        }
        Some(t) => {
            let completed = t.completed;
            view! {
                <div class=if completed { "task-card completed" } else { "task-card" }>
                    <div class="task-header">
                        <h3 class="task-title">{t.title}</h3>
                        <div class="task-actions">
                            <button class="icon-btn" title="Edit Task" on:click=move |_| start_edit()>"✎"</button>
                            <DeleteConfirmButton
                                button_class="icon-btn"
                                prompt="Delete this task?"
                                on_confirm=delete
                            />
                        </div>
                    </div>
                    {t.description.map(|d| view! { <p class="task-description">{d}</p> })}
                    <div class="task-footer">
                        <span class=if completed { "task-status done" } else { "task-status open" }>
                            {if completed { "Completed" } else { "Incomplete" }}
                        </span>
                        <button
                            class="toggle-btn"
                            on:click=move |_| board.update_task(&id.get_value(), TaskPatch::default().completed(!completed))
                        >
                            {if completed { "Mark Incomplete" } else { "Mark Complete" }}
                        </button>
                    </div>
                </div>
            }
            .into_any()
        }
    }
}
