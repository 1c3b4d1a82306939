//! Drop Zone Component
//!
//! A horizontal gap inside a column; dropping here inserts at `index`.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mouseleave, make_on_zone_mouseenter, DndSignals};

use crate::models::ListId;

#[component]
pub fn DropZone(
    dnd: DndSignals<String>,
    list_id: ListId,
    index: usize,
    /// Always visible (empty column) instead of only while dragging
    #[prop(optional)]
    placeholder: bool,
) -> impl IntoView {
    let on_mouseenter = make_on_zone_mouseenter(dnd, list_id.clone(), index);
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_active = move || {
        dnd.drop_target_read
            .with(|target| target.as_ref().is_some_and(|t| t.is_zone(&list_id, index)))
    };
    let is_dragging = move || dnd.dragging_id_read.with(Option::is_some);

    let zone_class = move || {
        let mut c = String::from(if placeholder { "drop-zone empty-list" } else { "drop-zone" });
        if !placeholder && !is_dragging() {
            c.push_str(" hidden");
        }
        if is_active() {
            c.push_str(" active");
        }
        c
    };

    view! {
        <div
            class=zone_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            {placeholder.then(|| "Drag a task here")}
        </div>
    }
}
