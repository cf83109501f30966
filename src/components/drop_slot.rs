//! Drop Slot Component
//!
//! A horizontal line between cards that registers as an insertion target
//! while a drag is in flight.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_slot_mouseenter, DndSignals, DropTarget};

/// Drop slot shown between cards to indicate the insertion position
#[component]
pub fn DropSlot(
    dnd: DndSignals,
    /// Column the card would land in
    column_id: String,
    /// Insertion index within the column's sequence
    index: usize,
) -> impl IntoView {
    let on_mouseenter = make_on_slot_mouseenter(dnd, column_id.clone(), index);

    let is_over = move || {
        matches!(
            dnd.drop_target_read.get(),
            Some(DropTarget::Slot(ref c, i)) if *c == column_id && i == index
        )
    };
    // Only show while dragging
    let is_visible = move || dnd.dragging_id_read.get().is_some();

    view! {
        <div
            class=move || {
                let mut c = "drop-slot".to_string();
                if is_over() { c.push_str(" active"); }
                if !is_visible() { c.push_str(" hidden"); }
                c
            }
            on:mouseenter=on_mouseenter
        />
    }
}
