//! Board View Component
//!
//! The column strip with drag-and-drop wiring. Gesture events from
//! leptos-dragdrop are fed into the board store's drag state machine:
//! hover targets commit card positions live, mouseup ends the gesture.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};

use crate::components::ColumnView;
use crate::store::use_board_store;

#[component]
pub fn BoardView() -> impl IntoView {
    let store = use_board_store();

    // Create DnD signals and route the gesture into the state machine
    let dnd = create_dnd_signals();

    Effect::new(move |_| {
        if let Some(id) = dnd.dragging_id_read.get() {
            store.drag_start(id);
        }
    });
    Effect::new(move |_| {
        if let Some(target) = dnd.drop_target_read.get() {
            store.drag_over(target);
        }
    });
    bind_global_mouseup(dnd, move |_dragged, target| {
        store.drag_end(target);
    });

    view! {
        <div class="board">
            <For
                each=move || store.board.get().column_order
                key=|id| id.clone()
                children=move |column_id| {
                    view! { <ColumnView column_id=column_id dnd=dnd /> }
                }
            />

            <NewColumnForm />
        </div>
    }
}

/// Inline form appended after the last column
#[component]
fn NewColumnForm() -> impl IntoView {
    let store = use_board_store();
    let (title, set_title) = signal(String::new());

    let add_column = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = title.get();
        if name.trim().is_empty() {
            return;
        }
        store.dispatch(kanban_core::BoardAction::AddColumn { title: name });
        set_title.set(String::new());
    };

    view! {
        <form class="new-column-form" on:submit=add_column>
            <input
                type="text"
                placeholder="Add column..."
                prop:value=move || title.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_title.set(input.value());
                }
            />
            <button type="submit">"+"</button>
        </form>
    }
}
