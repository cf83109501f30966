//! Toolbar Component
//!
//! Top bar: board stats, template panel toggle, JSON export/import and the
//! clear-board action (two-phase, like every destructive action).

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use kanban_core::{BoardAction, DeleteTarget};

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::storage;
use crate::store::use_board_store;

#[component]
pub fn Toolbar() -> impl IntoView {
    let store = use_board_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let stats = Memo::new(move |_| {
        store
            .board
            .with(|b| format!("{} columns, {} cards", b.columns.len(), b.cards.len()))
    });

    let export = move |_| {
        let result = store.board.with_untracked(|b| storage::export_board(b));
        if let Err(e) = result {
            web_sys::console::error_1(&format!("[EXPORT] {e}").into());
        }
    };

    let import = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let input = target
            .dyn_ref::<web_sys::HtmlInputElement>()
            .unwrap()
            .clone();
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        spawn_local(async move {
            match storage::read_file_text(file).await {
                Ok(text) => match storage::parse_board(&text) {
                    Ok(board) => store.dispatch(BoardAction::ReplaceBoard(board)),
                    Err(e) => {
                        web_sys::console::error_1(&format!("[IMPORT] bad board JSON: {e}").into());
                    }
                },
                Err(e) => {
                    web_sys::console::error_1(&format!("[IMPORT] {e}").into());
                }
            }
            // Allow re-importing the same file
            input.set_value("");
        });
    };

    let clear_board = move |_| {
        if let Some(token) = store.request(DeleteTarget::Board) {
            store.confirm(token);
        }
        ctx.edit_card(None);
    };

    view! {
        <div class="toolbar">
            <h1 class="toolbar-title">"Kanban Board"</h1>
            <span class="toolbar-stats">{move || stats.get()}</span>

            <div class="toolbar-actions">
                <button
                    type="button"
                    class=move || if ctx.show_templates.get() { "toolbar-btn active" } else { "toolbar-btn" }
                    on:click=move |_| ctx.toggle_templates()
                >
                    "Templates"
                </button>

                <button type="button" class="toolbar-btn" on:click=export>
                    "Export"
                </button>

                <label class="toolbar-btn import-label">
                    "Import"
                    <input
                        type="file"
                        accept="application/json,.json"
                        class="import-input"
                        on:change=import
                    />
                </label>

                <DeleteConfirmButton
                    button_class="toolbar-clear-btn"
                    on_confirm=Callback::new(clear_board)
                />
            </div>
        </div>
    }
}
