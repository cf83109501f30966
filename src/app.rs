//! Kanban Board App
//!
//! Main application component: toolbar on top, filter bar, then the board
//! with the optional template panel on the left and the card editor column
//! on the right.

use leptos::prelude::*;

use crate::components::{BoardView, CardEditor, FilterBar, TemplatePanel, Toolbar};
use crate::context::AppContext;
use crate::store::BoardStore;

#[component]
pub fn App() -> impl IntoView {
    // Single source of truth, restored from localStorage
    let store = BoardStore::load();
    provide_context(store);

    // UI selection state
    let editing_card = signal::<Option<String>>(None);
    let show_templates = signal(false);
    provide_context(AppContext::new(editing_card, show_templates));

    view! {
        <div class="app-layout">
            <Toolbar />
            <FilterBar />

            <div class="app-main">
                <TemplatePanel />
                <BoardView />
                <CardEditor />
            </div>
        </div>
    }
}
