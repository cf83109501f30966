//! Filter Bar Component
//!
//! Search box plus priority/tag/assignee toggles. Purely a view filter:
//! nothing here touches the board, only the derived projection.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use kanban_core::{CardFilter, Priority};

use crate::store::use_board_store;

#[component]
pub fn FilterBar() -> impl IntoView {
    let store = use_board_store();

    let all_tags = Memo::new(move |_| store.board.with(|b| b.all_tags()));
    let all_assignees = Memo::new(move |_| store.board.with(|b| b.all_assignees()));
    let is_active = Memo::new(move |_| store.filter.with(|f| f.is_active()));
    let match_count = Memo::new(move |_| {
        let filter = store.filter.get();
        store.board.with(|b| filter.apply(&b.cards).len())
    });

    view! {
        <div class="filter-bar">
            <input
                type="text"
                class="filter-search"
                placeholder="Search cards..."
                prop:value=move || store.filter.with(|f| f.search.clone())
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    let value = input.value();
                    store.filter.update(|f| f.search = value);
                }
            />

            <div class="filter-priorities">
                {Priority::ALL.iter().map(|p| {
                    let p = *p;
                    let is_on = move || store.filter.with(|f| f.priorities.contains(&p));
                    view! {
                        <button
                            type="button"
                            class=move || if is_on() { "filter-btn active" } else { "filter-btn" }
                            on:click=move |_| store.filter.update(|f| f.toggle_priority(p))
                        >
                            {p.label()}
                        </button>
                    }
                }).collect_view()}
            </div>

            <div class="filter-tags">
                <For
                    each=move || all_tags.get()
                    key=|tag| tag.clone()
                    children=move |tag| {
                        let toggle_tag = tag.clone();
                        let shown_tag = tag.clone();
                        let is_on = move || store.filter.with(|f| f.tags.contains(&tag));
                        view! {
                            <button
                                type="button"
                                class=move || if is_on() { "filter-tag active" } else { "filter-tag" }
                                on:click=move |_| store.filter.update(|f| f.toggle_tag(&toggle_tag))
                            >
                                {shown_tag}
                            </button>
                        }
                    }
                />
            </div>

            <div class="filter-assignees">
                <For
                    each=move || all_assignees.get()
                    key=|name| name.clone()
                    children=move |name| {
                        let toggle_name = name.clone();
                        let shown_name = name.clone();
                        let is_on = move || store.filter.with(|f| f.assignees.contains(&name));
                        view! {
                            <button
                                type="button"
                                class=move || if is_on() { "filter-assignee active" } else { "filter-assignee" }
                                on:click=move |_| store.filter.update(|f| f.toggle_assignee(&toggle_name))
                            >
                                {shown_name}
                            </button>
                        }
                    }
                />
            </div>

            <Show when=move || is_active.get()>
                <span class="filter-count">{move || format!("{} matching", match_count.get())}</span>
                <button
                    type="button"
                    class="filter-clear-btn"
                    on:click=move |_| store.filter.set(CardFilter::default())
                >
                    "Clear"
                </button>
            </Show>
        </div>
    }
}
