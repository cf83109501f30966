//! Template Panel Component
//!
//! Left sidebar listing card templates grouped by category. Templates are
//! blueprints only: using one stamps a brand-new card into the chosen
//! column and keeps no link back.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use kanban_core::{CardDraft, Template};

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::store::use_board_store;

#[component]
pub fn TemplatePanel() -> impl IntoView {
    let store = use_board_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    // Column templates instantiate into; defaults to the leftmost
    let (target_column, set_target_column) = signal(String::new());

    let columns = Memo::new(move |_| {
        store.board.with(|b| {
            b.ordered_columns()
                .into_iter()
                .map(|c| (c.id.clone(), c.title.clone()))
                .collect::<Vec<_>>()
        })
    });

    let effective_target = move || {
        let chosen = target_column.get();
        let cols = columns.get();
        if cols.iter().any(|(id, _)| *id == chosen) {
            chosen
        } else {
            cols.first().map(|(id, _)| id.clone()).unwrap_or_default()
        }
    };

    let categories = Memo::new(move |_| store.templates.with(|t| t.categories()));

    view! {
        <Show when=move || ctx.show_templates.get()>
            <div class="template-panel">
                <div class="template-panel-header">"Templates"</div>

                <select
                    class="template-target-select"
                    on:change=move |ev| {
                        let target = ev.target().unwrap();
                        let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                        set_target_column.set(select.value());
                    }
                >
                    <For
                        each=move || columns.get()
                        key=|(id, _)| id.clone()
                        children=move |(id, title)| {
                            view! { <option value=id>{title}</option> }
                        }
                    />
                </select>

                <For
                    each=move || categories.get()
                    key=|cat| cat.clone()
                    children=move |category| {
                        let in_category = {
                            let category = category.clone();
                            move || {
                                store.templates.with(|t| {
                                    t.templates
                                        .iter()
                                        .filter(|tpl| tpl.category == category)
                                        .cloned()
                                        .collect::<Vec<_>>()
                                })
                            }
                        };
                        let heading = if category.is_empty() { "Uncategorized".to_string() } else { category.clone() };
                        view! {
                            <div class="template-category">
                                <div class="template-category-name">{heading}</div>
                                <For
                                    each=in_category
                                    key=|tpl| (tpl.id.clone(), tpl.name.clone())
                                    children=move |tpl: Template| {
                                        let use_tpl = tpl.clone();
                                        let delete_id = tpl.id.clone();
                                        view! {
                                            <div class="template-row">
                                                <span class="template-name">{tpl.name.clone()}</span>
                                                <button
                                                    type="button"
                                                    class="template-use-btn"
                                                    on:click=move |_| {
                                                        let column = effective_target();
                                                        if column.is_empty() {
                                                            return;
                                                        }
                                                        store.dispatch(use_tpl.instantiate(column));
                                                    }
                                                >
                                                    "Use"
                                                </button>
                                                <DeleteConfirmButton
                                                    button_class="template-delete-btn"
                                                    on_confirm=Callback::new(move |_| store.delete_template(&delete_id))
                                                />
                                            </div>
                                        }
                                    }
                                />
                            </div>
                        }
                    }
                />

                {move || store.templates.with(|t| t.templates.is_empty()).then(|| view! {
                    <div class="no-templates-message">"No templates yet"</div>
                })}

                <NewTemplateForm />
            </div>
        </Show>
    }
}

/// Create a blank template from scratch (name, category, card title)
#[component]
fn NewTemplateForm() -> impl IntoView {
    let store = use_board_store();
    let (name, set_name) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (card_title, set_card_title) = signal(String::new());

    let create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let n = name.get();
        let t = card_title.get();
        if n.trim().is_empty() || t.trim().is_empty() {
            return;
        }
        store.save_template(Template::new(n, category.get(), CardDraft::titled(t)));
        set_name.set(String::new());
        set_category.set(String::new());
        set_card_title.set(String::new());
    };

    let read = |ev: &web_sys::Event| -> String {
        let target = ev.target().unwrap();
        target.dyn_ref::<web_sys::HtmlInputElement>().unwrap().value()
    };

    view! {
        <form class="new-template-form" on:submit=create>
            <input
                type="text"
                placeholder="Template name"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(read(&ev))
            />
            <input
                type="text"
                placeholder="Category"
                prop:value=move || category.get()
                on:input=move |ev| set_category.set(read(&ev))
            />
            <input
                type="text"
                placeholder="Card title"
                prop:value=move || card_title.get()
                on:input=move |ev| set_card_title.set(read(&ev))
            />
            <button type="submit">"Create"</button>
        </form>
    }
}
