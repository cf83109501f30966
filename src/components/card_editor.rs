//! Card Editor Component
//!
//! Right-hand editor column, shown while a card is selected. Edits are
//! collected locally and committed as one patch on save; identity and
//! column membership never change here.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use kanban_core::{
    BoardAction, Card, CardDraft, CardPatch, ChecklistItem, DeleteTarget, Priority, Template,
};

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::store::use_board_store;

/// Card editor column (shown when a card is selected)
#[component]
pub fn CardEditor() -> impl IntoView {
    let store = use_board_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="editor-column">
            // Only reacts to selection changes: the form keeps its own
            // working copy and should not reset on unrelated board updates.
            {move || {
                ctx.editing_card
                    .get()
                    .and_then(|id| store.board.with_untracked(|b| b.cards.get(&id).cloned()))
                    .map(|card| view! { <CardEditorForm card=card /> }.into_any())
                    .unwrap_or_else(|| view! { <div class="editor-empty"></div> }.into_any())
            }}
        </div>
    }
}

fn input_value(ev: &web_sys::Event) -> String {
    let target = ev.target().unwrap();
    target
        .dyn_ref::<web_sys::HtmlInputElement>()
        .unwrap()
        .value()
}

#[component]
fn CardEditorForm(card: Card) -> impl IntoView {
    let store = use_board_store();
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let card_id = StoredValue::new(card.id.clone());
    let (title, set_title) = signal(card.title.clone());
    let (description, set_description) = signal(card.description.clone());
    let (priority, set_priority) = signal(card.priority);
    let (tags_text, set_tags_text) = signal(card.tags.join(", "));
    let (assignee, set_assignee) = signal(card.assignee.clone().unwrap_or_default());
    let (due, set_due) = signal(
        card.due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );
    let (points, set_points) = signal(
        card.story_points
            .map(|p| p.to_string())
            .unwrap_or_default(),
    );
    let (color, set_color) = signal(card.color.clone().unwrap_or_default());
    let (checklist, set_checklist) = signal(card.checklist.clone());
    let (new_check_text, set_new_check_text) = signal(String::new());
    let (template_name, set_template_name) = signal(String::new());
    let (template_category, set_template_category) = signal(String::new());

    // Current form state as a draft (shared by save and save-as-template)
    let form_draft = move || CardDraft {
        title: title.get(),
        description: description.get(),
        priority: priority.get(),
        tags: tags_text
            .get()
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        assignee: {
            let a = assignee.get().trim().to_string();
            (!a.is_empty()).then_some(a)
        },
        due_date: due.get().trim().parse().ok(),
        checklist: checklist.get(),
        story_points: points.get().trim().parse().ok(),
        color: {
            let c = color.get().trim().to_string();
            (!c.is_empty()).then_some(c)
        },
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = form_draft();
        store.dispatch(BoardAction::EditCard {
            card_id: card_id.get_value(),
            patch: CardPatch {
                title: Some(draft.title),
                description: Some(draft.description),
                priority: Some(draft.priority),
                tags: Some(draft.tags),
                assignee: Some(draft.assignee),
                due_date: Some(draft.due_date),
                checklist: Some(draft.checklist),
                story_points: Some(draft.story_points),
                color: Some(draft.color),
            },
        });
        ctx.edit_card(None);
    };

    let duplicate = move |_| {
        store.dispatch(BoardAction::DuplicateCard {
            card_id: card_id.get_value(),
        });
    };

    let delete_card = move |_| {
        if let Some(token) = store.request(DeleteTarget::Card(card_id.get_value())) {
            store.confirm(token);
        }
        ctx.edit_card(None);
    };

    let save_template = move |_| {
        let name = template_name.get();
        if name.trim().is_empty() {
            return;
        }
        store.save_template(Template::new(name, template_category.get(), form_draft()));
        set_template_name.set(String::new());
        set_template_category.set(String::new());
    };

    let add_check_item = move |_| {
        let text = new_check_text.get();
        if text.trim().is_empty() {
            return;
        }
        set_checklist.update(|list| list.push(ChecklistItem::new(text.trim())));
        set_new_check_text.set(String::new());
    };

    view! {
        <form class="card-editor" on:submit=save>
            <div class="editor-header">
                <h2>"Edit card"</h2>
                <button type="button" class="close-btn" on:click=move |_| ctx.edit_card(None)>
                    "×"
                </button>
            </div>

            <label>"Title"</label>
            <input
                type="text"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(input_value(&ev))
            />

            <label>"Description"</label>
            <textarea
                prop:value=move || description.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let area = target.dyn_ref::<web_sys::HtmlTextAreaElement>().unwrap();
                    set_description.set(area.value());
                }
            ></textarea>

            <label>"Priority"</label>
            <div class="priority-selector-row">
                {Priority::ALL.iter().map(|p| {
                    let p = *p;
                    let is_selected = move || priority.get() == p;
                    view! {
                        <button
                            type="button"
                            class=move || if is_selected() { "priority-btn active" } else { "priority-btn" }
                            on:click=move |_| set_priority.set(p)
                        >
                            {p.label()}
                        </button>
                    }
                }).collect_view()}
            </div>

            <label>"Tags (comma separated)"</label>
            <input
                type="text"
                prop:value=move || tags_text.get()
                on:input=move |ev| set_tags_text.set(input_value(&ev))
            />

            <label>"Assignee"</label>
            <input
                type="text"
                prop:value=move || assignee.get()
                on:input=move |ev| set_assignee.set(input_value(&ev))
            />

            <label>"Due date"</label>
            <input
                type="date"
                prop:value=move || due.get()
                on:input=move |ev| set_due.set(input_value(&ev))
            />

            <label>"Story points"</label>
            <input
                type="number"
                min="0"
                prop:value=move || points.get()
                on:input=move |ev| set_points.set(input_value(&ev))
            />

            <label>"Color"</label>
            <input
                type="text"
                placeholder="#rrggbb"
                prop:value=move || color.get()
                on:input=move |ev| set_color.set(input_value(&ev))
            />

            <label>"Checklist"</label>
            <div class="checklist-editor">
                <For
                    each=move || checklist.get()
                    key=|item| (item.id.clone(), item.done, item.text.clone())
                    children=move |item| {
                        let toggle_id = item.id.clone();
                        let remove_id = item.id.clone();
                        view! {
                            <div class="checklist-item">
                                <input
                                    type="checkbox"
                                    prop:checked=item.done
                                    on:change=move |_| {
                                        set_checklist.update(|list| {
                                            if let Some(entry) = list.iter_mut().find(|i| i.id == toggle_id) {
                                                entry.done = !entry.done;
                                            }
                                        });
                                    }
                                />
                                <span class=if item.done { "check-text done" } else { "check-text" }>
                                    {item.text.clone()}
                                </span>
                                <button
                                    type="button"
                                    class="check-remove-btn"
                                    on:click=move |_| {
                                        set_checklist.update(|list| list.retain(|i| i.id != remove_id));
                                    }
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    }
                />
                <div class="checklist-add-row">
                    <input
                        type="text"
                        placeholder="Add item..."
                        prop:value=move || new_check_text.get()
                        on:input=move |ev| set_new_check_text.set(input_value(&ev))
                    />
                    <button type="button" on:click=add_check_item>"+"</button>
                </div>
            </div>

            <div class="editor-actions">
                <button type="submit">"Save"</button>
                <button type="button" on:click=duplicate>"Duplicate"</button>
                <DeleteConfirmButton button_class="card-delete-btn" on_confirm=Callback::new(delete_card) />
            </div>

            <div class="template-save-row">
                <input
                    type="text"
                    placeholder="Template name"
                    prop:value=move || template_name.get()
                    on:input=move |ev| set_template_name.set(input_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Category"
                    prop:value=move || template_category.get()
                    on:input=move |ev| set_template_category.set(input_value(&ev))
                />
                <button type="button" on:click=save_template>"Save as template"</button>
            </div>
        </form>
    }
}
