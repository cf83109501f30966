//! Column View Component
//!
//! One Kanban column: draggable header, optional inline settings editor,
//! the card list with drop slots, and a quick-add form.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use kanban_core::{BoardAction, Card, CardDraft, ColumnPatch, DeleteTarget, SortOrder};
use leptos_dragdrop::{
    make_on_column_mouseenter, make_on_mousedown, make_on_mouseleave, DndSignals, DropTarget,
};

use crate::components::{CardView, DeleteConfirmButton, DropSlot};
use crate::store::use_board_store;

#[component]
pub fn ColumnView(column_id: String, dnd: DndSignals) -> impl IntoView {
    let store = use_board_store();
    let id = StoredValue::new(column_id);

    let title = Memo::new(move |_| {
        store
            .board
            .with(|b| b.columns.get(&id.get_value()).map(|c| c.title.clone()))
            .unwrap_or_default()
    });
    let collapsed = Memo::new(move |_| {
        store
            .board
            .with(|b| b.columns.get(&id.get_value()).map(|c| c.collapsed))
            .unwrap_or(false)
    });
    let color = Memo::new(move |_| {
        store
            .board
            .with(|b| b.columns.get(&id.get_value()).and_then(|c| c.color.clone()))
    });
    let at_limit = Memo::new(move |_| {
        store
            .board
            .with(|b| b.columns.get(&id.get_value()).map(|c| c.is_at_limit()))
            .unwrap_or(false)
    });
    // "3" without a limit, "3/5" with one
    let count_label = Memo::new(move |_| {
        store.board.with(|b| match b.columns.get(&id.get_value()) {
            Some(col) => match col.wip_limit {
                Some(limit) => format!("{}/{}", col.card_ids.len(), limit),
                None => col.card_ids.len().to_string(),
            },
            None => String::new(),
        })
    });

    // Cards in display order (sort directive applied), filter applied on
    // top. Each card carries its position in the stored sequence so drop
    // slots address the manual order even when a sort or filter hides or
    // rearranges neighbors.
    let visible_cards = Memo::new(move |_| {
        let filter = store.filter.get();
        store.board.with(|b| match b.columns.get(&id.get_value()) {
            Some(col) => col
                .display_card_ids(&b.cards)
                .into_iter()
                .filter_map(|card_id| {
                    let stored = col.card_ids.iter().position(|c| *c == card_id)?;
                    let card = b.cards.get(&card_id)?;
                    filter.matches(card).then(|| (stored, card.clone()))
                })
                .collect(),
            None => Vec::<(usize, Card)>::new(),
        })
    });

    let (editing, set_editing) = signal(false);

    // Header doubles as the column drag handle
    let on_header_mousedown = make_on_mousedown(dnd, id.get_value());
    let on_column_mouseenter = make_on_column_mouseenter(dnd, id.get_value());
    let on_column_mouseleave = make_on_mouseleave(dnd);

    let is_dragged = move || dnd.dragging_id_read.get() == Some(id.get_value());
    let is_drop_target = move || {
        matches!(
            dnd.drop_target_read.get(),
            Some(DropTarget::Column(ref c)) if *c == id.get_value()
        )
    };

    let column_class = move || {
        let mut c = String::from("column");
        if collapsed.get() {
            c.push_str(" collapsed");
        }
        if is_dragged() {
            c.push_str(" dragging");
        }
        if is_drop_target() {
            c.push_str(" drop-target");
        }
        if at_limit.get() {
            c.push_str(" at-limit");
        }
        c
    };

    let toggle_collapsed = move |_| {
        let now = collapsed.get_untracked();
        store.dispatch(BoardAction::EditColumn {
            column_id: id.get_value(),
            patch: ColumnPatch {
                collapsed: Some(!now),
                ..ColumnPatch::default()
            },
        });
    };

    let delete_column = move |_| {
        if let Some(token) = store.request(DeleteTarget::Column(id.get_value())) {
            store.confirm(token);
        }
    };

    view! {
        <div
            class=column_class
            style=move || color.get().map(|c| format!("border-top-color: {};", c)).unwrap_or_default()
            on:mouseenter=on_column_mouseenter
            on:mouseleave=on_column_mouseleave
        >
            <div class="column-header" on:mousedown=on_header_mousedown>
                <button
                    class="collapse-btn"
                    on:click=toggle_collapsed
                >
                    {move || if collapsed.get() { "▶" } else { "▼" }}
                </button>
                <span class="column-title">{move || title.get()}</span>
                <span class="column-count">{move || count_label.get()}</span>
                <button class="column-edit-btn" on:click=move |_| set_editing.update(|v| *v = !*v)>
                    "⚙"
                </button>
                <DeleteConfirmButton
                    button_class="column-delete-btn"
                    on_confirm=Callback::new(delete_column)
                />
            </div>

            <Show when=move || editing.get()>
                <ColumnEditor column_id=id.get_value() on_done=Callback::new(move |_| set_editing.set(false)) />
            </Show>

            <Show when=move || !collapsed.get()>
                <div class="column-cards">
                    <DropSlot dnd=dnd column_id=id.get_value() index=0 />
                    <For
                        each=move || visible_cards.get()
                        key=|(stored, card)| {
                            // Key on everything shown so edits re-render the tile
                            (
                                *stored,
                                card.id.clone(),
                                card.title.clone(),
                                card.priority,
                                card.tags.clone(),
                                card.assignee.clone(),
                                card.due_date,
                                card.story_points,
                                card.color.clone(),
                                card.checklist.iter().filter(|i| i.done).count(),
                                card.checklist.len(),
                            )
                        }
                        children=move |(stored, card)| {
                            view! {
                                <CardView card=card dnd=dnd />
                                <DropSlot dnd=dnd column_id=id.get_value() index={stored + 1} />
                            }
                        }
                    />
                </div>

                <AddCardForm column_id=id.get_value() />
            </Show>
        </div>
    }
}

/// Inline settings editor for one column. Mounted fresh each time it opens,
/// seeded from the current column snapshot.
#[component]
fn ColumnEditor(column_id: String, on_done: Callback<()>) -> impl IntoView {
    let store = use_board_store();
    let id = StoredValue::new(column_id);

    let snapshot = store
        .board
        .with_untracked(|b| b.columns.get(&id.get_value()).cloned());
    let (title, set_title) = signal(snapshot.as_ref().map(|c| c.title.clone()).unwrap_or_default());
    let (limit, set_limit) = signal(
        snapshot
            .as_ref()
            .and_then(|c| c.wip_limit)
            .map(|l| l.to_string())
            .unwrap_or_default(),
    );
    let (color, set_color) = signal(
        snapshot
            .as_ref()
            .and_then(|c| c.color.clone())
            .unwrap_or_default(),
    );
    let (sort_order, set_sort_order) = signal(
        snapshot
            .as_ref()
            .map(|c| c.sort_order)
            .unwrap_or(SortOrder::Manual),
    );

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let limit = limit.get().trim().parse::<u32>().ok();
        let color = {
            let c = color.get().trim().to_string();
            (!c.is_empty()).then_some(c)
        };
        store.dispatch(BoardAction::EditColumn {
            column_id: id.get_value(),
            patch: ColumnPatch {
                title: Some(title.get()),
                wip_limit: Some(limit),
                color: Some(color),
                ..ColumnPatch::default()
            },
        });
        store.dispatch(BoardAction::SetColumnSortOrder {
            column_id: id.get_value(),
            order: sort_order.get(),
        });
        on_done.run(());
    };

    view! {
        <form class="column-editor" on:submit=save>
            <input
                type="text"
                prop:value=move || title.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_title.set(input.value());
                }
            />
            <input
                type="number"
                min="1"
                placeholder="WIP limit"
                prop:value=move || limit.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_limit.set(input.value());
                }
            />
            <input
                type="text"
                placeholder="Color (#rrggbb)"
                prop:value=move || color.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_color.set(input.value());
                }
            />
            <div class="sort-selector-row">
                {SortOrder::ALL.iter().map(|order| {
                    let order = *order;
                    let is_selected = move || sort_order.get() == order;
                    view! {
                        <button
                            type="button"
                            class=move || if is_selected() { "sort-btn active" } else { "sort-btn" }
                            on:click=move |_| set_sort_order.set(order)
                        >
                            {order.label()}
                        </button>
                    }
                }).collect_view()}
            </div>
            <button type="submit">"Save"</button>
        </form>
    }
}

/// Quick-add form at the bottom of a column
#[component]
fn AddCardForm(column_id: String) -> impl IntoView {
    let store = use_board_store();
    let id = StoredValue::new(column_id);
    let (title, set_title) = signal(String::new());

    let add_card = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = title.get();
        if text.trim().is_empty() {
            return;
        }
        store.dispatch(BoardAction::AddCard {
            column_id: id.get_value(),
            draft: CardDraft::titled(text),
        });
        set_title.set(String::new());
    };

    view! {
        <form class="add-card-form" on:submit=add_card>
            <input
                type="text"
                placeholder="Add card..."
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
