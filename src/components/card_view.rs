//! Card View Component
//!
//! One card tile: title, priority badge and the optional metadata strip.
//! Clicking opens the editor column; mousedown starts a drag.

use leptos::prelude::*;

use kanban_core::Card;
use leptos_dragdrop::{make_on_card_mouseenter, make_on_mousedown, DndSignals, DropTarget};

use crate::context::AppContext;

#[component]
pub fn CardView(card: Card, dnd: DndSignals) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let id = card.id.clone();

    let on_mousedown = make_on_mousedown(dnd, id.clone());
    let on_mouseenter = make_on_card_mouseenter(dnd, id.clone());

    let drag_id = id.clone();
    let is_dragging = move || dnd.dragging_id_read.get() == Some(drag_id.clone());
    let target_id = id.clone();
    let is_drop_target = move || {
        matches!(
            dnd.drop_target_read.get(),
            Some(DropTarget::Card(ref c)) if *c == target_id
        )
    };

    let card_class = move || {
        let mut c = String::from("card");
        if is_dragging() {
            c.push_str(" dragging");
        }
        if is_drop_target() {
            c.push_str(" drop-target");
        }
        c
    };

    let done = card.checklist.iter().filter(|i| i.done).count();
    let total = card.checklist.len();
    let click_id = id.clone();

    view! {
        <div
            class=card_class
            style=card.color.as_ref().map(|c| format!("border-left-color: {};", c)).unwrap_or_default()
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:click=move |_| {
                // A click right after a drop would reopen the editor
                if !dnd.drag_just_ended_read.get_untracked() {
                    ctx.edit_card(Some(click_id.clone()));
                }
            }
        >
            <div class="card-title-row">
                <span class=format!("priority-dot {}", card.priority.label())></span>
                <span class="card-title">{card.title.clone()}</span>
            </div>

            {(!card.description.is_empty()).then(|| view! {
                <div class="card-description">{card.description.clone()}</div>
            })}

            <div class="card-meta">
                {card.story_points.map(|p| view! {
                    <span class="card-points">{format!("{p} pts")}</span>
                })}
                {card.due_date.map(|d| view! {
                    <span class="card-due">{d.format("%b %e").to_string()}</span>
                })}
                {card.assignee.clone().map(|a| view! {
                    <span class="card-assignee">{a}</span>
                })}
                {(total > 0).then(|| view! {
                    <span class="card-checklist">{format!("☑ {done}/{total}")}</span>
                })}
            </div>

            {(!card.tags.is_empty()).then(|| view! {
                <div class="card-tags">
                    {card.tags.iter().map(|tag| view! {
                        <span class="card-tag">{tag.clone()}</span>
                    }).collect_view()}
                </div>
            })}
        </div>
    }
}
