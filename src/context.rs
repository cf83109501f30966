//! Application Context
//!
//! UI selection state provided via Leptos Context API. Board data itself
//! lives in [`crate::store::BoardStore`]; this only tracks what the user is
//! looking at.

use leptos::prelude::*;

/// App-wide UI signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Card currently open in the editor column (None = closed) - read
    pub editing_card: ReadSignal<Option<String>>,
    set_editing_card: WriteSignal<Option<String>>,
    /// Whether the template panel is open - read
    pub show_templates: ReadSignal<bool>,
    set_show_templates: WriteSignal<bool>,
}

impl AppContext {
    pub fn new(
        editing_card: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
        show_templates: (ReadSignal<bool>, WriteSignal<bool>),
    ) -> Self {
        Self {
            editing_card: editing_card.0,
            set_editing_card: editing_card.1,
            show_templates: show_templates.0,
            set_show_templates: show_templates.1,
        }
    }

    /// Open (or close with None) the card editor
    pub fn edit_card(&self, card_id: Option<String>) {
        self.set_editing_card.set(card_id);
    }

    /// Toggle the template panel
    pub fn toggle_templates(&self) {
        self.set_show_templates.update(|v| *v = !*v);
    }
}
