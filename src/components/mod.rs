//! UI Components
//!
//! Reusable Leptos components.

mod board_view;
mod card_editor;
mod card_view;
mod column_view;
mod delete_confirm_button;
mod drop_slot;
mod filter_bar;
mod template_panel;
mod toolbar;

pub use board_view::BoardView;
pub use card_editor::CardEditor;
pub use card_view::CardView;
pub use column_view::ColumnView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use drop_slot::DropSlot;
pub use filter_bar::FilterBar;
pub use template_panel::TemplatePanel;
pub use toolbar::Toolbar;
