//! Kanban Board State Core
//!
//! Pure, UI-agnostic board state: data model, reducer, drag state machine,
//! filtering and card templates. Everything in here is synchronous,
//! deterministic (apart from fresh identifiers/timestamps) and safe to call
//! speculatively: invalid references and limit violations degrade to no-ops.

mod drag;
mod filter;
mod model;
mod reducer;
mod template;

#[cfg(test)]
mod tests;

pub use drag::{transition, DragEvent, DragState, DragTarget};
pub use filter::CardFilter;
pub use model::{
    Board, Card, CardDraft, CardId, ChecklistItem, Column, ColumnId, Priority, SortOrder,
};
pub use reducer::{
    confirm_delete, reduce, request_delete, BoardAction, CardPatch, ColumnPatch, DeleteTarget,
    DeleteToken,
};
pub use template::{Template, TemplateStore};
