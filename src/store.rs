//! Global Board Store
//!
//! Owns the single board aggregate and the template list. Every mutation
//! goes through the pure reducer in `kanban-core` and is persisted to
//! localStorage fire-and-forget after it commits.

use leptos::prelude::*;

use kanban_core::{
    confirm_delete, reduce, request_delete, transition, Board, BoardAction, CardFilter,
    DeleteTarget, DeleteToken, DragEvent, DragState, DragTarget, Template, TemplateStore,
};
use leptos_dragdrop::DropTarget;

use crate::storage;

/// Reactive handles around the board state. Mutations only through
/// [`BoardStore::dispatch`] and the drag methods.
#[derive(Clone, Copy)]
pub struct BoardStore {
    pub board: RwSignal<Board>,
    pub templates: RwSignal<TemplateStore>,
    pub drag: RwSignal<DragState>,
    pub filter: RwSignal<CardFilter>,
}

impl BoardStore {
    /// Restore from localStorage, falling back to the sample board.
    pub fn load() -> Self {
        let board = storage::load_board().unwrap_or_else(storage::sample_board);
        let templates = storage::load_templates().unwrap_or_default();
        Self {
            board: RwSignal::new(board),
            templates: RwSignal::new(templates),
            drag: RwSignal::new(DragState::Idle),
            filter: RwSignal::new(CardFilter::default()),
        }
    }

    /// Apply one action and persist the result.
    pub fn dispatch(&self, action: BoardAction) {
        let next = self.board.with_untracked(|b| reduce(b, action));
        self.board.set(next);
        self.persist_board();
    }

    // ========================
    // Drag gesture routing
    // ========================

    pub fn drag_start(&self, id: String) {
        self.apply_drag(DragEvent::Start(id));
    }

    pub fn drag_over(&self, target: DropTarget) {
        self.apply_drag(DragEvent::Over(to_drag_target(target)));
    }

    pub fn drag_end(&self, target: Option<DropTarget>) {
        self.apply_drag(DragEvent::End(target.map(to_drag_target)));
    }

    fn apply_drag(&self, event: DragEvent) {
        let (state, board) = self
            .board
            .with_untracked(|b| self.drag.with_untracked(|s| transition(s, b, event)));
        let changed = self.board.with_untracked(|b| *b != board);
        self.drag.set(state);
        if changed {
            self.board.set(board);
            self.persist_board();
        }
    }

    // ========================
    // Two-phase destructive actions
    // ========================

    pub fn request(&self, target: DeleteTarget) -> Option<DeleteToken> {
        self.board.with_untracked(|b| request_delete(b, target))
    }

    pub fn confirm(&self, token: DeleteToken) {
        let next = self.board.with_untracked(|b| confirm_delete(b, token));
        self.board.set(next);
        self.persist_board();
    }

    // ========================
    // Templates
    // ========================

    pub fn save_template(&self, template: Template) {
        self.templates.update(|t| t.save(template));
        self.persist_templates();
    }

    pub fn delete_template(&self, id: &str) {
        self.templates.update(|t| t.remove(id));
        self.persist_templates();
    }

    fn persist_board(&self) {
        self.board.with_untracked(|b| storage::save_board(b));
    }

    fn persist_templates(&self) {
        self.templates.with_untracked(|t| storage::save_templates(t));
    }
}

fn to_drag_target(target: DropTarget) -> DragTarget {
    match target {
        DropTarget::Card(id) => DragTarget::Card(id),
        DropTarget::Slot(column, index) => DragTarget::Slot { column, index },
        DropTarget::Column(id) => DragTarget::Column(id),
    }
}

/// Get the board store from context
pub fn use_board_store() -> BoardStore {
    expect_context::<BoardStore>()
}
