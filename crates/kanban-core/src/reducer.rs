//! Board Reducer
//!
//! Every mutation of the board goes through [`reduce`]: a pure transition
//! `(Board, BoardAction) -> Board`. Operations are total: an unknown
//! identifier or a WIP-limit violation returns the board unchanged instead
//! of failing, so callers may dispatch speculatively.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Board, Card, CardDraft, CardId, ChecklistItem, Column, ColumnId, Priority, SortOrder};

/// Partial card update. `None` leaves a field alone; the nested options set
/// optional fields to a concrete value or clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    pub assignee: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub story_points: Option<Option<u32>>,
    pub color: Option<Option<String>>,
}

/// Partial column update, same convention as [`CardPatch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnPatch {
    pub title: Option<String>,
    pub wip_limit: Option<Option<u32>>,
    pub color: Option<Option<String>>,
    pub collapsed: Option<bool>,
}

/// Every intent the board understands.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    AddCard { column_id: ColumnId, draft: CardDraft },
    DeleteCard { card_id: CardId },
    EditCard { card_id: CardId, patch: CardPatch },
    DuplicateCard { card_id: CardId },
    /// `index: None` appends; cross-column moves are rejected when the
    /// target is at its WIP limit, same-column reorders never are.
    MoveCard {
        card_id: CardId,
        to_column: ColumnId,
        index: Option<usize>,
    },
    AddColumn { title: String },
    /// Cascades: every card listed in the column is deleted too.
    DeleteColumn { column_id: ColumnId },
    EditColumn { column_id: ColumnId, patch: ColumnPatch },
    /// Moves `from` to `to`'s former position in the display order.
    ReorderColumns { from: ColumnId, to: ColumnId },
    SetColumnSortOrder { column_id: ColumnId, order: SortOrder },
    ClearBoard,
    /// Wholesale replacement, used by JSON import.
    ReplaceBoard(Board),
}

/// Apply one action, returning the next board. Never panics.
pub fn reduce(board: &Board, action: BoardAction) -> Board {
    let mut next = board.clone();
    match action {
        BoardAction::AddCard { column_id, draft } => add_card(&mut next, &column_id, draft),
        BoardAction::DeleteCard { card_id } => delete_card(&mut next, &card_id),
        BoardAction::EditCard { card_id, patch } => edit_card(&mut next, &card_id, patch),
        BoardAction::DuplicateCard { card_id } => duplicate_card(&mut next, &card_id),
        BoardAction::MoveCard {
            card_id,
            to_column,
            index,
        } => move_card(&mut next, &card_id, &to_column, index),
        BoardAction::AddColumn { title } => add_column(&mut next, title),
        BoardAction::DeleteColumn { column_id } => delete_column(&mut next, &column_id),
        BoardAction::EditColumn { column_id, patch } => edit_column(&mut next, &column_id, patch),
        BoardAction::ReorderColumns { from, to } => reorder_columns(&mut next, &from, &to),
        BoardAction::SetColumnSortOrder { column_id, order } => {
            if let Some(col) = next.columns.get_mut(&column_id) {
                col.sort_order = order;
            }
        }
        BoardAction::ClearBoard => next = Board::new(),
        BoardAction::ReplaceBoard(board) => next = board,
    }
    next
}

fn add_card(board: &mut Board, column_id: &str, draft: CardDraft) {
    if !board.columns.contains_key(column_id) {
        return;
    }
    let card = Card::from_draft(draft);
    let id = card.id.clone();
    board.cards.insert(id.clone(), card);
    if let Some(col) = board.columns.get_mut(column_id) {
        col.card_ids.push(id);
    }
}

fn delete_card(board: &mut Board, card_id: &str) {
    if board.cards.remove(card_id).is_none() {
        return;
    }
    for col in board.columns.values_mut() {
        col.card_ids.retain(|id| id != card_id);
    }
}

fn edit_card(board: &mut Board, card_id: &str, patch: CardPatch) {
    let Some(card) = board.cards.get_mut(card_id) else {
        return;
    };
    if let Some(title) = patch.title {
        card.title = title;
    }
    if let Some(description) = patch.description {
        card.description = description;
    }
    if let Some(priority) = patch.priority {
        card.priority = priority;
    }
    if let Some(tags) = patch.tags {
        card.tags = tags;
    }
    if let Some(assignee) = patch.assignee {
        card.assignee = assignee;
    }
    if let Some(due_date) = patch.due_date {
        card.due_date = due_date;
    }
    if let Some(checklist) = patch.checklist {
        card.checklist = checklist;
    }
    if let Some(story_points) = patch.story_points {
        card.story_points = story_points;
    }
    if let Some(color) = patch.color {
        card.color = color;
    }
}

fn duplicate_card(board: &mut Board, card_id: &str) {
    let Some(original) = board.cards.get(card_id) else {
        return;
    };
    let clone = Card::from_draft(original.to_draft());
    let clone_id = clone.id.clone();
    let Some(col_id) = board.column_of(card_id).cloned() else {
        return;
    };
    board.cards.insert(clone_id.clone(), clone);
    if let Some(col) = board.columns.get_mut(&col_id) {
        // Clone sits right after the original.
        let pos = col
            .card_ids
            .iter()
            .position(|id| id == card_id)
            .map(|p| p + 1)
            .unwrap_or(col.card_ids.len());
        col.card_ids.insert(pos, clone_id);
    }
}

fn move_card(board: &mut Board, card_id: &str, to_column: &str, index: Option<usize>) {
    if !board.cards.contains_key(card_id) || !board.columns.contains_key(to_column) {
        return;
    }
    let Some(from_column) = board.column_of(card_id).cloned() else {
        return;
    };
    if from_column != to_column {
        if let Some(target) = board.columns.get(to_column) {
            if target.is_at_limit() {
                return;
            }
        }
    }
    if let Some(col) = board.columns.get_mut(&from_column) {
        col.card_ids.retain(|id| id != card_id);
    }
    if let Some(col) = board.columns.get_mut(to_column) {
        let pos = match index {
            Some(i) => i.min(col.card_ids.len()),
            None => col.card_ids.len(),
        };
        col.card_ids.insert(pos, card_id.to_string());
    }
}

fn add_column(board: &mut Board, title: String) {
    let col = Column::new(title);
    board.column_order.push(col.id.clone());
    board.columns.insert(col.id.clone(), col);
}

fn delete_column(board: &mut Board, column_id: &str) {
    let Some(col) = board.columns.remove(column_id) else {
        return;
    };
    for card_id in &col.card_ids {
        board.cards.remove(card_id);
    }
    board.column_order.retain(|id| id != column_id);
}

fn edit_column(board: &mut Board, column_id: &str, patch: ColumnPatch) {
    let Some(col) = board.columns.get_mut(column_id) else {
        return;
    };
    if let Some(title) = patch.title {
        col.title = title;
    }
    if let Some(wip_limit) = patch.wip_limit {
        // A WIP limit of zero makes no sense; treat it as "no limit".
        col.wip_limit = wip_limit.filter(|l| *l > 0);
    }
    if let Some(color) = patch.color {
        col.color = color;
    }
    if let Some(collapsed) = patch.collapsed {
        col.collapsed = collapsed;
    }
}

fn reorder_columns(board: &mut Board, from: &str, to: &str) {
    if from == to {
        return;
    }
    let Some(from_idx) = board.column_order.iter().position(|id| id == from) else {
        return;
    };
    let Some(to_idx) = board.column_order.iter().position(|id| id == to) else {
        return;
    };
    let moved = board.column_order.remove(from_idx);
    board.column_order.insert(to_idx, moved);
}

/// What a two-phase destructive action is aimed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeleteTarget {
    Card(CardId),
    Column(ColumnId),
    Board,
}

/// Confirmation token handed out by [`request_delete`]. Destructive actions
/// only happen when a token is passed back to [`confirm_delete`], which
/// keeps the confirm flow testable without a dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteToken {
    target: DeleteTarget,
}

impl DeleteToken {
    /// What confirming this token will delete.
    pub fn target(&self) -> &DeleteTarget {
        &self.target
    }
}

/// First phase: validate the reference and hand out a token, or `None` for
/// a dangling identifier.
pub fn request_delete(board: &Board, target: DeleteTarget) -> Option<DeleteToken> {
    let valid = match &target {
        DeleteTarget::Card(id) => board.cards.contains_key(id),
        DeleteTarget::Column(id) => board.columns.contains_key(id),
        DeleteTarget::Board => true,
    };
    valid.then_some(DeleteToken { target })
}

/// Second phase: perform the deletion the token stands for.
pub fn confirm_delete(board: &Board, token: DeleteToken) -> Board {
    let action = match token.target {
        DeleteTarget::Card(card_id) => BoardAction::DeleteCard { card_id },
        DeleteTarget::Column(column_id) => BoardAction::DeleteColumn { column_id },
        DeleteTarget::Board => BoardAction::ClearBoard,
    };
    reduce(board, action)
}

#[cfg(test)]
mod reducer_tests {
    use super::*;

    fn board_with_columns(titles: &[&str]) -> Board {
        let mut board = Board::new();
        for title in titles {
            board = reduce(&board, BoardAction::AddColumn { title: title.to_string() });
        }
        board
    }

    fn col_id(board: &Board, index: usize) -> ColumnId {
        board.column_order[index].clone()
    }

    #[test]
    fn add_card_to_unknown_column_is_a_no_op() {
        let board = board_with_columns(&["To Do"]);
        let next = reduce(
            &board,
            BoardAction::AddCard {
                column_id: "nope".into(),
                draft: CardDraft::titled("X"),
            },
        );
        assert_eq!(next, board);
    }

    #[test]
    fn edit_card_keeps_identity_and_membership() {
        let board = board_with_columns(&["To Do"]);
        let col = col_id(&board, 0);
        let board = reduce(
            &board,
            BoardAction::AddCard {
                column_id: col.clone(),
                draft: CardDraft::titled("before"),
            },
        );
        let card_id = board.columns[&col].card_ids[0].clone();
        let created = board.cards[&card_id].created_at;

        let patch = CardPatch {
            title: Some("after".into()),
            assignee: Some(Some("ada".into())),
            story_points: Some(Some(5)),
            ..CardPatch::default()
        };
        let next = reduce(&board, BoardAction::EditCard { card_id: card_id.clone(), patch });

        let card = &next.cards[&card_id];
        assert_eq!(card.title, "after");
        assert_eq!(card.assignee.as_deref(), Some("ada"));
        assert_eq!(card.story_points, Some(5));
        assert_eq!(card.created_at, created);
        assert_eq!(next.column_of(&card_id), Some(&col));
    }

    #[test]
    fn edit_card_can_clear_optional_fields() {
        let board = board_with_columns(&["To Do"]);
        let col = col_id(&board, 0);
        let mut draft = CardDraft::titled("X");
        draft.assignee = Some("ada".into());
        let board = reduce(&board, BoardAction::AddCard { column_id: col.clone(), draft });
        let card_id = board.columns[&col].card_ids[0].clone();

        let patch = CardPatch {
            assignee: Some(None),
            ..CardPatch::default()
        };
        let next = reduce(&board, BoardAction::EditCard { card_id: card_id.clone(), patch });
        assert_eq!(next.cards[&card_id].assignee, None);
    }

    #[test]
    fn move_within_column_reorders_even_at_wip_limit() {
        let board = board_with_columns(&["Doing"]);
        let col = col_id(&board, 0);
        let mut board = board;
        for title in ["a", "b"] {
            board = reduce(
                &board,
                BoardAction::AddCard {
                    column_id: col.clone(),
                    draft: CardDraft::titled(title),
                },
            );
        }
        board = reduce(
            &board,
            BoardAction::EditColumn {
                column_id: col.clone(),
                patch: ColumnPatch {
                    wip_limit: Some(Some(2)),
                    ..ColumnPatch::default()
                },
            },
        );
        let first = board.columns[&col].card_ids[0].clone();
        let next = reduce(
            &board,
            BoardAction::MoveCard {
                card_id: first.clone(),
                to_column: col.clone(),
                index: None,
            },
        );
        assert_eq!(next.columns[&col].card_ids.last(), Some(&first));
    }

    #[test]
    fn reorder_columns_moves_from_to_targets_former_position() {
        let board = board_with_columns(&["A", "B", "C"]);
        let (a, b, c) = (col_id(&board, 0), col_id(&board, 1), col_id(&board, 2));
        let next = reduce(
            &board,
            BoardAction::ReorderColumns { from: c.clone(), to: a.clone() },
        );
        assert_eq!(next.column_order, vec![c, a, b]);
        assert!(next.is_consistent());
    }

    #[test]
    fn zero_wip_limit_means_no_limit() {
        let board = board_with_columns(&["A"]);
        let col = col_id(&board, 0);
        let next = reduce(
            &board,
            BoardAction::EditColumn {
                column_id: col.clone(),
                patch: ColumnPatch {
                    wip_limit: Some(Some(0)),
                    ..ColumnPatch::default()
                },
            },
        );
        assert_eq!(next.columns[&col].wip_limit, None);
    }

    #[test]
    fn request_delete_rejects_dangling_references() {
        let board = board_with_columns(&["A"]);
        assert!(request_delete(&board, DeleteTarget::Card("nope".into())).is_none());
        assert!(request_delete(&board, DeleteTarget::Board).is_some());
    }

    #[test]
    fn confirm_delete_clears_board() {
        let board = board_with_columns(&["A", "B"]);
        let token = request_delete(&board, DeleteTarget::Board).unwrap();
        let next = confirm_delete(&board, token);
        assert_eq!(next, Board::new());
    }
}
