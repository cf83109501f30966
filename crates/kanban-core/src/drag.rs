//! Drag State Machine
//!
//! Adapts the three-phase gesture contract (start / over / end) into reducer
//! calls. `idle -> dragging-card | dragging-column -> idle`, nothing else.
//! Card positions are committed live on every `Over` so the UI shows the
//! reorder as it happens; `End` only clears state for cards (and performs
//! the reorder for columns). There is deliberately no rollback when a drag
//! ends outside a valid target: the last committed position stands.

use crate::model::{Board, CardId, ColumnId};
use crate::reducer::{reduce, BoardAction};

/// What the pointer is currently over, reported by the gesture layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DragTarget {
    /// Over another card: insert at that card's stored position.
    Card(CardId),
    /// Over an explicit slot between cards.
    Slot { column: ColumnId, index: usize },
    /// Over a column body (append) or, for a column drag, the column itself.
    Column(ColumnId),
}

/// The active drag subject. Cards and columns live in disjoint identifier
/// namespaces, so a bare id can be classified on `Start`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingCard(CardId),
    DraggingColumn(ColumnId),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}

/// One reported gesture phase.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Start(String),
    Over(DragTarget),
    End(Option<DragTarget>),
}

/// Single transition function for the whole gesture. Returns the next drag
/// state plus the (possibly unchanged) board.
pub fn transition(state: &DragState, board: &Board, event: DragEvent) -> (DragState, Board) {
    match event {
        DragEvent::Start(id) => {
            if state.is_dragging() {
                // A second start mid-gesture is a stray event.
                return (state.clone(), board.clone());
            }
            let next = if board.cards.contains_key(&id) {
                DragState::DraggingCard(id)
            } else if board.columns.contains_key(&id) {
                DragState::DraggingColumn(id)
            } else {
                DragState::Idle
            };
            (next, board.clone())
        }
        DragEvent::Over(target) => match state {
            DragState::DraggingCard(card_id) => {
                (state.clone(), card_over(board, card_id, &target))
            }
            // Column order is only committed on End.
            _ => (state.clone(), board.clone()),
        },
        DragEvent::End(target) => {
            let board = match (state, target) {
                (DragState::DraggingColumn(from), Some(DragTarget::Column(to))) => reduce(
                    board,
                    BoardAction::ReorderColumns {
                        from: from.clone(),
                        to,
                    },
                ),
                // Card positions were already committed during Over.
                _ => board.clone(),
            };
            (DragState::Idle, board)
        }
    }
}

fn card_over(board: &Board, card_id: &CardId, target: &DragTarget) -> Board {
    let action = match target {
        DragTarget::Card(over_id) => {
            if over_id == card_id {
                return board.clone();
            }
            let Some(col_id) = board.column_of(over_id).cloned() else {
                return board.clone();
            };
            let index = board.columns[&col_id]
                .card_ids
                .iter()
                .position(|id| id == over_id);
            BoardAction::MoveCard {
                card_id: card_id.clone(),
                to_column: col_id,
                index,
            }
        }
        DragTarget::Slot { column, index } => {
            // Slot indices address the stored sequence as it stands, but the
            // move removes the card first; a same-column drop below the
            // card's current position has to come down by one.
            let mut index = *index;
            if let Some(col) = board.columns.get(column) {
                if let Some(pos) = col.card_ids.iter().position(|id| id == card_id) {
                    if pos < index {
                        index -= 1;
                    }
                }
            }
            BoardAction::MoveCard {
                card_id: card_id.clone(),
                to_column: column.clone(),
                index: Some(index),
            }
        }
        DragTarget::Column(column) => BoardAction::MoveCard {
            card_id: card_id.clone(),
            to_column: column.clone(),
            index: None,
        },
    };
    // WIP-limited cross-column hovers degrade to a no-op inside the reducer.
    reduce(board, action)
}

#[cfg(test)]
mod drag_tests {
    use super::*;
    use crate::model::CardDraft;
    use crate::reducer::ColumnPatch;

    fn two_column_board() -> (Board, ColumnId, ColumnId, CardId, CardId) {
        let mut board = Board::new();
        board = reduce(&board, BoardAction::AddColumn { title: "A".into() });
        board = reduce(&board, BoardAction::AddColumn { title: "B".into() });
        let a = board.column_order[0].clone();
        let b = board.column_order[1].clone();
        board = reduce(
            &board,
            BoardAction::AddCard { column_id: a.clone(), draft: CardDraft::titled("one") },
        );
        board = reduce(
            &board,
            BoardAction::AddCard { column_id: b.clone(), draft: CardDraft::titled("two") },
        );
        let one = board.columns[&a].card_ids[0].clone();
        let two = board.columns[&b].card_ids[0].clone();
        (board, a, b, one, two)
    }

    #[test]
    fn start_classifies_card_and_column_by_namespace() {
        let (board, a, _, one, _) = two_column_board();
        let (state, _) = transition(&DragState::Idle, &board, DragEvent::Start(one.clone()));
        assert_eq!(state, DragState::DraggingCard(one));
        let (state, _) = transition(&DragState::Idle, &board, DragEvent::Start(a.clone()));
        assert_eq!(state, DragState::DraggingColumn(a));
        let (state, _) = transition(&DragState::Idle, &board, DragEvent::Start("ghost".into()));
        assert_eq!(state, DragState::Idle);
    }

    #[test]
    fn over_commits_card_position_live() {
        let (board, _, b, one, two) = two_column_board();
        let state = DragState::DraggingCard(one.clone());
        let (state, board) =
            transition(&state, &board, DragEvent::Over(DragTarget::Card(two.clone())));
        // Still dragging, but the board already reflects the move.
        assert_eq!(state, DragState::DraggingCard(one.clone()));
        assert_eq!(board.columns[&b].card_ids, vec![one, two]);
        assert!(board.is_consistent());
    }

    #[test]
    fn over_respects_wip_limit_on_cross_column_hover() {
        let (board, _, b, one, _) = two_column_board();
        let board = reduce(
            &board,
            BoardAction::EditColumn {
                column_id: b.clone(),
                patch: ColumnPatch { wip_limit: Some(Some(1)), ..ColumnPatch::default() },
            },
        );
        let state = DragState::DraggingCard(one.clone());
        let (_, next) =
            transition(&state, &board, DragEvent::Over(DragTarget::Column(b.clone())));
        assert_eq!(next, board);
    }

    #[test]
    fn same_column_slot_drop_lands_in_the_indicated_gap() {
        let mut board = Board::new();
        board = reduce(&board, BoardAction::AddColumn { title: "A".into() });
        let col = board.column_order[0].clone();
        for title in ["a", "b", "c"] {
            board = reduce(
                &board,
                BoardAction::AddCard { column_id: col.clone(), draft: CardDraft::titled(title) },
            );
        }
        let a = board.columns[&col].card_ids[0].clone();
        let b = board.columns[&col].card_ids[1].clone();
        let c = board.columns[&col].card_ids[2].clone();

        // Drop `a` into the gap between `b` and `c` (slot index 2).
        let state = DragState::DraggingCard(a.clone());
        let (state, board) = transition(
            &state,
            &board,
            DragEvent::Over(DragTarget::Slot { column: col.clone(), index: 2 }),
        );
        let (_, board) = transition(&state, &board, DragEvent::End(None));
        assert_eq!(
            board.columns[&col].card_ids,
            vec![b.clone(), a.clone(), c.clone()],
            "card should land between b and c"
        );

        // Dragging back up through the leading slot restores the order.
        let state = DragState::DraggingCard(a.clone());
        let (_, board) = transition(
            &state,
            &board,
            DragEvent::Over(DragTarget::Slot { column: col.clone(), index: 0 }),
        );
        assert_eq!(board.columns[&col].card_ids, vec![a, b, c]);
    }

    #[test]
    fn end_without_target_keeps_last_committed_position() {
        let (board, _, b, one, _) = two_column_board();
        let state = DragState::DraggingCard(one.clone());
        let (state, board) =
            transition(&state, &board, DragEvent::Over(DragTarget::Column(b.clone())));
        let (state, board) = transition(&state, &board, DragEvent::End(None));
        assert_eq!(state, DragState::Idle);
        // No rollback: the live-preview position became final.
        assert!(board.columns[&b].card_ids.contains(&one));
    }

    #[test]
    fn column_drag_commits_on_end() {
        let (board, a, b, _, _) = two_column_board();
        let state = DragState::DraggingColumn(b.clone());
        let (state, board) = transition(
            &state,
            &board,
            DragEvent::End(Some(DragTarget::Column(a.clone()))),
        );
        assert_eq!(state, DragState::Idle);
        assert_eq!(board.column_order, vec![b, a]);
    }

    #[test]
    fn stray_start_mid_drag_is_ignored() {
        let (board, a, _, one, _) = two_column_board();
        let state = DragState::DraggingCard(one.clone());
        let (state, _) = transition(&state, &board, DragEvent::Start(a));
        assert_eq!(state, DragState::DraggingCard(one));
    }
}
