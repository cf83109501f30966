//! Board Scenario Tests
//!
//! End-to-end reducer scenarios and structural invariants, exercised the
//! way the UI drives the board: build up state through actions only, then
//! inspect the aggregate.

use crate::*;

fn add_column(board: &Board, title: &str) -> Board {
    reduce(board, BoardAction::AddColumn { title: title.to_string() })
}

fn add_card(board: &Board, column_id: &str, title: &str) -> Board {
    reduce(
        board,
        BoardAction::AddCard {
            column_id: column_id.to_string(),
            draft: CardDraft::titled(title),
        },
    )
}

fn find_column<'a>(board: &'a Board, title: &str) -> &'a Column {
    board
        .ordered_columns()
        .into_iter()
        .find(|c| c.title == title)
        .expect("column by title")
}

#[test]
fn empty_board_build_up_scenario() {
    let board = Board::new();
    let board = add_column(&board, "To Do");
    let board = add_column(&board, "Done");
    let todo_id = find_column(&board, "To Do").id.clone();

    let board = reduce(
        &board,
        BoardAction::AddCard {
            column_id: todo_id.clone(),
            draft: CardDraft {
                title: "X".into(),
                description: "d".into(),
                priority: Priority::Low,
                ..CardDraft::default()
            },
        },
    );

    assert_eq!(board.column_order.len(), 2);
    let todo = &board.columns[&todo_id];
    assert_eq!(todo.card_ids.len(), 1);
    assert_eq!(board.cards[&todo.card_ids[0]].title, "X");
    assert!(board.is_consistent());
}

#[test]
fn every_card_lives_in_exactly_one_column() {
    let board = Board::new();
    let board = add_column(&board, "A");
    let board = add_column(&board, "B");
    let a = board.column_order[0].clone();
    let b = board.column_order[1].clone();
    let mut board = board;
    for i in 0..5 {
        board = add_card(&board, &a, &format!("card {i}"));
    }
    let moved = board.columns[&a].card_ids[2].clone();
    board = reduce(
        &board,
        BoardAction::MoveCard { card_id: moved.clone(), to_column: b.clone(), index: Some(0) },
    );

    assert!(board.is_consistent());
    for card_id in board.cards.keys() {
        let owners = board
            .columns
            .values()
            .filter(|c| c.card_ids.contains(card_id))
            .count();
        assert_eq!(owners, 1, "card {card_id} owned by {owners} columns");
    }
    assert_eq!(board.column_of(&moved), Some(&b));
}

#[test]
fn column_order_stays_a_permutation() {
    let board = Board::new();
    let board = add_column(&board, "A");
    let board = add_column(&board, "B");
    let board = add_column(&board, "C");
    let b = board.column_order[1].clone();
    let board = reduce(&board, BoardAction::DeleteColumn { column_id: b });
    assert_eq!(board.column_order.len(), board.columns.len());
    assert!(board.is_consistent());
}

#[test]
fn delete_column_cascades_card_deletion() {
    let board = Board::new();
    let board = add_column(&board, "Doomed");
    let board = add_column(&board, "Safe");
    let doomed = board.column_order[0].clone();
    let safe = board.column_order[1].clone();
    let board = add_card(&board, &doomed, "one");
    let board = add_card(&board, &doomed, "two");
    let board = add_card(&board, &safe, "keeper");
    let doomed_cards = board.columns[&doomed].card_ids.clone();

    let board = reduce(&board, BoardAction::DeleteColumn { column_id: doomed });

    for id in &doomed_cards {
        assert!(!board.cards.contains_key(id));
    }
    assert_eq!(board.cards.len(), 1);
    assert!(board.is_consistent());
}

#[test]
fn cross_column_move_into_full_column_is_rejected() {
    let board = Board::new();
    let board = add_column(&board, "Backlog");
    let board = add_column(&board, "In Progress");
    let backlog = board.column_order[0].clone();
    let wip = board.column_order[1].clone();
    let board = add_card(&board, &wip, "busy");
    let board = reduce(
        &board,
        BoardAction::EditColumn {
            column_id: wip.clone(),
            patch: ColumnPatch { wip_limit: Some(Some(1)), ..ColumnPatch::default() },
        },
    );
    let board = add_card(&board, &backlog, "wants in");
    let incoming = board.columns[&backlog].card_ids[0].clone();

    let next = reduce(
        &board,
        BoardAction::MoveCard { card_id: incoming, to_column: wip.clone(), index: None },
    );

    assert_eq!(next, board, "move into a full column must be a no-op");
    assert_eq!(next.columns[&wip].card_ids.len(), 1);
}

#[test]
fn duplicate_copies_fields_but_not_identity() {
    let board = Board::new();
    let board = add_column(&board, "A");
    let col = board.column_order[0].clone();
    let board = reduce(
        &board,
        BoardAction::AddCard {
            column_id: col.clone(),
            draft: CardDraft {
                title: "original".into(),
                description: "body".into(),
                priority: Priority::High,
                tags: vec!["x".into()],
                story_points: Some(3),
                ..CardDraft::default()
            },
        },
    );
    let original_id = board.columns[&col].card_ids[0].clone();

    let next = reduce(&board, BoardAction::DuplicateCard { card_id: original_id.clone() });

    let ids = &next.columns[&col].card_ids;
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[0], original_id, "original keeps its position");
    let original = &next.cards[&original_id];
    let clone = &next.cards[&ids[1]];
    assert_ne!(clone.id, original.id);
    assert!(clone.created_at >= original.created_at);
    assert_eq!(clone.to_draft(), original.to_draft());
    assert_eq!(original, &board.cards[&original_id]);
}

#[test]
fn board_round_trips_through_json() {
    let board = Board::new();
    let board = add_column(&board, "To Do");
    let board = add_column(&board, "Done");
    let col = board.column_order[0].clone();
    let board = reduce(
        &board,
        BoardAction::AddCard {
            column_id: col,
            draft: CardDraft {
                title: "serialize me".into(),
                tags: vec!["round".into(), "trip".into()],
                due_date: Some("2026-09-01".parse().unwrap()),
                checklist: vec![ChecklistItem::new("step one")],
                color: Some("#aabbcc".into()),
                ..CardDraft::default()
            },
        },
    );

    let json = serde_json::to_string(&board).expect("serialize");
    let restored: Board = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, board);
}

#[test]
fn templates_round_trip_through_json() {
    let mut store = TemplateStore::default();
    store.save(Template::new("Bug", "bugs", CardDraft::titled("Bug: ")));
    store.save(Template::new("Chore", "ops", CardDraft::titled("Chore: ")));

    let json = serde_json::to_string(&store).expect("serialize");
    assert!(json.starts_with('['), "flat list on the wire");
    let restored: TemplateStore = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, store);
}

#[test]
fn slot_drag_walks_a_card_down_its_own_column() {
    let board = Board::new();
    let board = add_column(&board, "Queue");
    let col = board.column_order[0].clone();
    let mut board = board;
    for title in ["first", "second", "third", "fourth"] {
        board = add_card(&board, &col, title);
    }
    let first = board.columns[&col].card_ids[0].clone();

    // Hover each gap below the card in turn, then release outside a target.
    let mut state = DragState::DraggingCard(first.clone());
    for slot in [2, 3, 4] {
        let (next_state, next_board) = transition(
            &state,
            &board,
            DragEvent::Over(DragTarget::Slot { column: col.clone(), index: slot }),
        );
        state = next_state;
        board = next_board;
    }
    let (state, board) = transition(&state, &board, DragEvent::End(None));

    assert_eq!(state, DragState::Idle);
    let titles: Vec<&str> = board.columns[&col]
        .card_ids
        .iter()
        .map(|id| board.cards[id].title.as_str())
        .collect();
    assert_eq!(titles, ["second", "third", "fourth", "first"]);
    assert!(board.is_consistent());
}

#[test]
fn sorted_display_leaves_manual_sequence_intact() {
    let board = Board::new();
    let board = add_column(&board, "Sorted");
    let col_id = board.column_order[0].clone();
    let mut board = board;
    for (title, priority) in [("a", Priority::Low), ("b", Priority::High), ("c", Priority::Medium)] {
        board = reduce(
            &board,
            BoardAction::AddCard {
                column_id: col_id.clone(),
                draft: CardDraft { title: title.into(), priority, ..CardDraft::default() },
            },
        );
    }
    let manual = board.columns[&col_id].card_ids.clone();

    let board = reduce(
        &board,
        BoardAction::SetColumnSortOrder { column_id: col_id.clone(), order: SortOrder::PriorityDesc },
    );

    let col = &board.columns[&col_id];
    let shown = col.display_card_ids(&board.cards);
    let priorities: Vec<Priority> = shown.iter().map(|id| board.cards[id].priority).collect();
    assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
    assert_eq!(col.card_ids, manual, "stored manual order untouched");

    // Turning the sort off restores the manual arrangement.
    let board = reduce(
        &board,
        BoardAction::SetColumnSortOrder { column_id: col_id.clone(), order: SortOrder::Manual },
    );
    assert_eq!(board.columns[&col_id].display_card_ids(&board.cards), manual);
}
