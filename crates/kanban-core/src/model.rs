//! Board Data Model
//!
//! Cards, columns and the board aggregate. Serialized shapes double as the
//! persistence format, so field names are stable (camelCase on the wire).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Opaque card identifier (UUID v4 string).
pub type CardId = String;
/// Opaque column identifier (UUID v4 string). Disjoint namespace from cards.
pub type ColumnId = String;

pub(crate) fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Card priority. Ordering is Low < Medium < High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// One checklist entry on a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            text: text.into(),
            done: false,
        }
    }
}

/// A task card. Created only through the reducer; `id` and `created_at`
/// never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub story_points: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Stamp a draft with a fresh identifier and creation timestamp.
    pub fn from_draft(draft: CardDraft) -> Self {
        Self {
            id: fresh_id(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            tags: draft.tags,
            assignee: draft.assignee,
            due_date: draft.due_date,
            checklist: draft.checklist,
            story_points: draft.story_points,
            color: draft.color,
            created_at: Utc::now(),
        }
    }

    /// Everything except identity, e.g. for duplication or templates.
    pub fn to_draft(&self) -> CardDraft {
        CardDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            tags: self.tags.clone(),
            assignee: self.assignee.clone(),
            due_date: self.due_date,
            checklist: self.checklist.clone(),
            story_points: self.story_points,
            color: self.color.clone(),
        }
    }
}

/// All card fields except `id`/`created_at`: the payload of add-card,
/// duplicate-card and templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub story_points: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CardDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Display-time sort directive for a column.
///
/// The stored `card_ids` sequence always stays in manual (drag) order; a
/// sort directive only changes the derived display order, so switching back
/// to `Manual` restores the previous arrangement. Cards added while a sort
/// is active are appended to the stored sequence and shown wherever the
/// sort puts them. Sorts are stable: ties keep the manual order, and cards
/// without a due date sort after dated ones in both due-date directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "none")]
    Manual,
    #[serde(rename = "priority-desc")]
    PriorityDesc,
    #[serde(rename = "priority-asc")]
    PriorityAsc,
    #[serde(rename = "due-date-asc")]
    DueDateAsc,
    #[serde(rename = "due-date-desc")]
    DueDateDesc,
    #[serde(rename = "created-asc")]
    CreatedAsc,
    #[serde(rename = "created-desc")]
    CreatedDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 7] = [
        SortOrder::Manual,
        SortOrder::PriorityDesc,
        SortOrder::PriorityAsc,
        SortOrder::DueDateAsc,
        SortOrder::DueDateDesc,
        SortOrder::CreatedAsc,
        SortOrder::CreatedDesc,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Manual => "Manual",
            SortOrder::PriorityDesc => "Priority ↓",
            SortOrder::PriorityAsc => "Priority ↑",
            SortOrder::DueDateAsc => "Due date ↑",
            SortOrder::DueDateDesc => "Due date ↓",
            SortOrder::CreatedAsc => "Oldest first",
            SortOrder::CreatedDesc => "Newest first",
        }
    }
}

/// An ordered bucket of card identifiers, optionally capped by a WIP limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Membership and manual display order in one sequence.
    #[serde(default)]
    pub card_ids: Vec<CardId>,
    #[serde(default)]
    pub wip_limit: Option<u32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            title: title.into(),
            card_ids: Vec::new(),
            wip_limit: None,
            color: None,
            collapsed: false,
            sort_order: SortOrder::Manual,
        }
    }

    pub fn is_at_limit(&self) -> bool {
        match self.wip_limit {
            Some(limit) => self.card_ids.len() >= limit as usize,
            None => false,
        }
    }

    /// Card identifiers in display order: the stored manual sequence with
    /// the column's sort directive applied on top (stable).
    pub fn display_card_ids(&self, cards: &HashMap<CardId, Card>) -> Vec<CardId> {
        if self.sort_order == SortOrder::Manual {
            return self.card_ids.clone();
        }
        let mut entries: Vec<&Card> = self
            .card_ids
            .iter()
            .filter_map(|id| cards.get(id))
            .collect();
        match self.sort_order {
            SortOrder::Manual => {}
            SortOrder::PriorityDesc => {
                entries.sort_by(|a, b| b.priority.cmp(&a.priority));
            }
            SortOrder::PriorityAsc => {
                entries.sort_by(|a, b| a.priority.cmp(&b.priority));
            }
            SortOrder::DueDateAsc => {
                entries.sort_by(|a, b| cmp_due(a.due_date, b.due_date));
            }
            SortOrder::DueDateDesc => {
                entries.sort_by(|a, b| cmp_due_rev(a.due_date, b.due_date));
            }
            SortOrder::CreatedAsc => {
                entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            }
            SortOrder::CreatedDesc => {
                entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
        }
        entries.into_iter().map(|c| c.id.clone()).collect()
    }
}

// Undated cards go last in both directions.
fn cmp_due(a: Option<NaiveDate>, b: Option<NaiveDate>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

fn cmp_due_rev(a: Option<NaiveDate>, b: Option<NaiveDate>) -> std::cmp::Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    }
}

/// The full board aggregate: display order of columns, the column list and
/// the flat card store. This is the unit that gets persisted and restored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(default)]
    pub column_order: Vec<ColumnId>,
    #[serde(default)]
    pub columns: HashMap<ColumnId, Column>,
    #[serde(default)]
    pub cards: HashMap<CardId, Card>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Which column a card currently sits in, if any.
    pub fn column_of(&self, card_id: &str) -> Option<&ColumnId> {
        self.column_order
            .iter()
            .find(|col_id| match self.columns.get(*col_id) {
                Some(col) => col.card_ids.iter().any(|c| c == card_id),
                None => false,
            })
    }

    /// Columns in display order.
    pub fn ordered_columns(&self) -> Vec<&Column> {
        self.column_order
            .iter()
            .filter_map(|id| self.columns.get(id))
            .collect()
    }

    /// Every distinct tag on the board, sorted. Drives the filter bar.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .cards
            .values()
            .flat_map(|c| c.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Every distinct assignee on the board, sorted.
    pub fn all_assignees(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .cards
            .values()
            .filter_map(|c| c.assignee.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Structural invariants: `column_order` is a permutation of the column
    /// keys, every referenced card exists, and every card is referenced by
    /// exactly one column.
    pub fn is_consistent(&self) -> bool {
        if self.column_order.len() != self.columns.len() {
            return false;
        }
        for id in &self.column_order {
            if !self.columns.contains_key(id) {
                return false;
            }
        }
        let mut seen: HashMap<&str, u32> = HashMap::new();
        for col in self.columns.values() {
            for card_id in &col.card_ids {
                if !self.cards.contains_key(card_id) {
                    return false;
                }
                *seen.entry(card_id.as_str()).or_insert(0) += 1;
            }
        }
        self.cards.len() == seen.len() && seen.values().all(|n| *n == 1)
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;

    fn card_with(priority: Priority, due: Option<&str>) -> Card {
        let mut card = Card::from_draft(CardDraft::titled("t"));
        card.priority = priority;
        card.due_date = due.map(|d| d.parse().unwrap());
        card
    }

    #[test]
    fn display_order_applies_priority_sort_without_touching_storage() {
        let low = card_with(Priority::Low, None);
        let high = card_with(Priority::High, None);
        let medium = card_with(Priority::Medium, None);
        let stored = vec![low.id.clone(), high.id.clone(), medium.id.clone()];

        let mut cards = HashMap::new();
        for c in [&low, &high, &medium] {
            cards.insert(c.id.clone(), c.clone());
        }
        let mut col = Column::new("c");
        col.card_ids = stored.clone();
        col.sort_order = SortOrder::PriorityDesc;

        let shown = col.display_card_ids(&cards);
        assert_eq!(shown, vec![high.id.clone(), medium.id.clone(), low.id]);
        assert_eq!(col.card_ids, stored);
    }

    #[test]
    fn due_date_sort_puts_undated_last_both_ways() {
        let a = card_with(Priority::Low, Some("2026-01-05"));
        let b = card_with(Priority::Low, None);
        let c = card_with(Priority::Low, Some("2026-03-01"));

        let mut cards = HashMap::new();
        for card in [&a, &b, &c] {
            cards.insert(card.id.clone(), card.clone());
        }
        let mut col = Column::new("c");
        col.card_ids = vec![a.id.clone(), b.id.clone(), c.id.clone()];

        col.sort_order = SortOrder::DueDateAsc;
        assert_eq!(
            col.display_card_ids(&cards),
            vec![a.id.clone(), c.id.clone(), b.id.clone()]
        );
        col.sort_order = SortOrder::DueDateDesc;
        assert_eq!(col.display_card_ids(&cards), vec![c.id, a.id, b.id]);
    }

    #[test]
    fn sort_order_serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SortOrder::PriorityDesc).unwrap(),
            "\"priority-desc\""
        );
        assert_eq!(serde_json::to_string(&SortOrder::Manual).unwrap(), "\"none\"");
        let parsed: SortOrder = serde_json::from_str("\"due-date-asc\"").unwrap();
        assert_eq!(parsed, SortOrder::DueDateAsc);
    }
}
