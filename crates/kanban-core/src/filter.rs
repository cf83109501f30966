//! Filter View
//!
//! A derived, read-only projection of the card store. Filtering never
//! mutates the board; with no filter active the projection is the full
//! store, byte for byte.

use std::collections::{HashMap, HashSet};

use crate::model::{Card, CardId, Priority};

/// Active filter criteria. Search matches case-insensitively on title or
/// description; selected tags are OR-matched; empty tag/assignee sets mean
/// "no restriction".
#[derive(Debug, Clone, PartialEq)]
pub struct CardFilter {
    pub search: String,
    pub priorities: HashSet<Priority>,
    pub tags: HashSet<String>,
    pub assignees: HashSet<String>,
}

impl Default for CardFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            priorities: Priority::ALL.into_iter().collect(),
            tags: HashSet::new(),
            assignees: HashSet::new(),
        }
    }
}

impl CardFilter {
    /// True when any criterion restricts the view.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.priorities.len() != Priority::ALL.len()
            || !self.tags.is_empty()
            || !self.assignees.is_empty()
    }

    pub fn matches(&self, card: &Card) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty()
            && !card.title.to_lowercase().contains(&needle)
            && !card.description.to_lowercase().contains(&needle)
        {
            return false;
        }
        if !self.priorities.contains(&card.priority) {
            return false;
        }
        if !self.tags.is_empty() && !card.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }
        if !self.assignees.is_empty() {
            match &card.assignee {
                Some(name) if self.assignees.contains(name) => {}
                _ => return false,
            }
        }
        true
    }

    /// The projected card store. "No filters active" is indistinguishable
    /// from "everything passes".
    pub fn apply(&self, cards: &HashMap<CardId, Card>) -> HashMap<CardId, Card> {
        if !self.is_active() {
            return cards.clone();
        }
        cards
            .iter()
            .filter(|(_, card)| self.matches(card))
            .map(|(id, card)| (id.clone(), card.clone()))
            .collect()
    }

    pub fn toggle_priority(&mut self, priority: Priority) {
        if !self.priorities.remove(&priority) {
            self.priorities.insert(priority);
        }
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_string());
        }
    }

    pub fn toggle_assignee(&mut self, name: &str) {
        if !self.assignees.remove(name) {
            self.assignees.insert(name.to_string());
        }
    }
}

#[cfg(test)]
mod filter_tests {
    use super::*;
    use crate::model::CardDraft;

    fn store() -> HashMap<CardId, Card> {
        let mut cards = HashMap::new();
        let mut a = Card::from_draft(CardDraft::titled("Write release notes"));
        a.description = "for the Q3 launch".into();
        a.priority = Priority::High;
        a.tags = vec!["docs".into()];
        a.assignee = Some("ada".into());
        let mut b = Card::from_draft(CardDraft::titled("Fix login bug"));
        b.priority = Priority::Low;
        b.tags = vec!["bug".into(), "auth".into()];
        for card in [a, b] {
            cards.insert(card.id.clone(), card);
        }
        cards
    }

    #[test]
    fn inactive_filter_returns_full_store() {
        let cards = store();
        let filter = CardFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&cards), cards);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let cards = store();
        let filter = CardFilter {
            search: "LAUNCH".into(),
            ..CardFilter::default()
        };
        let out = filter.apply(&cards);
        assert_eq!(out.len(), 1);
        assert!(out.values().all(|c| c.title == "Write release notes"));
    }

    #[test]
    fn tags_are_or_matched() {
        let cards = store();
        let mut filter = CardFilter::default();
        filter.toggle_tag("docs");
        filter.toggle_tag("auth");
        assert_eq!(filter.apply(&cards).len(), 2);
    }

    #[test]
    fn priority_and_assignee_restrict() {
        let cards = store();
        let mut filter = CardFilter::default();
        filter.toggle_priority(Priority::Low);
        filter.toggle_priority(Priority::Medium);
        let out = filter.apply(&cards);
        assert!(out.values().all(|c| c.priority == Priority::High));

        let mut filter = CardFilter::default();
        filter.toggle_assignee("ada");
        let out = filter.apply(&cards);
        assert!(out.values().all(|c| c.assignee.as_deref() == Some("ada")));
    }
}
