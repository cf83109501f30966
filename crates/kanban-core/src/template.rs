//! Card Templates
//!
//! Named, categorized card blueprints kept in a flat list, independent of
//! the live board. Instantiation is a pure data copy: the template keeps no
//! back-reference to the cards stamped from it.

use serde::{Deserialize, Serialize};

use crate::model::{fresh_id, CardDraft, ColumnId};
use crate::reducer::BoardAction;

/// A reusable card blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub card: CardDraft,
}

impl Template {
    pub fn new(name: impl Into<String>, category: impl Into<String>, card: CardDraft) -> Self {
        Self {
            id: fresh_id(),
            name: name.into(),
            category: category.into(),
            card,
        }
    }

    /// The add-card intent for this blueprint; the reducer stamps the fresh
    /// identifier and timestamp.
    pub fn instantiate(&self, column_id: ColumnId) -> BoardAction {
        BoardAction::AddCard {
            column_id,
            draft: self.card.clone(),
        }
    }
}

/// Flat template list, persisted as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateStore {
    pub templates: Vec<Template>,
}

impl TemplateStore {
    /// Upsert by identifier: replaces an existing template, appends a new one.
    pub fn save(&mut self, template: Template) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(slot) => *slot = template,
            None => self.templates.push(template),
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.templates.retain(|t| t.id != id);
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Distinct categories in insertion order, for grouping in the panel.
    pub fn categories(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for t in &self.templates {
            if !out.contains(&t.category) {
                out.push(t.category.clone());
            }
        }
        out
    }
}
