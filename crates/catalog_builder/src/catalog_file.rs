//! Catalog file format
//!
//! A self-describing JSON document holding cards, moves and tasks, meant
//! to be reviewed and hand-edited before being loaded into a game store.

use anyhow::{Context, Result};
use cb_core::catalog::{Card, Move};
use cb_core::data;
use cb_core::task::TaskDef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Creation time (RFC3339)
    pub generated_at: String,
    pub card_count: usize,
    pub move_count: usize,
    pub task_count: usize,
    pub cards: Vec<Card>,
    pub moves: Vec<Move>,
    pub tasks: Vec<TaskDef>,
}

impl CatalogFile {
    /// Snapshot of the engine's built-in data.
    pub fn from_defaults() -> Self {
        let cards = data::default_cards();
        let moves = data::default_moves();
        let tasks = data::default_tasks();

        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            card_count: cards.len(),
            move_count: moves.len(),
            task_count: tasks.len(),
            cards,
            moves,
            tasks,
        }
    }

    /// Cross-check the whole document. Collects every problem rather than
    /// stopping at the first.
    pub fn validate(&self) -> ValidationSummary {
        let mut errors = Vec::new();

        if self.card_count != self.cards.len() {
            errors.push(format!(
                "card_count says {} but {} cards present",
                self.card_count,
                self.cards.len()
            ));
        }
        if self.move_count != self.moves.len() {
            errors.push(format!(
                "move_count says {} but {} moves present",
                self.move_count,
                self.moves.len()
            ));
        }
        if self.task_count != self.tasks.len() {
            errors.push(format!(
                "task_count says {} but {} tasks present",
                self.task_count,
                self.tasks.len()
            ));
        }

        let mut card_ids = HashSet::new();
        for card in &self.cards {
            if !card_ids.insert(card.id.as_str()) {
                errors.push(format!("duplicate card id: {}", card.id));
            }
            let report = cb_core::catalog::CardValidator::validate(card);
            for error in report.errors {
                errors.push(format!("card {}: {}", card.id, error));
            }
        }

        let mut move_ids = HashMap::new();
        for mv in &self.moves {
            if move_ids.insert(mv.id.as_str(), mv).is_some() {
                errors.push(format!("duplicate move id: {}", mv.id));
            }
            let report = cb_core::catalog::MoveValidator::validate(mv);
            for error in report.errors {
                errors.push(format!("move {}: {}", mv.id, error));
            }
        }

        // Skill references must resolve and respect class gates
        for card in &self.cards {
            for skill in &card.skills {
                match move_ids.get(skill.as_str()) {
                    None => errors.push(format!("card {} references unknown move {}", card.id, skill)),
                    Some(mv) if !mv.applies_to_class(&card.class) => errors.push(format!(
                        "card {} attaches move {} that excludes class {}",
                        card.id, skill, card.class
                    )),
                    Some(_) => {}
                }
            }
        }

        let mut task_ids = HashSet::new();
        for task in &self.tasks {
            if !task_ids.insert(task.id.as_str()) {
                errors.push(format!("duplicate task id: {}", task.id));
            }
            if !(0.0..=1.0).contains(&task.risks.failure_chance) {
                errors.push(format!(
                    "task {} failure_chance {} outside [0, 1]",
                    task.id, task.risks.failure_chance
                ));
            }
            if task.rewards.base_payment < 0 {
                errors.push(format!("task {} has negative payment", task.id));
            }
        }

        ValidationSummary { errors }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationSummary {
    pub errors: Vec<String>,
}

impl ValidationSummary {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn write_catalog_file(path: &Path, file: &CatalogFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(file).context("Failed to serialize catalog")?;
    fs::write(path, json)?;
    Ok(())
}

pub fn read_catalog_file(path: &Path) -> Result<CatalogFile> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).context("Failed to parse catalog")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate_clean() {
        let file = CatalogFile::from_defaults();
        let summary = file.validate();
        assert!(summary.is_valid(), "{:?}", summary.errors);
    }

    #[test]
    fn test_dangling_skill_reported() {
        let mut file = CatalogFile::from_defaults();
        file.cards[0].skills.push("no-such-move".to_string());

        let summary = file.validate();
        assert!(!summary.is_valid());
        assert!(summary.errors.iter().any(|e| e.contains("unknown move")));
    }

    #[test]
    fn test_count_drift_reported() {
        let mut file = CatalogFile::from_defaults();
        file.card_count += 1;

        let summary = file.validate();
        assert!(summary.errors.iter().any(|e| e.contains("card_count")));
    }

    #[test]
    fn test_duplicate_ids_reported() {
        let mut file = CatalogFile::from_defaults();
        let dup = file.cards[0].clone();
        file.cards.push(dup);
        file.card_count = file.cards.len();

        let summary = file.validate();
        assert!(summary.errors.iter().any(|e| e.contains("duplicate card id")));
    }
}
