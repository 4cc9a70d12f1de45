use super::types::Move;
use super::validation::MoveValidator;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Move library state for save/load
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MoveLibraryState {
    pub moves: HashMap<String, Move>,
}

/// Global move library. Cards reference moves by id via their skill list.
#[derive(Debug, Clone, Default)]
pub struct MoveLibrary {
    state: MoveLibraryState,
}

impl MoveLibrary {
    pub fn new() -> Self {
        Self { state: MoveLibraryState::default() }
    }

    pub fn from_state(state: MoveLibraryState) -> Self {
        Self { state }
    }

    pub fn get_state(&self) -> &MoveLibraryState {
        &self.state
    }

    /// Add a move; generates an id when absent. Returns the stored id.
    ///
    /// Ids are unique; duplicate names are allowed (same-named moves can
    /// exist across classes) but surfaced by `duplicate_names` for admin
    /// tooling.
    pub fn add_move(&mut self, mut mv: Move) -> Result<String> {
        if mv.id.trim().is_empty() {
            mv.id = Uuid::new_v4().to_string();
        }

        MoveValidator::validate(&mv).into_result()?;

        if self.state.moves.contains_key(&mv.id) {
            return Err(CoreError::DuplicateId(mv.id));
        }

        let id = mv.id.clone();
        self.state.moves.insert(id.clone(), mv);
        Ok(id)
    }

    pub fn update_move(&mut self, mv: Move) -> Result<()> {
        if !self.state.moves.contains_key(&mv.id) {
            return Err(CoreError::NotFound(format!("Move not found: {}", mv.id)));
        }

        MoveValidator::validate(&mv).into_result()?;

        self.state.moves.insert(mv.id.clone(), mv);
        Ok(())
    }

    pub fn delete_move(&mut self, move_id: &str) -> Result<Move> {
        self.state
            .moves
            .remove(move_id)
            .ok_or_else(|| CoreError::NotFound(format!("Move not found: {}", move_id)))
    }

    pub fn get_move(&self, move_id: &str) -> Option<&Move> {
        self.state.moves.get(move_id)
    }

    pub fn move_count(&self) -> usize {
        self.state.moves.len()
    }

    pub fn moves_for_class(&self, class: &str) -> Vec<&Move> {
        self.state.moves.values().filter(|m| m.applies_to_class(class)).collect()
    }

    /// Names shared by more than one move id.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for mv in self.state.moves.values() {
            *counts.entry(mv.name.as_str()).or_insert(0) += 1;
        }
        counts.into_iter().filter(|(_, n)| *n > 1).map(|(name, _)| name.to_string()).collect()
    }
}
