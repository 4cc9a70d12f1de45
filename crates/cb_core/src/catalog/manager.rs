use super::moves::MoveLibrary;
use super::types::{Card, CardCategory};
use super::validation::CardValidator;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Catalog state for save/load
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogState {
    pub cards: HashMap<String, Card>,
}

/// Card catalog: the single source of card definitions.
///
/// Inventories and characters reference cards by id; deleting a card does
/// not cascade (dangling ids are pruned on load, see save migration).
#[derive(Debug, Clone, Default)]
pub struct CatalogManager {
    state: CatalogState,
}

impl CatalogManager {
    pub fn new() -> Self {
        Self { state: CatalogState::default() }
    }

    /// Load from save data
    pub fn from_state(state: CatalogState) -> Self {
        Self { state }
    }

    /// Get current state for saving
    pub fn get_state(&self) -> &CatalogState {
        &self.state
    }

    /// Add a card; generates an id when absent and fills default stats.
    /// Returns the stored card's id.
    pub fn add_card(&mut self, mut card: Card) -> Result<String> {
        if card.id.trim().is_empty() {
            card.id = Uuid::new_v4().to_string();
        }
        if card.star_level == 0 {
            card.star_level = 1;
        }

        CardValidator::validate(&card).into_result()?;

        if self.state.cards.contains_key(&card.id) {
            return Err(CoreError::DuplicateId(card.id));
        }

        let id = card.id.clone();
        self.state.cards.insert(id.clone(), card);
        Ok(id)
    }

    /// Replace an existing card definition.
    pub fn update_card(&mut self, card: Card) -> Result<()> {
        if !self.state.cards.contains_key(&card.id) {
            return Err(CoreError::NotFound(format!("Card not found: {}", card.id)));
        }

        CardValidator::validate(&card).into_result()?;

        self.state.cards.insert(card.id.clone(), card);
        Ok(())
    }

    /// Remove a card by id, returning it.
    pub fn delete_card(&mut self, card_id: &str) -> Result<Card> {
        self.state
            .cards
            .remove(card_id)
            .ok_or_else(|| CoreError::NotFound(format!("Card not found: {}", card_id)))
    }

    pub fn get_card(&self, card_id: &str) -> Option<&Card> {
        self.state.cards.get(card_id)
    }

    pub fn card_count(&self) -> usize {
        self.state.cards.len()
    }

    pub fn all_cards(&self) -> Vec<&Card> {
        self.state.cards.values().collect()
    }

    pub fn cards_by_category(&self, category: CardCategory) -> Vec<&Card> {
        self.state.cards.values().filter(|c| c.category == category).collect()
    }

    pub fn cards_by_class(&self, class: &str) -> Vec<&Card> {
        self.state.cards.values().filter(|c| c.class == class).collect()
    }

    pub fn cards_by_star_level(&self, star_level: u8) -> Vec<&Card> {
        self.state.cards.values().filter(|c| c.star_level == star_level).collect()
    }

    pub fn starter_cards(&self) -> Vec<&Card> {
        self.state.cards.values().filter(|c| c.is_starter).collect()
    }

    /// Attach a library move to a card's skill list.
    ///
    /// The move must exist in the library and admit the card's class.
    pub fn attach_skill(
        &mut self,
        card_id: &str,
        move_id: &str,
        library: &MoveLibrary,
    ) -> Result<()> {
        let mv = library
            .get_move(move_id)
            .ok_or_else(|| CoreError::NotFound(format!("Move not found: {}", move_id)))?;

        let card = self
            .state
            .cards
            .get_mut(card_id)
            .ok_or_else(|| CoreError::NotFound(format!("Card not found: {}", card_id)))?;

        if !mv.applies_to_class(&card.class) {
            return Err(CoreError::InvalidParameter(format!(
                "Move {} does not apply to class {}",
                move_id, card.class
            )));
        }
        if card.has_skill(move_id) {
            return Err(CoreError::DuplicateId(move_id.to_string()));
        }

        card.skills.push(move_id.to_string());
        Ok(())
    }

    pub fn detach_skill(&mut self, card_id: &str, move_id: &str) -> Result<()> {
        let card = self
            .state
            .cards
            .get_mut(card_id)
            .ok_or_else(|| CoreError::NotFound(format!("Card not found: {}", card_id)))?;

        if !card.has_skill(move_id) {
            return Err(CoreError::NotFound(format!(
                "Move {} not attached to card {}",
                move_id, card_id
            )));
        }

        card.skills.retain(|id| id != move_id);
        Ok(())
    }

    /// Drop skill references to moves that no longer exist in the library.
    /// Returns the number of references removed.
    pub fn prune_dangling_skills(&mut self, library: &MoveLibrary) -> usize {
        let mut removed = 0;
        for card in self.state.cards.values_mut() {
            let before = card.skills.len();
            card.skills.retain(|id| library.get_move(id).is_some());
            removed += before - card.skills.len();
        }
        removed
    }
}
