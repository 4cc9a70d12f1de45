use super::progression::{self, LevelUpSummary};
use super::types::{Character, PlayerProfile};
use super::validation::PlayerValidator;
use crate::catalog::CatalogManager;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Player store state for save/load.
///
/// `current_player_id` is the single source of truth for "who is logged
/// in"; no other field duplicates it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayerStoreState {
    pub players: Vec<PlayerProfile>,
    pub current_player_id: Option<String>,
}

/// Player roster and character lifecycle.
#[derive(Debug, Clone, Default)]
pub struct PlayerManager {
    state: PlayerStoreState,
}

impl PlayerManager {
    pub fn new() -> Self {
        Self { state: PlayerStoreState::default() }
    }

    pub fn from_state(state: PlayerStoreState) -> Self {
        Self { state }
    }

    pub fn get_state(&self) -> &PlayerStoreState {
        &self.state
    }

    /// Create a player with a validated, unique username. Returns the id.
    pub fn create_player(&mut self, username: &str) -> Result<String> {
        PlayerValidator::validate_username(username)
            .map_err(|e| CoreError::InvalidParameter(e.to_string()))?;

        if self.state.players.iter().any(|p| p.username == username) {
            return Err(CoreError::DuplicateId(username.to_string()));
        }

        let id = Uuid::new_v4().to_string();
        self.state.players.push(PlayerProfile::new(id.clone(), username.to_string()));
        Ok(id)
    }

    pub fn get_player(&self, player_id: &str) -> Option<&PlayerProfile> {
        self.state.players.iter().find(|p| p.id == player_id)
    }

    pub fn get_player_mut(&mut self, player_id: &str) -> Option<&mut PlayerProfile> {
        self.state.players.iter_mut().find(|p| p.id == player_id)
    }

    fn require_player_mut(&mut self, player_id: &str) -> Result<&mut PlayerProfile> {
        self.state
            .players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or_else(|| CoreError::NotFound(format!("Player not found: {}", player_id)))
    }

    pub fn player_count(&self) -> usize {
        self.state.players.len()
    }

    pub fn remove_player(&mut self, player_id: &str) -> Option<PlayerProfile> {
        let idx = self.state.players.iter().position(|p| p.id == player_id)?;
        if self.state.current_player_id.as_deref() == Some(player_id) {
            self.state.current_player_id = None;
        }
        Some(self.state.players.remove(idx))
    }

    /// Select the active player.
    pub fn set_current_player(&mut self, player_id: &str) -> Result<()> {
        if self.get_player(player_id).is_none() {
            return Err(CoreError::NotFound(format!("Player not found: {}", player_id)));
        }
        self.state.current_player_id = Some(player_id.to_string());
        Ok(())
    }

    pub fn current_player(&self) -> Option<&PlayerProfile> {
        self.state.current_player_id.as_deref().and_then(|id| self.get_player(id))
    }

    /// Create the player's character from a catalog card.
    ///
    /// The card must resolve; a dangling id is an error, never a silent
    /// no-op. Stats, class and star level are copied from the card.
    pub fn create_character(
        &mut self,
        player_id: &str,
        name: &str,
        card_id: &str,
        image_url: &str,
        catalog: &CatalogManager,
    ) -> Result<()> {
        PlayerValidator::validate_character_name(name)
            .map_err(|e| CoreError::InvalidParameter(e.to_string()))?;

        let card = catalog
            .get_card(card_id)
            .ok_or_else(|| CoreError::NotFound(format!("Card not found: {}", card_id)))?;

        let character = Character {
            name: name.to_string(),
            card_id: card.id.clone(),
            class: card.class.clone(),
            image_url: if image_url.is_empty() {
                card.image_url.clone()
            } else {
                image_url.to_string()
            },
            star_level: card.star_level,
            stats: card.stats,
        };

        let player = self.require_player_mut(player_id)?;
        player.character = Some(character);
        Ok(())
    }

    /// Add a copy of a catalog card to the player's inventory.
    pub fn add_to_inventory(
        &mut self,
        player_id: &str,
        card_id: &str,
        catalog: &CatalogManager,
    ) -> Result<()> {
        if catalog.get_card(card_id).is_none() {
            return Err(CoreError::NotFound(format!("Card not found: {}", card_id)));
        }

        let player = self.require_player_mut(player_id)?;
        player.inventory.push(card_id.to_string());
        Ok(())
    }

    /// Remove one copy of a card from the player's inventory.
    pub fn remove_from_inventory(&mut self, player_id: &str, card_id: &str) -> Result<()> {
        let player = self.require_player_mut(player_id)?;

        let idx = player
            .inventory
            .iter()
            .position(|id| id == card_id)
            .ok_or_else(|| CoreError::NotFound(format!("Card not in inventory: {}", card_id)))?;

        player.inventory.remove(idx);
        Ok(())
    }

    pub fn credit_coins(&mut self, player_id: &str, amount: i64) -> Result<i64> {
        if amount < 0 {
            return Err(CoreError::InvalidParameter(format!(
                "Credit amount cannot be negative: {}",
                amount
            )));
        }
        let player = self.require_player_mut(player_id)?;
        player.progress.coins += amount;
        Ok(player.progress.coins)
    }

    pub fn debit_coins(&mut self, player_id: &str, amount: i64) -> Result<i64> {
        if amount < 0 {
            return Err(CoreError::InvalidParameter(format!(
                "Debit amount cannot be negative: {}",
                amount
            )));
        }
        let player = self.require_player_mut(player_id)?;
        if player.progress.coins < amount {
            return Err(CoreError::InsufficientCoins {
                required: amount,
                available: player.progress.coins,
            });
        }
        player.progress.coins -= amount;
        Ok(player.progress.coins)
    }

    pub fn gain_experience(&mut self, player_id: &str, amount: u32) -> Result<LevelUpSummary> {
        let player = self.require_player_mut(player_id)?;
        Ok(progression::gain_experience(player, amount))
    }

    /// Record a finished match for both participants.
    pub fn record_result(&mut self, winner_id: &str, loser_id: &str) -> Result<()> {
        // Verify both before mutating either
        if self.get_player(winner_id).is_none() {
            return Err(CoreError::NotFound(format!("Player not found: {}", winner_id)));
        }
        if self.get_player(loser_id).is_none() {
            return Err(CoreError::NotFound(format!("Player not found: {}", loser_id)));
        }

        let winner = self.require_player_mut(winner_id)?;
        winner.progress.wins += 1;
        winner.progress.games_played += 1;

        let loser = self.require_player_mut(loser_id)?;
        loser.progress.games_played += 1;
        Ok(())
    }

    /// Drop inventory and character references to cards absent from the
    /// catalog. Returns the number of references removed.
    pub fn prune_dangling_cards(&mut self, catalog: &CatalogManager) -> usize {
        let mut removed = 0;
        for player in &mut self.state.players {
            let before = player.inventory.len();
            player.inventory.retain(|id| catalog.get_card(id).is_some());
            removed += before - player.inventory.len();
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Card, CardCategory, StatBlock};

    fn catalog_with_card(id: &str) -> CatalogManager {
        let mut catalog = CatalogManager::new();
        let mut card = Card::new(
            id.to_string(),
            "Squire".to_string(),
            CardCategory::Starter,
            "warrior".to_string(),
            2,
        );
        card.stats = StatBlock { attack: 15, defense: 12, health: 100, energy: 100 };
        catalog.add_card(card).unwrap();
        catalog
    }

    #[test]
    fn test_create_player_and_select() {
        let mut players = PlayerManager::new();
        let id = players.create_player("alice").unwrap();

        assert!(players.current_player().is_none());
        players.set_current_player(&id).unwrap();
        assert_eq!(players.current_player().unwrap().username, "alice");
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut players = PlayerManager::new();
        players.create_player("alice").unwrap();
        assert!(matches!(players.create_player("alice"), Err(CoreError::DuplicateId(_))));
    }

    #[test]
    fn test_create_character_copies_card_stats() {
        let catalog = catalog_with_card("c1");
        let mut players = PlayerManager::new();
        let pid = players.create_player("alice").unwrap();

        players.create_character(&pid, "Roland", "c1", "", &catalog).unwrap();

        let character = players.get_player(&pid).unwrap().character.as_ref().unwrap();
        assert_eq!(character.card_id, "c1");
        assert_eq!(character.class, "warrior");
        assert_eq!(character.star_level, 2);
        assert_eq!(character.stats.attack, 15);
    }

    #[test]
    fn test_create_character_dangling_card_errors() {
        let catalog = CatalogManager::new();
        let mut players = PlayerManager::new();
        let pid = players.create_player("alice").unwrap();

        let err = players.create_character(&pid, "Roland", "ghost", "", &catalog).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert!(players.get_player(&pid).unwrap().character.is_none());
    }

    #[test]
    fn test_inventory_lifecycle() {
        let catalog = catalog_with_card("c1");
        let mut players = PlayerManager::new();
        let pid = players.create_player("alice").unwrap();

        players.add_to_inventory(&pid, "c1", &catalog).unwrap();
        players.add_to_inventory(&pid, "c1", &catalog).unwrap();
        assert_eq!(players.get_player(&pid).unwrap().card_copies("c1"), 2);

        players.remove_from_inventory(&pid, "c1").unwrap();
        assert_eq!(players.get_player(&pid).unwrap().card_copies("c1"), 1);

        assert!(players.add_to_inventory(&pid, "ghost", &catalog).is_err());
    }

    #[test]
    fn test_coin_operations() {
        let mut players = PlayerManager::new();
        let pid = players.create_player("alice").unwrap();

        assert_eq!(players.credit_coins(&pid, 100).unwrap(), 100);
        assert_eq!(players.debit_coins(&pid, 40).unwrap(), 60);

        let err = players.debit_coins(&pid, 100).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientCoins { required: 100, available: 60 }));
        assert!(players.credit_coins(&pid, -5).is_err());
    }

    #[test]
    fn test_record_result() {
        let mut players = PlayerManager::new();
        let a = players.create_player("alice").unwrap();
        let b = players.create_player("bob").unwrap();

        players.record_result(&a, &b).unwrap();

        assert_eq!(players.get_player(&a).unwrap().progress.wins, 1);
        assert_eq!(players.get_player(&a).unwrap().progress.games_played, 1);
        assert_eq!(players.get_player(&b).unwrap().progress.wins, 0);
        assert_eq!(players.get_player(&b).unwrap().progress.games_played, 1);

        assert!(players.record_result(&a, "ghost").is_err());
    }

    #[test]
    fn test_prune_dangling_cards() {
        let catalog = catalog_with_card("c1");
        let mut players = PlayerManager::new();
        let pid = players.create_player("alice").unwrap();

        players.add_to_inventory(&pid, "c1", &catalog).unwrap();
        players.get_player_mut(&pid).unwrap().inventory.push("deleted".to_string());

        let removed = players.prune_dangling_cards(&catalog);
        assert_eq!(removed, 1);
        assert_eq!(players.get_player(&pid).unwrap().inventory, vec!["c1".to_string()]);
    }

    #[test]
    fn test_remove_player_clears_selection() {
        let mut players = PlayerManager::new();
        let pid = players.create_player("alice").unwrap();
        players.set_current_player(&pid).unwrap();

        players.remove_player(&pid).unwrap();
        assert!(players.current_player().is_none());
    }
}
