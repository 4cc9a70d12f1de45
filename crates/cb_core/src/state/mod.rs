//! Global Game State Manager
//!
//! Thread-safe global holder for the runtime game state. `GameState`
//! aggregates every store and converts to/from the persisted snapshot
//! slots.

use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

use crate::battle::{BattleLogState, MatchRecord};
use crate::catalog::{CatalogManager, CatalogState, MoveLibrary, MoveLibraryState};
use crate::data;
use crate::error::Result;
use crate::player::{PlayerManager, PlayerStoreState};
use crate::save::{GameSettings, GameStore};
use crate::task::{TaskBoardState, TaskManager};
use crate::trade::TradeManager;

/// Global game state singleton
pub static GAME_STATE: Lazy<Arc<RwLock<GameState>>> =
    Lazy::new(|| Arc::new(RwLock::new(GameState::default())));

/// Runtime game state.
///
/// Holds all active store data; the save layer maps it to the four
/// persisted snapshot slots.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub players: PlayerManager,
    pub catalog: CatalogManager,
    pub moves: MoveLibrary,
    pub tasks: TaskManager,
    pub trades: TradeManager,
    pub battle_log: BattleLogState,
    pub settings: GameSettings,
}

impl GameState {
    /// Empty state, no catalog entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with the built-in catalog, move library and task
    /// board.
    pub fn with_defaults() -> Self {
        let mut state = Self::new();

        state.moves = MoveLibrary::from_state(MoveLibraryState {
            moves: data::default_moves().into_iter().map(|m| (m.id.clone(), m)).collect(),
        });
        state.catalog = CatalogManager::from_state(CatalogState {
            cards: data::default_cards().into_iter().map(|c| (c.id.clone(), c)).collect(),
        });
        state.tasks = TaskManager::from_state(TaskBoardState {
            tasks: data::default_tasks().into_iter().map(|t| (t.id.clone(), t)).collect(),
            ..Default::default()
        });

        state
    }

    // ========================
    // Snapshot conversion
    // ========================

    pub fn to_player_store(&self) -> PlayerStoreState {
        self.players.get_state().clone()
    }

    pub fn to_game_store(&self) -> GameStore {
        GameStore {
            catalog: self.catalog.get_state().clone(),
            moves: self.moves.get_state().clone(),
            trades: self.trades.get_state().clone(),
            settings: self.settings.clone(),
        }
    }

    pub fn to_battle_store(&self) -> BattleLogState {
        self.battle_log.clone()
    }

    pub fn to_task_store(&self) -> TaskBoardState {
        self.tasks.get_state().clone()
    }

    /// Rebuild runtime state from loaded snapshot slots.
    pub fn from_stores(
        player: PlayerStoreState,
        game: GameStore,
        battle: BattleLogState,
        tasks: TaskBoardState,
    ) -> Self {
        Self {
            players: PlayerManager::from_state(player),
            catalog: CatalogManager::from_state(game.catalog),
            moves: MoveLibrary::from_state(game.moves),
            tasks: TaskManager::from_state(tasks),
            trades: TradeManager::from_state(game.trades),
            battle_log: battle,
            settings: game.settings,
        }
    }

    // ========================
    // Cross-store operations
    // ========================

    /// Append a finished match and update both participants' counters.
    pub fn record_match(&mut self, record: MatchRecord) -> Result<()> {
        let loser_id = if record.winner_id == record.player_a {
            record.player_b.clone()
        } else {
            record.player_a.clone()
        };

        self.players.record_result(&record.winner_id, &loser_id)?;
        self.battle_log.record(record);
        Ok(())
    }

    /// Drop references that no longer resolve across stores and
    /// reconcile derived counters. Returns the number of pruned
    /// references.
    pub fn repair_references(&mut self) -> usize {
        let mut pruned = self.players.prune_dangling_cards(&self.catalog);
        pruned += self.catalog.prune_dangling_skills(&self.moves);

        // Win counters are derived from the battle log when one exists;
        // an absent log leaves the stored counters untouched.
        if !self.battle_log.match_history.is_empty() {
            let ids: Vec<String> =
                self.players.get_state().players.iter().map(|p| p.id.clone()).collect();
            for id in ids {
                let wins = self.battle_log.wins_for(&id) as u32;
                let games = self.battle_log.matches_for(&id).len() as u32;
                if let Some(player) = self.players.get_player_mut(&id) {
                    player.progress.wins = wins;
                    player.progress.games_played = games;
                }
            }
        }

        pruned
    }
}

// ========================
// Global State Access Functions
// ========================

/// Get a read lock on the global game state
pub fn get_state() -> std::sync::RwLockReadGuard<'static, GameState> {
    GAME_STATE.read().expect("GAME_STATE lock poisoned")
}

/// Get a write lock on the global game state
pub fn get_state_mut() -> std::sync::RwLockWriteGuard<'static, GameState> {
    GAME_STATE.write().expect("GAME_STATE lock poisoned")
}

/// Reset the global state to default
pub fn reset_state() {
    *GAME_STATE.write().expect("GAME_STATE lock poisoned") = GameState::new();
}

/// Replace the entire global state
pub fn set_state(new_state: GameState) {
    *GAME_STATE.write().expect("GAME_STATE lock poisoned") = new_state;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::MatchType;

    #[test]
    fn test_store_roundtrip() {
        let mut state = GameState::with_defaults();
        let pid = state.players.create_player("alice").unwrap();
        state.players.set_current_player(&pid).unwrap();
        state.settings.auto_save = false;

        let restored = GameState::from_stores(
            state.to_player_store(),
            state.to_game_store(),
            state.to_battle_store(),
            state.to_task_store(),
        );

        assert_eq!(restored.players.player_count(), 1);
        assert_eq!(restored.players.current_player().unwrap().username, "alice");
        assert_eq!(restored.catalog.card_count(), state.catalog.card_count());
        assert!(!restored.settings.auto_save);
    }

    #[test]
    fn test_record_match_updates_counters() {
        let mut state = GameState::new();
        let a = state.players.create_player("alice").unwrap();
        let b = state.players.create_player("bob").unwrap();

        state
            .record_match(MatchRecord {
                id: "m1".to_string(),
                match_type: MatchType::Quick,
                player_a: a.clone(),
                player_b: b.clone(),
                winner_id: b.clone(),
                timestamp: 1000,
            })
            .unwrap();

        assert_eq!(state.battle_log.match_history.len(), 1);
        assert_eq!(state.players.get_player(&a).unwrap().progress.games_played, 1);
        assert_eq!(state.players.get_player(&b).unwrap().progress.wins, 1);
    }

    #[test]
    fn test_repair_references_prunes_and_reconciles() {
        let mut state = GameState::with_defaults();
        let a = state.players.create_player("alice").unwrap();
        let b = state.players.create_player("bob").unwrap();

        // Dangling inventory entry
        state.players.get_player_mut(&a).unwrap().inventory.push("no-such-card".to_string());

        // Counters drifted from the log
        state.battle_log.record(MatchRecord {
            id: "m1".to_string(),
            match_type: MatchType::Ranked,
            player_a: a.clone(),
            player_b: b.clone(),
            winner_id: a.clone(),
            timestamp: 1000,
        });
        state.players.get_player_mut(&a).unwrap().progress.wins = 9;

        let pruned = state.repair_references();
        assert_eq!(pruned, 1);

        let alice = state.players.get_player(&a).unwrap();
        assert!(alice.inventory.is_empty());
        assert_eq!(alice.progress.wins, 1);
        assert_eq!(alice.progress.games_played, 1);
    }

    #[test]
    fn test_with_defaults_is_consistent() {
        let mut state = GameState::with_defaults();
        assert!(state.catalog.card_count() > 0);
        assert!(state.moves.move_count() > 0);
        assert!(state.tasks.task_count() > 0);

        // Built-in data carries no dangling references
        assert_eq!(state.repair_references(), 0);
    }
}
