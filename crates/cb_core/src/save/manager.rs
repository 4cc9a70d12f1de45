use super::error::SaveError;
use super::format::{
    decode_payload, decode_snapshot, encode_snapshot, validate_game_store, validate_player_store,
    StoreKey,
};
use super::migration::migrate_store;
use crate::state::GameState;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{create_dir_all, remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Reads and writes the per-store snapshot files.
pub struct SaveManager;

impl SaveManager {
    pub fn store_path(dir: &Path, key: StoreKey) -> PathBuf {
        dir.join(key.file_name())
    }

    pub fn store_exists(dir: &Path, key: StoreKey) -> bool {
        Self::store_path(dir, key).exists()
    }

    /// Write one store snapshot. Atomic: temp file, then rename.
    pub fn save_store<T: Serialize>(dir: &Path, key: StoreKey, value: &T) -> Result<(), SaveError> {
        create_dir_all(dir)?;

        let text = encode_snapshot(key, value)?;
        let path = Self::store_path(dir, key);
        let temp_path = path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)?;
            file.write_all(text.as_bytes())?;
            file.flush()?;

            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }

        rename(&temp_path, &path)?;

        log::debug!("Saved {} bytes to {:?}", text.len(), path);
        Ok(())
    }

    /// Load one store snapshot, verifying the checksum and applying any
    /// pending migration before typed decoding.
    pub fn load_store<T: DeserializeOwned>(dir: &Path, key: StoreKey) -> Result<T, SaveError> {
        let path = Self::store_path(dir, key);
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let mut text = String::new();
        File::open(&path)?.read_to_string(&mut text)?;

        let snapshot = decode_snapshot(key, &text)?;
        let payload = migrate_store(key, snapshot.payload, snapshot.version)?;

        log::debug!("Loaded {} bytes from {:?}", text.len(), path);
        decode_payload(payload)
    }

    fn load_store_or_default<T: DeserializeOwned + Default>(
        dir: &Path,
        key: StoreKey,
    ) -> Result<T, SaveError> {
        match Self::load_store(dir, key) {
            Err(SaveError::FileNotFound { .. }) => {
                log::info!("No {} snapshot, starting empty", key.as_str());
                Ok(T::default())
            }
            other => other,
        }
    }

    pub fn delete_store(dir: &Path, key: StoreKey) -> Result<(), SaveError> {
        let path = Self::store_path(dir, key);
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted {} snapshot", key.as_str());
        }
        Ok(())
    }

    /// Persist every store slot.
    pub fn save_all(dir: &Path, state: &GameState) -> Result<(), SaveError> {
        let player_store = state.to_player_store();
        validate_player_store(&player_store)?;

        let game_store = state.to_game_store();
        validate_game_store(&game_store)?;

        Self::save_store(dir, StoreKey::Player, &player_store)?;
        Self::save_store(dir, StoreKey::Game, &game_store)?;
        Self::save_store(dir, StoreKey::Battle, &state.to_battle_store())?;
        Self::save_store(dir, StoreKey::DailyTask, &state.to_task_store())?;

        log::info!("Game saved to {:?}", dir);
        Ok(())
    }

    /// Load every store slot; missing files start empty so a fresh
    /// profile can boot. Cross-store references are repaired afterwards.
    pub fn load_all(dir: &Path) -> Result<GameState, SaveError> {
        let player = Self::load_store_or_default(dir, StoreKey::Player)?;
        let game = Self::load_store_or_default(dir, StoreKey::Game)?;
        let battle = Self::load_store_or_default(dir, StoreKey::Battle)?;
        let tasks = Self::load_store_or_default(dir, StoreKey::DailyTask)?;

        let mut state = GameState::from_stores(player, game, battle, tasks);
        let pruned = state.repair_references();
        if pruned > 0 {
            log::warn!("Pruned {} dangling references on load", pruned);
        }

        log::info!("Game loaded from {:?}", dir);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::format::{payload_checksum, Snapshot};
    use crate::save::STORE_VERSION;
    use crate::state::GameState;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_roundtrip_all_stores() {
        let temp_dir = TempDir::new().unwrap();

        let mut state = GameState::with_defaults();
        let pid = state.players.create_player("alice").unwrap();
        state.players.set_current_player(&pid).unwrap();

        SaveManager::save_all(temp_dir.path(), &state).unwrap();
        for key in StoreKey::ALL {
            assert!(SaveManager::store_exists(temp_dir.path(), key));
        }

        let loaded = SaveManager::load_all(temp_dir.path()).unwrap();
        assert_eq!(loaded.players.player_count(), 1);
        assert_eq!(loaded.players.current_player().unwrap().username, "alice");
        assert_eq!(loaded.catalog.card_count(), state.catalog.card_count());
        assert_eq!(loaded.tasks.task_count(), state.tasks.task_count());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let state = GameState::new();

        SaveManager::save_all(temp_dir.path(), &state).unwrap();

        let path = SaveManager::store_path(temp_dir.path(), StoreKey::Player);
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_dir_loads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let state = SaveManager::load_all(temp_dir.path()).unwrap();
        assert_eq!(state.players.player_count(), 0);
        assert_eq!(state.catalog.card_count(), 0);
    }

    #[test]
    fn test_load_missing_store_is_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result: Result<crate::player::PlayerStoreState, _> =
            SaveManager::load_store(temp_dir.path(), StoreKey::Player);
        assert!(matches!(result, Err(SaveError::FileNotFound { .. })));
    }

    #[test]
    fn test_corrupted_snapshot_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let state = GameState::new();
        SaveManager::save_all(temp_dir.path(), &state).unwrap();

        let path = SaveManager::store_path(temp_dir.path(), StoreKey::Player);
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, text.replace("\"players\": []", "\"players\": [9]")).unwrap();

        let result: Result<crate::player::PlayerStoreState, _> =
            SaveManager::load_store(temp_dir.path(), StoreKey::Player);
        assert!(matches!(result, Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_v0_snapshot_loads_through_migration() {
        let temp_dir = TempDir::new().unwrap();

        let payload = json!({
            "players": [{
                "id": "p1",
                "username": "alice",
                "character": null,
                "inventory": [],
                "progress": { "level": 1, "experience": 0, "money": 75, "wins": 0, "games_played": 0 }
            }],
            "current_player_id": null
        });

        let snapshot = Snapshot {
            key: StoreKey::Player.as_str().to_string(),
            version: 0,
            timestamp: 0,
            checksum: payload_checksum(&payload),
            payload,
        };

        std::fs::create_dir_all(temp_dir.path()).unwrap();
        std::fs::write(
            SaveManager::store_path(temp_dir.path(), StoreKey::Player),
            serde_json::to_string_pretty(&snapshot).unwrap(),
        )
        .unwrap();

        let store: crate::player::PlayerStoreState =
            SaveManager::load_store(temp_dir.path(), StoreKey::Player).unwrap();
        assert_eq!(store.players[0].progress.coins, 75);
    }

    #[test]
    fn test_delete_store() {
        let temp_dir = TempDir::new().unwrap();
        let state = GameState::new();
        SaveManager::save_all(temp_dir.path(), &state).unwrap();

        SaveManager::delete_store(temp_dir.path(), StoreKey::Battle).unwrap();
        assert!(!SaveManager::store_exists(temp_dir.path(), StoreKey::Battle));
        // Deleting again is a no-op
        SaveManager::delete_store(temp_dir.path(), StoreKey::Battle).unwrap();
    }

    #[test]
    fn test_current_version_snapshots_written() {
        let temp_dir = TempDir::new().unwrap();
        let state = GameState::new();
        SaveManager::save_all(temp_dir.path(), &state).unwrap();

        let text = std::fs::read_to_string(SaveManager::store_path(
            temp_dir.path(),
            StoreKey::Game,
        ))
        .unwrap();
        let snapshot: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(snapshot.version, STORE_VERSION);
        assert_eq!(snapshot.key, "game-storage");
    }
}
