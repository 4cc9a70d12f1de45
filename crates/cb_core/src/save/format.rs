use super::error::SaveError;
use super::STORE_VERSION;
use crate::catalog::{CatalogState, MoveLibraryState};
use crate::player::PlayerStoreState;
use crate::trade::TradeState;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use time::OffsetDateTime;

/// The persisted store slots. Each serializes independently to
/// `<key>.json` in the save directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    Player,
    Game,
    Battle,
    DailyTask,
}

impl StoreKey {
    pub const ALL: [StoreKey; 4] =
        [StoreKey::Player, StoreKey::Game, StoreKey::Battle, StoreKey::DailyTask];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Player => "player-storage",
            StoreKey::Game => "game-storage",
            StoreKey::Battle => "battle-storage",
            StoreKey::DailyTask => "daily-task-storage",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    pub fn parse(key: &str) -> Result<StoreKey, SaveError> {
        match key {
            "player-storage" => Ok(StoreKey::Player),
            "game-storage" => Ok(StoreKey::Game),
            "battle-storage" => Ok(StoreKey::Battle),
            "daily-task-storage" => Ok(StoreKey::DailyTask),
            other => Err(SaveError::UnknownStoreKey(other.to_string())),
        }
    }
}

/// Versioned envelope around one store's JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub key: String,
    pub version: u32,
    /// Unix milliseconds at save time
    pub timestamp: u64,
    /// Hex sha256 of the serialized payload
    pub checksum: String,
    pub payload: serde_json::Value,
}

/// The `game-storage` slot: catalog, move library, trades and settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameStore {
    pub catalog: CatalogState,
    pub moves: MoveLibraryState,
    pub trades: TradeState,
    pub settings: GameSettings,
}

/// Player preferences persisted with the game store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSettings {
    pub auto_save: bool,
    /// Minutes between auto-saves
    pub auto_save_interval: u32,
    /// Ask before accepting a trade offer
    pub confirm_trades: bool,
    pub preferred_language: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            auto_save: true,
            auto_save_interval: 5,
            confirm_trades: true,
            preferred_language: "en".to_string(),
        }
    }
}

pub(crate) fn payload_checksum(payload: &serde_json::Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.to_string().as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// Wrap a store value in a checksummed, versioned envelope and serialize.
pub fn encode_snapshot<T: Serialize>(key: StoreKey, value: &T) -> Result<String, SaveError> {
    let payload = serde_json::to_value(value)?;
    let snapshot = Snapshot {
        key: key.as_str().to_string(),
        version: STORE_VERSION,
        timestamp: current_timestamp(),
        checksum: payload_checksum(&payload),
        payload,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Parse and verify an envelope. The payload is left as JSON for the
/// migration step; callers decode it with [`decode_payload`] afterwards.
pub fn decode_snapshot(key: StoreKey, text: &str) -> Result<Snapshot, SaveError> {
    let snapshot: Snapshot = serde_json::from_str(text).map_err(|_| SaveError::Corrupted)?;

    if snapshot.key != key.as_str() {
        return Err(SaveError::KeyMismatch {
            found: snapshot.key,
            expected: key.as_str().to_string(),
        });
    }

    if payload_checksum(&snapshot.payload) != snapshot.checksum {
        return Err(SaveError::ChecksumMismatch);
    }

    Ok(snapshot)
}

pub fn decode_payload<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, SaveError> {
    Ok(serde_json::from_value(payload)?)
}

/// Size and uniqueness bounds checked before writing.
pub fn validate_player_store(store: &PlayerStoreState) -> Result<(), SaveError> {
    if store.players.len() > 1000 {
        return Err(SaveError::DataTooLarge {
            store: StoreKey::Player.as_str().to_string(),
            count: store.players.len(),
        });
    }

    let mut ids = std::collections::HashSet::new();
    for player in &store.players {
        if !ids.insert(&player.id) {
            return Err(SaveError::Corrupted);
        }
    }

    Ok(())
}

pub fn validate_game_store(store: &GameStore) -> Result<(), SaveError> {
    if store.catalog.cards.len() > 5000 {
        return Err(SaveError::DataTooLarge {
            store: StoreKey::Game.as_str().to_string(),
            count: store.catalog.cards.len(),
        });
    }
    if store.moves.moves.len() > 5000 {
        return Err(SaveError::DataTooLarge {
            store: StoreKey::Game.as_str().to_string(),
            count: store.moves.moves.len(),
        });
    }
    Ok(())
}

pub fn current_timestamp() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerProfile;

    #[test]
    fn test_snapshot_roundtrip() {
        let mut store = PlayerStoreState::default();
        store.players.push(PlayerProfile::new("p1".to_string(), "alice".to_string()));
        store.current_player_id = Some("p1".to_string());

        let text = encode_snapshot(StoreKey::Player, &store).unwrap();
        let snapshot = decode_snapshot(StoreKey::Player, &text).unwrap();
        assert_eq!(snapshot.version, STORE_VERSION);
        assert_eq!(snapshot.key, "player-storage");

        let decoded: PlayerStoreState = decode_payload(snapshot.payload).unwrap();
        assert_eq!(decoded.players.len(), 1);
        assert_eq!(decoded.current_player_id, Some("p1".to_string()));
    }

    #[test]
    fn test_checksum_detects_tampering() {
        let store = PlayerStoreState::default();
        let text = encode_snapshot(StoreKey::Player, &store).unwrap();

        // Flip the stored player list to something else
        let tampered = text.replace("\"players\": []", "\"players\": [1]");
        assert_ne!(text, tampered);

        let result = decode_snapshot(StoreKey::Player, &tampered);
        assert!(matches!(result, Err(SaveError::ChecksumMismatch)));
    }

    #[test]
    fn test_key_mismatch_rejected() {
        let store = PlayerStoreState::default();
        let text = encode_snapshot(StoreKey::Player, &store).unwrap();

        let result = decode_snapshot(StoreKey::Game, &text);
        assert!(matches!(result, Err(SaveError::KeyMismatch { .. })));
    }

    #[test]
    fn test_garbage_is_corrupted() {
        assert!(matches!(
            decode_snapshot(StoreKey::Player, "not json at all"),
            Err(SaveError::Corrupted)
        ));
    }

    #[test]
    fn test_duplicate_player_ids_rejected() {
        let mut store = PlayerStoreState::default();
        store.players.push(PlayerProfile::new("p1".to_string(), "alice".to_string()));
        store.players.push(PlayerProfile::new("p1".to_string(), "bob".to_string()));

        assert!(matches!(validate_player_store(&store), Err(SaveError::Corrupted)));
    }

    #[test]
    fn test_store_key_parse() {
        assert_eq!(StoreKey::parse("player-storage").unwrap(), StoreKey::Player);
        assert_eq!(StoreKey::parse("daily-task-storage").unwrap(), StoreKey::DailyTask);
        assert!(matches!(
            StoreKey::parse("admin-storage"),
            Err(SaveError::UnknownStoreKey(_))
        ));
    }
}
