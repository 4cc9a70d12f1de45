//! Store snapshot migration
//!
//! Runs on the raw JSON payload between envelope verification and typed
//! decoding, so older field layouts never reach the deserializer.

use super::error::SaveError;
use super::format::StoreKey;
use super::STORE_VERSION;
use serde_json::Value;

/// Migrate one store payload from `from_version` to the current version.
pub fn migrate_store(
    key: StoreKey,
    mut payload: Value,
    from_version: u32,
) -> Result<Value, SaveError> {
    payload = match from_version {
        0 => migrate_v0_to_v1(key, payload)?,
        v if v == STORE_VERSION => payload,
        v if v > STORE_VERSION => {
            // Future version - might be compatible
            log::warn!(
                "Loading {} snapshot from future version {} (current: {})",
                key.as_str(),
                v,
                STORE_VERSION
            );
            payload
        }
        v => {
            return Err(SaveError::VersionMismatch { found: v, expected: STORE_VERSION });
        }
    };

    if from_version < STORE_VERSION {
        log::info!(
            "Migrated {} snapshot from version {} to {}",
            key.as_str(),
            from_version,
            STORE_VERSION
        );
    }

    Ok(payload)
}

/// v0 snapshots carry several divergent field names (`power`/`hp`/`mp`
/// for stats, `money` for coins, `starRank` for star levels) and allow
/// negative balances. v1 unifies all of them.
fn migrate_v0_to_v1(key: StoreKey, mut payload: Value) -> Result<Value, SaveError> {
    match key {
        StoreKey::Player => {
            if let Some(players) = payload.get_mut("players").and_then(Value::as_array_mut) {
                for player in players {
                    if let Some(progress) = player.get_mut("progress") {
                        rename_field(progress, "money", "coins");
                        clamp_negative(progress, "coins");
                    }
                    if let Some(character) = player.get_mut("character") {
                        rename_field(character, "starRank", "star_level");
                        if let Some(stats) = character.get_mut("stats") {
                            migrate_stat_names(stats);
                        }
                    }
                }
            }
        }
        StoreKey::Game => {
            if let Some(cards) = payload
                .get_mut("catalog")
                .and_then(|c| c.get_mut("cards"))
                .and_then(Value::as_object_mut)
            {
                for card in cards.values_mut() {
                    rename_field(card, "starRank", "star_level");
                    rename_field(card, "starLevel", "star_level");
                    if let Some(stats) = card.get_mut("stats") {
                        migrate_stat_names(stats);
                    }
                }
            }
        }
        StoreKey::Battle => {}
        StoreKey::DailyTask => {
            if let Some(tasks) = payload.get_mut("tasks").and_then(Value::as_object_mut) {
                for task in tasks.values_mut() {
                    if let Some(risks) = task.get_mut("risks") {
                        clamp_unit_interval(risks, "failure_chance");
                    }
                }
            }
        }
    }

    Ok(payload)
}

/// Unify a stat object on the canonical attack/defense/health/energy names.
fn migrate_stat_names(stats: &mut Value) {
    rename_field(stats, "power", "attack");
    rename_field(stats, "hp", "health");
    rename_field(stats, "mp", "energy");
    // Unused legacy field
    if let Some(obj) = stats.as_object_mut() {
        obj.remove("speed");
    }
}

fn rename_field(value: &mut Value, from: &str, to: &str) {
    if let Some(obj) = value.as_object_mut() {
        if let Some(v) = obj.remove(from) {
            obj.entry(to.to_string()).or_insert(v);
        }
    }
}

fn clamp_negative(value: &mut Value, field: &str) {
    if let Some(obj) = value.as_object_mut() {
        if let Some(n) = obj.get(field).and_then(Value::as_i64) {
            if n < 0 {
                log::warn!("Clamping negative {} ({}) to 0", field, n);
                obj.insert(field.to_string(), Value::from(0));
            }
        }
    }
}

fn clamp_unit_interval(value: &mut Value, field: &str) {
    if let Some(obj) = value.as_object_mut() {
        if let Some(n) = obj.get(field).and_then(Value::as_f64) {
            let clamped = n.clamp(0.0, 1.0);
            if clamped != n {
                log::warn!("Clamping {} ({}) into [0, 1]", field, n);
                obj.insert(field.to_string(), Value::from(clamped));
            }
        }
    }
}

/// Check if a snapshot version needs migration
pub fn needs_migration(version: u32) -> bool {
    version < STORE_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerStoreState;
    use serde_json::json;

    #[test]
    fn test_player_store_v0_field_unification() {
        let payload = json!({
            "players": [{
                "id": "p1",
                "username": "alice",
                "character": {
                    "name": "Hero",
                    "card_id": "c1",
                    "class": "warrior",
                    "image_url": "",
                    "starRank": 3,
                    "stats": { "power": 15, "defense": 10, "hp": 80, "mp": 60, "speed": 7 }
                },
                "inventory": ["c1"],
                "progress": { "level": 2, "experience": 100, "money": -25, "wins": 0, "games_played": 0 }
            }],
            "current_player_id": "p1"
        });

        let migrated = migrate_store(StoreKey::Player, payload, 0).unwrap();
        let store: PlayerStoreState = serde_json::from_value(migrated).unwrap();

        let player = &store.players[0];
        assert_eq!(player.progress.coins, 0); // clamped
        let character = player.character.as_ref().unwrap();
        assert_eq!(character.star_level, 3);
        assert_eq!(character.stats.attack, 15);
        assert_eq!(character.stats.health, 80);
        assert_eq!(character.stats.energy, 60);
    }

    #[test]
    fn test_task_store_v0_clamps_failure_chance() {
        let payload = json!({
            "tasks": {
                "t1": {
                    "id": "t1",
                    "name": "Patrol",
                    "description": "",
                    "requirements": { "required_stats": {}, "min_level": null },
                    "rewards": { "base_payment": 10, "experience_gain": 5 },
                    "risks": { "failure_chance": 1.8, "health_risk": 0, "energy_cost": 0 },
                    "cooldown_secs": 0
                }
            },
            "last_completed": {},
            "history": []
        });

        let migrated = migrate_store(StoreKey::DailyTask, payload, 0).unwrap();
        let chance = migrated["tasks"]["t1"]["risks"]["failure_chance"].as_f64().unwrap();
        assert_eq!(chance, 1.0);
    }

    #[test]
    fn test_current_version_passes_through() {
        let payload = json!({ "match_history": [] });
        let migrated = migrate_store(StoreKey::Battle, payload.clone(), STORE_VERSION).unwrap();
        assert_eq!(migrated, payload);
    }

    #[test]
    fn test_future_version_tolerated() {
        let payload = json!({ "match_history": [] });
        assert!(migrate_store(StoreKey::Battle, payload, 99).is_ok());
    }

    #[test]
    fn test_needs_migration() {
        assert!(needs_migration(0));
        assert!(!needs_migration(STORE_VERSION));
    }
}
