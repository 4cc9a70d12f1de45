//! Battle resolution
//!
//! One seeded roll against a rating-derived win probability. The
//! probability is clamped so no matchup is ever a guaranteed outcome.

use super::types::{MatchRecord, MatchType};
use crate::catalog::star_multiplier;
use crate::error::{CoreError, Result};
use crate::player::PlayerProfile;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

/// Win probability bounds for any matchup
pub const MIN_WIN_PROBABILITY: f32 = 0.1;
pub const MAX_WIN_PROBABILITY: f32 = 0.9;

/// Battle rating: star-boosted attack plus half the defense.
fn rating(player: &PlayerProfile) -> Result<f32> {
    let character = player.character.as_ref().ok_or_else(|| {
        CoreError::InvalidParameter(format!("Player {} has no character", player.username))
    })?;

    let stats = &character.stats;
    let boosted = stats.attack as f32 * star_multiplier(character.star_level);
    Ok((boosted + stats.defense as f32 * 0.5).max(1.0))
}

/// Probability that `player_a` beats `player_b`, clamped to
/// [`MIN_WIN_PROBABILITY`, `MAX_WIN_PROBABILITY`].
pub fn win_probability(player_a: &PlayerProfile, player_b: &PlayerProfile) -> Result<f32> {
    let rating_a = rating(player_a)?;
    let rating_b = rating(player_b)?;
    let p = rating_a / (rating_a + rating_b);
    Ok(p.clamp(MIN_WIN_PROBABILITY, MAX_WIN_PROBABILITY))
}

/// Resolve a battle between two players with a seeded roll.
///
/// Returns the match record; the caller appends it to the battle log and
/// updates the participants' win counters.
pub fn resolve_battle(
    player_a: &PlayerProfile,
    player_b: &PlayerProfile,
    match_type: MatchType,
    current_time: u64,
    seed: u64,
) -> Result<MatchRecord> {
    if player_a.id == player_b.id {
        return Err(CoreError::InvalidParameter("A player cannot battle themselves".to_string()));
    }

    let p_a = win_probability(player_a, player_b)?;

    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
    let roll = rng.gen::<f32>();
    let winner_id = if roll < p_a { player_a.id.clone() } else { player_b.id.clone() };

    Ok(MatchRecord {
        id: Uuid::new_v4().to_string(),
        match_type,
        player_a: player_a.id.clone(),
        player_b: player_b.id.clone(),
        winner_id,
        timestamp: current_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StatBlock;
    use crate::player::types::Character;

    fn player(id: &str, attack: i32, defense: i32, star_level: u8) -> PlayerProfile {
        let mut p = PlayerProfile::new(id.to_string(), format!("user_{}", id));
        p.character = Some(Character {
            name: "Hero".to_string(),
            card_id: "c1".to_string(),
            class: "warrior".to_string(),
            image_url: String::new(),
            star_level,
            stats: StatBlock { attack, defense, health: 100, energy: 100 },
        });
        p
    }

    #[test]
    fn test_win_probability_clamped() {
        let strong = player("a", 1000, 1000, 5);
        let weak = player("b", 1, 0, 1);

        let p = win_probability(&strong, &weak).unwrap();
        assert!((p - MAX_WIN_PROBABILITY).abs() < f32::EPSILON);

        let p = win_probability(&weak, &strong).unwrap();
        assert!((p - MIN_WIN_PROBABILITY).abs() < f32::EPSILON);
    }

    #[test]
    fn test_even_matchup_is_even() {
        let a = player("a", 20, 10, 2);
        let b = player("b", 20, 10, 2);
        let p = win_probability(&a, &b).unwrap();
        assert!((p - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_star_level_raises_probability() {
        let a1 = player("a", 20, 10, 1);
        let a5 = player("a", 20, 10, 5);
        let b = player("b", 20, 10, 1);

        let p1 = win_probability(&a1, &b).unwrap();
        let p5 = win_probability(&a5, &b).unwrap();
        assert!(p5 > p1);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let a = player("a", 20, 10, 2);
        let b = player("b", 25, 5, 3);

        let r1 = resolve_battle(&a, &b, MatchType::Ranked, 1000, 7).unwrap();
        let r2 = resolve_battle(&a, &b, MatchType::Ranked, 1000, 7).unwrap();
        assert_eq!(r1.winner_id, r2.winner_id);
    }

    #[test]
    fn test_winner_is_participant() {
        let a = player("a", 20, 10, 2);
        let b = player("b", 25, 5, 3);

        for seed in 0..50 {
            let record = resolve_battle(&a, &b, MatchType::Quick, 1000, seed).unwrap();
            assert!(record.winner_id == "a" || record.winner_id == "b");
        }
    }

    #[test]
    fn test_characterless_player_rejected() {
        let a = player("a", 20, 10, 2);
        let b = PlayerProfile::new("b".to_string(), "bob".to_string());

        assert!(resolve_battle(&a, &b, MatchType::Quick, 1000, 0).is_err());
    }

    #[test]
    fn test_self_battle_rejected() {
        let a = player("a", 20, 10, 2);
        assert!(resolve_battle(&a, &a, MatchType::Quick, 1000, 0).is_err());
    }
}
