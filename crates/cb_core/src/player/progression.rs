//! Level and experience progression
//!
//! One curve for the whole engine: a level-up triggers exactly when
//! `experience >= level * 1000`. Each level-up consumes the threshold,
//! bumps attack/defense and restores health/energy to full.

use super::types::PlayerProfile;

/// Experience required to clear the given level.
pub fn xp_to_next(level: u32) -> u32 {
    level * 1000
}

/// Stat gain per level-up
pub const LEVEL_UP_STAT_BONUS: i32 = 2;
/// Health and energy are restored to this value on level-up
pub const LEVEL_UP_RESTORE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpSummary {
    pub levels_gained: u32,
    pub new_level: u32,
}

/// Add experience and resolve any resulting level-ups.
///
/// Stat bumps apply only when the player has a character; the progression
/// counters advance either way.
pub fn gain_experience(player: &mut PlayerProfile, amount: u32) -> LevelUpSummary {
    let progress = &mut player.progress;
    progress.experience = progress.experience.saturating_add(amount);

    let mut levels_gained = 0;
    while progress.experience >= xp_to_next(progress.level) {
        progress.experience -= xp_to_next(progress.level);
        progress.level += 1;
        levels_gained += 1;

        if let Some(character) = player.character.as_mut() {
            character.stats.attack += LEVEL_UP_STAT_BONUS;
            character.stats.defense += LEVEL_UP_STAT_BONUS;
            character.stats.health = LEVEL_UP_RESTORE;
            character.stats.energy = LEVEL_UP_RESTORE;
        }
    }

    LevelUpSummary { levels_gained, new_level: player.progress.level }
}
