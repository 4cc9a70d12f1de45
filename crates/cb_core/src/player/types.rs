use crate::catalog::StatBlock;
use serde::{Deserialize, Serialize};

/// Progression counters for a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub level: u32,
    pub experience: u32,
    pub coins: i64,
    pub wins: u32,
    pub games_played: u32,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self { level: 1, experience: 0, coins: 0, wins: 0, games_played: 0 }
    }
}

/// A player's instantiated persona, derived from a catalog card.
///
/// Stats are copied from the source card at creation and then mutated by
/// tasks, battles and level-ups; the card itself is never written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    /// Id of the card this character was created from
    pub card_id: String,
    pub class: String,
    pub image_url: String,
    pub star_level: u8,
    pub stats: StatBlock,
}

/// The canonical player record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub username: String,
    pub character: Option<Character>,
    /// Owned card ids; duplicates mean multiple copies
    pub inventory: Vec<String>,
    pub progress: PlayerProgress,
}

impl PlayerProfile {
    pub fn new(id: String, username: String) -> Self {
        Self {
            id,
            username,
            character: None,
            inventory: Vec::new(),
            progress: PlayerProgress::default(),
        }
    }

    pub fn owns_card(&self, card_id: &str) -> bool {
        self.inventory.iter().any(|id| id == card_id)
    }

    /// Number of copies of a card in the inventory.
    pub fn card_copies(&self, card_id: &str) -> usize {
        self.inventory.iter().filter(|id| *id == card_id).count()
    }

    pub fn win_rate(&self) -> f32 {
        if self.progress.games_played == 0 {
            return 0.0;
        }
        self.progress.wins as f32 / self.progress.games_played as f32
    }
}
