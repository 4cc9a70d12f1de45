use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    Quick,
    Ranked,
    Practice,
}

/// A finished match. Records are append-only; nothing replays them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub match_type: MatchType,
    pub player_a: String,
    pub player_b: String,
    pub winner_id: String,
    pub timestamp: u64,
}

/// Battle store state for save/load
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BattleLogState {
    pub match_history: Vec<MatchRecord>,
}

impl BattleLogState {
    pub fn record(&mut self, record: MatchRecord) {
        self.match_history.push(record);
    }

    pub fn matches_for(&self, player_id: &str) -> Vec<&MatchRecord> {
        self.match_history
            .iter()
            .filter(|m| m.player_a == player_id || m.player_b == player_id)
            .collect()
    }

    pub fn wins_for(&self, player_id: &str) -> usize {
        self.match_history.iter().filter(|m| m.winner_id == player_id).count()
    }
}
