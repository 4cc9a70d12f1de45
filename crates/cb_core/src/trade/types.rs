use serde::{Deserialize, Serialize};

/// Trade offer lifecycle status.
///
/// Transitions go through `can_transition` only; there is no direct
/// status assignment outside the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl TradeStatus {
    /// The transition table. `Accepted` is an internal step on the way to
    /// `Completed` within a single accept call; it is never left exposed.
    pub fn can_transition(self, to: TradeStatus) -> bool {
        use TradeStatus::*;
        matches!(
            (self, to),
            (Pending, Accepted) | (Pending, Rejected) | (Pending, Cancelled) | (Accepted, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, TradeStatus::Rejected | TradeStatus::Completed | TradeStatus::Cancelled)
    }
}

/// One side of a trade: cards and coins a player gives up.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TradeSide {
    pub card_ids: Vec<String>,
    pub coins: i64,
}

impl TradeSide {
    pub fn is_empty(&self) -> bool {
        self.card_ids.is_empty() && self.coins == 0
    }
}

/// A proposed exchange between two players.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeOffer {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    /// What the sender gives
    pub offered: TradeSide,
    /// What the sender asks from the receiver
    pub requested: TradeSide,
    pub status: TradeStatus,
    pub created_at: u64,
    pub resolved_at: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use TradeStatus::*;

    #[test]
    fn test_transition_table() {
        assert!(Pending.can_transition(Accepted));
        assert!(Pending.can_transition(Rejected));
        assert!(Pending.can_transition(Cancelled));
        assert!(Accepted.can_transition(Completed));

        assert!(!Pending.can_transition(Completed));
        assert!(!Completed.can_transition(Pending));
        assert!(!Rejected.can_transition(Accepted));
        assert!(!Cancelled.can_transition(Cancelled));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!Pending.is_terminal());
        assert!(!Accepted.is_terminal());
        assert!(Rejected.is_terminal());
        assert!(Completed.is_terminal());
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn test_empty_side() {
        assert!(TradeSide::default().is_empty());
        assert!(!TradeSide { card_ids: vec!["c1".to_string()], coins: 0 }.is_empty());
        assert!(!TradeSide { card_ids: Vec::new(), coins: 5 }.is_empty());
    }
}
