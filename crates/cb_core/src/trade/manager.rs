use super::types::{TradeOffer, TradeSide, TradeStatus};
use crate::error::{CoreError, Result, ValidationReport};
use crate::player::{PlayerManager, PlayerProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Trade store state for save/load
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TradeState {
    pub offers: HashMap<String, TradeOffer>,
}

/// Result of accepting an offer.
///
/// A stale offer (inventories or balances moved since creation) is
/// cancelled rather than half-applied; the report says what no longer
/// holds.
#[derive(Debug, Clone)]
pub enum AcceptOutcome {
    Completed,
    Stale(ValidationReport),
}

/// Trade offer lifecycle.
///
/// Ownership is validated when an offer is created AND re-validated when
/// it is accepted; the swap itself is all-or-nothing.
#[derive(Debug, Clone, Default)]
pub struct TradeManager {
    state: TradeState,
}

impl TradeManager {
    pub fn new() -> Self {
        Self { state: TradeState::default() }
    }

    pub fn from_state(state: TradeState) -> Self {
        Self { state }
    }

    pub fn get_state(&self) -> &TradeState {
        &self.state
    }

    pub fn get_offer(&self, offer_id: &str) -> Option<&TradeOffer> {
        self.state.offers.get(offer_id)
    }

    pub fn offer_count(&self) -> usize {
        self.state.offers.len()
    }

    /// Pending offers involving a player, as sender or receiver.
    pub fn pending_offers_for(&self, player_id: &str) -> Vec<&TradeOffer> {
        self.state
            .offers
            .values()
            .filter(|o| {
                o.status == TradeStatus::Pending
                    && (o.sender_id == player_id || o.receiver_id == player_id)
            })
            .collect()
    }

    /// Copies of each card a sender has committed in pending offers,
    /// excluding `exclude_offer` when re-validating that offer itself.
    fn escrowed_counts(
        &self,
        sender_id: &str,
        exclude_offer: Option<&str>,
    ) -> HashMap<String, usize> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for offer in self.state.offers.values() {
            if offer.status != TradeStatus::Pending
                || offer.sender_id != sender_id
                || Some(offer.id.as_str()) == exclude_offer
            {
                continue;
            }
            for card_id in &offer.offered.card_ids {
                *counts.entry(card_id.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Check that a player can cover one side of a trade.
    ///
    /// `escrowed` holds copies already committed elsewhere and therefore
    /// unavailable here.
    fn validate_side(
        player: &PlayerProfile,
        side: &TradeSide,
        escrowed: &HashMap<String, usize>,
    ) -> ValidationReport {
        let mut report = ValidationReport::ok();

        if side.coins < 0 {
            report.push(format!("coin amount cannot be negative: {}", side.coins));
        } else if player.progress.coins < side.coins {
            report.push(format!(
                "{} cannot afford {} coins (has {})",
                player.username, side.coins, player.progress.coins
            ));
        }

        // Count copies listed on this side and compare against what the
        // inventory still has free.
        let mut listed: HashMap<&str, usize> = HashMap::new();
        for card_id in &side.card_ids {
            *listed.entry(card_id.as_str()).or_insert(0) += 1;
        }
        for (card_id, needed) in listed {
            let owned = player.card_copies(card_id);
            let reserved = escrowed.get(card_id).copied().unwrap_or(0);
            let free = owned.saturating_sub(reserved);
            if free < needed {
                report.push(format!(
                    "{} does not own enough copies of card {} ({} needed, {} free)",
                    player.username, card_id, needed, free
                ));
            }
        }

        report
    }

    /// Validate a whole offer against current player state.
    fn validate_offer(
        &self,
        players: &PlayerManager,
        offer: &TradeOffer,
        exclude_self: bool,
    ) -> Result<ValidationReport> {
        let sender = players
            .get_player(&offer.sender_id)
            .ok_or_else(|| CoreError::NotFound(format!("Player not found: {}", offer.sender_id)))?;
        let receiver = players.get_player(&offer.receiver_id).ok_or_else(|| {
            CoreError::NotFound(format!("Player not found: {}", offer.receiver_id))
        })?;

        let exclude = if exclude_self { Some(offer.id.as_str()) } else { None };

        let mut report = ValidationReport::ok();
        report.merge(Self::validate_side(
            sender,
            &offer.offered,
            &self.escrowed_counts(&offer.sender_id, exclude),
        ));
        // The receiver has not escrowed anything by merely receiving
        // offers; their side is checked against the full inventory.
        report.merge(Self::validate_side(receiver, &offer.requested, &HashMap::new()));
        Ok(report)
    }

    /// Create a pending offer. Both sides must be coverable right now.
    pub fn create_offer(
        &mut self,
        players: &PlayerManager,
        sender_id: &str,
        receiver_id: &str,
        offered: TradeSide,
        requested: TradeSide,
        current_time: u64,
    ) -> Result<String> {
        if sender_id == receiver_id {
            return Err(CoreError::InvalidParameter(
                "Cannot create a trade offer with yourself".to_string(),
            ));
        }
        if offered.is_empty() && requested.is_empty() {
            return Err(CoreError::InvalidParameter("Trade offer is empty".to_string()));
        }

        let offer = TradeOffer {
            id: Uuid::new_v4().to_string(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            offered,
            requested,
            status: TradeStatus::Pending,
            created_at: current_time,
            resolved_at: None,
        };

        self.validate_offer(players, &offer, false)?.into_result()?;

        let id = offer.id.clone();
        self.state.offers.insert(id.clone(), offer);
        Ok(id)
    }

    /// Accept a pending offer as its receiver.
    ///
    /// Re-validates both sides against *current* state before touching
    /// anything. If the offer went stale it is cancelled and nothing
    /// moves; otherwise cards and coins swap in one step and the offer
    /// completes.
    pub fn accept_offer(
        &mut self,
        players: &mut PlayerManager,
        offer_id: &str,
        acceptor_id: &str,
        current_time: u64,
    ) -> Result<AcceptOutcome> {
        let offer = self
            .state
            .offers
            .get(offer_id)
            .ok_or_else(|| CoreError::NotFound(format!("Offer not found: {}", offer_id)))?
            .clone();

        if !offer.status.can_transition(TradeStatus::Accepted) {
            return Err(CoreError::InvalidTransition {
                from: format!("{:?}", offer.status),
                to: "Accepted".to_string(),
            });
        }
        if offer.receiver_id != acceptor_id {
            return Err(CoreError::InvalidParameter(format!(
                "Only the receiver can accept offer {}",
                offer_id
            )));
        }

        let report = self.validate_offer(players, &offer, true)?;
        if !report.is_valid {
            let stored = self.state.offers.get_mut(offer_id).unwrap();
            stored.status = TradeStatus::Cancelled;
            stored.resolved_at = Some(current_time);
            return Ok(AcceptOutcome::Stale(report));
        }

        // Validation passed against current state and we hold exclusive
        // access, so the swap below cannot fail partway.
        for card_id in &offer.offered.card_ids {
            players.remove_from_inventory(&offer.sender_id, card_id)?;
            players.get_player_mut(&offer.receiver_id).unwrap().inventory.push(card_id.clone());
        }
        for card_id in &offer.requested.card_ids {
            players.remove_from_inventory(&offer.receiver_id, card_id)?;
            players.get_player_mut(&offer.sender_id).unwrap().inventory.push(card_id.clone());
        }
        if offer.offered.coins > 0 {
            players.debit_coins(&offer.sender_id, offer.offered.coins)?;
            players.credit_coins(&offer.receiver_id, offer.offered.coins)?;
        }
        if offer.requested.coins > 0 {
            players.debit_coins(&offer.receiver_id, offer.requested.coins)?;
            players.credit_coins(&offer.sender_id, offer.requested.coins)?;
        }

        let stored = self.state.offers.get_mut(offer_id).unwrap();
        stored.status = TradeStatus::Completed;
        stored.resolved_at = Some(current_time);
        Ok(AcceptOutcome::Completed)
    }

    /// Reject a pending offer as its receiver.
    pub fn reject_offer(
        &mut self,
        offer_id: &str,
        actor_id: &str,
        current_time: u64,
    ) -> Result<()> {
        self.resolve_offer(offer_id, actor_id, TradeStatus::Rejected, current_time)
    }

    /// Cancel a pending offer as its sender.
    pub fn cancel_offer(
        &mut self,
        offer_id: &str,
        actor_id: &str,
        current_time: u64,
    ) -> Result<()> {
        self.resolve_offer(offer_id, actor_id, TradeStatus::Cancelled, current_time)
    }

    fn resolve_offer(
        &mut self,
        offer_id: &str,
        actor_id: &str,
        to: TradeStatus,
        current_time: u64,
    ) -> Result<()> {
        let offer = self
            .state
            .offers
            .get_mut(offer_id)
            .ok_or_else(|| CoreError::NotFound(format!("Offer not found: {}", offer_id)))?;

        if !offer.status.can_transition(to) {
            return Err(CoreError::InvalidTransition {
                from: format!("{:?}", offer.status),
                to: format!("{:?}", to),
            });
        }

        let allowed = match to {
            TradeStatus::Rejected => offer.receiver_id == actor_id,
            TradeStatus::Cancelled => offer.sender_id == actor_id,
            _ => false,
        };
        if !allowed {
            return Err(CoreError::InvalidParameter(format!(
                "Player {} cannot move offer {} to {:?}",
                actor_id, offer_id, to
            )));
        }

        offer.status = to;
        offer.resolved_at = Some(current_time);
        Ok(())
    }
}
