//! Catalog and move library endpoints

use super::{check_schema, err_code, error_codes, parse_request, to_response};
use crate::catalog::{Card, CardCategory, Move, MoveCategory, MoveKind, StatBlock, TargetType};
use crate::state::{get_state, get_state_mut};
use serde::{Deserialize, Serialize};

/// Lenient card payload: everything except name, category and class can
/// be omitted and is filled with defaults on add.
#[derive(Debug, Deserialize)]
pub struct CardPayload {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: CardCategory,
    pub class: String,
    #[serde(default)]
    pub star_level: u8,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub stats: StatBlock,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl CardPayload {
    fn into_card(self) -> Card {
        Card {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            class: self.class,
            star_level: self.star_level,
            image_url: self.image_url,
            stats: self.stats,
            skills: self.skills,
            is_starter: self.category == CardCategory::Starter,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddCardRequest {
    pub schema_version: u8,
    pub card: CardPayload,
}

#[derive(Debug, Serialize)]
pub struct AddCardResponse {
    pub schema_version: u8,
    pub card_id: String,
}

pub fn add_card_json(request: &str) -> Result<String, String> {
    let req: AddCardRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let card_id = get_state_mut()
        .catalog
        .add_card(req.card.into_card())
        .map_err(|e| err_code(error_codes::STORE, e))?;

    to_response(&AddCardResponse { schema_version: req.schema_version, card_id })
}

#[derive(Debug, Deserialize)]
pub struct UpdateCardRequest {
    pub schema_version: u8,
    pub card: Card,
}

pub fn update_card_json(request: &str) -> Result<String, String> {
    let req: UpdateCardRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let card_id = req.card.id.clone();
    get_state_mut().catalog.update_card(req.card).map_err(|e| err_code(error_codes::STORE, e))?;

    to_response(&AddCardResponse { schema_version: req.schema_version, card_id })
}

#[derive(Debug, Deserialize)]
pub struct DeleteCardRequest {
    pub schema_version: u8,
    pub card_id: String,
}

pub fn delete_card_json(request: &str) -> Result<String, String> {
    let req: DeleteCardRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let card = get_state_mut()
        .catalog
        .delete_card(&req.card_id)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    to_response(&card)
}

/// Filter criteria combine with AND; absent fields match everything.
#[derive(Debug, Deserialize)]
pub struct FilterCardsRequest {
    pub schema_version: u8,
    #[serde(default)]
    pub category: Option<CardCategory>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub star_level: Option<u8>,
    #[serde(default)]
    pub starters_only: bool,
}

#[derive(Debug, Serialize)]
pub struct FilterCardsResponse {
    pub schema_version: u8,
    pub cards: Vec<Card>,
}

pub fn filter_cards_json(request: &str) -> Result<String, String> {
    let req: FilterCardsRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let state = get_state();
    let mut cards: Vec<Card> = state.catalog.all_cards().into_iter().cloned().collect();

    if let Some(category) = req.category {
        cards.retain(|c| c.category == category);
    }
    if let Some(class) = &req.class {
        cards.retain(|c| &c.class == class);
    }
    if let Some(star_level) = req.star_level {
        cards.retain(|c| c.star_level == star_level);
    }
    if req.starters_only {
        cards.retain(|c| c.is_starter);
    }
    cards.sort_by(|a, b| a.name.cmp(&b.name));

    to_response(&FilterCardsResponse { schema_version: req.schema_version, cards })
}

#[derive(Debug, Deserialize)]
pub struct MovePayload {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub power: i32,
    #[serde(default)]
    pub energy_cost: i32,
    pub kind: MoveKind,
    pub category: MoveCategory,
    #[serde(default = "default_target")]
    pub target: TargetType,
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default)]
    pub classes: Vec<String>,
}

fn default_target() -> TargetType {
    TargetType::SingleEnemy
}

#[derive(Debug, Deserialize)]
pub struct AddMoveRequest {
    pub schema_version: u8,
    #[serde(rename = "move")]
    pub move_data: MovePayload,
}

#[derive(Debug, Serialize)]
pub struct AddMoveResponse {
    pub schema_version: u8,
    pub move_id: String,
}

pub fn add_move_json(request: &str) -> Result<String, String> {
    let req: AddMoveRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let m = req.move_data;
    let mut mv = Move::new(m.id, m.name, m.kind, m.category);
    mv.description = m.description;
    mv.power = m.power;
    mv.energy_cost = m.energy_cost;
    mv.target = m.target;
    mv.cooldown = m.cooldown;
    mv.classes = m.classes;

    let move_id =
        get_state_mut().moves.add_move(mv).map_err(|e| err_code(error_codes::STORE, e))?;

    to_response(&AddMoveResponse { schema_version: req.schema_version, move_id })
}

#[derive(Debug, Deserialize)]
pub struct AttachSkillRequest {
    pub schema_version: u8,
    pub card_id: String,
    pub move_id: String,
}

pub fn attach_skill_json(request: &str) -> Result<String, String> {
    let req: AttachSkillRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let mut state = get_state_mut();
    let state = &mut *state;
    state
        .catalog
        .attach_skill(&req.card_id, &req.move_id, &state.moves)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    let card = state.catalog.get_card(&req.card_id).unwrap();
    to_response(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{reset_state, set_state, GameState};
    use serde_json::json;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_add_card_fills_id() {
        reset_state();

        let request = json!({
            "schema_version": 1,
            "card": {
                "name": "Squire",
                "category": "Starter",
                "class": "warrior"
            }
        });

        let response = add_card_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        let card_id = parsed["card_id"].as_str().unwrap();
        assert!(!card_id.is_empty());
    }

    #[test]
    #[serial]
    fn test_bad_schema_version_rejected() {
        reset_state();

        let request = json!({
            "schema_version": 9,
            "card": { "name": "Squire", "category": "Starter", "class": "warrior" }
        });

        let err = add_card_json(&request.to_string()).unwrap_err();
        assert!(err.starts_with(error_codes::INVALID_SCHEMA));
    }

    #[test]
    #[serial]
    fn test_filter_cards_by_class() {
        set_state(GameState::with_defaults());

        let request = json!({
            "schema_version": 1,
            "class": "mage"
        });

        let response = filter_cards_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        let cards = parsed["cards"].as_array().unwrap();
        assert!(!cards.is_empty());
        assert!(cards.iter().all(|c| c["class"] == "mage"));
    }

    #[test]
    #[serial]
    fn test_delete_missing_card_errors() {
        reset_state();

        let request = json!({ "schema_version": 1, "card_id": "ghost" });
        let err = delete_card_json(&request.to_string()).unwrap_err();
        assert!(err.starts_with(error_codes::STORE));
    }

    #[test]
    #[serial]
    fn test_attach_skill_roundtrip() {
        set_state(GameState::with_defaults());

        let request = json!({
            "schema_version": 1,
            "card_id": "task_courier",
            "move_id": "move_second_wind"
        });

        let response = attach_skill_json(&request.to_string()).unwrap();
        let card: Card = serde_json::from_str(&response).unwrap();
        assert!(card.has_skill("move_second_wind"));
    }
}
