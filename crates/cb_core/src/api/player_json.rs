//! Player and character endpoints

use super::{check_schema, err_code, error_codes, parse_request, to_response};
use crate::state::{get_state, get_state_mut};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreatePlayerRequest {
    pub schema_version: u8,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePlayerResponse {
    pub schema_version: u8,
    pub player_id: String,
}

pub fn create_player_json(request: &str) -> Result<String, String> {
    let req: CreatePlayerRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let player_id = get_state_mut()
        .players
        .create_player(&req.username)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    tracing::info!(username = %req.username, player_id = %player_id, "player created");
    to_response(&CreatePlayerResponse { schema_version: req.schema_version, player_id })
}

#[derive(Debug, Deserialize)]
pub struct SelectPlayerRequest {
    pub schema_version: u8,
    pub player_id: String,
}

pub fn select_player_json(request: &str) -> Result<String, String> {
    let req: SelectPlayerRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    get_state_mut()
        .players
        .set_current_player(&req.player_id)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    to_response(&CreatePlayerResponse {
        schema_version: req.schema_version,
        player_id: req.player_id,
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    pub schema_version: u8,
    pub player_id: String,
    pub name: String,
    pub card_id: String,
    #[serde(default)]
    pub image_url: String,
}

pub fn create_character_json(request: &str) -> Result<String, String> {
    let req: CreateCharacterRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let mut state = get_state_mut();
    let state = &mut *state;
    state
        .players
        .create_character(&req.player_id, &req.name, &req.card_id, &req.image_url, &state.catalog)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    tracing::info!(player_id = %req.player_id, card_id = %req.card_id, "character created");

    let player = state.players.get_player(&req.player_id).unwrap();
    to_response(player)
}

#[derive(Debug, Deserialize)]
pub struct InventoryRequest {
    pub schema_version: u8,
    pub player_id: String,
    pub card_id: String,
}

pub fn add_to_inventory_json(request: &str) -> Result<String, String> {
    let req: InventoryRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let mut state = get_state_mut();
    let state = &mut *state;
    state
        .players
        .add_to_inventory(&req.player_id, &req.card_id, &state.catalog)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    let player = state.players.get_player(&req.player_id).unwrap();
    to_response(player)
}

#[derive(Debug, Deserialize)]
pub struct GainExperienceRequest {
    pub schema_version: u8,
    pub player_id: String,
    pub amount: u32,
}

#[derive(Debug, Serialize)]
pub struct GainExperienceResponse {
    pub schema_version: u8,
    pub levels_gained: u32,
    pub new_level: u32,
}

pub fn gain_experience_json(request: &str) -> Result<String, String> {
    let req: GainExperienceRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let summary = get_state_mut()
        .players
        .gain_experience(&req.player_id, req.amount)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    if summary.levels_gained > 0 {
        tracing::info!(player_id = %req.player_id, new_level = summary.new_level, "level up");
    }

    to_response(&GainExperienceResponse {
        schema_version: req.schema_version,
        levels_gained: summary.levels_gained,
        new_level: summary.new_level,
    })
}

#[derive(Debug, Deserialize)]
pub struct GetPlayerRequest {
    pub schema_version: u8,
    pub player_id: String,
}

pub fn get_player_json(request: &str) -> Result<String, String> {
    let req: GetPlayerRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let state = get_state();
    let player = state
        .players
        .get_player(&req.player_id)
        .ok_or_else(|| err_code(error_codes::STORE, format!("Player not found: {}", req.player_id)))?;

    to_response(player)
}
