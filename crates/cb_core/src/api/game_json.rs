//! Task, battle, trade and persistence endpoints

use super::{check_schema, err_code, error_codes, parse_request, to_response};
use crate::battle::{resolve_battle, MatchType};
use crate::save::SaveManager;
use crate::state::{get_state_mut, set_state};
use crate::trade::{AcceptOutcome, TradeSide};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct CompleteTaskRequest {
    pub schema_version: u8,
    pub player_id: String,
    pub task_id: String,
    pub current_time: u64,
    pub seed: u64,
}

pub fn complete_task_json(request: &str) -> Result<String, String> {
    let req: CompleteTaskRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let mut state = get_state_mut();
    let state = &mut *state;

    let player = state
        .players
        .get_player_mut(&req.player_id)
        .ok_or_else(|| err_code(error_codes::STORE, format!("Player not found: {}", req.player_id)))?;

    let resolution = state
        .tasks
        .complete_task(player, &req.task_id, req.current_time, req.seed)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    tracing::info!(
        task_id = %req.task_id,
        succeeded = resolution.succeeded,
        "task resolved"
    );
    to_response(&resolution)
}

#[derive(Debug, Deserialize)]
pub struct ResolveBattleRequest {
    pub schema_version: u8,
    pub player_a: String,
    pub player_b: String,
    pub match_type: MatchType,
    pub current_time: u64,
    pub seed: u64,
}

pub fn resolve_battle_json(request: &str) -> Result<String, String> {
    let req: ResolveBattleRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let mut state = get_state_mut();

    let a = state
        .players
        .get_player(&req.player_a)
        .cloned()
        .ok_or_else(|| err_code(error_codes::STORE, format!("Player not found: {}", req.player_a)))?;
    let b = state
        .players
        .get_player(&req.player_b)
        .cloned()
        .ok_or_else(|| err_code(error_codes::STORE, format!("Player not found: {}", req.player_b)))?;

    let record = resolve_battle(&a, &b, req.match_type, req.current_time, req.seed)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    state.record_match(record.clone()).map_err(|e| err_code(error_codes::STORE, e))?;

    tracing::info!(winner = %record.winner_id, "battle resolved");
    to_response(&record)
}

#[derive(Debug, Deserialize)]
pub struct CreateTradeOfferRequest {
    pub schema_version: u8,
    pub sender_id: String,
    pub receiver_id: String,
    pub offered: TradeSide,
    pub requested: TradeSide,
    pub current_time: u64,
}

#[derive(Debug, Serialize)]
pub struct CreateTradeOfferResponse {
    pub schema_version: u8,
    pub offer_id: String,
}

pub fn create_trade_offer_json(request: &str) -> Result<String, String> {
    let req: CreateTradeOfferRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let mut state = get_state_mut();
    let state = &mut *state;

    let offer_id = state
        .trades
        .create_offer(
            &state.players,
            &req.sender_id,
            &req.receiver_id,
            req.offered,
            req.requested,
            req.current_time,
        )
        .map_err(|e| err_code(error_codes::STORE, e))?;

    to_response(&CreateTradeOfferResponse { schema_version: req.schema_version, offer_id })
}

#[derive(Debug, Deserialize)]
pub struct TradeActionRequest {
    pub schema_version: u8,
    pub offer_id: String,
    pub actor_id: String,
    pub current_time: u64,
}

#[derive(Debug, Serialize)]
pub struct AcceptTradeOfferResponse {
    pub schema_version: u8,
    pub outcome: String,
    pub errors: Vec<String>,
}

pub fn accept_trade_offer_json(request: &str) -> Result<String, String> {
    let req: TradeActionRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let mut state = get_state_mut();
    let state = &mut *state;

    let outcome = state
        .trades
        .accept_offer(&mut state.players, &req.offer_id, &req.actor_id, req.current_time)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    let response = match outcome {
        AcceptOutcome::Completed => AcceptTradeOfferResponse {
            schema_version: req.schema_version,
            outcome: "completed".to_string(),
            errors: Vec::new(),
        },
        AcceptOutcome::Stale(report) => AcceptTradeOfferResponse {
            schema_version: req.schema_version,
            outcome: "stale".to_string(),
            errors: report.errors,
        },
    };
    to_response(&response)
}

pub fn reject_trade_offer_json(request: &str) -> Result<String, String> {
    let req: TradeActionRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    get_state_mut()
        .trades
        .reject_offer(&req.offer_id, &req.actor_id, req.current_time)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    to_response(&CreateTradeOfferResponse {
        schema_version: req.schema_version,
        offer_id: req.offer_id,
    })
}

pub fn cancel_trade_offer_json(request: &str) -> Result<String, String> {
    let req: TradeActionRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    get_state_mut()
        .trades
        .cancel_offer(&req.offer_id, &req.actor_id, req.current_time)
        .map_err(|e| err_code(error_codes::STORE, e))?;

    to_response(&CreateTradeOfferResponse {
        schema_version: req.schema_version,
        offer_id: req.offer_id,
    })
}

#[derive(Debug, Deserialize)]
pub struct SaveGameRequest {
    pub schema_version: u8,
    pub dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct SaveGameResponse {
    pub schema_version: u8,
    pub ok: bool,
}

pub fn save_game_json(request: &str) -> Result<String, String> {
    let req: SaveGameRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let state = get_state_mut();
    SaveManager::save_all(&req.dir, &state).map_err(|e| err_code(error_codes::SAVE, e))?;

    to_response(&SaveGameResponse { schema_version: req.schema_version, ok: true })
}

pub fn load_game_json(request: &str) -> Result<String, String> {
    let req: SaveGameRequest = parse_request(request)?;
    check_schema(req.schema_version)?;

    let loaded = SaveManager::load_all(&req.dir).map_err(|e| err_code(error_codes::SAVE, e))?;
    set_state(loaded);

    to_response(&SaveGameResponse { schema_version: req.schema_version, ok: true })
}
