//! JSON API surface
//!
//! String-in/string-out entry points a UI front-end calls. Every request
//! carries a `schema_version`; operations that roll dice take an explicit
//! `seed` so the front-end can replay outcomes.

pub mod catalog_json;
pub mod game_json;
pub mod player_json;

pub use catalog_json::{
    add_card_json, add_move_json, attach_skill_json, delete_card_json, filter_cards_json,
    update_card_json,
};
pub use game_json::{
    accept_trade_offer_json, cancel_trade_offer_json, complete_task_json,
    create_trade_offer_json, load_game_json, reject_trade_offer_json, resolve_battle_json,
    save_game_json,
};
pub use player_json::{
    add_to_inventory_json, create_character_json, create_player_json, gain_experience_json,
    get_player_json, select_player_json,
};

/// Supported request schema version
pub const API_SCHEMA_VERSION: u8 = 1;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "E_REQUEST";
    pub const INVALID_SCHEMA: &str = "E_SCHEMA";
    pub const STORE: &str = "E_STORE";
    pub const SAVE: &str = "E_SAVE";
}

pub(crate) fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

pub(crate) fn check_schema(version: u8) -> Result<(), String> {
    if version != API_SCHEMA_VERSION {
        return Err(err_code(
            error_codes::INVALID_SCHEMA,
            format!("unsupported schema_version {version}, expected {API_SCHEMA_VERSION}"),
        ));
    }
    Ok(())
}

pub(crate) fn parse_request<T: serde::de::DeserializeOwned>(request: &str) -> Result<T, String> {
    serde_json::from_str(request).map_err(|e| err_code(error_codes::INVALID_REQUEST, e))
}

pub(crate) fn to_response<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| err_code(error_codes::INVALID_REQUEST, e))
}
