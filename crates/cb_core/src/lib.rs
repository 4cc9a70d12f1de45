//! # cb_core - Cardbound game state engine
//!
//! Deterministic state engine for a card/role-play game: card catalog,
//! player and character records, task resolution, trading and battle
//! logs, persisted as versioned JSON snapshots.
//!
//! ## Features
//! - Seeded resolution everywhere (same seed = same outcome)
//! - One canonical player schema with a single source of truth for the
//!   active player
//! - Atomic per-store snapshot persistence with checksums and migration
//! - JSON API for easy integration with UI front-ends

// Allow unused code for features under development
#![allow(dead_code)]

pub mod api;
pub mod battle;
pub mod catalog;
pub mod data;
pub mod error;
pub mod player;
pub mod save;
pub mod state;
pub mod task;
pub mod trade;

// Re-export core error types
pub use error::{CoreError, Result, ValidationReport};

// Re-export catalog types
pub use catalog::{
    Card, CardCategory, CardValidator, CatalogManager, Move, MoveCategory, MoveKind, MoveLibrary,
    MoveValidator, StatBlock, TargetType,
};

// Re-export player system
pub use player::{Character, PlayerManager, PlayerProfile, PlayerProgress, PlayerValidator};

// Re-export game systems
pub use battle::{resolve_battle, MatchRecord, MatchType};
pub use task::{TaskDef, TaskManager, TaskResolution};
pub use trade::{AcceptOutcome, TradeManager, TradeOffer, TradeSide, TradeStatus};

// Re-export save system
pub use save::{GameSettings, SaveError, SaveManager, StoreKey, STORE_VERSION};

// Re-export state management
pub use state::{get_state, get_state_mut, reset_state, set_state, GameState, GAME_STATE};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
