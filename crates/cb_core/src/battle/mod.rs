pub mod resolver;
pub mod types;

pub use resolver::{resolve_battle, win_probability};
pub use types::{BattleLogState, MatchRecord, MatchType};
