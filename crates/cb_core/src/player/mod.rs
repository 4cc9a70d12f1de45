pub mod manager;
pub mod progression;
pub mod types;
pub mod validation;

pub use manager::{PlayerManager, PlayerStoreState};
pub use progression::{gain_experience, xp_to_next, LevelUpSummary};
pub use types::{Character, PlayerProfile, PlayerProgress};
pub use validation::{PlayerValidationError, PlayerValidator};
