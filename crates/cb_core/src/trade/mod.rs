pub mod manager;
pub mod types;

pub use manager::{AcceptOutcome, TradeManager, TradeState};
pub use types::{TradeOffer, TradeSide, TradeStatus};
