pub mod balance;
pub mod config;
pub mod error;
pub mod exchangeinfo;
pub mod fee;
pub mod order;
pub mod sizing;
pub mod tradingrules;
pub mod utils;

pub use error::{ConfigError, NormalizeError, NormalizeResult};
pub use order::{normalize_order, normalize_price, normalize_quantity};
pub use order::{NormalizedOrder, OrderRequest, Side};
pub use tradingrules::{RulesBook, TradingRules};
