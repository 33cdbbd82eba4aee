// Error types returned by the normalizer, the rules model and the config loader.
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    // Malformed or missing trading rule data, the caller must refresh the rules.
    #[error("invalid trading rule: {0}")]
    InvalidRule(String),

    #[error("order value {notional} is less than minimum notional {min_notional}")]
    NotionalTooSmall {
        notional: Decimal,
        min_notional: Decimal,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("symbol {0} not found in exchange info")]
    UnknownSymbol(String),

    #[error("quantity {quantity} is less than minimum quantity {min_quantity}")]
    BelowMinQuantity {
        quantity: Decimal,
        min_quantity: Decimal,
    },

    #[error("amount {requested} exceeds available balance {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("failed to decode exchange document: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type NormalizeResult<T> = std::result::Result<T, NormalizeError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load config file {path:?}: {source}")]
    Load {
        path: String,
        #[source]
        source: ini::Error,
    },

    #[error("required section {0:?} not found")]
    MissingSection(&'static str),

    #[error("section {section:?} missing required {key:?} entry")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    #[error("section {section:?} entry {key:?} has invalid value {value:?}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },
}
