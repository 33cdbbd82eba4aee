// structures and routines related to account balance information.
use crate::error::NormalizeResult;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Balance {
    pub asset: String,
    pub free: Decimal,
    pub locked: Decimal,
}

impl Balance {
    pub fn from_json(doc: &str) -> NormalizeResult<Balance> {
        let b: Balance = serde_json::from_str(doc)?;
        Ok(b)
    }

    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }
}
