// Maker/taker commission rates of a symbol.
use crate::error::NormalizeResult;
use crate::order::Side;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// Rates are fractions of the traded amount, 0.001 is 0.1%.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[allow(non_snake_case)]
pub struct TradeFee {
    pub symbol: String,
    pub makerCommission: Decimal,
    pub takerCommission: Decimal,
}

impl TradeFee {
    pub fn new(symbol: &str, maker: Decimal, taker: Decimal) -> TradeFee {
        TradeFee {
            symbol: symbol.to_string(),
            makerCommission: maker,
            takerCommission: taker,
        }
    }

    // The trade fee endpoint answers with a list, one entry per symbol.
    pub fn list_from_json(doc: &str) -> NormalizeResult<Vec<TradeFee>> {
        let fees: Vec<TradeFee> = serde_json::from_str(doc)?;
        Ok(fees)
    }

    // Sells are charged the maker rate and buys the taker rate.
    pub fn rate_for(&self, side: Side) -> Decimal {
        match side {
            Side::Sell => self.makerCommission,
            Side::Buy => self.takerCommission,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decode_list() {
        let fees = TradeFee::list_from_json(
            r#"[{"symbol": "DOGEUSDT", "makerCommission": "0.001", "takerCommission": "0.0015"}]"#,
        )
        .unwrap();
        assert_eq!(fees.len(), 1);
        assert_eq!(fees[0].rate_for(Side::Sell), dec!(0.001));
        assert_eq!(fees[0].rate_for(Side::Buy), dec!(0.0015));
    }

    // The endpoint's rates are already fractions and are not divided by 100.
    #[test]
    fn rate_is_a_fraction() {
        let fee = TradeFee::new("DOGEUSDT", dec!(0.001), dec!(0.001));
        let charged = dec!(1000) * fee.rate_for(Side::Sell);
        assert_eq!(charged, dec!(1));
        assert_ne!(charged, dec!(0.01));
    }
}
