use crate::error::{NormalizeError, NormalizeResult};
use crate::exchangeinfo::{symbol_key, ExchangeInfo, SymbolInfo};

use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

// Trading constraints of a single pair, built once from the exchange
// metadata and passed to the normalizer by reference.
#[derive(Debug, PartialEq, Clone)]
pub struct TradingRules {
    symbol: String,
    base_asset: String,
    quote_asset: String,
    min_quantity: Decimal,         // Smallest amount we can buy/sell.
    quantity_step: Decimal,        // Quantity increment.
    price_tick: Option<Decimal>,   // Min price increment.
    min_notional: Option<Decimal>, // Min qty*price allowed.
}

// Number of fractional digits of a step or tick, ignoring trailing zeros
// (0.00100000 -> 3).
pub fn decimal_places(d: Decimal) -> u32 {
    d.normalize().scale()
}

// The exchange publishes 0 for a filter bound it does not enforce.
fn enforced(d: Option<Decimal>) -> Option<Decimal> {
    d.filter(|v| !v.is_zero())
}

impl TradingRules {
    pub fn new(
        symbol: &str,
        min_quantity: Decimal,
        quantity_step: Decimal,
        price_tick: Option<Decimal>,
        min_notional: Option<Decimal>,
    ) -> TradingRules {
        TradingRules {
            symbol: symbol_key(symbol),
            base_asset: String::new(),
            quote_asset: String::new(),
            min_quantity,
            quantity_step,
            price_tick,
            min_notional,
        }
    }

    pub fn from_symbol_info(info: &SymbolInfo) -> NormalizeResult<TradingRules> {
        let (min_quantity, quantity_step) = match info.lot_size() {
            Some(ls) => ls,
            None => {
                return Err(NormalizeError::InvalidRule(format!(
                    "{} has no LOT_SIZE filter",
                    info.symbol
                )))
            }
        };

        if quantity_step <= Decimal::ZERO {
            return Err(NormalizeError::InvalidRule(format!(
                "{} has non-positive step size {}",
                info.symbol, quantity_step
            )));
        }

        if min_quantity.is_sign_negative() {
            return Err(NormalizeError::InvalidRule(format!(
                "{} has negative minimum quantity {}",
                info.symbol, min_quantity
            )));
        }

        let rules = TradingRules {
            symbol: info.symbol.clone(),
            base_asset: info.baseAsset.clone(),
            quote_asset: info.quoteAsset.clone(),
            min_quantity: min_quantity.normalize(),
            quantity_step: quantity_step.normalize(),
            price_tick: enforced(info.tick_size()).map(|t| t.normalize()),
            min_notional: enforced(info.min_notional()).map(|n| n.normalize()),
        };

        debug!("trading rules for {}: {:?}", rules.symbol, rules);
        Ok(rules)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn base_asset(&self) -> &str {
        &self.base_asset
    }

    pub fn quote_asset(&self) -> &str {
        &self.quote_asset
    }

    pub fn min_quantity(&self) -> Decimal {
        self.min_quantity
    }

    pub fn quantity_step(&self) -> Decimal {
        self.quantity_step
    }

    pub fn price_tick(&self) -> Option<Decimal> {
        self.price_tick
    }

    pub fn min_notional(&self) -> Option<Decimal> {
        self.min_notional
    }

    pub fn quantity_precision(&self) -> u32 {
        decimal_places(self.quantity_step)
    }

    pub fn price_precision(&self) -> Option<u32> {
        self.price_tick.map(decimal_places)
    }
}

// Trading rules of every symbol in an exchangeInfo document, indexed by
// symbol.
#[derive(Debug, Default)]
pub struct RulesBook {
    rules: HashMap<String, TradingRules>,
}

impl RulesBook {
    pub fn from_exchange_info(info: &ExchangeInfo) -> RulesBook {
        let mut rules = HashMap::with_capacity(info.symbols.len());
        for s in &info.symbols {
            match TradingRules::from_symbol_info(s) {
                Ok(r) => {
                    rules.insert(s.symbol.clone(), r);
                }
                Err(e) => {
                    warn!("skipping {}: {}", s.symbol, e);
                }
            }
        }

        debug!("loaded trading rules for {} symbols", rules.len());
        RulesBook { rules }
    }

    pub fn get(&self, symbol: &str) -> NormalizeResult<&TradingRules> {
        let key = symbol_key(symbol);
        self.rules
            .get(&key)
            .ok_or(NormalizeError::UnknownSymbol(key))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fixture() -> ExchangeInfo {
        ExchangeInfo::from_json(include_str!("../data/exchange_info.json")).unwrap()
    }

    #[test]
    fn from_symbol_info() {
        let info = fixture();
        let tr = TradingRules::from_symbol_info(info.symbol("BTC/USDT").unwrap()).unwrap();
        assert_eq!(tr.symbol(), "BTCUSDT");
        assert_eq!(tr.base_asset(), "BTC");
        assert_eq!(tr.quote_asset(), "USDT");
        assert_eq!(tr.min_quantity(), dec!(0.00001));
        assert_eq!(tr.quantity_step(), dec!(0.00001));
        assert_eq!(tr.price_tick(), Some(dec!(0.01)));
        assert_eq!(tr.min_notional(), Some(dec!(5)));
        assert_eq!(tr.quantity_precision(), 5);
        assert_eq!(tr.price_precision(), Some(2));
    }

    #[test]
    fn precision_ignores_trailing_zeros() {
        assert_eq!(decimal_places(dec!(0.00010000)), 4);
        assert_eq!(decimal_places(dec!(1.00000000)), 0);
        assert_eq!(decimal_places(dec!(0.1)), 1);
    }

    #[test]
    fn missing_lot_size_is_invalid() {
        let doc = r#"{"symbols": [{"symbol": "XYZUSDT", "baseAsset": "XYZ", "quoteAsset": "USDT",
            "filters": [{"filterType": "PRICE_FILTER", "tickSize": "0.01"}]}]}"#;
        let info = ExchangeInfo::from_json(doc).unwrap();
        match TradingRules::from_symbol_info(&info.symbols[0]) {
            Err(NormalizeError::InvalidRule(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }

        // The rules book skips the broken symbol instead of failing.
        let book = RulesBook::from_exchange_info(&info);
        assert!(book.is_empty());
    }

    #[test]
    fn zero_bounds_are_not_enforced() {
        let doc = r#"{"symbols": [{"symbol": "XYZUSDT", "baseAsset": "XYZ", "quoteAsset": "USDT",
            "filters": [
                {"filterType": "PRICE_FILTER", "minPrice": "0", "maxPrice": "0", "tickSize": "0.00000000"},
                {"filterType": "LOT_SIZE", "minQty": "0.1", "stepSize": "0.1"},
                {"filterType": "NOTIONAL", "minNotional": "0.00000000"}
            ]}]}"#;
        let info = ExchangeInfo::from_json(doc).unwrap();
        let tr = TradingRules::from_symbol_info(&info.symbols[0]).unwrap();
        assert_eq!(tr.price_tick(), None);
        assert_eq!(tr.min_notional(), None);
    }

    #[test]
    fn zero_step_is_invalid() {
        let doc = r#"{"symbols": [{"symbol": "XYZUSDT", "baseAsset": "XYZ", "quoteAsset": "USDT",
            "filters": [{"filterType": "LOT_SIZE", "minQty": "0.1", "stepSize": "0"}]}]}"#;
        let info = ExchangeInfo::from_json(doc).unwrap();
        assert!(TradingRules::from_symbol_info(&info.symbols[0]).is_err());
    }

    #[test]
    fn rules_book_lookup() {
        let book = RulesBook::from_exchange_info(&fixture());
        assert_eq!(book.len(), 3);
        assert_eq!(book.get("doge/usdt").unwrap().symbol(), "DOGEUSDT");
        match book.get("ETHUSDT") {
            Err(NormalizeError::UnknownSymbol(s)) => assert_eq!(s, "ETHUSDT"),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
