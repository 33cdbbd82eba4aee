// structures describing the exchangeInfo document and its symbol filters.
use crate::error::NormalizeResult;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "filterType")]
#[allow(non_snake_case)]
pub enum SymbolFilter {
    #[serde(rename = "PRICE_FILTER")]
    PriceFilter {
        #[serde(default)]
        minPrice: Option<Decimal>,
        #[serde(default)]
        maxPrice: Option<Decimal>,
        tickSize: Decimal,
    },

    #[serde(rename = "LOT_SIZE")]
    LotSize {
        minQty: Decimal,
        #[serde(default)]
        maxQty: Option<Decimal>,
        stepSize: Decimal,
    },

    // Older symbols still publish MIN_NOTIONAL, newer ones NOTIONAL.
    #[serde(rename = "MIN_NOTIONAL")]
    MinNotional { minNotional: Decimal },

    #[serde(rename = "NOTIONAL")]
    Notional { minNotional: Decimal },

    // ICEBERG_PARTS, MARKET_LOT_SIZE, PERCENT_PRICE_BY_SIDE...
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[allow(non_snake_case)]
pub struct SymbolInfo {
    pub symbol: String,
    #[serde(default)]
    pub status: Option<String>,
    pub baseAsset: String,
    pub quoteAsset: String,
    pub filters: Vec<SymbolFilter>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ExchangeInfo {
    #[serde(default)]
    pub timezone: Option<String>,
    pub symbols: Vec<SymbolInfo>,
}

// "DOGE/USDT" and "DOGEUSDT" both name the same symbol.
pub fn symbol_key(name: &str) -> String {
    name.replace("/", "").to_ascii_uppercase()
}

impl SymbolInfo {
    pub fn lot_size(&self) -> Option<(Decimal, Decimal)> {
        self.filters.iter().find_map(|f| match f {
            SymbolFilter::LotSize {
                minQty, stepSize, ..
            } => Some((*minQty, *stepSize)),
            _ => None,
        })
    }

    pub fn tick_size(&self) -> Option<Decimal> {
        self.filters.iter().find_map(|f| match f {
            SymbolFilter::PriceFilter { tickSize, .. } => Some(*tickSize),
            _ => None,
        })
    }

    pub fn min_notional(&self) -> Option<Decimal> {
        self.filters.iter().find_map(|f| match f {
            SymbolFilter::Notional { minNotional } | SymbolFilter::MinNotional { minNotional } => {
                Some(*minNotional)
            }
            _ => None,
        })
    }
}

impl ExchangeInfo {
    pub fn from_json(doc: &str) -> NormalizeResult<ExchangeInfo> {
        let info: ExchangeInfo = serde_json::from_str(doc)?;
        Ok(info)
    }

    pub fn symbol(&self, name: &str) -> Option<&SymbolInfo> {
        let key = symbol_key(name);
        self.symbols.iter().find(|s| s.symbol == key)
    }
}
