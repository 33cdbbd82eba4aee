// Order quantity/price normalization against a pair's trading rules.
//
// Quantities are truncated down to the lot step and clamped up to the
// minimum quantity, prices are rounded to the tick, and priced orders are
// checked against the minimum notional before they may be sent upstream.
use crate::error::{NormalizeError, NormalizeResult};
use crate::tradingrules::{decimal_places, TradingRules};

use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Copy)]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Copy)]
pub enum OrderType {
    // Simple market order.
    Market,
    // Limit order.
    Limit,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("buy") {
            Ok(Side::Buy)
        } else if s.eq_ignore_ascii_case("sell") {
            Ok(Side::Sell)
        } else {
            Err(NormalizeError::InvalidRequest(format!(
                "unsupported order side {:?}, use BUY or SELL",
                s
            )))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub raw_quantity: Decimal,
    pub raw_price: Option<Decimal>, // None for market orders.
    pub side: Side,
}

impl OrderRequest {
    pub fn market(side: Side, raw_quantity: Decimal) -> OrderRequest {
        OrderRequest {
            raw_quantity,
            raw_price: None,
            side,
        }
    }

    pub fn limit(side: Side, raw_quantity: Decimal, raw_price: Decimal) -> OrderRequest {
        OrderRequest {
            raw_quantity,
            raw_price: Some(raw_price),
            side,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOrder {
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub side: Side,
    pub notional: Option<Decimal>, // quantity * price, priced orders only.
}

impl NormalizedOrder {
    pub fn order_type(&self) -> OrderType {
        match self.price {
            Some(_) => OrderType::Limit,
            None => OrderType::Market,
        }
    }
}

// Largest multiple of the step not above value. Exact for non-negative
// values, no intermediate division.
pub fn truncate_to_step(value: Decimal, rules: &TradingRules) -> NormalizeResult<Decimal> {
    let step = rules.quantity_step();
    if step <= Decimal::ZERO {
        return Err(NormalizeError::InvalidRule(format!(
            "{} has non-positive step size {}",
            rules.symbol(),
            step
        )));
    }

    Ok((value - (value % step)).normalize())
}

// floor(raw_quantity / step) * step, never below the minimum quantity. A
// quantity smaller than the minimum is raised to it rather than rejected.
pub fn normalize_quantity(raw_quantity: Decimal, rules: &TradingRules) -> NormalizeResult<Decimal> {
    if raw_quantity <= Decimal::ZERO {
        return Err(NormalizeError::InvalidRequest(format!(
            "quantity must be positive, got {}",
            raw_quantity
        )));
    }

    let truncated = truncate_to_step(raw_quantity, rules)?;
    let quantity = truncated.max(rules.min_quantity().normalize());

    debug!(
        "{}: quantity {} -> {} (step {}, min {})",
        rules.symbol(),
        raw_quantity,
        quantity,
        rules.quantity_step(),
        rules.min_quantity()
    );
    Ok(quantity)
}

// Round half-up to the nearest multiple of the tick, expressed with the
// tick's number of fractional digits.
pub fn normalize_price(raw_price: Decimal, rules: &TradingRules) -> NormalizeResult<Decimal> {
    let tick = match rules.price_tick() {
        Some(t) if t > Decimal::ZERO => t,
        Some(t) => {
            return Err(NormalizeError::InvalidRule(format!(
                "{} has non-positive tick size {}",
                rules.symbol(),
                t
            )))
        }
        None => {
            return Err(NormalizeError::InvalidRule(format!(
                "{} has no tick size, cannot price the order",
                rules.symbol()
            )))
        }
    };

    if raw_price <= Decimal::ZERO {
        return Err(NormalizeError::InvalidRequest(format!(
            "price must be positive, got {}",
            raw_price
        )));
    }

    let dps = decimal_places(tick);
    let ticks = raw_price
        .checked_div(tick)
        .ok_or_else(|| {
            NormalizeError::InvalidRequest(format!("price {} out of range", raw_price))
        })?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let price = ticks
        .checked_mul(tick)
        .ok_or_else(|| {
            NormalizeError::InvalidRequest(format!("price {} out of range", raw_price))
        })?
        .round_dp(dps);

    debug!(
        "{}: price {} -> {} (tick {}, {} dps)",
        rules.symbol(),
        raw_price,
        price,
        tick,
        dps
    );
    Ok(price)
}

pub fn normalize_order(request: &OrderRequest, rules: &TradingRules) -> NormalizeResult<NormalizedOrder> {
    let quantity = normalize_quantity(request.raw_quantity, rules)?;

    let price = match request.raw_price {
        Some(p) => Some(normalize_price(p, rules)?),
        None => None,
    };

    let notional = match price {
        Some(p) => Some(quantity.checked_mul(p).ok_or_else(|| {
            NormalizeError::InvalidRequest(format!("order value of {} @ {} out of range", quantity, p))
        })?),
        None => None,
    };

    if let (Some(n), Some(min_notional)) = (notional, rules.min_notional()) {
        if n < min_notional {
            return Err(NormalizeError::NotionalTooSmall {
                notional: n,
                min_notional,
            });
        }
    }

    debug!(
        "[{}] {}: normalized order {} @ {:?}",
        request.side,
        rules.symbol(),
        quantity,
        price
    );

    Ok(NormalizedOrder {
        quantity,
        price,
        side: request.side,
        notional,
    })
}
