// Order sizing helpers: converting between quote and base amounts, working
// out how much of a balance can be sold and what a trade would cost in fees.
//
// Balances, prices and fee rates are supplied by the caller.
use crate::balance::Balance;
use crate::error::{NormalizeError, NormalizeResult};
use crate::fee::TradeFee;
use crate::order::{truncate_to_step, Side};
use crate::tradingrules::TradingRules;

use log::debug;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct TradeSimulation {
    pub trade_quantity: Decimal,
    pub fee: Decimal,
}

// BUY: how much base asset `amount` of quote asset buys at `price`.
// SELL: the quote proceeds of selling `amount` of base asset at `price`.
pub fn quantity_for_amount(amount: Decimal, price: Decimal, side: Side) -> NormalizeResult<Decimal> {
    if amount <= Decimal::ZERO || price <= Decimal::ZERO {
        return Err(NormalizeError::InvalidRequest(format!(
            "amount and price must be positive, got {} @ {}",
            amount, price
        )));
    }

    let out_of_range =
        || NormalizeError::InvalidRequest(format!("{} @ {} out of range", amount, price));
    let result = match side {
        Side::Buy => amount.checked_div(price).ok_or_else(out_of_range)?,
        Side::Sell => amount.checked_mul(price).ok_or_else(out_of_range)?,
    };

    debug!("[{}] {} @ {} -> {}", side, amount, price, result);
    Ok(result)
}

// Base quantity of a leveraged position: `amount` of quote asset times
// `leverage`, at `price`.
pub fn leveraged_quantity(amount: Decimal, leverage: u32, price: Decimal) -> NormalizeResult<Decimal> {
    if leverage == 0 {
        return Err(NormalizeError::InvalidRequest(
            "leverage must be at least 1".to_string(),
        ));
    }

    let exposure = amount.checked_mul(Decimal::from(leverage)).ok_or_else(|| {
        NormalizeError::InvalidRequest(format!("{} x{} out of range", amount, leverage))
    })?;
    quantity_for_amount(exposure, price, Side::Buy)
}

// The part of a free balance that can be sold in one order, or zero when
// that is below the minimum quantity.
pub fn max_sell_amount(free_balance: Decimal, rules: &TradingRules) -> NormalizeResult<Decimal> {
    if free_balance.is_sign_negative() {
        return Err(NormalizeError::InvalidRequest(format!(
            "negative balance {}",
            free_balance
        )));
    }

    let amount = truncate_to_step(free_balance, rules)?;
    if amount < rules.min_quantity() {
        debug!(
            "{}: max sell amount {} is less than min qty {}",
            rules.symbol(),
            amount,
            rules.min_quantity()
        );
        return Ok(Decimal::ZERO);
    }

    debug!("{}: max sell amount {}", rules.symbol(), amount);
    Ok(amount)
}

// Same as max_sell_amount, from the account balance of the pair's base asset.
pub fn max_sell_balance(balance: &Balance, rules: &TradingRules) -> NormalizeResult<Decimal> {
    if !rules.base_asset().is_empty() && balance.asset != rules.base_asset() {
        return Err(NormalizeError::InvalidRequest(format!(
            "{} balance cannot be sold on {}",
            balance.asset,
            rules.symbol()
        )));
    }

    debug!(
        "{}: available balance for {}: {}",
        rules.symbol(),
        balance.asset,
        balance.free
    );
    max_sell_amount(balance.free, rules)
}

fn tradable(amount: Decimal, rules: &TradingRules) -> NormalizeResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(NormalizeError::InvalidRequest(format!(
            "amount must be positive, got {}",
            amount
        )));
    }

    let quantity = truncate_to_step(amount, rules)?;
    if quantity < rules.min_quantity() {
        return Err(NormalizeError::BelowMinQuantity {
            quantity,
            min_quantity: rules.min_quantity(),
        });
    }

    Ok(quantity)
}

// Largest tradable quantity of `amount` and the fee charged for it. Unlike
// order normalization, an amount below the minimum is rejected.
pub fn simulate_trade(
    amount: Decimal,
    side: Side,
    rules: &TradingRules,
    fee: &TradeFee,
) -> NormalizeResult<TradeSimulation> {
    let trade_quantity = tradable(amount, rules)?;
    let rate = fee.rate_for(side);
    let fee = trade_quantity.checked_mul(rate).ok_or_else(|| {
        NormalizeError::InvalidRequest(format!(
            "fee of {} at rate {} out of range",
            trade_quantity, rate
        ))
    })?;

    debug!(
        "[{}] {}: max tradable amount {}, fee {}",
        side,
        rules.symbol(),
        trade_quantity,
        fee
    );
    Ok(TradeSimulation {
        trade_quantity,
        fee,
    })
}

pub fn max_sell_amount_with_fee(
    free_balance: Decimal,
    amount_to_sell: Decimal,
    rules: &TradingRules,
    fee: &TradeFee,
) -> NormalizeResult<TradeSimulation> {
    if amount_to_sell > free_balance {
        return Err(NormalizeError::InsufficientBalance {
            requested: amount_to_sell,
            available: free_balance,
        });
    }

    simulate_trade(amount_to_sell, Side::Sell, rules, fee)
}
