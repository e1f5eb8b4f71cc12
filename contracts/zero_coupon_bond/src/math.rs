use crate::error::Error;
use soroban_sdk::{Env, U256};

/// Fixed-point `floor(a × b / denominator)`
///
/// The product is formed in 256 bits on the host, so `bonds × paid_amount`
/// cannot overflow even when both sides carry 18 decimals.
pub fn mul_div_down(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    if a < 0 || b < 0 {
        return Err(Error::InvalidAmount);
    }
    if denominator <= 0 {
        return Err(Error::ArithmeticOverflow);
    }

    let product = U256::from_u128(env, a as u128).mul(&U256::from_u128(env, b as u128));
    let quotient = product.div(&U256::from_u128(env, denominator as u128));

    let quotient = quotient.to_u128().ok_or(Error::ArithmeticOverflow)?;
    i128::try_from(quotient).map_err(|_| Error::ArithmeticOverflow)
}

/// Payment still needed to cover every outstanding share 1:1
///
/// Formula: unpaid = max(0, total_supply - payment_balance)
pub fn amount_unpaid(total_supply: i128, payment_balance: i128) -> i128 {
    total_supply.saturating_sub(payment_balance).max(0)
}

/// Payment held above what full 1:1 coverage requires
///
/// Formula: excess = max(0, payment_balance - total_supply)
pub fn excess_payment(total_supply: i128, payment_balance: i128) -> i128 {
    payment_balance.saturating_sub(total_supply).max(0)
}

/// Payment units owed for `bonds` shares
///
/// Formula: payout = floor(bonds × paid_amount / total_supply)
/// where paid_amount is total_supply once fully paid, else the live balance.
///
/// Example:
/// - total_supply: 1,000, payment_balance: 500
/// - redeem 100 → floor(100 × 500 / 1,000) = 50
pub fn redeemable_payment(
    env: &Env,
    bonds: i128,
    total_supply: i128,
    payment_balance: i128,
) -> Result<i128, Error> {
    if total_supply == 0 {
        return Ok(0);
    }

    let paid_amount = if amount_unpaid(total_supply, payment_balance) == 0 {
        total_supply
    } else {
        payment_balance
    };

    mul_div_down(env, bonds, paid_amount, total_supply)
}
