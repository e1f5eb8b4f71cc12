use crate::error::Error;
use crate::events::{ApproveEvent, TransferEvent};
use crate::storage::{AllowanceValue, Storage};
use crate::validation::Validator;
use soroban_sdk::{Address, Env, Symbol};

/// Bond share registry owned by the ledger.
///
/// Supply is created once by `mint` during initialization and only ever
/// shrinks through `burn` on redeem/convert.
pub struct Shares;

impl Shares {
    pub fn mint(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
        Validator::check_amount(amount)?;

        let new_balance = Storage::get_balance(env, to)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        let new_supply = Storage::get_total_supply(env)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;

        Storage::set_balance(env, to, new_balance);
        Storage::set_total_supply(env, new_supply);

        Ok(())
    }

    pub fn burn(env: &Env, from: &Address, amount: i128) -> Result<(), Error> {
        Validator::check_amount(amount)?;

        let balance = Storage::get_balance(env, from);
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let new_supply = Storage::get_total_supply(env)
            .checked_sub(amount)
            .ok_or(Error::ArithmeticOverflow)?;

        Storage::set_balance(env, from, balance - amount);
        Storage::set_total_supply(env, new_supply);

        Ok(())
    }

    pub fn transfer(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
        Validator::check_amount(amount)?;

        let from_balance = Storage::get_balance(env, from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }

        // Self-transfer leaves balances untouched
        if from != to {
            let new_to_balance = Storage::get_balance(env, to)
                .checked_add(amount)
                .ok_or(Error::ArithmeticOverflow)?;

            Storage::set_balance(env, from, from_balance - amount);
            Storage::set_balance(env, to, new_to_balance);
        }

        env.events().publish(
            (Symbol::new(env, "transfer"), from.clone(), to.clone()),
            TransferEvent {
                from: from.clone(),
                to: to.clone(),
                amount,
            },
        );

        Ok(())
    }

    /// Live allowance; expired entries read as zero.
    pub fn allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
        match Storage::get_allowance(env, from, spender) {
            Some(value) if env.ledger().sequence() <= value.live_until_ledger => value.amount,
            _ => 0,
        }
    }

    pub fn approve(
        env: &Env,
        from: &Address,
        spender: &Address,
        amount: i128,
        live_until_ledger: u32,
    ) -> Result<(), Error> {
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        if amount > 0 && live_until_ledger < env.ledger().sequence() {
            return Err(Error::InvalidLedgerSequence);
        }

        Storage::set_allowance(
            env,
            from,
            spender,
            &AllowanceValue {
                amount,
                live_until_ledger,
            },
        );

        env.events().publish(
            (Symbol::new(env, "approve"), from.clone(), spender.clone()),
            ApproveEvent {
                from: from.clone(),
                spender: spender.clone(),
                amount,
                live_until_ledger,
            },
        );

        Ok(())
    }

    pub fn spend_allowance(
        env: &Env,
        from: &Address,
        spender: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        let current = Self::allowance(env, from, spender);
        if current < amount {
            return Err(Error::InsufficientAllowance);
        }

        if let Some(value) = Storage::get_allowance(env, from, spender) {
            Storage::set_allowance(
                env,
                from,
                spender,
                &AllowanceValue {
                    amount: current - amount,
                    live_until_ledger: value.live_until_ledger,
                },
            );
        }

        Ok(())
    }
}
