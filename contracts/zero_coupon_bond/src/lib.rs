//! Zero-Coupon Bond Ledger
//!
//! A fixed supply of bond shares is minted once to the issuer. The issuer
//! (or anyone on their behalf) pays the payment token into the ledger, and
//! holders redeem shares pro-rata against whatever has been paid.
//!
//! ## Redemption rules
//!
//! - Fully paid (`amount_unpaid == 0`): redeem any time at 1 share = 1 unit.
//! - Grace period over: redeem at `floor(bonds × balance / supply)`.
//! - Otherwise redemption is blocked.
//!
//! Payouts always round down so aggregate payouts never exceed the balance.

#![no_std]

mod error;
mod events;
mod guard;
mod math;
mod shares;
mod storage;
mod validation;




#[cfg(test)]
mod test_shares;

pub use error::Error;
pub use storage::{BondState, GRACE_PERIOD, MAX_DECIMALS, MAX_TIME_TO_MATURITY};

use events::*;
use guard::non_reentrant;
use shares::Shares;
use storage::Storage;
use validation::Validator;

use soroban_sdk::{contract, contractimpl, token, Address, Env, String, Symbol};

#[contract]
pub struct ZeroCouponBond;

#[contractimpl]
impl ZeroCouponBond {
    // ============================================
    // INITIALIZATION & OWNERSHIP
    // ============================================

    /// One-time setup: records the bond terms and mints `max_supply`
    /// shares to `owner`.
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Bond already initialized
    /// - `ZeroAmount` / `InvalidAmount`: `max_supply` not positive
    /// - `InvalidMaturity`: Maturity not in (now, now + MAX_TIME_TO_MATURITY]
    /// - `TooManyDecimals`: Payment token exceeds MAX_DECIMALS
    pub fn initialize(
        env: Env,
        name: String,
        symbol: String,
        owner: Address,
        maturity: u64,
        payment_token: Address,
        max_supply: i128,
    ) -> Result<(), Error> {
        if Storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        owner.require_auth();

        let now = env.ledger().timestamp();
        let payment_decimals = token::Client::new(&env, &payment_token).decimals();
        Validator::validate_terms(now, maturity, max_supply, payment_decimals)?;

        Storage::set_initialized(&env);
        Storage::set_owner(&env, &owner);
        Storage::set_terms(
            &env,
            &name,
            &symbol,
            maturity,
            &payment_token,
            payment_decimals,
        );

        Shares::mint(&env, &owner, max_supply)?;

        env.events().publish(
            (Symbol::new(&env, "initialized"), owner.clone()),
            InitializedEvent {
                owner,
                name,
                symbol,
                maturity,
                payment_token,
                max_supply,
            },
        );

        Ok(())
    }

    /// Hand owner-only operations to `new_owner`.
    ///
    /// # Errors
    /// - `NotInitialized`: Bond not initialized
    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), Error> {
        let owner = Storage::get_owner(&env)?;
        owner.require_auth();

        Storage::set_owner(&env, &new_owner);

        env.events().publish(
            (Symbol::new(&env, "ownership_transferred"), owner.clone()),
            OwnershipTransferredEvent {
                previous_owner: owner,
                new_owner,
            },
        );

        Ok(())
    }

    // ============================================
    // ISSUER: PAYMENT
    // ============================================

    /// Pay `amount` of the payment token into the bond.
    ///
    /// Open to any payer. The credited amount is the measured balance
    /// delta, so fee-on-transfer tokens are accounted for what arrived.
    ///
    /// # Errors
    /// - `NotInitialized`: Bond not initialized
    /// - `PaymentAlreadyMet`: Bond already fully paid
    /// - `ZeroAmount` / `InvalidAmount`: `amount` not positive
    pub fn pay(env: Env, from: Address, amount: i128) -> Result<i128, Error> {
        non_reentrant(&env, || {
            let payment = Self::payment_client(&env)?;
            let this = env.current_contract_address();

            let balance_before = payment.balance(&this);
            let total_supply = Storage::get_total_supply(&env);
            if math::amount_unpaid(total_supply, balance_before) == 0 {
                return Err(Error::PaymentAlreadyMet);
            }

            Validator::check_amount(amount)?;

            from.require_auth();

            payment.transfer(&from, &this, &amount);

            let credited = payment
                .balance(&this)
                .checked_sub(balance_before)
                .ok_or(Error::ArithmeticOverflow)?;

            env.events().publish(
                (Symbol::new(&env, "payment"), from.clone()),
                PaymentEvent {
                    from: from.clone(),
                    amount: credited,
                },
            );

            Ok(credited)
        })
    }

    /// Send the surplus above full 1:1 coverage to `receiver`.
    ///
    /// # Errors
    /// - `NotInitialized`: Bond not initialized
    /// - `NoPaymentToWithdraw`: Nothing above total supply
    /// - `ReentrantCall`: Guarded operation already in flight
    pub fn withdraw_excess_payment(env: Env, receiver: Address) -> Result<i128, Error> {
        let owner = Storage::get_owner(&env)?;
        owner.require_auth();

        non_reentrant(&env, || {
            let overpayment = Self::excess_payment_internal(&env)?;
            if overpayment == 0 {
                return Err(Error::NoPaymentToWithdraw);
            }

            let payment_token = Storage::get_payment_token(&env)?;
            token::Client::new(&env, &payment_token).transfer(
                &env.current_contract_address(),
                &receiver,
                &overpayment,
            );

            env.events().publish(
                (Symbol::new(&env, "excess_withdrawn"), receiver.clone()),
                ExcessWithdrawnEvent {
                    payment_token,
                    receiver: receiver.clone(),
                    amount: overpayment,
                },
            );

            Ok(overpayment)
        })
    }

    /// Send the bond's entire balance of `sweeping_token` to `receiver`.
    ///
    /// Refused when the transfer moves the payment balance, which catches
    /// the payment token itself and any proxy sharing its balances. Shares
    /// sent to the bond's own address are swept through the share registry.
    ///
    /// # Errors
    /// - `NotInitialized`: Bond not initialized
    /// - `ZeroAmount`: Nothing to sweep
    /// - `SweepDisallowedForToken`: Token is coupled to the payment token
    pub fn sweep(env: Env, sweeping_token: Address, receiver: Address) -> Result<i128, Error> {
        let owner = Storage::get_owner(&env)?;
        owner.require_auth();

        non_reentrant(&env, || {
            let this = env.current_contract_address();
            // Own shares are moved in the registry; calling ourselves would re-enter
            let own_shares = sweeping_token == this;

            let sweep_amount = if own_shares {
                Storage::get_balance(&env, &this)
            } else {
                token::Client::new(&env, &sweeping_token).balance(&this)
            };
            if sweep_amount <= 0 {
                return Err(Error::ZeroAmount);
            }

            let payment_before = Self::payment_balance_internal(&env)?;
            if own_shares {
                Shares::transfer(&env, &this, &receiver, sweep_amount)?;
            } else {
                token::Client::new(&env, &sweeping_token).transfer(&this, &receiver, &sweep_amount);
            }
            let payment_after = Self::payment_balance_internal(&env)?;

            if payment_before != payment_after {
                return Err(Error::SweepDisallowedForToken);
            }

            env.events().publish(
                (Symbol::new(&env, "token_sweep"), receiver.clone()),
                TokenSweepEvent {
                    token: sweeping_token.clone(),
                    receiver: receiver.clone(),
                    amount: sweep_amount,
                },
            );

            Ok(sweep_amount)
        })
    }

    // ============================================
    // HOLDER: REDEEM / CONVERT
    // ============================================

    /// Burn `bonds` shares and receive their pro-rata share of the payment
    /// balance. Returns the payment units sent.
    ///
    /// # Errors
    /// - `NotInitialized`: Bond not initialized
    /// - `BondBeforeGracePeriodAndNotPaid`: Not fully paid and grace period running
    /// - `ZeroAmount`: `bonds` is zero or the payout rounds to zero
    /// - `InsufficientBalance`: Holder has fewer than `bonds` shares
    /// - `ReentrantCall`: Guarded operation already in flight
    pub fn redeem(env: Env, holder: Address, bonds: i128) -> Result<i128, Error> {
        non_reentrant(&env, || {
            let now = env.ledger().timestamp();
            let total_supply = Storage::get_total_supply(&env);
            let balance = Self::payment_balance_internal(&env)?;

            // Redemption window is checked before the amount
            let fully_paid = math::amount_unpaid(total_supply, balance) == 0;
            if !fully_paid && now < Self::grace_period_end_internal(&env)? {
                return Err(Error::BondBeforeGracePeriodAndNotPaid);
            }

            Validator::check_amount(bonds)?;

            holder.require_auth();

            if Storage::get_balance(&env, &holder) < bonds {
                return Err(Error::InsufficientBalance);
            }

            let payment_to_send = math::redeemable_payment(&env, bonds, total_supply, balance)?;
            if payment_to_send == 0 {
                return Err(Error::ZeroAmount);
            }

            // Burn before the external transfer
            Shares::burn(&env, &holder, bonds)?;

            let payment_token = Storage::get_payment_token(&env)?;
            token::Client::new(&env, &payment_token).transfer(
                &env.current_contract_address(),
                &holder,
                &payment_to_send,
            );

            env.events().publish(
                (Symbol::new(&env, "redeem"), holder.clone()),
                RedeemEvent {
                    holder: holder.clone(),
                    payment_token,
                    bonds_redeemed: bonds,
                    payment_sent: payment_to_send,
                },
            );

            Ok(payment_to_send)
        })
    }

    /// Burn `bonds` shares before maturity. This variant carries no
    /// convertible asset, so nothing is paid out.
    ///
    /// # Errors
    /// - `NotInitialized`: Bond not initialized
    /// - `ZeroAmount` / `InvalidAmount`: `bonds` not positive
    /// - `BondPastMaturity`: Called at or after maturity
    /// - `InsufficientBalance`: Holder has fewer than `bonds` shares
    pub fn convert(env: Env, holder: Address, bonds: i128) -> Result<(), Error> {
        Validator::check_amount(bonds)?;

        let maturity = Storage::get_maturity(&env)?;
        if env.ledger().timestamp() >= maturity {
            return Err(Error::BondPastMaturity);
        }

        holder.require_auth();

        Shares::burn(&env, &holder, bonds)?;

        env.events().publish(
            (Symbol::new(&env, "convert"), holder.clone()),
            ConvertEvent {
                holder,
                bonds_burned: bonds,
            },
        );

        Ok(())
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Payment still required for full 1:1 coverage of outstanding shares.
    pub fn amount_unpaid(env: Env) -> Result<i128, Error> {
        let balance = Self::payment_balance_internal(&env)?;
        Ok(math::amount_unpaid(Storage::get_total_supply(&env), balance))
    }

    pub fn is_mature(env: Env) -> Result<bool, Error> {
        Ok(env.ledger().timestamp() >= Storage::get_maturity(&env)?)
    }

    pub fn is_after_grace_period(env: Env) -> Result<bool, Error> {
        Ok(env.ledger().timestamp() >= Self::grace_period_end_internal(&env)?)
    }

    pub fn grace_period_end(env: Env) -> Result<u64, Error> {
        Self::grace_period_end_internal(&env)
    }

    /// Live payment-token balance held by the bond.
    pub fn payment_balance(env: Env) -> Result<i128, Error> {
        Self::payment_balance_internal(&env)
    }

    /// Payment units `bonds` shares would receive right now, rounded down.
    pub fn preview_redeem_at_maturity(env: Env, bonds: i128) -> Result<i128, Error> {
        let balance = Self::payment_balance_internal(&env)?;
        math::redeemable_payment(&env, bonds, Storage::get_total_supply(&env), balance)
    }

    /// Surplus the owner could withdraw right now.
    pub fn preview_withdraw_excess_payment(env: Env) -> Result<i128, Error> {
        Self::excess_payment_internal(&env)
    }

    /// Current lifecycle phase. Full payment takes precedence over timing.
    pub fn state(env: Env) -> Result<BondState, Error> {
        let now = env.ledger().timestamp();
        let maturity = Storage::get_maturity(&env)?;
        let balance = Self::payment_balance_internal(&env)?;

        let state = if math::amount_unpaid(Storage::get_total_supply(&env), balance) == 0 {
            BondState::FullyPaid
        } else if now >= Self::grace_period_end_internal(&env)? {
            BondState::MaturedGracePassed
        } else if now >= maturity {
            BondState::MaturedUnpaid
        } else {
            BondState::Active
        };

        Ok(state)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Storage::get_owner(&env)
    }

    pub fn maturity(env: Env) -> Result<u64, Error> {
        Storage::get_maturity(&env)
    }

    pub fn payment_token(env: Env) -> Result<Address, Error> {
        Storage::get_payment_token(&env)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Storage::get_name(&env)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Storage::get_symbol(&env)
    }

    /// Same precision as the payment token: one share is one payment unit.
    pub fn decimals(env: Env) -> Result<u32, Error> {
        Storage::get_decimals(&env)
    }

    pub fn total_supply(env: Env) -> i128 {
        Storage::get_total_supply(&env)
    }

    // ============================================
    // SHARE REGISTRY
    // ============================================

    pub fn balance(env: Env, id: Address) -> i128 {
        Storage::get_balance(&env, &id)
    }

    /// # Errors
    /// - `ZeroAmount` / `InvalidAmount`: `amount` not positive
    /// - `InsufficientBalance`: Not enough shares
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        Shares::transfer(&env, &from, &to, amount)
    }

    /// # Errors
    /// - `InvalidAmount`: Negative allowance
    /// - `InvalidLedgerSequence`: Expiry before the current ledger
    pub fn approve(
        env: Env,
        from: Address,
        spender: Address,
        amount: i128,
        live_until_ledger: u32,
    ) -> Result<(), Error> {
        from.require_auth();
        Shares::approve(&env, &from, &spender, amount, live_until_ledger)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        Shares::allowance(&env, &from, &spender)
    }

    /// # Errors
    /// - `ZeroAmount` / `InvalidAmount`: `amount` not positive
    /// - `InsufficientAllowance`: Spender allowance too low
    /// - `InsufficientBalance`: Not enough shares
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        spender.require_auth();
        Validator::check_amount(amount)?;
        Shares::spend_allowance(&env, &from, &spender, amount)?;
        Shares::transfer(&env, &from, &to, amount)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn payment_client(env: &Env) -> Result<token::Client<'_>, Error> {
        let payment_token = Storage::get_payment_token(env)?;
        Ok(token::Client::new(env, &payment_token))
    }

    fn payment_balance_internal(env: &Env) -> Result<i128, Error> {
        Ok(Self::payment_client(env)?.balance(&env.current_contract_address()))
    }

    fn excess_payment_internal(env: &Env) -> Result<i128, Error> {
        let balance = Self::payment_balance_internal(env)?;
        Ok(math::excess_payment(Storage::get_total_supply(env), balance))
    }

    fn grace_period_end_internal(env: &Env) -> Result<u64, Error> {
        Storage::get_maturity(env)?
            .checked_add(GRACE_PERIOD)
            .ok_or(Error::ArithmeticOverflow)
    }
}
