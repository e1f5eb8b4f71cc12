use crate::error::Error;
use soroban_sdk::{contracttype, Address, Env, String};

// Constants
pub const GRACE_PERIOD: u64 = 7 * 24 * 60 * 60; // 7 days
pub const MAX_DECIMALS: u32 = 18;
pub const MAX_TIME_TO_MATURITY: u64 = 3650 * 24 * 60 * 60; // ~10 years

/// Lifecycle phase derived from the ledger clock and the payment balance.
/// Never stored.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BondState {
    /// Before maturity and not fully paid
    Active = 0,
    /// Past maturity, not fully paid, still inside the grace period
    MaturedUnpaid = 1,
    /// Grace period over; redemption open at whatever is in the ledger
    MaturedGracePassed = 2,
    /// Payment balance covers every outstanding share 1:1. Also reported
    /// before maturity when the issuer pays early.
    FullyPaid = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceValue {
    pub amount: i128,
    pub live_until_ledger: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Owner,
    PaymentToken,
    Maturity,
    Name,
    Symbol,
    Decimals,
    TotalSupply,
    Locked,
    Balance(Address),
    Allowance(AllowanceKey),
}

pub struct Storage;

impl Storage {
    // Lifecycle flags
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().instance().set(&DataKey::Initialized, &true);
    }

    pub fn is_locked(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Locked)
            .unwrap_or(false)
    }

    pub fn set_locked(env: &Env, locked: bool) {
        env.storage().instance().set(&DataKey::Locked, &locked);
    }

    // Owner
    pub fn get_owner(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Owner)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_owner(env: &Env, owner: &Address) {
        env.storage().instance().set(&DataKey::Owner, owner);
    }

    // Bond terms
    pub fn get_payment_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_maturity(env: &Env) -> Result<u64, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Maturity)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_decimals(env: &Env) -> Result<u32, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Decimals)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_name(env: &Env) -> Result<String, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Name)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_symbol(env: &Env) -> Result<String, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Symbol)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_terms(
        env: &Env,
        name: &String,
        symbol: &String,
        maturity: u64,
        payment_token: &Address,
        decimals: u32,
    ) {
        env.storage().instance().set(&DataKey::Name, name);
        env.storage().instance().set(&DataKey::Symbol, symbol);
        env.storage().instance().set(&DataKey::Maturity, &maturity);
        env.storage()
            .instance()
            .set(&DataKey::PaymentToken, payment_token);
        env.storage().instance().set(&DataKey::Decimals, &decimals);
    }

    // Share supply
    pub fn get_total_supply(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn set_total_supply(env: &Env, supply: i128) {
        env.storage().instance().set(&DataKey::TotalSupply, &supply);
    }

    // Share balances
    pub fn get_balance(env: &Env, id: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(id.clone()))
            .unwrap_or(0)
    }

    pub fn set_balance(env: &Env, id: &Address, amount: i128) {
        let key = DataKey::Balance(id.clone());
        if amount == 0 {
            env.storage().persistent().remove(&key);
            return;
        }
        let max_ttl = env.storage().max_ttl();
        env.storage().persistent().set(&key, &amount);
        env.storage().persistent().extend_ttl(&key, max_ttl, max_ttl);
    }

    // Allowances
    pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> Option<AllowanceValue> {
        env.storage()
            .persistent()
            .get(&DataKey::Allowance(AllowanceKey {
                from: from.clone(),
                spender: spender.clone(),
            }))
    }

    pub fn set_allowance(env: &Env, from: &Address, spender: &Address, value: &AllowanceValue) {
        let key = DataKey::Allowance(AllowanceKey {
            from: from.clone(),
            spender: spender.clone(),
        });
        if value.amount == 0 {
            env.storage().persistent().remove(&key);
            return;
        }
        let max_ttl = env.storage().max_ttl();
        env.storage().persistent().set(&key, value);
        env.storage().persistent().extend_ttl(&key, max_ttl, max_ttl);
    }
}
