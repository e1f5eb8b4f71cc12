#![cfg(test)]

use crate::events::TransferEvent;
use crate::test_helpers::*;
use crate::Error;
use soroban_sdk::testutils::{Address as _, Events, Ledger, MockAuth, MockAuthInvoke};
use soroban_sdk::{Address, Env, IntoVal, TryFromVal};

fn set_sequence(env: &Env, sequence: u32) {
    env.ledger().with_mut(|li| li.sequence_number = sequence);
}

#[test]
fn test_transfer_moves_shares() {
    let env = Env::default();
    let t = setup(&env);
    let holder = Address::generate(&env);

    t.bond.transfer(&t.owner, &holder, &250);

    assert_eq!(t.bond.balance(&t.owner), 750);
    assert_eq!(t.bond.balance(&holder), 250);
    assert_eq!(t.bond.total_supply(), MAX_SUPPLY);
}

#[test]
fn test_transfer_publishes_event() {
    let env = Env::default();
    let t = setup(&env);
    let holder = Address::generate(&env);

    t.bond.transfer(&t.owner, &holder, &250);

    let (contract, _topics, data) = env.events().all().last().unwrap();
    assert_eq!(contract, t.bond.address);

    let event = TransferEvent::try_from_val(&env, &data).unwrap();
    assert_eq!(event.from, t.owner);
    assert_eq!(event.to, holder);
    assert_eq!(event.amount, 250);
}

#[test]
fn test_transfer_to_self_keeps_balance() {
    let env = Env::default();
    let t = setup(&env);

    t.bond.transfer(&t.owner, &t.owner, &400);

    assert_eq!(t.bond.balance(&t.owner), MAX_SUPPLY);
}

#[test]
fn test_transfer_more_than_balance_fails() {
    let env = Env::default();
    let t = setup(&env);
    let holder = Address::generate(&env);

    assert_eq!(
        t.bond.try_transfer(&t.owner, &holder, &(MAX_SUPPLY + 1)),
        Err(Ok(Error::InsufficientBalance))
    );
}

#[test]
fn test_transfer_zero_and_negative_fail() {
    let env = Env::default();
    let t = setup(&env);
    let holder = Address::generate(&env);

    assert_eq!(
        t.bond.try_transfer(&t.owner, &holder, &0),
        Err(Ok(Error::ZeroAmount))
    );
    assert_eq!(
        t.bond.try_transfer(&t.owner, &holder, &-5),
        Err(Ok(Error::InvalidAmount))
    );
}

#[test]
#[should_panic]
fn test_transfer_requires_sender_auth() {
    let env = Env::default();
    let t = setup(&env);
    let thief = Address::generate(&env);

    env.mock_auths(&[MockAuth {
        address: &thief,
        invoke: &MockAuthInvoke {
            contract: &t.bond.address,
            fn_name: "transfer",
            args: (t.owner.clone(), thief.clone(), 100_i128).into_val(&env),
            sub_invokes: &[],
        },
    }]);

    t.bond.transfer(&t.owner, &thief, &100);
}

#[test]
fn test_approve_and_transfer_from() {
    let env = Env::default();
    let t = setup(&env);
    let spender = Address::generate(&env);
    let receiver = Address::generate(&env);
    set_sequence(&env, 100);

    t.bond.approve(&t.owner, &spender, &300, &200);
    assert_eq!(t.bond.allowance(&t.owner, &spender), 300);

    t.bond.transfer_from(&spender, &t.owner, &receiver, &120);

    assert_eq!(t.bond.allowance(&t.owner, &spender), 180);
    assert_eq!(t.bond.balance(&receiver), 120);
    assert_eq!(t.bond.balance(&t.owner), 880);
    assert_eq!(t.bond.balance(&spender), 0);
}

#[test]
fn test_transfer_from_exceeding_allowance_fails() {
    let env = Env::default();
    let t = setup(&env);
    let spender = Address::generate(&env);
    set_sequence(&env, 100);

    t.bond.approve(&t.owner, &spender, &50, &200);

    assert_eq!(
        t.bond.try_transfer_from(&spender, &t.owner, &spender, &51),
        Err(Ok(Error::InsufficientAllowance))
    );
    assert_eq!(t.bond.allowance(&t.owner, &spender), 50);
}

#[test]
fn test_transfer_from_without_approval_fails() {
    let env = Env::default();
    let t = setup(&env);
    let spender = Address::generate(&env);

    assert_eq!(
        t.bond.try_transfer_from(&spender, &t.owner, &spender, &1),
        Err(Ok(Error::InsufficientAllowance))
    );
}

#[test]
fn test_transfer_from_beyond_owner_balance_fails() {
    let env = Env::default();
    let t = setup(&env);
    let holder = Address::generate(&env);
    let spender = Address::generate(&env);
    set_sequence(&env, 100);

    t.bond.transfer(&t.owner, &holder, &10);
    t.bond.approve(&holder, &spender, &100, &200);

    assert_eq!(
        t.bond.try_transfer_from(&spender, &holder, &spender, &20),
        Err(Ok(Error::InsufficientBalance))
    );
    // Failed call spends nothing
    assert_eq!(t.bond.allowance(&holder, &spender), 100);
}

#[test]
fn test_allowance_expires() {
    let env = Env::default();
    let t = setup(&env);
    let spender = Address::generate(&env);
    set_sequence(&env, 100);

    t.bond.approve(&t.owner, &spender, &300, &110);

    set_sequence(&env, 110);
    assert_eq!(t.bond.allowance(&t.owner, &spender), 300);

    set_sequence(&env, 111);
    assert_eq!(t.bond.allowance(&t.owner, &spender), 0);
    assert_eq!(
        t.bond.try_transfer_from(&spender, &t.owner, &spender, &1),
        Err(Ok(Error::InsufficientAllowance))
    );
}

#[test]
fn test_approve_with_past_expiry_fails() {
    let env = Env::default();
    let t = setup(&env);
    let spender = Address::generate(&env);
    set_sequence(&env, 100);

    assert_eq!(
        t.bond.try_approve(&t.owner, &spender, &300, &99),
        Err(Ok(Error::InvalidLedgerSequence))
    );
}

#[test]
fn test_approve_zero_clears_allowance() {
    let env = Env::default();
    let t = setup(&env);
    let spender = Address::generate(&env);
    set_sequence(&env, 100);

    t.bond.approve(&t.owner, &spender, &300, &200);
    // A zero allowance may carry any expiry
    t.bond.approve(&t.owner, &spender, &0, &0);

    assert_eq!(t.bond.allowance(&t.owner, &spender), 0);
}

#[test]
fn test_approve_negative_fails() {
    let env = Env::default();
    let t = setup(&env);
    let spender = Address::generate(&env);

    assert_eq!(
        t.bond.try_approve(&t.owner, &spender, &-1, &200),
        Err(Ok(Error::InvalidAmount))
    );
}

#[test]
fn test_transferred_shares_redeem_for_new_holder() {
    let env = Env::default();
    let t = setup(&env);
    let holder = Address::generate(&env);
    t.bond.transfer(&t.owner, &holder, &200);
    t.bond.pay(&t.owner, &MAX_SUPPLY);

    assert_eq!(t.bond.redeem(&holder, &200), 200);
    assert_eq!(t.payment.balance(&holder), 200);
    assert_eq!(t.bond.balance(&holder), 0);
}
