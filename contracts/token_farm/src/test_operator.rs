extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

use crate::accrual::RATE_PRECISION;
use crate::{ContractError, TokenFarmContract, TokenFarmContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, TokenFarmContractClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let stake_token = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(TokenFarmContract, ());
    let client = TokenFarmContractClient::new(&env, &contract_id);

    let operator = Address::generate(&env);
    client.initialize(
        &operator,
        &stake_token.address(),
        &reward_token.address(),
        &RATE_PRECISION,
    );

    (env, client, operator, stake_token.address())
}

// ── Handover ─────────────────────────────────────────────────────────────────

#[test]
fn test_propose_and_accept_operator() {
    let (env, client, operator, _) = setup();
    let successor = Address::generate(&env);

    client.propose_operator(&operator, &successor);
    assert_eq!(client.get_pending_operator(), Some(successor.clone()));
    // Nothing changes until the successor accepts.
    assert_eq!(client.get_operator(), operator);

    client.accept_operator(&successor);
    assert_eq!(client.get_operator(), successor);
    assert_eq!(client.get_pending_operator(), None);
}

#[test]
fn test_propose_by_non_operator_fails() {
    let (env, client, _operator, _) = setup();
    let intruder = Address::generate(&env);

    let result = client.try_propose_operator(&intruder, &intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    assert_eq!(client.get_pending_operator(), None);
}

#[test]
fn test_accept_by_wrong_address_fails() {
    let (env, client, operator, _) = setup();
    let successor = Address::generate(&env);
    let intruder = Address::generate(&env);

    client.propose_operator(&operator, &successor);

    let result = client.try_accept_operator(&intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }
    assert_eq!(client.get_operator(), operator);
}

#[test]
fn test_accept_without_proposal_fails() {
    let (env, client, _operator, _) = setup();

    let result = client.try_accept_operator(&Address::generate(&env));
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_cancel_operator_transfer() {
    let (env, client, operator, _) = setup();
    let successor = Address::generate(&env);

    client.propose_operator(&operator, &successor);
    client.cancel_operator_transfer(&operator);
    assert_eq!(client.get_pending_operator(), None);

    let result = client.try_accept_operator(&successor);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }

    // Nothing left to cancel.
    let result = client.try_cancel_operator_transfer(&operator);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

#[test]
fn test_propose_current_operator_fails() {
    let (_env, client, operator, _) = setup();

    let result = client.try_propose_operator(&operator, &operator);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert_eq!(client.get_pending_operator(), None);
}

#[test]
fn test_later_proposal_replaces_earlier() {
    let (env, client, operator, _) = setup();
    let mistyped = Address::generate(&env);
    let successor = Address::generate(&env);

    client.propose_operator(&operator, &mistyped);
    client.propose_operator(&operator, &successor);
    assert_eq!(client.get_pending_operator(), Some(successor.clone()));

    let result = client.try_accept_operator(&mistyped);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    client.accept_operator(&successor);
    assert_eq!(client.get_operator(), successor);
}

// ── Sweep authority follows the handover ─────────────────────────────────────

#[test]
fn test_sweep_stays_with_operator_until_accepted() {
    let (env, client, operator, stake_token) = setup();
    let successor = Address::generate(&env);

    let alice = Address::generate(&env);
    StellarAssetClient::new(&env, &stake_token).mint(&alice, &100);
    client.deposit(&alice, &100);

    client.propose_operator(&operator, &successor);
    env.ledger().set_sequence_number(env.ledger().sequence() + 3);

    let result = client.try_distribute_rewards_all(&successor);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    assert_eq!(client.distribute_rewards_all(&operator), 1);
    assert_eq!(client.get_participant(&alice).unwrap().accrued, 300);
    assert_eq!(client.get_operator(), operator);
}

#[test]
fn test_sweep_authority_moves_with_operator() {
    let (env, client, operator, stake_token) = setup();
    let successor = Address::generate(&env);

    let alice = Address::generate(&env);
    StellarAssetClient::new(&env, &stake_token).mint(&alice, &100);
    client.deposit(&alice, &100);

    client.propose_operator(&operator, &successor);
    client.accept_operator(&successor);

    env.ledger().set_sequence_number(env.ledger().sequence() + 5);

    let result = client.try_distribute_rewards_all(&operator);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NotAuthorized),
        _ => unreachable!("Expected NotAuthorized error"),
    }

    assert_eq!(client.distribute_rewards_all(&successor), 1);
    assert_eq!(client.get_participant(&alice).unwrap().accrued, 500);
}
