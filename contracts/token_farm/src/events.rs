#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub operator: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub reward_rate: i128,
    pub tick: u32,
    pub timestamp: u64,
}

/// Fired the first time an address deposits.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantRegisteredEvent {
    pub participant: Address,
    pub index: u32,
    pub tick: u32,
}

/// Fired when a participant adds stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub participant: Address,
    pub amount: i128,
    pub new_stake: i128,
    pub new_total_staked: i128,
    pub tick: u32,
    pub timestamp: u64,
}

/// Fired when a participant pulls out their whole stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub participant: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub tick: u32,
    pub timestamp: u64,
}

/// Fired when a participant is paid their accrued rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub participant: Address,
    pub amount: i128,
    pub tick: u32,
    pub timestamp: u64,
}

/// Fired after the operator settles a range of the registry.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsDistributedEvent {
    pub operator: Address,
    pub start: u32,
    pub end: u32,
    pub total_accrued: i128,
    pub tick: u32,
    pub timestamp: u64,
}

/// Fired when reward asset is moved into custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsFundedEvent {
    pub funder: Address,
    pub amount: i128,
    pub reserve: i128,
    pub timestamp: u64,
}

/// Fired when an operator handover is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorTransferProposedEvent {
    pub current_operator: Address,
    pub proposed_operator: Address,
    pub timestamp: u64,
}

/// Fired when an operator handover is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorTransferAcceptedEvent {
    pub old_operator: Address,
    pub new_operator: Address,
    pub timestamp: u64,
}

/// Fired when a pending operator handover is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorTransferCancelledEvent {
    pub operator: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    operator: Address,
    stake_token: Address,
    reward_token: Address,
    reward_rate: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            operator,
            stake_token,
            reward_token,
            reward_rate,
            tick: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_participant_registered(env: &Env, participant: Address, index: u32) {
    env.events().publish(
        (symbol_short!("NEW_PART"), participant.clone()),
        ParticipantRegisteredEvent {
            participant,
            index,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    participant: Address,
    amount: i128,
    new_stake: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), participant.clone()),
        DepositedEvent {
            participant,
            amount,
            new_stake,
            new_total_staked,
            tick: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, participant: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), participant.clone()),
        WithdrawnEvent {
            participant,
            amount,
            new_total_staked,
            tick: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, participant: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), participant.clone()),
        RewardClaimedEvent {
            participant,
            amount,
            tick: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_distributed(
    env: &Env,
    operator: Address,
    start: u32,
    end: u32,
    total_accrued: i128,
) {
    env.events().publish(
        (symbol_short!("SWEEP"), operator.clone()),
        RewardsDistributedEvent {
            operator,
            start,
            end,
            total_accrued,
            tick: env.ledger().sequence(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_funded(env: &Env, funder: Address, amount: i128, reserve: i128) {
    env.events().publish(
        (symbol_short!("FUNDED"), funder.clone()),
        RewardsFundedEvent {
            funder,
            amount,
            reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_operator_transfer_proposed(
    env: &Env,
    current_operator: Address,
    proposed_operator: Address,
) {
    env.events().publish(
        (symbol_short!("OPR_PROP"), current_operator.clone()),
        OperatorTransferProposedEvent {
            current_operator,
            proposed_operator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_operator_transfer_accepted(env: &Env, old_operator: Address, new_operator: Address) {
    env.events().publish(
        (symbol_short!("OPR_ACPT"), new_operator.clone()),
        OperatorTransferAcceptedEvent {
            old_operator,
            new_operator,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_operator_transfer_cancelled(
    env: &Env,
    operator: Address,
    cancelled_proposed: Address,
) {
    env.events().publish(
        (symbol_short!("OPR_CNCL"), operator.clone()),
        OperatorTransferCancelledEvent {
            operator,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
