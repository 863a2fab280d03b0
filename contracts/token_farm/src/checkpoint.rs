use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::accrual;
use crate::events;
use crate::participant::{self, Participant};
use crate::registry;
use crate::ContractError;

/// Sum of every participant's settled, unpaid reward.
const TOTAL_ACCRUED: Symbol = symbol_short!("TOT_ACR");

// ── Settlement ──────────────────────────────────────────────────────────────
//
// Every mutating entry point settles the participant here before applying its
// own effect. This module is the only writer of `Participant::accrued` growth
// and the only reader of `Participant::last_checkpoint`.

/// Settle `who` up to `now`, registering the address on first touch.
///
/// A newly registered participant starts with nothing staked and its anchor
/// at `now`, so there is nothing to accrue yet. Calling this twice at the same
/// tick is a no-op the second time.
pub fn checkpoint(
    env: &Env,
    who: &Address,
    now: u32,
    reward_rate: i128,
) -> Result<Participant, ContractError> {
    if let Some(record) = settle_existing(env, who, now, reward_rate)? {
        return Ok(record);
    }

    let record = Participant::new(now);
    participant::store(env, who, &record);
    if let Some(index) = registry::register(env, who)? {
        events::publish_participant_registered(env, who.clone(), index);
    }

    Ok(record)
}

/// Settle `who` up to `now` if a record exists; never registers.
pub fn settle_existing(
    env: &Env,
    who: &Address,
    now: u32,
    reward_rate: i128,
) -> Result<Option<Participant>, ContractError> {
    let Some(mut record) = participant::load(env, who) else {
        return Ok(None);
    };

    let delta = accrual::accrue(record.staked, record.last_checkpoint, now, reward_rate)
        .ok_or(ContractError::ArithmeticOverflow)?;

    if delta == 0 && record.last_checkpoint >= now {
        return Ok(Some(record));
    }

    record
        .settle(delta, now)
        .ok_or(ContractError::ArithmeticOverflow)?;
    participant::store(env, who, &record);
    add_total_accrued(env, delta)?;

    Ok(Some(record))
}

/// What `accrued` would hold right after a checkpoint at `now`.
///
/// Read-only: unknown addresses report zero and stay unregistered.
pub fn preview(
    env: &Env,
    who: &Address,
    now: u32,
    reward_rate: i128,
) -> Result<i128, ContractError> {
    let Some(record) = participant::load(env, who) else {
        return Ok(0);
    };

    accrual::accrue(record.staked, record.last_checkpoint, now, reward_rate)
        .and_then(|delta| record.accrued.checked_add(delta))
        .ok_or(ContractError::ArithmeticOverflow)
}

// ── Outstanding-reward counter ──────────────────────────────────────────────

pub fn total_accrued(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_ACCRUED).unwrap_or(0)
}

fn add_total_accrued(env: &Env, delta: i128) -> Result<(), ContractError> {
    if delta == 0 {
        return Ok(());
    }
    let total = total_accrued(env)
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    env.storage().instance().set(&TOTAL_ACCRUED, &total);
    Ok(())
}

/// Remove a paid-out amount from the outstanding total.
pub fn release_accrued(env: &Env, amount: i128) {
    let total = total_accrued(env).saturating_sub(amount).max(0);
    env.storage().instance().set(&TOTAL_ACCRUED, &total);
}
