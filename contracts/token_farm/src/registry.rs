use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::participant::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD};
use crate::ContractError;

// ── Storage key constants ───────────────────────────────────────────────────

/// Number of addresses ever registered; also the next free position.
const REG_COUNT: Symbol = symbol_short!("REG_CNT");
/// Per-position entries: `(REG_AT, index) -> Address`.
const REG_AT: Symbol = symbol_short!("REG_AT");
/// Presence index: `(REG_IDX, address) -> index`.
const REG_IDX: Symbol = symbol_short!("REG_IDX");

// ── Registry ────────────────────────────────────────────────────────────────
//
// Append-only, insertion-ordered set of every address that has held a
// participant record. Positions are dense and never reused, so the sweep can
// walk `0..count()` without gaps.

/// Total number of registered addresses.
pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&REG_COUNT).unwrap_or(0u32)
}

/// Address registered at `index`, or `None` when out of range.
pub fn get(env: &Env, index: u32) -> Option<Address> {
    env.storage().persistent().get(&(REG_AT, index))
}

pub fn contains(env: &Env, who: &Address) -> bool {
    env.storage().persistent().has(&(REG_IDX, who.clone()))
}

/// Append `who` unless already present.
///
/// Returns the position of the new entry, or `Ok(None)` when the address was
/// already registered.
pub fn register(env: &Env, who: &Address) -> Result<Option<u32>, ContractError> {
    if contains(env, who) {
        return Ok(None);
    }

    let index = count(env);
    let next = index
        .checked_add(1)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let at_key = (REG_AT, index);
    let idx_key = (REG_IDX, who.clone());
    env.storage().persistent().set(&at_key, who);
    env.storage().persistent().set(&idx_key, &index);
    env.storage()
        .persistent()
        .extend_ttl(&at_key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    env.storage()
        .persistent()
        .extend_ttl(&idx_key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);

    env.storage().instance().set(&REG_COUNT, &next);

    Ok(Some(index))
}
