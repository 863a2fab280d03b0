#![no_std]

pub mod accrual;
pub mod checkpoint;
pub mod custody;
pub mod events;
pub mod participant;
pub mod registry;

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol};

use custody::AssetLedger;
use participant::Participant;

// ── Storage key constants ────────────────────────────────────────────────────

const OPERATOR: Symbol = symbol_short!("OPERATOR");
const PENDING_OPERATOR: Symbol = symbol_short!("PEND_OPR");
const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");

// Per-participant records and registry entries live in persistent storage
// (see `participant` and `registry`); everything above is instance storage.

const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 86_400;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAuthorized = 3,
    InvalidInput = 4,
    NotStaking = 5,
    TransferFailed = 6,
    ArithmeticOverflow = 7,
    TokensIdentical = 8,
}

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Immutable farm parameters fixed at `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FarmConfig {
    /// SAC address of the principal asset participants lock.
    pub stake_token: Address,
    /// SAC address of the asset paid out as rewards.
    pub reward_token: Address,
    /// Reward units per staked unit per ledger, scaled by
    /// [`accrual::RATE_PRECISION`].
    pub reward_rate: i128,
}

/// Snapshot of a participant's position returned by `get_staker_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakerInfo {
    pub staked: i128,
    pub is_staking: bool,
    pub pending_rewards: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TokenFarmContract;

#[contractimpl]
impl TokenFarmContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm.
    ///
    /// * `operator`     – address allowed to run reward sweeps.
    /// * `stake_token`  – SAC address of the token participants stake.
    /// * `reward_token` – SAC address of the token paid as rewards.
    /// * `reward_rate`  – reward units per staked unit per ledger, scaled by
    ///   `RATE_PRECISION`. Fixed for the lifetime of the contract.
    pub fn initialize(
        env: Env,
        operator: Address,
        stake_token: Address,
        reward_token: Address,
        reward_rate: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_rate < 0 {
            return Err(ContractError::InvalidInput);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }

        let config = FarmConfig {
            stake_token: stake_token.clone(),
            reward_token: reward_token.clone(),
            reward_rate,
        };

        env.storage().instance().set(&OPERATOR, &operator);
        env.storage().instance().set(&CONFIG, &config);
        env.storage().instance().set(&INITIALIZED, &true);
        // TOTAL_STAKED, the accrued total and the registry counter start at
        // zero; unwrap_or(0) covers absent keys.
        Self::bump_instance(&env);

        events::publish_initialized(&env, operator, stake_token, reward_token, reward_rate);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Lock `amount` more stake tokens for `participant`.
    ///
    /// Accrual on the existing stake is settled first, so the added amount
    /// only starts earning from the current ledger.
    pub fn deposit(env: Env, participant: Address, amount: i128) -> Result<(), ContractError> {
        let config = Self::load_config(&env)?;
        participant.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        Self::bump_instance(&env);

        // 1. Settle (and register on first deposit).
        let now = Self::current_tick(&env);
        let mut record = checkpoint::checkpoint(&env, &participant, now, config.reward_rate)?;

        // 2. Pull tokens into custody before touching the stake.
        AssetLedger::new(&env, &config.stake_token).transfer_in(&participant, amount)?;

        // 3. Grow the participant's stake and the global total.
        record
            .add_stake(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        participant::store(&env, &participant, &record);

        let new_total = Self::read_total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        events::publish_deposited(&env, participant, amount, record.staked, new_total);

        Ok(())
    }

    /// Return the participant's entire stake.
    ///
    /// Settled rewards stay on the record and remain claimable. Fails with
    /// `NotStaking` when nothing is locked.
    pub fn withdraw(env: Env, participant: Address) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        participant.require_auth();

        match participant::load(&env, &participant) {
            Some(record) if record.is_staking() => {}
            _ => return Err(ContractError::NotStaking),
        }
        Self::bump_instance(&env);

        // 1. Settle up to now on the full stake.
        let now = Self::current_tick(&env);
        let mut record = checkpoint::settle_existing(&env, &participant, now, config.reward_rate)?
            .ok_or(ContractError::NotStaking)?;

        // 2. Release the stake.
        let amount = record.take_stake();
        participant::store(&env, &participant, &record);

        let new_total = Self::read_total_staked(&env).saturating_sub(amount);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        // 3. Send the principal back.
        AssetLedger::new(&env, &config.stake_token).transfer_out(&participant, amount)?;

        events::publish_withdrawn(&env, participant, amount, new_total);

        Ok(amount)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `participant` has accrued up to now.
    ///
    /// Returns the amount paid; zero when nothing is owed, in which case no
    /// transfer is attempted. The farm must hold enough reward tokens,
    /// otherwise the call fails with `TransferFailed` and the entitlement is
    /// kept.
    pub fn claim_rewards(env: Env, participant: Address) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        participant.require_auth();
        Self::bump_instance(&env);

        // 1. Settle.
        let now = Self::current_tick(&env);
        let Some(mut record) =
            checkpoint::settle_existing(&env, &participant, now, config.reward_rate)?
        else {
            return Ok(0);
        };

        if record.accrued <= 0 {
            // Nothing owed; succeed without a transfer.
            return Ok(0);
        }

        // 2. Zero the entitlement.
        let amount = record.take_reward();
        participant::store(&env, &participant, &record);
        checkpoint::release_accrued(&env, amount);

        // 3. Pay.
        AssetLedger::new(&env, &config.reward_token).transfer_out(&participant, amount)?;

        events::publish_reward_claimed(&env, participant, amount);

        Ok(amount)
    }

    /// Settle every registered participant up to now. Operator only.
    ///
    /// No tokens move and no stake changes. Returns the number of
    /// participants visited. Cost is linear in the registry size; see
    /// `distribute_rewards_page` for a bounded variant.
    pub fn distribute_rewards_all(env: Env, caller: Address) -> Result<u32, ContractError> {
        let config = Self::load_config(&env)?;
        caller.require_auth();
        Self::require_operator(&env, &caller)?;
        Self::bump_instance(&env);

        let count = registry::count(&env);
        Self::sweep(&env, &caller, 0, count, config.reward_rate)?;

        Ok(count)
    }

    /// Settle registry entries `[start, start + limit)`. Operator only.
    ///
    /// Returns the index to resume from; equal to `participant_count()` once
    /// the whole registry has been covered.
    pub fn distribute_rewards_page(
        env: Env,
        caller: Address,
        start: u32,
        limit: u32,
    ) -> Result<u32, ContractError> {
        let config = Self::load_config(&env)?;
        caller.require_auth();
        Self::require_operator(&env, &caller)?;

        if limit == 0 {
            return Err(ContractError::InvalidInput);
        }
        Self::bump_instance(&env);

        let count = registry::count(&env);
        let end = start.saturating_add(limit).min(count);
        if start >= end {
            return Ok(count);
        }
        Self::sweep(&env, &caller, start, end, config.reward_rate)?;

        Ok(end)
    }

    /// Move `amount` reward tokens from `funder` into custody.
    ///
    /// Returns the farm's reward balance afterwards.
    pub fn fund_rewards(env: Env, funder: Address, amount: i128) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        funder.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        Self::bump_instance(&env);

        let ledger = AssetLedger::new(&env, &config.reward_token);
        ledger.transfer_in(&funder, amount)?;
        let reserve = ledger.custody_balance();

        events::publish_rewards_funded(&env, funder, amount, reserve);

        Ok(reserve)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Rewards `participant` could claim right now, without mutating state.
    pub fn pending_rewards(env: Env, participant: Address) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        checkpoint::preview(&env, &participant, Self::current_tick(&env), config.reward_rate)
    }

    /// Principal currently locked by `participant`.
    pub fn staking_balance(env: Env, participant: Address) -> i128 {
        participant::load(&env, &participant)
            .map(|record| record.staked)
            .unwrap_or(0)
    }

    pub fn is_staking(env: Env, participant: Address) -> bool {
        participant::load(&env, &participant)
            .map(|record| record.is_staking())
            .unwrap_or(false)
    }

    /// Combined position for a participant in a single call.
    pub fn get_staker_info(env: Env, participant: Address) -> Result<StakerInfo, ContractError> {
        let config = Self::load_config(&env)?;
        let now = Self::current_tick(&env);
        let staked = participant::load(&env, &participant)
            .map(|record| record.staked)
            .unwrap_or(0);

        Ok(StakerInfo {
            staked,
            is_staking: staked > 0,
            pending_rewards: checkpoint::preview(&env, &participant, now, config.reward_rate)?,
        })
    }

    /// Raw stored record, as of its last settlement.
    pub fn get_participant(env: Env, participant: Address) -> Option<Participant> {
        participant::load(&env, &participant)
    }

    /// Sum of every participant's stake.
    pub fn total_staking_balance(env: Env) -> i128 {
        Self::read_total_staked(&env)
    }

    /// Sum of every participant's settled, unclaimed reward.
    ///
    /// Does not include accrual since each participant's last settlement; run
    /// a sweep first for an up-to-date figure.
    pub fn total_accrued(env: Env) -> i128 {
        checkpoint::total_accrued(&env)
    }

    /// Reward tokens currently held by the farm.
    pub fn reward_reserve(env: Env) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        Ok(AssetLedger::new(&env, &config.reward_token).custody_balance())
    }

    pub fn participant_count(env: Env) -> u32 {
        registry::count(&env)
    }

    pub fn participant_at(env: Env, index: u32) -> Option<Address> {
        registry::get(&env, index)
    }

    pub fn get_config(env: Env) -> Result<FarmConfig, ContractError> {
        Self::load_config(&env)
    }

    pub fn get_reward_rate(env: Env) -> i128 {
        Self::load_config(&env)
            .map(|config| config.reward_rate)
            .unwrap_or(0)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_operator(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OPERATOR)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Operator transfer (two-step) ─────────────────────────────────────────

    /// Propose a new operator. Only the current operator can call this.
    ///
    /// The operator is the only address that can run the reward sweep and the
    /// contract has no way to reassign it afterwards, so a mistyped address
    /// would leave accrued rewards unsettled until each participant claims
    /// for themselves. The role therefore moves only once the proposed address
    /// signs `accept_operator`; until then the current operator keeps sweeping
    /// and may withdraw the proposal with `cancel_operator_transfer`.
    ///
    /// Proposing the sitting operator is rejected with `InvalidInput`. A new
    /// proposal replaces any earlier one.
    pub fn propose_operator(
        env: Env,
        current_operator: Address,
        new_operator: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_operator.require_auth();
        Self::require_operator(&env, &current_operator)?;

        if new_operator == current_operator {
            return Err(ContractError::InvalidInput);
        }

        env.storage()
            .instance()
            .set(&PENDING_OPERATOR, &new_operator);

        events::publish_operator_transfer_proposed(&env, current_operator, new_operator);

        Ok(())
    }

    /// Accept the pending operator transfer. Only the proposed address can
    /// call this.
    pub fn accept_operator(env: Env, new_operator: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_operator.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OPERATOR)
            .ok_or(ContractError::InvalidInput)?;

        if new_operator != pending {
            return Err(ContractError::NotAuthorized);
        }

        let old_operator: Address = env
            .storage()
            .instance()
            .get(&OPERATOR)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&OPERATOR, &new_operator);
        env.storage().instance().remove(&PENDING_OPERATOR);

        events::publish_operator_transfer_accepted(&env, old_operator, new_operator);

        Ok(())
    }

    /// Cancel a pending operator transfer. Only the current operator can call
    /// this.
    pub fn cancel_operator_transfer(
        env: Env,
        current_operator: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_operator.require_auth();
        Self::require_operator(&env, &current_operator)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_OPERATOR)
            .ok_or(ContractError::InvalidInput)?;

        env.storage().instance().remove(&PENDING_OPERATOR);

        events::publish_operator_transfer_cancelled(&env, current_operator, pending);

        Ok(())
    }

    pub fn get_pending_operator(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_OPERATOR)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<FarmConfig, ContractError> {
        Self::require_initialized(env)?;
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    /// Guard: revert if `caller` is not the stored operator.
    fn require_operator(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let operator: Address = env
            .storage()
            .instance()
            .get(&OPERATOR)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != operator {
            return Err(ContractError::NotAuthorized);
        }
        Ok(())
    }

    fn read_total_staked(env: &Env) -> i128 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    /// The host's ledger sequence is the farm's tick.
    fn current_tick(env: &Env) -> u32 {
        env.ledger().sequence()
    }

    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    /// Settle registry positions `[start, end)` at the current tick.
    fn sweep(
        env: &Env,
        operator: &Address,
        start: u32,
        end: u32,
        reward_rate: i128,
    ) -> Result<(), ContractError> {
        let now = Self::current_tick(env);
        for index in start..end {
            if let Some(who) = registry::get(env, index) {
                checkpoint::settle_existing(env, &who, now, reward_rate)?;
            }
        }

        events::publish_rewards_distributed(
            env,
            operator.clone(),
            start,
            end,
            checkpoint::total_accrued(env),
        );

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_operator;
