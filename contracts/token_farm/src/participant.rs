use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Storage keys and TTL ────────────────────────────────────────────────────

const PARTICIPANT: Symbol = symbol_short!("PART");

pub(crate) const PERSISTENT_LIFETIME_THRESHOLD: u32 = 120_960;
pub(crate) const PERSISTENT_BUMP_AMOUNT: u32 = 1_051_200;

// ── Types ───────────────────────────────────────────────────────────────────

/// Durable bookkeeping for one staker.
///
/// Records are created on the first deposit and never removed: a participant
/// who has withdrawn everything can still hold unclaimed rewards, and the
/// sweep relies on the registry pointing at live records.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participant {
    /// Principal units currently locked.
    pub staked: i128,
    /// Ledger sequence up to which accrual has been settled.
    pub last_checkpoint: u32,
    /// Reward units earned and not yet paid out.
    pub accrued: i128,
}

impl Participant {
    /// Fresh record with nothing staked, anchored at `now`.
    pub fn new(now: u32) -> Self {
        Self {
            staked: 0,
            last_checkpoint: now,
            accrued: 0,
        }
    }

    pub fn is_staking(&self) -> bool {
        self.staked > 0
    }

    /// Fold `delta` into the unpaid balance and move the anchor to `now`.
    pub fn settle(&mut self, delta: i128, now: u32) -> Option<()> {
        self.accrued = self.accrued.checked_add(delta)?;
        if now > self.last_checkpoint {
            self.last_checkpoint = now;
        }
        Some(())
    }

    pub fn add_stake(&mut self, amount: i128) -> Option<()> {
        self.staked = self.staked.checked_add(amount)?;
        Some(())
    }

    /// Empty the stake, returning what was locked.
    pub fn take_stake(&mut self) -> i128 {
        core::mem::take(&mut self.staked)
    }

    /// Empty the unpaid balance, returning what was owed.
    pub fn take_reward(&mut self) -> i128 {
        core::mem::take(&mut self.accrued)
    }
}

// ── Storage helpers ─────────────────────────────────────────────────────────

fn participant_key(who: &Address) -> (Symbol, Address) {
    (PARTICIPANT, who.clone())
}

/// Load a record, returning `None` for an address that never deposited.
pub fn load(env: &Env, who: &Address) -> Option<Participant> {
    env.storage().persistent().get(&participant_key(who))
}

/// Persist a record and push its expiry out.
pub fn store(env: &Env, who: &Address, record: &Participant) {
    let key = participant_key(who);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}
