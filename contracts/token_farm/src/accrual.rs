/// Fixed-point scale of the reward rate.
///
/// A `reward_rate` of `RATE_PRECISION` pays exactly one reward unit per staked
/// unit per tick. Smaller rates express fractional emissions; whatever does
/// not add up to a whole reward unit at settlement time is dropped.
pub const RATE_PRECISION: i128 = 1_000_000_000_000;

// ── Core accrual step ───────────────────────────────────────────────────────

/// Reward earned by `staked` units between `from_tick` and `to_tick`.
///
/// ```text
/// delta = staked × (to_tick − from_tick) × reward_rate / RATE_PRECISION
/// ```
///
/// The result is the exact floor of the full product over `RATE_PRECISION`,
/// so the only precision lost is the sub-unit remainder of the final result.
/// A window where `to_tick < from_tick` is treated as empty.
///
/// Both `staked` and `reward_rate` are split into whole and fractional parts
/// of `RATE_PRECISION` so the division happens before the product can leave
/// `i128`:
///
/// ```text
/// staked = sw·P + sf,  reward_rate = rw·P + rf,  t = elapsed
/// delta  = sw·t·rate + sf·t·rw + ⌊sf·t·rf / P⌋
/// ```
///
/// `sf·t·rf < P · 2³² · P` always fits, so `None` is returned only when the
/// reward itself does not fit in `i128`; callers must abort rather than store
/// a clamped value.
///
/// # Arguments
/// * `staked`      – participant's stake over the whole window
/// * `from_tick`   – ledger sequence of the last settlement
/// * `to_tick`     – ledger sequence being settled to
/// * `reward_rate` – reward units per staked unit per tick, scaled by `RATE_PRECISION`
pub fn accrue(staked: i128, from_tick: u32, to_tick: u32, reward_rate: i128) -> Option<i128> {
    let elapsed = to_tick.saturating_sub(from_tick);
    if staked <= 0 || elapsed == 0 || reward_rate <= 0 {
        return Some(0);
    }
    let elapsed = i128::from(elapsed);

    let (stake_whole, stake_frac) = (staked / RATE_PRECISION, staked % RATE_PRECISION);
    let (rate_whole, rate_frac) = (reward_rate / RATE_PRECISION, reward_rate % RATE_PRECISION);
    let frac_ticks = stake_frac.checked_mul(elapsed)?;

    let whole = stake_whole.checked_mul(elapsed)?.checked_mul(reward_rate)?;
    let cross = frac_ticks.checked_mul(rate_whole)?;
    let tail = frac_ticks.checked_mul(rate_frac)? / RATE_PRECISION;

    whole.checked_add(cross)?.checked_add(tail)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    #[test]
    fn zero_stake_accrues_nothing() {
        assert_eq!(accrue(0, 0, 1_000, RATE_PRECISION), Some(0));
    }

    #[test]
    fn empty_window_accrues_nothing() {
        assert_eq!(accrue(500, 42, 42, RATE_PRECISION), Some(0));
    }

    #[test]
    fn reversed_window_accrues_nothing() {
        assert_eq!(accrue(500, 50, 10, RATE_PRECISION), Some(0));
    }

    #[test]
    fn whole_unit_rate_is_linear() {
        // 100 units × 10 ticks × 1 reward/unit/tick
        assert_eq!(accrue(100, 0, 10, RATE_PRECISION), Some(1_000));
        assert_eq!(accrue(100, 7, 17, 3 * RATE_PRECISION), Some(3_000));
    }

    #[test]
    fn fractional_rate_drops_remainder() {
        // 0.01 reward/unit/tick: 150 × 1 × 0.01 = 1.5 → 1
        let rate = RATE_PRECISION / 100;
        assert_eq!(accrue(150, 0, 1, rate), Some(1));
        // 150 × 2 × 0.01 = 3.0 exactly, nothing lost when settled in one go
        assert_eq!(accrue(150, 0, 2, rate), Some(3));
    }

    #[test]
    fn split_settlement_never_exceeds_single_settlement() {
        let rate = RATE_PRECISION / 3;
        let whole = accrue(10, 0, 10, rate).unwrap();
        let split = accrue(10, 0, 4, rate).unwrap() + accrue(10, 4, 10, rate).unwrap();
        assert!(split <= whole);
        assert_eq!(whole, 33);
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(accrue(i128::MAX / 2, 0, 3, RATE_PRECISION), None);
        assert_eq!(accrue(i128::MAX, 0, 2, RATE_PRECISION), None);
    }

    #[test]
    fn wide_intermediate_product_still_settles() {
        // 10^24 × 200_000 × 10^9 exceeds i128 before the division, the
        // reward (2 × 10^26) does not.
        let staked: i128 = 1_000_000_000_000_000_000_000_000;
        assert_eq!(
            accrue(staked, 0, 200_000, RATE_PRECISION / 1_000),
            Some(200_000_000_000_000_000_000_000_000)
        );

        // A tiny rate on a huge stake over the longest possible window.
        assert_eq!(accrue(i128::MAX, 0, u32::MAX, 1).map(|d| d > 0), Some(true));
    }

    #[test]
    fn split_product_matches_direct_product() {
        // Mixed whole and fractional parts on both stake and rate.
        let staked = 3 * RATE_PRECISION + 123_456_789;
        let rate = 2 * RATE_PRECISION + 987_654_321_098;
        let direct = staked * 17 * rate / RATE_PRECISION;
        assert_eq!(accrue(staked, 3, 20, rate), Some(direct));
    }

    #[test]
    fn large_realistic_values_fit() {
        // 10^15 staked for one million ticks at one unit per tick.
        let staked: i128 = 1_000_000_000_000_000;
        let delta = accrue(staked, 0, 1_000_000, RATE_PRECISION).unwrap();
        assert_eq!(delta, staked * 1_000_000);
    }
}
