//! Damage rolling.
//!
//! Pure resolution of one attack's raw damage: critical determination,
//! right-skew variance, multi-hit trials, and the hard damage ceiling. All
//! randomness flows through the [`RngOracle`] seeds, so callers (and tests)
//! control every outcome.

use crate::card::{DamageRange, MultiHitSpec};
use crate::config::BattleConfig;
use crate::env::{compute_seed, RngOracle, RollStream};

/// Result of rolling one attack instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    /// Final rolled damage, multiplier applied, capped at
    /// [`BattleConfig::DAMAGE_CAP`]. Defensive modifiers come later.
    pub damage: u32,
    pub critical: bool,
    /// Lowest displayable outcome (buffed, pre-multiplier). For UI buttons.
    pub min_possible: u32,
    /// Highest displayable outcome (buffed, pre-multiplier). For UI buttons.
    pub max_possible: u32,
}

/// Inputs for one damage roll.
#[derive(Clone, Copy, Debug)]
pub struct RollSpec<'a> {
    pub base: DamageRange,
    /// Flat bonus from persistent buffs, added once to the total.
    pub buff_flat: u32,
    /// Pending damage multiplier (1.0 when none is armed).
    pub multiplier: f32,
    pub multi_hit: Option<&'a MultiHitSpec>,
    /// All strikes land at their maximum.
    pub force_max: bool,
    /// Guaranteed-hit effect active: raises multi-hit floors.
    pub guaranteed_hit: bool,
}

impl<'a> RollSpec<'a> {
    pub fn plain(base: DamageRange) -> Self {
        Self {
            base,
            buff_flat: 0,
            multiplier: 1.0,
            multi_hit: None,
            force_max: false,
            guaranteed_hit: false,
        }
    }
}

/// Critical chance tier for an attack's maximum possible damage.
fn crit_chance(max_possible: u32) -> f32 {
    if max_possible <= BattleConfig::CRIT_TIER_LIGHT_MAX {
        BattleConfig::CRIT_PERCENT_LIGHT
    } else if max_possible <= BattleConfig::CRIT_TIER_MEDIUM_MAX {
        BattleConfig::CRIT_PERCENT_MEDIUM
    } else {
        BattleConfig::CRIT_PERCENT_HEAVY
    }
}

fn sub_seed(seed: u64, stream: u32) -> u64 {
    compute_seed(seed, 0, 0, stream)
}

/// Rolls one attack instance.
///
/// Rules, in order:
/// - A `[0, 0]` base with no multi-hit is a utility attack: always
///   `(0, false, 0, 0)`, never a crit.
/// - Critical chance is tiered by the max possible damage; a crit lands at
///   the buffed maximum. Multi-hit attacks do not crit.
/// - Non-crit single rolls use the product of two independent uniforms,
///   biasing results toward the low end, never below the buffed minimum.
/// - Multi-hit: `hits` Bernoulli trials at `hit_chance`; each landed strike
///   rolls within its per-hit range (floor raised under guaranteed-hit).
/// - The multiplier applies to the rolled total, then the hard
///   [`BattleConfig::DAMAGE_CAP`] clamps the result.
pub fn roll_attack_damage(rng: &dyn RngOracle, seed: u64, spec: &RollSpec<'_>) -> DamageRoll {
    if spec.base.is_zero() && spec.multi_hit.is_none() {
        return DamageRoll {
            damage: 0,
            critical: false,
            min_possible: 0,
            max_possible: 0,
        };
    }

    let (min_possible, max_possible, rolled, critical) = match spec.multi_hit {
        Some(multi) => {
            let min_possible = multi.hits * multi.per_hit.min + spec.buff_flat;
            let max_possible = multi.hits * multi.per_hit.max + spec.buff_flat;
            let rolled = roll_multi_hit(rng, seed, spec, multi);
            (min_possible, max_possible, rolled, false)
        }
        None => {
            let buffed = spec.base.buffed(spec.buff_flat);
            let critical = rng.chance(
                sub_seed(seed, RollStream::Crit.into()),
                crit_chance(buffed.max),
            );
            let rolled = if spec.force_max || critical {
                buffed.max
            } else {
                roll_skewed(rng, seed, spec.base) + spec.buff_flat
            };
            (buffed.min, buffed.max, rolled, critical)
        }
    };

    let multiplied = (f64::from(rolled) * f64::from(spec.multiplier)).round() as u32;
    let damage = multiplied.min(BattleConfig::DAMAGE_CAP);

    DamageRoll {
        damage,
        critical,
        min_possible,
        max_possible,
    }
}

/// Right-skew draw in `[min, max]`: the product of two independent uniforms
/// piles outcomes toward the low end of the range.
fn roll_skewed(rng: &dyn RngOracle, seed: u64, base: DamageRange) -> u32 {
    let spread = base.max - base.min;
    if spread == 0 {
        return base.min;
    }
    let u = rng.unit(sub_seed(seed, RollStream::DamageLow.into()))
        * rng.unit(sub_seed(seed, RollStream::DamageHigh.into()));
    let offset = (u * f64::from(spread + 1)).floor() as u32;
    base.min + offset.min(spread)
}

fn roll_multi_hit(
    rng: &dyn RngOracle,
    seed: u64,
    spec: &RollSpec<'_>,
    multi: &MultiHitSpec,
) -> u32 {
    let mut total = 0;
    for hit in 0..multi.hits {
        let landed = spec.force_max
            || rng.chance(
                sub_seed(seed, RollStream::MultiHit.at(hit * 2)),
                multi.hit_chance,
            );
        if !landed {
            continue;
        }

        total += if spec.force_max {
            multi.per_hit.max
        } else {
            let floor = if spec.guaranteed_hit {
                multi.guaranteed_min_per_hit.unwrap_or(multi.per_hit.min)
            } else {
                multi.per_hit.min
            };
            rng.range(
                sub_seed(seed, RollStream::MultiHit.at(hit * 2 + 1)),
                floor,
                multi.per_hit.max,
            )
        };
    }
    total + spec.buff_flat
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RNG stub returning one fixed value for every seed.
    struct ConstRng(u32);

    impl RngOracle for ConstRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn multi(hits: u32, chance: f32, min: u32, max: u32) -> MultiHitSpec {
        MultiHitSpec {
            hits,
            hit_chance: chance,
            per_hit: DamageRange::new(min, max),
            guaranteed_min_per_hit: None,
        }
    }

    #[test]
    fn zero_range_never_deals_damage_or_crits() {
        // ConstRng(0) makes every chance roll succeed, so a crit would fire
        // if the zero-range rule did not short-circuit first.
        let roll = roll_attack_damage(&ConstRng(0), 7, &RollSpec::plain(DamageRange::ZERO));
        assert_eq!(
            roll,
            DamageRoll {
                damage: 0,
                critical: false,
                min_possible: 0,
                max_possible: 0
            }
        );
    }

    #[test]
    fn zero_range_ignores_buffs() {
        let mut spec = RollSpec::plain(DamageRange::ZERO);
        spec.buff_flat = 10;
        spec.multiplier = 3.0;
        let roll = roll_attack_damage(&ConstRng(0), 7, &spec);
        assert_eq!(roll.damage, 0);
        assert_eq!(roll.max_possible, 0);
    }

    #[test]
    fn rolls_stay_within_display_bounds_and_cap() {
        let rng = PcgRngLike;
        for seed in 0..300 {
            for &(min, max, buff, mult) in &[
                (5u32, 10u32, 0u32, 1.0f32),
                (15, 30, 5, 1.0),
                (20, 45, 0, 2.0),
                (90, 120, 10, 1.5),
            ] {
                let mut spec = RollSpec::plain(DamageRange::new(min, max));
                spec.buff_flat = buff;
                spec.multiplier = mult;
                let roll = roll_attack_damage(&rng, seed, &spec);
                assert!(roll.damage <= BattleConfig::DAMAGE_CAP);
                assert_eq!(roll.min_possible, min + buff);
                assert_eq!(roll.max_possible, max + buff);
                // Pre-cap, pre-multiplier value is bounded by the display range.
                if mult == 1.0 && roll.damage < BattleConfig::DAMAGE_CAP {
                    assert!(roll.damage >= roll.min_possible);
                    assert!(roll.damage <= roll.max_possible);
                }
            }
        }
    }

    /// Thin wrapper so the property test uses real PCG output.
    struct PcgRngLike;

    impl RngOracle for PcgRngLike {
        fn next_u32(&self, seed: u64) -> u32 {
            crate::env::PcgRng.next_u32(seed)
        }
    }

    #[test]
    fn crit_lands_at_buffed_max() {
        let mut spec = RollSpec::plain(DamageRange::new(10, 30));
        spec.buff_flat = 5;
        let roll = roll_attack_damage(&ConstRng(0), 7, &spec);
        assert!(roll.critical);
        assert_eq!(roll.damage, 35);
    }

    #[test]
    fn no_crit_low_roll_lands_at_buffed_min() {
        // ConstRng(u32::MAX) fails every chance roll (unit < 1.0 but the
        // crit tiers are all below it) and draws maximal uniforms.
        let rng = ConstRng(u32::MAX);
        let roll = roll_attack_damage(&rng, 7, &RollSpec::plain(DamageRange::new(15, 30)));
        assert!(!roll.critical);
        assert_eq!(roll.damage, 30);

        let rng_min = MixedRng;
        let roll = roll_attack_damage(&rng_min, 7, &RollSpec::plain(DamageRange::new(15, 30)));
        assert!(!roll.critical);
        assert_eq!(roll.damage, 15);
    }

    /// Fails the crit roll, then draws zero for the damage uniforms.
    struct MixedRng;

    impl RngOracle for MixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }

        fn chance(&self, _seed: u64, _chance: f32) -> bool {
            false
        }
    }

    #[test]
    fn multi_hit_force_max_sums_every_strike() {
        let multi = multi(3, 0.5, 1, 10);
        let mut spec = RollSpec::plain(DamageRange::ZERO);
        spec.multi_hit = Some(&multi);
        spec.force_max = true;
        let roll = roll_attack_damage(&ConstRng(u32::MAX), 7, &spec);
        assert_eq!(roll.damage, 30);
        assert_eq!(roll.min_possible, 3);
        assert_eq!(roll.max_possible, 30);
        assert!(!roll.critical);
    }

    #[test]
    fn multi_hit_all_misses_deals_only_the_buff() {
        // ConstRng(u32::MAX) fails every hit chance below 1.0.
        let multi = multi(3, 0.5, 1, 10);
        let mut spec = RollSpec::plain(DamageRange::ZERO);
        spec.multi_hit = Some(&multi);
        spec.buff_flat = 2;
        let roll = roll_attack_damage(&ConstRng(u32::MAX), 7, &spec);
        assert_eq!(roll.damage, 2);
    }

    #[test]
    fn guaranteed_hit_raises_multi_hit_floor() {
        let multi = MultiHitSpec {
            hits: 2,
            hit_chance: 1.0,
            per_hit: DamageRange::new(1, 10),
            guaranteed_min_per_hit: Some(6),
        };
        let mut spec = RollSpec::plain(DamageRange::ZERO);
        spec.multi_hit = Some(&multi);
        spec.guaranteed_hit = true;
        // ConstRng(0): every chance succeeds, every range draw is its floor.
        let roll = roll_attack_damage(&ConstRng(0), 7, &spec);
        assert_eq!(roll.damage, 12);
    }

    #[test]
    fn multiplier_applies_before_the_cap() {
        let mut spec = RollSpec::plain(DamageRange::fixed(30));
        spec.multiplier = 2.0;
        let rng = MixedRng;
        let roll = roll_attack_damage(&rng, 7, &spec);
        // 30 * 2 = 60, capped at 50.
        assert_eq!(roll.damage, BattleConfig::DAMAGE_CAP);
    }

    #[test]
    fn crit_tiers_follow_max_possible() {
        assert_eq!(crit_chance(40), BattleConfig::CRIT_PERCENT_LIGHT);
        assert_eq!(crit_chance(50), BattleConfig::CRIT_PERCENT_LIGHT);
        assert_eq!(crit_chance(51), BattleConfig::CRIT_PERCENT_MEDIUM);
        assert_eq!(crit_chance(100), BattleConfig::CRIT_PERCENT_MEDIUM);
        assert_eq!(crit_chance(101), BattleConfig::CRIT_PERCENT_HEAVY);
    }
}
