//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in a battle (crit checks, damage variance, effect
//! chances, multi-hit trials) draws through a seeded [`RngOracle`]. Given the
//! same battle seed and the same sequence of actions, a battle replays
//! identically, which keeps outcomes auditable and tests deterministic.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic: the same seed always yields the
/// same value. Tests may substitute fixed-value implementations to pin a
/// specific branch (always-crit, never-crit, minimum rolls, and so on).
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }

    /// Uniform draw from the unit interval [0, 1).
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }

    /// Bernoulli trial: true with probability `chance` (clamped to [0, 1]).
    fn chance(&self, seed: u64, chance: f32) -> bool {
        self.unit(seed) < f64::from(chance.clamp(0.0, 1.0))
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Small, fast, and of good
/// statistical quality, which is all a card battle needs.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the state by one LCG step.
    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation: xorshift high bits, then random rotate.
    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Named streams for the independent rolls one attack resolution makes.
///
/// Each stream yields an independent seed via [`compute_seed`], so adding a
/// roll to one stage never shifts the values drawn by another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollStream {
    /// Critical-hit determination.
    Crit,
    /// Primary damage variance (first uniform of the skew product).
    DamageLow,
    /// Primary damage variance (second uniform of the skew product).
    DamageHigh,
    /// Multi-hit Bernoulli trials and per-hit rolls (offset by hit index).
    MultiHit,
    /// Confusion branch selection and self-damage magnitude.
    Confusion,
    /// Attack-effect application chances (offset by effect index).
    EffectChance,
    /// Randomized effect payloads such as burning duration.
    EffectPayload,
    /// Heal amount.
    Heal,
}

impl RollStream {
    fn base(self) -> u32 {
        match self {
            RollStream::Crit => 0,
            RollStream::DamageLow => 1,
            RollStream::DamageHigh => 2,
            RollStream::MultiHit => 100,
            RollStream::Confusion => 3,
            RollStream::EffectChance => 200,
            RollStream::EffectPayload => 300,
            RollStream::Heal => 4,
        }
    }

    /// Stream id for indexed rolls (hit number, effect number).
    pub fn at(self, index: u32) -> u32 {
        self.base() + index
    }
}

impl From<RollStream> for u32 {
    fn from(stream: RollStream) -> u32 {
        stream.base()
    }
}

/// Compute a deterministic seed for one roll within one battle action.
///
/// Combines the battle seed, the action nonce (increments once per resolved
/// action), the acting side index, and the roll stream so that every random
/// event in a battle draws from its own seed.
pub fn compute_seed(battle_seed: u64, nonce: u64, side_index: u32, stream: u32) -> u64 {
    // SplitMix64/FxHash-style mixing constants.
    let mut hash = battle_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(side_index).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(stream).wrapping_mul(0x85ebca6b);

    // Final avalanche step.
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}
