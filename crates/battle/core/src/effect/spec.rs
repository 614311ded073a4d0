//! Attack-effect specifications.
//!
//! [`EffectKind`] is the closed catalog of status-effect kinds the resolver
//! understands. Adding a kind means adding a variant here and one arm in the
//! resolver; nothing else in the engine needs to change.

use crate::card::DamageRange;
use crate::config::BattleConfig;

/// Inclusive duration range in turns, rolled when the effect is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRange {
    pub min: u8,
    pub max: u8,
}

impl TurnRange {
    pub fn new(min: u8, max: u8) -> Self {
        debug_assert!(min <= max, "turn range must be ordered");
        Self { min, max }
    }

    pub fn fixed(turns: u8) -> Self {
        Self {
            min: turns,
            max: turns,
        }
    }
}

/// Upper bound imposed by a cap-damage effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageCap {
    /// Cap final damage to the attack's own minimum.
    AttackMin,
    /// Cap final damage to a fixed value.
    Fixed(u32),
}

/// Defensive payload used by direct and delayed defenses.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefenseKind {
    /// Fully dodge the next incoming attack, retaliating with `counter`
    /// damage whether or not the dodge mattered.
    Evade { counter: u32 },
    /// Redirect a fraction of post-reduction damage back at the attacker.
    Reflect { fraction: f32 },
    /// Divert incoming damage into a stored counter instead of HP loss.
    Absorb,
}

/// The closed set of effect kinds an attack can carry.
#[derive(Clone, Copy, Debug, PartialEq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// DoT on the defender: `damage` per tick for a rolled duration.
    Burning { damage: u32, duration: TurnRange },
    /// Defender's next action may become a self-hit.
    Confusion,
    /// Defender skips its next action entirely.
    Stun,
    /// This attack ignores evasion and raises multi-hit floors.
    GuaranteedHit,
    /// Arms a damage multiplier on the caster's future attacks.
    DamageMultiplier { multiplier: f32, uses: u8 },
    /// Flat damage bonus on the caster's future attacks.
    DamageBoost { amount: u32, uses: u8 },
    /// Flat reduction on the defender's own next outgoing attack.
    EnemyAttackReductionFlat { amount: u32, uses: u8 },
    /// Percent reduction on the defender's own next outgoing attack.
    EnemyAttackReductionPercent { percent: u32, uses: u8 },
    /// Caps this attack's final rolled damage.
    CapDamage { cap: DamageCap },
    /// Queues a defense that activates after the caster's next landing hit.
    DelayedDefense { defense: DefenseKind },
    /// Two-phase attack: caster becomes untargetable for one enemy turn,
    /// then is forced to land with the stored range.
    Airborne {
        landing: DamageRange,
        landing_cooldown: Option<u8>,
    },
    /// Immediate evade on the caster's next incoming attack.
    Evade { counter: u32, uses: u8 },
    /// Immediate reflect on the caster's next incoming attacks.
    Reflect { fraction: f32, uses: u8 },
    /// Immediate absorb on the caster's next incoming attacks.
    Absorb { uses: u8 },
}

impl EffectKind {
    /// Conventional application chance when card data does not override it.
    pub fn default_chance(&self) -> f32 {
        match self {
            EffectKind::Confusion => BattleConfig::CONFUSION_DEFAULT_CHANCE,
            _ => 1.0,
        }
    }
}

/// An effect kind plus its application chance, attached to an attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    pub kind: EffectKind,
    /// Probability in [0, 1] that the effect fires once the attack lands.
    pub chance: f32,
}

impl EffectSpec {
    /// Effect with the kind's conventional chance.
    pub fn new(kind: EffectKind) -> Self {
        Self {
            chance: kind.default_chance(),
            kind,
        }
    }

    pub fn with_chance(kind: EffectKind, chance: f32) -> Self {
        Self {
            kind,
            chance: chance.clamp(0.0, 1.0),
        }
    }
}
