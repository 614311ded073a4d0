/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Number of most recent log rounds shown by the bounded transcript view.
    pub recent_rounds: usize,

    /// HP percentage below which the AI prefers healing attacks.
    pub ai_low_hp_percent: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of attacks per card.
    pub const MAX_ATTACKS: usize = 4;
    /// Maximum number of simultaneous burning stacks on one combatant.
    pub const MAX_BURNING_STACKS: usize = 8;

    // ===== balance constants =====
    /// Hard ceiling on any resolved attack instance, applied after rolling
    /// (including multipliers) and before defensive modifiers.
    pub const DAMAGE_CAP: u32 = 50;

    /// Critical chance tiers, keyed by the attack's maximum possible damage.
    /// Up to 50 damage: 12%. Up to 100: 8%. Above: 5%.
    pub const CRIT_PERCENT_LIGHT: f32 = 0.12;
    pub const CRIT_PERCENT_MEDIUM: f32 = 0.08;
    pub const CRIT_PERCENT_HEAVY: f32 = 0.05;
    pub const CRIT_TIER_LIGHT_MAX: u32 = 50;
    pub const CRIT_TIER_MEDIUM_MAX: u32 = 100;

    /// Probability that a confused attacker hurts itself instead of attacking.
    pub const CONFUSION_SELF_HIT_CHANCE: f32 = 0.77;
    /// Default application chance for confusion effects.
    pub const CONFUSION_DEFAULT_CHANCE: f32 = 0.7;
    /// Confusion self-damage bands, selected by the attack's max potential.
    pub const SELF_HIT_LIGHT_MIN: u32 = 15;
    pub const SELF_HIT_LIGHT_MAX: u32 = 20;
    pub const SELF_HIT_HEAVY_MIN: u32 = 40;
    pub const SELF_HIT_HEAVY_MAX: u32 = 60;
    /// Max-potential boundary between the light and heavy self-hit bands.
    pub const SELF_HIT_POTENTIAL_SPLIT: u32 = 100;

    /// Strong-attack thresholds: an attack whose buffed minimum exceeds
    /// STRONG_MIN and whose buffed maximum exceeds STRONG_MAX receives an
    /// automatic cooldown even without an explicit one.
    pub const STRONG_ATTACK_MIN: u32 = 90;
    pub const STRONG_ATTACK_MAX: u32 = 99;
    /// Cooldown length applied by the strong-attack rule.
    pub const STRONG_ATTACK_COOLDOWN: u8 = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_RECENT_ROUNDS: usize = 3;
    pub const DEFAULT_AI_LOW_HP_PERCENT: u32 = 30;

    pub fn new() -> Self {
        Self {
            recent_rounds: Self::DEFAULT_RECENT_ROUNDS,
            ai_low_hp_percent: Self::DEFAULT_AI_LOW_HP_PERCENT,
        }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
