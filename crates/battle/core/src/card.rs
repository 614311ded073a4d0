//! Static card and attack definitions.
//!
//! Card definitions are immutable during a battle. They are supplied by a
//! catalog oracle and referenced by [`crate::battle::Combatant`] snapshots.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::effect::EffectSpec;

/// Inclusive damage range. A fixed value is represented as `min == max`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    pub const ZERO: Self = Self { min: 0, max: 0 };

    pub fn new(min: u32, max: u32) -> Self {
        debug_assert!(min <= max, "damage range must be ordered");
        Self { min, max }
    }

    /// A fixed, non-varying damage value.
    pub fn fixed(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// True for the `[0, 0]` utility range that never deals damage.
    pub fn is_zero(&self) -> bool {
        self.min == 0 && self.max == 0
    }

    /// Range shifted by a flat bonus on both ends.
    pub fn buffed(&self, flat: u32) -> Self {
        Self {
            min: self.min + flat,
            max: self.max + flat,
        }
    }
}

/// Multi-hit attack specification: up to `hits` independent strikes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiHitSpec {
    /// Number of independent Bernoulli trials.
    pub hits: u32,
    /// Probability that each individual strike lands.
    pub hit_chance: f32,
    /// Damage range rolled per landed strike.
    pub per_hit: DamageRange,
    /// Raised per-strike floor while a guaranteed-hit effect is active.
    pub guaranteed_min_per_hit: Option<u32>,
}

/// Presentation hint forwarded untouched to the driver's UI layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// One attack on a card.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackDefinition {
    pub name: String,
    /// Primary damage range. `[0, 0]` marks a pure utility attack.
    pub damage: DamageRange,
    pub multi_hit: Option<MultiHitSpec>,
    /// Self-heal rolled on use.
    pub heal: Option<DamageRange>,
    /// Effects rolled individually after the attack reaches the defender.
    pub effects: Vec<EffectSpec>,
    /// Once used, the attack is disabled until the dedicated reload action.
    pub requires_reload: bool,
    /// Display name of the reload action (e.g. the magazine being changed).
    pub reload_name: Option<String>,
    /// Explicit cooldown in turns after use.
    pub cooldown_turns: Option<u8>,
    /// Dynamic cooldown: defender's current burning-stack count plus this.
    pub cooldown_from_burning_plus: Option<u8>,
    pub button_style: Option<ButtonStyle>,
}

impl AttackDefinition {
    /// Plain direct-damage attack.
    pub fn direct(name: impl Into<String>, min: u32, max: u32) -> Self {
        Self {
            name: name.into(),
            damage: DamageRange::new(min, max),
            multi_hit: None,
            heal: None,
            effects: Vec::new(),
            requires_reload: false,
            reload_name: None,
            cooldown_turns: None,
            cooldown_from_burning_plus: None,
            button_style: None,
        }
    }

    /// Zero-damage utility attack (buffs, stealth, setup moves).
    pub fn utility(name: impl Into<String>) -> Self {
        Self::direct(name, 0, 0)
    }

    pub fn with_multi_hit(mut self, spec: MultiHitSpec) -> Self {
        self.multi_hit = Some(spec);
        self
    }

    pub fn with_heal(mut self, min: u32, max: u32) -> Self {
        self.heal = Some(DamageRange::new(min, max));
        self
    }

    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_reload(mut self, reload_name: impl Into<String>) -> Self {
        self.requires_reload = true;
        self.reload_name = Some(reload_name.into());
        self
    }

    pub fn with_cooldown(mut self, turns: u8) -> Self {
        self.cooldown_turns = Some(turns);
        self
    }

    pub fn with_burning_cooldown(mut self, plus: u8) -> Self {
        self.cooldown_from_burning_plus = Some(plus);
        self
    }

    pub fn with_button_style(mut self, style: ButtonStyle) -> Self {
        self.button_style = Some(style);
        self
    }

    /// True when the attack carries no damage intent at all.
    pub fn is_zero_intent(&self) -> bool {
        self.damage.is_zero() && self.multi_hit.is_none()
    }

    /// True when a guaranteed-hit effect rides on this attack, which
    /// overrides evasion and raises multi-hit floors.
    pub fn has_guaranteed_hit(&self) -> bool {
        self.effects
            .iter()
            .any(|spec| matches!(spec.kind, crate::effect::EffectKind::GuaranteedHit))
    }
}

/// A card: name, base HP, and up to four attacks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub name: String,
    pub max_hp: u32,
    pub attacks: ArrayVec<AttackDefinition, { BattleConfig::MAX_ATTACKS }>,
}

impl CardDefinition {
    pub fn new(name: impl Into<String>, max_hp: u32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            attacks: ArrayVec::new(),
        }
    }

    /// Adds an attack, ignoring any beyond the four-attack limit.
    pub fn with_attack(mut self, attack: AttackDefinition) -> Self {
        if !self.attacks.is_full() {
            self.attacks.push(attack);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_range_is_degenerate() {
        let range = DamageRange::fixed(20);
        assert_eq!(range.min, 20);
        assert_eq!(range.max, 20);
        assert!(!range.is_zero());
        assert!(DamageRange::ZERO.is_zero());
    }

    #[test]
    fn buffed_range_shifts_both_ends() {
        let range = DamageRange::new(10, 30).buffed(5);
        assert_eq!(range, DamageRange::new(15, 35));
    }

    #[test]
    fn card_caps_attacks_at_four() {
        let mut card = CardDefinition::new("Testkarte", 100);
        for i in 0..6 {
            card = card.with_attack(AttackDefinition::direct(format!("Angriff {i}"), 1, 2));
        }
        assert_eq!(card.attacks.len(), BattleConfig::MAX_ATTACKS);
    }

    #[test]
    fn zero_intent_detects_utility_attacks() {
        assert!(AttackDefinition::utility("Tarnung").is_zero_intent());
        assert!(!AttackDefinition::direct("Hieb", 1, 5).is_zero_intent());
        let multi = AttackDefinition::utility("Salve").with_multi_hit(MultiHitSpec {
            hits: 3,
            hit_chance: 0.5,
            per_hit: DamageRange::new(1, 10),
            guaranteed_min_per_hit: None,
        });
        assert!(!multi.is_zero_intent());
    }
}
