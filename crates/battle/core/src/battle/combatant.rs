//! Per-side in-battle state.

use crate::card::{AttackDefinition, CardDefinition, DamageRange};
use crate::config::BattleConfig;
use crate::effect::EffectState;
use crate::env::{BattleEnv, OracleError};

/// External player identity. The AI side carries no player id at all, which
/// keeps synthetic sentinels out of the id space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u64);

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who controls a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Control {
    Human(PlayerId),
    Ai,
}

impl Control {
    pub fn is_ai(&self) -> bool {
        matches!(self, Control::Ai)
    }
}

/// One of the two battle sides. A battle always has exactly two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Index into the battle's two-element combatant array.
    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// One side's mutable in-battle state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub control: Control,
    pub card: CardDefinition,
    /// Current HP; never negative, clamped to 0 on any reduction.
    pub hp: u32,
    /// Base card HP plus the persistent health buff.
    pub max_hp: u32,
    /// Flat damage bonus per attack index from persistent buffs.
    pub attack_buffs: [u32; BattleConfig::MAX_ATTACKS],
    /// Turns remaining per attack index; 0 means ready. A cooldown entry
    /// reaching 0 is cleared, never left at 0.
    pub cooldowns: [u8; BattleConfig::MAX_ATTACKS],
    /// Attack indices disabled until the dedicated reload action.
    pub reload_pending: [bool; BattleConfig::MAX_ATTACKS],
    pub effects: EffectState,
}

impl Combatant {
    /// Combatant at full HP with explicit buffs.
    pub fn new(
        control: Control,
        card: CardDefinition,
        health_buff: u32,
        attack_buffs: [u32; BattleConfig::MAX_ATTACKS],
    ) -> Self {
        let max_hp = card.max_hp + health_buff;
        Self {
            control,
            card,
            hp: max_hp,
            max_hp,
            attack_buffs,
            cooldowns: [0; BattleConfig::MAX_ATTACKS],
            reload_pending: [false; BattleConfig::MAX_ATTACKS],
            effects: EffectState::default(),
        }
    }

    /// Combatant with buffs read from the environment's buff store.
    /// AI combatants carry no persistent buffs.
    pub fn from_env(
        control: Control,
        card: CardDefinition,
        env: &BattleEnv<'_>,
    ) -> Result<Self, OracleError> {
        let (health_buff, attack_buffs) = match control {
            Control::Human(player) => {
                let buffs = env.buffs()?;
                (
                    buffs.health_buff(player, &card.name),
                    buffs.attack_buffs(player, &card.name),
                )
            }
            Control::Ai => (0, [0; BattleConfig::MAX_ATTACKS]),
        };
        Ok(Self::new(control, card, health_buff, attack_buffs))
    }

    /// Combatant built from a catalog lookup, buffs included.
    pub fn from_catalog(
        control: Control,
        card_name: &str,
        env: &BattleEnv<'_>,
    ) -> Result<Self, OracleError> {
        let card = env
            .catalog()?
            .card(card_name)
            .cloned()
            .ok_or_else(|| OracleError::UnknownCard(card_name.to_string()))?;
        Self::from_env(control, card, env)
    }

    pub fn name(&self) -> &str {
        &self.card.name
    }

    pub fn attack(&self, index: usize) -> Option<&AttackDefinition> {
        self.card.attacks.get(index)
    }

    /// Attack damage range shifted by this combatant's persistent buff.
    pub fn buffed_range(&self, index: usize) -> DamageRange {
        let attack = &self.card.attacks[index];
        attack.damage.buffed(self.attack_buffs[index])
    }

    /// Strong-attack rule: buffed min and max both exceed fixed thresholds.
    pub fn is_strong_attack(&self, index: usize) -> bool {
        let range = self.buffed_range(index);
        range.min > BattleConfig::STRONG_ATTACK_MIN && range.max > BattleConfig::STRONG_ATTACK_MAX
    }

    /// Reduces HP, clamping at 0. Returns the damage actually applied.
    pub fn apply_damage(&mut self, damage: u32) -> u32 {
        let dealt = damage.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Restores HP up to the buffed maximum. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp - self.hp);
        self.hp += restored;
        restored
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Decrements every running cooldown by one turn. Entries reaching 0
    /// simply become ready.
    pub fn tick_cooldowns(&mut self) {
        for cooldown in &mut self.cooldowns {
            *cooldown = cooldown.saturating_sub(1);
        }
    }

    /// True when the attack can be selected right now.
    pub fn attack_usable(&self, index: usize) -> bool {
        index < self.card.attacks.len() && self.cooldowns[index] == 0 && !self.reload_pending[index]
    }

    /// Short status labels for the driver's display layer.
    pub fn status_summary(&self) -> Vec<String> {
        let mut labels = Vec::new();
        for stack in &self.effects.burning {
            labels.push(format!(
                "brennt ({} Schaden, {} Runden)",
                stack.damage, stack.remaining_turns
            ));
        }
        if self.effects.confusion_pending {
            labels.push("verwirrt".to_string());
        }
        if self.effects.stun_pending {
            labels.push("betäubt".to_string());
        }
        if self.effects.airborne.is_in_flight() {
            labels.push("in der Luft".to_string());
        }
        if self.effects.queued_defense.is_some() {
            labels.push("Verteidigung vorbereitet".to_string());
        }
        if self.effects.absorbed_total > 0 {
            labels.push(format!("{} Schaden absorbiert", self.effects.absorbed_total));
        }
        for (index, attack) in self.card.attacks.iter().enumerate() {
            if self.cooldowns[index] > 0 {
                labels.push(format!(
                    "{}: {} Runden Abklingzeit",
                    attack.name, self.cooldowns[index]
                ));
            }
            if self.reload_pending[index] {
                labels.push(format!("{}: nachladen erforderlich", attack.name));
            }
        }
        labels
    }
}
