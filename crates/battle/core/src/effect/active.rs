//! Mutable per-combatant effect state.
//!
//! Everything here is owned by one [`crate::battle::Combatant`] and mutated
//! exclusively by the resolution pipeline.

use arrayvec::ArrayVec;

use crate::battle::Side;
use crate::card::DamageRange;
use crate::config::BattleConfig;
use crate::effect::DefenseKind;

/// One burning (DoT) stack. Ticks at the start of the applier's attacks
/// against the burning side until the duration runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BurningStack {
    pub damage: u32,
    pub remaining_turns: u8,
    pub applied_by: Side,
}

/// Queued modifier applied to the owner's next incoming attacks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncomingModifier {
    pub kind: IncomingKind,
    pub uses: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IncomingKind {
    /// Full miss plus fixed retaliation damage.
    Evade { counter: u32 },
    /// Percent reduction of incoming damage.
    PercentReduction(u32),
    /// Flat reduction of incoming damage.
    FlatReduction(u32),
    /// Fraction of post-reduction damage redirected at the attacker.
    Reflect { fraction: f32 },
    /// Damage diverted into the stored-absorb counter instead of HP.
    Absorb,
}

impl IncomingKind {
    /// Evaluation order within the incoming stage: evade before reductions,
    /// reductions before reflect, reflect before absorb.
    pub fn stage_order(&self) -> u8 {
        match self {
            IncomingKind::Evade { .. } => 0,
            IncomingKind::PercentReduction(_) => 1,
            IncomingKind::FlatReduction(_) => 2,
            IncomingKind::Reflect { .. } => 3,
            IncomingKind::Absorb => 4,
        }
    }
}

/// Queued modifier applied to the owner's own next outgoing attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutgoingModifier {
    pub kind: OutgoingKind,
    pub uses: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutgoingKind {
    /// Flat reduction; overflow beyond the rolled damage hits the attacker.
    FlatReduction(u32),
    /// Percent reduction of the rolled damage.
    PercentReduction(u32),
}

/// Armed damage multiplier, consumed one use per attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingMultiplier {
    pub multiplier: f32,
    pub uses: u8,
}

/// Armed flat damage boost, consumed one use per attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingBoost {
    pub amount: u32,
    pub uses: u8,
}

/// Defense waiting for the owner's next landing attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedDefense {
    pub defense: DefenseKind,
}

/// Two-phase airborne attack state.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AirborneState {
    #[default]
    Grounded,
    /// Owner is untargetable for the opponent's next attack and must land
    /// with the stored range on its own next turn.
    InFlight {
        landing: DamageRange,
        /// Attack index that triggered takeoff; its cooldown starts at landing.
        attack_index: usize,
        cooldown_after: Option<u8>,
    },
}

impl AirborneState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, AirborneState::InFlight { .. })
    }
}

/// All transient effect state carried by one combatant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectState {
    pub burning: ArrayVec<BurningStack, { BattleConfig::MAX_BURNING_STACKS }>,
    pub incoming: Vec<IncomingModifier>,
    pub outgoing: Vec<OutgoingModifier>,
    pub queued_defense: Option<QueuedDefense>,
    pub pending_multiplier: Option<PendingMultiplier>,
    pub pending_boost: Option<PendingBoost>,
    pub airborne: AirborneState,
    /// Consumed exactly once, when the owner next attempts to act.
    pub confusion_pending: bool,
    /// Consumed exactly once, when the owner next attempts to act.
    pub stun_pending: bool,
    /// Total damage diverted by absorb defenses. Stored, not yet spent.
    pub absorbed_total: u32,
}

impl EffectState {
    /// Adds a burning stack, dropping it silently once the stack limit is hit.
    pub fn add_burning(&mut self, damage: u32, turns: u8, applied_by: Side) {
        if !self.burning.is_full() {
            self.burning.push(BurningStack {
                damage,
                remaining_turns: turns,
                applied_by,
            });
        }
    }

    /// Ticks burning stacks applied by `attacker`: returns total tick damage
    /// and removes stacks whose duration expired.
    pub fn tick_burning_from(&mut self, attacker: Side) -> u32 {
        let mut total = 0;
        for stack in self.burning.iter_mut() {
            if stack.applied_by == attacker && stack.remaining_turns > 0 {
                total += stack.damage;
                stack.remaining_turns -= 1;
            }
        }
        self.burning.retain(|stack| stack.remaining_turns > 0);
        total
    }

    /// Queues an incoming modifier, keeping the stage evaluation order.
    pub fn queue_incoming(&mut self, kind: IncomingKind, uses: u8) {
        self.incoming.push(IncomingModifier { kind, uses });
        self.incoming.sort_by_key(|m| m.kind.stage_order());
    }

    pub fn queue_outgoing(&mut self, kind: OutgoingKind, uses: u8) {
        self.outgoing.push(OutgoingModifier { kind, uses });
    }

    /// Consumes one use of the armed multiplier, if any.
    pub fn take_multiplier(&mut self) -> Option<f32> {
        let pending = self.pending_multiplier.as_mut()?;
        let multiplier = pending.multiplier;
        pending.uses = pending.uses.saturating_sub(1);
        if pending.uses == 0 {
            self.pending_multiplier = None;
        }
        Some(multiplier)
    }

    /// Consumes one use of the armed flat boost, if any.
    pub fn take_boost(&mut self) -> Option<u32> {
        let pending = self.pending_boost.as_mut()?;
        let amount = pending.amount;
        pending.uses = pending.uses.saturating_sub(1);
        if pending.uses == 0 {
            self.pending_boost = None;
        }
        Some(amount)
    }
}
