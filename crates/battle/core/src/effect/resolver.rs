//! Per-kind effect application.
//!
//! One resolver arm per [`EffectKind`]. The pipeline calls
//! [`apply_on_hit`] for every effect spec on an attack that reached the
//! defender; each arm mutates the correct side's [`EffectState`] and reports
//! a structured log event.

use crate::battle::Side;
use crate::env::RngOracle;
use crate::log::SubEvent;

use super::active::{AirborneState, EffectState, IncomingKind, OutgoingKind, PendingBoost, PendingMultiplier, QueuedDefense};
use super::spec::{DefenseKind, EffectKind, EffectSpec};

/// Applies one attack effect after the attack reached the defender.
///
/// Rolls the effect's individual chance on `chance_seed`; payload randomness
/// (burning duration) draws from `payload_seed`. Returns the log event for
/// the application, or `None` when the chance roll failed or the kind is
/// attack-level only (guaranteed-hit, cap-damage) and applies elsewhere.
pub(crate) fn apply_on_hit(
    spec: &EffectSpec,
    rng: &dyn RngOracle,
    chance_seed: u64,
    payload_seed: u64,
    attacker_side: Side,
    attack_index: usize,
    attacker_fx: &mut EffectState,
    defender_fx: &mut EffectState,
) -> Option<SubEvent> {
    // Attack-level kinds are consumed by the roll stage, not here.
    if matches!(
        spec.kind,
        EffectKind::GuaranteedHit | EffectKind::CapDamage { .. }
    ) {
        return None;
    }

    if !rng.chance(chance_seed, spec.chance) {
        tracing::trace!(kind = %spec.kind, "effect chance roll failed");
        return None;
    }

    let event = match spec.kind {
        EffectKind::Burning { damage, duration } => {
            let turns = rng.range(payload_seed, u32::from(duration.min), u32::from(duration.max)) as u8;
            defender_fx.add_burning(damage, turns, attacker_side);
            SubEvent::BurningApplied { damage, turns }
        }
        EffectKind::Confusion => {
            defender_fx.confusion_pending = true;
            SubEvent::ConfusionApplied
        }
        EffectKind::Stun => {
            defender_fx.stun_pending = true;
            SubEvent::StunApplied
        }
        EffectKind::DamageMultiplier { multiplier, uses } => {
            attacker_fx.pending_multiplier = Some(PendingMultiplier { multiplier, uses });
            SubEvent::MultiplierArmed { multiplier }
        }
        EffectKind::DamageBoost { amount, uses } => {
            attacker_fx.pending_boost = Some(PendingBoost { amount, uses });
            SubEvent::BoostArmed { amount }
        }
        EffectKind::EnemyAttackReductionFlat { amount, uses } => {
            defender_fx.queue_outgoing(OutgoingKind::FlatReduction(amount), uses);
            SubEvent::EnemyAttackReduced {
                amount,
                percent: false,
            }
        }
        EffectKind::EnemyAttackReductionPercent { percent, uses } => {
            defender_fx.queue_outgoing(OutgoingKind::PercentReduction(percent), uses);
            SubEvent::EnemyAttackReduced {
                amount: percent,
                percent: true,
            }
        }
        EffectKind::DelayedDefense { defense } => {
            attacker_fx.queued_defense = Some(QueuedDefense { defense });
            SubEvent::DefenseQueued
        }
        EffectKind::Airborne {
            landing,
            landing_cooldown,
        } => {
            attacker_fx.airborne = AirborneState::InFlight {
                landing,
                attack_index,
                cooldown_after: landing_cooldown,
            };
            SubEvent::AirborneEntered
        }
        EffectKind::Evade { counter, uses } => {
            attacker_fx.queue_incoming(IncomingKind::Evade { counter }, uses);
            SubEvent::DefenseQueuedDirect
        }
        EffectKind::Reflect { fraction, uses } => {
            attacker_fx.queue_incoming(IncomingKind::Reflect { fraction }, uses);
            SubEvent::DefenseQueuedDirect
        }
        EffectKind::Absorb { uses } => {
            attacker_fx.queue_incoming(IncomingKind::Absorb, uses);
            SubEvent::DefenseQueuedDirect
        }
        EffectKind::GuaranteedHit | EffectKind::CapDamage { .. } => unreachable!(),
    };

    Some(event)
}

/// Turns a queued delayed defense into an active incoming modifier.
pub(crate) fn activate_queued_defense(fx: &mut EffectState) -> Option<SubEvent> {
    let queued = fx.queued_defense.take()?;
    let kind = match queued.defense {
        DefenseKind::Evade { counter } => IncomingKind::Evade { counter },
        DefenseKind::Reflect { fraction } => IncomingKind::Reflect { fraction },
        DefenseKind::Absorb => IncomingKind::Absorb,
    };
    fx.queue_incoming(kind, 1);
    Some(SubEvent::DefenseActivated)
}
