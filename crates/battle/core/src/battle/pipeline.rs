//! The ordered attack-resolution pipeline.
//!
//! One attack resolves through a fixed sequence of named stages. The order
//! is a contract, not an implementation detail: DoT ticks before the new
//! attack lands, evasion is checked before reductions, reflection reads the
//! post-reduction figure, and so on. Each stage appends its structured
//! events to the round entry.
//!
//! # Stage order
//!
//! 1. Stun override: the whole attack step is skipped, DoT still ticks.
//! 2. Pre-attack DoT tick on the defender, attributable to the attacker.
//! 3. Confusion override: 77% self-hit branch, consumed either way.
//! 4. Airborne defender: forced miss, nothing reaches the target.
//! 5. Damage roll, consuming any armed multiplier/boost, cap-damage applied.
//! 6. Outgoing modifiers on the attacker, overflow becomes self-damage.
//! 7. Incoming modifiers on the defender: evade, percent, flat, reflect,
//!    absorb; counter-damage retaliates regardless of the dodge outcome.
//! 8. Damage application, then counter/reflect retaliation, then the
//!    attacker's self-heal, in that chronological order.
//! 9. Win check, defender first: the defender's HP loss precedes the
//!    retaliation, so a double KO falls to the attacker.
//! 10. Post-hit effect application (only if the attack reached the defender).
//! 11. Delayed-defense promotion (only if the attack landed with intent).
//! 12. Airborne landing cleanup; the takeoff attack's cooldown starts here.
//! 13. Cooldown bookkeeping and reload gating for the used attack.

use crate::card::{AttackDefinition, DamageRange};
use crate::combat::{roll_attack_damage, RollSpec};
use crate::config::BattleConfig;
use crate::effect::{
    activate_queued_defense, apply_on_hit, AirborneState, DamageCap, EffectKind, IncomingKind,
    OutgoingKind,
};
use crate::env::{compute_seed, RngOracle, RollStream};
use crate::log::{RoundAction, RoundEntry, SubEvent};

use super::combatant::{Combatant, Side};

/// Outcome of resolving one action.
#[derive(Clone, Debug)]
pub(crate) struct Resolution {
    pub entry: RoundEntry,
    pub winner: Option<Side>,
}

/// Seed helper bound to one action: battle seed, action nonce, acting side.
struct Seeds {
    battle_seed: u64,
    nonce: u64,
    side: Side,
}

impl Seeds {
    fn stream(&self, stream: u32) -> u64 {
        compute_seed(self.battle_seed, self.nonce, self.side.index() as u32, stream)
    }

    /// Base seed handed to the damage roller, which derives its own streams.
    fn roll_base(&self) -> u64 {
        self.stream(1_000)
    }
}

/// Resolves one action of `side` against its opponent.
///
/// Validation (turn order, cooldowns, reload gating) has already happened;
/// this function only mutates state and reports what happened.
#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_action(
    rng: &dyn RngOracle,
    battle_seed: u64,
    nonce: u64,
    round: u32,
    side: Side,
    attack_index: usize,
    attacker: &mut Combatant,
    defender: &mut Combatant,
) -> Resolution {
    let seeds = Seeds {
        battle_seed,
        nonce,
        side,
    };

    // Airborne owners land with the stored range, ignoring the submitted
    // index; the takeoff attack's cooldown starts only after this.
    let landing = match attacker.effects.airborne {
        AirborneState::InFlight {
            landing,
            attack_index,
            cooldown_after,
        } => Some((landing, attack_index, cooldown_after)),
        AirborneState::Grounded => None,
    };

    let (attack, attack_index, action) = match landing {
        Some((range, takeoff_index, _)) => {
            let name = attacker.card.attacks[takeoff_index].name.clone();
            let mut landing_attack = AttackDefinition::direct(name.clone(), range.min, range.max);
            landing_attack.effects.clear();
            (
                landing_attack,
                takeoff_index,
                RoundAction::ForcedLanding { name },
            )
        }
        None => {
            let attack = attacker.card.attacks[attack_index].clone();
            let name = attack.name.clone();
            (attack, attack_index, RoundAction::Attack { name })
        }
    };

    let mut entry = RoundEntry::new(round, attacker.name(), defender.name(), action);

    // Stage 1: stun override. No roll, no effects; DoT still applies and
    // cooldown ticking happens at handoff as usual.
    if attacker.effects.stun_pending {
        attacker.effects.stun_pending = false;
        entry.action = RoundAction::Stunned;
        tracing::debug!(side = %side, "stunned, action skipped");

        let winner = tick_dot(side, defender, &mut entry);
        return Resolution { entry, winner };
    }

    // Stage 2: pre-attack DoT tick on the defender.
    if let Some(winner) = tick_dot(side, defender, &mut entry) {
        return Resolution {
            entry,
            winner: Some(winner),
        };
    }

    // Stage 3: confusion override. Consumed regardless of the branch.
    if attacker.effects.confusion_pending {
        attacker.effects.confusion_pending = false;
        if rng.chance(
            seeds.stream(RollStream::Confusion.into()),
            BattleConfig::CONFUSION_SELF_HIT_CHANCE,
        ) {
            let potential = max_potential(&attack, attacker.attack_buffs[attack_index]);
            let (lo, hi) = if potential <= BattleConfig::SELF_HIT_POTENTIAL_SPLIT {
                (
                    BattleConfig::SELF_HIT_LIGHT_MIN,
                    BattleConfig::SELF_HIT_LIGHT_MAX,
                )
            } else {
                (
                    BattleConfig::SELF_HIT_HEAVY_MIN,
                    BattleConfig::SELF_HIT_HEAVY_MAX,
                )
            };
            let self_damage = rng.range(seeds.stream(RollStream::Confusion.at(1)), lo, hi);
            attacker.apply_damage(self_damage);
            entry.action = RoundAction::ConfusedSelfHit;
            entry.self_damage = self_damage;
            tracing::debug!(side = %side, self_damage, "confusion self-hit");

            let winner = attacker.is_defeated().then(|| side.opponent());
            return Resolution { entry, winner };
        }
        entry.events.push(SubEvent::ConfusionResisted);
    }

    // Stage 4: airborne defender forces a single miss. The attack is still
    // spent, so cooldown and reload gating apply.
    if defender.effects.airborne.is_in_flight() {
        entry.events.push(SubEvent::ForcedMiss);
        if attacker.effects.queued_defense.is_some() {
            entry.events.push(SubEvent::DefenseDeferred);
        }
        finish_attack_bookkeeping(attacker, defender, &attack, attack_index, landing, &mut entry);
        return Resolution {
            entry,
            winner: None,
        };
    }

    // Stage 5: damage roll. Armed multiplier and boost are consumed here,
    // one use each, whether or not the attack ultimately lands.
    let multiplier = attacker.effects.take_multiplier().unwrap_or(1.0);
    let boost = attacker.effects.take_boost().unwrap_or(0);
    let guaranteed = attack.has_guaranteed_hit();
    let roll_spec = RollSpec {
        base: attack.damage,
        buff_flat: attacker.attack_buffs[attack_index] + boost,
        multiplier,
        multi_hit: attack.multi_hit.as_ref(),
        force_max: false,
        guaranteed_hit: guaranteed,
    };
    let roll = roll_attack_damage(rng, seeds.roll_base(), &roll_spec);
    entry.critical = roll.critical;
    let mut damage = apply_damage_cap(&attack, roll.damage);
    tracing::trace!(side = %side, damage, critical = roll.critical, "damage rolled");

    // Stage 6: outgoing modifiers on the attacker.
    damage = apply_outgoing(attacker, damage, &mut entry);
    if attacker.is_defeated() {
        return Resolution {
            entry,
            winner: Some(side.opponent()),
        };
    }

    // Stage 7: incoming modifiers on the defender.
    let incoming = apply_incoming(defender, damage, guaranteed, &mut entry);
    entry.dodged = incoming.dodged;
    damage = incoming.damage;

    // Stage 8: the hit lands first, retaliation follows, then the self-heal.
    if damage > 0 {
        defender.apply_damage(damage);
    }
    entry.damage = damage;

    if incoming.counter > 0 {
        attacker.apply_damage(incoming.counter);
        entry.self_damage += incoming.counter;
        entry.events.push(SubEvent::Counter {
            damage: incoming.counter,
        });
    }
    if incoming.reflected > 0 {
        attacker.apply_damage(incoming.reflected);
        entry.self_damage += incoming.reflected;
        entry.events.push(SubEvent::Reflected {
            damage: incoming.reflected,
        });
    }

    if let Some(heal_range) = attack.heal {
        let amount = rng.range(
            seeds.stream(RollStream::Heal.into()),
            heal_range.min,
            heal_range.max,
        );
        let restored = attacker.heal(amount);
        if restored > 0 {
            entry.heal = restored;
            entry.events.push(SubEvent::Healed { amount: restored });
        }
    }

    // Stage 9: win check, defender first. The defender's HP loss happened
    // before the retaliation, so a double KO falls to the attacker.
    if defender.is_defeated() {
        return Resolution {
            entry,
            winner: Some(side),
        };
    }
    if attacker.is_defeated() {
        return Resolution {
            entry,
            winner: Some(side.opponent()),
        };
    }

    // Stage 10: post-hit effects, only if the attack reached the defender.
    let reached = !incoming.dodged;
    let had_queued_defense = attacker.effects.queued_defense.is_some();
    if reached {
        for (index, spec) in attack.effects.iter().enumerate() {
            let event = apply_on_hit(
                spec,
                rng,
                seeds.stream(RollStream::EffectChance.at(index as u32)),
                seeds.stream(RollStream::EffectPayload.at(index as u32)),
                side,
                attack_index,
                &mut attacker.effects,
                &mut defender.effects,
            );
            if let Some(event) = event {
                entry.events.push(event);
            }
        }
    }

    // Stage 11: delayed-defense promotion. Only a landing attack with real
    // damage intent activates a previously queued defense; a miss leaves it
    // queued untouched.
    if had_queued_defense {
        let landed = reached && !attack.is_zero_intent();
        if landed {
            if let Some(event) = activate_queued_defense(&mut attacker.effects) {
                entry.events.push(event);
            }
        } else {
            entry.events.push(SubEvent::DefenseDeferred);
        }
    }

    // Stages 12 + 13: landing cleanup, cooldowns, reload gating.
    finish_attack_bookkeeping(attacker, defender, &attack, attack_index, landing, &mut entry);

    Resolution {
        entry,
        winner: None,
    }
}

/// Stage 2 helper: burning stacks the acting side applied tick against the
/// defender before the new attack lands. Returns the winner if the tick
/// finishes the battle.
fn tick_dot(side: Side, defender: &mut Combatant, entry: &mut RoundEntry) -> Option<Side> {
    let dot = defender.effects.tick_burning_from(side);
    if dot == 0 {
        return None;
    }
    defender.apply_damage(dot);
    entry.events.push(SubEvent::BurnTick { damage: dot });
    defender.is_defeated().then_some(side)
}

/// Cap-damage effects bound the final rolled figure; `attack_min` caps to
/// the attack's own minimum.
fn apply_damage_cap(attack: &AttackDefinition, damage: u32) -> u32 {
    for spec in &attack.effects {
        if let EffectKind::CapDamage { cap } = spec.kind {
            let limit = match cap {
                DamageCap::AttackMin => attack.damage.min,
                DamageCap::Fixed(value) => value,
            };
            return damage.min(limit);
        }
    }
    damage
}

/// Stage 6: reductions queued on the attacker's own outgoing damage.
/// Flat overflow beyond the rolled damage becomes self-damage, never a
/// negative figure.
fn apply_outgoing(attacker: &mut Combatant, mut damage: u32, entry: &mut RoundEntry) -> u32 {
    let queued: Vec<_> = attacker.effects.outgoing.drain(..).collect();
    let mut kept = Vec::new();
    for mut modifier in queued {
        let (reduced, overflow) = match modifier.kind {
            OutgoingKind::FlatReduction(amount) => {
                let reduced = amount.min(damage);
                (reduced, amount - reduced)
            }
            OutgoingKind::PercentReduction(percent) => {
                ((damage * percent.min(100)) / 100, 0)
            }
        };
        damage -= reduced;
        if overflow > 0 {
            attacker.apply_damage(overflow);
            entry.self_damage += overflow;
        }
        if reduced > 0 || overflow > 0 {
            entry.events.push(SubEvent::OutgoingReduced {
                amount: reduced,
                overflow,
            });
        }

        modifier.uses = modifier.uses.saturating_sub(1);
        if modifier.uses > 0 {
            kept.push(modifier);
        }
    }
    attacker.effects.outgoing = kept;
    damage
}

struct IncomingOutcome {
    damage: u32,
    dodged: bool,
    counter: u32,
    reflected: u32,
}

/// Stage 7: the defender's queued incoming modifiers, in stage order.
///
/// An engaged evade cancels every later step for this attack but leaves the
/// later modifiers queued; counter damage retaliates whether or not the
/// dodge mattered. A guaranteed-hit attack pierces the evade (the evade is
/// still consumed) and proceeds through reductions normally.
fn apply_incoming(
    defender: &mut Combatant,
    mut damage: u32,
    guaranteed: bool,
    entry: &mut RoundEntry,
) -> IncomingOutcome {
    let queued: Vec<_> = defender.effects.incoming.drain(..).collect();
    let mut kept = Vec::new();
    let mut dodged = false;
    let mut counter = 0;
    let mut reflected = 0;

    for mut modifier in queued {
        if dodged {
            kept.push(modifier);
            continue;
        }
        match modifier.kind {
            IncomingKind::Evade { counter: c } => {
                counter += c;
                if guaranteed {
                    entry.events.push(SubEvent::EvadePierced);
                } else {
                    dodged = true;
                    damage = 0;
                    entry.events.push(SubEvent::Dodged);
                }
            }
            IncomingKind::PercentReduction(percent) => {
                damage -= (damage * percent.min(100)) / 100;
            }
            IncomingKind::FlatReduction(amount) => {
                damage = damage.saturating_sub(amount);
            }
            IncomingKind::Reflect { fraction } => {
                reflected += (f64::from(damage) * f64::from(fraction)).round() as u32;
            }
            IncomingKind::Absorb => {
                if damage > 0 {
                    defender.effects.absorbed_total += damage;
                    entry.events.push(SubEvent::Absorbed { amount: damage });
                    damage = 0;
                }
            }
        }

        modifier.uses = modifier.uses.saturating_sub(1);
        if modifier.uses > 0 {
            kept.push(modifier);
        }
    }

    defender.effects.incoming = kept;
    defender
        .effects
        .incoming
        .sort_by_key(|m| m.kind.stage_order());

    IncomingOutcome {
        damage,
        dodged,
        counter,
        reflected,
    }
}

/// Stages 12 + 13: landing cleanup, then cooldown and reload bookkeeping
/// for the attack that was just spent.
fn finish_attack_bookkeeping(
    attacker: &mut Combatant,
    defender: &Combatant,
    attack: &AttackDefinition,
    attack_index: usize,
    landing: Option<(DamageRange, usize, Option<u8>)>,
    entry: &mut RoundEntry,
) {
    if let Some((_, takeoff_index, cooldown_after)) = landing {
        attacker.effects.airborne = AirborneState::Grounded;
        entry.events.push(SubEvent::AirborneLanded);
        if let Some(turns) = cooldown_after {
            start_cooldown(attacker, takeoff_index, turns, entry);
        }
        return;
    }

    if attack.requires_reload {
        attacker.reload_pending[attack_index] = true;
    }

    // Explicit cooldown wins, then the dynamic burning-scaled one, then the
    // strong-attack rule. Airborne takeoffs defer to the landing.
    let enters_flight = attacker.effects.airborne.is_in_flight();
    let dynamic = attack
        .cooldown_from_burning_plus
        .map(|plus| defender.effects.burning.len() as u8 + plus);
    let cooldown = attack.cooldown_turns.or(dynamic).or_else(|| {
        attacker
            .is_strong_attack(attack_index)
            .then_some(BattleConfig::STRONG_ATTACK_COOLDOWN)
    });

    if let Some(turns) = cooldown {
        if !enters_flight && turns > 0 {
            start_cooldown(attacker, attack_index, turns, entry);
        }
    }
}

fn start_cooldown(attacker: &mut Combatant, attack_index: usize, turns: u8, entry: &mut RoundEntry) {
    attacker.cooldowns[attack_index] = turns;
    entry.events.push(SubEvent::CooldownStarted {
        attack: attacker.card.attacks[attack_index].name.clone(),
        turns,
    });
}

/// Max potential damage of an attack including the flat buff; selects the
/// confusion self-damage band and feeds AI ranking.
pub(crate) fn max_potential(attack: &AttackDefinition, buff: u32) -> u32 {
    match &attack.multi_hit {
        Some(multi) => multi.hits * multi.per_hit.max + buff,
        None => attack.damage.max + buff,
    }
}
