//! Attack selection for AI-controlled sides.
//!
//! A deterministic priority heuristic, not a search. Preferences are
//! evaluated top to bottom and the first applicable one wins; cooldown and
//! reload enforcement stays with the battle state machine, so the fallback
//! pick may still be rejected there (the AI then passes).

use crate::battle::{max_potential, Combatant};
use crate::config::BattleConfig;
use crate::effect::EffectKind;

/// Picks the attack index the AI plays this turn.
///
/// Priorities:
/// 1. Below the low-HP threshold, a usable healing attack.
/// 2. With a damage multiplier or boost armed, the hardest usable direct
///    hit, so the banked bonus is spent rather than wasted.
/// 3. A usable setup attack (multiplier or boost) when nothing is armed
///    yet, unless an enemy attack reduction is queued against us.
/// 4. The hardest usable attack by maximum potential damage.
/// 5. With nothing usable at all, the hardest attack regardless, letting
///    enforcement reject it and the turn become a pass.
pub fn choose_attack(config: &BattleConfig, me: &Combatant, opponent: &Combatant) -> usize {
    let usable: Vec<usize> = (0..me.card.attacks.len())
        .filter(|&index| me.attack_usable(index))
        .collect();

    let hp_percent = me.hp * 100 / me.max_hp.max(1);
    if hp_percent < config.ai_low_hp_percent {
        if let Some(&index) = usable
            .iter()
            .find(|&&index| me.card.attacks[index].heal.is_some())
        {
            tracing::debug!(hp_percent, index, "low HP, choosing heal");
            return index;
        }
    }

    let armed =
        me.effects.pending_multiplier.is_some() || me.effects.pending_boost.is_some();
    if armed {
        if let Some(index) = best_direct(me, &usable) {
            tracing::debug!(index, "bonus armed, spending it on the hardest hit");
            return index;
        }
    } else {
        let setup = usable.iter().copied().find(|&index| {
            me.card.attacks[index].effects.iter().any(|spec| {
                matches!(
                    spec.kind,
                    EffectKind::DamageMultiplier { .. } | EffectKind::DamageBoost { .. }
                )
            })
        });
        // A queued reduction on our own outgoing damage would blunt the
        // boosted follow-up, so skip the setup and just hit.
        if let Some(index) = setup {
            if me.effects.outgoing.is_empty() {
                tracing::debug!(index, "arming a damage bonus");
                return index;
            }
            if let Some(direct) = best_direct(me, &usable) {
                tracing::debug!(
                    direct,
                    "own damage is reduced, hitting instead of setting up"
                );
                return direct;
            }
        }
    }

    if let Some(&index) = usable
        .iter()
        .max_by_key(|&&index| potential(me, index))
    {
        tracing::debug!(index, opponent_hp = opponent.hp, "choosing hardest usable attack");
        return index;
    }

    // Everything is blocked; pick the hardest attack anyway and let the
    // battle reject it.
    let fallback = (0..me.card.attacks.len())
        .max_by_key(|&index| potential(me, index))
        .unwrap_or(0);
    tracing::debug!(fallback, "no usable attack");
    fallback
}

/// Hardest usable attack that actually deals damage.
fn best_direct(me: &Combatant, usable: &[usize]) -> Option<usize> {
    usable
        .iter()
        .copied()
        .filter(|&index| !me.card.attacks[index].is_zero_intent())
        .max_by_key(|&index| potential(me, index))
}

fn potential(me: &Combatant, index: usize) -> u32 {
    max_potential(&me.card.attacks[index], me.attack_buffs[index])
}
