//! Turn state machine for one battle.
//!
//! A [`Battle`] owns exactly two [`Combatant`]s and resolves submitted
//! actions strictly turn by turn until one side's HP reaches zero (or the
//! battle is aborted). All mutation flows through [`Battle::submit_action`],
//! [`Battle::reload`], and [`Battle::abort`]; rejected actions leave state
//! untouched.

mod combatant;
mod error;
mod pipeline;

pub use combatant::{Combatant, Control, PlayerId, Side};
pub use error::ActionError;
pub(crate) use pipeline::max_potential;

use crate::ai;
use crate::config::BattleConfig;
use crate::env::BattleEnv;
use crate::log::{BattleLog, RoundAction, RoundEntry};

/// Battle lifecycle phase. Exactly one side awaits action at any time
/// before a terminal phase is reached; terminal phases are final.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    AwaitingAction(Side),
    Finished { winner: Side },
    /// Explicitly cancelled; carries no winner.
    Aborted,
}

/// Public outcome of one accepted action.
#[derive(Clone, Debug)]
pub struct ActionResult {
    /// Rendered transcript fragment for this action.
    pub log_fragment: String,
    /// The structured event behind the fragment.
    pub entry: RoundEntry,
    pub hp_a: u32,
    pub hp_b: u32,
    pub status_a: Vec<String>,
    pub status_b: Vec<String>,
    pub finished: bool,
    pub winner: Option<Side>,
}

/// One battle from initiation to a terminal outcome.
#[derive(Clone, Debug)]
pub struct Battle {
    combatants: [Combatant; 2],
    phase: BattlePhase,
    config: BattleConfig,
    log: BattleLog,
    round: u32,
    nonce: u64,
    seed: u64,
}

impl Battle {
    /// Starts a battle with side A acting first.
    pub fn start(a: Combatant, b: Combatant, seed: u64) -> Self {
        Self::start_with_config(a, b, seed, BattleConfig::default())
    }

    pub fn start_with_config(a: Combatant, b: Combatant, seed: u64, config: BattleConfig) -> Self {
        tracing::debug!(card_a = a.name(), card_b = b.name(), seed, "battle started");
        let log = BattleLog::new(config.recent_rounds);
        Self {
            combatants: [a, b],
            phase: BattlePhase::AwaitingAction(Side::A),
            config,
            log,
            round: 0,
            nonce: 0,
            seed,
        }
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            BattlePhase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Submits an attack for `side`. The full resolution pipeline runs and
    /// the turn passes to the opponent (unless the battle ends).
    ///
    /// An airborne side is locked to its stored landing attack; the
    /// submitted index is ignored in that case.
    pub fn submit_action(
        &mut self,
        env: &BattleEnv<'_>,
        side: Side,
        attack_index: usize,
    ) -> Result<ActionResult, ActionError> {
        let rng = env.rng()?;
        self.validate_actor(side)?;

        let attacker = &self.combatants[side.index()];
        let forced_landing = attacker.effects.airborne.is_in_flight();
        if !forced_landing {
            let count = attacker.card.attacks.len();
            if attack_index >= count {
                return Err(ActionError::InvalidAttackIndex {
                    index: attack_index,
                    count,
                });
            }
            let remaining = attacker.cooldowns[attack_index];
            if remaining > 0 {
                return Err(ActionError::OnCooldown {
                    name: attacker.card.attacks[attack_index].name.clone(),
                    remaining,
                });
            }
            if attacker.reload_pending[attack_index] {
                return Err(ActionError::ReloadRequired {
                    name: attacker.card.attacks[attack_index].name.clone(),
                });
            }
        }

        self.round += 1;
        self.nonce += 1;
        let (seed, nonce, round) = (self.seed, self.nonce, self.round);
        let (attacker, defender) = self.pair_mut(side);
        let resolution = pipeline::resolve_action(
            rng,
            seed,
            nonce,
            round,
            side,
            attack_index,
            attacker,
            defender,
        );

        Ok(self.finish_resolution(side, resolution))
    }

    /// Clears the reload flag for one attack. A distinct low-cost action
    /// that does not consume the turn.
    pub fn reload(&mut self, side: Side, attack_index: usize) -> Result<ActionResult, ActionError> {
        self.validate_actor(side)?;

        let combatant = &mut self.combatants[side.index()];
        let count = combatant.card.attacks.len();
        if attack_index >= count {
            return Err(ActionError::InvalidAttackIndex {
                index: attack_index,
                count,
            });
        }
        if !combatant.reload_pending[attack_index] {
            return Err(ActionError::ReloadNotPending {
                name: combatant.card.attacks[attack_index].name.clone(),
            });
        }
        combatant.reload_pending[attack_index] = false;

        let attack = &combatant.card.attacks[attack_index];
        let reload_name = attack
            .reload_name
            .clone()
            .unwrap_or_else(|| attack.name.clone());
        self.round += 1;
        let entry = RoundEntry::new(
            self.round,
            self.combatants[side.index()].name(),
            self.combatants[side.opponent().index()].name(),
            RoundAction::Reload { name: reload_name },
        );
        tracing::debug!(side = %side, attack_index, "reloaded");

        Ok(self.record_entry(entry))
    }

    /// Lets an AI-controlled side take its turn: selection via the attack
    /// heuristic, then the normal resolution pipeline. When every attack is
    /// blocked by cooldowns, the AI passes instead; selection preference
    /// never bypasses cooldown enforcement.
    pub fn ai_take_turn(&mut self, env: &BattleEnv<'_>) -> Result<ActionResult, ActionError> {
        let side = self.awaiting_side()?;
        let me = &self.combatants[side.index()];
        if !me.control.is_ai() {
            return Err(ActionError::InvalidActor { side });
        }

        let opponent = &self.combatants[side.opponent().index()];
        let choice = ai::choose_attack(&self.config, me, opponent);

        if me.effects.airborne.is_in_flight() || me.attack_usable(choice) {
            return self.submit_action(env, side, choice);
        }

        tracing::debug!(side = %side, "every attack blocked, AI passes");
        self.round += 1;
        // A pass still counts as the side's attempt to act, so pending stun
        // and confusion are consumed by it.
        let me = &mut self.combatants[side.index()];
        me.effects.stun_pending = false;
        me.effects.confusion_pending = false;
        let entry = RoundEntry::new(
            self.round,
            self.combatants[side.index()].name(),
            self.combatants[side.opponent().index()].name(),
            RoundAction::Pass,
        );
        let next = side.opponent();
        self.combatants[next.index()].tick_cooldowns();
        self.phase = BattlePhase::AwaitingAction(next);
        Ok(self.record_entry(entry))
    }

    /// Explicit cancellation: a terminal transition with no winner.
    pub fn abort(&mut self) {
        if matches!(self.phase, BattlePhase::AwaitingAction(_)) {
            tracing::debug!("battle aborted");
            self.phase = BattlePhase::Aborted;
        }
    }

    fn awaiting_side(&self) -> Result<Side, ActionError> {
        match self.phase {
            BattlePhase::AwaitingAction(side) => Ok(side),
            BattlePhase::Finished { .. } | BattlePhase::Aborted => {
                Err(ActionError::BattleAlreadyFinished)
            }
        }
    }

    fn validate_actor(&self, side: Side) -> Result<(), ActionError> {
        let awaiting = self.awaiting_side()?;
        if side != awaiting {
            return Err(ActionError::InvalidActor { side });
        }
        Ok(())
    }

    fn pair_mut(&mut self, side: Side) -> (&mut Combatant, &mut Combatant) {
        let [a, b] = &mut self.combatants;
        match side {
            Side::A => (a, b),
            Side::B => (b, a),
        }
    }

    fn finish_resolution(&mut self, side: Side, resolution: pipeline::Resolution) -> ActionResult {
        match resolution.winner {
            Some(winner) => {
                tracing::debug!(winner = %winner, "battle finished");
                self.phase = BattlePhase::Finished { winner };
            }
            None => {
                let next = side.opponent();
                self.combatants[next.index()].tick_cooldowns();
                self.phase = BattlePhase::AwaitingAction(next);
            }
        }
        self.record_entry(resolution.entry)
    }

    fn record_entry(&mut self, entry: RoundEntry) -> ActionResult {
        let log_fragment = entry.render();
        self.log.push(entry.clone());

        debug_assert!(
            self.combatants.iter().all(|c| c.hp <= c.max_hp),
            "hp must stay within the buffed maximum"
        );

        ActionResult {
            log_fragment,
            entry,
            hp_a: self.combatants[0].hp,
            hp_b: self.combatants[1].hp,
            status_a: self.combatants[0].status_summary(),
            status_b: self.combatants[1].status_summary(),
            finished: !matches!(self.phase, BattlePhase::AwaitingAction(_)),
            winner: self.winner(),
        }
    }
}
