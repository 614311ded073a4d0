//! Deterministic turn-based card-battle resolution engine.
//!
//! The engine is pure state-machine logic: it owns no I/O, no clock, and no
//! entropy of its own. Randomness, the card catalog, and persistent player
//! buffs arrive through the oracle traits in [`env`], which keeps every
//! battle replayable from its seed and makes the whole pipeline testable
//! with stub oracles.
//!
//! A battle is driven through [`battle::Battle`]: construct two
//! [`battle::Combatant`]s from [`card::CardDefinition`]s, submit one action
//! per turn, and read back structured [`log::RoundEntry`] values plus their
//! rendered German transcript fragments.

pub mod ai;
pub mod battle;
pub mod card;
pub mod combat;
pub mod config;
pub mod effect;
pub mod env;
pub mod log;

pub use battle::{ActionError, ActionResult, Battle, BattlePhase, Combatant, Control, PlayerId, Side};
pub use card::{AttackDefinition, ButtonStyle, CardDefinition, DamageRange, MultiHitSpec};
pub use config::BattleConfig;
pub use effect::{DamageCap, DefenseKind, EffectKind, EffectSpec, TurnRange};
pub use env::{BattleEnv, BuffOracle, CatalogOracle, NoBuffs, OracleError, PcgRng, RngOracle};
pub use log::{BattleLog, RoundAction, RoundEntry, SubEvent};
