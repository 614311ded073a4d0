//! Status-effect catalog and resolution.
//!
//! [`spec`] holds the closed catalog of effect kinds an attack can carry,
//! [`active`] the mutable per-combatant effect state, and [`resolver`] the
//! per-kind application rules invoked by the battle pipeline.

mod active;
mod resolver;
mod spec;

pub use active::{
    AirborneState, BurningStack, EffectState, IncomingKind, IncomingModifier, OutgoingKind,
    OutgoingModifier, PendingBoost, PendingMultiplier, QueuedDefense,
};
pub(crate) use resolver::{activate_queued_defense, apply_on_hit};
pub use spec::{DamageCap, DefenseKind, EffectKind, EffectSpec, TurnRange};
