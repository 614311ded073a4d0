//! Errors surfaced while driving a battle.

use crate::env::OracleError;

use super::Side;

/// Caller-input errors. Every variant rejects the action and leaves battle
/// state unchanged; there is no partial mutation to recover from.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("battle is already finished")]
    BattleAlreadyFinished,

    #[error("it is not side {side}'s turn")]
    InvalidActor { side: Side },

    #[error("attack index {index} out of range (card has {count} attacks)")]
    InvalidAttackIndex { index: usize, count: usize },

    #[error("attack '{name}' is on cooldown for {remaining} more turns")]
    OnCooldown { name: String, remaining: u8 },

    #[error("attack '{name}' must be reloaded first")]
    ReloadRequired { name: String },

    #[error("attack '{name}' has no reload pending")]
    ReloadNotPending { name: String },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}
