//! Persistent buff-store oracle.

use crate::battle::PlayerId;
use crate::config::BattleConfig;

/// Read-only access to per-player persistent buffs.
///
/// Consulted exactly once, at battle setup, to compute starting HP and flat
/// attack bonuses. The engine performs no further reads during resolution.
pub trait BuffOracle: Send + Sync + std::fmt::Debug {
    /// Flat damage bonus per attack index for this player's card.
    fn attack_buffs(&self, player: PlayerId, card: &str) -> [u32; BattleConfig::MAX_ATTACKS];

    /// Flat bonus on the card's base max HP.
    fn health_buff(&self, player: PlayerId, card: &str) -> u32;
}

/// Buff store with no entries. Used for AI combatants and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBuffs;

impl BuffOracle for NoBuffs {
    fn attack_buffs(&self, _player: PlayerId, _card: &str) -> [u32; BattleConfig::MAX_ATTACKS] {
        [0; BattleConfig::MAX_ATTACKS]
    }

    fn health_buff(&self, _player: PlayerId, _card: &str) -> u32 {
        0
    }
}
