//! In-memory oracle implementations backed by static data.

use std::collections::HashMap;

use battle_core::{BattleConfig, BuffOracle, CardDefinition, CatalogOracle, PlayerId};

/// Card catalog held in memory. Lookup is by exact card name; the seeded
/// pick is fully deterministic so mission opponents replay identically.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    cards: Vec<CardDefinition>,
}

impl StaticCatalog {
    pub fn new(cards: Vec<CardDefinition>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }
}

impl CatalogOracle for StaticCatalog {
    fn card(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.iter().find(|card| card.name == name)
    }

    fn random_card(&self, seed: u64) -> Option<&CardDefinition> {
        if self.cards.is_empty() {
            return None;
        }
        // SplitMix64 finalizer so neighboring seeds do not pick neighbors.
        let mut x = seed.wrapping_add(0x9e3779b97f4a7c15);
        x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
        x ^= x >> 31;
        self.cards.get((x % self.cards.len() as u64) as usize)
    }

    fn len(&self) -> usize {
        self.cards.len()
    }
}

/// Buff store held in memory, keyed by player and card name. Players
/// without an entry simply have no buffs.
#[derive(Clone, Debug, Default)]
pub struct StaticBuffStore {
    attack: HashMap<(PlayerId, String), [u32; BattleConfig::MAX_ATTACKS]>,
    health: HashMap<(PlayerId, String), u32>,
}

impl StaticBuffStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_attack_buffs(
        &mut self,
        player: PlayerId,
        card: impl Into<String>,
        buffs: [u32; BattleConfig::MAX_ATTACKS],
    ) {
        self.attack.insert((player, card.into()), buffs);
    }

    pub fn set_health_buff(&mut self, player: PlayerId, card: impl Into<String>, amount: u32) {
        self.health.insert((player, card.into()), amount);
    }
}

impl BuffOracle for StaticBuffStore {
    fn attack_buffs(&self, player: PlayerId, card: &str) -> [u32; BattleConfig::MAX_ATTACKS] {
        self.attack
            .get(&(player, card.to_string()))
            .copied()
            .unwrap_or([0; BattleConfig::MAX_ATTACKS])
    }

    fn health_buff(&self, player: PlayerId, card: &str) -> u32 {
        self.health
            .get(&(player, card.to_string()))
            .copied()
            .unwrap_or(0)
    }
}
