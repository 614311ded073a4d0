//! Card catalog oracle.

use crate::card::CardDefinition;

/// Read-only access to the static card catalog.
///
/// The catalog is external collaborator data; the engine only ever reads it
/// at battle setup.
pub trait CatalogOracle: Send + Sync + std::fmt::Debug {
    /// Looks up a card by name.
    fn card(&self, name: &str) -> Option<&CardDefinition>;

    /// Picks a card deterministically from a seed (mission opponents).
    fn random_card(&self, seed: u64) -> Option<&CardDefinition>;

    /// Number of cards in the catalog.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
