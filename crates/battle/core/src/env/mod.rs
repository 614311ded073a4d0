//! Traits describing read-only collaborator data.
//!
//! Oracles expose the card catalog, persistent buffs, and the random number
//! source. The [`BattleEnv`] aggregate bundles them so the engine can reach
//! everything it needs without hard coupling to concrete implementations.

mod buffs;
mod catalog;
mod error;
mod rng;

pub use buffs::{BuffOracle, NoBuffs};
pub use catalog::CatalogOracle;
pub use error::OracleError;
pub use rng::{compute_seed, PcgRng, RngOracle, RollStream};

/// Aggregates the read-only oracles required by battle setup and resolution.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    rng: Option<&'a dyn RngOracle>,
    catalog: Option<&'a dyn CatalogOracle>,
    buffs: Option<&'a dyn BuffOracle>,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        rng: Option<&'a dyn RngOracle>,
        catalog: Option<&'a dyn CatalogOracle>,
        buffs: Option<&'a dyn BuffOracle>,
    ) -> Self {
        Self { rng, catalog, buffs }
    }

    /// Environment with only an RNG: enough for resolving actions on an
    /// already-constructed battle.
    pub fn with_rng(rng: &'a dyn RngOracle) -> Self {
        Self {
            rng: Some(rng),
            catalog: None,
            buffs: None,
        }
    }

    pub fn with_all(
        rng: &'a dyn RngOracle,
        catalog: &'a dyn CatalogOracle,
        buffs: &'a dyn BuffOracle,
    ) -> Self {
        Self {
            rng: Some(rng),
            catalog: Some(catalog),
            buffs: Some(buffs),
        }
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the CatalogOracle, or an error if not available.
    pub fn catalog(&self) -> Result<&'a dyn CatalogOracle, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the BuffOracle, or an error if not available.
    pub fn buffs(&self) -> Result<&'a dyn BuffOracle, OracleError> {
        self.buffs.ok_or(OracleError::BuffsNotAvailable)
    }
}
