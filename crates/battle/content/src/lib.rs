//! Static battle content and data-file loaders.
//!
//! This crate houses the built-in card roster and in-memory oracle
//! implementations, plus RON loaders for deployments that ship their
//! roster as data files. Content is consumed through the oracle traits in
//! `battle-core` and never appears in battle state.

mod cards;
mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use cards::builtin_catalog;
pub use catalog::{StaticBuffStore, StaticCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{CardCatalogFile, CardLoader};
