//! Card catalog loader for RON data files.
//!
//! Deployments that ship their roster as data rather than code point the
//! loader at a RON file; the result is the same [`StaticCatalog`] the
//! built-in roster produces.

use std::path::Path;

use battle_core::CardDefinition;
use serde::{Deserialize, Serialize};

use crate::StaticCatalog;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Card catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalogFile {
    pub cards: Vec<CardDefinition>,
}

/// Loader for card catalogs from RON files.
pub struct CardLoader;

impl CardLoader {
    /// Load a card catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<StaticCatalog> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))?;
        Self::load_str(&content)
    }

    /// Load a card catalog from RON text.
    pub fn load_str(content: &str) -> LoadResult<StaticCatalog> {
        let file: CardCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;
        Ok(StaticCatalog::new(file.cards))
    }
}
