//! Menu catalog loaded from a YAML file.
//!
//! The file is a list of dishes:
//!
//! ```yaml
//! - id: milk-tea
//!   name: Milk Tea
//!   description: Brown sugar pearls
//!   price: 12.5
//!   image: /images/milk-tea.jpg
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use elena_menu_core::{ItemId, MenuItem};
use thiserror::Error;
use tracing::info;

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog is not a valid dish list: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("catalog lists dish '{0}' more than once")]
    DuplicateId(ItemId),
}

/// The dishes on offer, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Read and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not a dish list, or
    /// repeats an id.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let catalog = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), dishes = catalog.items.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns error if the text is not a dish list or repeats an id.
    pub fn from_yaml(content: &str) -> Result<Self, CatalogError> {
        let items: Vec<MenuItem> = serde_yaml::from_str(content)?;

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }

        Ok(Self { items })
    }

    /// Look up a dish by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    /// All dishes.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}

/// `menu list`
pub fn list(catalog: &Catalog) {
    if catalog.items().is_empty() {
        info!("The menu is empty");
        return;
    }

    for item in catalog.items() {
        if item.description.is_empty() {
            info!("{:<16} {:<24} {}", item.id.as_str(), item.name, item.price);
        } else {
            info!(
                "{:<16} {:<24} {}  {}",
                item.id.as_str(),
                item.name,
                item.price,
                item.description
            );
        }
    }
}
