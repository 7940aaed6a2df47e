//! Menu catalog entries.

use serde::{Deserialize, Serialize};

use crate::types::{ItemId, Price};

/// A dish on the menu.
///
/// Catalog entries are immutable once loaded. The cart keeps its own copy of
/// each item it holds, taken when the item was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique, non-empty identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Display text.
    #[serde(default)]
    pub description: String,
    /// Unit price in yuan.
    pub price: Price,
    /// Image URL or asset path.
    #[serde(default)]
    pub image: String,
}

impl MenuItem {
    /// Create a menu item with an empty description and image.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}
