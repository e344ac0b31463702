//! Category to asset bindings used when spawning placed content

use std::collections::HashMap;

use crate::world::config::WorldConfig;
use crate::world::content::CategoryId;

/// Lookup from category id to its asset variants
#[derive(Clone, Debug, Default)]
pub struct AssetCatalog {
    bindings: HashMap<CategoryId, Vec<String>>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect bindings from both roles of a world config
    ///
    /// When the two roles bind the same category id to different assets, the
    /// origin role's binding wins and a warning is logged.
    pub fn from_config(config: &WorldConfig) -> Self {
        let mut catalog = Self::new();
        for category in config.origin.categories.iter().chain(&config.default.categories) {
            if category.assets.is_empty() {
                continue;
            }
            match catalog.bindings.get(&category.id) {
                Some(existing) if *existing != category.assets => {
                    log::warn!(
                        "Category {} ({}) bound to different assets per role, keeping {:?}",
                        category.id, category.name, existing
                    );
                }
                Some(_) => {}
                None => {
                    catalog.bindings.insert(category.id, category.assets.clone());
                }
            }
        }
        catalog
    }

    /// Bind (or rebind) a category to its asset variants
    pub fn bind(&mut self, category: CategoryId, assets: Vec<String>) {
        self.bindings.insert(category, assets);
    }

    /// Remove a category's binding
    pub fn unbind(&mut self, category: CategoryId) -> Option<Vec<String>> {
        self.bindings.remove(&category)
    }

    /// Asset for a category variant, `None` if unbound
    pub fn resolve(&self, category: CategoryId, variant: u32) -> Option<&str> {
        self.bindings
            .get(&category)
            .and_then(|assets| assets.get(variant as usize))
            .map(String::as_str)
    }

    pub fn is_bound(&self, category: CategoryId) -> bool {
        self.bindings.get(&category).is_some_and(|a| !a.is_empty())
    }

    /// Number of bound categories
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
