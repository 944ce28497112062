//! Checklist catalog: Categoria → Subcategoria → Item
//!
//! The catalog is the sole source of truth for which questions exist. It is
//! read-only at runtime and injected into every component that needs it, so
//! tests can substitute alternate catalogs.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A single inspection question. Immutable, defined at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable id, unique catalog-wide (ex: "massa-01")
    pub id: String,
    /// Question prompt shown to the inspector
    pub text: String,
}

/// An ordered group of items, owned by exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSubCategory {
    pub title: String,
    pub items: Vec<ChecklistItem>,
}

/// A scoring unit: categories are weighted equally regardless of item count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistCategory {
    pub id: String,
    pub title: String,
    pub sub_categories: Vec<ChecklistSubCategory>,
}

impl ChecklistCategory {
    /// Item ids belonging to this category, in traversal order.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.sub_categories
            .iter()
            .flat_map(|sc| sc.items.iter().map(|i| i.id.as_str()))
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("CATALOG/duplicate item id: {0}")]
    DuplicateItemId(String),

    #[error("CATALOG/{0}")]
    Parse(#[from] serde_yaml::Error),
}

/// The fixed hierarchy of inspection questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    categories: Vec<ChecklistCategory>,
}

/// Checklist ambiental padrão, embutido no binário.
static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_yaml(include_str!("../data/checklist.yaml"))
        .expect("embedded checklist definition is valid")
});

impl Catalog {
    /// Build a catalog, rejecting duplicate item ids.
    pub fn new(categories: Vec<ChecklistCategory>) -> Result<Self, CatalogError> {
        let catalog = Self { categories };
        let mut seen = HashSet::new();
        for item in catalog.items() {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateItemId(item.id.clone()));
            }
        }
        Ok(catalog)
    }

    /// Load a catalog from its YAML definition.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let parsed: Catalog = serde_yaml::from_str(yaml)?;
        Self::new(parsed.categories)
    }

    /// The built-in environmental checklist (5 categories, 65 items).
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn categories(&self) -> &[ChecklistCategory] {
        &self.categories
    }

    /// All items in traversal order (category → subcategory → item). This is
    /// the order in which the validation gate reports offenders.
    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.categories
            .iter()
            .flat_map(|c| c.sub_categories.iter())
            .flat_map(|sc| sc.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.items().count()
    }

    pub fn find_item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.items().find(|i| i.id == item_id)
    }

    /// The category an item belongs to, if any.
    pub fn category_of(&self, item_id: &str) -> Option<&ChecklistCategory> {
        self.categories
            .iter()
            .find(|c| c.item_ids().any(|id| id == item_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str, item_ids: &[&str]) -> ChecklistCategory {
        ChecklistCategory {
            id: id.to_string(),
            title: format!("Categoria {}", id),
            sub_categories: vec![ChecklistSubCategory {
                title: "Itens".to_string(),
                items: item_ids
                    .iter()
                    .map(|id| ChecklistItem {
                        id: id.to_string(),
                        text: format!("Pergunta {}?", id),
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.categories().len(), 5);
        assert_eq!(catalog.item_count(), 74);
        assert!(catalog.find_item("massa-01").is_some());
        assert_eq!(catalog.category_of("comb-14").map(|c| c.id.as_str()), Some("combustivel"));
    }

    #[test]
    fn test_traversal_order_is_stable() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.items().map(|i| i.id.as_str()).collect();
        assert_eq!(ids[0], "massa-01");
        assert_eq!(ids[ids.len() - 1], "comb-14");
        // Subcategory boundaries do not reorder items
        let massa_09 = ids.iter().position(|id| *id == "massa-09").unwrap();
        let massa_10 = ids.iter().position(|id| *id == "massa-10").unwrap();
        assert_eq!(massa_10, massa_09 + 1);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![category("a", &["x-1"]), category("b", &["x-1"])]);
        assert!(matches!(result, Err(CatalogError::DuplicateItemId(id)) if id == "x-1"));
    }

    #[test]
    fn test_category_of_unknown_item() {
        let catalog = Catalog::new(vec![category("a", &["a-1"])]).unwrap();
        assert!(catalog.category_of("nope").is_none());
    }
}
