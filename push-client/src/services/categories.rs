use std::collections::HashSet;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{PushError, Result};
use crate::models::NotificationCategory;

/// Registry of user notification categories
///
/// Populated at application configuration time and read-only to the
/// dispatcher afterwards. `define_categories` replaces the full registry;
/// it never merges, so repeated calls with partial lists drop previously
/// defined categories on purpose.
pub struct CategoryRegistry {
    categories: RwLock<Vec<NotificationCategory>>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(Vec::new()),
        }
    }

    /// Replace the registry wholesale.
    ///
    /// Category names must be unique within the input; duplicates fail with
    /// a validation error and leave the registry unchanged.
    pub fn define_categories(&self, categories: Vec<NotificationCategory>) -> Result<()> {
        let mut names = HashSet::new();
        for category in &categories {
            if !names.insert(category.name.as_str()) {
                return Err(PushError::DuplicateCategory(category.name.clone()));
            }
        }

        let mut guard = self
            .categories
            .write()
            .expect("category registry lock poisoned");
        *guard = categories;
        debug!(count = guard.len(), "notification categories defined");
        Ok(())
    }

    /// Snapshot of the current registry.
    pub fn get_categories(&self) -> Vec<NotificationCategory> {
        self.categories
            .read()
            .expect("category registry lock poisoned")
            .clone()
    }

    /// Look up a category by name.
    pub fn find(&self, name: &str) -> Option<NotificationCategory> {
        self.categories
            .read()
            .expect("category registry lock poisoned")
            .iter()
            .find(|c| c.name == name)
            .cloned()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NotificationAction, NotificationActionKind};

    fn category(name: &str) -> NotificationCategory {
        NotificationCategory::new(
            name,
            vec![NotificationAction::new(
                "open",
                "Open",
                NotificationActionKind::Foreground,
            )],
        )
    }

    #[test]
    fn test_define_replaces_not_merges() {
        let registry = CategoryRegistry::new();

        registry.define_categories(vec![category("chat")]).unwrap();
        registry.define_categories(vec![category("news")]).unwrap();

        let categories = registry.get_categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "news");
    }

    #[test]
    fn test_duplicate_names_rejected_and_registry_unchanged() {
        let registry = CategoryRegistry::new();
        registry.define_categories(vec![category("chat")]).unwrap();

        let err = registry
            .define_categories(vec![category("news"), category("news")])
            .unwrap_err();
        assert!(matches!(err, PushError::DuplicateCategory(name) if name == "news"));

        let categories = registry.get_categories();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "chat");
    }

    #[test]
    fn test_find() {
        let registry = CategoryRegistry::new();
        registry
            .define_categories(vec![category("chat"), category("news")])
            .unwrap();

        assert_eq!(registry.find("news").unwrap().name, "news");
        assert!(registry.find("sports").is_none());
    }

    #[test]
    fn test_empty_replace_clears() {
        let registry = CategoryRegistry::new();
        registry.define_categories(vec![category("chat")]).unwrap();
        registry.define_categories(Vec::new()).unwrap();
        assert!(registry.get_categories().is_empty());
    }
}
