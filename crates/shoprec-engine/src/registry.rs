//! In-memory merchant product registry.
//!
//! Each merchant maps to a snapshot of augmented products plus a
//! derived category index. Registration replaces the whole snapshot:
//! a product removed from the merchant's catalog and not resubmitted
//! must never remain recommendable. The replacement entry is built
//! outside the lock and swapped in under a single write, so readers
//! never observe a half-replaced snapshot. Merchants are independent
//! partitions; no cross-merchant coordination exists.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::info;

use shoprec_core::{Category, Product};

/// Outcome of a registration call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationSummary {
    pub merchant_id: String,
    pub registered: usize,
    pub categories: BTreeMap<Category, usize>,
}

/// One merchant's snapshot: product map plus category index.
///
/// Invariant: every id in `by_category` exists in `products` and vice
/// versa. The index is a cache rebuilt on registration, never a source
/// of truth.
struct MerchantEntry {
    products: HashMap<String, Product>,
    by_category: HashMap<Category, Vec<String>>,
}

impl MerchantEntry {
    fn build(products: Vec<Product>) -> Self {
        let mut map = HashMap::with_capacity(products.len());
        let mut by_category: HashMap<Category, Vec<String>> = HashMap::new();

        for product in products {
            by_category.entry(product.category).or_default().push(product.id.clone());
            map.insert(product.id.clone(), product);
        }

        Self {
            products: map,
            by_category,
        }
    }
}

/// Thread-safe store of merchant snapshots.
pub struct MerchantRegistry {
    inner: RwLock<HashMap<String, MerchantEntry>>,
}

impl MerchantRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Atomically replace a merchant's snapshot with a fully built one.
    /// Returns the registration summary for the new snapshot.
    pub fn replace(&self, merchant_id: &str, products: Vec<Product>) -> RegistrationSummary {
        let registered = products.len();
        let mut categories: BTreeMap<Category, usize> = BTreeMap::new();
        for product in &products {
            *categories.entry(product.category).or_insert(0) += 1;
        }

        let entry = MerchantEntry::build(products);
        {
            let mut inner = write_lock(&self.inner);
            inner.insert(merchant_id.to_string(), entry);
        }

        info!(merchant_id, registered, "Merchant snapshot replaced");
        RegistrationSummary {
            merchant_id: merchant_id.to_string(),
            registered,
            categories,
        }
    }

    /// All products for a merchant, optionally category-filtered.
    /// Unknown merchants yield an empty list.
    pub fn products(&self, merchant_id: &str, category: Option<Category>) -> Vec<Product> {
        let inner = read_lock(&self.inner);
        let Some(entry) = inner.get(merchant_id) else {
            return Vec::new();
        };

        match category {
            Some(category) => entry
                .by_category
                .get(&category)
                .map(|ids| {
                    ids.iter().filter_map(|id| entry.products.get(id)).cloned().collect()
                })
                .unwrap_or_default(),
            None => entry.products.values().cloned().collect(),
        }
    }

    /// A single product by merchant and id.
    pub fn product(&self, merchant_id: &str, product_id: &str) -> Option<Product> {
        let inner = read_lock(&self.inner);
        inner.get(merchant_id)?.products.get(product_id).cloned()
    }

    /// Whether a merchant has a registered snapshot.
    pub fn is_registered(&self, merchant_id: &str) -> bool {
        read_lock(&self.inner).contains_key(merchant_id)
    }

    /// Remove a merchant entirely. Returns whether it existed.
    pub fn clear(&self, merchant_id: &str) -> bool {
        let removed = write_lock(&self.inner).remove(merchant_id).is_some();
        if removed {
            info!(merchant_id, "Merchant cleared");
        }
        removed
    }
}

impl Default for MerchantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoprec_core::DetectionMethod;

    fn product(id: &str, category: Category) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Product {}", id),
            product_type: String::new(),
            tags: Vec::new(),
            price: "10.00".to_string(),
            image: String::new(),
            category,
            category_confidence: 0.5,
            category_method: DetectionMethod::Keywords,
            representatives: Vec::new(),
        }
    }

    #[test]
    fn test_replace_and_read_back() {
        let registry = MerchantRegistry::new();
        let summary = registry.replace(
            "m1",
            vec![product("a", Category::Beauty), product("b", Category::Fashion)],
        );
        assert_eq!(summary.registered, 2);
        assert_eq!(summary.categories[&Category::Beauty], 1);
        assert_eq!(summary.categories[&Category::Fashion], 1);
        assert_eq!(registry.products("m1", None).len(), 2);
        assert!(registry.is_registered("m1"));
    }

    #[test]
    fn test_replace_is_full_snapshot_replacement() {
        let registry = MerchantRegistry::new();
        registry.replace("m1", vec![product("old", Category::Beauty)]);
        registry.replace("m1", vec![product("new", Category::Beauty)]);

        assert!(registry.product("m1", "old").is_none());
        assert!(registry.product("m1", "new").is_some());
        let ids: Vec<String> =
            registry.products("m1", Some(Category::Beauty)).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["new"]);
    }

    #[test]
    fn test_category_filtered_lookup() {
        let registry = MerchantRegistry::new();
        registry.replace(
            "m1",
            vec![
                product("a", Category::Beauty),
                product("b", Category::Electronics),
                product("c", Category::Beauty),
            ],
        );

        let beauty = registry.products("m1", Some(Category::Beauty));
        assert_eq!(beauty.len(), 2);
        assert!(beauty.iter().all(|p| p.category == Category::Beauty));
        assert!(registry.products("m1", Some(Category::Home)).is_empty());
    }

    #[test]
    fn test_category_index_matches_product_map() {
        let registry = MerchantRegistry::new();
        registry.replace(
            "m1",
            vec![product("a", Category::Beauty), product("b", Category::Electronics)],
        );

        let all: Vec<String> = registry.products("m1", None).into_iter().map(|p| p.id).collect();
        let mut indexed: Vec<String> = Category::ALL
            .iter()
            .flat_map(|c| registry.products("m1", Some(*c)))
            .map(|p| p.id)
            .collect();
        indexed.sort();
        let mut all_sorted = all;
        all_sorted.sort();
        assert_eq!(indexed, all_sorted);
    }

    #[test]
    fn test_unknown_merchant_reads_empty() {
        let registry = MerchantRegistry::new();
        assert!(registry.products("nope", None).is_empty());
        assert!(registry.product("nope", "a").is_none());
        assert!(!registry.is_registered("nope"));
    }

    #[test]
    fn test_clear_reports_existence() {
        let registry = MerchantRegistry::new();
        registry.replace("m1", vec![product("a", Category::Home)]);

        assert!(registry.clear("m1"));
        assert!(!registry.clear("m1"));
        assert!(!registry.is_registered("m1"));
    }

    #[test]
    fn test_merchants_are_independent() {
        let registry = MerchantRegistry::new();
        registry.replace("m1", vec![product("a", Category::Beauty)]);
        registry.replace("m2", vec![product("b", Category::Fashion)]);

        registry.clear("m1");
        assert!(registry.product("m2", "b").is_some());
    }
}
