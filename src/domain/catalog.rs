//! Cargo catalog and the lookups that feed each cascade level.
//!
//! - Keys keep the order of the source document.
//! - Every lookup returns an empty list for unknown paths.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::entities::{to_options, SelectOption};

/// String-keyed map that remembers insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces; a replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with string keys")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default)]
    pub package_types: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

pub type Subcategory = OrderedMap<CatalogItem>;
pub type Category = OrderedMap<Subcategory>;

/// Catalog document: category → subcategory → item type → item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub cargo_catalog: OrderedMap<Category>,
    #[serde(default)]
    pub package_types_master: Vec<String>,
}

impl Catalog {
    pub fn item(&self, category: &str, subcategory: &str, item_type: &str) -> Option<&CatalogItem> {
        self.cargo_catalog
            .get(category)?
            .get(subcategory)?
            .get(item_type)
    }

    pub fn categories(&self) -> Vec<String> {
        self.cargo_catalog.keys().map(str::to_string).collect()
    }

    pub fn subcategories(&self, category: &str) -> Vec<String> {
        self.cargo_catalog
            .get(category)
            .map(|subs| subs.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn item_types(&self, category: &str, subcategory: &str) -> Vec<String> {
        self.cargo_catalog
            .get(category)
            .and_then(|subs| subs.get(subcategory))
            .map(|items| items.keys().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn package_types(&self, category: &str, subcategory: &str, item_type: &str) -> Vec<String> {
        self.item(category, subcategory, item_type)
            .map(|item| item.package_types.clone())
            .unwrap_or_default()
    }

    pub fn examples(&self, category: &str, subcategory: &str, item_type: &str) -> Vec<String> {
        self.item(category, subcategory, item_type)
            .map(|item| item.examples.clone())
            .unwrap_or_default()
    }

    /// Number of item types across all categories.
    pub fn item_count(&self) -> usize {
        self.cargo_catalog
            .iter()
            .flat_map(|(_, subs)| subs.iter())
            .map(|(_, items)| items.len())
            .sum()
    }
}

// Option-list projections over a catalog that may not be loaded yet.

pub fn category_options(catalog: Option<&Catalog>) -> Vec<SelectOption> {
    catalog.map(|c| to_options(c.categories())).unwrap_or_default()
}

pub fn subcategory_options(catalog: Option<&Catalog>, category: &str) -> Vec<SelectOption> {
    catalog
        .map(|c| to_options(c.subcategories(category)))
        .unwrap_or_default()
}

pub fn item_type_options(
    catalog: Option<&Catalog>,
    category: &str,
    subcategory: &str,
) -> Vec<SelectOption> {
    catalog
        .map(|c| to_options(c.item_types(category, subcategory)))
        .unwrap_or_default()
}

pub fn package_type_options(
    catalog: Option<&Catalog>,
    category: &str,
    subcategory: &str,
    item_type: &str,
) -> Vec<SelectOption> {
    catalog
        .map(|c| to_options(c.package_types(category, subcategory, item_type)))
        .unwrap_or_default()
}

pub fn item_examples(
    catalog: Option<&Catalog>,
    category: &str,
    subcategory: &str,
    item_type: &str,
) -> Vec<String> {
    catalog
        .map(|c| c.examples(category, subcategory, item_type))
        .unwrap_or_default()
}

fn item(package_types: &[&str], examples: &[&str]) -> CatalogItem {
    CatalogItem {
        package_types: package_types.iter().map(|s| s.to_string()).collect(),
        examples: examples.iter().map(|s| s.to_string()).collect(),
    }
}

/// Built-in catalog used whenever the catalog resource cannot be loaded.
pub fn default_catalog() -> Catalog {
    let dry_foodstuffs: Category = [(
        "Grains & Legumes",
        [
            (
                "Rice",
                item(&["Sack (25kg/50kg)", "Box", "Other"], &["Jasmine Rice", "Parboiled Rice"]),
            ),
            (
                "Beans",
                item(&["Sack", "Bag", "Other"], &["Kidney Beans", "Black Beans"]),
            ),
        ]
        .into_iter()
        .collect::<Subcategory>(),
    )]
    .into_iter()
    .collect();

    let clothing: Category = [(
        "Clothing",
        [
            (
                "Used/Secondhand",
                item(&["Bale", "Box", "Bag", "Other"], &["Mixed Apparel", "Used Shoes"]),
            ),
            ("New", item(&["Box", "Polybag", "Other"], &["T-Shirts", "Jeans"])),
        ]
        .into_iter()
        .collect::<Subcategory>(),
    )]
    .into_iter()
    .collect();

    let vehicles: Category = [
        (
            "Used Vehicles",
            [
                (
                    "Cars",
                    item(&["Unit", "Other"], &["Sedan", "SUV", "Pickup Truck", "Van"]),
                ),
                ("Trucks", item(&["Unit", "Other"], &["Light Truck", "Heavy Truck"])),
            ]
            .into_iter()
            .collect::<Subcategory>(),
        ),
        (
            "Machinery",
            [(
                "Construction",
                item(&["Unit", "Crate", "Other"], &["Backhoe", "Cement Mixer"]),
            )]
            .into_iter()
            .collect(),
        ),
    ]
    .into_iter()
    .collect();

    let general: Category = [
        (
            "Barrels/Drums",
            [(
                "Liquids",
                item(&["Barrel", "Drum", "Other"], &["Cooking Oil", "Paint"]),
            )]
            .into_iter()
            .collect::<Subcategory>(),
        ),
        (
            "Palletized Goods",
            [(
                "Electronics",
                item(&["Pallet", "Crate", "Other"], &["Electronics", "Computers"]),
            )]
            .into_iter()
            .collect(),
        ),
    ]
    .into_iter()
    .collect();

    Catalog {
        cargo_catalog: [
            ("Dry Foodstuffs", dry_foodstuffs),
            ("Clothing & Household Goods", clothing),
            ("Vehicles & Machinery", vehicles),
            ("General Cargo", general),
        ]
        .into_iter()
        .collect(),
        package_types_master: [
            "Box", "Bag", "Bale", "Sack", "Pallet", "Crate", "Drum", "Barrel", "Unit", "Other",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_key_order_is_preserved() {
        let raw = r#"{
            "cargoCatalog": {
                "Zeta": { "Sub": { "Item": { "packageTypes": ["Crate"], "examples": [] } } },
                "Alpha": {
                    "Second": {},
                    "First": {
                        "Widget": { "packageTypes": ["Pallet", "Box", "Drum"], "examples": ["Gears"] }
                    }
                }
            },
            "packageTypesMaster": ["Box"]
        }"#;
        let catalog: Catalog = serde_json::from_str(raw).unwrap();
        assert_eq!(catalog.categories(), vec!["Zeta", "Alpha"]);
        assert_eq!(catalog.subcategories("Alpha"), vec!["Second", "First"]);
        assert_eq!(
            catalog.package_types("Alpha", "First", "Widget"),
            vec!["Pallet", "Box", "Drum"]
        );
        assert_eq!(catalog.item_types("Alpha", "Second"), Vec::<String>::new());
    }

    #[test]
    fn every_present_path_returns_its_configured_lists() {
        let catalog = default_catalog();
        for (category, subs) in catalog.cargo_catalog.iter() {
            for (subcategory, items) in subs.iter() {
                for (item_type, item) in items.iter() {
                    assert_eq!(
                        catalog.package_types(category, subcategory, item_type),
                        item.package_types
                    );
                    assert_eq!(catalog.examples(category, subcategory, item_type), item.examples);
                }
            }
        }
    }

    #[test]
    fn absent_paths_yield_empty_lists() {
        let catalog = default_catalog();
        assert!(catalog.subcategories("Livestock").is_empty());
        assert!(catalog.item_types("Dry Foodstuffs", "Dairy").is_empty());
        assert!(catalog.item_types("Livestock", "Grains & Legumes").is_empty());
        assert!(catalog
            .package_types("Dry Foodstuffs", "Grains & Legumes", "Wheat")
            .is_empty());
        assert!(catalog.examples("General Cargo", "Palletized Goods", "Toys").is_empty());
    }

    #[test]
    fn projections_are_empty_without_a_catalog() {
        assert!(category_options(None).is_empty());
        assert!(subcategory_options(None, "Dry Foodstuffs").is_empty());
        assert!(item_type_options(None, "Dry Foodstuffs", "Grains & Legumes").is_empty());
        assert!(package_type_options(None, "Dry Foodstuffs", "Grains & Legumes", "Rice").is_empty());
        assert!(item_examples(None, "Dry Foodstuffs", "Grains & Legumes", "Rice").is_empty());
    }

    #[test]
    fn options_mirror_labels_and_values() {
        let catalog = default_catalog();
        let options = category_options(Some(&catalog));
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].label, "Dry Foodstuffs");
        assert!(options.iter().all(|option| option.label == option.value));
    }

    #[test]
    fn default_catalog_counts_items() {
        let catalog = default_catalog();
        assert_eq!(catalog.item_count(), 9);
        assert_eq!(catalog.package_types_master.len(), 10);
    }

    #[test]
    fn insert_replaces_without_reordering() {
        let mut map: OrderedMap<u8> = [("a", 1), ("b", 2)].into_iter().collect();
        map.insert("a", 9);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("a", &9), ("b", &2)]);
    }
}
