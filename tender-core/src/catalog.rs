//! Product catalog types and lookup.
//!
//! The catalog is an immutable collection handed to the matcher explicitly,
//! so tests and deployments can substitute product sets freely. A built-in
//! six-product demo catalog covers the common MV/LV cable range.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Product types
// ---------------------------------------------------------------------------

/// Technical attribute block for one catalog product.
///
/// Values are strings in the same canonical forms extraction produces, so
/// the match rubric can compare them directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub voltage: String,
    pub conductor_size: String,
    pub conductor_material: String,
    pub insulation_material: String,
    pub cores: String,
    pub armor_type: String,
}

impl ProductAttributes {
    /// All attribute values, for keyword search.
    pub fn values(&self) -> [&str; 6] {
        [
            &self.voltage,
            &self.conductor_size,
            &self.conductor_material,
            &self.insulation_material,
            &self.cores,
            &self.armor_type,
        ]
    }
}

/// A sellable product in the reference catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Unique product key.
    pub sku: String,
    pub name: String,
    pub category: String,
    pub attributes: ProductAttributes,
    /// Standards the product is certified against.
    pub standards: Vec<String>,
    /// Unit cost per meter, currency-agnostic.
    pub base_price: f64,
}

impl CatalogProduct {
    fn matches_query(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
            || self.sku.to_lowercase().contains(query_lower)
            || self.category.to_lowercase().contains(query_lower)
            || self
                .attributes
                .values()
                .iter()
                .any(|v| v.to_lowercase().contains(query_lower))
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Read-only product collection the matcher scores against.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
}

impl Catalog {
    pub fn new(products: Vec<CatalogProduct>) -> Self {
        Self { products }
    }

    /// The built-in demo catalog, mirroring the reference product range.
    pub fn builtin() -> Self {
        Self::new(
            CATALOG_SEEDS
                .iter()
                .map(|seed| CatalogProduct {
                    sku: seed.sku.to_owned(),
                    name: seed.name.to_owned(),
                    category: seed.category.to_owned(),
                    attributes: ProductAttributes {
                        voltage: seed.voltage.to_owned(),
                        conductor_size: seed.conductor_size.to_owned(),
                        conductor_material: seed.conductor_material.to_owned(),
                        insulation_material: seed.insulation_material.to_owned(),
                        cores: seed.cores.to_owned(),
                        armor_type: seed.armor_type.to_owned(),
                    },
                    standards: seed.standards.iter().map(|s| s.to_string()).collect(),
                    base_price: seed.base_price,
                })
                .collect(),
        )
    }

    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by its SKU.
    pub fn get(&self, sku: &str) -> Option<&CatalogProduct> {
        self.products.iter().find(|p| p.sku == sku)
    }

    /// Case-insensitive keyword search across name, SKU, category, and
    /// attribute values. An empty or blank query returns the whole catalog.
    pub fn search(&self, query: &str) -> Vec<&CatalogProduct> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.matches_query(&query))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Built-in seed data
// ---------------------------------------------------------------------------

struct ProductSeed {
    sku: &'static str,
    name: &'static str,
    category: &'static str,
    voltage: &'static str,
    conductor_size: &'static str,
    conductor_material: &'static str,
    insulation_material: &'static str,
    cores: &'static str,
    armor_type: &'static str,
    standards: &'static [&'static str],
    base_price: f64,
}

const CATALOG_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        sku: "XLPE-11KV-185",
        name: "11kV XLPE Cable 3x185 sq.mm Aluminum",
        category: "MV Power Cable",
        voltage: "11",
        conductor_size: "185",
        conductor_material: "Aluminum",
        insulation_material: "XLPE",
        cores: "3",
        armor_type: "SWA",
        standards: &["IEC 60502-2", "IS 7098"],
        base_price: 450.00,
    },
    ProductSeed {
        sku: "XLPE-11KV-240",
        name: "11kV XLPE Cable 3x240 sq.mm Aluminum",
        category: "MV Power Cable",
        voltage: "11",
        conductor_size: "240",
        conductor_material: "Aluminum",
        insulation_material: "XLPE",
        cores: "3",
        armor_type: "SWA",
        standards: &["IEC 60502-2", "IS 7098"],
        base_price: 580.00,
    },
    ProductSeed {
        sku: "XLPE-33KV-185",
        name: "33kV XLPE Cable 3x185 sq.mm Copper",
        category: "HV Power Cable",
        voltage: "33",
        conductor_size: "185",
        conductor_material: "Copper",
        insulation_material: "XLPE",
        cores: "3",
        armor_type: "SWA",
        standards: &["IEC 60502-2", "IS 7098"],
        base_price: 850.00,
    },
    ProductSeed {
        sku: "PVC-1.1KV-50",
        name: "1.1kV PVC Cable 4x50 sq.mm Copper",
        category: "LV Power Cable",
        voltage: "1.1",
        conductor_size: "50",
        conductor_material: "Copper",
        insulation_material: "PVC",
        cores: "4",
        armor_type: "Unarmored",
        standards: &["IS 1554", "IEC 60227"],
        base_price: 120.00,
    },
    ProductSeed {
        sku: "XLPE-11KV-300",
        name: "11kV XLPE Cable 3x300 sq.mm Aluminum",
        category: "MV Power Cable",
        voltage: "11",
        conductor_size: "300",
        conductor_material: "Aluminum",
        insulation_material: "XLPE",
        cores: "3",
        armor_type: "SWA",
        standards: &["IEC 60502-2", "IS 7098"],
        base_price: 650.00,
    },
    ProductSeed {
        sku: "XLPE-22KV-240",
        name: "22kV XLPE Cable 3x240 sq.mm Aluminum",
        category: "MV Power Cable",
        voltage: "22",
        conductor_size: "240",
        conductor_material: "Aluminum",
        insulation_material: "XLPE",
        cores: "3",
        armor_type: "SWA",
        standards: &["IEC 60502-2", "IS 7098"],
        base_price: 780.00,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_full_product_range() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 6);

        let base = catalog.get("XLPE-11KV-185").unwrap();
        assert_eq!(base.attributes.voltage, "11");
        assert_eq!(base.attributes.conductor_size, "185");
        assert_eq!(base.base_price, 450.00);

        let lv = catalog.get("PVC-1.1KV-50").unwrap();
        assert_eq!(lv.attributes.armor_type, "Unarmored");
        assert_eq!(lv.standards, vec!["IS 1554", "IEC 60227"]);
    }

    #[test]
    fn unknown_sku_lookup_returns_none() {
        assert!(Catalog::builtin().get("NO-SUCH-SKU").is_none());
    }

    #[test]
    fn blank_query_returns_whole_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.search("").len(), 6);
        assert_eq!(catalog.search("   ").len(), 6);
    }

    #[test]
    fn search_matches_sku_fragments_case_insensitively() {
        let catalog = Catalog::builtin();
        let hits = catalog.search("11kv");
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|p| p.sku.contains("11KV")));
    }

    #[test]
    fn search_matches_attribute_values() {
        let catalog = Catalog::builtin();
        let copper = catalog.search("copper");
        assert_eq!(copper.len(), 2);

        let unarmored = catalog.search("unarmored");
        assert_eq!(unarmored.len(), 1);
        assert_eq!(unarmored[0].sku, "PVC-1.1KV-50");
    }

    #[test]
    fn search_matches_category() {
        let catalog = Catalog::builtin();
        let hv = catalog.search("HV Power");
        assert_eq!(hv.len(), 1);
        assert_eq!(hv[0].sku, "XLPE-33KV-185");
    }
}
