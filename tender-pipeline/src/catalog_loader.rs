//! CSV catalog loader.
//!
//! Parses product catalog CSV files into a [`Catalog`]. Expected columns:
//!   sku, name, category, voltage, conductor_size, conductor_material,
//!   insulation_material, cores, armor_type, standards, base_price
//! The `standards` column is a semicolon-separated list.

use serde::Deserialize;
use std::io::Read;
use tender_core::{Catalog, CatalogProduct, ProductAttributes};
use thiserror::Error;

/// Every way catalog loading can fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid base price {price} for '{sku}' at line {line}")]
    InvalidPrice { line: usize, sku: String, price: f64 },
}

/// A raw CSV record, one product per row.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    pub sku: String,
    pub name: String,
    pub category: String,
    pub voltage: String,
    pub conductor_size: String,
    pub conductor_material: String,
    pub insulation_material: String,
    pub cores: String,
    pub armor_type: String,
    #[serde(deserialize_with = "deserialize_standards")]
    pub standards: Vec<String>,
    pub base_price: f64,
}

impl CatalogRecord {
    pub fn to_product(&self) -> CatalogProduct {
        CatalogProduct {
            sku: self.sku.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            attributes: ProductAttributes {
                voltage: self.voltage.clone(),
                conductor_size: self.conductor_size.clone(),
                conductor_material: self.conductor_material.clone(),
                insulation_material: self.insulation_material.clone(),
                cores: self.cores.clone(),
                armor_type: self.armor_type.clone(),
            },
            standards: self.standards.clone(),
            base_price: self.base_price,
        }
    }
}

/// Load a catalog from a CSV reader.
pub fn load_catalog<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut products = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: CatalogRecord = result.map_err(|e| CatalogError::Parse {
            line: line_num + 2,
            message: e.to_string(),
        })?;
        if !record.base_price.is_finite() || record.base_price <= 0.0 {
            return Err(CatalogError::InvalidPrice {
                line: line_num + 2,
                sku: record.sku,
                price: record.base_price,
            });
        }
        products.push(record.to_product());
    }

    Ok(Catalog::new(products))
}

/// Load a catalog from a CSV file path.
pub fn load_catalog_file(path: &str) -> Result<Catalog, CatalogError> {
    let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
        path: path.to_owned(),
        source: e,
    })?;
    load_catalog(file)
}

/// Semicolon-separated list, empty cell allowed: `"IEC 60502-2;IS 7098"`.
fn deserialize_standards<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
sku,name,category,voltage,conductor_size,conductor_material,insulation_material,cores,armor_type,standards,base_price
XLPE-11KV-185,11kV XLPE Cable 3x185 sq.mm Aluminum,MV Power Cable,11,185,Aluminum,XLPE,3,SWA,IEC 60502-2;IS 7098,450.00
PVC-1.1KV-50,1.1kV PVC Cable 4x50 sq.mm Copper,LV Power Cable,1.1,50,Copper,PVC,4,Unarmored,IS 1554;IEC 60227,120.00
CTRL-PVC-2.5,Control Cable 12x2.5 sq.mm Copper,Control Cable,1.1,2.5,Copper,PVC,12,Unarmored,,95.50
";

    #[test]
    fn load_sample_csv() {
        let catalog = load_catalog(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);

        let first = catalog.get("XLPE-11KV-185").unwrap();
        assert_eq!(first.attributes.voltage, "11");
        assert_eq!(first.attributes.armor_type, "SWA");
        assert!((first.base_price - 450.0).abs() < 0.01);
    }

    #[test]
    fn standards_split_on_semicolons() {
        let catalog = load_catalog(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(
            catalog.get("XLPE-11KV-185").unwrap().standards,
            vec!["IEC 60502-2", "IS 7098"]
        );
        // An empty cell is an empty list, not a single blank entry.
        assert!(catalog.get("CTRL-PVC-2.5").unwrap().standards.is_empty());
    }

    #[test]
    fn non_positive_price_is_rejected_with_line_number() {
        let csv_data = "\
sku,name,category,voltage,conductor_size,conductor_material,insulation_material,cores,armor_type,standards,base_price
GOOD-1,Good Cable,MV Power Cable,11,185,Aluminum,XLPE,3,SWA,IS 7098,450.00
BAD-1,Free Cable,MV Power Cable,11,185,Aluminum,XLPE,3,SWA,IS 7098,0
";
        let err = load_catalog(csv_data.as_bytes()).unwrap_err();
        match err {
            CatalogError::InvalidPrice { line, sku, .. } => {
                assert_eq!(line, 3);
                assert_eq!(sku, "BAD-1");
            }
            other => panic!("expected InvalidPrice, got {other:?}"),
        }
    }

    #[test]
    fn malformed_numeric_field_reports_the_line() {
        let csv_data = "\
sku,name,category,voltage,conductor_size,conductor_material,insulation_material,cores,armor_type,standards,base_price
OK-1,Cable,MV Power Cable,11,185,Aluminum,XLPE,3,SWA,IS 7098,not-a-price
";
        let err = load_catalog(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 2, .. }));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_catalog_file("/no/such/catalog.csv").unwrap_err();
        assert!(err.to_string().contains("/no/such/catalog.csv"));
    }
}
