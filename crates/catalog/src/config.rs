use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use orderform_core::{DomainError, DomainResult};

use crate::shipping::{ShippingMethod, ShippingTable};
use crate::variant::{Variant, VariantId};

/// Failure while loading a catalog from disk or JSON.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// On-disk shape of a catalog (what deployments write as JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub base_price: u64,
    pub max_quantity: u32,
    #[serde(default)]
    pub shipping: Option<ShippingTable>,
    pub variants: Vec<Variant>,
}

/// Static per-deployment catalog data.
///
/// Immutable once built: nothing in a session can change prices, limits or
/// availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    base_price: u64,
    max_quantity: u32,
    shipping: Option<ShippingTable>,
    variants: Vec<Variant>,
}

impl CatalogConfig {
    /// Build and validate a catalog.
    pub fn new(
        base_price: u64,
        max_quantity: u32,
        variants: Vec<Variant>,
        shipping: Option<ShippingTable>,
    ) -> DomainResult<Self> {
        if base_price == 0 {
            return Err(DomainError::validation("base_price must be positive"));
        }
        if max_quantity == 0 {
            return Err(DomainError::validation("max_quantity must be at least 1"));
        }
        if variants.is_empty() {
            return Err(DomainError::validation("catalog needs at least one variant"));
        }

        let mut seen = BTreeSet::new();
        for variant in &variants {
            if !seen.insert(variant.id.clone()) {
                return Err(DomainError::validation(format!(
                    "duplicate variant `{}`",
                    variant.id
                )));
            }
            if variant.display_name.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "variant `{}` has an empty display name",
                    variant.id
                )));
            }
        }

        // An empty table behaves like no table at all.
        let shipping = shipping.filter(|table| !table.is_empty());

        // Every reachable total must be exact: base_price * max_quantity plus
        // the largest surcharge has to fit.
        let max_surcharge = shipping
            .as_ref()
            .and_then(|table| table.methods().map(|(_, surcharge)| surcharge).max())
            .unwrap_or(0);
        base_price
            .checked_mul(u64::from(max_quantity))
            .and_then(|subtotal| subtotal.checked_add(max_surcharge))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "base_price {base_price} x max_quantity {max_quantity} plus shipping overflows"
                ))
            })?;

        Ok(Self {
            base_price,
            max_quantity,
            shipping,
            variants,
        })
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn from_file(file: CatalogFile) -> DomainResult<Self> {
        Self::new(file.base_price, file.max_quantity, file.variants, file.shipping)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The catalog the storefront ships with: one handset in four colors.
    pub fn guru_music_2() -> Self {
        let variants = [
            ("black", "Black"),
            ("blue", "Blue"),
            ("white", "White"),
            ("darkblue", "Dark Blue"),
        ]
        .into_iter()
        .map(|(id, color)| Variant {
            id: VariantId(id.to_string()),
            display_name: format!("Samsung Guru Music 2 ({color})"),
            in_stock: true,
        })
        .collect();

        Self {
            base_price: 1899,
            max_quantity: 10,
            shipping: None,
            variants,
        }
    }

    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            base_price: self.base_price,
            max_quantity: self.max_quantity,
            shipping: self.shipping.clone(),
            variants: self.variants.clone(),
        }
    }

    pub fn base_price(&self) -> u64 {
        self.base_price
    }

    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    pub fn shipping(&self) -> Option<&ShippingTable> {
        self.shipping.as_ref()
    }

    /// Variants in catalog (display) order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    pub fn contains(&self, id: &VariantId) -> bool {
        self.variant(id).is_some()
    }

    pub fn stock_table(&self) -> StockTable {
        StockTable {
            entries: self
                .variants
                .iter()
                .map(|v| (v.id.clone(), v.in_stock))
                .collect(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::guru_music_2()
    }
}

/// Availability per variant, in catalog order. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockTable {
    entries: Vec<(VariantId, bool)>,
}

impl StockTable {
    /// `false` for unavailable variants and for ids the catalog doesn't know.
    pub fn is_available(&self, id: &VariantId) -> bool {
        self.entries
            .iter()
            .any(|(candidate, in_stock)| candidate == id && *in_stock)
    }

    pub fn contains(&self, id: &VariantId) -> bool {
        self.entries.iter().any(|(candidate, _)| candidate == id)
    }

    pub fn first_available(&self) -> Option<&VariantId> {
        self.entries
            .iter()
            .find(|(_, in_stock)| *in_stock)
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VariantId, bool)> {
        self.entries.iter().map(|(id, in_stock)| (id, *in_stock))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fluent construction for code-defined catalogs (and tests).
#[derive(Debug, Default, Clone)]
pub struct CatalogBuilder {
    base_price: u64,
    max_quantity: u32,
    variants: Vec<(String, String, bool)>,
    shipping: Vec<(String, u64)>,
}

impl CatalogBuilder {
    pub fn base_price(mut self, price: u64) -> Self {
        self.base_price = price;
        self
    }

    pub fn max_quantity(mut self, max: u32) -> Self {
        self.max_quantity = max;
        self
    }

    pub fn variant(
        mut self,
        id: impl Into<String>,
        display_name: impl Into<String>,
        in_stock: bool,
    ) -> Self {
        self.variants.push((id.into(), display_name.into(), in_stock));
        self
    }

    pub fn shipping(mut self, method: impl Into<String>, surcharge: u64) -> Self {
        self.shipping.push((method.into(), surcharge));
        self
    }

    pub fn build(self) -> DomainResult<CatalogConfig> {
        let variants = self
            .variants
            .into_iter()
            .map(|(id, name, in_stock)| Ok(Variant::new(VariantId::new(id)?, name, in_stock)))
            .collect::<DomainResult<Vec<_>>>()?;

        let shipping = if self.shipping.is_empty() {
            None
        } else {
            Some(
                self.shipping
                    .into_iter()
                    .map(|(method, surcharge)| Ok((ShippingMethod::new(method)?, surcharge)))
                    .collect::<DomainResult<ShippingTable>>()?,
            )
        };

        CatalogConfig::new(self.base_price, self.max_quantity, variants, shipping)
    }
}
