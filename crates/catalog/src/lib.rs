//! Catalog configuration for a single-product order form.
//!
//! Everything here is fixed for the lifetime of a shopper's visit: the unit
//! price, the quantity ceiling, the ordered list of color variants with their
//! availability, and the optional shipping surcharge table.

pub mod config;
pub mod shipping;
pub mod variant;

pub use config::{CatalogBuilder, CatalogConfig, CatalogError, CatalogFile, StockTable};
pub use shipping::{ShippingMethod, ShippingTable};
pub use variant::{Variant, VariantId};
