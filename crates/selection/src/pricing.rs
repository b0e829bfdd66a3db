//! Pricing engine: pure totals over a selection.

use serde::{Deserialize, Serialize};

use orderform_catalog::{CatalogConfig, ShippingMethod, VariantId};
use orderform_core::ValueObject;
use orderform_locale::{Locale, format_currency, format_number};

use crate::state::SelectionState;

/// Raw totals for the current selection.
///
/// These numbers are what gets submitted; display strings are derived from
/// them via [`Totals::display`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub variant: VariantId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub subtotal: u64,
    pub shipping: u64,
    pub total: u64,
}

impl ValueObject for Totals {}

/// Locale-formatted totals for on-screen display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTotals {
    pub quantity: String,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl Totals {
    pub fn display(&self, locale: Locale) -> DisplayTotals {
        DisplayTotals {
            quantity: format_number(u64::from(self.quantity), locale),
            subtotal: format_currency(self.subtotal, locale),
            shipping: format_currency(self.shipping, locale),
            total: format_currency(self.total, locale),
        }
    }
}

/// Surcharge for a shipping choice; zero when unset or when the catalog has
/// no shipping table.
pub fn shipping_surcharge(catalog: &CatalogConfig, method: Option<&ShippingMethod>) -> u64 {
    match (catalog.shipping(), method) {
        (Some(table), Some(method)) => table.surcharge(method).unwrap_or(0),
        _ => 0,
    }
}

/// `subtotal = base_price * quantity(selected)`, `total = subtotal + surcharge`.
///
/// Exact: `CatalogConfig` only admits catalogs whose largest total fits in
/// `u64`, and quantities never exceed `max_quantity`.
pub fn compute_totals(state: &SelectionState) -> Totals {
    let catalog = state.catalog();
    let variant = state.selected().clone();
    let quantity = state.selected_quantity();
    let unit_price = catalog.base_price();
    let subtotal = unit_price * u64::from(quantity);
    let shipping = shipping_surcharge(catalog, state.shipping());
    let product_name = catalog
        .variant(&variant)
        .map(|v| v.display_name.clone())
        .unwrap_or_else(|| variant.to_string());

    Totals {
        variant,
        product_name,
        quantity,
        unit_price,
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use orderform_core::{SessionId, execute};
    use proptest::prelude::*;

    use super::*;
    use crate::state::{ChangeQuantity, QuantityStep, SelectionCommand, SetShipping};

    fn catalog_with_shipping() -> Arc<CatalogConfig> {
        Arc::new(
            CatalogConfig::builder()
                .base_price(1899)
                .max_quantity(10)
                .variant("black", "Samsung Guru Music 2 (Black)", true)
                .variant("white", "Samsung Guru Music 2 (White)", true)
                .shipping("inside_dhaka", 60)
                .shipping("outside_dhaka", 120)
                .build()
                .unwrap(),
        )
    }

    fn bump(state: &mut SelectionState, times: u32) {
        for _ in 0..times {
            let cmd = SelectionCommand::ChangeQuantity(ChangeQuantity {
                variant: state.selected().clone(),
                step: QuantityStep::Increment,
                occurred_at: Utc::now(),
            });
            execute(state, &cmd).unwrap();
        }
    }

    #[test]
    fn totals_for_default_selection() {
        let state = SelectionState::open(SessionId::new(), catalog_with_shipping()).unwrap();
        let totals = compute_totals(&state);
        assert_eq!(totals.product_name, "Samsung Guru Music 2 (Black)");
        assert_eq!(totals.quantity, 1);
        assert_eq!(totals.subtotal, 1899);
        assert_eq!(totals.shipping, 0);
        assert_eq!(totals.total, 1899);
    }

    #[test]
    fn shipping_is_added_to_total() {
        let mut state = SelectionState::open(SessionId::new(), catalog_with_shipping()).unwrap();
        bump(&mut state, 1);
        let cmd = SelectionCommand::SetShipping(SetShipping {
            method: ShippingMethod::new("outside_dhaka").unwrap(),
            occurred_at: Utc::now(),
        });
        execute(&mut state, &cmd).unwrap();

        let totals = compute_totals(&state);
        assert_eq!(totals.subtotal, 3798);
        assert_eq!(totals.shipping, 120);
        assert_eq!(totals.total, 3918);
    }

    #[test]
    fn display_uses_bengali_numerals() {
        let mut state = SelectionState::open(SessionId::new(), catalog_with_shipping()).unwrap();
        bump(&mut state, 1);
        let display = compute_totals(&state).display(Locale::Bengali);
        assert_eq!(display.subtotal, "৳৩,৭৯৮");
        assert_eq!(display.total, "৳৩,৭৯৮");
        assert_eq!(display.quantity, "২");
        assert_eq!(display.shipping, "৳০");
    }

    #[test]
    fn totals_stay_exact_at_the_catalog_ceiling() {
        let catalog = Arc::new(
            CatalogConfig::builder()
                .base_price(u64::MAX / 2)
                .max_quantity(2)
                .variant("black", "Black", true)
                .shipping("express", 1)
                .build()
                .unwrap(),
        );
        let mut state = SelectionState::open(SessionId::new(), catalog).unwrap();
        bump(&mut state, 1);
        let cmd = SelectionCommand::SetShipping(SetShipping {
            method: ShippingMethod::new("express").unwrap(),
            occurred_at: Utc::now(),
        });
        execute(&mut state, &cmd).unwrap();

        let totals = compute_totals(&state);
        assert_eq!(
            u128::from(totals.subtotal),
            u128::from(u64::MAX / 2) * 2
        );
        assert_eq!(totals.total, u64::MAX);
    }

    #[test]
    fn surcharge_is_zero_without_table() {
        let catalog = CatalogConfig::default();
        let method = ShippingMethod::new("inside_dhaka").unwrap();
        assert_eq!(shipping_surcharge(&catalog, Some(&method)), 0);
        assert_eq!(shipping_surcharge(&catalog_with_shipping(), None), 0);
    }

    proptest! {
        /// Property: subtotal is exactly base price × selected quantity, and
        /// computing totals twice without mutation yields the same result.
        #[test]
        fn subtotal_is_price_times_quantity(
            bumps in 0u32..10,
            switch in any::<bool>()
        ) {
            let mut state =
                SelectionState::open(SessionId::new(), catalog_with_shipping()).unwrap();
            bump(&mut state, bumps);
            if switch {
                let cmd = SelectionCommand::SelectVariant(crate::state::SelectVariant {
                    variant: VariantId::new("white").unwrap(),
                    occurred_at: Utc::now(),
                });
                execute(&mut state, &cmd).unwrap();
            }

            let first = compute_totals(&state);
            let second = compute_totals(&state);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(
                first.subtotal,
                state.catalog().base_price() * u64::from(state.selected_quantity())
            );
            let expected = if switch { 1 } else { 1 + bumps };
            prop_assert_eq!(first.quantity, expected);
        }
    }
}
