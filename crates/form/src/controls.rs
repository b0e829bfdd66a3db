//! Mapping from host control handles to what they control.

use std::collections::HashMap;
use std::hash::Hash;

use orderform_catalog::{CatalogConfig, ShippingMethod, VariantId};
use orderform_selection::QuantityStep;

/// What an interactive control does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    /// A variant card or its radio button.
    Variant(VariantId),
    /// The +/- button of a variant's quantity stepper.
    Stepper(VariantId, QuantityStep),
    /// A shipping option.
    Shipping(ShippingMethod),
    Submit,
    BackToTop,
}

/// Keyboard keys the form reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    /// Map a DOM-style key name (`"Enter"`, `" "`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Key::Enter,
            " " | "Spacebar" | "Space" => Key::Space,
            _ => Key::Other,
        }
    }

    /// Enter and Space activate a focused control like a click.
    pub fn activates(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Interaction reported by the host, keyed by its own control handle type.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent<K> {
    Click(K),
    KeyDown { target: K, key: Key },
    Scroll { offset_y: f64 },
    DismissNotice,
}

/// Control handles bound at construction time.
///
/// Hosts register each element once; the controller never derives a variant
/// from an element's name.
#[derive(Debug, Clone)]
pub struct ControlMap<K> {
    bindings: HashMap<K, Control>,
}

impl<K> Default for ControlMap<K> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> ControlMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: K, control: Control) -> &mut Self {
        self.bindings.insert(key, control);
        self
    }

    pub fn with(mut self, key: K, control: Control) -> Self {
        self.bind(key, control);
        self
    }

    pub fn resolve(&self, key: &K) -> Option<&Control> {
        self.bindings.get(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl ControlMap<String> {
    /// Bindings for the storefront page's element ids
    /// (`product-black`, `radio-black`, `btn-minus-black`, `btn-plus-black`,
    /// `shipping-inside_dhaka`, `order-form`, `back-to-top`).
    pub fn storefront(catalog: &CatalogConfig) -> Self {
        let mut map = Self::new();
        for variant in catalog.variants() {
            let id = &variant.id;
            map.bind(format!("product-{id}"), Control::Variant(id.clone()))
                .bind(format!("radio-{id}"), Control::Variant(id.clone()))
                .bind(
                    format!("btn-minus-{id}"),
                    Control::Stepper(id.clone(), QuantityStep::Decrement),
                )
                .bind(
                    format!("btn-plus-{id}"),
                    Control::Stepper(id.clone(), QuantityStep::Increment),
                );
        }
        if let Some(table) = catalog.shipping() {
            for (method, _) in table.methods() {
                map.bind(format!("shipping-{method}"), Control::Shipping(method.clone()));
            }
        }
        map.bind("order-form".to_string(), Control::Submit)
            .bind("back-to-top".to_string(), Control::BackToTop);
        map
    }
}
