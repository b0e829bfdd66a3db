use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use orderform_core::{DomainError, DomainResult, ValueObject};

/// Shipping method token (e.g. `inside_dhaka`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShippingMethod(String);

impl ShippingMethod {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("ShippingMethod: empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for ShippingMethod {}

impl core::fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ShippingMethod {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShippingMethod> for String {
    fn from(value: ShippingMethod) -> Self {
        value.0
    }
}

/// Surcharge per shipping method, in the same display unit as the base price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShippingTable(BTreeMap<ShippingMethod, u64>);

impl ShippingTable {
    pub fn surcharge(&self, method: &ShippingMethod) -> Option<u64> {
        self.0.get(method).copied()
    }

    pub fn methods(&self) -> impl Iterator<Item = (&ShippingMethod, u64)> {
        self.0.iter().map(|(m, s)| (m, *s))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ShippingMethod, u64)> for ShippingTable {
    fn from_iter<T: IntoIterator<Item = (ShippingMethod, u64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
