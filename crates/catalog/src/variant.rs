use core::str::FromStr;

use serde::{Deserialize, Serialize};

use orderform_core::{DomainError, ValueObject};

/// Variant identifier (e.g. `black`, `darkblue`).
///
/// Restricted to lowercase ASCII letters and digits so it can be used as-is in
/// control identifiers and log fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariantId(pub(crate) String);

impl VariantId {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::invalid_id("VariantId: empty"));
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(DomainError::invalid_id(format!(
                "VariantId: `{raw}` must be lowercase ascii alphanumerics"
            )));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for VariantId {}

impl core::fmt::Display for VariantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VariantId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for VariantId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VariantId> for String {
    fn from(value: VariantId) -> Self {
        value.0
    }
}

/// One selectable product option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    /// Name mirrored into the submitted order (e.g. "Samsung Guru Music 2 (Black)").
    pub display_name: String,
    /// Availability for the whole session.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Variant {
    pub fn new(id: VariantId, display_name: impl Into<String>, in_stock: bool) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            in_stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_alphanumerics() {
        assert_eq!(VariantId::new("darkblue").unwrap().as_str(), "darkblue");
        assert_eq!("gold2".parse::<VariantId>().unwrap().to_string(), "gold2");
    }

    #[test]
    fn rejects_empty_and_compound_ids() {
        assert!(VariantId::new("").is_err());
        assert!(VariantId::new("dark-blue").is_err());
        assert!(VariantId::new("Black").is_err());
        assert!(VariantId::new("btn minus").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: VariantId = serde_json::from_str("\"white\"").unwrap();
        assert_eq!(ok.as_str(), "white");
        assert!(serde_json::from_str::<VariantId>("\"White\"").is_err());
    }

    #[test]
    fn variant_defaults_to_in_stock() {
        let v: Variant =
            serde_json::from_str(r#"{"id":"blue","display_name":"Blue"}"#).unwrap();
        assert!(v.in_stock);
    }
}
