//! Locale-aware display formatting for the order form.
//!
//! Raw integers stay raw for submission; only what the shopper reads passes
//! through here.

pub mod messages;
pub mod numerals;

pub use messages::Messages;
pub use numerals::{format_currency, format_number, group_digits, localize_digits};

use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Bengali (Bangladesh): Bengali digits, lakh/crore grouping.
    #[default]
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "en")]
    English,
}

const LOCALE_CODES: &[(Locale, &str)] = &[(Locale::Bengali, "bn"), (Locale::English, "en")];

impl Locale {
    /// Bare language code (`bn`, `en`).
    pub fn code(self) -> &'static str {
        LOCALE_CODES
            .iter()
            .find(|(locale, _)| *locale == self)
            .map(|(_, code)| *code)
            .unwrap_or(LOCALE_CODES[0].1)
    }
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts bare language codes and region-qualified tags (`bn-BD`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        LOCALE_CODES
            .iter()
            .find(|(_, code)| *code == lang)
            .map(|(locale, _)| *locale)
            .ok_or_else(|| format!("unsupported locale `{s}`"))
    }
}
