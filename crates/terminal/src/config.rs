//! Environment configuration for the terminal host.

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};

use orderform_catalog::CatalogConfig;
use orderform_countdown::{CountdownSettings, Deadline};
use orderform_form::FormSettings;
use orderform_locale::Locale;
use orderform_observability::LogFormat;

pub const CATALOG_VAR: &str = "ORDERFORM_CATALOG";
pub const LOCALE_VAR: &str = "ORDERFORM_LOCALE";
pub const OFFER_END_VAR: &str = "ORDERFORM_OFFER_END";
pub const LOG_FORMAT_VAR: &str = "ORDERFORM_LOG_FORMAT";

/// Log output format: `json` (default) or `pretty`.
///
/// Read separately from [`TerminalConfig`] so logging is up before the
/// catalog loads.
pub fn log_format(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<LogFormat> {
    match lookup(LOG_FORMAT_VAR) {
        Some(raw) => raw
            .parse::<LogFormat>()
            .map_err(|err| anyhow!(err))
            .with_context(|| format!("{LOG_FORMAT_VAR}={raw}")),
        None => Ok(LogFormat::default()),
    }
}

#[derive(Debug, Clone)]
pub struct TerminalConfig {
    pub catalog: CatalogConfig,
    pub form: FormSettings,
    pub countdown: CountdownSettings,
}

impl TerminalConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables fall back to
    /// the built-in catalog, Bengali and an end-of-day offer.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let catalog = match lookup(CATALOG_VAR) {
            Some(path) => CatalogConfig::from_path(&path)
                .with_context(|| format!("{CATALOG_VAR}={path}"))?,
            None => {
                tracing::info!("{CATALOG_VAR} not set; using built-in catalog");
                CatalogConfig::default()
            }
        };

        let locale = match lookup(LOCALE_VAR) {
            Some(raw) => raw
                .parse::<Locale>()
                .map_err(|err| anyhow!(err))
                .with_context(|| format!("{LOCALE_VAR}={raw}"))?,
            None => Locale::default(),
        };

        let deadline = match lookup(OFFER_END_VAR) {
            Some(raw) => {
                let at = DateTime::parse_from_rfc3339(raw.trim())
                    .with_context(|| format!("{OFFER_END_VAR}={raw} is not RFC 3339"))?
                    .with_timezone(&Utc);
                Deadline::At { at }
            }
            None => Deadline::EndOfDay,
        };

        Ok(Self {
            catalog,
            form: FormSettings {
                locale,
                ..FormSettings::default()
            },
            countdown: CountdownSettings {
                deadline,
                locale,
                ..CountdownSettings::default()
            },
        })
    }
}
