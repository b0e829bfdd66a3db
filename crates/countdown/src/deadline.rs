use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use orderform_locale::Locale;

/// When the offer ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Deadline {
    /// Today at 23:59:59.999 in the shopper's time zone.
    #[default]
    EndOfDay,
    /// A fixed instant.
    At { at: DateTime<Utc> },
}

impl Deadline {
    /// Resolve against the current local time.
    ///
    /// `EndOfDay` falls back to `now` when the local end of day does not exist
    /// (time zone transition), which shows the offer as ended.
    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Utc> {
        match self {
            Deadline::At { at } => *at,
            Deadline::EndOfDay => now
                .date_naive()
                .and_hms_milli_opt(23, 59, 59, 999)
                .and_then(|end| end.and_local_timezone(now.timezone()).earliest())
                .map(|end| end.with_timezone(&Utc))
                .unwrap_or_else(|| now.with_timezone(&Utc)),
        }
    }
}

/// What to do once the deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// Show the terminal text once and stop ticking.
    #[default]
    Stop,
    /// Keep re-emitting the terminal text every tick until shutdown.
    Repeat,
}

fn default_tick_ms() -> u64 {
    1_000
}

/// Deployment configuration for the countdown banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSettings {
    #[serde(default)]
    pub deadline: Deadline,
    #[serde(default)]
    pub expiry: ExpiryPolicy,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default)]
    pub locale: Locale,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        Self {
            deadline: Deadline::default(),
            expiry: ExpiryPolicy::default(),
            tick_ms: default_tick_ms(),
            locale: Locale::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Timelike};

    #[test]
    fn end_of_day_in_local_offset() {
        let dhaka = FixedOffset::east_opt(6 * 3600).unwrap();
        let now = dhaka.with_ymd_and_hms(2026, 10, 19, 21, 15, 0).unwrap();
        let deadline = Deadline::EndOfDay.resolve(&now);

        let expected = dhaka
            .with_ymd_and_hms(2026, 10, 19, 23, 59, 59)
            .unwrap()
            .with_timezone(&Utc)
            + chrono::Duration::milliseconds(999);
        assert_eq!(deadline, expected);
        assert_eq!((deadline - now.with_timezone(&Utc)).num_minutes(), 164);
    }

    /// UTC+6, except that the last local hour of every day does not exist.
    #[derive(Debug, Clone, Copy)]
    struct SkipsLastHour;

    fn plus_six() -> FixedOffset {
        FixedOffset::east_opt(6 * 3600).unwrap()
    }

    impl TimeZone for SkipsLastHour {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SkipsLastHour
        }

        fn offset_from_local_date(&self, _local: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(plus_six())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            if local.hour() == 23 {
                LocalResult::None
            } else {
                LocalResult::Single(plus_six())
            }
        }

        fn offset_from_utc_date(&self, _utc: &NaiveDate) -> FixedOffset {
            plus_six()
        }

        fn offset_from_utc_datetime(&self, _utc: &NaiveDateTime) -> FixedOffset {
            plus_six()
        }
    }

    #[test]
    fn missing_end_of_day_resolves_to_now() {
        let noon = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let now = SkipsLastHour.from_utc_datetime(&noon);

        let deadline = Deadline::EndOfDay.resolve(&now);
        assert_eq!(deadline, now.with_timezone(&Utc));
    }

    #[test]
    fn fixed_deadline_ignores_now() {
        let at = Utc.with_ymd_and_hms(2026, 12, 31, 18, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        assert_eq!(Deadline::At { at }.resolve(&now), at);
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: CountdownSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, CountdownSettings::default());
        assert_eq!(settings.tick_ms, 1_000);

        let settings: CountdownSettings = serde_json::from_str(
            r#"{"deadline":{"kind":"at","at":"2026-12-31T18:00:00Z"},"expiry":"repeat","locale":"en"}"#,
        )
        .unwrap();
        assert_eq!(settings.expiry, ExpiryPolicy::Repeat);
        assert_eq!(settings.locale, Locale::English);
        assert!(matches!(settings.deadline, Deadline::At { .. }));
    }
}
