use orderform_locale::Messages;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until the deadline, floor-divided into display units.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Remaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Remaining {
    /// `None` once the deadline has been reached.
    pub fn from_millis(distance_ms: i64) -> Option<Self> {
        if distance_ms <= 0 {
            return None;
        }
        // distance_ms is positive, so every component below is non-negative.
        let part = |v: i64| v.unsigned_abs();
        Some(Self {
            days: part(distance_ms / MS_PER_DAY),
            hours: part((distance_ms % MS_PER_DAY) / MS_PER_HOUR),
            minutes: part((distance_ms % MS_PER_HOUR) / MS_PER_MINUTE),
            seconds: part((distance_ms % MS_PER_MINUTE) / MS_PER_SECOND),
        })
    }
}

/// Banner text for a distance to the deadline.
pub fn render(distance_ms: i64, messages: &Messages) -> String {
    match Remaining::from_millis(distance_ms) {
        None => messages.offer_ended(),
        Some(r) => messages.time_left(r.days, r.hours, r.minutes, r.seconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderform_locale::Locale;
    use proptest::prelude::*;

    #[test]
    fn decomposes_with_floor_division() {
        let ms = 2 * MS_PER_DAY + 3 * MS_PER_HOUR + 4 * MS_PER_MINUTE + 5 * MS_PER_SECOND + 999;
        assert_eq!(
            Remaining::from_millis(ms),
            Some(Remaining {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5
            })
        );
        // Less than a second left still counts as running.
        assert_eq!(
            Remaining::from_millis(1),
            Some(Remaining {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0
            })
        );
    }

    #[test]
    fn renders_terminal_text_at_or_past_deadline() {
        let bn = Messages::for_locale(Locale::Bengali);
        assert_eq!(render(0, &bn), "⏰ অফার শেষ হয়েছে");
        assert_eq!(render(-5_000, &bn), "⏰ অফার শেষ হয়েছে");
    }

    #[test]
    fn renders_localized_remaining_time() {
        let bn = Messages::for_locale(Locale::Bengali);
        let ms = 12 * MS_PER_HOUR + 34 * MS_PER_MINUTE + 56 * MS_PER_SECOND;
        assert_eq!(render(ms, &bn), "সময় বাকি: ১২ ঘণ্টা ৩৪ মিনিট ৫৬ সেকেন্ড");
    }

    proptest! {
        /// Property: non-positive distances always render the terminal text.
        #[test]
        fn expired_never_shows_components(distance in i64::MIN..=0) {
            for locale in [Locale::Bengali, Locale::English] {
                let messages = Messages::for_locale(locale);
                prop_assert_eq!(render(distance, &messages), messages.offer_ended());
            }
        }

        /// Property: components are in range and recompose to the floored second.
        #[test]
        fn components_recompose(distance in 1i64..(400 * MS_PER_DAY)) {
            let r = Remaining::from_millis(distance).unwrap();
            prop_assert!(r.hours < 24 && r.minutes < 60 && r.seconds < 60);
            let total = r.days as i64 * MS_PER_DAY
                + r.hours as i64 * MS_PER_HOUR
                + r.minutes as i64 * MS_PER_MINUTE
                + r.seconds as i64 * MS_PER_SECOND;
            prop_assert_eq!(total, distance - distance % MS_PER_SECOND);
        }
    }
}
