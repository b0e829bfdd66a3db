use crate::Locale;
use crate::numerals::localize_digits;

/// Shopper-facing message catalog for one locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Messages {
    locale: Locale,
}

impl Messages {
    pub fn for_locale(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn quantity_below_min(&self) -> String {
        match self.locale {
            Locale::Bengali => "পরিমাণ ১ এর কম হতে পারে না".to_string(),
            Locale::English => "Quantity cannot go below 1".to_string(),
        }
    }

    pub fn quantity_above_max(&self, max: u32) -> String {
        match self.locale {
            Locale::Bengali => format!(
                "পরিমাণ {} এর বেশি হতে পারে না",
                localize_digits(&max.to_string(), self.locale)
            ),
            Locale::English => format!("Quantity cannot exceed {max}"),
        }
    }

    pub fn offer_ended(&self) -> String {
        match self.locale {
            Locale::Bengali => "⏰ অফার শেষ হয়েছে".to_string(),
            Locale::English => "⏰ The offer has ended".to_string(),
        }
    }

    /// Remaining-time banner. `days` is omitted when zero.
    pub fn time_left(&self, days: u64, hours: u64, minutes: u64, seconds: u64) -> String {
        let n = |v: u64| localize_digits(&v.to_string(), self.locale);
        match self.locale {
            Locale::Bengali => {
                let mut text = String::from("সময় বাকি: ");
                if days > 0 {
                    text.push_str(&format!("{} দিন ", n(days)));
                }
                text.push_str(&format!(
                    "{} ঘণ্টা {} মিনিট {} সেকেন্ড",
                    n(hours),
                    n(minutes),
                    n(seconds)
                ));
                text
            }
            Locale::English => {
                let mut text = String::from("Time left: ");
                if days > 0 {
                    text.push_str(&format!("{days}d "));
                }
                text.push_str(&format!("{hours}h {minutes}m {seconds}s"));
                text
            }
        }
    }
}
