use crate::Locale;

const BENGALI_DIGITS: [char; 10] = ['০', '১', '২', '৩', '৪', '৫', '৬', '৭', '৮', '৯'];

/// Currency sign prefixed to every displayed amount.
pub const TAKA_SIGN: char = '৳';

/// Replace ASCII digits with the locale's digits; everything else passes through.
pub fn localize_digits(text: &str, locale: Locale) -> String {
    match locale {
        Locale::English => text.to_string(),
        Locale::Bengali => text
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) if c.is_ascii_digit() => BENGALI_DIGITS[d as usize],
                _ => c,
            })
            .collect(),
    }
}

/// Insert group separators using the locale's grouping rule.
///
/// Bengali uses South Asian grouping: the last three digits, then pairs
/// (`12,34,567`). English groups by thousands (`1,234,567`).
pub fn group_digits(n: u64, locale: Locale) -> String {
    let digits = n.to_string();
    let len = digits.len();
    if len <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(len - 3);
    let step = match locale {
        Locale::Bengali => 2,
        Locale::English => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Grouped number in the locale's digits.
pub fn format_number(n: u64, locale: Locale) -> String {
    localize_digits(&group_digits(n, locale), locale)
}

/// Displayed price, e.g. `৳৩,৭৯৮`.
pub fn format_currency(amount: u64, locale: Locale) -> String {
    format!("{TAKA_SIGN}{}", format_number(amount, locale))
}
