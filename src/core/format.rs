//! Currency and number formatting for the Indian locale.
//!
//! Amounts are rounded half away from zero to whole rupees and grouped the Indian way:
//! the last three digits, then pairs (`23,23,391`). Formatting is display-only and never
//! feeds back into a projection.

const RUPEE: &str = "₹";

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Groups a plain ASCII digit string as `xx,xx,xxx`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::with_capacity(head.len() / 2 + 1);
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

fn non_finite_label(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some(if value > 0.0 { "∞" } else { "-∞" })
    } else {
        None
    }
}

/// Rounds to whole units, returning the sign and the grouped magnitude.
///
/// Values that round to zero are never reported as negative.
fn whole_units(value: f64) -> (bool, String) {
    let rounded = value.round();
    let negative = rounded < 0.0;
    (negative, group_indian(&format!("{:.0}", rounded.abs())))
}

/// Formats a number with Indian digit grouping and no fraction digits.
///
/// ```
/// use corpus_buddy::core::format::format_number;
/// assert_eq!(format_number(1_234_567.6), "12,34,568");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if let Some(label) = non_finite_label(value) {
        return label.to_string();
    }
    let (negative, grouped) = whole_units(value);
    if negative { format!("-{grouped}") } else { grouped }
}

/// Formats an amount in rupees, e.g. `₹23,23,391` or `-₹1,234`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    if let Some(label) = non_finite_label(value) {
        return format!("{RUPEE}{label}");
    }
    let (negative, grouped) = whole_units(value);
    if negative {
        format!("-{RUPEE}{grouped}")
    } else {
        format!("{RUPEE}{grouped}")
    }
}

/// Short label used for chart axes and one-line summaries: `₹2.3Cr`, `₹3.1L`, `₹5K`.
#[must_use]
pub fn format_compact(value: f64) -> String {
    if let Some(label) = non_finite_label(value) {
        return format!("{RUPEE}{label}");
    }

    let magnitude = value.abs();
    let body = if magnitude >= CRORE {
        format!("{:.1}Cr", magnitude / CRORE)
    } else if magnitude >= LAKH {
        format!("{:.1}L", magnitude / LAKH)
    } else if magnitude >= THOUSAND {
        format!("{:.0}K", magnitude / THOUSAND)
    } else {
        format!("{:.0}", magnitude.round())
    };

    if value < 0.0 && body != "0" {
        format!("-{RUPEE}{body}")
    } else {
        format!("{RUPEE}{body}")
    }
}

/// Formats an annual percentage as entered, e.g. `12%` or `7.5%`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}

/// `1 year`, `10 years`.
#[must_use]
pub fn format_years(years: u32) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{years} years")
    }
}
