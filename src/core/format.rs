//! Display text for counters, titles, and tooltips.

use rust_decimal::Decimal;

use super::metrics::DeliveryTime;

/// Text shown when a metric has no valid samples.
pub const NO_DATA_LABEL: &str = "N/A";

/// Formats an amount as Brazilian reais: `R$ 1.234,56`.
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let fixed = format!("{:.2}", rounded.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}R$ {},{fraction}", group_thousands(integer, '.'))
}

/// Two-decimal review score, `0.00` included.
#[must_use]
pub fn format_review(mean: f64) -> String {
    format!("{mean:.2}")
}

/// One-decimal day count, or [`NO_DATA_LABEL`].
#[must_use]
pub fn format_delivery(time: DeliveryTime) -> String {
    match time {
        DeliveryTime::Days(days) => format!("{days:.1}"),
        DeliveryTime::NoData => NO_DATA_LABEL.to_owned(),
    }
}

/// Integer count with `.` thousands separators.
#[must_use]
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string(), '.')
}

/// `health_beauty` → `Health Beauty`; missing names read `Unknown`.
#[must_use]
pub fn format_category_name(snake_case: Option<&str>) -> String {
    let Some(name) = snake_case.filter(|name| !name.is_empty()) else {
        return "Unknown".to_owned();
    };
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brl_uses_dot_grouping_and_comma_decimals() {
        assert_eq!(format_brl(Decimal::new(350, 0)), "R$ 350,00");
        assert_eq!(format_brl(Decimal::new(123456789, 2)), "R$ 1.234.567,89");
        assert_eq!(format_brl(Decimal::new(-15005, 2)), "-R$ 150,05");
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
    }

    #[test]
    fn neutral_values_render_without_nan() {
        assert_eq!(format_review(0.0), "0.00");
        assert_eq!(format_delivery(DeliveryTime::NoData), "N/A");
        assert_eq!(format_delivery(DeliveryTime::Days(12.26)), "12.3");
        assert_eq!(format_count(1234567), "1.234.567");
    }

    #[test]
    fn category_names_are_title_cased() {
        assert_eq!(format_category_name(Some("health_beauty")), "Health Beauty");
        assert_eq!(format_category_name(Some("toys")), "Toys");
        assert_eq!(format_category_name(None), "Unknown");
    }
}
