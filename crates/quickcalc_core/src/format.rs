//! Canonical display text for computed numbers.

/// Formats a value for display.
///
/// Whole numbers render exactly (`5` → `"5"`), everything else is rounded to
/// two decimal places with exact ties rounded away from zero (`0.125` →
/// `"0.13"`). No locale grouping is applied, and a zero result never carries a
/// sign.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        if value == 0.0 {
            return "0".to_string();
        }
        return format!("{}", value);
    }

    let text = match tie_hundredths(value.abs()) {
        Some(hundredths) => {
            let sign = if value < 0.0 { "-" } else { "" };
            format!("{}{}.{:02}", sign, hundredths / 100, hundredths % 100)
        }
        None => format!("{:.2}", value),
    };
    match text.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => text,
    }
}

/// Hundredths after rounding `magnitude` up, when it lies exactly halfway
/// between two of them. Such values are odd multiples of 1/8.
fn tie_hundredths(magnitude: f64) -> Option<u64> {
    let eighths = magnitude * 8.0;
    if eighths.fract() != 0.0 || eighths % 2.0 != 1.0 || eighths >= 2f64.powi(50) {
        return None;
    }
    Some((eighths * 12.5 + 0.5) as u64)
}

/// Formats a value followed by a percent sign.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value))
}
