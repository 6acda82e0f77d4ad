//! Plain-text export of the currently valid results.

use crate::calculators::CalculationResult;

/// Builds the text shared or copied to the clipboard. Invalid rows are skipped
/// and the reference line is only present when a tag was given.
pub fn share_text<'a, I>(reference: &str, rows: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a CalculationResult)>,
{
    let reference = reference.trim();
    let mut text = String::new();
    if !reference.is_empty() {
        text.push_str(&format!("Reference: {}\n\n", reference));
    }
    text.push_str("Results:\n");

    for (title, result) in rows.into_iter().filter(|(_, r)| r.valid) {
        text.push_str(&format!(
            "\n- {}: {} ({})",
            title, result.display_value, result.subtext
        ));
    }
    text
}
