//! Percentage calculators.

use super::{parse_field, CalculationResult, Tone};
use crate::format::{format_number, format_percent};
use serde::{Deserialize, Serialize};

pub const CHANGE: &str = "Change";
pub const PERCENT_OF: &str = "Percent Of";
pub const ADD_SUB: &str = "Add/Sub";
pub const REVERSE: &str = "Reverse %";
pub const FRACTION: &str = "Fraction";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustOp {
    #[default]
    Add,
    Subtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReverseOp {
    #[default]
    Increase,
    Decrease,
}

impl AdjustOp {
    /// Reads the operator selector; anything but a subtraction adds.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "subtract" | "sub" => AdjustOp::Subtract,
            _ => AdjustOp::Add,
        }
    }
}

impl ReverseOp {
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            "dec" | "decrease" => ReverseOp::Decrease,
            _ => ReverseOp::Increase,
        }
    }
}

/// Percent change from `previous` to `new`.
pub fn percent_change(previous: &str, new: &str) -> CalculationResult {
    let (Some(p), Some(n)) = (parse_field(previous), parse_field(new)) else {
        return CalculationResult::placeholder();
    };

    if p == 0.0 {
        if n == 0.0 {
            return CalculationResult::valid("0%", "No change", Tone::None);
        }
        // Any move away from zero is reported as an unbounded increase.
        return CalculationResult::valid("∞%", "Increase from zero", Tone::Positive);
    }

    let diff = n - p;
    let pct = diff / p.abs() * 100.0;
    if !pct.is_finite() {
        return CalculationResult::out_of_range();
    }
    let sign = if diff > 0.0 {
        "+"
    } else if diff < 0.0 {
        "-"
    } else {
        ""
    };

    CalculationResult::valid(
        format!("{}{}", sign, format_percent(pct.abs())),
        format!("{} to {}", format_number(p), format_number(n)),
        Tone::of_sign(diff),
    )
}

/// What percent `part` is of `base`.
pub fn percent_of(part: &str, base: &str) -> CalculationResult {
    let (Some(pt), Some(bs)) = (parse_field(part), parse_field(base)) else {
        return CalculationResult::placeholder();
    };
    if bs == 0.0 {
        return CalculationResult::undefined("Div by zero");
    }

    let pct = pt / bs * 100.0;
    if !pct.is_finite() {
        return CalculationResult::out_of_range();
    }
    let value = format_percent(pct);
    let subtext = format!("{} is {} of {}", format_number(pt), value, format_number(bs));
    CalculationResult::valid(value, subtext, Tone::None)
}

/// Adds or subtracts `percent` percent of `base` to itself.
pub fn add_subtract_percent(base: &str, percent: &str, op: AdjustOp) -> CalculationResult {
    let (Some(bs), Some(pt)) = (parse_field(base), parse_field(percent)) else {
        return CalculationResult::placeholder();
    };

    let amount = bs * (pt / 100.0);
    let (result, sign, tone) = match op {
        AdjustOp::Add => (bs + amount, '+', Tone::Positive),
        AdjustOp::Subtract => (bs - amount, '-', Tone::Negative),
    };
    if !(result.is_finite() && amount.is_finite()) {
        return CalculationResult::out_of_range();
    }

    CalculationResult::valid(
        format_number(result),
        format!(
            "{} {} {}% ({})",
            format_number(bs),
            sign,
            format_number(pt),
            format_number(amount)
        ),
        tone,
    )
}

/// Recovers the value before a percentage increase or decrease.
pub fn reverse_percent(final_value: &str, percent: &str, op: ReverseOp) -> CalculationResult {
    let (Some(fv), Some(pc)) = (parse_field(final_value), parse_field(percent)) else {
        return CalculationResult::placeholder();
    };

    let (divisor, direction) = match op {
        ReverseOp::Increase => (1.0 + pc / 100.0, "increase"),
        ReverseOp::Decrease => (1.0 - pc / 100.0, "decrease"),
    };
    if divisor == 0.0 {
        return CalculationResult::placeholder();
    }
    let before = fv / divisor;
    if !before.is_finite() {
        return CalculationResult::out_of_range();
    }

    CalculationResult::valid(
        format_number(before),
        format!("Original value before {}% {}", format_number(pc), direction),
        Tone::None,
    )
}

/// Expresses `numerator / denominator` as a percentage.
pub fn fraction_to_percent(numerator: &str, denominator: &str) -> CalculationResult {
    let (Some(num), Some(den)) = (parse_field(numerator), parse_field(denominator)) else {
        return CalculationResult::placeholder();
    };
    if den == 0.0 {
        return CalculationResult::undefined("Div by zero");
    }

    let pct = num / den * 100.0;
    if !pct.is_finite() {
        return CalculationResult::out_of_range();
    }

    CalculationResult::valid(
        format_percent(pct),
        format!("{} / {}", format_number(num), format_number(den)),
        Tone::None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::parse_field;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    #[rstest]
    #[case("0", "0", "0%", "No change", Tone::None)]
    #[case("0", "7", "∞%", "Increase from zero", Tone::Positive)]
    #[case("0", "-7", "∞%", "Increase from zero", Tone::Positive)]
    #[case("50", "75", "+50%", "50 to 75", Tone::Positive)]
    #[case("-50", "-75", "-50%", "-50 to -75", Tone::Negative)]
    #[case("3", "2", "-33.33%", "3 to 2", Tone::Negative)]
    #[case("4", "4", "0%", "4 to 4", Tone::None)]
    fn percent_change_cases(
        #[case] prev: &str,
        #[case] new: &str,
        #[case] value: &str,
        #[case] sub: &str,
        #[case] tone: Tone,
    ) {
        let result = percent_change(prev, new);
        assert!(result.valid);
        assert_eq!(result.display_value, value);
        assert_eq!(result.subtext, sub);
        assert_eq!(result.tone, tone);
    }

    #[test]
    fn percent_change_needs_both_fields() {
        assert!(percent_change("", "5").is_placeholder());
        assert!(percent_change("5", "x").is_placeholder());
    }

    #[test]
    fn percent_of_divide_by_zero_is_visible_but_invalid() {
        let result = percent_of("5", "0");
        assert!(!result.valid);
        assert_eq!(result.display_value, "Undefined");
        assert_eq!(result.subtext, "Div by zero");
    }

    #[test]
    fn percent_of_round_trips() {
        for (base, x) in [(200.0, 12.5), (-40.0, 33.0), (7.0, 150.0)] {
            let part = base * x / 100.0;
            let result = percent_of(&part.to_string(), &base.to_string());
            let shown = parse_field(result.display_value.trim_end_matches('%')).expect("numeric");
            assert_abs_diff_eq!(shown, x, epsilon = 0.005);
        }
    }

    #[test]
    fn percent_of_subtext() {
        let result = percent_of("1", "20");
        assert_eq!(result.display_value, "5%");
        assert_eq!(result.subtext, "1 is 5% of 20");
    }

    #[test]
    fn add_subtract_tone_follows_operator_not_sign() {
        let added = add_subtract_percent("-100", "10", AdjustOp::Add);
        assert_eq!(added.display_value, "-110");
        assert_eq!(added.tone, Tone::Positive);
        assert_eq!(added.subtext, "-100 + 10% (-10)");

        let subtracted = add_subtract_percent("100", "-10", AdjustOp::Subtract);
        assert_eq!(subtracted.display_value, "110");
        assert_eq!(subtracted.tone, Tone::Negative);
    }

    #[test]
    fn reverse_undoes_add_subtract() {
        for (base, p) in [(80.0, 25.0), (19.99, 7.5), (-3.0, 40.0)] {
            let grown = base + base * p / 100.0;
            let result = reverse_percent(&grown.to_string(), &p.to_string(), ReverseOp::Increase);
            let original = parse_field(&result.display_value).expect("numeric");
            assert_abs_diff_eq!(original, base, epsilon = 0.005);
        }

        let shrunk = reverse_percent("75", "25", ReverseOp::Decrease);
        assert_eq!(shrunk.display_value, "100");
        assert_eq!(shrunk.subtext, "Original value before 25% decrease");
    }

    #[test]
    fn reverse_with_zero_divisor_shows_nothing() {
        assert!(reverse_percent("10", "100", ReverseOp::Decrease).is_placeholder());
        assert!(reverse_percent("10", "-100", ReverseOp::Increase).is_placeholder());
    }

    #[rstest]
    #[case(percent_change("-1e308", "1e308"))]
    #[case(percent_of("1e308", "1e-10"))]
    #[case(add_subtract_percent("1e308", "1e10", AdjustOp::Add))]
    #[case(reverse_percent("1e308", "-99.9999999", ReverseOp::Increase))]
    #[case(fraction_to_percent("1e308", "0.5"))]
    fn overflow_is_out_of_range(#[case] result: CalculationResult) {
        assert!(!result.valid);
        assert_eq!(result.display_value, "Undefined");
        assert_eq!(result.subtext, "Out of range");
    }

    #[test]
    fn operator_selectors() {
        assert_eq!(AdjustOp::parse("subtract"), AdjustOp::Subtract);
        assert_eq!(AdjustOp::parse("add"), AdjustOp::Add);
        assert_eq!(ReverseOp::parse("dec"), ReverseOp::Decrease);
        assert_eq!(ReverseOp::parse("inc"), ReverseOp::Increase);
    }

    #[test]
    fn fraction_cases() {
        let result = fraction_to_percent("1", "8");
        assert_eq!(result.display_value, "12.50%");
        assert_eq!(result.subtext, "1 / 8");

        let zero = fraction_to_percent("1", "0");
        assert_eq!(zero.display_value, "Undefined");
        assert!(!zero.valid);
    }
}
