//! Calculator functions and the result type they share.
//!
//! Every calculator is a total function: it takes the raw text of its fields
//! and always returns a [`CalculationResult`], never an error. Three outcomes
//! are distinguished:
//!
//! - absent input (a field does not parse): the `"--"` placeholder,
//! - domain-invalid input (division by zero, impossible mix): a visible
//!   `"Undefined"` or `"Error"` label,
//! - a valid result, which is the only kind the history log accepts.

use serde::{Deserialize, Serialize};

pub mod eliquid;
pub mod percent;
pub mod resistor;

pub use eliquid::{diy_mix, shortfill, DiyMixResult, ShortfillResult};
pub use percent::{
    add_subtract_percent, fraction_to_percent, percent_change, percent_of, reverse_percent,
    AdjustOp, ReverseOp,
};
pub use resistor::{solve_resistor, Circuit, OhmField, ResistorInputs, ResistorSolution};

pub const PLACEHOLDER: &str = "--";
pub const UNDEFINED: &str = "Undefined";
pub const ERROR: &str = "Error";
pub const OUT_OF_RANGE: &str = "Out of range";

/// A numeric field after parsing. `None` when the text is not a finite number.
pub type FieldValue = Option<f64>;

/// Parses raw field text. Non-finite parses such as `inf` count as absent.
pub fn parse_field(text: &str) -> FieldValue {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Colour hint for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    None,
    Positive,
    Negative,
}

impl Tone {
    /// Tone by the sign of a raw difference.
    pub fn of_sign(value: f64) -> Self {
        if value > 0.0 {
            Tone::Positive
        } else if value < 0.0 {
            Tone::Negative
        } else {
            Tone::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub display_value: String,
    pub subtext: String,
    pub valid: bool,
    pub tone: Tone,
}

impl CalculationResult {
    pub fn valid(display_value: impl Into<String>, subtext: impl Into<String>, tone: Tone) -> Self {
        Self {
            display_value: display_value.into(),
            subtext: subtext.into(),
            valid: true,
            tone,
        }
    }

    /// Inactive result shown when inputs are missing.
    pub fn placeholder() -> Self {
        Self {
            display_value: PLACEHOLDER.to_string(),
            subtext: PLACEHOLDER.to_string(),
            valid: false,
            tone: Tone::None,
        }
    }

    pub fn undefined(reason: impl Into<String>) -> Self {
        Self::invalid(UNDEFINED, reason)
    }

    /// Result for finite inputs whose answer overflows `f64`.
    pub fn out_of_range() -> Self {
        Self::undefined(OUT_OF_RANGE)
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::invalid(ERROR, reason)
    }

    fn invalid(label: &str, reason: impl Into<String>) -> Self {
        Self {
            display_value: label.to_string(),
            subtext: reason.into(),
            valid: false,
            tone: Tone::None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        !self.valid && self.display_value == PLACEHOLDER
    }
}

impl Default for CalculationResult {
    fn default() -> Self {
        Self::placeholder()
    }
}
