//! Ohm's law and power solver over voltage, resistance, current and power.
//!
//! Any two known quantities determine the other two. When more than two are
//! supplied the first pair in [`PAIR_PRIORITY`] wins and the remaining fields
//! are back-filled from it.

use super::{parse_field, CalculationResult, FieldValue, Tone};
use crate::format::format_number;
use serde::{Deserialize, Serialize};

pub const OHMS_LAW: &str = "Ohm's Law";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OhmField {
    Voltage,
    Resistance,
    Current,
    Power,
}

impl OhmField {
    pub const ALL: [OhmField; 4] = [
        OhmField::Voltage,
        OhmField::Resistance,
        OhmField::Current,
        OhmField::Power,
    ];

    pub fn unit(self) -> &'static str {
        match self {
            OhmField::Voltage => "V",
            OhmField::Resistance => "Ω",
            OhmField::Current => "A",
            OhmField::Power => "W",
        }
    }
}

/// Resolution order used when several pairs are known.
pub const PAIR_PRIORITY: [(OhmField, OhmField); 6] = [
    (OhmField::Voltage, OhmField::Resistance),
    (OhmField::Voltage, OhmField::Current),
    (OhmField::Voltage, OhmField::Power),
    (OhmField::Resistance, OhmField::Current),
    (OhmField::Resistance, OhmField::Power),
    (OhmField::Current, OhmField::Power),
];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResistorInputs {
    pub voltage: FieldValue,
    pub resistance: FieldValue,
    pub current: FieldValue,
    pub power: FieldValue,
}

impl ResistorInputs {
    pub fn parse(voltage: &str, resistance: &str, current: &str, power: &str) -> Self {
        Self {
            voltage: parse_field(voltage),
            resistance: parse_field(resistance),
            current: parse_field(current),
            power: parse_field(power),
        }
    }

    pub fn get(&self, field: OhmField) -> FieldValue {
        match field {
            OhmField::Voltage => self.voltage,
            OhmField::Resistance => self.resistance,
            OhmField::Current => self.current,
            OhmField::Power => self.power,
        }
    }

    fn known_count(&self) -> usize {
        OhmField::ALL.iter().filter(|f| self.get(**f).is_some()).count()
    }
}

/// Fully resolved circuit quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    pub voltage: f64,
    pub resistance: f64,
    pub current: f64,
    pub power: f64,
}

impl Circuit {
    pub fn get(&self, field: OhmField) -> f64 {
        match field {
            OhmField::Voltage => self.voltage,
            OhmField::Resistance => self.resistance,
            OhmField::Current => self.current,
            OhmField::Power => self.power,
        }
    }

    fn is_finite(&self) -> bool {
        OhmField::ALL.iter().all(|f| self.get(*f).is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResistorSolution {
    pub result: CalculationResult,
    pub circuit: Option<Circuit>,
    /// Field overwrites for the page. Never contains the edited field.
    pub backfill: Vec<(OhmField, String)>,
}

impl ResistorSolution {
    fn without_circuit(result: CalculationResult) -> Self {
        Self {
            result,
            circuit: None,
            backfill: Vec::new(),
        }
    }
}

/// Solves the network from whatever is known. `edited` is the field the user
/// is typing in; it is never back-filled.
pub fn solve_resistor(inputs: &ResistorInputs, edited: Option<OhmField>) -> ResistorSolution {
    if inputs.known_count() < 2 {
        return ResistorSolution::without_circuit(CalculationResult::placeholder());
    }

    let Some((pair, a, b)) = PAIR_PRIORITY.iter().find_map(|&(x, y)| {
        match (inputs.get(x), inputs.get(y)) {
            (Some(a), Some(b)) => Some(((x, y), a, b)),
            _ => None,
        }
    }) else {
        return ResistorSolution::without_circuit(CalculationResult::placeholder());
    };

    if let Some(reason) = degenerate_reason(pair, a, b) {
        return ResistorSolution::without_circuit(CalculationResult::undefined(reason));
    }

    let circuit = resolve_pair(pair, a, b);
    if !circuit.is_finite() {
        return ResistorSolution::without_circuit(CalculationResult::out_of_range());
    }

    let backfill = OhmField::ALL
        .iter()
        .copied()
        .filter(|f| *f != pair.0 && *f != pair.1 && Some(*f) != edited)
        .map(|f| (f, format_number(circuit.get(f))))
        .collect();

    let result = CalculationResult::valid(
        format!("{} W", format_number(circuit.power)),
        format!(
            "{} V · {} Ω · {} A",
            format_number(circuit.voltage),
            format_number(circuit.resistance),
            format_number(circuit.current)
        ),
        Tone::None,
    );

    ResistorSolution {
        result,
        circuit: Some(circuit),
        backfill,
    }
}

fn degenerate_reason(pair: (OhmField, OhmField), a: f64, b: f64) -> Option<&'static str> {
    use OhmField::*;
    let divides_by_zero = match pair {
        (Voltage, Resistance) => b == 0.0,
        (Voltage, Current) => b == 0.0,
        (Voltage, Power) => a == 0.0 || b == 0.0,
        (Resistance, Power) => a == 0.0,
        (Current, Power) => a == 0.0,
        _ => false,
    };
    if divides_by_zero {
        return Some("Div by zero");
    }
    if pair == (Resistance, Power) && a * b < 0.0 {
        return Some("No real solution");
    }
    None
}

fn resolve_pair(pair: (OhmField, OhmField), a: f64, b: f64) -> Circuit {
    use OhmField::*;
    match pair {
        (Voltage, Resistance) => {
            let (v, r) = (a, b);
            let i = v / r;
            Circuit { voltage: v, resistance: r, current: i, power: v * v / r }
        }
        (Voltage, Current) => {
            let (v, i) = (a, b);
            Circuit { voltage: v, resistance: v / i, current: i, power: v * i }
        }
        (Voltage, Power) => {
            let (v, w) = (a, b);
            Circuit { voltage: v, resistance: v * v / w, current: w / v, power: w }
        }
        (Resistance, Current) => {
            let (r, i) = (a, b);
            Circuit { voltage: i * r, resistance: r, current: i, power: i * i * r }
        }
        (Resistance, Power) => {
            let (r, w) = (a, b);
            Circuit {
                voltage: (w * r).sqrt(),
                resistance: r,
                current: (w / r).sqrt(),
                power: w,
            }
        }
        _ => {
            let (i, w) = (a, b);
            Circuit { voltage: w / i, resistance: w / (i * i), current: i, power: w }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs(v: FieldValue, r: FieldValue, i: FieldValue, w: FieldValue) -> ResistorInputs {
        ResistorInputs { voltage: v, resistance: r, current: i, power: w }
    }

    fn assert_laws(c: &Circuit) {
        assert_relative_eq!(c.voltage, c.current * c.resistance, max_relative = 1e-12);
        assert_relative_eq!(c.power, c.voltage * c.current, max_relative = 1e-12);
    }

    #[test]
    fn nine_volts_across_three_ohms() {
        let solution = solve_resistor(&inputs(Some(9.0), Some(3.0), None, None), Some(OhmField::Resistance));
        let circuit = solution.circuit.expect("solved");
        assert_eq!(circuit.current, 3.0);
        assert_eq!(circuit.power, 27.0);
        assert_eq!(
            solution.backfill,
            vec![(OhmField::Current, "3".to_string()), (OhmField::Power, "27".to_string())]
        );
        assert_eq!(solution.result.display_value, "27 W");
        assert_eq!(solution.result.subtext, "9 V · 3 Ω · 3 A");
    }

    #[test]
    fn every_pair_satisfies_ohm_and_power_laws() {
        // V = 12, R = 4, I = 3, W = 36
        let cases = [
            inputs(Some(12.0), Some(4.0), None, None),
            inputs(Some(12.0), None, Some(3.0), None),
            inputs(Some(12.0), None, None, Some(36.0)),
            inputs(None, Some(4.0), Some(3.0), None),
            inputs(None, Some(4.0), None, Some(36.0)),
            inputs(None, None, Some(3.0), Some(36.0)),
        ];
        for case in cases {
            let circuit = solve_resistor(&case, None).circuit.expect("solved");
            assert_laws(&circuit);
            assert_relative_eq!(circuit.voltage, 12.0, max_relative = 1e-12);
            assert_relative_eq!(circuit.resistance, 4.0, max_relative = 1e-12);
            assert_relative_eq!(circuit.current, 3.0, max_relative = 1e-12);
            assert_relative_eq!(circuit.power, 36.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn priority_prefers_voltage_and_resistance() {
        // Stale current and power are overridden by the V/R pair.
        let solution = solve_resistor(&inputs(Some(10.0), Some(5.0), Some(99.0), Some(1.0)), Some(OhmField::Voltage));
        let circuit = solution.circuit.expect("solved");
        assert_eq!(circuit.current, 2.0);
        assert_eq!(circuit.power, 20.0);
        assert_eq!(solution.backfill.len(), 2);
    }

    #[test]
    fn edited_field_is_never_backfilled() {
        let solution = solve_resistor(&inputs(Some(10.0), Some(5.0), Some(7.0), None), Some(OhmField::Current));
        assert_eq!(solution.backfill, vec![(OhmField::Power, "20".to_string())]);
    }

    #[test]
    fn fewer_than_two_values_is_placeholder() {
        let solution = solve_resistor(&inputs(Some(10.0), None, None, None), None);
        assert!(solution.result.is_placeholder());
        assert!(solution.backfill.is_empty());
    }

    #[test]
    fn zero_resistance_is_undefined() {
        let solution = solve_resistor(&inputs(Some(5.0), Some(0.0), None, None), None);
        assert_eq!(solution.result.display_value, "Undefined");
        assert_eq!(solution.result.subtext, "Div by zero");
        assert!(!solution.result.valid);
        assert!(solution.backfill.is_empty());
    }

    #[test]
    fn negative_power_resistance_product_has_no_real_solution() {
        let solution = solve_resistor(&inputs(None, Some(-4.0), None, Some(36.0)), None);
        assert_eq!(solution.result.subtext, "No real solution");
        assert!(solution.circuit.is_none());
    }

    #[test]
    fn parses_raw_text() {
        let parsed = ResistorInputs::parse("9", " 3 ", "", "abc");
        assert_eq!(parsed, inputs(Some(9.0), Some(3.0), None, None));
    }
}
