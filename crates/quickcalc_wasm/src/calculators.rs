//! Stateless calculator exports.
//!
//! These mirror the engine's calculators for pages that keep their own state.
//! Each returns a serialized `CalculationResult` (or a record of them).

use quickcalc_core::calculators::{
    self, AdjustOp, CalculationResult, OhmField, ResistorInputs, ReverseOp,
};
use quickcalc_core::format::format_number;
use quickcalc_core::solver::{solve_distance, solve_temperature, LinkedSolution};
use quickcalc_core::units::{DistanceUnit, TemperatureScale};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

fn serialize<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen]
pub fn percent_change(previous: &str, new: &str) -> Result<JsValue, JsValue> {
    serialize(&calculators::percent_change(previous, new))
}

#[wasm_bindgen]
pub fn percent_of(part: &str, base: &str) -> Result<JsValue, JsValue> {
    serialize(&calculators::percent_of(part, base))
}

#[wasm_bindgen]
pub fn add_subtract_percent(base: &str, percent: &str, op: &str) -> Result<JsValue, JsValue> {
    serialize(&calculators::add_subtract_percent(base, percent, AdjustOp::parse(op)))
}

#[wasm_bindgen]
pub fn reverse_percent(final_value: &str, percent: &str, op: &str) -> Result<JsValue, JsValue> {
    serialize(&calculators::reverse_percent(final_value, percent, ReverseOp::parse(op)))
}

#[wasm_bindgen]
pub fn fraction_to_percent(numerator: &str, denominator: &str) -> Result<JsValue, JsValue> {
    serialize(&calculators::fraction_to_percent(numerator, denominator))
}

/// Payload for the resistor solver.
#[derive(Serialize)]
struct ResistorPayload {
    result: CalculationResult,
    backfill: Vec<(OhmField, String)>,
}

/// `edited` is the field id being typed in (`"voltage"`, `"resistance"`,
/// `"current"` or `"power"`), or an empty string.
#[wasm_bindgen]
pub fn solve_resistor(
    voltage: &str,
    resistance: &str,
    current: &str,
    power: &str,
    edited: &str,
) -> Result<JsValue, JsValue> {
    let edited = match edited {
        "voltage" => Some(OhmField::Voltage),
        "resistance" => Some(OhmField::Resistance),
        "current" => Some(OhmField::Current),
        "power" => Some(OhmField::Power),
        _ => None,
    };
    let inputs = ResistorInputs::parse(voltage, resistance, current, power);
    let solution = calculators::solve_resistor(&inputs, edited);

    serialize(&ResistorPayload {
        result: solution.result,
        backfill: solution.backfill,
    })
}

#[wasm_bindgen]
pub fn shortfill(volume: &str, shot_strength: &str, target: &str) -> Result<JsValue, JsValue> {
    serialize(&calculators::shortfill(volume, shot_strength, target))
}

#[wasm_bindgen]
pub fn diy_mix(
    total_volume: &str,
    flavor_percent: &str,
    base_strength: &str,
    target_strength: &str,
) -> Result<JsValue, JsValue> {
    serialize(&calculators::diy_mix(
        total_volume,
        flavor_percent,
        base_strength,
        target_strength,
    ))
}

#[derive(Serialize)]
struct LinkedPayload {
    result: CalculationResult,
    fields: Vec<(String, String)>,
}

fn linked_payload<U: Copy>(
    solution: LinkedSolution<U>,
    name: impl Fn(U) -> &'static str,
) -> LinkedPayload {
    LinkedPayload {
        result: solution.result,
        fields: solution
            .overwrites
            .into_iter()
            .map(|(unit, text)| (name(unit).to_string(), text))
            .collect(),
    }
}

/// `scale` is one of `"c"`, `"f"` or `"k"`.
#[wasm_bindgen]
pub fn convert_temperature(scale: &str, text: &str) -> Result<JsValue, JsValue> {
    let scale = match scale {
        "c" => TemperatureScale::Celsius,
        "f" => TemperatureScale::Fahrenheit,
        "k" => TemperatureScale::Kelvin,
        other => return Err(JsValue::from_str(&format!("Unknown scale: {}", other))),
    };
    serialize(&linked_payload(solve_temperature(scale, text), |s| match s {
        TemperatureScale::Celsius => "c",
        TemperatureScale::Fahrenheit => "f",
        TemperatureScale::Kelvin => "k",
    }))
}

/// `unit` is one of `"mi"`, `"km"`, `"m"`, `"ft"` or `"yd"`.
#[wasm_bindgen]
pub fn convert_distance(unit: &str, text: &str) -> Result<JsValue, JsValue> {
    let unit = DistanceUnit::ALL
        .into_iter()
        .find(|u| u.symbol() == unit)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown unit: {}", unit)))?;
    serialize(&linked_payload(solve_distance(unit, text), DistanceUnit::symbol))
}

#[wasm_bindgen]
pub fn format_value(value: f64) -> String {
    format_number(value)
}
