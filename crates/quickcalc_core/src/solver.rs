//! Linked-field solvers for the temperature and distance groups.
//!
//! Only the edited field's text is trusted. Its value is mapped to the
//! canonical unit and every sibling field is recomputed and overwritten. When
//! the edited text does not parse the whole group is cleared. When a sibling
//! value overflows, the group is left untouched.

use crate::calculators::{parse_field, CalculationResult, Tone};
use crate::format::format_number;
use crate::units::{DistanceUnit, TemperatureScale};
use std::hash::Hash;

pub const TEMPERATURE: &str = "Temperature";
pub const DISTANCE: &str = "Distance";

#[derive(Debug, Clone, PartialEq)]
pub struct LinkedSolution<U> {
    pub result: CalculationResult,
    /// New text for the sibling fields, or empty text for every field of the
    /// group when the edit was cleared.
    pub overwrites: Vec<(U, String)>,
}

/// A group of interchangeable units sharing one canonical value.
pub trait LinkedUnit: Copy + Eq + Hash + 'static {
    fn all() -> &'static [Self];
    fn to_canonical(self, value: f64) -> f64;
    fn from_canonical(self, canonical: f64) -> f64;
    fn symbol(self) -> &'static str;
}

impl LinkedUnit for TemperatureScale {
    fn all() -> &'static [Self] {
        &TemperatureScale::ALL
    }
    fn to_canonical(self, value: f64) -> f64 {
        self.to_celsius(value)
    }
    fn from_canonical(self, canonical: f64) -> f64 {
        self.from_celsius(canonical)
    }
    fn symbol(self) -> &'static str {
        TemperatureScale::symbol(self)
    }
}

impl LinkedUnit for DistanceUnit {
    fn all() -> &'static [Self] {
        &DistanceUnit::ALL
    }
    fn to_canonical(self, value: f64) -> f64 {
        self.to_miles(value)
    }
    fn from_canonical(self, canonical: f64) -> f64 {
        self.from_miles(canonical)
    }
    fn symbol(self) -> &'static str {
        DistanceUnit::symbol(self)
    }
}

fn with_symbol<U: LinkedUnit>(unit: U, value: f64) -> String {
    let symbol = unit.symbol();
    if symbol.starts_with('°') {
        format!("{}{}", format_number(value), symbol)
    } else {
        format!("{} {}", format_number(value), symbol)
    }
}

/// Recomputes a linked group after `edited` changed to `text`.
pub fn solve_linked<U: LinkedUnit>(edited: U, text: &str) -> LinkedSolution<U> {
    let Some(value) = parse_field(text) else {
        return LinkedSolution {
            result: CalculationResult::placeholder(),
            overwrites: U::all().iter().map(|u| (*u, String::new())).collect(),
        };
    };

    let canonical = edited.to_canonical(value);
    let siblings: Vec<(U, f64)> = U::all()
        .iter()
        .copied()
        .filter(|u| *u != edited)
        .map(|u| (u, u.from_canonical(canonical)))
        .collect();
    if siblings.iter().any(|(_, v)| !v.is_finite()) {
        return LinkedSolution {
            result: CalculationResult::out_of_range(),
            overwrites: Vec::new(),
        };
    }

    let subtext = siblings
        .iter()
        .map(|(u, v)| with_symbol(*u, *v))
        .collect::<Vec<_>>()
        .join(" / ");

    LinkedSolution {
        result: CalculationResult::valid(with_symbol(edited, value), subtext, Tone::None),
        overwrites: siblings
            .into_iter()
            .map(|(u, v)| (u, format_number(v)))
            .collect(),
    }
}

pub fn solve_temperature(edited: TemperatureScale, text: &str) -> LinkedSolution<TemperatureScale> {
    solve_linked(edited, text)
}

pub fn solve_distance(edited: DistanceUnit, text: &str) -> LinkedSolution<DistanceUnit> {
    solve_linked(edited, text)
}
