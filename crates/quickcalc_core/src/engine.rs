//! The reactive engine tying field edits to results and history.
//!
//! The engine keeps the raw text of every field. On each edit it re-runs the
//! calculator owning that field against the full snapshot, reports results and
//! field overwrites to a [`Presenter`], and parks valid results in the history
//! log's debounce slot for that calculator.

use crate::calculators::{
    add_subtract_percent, diy_mix, eliquid, fraction_to_percent, percent, percent_change,
    percent_of, resistor, reverse_percent, shortfill, solve_resistor, AdjustOp,
    CalculationResult, ResistorInputs, ReverseOp,
};
use crate::export::share_text;
use crate::history::{Candidate, HistoryLog, HistorySettings, RecordOutcome};
use crate::slots::{Calculator, FieldId, ResultSlot};
use crate::solver::{self, solve_distance, solve_temperature};
use crate::theme::Theme;
use crate::traits::{KeyValueStore, Presenter};
use std::collections::HashMap;
use tracing::warn;

/// Everything one recomputation produced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recomputed {
    pub results: Vec<(ResultSlot, CalculationResult)>,
    pub overwrites: Vec<(FieldId, String)>,
    /// History category and the result to journal, when there is one.
    pub summary: Option<(&'static str, CalculationResult)>,
}

impl Recomputed {
    fn single(slot: ResultSlot, category: &'static str, result: CalculationResult) -> Self {
        Self {
            results: vec![(slot, result.clone())],
            overwrites: Vec::new(),
            summary: Some((category, result)),
        }
    }
}

pub struct Engine<S: KeyValueStore> {
    store: S,
    fields: HashMap<FieldId, String>,
    results: HashMap<ResultSlot, CalculationResult>,
    history: HistoryLog,
    reference: String,
    theme: Theme,
}

impl<S: KeyValueStore> Engine<S> {
    /// Creates an engine, restoring history and theme from `store`.
    pub fn new(store: S, settings: HistorySettings) -> Self {
        let history = HistoryLog::load(&store, settings);
        let theme = Theme::load(&store);
        Self {
            store,
            fields: HashMap::new(),
            results: HashMap::new(),
            history,
            reference: String::new(),
            theme,
        }
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn field(&self, field: FieldId) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn result(&self, slot: ResultSlot) -> CalculationResult {
        self.results.get(&slot).cloned().unwrap_or_default()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Sets the tag attached to subsequent history records.
    pub fn set_reference(&mut self, reference: &str) {
        self.reference = reference.to_string();
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Paints every result slot and the history list.
    pub fn render_all(&self, presenter: &mut impl Presenter) {
        for slot in ResultSlot::ALL {
            presenter.render_result(slot, &self.result(slot));
        }
        presenter.render_history(self.history.entries());
    }

    /// Handles an edit of `field`. Returns how the history log treated the
    /// result, or `None` when the result was not valid.
    pub fn field_changed(
        &mut self,
        field: FieldId,
        text: &str,
        now: u64,
        presenter: &mut impl Presenter,
    ) -> Option<RecordOutcome> {
        self.fields.insert(field, text.to_string());
        let calculator = field.calculator();
        let recomputed = self.recompute(calculator, Some(field));

        for (target, value) in &recomputed.overwrites {
            self.fields.insert(*target, value.clone());
            presenter.set_field(*target, value);
        }
        for (slot, result) in &recomputed.results {
            self.results.insert(*slot, result.clone());
            presenter.render_result(*slot, result);
        }

        let (category, summary) = recomputed.summary.filter(|(_, r)| r.valid)?;
        let candidate = Candidate::new(
            category,
            summary.display_value,
            summary.subtext,
            Some(&self.reference),
        );
        Some(self.history.record(calculator.debounce_slot(), candidate, now))
    }

    /// Runs `calculator` against the current snapshot without side effects.
    pub fn recompute(&self, calculator: Calculator, edited: Option<FieldId>) -> Recomputed {
        match calculator {
            Calculator::Change => Recomputed::single(
                ResultSlot::Change,
                percent::CHANGE,
                percent_change(self.field(FieldId::ChangePrevious), self.field(FieldId::ChangeNew)),
            ),
            Calculator::PercentOf => Recomputed::single(
                ResultSlot::PercentOf,
                percent::PERCENT_OF,
                percent_of(self.field(FieldId::OfPart), self.field(FieldId::OfBase)),
            ),
            Calculator::AddSub => Recomputed::single(
                ResultSlot::AddSub,
                percent::ADD_SUB,
                add_subtract_percent(
                    self.field(FieldId::AddSubBase),
                    self.field(FieldId::AddSubPercent),
                    AdjustOp::parse(self.field(FieldId::AddSubOp)),
                ),
            ),
            Calculator::Reverse => Recomputed::single(
                ResultSlot::Reverse,
                percent::REVERSE,
                reverse_percent(
                    self.field(FieldId::ReverseValue),
                    self.field(FieldId::ReversePercent),
                    ReverseOp::parse(self.field(FieldId::ReverseOp)),
                ),
            ),
            Calculator::Fraction => Recomputed::single(
                ResultSlot::Fraction,
                percent::FRACTION,
                fraction_to_percent(
                    self.field(FieldId::FractionNumerator),
                    self.field(FieldId::FractionDenominator),
                ),
            ),
            Calculator::OhmsLaw => {
                let inputs = ResistorInputs::parse(
                    self.field(FieldId::Ohm(resistor::OhmField::Voltage)),
                    self.field(FieldId::Ohm(resistor::OhmField::Resistance)),
                    self.field(FieldId::Ohm(resistor::OhmField::Current)),
                    self.field(FieldId::Ohm(resistor::OhmField::Power)),
                );
                let edited = match edited {
                    Some(FieldId::Ohm(field)) => Some(field),
                    _ => None,
                };
                let solution = solve_resistor(&inputs, edited);
                Recomputed {
                    results: vec![(ResultSlot::OhmsLaw, solution.result.clone())],
                    overwrites: solution
                        .backfill
                        .into_iter()
                        .map(|(field, text)| (FieldId::Ohm(field), text))
                        .collect(),
                    summary: Some((resistor::OHMS_LAW, solution.result)),
                }
            }
            Calculator::Shortfill => {
                let mix = shortfill(
                    self.field(FieldId::ShortfillVolume),
                    self.field(FieldId::ShortfillShot),
                    self.field(FieldId::ShortfillTarget),
                );
                Recomputed {
                    summary: Some((eliquid::SHORTFILL, mix.summary())),
                    results: vec![
                        (ResultSlot::ShortfillNicotine, mix.nicotine_to_add),
                        (ResultSlot::ShortfillTotal, mix.total_volume),
                    ],
                    overwrites: Vec::new(),
                }
            }
            Calculator::DiyMix => {
                let mix = diy_mix(
                    self.field(FieldId::DiyTotal),
                    self.field(FieldId::DiyFlavor),
                    self.field(FieldId::DiyBaseNicotine),
                    self.field(FieldId::DiyTargetNicotine),
                );
                Recomputed {
                    summary: Some((eliquid::DIY_MIX, mix.summary())),
                    results: vec![
                        (ResultSlot::DiyNicotine, mix.nicotine),
                        (ResultSlot::DiyFlavor, mix.flavor),
                        (ResultSlot::DiyBase, mix.base),
                    ],
                    overwrites: Vec::new(),
                }
            }
            Calculator::Temperature => match edited {
                Some(FieldId::Temperature(scale)) => {
                    let solution = solve_temperature(scale, self.field(FieldId::Temperature(scale)));
                    Recomputed {
                        results: vec![(ResultSlot::Temperature, solution.result.clone())],
                        overwrites: solution
                            .overwrites
                            .into_iter()
                            .map(|(scale, text)| (FieldId::Temperature(scale), text))
                            .collect(),
                        summary: Some((solver::TEMPERATURE, solution.result)),
                    }
                }
                _ => Recomputed::single(
                    ResultSlot::Temperature,
                    solver::TEMPERATURE,
                    CalculationResult::placeholder(),
                ),
            },
            Calculator::Distance => match edited {
                Some(FieldId::Distance(unit)) => {
                    let solution = solve_distance(unit, self.field(FieldId::Distance(unit)));
                    Recomputed {
                        results: vec![(ResultSlot::Distance, solution.result.clone())],
                        overwrites: solution
                            .overwrites
                            .into_iter()
                            .map(|(unit, text)| (FieldId::Distance(unit), text))
                            .collect(),
                        summary: Some((solver::DISTANCE, solution.result)),
                    }
                }
                _ => Recomputed::single(
                    ResultSlot::Distance,
                    solver::DISTANCE,
                    CalculationResult::placeholder(),
                ),
            },
        }
    }

    /// Empties every numeric input and re-renders all results. Operator
    /// selectors keep their choice.
    pub fn clear_inputs(&mut self, presenter: &mut impl Presenter) {
        let cleared: Vec<FieldId> = FieldId::all()
            .filter(|f| !matches!(f, FieldId::AddSubOp | FieldId::ReverseOp))
            .collect();
        for field in cleared {
            self.fields.remove(&field);
            presenter.set_field(field, "");
        }

        for calculator in Calculator::ALL {
            for (slot, result) in self.recompute(calculator, None).results {
                presenter.render_result(slot, &result);
                self.results.insert(slot, result);
            }
        }
    }

    /// Appends any history candidates whose debounce delay has elapsed.
    pub fn flush_due(&mut self, now: u64, presenter: &mut impl Presenter) -> bool {
        if !self.history.flush_due(now) {
            return false;
        }
        self.persist_history();
        presenter.render_history(self.history.entries());
        true
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.history.next_deadline()
    }

    /// Empties the history. The caller is expected to have confirmed this
    /// with the user.
    pub fn clear_history(&mut self, presenter: &mut impl Presenter) {
        self.history.clear();
        self.persist_history();
        presenter.render_history(self.history.entries());
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(err) = self.theme.save(&mut self.store) {
            warn!("failed to save theme: {}", err);
        }
        self.theme
    }

    /// Text block of every valid result, prefixed by the reference tag.
    pub fn share_text(&self) -> String {
        share_text(
            &self.reference,
            ResultSlot::ALL
                .iter()
                .filter_map(|slot| self.results.get(slot).map(|r| (slot.title(), r))),
        )
    }

    fn persist_history(&mut self) {
        if let Err(err) = self.history.save(&mut self.store) {
            warn!("failed to save history: {}", err);
        }
    }
}
