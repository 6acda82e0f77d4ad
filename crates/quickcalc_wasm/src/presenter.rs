//! Presenter forwarding to JavaScript callbacks.

use js_sys::Function;
use quickcalc_core::history::empty_notice;
use quickcalc_core::{CalculationResult, FieldId, HistoryEntry, Presenter, ResultSlot};
use serde_wasm_bindgen::to_value;
use wasm_bindgen::JsValue;

/// Holds the page's rendering callbacks:
/// - `on_result(slotId, result)`
/// - `on_history(lines, emptyNotice)`, the notice being null unless `lines` is empty
/// - `on_field(fieldId, text)`
pub struct JsPresenter {
    on_result: Function,
    on_history: Function,
    on_field: Function,
}

impl JsPresenter {
    pub fn new(on_result: Function, on_history: Function, on_field: Function) -> Self {
        Self {
            on_result,
            on_history,
            on_field,
        }
    }
}

fn report(context: &str, err: JsValue) {
    let message = format!("{} failed: {}", context, crate::storage::js_error_text(&err));
    web_sys::console::warn_1(&JsValue::from_str(&message));
}

impl Presenter for JsPresenter {
    fn render_result(&mut self, slot: ResultSlot, result: &CalculationResult) {
        let value = match to_value(result) {
            Ok(value) => value,
            Err(e) => return report("render_result", e.into()),
        };
        if let Err(e) = self
            .on_result
            .call2(&JsValue::NULL, &JsValue::from_str(slot.id()), &value)
        {
            report("render_result", e);
        }
    }

    fn render_history(&mut self, entries: &[HistoryEntry]) {
        let lines: Vec<_> = entries.iter().map(HistoryEntry::render).collect();
        let value = match to_value(&lines) {
            Ok(value) => value,
            Err(e) => return report("render_history", e.into()),
        };
        let notice = empty_notice(entries).map_or(JsValue::NULL, JsValue::from_str);
        if let Err(e) = self.on_history.call2(&JsValue::NULL, &value, &notice) {
            report("render_history", e);
        }
    }

    fn set_field(&mut self, field: FieldId, text: &str) {
        if let Err(e) = self.on_field.call2(
            &JsValue::NULL,
            &JsValue::from_str(field.id()),
            &JsValue::from_str(text),
        ) {
            report("set_field", e);
        }
    }
}
