//! Page-facing engine wrapper with browser debounce timers.

use crate::presenter::JsPresenter;
use crate::storage::LocalStorage;
use gloo_timers::callback::Timeout;
use js_sys::Function;
use quickcalc_core::history::RecordOutcome;
use quickcalc_core::{DebounceSlot, Engine, FieldId, HistorySettings};
use serde_wasm_bindgen::to_value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

struct AppState {
    engine: Engine<LocalStorage>,
    presenter: JsPresenter,
    timers: HashMap<DebounceSlot, Timeout>,
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[wasm_bindgen]
pub struct WasmQuickCalc {
    state: Rc<RefCell<AppState>>,
}

#[wasm_bindgen]
impl WasmQuickCalc {
    #[wasm_bindgen(constructor)]
    pub fn new(
        on_result: Function,
        on_history: Function,
        on_field: Function,
    ) -> Result<WasmQuickCalc, JsValue> {
        console_error_panic_hook::set_once();

        let store = LocalStorage::new()
            .map_err(|e| JsValue::from_str(&format!("Storage setup failed: {}", e)))?;
        let engine = Engine::new(store, HistorySettings::default());
        let mut presenter = JsPresenter::new(on_result, on_history, on_field);
        engine.render_all(&mut presenter);

        Ok(WasmQuickCalc {
            state: Rc::new(RefCell::new(AppState {
                engine,
                presenter,
                timers: HashMap::new(),
            })),
        })
    }

    /// Handles an input event for the element with id `field_id`.
    pub fn field_changed(&self, field_id: &str, text: &str) -> Result<(), JsValue> {
        let field = FieldId::from_id(field_id)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown field: {}", field_id)))?;

        let mut state = self.state.borrow_mut();
        let AppState {
            engine, presenter, ..
        } = &mut *state;
        let outcome = engine.field_changed(field, text, now_ms(), presenter);

        if let Some(RecordOutcome::Scheduled { deadline }) = outcome {
            let slot = field.calculator().debounce_slot();
            // Replacing the entry drops the previous Timeout, which cancels it.
            state
                .timers
                .insert(slot, schedule_flush(Rc::downgrade(&self.state), deadline));
        }
        Ok(())
    }

    pub fn set_reference(&self, reference: &str) {
        self.state.borrow_mut().engine.set_reference(reference);
    }

    pub fn clear_inputs(&self) {
        let mut state = self.state.borrow_mut();
        let AppState {
            engine, presenter, ..
        } = &mut *state;
        engine.clear_inputs(presenter);
    }

    /// Empties the history. Confirm with the user before calling.
    pub fn clear_history(&self) {
        let mut state = self.state.borrow_mut();
        state.timers.clear();
        let AppState {
            engine, presenter, ..
        } = &mut *state;
        engine.clear_history(presenter);
    }

    pub fn history_lines(&self) -> Result<JsValue, JsValue> {
        let lines = self.state.borrow().engine.history().render();
        to_value(&lines).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn share_text(&self) -> String {
        self.state.borrow().engine.share_text()
    }

    pub fn theme(&self) -> String {
        self.state.borrow().engine.theme().to_string()
    }

    pub fn toggle_theme(&self) -> String {
        self.state.borrow_mut().engine.toggle_theme().to_string()
    }
}

fn schedule_flush(state: Weak<RefCell<AppState>>, deadline: u64) -> Timeout {
    let delay = deadline.saturating_sub(now_ms());
    let millis = u32::try_from(delay).unwrap_or(u32::MAX);
    Timeout::new(millis, move || {
        let Some(state) = state.upgrade() else {
            return;
        };
        let Ok(mut state) = state.try_borrow_mut() else {
            return;
        };
        let AppState {
            engine, presenter, ..
        } = &mut *state;
        engine.flush_due(now_ms().max(deadline), presenter);
    })
}
