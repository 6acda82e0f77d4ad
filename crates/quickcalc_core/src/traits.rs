use crate::calculators::CalculationResult;
use crate::error::StoreError;
use crate::history::HistoryEntry;
use crate::slots::{FieldId, ResultSlot};
use std::collections::HashMap;

/// A string-keyed, string-valued store that survives across sessions.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The page side of the engine.
///
/// The engine never touches the DOM directly; it reports results and field
/// overwrites through this trait and leaves rendering to the implementor.
pub trait Presenter {
    /// Shows a computed result in its output slot.
    fn render_result(&mut self, slot: ResultSlot, result: &CalculationResult);

    /// Replaces the history list, most recent first.
    fn render_history(&mut self, entries: &[HistoryEntry]);

    /// Overwrites the text of an input field.
    fn set_field(&mut self, field: FieldId, text: &str);
}

/// In-memory store for tests and for hosts without persistent storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
