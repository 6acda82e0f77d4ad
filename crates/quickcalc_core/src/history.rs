//! Bounded, debounced and deduplicated history of computed results.
//!
//! The log owns its entries, newest first. A `record` call does not append
//! straight away: it parks a candidate in its debounce slot, replacing any
//! candidate already parked there, and the candidate is appended by
//! [`HistoryLog::flush_due`] once the slot has been quiet for its delay. Hosts
//! drive `flush_due` from a timer armed at [`HistoryLog::next_deadline`].

use crate::error::StoreError;
use crate::slots::DebounceSlot;
use crate::traits::KeyValueStore;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Storage key holding the serialized history.
pub const HISTORY_KEY: &str = "calcHistory";

/// Text shown when there is nothing to list.
pub const EMPTY_HISTORY: &str = "No history yet.";

/// The notice to show instead of a list, if `entries` is empty.
pub fn empty_notice(entries: &[HistoryEntry]) -> Option<&'static str> {
    entries.is_empty().then_some(EMPTY_HISTORY)
}

/// Settings controlling the history log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySettings {
    pub capacity: usize,
    pub calculator_debounce_ms: u64,
    pub conversion_debounce_ms: u64,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            capacity: 50,
            calculator_debounce_ms: 1000,
            conversion_debounce_ms: 1500,
        }
    }
}

impl HistorySettings {
    pub fn delay(&self, slot: DebounceSlot) -> u64 {
        match slot {
            DebounceSlot::Calculators => self.calculator_debounce_ms,
            DebounceSlot::Temperature | DebounceSlot::Distance => self.conversion_debounce_ms,
        }
    }
}

/// A journaled result. The serialized field names are shared with histories
/// written by the page before the engine existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub category: String,
    #[serde(rename = "val")]
    pub value: String,
    #[serde(rename = "sub")]
    pub subtext: String,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub timestamp: u64,
}

impl HistoryEntry {
    fn same_result(&self, category: &str, value: &str, subtext: &str) -> bool {
        self.category == category && self.value == value && self.subtext == subtext
    }

    /// The reference tag, if one was given.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    pub fn render(&self) -> HistoryLine {
        let heading = match self.reference() {
            Some(tag) => format!("{} • {}", self.category, tag),
            None => self.category.clone(),
        };
        HistoryLine {
            heading,
            value: self.value.clone(),
            subtext: self.subtext.clone(),
        }
    }
}

/// Display-ready form of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLine {
    pub heading: String,
    pub value: String,
    pub subtext: String,
}

/// A result waiting for its debounce slot to go quiet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub category: String,
    pub value: String,
    pub subtext: String,
    pub reference: Option<String>,
}

impl Candidate {
    pub fn new(
        category: impl Into<String>,
        value: impl Into<String>,
        subtext: impl Into<String>,
        reference: Option<&str>,
    ) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
            subtext: subtext.into(),
            reference: reference
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        }
    }

    fn into_entry(self, timestamp: u64) -> HistoryEntry {
        HistoryEntry {
            category: self.category,
            value: self.value,
            subtext: self.subtext,
            reference: self.reference,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Identical to the most recent entry; nothing was scheduled.
    Duplicate,
    /// Parked in its slot until `deadline`.
    Scheduled { deadline: u64 },
}

#[derive(Debug, Clone)]
struct Pending {
    candidate: Candidate,
    deadline: u64,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    pending: BTreeMap<DebounceSlot, Pending>,
    settings: HistorySettings,
}

impl HistoryLog {
    pub fn new(settings: HistorySettings) -> Self {
        Self {
            entries: Vec::new(),
            pending: BTreeMap::new(),
            settings,
        }
    }

    /// Builds a log from existing entries, newest first, trimmed to capacity.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, settings: HistorySettings) -> Self {
        entries.truncate(settings.capacity);
        Self {
            entries,
            pending: BTreeMap::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &HistorySettings {
        &self.settings
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules `candidate` in `slot`, unless it repeats the latest entry.
    ///
    /// A repeat leaves whatever is already parked untouched.
    pub fn record(&mut self, slot: DebounceSlot, candidate: Candidate, now: u64) -> RecordOutcome {
        if self.repeats_latest(&candidate) {
            return RecordOutcome::Duplicate;
        }

        let deadline = now.saturating_add(self.settings.delay(slot));
        self.pending.insert(slot, Pending { candidate, deadline });
        RecordOutcome::Scheduled { deadline }
    }

    /// Earliest deadline among parked candidates.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.values().map(|p| p.deadline).min()
    }

    #[cfg(test)]
    fn deadline(&self, slot: DebounceSlot) -> Option<u64> {
        self.pending.get(&slot).map(|p| p.deadline)
    }

    #[cfg(test)]
    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Appends every candidate whose deadline has passed, stamped with `now`.
    /// Returns true when the entries changed.
    pub fn flush_due(&mut self, now: u64) -> bool {
        let mut due: Vec<(DebounceSlot, u64)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(slot, p)| (*slot, p.deadline))
            .collect();
        due.sort_by_key(|(_, deadline)| *deadline);

        let mut changed = false;
        for (slot, _) in due {
            let Some(pending) = self.pending.remove(&slot) else {
                continue;
            };
            changed |= self.append(pending.candidate, now);
        }
        changed
    }

    /// Empties the log and drops anything still parked.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pending.clear();
    }

    /// Display lines for the newest entries, capped at capacity.
    pub fn render(&self) -> Vec<HistoryLine> {
        self.entries
            .iter()
            .take(self.settings.capacity)
            .map(HistoryEntry::render)
            .collect()
    }

    fn repeats_latest(&self, candidate: &Candidate) -> bool {
        self.entries.first().is_some_and(|latest| {
            latest.same_result(&candidate.category, &candidate.value, &candidate.subtext)
        })
    }

    fn append(&mut self, candidate: Candidate, now: u64) -> bool {
        if self.repeats_latest(&candidate) {
            return false;
        }

        debug!(category = %candidate.category, value = %candidate.value, "history entry appended");
        self.entries.insert(0, candidate.into_entry(now));
        if self.entries.len() > self.settings.capacity {
            let evicted = self.entries.len() - self.settings.capacity;
            self.entries.truncate(self.settings.capacity);
            debug!(evicted, "history trimmed to capacity");
        }
        true
    }

    /// Loads the log from `store`. Missing or malformed data gives an empty log.
    pub fn load(store: &impl KeyValueStore, settings: HistorySettings) -> Self {
        let Some(raw) = store.get(HISTORY_KEY) else {
            return Self::new(settings);
        };

        match parse_entries(&raw) {
            Ok(entries) => Self::from_entries(entries, settings),
            Err(err) => {
                warn!("discarding stored history: {:#}", err);
                Self::new(settings)
            }
        }
    }

    /// Writes the entries to `store` as a JSON array.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.entries)?;
        store.set(HISTORY_KEY, &json)
    }
}

fn parse_entries(raw: &str) -> anyhow::Result<Vec<HistoryEntry>> {
    if raw.trim() == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).with_context(|| format!("`{}` is not a history array", HISTORY_KEY))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MemoryStore;

    fn candidate(value: &str) -> Candidate {
        Candidate::new("Change", value, "1 to 2", None)
    }

    fn record_now(log: &mut HistoryLog, value: &str, now: u64) {
        log.record(DebounceSlot::Calculators, candidate(value), now);
        log.flush_due(now + log.settings().calculator_debounce_ms);
    }

    #[test]
    fn keeps_the_fifty_most_recent() {
        let mut log = HistoryLog::new(HistorySettings::default());
        for i in 0..51 {
            record_now(&mut log, &format!("{i}%"), i * 10_000);
        }

        assert_eq!(log.len(), 50);
        assert_eq!(log.entries()[0].value, "50%");
        assert_eq!(log.entries()[49].value, "1%");
    }

    #[test]
    fn consecutive_duplicates_are_suppressed() {
        let mut log = HistoryLog::new(HistorySettings::default());
        record_now(&mut log, "5%", 0);
        assert_eq!(
            log.record(DebounceSlot::Calculators, candidate("5%"), 5_000),
            RecordOutcome::Duplicate
        );
        log.flush_due(10_000);
        assert_eq!(log.len(), 1);

        // Not consecutive any more, so the repeat is kept.
        record_now(&mut log, "6%", 20_000);
        record_now(&mut log, "5%", 30_000);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn debounce_keeps_the_last_edit_only() {
        let mut log = HistoryLog::new(HistorySettings::default());
        log.record(DebounceSlot::Calculators, candidate("1%"), 0);
        log.record(DebounceSlot::Calculators, candidate("12%"), 400);

        assert!(!log.flush_due(1000), "the second edit pushed the deadline back");
        assert_eq!(log.deadline(DebounceSlot::Calculators), Some(1400));
        assert!(log.flush_due(1400));

        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].value, "12%");
        assert_eq!(log.entries()[0].timestamp, 1400);
        assert!(!log.has_pending());
    }

    #[test]
    fn conversion_slots_use_the_longer_delay() {
        let mut log = HistoryLog::new(HistorySettings::default());
        let outcome = log.record(
            DebounceSlot::Temperature,
            Candidate::new("Temperature", "100°C", "212°F / 373.15 K", None),
            0,
        );
        assert_eq!(outcome, RecordOutcome::Scheduled { deadline: 1500 });
        log.record(DebounceSlot::Calculators, candidate("3%"), 100);
        assert_eq!(log.next_deadline(), Some(1100));

        log.flush_due(1100);
        assert_eq!(log.len(), 1);
        log.flush_due(1500);
        assert_eq!(log.entries()[0].category, "Temperature");
    }

    #[test]
    fn duplicate_record_leaves_pending_candidate_alone() {
        let mut log = HistoryLog::new(HistorySettings::default());
        record_now(&mut log, "5%", 0);
        log.record(DebounceSlot::Calculators, candidate("7%"), 2_000);
        log.record(DebounceSlot::Calculators, candidate("5%"), 2_500);

        log.flush_due(3_000);
        assert_eq!(log.entries()[0].value, "7%");
    }

    #[test]
    fn clear_drops_entries_and_pending() {
        let mut log = HistoryLog::new(HistorySettings::default());
        record_now(&mut log, "5%", 0);
        log.record(DebounceSlot::Distance, candidate("9%"), 2_000);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.next_deadline(), None);
        assert!(log.render().is_empty());
        assert_eq!(empty_notice(log.entries()), Some(EMPTY_HISTORY));

        record_now(&mut log, "6%", 10_000);
        assert_eq!(empty_notice(log.entries()), None);
    }

    #[test]
    fn render_shows_reference_tag() {
        let mut log = HistoryLog::new(HistorySettings::default());
        log.record(
            DebounceSlot::Calculators,
            Candidate::new("Percent Of", "5%", "1 is 5% of 20", Some("  invoice 7 ")),
            0,
        );
        log.record(
            DebounceSlot::Distance,
            Candidate::new("Distance", "1 mi", "1.61 km", Some("")),
            0,
        );
        log.flush_due(10_000);

        let lines = log.render();
        assert_eq!(lines.len(), 2);
        let tagged = lines.iter().find(|l| l.value == "5%").expect("tagged line");
        assert_eq!(tagged.heading, "Percent Of • invoice 7");
        let untagged = lines.iter().find(|l| l.value == "1 mi").expect("untagged line");
        assert_eq!(untagged.heading, "Distance");
    }

    #[test]
    fn persists_in_the_page_format() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::new(HistorySettings::default());
        record_now(&mut log, "5%", 0);
        log.save(&mut store).expect("save");

        let raw = store.get(HISTORY_KEY).expect("stored");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(json[0]["type"], "Change");
        assert_eq!(json[0]["val"], "5%");
        assert_eq!(json[0]["sub"], "1 to 2");

        let reloaded = HistoryLog::load(&store, HistorySettings::default());
        assert_eq!(reloaded.entries(), log.entries());
    }

    #[test]
    fn loads_entries_written_by_the_page() {
        let mut store = MemoryStore::new();
        store
            .set(
                HISTORY_KEY,
                r#"[{"type":"Fraction","val":"50%","sub":"1 / 2","ref":"","timestamp":1700000000000}]"#,
            )
            .expect("set");

        let log = HistoryLog::load(&store, HistorySettings::default());
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].reference(), None);
        assert_eq!(log.render()[0].heading, "Fraction");
    }

    #[test]
    fn malformed_history_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(HISTORY_KEY, "{not json").expect("set");
        assert!(HistoryLog::load(&store, HistorySettings::default()).is_empty());

        store.set(HISTORY_KEY, "null").expect("set");
        assert!(HistoryLog::load(&store, HistorySettings::default()).is_empty());
    }

    #[test]
    fn oversized_stored_history_is_trimmed() {
        let entries: Vec<HistoryEntry> = (0..60)
            .map(|i| candidate(&format!("{i}%")).into_entry(i))
            .collect();
        let log = HistoryLog::from_entries(entries, HistorySettings::default());
        assert_eq!(log.len(), 50);
    }
}
