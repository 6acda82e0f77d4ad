pub mod calculators;
pub mod engine;
pub mod error;
pub mod export;
pub mod format;
pub mod history;
pub mod slots;
pub mod solver;
pub mod theme;
/// The `quickcalc_core` crate provides the computation engine behind the QuickCalc page.
/// Everything here is plain Rust with no DOM access, so it runs under `cargo test`
/// as well as inside the WASM bridge.
///
/// Key components:
/// - **Calculators**: Percentage, Ohm's law and e-liquid functions returning a `CalculationResult`.
/// - **Solver**: Linked temperature and distance fields recomputed from the edited one.
/// - **History**: A bounded, debounced and deduplicated log with a `KeyValueStore` boundary.
/// - **Engine**: Field snapshots, recomputation on edit and a `Presenter` for the page.
pub mod traits;
pub mod units;

pub use calculators::{CalculationResult, Tone};
pub use engine::Engine;
pub use error::StoreError;
pub use history::{HistoryEntry, HistoryLog, HistorySettings};
pub use slots::{Calculator, DebounceSlot, FieldId, ResultSlot};
pub use traits::{KeyValueStore, MemoryStore, Presenter};
