//! WASM bridge for the QuickCalc page.
//!
//! `WasmQuickCalc` owns the engine, backs it with `localStorage` and arms a
//! browser timer per debounce slot. The free functions in `calculators` expose
//! the stateless calculators directly.

mod app;
mod calculators;
mod presenter;
mod storage;

pub use app::WasmQuickCalc;
pub use calculators::{
    add_subtract_percent, convert_distance, convert_temperature, diy_mix, format_value,
    fraction_to_percent, percent_change, percent_of, reverse_percent, shortfill, solve_resistor,
};

#[cfg(test)]
mod tests {
    use super::WasmQuickCalc;

    #[test]
    fn app_reexport_is_wired() {
        assert!(std::any::type_name::<WasmQuickCalc>().ends_with("WasmQuickCalc"));
    }
}
