//! E-liquid mixing: topping up a shortfill and building a DIY mix.

use super::{parse_field, CalculationResult, Tone};
use crate::format::format_number;
use serde::{Deserialize, Serialize};

pub const SHORTFILL: &str = "Shortfill";
pub const DIY_MIX: &str = "DIY Mix";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortfillResult {
    pub nicotine_to_add: CalculationResult,
    pub total_volume: CalculationResult,
}

impl ShortfillResult {
    fn uniform(result: CalculationResult) -> Self {
        Self {
            nicotine_to_add: result.clone(),
            total_volume: result,
        }
    }

    /// Summary used for the history log.
    pub fn summary(&self) -> CalculationResult {
        if !self.nicotine_to_add.valid {
            return self.nicotine_to_add.clone();
        }
        CalculationResult::valid(
            format!("{} nic shot", self.nicotine_to_add.display_value),
            format!("Total {}", self.total_volume.display_value),
            Tone::None,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiyMixResult {
    pub nicotine: CalculationResult,
    pub flavor: CalculationResult,
    pub base: CalculationResult,
}

impl DiyMixResult {
    fn uniform(result: CalculationResult) -> Self {
        Self {
            nicotine: result.clone(),
            flavor: result.clone(),
            base: result,
        }
    }

    pub fn summary(&self) -> CalculationResult {
        if !self.base.valid {
            return self.base.clone();
        }
        CalculationResult::valid(
            format!("{} base", self.base.display_value),
            format!(
                "{} nic · {} flavor",
                self.nicotine.display_value, self.flavor.display_value
            ),
            Tone::None,
        )
    }
}

fn millilitres(value: f64) -> String {
    format!("{} ml", format_number(value))
}

/// Nicotine shot volume needed to bring a shortfill to `target` mg/ml.
pub fn shortfill(volume: &str, shot_strength: &str, target: &str) -> ShortfillResult {
    let (Some(vol), Some(shot), Some(target)) = (
        parse_field(volume),
        parse_field(shot_strength),
        parse_field(target),
    ) else {
        return ShortfillResult::uniform(CalculationResult::placeholder());
    };

    let added = if target == 0.0 {
        0.0
    } else if shot > target {
        vol * target / (shot - target)
    } else {
        return ShortfillResult::uniform(CalculationResult::error(
            "Target must be below nic shot strength",
        ));
    };
    if !(added + vol).is_finite() {
        return ShortfillResult::uniform(CalculationResult::out_of_range());
    }

    ShortfillResult {
        nicotine_to_add: CalculationResult::valid(
            millilitres(added),
            format!("{} mg/ml shot", format_number(shot)),
            Tone::None,
        ),
        total_volume: CalculationResult::valid(
            millilitres(vol + added),
            format!("At {} mg/ml", format_number(target)),
            Tone::None,
        ),
    }
}

/// Component volumes for a DIY mix. Only `total_volume` is required; the
/// other fields count as zero when left blank.
pub fn diy_mix(
    total_volume: &str,
    flavor_percent: &str,
    base_strength: &str,
    target_strength: &str,
) -> DiyMixResult {
    let Some(total) = parse_field(total_volume) else {
        return DiyMixResult::uniform(CalculationResult::placeholder());
    };
    let flavor_pct = parse_field(flavor_percent).unwrap_or(0.0);
    let base_nic = parse_field(base_strength).unwrap_or(0.0);
    let target_nic = parse_field(target_strength).unwrap_or(0.0);

    if target_nic > base_nic {
        return DiyMixResult::uniform(CalculationResult::placeholder());
    }

    let nicotine = if base_nic > 0.0 {
        target_nic * total / base_nic
    } else {
        0.0
    };
    let flavor = flavor_pct / 100.0 * total;
    let base = total - nicotine - flavor;
    if !(nicotine.is_finite() && flavor.is_finite() && base.is_finite()) {
        return DiyMixResult::uniform(CalculationResult::out_of_range());
    }
    if base < 0.0 {
        return DiyMixResult::uniform(CalculationResult::error("Mix exceeds total volume"));
    }

    DiyMixResult {
        nicotine: CalculationResult::valid(
            millilitres(nicotine),
            format!("{} mg/ml base", format_number(base_nic)),
            Tone::None,
        ),
        flavor: CalculationResult::valid(
            millilitres(flavor),
            format!("{}% flavor", format_number(flavor_pct)),
            Tone::None,
        ),
        base: CalculationResult::valid(
            millilitres(base),
            format!("Of {} total", millilitres(total)),
            Tone::None,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tops_up_a_thirty_ml_shortfill() {
        let result = shortfill("30", "20", "3");
        assert_eq!(result.nicotine_to_add.display_value, "5.29 ml");
        assert_eq!(result.total_volume.display_value, "35.29 ml");
        assert!(result.nicotine_to_add.valid);

        let summary = result.summary();
        assert_eq!(summary.display_value, "5.29 ml nic shot");
        assert_eq!(summary.subtext, "Total 35.29 ml");
    }

    #[test]
    fn zero_target_adds_nothing() {
        let result = shortfill("50", "0", "0");
        assert_eq!(result.nicotine_to_add.display_value, "0 ml");
        assert_eq!(result.total_volume.display_value, "50 ml");
        assert!(result.total_volume.valid);
    }

    #[test]
    fn unreachable_target_is_an_error() {
        let result = shortfill("50", "3", "6");
        assert_eq!(result.nicotine_to_add.display_value, "Error");
        assert_eq!(result.total_volume.display_value, "Error");
        assert!(!result.summary().valid);

        let equal = shortfill("50", "6", "6");
        assert_eq!(equal.total_volume.display_value, "Error");
    }

    #[test]
    fn shortfill_requires_all_fields() {
        let result = shortfill("50", "", "3");
        assert!(result.nicotine_to_add.is_placeholder());
        assert!(result.total_volume.is_placeholder());
    }

    #[test]
    fn diy_mix_splits_volume() {
        let result = diy_mix("100", "10", "18", "3");
        assert_eq!(result.nicotine.display_value, "16.67 ml");
        assert_eq!(result.flavor.display_value, "10 ml");
        assert_eq!(result.base.display_value, "73.33 ml");
        assert_eq!(result.summary().display_value, "73.33 ml base");
    }

    #[test]
    fn diy_mix_blank_optionals_default_to_zero() {
        let result = diy_mix("60", "", "", "");
        assert_eq!(result.nicotine.display_value, "0 ml");
        assert_eq!(result.flavor.display_value, "0 ml");
        assert_eq!(result.base.display_value, "60 ml");
        assert!(result.base.valid);
    }

    #[test]
    fn diy_mix_target_above_base_shows_placeholders() {
        let result = diy_mix("60", "10", "3", "6");
        assert!(result.nicotine.is_placeholder());
        assert!(result.flavor.is_placeholder());
        assert!(result.base.is_placeholder());
        assert!(diy_mix("", "10", "18", "3").base.is_placeholder());
    }

    #[test]
    fn diy_mix_overflow_is_an_error() {
        let result = diy_mix("10", "80", "6", "3");
        assert_eq!(result.nicotine.display_value, "Error");
        assert_eq!(result.flavor.display_value, "Error");
        assert_eq!(result.base.display_value, "Error");
    }

    #[test]
    fn huge_volumes_are_out_of_range() {
        let topped = shortfill("1e308", "2", "1");
        assert_eq!(topped.total_volume.subtext, "Out of range");
        assert!(!topped.summary().valid);

        let mix = diy_mix("1e308", "1e10", "", "");
        assert_eq!(mix.base.display_value, "Undefined");
        assert_eq!(mix.flavor.subtext, "Out of range");
        assert!(!mix.summary().valid);
    }
}
