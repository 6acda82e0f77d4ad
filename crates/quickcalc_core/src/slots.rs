//! Identifiers for input fields, output slots and debounce groups.
//!
//! The string ids match the element ids used by the page, so the bridge can
//! pass them through unchanged.

use crate::calculators::OhmField;
use crate::units::{DistanceUnit, TemperatureScale};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    ChangePrevious,
    ChangeNew,
    OfPart,
    OfBase,
    AddSubBase,
    AddSubPercent,
    AddSubOp,
    ReverseValue,
    ReversePercent,
    ReverseOp,
    FractionNumerator,
    FractionDenominator,
    Ohm(OhmField),
    ShortfillVolume,
    ShortfillShot,
    ShortfillTarget,
    DiyTotal,
    DiyFlavor,
    DiyBaseNicotine,
    DiyTargetNicotine,
    Temperature(TemperatureScale),
    Distance(DistanceUnit),
}

const FIELD_IDS: [(FieldId, &str); 31] = [
    (FieldId::ChangePrevious, "change-prev"),
    (FieldId::ChangeNew, "change-new"),
    (FieldId::OfPart, "of-part"),
    (FieldId::OfBase, "of-base"),
    (FieldId::AddSubBase, "addsub-base"),
    (FieldId::AddSubPercent, "addsub-pct"),
    (FieldId::AddSubOp, "addsub-op"),
    (FieldId::ReverseValue, "rev-val"),
    (FieldId::ReversePercent, "rev-pct"),
    (FieldId::ReverseOp, "rev-op"),
    (FieldId::FractionNumerator, "frac-num"),
    (FieldId::FractionDenominator, "frac-den"),
    (FieldId::Ohm(OhmField::Voltage), "ohm-voltage"),
    (FieldId::Ohm(OhmField::Resistance), "ohm-resistance"),
    (FieldId::Ohm(OhmField::Current), "ohm-current"),
    (FieldId::Ohm(OhmField::Power), "ohm-power"),
    (FieldId::ShortfillVolume, "sf-volume"),
    (FieldId::ShortfillShot, "sf-shot"),
    (FieldId::ShortfillTarget, "sf-target"),
    (FieldId::DiyTotal, "diy-total"),
    (FieldId::DiyFlavor, "diy-flavor"),
    (FieldId::DiyBaseNicotine, "diy-base-nic"),
    (FieldId::DiyTargetNicotine, "diy-target-nic"),
    (FieldId::Temperature(TemperatureScale::Celsius), "temp-c"),
    (FieldId::Temperature(TemperatureScale::Fahrenheit), "temp-f"),
    (FieldId::Temperature(TemperatureScale::Kelvin), "temp-k"),
    (FieldId::Distance(DistanceUnit::Miles), "dist-mi"),
    (FieldId::Distance(DistanceUnit::Kilometers), "dist-km"),
    (FieldId::Distance(DistanceUnit::Meters), "dist-m"),
    (FieldId::Distance(DistanceUnit::Feet), "dist-ft"),
    (FieldId::Distance(DistanceUnit::Yards), "dist-yd"),
];

impl FieldId {
    pub fn all() -> impl Iterator<Item = FieldId> {
        FIELD_IDS.iter().map(|(f, _)| *f)
    }

    pub fn id(self) -> &'static str {
        FIELD_IDS
            .iter()
            .find(|(f, _)| *f == self)
            .map(|(_, id)| *id)
            .unwrap_or_default()
    }

    pub fn from_id(id: &str) -> Option<FieldId> {
        FIELD_IDS
            .iter()
            .find(|(_, name)| *name == id)
            .map(|(f, _)| *f)
    }

    pub fn calculator(self) -> Calculator {
        use FieldId::*;
        match self {
            ChangePrevious | ChangeNew => Calculator::Change,
            OfPart | OfBase => Calculator::PercentOf,
            AddSubBase | AddSubPercent | AddSubOp => Calculator::AddSub,
            ReverseValue | ReversePercent | ReverseOp => Calculator::Reverse,
            FractionNumerator | FractionDenominator => Calculator::Fraction,
            Ohm(_) => Calculator::OhmsLaw,
            ShortfillVolume | ShortfillShot | ShortfillTarget => Calculator::Shortfill,
            DiyTotal | DiyFlavor | DiyBaseNicotine | DiyTargetNicotine => Calculator::DiyMix,
            Temperature(_) => Calculator::Temperature,
            Distance(_) => Calculator::Distance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calculator {
    Change,
    PercentOf,
    AddSub,
    Reverse,
    Fraction,
    OhmsLaw,
    Shortfill,
    DiyMix,
    Temperature,
    Distance,
}

impl Calculator {
    pub const ALL: [Calculator; 10] = [
        Calculator::Change,
        Calculator::PercentOf,
        Calculator::AddSub,
        Calculator::Reverse,
        Calculator::Fraction,
        Calculator::OhmsLaw,
        Calculator::Shortfill,
        Calculator::DiyMix,
        Calculator::Temperature,
        Calculator::Distance,
    ];

    pub fn debounce_slot(self) -> DebounceSlot {
        match self {
            Calculator::Temperature => DebounceSlot::Temperature,
            Calculator::Distance => DebounceSlot::Distance,
            _ => DebounceSlot::Calculators,
        }
    }

    pub fn fields(self) -> impl Iterator<Item = FieldId> {
        FieldId::all().filter(move |f| f.calculator() == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultSlot {
    Change,
    PercentOf,
    AddSub,
    Reverse,
    Fraction,
    OhmsLaw,
    ShortfillNicotine,
    ShortfillTotal,
    DiyNicotine,
    DiyFlavor,
    DiyBase,
    Temperature,
    Distance,
}

impl ResultSlot {
    pub const ALL: [ResultSlot; 13] = [
        ResultSlot::Change,
        ResultSlot::PercentOf,
        ResultSlot::AddSub,
        ResultSlot::Reverse,
        ResultSlot::Fraction,
        ResultSlot::OhmsLaw,
        ResultSlot::ShortfillNicotine,
        ResultSlot::ShortfillTotal,
        ResultSlot::DiyNicotine,
        ResultSlot::DiyFlavor,
        ResultSlot::DiyBase,
        ResultSlot::Temperature,
        ResultSlot::Distance,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ResultSlot::Change => "res-change",
            ResultSlot::PercentOf => "res-of",
            ResultSlot::AddSub => "res-addsub",
            ResultSlot::Reverse => "res-rev",
            ResultSlot::Fraction => "res-frac",
            ResultSlot::OhmsLaw => "res-ohm",
            ResultSlot::ShortfillNicotine => "res-sf-nic",
            ResultSlot::ShortfillTotal => "res-sf-total",
            ResultSlot::DiyNicotine => "res-diy-nic",
            ResultSlot::DiyFlavor => "res-diy-flavor",
            ResultSlot::DiyBase => "res-diy-base",
            ResultSlot::Temperature => "res-temp",
            ResultSlot::Distance => "res-dist",
        }
    }

    /// Heading used when results are shared as text.
    pub fn title(self) -> &'static str {
        match self {
            ResultSlot::Change => "Percentage Change",
            ResultSlot::PercentOf => "Percent Of",
            ResultSlot::AddSub => "Add/Subtract Percent",
            ResultSlot::Reverse => "Reverse Percentage",
            ResultSlot::Fraction => "Fraction to Percent",
            ResultSlot::OhmsLaw => "Ohm's Law",
            ResultSlot::ShortfillNicotine => "Nic Shot to Add",
            ResultSlot::ShortfillTotal => "Shortfill Total",
            ResultSlot::DiyNicotine => "DIY Nicotine",
            ResultSlot::DiyFlavor => "DIY Flavor",
            ResultSlot::DiyBase => "DIY Base",
            ResultSlot::Temperature => "Temperature",
            ResultSlot::Distance => "Distance",
        }
    }
}

/// A logical group sharing one history debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DebounceSlot {
    Calculators,
    Temperature,
    Distance,
}
