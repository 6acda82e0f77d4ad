//! Display theme preference.

use crate::error::StoreError;
use crate::traits::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Unknown values fall back to the default.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "light" => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        store.get(THEME_KEY).map(|v| Theme::parse(&v)).unwrap_or_default()
    }

    pub fn save(self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.set(THEME_KEY, self.as_str())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MemoryStore;

    #[test]
    fn defaults_to_dark() {
        assert_eq!(Theme::load(&MemoryStore::new()), Theme::Dark);
        assert_eq!(Theme::parse("sepia"), Theme::Dark);
    }

    #[test]
    fn toggle_round_trips_through_store() {
        let mut store = MemoryStore::new();
        let theme = Theme::load(&store).toggled();
        theme.save(&mut store).expect("save theme");

        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(Theme::load(&store), Theme::Light);
        assert_eq!(Theme::Light.toggled().to_string(), "dark");
    }
}
