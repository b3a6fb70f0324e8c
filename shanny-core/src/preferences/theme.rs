use shanny_model::ThemeMode;
use tracing::warn;

use super::store::PreferenceStore;

pub const THEME_KEY: &str = "theme";

/// Media query hosts evaluate for the system color scheme.
pub const COLOR_SCHEME_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// Active color theme. A stored choice wins over the system preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePreference {
    mode: ThemeMode,
}

impl ThemePreference {
    /// Resolves the initial theme and persists it, as the page does on load.
    pub fn load(store: &dyn PreferenceStore, system_prefers_dark: bool) -> Self {
        let stored = store.get(THEME_KEY).and_then(|raw| {
            raw.parse::<ThemeMode>()
                .inspect_err(|err| warn!(error = %err, "ignoring stored theme"))
                .ok()
        });
        let mode = stored.unwrap_or(if system_prefers_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        });

        let preference = Self { mode };
        preference.persist(store);
        preference
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    pub fn toggle(&mut self, store: &dyn PreferenceStore) -> ThemeMode {
        self.set(self.mode.toggled(), store)
    }

    pub fn set(&mut self, mode: ThemeMode, store: &dyn PreferenceStore) -> ThemeMode {
        self.mode = mode;
        self.persist(store);
        mode
    }

    fn persist(&self, store: &dyn PreferenceStore) {
        store.set(THEME_KEY, self.mode.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::InMemoryPreferenceStore;

    #[test]
    fn stored_choice_beats_system_preference() {
        let store = InMemoryPreferenceStore::new();
        store.set(THEME_KEY, "light");
        let theme = ThemePreference::load(&store, true);
        assert_eq!(theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn system_preference_applies_without_stored_choice() {
        let store = InMemoryPreferenceStore::new();
        assert!(ThemePreference::load(&store, true).is_dark());
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

        let fresh = InMemoryPreferenceStore::new();
        assert!(!ThemePreference::load(&fresh, false).is_dark());
    }

    #[test]
    fn unknown_stored_value_falls_back_to_system() {
        let store = InMemoryPreferenceStore::new();
        store.set(THEME_KEY, "sepia");
        assert!(ThemePreference::load(&store, true).is_dark());
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn toggle_persists() {
        let store = InMemoryPreferenceStore::new();
        let mut theme = ThemePreference::load(&store, false);
        assert_eq!(theme.toggle(&store), ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
        assert_eq!(theme.toggle(&store), ThemeMode::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
    }
}
