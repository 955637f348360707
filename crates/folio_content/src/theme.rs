//! Light/dark theme preference
//!
//! The active scheme is resolved once at startup: a saved preference wins,
//! then the system preference, then dark. Toggling saves the new scheme.
//! Later system preference changes only apply while nothing is saved.

use crate::error::{ContentError, Result};
use folio_core::store::PreferenceStore;
use std::fmt;
use std::str::FromStr;

/// Preference key the scheme is saved under
pub const THEME_KEY: &str = "theme";

/// Meta `theme-color` for mobile browser chrome
pub const DARK_META_COLOR: &str = "#1a1a1a";
pub const LIGHT_META_COLOR: &str = "#f8fafc";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
}

impl ColorScheme {
    pub fn name(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> ColorScheme {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn meta_color(&self) -> &'static str {
        match self {
            ColorScheme::Light => LIGHT_META_COLOR,
            ColorScheme::Dark => DARK_META_COLOR,
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(ContentError::UnknownTheme(other.to_string())),
        }
    }
}

/// Owns the preference store and the resolved scheme
#[derive(Debug)]
pub struct ThemeController {
    store: PreferenceStore,
    scheme: ColorScheme,
}

impl ThemeController {
    /// Resolve the startup scheme
    ///
    /// An unreadable saved value is ignored as if nothing were saved.
    pub fn new(store: PreferenceStore, system: Option<ColorScheme>) -> Self {
        let saved = store.get(THEME_KEY).and_then(|value| match value.parse() {
            Ok(scheme) => Some(scheme),
            Err(err) => {
                tracing::warn!("ThemeController: ignoring saved value: {}", err);
                None
            }
        });
        let scheme = saved.or(system).unwrap_or_default();
        tracing::debug!(
            "ThemeController: starting in {} (saved: {:?}, system: {:?})",
            scheme,
            saved,
            system
        );
        Self { store, scheme }
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn is_dark(&self) -> bool {
        self.scheme == ColorScheme::Dark
    }

    pub fn meta_theme_color(&self) -> &'static str {
        self.scheme.meta_color()
    }

    /// Whether the user has chosen a scheme explicitly
    pub fn has_saved_preference(&self) -> bool {
        self.store
            .get(THEME_KEY)
            .is_some_and(|value| value.parse::<ColorScheme>().is_ok())
    }

    /// Flip the scheme and save it
    pub fn toggle(&mut self) -> Result<ColorScheme> {
        self.set(self.scheme.toggled())?;
        Ok(self.scheme)
    }

    pub fn set(&mut self, scheme: ColorScheme) -> Result<()> {
        self.store.set(THEME_KEY, scheme.name())?;
        self.scheme = scheme;
        Ok(())
    }

    /// Apply an OS-level change; returns whether the scheme changed
    pub fn system_preference_changed(&mut self, system: ColorScheme) -> bool {
        if self.has_saved_preference() || self.scheme == system {
            return false;
        }
        self.scheme = system;
        true
    }

    /// Forget the saved choice; the current scheme stays until the next
    /// system change
    pub fn clear_saved(&mut self) -> Result<()> {
        self.store.delete(THEME_KEY)?;
        Ok(())
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }
}
