//! Player preferences
//!
//! Persisted in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;
use crate::renderer::Palette;

/// Keyboard bindings, matched against `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<String>,
    pub move_right: Vec<String>,
    pub toggle_pause: Vec<String>,
    pub toggle_contrast: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["ArrowLeft".into(), "a".into(), "A".into()],
            move_right: vec!["ArrowRight".into(), "d".into(), "D".into()],
            toggle_pause: vec![" ".into(), "p".into(), "P".into()],
            toggle_contrast: vec!["c".into(), "C".into()],
        }
    }
}

impl KeyBindings {
    /// Action bound to `key`, if any. Earlier actions win when a key is
    /// bound twice (left, right, pause, contrast).
    pub fn action_for(&self, key: &str) -> Option<KeyAction> {
        let bound = |keys: &[String]| keys.iter().any(|k| k == key);
        if bound(&self.move_left) {
            Some(KeyAction::MoveLeft)
        } else if bound(&self.move_right) {
            Some(KeyAction::MoveRight)
        } else if bound(&self.toggle_pause) {
            Some(KeyAction::TogglePause)
        } else if bound(&self.toggle_contrast) {
            Some(KeyAction::ToggleContrast)
        } else {
            None
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bindings: KeyBindings,

    /// Paddle follows the mouse over the canvas
    pub pointer_control: bool,

    // === Accessibility ===
    /// High contrast palette
    pub high_contrast: bool,
    /// Pause automatically when the tab is hidden or the window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            pointer_control: true,
            high_contrast: false,
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// Palette matching the accessibility preference
    pub fn palette(&self) -> Palette {
        if self.high_contrast {
            Palette::high_contrast()
        } else {
            Palette::standard()
        }
    }

    /// Flip the high contrast preference and persist it. Returns the palette
    /// to draw with from now on.
    pub fn toggle_high_contrast(&mut self) -> Palette {
        self.high_contrast = !self.high_contrast;
        log::info!("High contrast {}", if self.high_contrast { "on" } else { "off" });
        self.save();
        self.palette()
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "brick_breaker_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Stored settings unreadable ({}), using defaults", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let b = KeyBindings::default();
        assert_eq!(b.action_for("ArrowLeft"), Some(KeyAction::MoveLeft));
        assert_eq!(b.action_for("d"), Some(KeyAction::MoveRight));
        assert_eq!(b.action_for(" "), Some(KeyAction::TogglePause));
        assert_eq!(b.action_for("C"), Some(KeyAction::ToggleContrast));
        assert_eq!(b.action_for("Enter"), None);
    }

    #[test]
    fn test_settings_json_fills_missing_fields() {
        let settings: Settings = serde_json::from_str(r#"{ "high_contrast": true }"#).unwrap();
        assert!(settings.high_contrast);
        assert!(settings.pointer_control);
        assert_eq!(settings.bindings, KeyBindings::default());
        assert_eq!(settings.palette(), Palette::high_contrast());
    }

    #[test]
    fn test_toggle_high_contrast_switches_palette() {
        let mut settings = Settings::default();
        assert_eq!(settings.toggle_high_contrast(), Palette::high_contrast());
        assert!(settings.high_contrast);
        assert_eq!(settings.toggle_high_contrast(), Palette::standard());
        assert!(!settings.high_contrast);
    }
}
