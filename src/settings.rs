//! Game settings and preferences
//!
//! Read from LocalStorage on the web. Natively, defaults are combined
//! with environment overrides:
//! - `METEOR_WINDOW_WIDTH` / `METEOR_WINDOW_HEIGHT`: window size in pixels
//!   (`PYGAME_WINDOW_WIDTH` / `PYGAME_WINDOW_HEIGHT` are read when unset)
//! - `METEOR_QUALITY`: `low`, `medium` or `high`

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Environment variable overriding the window width
pub const WIDTH_ENV: &str = "METEOR_WINDOW_WIDTH";
/// Environment variable overriding the window height
pub const HEIGHT_ENV: &str = "METEOR_WINDOW_HEIGHT";
/// Older launch-script names for the window size, read as a fallback
pub const LEGACY_WIDTH_ENV: &str = "PYGAME_WINDOW_WIDTH";
pub const LEGACY_HEIGHT_ENV: &str = "PYGAME_WINDOW_HEIGHT";
/// Environment variable overriding the quality preset
pub const QUALITY_ENV: &str = "METEOR_QUALITY";

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Background star count for this preset
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 30,
            QualityPreset::Medium => 60,
            QualityPreset::High => 120,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Window ===
    /// Window (and arena) width in pixels
    pub window_width: u32,
    /// Window (and arena) height in pixels
    pub window_height: u32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            window_width: DEFAULT_WIDTH,
            window_height: DEFAULT_HEIGHT,

            show_fps: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,
        }
    }
}

/// Parse a window dimension, falling back to `default` when the value is
/// missing, not an integer, or not positive.
pub fn parse_dimension(value: Option<&str>, default: u32) -> u32 {
    match value.map(|v| v.trim().parse::<i64>()) {
        Some(Ok(n)) if n > 0 => u32::try_from(n).unwrap_or(default),
        Some(Ok(n)) => {
            log::warn!("Ignoring non-positive window dimension {}, using {}", n, default);
            default
        }
        Some(Err(_)) => {
            log::warn!("Ignoring invalid window dimension {:?}, using {}", value, default);
            default
        }
        None => default,
    }
}

impl Settings {
    /// Window size as (width, height)
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Star count for the current quality
    pub fn star_count(&self) -> usize {
        self.quality.star_count()
    }

    /// Effective sound effect volume
    pub fn effective_volume(&self) -> f32 {
        (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
    }

    /// Apply overrides from a variable lookup (the environment, in practice)
    ///
    /// Unset variables keep the current value; invalid ones fall back to the
    /// default size for that axis.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(WIDTH_ENV).or_else(|| lookup(LEGACY_WIDTH_ENV)) {
            self.window_width = parse_dimension(Some(&raw), DEFAULT_WIDTH);
        }
        if let Some(raw) = lookup(HEIGHT_ENV).or_else(|| lookup(LEGACY_HEIGHT_ENV)) {
            self.window_height = parse_dimension(Some(&raw), DEFAULT_HEIGHT);
        }

        if let Some(raw) = lookup(QUALITY_ENV) {
            match QualityPreset::from_str(&raw) {
                Some(preset) => self.quality = preset,
                None => log::warn!("Unknown quality preset {:?}, keeping {}", raw, self.quality.as_str()),
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "meteor_dodge_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Defaults plus environment overrides
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = Self::default();
        settings.apply_overrides(|key| std::env::var(key).ok());
        log::info!(
            "Settings: {}x{}, quality {}",
            settings.window_width,
            settings.window_height,
            settings.quality.as_str()
        );
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.window_size(), (640, 480));
        assert_eq!(settings.star_count(), 60);
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension(None, 640), 640);
        assert_eq!(parse_dimension(Some("800"), 640), 800);
        assert_eq!(parse_dimension(Some(" 1024 "), 640), 1024);
        assert_eq!(parse_dimension(Some("abc"), 640), 640);
        assert_eq!(parse_dimension(Some("12.5"), 640), 640);
        assert_eq!(parse_dimension(Some("0"), 480), 480);
        assert_eq!(parse_dimension(Some("-300"), 480), 480);
        assert_eq!(parse_dimension(Some("99999999999"), 480), 480);
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.apply_overrides(lookup(&[
            (WIDTH_ENV, "1280"),
            (HEIGHT_ENV, "nope"),
            (QUALITY_ENV, "HIGH"),
        ]));
        assert_eq!(settings.window_size(), (1280, 480));
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.star_count(), 120);
    }

    #[test]
    fn test_unknown_quality_ignored() {
        let mut settings = Settings {
            quality: QualityPreset::Low,
            ..Settings::default()
        };
        settings.apply_overrides(lookup(&[(QUALITY_ENV, "ultra")]));
        assert_eq!(settings.quality, QualityPreset::Low);
        assert_eq!(settings.window_size(), (640, 480));
    }

    #[test]
    fn test_settings_json_roundtrip() {
        let settings = Settings {
            quality: QualityPreset::High,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.quality, QualityPreset::High);
        assert_eq!(back.window_size(), settings.window_size());
    }

    #[test]
    fn test_unset_size_keeps_current_value() {
        let mut settings = Settings {
            window_width: 800,
            window_height: 600,
            ..Settings::default()
        };
        settings.apply_overrides(lookup(&[]));
        assert_eq!(settings.window_size(), (800, 600));

        // Invalid values still fall back to the defaults, not the current size
        settings.apply_overrides(lookup(&[(WIDTH_ENV, "-1"), (HEIGHT_ENV, "wide")]));
        assert_eq!(settings.window_size(), (640, 480));
    }

    #[test]
    fn test_pygame_size_names() {
        let mut settings = Settings::default();
        settings.apply_overrides(lookup(&[
            (LEGACY_WIDTH_ENV, "1024"),
            (LEGACY_HEIGHT_ENV, "768"),
        ]));
        assert_eq!(settings.window_size(), (1024, 768));

        // The game's own names win when both are set
        settings.apply_overrides(lookup(&[(WIDTH_ENV, "320"), (LEGACY_WIDTH_ENV, "1024")]));
        assert_eq!(settings.window_size(), (320, 768));
    }
}
