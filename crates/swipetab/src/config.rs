//! Tab view configuration.
//!
//! Every field is optional; missing fields take their defaults. Configs can be
//! built in code or loaded from YAML or TOML:
//!
//! ```
//! use swipetab::{RenderMode, TabViewConfig};
//!
//! let config = TabViewConfig::from_yaml_str(
//!     "render_mode: lazy\ntab_bar:\n  scroll_enabled: true\n",
//! )
//! .unwrap();
//! assert_eq!(config.render_mode, RenderMode::Lazy);
//! assert!(config.tab_bar.scroll_enabled);
//! assert!(config.smooth_jump);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use swipetab_core::Color;

/// Which off-screen scenes are mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Every scene is mounted
    Normal,
    /// Scenes within the window radius of the current index, plus the
    /// previous index
    #[default]
    Windowed,
    /// Scenes that have ever been current
    Lazy,
}

/// When the host should dismiss the on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardDismissMode {
    /// Never
    None,
    /// When a swipe starts
    OnDrag,
    /// When the committed index changes
    #[default]
    Auto,
}

/// Where the tab bar sits relative to the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabBarPosition {
    /// Above the scenes
    #[default]
    Top,
    /// Below the scenes
    Bottom,
}

/// Tab bar configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabBarConfig {
    /// Whether items size to their labels and the strip scrolls
    pub scroll_enabled: bool,
    /// Position relative to the carousel
    pub position: TabBarPosition,
    /// Bar height in pixels
    pub height: f32,
    /// Horizontal padding on each side of a label when scrolling is enabled
    pub item_padding: f32,
    /// Label font size
    pub label_size: f32,
    /// Bar background
    #[serde(with = "hex_color")]
    pub background: Color,
    /// Active label color
    #[serde(with = "hex_color")]
    pub active_color: Color,
    /// Inactive label color
    #[serde(with = "hex_color")]
    pub inactive_color: Color,
    /// Indicator color
    #[serde(with = "hex_color")]
    pub indicator_color: Color,
    /// Indicator thickness in pixels
    pub indicator_height: f32,
}

impl Default for TabBarConfig {
    fn default() -> Self {
        Self {
            scroll_enabled: false,
            position: TabBarPosition::Top,
            height: 48.0,
            item_padding: 30.0,
            label_size: 14.0,
            background: Color::rgb(37.0 / 255.0, 160.0 / 255.0, 246.0 / 255.0),
            active_color: Color::WHITE,
            inactive_color: Color::WHITE.with_opacity(0.7),
            indicator_color: Color::rgb(1.0, 1.0, 0.0),
            indicator_height: 2.0,
        }
    }
}

/// Tab view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabViewConfig {
    /// Scene mount policy
    pub render_mode: RenderMode,
    /// Stage jumps to non-adjacent tabs through the neighbor of the target
    pub smooth_jump: bool,
    /// Whether horizontal swipes page the carousel
    pub swipe_enabled: bool,
    /// Keyboard dismissal policy
    pub keyboard_dismiss_mode: KeyboardDismissMode,
    /// Neighbors on each side of the current index mounted in windowed mode
    pub window_radius: usize,
    /// Fixed duration of every settle and jump transition
    pub transition_duration_ms: u64,
    /// Tab bar
    pub tab_bar: TabBarConfig,
}

impl Default for TabViewConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Windowed,
            smooth_jump: true,
            swipe_enabled: true,
            keyboard_dismiss_mode: KeyboardDismissMode::Auto,
            window_radius: 1,
            transition_duration_ms: 300,
            tab_bar: TabBarConfig::default(),
        }
    }
}

impl TabViewConfig {
    /// Parse and validate a YAML config.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML config.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transition_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "transition_duration_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        let sizes = [
            ("tab_bar.height", self.tab_bar.height),
            ("tab_bar.item_padding", self.tab_bar.item_padding),
            ("tab_bar.label_size", self.tab_bar.label_size),
            ("tab_bar.indicator_height", self.tab_bar.indicator_height),
        ];
        for (field, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("{value} is not a non-negative size"),
                });
            }
        }
        Ok(())
    }

    /// Transition duration in seconds.
    #[must_use]
    pub fn transition_duration(&self) -> f64 {
        self.transition_duration_ms as f64 / 1000.0
    }
}

/// Colors as `#rrggbb` / `#rrggbbaa` strings.
mod hex_color {
    use serde::{Deserialize, Deserializer, Serializer};
    use swipetab_core::Color;

    pub(super) fn serialize<S: Serializer>(
        color: &Color,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let [r, g, b, a] = [color.r, color.g, color.b, color.a].map(|c| (c * 255.0).round() as u8);
        serializer.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}{a:02x}"))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
