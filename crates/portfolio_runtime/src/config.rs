//! Desktop configuration with defaults matching the portfolio shell.
//!
//! Every field has a default, so partial TOML or JSON documents are accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::WindowRect;

#[derive(Debug, Error)]
/// Errors raised while loading a [`DesktopConfig`].
pub enum ConfigError {
    /// The TOML document could not be parsed.
    #[error("invalid desktop config toml: {0}")]
    Toml(#[from] toml::de::Error),
    /// The JSON document could not be parsed.
    #[error("invalid desktop config json: {0}")]
    Json(#[from] serde_json::Error),
    /// The document parsed but violates a constraint.
    #[error("invalid desktop config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Cosmetic delays, in milliseconds. None of these gate logical state changes.
pub struct AnimationTimings {
    pub open_settle_ms: u64,
    pub close_ms: u64,
    pub sound_indicator_ms: u64,
    pub notification_ms: u64,
    /// Hover time before a taskbar group shows its preview.
    pub preview_delay_ms: u64,
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            open_settle_ms: 600,
            close_ms: 300,
            sound_indicator_ms: 800,
            notification_ms: 3000,
            preview_delay_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    /// First stacking value; the z-index counter only grows from here.
    pub z_index_base: u32,
    pub cascade_origin_x: i32,
    pub cascade_origin_y: i32,
    /// Offset applied per already-open window when placing a new one.
    pub cascade_step: i32,
    pub viewport: WindowRect,
    pub taskbar_height: i32,
    pub default_volume: u8,
    pub timings: AnimationTimings,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            z_index_base: 400,
            cascade_origin_x: 100,
            cascade_origin_y: 50,
            cascade_step: 30,
            viewport: WindowRect {
                x: 0,
                y: 0,
                w: 1280,
                h: 800,
            },
            taskbar_height: 56,
            default_volume: 30,
            timings: AnimationTimings::default(),
        }
    }
}

impl DesktopConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.w <= 0 || self.viewport.h <= 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must have a positive size, got {}x{}",
                self.viewport.w, self.viewport.h
            )));
        }
        if self.taskbar_height < 0 || self.taskbar_height >= self.viewport.h {
            return Err(ConfigError::Invalid(format!(
                "taskbar height {} does not fit viewport height {}",
                self.taskbar_height, self.viewport.h
            )));
        }
        if self.cascade_step < 0 {
            return Err(ConfigError::Invalid(format!(
                "cascade step must not be negative, got {}",
                self.cascade_step
            )));
        }
        if self.default_volume > 100 {
            return Err(ConfigError::Invalid(format!(
                "default volume must be within 0..=100, got {}",
                self.default_volume
            )));
        }
        Ok(())
    }

    /// Geometry a maximized window takes: the viewport above the taskbar.
    pub fn maximized_rect(&self) -> WindowRect {
        WindowRect {
            x: 0,
            y: 0,
            w: self.viewport.w,
            h: self.viewport.h - self.taskbar_height,
        }
    }

    /// Cascaded position for a new window when `open_count` windows are already open.
    pub fn cascade_rect(&self, open_count: usize, width: i32, height: i32) -> WindowRect {
        let offset = self.cascade_step.saturating_mul(open_count as i32);
        WindowRect {
            x: self.cascade_origin_x,
            y: self.cascade_origin_y,
            w: width,
            h: height,
        }
        .offset(offset, offset)
    }
}
