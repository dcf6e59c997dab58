use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use crate::core::time::Time;
use crate::error::{Result, SyncError};
use crate::playback::transport::DisplayMode;

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_ends_epsilon_ms() -> Time {
    250
}

fn default_nudge_step_secs() -> f64 {
    5.0
}

fn default_initial_blend_opacity() -> f32 {
    0.5
}

/// Tuning for one comparison session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// How often both tracks are sampled
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Distance from the end of a track that counts as ended
    #[serde(default = "default_ends_epsilon_ms")]
    pub ends_epsilon_ms: Time,
    /// Step used by the nudge buttons
    #[serde(default = "default_nudge_step_secs")]
    pub nudge_step_secs: f64,
    /// Overlay opacity at session start
    #[serde(default = "default_initial_blend_opacity")]
    pub initial_blend_opacity: f32,
    /// Display mode at session start
    #[serde(default)]
    pub display_mode: DisplayMode,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            ends_epsilon_ms: default_ends_epsilon_ms(),
            nudge_step_secs: default_nudge_step_secs(),
            initial_blend_opacity: default_initial_blend_opacity(),
            display_mode: DisplayMode::default(),
        }
    }
}

impl SyncConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the poller and controller cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(SyncError::InvalidConfig(
                "poll_interval_ms must be greater than zero".into(),
            ));
        }
        if self.ends_epsilon_ms < 0 {
            return Err(SyncError::InvalidConfig(format!(
                "ends_epsilon_ms must not be negative, got {}",
                self.ends_epsilon_ms
            )));
        }
        if !self.nudge_step_secs.is_finite() || self.nudge_step_secs <= 0.0 {
            return Err(SyncError::InvalidConfig(format!(
                "nudge_step_secs must be a positive number, got {}",
                self.nudge_step_secs
            )));
        }
        if !(0.0..=1.0).contains(&self.initial_blend_opacity) {
            return Err(SyncError::InvalidConfig(format!(
                "initial_blend_opacity must be within [0, 1], got {}",
                self.initial_blend_opacity
            )));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
