//! Assistant configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_DELAY_MIN_MS: u64 = 320;
pub const DEFAULT_DELAY_MAX_MS: u64 = 740;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("delay window min {min_ms}ms exceeds max {max_ms}ms")]
    InvalidDelayWindow { min_ms: u64, max_ms: u64 },
}

/// Closed interval `[min_ms, max_ms]` the simulated thinking delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayWindow {
    min_ms: u64,
    max_ms: u64,
}

impl DelayWindow {
    /// # Errors
    ///
    /// Returns `InvalidDelayWindow` when `min_ms > max_ms`.
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, ConfigError> {
        if min_ms > max_ms {
            return Err(ConfigError::InvalidDelayWindow { min_ms, max_ms });
        }
        Ok(Self { min_ms, max_ms })
    }

    /// Zero-width window: replies are deferred but not delayed.
    #[must_use]
    pub fn immediate() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    #[must_use]
    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    #[must_use]
    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Number of distinct millisecond values in the window, saturating at
    /// `u64::MAX` for the full-width window.
    #[must_use]
    pub fn span(&self) -> u64 {
        (self.max_ms - self.min_ms).saturating_add(1)
    }

    /// Delay for an offset into the window, clamped to `max_ms`.
    #[must_use]
    pub fn delay_at(&self, offset_ms: u64) -> Duration {
        Duration::from_millis(self.min_ms.saturating_add(offset_ms).min(self.max_ms))
    }
}

impl Default for DelayWindow {
    fn default() -> Self {
        Self { min_ms: DEFAULT_DELAY_MIN_MS, max_ms: DEFAULT_DELAY_MAX_MS }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssistantConfig {
    pub delay: DelayWindow,
    pub rng_seed: Option<u64>,
}

impl AssistantConfig {
    /// Build config from environment variables.
    ///
    /// The built-in delay window is the default; the variables below let a
    /// deployment override it at startup.
    ///
    /// Optional:
    /// - `ASSISTANT_DELAY_MIN_MS`: default 320
    /// - `ASSISTANT_DELAY_MAX_MS`: default 740
    /// - `ASSISTANT_RNG_SEED`: seed for reproducible fallback and delay picks
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but unparsable, or the delay
    /// bounds are inverted.
    pub fn from_env() -> Result<Self, ConfigError> {
        let min_ms = env_parse("ASSISTANT_DELAY_MIN_MS")?.unwrap_or(DEFAULT_DELAY_MIN_MS);
        let max_ms = env_parse("ASSISTANT_DELAY_MAX_MS")?.unwrap_or(DEFAULT_DELAY_MAX_MS);
        let delay = DelayWindow::new(min_ms, max_ms)?;
        let rng_seed = env_parse("ASSISTANT_RNG_SEED")?;

        Ok(Self { delay, rng_seed })
    }
}

fn env_parse<T>(key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue { key, value: raw })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
