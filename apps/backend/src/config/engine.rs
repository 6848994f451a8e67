//! Engine timing and transport settings.

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_AUTO_DRAW_INTERVAL_MS: u64 = 3_000;
pub const DEFAULT_PRIZE_PAUSE_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Period of the automatic draw trigger.
    pub auto_draw_interval: Duration,
    /// How long drawing stays paused after an award.
    pub prize_pause: Duration,
    /// Redis URL for realtime fan-out; `None` keeps events in-process.
    pub redis_url: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_draw_interval: Duration::from_millis(DEFAULT_AUTO_DRAW_INTERVAL_MS),
            prize_pause: Duration::from_millis(DEFAULT_PRIZE_PAUSE_MS),
            redis_url: None,
        }
    }
}

impl EngineConfig {
    /// Read `BINGO_AUTO_DRAW_INTERVAL_MS`, `BINGO_PRIZE_PAUSE_MS` and `REDIS_URL`.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            auto_draw_interval: millis_var(
                "BINGO_AUTO_DRAW_INTERVAL_MS",
                defaults.auto_draw_interval,
            )?,
            prize_pause: millis_var("BINGO_PRIZE_PAUSE_MS", defaults.prize_pause)?,
            redis_url: env::var("REDIS_URL").ok().filter(|s| !s.trim().is_empty()),
        })
    }

    pub fn with_auto_draw_interval(mut self, interval: Duration) -> Self {
        self.auto_draw_interval = interval;
        self
    }

    pub fn with_prize_pause(mut self, pause: Duration) -> Self {
        self.prize_pause = pause;
        self
    }
}

fn millis_var(name: &str, default: Duration) -> Result<Duration, AppError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                AppError::config(format!("{name} must be a whole number of milliseconds, got '{raw}'"))
            })?;
            if ms == 0 {
                return Err(AppError::config(format!("{name} must be greater than zero")));
            }
            Ok(Duration::from_millis(ms))
        }
    }
}
