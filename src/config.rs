//! Pointer timing thresholds, loadable from a TOML file with safe defaults.
//!
//! Touch hardware varies, so drag distances and repeat cadence are
//! configuration rather than invariants. A missing or unreadable file falls
//! back to defaults; a present-but-broken file is an error the caller can
//! surface.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

const DEFAULT_MINIMUM_DRAG_MS: u64 = 200;
const DEFAULT_MINIMUM_CLICK_MS: u64 = 20;
const DEFAULT_REPEAT_DELAY_MS: u64 = 500;
const DEFAULT_REPEAT_INTERVAL_MS: u64 = 100;
const DEFAULT_DRAG_START_PIXELS: i32 = 15;

/// Time and distance thresholds driving the pointer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointerTiming {
    /// Hold time before a press commits to click-or-repeat instead of drag.
    pub minimum_drag_ms: u64,
    /// Presses shorter than this never produce a click (touch graze filter).
    pub minimum_click_ms: u64,
    /// Hold time before the first auto-repeat of a held button.
    pub repeat_delay_ms: u64,
    /// Cadence of auto-repeats after the first.
    pub repeat_interval_ms: u64,
    /// Movement (largest axis, screen pixels) that starts a drag or scroll.
    pub drag_start_pixels: i32,
}

impl Default for PointerTiming {
    fn default() -> Self {
        Self {
            minimum_drag_ms: DEFAULT_MINIMUM_DRAG_MS,
            minimum_click_ms: DEFAULT_MINIMUM_CLICK_MS,
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
            repeat_interval_ms: DEFAULT_REPEAT_INTERVAL_MS,
            drag_start_pixels: DEFAULT_DRAG_START_PIXELS,
        }
    }
}

impl PointerTiming {
    pub fn minimum_drag(&self) -> Duration {
        Duration::from_millis(self.minimum_drag_ms)
    }

    pub fn minimum_click(&self) -> Duration {
        Duration::from_millis(self.minimum_click_ms)
    }

    pub fn repeat_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_delay_ms)
    }

    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }

    /// Parse a timing file. Unknown keys are rejected so typos do not
    /// silently fall back to defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading pointer timing file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("parsing pointer timing file {}", path.display()))
    }

    /// Like [`Self::load_from_path`], but a missing or broken file degrades to
    /// defaults with a warning instead of failing startup.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_path(path) {
            Ok(timing) => timing,
            Err(err) => {
                warn!("ignoring pointer timing file: {err:#}");
                Self::default()
            }
        }
    }
}
