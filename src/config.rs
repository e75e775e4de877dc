use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::coords::CanvasGeometry;
use crate::error::{AimError, Result};

pub const DPI_RANGE: RangeInclusive<u32> = 100..=1600;
pub const REACTION_MS_RANGE: RangeInclusive<u32> = 0..=500;
pub const SCREEN_WIDTH_RANGE: RangeInclusive<u32> = 800..=8000;
pub const SCREEN_HEIGHT_RANGE: RangeInclusive<u32> = 600..=6000;

/// Raw setup values as collected by the setup form, CLI or preset file.
/// Nothing here is trusted until [`Settings::validate`] succeeds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub dpi: u32,
    pub reaction_ms: u32,
    pub screen_width: u32,
    pub screen_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dpi: 800,
            reaction_ms: 250,
            screen_width: 2560,
            screen_height: 1600,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<Configuration> {
        check_range("dpi", self.dpi, &DPI_RANGE)?;
        check_range("reaction time (ms)", self.reaction_ms, &REACTION_MS_RANGE)?;
        check_range("screen width", self.screen_width, &SCREEN_WIDTH_RANGE)?;
        check_range("screen height", self.screen_height, &SCREEN_HEIGHT_RANGE)?;

        let geometry =
            CanvasGeometry::for_screen(f64::from(self.screen_width), f64::from(self.screen_height))?;

        Ok(Configuration {
            dpi: self.dpi,
            reaction_secs: f64::from(self.reaction_ms) / 1000.0,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            geometry,
        })
    }
}

fn check_range(name: &str, value: u32, range: &RangeInclusive<u32>) -> Result<()> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(AimError::InvalidConfig(format!(
            "{name} must be within {}..={}, got {value}",
            range.start(),
            range.end()
        )))
    }
}

/// Validated, immutable per-session configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Configuration {
    pub dpi: u32,
    pub reaction_secs: f64,
    pub screen_width: u32,
    pub screen_height: u32,
    pub geometry: CanvasGeometry,
}

impl Configuration {
    pub fn reaction_ms(&self) -> f64 {
        self.reaction_secs * 1000.0
    }
}

/// Read-only source of setup presets
pub trait SettingsStore {
    /// `Ok(None)` when no preset exists
    fn load(&self) -> Result<Option<Settings>>;
}

#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::settings_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Option<Settings>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let settings = serde_json::from_slice::<Settings>(&bytes)?;
        log::debug!("loaded settings preset from {}", self.path.display());
        Ok(Some(settings))
    }
}
