use crate::error::{RasterError, RasterResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PPI: f32 = 72.0;
pub const DEFAULT_GIF_FRAME_DELAY_MS: u16 = 200;
pub const DEFAULT_GIF_TIMEOUT_MS: u64 = 30_000;

/// Options shared by all export formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Resolution recorded in PNG `pHYs` metadata. `None` records 72.
    pub ppi: Option<f32>,
    /// Display time of the single GIF frame.
    pub gif_frame_delay_ms: u16,
    /// How long to wait for the GIF encoder. `None` waits forever.
    pub gif_timeout_ms: Option<u64>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            ppi: Some(DEFAULT_PPI),
            gif_frame_delay_ms: DEFAULT_GIF_FRAME_DELAY_MS,
            gif_timeout_ms: Some(DEFAULT_GIF_TIMEOUT_MS),
        }
    }
}

impl ExportOptions {
    pub fn from_json(json: &str) -> RasterResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: impl AsRef<Path>) -> RasterResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| {
            RasterError::Config(format!("Failed to read {}: {err}", path.display()))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> RasterResult<()> {
        if let Some(ppi) = self.ppi {
            if !ppi.is_finite() || ppi <= 0.0 {
                return Err(RasterError::Config(format!(
                    "ppi must be a positive number, got {ppi}"
                )));
            }
        }
        Ok(())
    }

    pub fn gif_timeout(&self) -> Option<Duration> {
        self.gif_timeout_ms.map(Duration::from_millis)
    }
}
