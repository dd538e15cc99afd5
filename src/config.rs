use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub serial: SerialConfig,
    pub camera: CameraConfig,
    pub gesture: GestureConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Serial device path, e.g. "COM7" or "/dev/ttyACM0". None = run
    /// without a link (commands computed but not transmitted).
    pub port: Option<String>,
    pub baud: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub index: u32,
    /// Frames are downscaled to this width before inference. 424-640
    /// recommended; raise it if your CPU keeps up.
    pub frame_width: u32,
    pub fps: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Zone half-width as a fraction of frame width. Larger = less
    /// sensitive.
    pub threshold_fraction: f32,
    /// Minimum time between any two sends. Larger = slower max command
    /// rate.
    pub cooldown_ms: u64,
    /// Re-arm band as a fraction of the threshold. Smaller = harder to
    /// re-arm.
    pub inner_band_fraction: f32,
    /// Hand presence score below this is treated as "no hand".
    pub min_detection_confidence: f32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub draw: bool,
    /// "full" = 21 points + connections, "minimal" = rails + 2 dots
    pub draw_mode: DrawMode,
    pub mirror: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    Full,
    Minimal,
}

impl DrawMode {
    pub fn toggled(self) -> Self {
        match self {
            DrawMode::Full => DrawMode::Minimal,
            DrawMode::Minimal => DrawMode::Full,
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { port: None, baud: 115_200 }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, frame_width: 480, fps: 24 }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold_fraction: 0.14,
            cooldown_ms: 250,
            inner_band_fraction: 0.6,
            min_detection_confidence: 0.6,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { draw: true, draw_mode: DrawMode::Full, mirror: true }
    }
}

impl GestureConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl AppConfig {
    const PATH: &'static str = "config.json";

    pub fn load() -> Result<Self> {
        let config = if Path::new(Self::PATH).exists() {
            let content = fs::read_to_string(Self::PATH)?;
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(c) => {
                    println!("Loaded configuration from {}", Self::PATH);
                    c
                }
                Err(e) => {
                    println!("Error parsing config: {}. Loading defaults.", e);
                    Self::default()
                }
            }
        } else {
            println!("Configuration file not found. Creating default at {}", Self::PATH);
            Self::default()
        };

        // Bad invariants are a startup error, never a mid-loop surprise
        config.validate()?;

        // Save back so new fields appear in the file
        config.save()?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(Self::PATH, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let g = &self.gesture;
        if g.threshold_fraction <= 0.0 {
            bail!("gesture.threshold_fraction must be > 0 (got {})", g.threshold_fraction);
        }
        if g.inner_band_fraction <= 0.0 || g.inner_band_fraction >= 1.0 {
            bail!(
                "gesture.inner_band_fraction must be in (0, 1) (got {})",
                g.inner_band_fraction
            );
        }
        if g.min_detection_confidence <= 0.0 || g.min_detection_confidence > 1.0 {
            bail!(
                "gesture.min_detection_confidence must be in (0, 1] (got {})",
                g.min_detection_confidence
            );
        }
        if self.camera.frame_width == 0 {
            bail!("camera.frame_width must be > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_nonpositive_threshold() {
        let mut c = AppConfig::default();
        c.gesture.threshold_fraction = 0.0;
        assert!(c.validate().is_err());
        c.gesture.threshold_fraction = -0.1;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_inner_band_at_or_above_threshold() {
        let mut c = AppConfig::default();
        c.gesture.inner_band_fraction = 1.0;
        assert!(c.validate().is_err());
        c.gesture.inner_band_fraction = 1.5;
        assert!(c.validate().is_err());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let c: AppConfig = serde_json::from_str("{\"serial\": {\"baud\": 9600}}").unwrap();
        assert_eq!(c.serial.baud, 9600);
        assert_eq!(c.camera.frame_width, 480);
        assert!((c.gesture.threshold_fraction - 0.14).abs() < 1e-6);
    }
}
