use anyhow::Result;
use image::{ImageBuffer, Rgb};
use std::path::Path;

use crate::config::GestureConfig;
use crate::detector::HandDetector;
use crate::types::{LandmarkSet, Point2D, NUM_LANDMARKS};

/// Supplies zero-or-one hand landmark sets per control cycle.
pub trait LandmarkSource {
    fn name(&self) -> String;
    fn process(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<LandmarkSet>>;
}

/// Build the ONNX-backed source, or fall back to the simulator when the
/// model file is missing so the binary still runs end-to-end.
pub fn create_source(model_path: &str, config: &GestureConfig) -> Result<Box<dyn LandmarkSource>> {
    if Path::new(model_path).exists() {
        println!("Loading hand landmark model from {}...", model_path);
        Ok(Box::new(OnnxHandSource::new(model_path, config)?))
    } else {
        println!("Model {} not found. Using simulated hand.", model_path);
        Ok(Box::new(SimulatedHandSource::new()))
    }
}

pub struct OnnxHandSource {
    detector: HandDetector,
}

impl OnnxHandSource {
    pub fn new(model_path: &str, config: &GestureConfig) -> Result<Self> {
        let detector = HandDetector::new(model_path, config.min_detection_confidence)?;
        Ok(Self { detector })
    }
}

impl LandmarkSource for OnnxHandSource {
    fn name(&self) -> String {
        "Hand Landmarks (21 pts)".to_string()
    }

    fn process(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<LandmarkSet>> {
        self.detector.detect(frame)
    }
}

/// Synthetic hand whose thumb sweeps left and right of the palm over
/// time. Useful for exercising the gate and overlay with no model and no
/// hand in front of the camera.
pub struct SimulatedHandSource {
    frame_count: u32,
}

impl SimulatedHandSource {
    pub fn new() -> Self {
        Self { frame_count: 0 }
    }
}

impl Default for SimulatedHandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkSource for SimulatedHandSource {
    fn name(&self) -> String {
        "Simulated Hand".to_string()
    }

    fn process(&mut self, _frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<LandmarkSet>> {
        self.frame_count += 1;
        let t = self.frame_count as f32 * 0.03;

        // Palm parked at centre; fingers fanned above it
        let palm = Point2D { x: 0.5, y: 0.55 };
        let mut points = [Point2D::default(); NUM_LANDMARKS];
        for (i, point) in points.iter_mut().enumerate() {
            let spread = (i as f32 - 10.0) * 0.015;
            point.x = palm.x + spread;
            point.y = palm.y - 0.05 - (i % 4) as f32 * 0.04;
        }
        points[0] = palm;

        // Thumb tip swings across both rails and back through centre
        points[4] = Point2D {
            x: palm.x + t.sin() * 0.25,
            y: palm.y - 0.02,
        };

        Ok(Some(LandmarkSet { points }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_source_always_yields_a_hand() {
        let mut src = SimulatedHandSource::new();
        let frame = ImageBuffer::from_pixel(64, 48, Rgb([0u8, 0, 0]));
        for _ in 0..10 {
            let set = src.process(&frame).unwrap();
            assert!(set.is_some());
        }
    }

    #[test]
    fn simulated_thumb_crosses_both_rails() {
        let mut src = SimulatedHandSource::new();
        let frame = ImageBuffer::from_pixel(64, 48, Rgb([0u8, 0, 0]));
        let mut min_dx = f32::MAX;
        let mut max_dx = f32::MIN;
        for _ in 0..300 {
            let set = src.process(&frame).unwrap().unwrap();
            let dx = set.thumb_tip().x - 0.5;
            min_dx = min_dx.min(dx);
            max_dx = max_dx.max(dx);
        }
        // Sweep amplitude 0.25 of frame width: beyond the 0.14 rails
        assert!(max_dx > 0.14);
        assert!(min_dx < -0.14);
    }
}
