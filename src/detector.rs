use anyhow::Result;
use image::{imageops::FilterType, ImageBuffer, Rgb};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;

use crate::types::{LandmarkSet, Point2D, NUM_LANDMARKS};

const INPUT_SIZE: u32 = 224;

/// Runs a MediaPipe-style 21-point hand landmark model.
///
/// Expected graph: input [1, 224, 224, 3] float RGB in 0..1; outputs in
/// order: landmarks [1, 63] (x, y, z per point, input-pixel coords) and
/// hand presence score [1, 1].
pub struct HandDetector {
    session: Session,
    min_confidence: f32,
}

impl HandDetector {
    pub fn new(model_path: &str, min_confidence: f32) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .with_execution_providers([
                ort::execution_providers::CoreMLExecutionProvider::default().build(),
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])?
            .commit_from_file(model_path)?;

        Ok(Self { session, min_confidence })
    }

    /// Detect at most one hand. Returns None when no hand clears the
    /// confidence gate; this is the expected steady state, not an error.
    pub fn detect(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<LandmarkSet>> {
        let resized = image::imageops::resize(frame, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle);

        // NHWC [1, 224, 224, 3], pixels scaled to 0..1
        let mut input_data = Vec::with_capacity((INPUT_SIZE * INPUT_SIZE * 3) as usize);
        for y in 0..INPUT_SIZE {
            for x in 0..INPUT_SIZE {
                let pixel = resized.get_pixel(x, y);
                input_data.push(pixel[0] as f32 / 255.0);
                input_data.push(pixel[1] as f32 / 255.0);
                input_data.push(pixel[2] as f32 / 255.0);
            }
        }

        let shape = vec![1, INPUT_SIZE as i64, INPUT_SIZE as i64, 3];
        let input = Tensor::from_array((shape, input_data))?;
        let outputs = self.session.run(ort::inputs![input])?;

        let (_score_shape, score_data) = outputs[1].try_extract_tensor::<f32>()?;
        if score_data.is_empty() || score_data[0] < self.min_confidence {
            return Ok(None);
        }

        let (_lm_shape, lm_data) = outputs[0].try_extract_tensor::<f32>()?;
        if lm_data.len() < NUM_LANDMARKS * 3 {
            return Ok(None);
        }

        // Model coords are in input pixels; normalize to 0..1 so callers
        // can rescale to any frame size
        let mut points = [Point2D::default(); NUM_LANDMARKS];
        for (i, point) in points.iter_mut().enumerate() {
            point.x = lm_data[i * 3] / INPUT_SIZE as f32;
            point.y = lm_data[i * 3 + 1] / INPUT_SIZE as f32;
        }

        Ok(Some(LandmarkSet { points }))
    }
}
