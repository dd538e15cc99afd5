use crate::config::GestureConfig;
use crate::types::{LandmarkSet, Point2D, Zone, PALM_IDXS};

/// Palm centre = unweighted average of wrist + the four MCP knuckles.
/// Much more stable than any single landmark; works for either hand.
pub fn palm_reference(landmarks: &LandmarkSet) -> Point2D {
    let mut cx = 0.0;
    let mut cy = 0.0;
    for &i in &PALM_IDXS {
        cx += landmarks.points[i].x;
        cy += landmarks.points[i].y;
    }
    let n = PALM_IDXS.len() as f32;
    Point2D { x: cx / n, y: cy / n }
}

/// One frame's classified thumb offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Thumb tip x minus palm centre x, in pixels. Positive = thumb right
    /// of palm.
    pub delta: f32,
    pub zone: Zone,
    /// |delta| inside the re-arm band (tighter than the neutral zone).
    pub in_inner_band: bool,
}

/// Classifies the signed thumb offset against width-relative rails.
///
/// Stateless: identical inputs always produce the identical `Reading`.
/// Rebuild when the frame width changes so the rails track the frame.
#[derive(Debug, Clone, Copy)]
pub struct DeltaClassifier {
    threshold_px: f32,
    inner_band_px: f32,
}

impl DeltaClassifier {
    /// `config` must already be validated; width-scaled rails come out
    /// positive with inner band strictly inside the threshold.
    pub fn new(config: &GestureConfig, frame_width: u32) -> Self {
        let threshold_px = config.threshold_fraction * frame_width as f32;
        Self {
            threshold_px,
            inner_band_px: config.inner_band_fraction * threshold_px,
        }
    }

    pub fn threshold_px(&self) -> f32 {
        self.threshold_px
    }

    /// Classify pixel-space palm and thumb x coordinates.
    pub fn classify(&self, palm_x: f32, thumb_x: f32) -> Reading {
        let delta = thumb_x - palm_x;
        // Strict inequalities: a delta sitting exactly on a rail is neutral.
        let zone = if delta > self.threshold_px {
            Zone::Out
        } else if delta < -self.threshold_px {
            Zone::In
        } else {
            Zone::Neutral
        };
        Reading {
            delta,
            zone,
            in_inner_band: delta.abs() < self.inner_band_px,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Point2D, NUM_LANDMARKS};

    fn classifier() -> DeltaClassifier {
        // 480 px frame, 0.14 fraction -> 67.2 px rails, 40.32 px inner band
        DeltaClassifier::new(&GestureConfig::default(), 480)
    }

    #[test]
    fn rails_scale_with_frame_width() {
        let c = classifier();
        assert!((c.threshold_px() - 67.2).abs() < 1e-4);
    }

    #[test]
    fn boundary_delta_is_neutral() {
        let c = classifier();
        let t = c.threshold_px();
        assert_eq!(c.classify(0.0, t).zone, Zone::Neutral);
        assert_eq!(c.classify(0.0, -t).zone, Zone::Neutral);
        assert_eq!(c.classify(0.0, t + 0.001).zone, Zone::Out);
        assert_eq!(c.classify(0.0, -t - 0.001).zone, Zone::In);
    }

    #[test]
    fn zone_sign_convention() {
        let c = classifier();
        // Thumb well to the right of the palm -> Out, left -> In
        assert_eq!(c.classify(200.0, 300.0).zone, Zone::Out);
        assert_eq!(c.classify(200.0, 100.0).zone, Zone::In);
        assert_eq!(c.classify(200.0, 210.0).zone, Zone::Neutral);
    }

    #[test]
    fn inner_band_is_tighter_than_neutral() {
        let c = classifier();
        // 50 px: inside the rails (neutral) but outside the 40.32 px band
        let r = c.classify(0.0, 50.0);
        assert_eq!(r.zone, Zone::Neutral);
        assert!(!r.in_inner_band);
        let r = c.classify(0.0, 10.0);
        assert!(r.in_inner_band);
    }

    #[test]
    fn classification_is_idempotent() {
        let c = classifier();
        let a = c.classify(123.4, 210.9);
        let b = c.classify(123.4, 210.9);
        assert_eq!(a, b);
    }

    #[test]
    fn palm_reference_is_mean_of_five() {
        let mut points = [Point2D::default(); NUM_LANDMARKS];
        points[0] = Point2D { x: 0.10, y: 0.50 };
        points[5] = Point2D { x: 0.20, y: 0.40 };
        points[9] = Point2D { x: 0.30, y: 0.30 };
        points[13] = Point2D { x: 0.40, y: 0.20 };
        points[17] = Point2D { x: 0.50, y: 0.10 };
        // Fill a non-palm landmark with junk; it must not contribute
        points[4] = Point2D { x: 9.0, y: 9.0 };
        let set = LandmarkSet { points };
        let p = palm_reference(&set);
        assert!((p.x - 0.30).abs() < 1e-6);
        assert!((p.y - 0.30).abs() < 1e-6);
    }
}
