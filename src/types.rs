/// Represents a single normalized 2D point (x, y in 0..1)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

// MediaPipe-style hand landmark indices (21 points per hand)
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const MIDDLE_MCP: usize = 9;
pub const RING_MCP: usize = 13;
pub const PINKY_MCP: usize = 17;

/// Wrist + the four finger MCP knuckles: a stable palm-centre reference
/// for either hand.
pub const PALM_IDXS: [usize; 5] = [WRIST, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

pub const NUM_LANDMARKS: usize = 21;

/// Bone connections for drawing the full hand skeleton.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),        // thumb
    (0, 5), (5, 6), (6, 7), (7, 8),        // index
    (9, 10), (10, 11), (11, 12),           // middle
    (13, 14), (14, 15), (15, 16),          // ring
    (0, 17), (17, 18), (18, 19), (19, 20), // pinky
    (5, 9), (9, 13), (13, 17),             // knuckle bridge
];

/// One hand's landmarks, valid for exactly one frame. Coordinates are
/// normalized to the frame (0..1); multiply by frame width/height for
/// pixel space.
#[derive(Debug, Clone)]
pub struct LandmarkSet {
    pub points: [Point2D; NUM_LANDMARKS],
}

impl LandmarkSet {
    pub fn thumb_tip(&self) -> Point2D {
        self.points[THUMB_TIP]
    }
}

/// Ternary classification of the thumb offset against the threshold rails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Thumb right of the palm beyond the threshold
    Out,
    /// Thumb left of the palm beyond the threshold
    In,
    /// Between the rails (boundary inclusive)
    Neutral,
}

/// A discrete actuator command. Wire protocol is a single ASCII byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 'H' — servo to 180°
    Extend,
    /// 'L' — servo to 0°
    Retract,
}

impl Command {
    pub fn wire_byte(self) -> u8 {
        match self {
            Command::Extend => b'H',
            Command::Retract => b'L',
        }
    }

    pub fn angle_label(self) -> &'static str {
        match self {
            Command::Extend => "180°",
            Command::Retract => "0°",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_bytes_match_protocol() {
        assert_eq!(Command::Extend.wire_byte(), b'H');
        assert_eq!(Command::Retract.wire_byte(), b'L');
    }

    #[test]
    fn palm_indices_are_wrist_plus_mcps() {
        assert_eq!(PALM_IDXS, [0, 5, 9, 13, 17]);
    }
}
