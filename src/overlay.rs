use crate::config::DrawMode;
use crate::font;
use crate::types::{LandmarkSet, Point2D, Zone, HAND_CONNECTIONS, THUMB_TIP};

const LANDMARK_COLOR: (u8, u8, u8) = (255, 0, 0);
const BONE_COLOR: (u8, u8, u8) = (0, 255, 0);
const RAIL_COLOR: (u8, u8, u8) = (180, 180, 180);
const DOT_COLOR: (u8, u8, u8) = (255, 255, 255);

/// Status line state shown top-left, colored by zone.
pub fn status_text(zone: Option<Zone>) -> (&'static str, (u8, u8, u8)) {
    match zone {
        None => ("SHOW HAND", (180, 180, 180)),
        Some(Zone::Out) => ("OUT - H (180)", (0, 200, 0)),
        Some(Zone::In) => ("IN - L (0)", (255, 165, 0)),
        Some(Zone::Neutral) => ("NEUTRAL", (200, 200, 0)),
    }
}

/// Draw the per-frame overlay: hand (full skeleton or two dots), the
/// threshold rails around the palm centre, and the status/help text.
#[allow(clippy::too_many_arguments)]
pub fn draw(
    buffer: &mut [u8],
    width: usize,
    height: usize,
    landmarks: Option<&LandmarkSet>,
    palm_px: Option<Point2D>,
    threshold_px: f32,
    zone: Option<Zone>,
    mode: DrawMode,
) {
    if let (Some(set), Some(palm)) = (landmarks, palm_px) {
        match mode {
            DrawMode::Full => draw_skeleton(buffer, width, height, set),
            DrawMode::Minimal => {
                draw_dot(buffer, width, height, palm.x, palm.y, 5, DOT_COLOR);
                let thumb = set.points[THUMB_TIP];
                draw_dot(
                    buffer,
                    width,
                    height,
                    thumb.x * width as f32,
                    thumb.y * height as f32,
                    5,
                    DOT_COLOR,
                );
            }
        }

        // Rails either side of the palm centre
        draw_vline(buffer, width, height, palm.x - threshold_px, RAIL_COLOR);
        draw_vline(buffer, width, height, palm.x + threshold_px, RAIL_COLOR);
    }

    let (text, color) = status_text(zone);
    font::draw_text_line(buffer, width, height, 10, 10, text, color, 2);
    font::draw_text_line(
        buffer,
        width,
        height,
        10,
        height.saturating_sub(12),
        "H/L SEND  M DRAW  Q QUIT",
        (180, 180, 180),
        1,
    );
}

fn draw_skeleton(buffer: &mut [u8], width: usize, height: usize, set: &LandmarkSet) {
    let w = width as f32;
    let h = height as f32;

    for &(a, b) in &HAND_CONNECTIONS {
        let pa = set.points[a];
        let pb = set.points[b];
        draw_line(buffer, width, height, pa.x * w, pa.y * h, pb.x * w, pb.y * h, BONE_COLOR);
    }

    for p in &set.points {
        draw_dot(buffer, width, height, p.x * w, p.y * h, 3, LANDMARK_COLOR);
    }
}

fn put_pixel(buffer: &mut [u8], width: usize, height: usize, x: i32, y: i32, color: (u8, u8, u8)) {
    if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
        return;
    }
    let idx = (y as usize * width + x as usize) * 3;
    if idx + 2 < buffer.len() {
        buffer[idx] = color.0;
        buffer[idx + 1] = color.1;
        buffer[idx + 2] = color.2;
    }
}

fn draw_dot(
    buffer: &mut [u8],
    width: usize,
    height: usize,
    cx: f32,
    cy: f32,
    radius: i32,
    color: (u8, u8, u8),
) {
    let (cx, cy) = (cx as i32, cy as i32);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put_pixel(buffer, width, height, cx + dx, cy + dy, color);
            }
        }
    }
}

fn draw_line(
    buffer: &mut [u8],
    width: usize,
    height: usize,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    color: (u8, u8, u8),
) {
    let mut t = 0.0;
    while t < 1.0 {
        let px = x0 + (x1 - x0) * t;
        let py = y0 + (y1 - y0) * t;
        put_pixel(buffer, width, height, px as i32, py as i32, color);
        t += 0.005;
    }
}

fn draw_vline(buffer: &mut [u8], width: usize, height: usize, x: f32, color: (u8, u8, u8)) {
    for y in 0..height as i32 {
        put_pixel(buffer, width, height, x as i32, y, color);
    }
}
