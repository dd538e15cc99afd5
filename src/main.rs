use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;
use colored::*;

use rusty_hand::args::Args;
use rusty_hand::camera::CameraSource;
use rusty_hand::classifier::{palm_reference, DeltaClassifier};
use rusty_hand::config::AppConfig;
use rusty_hand::dispatcher::{open_dispatcher, CommandDispatcher};
use rusty_hand::gate::ChatterGate;
use rusty_hand::output::WindowOutput;
use rusty_hand::overlay;
use rusty_hand::pipeline::create_source;
use rusty_hand::types::{Command, Point2D};

// Give up after this many consecutive failed captures (~a few seconds at
// frame pace) instead of spinning forever on a dead camera.
const MAX_CAPTURE_FAILURES: u32 = 240;

fn main() -> Result<()> {
    let args = Args::parse();

    if args.list {
        let cameras = nokhwa::query(nokhwa::utils::ApiBackend::Auto)?;
        println!("Available Cameras:");
        println!("{:<5} | {:<30} | {:<10}", "Index", "Name", "Misc");
        println!("{}", "-".repeat(60));
        for cam in cameras {
            println!("{:<5} | {:<30} | {:?}", cam.index(), cam.human_name(), cam.misc());
        }
        return Ok(());
    }

    let mut config = AppConfig::load()?;
    if let Some(port) = args.port {
        config.serial.port = Some(port);
    }
    if let Some(baud) = args.baud {
        config.serial.baud = baud;
    }
    if let Some(index) = args.cam_index {
        config.camera.index = index;
    }

    let mut dispatcher = open_dispatcher(config.serial.port.as_deref(), config.serial.baud);

    let mut camera = CameraSource::new(config.camera.index)?;
    let mut source = create_source(&args.model, &config.gesture)?;
    println!("Active source: {}", source.name());

    // First frame fixes the display dimensions
    let first = capture_with_retry(&mut camera)?;
    let target_w = config.camera.frame_width;
    let target_h = (first.height() as f32 * target_w as f32 / first.width() as f32) as u32;

    // Rails are width-relative; every frame is resized to target_w below,
    // so the classifier is built once
    let classifier = DeltaClassifier::new(&config.gesture, target_w);
    let mut gate = ChatterGate::new(config.gesture.cooldown());
    let mut draw_mode = config.ui.draw_mode;

    let mut window = WindowOutput::new(
        "Thumb Servo Control",
        target_w as usize,
        target_h as usize,
    )?;

    println!(
        "{}",
        "Ready. Thumb right of palm: H (180°). Thumb left: L (0°). H/L keys send, M toggles draw, Q quits."
            .cyan()
    );

    let mut failures = 0u32;
    let mut infer_failures = 0u32;
    'main: while window.is_open() && !window.is_key_down(minifb::Key::Escape) {
        // Operator input first: overrides beat automatic classification
        for key in window.get_keys_pressed() {
            match key {
                minifb::Key::Q => break 'main,
                minifb::Key::H => manual_send(Command::Extend, &mut gate, dispatcher.as_mut()),
                minifb::Key::L => manual_send(Command::Retract, &mut gate, dispatcher.as_mut()),
                minifb::Key::M => {
                    draw_mode = draw_mode.toggled();
                    println!("[draw] mode toggled");
                }
                _ => {}
            }
        }

        let mut frame = match camera.capture() {
            Ok(f) => {
                failures = 0;
                f
            }
            Err(e) => {
                failures += 1;
                if failures >= MAX_CAPTURE_FAILURES {
                    bail!("Camera produced no frames after {} attempts: {:#}", failures, e);
                }
                std::thread::sleep(Duration::from_millis(5));
                continue;
            }
        };

        if config.ui.mirror {
            image::imageops::flip_horizontal_in_place(&mut frame);
        }
        if frame.width() != target_w {
            let h = (frame.height() as f32 * target_w as f32 / frame.width() as f32) as u32;
            frame = image::imageops::resize(&frame, target_w, h, image::imageops::FilterType::Triangle);
        }
        let (width, height) = frame.dimensions();

        // Inference hiccups count like dropped frames: skip the cycle,
        // give up past the same bound
        let landmarks = match source.process(&frame) {
            Ok(l) => {
                infer_failures = 0;
                l
            }
            Err(e) => {
                infer_failures += 1;
                if infer_failures >= MAX_CAPTURE_FAILURES {
                    bail!("Landmark inference kept failing: {:#}", e);
                }
                println!("{}", format!("[warn] inference failed: {:#}", e).yellow());
                None
            }
        };

        let mut palm_px: Option<Point2D> = None;
        let mut zone = None;

        if let Some(set) = &landmarks {
            let palm = palm_reference(set);
            let palm_x = palm.x * width as f32;
            let thumb_x = set.thumb_tip().x * width as f32;

            let reading = classifier.classify(palm_x, thumb_x);
            zone = Some(reading.zone);
            palm_px = Some(Point2D { x: palm_x, y: palm.y * height as f32 });

            if let Some(cmd) = gate.update(&reading, Instant::now()) {
                send_cmd(cmd, dispatcher.as_mut());
            }
        }
        // No hand: nothing to classify, gate state untouched

        let mut display_buffer = frame.into_vec();
        if config.ui.draw {
            overlay::draw(
                &mut display_buffer,
                width as usize,
                height as usize,
                landmarks.as_ref(),
                palm_px,
                classifier.threshold_px(),
                zone,
                draw_mode,
            );
        }
        window.update(&display_buffer)?;
    }

    Ok(())
}

fn capture_with_retry(camera: &mut CameraSource) -> Result<image::RgbImage> {
    let mut last_err = None;
    for _ in 0..MAX_CAPTURE_FAILURES {
        match camera.capture() {
            Ok(f) => return Ok(f),
            Err(e) => {
                last_err = Some(e);
                std::thread::sleep(Duration::from_millis(5));
            }
        }
    }
    bail!("Camera produced no frames: {:#}", last_err.unwrap())
}

fn send_cmd(cmd: Command, dispatcher: &mut dyn CommandDispatcher) {
    if let Err(e) = dispatcher.send(cmd) {
        println!("{}", format!("{:#}", e).yellow());
    }
    println!("Sent {} ({})", cmd.wire_byte() as char, cmd.angle_label());
}

fn manual_send(cmd: Command, gate: &mut ChatterGate, dispatcher: &mut dyn CommandDispatcher) {
    gate.force(Instant::now());
    send_cmd(cmd, dispatcher);
}
