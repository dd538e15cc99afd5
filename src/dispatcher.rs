use anyhow::{Context, Result};
use colored::*;
use std::io::Write;
use std::time::Duration;

use crate::types::Command;

/// Best-effort sink for actuator commands. Delivery failure is reported,
/// never fatal: gate state reflects intent to command, not confirmed
/// actuation.
pub trait CommandDispatcher {
    fn name(&self) -> String;
    fn send(&mut self, cmd: Command) -> Result<()>;
}

pub struct SerialDispatcher {
    port: Box<dyn serialport::SerialPort>,
    path: String,
}

impl SerialDispatcher {
    /// Open the link once at startup. The settle delay gives an Arduino
    /// time to finish its reset-on-open before the first command.
    pub fn open(path: &str, baud: u32) -> Result<Self> {
        let port = serialport::new(path, baud)
            .timeout(Duration::from_millis(100))
            .open()
            .with_context(|| format!("Failed to open serial port {}", path))?;

        std::thread::sleep(Duration::from_millis(1500));
        port.clear(serialport::ClearBuffer::Input).ok();

        println!("{}", format!("[serial] Opened {} @ {}", path, baud).green());
        Ok(Self { port, path: path.to_string() })
    }
}

impl CommandDispatcher for SerialDispatcher {
    fn name(&self) -> String {
        self.path.clone()
    }

    fn send(&mut self, cmd: Command) -> Result<()> {
        self.port
            .write_all(&[cmd.wire_byte()])
            .with_context(|| format!("[serial] write of {:?} failed", cmd))?;
        Ok(())
    }
}

/// Degraded mode: commands are computed and logged but go nowhere.
pub struct NullDispatcher;

impl CommandDispatcher for NullDispatcher {
    fn name(&self) -> String {
        "none".to_string()
    }

    fn send(&mut self, _cmd: Command) -> Result<()> {
        Ok(())
    }
}

/// Open the configured port, degrading to the no-op sink on any failure.
/// A missing link is a warning, not a reason to stop tracking.
pub fn open_dispatcher(port: Option<&str>, baud: u32) -> Box<dyn CommandDispatcher> {
    match port {
        Some(path) => match SerialDispatcher::open(path, baud) {
            Ok(d) => Box::new(d),
            Err(e) => {
                println!(
                    "{}",
                    format!("[warn] Serial open failed: {:#} (continuing without serial)", e)
                        .yellow()
                );
                Box::new(NullDispatcher)
            }
        },
        None => {
            println!("{}", "[serial] No port configured (dry run)".yellow());
            Box::new(NullDispatcher)
        }
    }
}
