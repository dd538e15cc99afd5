//! Interactive serial check: type H or L to drive the servo directly,
//! bypassing the camera and gesture pipeline entirely.

use std::io::{self, BufRead, Write};

use clap::Parser;

use rusty_hand::dispatcher::{CommandDispatcher, SerialDispatcher};
use rusty_hand::types::Command;

#[derive(Parser, Debug)]
#[command(about = "Send H/L bytes to the actuator over serial")]
struct ProbeArgs {
    /// Serial device, e.g. /dev/ttyACM0 or COM7
    port: String,

    #[arg(long, default_value_t = 115_200)]
    baud: u32,
}

fn main() -> anyhow::Result<()> {
    let args = ProbeArgs::parse();
    let mut link = SerialDispatcher::open(&args.port, args.baud)?;

    println!("Type H or L then Enter. Ctrl+C to quit.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let cmd = match line.trim().to_ascii_uppercase().as_str() {
            "H" => Command::Extend,
            "L" => Command::Retract,
            _ => {
                println!("use H or L");
                continue;
            }
        };
        link.send(cmd)?;
        println!("sent {} ({})", cmd.wire_byte() as char, cmd.angle_label());
    }
    Ok(())
}
