use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Camera index (overrides config)
    #[arg(short, long)]
    pub cam_index: Option<u32>,

    /// Serial port, e.g. /dev/ttyACM0 or COM7 (overrides config)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Serial baud rate (overrides config)
    #[arg(long)]
    pub baud: Option<u32>,

    /// Path to the hand landmark ONNX model
    #[arg(long, default_value = "models/hand_landmark.onnx")]
    pub model: String,

    /// List available cameras
    #[arg(long)]
    pub list: bool,
}
