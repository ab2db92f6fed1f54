// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "rts-camera")]
#[command(about = "RTS-style camera rig over a terrain scene", long_about = None)]
pub struct Cli {
    /// Camera settings as JSON; defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// glTF file to use as terrain instead of the procedural hills
    #[arg(short, long)]
    pub terrain: Option<PathBuf>,

    /// Run a scripted session without opening a window
    #[arg(long, default_value = "false")]
    pub headless: bool,

    /// Frames to simulate in headless mode
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Fixed frame delta in seconds for headless mode
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,
}
