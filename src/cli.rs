// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "scene-viewer")]
#[command(about = "Interactive 3D scene viewer", long_about = None)]
pub struct Cli {
    /// JSON config file; missing fields use the built-in demo scene
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Window width override
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height override
    #[arg(long)]
    pub height: Option<u32>,

    /// Make WASD follow the mouse look direction
    #[arg(long = "free-look")]
    pub free_look: bool,

    /// Print the effective config as JSON and exit
    #[arg(long = "print-config")]
    pub print_config: bool,
}
