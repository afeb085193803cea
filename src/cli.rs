// cli.rs - Command-line interface configuration
use clap::Parser;

use crate::scenes::SceneKind;

#[derive(Parser, Debug, Clone)]
#[command(name = "logo-viewer")]
#[command(about = "Extruded-logo 3D viewer", long_about = None)]
pub struct Cli {
    /// Scene variant to start with
    #[arg(long, value_enum, default_value_t = SceneKind::Logo)]
    pub scene: SceneKind,

    /// JSON scene configuration overriding the built-in constants
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Initial ambient light intensity
    #[arg(long)]
    pub intensity: Option<f32>,

    /// Disable UI elements and console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}
