pub mod settings;
pub mod toml_config;

pub use settings::{LogFormat, Settings};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "course-picker")]
#[command(about = "Pick courses from a catalog while respecting incompatibilities")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV or TSV catalog with Code, Course and Incompatibilities columns
    #[arg(long)]
    pub catalog: Option<String>,

    /// Maximum number of courses that may be chosen
    #[arg(long)]
    pub max_selectable: Option<usize>,

    /// Course codes to choose before printing, in order
    #[arg(long, value_delimiter = ',')]
    pub choose: Vec<u32>,

    /// Print rows and summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Read add/drop commands from standard input
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
