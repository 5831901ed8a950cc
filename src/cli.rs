use clap::Parser;
use std::path::PathBuf;

use crate::ui::canvas::WindowSettings;
use crate::ui::render::Color;

pub const APP_NAME: &str = "board";

pub const HELP_KEYS: &str = "\
Key Bindings (act on key release):
  n / Right / l / Space : Next image
  p / Left / h          : Previous image
  q / Esc               : Quit
";

#[derive(Parser, Debug)]
#[command(name = APP_NAME, version, about = "A minimal image viewer", after_help = HELP_KEYS)]
pub struct Cli {
    /// Image files to view, in order
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "400", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "300", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Color of the empty viewport, as RRGGBB
    #[arg(long, default_value = "000000", value_parser = parse_color)]
    pub background: Color,
}

impl Cli {
    pub fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            width: self.width,
            height: self.height,
            background: self.background,
        }
    }
}

pub fn parse_color(s: &str) -> Result<Color, String> {
    Color::from_hex(s).ok_or_else(|| format!("expected a color like 1f1f1f, got '{}'", s))
}

/// Help and version output exit 0; every other argument problem exits 1.
pub fn exit_code_for(err: &clap::Error) -> u8 {
    if err.use_stderr() { 1 } else { 0 }
}
