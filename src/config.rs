use clap::Parser;
use std::path::PathBuf;

/// Accent color per phase, as the page shell themes them
pub const PHASE_ACCENTS: [&str; 4] = ["#3b82f6", "#ef4444", "#f59e0b", "#8b5cf6"];

/// Terminal map of events along the 33rd parallel
#[derive(Parser, Debug, Clone)]
#[command(name = "parallel-map")]
#[command(about = "Terminal map of events along the 33rd parallel, with phase heat overlays")]
pub struct Args {
    /// World boundary dataset (TopoJSON or GeoJSON)
    #[arg(short, long, default_value = "data/countries-110m.json")]
    pub geometry: PathBuf,

    /// TopoJSON object holding the country polygons
    #[arg(long, default_value = "countries")]
    pub object: String,

    /// Initial phase (0-3; anything else shows no heat zones)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub phase: i64,

    /// Accent color override for every phase (e.g. "#3b82f6")
    #[arg(long)]
    pub phase_color: Option<String>,

    /// Write logs to this file (the terminal is busy drawing the map)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Resolved runtime settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub geometry: PathBuf,
    pub object: String,
    pub initial_phase: i64,
    pub phase_color: Option<String>,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            geometry: args.geometry,
            object: args.object,
            initial_phase: args.phase,
            phase_color: args.phase_color,
        }
    }
}

impl Settings {
    /// Accent for a phase: the override if given, else the phase theme.
    /// Out-of-range phases get no color, so the component falls back.
    pub fn accent_for(&self, phase: i64) -> Option<&str> {
        if let Some(ref c) = self.phase_color {
            return Some(c.as_str());
        }
        usize::try_from(phase).ok().and_then(|i| PHASE_ACCENTS.get(i).copied())
    }
}
