use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for an analysis run.
///
/// Every section has defaults, so an empty configuration reproduces the
/// behaviour of running the tool in the simulator's output directory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub inputs: InputPaths,
    pub output: OutputPaths,
    pub chart: ChartSettings,
}

/// Locations of the three simulator logs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputPaths {
    pub trades: PathBuf,
    pub book: PathBuf,
    pub quotes: PathBuf,
}

/// Where the results go.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    /// The rendered chart. Overwritten on every run.
    pub chart: PathBuf,
    /// Optional JSON dump of the quoting summary.
    pub summary_path: Option<PathBuf>,
}

/// Canvas size and font lookup for the renderer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// TrueType fonts tried in order for titles, legends and tick labels.
    pub font_candidates: Vec<PathBuf>,
}

// --- Default Implementations ---

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            trades: PathBuf::from("trades.csv"),
            book: PathBuf::from("book.csv"),
            quotes: PathBuf::from("quotes.csv"),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            chart: PathBuf::from("results.png"),
            summary_path: None,
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        // 12x12 figure at 100 dpi.
        Self {
            width: 1200,
            height: 1200,
            font_candidates: [
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/Library/Fonts/Arial.ttf",
                "/System/Library/Fonts/Supplemental/Arial.ttf",
                "C:\\Windows\\Fonts\\arial.ttf",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}
