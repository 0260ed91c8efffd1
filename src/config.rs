//! Chart Configuration Module
//! Series, colors, presets and JSON loading for chart configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Default figure size in pixels (8x6 inches at 100 dpi)
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Named colors accepted in a series definition
const NAMED_COLORS: [(&str, (u8, u8, u8)); 9] = [
    ("blue", (31, 119, 180)),
    ("red", (214, 39, 40)),
    ("green", (44, 160, 44)),
    ("orange", (255, 127, 14)),
    ("purple", (148, 103, 189)),
    ("cyan", (23, 190, 207)),
    ("magenta", (227, 119, 194)),
    ("gray", (127, 127, 127)),
    ("black", (0, 0, 0)),
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown color: '{0}' (expected a color name or #rrggbb)")]
    UnknownColor(String),
    #[error("Chart configuration has no series to plot")]
    NoSeries,
    #[error("Chart size {width}x{height} has no pixels to draw on")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid chart configuration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No chart preset matches columns {columns:?}")]
    NoMatchingPreset { columns: Vec<String> },
}

/// A series color, given by name or as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeriesColor {
    name: String,
    rgb: (u8, u8, u8),
}

impl SeriesColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        self.rgb
    }
}

impl FromStr for SeriesColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        if let Some((_, rgb)) = NAMED_COLORS.iter().find(|(n, _)| *n == name) {
            return Ok(Self { name, rgb: *rgb });
        }

        let hex = name
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ConfigError::UnknownColor(s.to_string()))?;
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self {
                name: name.clone(),
                rgb: (r, g, b),
            }),
            _ => Err(ConfigError::UnknownColor(s.to_string())),
        }
    }
}

impl TryFrom<String> for SeriesColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeriesColor> for String {
    fn from(color: SeriesColor) -> Self {
        color.name
    }
}

impl fmt::Display for SeriesColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One value column to plot against the category axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub column: String,
    pub label: String,
    pub color: SeriesColor,
}

impl SeriesSpec {
    pub fn new(column: &str, label: &str, color: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            column: column.to_string(),
            label: label.to_string(),
            color: color.parse()?,
        })
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output.png")
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

/// Everything needed to render one chart. Fixed before rendering starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub category: String,
    pub series: Vec<SeriesSpec>,
    #[serde(default)]
    pub x_label: String,
    #[serde(default)]
    pub y_label: String,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub caption: Option<String>,
}

impl ChartConfig {
    pub fn new(category: &str, output_path: impl Into<PathBuf>) -> Self {
        Self {
            category: category.to_string(),
            series: Vec::new(),
            x_label: String::new(),
            y_label: String::new(),
            output_path: output_path.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            caption: None,
        }
    }

    pub fn with_series(mut self, series: SeriesSpec) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_string());
        self
    }

    /// Reject configurations that cannot produce a chart.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.series.is_empty() {
            return Err(ConfigError::NoSeries);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Load a configuration saved as JSON.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ChartConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Every column the chart reads, category first.
    pub fn required_columns(&self) -> Vec<&str> {
        std::iter::once(self.category.as_str())
            .chain(self.series.iter().map(|s| s.column.as_str()))
            .collect()
    }
}

/// Built-in charts for the benchmark result layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Average time per thread count
    Threads,
    /// Scalar vs vector time per experiment
    ScalarVector,
    /// Duration per thread count
    Duration,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Threads, Preset::ScalarVector, Preset::Duration];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Threads => "threads",
            Preset::ScalarVector => "scalar-vector",
            Preset::Duration => "duration",
        }
    }

    pub fn config(&self, output_path: impl Into<PathBuf>) -> ChartConfig {
        let series = |column: &str, label: &str, rgb: (u8, u8, u8), name: &str| SeriesSpec {
            column: column.to_string(),
            label: label.to_string(),
            color: SeriesColor {
                name: name.to_string(),
                rgb,
            },
        };
        let blue = NAMED_COLORS[0].1;
        let red = NAMED_COLORS[1].1;

        match self {
            Preset::Threads => ChartConfig::new("Threads", output_path)
                .with_series(series("Average Time (s)", "Время выполнения", blue, "blue"))
                .with_labels("Количество потоков", "Время выполнения, с"),
            Preset::ScalarVector => ChartConfig::new("Experiment", output_path)
                .with_series(series("Scalar", "Время скаляр", blue, "blue"))
                .with_series(series("Vector", "Время вектор", red, "red"))
                .with_labels("Номер эксперимента", "Время выполнения, мс"),
            Preset::Duration => ChartConfig::new("T", output_path)
                .with_series(series("Duration", "Время выполнения", blue, "blue"))
                .with_labels("Количество потоков", "Время выполнения, мс")
                .with_size(2 * DEFAULT_WIDTH, DEFAULT_HEIGHT),
        }
    }

    /// First preset whose columns are all present in `columns`.
    pub fn detect(columns: &[String]) -> Option<Preset> {
        Self::ALL.into_iter().find(|preset| {
            preset
                .config("")
                .required_columns()
                .iter()
                .all(|needed| columns.iter().any(|c| c == needed))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn named_and_hex_colors_parse() {
        let blue: SeriesColor = "Blue".parse().unwrap();
        assert_eq!(blue.rgb(), (31, 119, 180));
        assert_eq!(blue.to_string(), "blue");

        let hex: SeriesColor = "#FF8000".parse().unwrap();
        assert_eq!(hex.rgb(), (255, 128, 0));
    }

    #[test]
    fn unknown_colors_are_rejected() {
        for bad in ["chartreuse-ish", "#12345", "#gg0000", ""] {
            let err = bad.parse::<SeriesColor>().unwrap_err();
            assert!(matches!(err, ConfigError::UnknownColor(_)), "{bad}");
        }
    }

    #[test]
    fn config_without_series_is_invalid() {
        let config = ChartConfig::new("Threads", "output.png");
        assert!(matches!(config.validate(), Err(ConfigError::NoSeries)));
    }

    #[test]
    fn zero_width_or_height_is_invalid() {
        for (width, height) in [(0, 600), (800, 0), (0, 0)] {
            let config = Preset::Threads.config("output.png").with_size(width, height);
            assert!(
                matches!(config.validate(), Err(ConfigError::EmptyCanvas { .. })),
                "{width}x{height}"
            );
        }
    }

    #[test]
    fn json_config_with_zero_width_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(
            &path,
            r#"{"category": "T", "width": 0, "series": [{"column": "Duration", "label": "d", "color": "blue"}]}"#,
        )
        .unwrap();

        let err = ChartConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCanvas { width: 0, height: 600 }));
    }

    #[test]
    fn presets_are_detected_from_headers() {
        assert_eq!(
            Preset::detect(&header(&["Threads", "Average Time (s)"])),
            Some(Preset::Threads)
        );
        assert_eq!(
            Preset::detect(&header(&["Experiment", "Scalar", "Vector"])),
            Some(Preset::ScalarVector)
        );
        assert_eq!(
            Preset::detect(&header(&["T", "Duration"])),
            Some(Preset::Duration)
        );
        assert_eq!(Preset::detect(&header(&["Experiment", "Scalar"])), None);
    }

    #[test]
    fn presets_are_valid() {
        for preset in Preset::ALL {
            let config = preset.config("output.png");
            config.validate().unwrap();
            assert_eq!(config.output_path, PathBuf::from("output.png"));
        }
        assert_eq!(Preset::Duration.config("output.png").width, 1600);
    }

    #[test]
    fn json_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(
            &path,
            r##"{
                "category": "Experiment",
                "series": [
                    {"column": "Scalar", "label": "scalar", "color": "blue"},
                    {"column": "Vector", "label": "vector", "color": "#d62728"}
                ],
                "y_label": "ms"
            }"##,
        )
        .unwrap();

        let config = ChartConfig::from_json_file(&path).unwrap();

        assert_eq!(config.required_columns(), vec!["Experiment", "Scalar", "Vector"]);
        assert_eq!(config.series[1].color.rgb(), (214, 39, 40));
        assert_eq!(config.output_path, PathBuf::from("output.png"));
        assert_eq!((config.width, config.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(config.x_label, "");
        assert_eq!(config.caption, None);
    }

    #[test]
    fn json_config_round_trips() {
        let config = Preset::ScalarVector
            .config("charts/scalar.png")
            .with_caption("Scalar vs vector");

        let json = serde_json::to_string(&config).unwrap();
        let back: ChartConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back, config);
    }

    #[test]
    fn json_config_with_bad_color_fails_to_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(
            &path,
            r#"{"category": "T", "series": [{"column": "Duration", "label": "d", "color": "mauve-ish"}]}"#,
        )
        .unwrap();

        let err = ChartConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn json_config_without_series_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        fs::write(&path, r#"{"category": "T", "series": []}"#).unwrap();

        let err = ChartConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NoSeries));
    }
}
