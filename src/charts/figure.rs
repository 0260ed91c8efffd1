//! Figure Module
//! In-memory description of a rendered line chart.

use crate::config::SeriesColor;
use std::path::PathBuf;

/// Matching tolerance between a tick position and an axis value
const TICK_EPSILON: f64 = 1e-9;

/// One x-axis tick: where it sits and what it reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// One plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedSeries {
    pub label: String,
    pub color: SeriesColor,
    pub points: Vec<(f64, f64)>,
}

/// The chart as drawn and saved by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub ticks: Vec<Tick>,
    pub series: Vec<PlottedSeries>,
    pub x_label: String,
    pub y_label: String,
    pub caption: Option<String>,
    pub size: (u32, u32),
    pub output_path: PathBuf,
}

impl Figure {
    pub fn tick_labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.as_str()).collect()
    }

    pub fn tick_positions(&self) -> Vec<f64> {
        self.ticks.iter().map(|t| t.position).collect()
    }

    /// Label of the tick at `x`, if there is one.
    pub fn tick_label(&self, x: f64) -> Option<&str> {
        self.ticks
            .iter()
            .find(|t| (t.position - x).abs() <= TICK_EPSILON * t.position.abs().max(1.0))
            .map(|t| t.label.as_str())
    }

    /// X range covering every tick, padded by 5% on each side.
    pub fn x_range(&self) -> (f64, f64) {
        let (min, max) = Self::bounds(self.ticks.iter().map(|t| t.position));
        Self::pad(min, max, 0.05)
    }

    /// Y range covering every plotted value, padded by 10% on each side.
    pub fn y_range(&self) -> (f64, f64) {
        let values = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y));
        let (min, max) = Self::bounds(values);
        Self::pad(min, max, 0.10)
    }

    fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
        values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(v), max.max(v))
        })
    }

    fn pad(min: f64, max: f64, fraction: f64) -> (f64, f64) {
        if min > max {
            return (0.0, 1.0);
        }
        let span = max - min;
        if span == 0.0 {
            return (min - 1.0, max + 1.0);
        }
        (min - span * fraction, max + span * fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure(ticks: &[(f64, &str)], ys: &[f64]) -> Figure {
        let ticks: Vec<Tick> = ticks
            .iter()
            .map(|&(position, label)| Tick {
                position,
                label: label.to_string(),
            })
            .collect();
        let points = ticks.iter().map(|t| t.position).zip(ys.iter().copied()).collect();
        Figure {
            ticks,
            series: vec![PlottedSeries {
                label: "time".to_string(),
                color: "blue".parse().unwrap(),
                points,
            }],
            x_label: String::new(),
            y_label: String::new(),
            caption: None,
            size: (800, 600),
            output_path: PathBuf::from("output.png"),
        }
    }

    #[test]
    fn tick_label_finds_exact_positions_only() {
        let fig = figure(&[(1.0, "1"), (2.0, "2"), (16.0, "16")], &[3.0, 2.0, 1.0]);
        assert_eq!(fig.tick_label(16.0), Some("16"));
        assert_eq!(fig.tick_label(1.5), None);
    }

    #[test]
    fn ranges_are_padded() {
        let fig = figure(&[(0.0, "0"), (10.0, "10")], &[100.0, 200.0]);
        assert_eq!(fig.x_range(), (-0.5, 10.5));
        assert_eq!(fig.y_range(), (90.0, 210.0));
    }

    #[test]
    fn flat_and_empty_ranges_stay_drawable() {
        let single = figure(&[(4.0, "4")], &[2.5]);
        assert_eq!(single.x_range(), (3.0, 5.0));
        assert_eq!(single.y_range(), (1.5, 3.5));

        let empty = figure(&[], &[]);
        assert_eq!(empty.x_range(), (0.0, 1.0));
        assert_eq!(empty.y_range(), (0.0, 1.0));
    }
}
