//! Static Chart Renderer
//! Turns a Dataset and a ChartConfig into a line chart saved as PNG.
//!
//! Layout:
//! 1. Optional caption centered on top
//! 2. One line per series over the shared category axis
//! 3. X ticks at the category values, in dataset order
//! 4. Axis labels and a legend box in the upper right corner
//!
//! Drawing goes into an in-memory RGB buffer first; the output file is
//! only touched once the whole chart has been drawn.

use crate::charts::{Figure, PlottedSeries, Tick};
use crate::config::{ChartConfig, ConfigError};
use crate::data::{DataProcessor, Dataset, ProcessorError};
use image::{ExtendedColorType, ImageError, ImageFormat};
use log::{debug, info};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::fmt::Display;
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

const FONT: &str = "sans-serif";
const LABEL_FONT_SIZE: u32 = 14;
const DESC_FONT_SIZE: u32 = 16;
const CAPTION_FONT_SIZE: u32 = 22;
const LINE_WIDTH: u32 = 2;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

fn draw_error(e: impl Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

/// Linear x axis whose bold key points are exactly the category positions.
struct CategoryAxis {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl CategoryAxis {
    fn new(range: Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            inner: range.into(),
            ticks,
        }
    }
}

impl Ranged for CategoryAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        // No light grid lines between categories
        if hint.weight().allow_light_points() {
            Vec::new()
        } else {
            self.ticks.clone()
        }
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render the configured chart and write it to `config.output_path`.
    ///
    /// Any existing file at that path is overwritten. On error nothing is
    /// written.
    pub fn render(dataset: &Dataset, config: &ChartConfig) -> Result<Figure, RenderError> {
        let figure = Self::build_figure(dataset, config)?;
        let pixels = Self::draw(&figure)?;
        Self::save_png(&figure, &pixels)?;

        info!(
            "Saved chart with {} series over {} categories to {}",
            figure.series.len(),
            figure.ticks.len(),
            figure.output_path.display()
        );
        Ok(figure)
    }

    /// Extract and lay out the chart data without drawing anything.
    pub fn build_figure(dataset: &Dataset, config: &ChartConfig) -> Result<Figure, RenderError> {
        config.validate()?;

        let categories = DataProcessor::category_values(dataset, &config.category)?;
        let positions = match DataProcessor::numeric_positions(&categories) {
            Some(positions) => positions,
            None => {
                debug!(
                    "Category column '{}' is not numeric, spacing values evenly",
                    config.category
                );
                (0..categories.len()).map(|i| i as f64).collect()
            }
        };

        let series = config
            .series
            .iter()
            .map(|spec| {
                let values = DataProcessor::numeric_values(dataset, &spec.column)?;
                Ok(PlottedSeries {
                    label: spec.label.clone(),
                    color: spec.color.clone(),
                    points: positions.iter().copied().zip(values).collect(),
                })
            })
            .collect::<Result<Vec<_>, ProcessorError>>()?;

        let ticks = positions
            .into_iter()
            .zip(categories)
            .map(|(position, label)| Tick { position, label })
            .collect();

        Ok(Figure {
            ticks,
            series,
            x_label: config.x_label.clone(),
            y_label: config.y_label.clone(),
            caption: config.caption.clone(),
            size: (config.width, config.height),
            output_path: config.output_path.clone(),
        })
    }

    /// Draw the figure into an RGB pixel buffer.
    fn draw(figure: &Figure) -> Result<Vec<u8>, RenderError> {
        let (width, height) = figure.size;
        let mut pixels = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_error)?;

            let (x_min, x_max) = figure.x_range();
            let (y_min, y_max) = figure.y_range();

            let mut builder = ChartBuilder::on(&root);
            builder
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(70);
            if let Some(caption) = &figure.caption {
                builder.caption(caption, (FONT, CAPTION_FONT_SIZE));
            }

            let mut chart = builder
                .build_cartesian_2d(
                    CategoryAxis::new(x_min..x_max, figure.tick_positions()),
                    y_min..y_max,
                )
                .map_err(draw_error)?;

            let x_formatter = |x: &f64| figure.tick_label(*x).unwrap_or_default().to_string();
            chart
                .configure_mesh()
                .light_line_style(&TRANSPARENT)
                .bold_line_style(RGBColor(200, 200, 200).stroke_width(1))
                .x_labels(figure.ticks.len().max(1))
                .y_labels(10)
                .x_label_formatter(&x_formatter)
                .label_style((FONT, LABEL_FONT_SIZE))
                .axis_desc_style((FONT, DESC_FONT_SIZE))
                .x_desc(figure.x_label.as_str())
                .y_desc(figure.y_label.as_str())
                .draw()
                .map_err(draw_error)?;

            for series in &figure.series {
                let (r, g, b) = series.color.rgb();
                let color = RGBColor(r, g, b);

                chart
                    .draw_series(LineSeries::new(
                        series.points.iter().copied(),
                        color.stroke_width(LINE_WIDTH),
                    ))
                    .map_err(draw_error)?
                    .label(series.label.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                    });
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font((FONT, LABEL_FONT_SIZE))
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(draw_error)?;

            root.present().map_err(draw_error)?;
        }

        Ok(pixels)
    }

    /// Encode the pixels as PNG over the configured output path.
    fn save_png(figure: &Figure, pixels: &[u8]) -> Result<(), RenderError> {
        let (width, height) = figure.size;

        image::save_buffer_with_format(
            &figure.output_path,
            pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
            ImageFormat::Png,
        )
        .map_err(|source| RenderError::OutputWrite {
            path: figure.output_path.clone(),
            source,
        })
    }
}
