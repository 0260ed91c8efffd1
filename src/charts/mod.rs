//! Charts module - Figure model and static rendering

mod figure;
mod renderer;

pub use figure::{Figure, PlottedSeries, Tick};
pub use renderer::{ChartRenderer, RenderError};
