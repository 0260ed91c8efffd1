//! Data module - CSV loading and column extraction

mod loader;
mod processor;

pub use loader::{Dataset, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
