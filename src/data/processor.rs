//! Data Processor Module
//! Extracts the category axis and numeric series columns from a Dataset.

use super::Dataset;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },
    #[error("Column '{column}', row {row}: '{value}' is not a finite number")]
    ValueCoercion {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Column extraction over a loaded Dataset. Row order is always preserved.
pub struct DataProcessor;

impl DataProcessor {
    /// Category values as text, in row order. Nulls become empty labels.
    pub fn category_values(dataset: &Dataset, column: &str) -> Result<Vec<String>, ProcessorError> {
        let text = Self::text_column(dataset, column)?;

        let values = text
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()).unwrap_or_default())
            .collect();
        Ok(values)
    }

    /// Values of a series column coerced to `f64`, in row order.
    ///
    /// Fails on the first null, non-numeric or non-finite cell.
    pub fn numeric_values(dataset: &Dataset, column: &str) -> Result<Vec<f64>, ProcessorError> {
        let text = Self::text_column(dataset, column)?;

        let values = text
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                let raw = v.unwrap_or("null");
                Self::parse_number(raw).ok_or_else(|| ProcessorError::ValueCoercion {
                    column: column.to_string(),
                    row,
                    value: raw.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        Ok(values)
    }

    /// Numeric positions for the category values, if every one of them parses.
    pub fn numeric_positions(categories: &[String]) -> Option<Vec<f64>> {
        if categories.is_empty() {
            return None;
        }
        categories.iter().map(|c| Self::parse_number(c)).collect()
    }

    fn parse_number(raw: &str) -> Option<f64> {
        raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Column cast to text whatever its stored dtype.
    fn text_column(dataset: &Dataset, column: &str) -> Result<StringChunked, ProcessorError> {
        let col = dataset
            .dataframe()
            .column(column)
            .map_err(|_| ProcessorError::ColumnNotFound {
                column: column.to_string(),
            })?;

        let text = col.cast(&DataType::String)?;
        let chunked = text.str()?.clone();
        Ok(chunked)
    }
}
