//! CSV Data Loader Module
//! Loads a benchmark results table into an immutable Dataset using Polars.

use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Ordered table of benchmark rows. Never modified after loading.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    /// Wrap an already built DataFrame.
    pub fn from_dataframe(df: DataFrame) -> Self {
        Self { df }
    }

    /// Load a comma-separated file with a header row.
    ///
    /// Schema inference is disabled, so every cell is kept as text exactly
    /// as written in the file. Numeric coercion is left to the processor.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let path = path.as_ref();

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::InputRead {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self { df })
    }

    /// Column names in header order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.df)
    }
}
