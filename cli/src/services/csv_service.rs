use crate::{
    models::{PriceHistory, RawPriceRow},
    utils::{Logger, Timer},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Close", "vol_20d", "future_5d_return"];

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("invalid date '{value}' on row {row}")]
    InvalidDate { row: usize, value: String },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads the feature export CSV into a chronologically sorted history
pub struct CsvHistoryService {
    path: PathBuf,
    logger: Logger,
}

impl CsvHistoryService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            logger: Logger::new("CSV_SERVICE"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<PriceHistory, DataLoadError> {
        let timer = Timer::start(&format!("load {}", self.path.display()));
        self.logger.info(&format!("Loading price history from {}", self.path.display()));

        let content = fs::read_to_string(&self.path).map_err(|source| DataLoadError::Io {
            path: self.path.clone(),
            source,
        })?;

        let history = parse_csv_content(&content)?;

        self.logger.info(&format!(
            "Loaded {} rows ({} to {})",
            history.len(),
            history.first_date().unwrap_or("-"),
            history.last_date().unwrap_or("-"),
        ));
        timer.log_elapsed("CSV_SERVICE");

        Ok(history)
    }
}

/// Parse CSV content with a header row; extra columns are ignored
pub fn parse_csv_content(content: &str) -> Result<PriceHistory, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn(column.to_string()));
        }
    }

    let mut points = Vec::new();
    for (index, record) in reader.deserialize::<RawPriceRow>().enumerate() {
        let raw = record?;
        // Header is line 1
        let point = raw.to_price_point().map_err(|_| DataLoadError::InvalidDate {
            row: index + 2,
            value: raw.date.clone(),
        })?;
        points.push(point);
    }

    Ok(PriceHistory::from_points(points))
}
