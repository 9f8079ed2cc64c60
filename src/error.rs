use std::path::PathBuf;

/// Errors raised when applying a connect-four move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid move: column {column} is not playable")]
    InvalidMove { column: usize },
}

/// Errors raised while building a search task from domain data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("grid must be square with a perfect-square side, got {rows}x{cols}")]
    GridShape { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) holds {value}, expected 0..={max}")]
    CellValue {
        row: usize,
        col: usize,
        value: u8,
        max: usize,
    },

    #[error("given {value} at ({row}, {col}) repeats in its row, column or box")]
    DuplicateGiven { row: usize, col: usize, value: u8 },

    #[error("job shop needs at least one machine")]
    NoMachines,

    #[error("total job duration exceeds {max}", max = u64::MAX)]
    DurationOverflow,

    #[error("distance matrix must be square and non-empty, row {row} has {len} entries for {size} cities")]
    MatrixShape { row: usize, len: usize, size: usize },

    #[error("city {city} is out of range for {size} cities")]
    CityOutOfRange { city: usize, size: usize },

    #[error("opponent opened with illegal column {column}")]
    IllegalOpening { column: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
