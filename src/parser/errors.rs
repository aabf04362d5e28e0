use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("File is empty")]
    Empty,
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
    #[error("Invalid value for column [{column}] on line {line}: {message}")]
    InvalidField {
        line: u64,
        column: &'static str,
        message: String
    },
    #[error("{0}")]
    Csv(#[from] csv::Error)
}
