use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for duosql
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid query parameter: \"{parameter}\" should be a non-empty list of strings")]
    EmptyQueryParameter { parameter: &'static str },

    #[error("Returning rows on MySQL requires a unique column to use as the primary key")]
    MissingPrimaryKey,

    #[error("Unsupported database URI scheme: \"{scheme}\"")]
    UnsupportedScheme { scheme: String },

    #[error("Invalid database URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Error while processing query \"{sql}\": {message}")]
    QueryExecution { sql: String, message: String },

    #[error("Failed to decode column \"{column}\": {message}")]
    Decode { column: String, message: String },
}

impl Error {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn query_execution(sql: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::QueryExecution {
            sql: sql.into(),
            message: err.to_string(),
        }
    }

    pub fn decode(column: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            column: column.into(),
            message: err.to_string(),
        }
    }
}
