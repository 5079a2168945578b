use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SavingsError {
    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("no yearly assumption for year {year}")]
    MissingAssumption {
        year: i32,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },
}

impl SavingsError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        SavingsError::InvalidInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SavingsError>;
