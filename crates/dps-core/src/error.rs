use thiserror::Error;

pub type DpsResult<T> = Result<T, DpsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DpsError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Not a number for {what}: {text:?}")]
    NotANumber { what: &'static str, text: String },

    #[error("Empty entry for {what}")]
    Empty { what: &'static str },
}
