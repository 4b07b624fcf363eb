use thiserror::Error;

/// Validation errors raised before any remote work is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("stock code cannot be empty")]
    EmptyStockCode,
    #[error("unsupported stock code '{value}', expected forms like sh.600000, 600000 or 000001.SZ")]
    InvalidStockCode { value: String },

    #[error("{field} must be a YYYY-MM-DD date: '{value}'")]
    InvalidDate { field: &'static str, value: String },
    #[error("year must be a 4-digit number: '{value}'")]
    InvalidYear { value: String },
    #[error("quarter must be between 1 and 4, got {value}")]
    InvalidQuarter { value: u8 },

    #[error(
        "invalid indicator family '{value}', expected one of profit, operation, growth, balance, cashflow, dupont"
    )]
    InvalidFamily { value: String },

    #[error("limit must be greater than zero")]
    InvalidLimit,
}
