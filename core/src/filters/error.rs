//! Error types for selection input

use thiserror::Error;

/// Rejected user input at the selection boundary
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("age '{value}' is not a number")]
    InvalidAge {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("training period '{value}' is not an integer")]
    InvalidPeriod { value: String },
}
