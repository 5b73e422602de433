//! Errors raised while normalizing provider samples.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("sample {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("sample {index}: cloud coverage {value}% is outside 0-100")]
    CloudOutOfRange { index: usize, value: i64 },

    #[error("sample {index}: invalid precipitation amount {value}")]
    InvalidPrecipitation { index: usize, value: f64 },

    #[error("sample {index}: temperature is not a finite number")]
    InvalidTemperature { index: usize },
}

impl ExtractError {
    /// Position of the offending sample in the source sequence.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::MissingField { index, .. }
            | Self::CloudOutOfRange { index, .. }
            | Self::InvalidPrecipitation { index, .. }
            | Self::InvalidTemperature { index } => *index,
        }
    }

    /// User-friendly error message for display.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "The weather provider returned incomplete forecast data. Please try again later."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_field_and_index() {
        let err = ExtractError::MissingField {
            index: 7,
            field: "temperature",
        };
        let msg = err.to_string();
        assert!(msg.contains("sample 7"));
        assert!(msg.contains("temperature"));
        assert_eq!(err.index(), 7);
    }

    #[test]
    fn test_user_message_is_non_empty() {
        assert!(!ExtractError::InvalidTemperature { index: 0 }
            .user_message()
            .is_empty());
    }
}
