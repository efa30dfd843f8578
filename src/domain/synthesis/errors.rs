//! Synthesis Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisValidationError {
    #[error("Text is required.")]
    EmptyText,

    #[error("Text exceeds {max} characters (got {actual}).")]
    TextTooLong { max: usize, actual: usize },

    #[error("Speaking rate must be between {min} and {max} (got {actual}).")]
    SpeedOutOfRange { min: f64, max: f64, actual: f64 },

    #[error("Pitch must be between {min} and {max} (got {actual}).")]
    PitchOutOfRange { min: f64, max: f64, actual: f64 },

    #[error("Voice {voice} is not available for {language}.")]
    UnknownVoice { voice: String, language: String },
}
