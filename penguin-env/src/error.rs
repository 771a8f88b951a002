//! Errors in the penguin environment.
use thiserror::Error;

/// Errors raised while validating configuration or decoding actions.
#[derive(Error, Debug, PartialEq)]
pub enum PenguinError {
    /// A placement wedge has inverted or negative bounds.
    #[error("Invalid wedge `{name}`: {reason}")]
    InvalidWedge {
        /// Name of the wedge in the configuration.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A scalar configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A discrete action branch holds a value outside its range.
    #[error("Invalid action: {0}")]
    InvalidAction(String),
}
