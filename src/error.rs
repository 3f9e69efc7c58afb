use thiserror::Error;

use crate::core::{ScenarioError, ValidationError};
use crate::source::SourceError;

/// Everything that can stop a projection request from completing.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("invalid profile: {0}")]
    Validation(#[from] ValidationError),
    #[error("invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),
}
