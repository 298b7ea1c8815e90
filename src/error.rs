//! Top-level error type with fix suggestions.

use crate::builder::BuildError;
use crate::emit::EmitError;
use crate::validate::ValidationError;
use crate::wizard::WizardError;
use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Debug, Error)]
pub enum DataflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FixSuggestion for DataflowError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            DataflowError::Validation(err) => err.fix_suggestion(),
            DataflowError::Build(BuildError::SourceCountOutOfRange { .. }) => {
                Some("Configure between 2 and 5 data sources")
            }
            DataflowError::Build(BuildError::DuplicateSource(_)) => {
                Some("Give each source a name that stays unique after sanitization")
            }
            DataflowError::Emit(EmitError::Write { .. }) => {
                Some("Check the output directory exists and is writable")
            }
            DataflowError::Emit(EmitError::Serialize(_)) => None,
            DataflowError::Wizard(WizardError::Eof) => {
                Some("Run the generator with a terminal attached, or pipe complete answers")
            }
            DataflowError::Wizard(WizardError::Io(_)) | DataflowError::Io(_) => None,
        }
    }
}

impl FixSuggestion for ValidationError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ValidationError::Required { .. } => Some("Enter a non-empty value"),
            ValidationError::InvalidFormat { field, .. } if *field == "workflow name" => {
                Some("Use only letters, numbers, underscores, and hyphens")
            }
            ValidationError::InvalidFormat { .. } => {
                Some("Enter an absolute URL or a plain number, depending on the question")
            }
            ValidationError::OutOfRange { .. } => Some("Stay within the stated bounds"),
            ValidationError::DisallowedScheme { .. } => Some("Use an http:// or https:// URL"),
            ValidationError::BlockedHost { .. } => {
                Some("Point the endpoint at a public host, not an internal one")
            }
        }
    }
}
