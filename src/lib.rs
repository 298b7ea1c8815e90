//! DataFlow - workflow document generator for multi-source data aggregation

pub mod builder;
pub mod document;
pub mod emit;
pub mod error;
pub mod prompts;
pub mod server;
pub mod source;
pub mod validate;
pub mod wizard;

pub use builder::{BuildError, DocumentBuilder};
pub use document::{TaskAction, TaskDescriptor, Trigger, WorkflowDocument};
pub use emit::EmitError;
pub use error::{DataflowError, FixSuggestion};
pub use source::{AuthMode, DataSource, SourceKind};
pub use validate::{Endpoint, SourceCount, SourceName, ValidationError, WorkflowName};
pub use wizard::{GeneratorConfig, Wizard, WizardError};
