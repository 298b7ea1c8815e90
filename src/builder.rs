//! Document builder: validated inputs in, one workflow document out.
//!
//! Purely in-memory construction. Given identical inputs the output is
//! byte-identical; embedded `{{ now() }}` placeholders are left as template
//! expressions for the engine.

use crate::document::{TaskAction, TaskDescriptor, Trigger, WorkflowDocument, NAMESPACE, VERSION};
use crate::prompts;
use crate::source::{DataSource, SourceKind};
use crate::validate::{SourceCount, WorkflowName};
use std::collections::BTreeMap;
use std::collections::HashSet;
use thiserror::Error;

/// Task id of the synthesis agent, when requested.
pub const SYNTHESIS_TASK_ID: &str = "synthesis_decision_agent";

/// Task id of the decision-log echo, when synthesis is requested.
pub const DECISION_LOG_TASK_ID: &str = "execute_decision_log";

const FETCH_TIMEOUT: &str = "PT30S";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("workflow needs between {min} and {max} data sources, got {got}")]
    SourceCountOutOfRange { got: usize, min: usize, max: usize },

    /// Two sources collapsed to the same sanitized name, which would break
    /// task-id uniqueness (`fetch_{name}` / `summarize_{name}`).
    #[error("duplicate source name '{0}' after sanitization")]
    DuplicateSource(String),
}

/// Builds one immutable [`WorkflowDocument`] from interview results.
pub struct DocumentBuilder {
    name: WorkflowName,
    sources: Vec<DataSource>,
    include_synthesis: bool,
}

impl DocumentBuilder {
    pub fn new(name: WorkflowName) -> Self {
        Self {
            name,
            sources: Vec::new(),
            include_synthesis: false,
        }
    }

    /// Add one configured source. Order of calls is preserved in the output.
    pub fn source(mut self, source: DataSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn sources(mut self, sources: impl IntoIterator<Item = DataSource>) -> Self {
        self.sources.extend(sources);
        self
    }

    pub fn synthesis(mut self, include: bool) -> Self {
        self.include_synthesis = include;
        self
    }

    /// Secret names the engine must provide at execution time, in source
    /// order.
    pub fn required_secrets(&self) -> Vec<String> {
        self.sources
            .iter()
            .filter_map(DataSource::secret_name)
            .collect()
    }

    /// Assemble the document. Task order is fetch/summarize per source, then
    /// optionally the synthesis agent and its decision log.
    pub fn build(self) -> Result<WorkflowDocument, BuildError> {
        let count = self.sources.len();
        if count < SourceCount::MIN as usize || count > SourceCount::MAX as usize {
            return Err(BuildError::SourceCountOutOfRange {
                got: count,
                min: SourceCount::MIN as usize,
                max: SourceCount::MAX as usize,
            });
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source.name.as_str()) {
                return Err(BuildError::DuplicateSource(source.name.to_string()));
            }
        }

        let mut tasks = Vec::with_capacity(2 * count + 2);
        for source in &self.sources {
            tasks.push(fetch_task(source));
            tasks.push(summarize_task(source));
        }

        if self.include_synthesis {
            let names: Vec<_> = self.sources.iter().map(|s| &s.name).collect();
            tasks.push(TaskDescriptor {
                id: SYNTHESIS_TASK_ID.to_string(),
                action: TaskAction::Agent {
                    system_message: prompts::synthesis_system_message(count),
                    prompt: prompts::synthesis_prompt(&names),
                },
            });
            tasks.push(TaskDescriptor {
                id: DECISION_LOG_TASK_ID.to_string(),
                action: TaskAction::Log {
                    message: prompts::decision_log_message(),
                },
            });
        }

        Ok(WorkflowDocument {
            id: self.name.as_str().to_string(),
            namespace: NAMESPACE.to_string(),
            version: VERSION.to_string(),
            description: format!(
                "Multi-source data aggregation workflow with {count} sources"
            ),
            triggers: vec![Trigger::schedule()],
            tasks,
        })
    }
}

/// One fetch task, shaped by the source kind.
fn fetch_task(source: &DataSource) -> TaskDescriptor {
    let id = format!("fetch_{}", source.name);

    let action = match source.kind {
        SourceKind::RestApi => {
            let mut headers = BTreeMap::new();
            if let Some(secret) = source.secret_name() {
                headers.insert(
                    "Authorization".to_string(),
                    format!("{{{{ secret('{secret}') }}}}"),
                );
            }
            TaskAction::HttpRequest {
                url: source.endpoint.as_str().to_string(),
                method: "GET".to_string(),
                headers,
                timeout: FETCH_TIMEOUT.to_string(),
                error_on_empty_response: false,
            }
        }
        SourceKind::CsvFile => TaskAction::HttpDownload {
            uri: source.endpoint.as_str().to_string(),
            timeout: FETCH_TIMEOUT.to_string(),
        },
        // WebSocket sources fetch over plain HTTP GET, unauthenticated
        SourceKind::WebSocket => TaskAction::HttpRequest {
            url: source.endpoint.as_str().to_string(),
            method: "GET".to_string(),
            headers: BTreeMap::new(),
            timeout: FETCH_TIMEOUT.to_string(),
            error_on_empty_response: false,
        },
        SourceKind::Database => TaskAction::Log {
            message: prompts::database_placeholder_message(&source.name),
        },
        SourceKind::Custom => TaskAction::Log {
            message: prompts::custom_placeholder_message(&source.name),
        },
    };

    TaskDescriptor { id, action }
}

/// The summarization agent paired with a fetch task.
fn summarize_task(source: &DataSource) -> TaskDescriptor {
    let fetch_id = format!("fetch_{}", source.name);
    TaskDescriptor {
        id: format!("summarize_{}", source.name),
        action: TaskAction::Agent {
            system_message: prompts::summarize_system_message(source.kind, &source.name),
            prompt: prompts::summarize_prompt(source.kind, &fetch_id),
        },
    }
}
