//! Serde model of the emitted workflow document.
//!
//! The document targets a Kestra-style engine: a flat preamble, a single
//! schedule trigger, and an ordered task list where each task carries a
//! plugin `type` string plus type-specific fields. Built once, never mutated
//! after construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Namespace every generated workflow lands in.
pub const NAMESPACE: &str = "dataflow";

/// Document format version.
pub const VERSION: &str = "1.0";

/// Fixed schedule for the single trigger: every five minutes.
pub const SCHEDULE_CRON: &str = "*/5 * * * *";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDocument {
    pub id: String,
    pub namespace: String,
    pub version: String,
    pub description: String,
    pub triggers: Vec<Trigger>,
    pub tasks: Vec<TaskDescriptor>,
}

impl WorkflowDocument {
    /// Iterate task ids in document order.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    #[serde(rename = "type")]
    pub trigger_type: String,
    pub cron: String,
}

impl Trigger {
    /// The fixed schedule trigger carried by every generated document.
    pub fn schedule() -> Self {
        Trigger {
            id: "scheduled_trigger".to_string(),
            trigger_type: "io.kestra.plugin.core.trigger.Schedule".to_string(),
            cron: SCHEDULE_CRON.to_string(),
        }
    }
}

/// One step in the task list: an id plus a typed action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub id: String,
    #[serde(flatten)]
    pub action: TaskAction,
}

/// The action shapes the generator emits. The serde tag carries the engine
/// plugin type string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TaskAction {
    /// HTTP request step (REST API and WebSocket sources).
    #[serde(rename = "io.kestra.plugin.core.http.Request")]
    HttpRequest {
        url: String,
        method: String,
        /// Empty for unauthenticated sources; otherwise a single
        /// Authorization entry referencing a secret by name.
        headers: BTreeMap<String, String>,
        timeout: String,
        #[serde(rename = "errorOnEmptyResponse")]
        error_on_empty_response: bool,
    },

    /// HTTP download step (CSV file sources).
    #[serde(rename = "io.kestra.plugin.core.http.Download")]
    HttpDownload { uri: String, timeout: String },

    /// Log step: placeholder fetches and the decision echo.
    #[serde(rename = "io.kestra.plugin.core.log.Log")]
    Log { message: String },

    /// AI agent step: an opaque instruction pair the engine dispatches to an
    /// external text-generation capability.
    #[serde(rename = "io.kestra.plugin.ai.agent.AIAgent")]
    Agent {
        #[serde(rename = "systemMessage")]
        system_message: String,
        prompt: String,
    },
}

impl TaskAction {
    pub fn is_agent(&self) -> bool {
        matches!(self, TaskAction::Agent { .. })
    }
}
