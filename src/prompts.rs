//! Instruction templates embedded in generated agent tasks.
//!
//! Pure string formatting. Every interpolated value must already be
//! post-sanitization (`SourceName`) or a fixed literal; raw user input never
//! reaches these functions. `{{ ... }}` expressions are left for the
//! executing engine to evaluate.

use crate::source::SourceKind;
use crate::validate::SourceName;

/// Role instruction for a per-source summarization agent.
pub fn summarize_system_message(kind: SourceKind, name: &SourceName) -> String {
    format!(
        r#"You are a specialized {kind} data analyst. Your role is to:
1. Analyze the provided data from {name}
2. Extract key metrics and values
3. Identify any anomalies or unexpected patterns
4. Format response as valid JSON

Always respond in this JSON structure:
{{
  "summary": "brief 1-2 sentence summary",
  "key_metrics": {{"metric1": "value1", "metric2": "value2"}},
  "anomalies": ["anomaly1", "anomaly2"],
  "confidence": 0.95,
  "source": "{name}"
}}"#
    )
}

/// Prompt for a per-source summarization agent, referencing the preceding
/// fetch task's output with a textual fallback.
pub fn summarize_prompt(kind: SourceKind, fetch_task_id: &str) -> String {
    format!(
        r#"Analyze this {kind} data and provide structured summary:
{{{{ outputs.{fetch_task_id}.body | default('No data received') }}}}

Focus on: trends, critical values, and any unusual patterns."#
    )
}

/// Role instruction for the synthesis/decision agent.
pub fn synthesis_system_message(source_count: usize) -> String {
    format!(
        r#"You are an AUTONOMOUS DECISION-MAKING AGENT with deep analytical capabilities.

You have received summaries from {source_count} independent data sources.

Your responsibilities:
- Synthesize insights from all {source_count} sources
- Identify correlations and patterns across sources
- Detect anomalies that require immediate action
- Recommend specific actions with confidence scores
- Prioritize multiple decisions by impact

CRITICAL: Always respond ONLY with valid JSON in this exact structure:
{{
  "analysis_timestamp": "ISO-8601 timestamp",
  "overall_status": "critical|warning|normal",
  "confidence_score": 0.95,
  "key_findings": [
    {{
      "finding": "description",
      "source": "which data source(s)",
      "severity": "high|medium|low"
    }}
  ],
  "autonomous_decision": "specific action to execute",
  "recommended_actions": [
    {{
      "action": "description",
      "priority": "high|medium|low",
      "estimated_impact": "description"
    }}
  ],
  "reasoning": "step-by-step explanation of decision"
}}"#
    )
}

/// Prompt for the synthesis agent: one output reference per summarize task,
/// in source order.
pub fn synthesis_prompt(source_names: &[&SourceName]) -> String {
    let summary_refs = source_names
        .iter()
        .map(|name| format!("- {name}: {{{{ outputs.summarize_{name}.output }}}}"))
        .collect::<Vec<_>>()
        .join("\n");
    let count = source_names.len();

    format!(
        r#"Synthesize all data source summaries and make autonomous decisions:

{summary_refs}

Tasks:
1. Cross-reference all {count} summaries
2. Identify any patterns appearing in multiple sources
3. Detect anomalies requiring attention
4. Make specific autonomous decisions
5. Rate confidence in your decision (0-1)

Respond ONLY with the JSON structure specified in your system message."#
    )
}

/// Message for the decision-log task that echoes the synthesis output.
pub fn decision_log_message() -> String {
    r#"DECISION EXECUTION LOG
Timestamp: {{ now() }}
Decision: {{ outputs.synthesis_decision_agent.output }}"#
        .to_string()
}

/// Placeholder message for Database sources (no driver wired).
pub fn database_placeholder_message(name: &SourceName) -> String {
    format!("Database query simulation for {name} - timestamp: {{{{ now() }}}}")
}

/// Placeholder message for Custom sources.
pub fn custom_placeholder_message(name: &SourceName) -> String {
    format!("Custom data source: {name}")
}
