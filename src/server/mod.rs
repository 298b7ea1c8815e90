//! Mock orchestrator: the demo surface behind `dataflow serve`.
//!
//! Periodically fans out HTTP GETs to the public-API catalog, renders one
//! canned summary per reachable source, fabricates an aggregate decision,
//! and exposes everything over a small JSON API. The in-memory store is a
//! single-process, single-writer demo store: each poll cycle overwrites the
//! summaries wholesale. Failed fetches are logged and skipped; there is no
//! retry and no cancellation once a cycle starts.

pub mod catalog;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

use catalog::{summarize, SourceSummary, CATALOG};

const POLL_INTERVAL: Duration = Duration::from_secs(30);
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
struct AppState {
    store: Arc<RwLock<Store>>,
    client: reqwest::Client,
    started: Instant,
}

#[derive(Default)]
struct Store {
    executions: Vec<ExecutionRecord>,
    summaries: Vec<SourceSummary>,
    latest_decision: Option<Decision>,
}

#[derive(Debug, Clone, Serialize)]
struct ExecutionRecord {
    id: String,
    namespace: String,
    #[serde(rename = "flowId")]
    flow_id: String,
    state: String,
    #[serde(rename = "startDate")]
    start_date: String,
    #[serde(rename = "endDate")]
    end_date: String,
}

/// The fabricated aggregate decision served by `/api/v1/decisions/latest`.
#[derive(Debug, Clone, Serialize)]
struct Decision {
    decision: String,
    confidence: f64,
    reasoning: String,
    timestamp: String,
    actions: Vec<String>,
    sources_analyzed: usize,
    avg_confidence: f64,
}

/// Run the mock orchestrator until the process is killed.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .user_agent("dataflow-mock-orchestrator")
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let state = AppState {
        store: Arc::new(RwLock::new(Store::default())),
        client,
        started: Instant::now(),
    };

    // First tick fires immediately, so one cycle runs at startup.
    let poll_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(POLL_INTERVAL);
        loop {
            interval.tick().await;
            execute_cycle(&poll_state).await;
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "mock orchestrator listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/v1/health", get(health))
        .route("/api/v1/executions", get(executions))
        .route("/api/v1/summaries", get(summaries))
        .route("/api/v1/decisions/latest", get(latest_decision))
        .route("/api/v1/execute", post(execute))
        .fallback(not_found)
        .with_state(state)
}

/// One poll cycle: unordered fan-out over the catalog, keep successes, log
/// failures, overwrite the store wholesale.
async fn execute_cycle(state: &AppState) -> String {
    let started_at = Utc::now();
    let execution_id = format!("exec_{}", started_at.timestamp_millis());
    tracing::info!(execution = %execution_id, "executing poll cycle");

    let fetches = CATALOG.iter().map(|source| {
        let client = state.client.clone();
        async move { (source.key, fetch_json(&client, source.url).await) }
    });

    let mut summaries = Vec::new();
    for (key, result) in join_all(fetches).await {
        match result {
            Ok(data) => {
                let summary = summarize(key, &data);
                tracing::info!(source = key, summary = %summary.summary, "source summarized");
                summaries.push(summary);
            }
            Err(err) => tracing::warn!(source = key, error = %err, "fetch failed"),
        }
    }

    let decision = synthesize_decision(&summaries);
    let record = ExecutionRecord {
        id: execution_id.clone(),
        namespace: "dataflow".to_string(),
        flow_id: "real_data_aggregation".to_string(),
        state: "SUCCESS".to_string(),
        start_date: started_at.to_rfc3339(),
        end_date: Utc::now().to_rfc3339(),
    };

    let mut store = state.store.write().await;
    store.summaries = summaries;
    store.latest_decision = Some(decision);
    store.executions.push(record);

    execution_id
}

async fn fetch_json(client: &reqwest::Client, url: &str) -> Result<Value, reqwest::Error> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

fn synthesize_decision(summaries: &[SourceSummary]) -> Decision {
    let count = summaries.len();
    let avg_confidence = if count == 0 {
        0.0
    } else {
        summaries.iter().map(|s| s.confidence).sum::<f64>() / count as f64
    };

    let (decision, reasoning) = if count == 0 {
        (
            "No data sources reachable".to_string(),
            "All catalog fetches failed this cycle; retry on the next poll.".to_string(),
        )
    } else {
        (
            "All systems operational".to_string(),
            format!(
                "Analyzed {count} data sources. All sources reporting healthy status. \
                 No critical alerts detected."
            ),
        )
    };

    Decision {
        decision,
        confidence: 0.95,
        reasoning,
        timestamp: Utc::now().to_rfc3339(),
        actions: vec![
            "Continue normal monitoring".to_string(),
            "No immediate action required".to_string(),
            "Review metrics in 5 minutes".to_string(),
        ],
        sources_analyzed: count,
        avg_confidence,
    }
}

// ─── Handlers ────────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "uptime": state.started.elapsed().as_secs_f64(),
    }))
}

async fn executions(State(state): State<AppState>) -> Json<Vec<ExecutionRecord>> {
    Json(state.store.read().await.executions.clone())
}

async fn summaries(State(state): State<AppState>) -> Json<Vec<SourceSummary>> {
    Json(state.store.read().await.summaries.clone())
}

async fn latest_decision(State(state): State<AppState>) -> Json<Option<Decision>> {
    Json(state.store.read().await.latest_decision.clone())
}

async fn execute(State(state): State<AppState>) -> Json<Value> {
    let execution_id = execute_cycle(&state).await;
    Json(json!({ "status": "started", "execution_id": execution_id }))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.read().await;
    Html(format!(
        r#"<html>
  <head><title>DataFlow Mock Orchestrator</title></head>
  <body>
    <h1>DataFlow Mock Orchestrator</h1>
    <ul>
      <li><a href="/api/v1/health">GET /api/v1/health</a></li>
      <li><a href="/api/v1/summaries">GET /api/v1/summaries</a></li>
      <li><a href="/api/v1/decisions/latest">GET /api/v1/decisions/latest</a></li>
      <li><a href="/api/v1/executions">GET /api/v1/executions</a></li>
      <li>POST /api/v1/execute</li>
    </ul>
    <p>Executions: {} | Summaries: {}</p>
  </body>
</html>"#,
        store.executions.len(),
        store.summaries.len(),
    ))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(confidence: f64) -> SourceSummary {
        let mut summary = summarize(
            "weather",
            &json!({ "current": { "temperature_2m": 20.0, "wind_speed_10m": 5.0 } }),
        );
        summary.confidence = confidence;
        summary
    }

    #[test]
    fn decision_averages_confidence_over_sources() {
        let decision = synthesize_decision(&[summary(0.9), summary(0.7)]);
        assert_eq!(decision.sources_analyzed, 2);
        assert!((decision.avg_confidence - 0.8).abs() < 1e-9);
        assert_eq!(decision.decision, "All systems operational");
    }

    #[test]
    fn decision_with_no_sources_does_not_divide_by_zero() {
        let decision = synthesize_decision(&[]);
        assert_eq!(decision.sources_analyzed, 0);
        assert_eq!(decision.avg_confidence, 0.0);
        assert!(decision.decision.contains("No data sources"));
    }

    #[tokio::test]
    async fn store_overwrite_is_wholesale() {
        let store = Arc::new(RwLock::new(Store::default()));
        {
            let mut s = store.write().await;
            s.summaries = vec![summary(0.9), summary(0.8), summary(0.7)];
        }
        {
            let mut s = store.write().await;
            s.summaries = vec![summary(0.5)];
        }
        assert_eq!(store.read().await.summaries.len(), 1);
    }
}
