//! Demo source catalog and per-source summary formatting.
//!
//! The mock orchestrator polls a fixed set of public APIs and renders a
//! canned summary per source. Formatting is total over missing fields: a
//! payload that lacks the expected shape degrades to `n/a` values instead of
//! failing the cycle.

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

pub struct CatalogSource {
    pub key: &'static str,
    pub url: &'static str,
}

/// The fixed catalog the poll cycle fans out over.
pub const CATALOG: &[CatalogSource] = &[
    CatalogSource {
        key: "weather",
        url: "https://api.open-meteo.com/v1/forecast?latitude=52.52&longitude=13.41&current=temperature_2m,wind_speed_10m",
    },
    CatalogSource {
        key: "crypto",
        url: "https://api.coinbase.com/v2/prices/BTC-USD/spot",
    },
    CatalogSource {
        key: "github",
        url: "https://api.github.com/repos/kestra-io/kestra",
    },
    CatalogSource {
        key: "posts",
        url: "https://jsonplaceholder.typicode.com/posts?_limit=5",
    },
    CatalogSource {
        key: "users",
        url: "https://randomuser.me/api/?results=3",
    },
];

/// One rendered source summary, as served by `/api/v1/summaries`.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSummary {
    pub name: String,
    pub status: String,
    pub summary: String,
    pub confidence: f64,
    pub timestamp: String,
    pub metrics: Value,
}

impl SourceSummary {
    fn new(name: &str, summary: String, confidence: f64, metrics: Value) -> Self {
        SourceSummary {
            name: name.to_string(),
            status: "active".to_string(),
            summary,
            confidence,
            timestamp: Utc::now().to_rfc3339(),
            metrics,
        }
    }
}

/// Render the canned summary for one catalog source.
pub fn summarize(key: &str, data: &Value) -> SourceSummary {
    match key {
        "weather" => {
            let temperature = data.pointer("/current/temperature_2m").and_then(Value::as_f64);
            let wind = data.pointer("/current/wind_speed_10m").and_then(Value::as_f64);
            SourceSummary::new(
                "Weather API",
                format!(
                    "Current temperature: {}°C, Wind: {} km/h",
                    fmt_num(temperature),
                    fmt_num(wind)
                ),
                0.98,
                json!({
                    "temperature": temperature,
                    "wind_speed": wind,
                }),
            )
        }
        "crypto" => {
            let amount = data
                .pointer("/data/amount")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<f64>().ok());
            SourceSummary::new(
                "Crypto Price API",
                format!("Bitcoin price: ${} USD", fmt_num(amount)),
                0.99,
                json!({
                    "currency": data.pointer("/data/base"),
                    "price": amount,
                    "quote": data.pointer("/data/currency"),
                }),
            )
        }
        "github" => {
            let full_name = data
                .pointer("/full_name")
                .and_then(Value::as_str)
                .unwrap_or("unknown repository");
            let stars = data.pointer("/stargazers_count").and_then(Value::as_i64);
            let issues = data.pointer("/open_issues_count").and_then(Value::as_i64);
            SourceSummary::new(
                "GitHub Repository",
                format!(
                    "{full_name}: {} stars, {} open issues",
                    fmt_int(stars),
                    fmt_int(issues)
                ),
                0.96,
                json!({
                    "stars": stars,
                    "forks": data.pointer("/forks_count"),
                    "issues": issues,
                    "watchers": data.pointer("/watchers_count"),
                }),
            )
        }
        "posts" => {
            let posts = data.as_array().map(Vec::as_slice).unwrap_or(&[]);
            let avg_title_length = if posts.is_empty() {
                0
            } else {
                let total: usize = posts
                    .iter()
                    .filter_map(|p| p.pointer("/title").and_then(Value::as_str))
                    .map(str::len)
                    .sum();
                (total as f64 / posts.len() as f64).round() as usize
            };
            SourceSummary::new(
                "Blog Posts API",
                format!("Retrieved {} recent blog posts", posts.len()),
                0.94,
                json!({
                    "post_count": posts.len(),
                    "avg_title_length": avg_title_length,
                }),
            )
        }
        "users" => {
            let count = data
                .pointer("/results")
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0);
            SourceSummary::new(
                "User Data API",
                format!("Retrieved {count} user profiles"),
                0.92,
                json!({
                    "user_count": count,
                    "version": data.pointer("/info/version"),
                }),
            )
        }
        other => SourceSummary::new(
            other,
            "Data received but format unknown".to_string(),
            0.5,
            json!({}),
        ),
    }
}

fn fmt_num(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}

fn fmt_int(value: Option<i64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| v.to_string())
}
