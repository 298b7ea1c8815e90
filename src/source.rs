//! Data-source model: what the operator configures, one record per source.

use crate::validate::{Endpoint, SourceName};
use std::fmt;

/// The catalog of source kinds the generator knows how to wire up.
///
/// Database and Custom currently emit a log placeholder instead of a real
/// fetch step; no driver is wired on the engine side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    RestApi,
    Database,
    CsvFile,
    WebSocket,
    Custom,
}

impl SourceKind {
    /// Interview choice order.
    pub const ALL: [SourceKind; 5] = [
        SourceKind::RestApi,
        SourceKind::Database,
        SourceKind::CsvFile,
        SourceKind::WebSocket,
        SourceKind::Custom,
    ];

    /// Human-facing label, also interpolated into generated prompt text.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::RestApi => "REST API",
            SourceKind::Database => "Database",
            SourceKind::CsvFile => "CSV File",
            SourceKind::WebSocket => "WebSocket",
            SourceKind::Custom => "Custom",
        }
    }

    /// Resolve an interview answer: a 1-based list index or a label.
    pub fn parse_choice(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<usize>() {
            return (n >= 1 && n <= Self::ALL.len()).then(|| Self::ALL[n - 1]);
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How the executing engine authenticates against a source endpoint.
///
/// Anything other than `None` makes the fetch task reference a named secret;
/// the credential itself never appears in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    None,
    BearerToken,
    ApiKey,
    BasicAuth,
}

impl AuthMode {
    /// Interview choice order.
    pub const ALL: [AuthMode; 4] = [
        AuthMode::None,
        AuthMode::BearerToken,
        AuthMode::ApiKey,
        AuthMode::BasicAuth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AuthMode::None => "None",
            AuthMode::BearerToken => "Bearer Token",
            AuthMode::ApiKey => "API Key",
            AuthMode::BasicAuth => "Basic Auth",
        }
    }

    /// Resolve an interview answer: a 1-based list index or a label.
    pub fn parse_choice(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<usize>() {
            return (n >= 1 && n <= Self::ALL.len()).then(|| Self::ALL[n - 1]);
        }
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(raw))
    }

    pub fn requires_secret(self) -> bool {
        !matches!(self, AuthMode::None)
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One configured data source. Collected in interview order; that order is
/// preserved in the emitted document.
#[derive(Debug, Clone)]
pub struct DataSource {
    pub name: SourceName,
    pub kind: SourceKind,
    pub endpoint: Endpoint,
    pub auth: AuthMode,
}

impl DataSource {
    /// Name of the secret the engine must provide at execution time, if any.
    pub fn secret_name(&self) -> Option<String> {
        self.auth
            .requires_secret()
            .then(|| format!("{}_token", self.name))
    }
}
