//! Validated input types for the generator interview.
//!
//! Every answer that reaches the emitted document goes through one of these
//! constructors first. The policies differ on purpose: a workflow name
//! becomes a filesystem path component, so it is rejected outright on any
//! violation; a source name only feeds derived identifiers and prompt text,
//! so it is sanitized to a safe charset instead of bouncing the user.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;
use url::Url;

/// 172.16.0.0/12, matched against the literal hostname string
static PRIVATE_172_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^172\.(1[6-9]|2[0-9]|3[01])\.").unwrap());

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field}: {details}")]
    InvalidFormat {
        field: &'static str,
        details: String,
    },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("only http and https endpoints are allowed (got '{scheme}')")]
    DisallowedScheme { scheme: String },

    #[error("endpoint host '{host}' is not allowed ({reason})")]
    BlockedHost { host: String, reason: &'static str },
}

// ============================================================================
// WORKFLOW NAME
// ============================================================================

/// Validated workflow name.
///
/// Used verbatim as the output file's base name, so the charset check is a
/// path-traversal guard: `/`, `\` and `.` never pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowName(String);

impl WorkflowName {
    pub const MIN_LENGTH: usize = 3;
    pub const MAX_LENGTH: usize = 50;

    /// Validate a raw answer. Rejects, never sanitizes.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref();

        if raw.is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: "workflow name",
                details: "must not be empty".to_string(),
            });
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ValidationError::InvalidFormat {
                field: "workflow name",
                details: "only letters, numbers, underscores, and hyphens are allowed"
                    .to_string(),
            });
        }
        if raw.len() < Self::MIN_LENGTH || raw.len() > Self::MAX_LENGTH {
            return Err(ValidationError::OutOfRange {
                field: "workflow name length",
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(WorkflowName(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkflowName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SOURCE NAME
// ============================================================================

/// Sanitized source name.
///
/// Feeds derived task ids and secret references (`{name}_token`), and is
/// interpolated into generated prompt text, so anything outside
/// `[A-Za-z0-9_]` is mapped to `_` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceName(String);

impl SourceName {
    pub const MAX_LENGTH: usize = 30;

    /// Sanitize a raw answer. Sanitization is idempotent: a name already in
    /// the safe charset passes through unchanged.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref();

        if raw.is_empty() {
            return Err(ValidationError::Required {
                field: "source name",
            });
        }

        let sanitized: String = raw
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        let len = sanitized.chars().count();
        if len < 1 || len > Self::MAX_LENGTH {
            return Err(ValidationError::OutOfRange {
                field: "source name length",
                min: 1,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(SourceName(sanitized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ENDPOINT
// ============================================================================

/// Validated endpoint URL.
///
/// The executing engine dereferences this URL at run time, so loopback and
/// RFC1918 hosts are refused here to keep generated workflows from probing
/// internal networks. This is a lexical check on the literal hostname only:
/// a hostname that resolves publicly at validation time but privately at
/// fetch time (DNS rebinding) is not caught.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    /// Validate a raw answer. Returns the input string unchanged on success.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref();

        if raw.is_empty() {
            return Err(ValidationError::Required { field: "endpoint" });
        }

        let parsed = Url::parse(raw).map_err(|e| ValidationError::InvalidFormat {
            field: "endpoint",
            details: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ValidationError::DisallowedScheme {
                    scheme: other.to_string(),
                });
            }
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "endpoint",
                details: "URL has no host".to_string(),
            })?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_ascii_lowercase();

        if host == "localhost" || host == "127.0.0.1" || host == "::1" {
            return Err(ValidationError::BlockedHost {
                host,
                reason: "loopback addresses are not allowed",
            });
        }
        if host.starts_with("192.168.") || host.starts_with("10.") || PRIVATE_172_RANGE.is_match(&host)
        {
            return Err(ValidationError::BlockedHost {
                host,
                reason: "private network addresses are not allowed",
            });
        }

        Ok(Endpoint(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SOURCE COUNT
// ============================================================================

/// Number of data sources configured for a workflow, bounded to [2,5].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCount(u8);

impl SourceCount {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 5;

    /// Parse and bound a raw answer.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let raw = raw.as_ref().trim();

        let parsed: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "number of sources",
            details: format!("'{raw}' is not a number"),
        })?;

        if parsed < Self::MIN as i64 || parsed > Self::MAX as i64 {
            return Err(ValidationError::OutOfRange {
                field: "number of sources",
                min: Self::MIN as usize,
                max: Self::MAX as usize,
            });
        }

        Ok(SourceCount(parsed as u8))
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SourceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_name_accepts_safe_charset_unchanged() {
        for name in ["abc", "my_data_pipeline", "Pipe-Line_42", "x".repeat(50).as_str()] {
            let validated = WorkflowName::new(name).unwrap();
            assert_eq!(validated.as_str(), name);
        }
    }

    #[test]
    fn workflow_name_rejects_charset_violations() {
        for name in [
            "has space",
            "slash/name",
            "back\\slash",
            "dots..name",
            "../../../etc/passwd",
            "name!",
        ] {
            assert!(
                matches!(
                    WorkflowName::new(name),
                    Err(ValidationError::InvalidFormat { .. })
                ),
                "expected rejection for {name:?}"
            );
        }
    }

    #[test]
    fn workflow_name_rejects_out_of_range_lengths() {
        assert!(matches!(
            WorkflowName::new("ab"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            WorkflowName::new("x".repeat(51)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            WorkflowName::new(""),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn source_name_sanitizes_positionally() {
        assert_eq!(SourceName::new("api-source-1").unwrap().as_str(), "api_source_1");
        assert_eq!(SourceName::new("my source!").unwrap().as_str(), "my_source_");
        assert_eq!(SourceName::new("already_safe").unwrap().as_str(), "already_safe");
    }

    #[test]
    fn source_name_preserves_length() {
        for raw in ["api-source-1", "my source!", "a.b.c", "x"] {
            let sanitized = SourceName::new(raw).unwrap();
            assert_eq!(sanitized.as_str().chars().count(), raw.chars().count());
            assert!(sanitized
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }

    #[test]
    fn source_name_sanitization_is_idempotent() {
        for raw in ["api-source-1", "my source!", "weird:%chars", "plain"] {
            let once = SourceName::new(raw).unwrap();
            let twice = SourceName::new(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn source_name_bounds() {
        assert!(matches!(
            SourceName::new(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            SourceName::new("x".repeat(31)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(SourceName::new("x".repeat(30)).is_ok());
    }

    #[test]
    fn endpoint_blocks_loopback_and_private_ranges() {
        for url in [
            "http://localhost",
            "http://localhost:8080/path",
            "http://127.0.0.1",
            "http://[::1]/admin",
            "http://192.168.1.1",
            "http://10.0.0.1",
            "http://172.16.0.1",
            "http://172.31.255.255/x",
        ] {
            assert!(
                matches!(
                    Endpoint::new(url),
                    Err(ValidationError::BlockedHost { .. })
                ),
                "expected BlockedHost for {url}"
            );
        }
    }

    #[test]
    fn endpoint_allows_public_172_hosts() {
        // 172.15.x and 172.32.x sit outside 172.16.0.0/12
        assert!(Endpoint::new("http://172.15.0.1").is_ok());
        assert!(Endpoint::new("http://172.32.0.1").is_ok());
    }

    #[test]
    fn endpoint_restricts_schemes() {
        assert!(matches!(
            Endpoint::new("ftp://example.com"),
            Err(ValidationError::DisallowedScheme { .. })
        ));
        assert!(matches!(
            Endpoint::new("file:///etc/passwd"),
            Err(ValidationError::DisallowedScheme { .. })
        ));
    }

    #[test]
    fn endpoint_rejects_relative_and_empty() {
        assert!(matches!(
            Endpoint::new(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            Endpoint::new("not a url"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            Endpoint::new("/relative/path"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn endpoint_returns_input_unchanged() {
        for url in ["https://api.example.com/data", "http://example.com/data"] {
            assert_eq!(Endpoint::new(url).unwrap().as_str(), url);
        }
    }

    #[test]
    fn source_count_accepts_range() {
        for (raw, expected) in [("2", 2), ("3", 3), ("4", 4), ("5", 5), (" 3 ", 3)] {
            assert_eq!(SourceCount::new(raw).unwrap().get(), expected);
        }
    }

    #[test]
    fn source_count_rejects_out_of_range_and_garbage() {
        for raw in ["0", "1", "6", "-3"] {
            assert!(
                matches!(
                    SourceCount::new(raw),
                    Err(ValidationError::OutOfRange { .. })
                ),
                "expected OutOfRange for {raw:?}"
            );
        }
        assert!(matches!(
            SourceCount::new("abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            SourceCount::new(""),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
