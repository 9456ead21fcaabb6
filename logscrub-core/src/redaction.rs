//! redaction.rs - Helpers for keeping sensitive content out of our own logs.
//!
//! The sanitizer's debug logging must not become a second leak. Matched
//! content is only logged verbatim when the operator explicitly opts in via
//! the `LOGSCRUB_ALLOW_DEBUG_PII` environment variable; otherwise a redacted
//! placeholder carrying only the length is logged.

use once_cell::sync::Lazy;

/// Initialized once to determine if PII is allowed in debug logs.
static PII_DEBUG_ALLOWED: Lazy<bool> = Lazy::new(|| {
    std::env::var("LOGSCRUB_ALLOW_DEBUG_PII")
        .map(|s| s.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
});

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

/// Returns `s` verbatim only when debug PII logging is explicitly enabled.
pub fn loggable_content(s: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        s.to_string()
    } else {
        redact_sensitive(s)
    }
}
