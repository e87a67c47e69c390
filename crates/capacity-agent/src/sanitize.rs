//! Helpers for sanitizing data before it enters tracing span attributes.
//!
//! Logs are meant to be shareable, so manager addresses and full file paths
//! are reduced before they are recorded.

use std::path::Path;

/// Returns only the filename component of a path (no directory).
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}

/// Masks the local part of an email address, keeping its first character.
///
/// - `dana.reyes@example.com` → `d***@example.com`
/// - `no-at-sign` → `***`
pub fn redact_email(email: &str) -> String {
    match email.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
