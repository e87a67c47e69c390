use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use tracing::info;

use crate::error::DispatchError;
use crate::sanitize;

pub trait NotificationDispatcher: Send + Sync {
    /// Attempts one delivery. `Ok(false)` means the channel declined the
    /// message without raising an error.
    fn send(&self, recipient: &str, subject: &str, content: &str) -> Result<bool, DispatchError>;
}

/// Logs each message instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct DryRunDispatcher;

impl NotificationDispatcher for DryRunDispatcher {
    fn send(&self, recipient: &str, subject: &str, content: &str) -> Result<bool, DispatchError> {
        info!(
            recipient = %sanitize::redact_email(recipient),
            subject,
            bytes = content.len(),
            "Dry run: notification not delivered"
        );
        Ok(true)
    }
}

/// Writes every message as a standalone file into an outbox directory, for a
/// separate mail relay to pick up.
pub struct OutboxDispatcher {
    directory: PathBuf,
    sequence: AtomicUsize,
}

impl OutboxDispatcher {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            sequence: AtomicUsize::new(0),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn message_path(&self, recipient: &str) -> PathBuf {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let slug: String = recipient
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.directory.join(format!("{:04}-{}.eml", sequence, slug))
    }

    /// Creates the next unused message file. Files left by earlier runs are
    /// never reopened, so the sequence skips past them.
    fn create_message(&self, recipient: &str) -> Result<(PathBuf, std::fs::File), DispatchError> {
        loop {
            let path = self.message_path(recipient);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(DispatchError::Io { path, source: e }),
            }
        }
    }
}

impl NotificationDispatcher for OutboxDispatcher {
    fn send(&self, recipient: &str, subject: &str, content: &str) -> Result<bool, DispatchError> {
        if !recipient.contains('@') {
            return Err(DispatchError::Rejected {
                recipient: recipient.to_string(),
                reason: "not an email address".to_string(),
            });
        }

        std::fs::create_dir_all(&self.directory).map_err(|e| DispatchError::Io {
            path: self.directory.clone(),
            source: e,
        })?;

        let message = format!(
            "To: {}\r\nSubject: {}\r\nDate: {}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{}",
            recipient,
            subject,
            Utc::now().to_rfc2822(),
            content
        );
        let (path, mut file) = self.create_message(recipient)?;
        file.write_all(message.as_bytes())
            .map_err(|e| DispatchError::Io {
                path: path.clone(),
                source: e,
            })?;

        info!(
            recipient = %sanitize::redact_email(recipient),
            file = %sanitize::redact_path(&path),
            "Notification written to outbox"
        );
        Ok(true)
    }
}
