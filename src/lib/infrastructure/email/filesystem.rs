//! Filesystem debug sink

use std::{fs, path::PathBuf};

use chrono::Local;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::info;

use crate::domain::communication::mailer::{Mailer, MailerError, RenderedMessage};

/// Format of the timestamp embedded in debug file names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Characters that cannot appear inside a single path segment
const PATH_UNSAFE: &AsciiSet = &CONTROLS.add(b'/').add(b'\\').add(b'%');

/// Writes messages to disk instead of delivering them
///
/// Each message becomes `<to>-<subject>-<timestamp>.html` under the target
/// directory and holds only the HTML body. Two messages with the same
/// recipients and subject sent within the same second overwrite each other.
#[derive(Debug, Clone)]
pub struct DebugMailSink {
    target_dir: PathBuf,
}

impl DebugMailSink {
    /// Creates a sink writing into `target_dir`
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }

    /// Where `message` would be written for the given `timestamp`
    pub fn path_for(&self, message: &RenderedMessage, timestamp: &str) -> PathBuf {
        self.target_dir.join(file_name(message, timestamp))
    }
}

fn file_name(message: &RenderedMessage, timestamp: &str) -> String {
    let to = message.to_header();
    let subject = message.subject.as_deref().unwrap_or_default();

    format!(
        "{}-{}-{}.html",
        utf8_percent_encode(to.trim(), PATH_UNSAFE),
        utf8_percent_encode(subject, PATH_UNSAFE),
        timestamp
    )
}

impl Mailer for DebugMailSink {
    fn send(&self, message: &RenderedMessage) -> Result<(), MailerError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let path = self.path_for(message, &timestamp);

        fs::write(&path, &message.html_body)?;

        let headers = message.without_subject_and_to();
        info!(
            path = %path.display(),
            from = %headers.from,
            cc = headers.cc.len(),
            bcc = headers.bcc.len(),
            attachments = headers.attachments.len(),
            "email written to debug storage"
        );

        Ok(())
    }
}
