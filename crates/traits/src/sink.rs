//! The document artifact sink: whatever receives the finished PDF.

use std::fmt::Debug;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to save '{filename}': {source}")]
    Io {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Sink rejected '{filename}': {message}")]
    Rejected { filename: String, message: String },
}

pub trait DocumentSink: Send + Sync + Debug {
    /// Receives the finished document under its suggested filename.
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), SinkError>;
}

/// Keeps saved artifacts in memory, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every artifact saved so far.
    pub fn take(&self) -> Vec<(String, Vec<u8>)> {
        self.saved
            .lock()
            .map(|mut saved| std::mem::take(&mut *saved))
            .unwrap_or_default()
    }
}

impl DocumentSink for MemorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), SinkError> {
        let mut saved = self.saved.lock().map_err(|_| SinkError::Rejected {
            filename: filename.to_string(),
            message: "sink lock poisoned".to_string(),
        })?;
        saved.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}
