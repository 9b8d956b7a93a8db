//! The media store seam.
//!
//! The media store resolves item and logo references to fetchable URIs; the export
//! engine only ever asks a [`MediaSource`] for the bytes behind such a URI.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    #[error("Media not found: {0}")]
    NotFound(String),

    #[error("Failed to fetch media '{uri}': {message}")]
    FetchFailed { uri: String, message: String },

    #[error("Media '{uri}' is not a decodable image: {message}")]
    Undecodable { uri: String, message: String },

    #[error("Timed out after {millis} ms fetching media '{uri}'")]
    TimedOut { uri: String, millis: u128 },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for MediaError {
    fn from(err: std::io::Error) -> Self {
        MediaError::Io(err.to_string())
    }
}

/// Reference-counted media bytes.
pub type SharedMediaData = Arc<Vec<u8>>;

/// Fetches the bytes behind a media URI.
///
/// Implementations are called from a blocking task and may take as long as they
/// need; callers bound each fetch with their own timeout.
pub trait MediaSource: Send + Sync + Debug {
    fn fetch(&self, uri: &str) -> Result<SharedMediaData, MediaError>;

    fn contains(&self, uri: &str) -> bool;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

impl<T: MediaSource + ?Sized> MediaSource for Arc<T> {
    fn fetch(&self, uri: &str) -> Result<SharedMediaData, MediaError> {
        (**self).fetch(uri)
    }

    fn contains(&self, uri: &str) -> bool {
        (**self).contains(uri)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Media held in memory, pre-populated by the caller.
#[derive(Debug, Default)]
pub struct InMemoryMediaSource {
    media: RwLock<HashMap<String, SharedMediaData>>,
}

impl InMemoryMediaSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `uri`, replacing any previous entry.
    pub fn insert(&self, uri: impl Into<String>, data: Vec<u8>) -> Result<(), MediaError> {
        let uri = uri.into();
        let mut media = self.media.write().map_err(|_| MediaError::FetchFailed {
            uri: uri.clone(),
            message: "media store lock poisoned".to_string(),
        })?;
        media.insert(uri, Arc::new(data));
        Ok(())
    }

    pub fn with(self, uri: impl Into<String>, data: Vec<u8>) -> Result<Self, MediaError> {
        self.insert(uri, data)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.media.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MediaSource for InMemoryMediaSource {
    fn fetch(&self, uri: &str) -> Result<SharedMediaData, MediaError> {
        let media = self.media.read().map_err(|_| MediaError::FetchFailed {
            uri: uri.to_string(),
            message: "media store lock poisoned".to_string(),
        })?;
        media
            .get(uri)
            .cloned()
            .ok_or_else(|| MediaError::NotFound(uri.to_string()))
    }

    fn contains(&self, uri: &str) -> bool {
        self.media
            .read()
            .map(|m| m.contains_key(uri))
            .unwrap_or(false)
    }

    fn name(&self) -> &'static str {
        "InMemoryMediaSource"
    }
}
