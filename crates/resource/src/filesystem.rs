//! Media read from a local directory.
//!
//! Every URI is resolved relative to the media root and must stay inside it, so a
//! record pointing at `../../etc/passwd` is reported as missing media.

use concentra_traits::{MediaError, MediaSource, SharedMediaData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

const FILE_SCHEME: &str = "file://";

#[derive(Debug)]
pub struct FilesystemMediaSource {
    root: PathBuf,
    canonical_root: Option<PathBuf>,
}

impl FilesystemMediaSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().ok();
        Self {
            root,
            canonical_root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a media URI onto a path under the root, or `None` if it would escape it.
    fn resolve(&self, uri: &str) -> Option<PathBuf> {
        let relative = uri.strip_prefix(FILE_SCHEME).unwrap_or(uri);
        let relative = Path::new(relative);
        if relative.is_absolute() {
            return None;
        }
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return None;
        }

        let full = self.root.join(relative);
        match (full.canonicalize(), &self.canonical_root) {
            // Symlinks may still point outside the root.
            (Ok(canonical), Some(root)) if !canonical.starts_with(root) => None,
            (Ok(canonical), Some(_)) => Some(canonical),
            _ => Some(full),
        }
    }
}

impl MediaSource for FilesystemMediaSource {
    fn fetch(&self, uri: &str) -> Result<SharedMediaData, MediaError> {
        let path = self
            .resolve(uri)
            .ok_or_else(|| MediaError::NotFound(format!("{uri} (outside media root)")))?;

        std::fs::read(&path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MediaError::NotFound(uri.to_string())
            } else {
                MediaError::FetchFailed {
                    uri: uri.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn contains(&self, uri: &str) -> bool {
        self.resolve(uri).is_some_and(|p| p.is_file())
    }

    fn name(&self) -> &'static str {
        "FilesystemMediaSource"
    }
}
