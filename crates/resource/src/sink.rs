use concentra_traits::{DocumentSink, SinkError};
use std::path::{Path, PathBuf};

/// Writes finished documents into a directory, creating it on first save.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl DocumentSink for DirectorySink {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<(), SinkError> {
        let name = Path::new(filename);
        if name.file_name().map(|n| n.len()) != Some(filename.len()) {
            return Err(SinkError::Rejected {
                filename: filename.to_string(),
                message: "filename must not contain path separators".to_string(),
            });
        }

        let io_err = |source| SinkError::Io {
            filename: filename.to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        let target = self.path_for(filename);
        std::fs::write(&target, bytes).map_err(io_err)?;
        log::info!("Saved {} bytes to {}", bytes.len(), target.display());
        Ok(())
    }
}
