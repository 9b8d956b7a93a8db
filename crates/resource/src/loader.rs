//! Bounded image loading.
//!
//! Each load fetches and decodes on a blocking task and gives up once its timeout
//! elapses. A load never fails the caller; it reports [`ImageLoad::Failed`] and
//! the document is produced without that image.

use crate::decode::{decode_raster, DEFAULT_MAX_EDGE_PX};
use concentra_traits::{MediaError, MediaSource};
use concentra_types::{ImageSet, MediaUri, RasterImage};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub enum ImageLoad {
    Loaded(Arc<RasterImage>),
    Failed { uri: MediaUri, reason: MediaError },
}

impl ImageLoad {
    pub fn image(&self) -> Option<&Arc<RasterImage>> {
        match self {
            ImageLoad::Loaded(image) => Some(image),
            ImageLoad::Failed { .. } => None,
        }
    }
}

/// Outcome of loading a batch of thumbnails.
#[derive(Debug, Default)]
pub struct ResolvedImages {
    pub images: ImageSet,
    pub failures: Vec<(MediaUri, MediaError)>,
}

#[derive(Debug, Clone)]
pub struct ImageLoader {
    source: Arc<dyn MediaSource>,
    timeout: Duration,
    max_edge_px: u32,
}

impl ImageLoader {
    pub fn new(source: Arc<dyn MediaSource>) -> Self {
        Self {
            source,
            timeout: DEFAULT_IMAGE_TIMEOUT,
            max_edge_px: DEFAULT_MAX_EDGE_PX,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_edge(mut self, max_edge_px: u32) -> Self {
        self.max_edge_px = max_edge_px;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn load(&self, uri: &MediaUri) -> ImageLoad {
        let source = Arc::clone(&self.source);
        let owned = uri.clone();
        let max_edge = self.max_edge_px;
        let task = tokio::task::spawn_blocking(move || {
            let bytes = source.fetch(owned.as_str())?;
            decode_raster(owned.as_str(), &bytes, max_edge)
        });

        let reason = match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(Ok(raster))) => {
                log::debug!(
                    "Loaded '{uri}' ({}x{} px) from {}",
                    raster.width_px,
                    raster.height_px,
                    self.source.name()
                );
                return ImageLoad::Loaded(Arc::new(raster));
            }
            Ok(Ok(Err(e))) => e,
            Ok(Err(join)) => MediaError::FetchFailed {
                uri: uri.to_string(),
                message: join.to_string(),
            },
            Err(_) => MediaError::TimedOut {
                uri: uri.to_string(),
                millis: self.timeout.as_millis(),
            },
        };
        log::warn!("Image '{uri}' unavailable: {reason}");
        ImageLoad::Failed {
            uri: uri.clone(),
            reason,
        }
    }

    /// Loads every distinct URI in order, one at a time.
    pub async fn load_all<'a>(&self, uris: impl IntoIterator<Item = &'a MediaUri>) -> ResolvedImages {
        let mut resolved = ResolvedImages::default();
        let mut seen = HashSet::new();
        for uri in uris {
            if !seen.insert(uri.clone()) {
                continue;
            }
            match self.load(uri).await {
                ImageLoad::Loaded(image) => {
                    resolved.images.insert(uri.clone(), image);
                }
                ImageLoad::Failed { uri, reason } => resolved.failures.push((uri, reason)),
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::tests::png_bytes;
    use concentra_traits::{InMemoryMediaSource, SharedMediaData};

    #[derive(Debug)]
    struct SlowSource(Duration);

    impl MediaSource for SlowSource {
        fn fetch(&self, _uri: &str) -> Result<SharedMediaData, MediaError> {
            std::thread::sleep(self.0);
            Ok(Arc::new(png_bytes(2, 2, [0, 0, 0, 255])))
        }

        fn contains(&self, _uri: &str) -> bool {
            true
        }

        fn name(&self) -> &'static str {
            "SlowSource"
        }
    }

    fn loader_with(entries: &[(&str, Vec<u8>)]) -> ImageLoader {
        let source = InMemoryMediaSource::new();
        for (uri, bytes) in entries {
            source.insert(*uri, bytes.clone()).unwrap();
        }
        ImageLoader::new(Arc::new(source))
    }

    #[tokio::test]
    async fn test_load_success() {
        let loader = loader_with(&[("a.png", png_bytes(10, 5, [9, 9, 9, 255]))]);
        let load = loader.load(&MediaUri::from("a.png")).await;
        let image = load.image().expect("loaded");
        assert!((image.natural_ratio - 2.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_and_undecodable_fail() {
        let loader = loader_with(&[("bad.png", b"nope".to_vec())]);
        assert!(matches!(
            loader.load(&MediaUri::from("missing.png")).await,
            ImageLoad::Failed { reason: MediaError::NotFound(_), .. }
        ));
        assert!(matches!(
            loader.load(&MediaUri::from("bad.png")).await,
            ImageLoad::Failed { reason: MediaError::Undecodable { .. }, .. }
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_slow_source_times_out() {
        let loader = ImageLoader::new(Arc::new(SlowSource(Duration::from_millis(300))))
            .with_timeout(Duration::from_millis(20));
        match loader.load(&MediaUri::from("slow.png")).await {
            ImageLoad::Failed { reason: MediaError::TimedOut { millis, .. }, .. } => assert_eq!(millis, 20),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_all_dedups_and_collects_failures() {
        let loader = loader_with(&[("a.png", png_bytes(3, 3, [0, 0, 0, 255]))]);
        let uris = [
            MediaUri::from("a.png"),
            MediaUri::from("gone.png"),
            MediaUri::from("a.png"),
        ];
        let resolved = loader.load_all(uris.iter()).await;
        assert_eq!(resolved.images.len(), 1);
        assert_eq!(resolved.failures.len(), 1);
        assert_eq!(resolved.failures[0].0.as_str(), "gone.png");
    }
}
