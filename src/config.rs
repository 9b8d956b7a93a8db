//! Export configuration.
//!
//! Every field has a default, so a configuration file only needs the keys it
//! changes:
//!
//! ```json
//! { "locale": "es-ES", "flow": { "attribution": "Grupo Delta" }, "image_timeout_ms": 3000 }
//! ```

use crate::error::ExportError;
use concentra_resource::DEFAULT_MAX_EDGE_PX;
use concentra_table_flow::{FlowOptions, MoneyFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Money preset (`en-US`, `es-MX`, `es-ES`). Overrides `flow.money` when set.
    pub locale: Option<String>,
    pub flow: FlowOptions,
    /// Upper bound for fetching and decoding a single image.
    pub image_timeout_ms: u64,
    pub max_image_edge_px: u32,
    pub producer: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            locale: None,
            flow: FlowOptions::default(),
            image_timeout_ms: 10_000,
            max_image_edge_px: DEFAULT_MAX_EDGE_PX,
            producer: "Concentra".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ExportError> {
        let config: ExportConfig = serde_json::from_str(source)?;
        config.resolved()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("Failed to read config from '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&source)
    }

    /// Selects a money preset by locale name.
    pub fn with_locale(mut self, locale: &str) -> Result<Self, ExportError> {
        self.locale = Some(locale.to_string());
        self.resolved()
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }

    fn resolved(mut self) -> Result<Self, ExportError> {
        if let Some(locale) = self.locale.as_deref() {
            self.flow.money = MoneyFormat::preset(locale).ok_or_else(|| {
                ExportError::Config(format!(
                    "Unknown locale '{locale}', expected one of {:?}",
                    MoneyFormat::PRESETS
                ))
            })?;
        }
        if self.image_timeout_ms == 0 {
            return Err(ExportError::Config("image_timeout_ms must be positive".to_string()));
        }
        Ok(self)
    }
}
