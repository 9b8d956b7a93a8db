//! Quotation content as supplied by the content source.
//!
//! Field aliases accept the portal's camelCase keys (`costUSD`, `sellUSD`, `qty`,
//! `margin`) so exported records deserialize without a translation layer.

use crate::ids::{ItemId, MediaUri, ModuleId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub url: MediaUri,
    #[serde(alias = "type")]
    pub kind: MediaKind,
}

impl MediaRef {
    pub fn image(url: impl Into<MediaUri>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Image,
        }
    }

    pub fn video(url: impl Into<MediaUri>) -> Self {
        Self {
            url: url.into(),
            kind: MediaKind::Video,
        }
    }

    /// The URI to embed in the document, if this is a still image.
    pub fn still_image(&self) -> Option<&MediaUri> {
        match self.kind {
            MediaKind::Image => Some(&self.url),
            MediaKind::Video => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A priced unit of equipment or work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "qty")]
    pub quantity: f64,
    #[serde(default, alias = "costUSD")]
    pub cost_usd: f64,
    /// Direct unit sell price. `None` or zero means "derive from cost and margin".
    #[serde(default, alias = "sellUSD")]
    pub sell_usd: Option<f64>,
    #[serde(default, alias = "margin")]
    pub margin_pct: f64,
    #[serde(default)]
    pub media: Option<MediaRef>,
}

impl LineItem {
    /// A fresh item as created by the operator's "add item" action.
    pub fn new(id: impl Into<ItemId>, ordinal: usize) -> Self {
        Self {
            id: id.into(),
            active: true,
            code: format!("ITEM-{ordinal}"),
            name: String::new(),
            description: "Nueva partida".to_string(),
            quantity: 1.0,
            cost_usd: 0.0,
            sell_usd: None,
            margin_pct: 0.0,
            media: None,
        }
    }

    /// The direct sell price when it is set and nonzero.
    pub fn direct_sell(&self) -> Option<f64> {
        self.sell_usd.filter(|sell| *sell != 0.0)
    }

    /// Thumbnail URI for the document table, only for still images.
    pub fn thumbnail(&self) -> Option<&MediaUri> {
        self.media.as_ref().and_then(MediaRef::still_image)
    }
}

/// A named group of line items contributing one subtotal row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Module {
    pub fn new(id: impl Into<ModuleId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tag: String::new(),
            items: Vec::new(),
        }
    }

    pub fn active_items(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|item| item.active)
    }

    pub fn has_active_items(&self) -> bool {
        self.items.iter().any(|item| item.active)
    }
}

/// Header data printed on every page of the concentrate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub project_name: String,
    #[serde(default)]
    pub client_name: String,
    /// Already formatted for display.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub logo: Option<MediaUri>,
}
