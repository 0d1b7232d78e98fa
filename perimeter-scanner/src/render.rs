//! Optional JavaScript-executing render fallback.
//!
//! The crawler only knows the [`Renderer`] trait; a concrete headless engine
//! is plugged in by the embedding application. When none is available the
//! crawl runs with [`RenderCapability::Unavailable`] and stays static.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// DOM after script execution plus the client-side navigations observed
/// while the page settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    pub navigated_urls: Vec<String>,
}

impl RenderedPage {
    /// Builds a rendered page, keeping navigations in first-seen order
    /// without duplicates.
    pub fn new(html: impl Into<String>, navigated_urls: impl IntoIterator<Item = String>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for nav in navigated_urls {
            if !nav.is_empty() && !unique.contains(&nav) {
                unique.push(nav);
            }
        }
        Self {
            html: html.into(),
            navigated_urls: unique,
        }
    }
}

#[async_trait]
pub trait Renderer: Send + Sync {
    /// Loads `url`, lets scripts run for at most `timeout`, and returns the
    /// resulting DOM.
    async fn render(&self, url: &Url, timeout: Duration) -> Result<RenderedPage>;
}

#[derive(Clone)]
pub enum RenderCapability {
    Available(Arc<dyn Renderer>),
    Unavailable { reason: String },
}

impl RenderCapability {
    pub fn available(renderer: Arc<dyn Renderer>) -> Self {
        RenderCapability::Available(renderer)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        RenderCapability::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, RenderCapability::Available(_))
    }
}

impl Default for RenderCapability {
    fn default() -> Self {
        RenderCapability::unavailable("no render engine configured")
    }
}

impl fmt::Debug for RenderCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderCapability::Available(_) => f.write_str("RenderCapability::Available"),
            RenderCapability::Unavailable { reason } => {
                write!(f, "RenderCapability::Unavailable({reason})")
            }
        }
    }
}
