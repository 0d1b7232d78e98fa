pub mod crawler;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod origin;
pub mod render;
pub mod sitemap;

pub use crawler::Crawler;
pub use error::ScanError;
pub use fetch::{FetchedPage, HttpFetcher};
pub use render::{RenderCapability, RenderedPage, Renderer};
pub use sitemap::SiteMap;
