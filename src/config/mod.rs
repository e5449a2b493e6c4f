//! Configuration module

mod site;

pub use site::ContentConfig;
pub use site::PreviewConfig;
pub use site::SiteConfig;
pub use site::SitemapConfig;
pub use site::SlugMatch;
