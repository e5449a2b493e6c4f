//! Helper functions shared by the CLI, the HTTP surface and the sitemap

mod date;
mod list;
mod url;

pub use date::*;
pub use list::*;
pub use url::*;
