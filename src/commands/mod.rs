//! CLI subcommands

pub mod check;
pub mod list;
pub mod preview;
pub mod show;
pub mod sitemap;
pub mod tags;
