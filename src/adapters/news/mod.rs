//! News source adapters. Implement NewsSourcePort.

pub mod google_rss;

pub use google_rss::GoogleNewsRss;
