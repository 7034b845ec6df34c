//! Infrastructure adapters. Implement ports.
//!
//! News feed, LLM providers, report output, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod news;
pub mod report;
pub mod ui;
