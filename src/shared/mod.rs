//! Cross-cutting concerns: configuration and adapter wiring.

pub mod bootstrap;
pub mod config;
