//! Application use cases. Orchestrate domain logic via ports.

pub mod scan_service;
pub mod signal_analyzer;

pub use scan_service::ScanService;
pub use signal_analyzer::{Analyzed, SignalAnalyzer};
