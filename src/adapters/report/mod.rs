//! Report sinks. Implement ReportSink for terminal and JSON output.

pub mod json;
pub mod terminal;

pub use json::JsonReport;
pub use terminal::TerminalReport;
