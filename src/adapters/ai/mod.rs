//! AI adapter module. Implements InferencePort for LLM integration.
//!
//! Provides OpenAI-compatible adapter and demo adapter for offline runs.

pub mod demo_adapter;
pub mod openai_adapter;

pub use demo_adapter::DemoAiAdapter;
pub use openai_adapter::OpenAiAdapter;
