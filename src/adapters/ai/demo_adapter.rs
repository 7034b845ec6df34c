//! Demo inference adapter. Produces analyses without any API calls.
//!
//! Output is serialized to JSON text so it travels the same parse path as a live model reply.

use crate::domain::demo::{Level, generate_demo_analysis, generate_demo_analysis_for};
use crate::domain::DomainError;
use crate::ports::{InferencePort, Prompt};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Demo adapter for offline runs.
///
/// Simulates network latency with configurable delay.
pub struct DemoAiAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    rng: Mutex<StdRng>,
    forced: Option<(Level, Level)>,
}

impl DemoAiAdapter {
    /// Create a new demo adapter with default delay (150ms).
    pub fn new() -> Self {
        Self {
            delay_ms: 150,
            rng: Mutex::new(StdRng::from_os_rng()),
            forced: None,
        }
    }

    /// Create a demo adapter with custom delay.
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Reproducible draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Always use these levels instead of drawing them.
    pub fn with_levels(mut self, impact: Level, urgency: Level) -> Self {
        self.forced = Some((impact, urgency));
        self
    }
}

impl Default for DemoAiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InferencePort for DemoAiAdapter {
    async fn complete(&self, prompt: &Prompt) -> Result<String, DomainError> {
        info!(prompt_len = prompt.user.len(), "[DEMO] Simulating AI analysis");

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let demo = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| DomainError::InferenceTransport("demo rng poisoned".to_string()))?;
            match self.forced {
                Some((impact, urgency)) => generate_demo_analysis_for(impact, urgency, &mut *rng),
                None => generate_demo_analysis(&mut *rng),
            }
        };

        serde_json::to_string(&demo.into_signal_analysis())
            .map_err(|e| DomainError::InferenceTransport(format!("demo serialization: {}", e)))
    }

    fn provider_name(&self) -> &'static str {
        "demo"
    }
}
