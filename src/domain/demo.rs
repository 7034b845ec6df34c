//! Demo analysis generator. Produces plausible analyses without a live model.
//!
//! Impact and urgency are drawn uniformly; the pair selects a score range and
//! the score is drawn uniformly inside it, so repeated scans vary.

use super::entities::SignalAnalysis;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::High, Level::Medium, Level::Low];

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::High => "High",
            Level::Medium => "Medium",
            Level::Low => "Low",
        };
        f.write_str(s)
    }
}

/// Score range for an (impact, urgency) pair. Unlisted pairs get the low range.
pub fn score_range(impact: Level, urgency: Level) -> RangeInclusive<u8> {
    match (impact, urgency) {
        (Level::High, Level::High) => 85..=95,
        (Level::High, Level::Medium) => 75..=85,
        (Level::Medium, Level::High) => 70..=80,
        (Level::Medium, Level::Medium) => 60..=70,
        _ => 45..=60,
    }
}

/// Demo-shaped analysis: categorical impact/urgency instead of a free-text signal type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoAnalysis {
    pub impact: Level,
    pub urgency: Level,
    pub attention_score: u8,
    pub summary: String,
    pub why_it_matters: String,
    pub next_actions: Vec<String>,
    pub confidence: f64,
    pub reasoning: String,
}

impl DemoAnalysis {
    /// Map onto the common analysis shape.
    pub fn into_signal_analysis(self) -> SignalAnalysis {
        SignalAnalysis {
            attention_score: self.attention_score,
            signal_type: format!("{} impact / {} urgency", self.impact, self.urgency),
            summary: self.summary,
            why_it_matters: self.why_it_matters,
            next_actions: self.next_actions,
            confidence: self.confidence,
            reasoning: self.reasoning,
        }
    }
}

pub fn generate_demo_analysis<R: Rng + ?Sized>(rng: &mut R) -> DemoAnalysis {
    let impact = Level::random(rng);
    let urgency = Level::random(rng);
    generate_demo_analysis_for(impact, urgency, rng)
}

/// Same as [`generate_demo_analysis`] with the levels forced.
pub fn generate_demo_analysis_for<R: Rng + ?Sized>(
    impact: Level,
    urgency: Level,
    rng: &mut R,
) -> DemoAnalysis {
    let attention_score = rng.random_range(score_range(impact, urgency));
    let confidence = f64::from(rng.random_range(70u8..=95)) / 100.0;

    let (summary, why_it_matters) = match impact {
        Level::High => (
            "Competitor announced a move that directly targets enterprise networking and security buyers.",
            "Overlaps with core switching and security deals currently in the pipeline; expect pricing and positioning pressure.",
        ),
        Level::Medium => (
            "Competitor shared an update that touches adjacent portfolio areas.",
            "Could influence a subset of accounts; worth monitoring for follow-on announcements.",
        ),
        Level::Low => (
            "Competitor news with limited commercial detail.",
            "Little direct overlap with active opportunities at this time.",
        ),
    };

    let next_actions = match urgency {
        Level::High => vec![
            "Alert account teams in affected industries".to_string(),
            "Prepare competitive positioning for sellers".to_string(),
            "Brief partner managers this week".to_string(),
        ],
        Level::Medium => vec![
            "Share summary with regional sales leads".to_string(),
            "Update competitive battlecard".to_string(),
            "Track customer reactions in upcoming calls".to_string(),
        ],
        Level::Low => vec![
            "Log signal for quarterly competitive review".to_string(),
            "Monitor for follow-up announcements".to_string(),
            "No immediate seller action required".to_string(),
        ],
    };

    DemoAnalysis {
        impact,
        urgency,
        attention_score,
        summary: summary.to_string(),
        why_it_matters: why_it_matters.to_string(),
        next_actions,
        confidence,
        reasoning: format!(
            "Demo analysis: {} impact with {} urgency (no live model call).",
            impact, urgency
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn documented_ranges() {
        assert_eq!(score_range(Level::High, Level::High), 85..=95);
        assert_eq!(score_range(Level::High, Level::Medium), 75..=85);
        assert_eq!(score_range(Level::Medium, Level::High), 70..=80);
        assert_eq!(score_range(Level::Medium, Level::Medium), 60..=70);
        assert_eq!(score_range(Level::Low, Level::High), 45..=60);
        assert_eq!(score_range(Level::High, Level::Low), 45..=60);
        assert_eq!(score_range(Level::Low, Level::Low), 45..=60);
    }

    #[test]
    fn forced_high_high_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let a = generate_demo_analysis_for(Level::High, Level::High, &mut rng);
            assert!((85..=95).contains(&a.attention_score), "{}", a.attention_score);
        }
    }

    #[test]
    fn random_draws_respect_their_pair_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let a = generate_demo_analysis(&mut rng);
            assert!(score_range(a.impact, a.urgency).contains(&a.attention_score));
            assert!((0.0..=1.0).contains(&a.confidence));
            assert_eq!(a.next_actions.len(), 3);
        }
    }

    #[test]
    fn draws_cover_every_level() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            let a = generate_demo_analysis(&mut rng);
            seen.insert(a.impact);
            seen.insert(a.urgency);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn maps_levels_into_signal_type() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = generate_demo_analysis_for(Level::Medium, Level::High, &mut rng)
            .into_signal_analysis();
        assert_eq!(a.signal_type, "Medium impact / High urgency");
        assert!((70..=80).contains(&a.attention_score));
    }
}
