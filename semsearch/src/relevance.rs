//! # Relevance module
//!
//! Coarse human-readable banding of similarity scores. A continuous cosine score is mapped to
//! [`High`](Relevance::High), [`Medium`](Relevance::Medium) or [`Low`](Relevance::Low) via two
//! thresholds, which are configuration rather than constants so they can be tuned per embedding
//! model.

use serde::Deserialize;
use std::fmt;

/// Coarse relevance bucket derived from a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relevance {
    /// Score above the high threshold.
    High,
    /// Score above the medium threshold, up to and including the high threshold.
    Medium,
    /// Score at or below the medium threshold.
    Low,
}

impl fmt::Display for Relevance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{label}")
    }
}

/// Score thresholds separating the relevance bands.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RelevanceThresholds {
    /// Scores strictly above this are [`High`](Relevance::High). Default is 0.7.
    #[serde(default = "defaults::high")]
    pub high: f32,
    /// Scores strictly above this (and not high) are [`Medium`](Relevance::Medium). Default is
    /// 0.5.
    #[serde(default = "defaults::medium")]
    pub medium: f32,
}

impl Default for RelevanceThresholds {
    fn default() -> Self {
        Self {
            high: defaults::high(),
            medium: defaults::medium(),
        }
    }
}

impl RelevanceThresholds {
    /// Band a similarity score.
    #[must_use]
    pub fn band(&self, score: f32) -> Relevance {
        if score > self.high {
            Relevance::High
        } else if score > self.medium {
            Relevance::Medium
        } else {
            Relevance::Low
        }
    }
}

/// Default values for the thresholds.
mod defaults {
    /// Default high threshold.
    pub const fn high() -> f32 {
        0.7
    }

    /// Default medium threshold.
    pub const fn medium() -> f32 {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands() {
        let thresholds = RelevanceThresholds::default();
        assert_eq!(thresholds.band(0.9), Relevance::High);
        assert_eq!(thresholds.band(0.6), Relevance::Medium);
        assert_eq!(thresholds.band(0.2), Relevance::Low);
        // Thresholds themselves fall into the band below
        assert_eq!(thresholds.band(0.7), Relevance::Medium);
        assert_eq!(thresholds.band(0.5), Relevance::Low);
    }

    #[test]
    fn custom_bands() {
        let thresholds = RelevanceThresholds {
            high: 0.9,
            medium: 0.8,
        };
        assert_eq!(thresholds.band(0.85), Relevance::Medium);
        assert_eq!(thresholds.band(0.75), Relevance::Low);
    }

    #[test]
    fn display_labels() {
        assert_eq!(Relevance::High.to_string(), "high");
        assert_eq!(Relevance::Medium.to_string(), "medium");
        assert_eq!(Relevance::Low.to_string(), "low");
    }
}
