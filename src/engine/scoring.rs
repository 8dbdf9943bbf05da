//! Pairwise similarity scoring between bank-side and ledger-side records

use bigdecimal::BigDecimal;

use crate::types::TransactionRecord;

/// Tuning knobs for similarity scoring and match commitment
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Absolute amount difference still treated as an exact amount match
    pub amount_tolerance: BigDecimal,
    /// Maximum day difference still earning partial date credit
    pub date_tolerance_days: i64,
    /// Minimum score required to commit a pairing
    pub match_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            // One cent, absorbing rounding differences between sources
            amount_tolerance: BigDecimal::from(1) / BigDecimal::from(100),
            date_tolerance_days: 3,
            match_threshold: 0.8,
        }
    }
}

// Component weights in hundredths; accumulating in integers keeps tier sums
// exact in the f64 returned to callers (a full match is 1.0, not 0.99…9).
const AMOUNT_WEIGHT: u32 = 40;
const AMOUNT_PARTIAL_WEIGHT: u32 = 20;
const DATE_WEIGHT: u32 = 30;
const DATE_PARTIAL_WEIGHT: u32 = 15;
const KIND_WEIGHT: u32 = 20;
const DESCRIPTION_WEIGHT: u32 = 10;
const DESCRIPTION_PARTIAL_WEIGHT: u32 = 5;

/// Computes a similarity score in `[0.0, 1.0]` between two records
///
/// The score is the sum of four independent weighted components: amount,
/// date, kind, and description. Each component contributes its full weight,
/// a fixed partial weight, or nothing; there is no smoothing between tiers.
pub struct SimilarityScorer {
    config: MatcherConfig,
}

impl SimilarityScorer {
    /// Create a scorer with the given configuration
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Score a bank-side record against a ledger-side candidate
    ///
    /// Pure and deterministic. The 5% partial-amount tolerance is relative to
    /// `a.amount`, so callers must keep a fixed argument order; the remaining
    /// components are symmetric.
    pub fn score(&self, a: &TransactionRecord, b: &TransactionRecord) -> f64 {
        let mut points: u32 = 0;

        // Amount: exact within the absolute tolerance, partial within 5%
        let amount_diff = (&a.amount - &b.amount).abs();
        if amount_diff <= self.config.amount_tolerance {
            points += AMOUNT_WEIGHT;
        } else if amount_diff <= (&a.amount * BigDecimal::from(5)) / BigDecimal::from(100) {
            points += AMOUNT_PARTIAL_WEIGHT;
        }

        // Date: day granularity only, time of day is ignored
        let day_diff = (a.date.date() - b.date.date()).num_days().abs();
        if day_diff == 0 {
            points += DATE_WEIGHT;
        } else if day_diff <= self.config.date_tolerance_days {
            points += DATE_PARTIAL_WEIGHT;
        }

        // Kind: no partial credit
        if a.kind == b.kind {
            points += KIND_WEIGHT;
        }

        // Description: case-folded and trimmed, exact or substring
        let desc_a = a.description.trim().to_lowercase();
        let desc_b = b.description.trim().to_lowercase();
        if desc_a == desc_b {
            points += DESCRIPTION_WEIGHT;
        } else if desc_a.contains(&desc_b) || desc_b.contains(&desc_a) {
            points += DESCRIPTION_PARTIAL_WEIGHT;
        }

        f64::from(points) / 100.0
    }

    /// The configured minimum score for committing a pairing
    pub fn match_threshold(&self) -> f64 {
        self.config.match_threshold
    }
}
