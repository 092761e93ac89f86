//! Derivation of the H1/H2/H3 font-size bands.

/// Sizes must exceed the body size by this factor to define a heading tier.
const RELEVANT_BODY_MARGIN: f64 = 1.05;

/// Step down from one tier to the next when a tier has no size of its own.
const TIER_STEP: f64 = 0.9;

/// Sizes above which a missing tier is stepped down rather than copied.
const H2_STEP_MIN: f64 = 12.0;
const H3_STEP_MIN: f64 = 10.0;

/// Factor applied when a tier collides with the one above it.
const COLLISION_STEP: f64 = 0.95;

/// Adjacent tiers closer than this are considered collapsed.
const MIN_TIER_GAP: f64 = 1.0;
const TIER_GAP_CORRECTION: f64 = 1.5;

/// Headings must exceed the body size by this factor.
const MIN_HEADING_BODY_RATIO: f64 = 1.1;

/// Minimum heading size when no body size is known.
const MIN_HEADING_FALLBACK: f64 = 12.0;

/// Minimum font size for each heading level.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeThresholds {
    pub h1: f64,
    pub h2: f64,
    pub h3: f64,
    /// No run smaller than this is a size-qualified heading
    pub min_heading_size: f64,
}

impl SizeThresholds {
    /// Derive thresholds from every observed font size and the body size.
    ///
    /// `font_sizes` may contain duplicates and be in any order.
    pub fn derive(font_sizes: &[f64], body_size: Option<f64>) -> Self {
        let distinct = Self::distinct_sizes(font_sizes);
        let relevant: Vec<f64> = match body_size {
            Some(body) => distinct
                .into_iter()
                .filter(|s| *s > body * RELEVANT_BODY_MARGIN)
                .collect(),
            None => distinct,
        };

        let (mut h1, mut h2, mut h3) = (0.0, 0.0, 0.0);

        if let Some(&largest) = relevant.first() {
            h1 = largest;
            h2 = match relevant.get(1) {
                Some(&second) => second,
                None if h1 > H2_STEP_MIN => h1 * TIER_STEP,
                None => h1,
            };
            h3 = match relevant.get(2) {
                Some(&third) => third,
                None if h2 > H3_STEP_MIN => h2 * TIER_STEP,
                None => h2,
            };
        }

        if let Some(&second) = relevant.get(1) {
            if h2 >= h1 {
                h2 = if h1 > second {
                    (h1 + second) / 2.0
                } else {
                    h1 * COLLISION_STEP
                };
            }
        }
        if let Some(&third) = relevant.get(2) {
            if h3 >= h2 {
                h3 = if h2 > third {
                    (h2 + third) / 2.0
                } else {
                    h2 * COLLISION_STEP
                };
            }
        }

        if h1 - h2 < MIN_TIER_GAP && h2 > MIN_TIER_GAP {
            h2 = f64::max(h2, h1 - TIER_GAP_CORRECTION);
        }
        if h2 - h3 < MIN_TIER_GAP && h3 > MIN_TIER_GAP {
            h3 = f64::max(h3, h2 - TIER_GAP_CORRECTION);
        }

        let min_heading_size = match body_size {
            Some(body) if body != 0.0 => body * MIN_HEADING_BODY_RATIO,
            _ => MIN_HEADING_FALLBACK,
        };

        Self {
            h1,
            h2,
            h3,
            min_heading_size,
        }
    }

    /// Distinct sizes, largest first.
    pub fn distinct_sizes(font_sizes: &[f64]) -> Vec<f64> {
        let mut sizes = font_sizes.to_vec();
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes.dedup();
        sizes
    }

    /// Whether the bands are ordered `h1 >= h2 >= h3 >= 0`.
    pub fn is_ordered(&self) -> bool {
        self.h1 >= self.h2 && self.h2 >= self.h3 && self.h3 >= 0.0
    }
}
