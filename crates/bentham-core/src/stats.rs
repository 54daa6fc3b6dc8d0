//! Segregation statistics for a town.

use crate::{Colour, NeighbourCounts};
use serde::{Deserialize, Serialize};

/// Aggregate view of how segregated a town is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegregationStats {
    /// Number of red houses
    pub red: usize,
    /// Number of blue houses
    pub blue: usize,
    /// Number of empty sites
    pub empty: usize,
    /// Mean share of same-coloured neighbours over all houses
    pub mean_similarity: f64,
    /// Houses that would relocate if selected
    pub dissatisfied: usize,
}

impl SegregationStats {
    /// Build statistics from every house's colour and neighbourhood.
    pub fn from_houses<I>(houses: I, empty: usize, threshold: f64) -> Self
    where
        I: IntoIterator<Item = (Colour, NeighbourCounts)>,
    {
        let mut stats = Self {
            empty,
            ..Default::default()
        };
        let mut similarity_sum = 0.0;

        for (colour, counts) in houses {
            match colour {
                Colour::Red => stats.red += 1,
                Colour::Blue => stats.blue += 1,
            }

            let fraction = counts.similar_fraction(colour);
            similarity_sum += fraction;
            if fraction < threshold {
                stats.dissatisfied += 1;
            }
        }

        let occupied = stats.occupied();
        if occupied > 0 {
            stats.mean_similarity = similarity_sum / occupied as f64;
        }

        stats
    }

    pub fn occupied(&self) -> usize {
        self.red + self.blue
    }

    /// Share of houses that are dissatisfied (0.0 for an empty town)
    pub fn dissatisfied_share(&self) -> f64 {
        match self.occupied() {
            0 => 0.0,
            occupied => self.dissatisfied as f64 / occupied as f64,
        }
    }
}
