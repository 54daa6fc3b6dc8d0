//! Configuration types for the simulation.

use crate::{Colour, Error, Result};
use serde::{Deserialize, Serialize};

/// Town geometry and the relocation rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TownConfig {
    /// Width of the town grid
    pub width: i32,
    /// Height of the town grid
    pub height: i32,
    /// Houses whose share of same-coloured neighbours falls below this
    /// threshold (0.0 to 1.0) relocate
    pub similarity: f64,
}

impl Default for TownConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            similarity: 0.63,
        }
    }
}

impl TownConfig {
    pub fn sites(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidConfig(format!(
                "town dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if self.width.checked_mul(self.height).is_none() {
            return Err(Error::InvalidConfig(format!(
                "town of {}x{} sites is too large",
                self.width, self.height
            )));
        }

        if !self.similarity.is_finite() || !(0.0..=1.0).contains(&self.similarity) {
            return Err(Error::InvalidConfig(format!(
                "similarity threshold must lie in [0, 1], got {}",
                self.similarity
            )));
        }

        Ok(())
    }
}

/// Initial share of the town taken by each colour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Fraction of sites holding red houses (0.0 to 1.0)
    pub red_fraction: f64,
    /// Fraction of sites holding blue houses (0.0 to 1.0)
    pub blue_fraction: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            red_fraction: 0.43,
            blue_fraction: 0.43,
        }
    }
}

impl PopulationConfig {
    pub fn fraction(&self, colour: Colour) -> f64 {
        match colour {
            Colour::Red => self.red_fraction,
            Colour::Blue => self.blue_fraction,
        }
    }

    /// Number of houses of `colour` placed on a town with `sites` cells
    pub fn house_count(&self, colour: Colour, sites: usize) -> usize {
        (self.fraction(colour) * sites as f64).round() as usize
    }

    /// Check the fractions and make sure at least one site stays free, since
    /// every relocation needs an empty destination.
    pub fn validate(&self, sites: usize) -> Result<()> {
        for colour in Colour::all() {
            let fraction = self.fraction(colour);
            if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
                return Err(Error::InvalidConfig(format!(
                    "{} fraction must lie in [0, 1], got {}",
                    colour, fraction
                )));
            }
        }

        let houses = self.house_count(Colour::Red, sites) + self.house_count(Colour::Blue, sites);
        if houses >= sites {
            return Err(Error::InvalidConfig(format!(
                "{} houses on {} sites leaves no free position (red {} + blue {})",
                houses, sites, self.red_fraction, self.blue_fraction
            )));
        }

        Ok(())
    }
}

/// A complete simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of update steps to run
    pub num_steps: u64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Emit a progress line every this many steps
    pub log_interval: u64,
    /// Town configuration
    pub town: TownConfig,
    /// Population configuration
    pub population: PopulationConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_steps: 300_000,
            seed: 0,
            log_interval: 50_000,
            town: TownConfig::default(),
            population: PopulationConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> Result<()> {
        self.town.validate()?;
        self.population.validate(self.town.sites())?;

        if self.log_interval == 0 {
            return Err(Error::InvalidConfig(
                "log interval must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
