//! The town: houses on a torus and the relocation rule.

use crate::grid::Grid;
use crate::registry::PositionRegistry;
use bentham_core::{
    Cell, Colour, Error, NeighbourCounts, PopulationConfig, Position, Result, SegregationStats,
    TownConfig,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// What a single call to [`Town::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The selected house was similar enough to its neighbours
    Stayed { position: Position },
    /// The selected house moved to a random free site
    Relocated {
        colour: Colour,
        from: Position,
        to: Position,
    },
    /// There are no houses to select
    Vacant,
}

pub struct Town {
    grid: Grid,
    free: PositionRegistry,
    occupied: PositionRegistry,
    similarity: f64,
    rng: ChaCha8Rng,
}

impl Town {
    /// Create an empty town with every site free
    pub fn new(config: &TownConfig, seed: u64) -> Result<Self> {
        config.validate()?;

        let grid = Grid::new(config.width, config.height);
        let mut free = PositionRegistry::with_capacity(grid.len());
        free.extend(grid.positions());

        Ok(Self {
            occupied: PositionRegistry::with_capacity(grid.len()),
            free,
            grid,
            similarity: config.similarity,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Empty the town, then scatter red houses followed by blue houses over
    /// random free sites.
    #[instrument(skip(self, population), fields(width = self.grid.width, height = self.grid.height))]
    pub fn initialize(&mut self, population: &PopulationConfig) -> Result<()> {
        let sites = self.grid.len();
        population.validate(sites)?;

        self.grid.clear();
        self.occupied.clear();
        self.free.clear();
        self.free.extend(self.grid.positions());

        for colour in Colour::all() {
            let count = population.house_count(colour, sites);
            for _ in 0..count {
                self.place_random(colour)?;
            }
            debug!(%colour, count, "Placed houses");
        }

        Ok(())
    }

    /// Put a house of `colour` on a uniformly random free site
    pub fn place_random(&mut self, colour: Colour) -> Result<Position> {
        let index = self
            .free
            .choose_index(&mut self.rng)
            .ok_or(Error::NoFreePosition)?;
        let pos = self.free.swap_remove(index).ok_or(Error::NoFreePosition)?;

        self.occupied.insert(pos);
        self.grid.set(pos, colour.into());
        Ok(pos)
    }

    /// Put a house of `colour` on a specific free site
    pub fn place_at(&mut self, pos: Position, colour: Colour) -> Result<()> {
        let pos = pos.wrap(self.grid.width, self.grid.height);
        if !self.free.remove(pos) {
            return Err(Error::PositionOccupied(pos));
        }

        self.occupied.insert(pos);
        self.grid.set(pos, colour.into());
        Ok(())
    }

    /// Red and blue houses among the eight wrapped neighbours
    pub fn neighbour_counts(&self, pos: Position) -> NeighbourCounts {
        self.grid.neighbour_counts(pos)
    }

    /// Share of coloured neighbours matching `colour`, 0 for isolated sites
    pub fn similar_fraction(&self, colour: Colour, pos: Position) -> f64 {
        self.neighbour_counts(pos).similar_fraction(colour)
    }

    /// Pick a random house and move it to a random free site if too few of
    /// its neighbours share its colour.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let Some(index) = self.occupied.choose_index(&mut self.rng) else {
            return Ok(StepOutcome::Vacant);
        };
        let from = self
            .occupied
            .get(index)
            .ok_or_else(|| Error::InvalidState(format!("no occupied slot {}", index)))?;
        let colour = self.grid.get(from).colour().ok_or_else(|| {
            Error::InvalidState(format!("occupied position {} holds no house", from))
        })?;

        let fraction = self.similar_fraction(colour, from);
        if fraction >= self.similarity {
            return Ok(StepOutcome::Stayed { position: from });
        }

        self.occupied.swap_remove(index);
        self.grid.set(from, Cell::Empty);
        self.free.insert(from);

        let to = self.place_random(colour)?;
        trace!(%colour, %from, %to, fraction, "House relocated");

        Ok(StepOutcome::Relocated { colour, from, to })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn free_positions(&self) -> &PositionRegistry {
        &self.free
    }

    pub fn occupied_positions(&self) -> &PositionRegistry {
        &self.occupied
    }

    /// Number of houses of a colour
    pub fn count(&self, colour: Colour) -> usize {
        self.grid.count(colour.into())
    }

    /// Segregation statistics for the current layout
    pub fn stats(&self) -> SegregationStats {
        let houses = self.occupied.iter().filter_map(|pos| {
            self.grid
                .get(pos)
                .colour()
                .map(|colour| (colour, self.neighbour_counts(pos)))
        });
        SegregationStats::from_houses(houses, self.free.len(), self.similarity)
    }
}
