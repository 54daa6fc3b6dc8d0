//! Simulation driver: initialize a town and run a fixed number of steps.

use crate::grid::Grid;
use crate::town::{StepOutcome, Town};
use bentham_core::{Result, RunConfig, SegregationStats};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

pub struct Simulation {
    town: Town,
    config: RunConfig,
}

impl Simulation {
    pub fn new(config: RunConfig) -> Result<Self> {
        config.validate()?;

        let mut town = Town::new(&config.town, config.seed)?;
        town.initialize(&config.population)?;

        Ok(Self {
            town,
            config,
        })
    }

    /// Run the simulation for the configured number of steps, consuming it
    #[instrument(skip(self), fields(num_steps = self.config.num_steps, seed = self.config.seed))]
    pub fn run(mut self) -> Result<SimulationResult> {
        info!("Starting simulation for {} steps", self.config.num_steps);

        let initial_stats = self.town.stats();
        self.emit_stats("initial_state", &initial_stats);

        let mut relocations = 0u64;

        for step in 0..self.config.num_steps {
            if let StepOutcome::Relocated { .. } = self.town.step()? {
                relocations += 1;
            }

            if step > 0 && step % self.config.log_interval == 0 {
                let stats = self.town.stats();
                info!(
                    event = "progress",
                    step,
                    relocations,
                    mean_similarity = format!("{:.4}", stats.mean_similarity),
                    dissatisfied = stats.dissatisfied,
                    "Step {}/{}",
                    step,
                    self.config.num_steps
                );
            }
        }

        let final_stats = self.town.stats();
        self.emit_stats("final_state", &final_stats);
        info!(
            event = "run_summary",
            total_steps = self.config.num_steps,
            relocations,
            "Simulation complete"
        );

        Ok(SimulationResult {
            total_steps: self.config.num_steps,
            relocations,
            initial_stats,
            final_stats,
            grid: self.town.grid().clone(),
        })
    }

    fn emit_stats(&self, event: &str, stats: &SegregationStats) {
        debug!(
            event,
            red = stats.red,
            blue = stats.blue,
            empty = stats.empty,
            mean_similarity = format!("{:.4}", stats.mean_similarity),
            dissatisfied = stats.dissatisfied,
            dissatisfied_share = format!("{:.2}%", stats.dissatisfied_share() * 100.0),
            "Town statistics"
        );
    }

    pub fn town(&self) -> &Town {
        &self.town
    }
}

/// Outcome of a run, including the final grid for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub total_steps: u64,
    pub relocations: u64,
    pub initial_stats: SegregationStats,
    pub final_stats: SegregationStats,
    pub grid: Grid,
}

impl SimulationResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
