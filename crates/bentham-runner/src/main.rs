//! Command-line driver for the Bentham segregation simulation.

mod render;
mod telemetry;

use anyhow::{Context, Result};
use bentham_core::RunConfig;
use bentham_town::Simulation;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[clap(name = "bentham")]
#[clap(version)]
#[clap(max_term_width = 80)]
#[clap(about = "Schelling segregation on a toroidal town", long_about = None)]
struct Cli {
    /// JSON run configuration; flags below override its fields
    #[clap(long)]
    config: Option<PathBuf>,

    /// Town width
    #[clap(long)]
    width: Option<i32>,

    /// Town height
    #[clap(long)]
    height: Option<i32>,

    /// Minimum share of same-coloured neighbours a house tolerates
    #[clap(long)]
    similarity: Option<f64>,

    /// Initial fraction of red houses
    #[clap(long)]
    red: Option<f64>,

    /// Initial fraction of blue houses
    #[clap(long)]
    blue: Option<f64>,

    /// Number of update steps
    #[clap(long)]
    steps: Option<u64>,

    /// Random seed
    #[clap(long)]
    seed: Option<u64>,

    /// Log progress every this many steps
    #[clap(long)]
    log_interval: Option<u64>,

    /// Write the run result (statistics and final grid) as JSON
    #[clap(long)]
    output: Option<PathBuf>,

    /// Do not draw the final town
    #[clap(long)]
    no_render: bool,

    /// Draw with plain characters instead of coloured blocks
    #[clap(long)]
    plain: bool,

    /// Emit logs as JSON
    #[clap(long)]
    json_logs: bool,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RunConfig::default(),
        };

        if let Some(width) = self.width {
            config.town.width = width;
        }
        if let Some(height) = self.height {
            config.town.height = height;
        }
        if let Some(similarity) = self.similarity {
            config.town.similarity = similarity;
        }
        if let Some(red) = self.red {
            config.population.red_fraction = red;
        }
        if let Some(blue) = self.blue {
            config.population.blue_fraction = blue;
        }
        if let Some(steps) = self.steps {
            config.num_steps = steps;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(log_interval) = self.log_interval {
            config.log_interval = log_interval;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.json_logs)?;

    let config = cli.run_config()?;
    info!(
        width = config.town.width,
        height = config.town.height,
        similarity = config.town.similarity,
        red_fraction = config.population.red_fraction,
        blue_fraction = config.population.blue_fraction,
        "Starting Bentham"
    );

    let simulation = Simulation::new(config)?;
    let started = Instant::now();
    let result = simulation.run()?;
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        relocations = result.relocations,
        mean_similarity = format!("{:.4}", result.final_stats.mean_similarity),
        "Run finished"
    );

    if let Some(path) = &cli.output {
        std::fs::write(path, result.to_json()?)
            .with_context(|| format!("writing result {}", path.display()))?;
        info!("Result written to {}", path.display());
    }

    if !cli.no_render {
        let palette = if cli.plain {
            render::Palette::Plain
        } else {
            render::Palette::Ansi
        };
        print!("{}", render::render(&result.grid, palette));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::parse_from(["bentham"]);
        let config = cli.run_config().unwrap();
        assert_eq!(config.num_steps, 300_000);
        assert_eq!(config.town.width, 100);
        assert!(!cli.no_render);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "bentham",
            "--width",
            "20",
            "--height",
            "10",
            "--similarity",
            "0.3",
            "--red",
            "0.25",
            "--steps",
            "42",
            "--seed",
            "9",
        ]);
        let config = cli.run_config().unwrap();
        assert_eq!(config.town.width, 20);
        assert_eq!(config.town.height, 10);
        assert_eq!(config.town.similarity, 0.3);
        assert_eq!(config.population.red_fraction, 0.25);
        assert_eq!(config.population.blue_fraction, 0.43);
        assert_eq!(config.num_steps, 42);
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::parse_from(["bentham", "--config", "/nonexistent/bentham.json"]);
        assert!(cli.run_config().is_err());
    }

    #[test]
    fn test_config_file_with_overrides() {
        let path = std::env::temp_dir().join(format!("bentham-test-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "num_steps": 12, "town": { "width": 6, "height": 6 } }"#)
            .unwrap();

        let cli = Cli::parse_from([
            "bentham",
            "--config",
            path.to_str().unwrap(),
            "--height",
            "8",
        ]);
        let config = cli.run_config().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.num_steps, 12);
        assert_eq!(config.town.width, 6);
        assert_eq!(config.town.height, 8);
    }
}
