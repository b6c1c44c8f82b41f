//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use pathviz_search::Algorithm;

use crate::config::{ConfigLoadError, PathvizConfig};

/// Watch BFS, greedy best-first and A* search a grid, step by step.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path [default: configs/pathviz.yaml if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board rows
    #[arg(long)]
    pub rows: Option<i32>,

    /// Board columns
    #[arg(long)]
    pub cols: Option<i32>,

    /// Search algorithm: bfs, gbfs or astar
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Run once on a random board and print the result instead of opening
    /// the terminal UI
    #[arg(long)]
    pub headless: bool,

    /// Seed for random walls
    #[arg(long)]
    pub seed: Option<u64>,

    /// Share of empty cells turned into walls (0 to 1)
    #[arg(long)]
    pub density: Option<f64>,
}

impl Args {
    /// Load the configuration file and apply the flags on top of it.
    pub fn resolve(&self) -> Result<PathvizConfig, ConfigLoadError> {
        let mut config = match &self.config {
            Some(path) => PathvizConfig::load(path)?,
            None => PathvizConfig::load_default()?,
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Override `config` with every flag that was given.
    pub fn apply(&self, config: &mut PathvizConfig) {
        if let Some(rows) = self.rows {
            config.grid.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.grid.cols = cols;
        }
        if let Some(algorithm) = self.algorithm {
            config.run.algorithm = algorithm;
        }
        if let Some(seed) = self.seed {
            config.walls.seed = Some(seed);
        }
        if let Some(density) = self.density {
            config.walls.density = density;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "pathviz",
            "--rows",
            "7",
            "--algorithm",
            "bfs",
            "--seed",
            "9",
            "--headless",
        ])
        .unwrap();
        assert!(args.headless);
        let mut config = PathvizConfig::default();
        args.apply(&mut config);
        assert_eq!(config.grid.rows, 7);
        assert_eq!(config.grid.cols, 40);
        assert_eq!(config.run.algorithm, Algorithm::Bfs);
        assert_eq!(config.walls.seed, Some(9));
        assert_eq!(config.walls.density, 0.25);
    }

    #[test]
    fn no_flags_change_nothing() {
        let args = Args::try_parse_from(["pathviz"]).unwrap();
        let mut config = PathvizConfig::default();
        args.apply(&mut config);
        assert_eq!(config, PathvizConfig::default());
    }

    #[test]
    fn algorithm_names() {
        let args = Args::try_parse_from(["pathviz", "-a", "gbfs"]).unwrap();
        assert_eq!(args.algorithm, Some(Algorithm::Greedy));
        assert!(Args::try_parse_from(["pathviz", "-a", "dfs"]).is_err());
    }

    #[test]
    fn invalid_override_is_rejected() {
        let argv = ["pathviz", "--config", "no/such/file.yaml"];
        let args = Args::try_parse_from(argv).unwrap();
        assert!(matches!(args.resolve(), Err(ConfigLoadError::Io(_))));

        let mut config = PathvizConfig::default();
        Args::try_parse_from(["pathviz", "--density", "2"])
            .unwrap()
            .apply(&mut config);
        assert!(config.validate().is_err());
    }
}
