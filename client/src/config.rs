use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, bail};
use clap::Parser;
use libgame::{Boundary, Rule};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROWS: usize = 40;
pub const DEFAULT_COLS: usize = 40;
pub const DEFAULT_FILL_PROBABILITY: f64 = 0.3;
pub const DEFAULT_INTERVAL_MS: u64 = 100;
pub const MIN_INTERVAL_MS: u64 = 1;
pub const MAX_INTERVAL_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,

    /// Chance for each cell to start alive when the board is (re)filled.
    pub fill_probability: f64,

    pub boundary: Boundary,
    pub rule: Rule,

    /// Delay between generations while the ticker runs.
    pub interval_ms: u64,

    /// Fixed seed for reproducible boards. A random one is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            fill_probability: DEFAULT_FILL_PROBABILITY,
            boundary: Boundary::default(),
            rule: Rule::default(),
            interval_ms: DEFAULT_INTERVAL_MS,
            seed: None,
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;
        Ok(config)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Parses a ticker interval typed at the prompt, with the same limits as `--interval-ms`.
pub fn parse_interval_ms(arg: &str) -> anyhow::Result<u64> {
    let interval_ms = arg.parse::<u64>().context("invalid interval")?;
    if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&interval_ms) {
        bail!("interval must be between {MIN_INTERVAL_MS} and {MAX_INTERVAL_MS} ms");
    }
    Ok(interval_ms)
}

/// Terminal Game of Life. Reads commands from stdin, one per line.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// JSON config file. Flags given on the command line take precedence over it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "ROWS")]
    pub rows: Option<usize>,

    #[arg(long, value_name = "COLS")]
    pub cols: Option<usize>,

    /// Probability, from 0 to 1, that a cell starts alive.
    #[arg(long = "fill", value_name = "PROBABILITY")]
    pub fill_probability: Option<f64>,

    /// Seed for the board's random fill.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge handling: "bounded" or "toroidal".
    #[arg(long)]
    pub boundary: Option<Boundary>,

    /// Birth/survival rule in B/S notation, for example B3/S23.
    #[arg(long)]
    pub rule: Option<Rule>,

    /// Milliseconds between generations while running.
    #[arg(
        long = "interval-ms",
        value_name = "MILLISECONDS",
        value_parser = clap::value_parser!(u64).range(MIN_INTERVAL_MS..=MAX_INTERVAL_MS)
    )]
    pub interval_ms: Option<u64>,
}

impl CliArgs {
    pub fn resolve_config(self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Couldn't load config from {}", path.display()))?,
            None => Config::default(),
        };

        self.apply_to(&mut config);
        Ok(config)
    }

    fn apply_to(self, config: &mut Config) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(fill_probability) = self.fill_probability {
            config.fill_probability = fill_probability;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(boundary) = self.boundary {
            config.boundary = boundary;
        }
        if let Some(rule) = self.rule {
            config.rule = rule;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }
    }
}
