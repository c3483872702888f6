use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, anyhow};
use clap::Parser;
use libgame::Engine;
use rand::{SeedableRng, rngs::StdRng};

use config::{CliArgs, Config};
use ticker::TickerHost;

mod cli;
mod config;
mod renderer;
mod ticker;

pub struct State {
    engine: Engine,
    rng: StdRng,
    config: Config,
    ticker: Option<TickerHost>,
    print_ticks: bool,
}

impl State {
    pub fn new(engine: Engine, rng: StdRng, config: Config) -> Self {
        Self {
            engine,
            rng,
            config,
            ticker: None,
            print_ticks: true,
        }
    }

    /// Stopping an idle driver is a no-op.
    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }
}

pub fn read_state(state_arc: &Arc<RwLock<State>>) -> anyhow::Result<RwLockReadGuard<'_, State>> {
    state_arc.read().map_err(|_| anyhow!("State lock poisoned"))
}

pub fn write_state(state_arc: &Arc<RwLock<State>>) -> anyhow::Result<RwLockWriteGuard<'_, State>> {
    state_arc.write().map_err(|_| anyhow!("State lock poisoned"))
}

fn main() -> anyhow::Result<()> {
    let config = CliArgs::parse().resolve_config()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let engine = Engine::initialize(config.rows, config.cols, config.fill_probability, &mut rng)
        .context("Couldn't create grid")?
        .with_rule(config.rule.clone())
        .with_boundary(config.boundary);

    print!("{}", renderer::render(&engine.snapshot()));

    let state_arc = Arc::new(RwLock::new(State::new(engine, rng, config)));
    cli::run_cli(state_arc)
}
