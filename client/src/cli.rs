use std::{
    io::{self, BufRead, Write},
    sync::{Arc, RwLock},
};

use anyhow::{Context, bail};
use colored::Colorize;

use crate::{
    State, config::parse_interval_ms, read_state, renderer, ticker::TickerHost, write_state,
};

pub enum Outcome {
    Continue,
    Exit,
}

pub fn run_cli(state_arc: Arc<RwLock<State>>) -> anyhow::Result<()> {
    for line_res in io::stdin().lock().lines() {
        let line = line_res.context("Couldn't read stdin")?;
        let args = line.split_whitespace();

        let mut stdout = io::stdout().lock();
        match handle_cmd(&state_arc, args, &mut stdout) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Exit) => break,
            Err(e) => eprintln!("{} {e:#}", "!".red()),
        }
    }

    if let Some(ticker) = write_state(&state_arc)?.ticker.take() {
        ticker.stop();
    }

    Ok(())
}

pub fn handle_cmd<'a, I, W>(
    state_arc: &Arc<RwLock<State>>,
    mut args: I,
    out: &mut W,
) -> anyhow::Result<Outcome>
where
    I: Iterator<Item = &'a str>,
    W: Write,
{
    let Some(cmd) = args.next() else {
        return Ok(Outcome::Continue);
    };

    match cmd {
        "new" => {
            let mut state = write_state(state_arc)?;
            let fill_probability = match args.next() {
                Some(arg) => arg.parse::<f64>().context("invalid fill probability")?,
                None => state.config.fill_probability,
            };

            let state = &mut *state;
            state.engine.randomize(fill_probability, &mut state.rng)?;
            write!(out, "{}", renderer::render(&state.engine.snapshot()))?;
        }

        "next" | "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            let mut state = write_state(state_arc)?;
            state.stop_ticker();
            for _ in 0..times {
                state.engine.advance_generation();
            }
            write!(out, "{}", renderer::render(&state.engine.snapshot()))?;
        }

        "start" | "run" => {
            let mut state = write_state(state_arc)?;
            if let Some(arg) = args.next() {
                state.config.interval_ms = parse_interval_ms(arg)?;
            }

            state.stop_ticker();
            let ticker =
                TickerHost::start(state_arc.clone(), state.config.interval(), state.print_ticks);
            state.ticker = Some(ticker);
        }

        "stop" => {
            write_state(state_arc)?.stop_ticker();
        }

        "rate" => {
            let interval_ms = parse_interval_ms(args.next().context("missing interval")?)?;

            let mut state = write_state(state_arc)?;
            state.config.interval_ms = interval_ms;
            if let Some(ticker) = &state.ticker {
                ticker.set_rate(state.config.interval());
            }
        }

        "clear" => {
            let mut state = write_state(state_arc)?;
            state.stop_ticker();
            state.engine.clear();
            write!(out, "{}", renderer::render(&state.engine.snapshot()))?;
        }

        "toggle" => {
            let row = args.next().context("missing row")?.parse::<usize>()?;
            let col = args.next().context("missing col")?.parse::<usize>()?;

            let mut state = write_state(state_arc)?;
            let new_state = state.engine.toggle((row, col))?;
            writeln!(out, "({row}, {col}) is now {new_state:?}")?;
        }

        "count" => {
            let row = args.next().context("missing row")?.parse::<usize>()?;
            let col = args.next().context("missing col")?.parse::<usize>()?;

            let state = read_state(state_arc)?;
            let count = state.engine.count_alive_neighbors((row, col))?;
            writeln!(out, "({row}, {col}) has {count} alive neighbors")?;
        }

        "show" => {
            let snapshot = read_state(state_arc)?.engine.snapshot();
            write!(out, "{}", renderer::render(&snapshot))?;
        }

        "exit" | "quit" => {
            return Ok(Outcome::Exit);
        }

        _ => bail!("Unknown command"),
    }

    writeln!(out, "{}", "OK".green())?;
    Ok(Outcome::Continue)
}

#[cfg(test)]
mod tests {
    use std::{
        thread,
        time::{Duration, Instant},
    };

    use libgame::{Engine, Grid};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::config::Config;

    fn state_with(alive: &[(usize, usize)]) -> Arc<RwLock<State>> {
        let grid = Grid::with_alive_cells(6, 6, alive.iter().copied()).unwrap();
        let mut state = State::new(Engine::new(grid), StdRng::seed_from_u64(3), Config::default());
        state.print_ticks = false;
        Arc::new(RwLock::new(state))
    }

    fn run(state_arc: &Arc<RwLock<State>>, line: &str) -> anyhow::Result<String> {
        let mut out = Vec::new();
        handle_cmd(state_arc, line.split_whitespace(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn next_advances_generations() {
        let state_arc = state_with(&[(2, 1), (2, 2), (2, 3)]);

        run(&state_arc, "next 3").unwrap();

        let state = state_arc.read().unwrap();
        assert_eq!(state.engine.generation(), 3);
        assert!(state.engine.snapshot().is_alive((1, 2)));
        assert!(!state.engine.snapshot().is_alive((2, 1)));
    }

    #[test]
    fn toggle_and_count() {
        let state_arc = state_with(&[]);

        run(&state_arc, "toggle 0 0").unwrap();
        run(&state_arc, "toggle 0 1").unwrap();
        let out = run(&state_arc, "count 1 1").unwrap();

        assert!(out.contains("has 2 alive neighbors"), "{out}");
    }

    #[test]
    fn bad_commands_leave_state_alone() {
        let state_arc = state_with(&[(1, 1)]);
        let before = state_arc.read().unwrap().engine.snapshot();

        assert!(run(&state_arc, "toggle 6 0").is_err());
        assert!(run(&state_arc, "toggle 1").is_err());
        assert!(run(&state_arc, "new 2.0").is_err());
        assert!(run(&state_arc, "dance").is_err());
        assert!(run(&state_arc, "start 0").is_err());
        assert!(run(&state_arc, "start 60001").is_err());
        assert!(run(&state_arc, "rate 90000").is_err());
        assert!(state_arc.read().unwrap().ticker.is_none());

        assert_eq!(state_arc.read().unwrap().engine.snapshot(), before);
    }

    #[test]
    fn new_and_clear() {
        let state_arc = state_with(&[]);

        run(&state_arc, "new 1").unwrap();
        assert_eq!(state_arc.read().unwrap().engine.alive_count(), 36);

        run(&state_arc, "clear").unwrap();
        assert!(!state_arc.read().unwrap().engine.is_active());
    }

    #[test]
    fn exit_ends_the_session() {
        let state_arc = state_with(&[]);
        let mut out = Vec::new();

        let outcome = handle_cmd(&state_arc, "exit".split_whitespace(), &mut out).unwrap();

        assert!(matches!(outcome, Outcome::Exit));
    }

    fn wait_for_generation(state_arc: &Arc<RwLock<State>>, at_least: u64) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while state_arc.read().unwrap().engine.generation() < at_least {
            assert!(Instant::now() < deadline, "generation never reached {at_least}");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn ticker_waits_through_extinction() {
        // The lone cell dies on the first tick; the ticker keeps going without advancing.
        let state_arc = state_with(&[(3, 3)]);
        run(&state_arc, "start 1").unwrap();
        wait_for_generation(&state_arc, 1);
        thread::sleep(Duration::from_millis(30));

        {
            let state = state_arc.read().unwrap();
            assert!(!state.engine.is_active());
            assert_eq!(state.engine.generation(), 1);
            assert!(state.ticker.as_ref().is_some_and(TickerHost::is_running));
        }

        // Placed under one lock so the ticker never sees a partial blinker.
        {
            let mut state = state_arc.write().unwrap();
            for cell in [(2, 1), (2, 2), (2, 3)] {
                state.engine.toggle(cell).unwrap();
            }
        }
        wait_for_generation(&state_arc, 3);

        run(&state_arc, "stop").unwrap();
        assert!(state_arc.read().unwrap().engine.is_active());
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let state_arc = state_with(&[(1, 1)]);

        run(&state_arc, "stop").unwrap();
        run(&state_arc, "stop").unwrap();

        assert_eq!(state_arc.read().unwrap().engine.generation(), 0);
    }

    #[test]
    fn rate_updates_the_configured_interval() {
        let state_arc = state_with(&[]);

        run(&state_arc, "rate 250").unwrap();

        assert_eq!(
            state_arc.read().unwrap().config.interval(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn stop_halts_a_running_ticker() {
        let state_arc = state_with(&[(2, 1), (2, 2), (2, 3)]);
        run(&state_arc, "start 1").unwrap();
        thread::sleep(Duration::from_millis(20));

        run(&state_arc, "stop").unwrap();
        let generation = state_arc.read().unwrap().engine.generation();
        thread::sleep(Duration::from_millis(20));

        assert_eq!(state_arc.read().unwrap().engine.generation(), generation);
        assert!(state_arc.read().unwrap().ticker.is_none());
    }
}
