use std::{
    io::{self, Write},
    sync::{
        Arc, RwLock,
        mpsc::{self, Sender, TryRecvError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use colored::Colorize;

use crate::{State, renderer};

/// Advances the shared engine on its own thread until stopped. Ticks are skipped while no cell is alive.
pub struct TickerHost {
    stop_sender: Sender<()>,
    rate_sender: Sender<Duration>,
    handle: JoinHandle<()>,
}

impl TickerHost {
    pub fn start(state_arc: Arc<RwLock<State>>, mut interval: Duration, print: bool) -> Self {
        let (stop_sender, stop_receiver) = mpsc::channel();
        let (rate_sender, rate_receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut idle = false;

            loop {
                let Ok(mut state) = state_arc.write() else {
                    break;
                };

                // Checked under the lock, so a stop sent by a command holding it is never missed.
                // A dropped host counts as a stop request too.
                if !matches!(stop_receiver.try_recv(), Err(TryRecvError::Empty)) {
                    break;
                }

                // A dead grid skips the tick but keeps the timer going, so cells toggled in
                // later start animating without another `start`.
                let snapshot = if state.engine.is_active() {
                    state.engine.advance_generation();
                    Some(state.engine.snapshot())
                } else {
                    None
                };
                drop(state);

                if print {
                    match &snapshot {
                        Some(snapshot) => {
                            let mut stdout = io::stdout().lock();
                            let _ = write!(stdout, "{}", renderer::render(snapshot));
                            let _ = stdout.flush();
                        }
                        None if !idle => {
                            println!("{}", "All cells are dead, waiting".yellow());
                        }
                        None => {}
                    }
                }
                idle = snapshot.is_none();

                if let Some(rate) = rate_receiver.try_iter().last() {
                    interval = rate;
                }

                spin_sleep::sleep(interval);
            }
        });

        Self {
            stop_sender,
            rate_sender,
            handle,
        }
    }

    /// Asks the thread to stop after its current tick. Does not wait for it.
    pub fn stop(self) {
        // The thread is already gone if the state lock was poisoned.
        let _ = self.stop_sender.send(());
    }

    pub fn set_rate(&self, interval: Duration) {
        let _ = self.rate_sender.send(interval);
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}
