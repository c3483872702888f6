use std::fmt::Write;

use colored::Colorize;
use libgame::{CellState, Snapshot};

/// Draws a snapshot as text: a status line, then one line per grid row.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    let status = format!(
        "generation {} | {} alive",
        snapshot.generation(),
        snapshot.alive_count()
    );
    let _ = writeln!(out, "{}", status.bold());

    for row in snapshot.rows_iter() {
        for cell in row {
            let symbol = match cell {
                CellState::Alive => "#".green(),
                CellState::Dead => ".".dimmed(),
            };
            let _ = write!(out, "{symbol}");
        }
        out.push('\n');
    }

    out
}
