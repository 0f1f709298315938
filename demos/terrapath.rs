//! Interactive Dijkstra versus A* comparison in the terminal.
//!
//! Run: cargo run --bin terrapath
//! Set `RUST_LOG=debug` to see per-search summaries.

use std::io;

use terrapath_demos::Session;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let stdin = io::stdin();
    let mut session = Session::new(rand::rng(), stdin.lock(), io::stdout());
    session.run()
}
