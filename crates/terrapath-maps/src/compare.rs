//! Side-by-side run of both searches on the same endpoints.

use std::fmt;
use std::time::{Duration, Instant};

use terrapath_core::{Grid, Point};
use terrapath_search::{PathFinder, SearchError, SearchResult};

/// One search outcome with its wall-clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmReport {
    pub result: SearchResult,
    pub elapsed: Duration,
}

impl AlgorithmReport {
    pub fn nodes_visited(&self) -> usize {
        self.result.closed.len()
    }

    /// Steps along the path, `None` if no path was found.
    pub fn path_length(&self) -> Option<usize> {
        self.result.is_found().then_some(self.result.steps())
    }

    pub fn path_cost(&self) -> Option<f64> {
        self.result.is_found().then_some(self.result.cost)
    }
}

/// Dijkstra and A* run on the same request.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub dijkstra: AlgorithmReport,
    pub a_star: AlgorithmReport,
}

impl Comparison {
    /// Closed cells saved by A*, negative if it closed more.
    pub fn nodes_saved(&self) -> i64 {
        self.dijkstra.nodes_visited() as i64 - self.a_star.nodes_visited() as i64
    }
}

fn cell<T: fmt::Display>(v: Option<T>) -> String {
    v.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, a) = (&self.dijkstra, &self.a_star);
        writeln!(f, "{:<14} {:>12} {:>12}", "Metric", "Dijkstra", "A*")?;
        writeln!(f, "{}", "-".repeat(40))?;
        writeln!(
            f,
            "{:<14} {:>12} {:>12}",
            "Nodes visited",
            d.nodes_visited(),
            a.nodes_visited()
        )?;
        writeln!(
            f,
            "{:<14} {:>12} {:>12}",
            "Path length",
            cell(d.path_length()),
            cell(a.path_length())
        )?;
        writeln!(
            f,
            "{:<14} {:>12} {:>12}",
            "Path cost",
            cell(d.path_cost().map(|c| format!("{c:.2}"))),
            cell(a.path_cost().map(|c| format!("{c:.2}")))
        )?;
        writeln!(
            f,
            "{:<14} {:>12} {:>12}",
            "Time (ms)",
            format!("{:.3}", d.elapsed.as_secs_f64() * 1000.0),
            format!("{:.3}", a.elapsed.as_secs_f64() * 1000.0)
        )
    }
}

/// Run Dijkstra then A* from `start` to `end`, timing each.
///
/// The pathfinder is reused; each search resets its state first.
pub fn compare(
    pf: &mut PathFinder,
    grid: &Grid,
    start: Point,
    end: Point,
    avoid_hazard: bool,
) -> Result<Comparison, SearchError> {
    let t = Instant::now();
    let d = pf.dijkstra(grid, start, end, avoid_hazard)?;
    let dijkstra = AlgorithmReport {
        result: d,
        elapsed: t.elapsed(),
    };

    let t = Instant::now();
    let a = pf.a_star(grid, start, end, avoid_hazard)?;
    let a_star = AlgorithmReport {
        result: a,
        elapsed: t.elapsed(),
    };

    log::info!(
        "{start} -> {end}: dijkstra closed {}, a* closed {}",
        dijkstra.nodes_visited(),
        a_star.nodes_visited()
    );
    Ok(Comparison { dijkstra, a_star })
}
