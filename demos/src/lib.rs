//! Interactive terminal demo comparing Dijkstra and A* on terrain maps.
//!
//! The session reads menu choices line by line and writes colored maps
//! and comparison tables. Input and output are generic so the loop can be
//! driven from tests.

use std::io::{self, BufRead, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use rand::Rng;
use terrapath_core::{Grid, Point};
use terrapath_maps::{
    Comparison, MapGen, Mark, RenderOverlay, SAMPLE_END, SAMPLE_START, compare, legend, marks,
    render::glyph, sample_map,
};
use terrapath_search::PathFinder;

// Colours
const COL_NORMAL: Color = Color::Rgb { r: 190, g: 190, b: 190 };
const COL_GRASS: Color = Color::Rgb { r: 80, g: 200, b: 80 };
const COL_SAND: Color = Color::Rgb { r: 230, g: 200, b: 120 };
const COL_WATER: Color = Color::Rgb { r: 60, g: 120, b: 230 };
const COL_MOUNTAIN: Color = Color::Rgb { r: 150, g: 110, b: 80 };
const COL_ROAD: Color = Color::Rgb { r: 120, g: 120, b: 120 };
const COL_CLOSED: Color = Color::Rgb { r: 200, g: 80, b: 200 };
const COL_PATH: Color = Color::Rgb { r: 255, g: 220, b: 80 };
const COL_ENDPOINT: Color = Color::Rgb { r: 220, g: 50, b: 50 };

const MENU_TEXT: &str = "\
1. Sample map
2. Random map
3. Quit";

/// Top-level menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Sample,
    Random,
    Quit,
}

impl MenuChoice {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(Self::Sample),
            "2" => Some(Self::Random),
            "3" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Parse a y/n answer, case-insensitively.
pub fn parse_yes_no(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Foreground colour for a terrain name. Custom terrains use the default.
fn terrain_color(name: &str) -> Color {
    match name {
        "normal" => COL_NORMAL,
        "grass" => COL_GRASS,
        "sand" => COL_SAND,
        "water" => COL_WATER,
        "mountain" => COL_MOUNTAIN,
        "road" => COL_ROAD,
        _ => Color::Reset,
    }
}

fn mark_color(grid: &Grid, p: Point, mark: Mark) -> Color {
    match mark {
        Mark::Terrain => grid
            .terrain_at(p)
            .map_or(Color::Reset, |t| terrain_color(&t.name)),
        Mark::Closed => COL_CLOSED,
        Mark::Path => COL_PATH,
        Mark::Start | Mark::End => COL_ENDPOINT,
    }
}

/// Write a colored rendering of `grid`, top row first.
pub fn draw_map<W: Write>(out: &mut W, grid: &Grid, overlay: &RenderOverlay) -> io::Result<()> {
    let bounds = grid.bounds();
    let marks = marks(grid, overlay);
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let Some(i) = bounds.index_of(p) else {
                continue;
            };
            let m = marks[i];
            if x > 0 {
                queue!(out, Print(' '))?;
            }
            queue!(
                out,
                SetForegroundColor(mark_color(grid, p, m)),
                Print(glyph(grid, p, m))
            )?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}

/// One interactive session.
pub struct Session<R: Rng, I: BufRead, O: Write> {
    mapgen: MapGen<R>,
    pf: PathFinder,
    input: I,
    out: O,
}

impl<R: Rng, I: BufRead, O: Write> Session<R, I, O> {
    pub fn new(rng: R, input: I, out: O) -> Self {
        Self {
            mapgen: MapGen::new(rng),
            pf: PathFinder::default(),
            input,
            out,
        }
    }

    /// Give back the output sink.
    pub fn into_output(self) -> O {
        self.out
    }

    /// Read one line, `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Run the menu loop until the user quits or input ends.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            writeln!(self.out, "\n{MENU_TEXT}")?;
            write!(self.out, "Choice: ")?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                log::debug!("end of input");
                return Ok(());
            };
            let map = match MenuChoice::parse(&line) {
                Some(MenuChoice::Quit) => return Ok(()),
                Some(MenuChoice::Sample) => Some((sample_map(), SAMPLE_START, SAMPLE_END)),
                Some(MenuChoice::Random) => self.random_map()?,
                None => {
                    writeln!(self.out, "Invalid choice, please enter 1, 2 or 3.")?;
                    continue;
                }
            };
            let Some((grid, start, end)) = map else {
                writeln!(self.out, "Could not place start and end, try again.")?;
                continue;
            };
            let Some(avoid) = self.ask_avoid_hazard()? else {
                return Ok(());
            };
            self.show(&grid, start, end, avoid)?;
        }
    }

    fn random_map(&mut self) -> Result<Option<(Grid, Point, Point)>, Box<dyn std::error::Error>> {
        let config = self.mapgen.random_config();
        let grid = self.mapgen.generate(&config)?;
        Ok(self
            .mapgen
            .random_endpoints(&grid)
            .map(|(start, end)| (grid, start, end)))
    }

    fn ask_avoid_hazard(&mut self) -> io::Result<Option<bool>> {
        loop {
            write!(self.out, "Avoid hazards? (y/n): ")?;
            self.out.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match parse_yes_no(&line) {
                Some(b) => return Ok(Some(b)),
                None => writeln!(self.out, "Please answer y or n.")?,
            }
        }
    }

    fn show(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        avoid_hazard: bool,
    ) -> Result<(), Box<dyn std::error::Error>> {
        writeln!(
            self.out,
            "\nMap {}x{}, start {start}, end {end}",
            grid.width(),
            grid.height()
        )?;
        draw_map(&mut self.out, grid, &RenderOverlay::endpoints(start, end))?;
        write!(self.out, "\n{}", legend(grid.catalog()))?;

        let c: Comparison = compare(&mut self.pf, grid, start, end, avoid_hazard)?;
        writeln!(self.out, "\n{c}")?;
        for report in [&c.dijkstra, &c.a_star] {
            let r = &report.result;
            writeln!(self.out, "{}:", r.algorithm)?;
            if !r.is_found() {
                writeln!(self.out, "No path found.")?;
            }
            let overlay = RenderOverlay::endpoints(start, end)
                .with_path(&r.path)
                .with_closed(&r.closed);
            draw_map(&mut self.out, grid, &overlay)?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    fn run_with(input: &str) -> String {
        let rng = StdRng::seed_from_u64(42);
        let mut s = Session::new(rng, Cursor::new(input.as_bytes().to_vec()), Vec::new());
        s.run().unwrap();
        String::from_utf8(s.into_output()).unwrap()
    }

    #[test]
    fn parse_menu() {
        assert_eq!(MenuChoice::parse(" 1\n"), Some(MenuChoice::Sample));
        assert_eq!(MenuChoice::parse("2"), Some(MenuChoice::Random));
        assert_eq!(MenuChoice::parse("3\r\n"), Some(MenuChoice::Quit));
        assert_eq!(MenuChoice::parse("4"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn parse_answers() {
        assert_eq!(parse_yes_no("Y\n"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no("maybe"), None);
    }

    #[test]
    fn quit_immediately() {
        let out = run_with("3\n");
        assert!(out.contains("Sample map"));
        assert!(!out.contains("Nodes visited"));
    }

    #[test]
    fn end_of_input_exits() {
        let out = run_with("");
        assert!(out.contains("Choice:"));
    }

    #[test]
    fn invalid_choice_retries() {
        let out = run_with("x\n3\n");
        assert!(out.contains("Invalid choice"));
        assert_eq!(out.matches("Choice:").count(), 2);
    }

    #[test]
    fn sample_round() {
        let out = run_with("1\nwhat\ny\n3\n");
        assert!(out.contains("Please answer y or n."));
        assert!(out.contains("Map 15x15, start (1, 1), end (13, 13)"));
        assert!(out.contains("Nodes visited"));
        assert!(out.contains("Dijkstra:"));
        assert!(out.contains("A*:"));
    }

    #[test]
    fn random_round() {
        let out = run_with("2\nn\n3\n");
        assert!(out.contains("Map "));
        assert!(out.contains("Path cost"));
    }

    #[test]
    fn draw_map_shape() {
        let grid = Grid::new(3, 2);
        let mut buf = Vec::new();
        draw_map(&mut buf, &grid, &RenderOverlay::endpoints(Point::new(0, 0), Point::new(2, 1)))
            .unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.matches('\n').count(), 2);
        assert!(s.contains('S'));
        assert!(s.contains('E'));
    }
}
