//! Shared code for the `findpath` demo: argument handling, map loading or
//! generation, endpoint selection and rendering.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use meetpath_core::{Point, WalkMap};
use meetpath_gen::{CellularAutomataRule, FourDirectionWalker, MapGen};
use meetpath_paths::{PathOutcome, SearchStats, shortest_path_with_stats};

const COL_WALL: Color = Color::Rgb { r: 100, g: 100, b: 130 };
const COL_FLOOR: Color = Color::Rgb { r: 60, g: 55, b: 50 };
const COL_PATH: Color = Color::Rgb { r: 50, g: 180, b: 255 };
const COL_ENDPOINT: Color = Color::Rgb { r: 255, g: 220, b: 80 };

/// How to generate a map when none is loaded from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CaveKind {
    /// Drunk-walk cave carved from the centre.
    Walk,
    /// Cellular-automata smoothed cave.
    Automata,
    /// Independent random cells.
    Noise,
}

/// Find and draw a shortest path on a generated or loaded grid map.
#[derive(Debug, Clone, Parser)]
#[command(name = "findpath", version, about)]
pub struct DemoConfig {
    /// ASCII map to load (`.` open, `#` blocked) instead of generating one.
    #[arg(long)]
    pub map: Option<PathBuf>,
    /// Width of a generated map.
    #[arg(long, default_value_t = 60)]
    pub width: usize,
    /// Height of a generated map.
    #[arg(long, default_value_t = 20)]
    pub height: usize,
    /// Generator to use.
    #[arg(long, value_enum, default_value_t = CaveKind::Walk)]
    pub cave: CaveKind,
    /// Fraction of open cells aimed for by the generator.
    #[arg(long, default_value_t = 0.45)]
    pub open: f64,
    /// RNG seed for map generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Start cell as `x,y`. Defaults to the first open cell.
    #[arg(long, value_parser = parse_point)]
    pub start: Option<Point>,
    /// Target cell as `x,y`. Defaults to the last open cell.
    #[arg(long, value_parser = parse_point)]
    pub target: Option<Point>,
    /// Print without colours.
    #[arg(long)]
    pub plain: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            map: None,
            width: 60,
            height: 20,
            cave: CaveKind::Walk,
            open: 0.45,
            seed: 42,
            start: None,
            target: None,
            plain: false,
        }
    }
}

/// Parse `x,y` into a [`Point`].
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

/// Load the configured map file, or generate a map from the seed.
pub fn build_map(cfg: &DemoConfig) -> Result<WalkMap, Box<dyn Error>> {
    if let Some(path) = &cfg.map {
        let text = std::fs::read_to_string(path)?;
        let map = WalkMap::from_ascii(&text)?;
        log::info!(
            "loaded {}x{} map from {}",
            map.width(),
            map.height(),
            path.display()
        );
        return Ok(map);
    }

    let mut mg = MapGen::new(cfg.width, cfg.height, StdRng::seed_from_u64(cfg.seed));
    match cfg.cave {
        CaveKind::Walk => {
            mg.random_walk_cave(&FourDirectionWalker, cfg.open, 64);
        }
        CaveKind::Automata => {
            mg.cellular_automata_cave(1.0 - cfg.open, &[CellularAutomataRule::default()]);
        }
        CaveKind::Noise => {
            mg.noise(cfg.open);
        }
    }
    Ok(mg.into_map())
}

/// The configured endpoints, falling back to the first and last open cells
/// in row-major order. `None` if the map has no open cell to fall back on.
pub fn pick_endpoints(map: &WalkMap, cfg: &DemoConfig) -> Option<(Point, Point)> {
    let mut open = map.bounds().iter().filter(|&p| map.is_open(p));
    let first = open.next();
    let last = open.last().or(first);
    let start = cfg.start.or(first)?;
    let target = cfg.target.or(last)?;
    Some((start, target))
}

/// A finished demo query.
#[derive(Debug, Clone)]
pub struct Report {
    pub map: WalkMap,
    pub start: Point,
    pub target: Point,
    pub outcome: PathOutcome,
    pub stats: SearchStats,
}

/// Build the map, pick endpoints and run the search.
pub fn run(cfg: &DemoConfig) -> Result<Report, Box<dyn Error>> {
    let map = build_map(cfg)?;
    let (start, target) = pick_endpoints(&map, cfg).ok_or("map has no open cells")?;
    let (outcome, stats) = shortest_path_with_stats(map.view(), start, target);
    Ok(Report {
        map,
        start,
        target,
        outcome,
        stats,
    })
}

/// What to draw in one map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Floor,
    Path,
    Start,
    Target,
}

impl Glyph {
    pub fn ch(self) -> char {
        match self {
            Glyph::Wall => '#',
            Glyph::Floor => '.',
            Glyph::Path => '*',
            Glyph::Start => 'S',
            Glyph::Target => 'T',
        }
    }

    fn color(self) -> Color {
        match self {
            Glyph::Wall => COL_WALL,
            Glyph::Floor => COL_FLOOR,
            Glyph::Path => COL_PATH,
            Glyph::Start | Glyph::Target => COL_ENDPOINT,
        }
    }
}

/// Lay out the glyphs of `report`, row by row.
pub fn glyphs(report: &Report) -> Vec<Vec<Glyph>> {
    let map = &report.map;
    let mut rows = vec![vec![Glyph::Wall; map.width()]; map.height()];
    for p in map.bounds() {
        if map.is_open(p) {
            rows[p.y as usize][p.x as usize] = Glyph::Floor;
        }
    }
    if let Some(path) = report.outcome.path() {
        for p in path.points(map.width()) {
            rows[p.y as usize][p.x as usize] = Glyph::Path;
        }
    }
    for (p, g) in [(report.start, Glyph::Start), (report.target, Glyph::Target)] {
        if map.bounds().contains(p) {
            rows[p.y as usize][p.x as usize] = g;
        }
    }
    rows
}

/// Render `report` as plain text, one line per map row.
pub fn render_plain(report: &Report) -> String {
    let mut out = String::new();
    for row in glyphs(report) {
        out.extend(row.into_iter().map(Glyph::ch));
        out.push('\n');
    }
    out
}

/// Write `report` to `w` with terminal colours.
pub fn render_colored(report: &Report, w: &mut impl Write) -> io::Result<()> {
    for row in glyphs(report) {
        for g in row {
            queue!(w, SetForegroundColor(g.color()), Print(g.ch()))?;
        }
        queue!(w, ResetColor, Print('\n'))?;
    }
    w.flush()
}

/// One-line summary of the search result.
pub fn summary(report: &Report) -> String {
    let visited = format!(
        "visited {} cells ({} from start, {} from target)",
        report.stats.visited(),
        report.stats.start_visited,
        report.stats.target_visited
    );
    match &report.outcome {
        PathOutcome::SameCell => format!("{} is both start and target", report.start),
        PathOutcome::Found(path) => format!(
            "{} -> {}: {} moves, met at {}; {visited}",
            report.start,
            report.target,
            path.len(),
            report.map.view().point(path.meeting())
        ),
        PathOutcome::NoPath => format!("{} -> {}: no path; {visited}", report.start, report.target),
    }
}
