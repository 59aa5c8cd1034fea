//! Command-line handling and scenario setup for the `astar-demo` binary.

use std::fmt;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use gridpath_core::{GridMap, GridModel, InvalidGrid, SearchConfig};
use gridpath_search::{Outcome, Trace, run};

pub const USAGE: &str = "\
usage: astar-demo [options]

  --size RxC                 grid size (default 20x20)
  --density F                obstacle probability per cell, 0 to 1 (default 0.1)
  --seed N                   random seed (default 42)
  --diagonal strict|cutting  allow diagonal moves (default: 4-way only)
  --fps N                    playback frames per second at speed 1 (default 15)
  --headless                 print the final board instead of animating
  --help                     show this message
";

/// Diagonal movement mode chosen on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Diagonal {
    /// Both corners of a diagonal step must be free.
    Strict,
    /// At least one corner must be free.
    Cutting,
}

/// Options of one demo run.
#[derive(Clone, Debug, PartialEq)]
pub struct DemoArgs {
    pub rows: i32,
    pub cols: i32,
    pub density: f64,
    pub seed: u64,
    pub diagonal: Option<Diagonal>,
    pub fps: u32,
    pub headless: bool,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            density: 0.1,
            seed: 42,
            diagonal: None,
            fps: 15,
            headless: false,
        }
    }
}

/// What the binary was asked to do.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Run(DemoArgs),
    Help,
}

/// A rejected command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsError {
    UnknownFlag(String),
    MissingValue(&'static str),
    InvalidValue { flag: &'static str, value: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::UnknownFlag(flag) => write!(f, "unknown option `{flag}`"),
            ArgsError::MissingValue(flag) => write!(f, "option `{flag}` needs a value"),
            ArgsError::InvalidValue { flag, value } => {
                write!(f, "invalid value `{value}` for `{flag}`")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

/// Parse the arguments following the program name.
///
/// Values may be given as `--flag value` or `--flag=value`.
pub fn parse_args<I, S>(args: I) -> Result<Command, ArgsError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out = DemoArgs::default();
    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        let (name, inline) = match arg.split_once('=') {
            Some((n, v)) => (n.to_string(), Some(v.to_string())),
            None => (arg.clone(), None),
        };
        let mut value = |flag: &'static str| -> Result<String, ArgsError> {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or(ArgsError::MissingValue(flag))
        };
        match name.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--headless" => out.headless = true,
            "--size" => {
                let v = value("--size")?;
                (out.rows, out.cols) = parse_size(&v).ok_or(ArgsError::InvalidValue {
                    flag: "--size",
                    value: v,
                })?;
            }
            "--density" => {
                let v = value("--density")?;
                out.density = v
                    .parse::<f64>()
                    .ok()
                    .filter(|d| (0.0..=1.0).contains(d))
                    .ok_or(ArgsError::InvalidValue {
                        flag: "--density",
                        value: v,
                    })?;
            }
            "--seed" => {
                let v = value("--seed")?;
                out.seed = v.parse().map_err(|_| ArgsError::InvalidValue {
                    flag: "--seed",
                    value: v,
                })?;
            }
            "--diagonal" => {
                let v = value("--diagonal")?;
                out.diagonal = Some(match v.as_str() {
                    "strict" => Diagonal::Strict,
                    "cutting" => Diagonal::Cutting,
                    _ => {
                        return Err(ArgsError::InvalidValue {
                            flag: "--diagonal",
                            value: v,
                        });
                    }
                });
            }
            "--fps" => {
                let v = value("--fps")?;
                out.fps = v
                    .parse::<u32>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or(ArgsError::InvalidValue {
                        flag: "--fps",
                        value: v,
                    })?;
            }
            _ => return Err(ArgsError::UnknownFlag(arg)),
        }
    }
    Ok(Command::Run(out))
}

/// `RxC` with both sides positive.
fn parse_size(s: &str) -> Option<(i32, i32)> {
    let (r, c) = s.split_once(['x', 'X'])?;
    let rows = r.trim().parse::<i32>().ok().filter(|&n| n > 0)?;
    let cols = c.trim().parse::<i32>().ok().filter(|&n| n > 0)?;
    Some((rows, cols))
}

impl DemoArgs {
    pub fn config(&self) -> SearchConfig {
        match self.diagonal {
            None => SearchConfig::four_way(),
            Some(Diagonal::Strict) => SearchConfig::eight_way(false),
            Some(Diagonal::Cutting) => SearchConfig::eight_way(true),
        }
    }

    /// The seeded random grid, start top-left and goal bottom-right.
    pub fn scenario(&self) -> GridModel {
        let mut map = GridMap::new(self.rows, self.cols);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let placed = map.scatter_obstacles(&mut rng, self.density);
        log::debug!(
            "[demo] {}x{} grid, seed {}, {placed} obstacles",
            self.rows,
            self.cols,
            self.seed
        );
        map.snapshot(self.config())
    }
}

/// Figures printed after a search.
#[derive(Clone, Debug)]
pub struct Summary {
    pub path_len: Option<usize>,
    pub explored: usize,
    pub cost: Option<f64>,
    pub elapsed: Duration,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.path_len, self.cost) {
            (Some(len), Some(cost)) => writeln!(f, "path length: {len} cells, cost {cost:.3}")?,
            _ => writeln!(f, "no path")?,
        }
        writeln!(f, "explored:    {} nodes", self.explored)?;
        write!(f, "search time: {:?}", self.elapsed)
    }
}

/// Run the search on `grid`, timing it.
pub fn search(grid: GridModel) -> Result<(Trace, Outcome, Summary), InvalidGrid> {
    let started = Instant::now();
    let (trace, outcome) = run(grid)?;
    let elapsed = started.elapsed();
    let summary = Summary {
        path_len: outcome.path().map(<[_]>::len),
        explored: trace.stats().expanded,
        cost: outcome.total_cost(),
        elapsed,
    };
    Ok((trace, outcome, summary))
}
