use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::json;
use sweep::api::{
    draw_grid, solve, Budget, Circuit, CircuitSink, Coord, CoverageMode, Grid, GridSampleCfg,
    Problem, ReplayToken, RouteCfg, SearchOutcome, SearchReport,
};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "sweep-cli", version = sweep::VERSION)]
#[command(about = "Shortest sweeping circuits over street grids")]
struct Cmd {
    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Solve a problem file
    Solve {
        /// Header, grid rows, coverage flag and width
        problem: PathBuf,
        #[command(flatten)]
        route: RouteArgs,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Sample a random grid and solve it
    Random {
        #[arg(long, default_value_t = 4)]
        streets: usize,
        #[arg(long, default_value_t = 4)]
        avenues: usize,
        /// Probability of a two-way segment
        #[arg(long, default_value_t = 0.6, value_parser = parse_probability)]
        two_way: f64,
        /// Probability of a one-way segment
        #[arg(long, default_value_t = 0.3, value_parser = parse_probability)]
        one_way: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        /// Also write the sampled grid as a problem file
        #[arg(long)]
        save: Option<PathBuf>,
        #[command(flatten)]
        route: RouteArgs,
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CoverageArg {
    /// Both directions of every two-way street
    Every,
    /// One direction of every two-way street
    Either,
}

impl From<CoverageArg> for CoverageMode {
    fn from(arg: CoverageArg) -> Self {
        match arg {
            CoverageArg::Every => CoverageMode::EveryDirection,
            CoverageArg::Either => CoverageMode::EitherDirection,
        }
    }
}

/// Overrides for the route configuration.
#[derive(Args, Clone, Debug, Default)]
struct RouteArgs {
    /// Start intersection, e.g. `S1/A1` or `1,1`
    #[arg(long)]
    start: Option<Coord>,
    #[arg(long, value_enum)]
    coverage: Option<CoverageArg>,
    /// Moves explored in ranked order at each step
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    width: Option<u64>,
}

impl RouteArgs {
    fn apply(&self, mut cfg: RouteCfg) -> RouteCfg {
        if let Some(start) = self.start {
            cfg.start = start;
        }
        if let Some(coverage) = self.coverage {
            cfg.coverage = coverage.into();
        }
        if let Some(width) = self.width {
            cfg.width = usize::try_from(width).unwrap_or(usize::MAX);
        }
        cfg
    }
}

#[derive(Args, Clone, Debug, Default)]
struct RunArgs {
    /// Stop after this many search steps
    #[arg(long)]
    max_steps: Option<u64>,
    /// Stop after this many seconds
    #[arg(long, value_parser = parse_secs)]
    time_limit_secs: Option<Duration>,
    /// Write the search report as JSON (plus a provenance sidecar)
    #[arg(long)]
    out: Option<PathBuf>,
}

impl RunArgs {
    fn budget(&self) -> Budget {
        Budget::default()
            .with_steps(self.max_steps)
            .with_time(self.time_limit_secs)
    }
}

fn parse_secs(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{e}"))
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{p} is not a probability in [0, 1]"))
    }
}

/// Prints each improved circuit as soon as the search reports it.
struct Printer<W: Write> {
    out: W,
    failed: Option<io::Error>,
}

impl<W: Write> Printer<W> {
    fn new(out: W) -> Self {
        Self { out, failed: None }
    }

    fn finish(self) -> io::Result<()> {
        self.failed.map_or(Ok(()), Err)
    }
}

impl<W: Write> CircuitSink for Printer<W> {
    fn improved(&mut self, circuit: &Circuit) {
        if self.failed.is_some() {
            return;
        }
        let written = writeln!(self.out, "Circuit {circuit}")
            .and_then(|()| writeln!(self.out, "Length {}", circuit.length()))
            .and_then(|()| self.out.flush());
        if let Err(e) = written {
            self.failed = Some(e);
        }
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = match cmd.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    let stdout = io::stdout().lock();
    match cmd.action {
        Action::Solve { problem, route, run } => solve_file(&problem, &route, &run, stdout),
        Action::Random {
            streets,
            avenues,
            two_way,
            one_way,
            seed,
            index,
            save,
            route,
            run,
        } => {
            let sample = GridSampleCfg {
                streets,
                avenues,
                two_way,
                one_way,
            };
            let tok = ReplayToken { seed, index };
            solve_random(sample, tok, save.as_deref(), &route, &run, stdout)
        }
    }
}

fn solve_file<W: Write>(path: &Path, route: &RouteArgs, run: &RunArgs, out: W) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let problem = Problem::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
    let cfg = route.apply(problem.cfg);
    tracing::info!(problem = %path.display(), start = %cfg.start, "solving problem file");
    let report = run_search(&problem.grid, &cfg, run, out)?;
    if let Some(dest) = &run.out {
        write_report(dest, &report, run, path.display().to_string())?;
    }
    conclude(report)
}

fn solve_random<W: Write>(
    sample: GridSampleCfg,
    tok: ReplayToken,
    save: Option<&Path>,
    route: &RouteArgs,
    run: &RunArgs,
    mut out: W,
) -> Result<()> {
    let grid = draw_grid(sample, tok);
    let cfg = route.apply(RouteCfg::new(Coord::new(1, 1)));
    write!(out, "{grid}")?;
    if let Some(dest) = save {
        let problem = Problem {
            grid: grid.clone(),
            cfg,
        };
        fs::write(dest, problem.to_string())
            .with_context(|| format!("writing {}", dest.display()))?;
        tracing::info!(path = %dest.display(), "saved problem file");
    }
    let report = run_search(&grid, &cfg, run, out)?;
    if let Some(dest) = &run.out {
        let input = format!("random seed={} index={}", tok.seed, tok.index);
        write_report(dest, &report, run, input)?;
    }
    conclude(report)
}

fn run_search<W: Write>(
    grid: &Grid,
    cfg: &RouteCfg,
    run: &RunArgs,
    out: W,
) -> Result<SearchReport> {
    let mut printer = Printer::new(out);
    let report = solve(grid, cfg, &mut printer, &mut run.budget())?;
    printer.finish().context("writing circuits")?;
    tracing::info!(
        steps = report.stats.steps,
        circuits = report.stats.circuits,
        pruned = report.stats.pruned,
        virtual_arcs = report.eulerize.virtual_arcs,
        "search finished"
    );
    Ok(report)
}

fn write_report(dest: &Path, report: &SearchReport, run: &RunArgs, input: String) -> Result<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(dest, serde_json::to_vec_pretty(report)?)
        .with_context(|| format!("writing {}", dest.display()))?;
    let params = json!({
        "route": report.cfg,
        "max_steps": run.max_steps,
        "time_limit_secs": run.time_limit_secs.map(|d| d.as_secs_f64()),
    });
    let payload = provenance::Payload::new(params).with_input(input);
    let sidecar = provenance::write_sidecar(dest, payload)?;
    tracing::info!(report = %dest.display(), sidecar = %sidecar.display(), "wrote report");
    Ok(())
}

fn conclude(report: SearchReport) -> Result<()> {
    if let SearchOutcome::Interrupted { best: Some(c) } = &report.outcome {
        tracing::warn!(length = c.length(), "search interrupted; circuit not proven optimal");
    }
    report.outcome.into_result(report.cfg.start)?;
    Ok(())
}
