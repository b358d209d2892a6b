mod output;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{debug, info};
use luminara_config::ScanProfile;
use luminara_core::{Body, Engine};
use luminara_levels::{PriceLevel, cross_join, parse_percents, percent_grid, sqrt_ladder};
use luminara_search::{HarmonicConfig, Hit, nearest, next_match, prev_match, scan_harmonics, separation};
use luminara_time::{Epoch, UtcTime};
use serde::Serialize;

use crate::output::{HitRow, LevelRow, ProjectionRow, print_hits, print_levels, print_projections};

#[derive(Parser)]
#[command(name = "luminara", version, about = "Harmonic-angle timing scans and price projections")]
struct Cli {
    /// Scan profile (TOML); defaults to $LUMINARA_CONFIG, then built-ins
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Print JSON instead of a table
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apparent geocentric ecliptic longitude of a body
    Longitude {
        /// Body name or code (e.g. Moon, 301)
        #[arg(long)]
        body: Body,
        /// UTC date-time (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        date: UtcTime,
    },
    /// Directional separation (A − B) and the nearest configured target
    Separation {
        #[command(flatten)]
        pair: PairArgs,
        /// UTC date-time (YYYY-MM-DDThh:mm:ssZ)
        #[arg(long)]
        date: UtcTime,
    },
    /// All target hits in a UTC range
    Scan(ScanArgs),
    /// First hit of one target after a date
    NextMatch(MatchArgs),
    /// Last hit of one target before a date
    PrevMatch(MatchArgs),
    /// Price levels around an anchor price
    Levels(LevelArgs),
    /// Scan hits joined with price levels
    Project {
        #[command(flatten)]
        scan: ScanArgs,
        #[command(flatten)]
        levels: LevelArgs,
    },
}

#[derive(Args)]
struct PairArgs {
    /// First body of the pair
    #[arg(long, short = 'a')]
    body_a: Body,
    /// Second body of the pair
    #[arg(long, short = 'b')]
    body_b: Body,
}

#[derive(Args)]
struct ScanArgs {
    #[command(flatten)]
    pair: PairArgs,
    /// Start of the range (UTC)
    #[arg(long)]
    start: UtcTime,
    /// End of the range (UTC)
    #[arg(long)]
    end: UtcTime,
    /// Target angles in degrees, comma separated
    #[arg(long, value_delimiter = ',')]
    targets: Vec<f64>,
    /// Orb in degrees
    #[arg(long)]
    orb: Option<f64>,
    /// Coarse sampling step in minutes
    #[arg(long)]
    step_minutes: Option<f64>,
    /// Refine brackets in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Args)]
struct MatchArgs {
    #[command(flatten)]
    pair: PairArgs,
    /// Anchor UTC date-time
    #[arg(long)]
    date: UtcTime,
    /// Target angle in degrees
    #[arg(long)]
    target: f64,
    /// Search span in days
    #[arg(long)]
    days: Option<f64>,
    /// Orb in degrees
    #[arg(long)]
    orb: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelMethod {
    /// Symmetric percentage grid
    Percent,
    /// Square-root ladder
    Sqrt,
}

#[derive(Args)]
struct LevelArgs {
    /// Anchor price
    #[arg(long)]
    anchor: f64,
    #[arg(long, value_enum, default_value = "percent")]
    method: LevelMethod,
    /// Percent list for the grid, e.g. "12.5,25,50"
    #[arg(long)]
    percents: Option<String>,
    /// Root step for the ladder
    #[arg(long)]
    root_step: Option<f64>,
    /// Rungs on each side of the ladder
    #[arg(long)]
    turns: Option<u32>,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let profile = ScanProfile::load(cli.config.as_deref()).context("loading scan profile")?;
    run(cli.command, profile, cli.json)
}

fn run(command: Commands, mut profile: ScanProfile, json: bool) -> Result<()> {
    match command {
        Commands::Longitude { body, date } => {
            let engine = build_engine(&profile)?;
            let lon = engine
                .longitude(body, date.to_epoch())
                .with_context(|| format!("longitude of {body} at {date}"))?;
            if json {
                emit_json(&serde_json::json!({ "body": body.name(), "utc": date.to_string(), "longitude_deg": lon }))?;
            } else {
                println!("{body} at {date}: {lon:.6}°");
            }
        }

        Commands::Separation { pair, date } => {
            let engine = build_engine(&profile)?;
            let sep = separation(&engine, pair.body_a, pair.body_b, date.to_epoch())?;
            let targets = profile.default_targets()?;
            let config = profile.harmonic_config()?;
            let closest = nearest(sep, targets.as_slice(), config.mirror);
            if json {
                emit_json(&serde_json::json!({
                    "pair": format!("{}-{}", pair.body_a, pair.body_b),
                    "utc": date.to_string(),
                    "separation_deg": sep,
                    "nearest_target_deg": closest.map(|m| m.target_deg),
                    "deviation_deg": closest.map(|m| m.deviation_deg),
                }))?;
            } else {
                println!("{}-{} at {date}: {sep:.6}°", pair.body_a, pair.body_b);
                if let Some(m) = closest {
                    println!(
                        "nearest target {}° (arm {}°), off by {:.2}′",
                        m.target_deg,
                        m.matched_deg,
                        m.deviation_deg * 60.0
                    );
                }
            }
        }

        Commands::Scan(args) => {
            let hits = run_scan(&args, &mut profile)?;
            let rows: Vec<HitRow> = hits.iter().map(HitRow::from).collect();
            if json {
                emit_json(&rows)?;
            } else if rows.is_empty() {
                println!("No timing matches found within the orb in the selected range.");
            } else {
                print_hits(&rows);
            }
        }

        Commands::NextMatch(args) => {
            let hit = run_match(&args, &mut profile, true)?;
            report_match(hit, json, "after")?;
        }

        Commands::PrevMatch(args) => {
            let hit = run_match(&args, &mut profile, false)?;
            report_match(hit, json, "before")?;
        }

        Commands::Levels(args) => {
            let levels = build_levels(&args, &profile)?;
            let rows: Vec<LevelRow> = levels.iter().map(LevelRow::from).collect();
            if json {
                emit_json(&rows)?;
            } else {
                print_levels(&rows);
            }
        }

        Commands::Project { scan, levels } => {
            let hits = run_scan(&scan, &mut profile)?;
            let price_levels = build_levels(&levels, &profile)?;
            let rows: Vec<ProjectionRow> = cross_join(&hits, &price_levels)
                .into_iter()
                .map(|(hit, level)| ProjectionRow::new(hit, level, levels.anchor))
                .collect();
            if json {
                emit_json(&rows)?;
            } else if rows.is_empty() {
                println!("No timing matches found within the orb in the selected range.");
            } else {
                print_projections(&rows);
            }
        }
    }
    Ok(())
}

fn build_engine(profile: &ScanProfile) -> Result<Engine> {
    let config = profile.engine_config()?;
    Engine::new(config).context("building ephemeris engine")
}

fn run_scan(args: &ScanArgs, profile: &mut ScanProfile) -> Result<Vec<Hit>> {
    if let Some(orb) = args.orb {
        profile.scan.orb_deg = orb;
    }
    if let Some(step) = args.step_minutes {
        profile.scan.step_minutes = step;
    }
    if args.parallel {
        profile.scan.parallel = true;
    }
    let config = profile.harmonic_config()?;
    let targets = if args.targets.is_empty() {
        profile.scan.targets.clone()
    } else {
        args.targets.clone()
    };
    let engine = build_engine(profile)?;
    debug!("scan config: {config:?}");

    let (a, b) = (args.pair.body_a, args.pair.body_b);
    let hits = scan_harmonics(
        &engine,
        a,
        b,
        args.start.to_epoch(),
        args.end.to_epoch(),
        &targets,
        &config,
    )
    .with_context(|| format!("scanning {a}-{b} from {} to {}", args.start, args.end))?;
    info!("{} hits", hits.len());
    Ok(hits)
}

fn run_match(args: &MatchArgs, profile: &mut ScanProfile, forward: bool) -> Result<Option<Hit>> {
    if let Some(orb) = args.orb {
        profile.scan.match_orb_deg = orb;
    }
    let config: HarmonicConfig = profile.match_config()?;
    let days = args.days.unwrap_or(profile.scan.match_search_days);
    let engine = build_engine(profile)?;
    let (a, b) = (args.pair.body_a, args.pair.body_b);
    let anchor: Epoch = args.date.to_epoch();
    let hit = if forward {
        next_match(&engine, a, b, anchor, args.target, days, &config)
    } else {
        prev_match(&engine, a, b, anchor, args.target, days, &config)
    };
    hit.with_context(|| format!("searching {a}-{b} {}° around {}", args.target, args.date))
}

fn report_match(hit: Option<Hit>, json: bool, direction: &str) -> Result<()> {
    let row = hit.as_ref().map(HitRow::from);
    if json {
        return emit_json(&row);
    }
    match row {
        Some(row) => print_hits(std::slice::from_ref(&row)),
        None => println!("No match {direction} the anchor within the search span."),
    }
    Ok(())
}

fn build_levels(args: &LevelArgs, profile: &ScanProfile) -> Result<Vec<PriceLevel>> {
    let levels = match args.method {
        LevelMethod::Percent => {
            let percents = match &args.percents {
                Some(text) => parse_percents(text)?,
                None => profile.levels.percents.clone(),
            };
            if percents.is_empty() {
                bail!("no percents configured");
            }
            percent_grid(args.anchor, &percents)?
        }
        LevelMethod::Sqrt => sqrt_ladder(
            args.anchor,
            args.root_step.unwrap_or(profile.levels.root_step),
            args.turns.unwrap_or(profile.levels.turns),
        )?,
    };
    Ok(levels)
}

fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
