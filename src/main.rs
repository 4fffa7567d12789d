use std::path::PathBuf;
use std::process::ExitCode;

use clap::{arg, Command};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tour_opt::constructive::ZeroDistancePolicy;
use tour_opt::generator::random_points;
use tour_opt::logging::{init_logger, LogObserver};
use tour_opt::solver::{solve, SolverConfig};
use tour_opt::Result;

fn cli() -> Command {
    Command::new("tour-opt")
        .about("Approximates a shortest closed tour over random points")
        .arg(
            arg!(--size [SIZE] "Number of random points")
                .value_parser(clap::value_parser!(usize))
                .default_value("500"),
        )
        .arg(
            arg!(--seed [SEED] "Seed for point generation and the start index")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--config [CONFIG] "Path to a JSON solver config")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--"max-scans" [MAX_SCANS] "Stop after this many 2-opt scans")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--"time-limit-ms" [MS] "Stop 2-opt after this many milliseconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--"min-gain" [GAIN] "Only apply moves with a larger gain")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(arg!(--"exclude-zero-distance" "Never pick a coincident point as the nearest neighbor"))
        .arg(
            arg!(--"log-level" [LEVEL] "off, error, warn, info, debug or trace")
                .value_parser(clap::value_parser!(LevelFilter))
                .default_value("info"),
        )
        .arg(arg!(--"log-timestamp" "Prefix log lines with a millisecond timestamp"))
        .arg(arg!(--json "Print the solution as JSON"))
}

fn run() -> Result<()> {
    let matches = cli().get_matches();

    let level = matches
        .get_one::<LevelFilter>("log-level")
        .copied()
        .unwrap_or(LevelFilter::Info);
    init_logger(level, matches.get_flag("log-timestamp"))?;

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => SolverConfig::from_json_file(path)?,
        None => SolverConfig::default(),
    };
    if let Some(&max_scans) = matches.get_one::<usize>("max-scans") {
        config.two_opt.max_scans = Some(max_scans);
    }
    if let Some(&ms) = matches.get_one::<u64>("time-limit-ms") {
        config.two_opt.time_limit_ms = Some(ms);
    }
    if let Some(&min_gain) = matches.get_one::<f64>("min-gain") {
        config.two_opt.min_gain = min_gain;
    }
    if matches.get_flag("exclude-zero-distance") {
        config.zero_distance = ZeroDistancePolicy::Exclude;
    }

    let size = matches.get_one::<usize>("size").copied().unwrap_or(500);
    let mut rng = match matches.get_one::<u64>("seed") {
        Some(&seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let points = random_points(size, &mut rng);
    let solution = solve(&points, &config, &mut rng, &mut LogObserver::default())?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        println!(
            "length {:.6} (initial {:.6}), {} scans, {} moves, {:?}",
            solution.length, solution.initial_length, solution.scans, solution.moves, solution.stop
        );
        println!("{:.3}ms", solution.elapsed_ms);
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
