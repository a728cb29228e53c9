use clap::{Parser, ValueEnum};
use clash::snapshot;
use clash::{
    CompatibilityTable, Error, Report, ReportOptions, Resolver, Strategy,
    WindowType, DEFAULT_SWEEP_THRESHOLD,
};
use itertools::Itertools;
use regex::Regex;
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use tracing::error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// Episode-range story arcs.
    Arc,
    /// Region-tagged title availability windows.
    Availability,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Naive,
    Sweep,
    Auto,
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Kind of windows stored in the snapshot files.
    #[arg(short, long, value_enum)]
    kind: Kind,

    /// Treat "all" availability windows as conflicting with every other
    /// window type.
    #[arg(short, long, default_value_t = false)]
    all_subsumes: bool,

    /// Only report windows whose id matches this regular expression.
    #[arg(short = 'm', long = "match", value_name = "regex")]
    id_match: Option<String>,

    /// How candidate pairs are enumerated.
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Snapshot size from which the auto strategy uses the sweep line.
    #[arg(
        long,
        env = "CLASH_SWEEP_THRESHOLD",
        default_value_t = DEFAULT_SWEEP_THRESHOLD,
        value_name = "num"
    )]
    sweep_threshold: usize,

    /// Include the merged coverage of each category.
    #[arg(short, long, default_value_t = false)]
    coverage: bool,

    /// Print reports as JSON.
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Print only the conflict count of each file.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Exit with status 2 when any conflict is found.
    #[arg(long, default_value_t = false)]
    fail_on_conflict: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Snapshot files to check.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

impl Cli {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Naive => Strategy::Naive,
            StrategyArg::Sweep => Strategy::SweepLine,
            StrategyArg::Auto => Strategy::Auto {
                threshold: self.sweep_threshold,
            },
        }
    }
}

// Result from a thread
struct ClashSuccess {
    rendered: String,
    conflicts: usize,
}

fn render<T: Serialize + Display>(
    report: Report<T>,
    cli: &Cli,
) -> Result<ClashSuccess, Error> {
    let rendered = if cli.json {
        serde_json::to_string_pretty(&report)?
    } else if cli.quiet {
        report.summary()
    } else {
        report.to_string().trim_end().to_string()
    };

    Ok(ClashSuccess {
        rendered,
        conflicts: report.conflict_count,
    })
}

fn check_snapshot(
    source: String,
    reader: BufReader<File>,
    cli: &Cli,
    options: &ReportOptions,
) -> Result<ClashSuccess, Error> {
    match cli.kind {
        Kind::Arc => {
            let windows = snapshot::load_arcs(reader)?;
            let resolver = Resolver::strict().with_strategy(cli.strategy());
            render(Report::build(source, &windows, &resolver, options), cli)
        }
        Kind::Availability => {
            let windows = snapshot::load_availability(reader)?;
            // an empty table is strict category equality
            let table = if cli.all_subsumes {
                WindowType::subsuming_all()
            } else {
                CompatibilityTable::new()
            };
            let resolver = Resolver::new(table).with_strategy(cli.strategy());
            render(Report::build(source, &windows, &resolver, options), cli)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    clash::logging::init(cli.verbose);

    if cli.all_subsumes && cli.kind != Kind::Availability {
        eprintln!("--all-subsumes only applies to availability windows");
        return ExitCode::from(1);
    }

    // compile the id filter
    let id_filter = match cli.id_match.as_deref().map(Regex::new).transpose() {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", Error::from(e));
            return ExitCode::from(1);
        }
    };
    let options = ReportOptions {
        id_filter,
        coverage: cli.coverage,
    };

    let mut failed = false;
    let mut conflicts = 0;

    thread::scope(|s| {
        let handles: Vec<_> = cli
            .files
            .iter()
            .map(|file| snapshot::open(file).map(|reader| (file, reader)))
            .map_ok(|(file, reader)| {
                let (cli, options) = (&cli, &options);
                // only spawn a thread for a readable file
                s.spawn(move || {
                    check_snapshot(file.display().to_string(), reader, cli, options)
                })
            })
            .collect();

        // process all the results, in argument order
        for handle in handles {
            let result = match handle {
                Ok(scoped_join_handle) => scoped_join_handle.join(),
                Err(e) => {
                    eprintln!("{e}");
                    failed = true;
                    continue;
                }
            };

            match result {
                Ok(Ok(success)) => {
                    conflicts += success.conflicts;
                    println!("{}", success.rendered);
                }
                Ok(Err(e)) => {
                    eprintln!("{e}");
                    failed = true;
                }
                Err(_) => {
                    error!("snapshot worker panicked");
                    failed = true;
                }
            }
        }
    });

    if failed {
        ExitCode::from(1)
    } else if cli.fail_on_conflict && conflicts > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
