//! u-select command-line front end.
//!
//! Exit status: 0 solution found (or selection accepted), 1 no solution
//! (or selection rejected), 2 invalid input, 3 search stopped early with
//! nothing found.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use u_select::model::{Assignment, AxisReading, Selection};
use u_select::scenario::{self, Problem};
use u_select::solver::{
    Evaluation, Exclusivity, GroupResult, GroupSolver, MultiGroupAssigner, MultiGroupOutcome,
    SolverConfig,
};
use u_select::SelectError;

#[derive(Parser)]
#[command(name = "u-select")]
#[command(about = "Exhaustive constrained subset selection", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Problem file (JSON with `pool` and `groups`)
    #[arg(long, conflicts_with = "scenario", required_unless_present = "scenario")]
    input: Option<PathBuf>,

    /// Built-in scenario
    #[arg(long, value_parser = PossibleValuesParser::new(scenario::NAMES.iter().copied()))]
    scenario: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate every valid selection or assignment
    Solve {
        #[command(flatten)]
        source: Source,

        /// Let one entity serve several groups
        #[arg(long, conflicts_with = "exclusive")]
        reuse: bool,

        /// Never let one entity serve two groups
        #[arg(long)]
        exclusive: bool,

        #[arg(long)]
        max_solutions: Option<usize>,

        #[arg(long)]
        max_evaluations: Option<u64>,

        #[arg(long)]
        time_limit_ms: Option<u64>,

        /// Evaluate candidates on all cores
        #[arg(long)]
        parallel: bool,

        /// Print the feeding log of every selection
        #[arg(long)]
        trace: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate one hand-picked selection
    Check {
        #[command(flatten)]
        source: Source,

        /// Group to check against
        #[arg(long)]
        group: String,

        /// Entity names
        #[arg(required = true)]
        members: Vec<String>,

        /// Print the feeding log
        #[arg(long)]
        trace: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed problem file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),

    #[error("unknown group `{0}`")]
    UnknownGroup(String),

    #[error(transparent)]
    Select(#[from] SelectError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();

    let result = match cli.command {
        Commands::Solve {
            source,
            reuse,
            exclusive,
            max_solutions,
            max_evaluations,
            time_limit_ms,
            parallel,
            trace,
            json,
        } => {
            let config = SolverConfig {
                max_evaluations,
                time_limit_ms,
                max_solutions,
                parallel,
                ..SolverConfig::default()
            };
            let mode = match (reuse, exclusive) {
                (true, _) => Some(Exclusivity::Reuse),
                (_, true) => Some(Exclusivity::Exclusive),
                _ => None,
            };
            run_solve(&source, &config, mode, trace, json)
        }
        Commands::Check {
            source,
            group,
            members,
            trace,
        } => run_check(&source, &group, &members, trace),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn load(source: &Source) -> Result<Problem, CliError> {
    if let Some(name) = &source.scenario {
        return scenario::by_name(name).ok_or_else(|| CliError::UnknownScenario(name.clone()));
    }
    let path = source.input.clone().unwrap_or_default();
    let text = std::fs::read_to_string(&path).map_err(|err| CliError::Io {
        path: path.clone(),
        source: err,
    })?;
    Ok(serde_json::from_str(&text)?)
}

fn run_solve(
    source: &Source,
    config: &SolverConfig,
    mode: Option<Exclusivity>,
    trace: bool,
    json: bool,
) -> Result<ExitCode, CliError> {
    let problem = load(source)?;
    let mode = mode.unwrap_or(problem.exclusivity);
    let (pool, groups) = problem.build().map_err(SelectError::from)?;
    let assigner = MultiGroupAssigner::new(&pool, &groups, config)?;
    let outcome = assigner.solve(mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome, trace);
    }

    let found = match &outcome {
        MultiGroupOutcome::Independent { groups } => groups.iter().all(|g| !g.is_empty()),
        MultiGroupOutcome::Exclusive(r) => !r.is_empty(),
    };
    Ok(if found {
        ExitCode::SUCCESS
    } else if outcome.is_complete() {
        ExitCode::from(1)
    } else {
        ExitCode::from(3)
    })
}

fn run_check(
    source: &Source,
    group: &str,
    members: &[String],
    trace: bool,
) -> Result<ExitCode, CliError> {
    let problem = load(source)?;
    let (pool, groups) = problem.build().map_err(SelectError::from)?;
    let requirement = groups
        .iter()
        .find(|g| g.name == group)
        .ok_or_else(|| CliError::UnknownGroup(group.to_string()))?;
    let solver = GroupSolver::new(&pool, requirement, &SolverConfig::default())?;
    let names: Vec<&str> = members.iter().map(String::as_str).collect();

    match solver.check(&names)? {
        Evaluation::Accepted(selection) => {
            println!("valid for {group}");
            print_selection(&selection, "  ", trace);
            Ok(ExitCode::SUCCESS)
        }
        Evaluation::Rejected(reason) => {
            println!("invalid for {group}: {reason}");
            Ok(ExitCode::from(1))
        }
    }
}

fn print_outcome(outcome: &MultiGroupOutcome, trace: bool) {
    match outcome {
        MultiGroupOutcome::Independent { groups } => {
            for result in groups {
                print_group(result, trace);
            }
        }
        MultiGroupOutcome::Exclusive(result) => {
            println!(
                "{} exclusive assignment(s), {} evaluated, {:?}",
                result.assignments.len(),
                result.evaluated,
                result.termination
            );
            for (i, assignment) in result.assignments.iter().enumerate() {
                print_assignment(i + 1, assignment, trace);
            }
        }
    }
}

fn print_group(result: &GroupResult, trace: bool) {
    println!(
        "{}: {} selection(s), {} evaluated, {:?}",
        result.group,
        result.selections.len(),
        result.evaluated,
        result.termination
    );
    for (i, selection) in result.selections.iter().enumerate() {
        println!("  #{}", i + 1);
        print_selection(selection, "    ", trace);
    }
}

fn print_assignment(n: usize, assignment: &Assignment, trace: bool) {
    println!("  #{n}");
    for selection in assignment.iter() {
        println!("    {}:", selection.group);
        print_selection(selection, "      ", trace);
    }
}

fn print_selection(selection: &Selection, indent: &str, trace: bool) {
    println!("{indent}{}", selection.members.join(", "));
    let readings: Vec<String> = selection
        .readings
        .iter()
        .map(|r| match r {
            AxisReading::Window { axis, window } => {
                format!("{axis} [{}, {}]", window.min, window.max)
            }
            AxisReading::Mean { axis, mean } => format!("{axis} avg {mean:.2}"),
        })
        .collect();
    if !readings.is_empty() {
        println!("{indent}{}", readings.join("  "));
    }
    if trace {
        if let Some(feeding) = &selection.feeding {
            for event in &feeding.events {
                println!("{indent}  {event}");
            }
            println!("{indent}  {}", feeding.verdict);
        }
    }
}
