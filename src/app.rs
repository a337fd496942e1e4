//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the dataset path
//! - runs the threshold search
//! - prints the summary and grid map
//! - writes optional exports and debug bundles

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, GenerateArgs, SearchArgs, ShowArgs};
use crate::data::{SampleConfig, generate_candidates};
use crate::domain::{Candidate, ConstraintConfig, default_specialty_ratios};
use crate::error::AppError;
use crate::search::SearchMode;

pub mod pipeline;

use pipeline::RunConfig;

/// Entry point for the `cutoff` binary.
pub fn run() -> Result<(), AppError> {
    // `cutoff` and `cutoff --min-total-pass 50` behave like `cutoff search ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose);

    match cli.command {
        Command::Search(args) => handle_search(args),
        Command::Generate(args) => handle_generate(args),
        Command::Show(args) => handle_show(args),
    }
}

/// stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn handle_search(args: SearchArgs) -> Result<(), AppError> {
    let data_path = crate::cli::picker::resolve_dataset_path(args.file.clone())?;
    let config = run_config_from_args(&args, data_path);
    let run = pipeline::run_search(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, &run.outcome, &config.constraints)
    );
    if !args.no_grid {
        println!("{}", crate::plot::render_grid_map(&run.outcome));
    }

    if args.debug {
        let path = crate::debug::write_debug_bundle(&args.debug_dir, &run.ingest, &run.outcome, &config.constraints)?;
        println!("Debug bundle: {}", path.display());
    }

    let Some(summary) = &run.summary else {
        return Err(AppError::infeasible(crate::report::format_infeasible(&run.outcome)));
    };
    println!("{}", crate::report::format_pass_summary(summary));

    if let Some(path) = &args.export {
        let passing: Vec<&Candidate> = run.passing.iter().collect();
        crate::io::export::write_passing_csv(path, &passing)?;
    }
    if let Some(path) = &args.export_summary {
        let file = crate::io::summary::SummaryFile::new(
            config.data_path.display().to_string(),
            &config.constraints,
            summary,
        );
        crate::io::summary::write_summary_json(path, &file)?;
    }

    Ok(())
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        count: args.count,
        seed: args.seed,
        highschool_prob: args.highschool_prob,
        specialties: args.specialties,
        ..SampleConfig::default()
    };
    let candidates = generate_candidates(&config)?;
    crate::io::export::write_candidates_csv(&args.output, &candidates)?;

    info!(count = candidates.len(), seed = config.seed, "generated sample");
    println!("Wrote {} candidates to {}", candidates.len(), args.output.display());
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let file = crate::io::summary::read_summary_json(&args.summary)?;

    println!(
        "Saved by {} on {} (source: {})",
        file.tool,
        file.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        file.source
    );
    println!(
        "Constraints: pass [{}, {}], high-school >= {}, floors class >= {} quiz >= {}, specialty objective {}",
        file.constraints.min_total_pass,
        file.constraints.max_total_pass,
        file.constraints.min_highschool,
        file.constraints.min_class_score,
        file.constraints.min_quiz_score,
        if file.constraints.use_specialty_threshold { "on" } else { "off" },
    );
    println!("{}", crate::report::format_pass_summary(&file.summary));
    Ok(())
}

pub fn run_config_from_args(args: &SearchArgs, data_path: std::path::PathBuf) -> RunConfig {
    RunConfig {
        data_path,
        constraints: constraints_from_args(args),
        mode: if args.parallel {
            SearchMode::Parallel
        } else {
            SearchMode::Sequential
        },
    }
}

/// Defaults for the known specialties, overridden (or extended) by `--ratio`.
pub fn constraints_from_args(args: &SearchArgs) -> ConstraintConfig {
    let mut min_specialty_ratio = default_specialty_ratios();
    for (label, ratio) in &args.ratios {
        min_specialty_ratio.insert(label.clone(), *ratio);
    }

    ConstraintConfig {
        min_total_pass: args.min_total_pass,
        max_total_pass: args.max_total_pass,
        min_highschool: args.min_highschool,
        min_class_score: args.min_class_score,
        min_quiz_score: args.min_quiz_score,
        min_specialty_ratio,
        use_specialty_threshold: args.use_specialty_threshold,
    }
}

/// Rewrite argv so `cutoff` defaults to `cutoff search`.
///
/// Rules:
/// - `cutoff`                      -> `cutoff search`
/// - `cutoff -f pool.csv ...`      -> `cutoff search -f pool.csv ...`
/// - `cutoff -v generate ...`      -> unchanged (global `-v` before a subcommand)
/// - `cutoff -vv`                  -> `cutoff -vv search`
/// - `cutoff --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    // Leading verbosity flags are global and may precede the subcommand.
    let first = 1 + argv.iter().skip(1).take_while(|arg| is_verbose_flag(arg)).count();

    let Some(arg1) = argv.get(first).cloned() else {
        argv.push("search".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if matches!(arg1.as_str(), "search" | "generate" | "show") {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(first, "search".to_string());
    }
    argv
}

fn is_verbose_flag(arg: &str) -> bool {
    arg == "--verbose"
        || arg
            .strip_prefix('-')
            .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c == 'v'))
}
