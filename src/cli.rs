//! Command-line surface: argument parsing and the top-level dispatch that
//! `main` calls into.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ConfigLoader;
use crate::driver::{Driver, GraphSource};
use crate::error::{PatroidError, Result};
use crate::report::Report;

#[derive(Parser)]
#[command(name = "patroid")]
#[command(version, about = "Recognizes Gang-of-Four design pattern occurrences in a codebase")]
pub struct Cli {
    /// Analyze a single project rooted at this path.
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Batch mode: analyze every immediate subdirectory of this path.
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Read/write the intermediate relation graph at this file. Defaults
    /// to `output_module.xml` under the project when `--path` is given
    /// without this flag. When given without `--path`/`--dir`, the graph
    /// is read from this file instead of extracted.
    #[arg(long)]
    pub module_file: Option<PathBuf>,

    /// Emit a full stack trace on failure.
    #[arg(long)]
    pub debug_mode: bool,

    /// Print results as JSON instead of text.
    #[arg(long)]
    pub format_json: bool,

    #[arg(long, short)]
    pub verbose: bool,

    #[arg(long, short)]
    pub quiet: bool,
}

fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };

        eprintln!("\x1b[1;31minternal error:\x1b[0m {message}");
        if let Some(location) = panic_info.location() {
            eprintln!("  at {}:{}:{}", location.file(), location.line(), location.column());
        }
        default_hook(panic_info);
    }));
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

pub fn main() -> ExitCode {
    setup_panic_handler();
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.debug_mode {
                error!("{err:?}");
            } else {
                eprintln!("\x1b[31merror:\x1b[0m {err}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = ConfigLoader::load()?;
    let driver = Driver::new(&config);

    match (&cli.path, &cli.dir, &cli.module_file) {
        (None, None, None) => Err(PatroidError::InputMissing),
        (None, Some(dir), _) => {
            let results = driver.run_batch(dir)?;
            print_batch(&results, cli.format_json);
            Ok(())
        }
        (Some(path), None, module_file) => {
            let module_file = module_file
                .clone()
                .unwrap_or_else(|| path.join(&config.output.module_file));
            let name = project_name(path);
            let report = driver.run_project(&name, GraphSource::Extract { root: path }, &module_file)?;
            print_report(&report, cli.format_json);
            Ok(())
        }
        (None, None, Some(module_file)) => {
            let name = project_name(module_file);
            let report = driver.run_project(&name, GraphSource::ModuleFile { path: module_file }, module_file)?;
            print_report(&report, cli.format_json);
            Ok(())
        }
        (Some(_), Some(_), _) => Err(PatroidError::Config(
            "--path and --dir are mutually exclusive".to_string(),
        )),
    }
}

fn project_name(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_report(report: &Report, as_json: bool) {
    if as_json {
        println!("{}", serde_json::to_string_pretty(report).unwrap_or_default());
        return;
    }

    println!("project: {}", report.project);
    println!("total occurrences: {}", report.total_occurrences());
    for (pattern, occs) in &report.occurrences {
        if !occs.is_empty() {
            println!("  {pattern}: {}", occs.len());
        }
    }
}

fn print_batch(results: &[(String, Result<Report>)], as_json: bool) {
    if as_json {
        let summaries: Vec<_> = results
            .iter()
            .map(|(name, outcome)| match outcome {
                Ok(report) => serde_json::json!({ "project": name, "report": report }),
                Err(err) => serde_json::json!({ "project": name, "error": err.to_string() }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&summaries).unwrap_or_default());
        return;
    }

    for (name, outcome) in results {
        match outcome {
            Ok(report) => println!("{name}: {} occurrences", report.total_occurrences()),
            Err(err) => println!("{name}: skipped ({err})"),
        }
    }
}
