//! Command-line interface for quill
//! This binary compiles quill manuscripts into the publishing formats, or dumps the parsed
//! tree for inspection.
//!
//! Usage:
//!   quill `<path>` [--to `<format>`] [--chapter `<id>`] [--output `<file>`]   - Compile a manuscript
//!   quill --project `<name>`                                             - Compile a configured project
//!   quill --list-formats                                                 - List all output formats

mod error;
mod selfcheck;
mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command};
use error::CliError;
use quill_babel::FormatRegistry;
use quill_config::{Loader, QuillConfig};
use quill_parser::quill::loader::{Compilation, DocumentLoader, LoaderError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Read when `--config` is not given; absent is fine.
const LOCAL_CONFIG: &str = "quill.toml";

fn build_cli() -> Command {
    Command::new("quill")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile quill manuscripts into text, HTML, EPUB sections or LaTeX")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the manuscript")
                .index(1),
        )
        .arg(
            Arg::new("to")
                .long("to")
                .short('t')
                .value_name("FORMAT")
                .help("Output format (see --list-formats); defaults to the configured format"),
        )
        .arg(
            Arg::new("chapter")
                .long("chapter")
                .value_name("ID")
                .help("Only compile the chapter with this id"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Write to FILE instead of stdout"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .help("Configuration file layered over the defaults (default: ./quill.toml if present)"),
        )
        .arg(
            Arg::new("project")
                .long("project")
                .short('p')
                .value_name("NAME")
                .conflicts_with("path")
                .help("Compile a project from the configuration"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-self-check")
                .long("no-self-check")
                .help("Skip the built-in sample checks")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log parsing progress to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", err.report());
            ExitCode::from(1)
        }
    }
}

/// What to compile and where the result goes, after config and flags are combined.
#[derive(Debug)]
struct Job {
    input: PathBuf,
    target: String,
    chapter: Option<String>,
    output: Option<PathBuf>,
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let registry = FormatRegistry::default();

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return Ok(());
    }

    let config = load_config(matches)?;
    let job = resolve_job(matches, &config, &registry)?;
    debug!(?job, "resolved job");

    let (compiled, source_text) = compile(&job)?;

    let self_check = config.compile.self_check && !matches.get_flag("no-self-check");
    if self_check && !compiled.context.flags.skip_tests {
        selfcheck::run()?;
    } else {
        debug!("self-check skipped");
    }

    // Render errors point into the manuscript, keep it for the report.
    let rendered = transforms::execute_transform(&registry, &compiled, &job.target).map_err(
        |err| match err {
            CliError::Format(error) => CliError::Render {
                path: job.input.clone(),
                source_text,
                error,
            },
            other => other,
        },
    )?;

    match &job.output {
        Some(path) => write_output(path, &rendered),
        None => {
            print!("{}", rendered);
            Ok(())
        }
    }
}

fn load_config(matches: &ArgMatches) -> Result<QuillConfig, CliError> {
    let loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    Ok(loader.build()?)
}

/// Combines flags, project settings and configured defaults, in that order of precedence.
fn resolve_job(
    matches: &ArgMatches,
    config: &QuillConfig,
    registry: &FormatRegistry,
) -> Result<Job, CliError> {
    let flag = |name: &str| matches.get_one::<String>(name).cloned();

    let mut job = match (flag("project"), flag("path")) {
        (Some(name), _) => {
            let project = config.project(&name)?;
            Job {
                input: project.input_path()?,
                target: flag("to")
                    .or_else(|| project.format.clone())
                    .unwrap_or_else(|| config.output.format.clone()),
                chapter: flag("chapter").or_else(|| project.chapter.clone()),
                output: None,
            }
        }
        (None, Some(path)) => Job {
            input: PathBuf::from(path),
            target: flag("to").unwrap_or_else(|| config.output.format.clone()),
            chapter: flag("chapter"),
            output: None,
        },
        (None, None) => {
            return Err(CliError::Usage(
                "a manuscript path or --project is required".to_string(),
            ))
        }
    };

    if !transforms::is_known_target(registry, &job.target) {
        let known: Vec<String> = transforms::list_targets(registry)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        return Err(CliError::Usage(format!(
            "unknown format '{}' (available: {})",
            job.target,
            known.join(", ")
        )));
    }

    job.output = match (flag("output"), matches.contains_id("project")) {
        (Some(path), _) => Some(PathBuf::from(path)),
        // Project builds land in the configured output directory.
        (None, true) => Some(project_output(config, registry, &job)),
        (None, false) => None,
    };
    Ok(job)
}

fn project_output(config: &QuillConfig, registry: &FormatRegistry, job: &Job) -> PathBuf {
    let stem = job
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "book".to_string());
    let file_name = format!(
        "{}.{}",
        stem,
        transforms::output_extension(registry, &job.target)
    );
    config.output.directory.join(file_name)
}

/// The compiled book, plus the manuscript text for error reports.
fn compile(job: &Job) -> Result<(Compilation, String), CliError> {
    let mut loader = DocumentLoader::from_path(&job.input).map_err(|err| CliError::Io {
        path: job.input.clone(),
        message: err.to_string(),
    })?;
    if let Some(chapter) = &job.chapter {
        loader = loader.with_chapter(chapter.as_str());
    }

    info!(path = %job.input.display(), target = %job.target, "compiling");
    match loader.compile() {
        Ok(compiled) => Ok((compiled, loader.source().to_string())),
        Err(LoaderError::ParseError(error)) => Err(CliError::Parse {
            path: job.input.clone(),
            source_text: loader.source().to_string(),
            error,
        }),
        Err(LoaderError::IoError(message)) => Err(CliError::Io {
            path: job.input.clone(),
            message,
        }),
    }
}

fn write_output(path: &Path, rendered: &str) -> Result<(), CliError> {
    let io_error = |err: std::io::Error| CliError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, rendered).map_err(io_error)?;
    info!(path = %path.display(), bytes = rendered.len(), "wrote output");
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");

    for (name, description) in transforms::list_targets(registry) {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
