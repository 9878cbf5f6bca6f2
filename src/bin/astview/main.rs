//! Command-line interface for astview
//!
//! Usage:
//!   astview view [`<path>`] [--language `<lang>`]                    - Open the interactive viewer
//!   astview analyze `<path>` [--language `<lang>`] [--format `<fmt>`] - Print the tree of a file
//!   astview sample `<lang>`                                          - Print a built-in sample
//!   astview list-formats                                           - List output formats
//!
//! Global options: `--config <file>` layers a TOML file over the defaults, `--log-file <file>`
//! sends logs to a file.

mod logging;
mod viewer;

use astview::config::{AstviewConfig, Loader};
use astview::formats::FormatRegistry;
use astview::host::{Controller, Language};
use clap::{Arg, ArgMatches, Command, ValueHint};
use logging::LogTarget;
use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};
use viewer::app::App;
use viewer::ui::LayoutOptions;

type CliResult<T> = Result<T, Box<dyn Error>>;

fn build_cli() -> Command {
    let language_arg = Arg::new("language")
        .long("language")
        .short('l')
        .help("Language of the source: javascript, jsx, python or c (default: from the file extension, then config)");

    Command::new("astview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explore syntax trees of small programs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Configuration file layered over the built-in defaults")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .global(true)
                .help("Write logs to this file")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("view")
                .about("Open the interactive viewer")
                .arg(
                    Arg::new("path")
                        .help("Source file to open (default: the language's sample)")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(language_arg.clone()),
        )
        .subcommand(
            Command::new("analyze")
                .about("Analyze a file and print its tree")
                .arg(
                    Arg::new("path")
                        .help("Source file to analyze ('-' for stdin)")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(language_arg)
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see list-formats)")
                        .default_value("outline"),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("Print the built-in sample program of a language")
                .arg(
                    Arg::new("language")
                        .help("javascript, jsx, python or c")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
}

fn main() {
    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("view", view_matches)) => handle_view_command(view_matches),
        Some(("analyze", analyze_matches)) => handle_analyze_command(analyze_matches),
        Some(("sample", sample_matches)) => handle_sample_command(sample_matches),
        Some(("list-formats", _)) => {
            handle_list_formats_command();
            Ok(())
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration, applying `--language` (or the file extension) as an override
fn load_config(matches: &ArgMatches, path: Option<&Path>) -> CliResult<AstviewConfig> {
    let mut loader = Loader::new();
    if let Some(config_path) = matches.get_one::<String>("config") {
        loader = loader.with_file(config_path);
    }

    let explicit = matches
        .get_one::<String>("language")
        .map(|name| name.parse::<Language>())
        .transpose()?;
    let inferred = path
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension);

    if let Some(language) = explicit.or(inferred) {
        loader = loader.set_override("analysis.default_language", language.name())?;
    }
    Ok(loader.build()?)
}

fn log_file<'a>(matches: &'a ArgMatches, config: &'a AstviewConfig) -> Option<&'a Path> {
    matches
        .get_one::<String>("log-file")
        .map(Path::new)
        .or(config.logging.file.as_deref())
}

/// A controller for the configured language with every configured external parser registered
fn build_controller(config: &AstviewConfig) -> Controller {
    let mut controller = Controller::new(config.analysis.default_language);
    for (language, parser) in config.parser_commands() {
        controller.register_parser(language, Box::new(parser));
    }
    controller
}

fn read_source(path: &str) -> CliResult<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    std::fs::read_to_string(path).map_err(|e| format!("Error reading {path}: {e}").into())
}

/// Handle the view command
fn handle_view_command(matches: &ArgMatches) -> CliResult<()> {
    let path = matches.get_one::<String>("path").map(PathBuf::from);
    let config = load_config(matches, path.as_deref())?;

    let target = match log_file(matches, &config) {
        Some(file) => LogTarget::File(file),
        None => LogTarget::Off,
    };
    logging::init(&config.logging.filter, target)?;

    let mut controller = build_controller(&config);
    let title = match &path {
        Some(path) => {
            controller.set_source(read_source(&path.to_string_lossy())?);
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string()
        }
        None => "sample".to_string(),
    };

    let layout = LayoutOptions {
        tree_width: config.viewer.tree_width,
        min_width: config.viewer.min_width,
    };
    viewer::viewer_main::run_viewer(App::new(controller, layout, title))?;
    Ok(())
}

/// Handle the analyze command
fn handle_analyze_command(matches: &ArgMatches) -> CliResult<()> {
    let path = matches
        .get_one::<String>("path")
        .ok_or("a path is required")?;
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("outline");

    let config = load_config(matches, Some(Path::new(path)))?;
    let target = match log_file(matches, &config) {
        Some(file) => LogTarget::File(file),
        None => LogTarget::Stderr,
    };
    logging::init(&config.logging.filter, target)?;

    let registry = FormatRegistry::with_defaults();
    if !registry.has(format) {
        return Err(format!(
            "Format '{format}' not found (available: {})",
            registry.list_formats().join(", ")
        )
        .into());
    }

    let mut controller = build_controller(&config);
    controller.set_source(read_source(path)?);
    let tree = controller.analyze()?;
    print!("{}", registry.serialize(tree, format)?);
    Ok(())
}

/// Handle the sample command
fn handle_sample_command(matches: &ArgMatches) -> CliResult<()> {
    let name = matches
        .get_one::<String>("language")
        .ok_or("a language is required")?;
    let language: Language = name.parse()?;
    println!("{}", language.sample());
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for (name, description) in registry.describe() {
        println!("  {name}");
        println!("    {description}");
    }
}
