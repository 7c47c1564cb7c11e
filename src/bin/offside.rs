//! Command-line interface for offside
//! This binary dumps the token stream or block tree of a source file.
//!
//! Usage:
//!   offside execute `<path>` [--format `<format>`] [--config `<file>`] [--strict]  - Process a file
//!   offside list-formats                                                    - List all available formats

use clap::{Arg, ArgAction, ArgMatches, Command};
use offside::offside::config::{Loader, TrackerConfig};
use offside::offside::processor::{available_formats, process_file, ProcessingSpec};
use tracing::Level;

fn main() {
    let matches = Command::new("offside")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect how indentation turns into block tokens")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log synthesized tokens (-v) or every scanned token (-vv) to stderr")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("execute")
                .about("Process a source file and print the result")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (e.g., 'token-simple', 'tree-treeviz')")
                        .default_value("token-simple"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Reject dedents that match no open indentation level")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available output formats"))
        .get_matches();

    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("execute", execute_matches)) => handle_execute_command(execute_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_config(matches: &ArgMatches) -> TrackerConfig {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("strict") {
        loader = loader
            .set_override("tracker.dedent", "strict")
            .unwrap_or_else(|e| fail(e));
    }
    loader.build().unwrap_or_else(|e| fail(e)).tracker
}

/// Handle the execute command
fn handle_execute_command(matches: &ArgMatches) {
    let path = matches
        .get_one::<String>("path")
        .unwrap_or_else(|| fail("missing path"));
    let format = matches
        .get_one::<String>("format")
        .unwrap_or_else(|| fail("missing format"));

    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| fail(e));
    let config = load_config(matches);
    let output = process_file(path, &spec, &config).unwrap_or_else(|e| fail(e));

    print!("{}", output);
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
