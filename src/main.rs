//! Command-line shell around the sort engine.
//!
//! Flag parsing, input selection (file or stdin) and exit-code plumbing
//! live here; all ordering semantics live in the library.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::process;

use clap::{Arg, Command};

use esort::{
    config::{SortConfig, SortConfigBuilder, SortMode},
    error::{SortError, SortResult},
    run_check, run_sort, EXIT_SUCCESS,
};

fn main() {
    match run() {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("sort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn run() -> SortResult<i32> {
    let matches = build_cli().get_matches();
    let config = parse_config_from_matches(&matches)?;

    let (source, reader) = open_input(matches.get_one::<String>("file"))?;

    if config.check {
        run_check(reader, &source, &config)?;
        return Ok(EXIT_SUCCESS);
    }

    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());
    run_sort(reader, output, &config)?;
    Ok(EXIT_SUCCESS)
}

fn build_cli() -> Command {
    Command::new("sort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("sort [OPTION]... [FILE]")
        .about("Sort lines of text")
        .long_about("Sort lines of text read from FILE or standard input.\n\nWith -c, check whether the input is already sorted instead of sorting it.")
        .disable_help_flag(true)  // We use -h for human-numeric sort
        .arg(Arg::new("file")
            .help("Input file to sort (use '-' or omit for stdin)")
            .value_name("FILE"))
        .arg(Arg::new("reverse")
            .short('r')
            .long("reverse")
            .help("Reverse the result of comparisons")
            .action(clap::ArgAction::SetTrue))
        .arg(Arg::new("numeric-sort")
            .short('n')
            .long("numeric-sort")
            .help("Compare according to string numerical value")
            .action(clap::ArgAction::SetTrue))
        .arg(Arg::new("month-sort")
            .short('M')
            .long("month-sort")
            .help("Compare by three-letter month names (Jan..Dec)")
            .action(clap::ArgAction::SetTrue))
        .arg(Arg::new("human-numeric-sort")
            .short('h')
            .long("human-numeric-sort")
            .help("Compare human readable numbers (e.g., 2K 1G)")
            .action(clap::ArgAction::SetTrue))
        .arg(Arg::new("unique")
            .short('u')
            .long("unique")
            .help("Output only the first of an equal run")
            .action(clap::ArgAction::SetTrue))
        .arg(Arg::new("key")
            .short('k')
            .long("key")
            .help("Sort by tab-delimited column N (1-based)")
            .value_name("N"))
        .arg(Arg::new("ignore-blanks")
            .short('b')
            .long("ignore-blanks")
            .help("Ignore leading and trailing blanks in keys")
            .action(clap::ArgAction::SetTrue))
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; do not sort")
            .action(clap::ArgAction::SetTrue))
        .arg(Arg::new("help")
            .long("help")
            .help("Display this help and exit")
            .action(clap::ArgAction::Help))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &clap::ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    // Typed modes are mutually exclusive; precedence mirrors the
    // comparator chain: human, then month, then numeric.
    let mode = if matches.get_flag("human-numeric-sort") {
        SortMode::HumanNumeric
    } else if matches.get_flag("month-sort") {
        SortMode::Month
    } else if matches.get_flag("numeric-sort") {
        SortMode::Numeric
    } else {
        SortMode::Lexicographic
    };
    builder = builder.mode(mode);

    if matches.get_flag("reverse") {
        builder = builder.reverse();
    }
    if matches.get_flag("unique") {
        builder = builder.unique();
    }
    if matches.get_flag("ignore-blanks") {
        builder = builder.ignore_blanks();
    }
    if matches.get_flag("check") {
        builder = builder.check();
    }

    if let Some(column_str) = matches.get_one::<String>("key") {
        let column: usize = column_str
            .parse()
            .map_err(|_| SortError::invalid_key_column(column_str))?;
        builder = builder.key_column(column);
    }

    builder.build()
}

/// Open the input source: a named file, or stdin for '-' or no argument.
/// Returns the diagnostic source name alongside the reader.
fn open_input(file: Option<&String>) -> SortResult<(String, Box<dyn BufRead>)> {
    match file {
        Some(path) if path != "-" => {
            let file = File::open(path).map_err(|e| SortError::cannot_open(path, &e))?;
            Ok((path.clone(), Box::new(BufReader::new(file))))
        }
        _ => Ok(("-".to_string(), Box::new(BufReader::new(io::stdin())))),
    }
}
