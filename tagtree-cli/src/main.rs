//! Command-line interface for tagtree
//! Parses a markup file (or stdin) and prints the element tree.
//!
//! Usage:
//!   tagtree `<path>` [--format `<tree|json>`] [--strict] [--buffer-size `<bytes>`]
//!   tagtree - < input.xml                                 - Read from stdin

mod printer;

use std::io::{self, Write};
use std::process;

use clap::{value_parser, Arg, ArgAction, Command};
use log::debug;
use tagtree_core::options::DEFAULT_BUFFER_SIZE;
use tagtree_core::{parse_file_with, parse_with, Document, ParseOptions};

use printer::Format;

fn main() {
    let matches = Command::new("tagtree")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse a tagtree document and print its element tree")
        .arg(
            Arg::new("path")
                .help("Path to the document ('-' or absent reads stdin)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["tree", "json"])
                .default_value("tree"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Reject non-whitespace input after the root element")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("buffer-size")
                .long("buffer-size")
                .value_name("BYTES")
                .help("Read chunk size (default 8192)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let format = matches
        .get_one::<String>("format")
        .and_then(|name| Format::from_name(name))
        .unwrap_or(Format::Tree);
    let buffer_size = matches
        .get_one::<usize>("buffer-size")
        .copied()
        .unwrap_or(DEFAULT_BUFFER_SIZE);

    let mut options = ParseOptions::new().with_buffer_size(buffer_size);
    if matches.get_flag("strict") {
        options = options.strict();
    }

    let path = matches.get_one::<String>("path").map(String::as_str);
    let doc = load(path, &options).unwrap_or_else(|e| {
        eprintln!("{}: {}", path.unwrap_or("<stdin>"), e);
        process::exit(1);
    });
    debug!("parsed {} elements", doc.len());

    let output = printer::render(&doc, format).unwrap_or_else(|e| {
        eprintln!("Error formatting output: {}", e);
        process::exit(1);
    });
    if let Err(e) = io::stdout().lock().write_all(output.as_bytes()) {
        if e.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("Error writing output: {}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load(path: Option<&str>, options: &ParseOptions) -> tagtree_core::Result<Document> {
    match path {
        None | Some("-") => {
            debug!("reading stdin");
            parse_with(io::stdin().lock(), options)
        }
        Some(path) => {
            debug!("reading {}", path);
            parse_file_with(path, options)
        }
    }
}
