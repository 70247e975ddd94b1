//! Command-line interface for fortran-forest
//! This binary parses a fixed-form Fortran source file and prints the
//! resulting parse forest.
//!
//! Usage:
//!   fortran-forest `<path>` [--format `<format>`]   - Parse a file and dump the forest

use clap::{Arg, Command};
use std::fs;
use std::process;

fn main() {
    let matches = Command::new("fortran-forest")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse a fixed-form Fortran source file into a token forest")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the Fortran source file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: 'tree' (structural dump) or 'json'")
                .default_value("tree"),
        )
        .get_matches();

    let path = matches.get_one::<String>("path").expect("path is required");
    let format = matches.get_one::<String>("format").expect("format has a default");

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            process::exit(1);
        }
    };

    match fortran_forest::parse(&source) {
        Ok(forest) => match format.as_str() {
            "tree" => println!("{}", forest),
            "json" => match serde_json::to_string_pretty(&forest) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing forest: {}", e);
                    process::exit(1);
                }
            },
            other => {
                eprintln!("Unknown format '{}', expected 'tree' or 'json'", other);
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error parsing text: {}", e);
            process::exit(1);
        }
    }
}
