//! Command line parsing and [`Config`] construction.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use tracing::Level;

/// The strip image read when no input is given.
const DEFAULT_INPUT: &str = "lgfont.png";

/// The packed font written when no output is given.
const DEFAULT_OUTPUT: &str = "lgfont.bin";

/// Description of a single conversion run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// The path of the strip image to convert.
    pub input: PathBuf,
    /// The path the packed font is written to.
    pub output: PathBuf,
    /// The glyphs to print once the font has been written.
    pub preview: Vec<u8>,
    /// The most verbose level that is logged.
    pub log_level: Level,
}

/// Parses the arguments required to produce a valid [`Config`].
pub fn parse_arguments(matches: &ArgMatches) -> Config {
    let input = matches
        .get_one::<PathBuf>("input")
        .cloned()
        .unwrap_or_else(|| unreachable!("`input` should have a default value"));

    let output = matches
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| unreachable!("`output` should have a default value"));

    let preview = matches
        .get_many::<u8>("preview")
        .map(|glyphs| glyphs.copied().collect())
        .unwrap_or_default();

    let log_level = match matches.get_count("verbose") {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    Config {
        input,
        output,
        preview,
        log_level,
    }
}

/// Returns the command parser for `lgfont-converter`.
pub fn command_parser() -> Command {
    let input = Arg::new("input")
        .long("input")
        .short('i')
        .env("LGFONT_INPUT")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_INPUT)
        .help("The strip image holding all 256 glyphs");

    let output = Arg::new("output")
        .long("output")
        .short('o')
        .env("LGFONT_OUTPUT")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_OUTPUT)
        .help("The path the packed font is written to");

    let preview = Arg::new("preview")
        .long("preview")
        .short('p')
        .value_parser(value_parser!(u8))
        .action(ArgAction::Append)
        .help("Prints the glyph with the given index after conversion");

    let verbose = Arg::new("verbose")
        .long("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Increases logging verbosity");

    Command::new("lgfont-converter")
        .about("Converts the large font strip image into a packed font")
        .arg(input)
        .arg(output)
        .arg(preview)
        .arg(verbose)
}
