//! Tool for converting the large font strip image into the packed font blob loaded by the display
//! code.

use anyhow::Result;
use tracing::debug;

pub mod cli;

fn main() -> Result<()> {
    let config = cli::parse_arguments(&cli::command_parser().get_matches());

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    debug!(?config, "parsed arguments");

    let packed = lgfont_converter::convert_file(&config.input, &config.output)?;
    let font = packed.as_font();
    for &c in &config.preview {
        println!("glyph {c:#04x}:\n{}", font.glyph(c));
    }

    Ok(())
}
