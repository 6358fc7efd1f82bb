use clap::Parser;
use std::path::PathBuf;

/// Command-line configuration for the ocho desktop host, covering the
/// display, audio and interpreter pacing settings alongside the ROM path.
#[derive(Parser, Debug)]
#[command(name = "ocho", about = "A CHIP-8 interpreter", version)]
pub(crate) struct Args {
    /// Path to the CHIP-8 ROM image to run
    pub(crate) rom: PathBuf,

    /// Integer scale factor for the 64x32 display
    #[arg(short, long, default_value_t = 10)]
    pub(crate) scale: u32,

    /// Foreground (lit pixel) colour as RRGGBB hex
    #[arg(short, long, default_value = "FFFFFF", value_parser = parse_colour)]
    pub(crate) fg: [u8; 3],

    /// Background colour as RRGGBB hex
    #[arg(short, long, default_value = "000000", value_parser = parse_colour)]
    pub(crate) bg: [u8; 3],

    /// Disable audio output
    #[arg(short, long)]
    pub(crate) mute: bool,

    /// Audio volume, 0 to 100
    #[arg(short, long, default_value_t = 50)]
    pub(crate) volume: u8,

    /// Interpreter steps per rendered frame, overriding the options file
    #[arg(long)]
    pub(crate) steps: Option<u32>,

    /// Path to a JSON file of interpreter options (quirk toggles, pacing)
    #[arg(short, long)]
    pub(crate) options: Option<PathBuf>,
}

/// Parses an RRGGBB hex string (an optional `#` or `0x` prefix is accepted)
/// into its three colour channels.
fn parse_colour(argument: &str) -> Result<[u8; 3], String> {
    let digits = argument
        .trim_start_matches('#')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    if digits.len() != 6 {
        return Err(format!("expected six hex digits, got '{argument}'"));
    }
    let value = u32::from_str_radix(digits, 16).map_err(|error| error.to_string())?;
    Ok([(value >> 16) as u8, (value >> 8) as u8, value as u8])
}
