use crate::error::ErrorKind;
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The default number of fetch/decode/execute steps a host should run per
/// rendered 60hz frame.
const DEFAULT_STEPS_PER_FRAME: u32 = 10;

/// A struct to allow specification of ocho start-up parameters.
///
/// The two quirk toggles cover the instructions on which historic CHIP-8
/// interpreters disagreed; both default to the classic behaviour (shifts
/// operate on Vx alone, bulk register transfers leave I untouched).  An
/// [Options] instance can be loaded from a JSON file so ROM-specific quirk
/// profiles can be kept on disk.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// When true, 8XY6/8XYE copy Vy into Vx before shifting
    #[serde(default)]
    pub shift_reads_vy: bool,
    /// When true, FX55/FX65 leave I equal to I + x + 1
    #[serde(default)]
    pub load_store_increments_i: bool,
    /// Interpreter steps the host should run per rendered frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: u32,
}

fn default_steps_per_frame() -> u32 {
    DEFAULT_STEPS_PER_FRAME
}

impl Default for Options {
    /// Constructor that returns an [Options] instance with the classic
    /// quirk behaviour and typical execution speed.
    fn default() -> Self {
        Options {
            shift_reads_vy: false,
            load_store_increments_i: false,
            steps_per_frame: DEFAULT_STEPS_PER_FRAME,
        }
    }
}

impl Options {
    /// Reads an [Options] instance from the JSON file at the specified path,
    /// returning [ErrorKind::FileError] if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Options, ErrorKind> {
        let file_error = || ErrorKind::FileError {
            path: path.display().to_string(),
        };
        let json = fs::read_to_string(path).map_err(|_| file_error())?;
        serde_json::from_str(&json).map_err(|_| file_error())
    }
}
