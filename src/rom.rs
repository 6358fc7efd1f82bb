use crate::error::ErrorKind;
use crate::memory::MEMORY_SIZE;
use std::fs;
use std::path::Path;

/// The memory address at which programs are loaded and execution begins.
pub(crate) const ROM_START_ADDRESS: usize = 0x200;
/// The largest ROM image that fits between the entry point and the end of
/// memory (3584 bytes).
pub(crate) const MAX_ROM_SIZE: usize = MEMORY_SIZE - ROM_START_ADDRESS;

/// An abstraction of a CHIP-8 ROM image: a flat, headerless byte stream
/// ready for loading into the interpreter.
#[derive(Clone, Default)]
pub struct Rom {
    bytes: Vec<u8>,
}

impl Rom {
    /// Constructor that returns a [Rom] instance wrapping the passed bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Rom { bytes }
    }

    /// Reads a [Rom] from the file at the specified path, returning
    /// [ErrorKind::FileError] if it cannot be read.
    pub fn from_file(path: &Path) -> Result<Rom, ErrorKind> {
        let bytes = fs::read(path).map_err(|_| ErrorKind::FileError {
            path: path.display().to_string(),
        })?;
        Ok(Rom { bytes })
    }

    /// Returns the ROM image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size of the ROM image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the ROM holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
