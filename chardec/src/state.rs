//! Character-set state carried between runs (`--state`).

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chardec_core::CharsetMapping;

use crate::error::CliError;

/// Read a saved mapping. A missing file is not an error: the first run of
/// a session has nothing to restore.
pub fn load(path: &Path) -> Result<Option<CharsetMapping>, CliError> {
    match fs::read_to_string(path) {
        Ok(text) => toml::from_str(&text).map(Some).map_err(|source| CliError::State {
            path: path.to_owned(),
            source,
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CliError::File {
            path: path.to_owned(),
            source,
        }),
    }
}

pub fn save(path: &Path, mapping: &CharsetMapping) -> Result<(), CliError> {
    let text = toml::to_string_pretty(mapping)?;
    fs::write(path, text).map_err(|source| CliError::File {
        path: path.to_owned(),
        source,
    })
}
