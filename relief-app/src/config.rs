use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use bevy::log::info;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Reads a JSON options file. Fields left out of the file keep their
/// `Default` values.
pub fn load_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    info!("Loading options from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    return Ok(serde_json::from_reader(reader)?);
}
