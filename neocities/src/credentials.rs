use crate::error::Error;
use secrecy::SecretString;
use std::{fs, path::Path};

/// Read an API key stored in a file.
///
/// The whole file is the key, minus a single trailing line ending.
pub fn read_key_file(path: impl AsRef<Path>) -> Result<SecretString, Error> {
    let path = path.as_ref();
    let mut key = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if key.ends_with('\n') {
        key.pop();
        if key.ends_with('\r') {
            key.pop();
        }
    }
    Ok(SecretString::from(key))
}
