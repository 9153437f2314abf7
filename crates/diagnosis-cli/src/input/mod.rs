pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Input from `--input <file>` if given, else from piped stdin.
///
/// `None` means neither was supplied and the caller falls back to flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}
