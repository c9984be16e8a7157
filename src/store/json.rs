use crate::errors::AppResult;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn ensure_dir(dir: &Path) -> AppResult<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Read a whole JSON document.
///
/// - missing file → `Ok(None)`
/// - empty file   → `Ok(None)`
/// - unreadable or malformed → `Err`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read(path)?;
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    Ok(Some(serde_json::from_slice(&raw)?))
}

/// Rewrite a whole JSON document (pretty printed), creating the parent folder.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> AppResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    let data = serde_json::to_vec_pretty(value)?;
    fs::write(path, data)?;
    Ok(())
}
