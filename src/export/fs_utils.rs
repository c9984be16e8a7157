// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, Write};
use std::path::Path;

/// Make sure the export target can be (over)written.
///
/// A directory is always refused. An existing file is replaced silently
/// with `force`, otherwise the operator is asked first.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if path.is_dir() {
        return Err(AppError::Export(format!(
            "'{}' is a directory",
            path.display()
        )));
    }
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("'{}' already exists.", path.display()));
    if confirm("Overwrite? [y/N]: ")? {
        info("Existing file will be replaced.");
        Ok(())
    } else {
        Err(AppError::Export("export cancelled, file kept".into()))
    }
}

fn confirm(prompt: &str) -> AppResult<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
