use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the stint directory - checks for local .stint first, then falls back to global ~/.stint
pub fn get_stint_dir() -> Result<PathBuf> {
    // Check for local .stint directory
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_stint(&current_dir) {
        return Ok(local_dir);
    }

    // Fall back to global ~/.stint
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".stint"))
}

/// Find local .stint directory by walking up the directory tree
fn find_local_stint(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let stint_dir = current.join(".stint");
        if stint_dir.exists() && stint_dir.is_dir() {
            return Some(stint_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the stint directory exists
pub fn ensure_stint_dir() -> Result<PathBuf> {
    let dir = get_stint_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .stint directory in the current directory
pub fn init_local_stint() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let stint_dir = current_dir.join(".stint");

    if stint_dir.exists() {
        anyhow::bail!("Stint directory already exists: {}", stint_dir.display());
    }

    fs::create_dir_all(&stint_dir)
        .with_context(|| format!("Failed to create directory: {}", stint_dir.display()))?;

    Ok(stint_dir)
}

/// Get path to the task snapshot (tasks.json)
pub fn tasks_file() -> Result<PathBuf> {
    Ok(ensure_stint_dir()?.join("tasks.json"))
}

/// Get path to the daily check-in snapshot (checkins.json)
pub fn checkins_file() -> Result<PathBuf> {
    Ok(ensure_stint_dir()?.join("checkins.json"))
}

/// Get path to the receipt file for a specific date (receipt-YYYY-MM-DD.txt)
pub fn receipt_file(date: chrono::NaiveDate) -> Result<PathBuf> {
    let filename = format!("receipt-{}.txt", date.format("%Y-%m-%d"));
    Ok(ensure_stint_dir()?.join(filename))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .context("File path has no parent directory")?;

    // Create temp file in the same directory
    let mut temp_file =
        NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    // Atomically rename temp file to target
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
