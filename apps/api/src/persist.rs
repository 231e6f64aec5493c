//! Persistence Adapter — versioned, collision-free report file naming.
//!
//! First write for a base name goes to `<base>_output.json`; subsequent
//! writes scan existing siblings `<base>_output<N>.json`, take the maximum
//! `N` and use `N + 1`. Malformed suffixes are ignored, and an existing file
//! is never overwritten.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// Determines the next non-colliding output path for `base` inside `dir`.
pub fn next_output_path(dir: &Path, base: &str) -> PathBuf {
    let unversioned = dir.join(format!("{base}_output.json"));
    if !unversioned.exists() {
        return unversioned;
    }
    // The unversioned file is implicitly version 1.
    let next = max_existing_version(dir, base).max(1) + 1;
    dir.join(format!("{base}_output{next}.json"))
}

/// The highest `N` among existing `<base>_output<N>.json` siblings, or 0.
/// Non-numeric or otherwise malformed suffixes never crash the scan; they
/// simply do not participate in the numbering.
fn max_existing_version(dir: &Path, base: &str) -> u32 {
    let prefix = format!("{base}_output");
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter_map(|name| {
            let suffix = name.strip_prefix(&prefix)?.strip_suffix(".json")?;
            suffix.parse::<u32>().ok()
        })
        .max()
        .unwrap_or(0)
}

/// Writes the report JSON under the next free versioned name and returns the
/// path written. Creation is exclusive: if another writer claims the same
/// name first, the version is re-resolved and the write retried.
pub fn save_report(dir: &Path, base: &str, json: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    loop {
        let path = next_output_path(dir, base);
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(mut file) => {
                file.write_all(json.as_bytes())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("report saved to {}", path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("failed to create {}", path.display()))
            }
        }
    }
}
