use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use js_mutant::File;
use js_mutant::mutant::ApiMutant;

/// Write every file under `out_dir`, keeping its relative path.
///
/// Returns the written paths in input order.
pub fn write_files(out_dir: &Path, files: &[File]) -> Result<Vec<PathBuf>> {
    files
        .iter()
        .map(|file| {
            let path = out_dir.join(relative_path(&file.name));
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create output dir {:?}", parent))?;
            }
            fs::write(&path, &file.content)
                .with_context(|| format!("failed to write {:?}", path))?;
            Ok(path)
        })
        .collect()
}

/// Write `mutants.json` containing every mutant of the emitted files.
pub fn write_mutants_json(out_dir: &Path, mutants: &[ApiMutant]) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output dir {:?}", out_dir))?;
    let path = out_dir.join("mutants.json");
    write_pretty_json(&path, mutants)
}

/// `name` without root, prefix, `.` or `..` components, so it always lands
/// inside the output directory.
fn relative_path(name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}

// `?Sized` allows passing unsized values such as slices (e.g. `&[ApiMutant]`).
fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    fs::write(path, json).with_context(|| format!("failed to write {:?}", path))?;
    Ok(())
}
