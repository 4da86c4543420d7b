use std::path::{Path, PathBuf};

use catalog::Degraded;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{parse_folder_name, ReconcilerRules};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("dataset root {0} does not exist")]
    MissingRoot(PathBuf),
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> ScanError + '_ {
    move |source| ScanError::Io { path: path.to_path_buf(), source }
}

/// One per-class image folder. Built fresh on every scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetEntry {
    pub folder_name: String,
    pub plant_type: String,
    pub disease_type: String,
    pub is_healthy: bool,
    pub display_name: String,
    pub image_count: u64,
    pub folder_path: PathBuf,
}

/// Direct child files with an image extension. A missing or unreadable
/// folder counts as 0.
pub fn count_images_in_folder(folder: &Path, rules: &ReconcilerRules) -> u64 {
    if !folder.exists() {
        return 0;
    }
    match try_count_images(folder, rules) {
        Ok(n) => n,
        Err(e) => {
            warn!(folder = %folder.display(), error = %e, "counting images failed");
            0
        }
    }
}

fn try_count_images(folder: &Path, rules: &ReconcilerRules) -> Result<u64, ScanError> {
    let mut n = 0;
    for entry in std::fs::read_dir(folder).map_err(io_err(folder))? {
        let entry = entry.map_err(io_err(folder))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if rules.is_image_name(&entry.file_name().to_string_lossy()) {
            n += 1;
        }
    }
    Ok(n)
}

/// Scan `root` for dataset folders, sorted by folder name.
///
/// Never fails toward the caller: a missing root or any listing/stat error
/// yields an empty list plus the issue.
pub fn list_datasets(root: &Path, rules: &ReconcilerRules) -> Degraded<Vec<DatasetEntry>, ScanError> {
    let res = try_list_datasets(root, rules);
    if let Err(e) = &res {
        warn!(root = %root.display(), error = %e, "dataset scan degraded to empty");
    }
    Degraded::from_result(res)
}

fn try_list_datasets(root: &Path, rules: &ReconcilerRules) -> Result<Vec<DatasetEntry>, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(root).map_err(io_err(root))? {
        let entry = entry.map_err(io_err(root))?;
        let path = entry.path();
        let meta = std::fs::metadata(&path).map_err(io_err(&path))?;
        if meta.is_dir() {
            names.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    names.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = Vec::new();
    for (name, path) in names {
        let Some(parsed) = parse_folder_name(&name, rules) else { continue };
        let image_count = count_images_in_folder(&path, rules);
        out.push(DatasetEntry {
            folder_name: parsed.folder_name,
            plant_type: parsed.plant_type,
            disease_type: parsed.disease_type,
            is_healthy: parsed.is_healthy,
            display_name: parsed.display_name,
            image_count,
            folder_path: path,
        });
    }

    info!(root = %root.display(), datasets = out.len(), "dataset scan complete");
    Ok(out)
}
