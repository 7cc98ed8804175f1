use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde_json::json;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;
use trackflix_core::{default_export_file_name, export_csv, CatalogService, MediaStore};

use crate::output::Output;

/// Explicit path if given, otherwise a dated file in the export directory.
pub fn resolve_export_path(path: Option<PathBuf>, export_dir: &Path) -> PathBuf {
    path.unwrap_or_else(|| export_dir.join(default_export_file_name(chrono::Local::now().date_naive())))
}

pub fn run_export<S: MediaStore>(
    catalog: &CatalogService<S>,
    path: Option<PathBuf>,
    export_dir: &Path,
    output: &Output,
) -> Result<PathBuf> {
    let path = resolve_export_path(path, export_dir);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let items = catalog.all()?;
    let file = File::create(&path).wrap_err_with(|| format!("Failed to create {}", path.display()))?;
    let rows = export_csv(file, &items).wrap_err("Failed to write CSV export")?;
    info!("Exported {} rows to {}", rows, path.display());

    if output.is_json() {
        output.json(&json!({ "type": "exported", "rows": rows, "path": path }));
    } else {
        output.success(format!("Exported {} entries to {}", rows, path.display()));
    }
    Ok(path)
}
