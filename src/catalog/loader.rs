use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;
use tracing::{debug, warn};

use crate::catalog::problem::Problem;
use crate::catalog::record::CatalogFile;
use crate::catalog::{Catalog, CatalogError, StaticCatalog};

#[derive(Embed)]
#[folder = "assets/catalog/"]
struct CatalogAssets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(Format::Toml),
            Some("json") => Some(Format::Json),
            _ => None,
        }
    }
}

/// Parse one catalog file's contents into problems stored under `category`.
///
/// Records that do not convert are skipped with a warning; only a file that
/// fails to parse at all is an error.
pub fn parse_category(
    category: &str,
    content: &str,
    path: &Path,
) -> Result<Vec<Problem>, CatalogError> {
    let format = Format::from_path(path).unwrap_or(Format::Toml);
    let file: CatalogFile = match format {
        Format::Toml => toml::from_str(content).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        Format::Json => serde_json::from_str(content).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
    };

    let mut problems = Vec::with_capacity(file.problems.len());
    for record in file.problems {
        match record.into_problem(category) {
            Ok(problem) => problems.push(problem),
            Err(err) => warn!(%category, file = %path.display(), error = %err, "skipping catalog record"),
        }
    }
    Ok(problems)
}

/// Record `path` under its file stem. `foo.toml` wins over `foo.json`
/// whatever order the files are listed in.
fn add_file(files: &mut BTreeMap<String, PathBuf>, path: PathBuf) {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return;
    };
    let stem = stem.to_string();
    if let Some(kept) = files.get(&stem) {
        let keep_new = Format::from_path(&path) == Some(Format::Toml);
        let (used, ignored) = if keep_new { (&path, kept) } else { (kept, &path) };
        warn!(
            category = %stem,
            used = %used.display(),
            ignored = %ignored.display(),
            "duplicate catalog file for category"
        );
        if !keep_new {
            return;
        }
    }
    files.insert(stem, path);
}

/// Categories bundled into the binary, sorted by key.
pub fn load_bundled() -> StaticCatalog {
    let mut files: BTreeMap<String, PathBuf> = BTreeMap::new();
    for name in CatalogAssets::iter() {
        let path = PathBuf::from(name.as_ref());
        if Format::from_path(&path).is_none() {
            continue;
        }
        add_file(&mut files, path);
    }

    let mut catalog = StaticCatalog::new();
    for (category, path) in files {
        let Some(file) = path.to_str().and_then(CatalogAssets::get) else {
            continue;
        };
        let Ok(content) = std::str::from_utf8(file.data.as_ref()) else {
            warn!(file = %path.display(), "bundled catalog is not valid UTF-8");
            continue;
        };
        match parse_category(&category, content, &path) {
            Ok(problems) => catalog.insert_category(category, problems),
            Err(err) => warn!(error = %err, "skipping bundled catalog file"),
        }
    }
    catalog
}

/// Read every `*.toml` / `*.json` file in `dir` into `catalog`. A file whose
/// stem matches an existing category replaces it; other stems are appended in
/// key order. When both `foo.toml` and `foo.json` exist only the TOML file is
/// read. Returns how many files were applied.
pub fn merge_directory(catalog: &mut StaticCatalog, dir: &Path) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = %dir.display(), error = %err, "no user catalog directory");
            return 0;
        }
    };

    let mut files: BTreeMap<String, PathBuf> = BTreeMap::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || Format::from_path(&path).is_none() {
            continue;
        }
        add_file(&mut files, path);
    }

    let mut applied = 0;
    for (category, path) in files {
        match read_category(&category, &path) {
            Ok(problems) => {
                debug!(%category, count = problems.len(), "loaded user catalog");
                catalog.insert_category(category, problems);
                applied += 1;
            }
            Err(err) => warn!(error = %err, "skipping user catalog file"),
        }
    }
    applied
}

fn read_category(category: &str, path: &Path) -> Result<Vec<Problem>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_category(category, &content, path)
}

/// Bundled catalog overlaid with the user's catalog directory, if any.
pub fn load(user_dir: Option<&Path>) -> StaticCatalog {
    let mut catalog = load_bundled();
    if let Some(dir) = user_dir {
        merge_directory(&mut catalog, dir);
    }
    debug!(
        categories = catalog.categories().len(),
        problems = catalog.problem_count(),
        "catalog ready"
    );
    catalog
}
