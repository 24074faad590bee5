//! Filesystem glue around the songbook core. The core never touches the
//! disk; everything here reads the site's catalog, lists the sheet-music
//! folder, and writes the two exports back, wrapping each step with
//! `anyhow` context the same way the persistence layer reports failures.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};

use crate::models::Field;
use crate::songbook::{SortBy, Songbook};

/// Catalog location relative to the site directory. The sync writes it back
/// sorted by name.
const CATALOG_FILE: &str = "_data/songs.csv";
/// Secondary export sorted by key.
const BY_KEY_FILE: &str = "_data/songs_by_key.csv";

/// Where the catalog and its by-key export live inside a site directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    /// The catalog itself, rewritten sorted by name on every sync.
    pub catalog: PathBuf,
    /// Copy of the catalog sorted by key, read by the site's by-key page.
    pub by_key: PathBuf,
}

impl SitePaths {
    /// Resolve both files under `site`. Nothing is checked on disk here.
    pub fn new(site: &Path) -> Self {
        Self {
            catalog: site.join(CATALOG_FILE),
            by_key: site.join(BY_KEY_FILE),
        }
    }
}

/// Summary of one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Songs in the catalog before the sync.
    pub catalog_songs: usize,
    /// Distinct sheet files found in the sheet-music folder.
    pub sheets_found: usize,
    /// Songs that only existed as sheet files.
    pub songs_added: usize,
    /// Songs in the catalog after the sync.
    pub total_songs: usize,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} songs in catalog, {} sheets found, {} added, {} total",
            self.catalog_songs, self.sheets_found, self.songs_added, self.total_songs
        )
    }
}

/// List regular files in `dir` as `(stem, extension)` pairs, split at the
/// last dot. Files without an extension get an empty one. Entries come back
/// sorted by file name so repeated runs see the same order.
pub fn list_sheets(dir: &Path) -> Result<Vec<(String, String)>> {
    if !dir.is_dir() {
        bail!("{} is not a sheet-music directory", dir.display());
    }

    let mut file_names = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to read sheet directory {}", dir.display()))?
    {
        let entry = entry.context("failed to read sheet directory entry")?;
        let file_type = entry
            .file_type()
            .context("failed to inspect sheet directory entry")?;
        if !file_type.is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(file_name) => file_names.push(file_name),
            Err(raw) => warn!("skipping non UTF-8 file name {raw:?}"),
        }
    }
    file_names.sort();

    Ok(file_names
        .into_iter()
        .map(|file_name| match file_name.rsplit_once('.') {
            Some((stem, extension)) => (stem.to_string(), extension.to_string()),
            None => (file_name, String::new()),
        })
        .collect())
}

/// Read the catalog at `path`. A catalog that does not exist yet is empty.
pub fn load_catalog(path: &Path) -> Result<Songbook> {
    if !path.exists() {
        warn!("no catalog at {}, starting from an empty songbook", path.display());
        return Ok(Songbook::empty());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    Songbook::load(&text).with_context(|| format!("failed to parse catalog {}", path.display()))
}

/// Sort `songbook` by `by` and write it to `path`, creating parent
/// directories as needed.
pub fn write_export(songbook: &mut Songbook, by: SortBy, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let text = songbook
        .export(Some(by))
        .with_context(|| format!("failed to serialize songbook sorted by {by}"))?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    debug!("wrote {} songs sorted by {by} to {}", songbook.len(), path.display());
    Ok(())
}

/// Reconcile the site's catalog with the sheet-music folder: songs that only
/// exist as sheet files are added, known songs pick up their sheet type, and
/// both exports are rewritten.
pub fn sync_songbook(site: &Path, sheets: &Path) -> Result<SyncReport> {
    let paths = SitePaths::new(site);
    info!("site directory: {}", site.display());
    info!("sheet directory: {}", sheets.display());

    let catalog = load_catalog(&paths.catalog)?;
    let observed = Songbook::from_directory_listing(list_sheets(sheets)?);
    let added = observed
        .songs()
        .iter()
        .filter(|song| !catalog.contains(&song.name))
        .count();

    let mut merged = catalog
        .merge_default(&observed)
        .context("failed to merge sheet files into the catalog")?;

    write_export(&mut merged, SortBy::Name, &paths.catalog)?;
    write_export(&mut merged, SortBy::Key, &paths.by_key)?;

    let report = SyncReport {
        catalog_songs: catalog.len(),
        sheets_found: observed.len(),
        songs_added: added,
        total_songs: merged.len(),
    };
    info!("{report}");
    Ok(report)
}

/// Names of catalog songs whose `field` is empty.
pub fn missing_songs(site: &Path, field: Field) -> Result<Vec<String>> {
    let paths = SitePaths::new(site);
    let catalog = load_catalog(&paths.catalog)?;
    let missing = catalog.missing(field);
    debug!("{} of {} songs have no {field}", missing.len(), catalog.len());
    Ok(missing)
}
